/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::mem;
use std::sync::Arc;

use app_traits::{Nameable, Named};

/// Closed set of property keys an application recognizes.
///
/// The embedding application supplies the implementation; the properties
/// manager only ever asks it for membership.
pub trait KeySet: Send + Sync {
    fn supported_keys(&self) -> HashSet<&str>;

    fn supports(&self, key: &str) -> bool {
        self.supported_keys().contains(key)
    }
}

impl KeySet for HashSet<String> {
    fn supported_keys(&self) -> HashSet<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn supports(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl KeySet for BTreeSet<String> {
    fn supported_keys(&self) -> HashSet<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn supports(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl KeySet for &'static [&'static str] {
    fn supported_keys(&self) -> HashSet<&str> {
        self.iter().copied().collect()
    }

    fn supports(&self, key: &str) -> bool {
        self.iter().any(|k| *k == key)
    }
}

impl<T: KeySet + ?Sized> KeySet for Arc<T> {
    fn supported_keys(&self) -> HashSet<&str> {
        (**self).supported_keys()
    }

    fn supports(&self, key: &str) -> bool {
        (**self).supports(key)
    }
}

/// Key set declared as a constant, e.g.
///
/// ```
/// use config_manager::{KeySet, StaticKeys};
///
/// const SERVER_KEYS: StaticKeys = StaticKeys::new("server", &["host", "port"]);
/// assert!(SERVER_KEYS.supports("port"));
/// ```
///
/// The key list is fixed; the name may be replaced through [`Nameable`].
#[derive(Debug, Clone)]
pub struct StaticKeys {
    name: Cow<'static, str>,
    keys: &'static [&'static str],
}

impl StaticKeys {
    pub const fn new(name: &'static str, keys: &'static [&'static str]) -> Self {
        StaticKeys { name: Cow::Borrowed(name), keys }
    }
}

impl KeySet for StaticKeys {
    fn supported_keys(&self) -> HashSet<&str> {
        self.keys.iter().copied().collect()
    }

    fn supports(&self, key: &str) -> bool {
        self.keys.iter().any(|k| *k == key)
    }
}

impl Named for StaticKeys {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Nameable for StaticKeys {
    fn rename(&mut self, name: String) -> String {
        mem::replace(&mut self.name, Cow::Owned(name)).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_set_keys() {
        let keys: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert!(keys.supports("a"));
        assert!(!keys.supports("c"));
        assert_eq!(keys.supported_keys().len(), 2);
    }

    #[test]
    fn test_slice_keys() {
        let keys: &'static [&'static str] = &["host", "port"];
        assert!(keys.supports("host"));
        assert!(!keys.supports("HOST"));
    }

    #[test]
    fn test_static_keys_named() {
        let keys = StaticKeys::new("db", &["url", "user"]);
        assert_eq!(keys.name(), "db");
        assert!(keys.supports("user"));
        assert_eq!(keys.supported_keys(), HashSet::from(["url", "user"]));
    }

    #[test]
    fn test_static_keys_rename() {
        let mut keys = StaticKeys::new("db", &["url"]);
        assert_eq!(keys.rename("primary-db".to_string()), "db");
        assert_eq!(keys.name(), "primary-db");
        assert!(keys.supports("url"));
    }

    #[test]
    fn test_default_supports_uses_supported_keys() {
        struct Single;
        impl KeySet for Single {
            fn supported_keys(&self) -> HashSet<&str> {
                HashSet::from(["only"])
            }
        }

        let keys: Arc<dyn KeySet> = Arc::new(Single);
        assert!(keys.supports("only"));
        assert!(!keys.supports("other"));
    }
}
