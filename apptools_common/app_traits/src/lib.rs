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

// Capability traits shared by the apptools crates

/// Entity that carries a human readable name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Named entity whose name may be replaced after construction.
pub trait Nameable: Named {
    /// Replaces the name and returns the previous one.
    fn rename(&mut self, name: String) -> String;
}

/// Read access to string properties.
pub trait Configured {
    type Error;

    fn property(&self, key: &str) -> Result<String, Self::Error>;
}

/// Read/write access to string properties.
///
/// Writers return the value that was in effect before the call, or an empty
/// string when there was none. Implementations are expected to be shared
/// handles, so mutation goes through `&self`.
pub trait Configurable: Configured {
    fn set_property(&self, key: &str, value: &str) -> Result<String, Self::Error>;

    fn remove_property(&self, key: &str) -> Result<String, Self::Error>;
}

/// Builder for instances of `T`.
///
/// `is_valid` reports whether `build` would succeed with the current
/// settings; `build` performs the same checks and fails instead of producing
/// a half-configured instance.
pub trait InstanceBuilder<T> {
    type Error;

    fn is_valid(&self) -> bool;

    fn build(&self) -> Result<T, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Worker {
        name: String,
    }

    impl Named for Worker {
        fn name(&self) -> &str {
            &self.name
        }
    }

    impl Nameable for Worker {
        fn rename(&mut self, name: String) -> String {
            std::mem::replace(&mut self.name, name)
        }
    }

    #[test]
    fn test_rename_returns_previous_name() {
        let mut worker = Worker { name: "scanner".to_string() };
        assert_eq!(worker.rename("indexer".to_string()), "scanner");
        assert_eq!(worker.name(), "indexer");
    }
}
