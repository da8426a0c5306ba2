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

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use app_traits::{Configurable, Configured};
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{ConfigError, Result};
use crate::keys::KeySet;

/// Returned by writers when no value was in effect before the call.
const EMPTY_PROP: &str = "";

/// Write-once base layer: the legal keys and the default values paired with
/// them at initialization.
struct DefaultsLayer {
    keys: Arc<dyn KeySet>,
    values: HashMap<String, String>,
}

/// Mutable state behind the entries lock. `layer` is a copy of the handle
/// published under the defaults lock, so readers never need that lock.
#[derive(Default)]
struct Entries {
    layer: Option<Arc<DefaultsLayer>>,
    overrides: HashMap<String, String>,
}

/// Thread-safe store of string properties validated against a [`KeySet`].
///
/// The store is initialized exactly once, with a key set and optional
/// defaults. Afterwards values may be overridden with [`set`](Self::set),
/// [`load`](Self::load) and [`load_file`](Self::load_file); overrides are
/// layered over the defaults.
///
/// Two reader/writer locks guard independent state:
///
/// * `defaults` guards the write-once [`DefaultsLayer`]
/// * `entries` guards the overrides together with a copy of the layer handle
///
/// When both are needed the defaults lock is always taken first. Only
/// initialization (and the test reset hook) needs both, so ordinary
/// `get`/`set` traffic never waits on the initialization path.
///
/// Most applications use the process-wide instance through
/// [`init_with_defaults`], [`init_from_file`], [`init_empty`] and
/// [`get_instance`]. [`PropertiesManager::new`] builds an independent store
/// with the same protocol.
pub struct PropertiesManager {
    // lock order: defaults, then entries
    defaults: RwLock<Option<Arc<DefaultsLayer>>>,
    entries: RwLock<Entries>,
}

static INSTANCE: Lazy<PropertiesManager> = Lazy::new(PropertiesManager::new);

impl PropertiesManager {
    /// Creates a new, uninitialized store.
    ///
    /// Every accessor fails with `ConfigError::NotInitialized` until one of
    /// the `init_*` methods succeeds.
    pub fn new() -> Self {
        PropertiesManager {
            defaults: RwLock::new(None),
            entries: RwLock::new(Entries::default()),
        }
    }

    pub(crate) fn global() -> &'static Self {
        &INSTANCE
    }

    pub fn is_initialized(&self) -> bool {
        self.defaults.read().is_some()
    }

    /// Initializes the store with a key set and no default values.
    ///
    /// # Errors
    ///
    /// * `ConfigError::AlreadyInitialized` if any initializer succeeded before
    /// * `ConfigError::InvalidConfig` if `keys` is empty
    pub fn init_empty<K: KeySet + 'static>(&self, keys: K) -> Result<()> {
        self.ensure_uninitialized()?;
        check_key_set(&keys)?;
        self.install(Arc::new(keys), HashMap::new())
    }

    /// Initializes the store with a key set and default values.
    ///
    /// The defaults become the base layer for the lifetime of the store.
    /// Validation runs before the write-once slot is touched, so a rejected
    /// call leaves the store uninitialized.
    ///
    /// # Errors
    ///
    /// * `ConfigError::AlreadyInitialized` if any initializer succeeded before
    /// * `ConfigError::InvalidConfig` if `keys` is empty or a default key is
    ///   not in `keys`
    pub fn init_with_defaults<K: KeySet + 'static>(&self, keys: K, defaults: HashMap<String, String>) -> Result<()> {
        self.ensure_uninitialized()?;
        check_key_set(&keys)?;
        let keys: Arc<dyn KeySet> = Arc::new(keys);
        validate_props(keys.as_ref(), &defaults, "default properties")?;
        self.install(keys, defaults)
    }

    /// Initializes the store from a flat properties file.
    ///
    /// The file is read and parsed before any lock is taken, then the call
    /// behaves like [`init_with_defaults`](Self::init_with_defaults).
    ///
    /// # Errors
    ///
    /// * `ConfigError::AlreadyInitialized` if any initializer succeeded before
    /// * `ConfigError::FileNotFound` / `ConfigError::Io` if the file cannot be read
    /// * `ConfigError::MalformedFile` if the file cannot be parsed
    /// * `ConfigError::InvalidConfig` if `keys` is empty or the file contains
    ///   unsupported keys
    pub fn init_from_file<K: KeySet + 'static>(&self, keys: K, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_uninitialized()?;
        check_key_set(&keys)?;
        let path = path.as_ref();
        let defaults = read_props(path)?;
        let keys: Arc<dyn KeySet> = Arc::new(keys);
        validate_props(keys.as_ref(), &defaults, &format!("default properties file {}", path.display()))?;
        self.install(keys, defaults)
    }

    fn ensure_uninitialized(&self) -> Result<()> {
        if self.is_initialized() {
            warn!("initialization requested more than once");
            return Err(ConfigError::AlreadyInitialized);
        }
        Ok(())
    }

    /// Check-then-assign of the write-once layer as one critical section.
    fn install(&self, keys: Arc<dyn KeySet>, values: HashMap<String, String>) -> Result<()> {
        let mut defaults = self.defaults.write();
        if defaults.is_some() {
            warn!("initialization requested more than once");
            return Err(ConfigError::AlreadyInitialized);
        }
        debug!("using default properties: defaults = [{:?}]", values);
        let layer = Arc::new(DefaultsLayer { keys, values });
        *defaults = Some(Arc::clone(&layer));

        // publish while still holding the defaults lock so keys and defaults
        // become visible to readers together
        let mut entries = self.entries.write();
        entries.layer = Some(layer);
        Ok(())
    }

    fn legal_keys(&self) -> Result<Arc<dyn KeySet>> {
        let entries = self.entries.read();
        let keys = entries.layer.as_ref().map(|layer| Arc::clone(&layer.keys));
        keys.ok_or(ConfigError::NotInitialized)
    }

    /// Merges `new_props` into the current values, overriding existing ones.
    ///
    /// # Errors
    ///
    /// * `ConfigError::NotInitialized` before initialization
    /// * `ConfigError::InvalidConfig` if any key is unsupported; nothing is
    ///   merged in that case
    pub fn load(&self, new_props: HashMap<String, String>) -> Result<()> {
        let keys = self.legal_keys()?;
        validate_props(keys.as_ref(), &new_props, "loaded properties")?;
        self.merge(new_props);
        Ok(())
    }

    /// Reads a flat properties file and merges it like [`load`](Self::load).
    ///
    /// The file is read before any lock is taken.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let keys = self.legal_keys()?;
        let new_props = read_props(path)?;
        validate_props(keys.as_ref(), &new_props, &format!("properties file {}", path.display()))?;
        self.merge(new_props);
        Ok(())
    }

    fn merge(&self, new_props: HashMap<String, String>) {
        debug!("updating properties: new_props = [{:?}]", new_props);
        let mut entries = self.entries.write();
        entries.overrides.extend(new_props);
    }

    /// Returns the current value of `key`: the override if one was set,
    /// otherwise the default.
    ///
    /// # Errors
    ///
    /// * `ConfigError::NotInitialized` before initialization
    /// * `ConfigError::UnsupportedKey` if `key` is not legal
    /// * `ConfigError::CorruptState` if a legal key has neither an override
    ///   nor a default
    pub fn get(&self, key: &str) -> Result<String> {
        let result = {
            let entries = self.entries.read();
            let layer = entries.layer.as_ref().ok_or(ConfigError::NotInitialized)?;
            check_supported(layer, key)?;
            let found = entries.overrides.get(key).or_else(|| layer.values.get(key)).cloned();
            found
        };

        match result {
            Some(value) => {
                debug!("property retrieved: key = [{}] ; value = [{}]", key, value);
                Ok(value)
            }
            None => {
                error!("null property detected: key = [{}]", key);
                Err(ConfigError::CorruptState(format!("no value for property '{}'", key)))
            }
        }
    }

    /// Sets `key` to `value` and returns the value that was in effect before,
    /// or an empty string if there was none.
    ///
    /// The previous value is the resolved one, so a key that only had a
    /// default returns that default.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<String> {
        let value = value.into();
        let previous = {
            let mut guard = self.entries.write();
            let entries = &mut *guard;
            let layer = entries.layer.as_ref().ok_or(ConfigError::NotInitialized)?;
            check_supported(layer, key)?;
            let previous = entries
                .overrides
                .insert(key.to_string(), value.clone())
                .or_else(|| layer.values.get(key).cloned())
                .unwrap_or_else(|| EMPTY_PROP.to_string());
            previous
        };
        debug!("property set: key = [{}] ; value = [{}] ; prev_value = [{}]", key, value, previous);
        Ok(previous)
    }

    /// Drops the override for `key`, letting its default show through again.
    /// Returns the removed override, or an empty string if there was none.
    pub fn remove(&self, key: &str) -> Result<String> {
        let removed = {
            let mut guard = self.entries.write();
            let entries = &mut *guard;
            let layer = entries.layer.as_ref().ok_or(ConfigError::NotInitialized)?;
            check_supported(layer, key)?;
            let removed = entries.overrides.remove(key);
            removed
        };
        debug!("property override removed: key = [{}] ; removed = [{:?}]", key, removed);
        Ok(removed.unwrap_or_else(|| EMPTY_PROP.to_string()))
    }

    /// Whether a value resolves for the legal key `key`.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read();
        let layer = entries.layer.as_ref().ok_or(ConfigError::NotInitialized)?;
        check_supported(layer, key)?;
        Ok(entries.overrides.contains_key(key) || layer.values.contains_key(key))
    }

    /// Resolved view of every property that currently has a value.
    pub fn snapshot(&self) -> Result<BTreeMap<String, String>> {
        let entries = self.entries.read();
        let layer = entries.layer.as_ref().ok_or(ConfigError::NotInitialized)?;
        let mut view: BTreeMap<String, String> =
            layer.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        view.extend(entries.overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(view)
    }

    /// Legal key names, sorted.
    pub fn supported_keys(&self) -> Result<Vec<String>> {
        let keys = self.legal_keys()?;
        let mut names: Vec<String> = keys.supported_keys().into_iter().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    /// Returns the store to the uninitialized state.
    #[cfg(any(test, feature = "test-util"))]
    pub fn reset(&self) {
        let mut defaults = self.defaults.write();
        let mut entries = self.entries.write();
        *defaults = None;
        *entries = Entries::default();
    }
}

impl Default for PropertiesManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Configured for PropertiesManager {
    type Error = ConfigError;

    fn property(&self, key: &str) -> Result<String> {
        self.get(key)
    }
}

impl Configurable for PropertiesManager {
    fn set_property(&self, key: &str, value: &str) -> Result<String> {
        self.set(key, value)
    }

    fn remove_property(&self, key: &str) -> Result<String> {
        self.remove(key)
    }
}

fn check_supported(layer: &DefaultsLayer, key: &str) -> Result<()> {
    if !layer.keys.supports(key) {
        warn!("unsupported property requested: key = [{}]", key);
        return Err(ConfigError::UnsupportedKey(key.to_string()));
    }
    Ok(())
}

fn check_key_set(keys: &dyn KeySet) -> Result<()> {
    if keys.supported_keys().is_empty() {
        error!("empty set of supported properties");
        return Err(ConfigError::InvalidConfig("set of supported keys is empty".to_string()));
    }
    Ok(())
}

fn validate_props(keys: &dyn KeySet, props: &HashMap<String, String>, origin: &str) -> Result<()> {
    let mut invalid: Vec<&str> = props.keys().map(String::as_str).filter(|key| !keys.supports(key)).collect();
    if invalid.is_empty() {
        return Ok(());
    }
    invalid.sort_unstable();
    for key in &invalid {
        error!("invalid property detected: key = [{}] ; value = [{}]", key, props[*key]);
    }
    Err(ConfigError::InvalidConfig(format!("{} contain unsupported keys: [{}]", origin, invalid.join(", "))))
}

fn read_props(path: &Path) -> Result<HashMap<String, String>> {
    props_parse::get_config_values(path).map_err(|e| ConfigError::from_parse(path, e))
}

/// Initializes the process-wide store with a key set and no defaults.
pub fn init_empty<K: KeySet + 'static>(keys: K) -> Result<&'static PropertiesManager> {
    let manager = PropertiesManager::global();
    manager.init_empty(keys)?;
    Ok(manager)
}

/// Initializes the process-wide store with a key set and default values.
///
/// Only the first successful initializer call of the process wins; every
/// later call, by any variant, fails with `ConfigError::AlreadyInitialized`.
pub fn init_with_defaults<K: KeySet + 'static>(
    keys: K,
    defaults: HashMap<String, String>,
) -> Result<&'static PropertiesManager> {
    let manager = PropertiesManager::global();
    manager.init_with_defaults(keys, defaults)?;
    Ok(manager)
}

/// Initializes the process-wide store from a flat properties file.
pub fn init_from_file<K: KeySet + 'static>(keys: K, path: impl AsRef<Path>) -> Result<&'static PropertiesManager> {
    let manager = PropertiesManager::global();
    manager.init_from_file(keys, path)?;
    Ok(manager)
}

/// Returns the process-wide store.
///
/// # Errors
///
/// Returns `ConfigError::NotInitialized` if no initializer has succeeded yet.
pub fn get_instance() -> Result<&'static PropertiesManager> {
    let manager = PropertiesManager::global();
    if !manager.is_initialized() {
        error!("properties manager requested before initialization");
        return Err(ConfigError::NotInitialized);
    }
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::StaticKeys;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const KEYS: StaticKeys = StaticKeys::new("test", &["a", "b", "c"]);

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn fresh_global() -> &'static PropertiesManager {
        let manager = PropertiesManager::global();
        manager.reset();
        manager
    }

    #[test]
    #[serial]
    fn test_get_instance_before_init() {
        fresh_global();
        assert!(matches!(get_instance(), Err(ConfigError::NotInitialized)));
    }

    #[test]
    #[serial]
    fn test_global_init_with_defaults() {
        fresh_global();
        let manager = init_with_defaults(KEYS, props(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(manager.get("a").unwrap(), "1");

        let again = get_instance().unwrap();
        assert!(std::ptr::eq(manager, again));
        assert_eq!(again.get("b").unwrap(), "2");
    }

    #[test]
    #[serial]
    fn test_global_second_init_fails_for_every_variant() {
        fresh_global();
        init_empty(KEYS).unwrap();

        assert!(matches!(init_empty(KEYS), Err(ConfigError::AlreadyInitialized)));
        assert!(matches!(init_with_defaults(KEYS, HashMap::new()), Err(ConfigError::AlreadyInitialized)));
        // the file is never read once the store is initialized
        assert!(matches!(
            init_from_file(KEYS, "/nonexistent/defaults.properties"),
            Err(ConfigError::AlreadyInitialized)
        ));
    }

    #[test]
    #[serial]
    fn test_global_empty_key_set_leaves_store_usable() {
        fresh_global();
        let empty: &'static [&'static str] = &[];
        assert!(matches!(init_empty(empty), Err(ConfigError::InvalidConfig(_))));
        assert!(matches!(get_instance(), Err(ConfigError::NotInitialized)));

        let manager = init_empty(KEYS).unwrap();
        assert_eq!(manager.set("a", "1").unwrap(), "");
    }

    #[test]
    #[serial]
    fn test_global_init_from_file() {
        fresh_global();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a=1\nb=2\n").unwrap();

        let manager = init_from_file(KEYS, file.path()).unwrap();
        assert_eq!(manager.get("a").unwrap(), "1");
        assert_eq!(manager.get("b").unwrap(), "2");
    }

    #[test]
    #[serial]
    fn test_global_invalid_defaults_do_not_consume_init() {
        fresh_global();
        let result = init_with_defaults(KEYS, props(&[("zzz", "1")]));
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
        assert!(get_instance().is_err());

        assert!(init_with_defaults(KEYS, props(&[("a", "ok")])).is_ok());
    }

    #[test]
    fn test_reset_clears_overrides() {
        let manager = PropertiesManager::new();
        manager.init_empty(KEYS).unwrap();
        manager.set("a", "x").unwrap();

        manager.reset();
        assert!(!manager.is_initialized());
        assert!(matches!(manager.get("a"), Err(ConfigError::NotInitialized)));

        manager.init_empty(KEYS).unwrap();
        assert!(!manager.contains("a").unwrap());
    }

    #[test]
    fn test_validate_props_lists_sorted_invalid_keys() {
        let err = validate_props(&KEYS, &props(&[("z", "1"), ("a", "2"), ("y", "3")]), "input").unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: input contain unsupported keys: [y, z]");
    }
}
