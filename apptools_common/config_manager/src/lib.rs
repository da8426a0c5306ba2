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

//! Properties management module for process-wide application settings.
//!
//! This module provides a thread-safe singleton holding string properties
//! that are validated against a closed set of legal keys. The store is
//! initialized exactly once, optionally with defaults read from a flat
//! `key=value` file, and afterwards accepts overrides layered over those
//! defaults.
//!
//! # Features
//!
//! * Write-once initialization, safe under concurrent initializer calls
//! * Every key checked against the application's [`KeySet`]
//! * Loads validate everything before merging anything
//! * Separate locks for the initialization path and ordinary get/set traffic
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! use config_manager::StaticKeys;
//!
//! const APP_KEYS: StaticKeys = StaticKeys::new("app", &["host", "port"]);
//!
//! // Initialize once, early in main
//! let defaults = HashMap::from([("host".to_string(), "localhost".to_string())]);
//! let props = config_manager::init_with_defaults(APP_KEYS, defaults).expect("Failed to init properties");
//! props.load_file("app.properties").expect("Failed to load overrides");
//!
//! // Anywhere else in the process
//! let props = config_manager::get_instance().expect("Properties not initialized");
//! println!("listening on {}", props.get("host").unwrap());
//! ```

pub mod error;
pub mod keys;
pub mod manager;

// Re-export key items
pub use error::{ConfigError, Result};
pub use keys::{KeySet, StaticKeys};
pub use manager::{get_instance, init_empty, init_from_file, init_with_defaults, PropertiesManager};
