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

pub mod config;
pub mod logger;

use std::{path::PathBuf, sync::OnceLock};

use crate::config::LogConfig;

static LOGGER: OnceLock<logger::Logger> = OnceLock::new();

/// Initialize logging system
///
/// # Arguments
/// * `config_path` - Path to the logging configuration file
///
/// # Example
/// ```no_run
/// fn main() {
///     common_log::init_with_yaml("logging.yaml").expect("Failed to initialize logger");
///     log::info!("Logger initialized");
/// }
/// ```
pub fn init_with_yaml(config_path: impl Into<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    ensure_uninitialized()?;
    let logger = logger::Logger::new_from_yaml(config_path)?;
    install(logger)
}

/// Initialize logging system with config
///
/// # Arguments
/// * `config` - LogConfig info
///
/// # Example
/// ```no_run
/// use common_log::config::{LogConfig, LoggerConfig};
/// use common_log::init_with_config;
///
/// let log = LoggerConfig {
///     path_prefix: "root".to_string(),
///     log_directory: "logs".to_string(),
///     log_file_name: "apptools.log".to_string(),
///     max_file_size: 10485760,
///     max_zip_count: 6,
///     level: "info".to_string(),
/// };
/// init_with_config(LogConfig { loggers: vec![log] }).expect("Failed to initialize logger");
/// log::info!("Logger initialized");
/// ```
pub fn init_with_config(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    ensure_uninitialized()?;
    let logger = logger::Logger::new_from_config(config)?;
    install(logger)
}

/// Initialize logging to stderr at the given level ("trace" ... "off").
pub fn init_console(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    ensure_uninitialized()?;
    let logger = logger::Logger::new_console(level)?;
    install(logger)
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

fn ensure_uninitialized() -> Result<(), Box<dyn std::error::Error>> {
    if is_initialized() {
        return Err("Logger already initialized".into());
    }
    Ok(())
}

fn install(logger: logger::Logger) -> Result<(), Box<dyn std::error::Error>> {
    if LOGGER.set(logger).is_err() {
        return Err("Logger already initialized".into());
    }
    Ok(())
}

// Re-export log macros for convenient use in other modules
pub use log::{debug, error, info, trace, warn};
