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

//! Error types for the properties manager

use std::io;
use std::path::{Path, PathBuf};

use log::error;
use props_parse::ParseError;
use thiserror::Error;

/// Errors raised by [`PropertiesManager`](crate::PropertiesManager).
///
/// No variant is raised after a partial mutation: every check runs before
/// the store is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An initializer ran after the store was already initialized
    #[error("Properties manager is already initialized")]
    AlreadyInitialized,

    /// The store was used before any initializer ran
    #[error("Properties manager is not initialized")]
    NotInitialized,

    /// Supplied or loaded properties contain keys outside the legal key set
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A properties file could not be parsed
    #[error("Malformed properties file {path}: {reason}")]
    MalformedFile { path: PathBuf, reason: String },

    /// A read or write used a key outside the legal key set
    #[error("Unsupported property: {0}")]
    UnsupportedKey(String),

    #[error("Properties file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to access properties file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A legal key resolved to no value at all
    #[error("Corrupt state: {0}")]
    CorruptState(String),
}

impl ConfigError {
    pub(crate) fn from_parse(path: &Path, err: ParseError) -> Self {
        match err {
            ParseError::Io(source) if source.kind() == io::ErrorKind::NotFound => {
                error!("properties file not found: path = [{}]", path.display());
                ConfigError::FileNotFound(path.to_path_buf())
            }
            ParseError::Io(source) => {
                error!("error when accessing file: path = [{}] ; error = [{}]", path.display(), source);
                ConfigError::Io { path: path.to_path_buf(), source }
            }
            ParseError::Malformed { line, reason } => {
                error!("malformed properties file: path = [{}] ; line = [{}]", path.display(), line);
                ConfigError::MalformedFile { path: path.to_path_buf(), reason: format!("line {}: {}", line, reason) }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
