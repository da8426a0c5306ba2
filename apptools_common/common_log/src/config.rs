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

use serde::Deserialize;
use std::path::PathBuf;

/// Logging layout: one rolling file per module path prefix. The entry whose
/// prefix is `root` also configures the root logger.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub path_prefix: String,
    pub log_directory: String,
    pub log_file_name: String,
    pub max_file_size: u64,
    pub max_zip_count: u32,
    pub level: String,
}

impl LogConfig {
    pub fn from_yaml(path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_str = std::fs::read_to_string(path.into())?;
        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: LogConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn get_logger_config(&self, path_prefix: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| path_prefix.starts_with(&l.path_prefix))
    }

    pub fn get_root_config(&self) -> Option<&LoggerConfig> {
        self.get_logger_config("root")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
loggers:
  - path_prefix: root
    log_directory: logs
    log_file_name: apptools.log
    max_file_size: 10485760
    max_zip_count: 6
    level: info
  - path_prefix: file_list
    log_directory: logs
    log_file_name: file_list.log
    max_file_size: 1048576
    max_zip_count: 3
    level: debug
"#;

    #[test]
    fn test_parse_yaml() {
        let config = LogConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.loggers.len(), 2);

        let root = config.get_root_config().unwrap();
        assert_eq!(root.log_file_name, "apptools.log");
        assert_eq!(root.max_zip_count, 6);

        let walk = config.get_logger_config("file_list::file_list").unwrap();
        assert_eq!(walk.level, "debug");
        assert!(config.get_logger_config("config_manager").is_none());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = LogConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.loggers[1].max_file_size, 1048576);
    }

    #[test]
    fn test_missing_field_rejected() {
        let yaml = "loggers:\n  - path_prefix: root\n    level: info\n";
        assert!(LogConfig::from_yaml_str(yaml).is_err());
        assert!(LogConfig::from_yaml("/definitely/not/logging.yaml").is_err());
    }
}
