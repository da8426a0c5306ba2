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

use chrono::{DateTime, Local};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger as SizeBasedTriggerPolicy;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::{
    append::rolling_file::RollingFileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config, Handle,
};
use std::path::{Path, PathBuf};

use crate::config::{LogConfig, LoggerConfig};

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S:%3f)} {l} [{M}:{L}] - {m}{n}";
const CONSOLE_PATTERN: &str = "{d(%H:%M:%S:%3f)} {h({l})} [{M}] - {m}{n}";
const ROOT_APPENDER: &str = "root_appender";

/// Installed log4rs configuration; held for the life of the process.
pub struct Logger {
    _handle: Handle,
}

impl Logger {
    pub fn new_from_yaml(config_path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = LogConfig::from_yaml(config_path)?;
        Self::new_from_config(config)
    }

    pub fn new_from_config(config: LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let final_config = Self::build_config(&config)?;
        let handle = log4rs::init_config(final_config)?;
        Ok(Self { _handle: handle })
    }

    /// Logger writing to stderr only, for command line use.
    pub fn new_console(level: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let appender = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("console", Box::new(appender)))
            .build(Root::builder().appender("console").build(Self::parse_level(level)))?;
        let handle = log4rs::init_config(config)?;
        Ok(Self { _handle: handle })
    }

    pub(crate) fn build_config(config: &LogConfig) -> Result<Config, Box<dyn std::error::Error>> {
        let mut log4rs_config = Config::builder();

        // One appender and one non-additive logger per path prefix
        for logger_config in &config.loggers {
            let appender = Self::create_appender(logger_config)?;
            let appender_name = format!("{}_appender", logger_config.path_prefix);
            log4rs_config = log4rs_config.appender(Appender::builder().build(&appender_name, Box::new(appender)));

            if logger_config.path_prefix == "root" {
                continue;
            }
            let logger = log4rs::config::Logger::builder()
                .appender(appender_name)
                .additive(false)
                .build(logger_config.path_prefix.clone(), Self::parse_level(&logger_config.level));
            log4rs_config = log4rs_config.logger(logger);
        }

        let root = match config.get_root_config() {
            Some(root_config) => {
                Root::builder().appender(ROOT_APPENDER).build(Self::parse_level(&root_config.level))
            }
            None => Root::builder().build(LevelFilter::Info),
        };
        Ok(log4rs_config.build(root)?)
    }

    fn create_appender(config: &LoggerConfig) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
        let log_directory = Path::new(&config.log_directory);
        std::fs::create_dir_all(log_directory)?;

        let now: DateTime<Local> = Local::now();
        let formatted_time = now.format("%Y%m%d%H%M%S%3f").to_string();

        let log_file = log_directory.join(&config.log_file_name);
        let archived_log_pattern = format!(
            "{}/{}-{{}}-{}.gz",
            log_directory.display(),
            config.log_file_name,
            formatted_time
        );

        let size_trigger = SizeBasedTriggerPolicy::new(config.max_file_size);
        let roller = FixedWindowRoller::builder().build(&archived_log_pattern, config.max_zip_count)?;
        let compound_policy = CompoundPolicy::new(Box::new(size_trigger), Box::new(roller));

        let appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(log_file, Box::new(compound_policy))?;

        Ok(appender)
    }

    pub(crate) fn parse_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn logger_config(prefix: &str, dir: &Path, level: &str) -> LoggerConfig {
        LoggerConfig {
            path_prefix: prefix.to_string(),
            log_directory: dir.to_string_lossy().to_string(),
            log_file_name: format!("{}.log", prefix),
            max_file_size: 1024,
            max_zip_count: 2,
            level: level.to_string(),
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(Logger::parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(Logger::parse_level("warn"), LevelFilter::Warn);
        assert_eq!(Logger::parse_level("off"), LevelFilter::Off);
        assert_eq!(Logger::parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_build_config_creates_log_directory() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("nested/logs");
        let config = LogConfig {
            loggers: vec![
                logger_config("root", &log_dir, "info"),
                logger_config("file_list", &log_dir, "debug"),
            ],
        };

        let built = Logger::build_config(&config).unwrap();
        assert!(log_dir.is_dir());
        assert_eq!(built.root().level(), LevelFilter::Info);
        assert_eq!(built.loggers().len(), 1);
        assert_eq!(built.loggers()[0].name(), "file_list");
        assert_eq!(built.appenders().len(), 2);
    }

    #[test]
    fn test_build_config_without_root() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig { loggers: vec![logger_config("config_manager", dir.path(), "trace")] };

        let built = Logger::build_config(&config).unwrap();
        assert_eq!(built.root().level(), LevelFilter::Info);
        assert!(built.root().appenders().is_empty());
        assert_eq!(built.loggers()[0].level(), LevelFilter::Trace);
    }
}
