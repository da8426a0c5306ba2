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

use std::fs;

use common_log::config::{LogConfig, LoggerConfig};
use tempfile::TempDir;

// Logging is global to the process, so everything lives in one test.
#[test]
fn test_init_once_and_write_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = dir.path().join("logs");
    let config = LogConfig {
        loggers: vec![LoggerConfig {
            path_prefix: "root".to_string(),
            log_directory: log_dir.to_string_lossy().to_string(),
            log_file_name: "apptools.log".to_string(),
            max_file_size: 1024 * 1024,
            max_zip_count: 2,
            level: "info".to_string(),
        }],
    };

    assert!(!common_log::is_initialized());
    common_log::init_with_config(config.clone()).expect("Failed to initialize logger");
    assert!(common_log::is_initialized());

    common_log::info!("first line from init test");
    common_log::debug!("filtered out at info level");
    log::logger().flush();

    let content = fs::read_to_string(log_dir.join("apptools.log")).unwrap();
    assert!(content.contains("first line from init test"));
    assert!(!content.contains("filtered out"));

    assert!(common_log::init_with_config(config).is_err());
    assert!(common_log::init_console("debug").is_err());
    assert!(common_log::init_with_yaml(dir.path().join("logging.yaml")).is_err());
}
