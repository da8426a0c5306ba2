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

//! Parser for flat `key=value` properties files.
//!
//! The accepted syntax is the classic properties format: `#` and `!` comment
//! lines, `=`, `:` or whitespace as the key/value separator, backslash line
//! continuations and `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes. All values are
//! plain strings.
//!
//! # Example
//!
//! ```
//! let props = props_parse::parse_str("# server\nhost = localhost\nport: 8080\n").unwrap();
//! assert_eq!(props.get("host").map(String::as_str), Some("localhost"));
//! assert_eq!(props.get("port").map(String::as_str), Some("8080"));
//! ```

pub mod config_parse;
pub mod error;

pub use config_parse::{get_config_value, get_config_values, parse_str};
pub use error::{ParseError, Result};
