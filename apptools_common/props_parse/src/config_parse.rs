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

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{ParseError, Result};

/// Reads a properties file and returns the value stored under `key`, if any.
pub fn get_config_value(path: impl AsRef<Path>, key: &str) -> Result<Option<String>> {
    let file_maps = parse_file(path.as_ref())?;
    let value = file_maps.get(key).cloned();
    Ok(value)
}

/// Reads a properties file into a key/value map.
///
/// # Errors
///
/// * `ParseError::Io` if the file cannot be opened or is not valid UTF-8
/// * `ParseError::Malformed` if an escape sequence is broken
pub fn get_config_values(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    parse_file(path.as_ref())
}

fn parse_file(file_path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(file_path)?;
    let config_map = parse_str(&content)?;
    debug!("parsed {} properties from {}", config_map.len(), file_path.display());
    Ok(config_map)
}

/// Parses properties text. When a key repeats, the last occurrence wins.
pub fn parse_str(content: &str) -> Result<HashMap<String, String>> {
    let mut config_map = HashMap::new();

    for (line, logical) in logical_lines(content) {
        let (key, value) = parse_line(&logical, line)?;
        config_map.insert(key, value);
    }

    Ok(config_map)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\u{000C}'
}

/// Joins continued natural lines and drops blank and comment lines.
/// Each item carries the 1-based number of the line it starts on.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, natural) in content.lines().enumerate() {
        let trimmed = natural.trim_start_matches(is_blank);
        let (start, mut buf) = match pending.take() {
            Some(continued) => continued,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        // an odd run of trailing backslashes escapes the line break
        let trailing = trimmed.chars().rev().take_while(|c| *c == '\\').count();
        if trailing % 2 == 1 {
            buf.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(trimmed);
            lines.push((start, buf));
        }
    }

    if let Some(unfinished) = pending {
        lines.push(unfinished);
    }
    lines
}

fn parse_line(logical: &str, line: usize) -> Result<(String, String)> {
    let chars: Vec<char> = logical.chars().collect();

    let mut key_end = 0;
    let mut has_sep = false;
    let mut escaped = false;
    while key_end < chars.len() {
        let c = chars[key_end];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' {
            has_sep = true;
            break;
        } else if is_blank(c) {
            break;
        }
        key_end += 1;
    }

    // skip separator whitespace and at most one '=' or ':'
    let mut value_start = if has_sep { key_end + 1 } else { key_end };
    while value_start < chars.len() {
        let c = chars[value_start];
        if !has_sep && (c == '=' || c == ':') {
            has_sep = true;
        } else if !is_blank(c) {
            break;
        }
        value_start += 1;
    }

    let key = unescape(&chars[..key_end], line)?;
    let value = unescape(&chars[value_start..], line)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line: usize) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut buf = [0u16; 2];
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let Some(escaped) = iter.next() else {
            break;
        };
        let plain = match escaped {
            'u' => {
                let hex: String = iter.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return Err(ParseError::Malformed {
                        line,
                        reason: format!("malformed \\uxxxx encoding: \\u{}", hex),
                    });
                }
                let unit = u16::from_str_radix(&hex, 16).map_err(|e| ParseError::Malformed {
                    line,
                    reason: e.to_string(),
                })?;
                units.push(unit);
                continue;
            }
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{000C}',
            other => other,
        };
        units.extend_from_slice(plain.encode_utf16(&mut buf));
    }

    String::from_utf16(&units).map_err(|_| ParseError::Malformed {
        line,
        reason: "unpaired surrogate in \\u escape".to_string(),
    })
}
