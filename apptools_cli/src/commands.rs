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

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Glob matched against the full path, e.g. '**/*.rs'
    #[clap(long, conflicts_with = "regex", required_unless_present = "regex")]
    pub glob: Option<String>,

    /// Regex matched against the full path; unanchored patterns match the end
    #[clap(long)]
    pub regex: Option<String>,

    /// Directory to search
    #[clap(long, default_value = ".")]
    pub root: PathBuf,

    /// Print matches in lexical order instead of traversal order
    #[clap(long)]
    pub sort: bool,
}

#[derive(Args, Debug)]
pub struct PropsArgs {
    /// Comma separated list of supported keys
    #[clap(long, required = true, value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Properties file holding the default values
    #[clap(long)]
    pub defaults: Option<PathBuf>,

    /// Properties file merged over the defaults, may be repeated
    #[clap(long)]
    pub load: Vec<PathBuf>,

    /// Single override in KEY=VALUE form, may be repeated
    #[clap(long = "set", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,

    #[clap(subcommand)]
    pub action: Option<PropsCommands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum PropsCommands {
    /// Print the value of one key
    Get {
        /// Property key
        key: String,
    },

    /// Print all resolved properties, default action
    List,
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}
