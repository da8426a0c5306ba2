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

mod commands;

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use app_traits::InstanceBuilder;
use clap::{Parser, Subcommand};
use config_manager::PropertiesManager;
use file_list::FileListBuilder;
use log::debug;

use crate::commands::{FindArgs, PropsArgs, PropsCommands};

#[derive(Parser)]
#[clap(name = "apptools", author, version, about, long_about = None)]
struct Cli {
    /// Print debug logs on stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    /// log4rs layout in YAML, replaces console logging
    #[clap(long, global = true)]
    log_config: Option<PathBuf>,

    #[clap(subcommand)]
    command: CommandGroup,
}

#[derive(Subcommand)]
enum CommandGroup {
    /// Find files below a directory by glob or regex
    Find(FindArgs),

    /// Resolve properties validated against a set of supported keys
    Props(PropsArgs),
}

fn init_logging(cli: &Cli) -> Result<()> {
    let result = match &cli.log_config {
        Some(path) => common_log::init_with_yaml(path),
        None => common_log::init_console(if cli.verbose { "debug" } else { "warn" }),
    };
    result.map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

fn run_find(args: &FindArgs, out: &mut impl Write) -> Result<()> {
    let mut builder = FileListBuilder::new().root(args.root.clone());
    if let Some(glob) = &args.glob {
        builder = builder.glob(glob);
    }
    if let Some(regex) = &args.regex {
        builder = builder.regex(regex);
    }
    let list = builder.build().context("invalid search")?;

    let paths = if args.sort {
        list.sorted()
    } else {
        list.result_list().map(<[PathBuf]>::to_vec)
    }
    .with_context(|| format!("failed to search {}", args.root.display()))?;

    debug!("found {} files", paths.len());
    for path in &paths {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

fn key_set(args: &PropsArgs) -> HashSet<String> {
    args.keys.iter().map(|k| k.trim().to_string()).filter(|k| !k.is_empty()).collect()
}

fn init_store(args: &PropsArgs) -> Result<&'static PropertiesManager> {
    let store = match &args.defaults {
        Some(path) => config_manager::init_from_file(key_set(args), path)
            .with_context(|| format!("failed to read defaults from {}", path.display()))?,
        None => config_manager::init_empty(key_set(args)).context("failed to initialize properties")?,
    };
    Ok(store)
}

fn run_props(store: &PropertiesManager, args: &PropsArgs, out: &mut impl Write) -> Result<()> {
    for path in &args.load {
        store.load_file(path).with_context(|| format!("failed to load {}", path.display()))?;
    }
    for (key, value) in &args.assignments {
        store.set(key, value.as_str()).with_context(|| format!("failed to set {}", key))?;
    }

    match args.action.as_ref().unwrap_or(&PropsCommands::List) {
        PropsCommands::Get { key } => {
            let value = store.get(key).with_context(|| format!("no value for {}", key))?;
            writeln!(out, "{}", value)?;
        }
        PropsCommands::List => {
            for (key, value) in store.snapshot()? {
                writeln!(out, "{}={}", key, value)?;
            }
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        CommandGroup::Find(args) => run_find(args, &mut out),
        CommandGroup::Props(args) => run_props(init_store(args)?, args, &mut out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
