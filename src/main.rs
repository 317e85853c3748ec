// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod console_format;
mod filename;
mod gpu_burn;
mod pairing;
mod report;
mod scan;
mod stress_ng;
mod types;
mod ui;

use env_logger::Env;
use log::debug;
use std::io::{self, IsTerminal};

fn main() {
    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // RUST_LOG wins; otherwise --debug turns on debug output
    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    let config = match config::build_report_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    ui::status(&format!("Looking for files in {}", config.directory.display()));
    println!();

    let logs = match scan::scan_directory(&config.directory, &config.secondary_suffix) {
        Ok(logs) => logs,
        Err(e) => {
            ui::print_error(&format!("Failed to read {}: {}", config.directory.display(), e));
            std::process::exit(1);
        }
    };

    let node_report = report::build_report(&config, &logs);
    debug!("Built report with {} rows", node_report.rows.len());

    // Colored rows only on an interactive terminal
    let use_colors = !args.no_color && io::stdout().is_terminal();
    report::print_report(&node_report, use_colors);

    let summary = report::summarize_report(&node_report);
    report::print_summary(&summary);

    if let Some(ref path) = config.json_output {
        match report::export_json_report(&node_report, path) {
            Ok(_) => println!("\nJSON report saved to: {}", path.display()),
            Err(e) => {
                ui::print_error(&format!("Failed to save JSON report to {}: {}", path.display(), e));
                std::process::exit(1);
            }
        }
    }
}
