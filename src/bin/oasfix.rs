//! Command-line interface for oasfix
//! Normalizes an OpenAPI YAML document: collapses multi-document streams,
//! replaces x-faker generator annotations with canonical enumerations,
//! removes invalid control identifiers, and fixes formatting.
//!
//! Usage:
//!   oasfix <input_file> [output_file]            - Fix a document (output defaults to <input>.fixed)
//!   oasfix <input_file> --validator <cmd>        - Also run an external validator on the output

use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::time::Duration;

use oasfix::runner::{self, ExternalCheck, RunOptions};

fn main() {
    let matches = Command::new("oasfix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize an OpenAPI YAML document for downstream tooling")
        .arg(
            Arg::new("input")
                .help("Path to the OpenAPI YAML file to fix")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Output path (defaults to <input>.fixed)")
                .index(2),
        )
        .arg(
            Arg::new("validator")
                .long("validator")
                .help("External validator executable, invoked with the output path"),
        )
        .arg(
            Arg::new("validator-timeout")
                .long("validator-timeout")
                .value_parser(clap::value_parser!(u64))
                .default_value("30")
                .help("Timeout for the external validator, in seconds"),
        )
        .arg(
            Arg::new("no-check")
                .long("no-check")
                .action(ArgAction::SetTrue)
                .help("Skip the structural YAML check after writing"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = matches.get_one::<String>("input").cloned().unwrap_or_default();
    let timeout = matches
        .get_one::<u64>("validator-timeout")
        .copied()
        .unwrap_or(30);

    let options = RunOptions {
        input: PathBuf::from(&input),
        output: matches.get_one::<String>("output").map(PathBuf::from),
        validator: matches.get_one::<String>("validator").cloned(),
        validator_timeout: Duration::from_secs(timeout),
        structural_check: !matches.get_flag("no-check"),
    };

    println!("Reading {}...", options.input.display());
    let report = match runner::run(&options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !report.wrote {
        println!("No changes needed - file is already clean");
        return;
    }

    println!("\nApplying {} change(s):", report.changes.len());
    for change in &report.changes {
        println!("  - {}", change);
    }
    println!("\nWrote {}", report.output_path.display());

    let mut needs_attention = false;

    if let Some(structural) = &report.structural {
        if structural.passed() {
            println!("\nStructural check: passed");
        } else {
            needs_attention = true;
            println!("\nStructural check: FAILED");
            for error in &structural.errors {
                println!("  {}", error);
            }
        }
        for note in &structural.notes {
            println!("  {}", note);
        }
    }

    match &report.external {
        ExternalCheck::Skipped => {}
        ExternalCheck::Passed { stdout, stderr } => {
            println!("\nExternal validator: passed");
            print_streams(stdout, stderr);
        }
        ExternalCheck::Failed { stdout, stderr } => {
            needs_attention = true;
            println!("\nExternal validator: FAILED");
            print_streams(stdout, stderr);
        }
        ExternalCheck::Inconclusive(reason) => {
            println!("\nExternal validator: skipped ({})", reason);
        }
    }

    if needs_attention {
        std::process::exit(1);
    }
}

/// Surface the validator's output streams verbatim.
fn print_streams(stdout: &str, stderr: &str) {
    if !stdout.is_empty() {
        print!("{}", stdout);
    }
    if !stderr.is_empty() {
        eprint!("{}", stderr);
    }
}
