use anyhow::{Context, Result};
use badge_check::{badge, logger, report::Report};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(
    name = "badge-check",
    about = "Verify that badges are 512x512, round and happy, or convert images into badges"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Log what the checks measured
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a badge image against the size, shape and mood rules
    Verify {
        /// Path to the badge (PNG with transparency).
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Print the result as JSON
        #[clap(long)]
        json: bool,
    },

    /// Resize an image to 512x512 and save it as PNG
    Convert {
        /// Path to the source image.
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Output file.
        #[clap(short, long, value_name = "FILE", default_value = badge::DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Print the result as JSON
        #[clap(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let (input, outcome, json) = match args.command {
        Command::Verify { input, json } => {
            let outcome = badge::verify_badge(&input);
            (input, outcome, json)
        }
        Command::Convert {
            input,
            output,
            json,
        } => {
            let outcome = badge::convert_to_badge(&input, &output);
            (input, outcome, json)
        }
    };

    let report = Report::from_outcome(&input, &outcome);
    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        println!("{}", report.message);
    }

    Ok(match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) if err.is_validation_failure() => ExitCode::from(1),
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(2)
        }
    })
}
