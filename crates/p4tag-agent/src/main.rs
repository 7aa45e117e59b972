//! `p4tag`: label the depot state of a completed build.
//!
//! `p4tag label` runs the tag step once against the current process
//! environment, as a CI host would at the end of a build.

use std::{
    io::Write,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use schemars::schema_for;
use tracing::{debug, error, info};

use p4tag_core::{Workspace, memory::TracingListener};
use p4tag_model::{BuildNumber, BuildRef, BuildResult, ENV_BUILD_NUMBER, ENV_JOB_NAME, Env};
use p4tag_observe::init_logger;
use p4tag_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

mod config;
mod host;

use crate::config::Config;
use crate::host::LabelRequest;

static DEFAULT_JOB_NAME: &str = "p4tag";

#[derive(Parser)]
#[command(name = "p4tag")]
#[command(about = "Label the Perforce depot state a build was made from")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tag step for one build.
    Label(LabelArgs),

    /// Print the JSON schema for the configuration file.
    ConfigSchema {},
}

#[derive(Args)]
struct LabelArgs {
    /// Path to the TOML configuration file.
    #[arg(long, short = 'c')]
    config: PathBuf,

    /// Workspace directory the labeler runs in.
    #[arg(long, short = 'w', default_value = ".")]
    workspace: PathBuf,

    /// Result of the build so far (SUCCESS, UNSTABLE, FAILURE, ...).
    ///
    /// When omitted the build counts as still running.
    #[arg(long)]
    result: Option<BuildResult>,

    /// Job name of the current build. Defaults to $JOB_NAME.
    #[arg(long)]
    job: Option<String>,

    /// Number of the current build. Defaults to $BUILD_NUMBER.
    #[arg(long)]
    number: Option<BuildNumber>,

    /// Print metrics in Prometheus text format when done.
    #[arg(long)]
    print_metrics: bool,
}

fn main() -> ExitCode {
    match inner_main() {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            eprintln!("p4tag: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn inner_main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Label(args) => label(args),
        Commands::ConfigSchema {} => {
            println!("{}", serde_json::to_string_pretty(&schema_for!(Config))?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn label(args: LabelArgs) -> Result<ExitCode> {
    let config = Config::from_file(&args.config)?;
    init_logger(&config.logger)?;
    debug!(?config, "config loaded");

    let env = process_env();
    let request = LabelRequest {
        build: current_build(&args, &env)?,
        env,
        result: args.result,
        workspace: Workspace::new(&args.workspace),
    };

    let metrics = PrometheusMetrics::new()?;
    let res = host::label(&config, request, Arc::new(metrics.clone()), &TracingListener)?;

    if args.print_metrics {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&metrics.gather(), &mut buf)?;
        std::io::stdout().write_all(&buf)?;
    }

    match res {
        Ok(outcome) => {
            info!("{outcome}");
            Ok(ExitCode::SUCCESS)
        }
        Err(abort) => {
            eprintln!("{abort}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn current_build(args: &LabelArgs, env: &Env) -> Result<BuildRef> {
    let job = args
        .job
        .as_deref()
        .or_else(|| env.get_non_empty(ENV_JOB_NAME))
        .unwrap_or(DEFAULT_JOB_NAME);

    let number = match (args.number, env.get_non_empty(ENV_BUILD_NUMBER)) {
        (Some(n), _) => n,
        (None, Some(raw)) => raw
            .parse()
            .with_context(|| format!("invalid ${ENV_BUILD_NUMBER} '{raw}'"))?,
        (None, None) => 1,
    };
    Ok(BuildRef::new(job, number))
}

/// Process environment as a run environment. Non-UTF-8 entries are skipped.
fn process_env() -> Env {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
