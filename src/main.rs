use std::num::NonZeroUsize;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fanout_scheduler::{ExecutionReport, Report, SchedulerConfig, Summary, TaskScheduler};
use tracing::info;

mod demo;

/// Fanout - run a batch of tasks concurrently and report on each one
#[derive(Parser)]
#[command(name = "fanout")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the sample batch through the scheduler
  Demo {
    /// Maximum number of tasks running at once (default: unbounded)
    #[arg(long)]
    max_concurrency: Option<NonZeroUsize>,

    /// Print the results as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any task failed
    #[arg(long)]
    fail_on_error: bool,
  },

  /// Print odd and even numbers from two concurrent tasks
  OddEven,
}

fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Demo {
      max_concurrency,
      json,
      fail_on_error,
    }) => {
      let config = SchedulerConfig { max_concurrency };
      run_demo(config, json, fail_on_error)
    }
    Some(Commands::OddEven) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(demo::odd_even())?;
      Ok(ExitCode::SUCCESS)
    }
    None => {
      println!("fanout - use --help to see available commands");
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn run_demo(config: SchedulerConfig, json: bool, fail_on_error: bool) -> Result<ExitCode> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_demo_async(config, json, fail_on_error).await })
}

async fn run_demo_async(
  config: SchedulerConfig,
  json: bool,
  fail_on_error: bool,
) -> Result<ExitCode> {
  let mut scheduler = TaskScheduler::with_config(config);
  demo::register_sample_tasks(&mut scheduler).context("failed to register sample tasks")?;
  info!(tasks = scheduler.len(), "tasks_registered");

  eprintln!("Running {} tasks", scheduler.len());

  let execution = scheduler
    .execute()
    .await
    .context("task batch did not complete")?;
  let report = scheduler.report()?;
  info!(
    execution_id = %execution.execution_id,
    succeeded = execution.summary.succeeded,
    failed = execution.summary.failed,
    "demo_completed"
  );

  if json {
    let output = json_output(&execution, &report)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
  } else {
    println!("{}", report);
    println!("wall time:  {:?}", execution.wall_time);
  }

  Ok(exit_code(&execution.summary, fail_on_error))
}

/// Execution metadata and summary, plus every per-task result.
fn json_output(execution: &ExecutionReport, report: &Report) -> Result<serde_json::Value> {
  let mut output = serde_json::to_value(execution)?;
  output["results"] = serde_json::to_value(&report.results)?;
  Ok(output)
}

/// Failed tasks only fail the process when `--fail-on-error` is set.
fn exit_code(summary: &Summary, fail_on_error: bool) -> ExitCode {
  if fail_on_error && summary.failed > 0 {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
