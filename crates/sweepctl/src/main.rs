use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sweepctl::commands::{self, PlanFormat, SubmitOptions};
use sweepctl::storage::{DEFAULT_SWEEP_FILE, load_sweep};
use sweepctl::{default_log_dir, init_logging};
use sweepctl_core::{SchedulerKind, SweepConfig};

#[derive(Parser, Debug)]
#[command(name = "sweepctl")]
#[command(about = "Submit one cluster job per hyperparameter combination")]
struct Args {
    /// Path to the sweep file
    #[arg(short, long, global = true, default_value = DEFAULT_SWEEP_FILE)]
    config: PathBuf,

    /// Override the scheduler from the sweep file
    #[arg(long, global = true)]
    scheduler: Option<SchedulerArg>,

    /// Override the queue (LSF queue or Slurm partition)
    #[arg(long, global = true)]
    queue: Option<String>,

    /// Directory for sweepctl.log (default: ~/.sweepctl/)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Do not write a log file
    #[arg(long, global = true)]
    no_log_file: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default sweep file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List every axis with its enabled and disabled values
    Axes,
    /// Print the submission command of every job without running it
    Plan {
        #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
        format: PlanFormat,
    },
    /// Submit every job of the sweep
    Submit {
        /// Print the commands instead of running them
        #[arg(long)]
        dry_run: bool,
        /// Stop at the first failed submission and exit non-zero
        #[arg(long)]
        fail_fast: bool,
    },
    /// Enable a value on an axis, adding it if missing
    Enable { axis: String, value: String },
    /// Disable a value on an axis, keeping it listed
    Disable { axis: String, value: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchedulerArg {
    Lsf,
    Slurm,
}

impl From<SchedulerArg> for SchedulerKind {
    fn from(arg: SchedulerArg) -> Self {
        match arg {
            SchedulerArg::Lsf => SchedulerKind::Lsf,
            SchedulerArg::Slurm => SchedulerKind::Slurm,
        }
    }
}

impl Args {
    /// Load the sweep file and apply command-line overrides
    fn sweep(&self) -> color_eyre::Result<SweepConfig> {
        let mut config = load_sweep(&self.config)?;
        if let Some(scheduler) = self.scheduler {
            config.scheduler = scheduler.into();
        }
        if let Some(queue) = &self.queue {
            config.resources.queue = queue.clone();
        }
        Ok(config)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let log_dir = (!args.no_log_file).then(|| args.log_dir.clone().unwrap_or_else(default_log_dir));
    init_logging(log_dir.as_deref(), &args.log_level)?;

    let mut out = io::stdout().lock();
    match &args.command {
        Command::Init { force } => commands::init(&args.config, *force, &mut out)?,
        Command::Axes => commands::show_axes(&args.sweep()?, &mut out)?,
        Command::Plan { format } => commands::show_plan(&args.sweep()?, *format, &mut out)?,
        Command::Submit { dry_run, fail_fast } => {
            let options = SubmitOptions {
                dry_run: *dry_run,
                fail_fast: *fail_fast,
            };
            commands::submit(&args.sweep()?, options, &mut out)?
        }
        Command::Enable { axis, value } => {
            commands::set_enabled(&args.config, axis, value, true, &mut out)?
        }
        Command::Disable { axis, value } => {
            commands::set_enabled(&args.config, axis, value, false, &mut out)?
        }
    }

    Ok(())
}
