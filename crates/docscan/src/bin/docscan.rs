use clap::{Parser, Subcommand};
use docscan::capture::io::{ScanConfig, ScanIoError};
use docscan::capture::CaptureParamsError;
use docscan::replay::{replay, FrameTrace, ReplayOptions};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "docscan", version, about = "Document capture trace tools")]
struct Cli {
    /// Log level for stderr output.
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,
    /// Emit JSON logs through `tracing` (RUST_LOG filter).
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    json_log: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded detector trace and report when captures trigger.
    Replay {
        /// Frame trace (JSON).
        #[arg(long)]
        trace: PathBuf,
        /// Session config (JSON); defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the full replay report here (JSON).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Resume after each capture instead of stopping at the first.
        #[arg(long)]
        auto_resume: bool,
    },
    /// Print the default session config as JSON.
    DefaultConfig,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] ScanIoError),
    #[error("invalid config: {0}")]
    Config(#[from] CaptureParamsError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn init_logging(cli: &Cli) {
    #[cfg(feature = "tracing")]
    {
        if cli.json_log {
            let _ = tracing_log::LogTracer::init();
            docscan::core::init_tracing(true);
            return;
        }
    }
    let _ = docscan::core::init_with_level(cli.log_level);
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Replay {
            trace,
            config,
            out,
            auto_resume,
        } => {
            let cfg = match config {
                Some(path) => ScanConfig::load_json(path)?,
                None => ScanConfig::default(),
            };
            let mut session = cfg.build_session()?;
            let trace = FrameTrace::load_json(trace)?;
            let opts = ReplayOptions {
                auto_resume,
                target_size: cfg.target_size,
            };
            let report = replay(&mut session, &trace, opts);

            println!("frames: {}", report.num_frames);
            println!("captures: {}", report.captures.len());
            for record in &report.captures {
                println!("capture at frame {}", record.frame);
            }
            if let Some(path) = out {
                report.write_json(path)?;
            }
        }
        Command::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&ScanConfig::default())?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
