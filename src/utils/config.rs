#![forbid(unsafe_code)]

use std::fmt;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Networking.
const DEFAULT_BIND_ADDR    : &str = "0.0.0.0";

// Logging used when no log4rs file is given.
const CONSOLE_APPENDER     : &str = "stderr";
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%dT%H:%M:%S%.3f%z)} {h({l:<5})} {t} - {m}{n}";

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// ServiceMode:
// ---------------------------------------------------------------------------
/** Selects which of the server behaviors is active. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ServiceMode {
    /// Record worker ids and report them on /health.
    #[default]
    Tracking,
    /// Answer every greeting path without recording anything.
    Greeting,
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceMode::Tracking => write!(f, "tracking"),
            ServiceMode::Greeting => write!(f, "greeting"),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkerArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, Parser)]
#[command(name = "worker_server", about = "Minimal HTTP worker service.", version)]
pub struct WorkerArgs {
    /// TCP port to listen on.
    pub port: u16,

    /// Server behavior.
    #[arg(long, value_enum, default_value_t = ServiceMode::Tracking)]
    pub mode: ServiceMode,

    /// Address the listener binds to.
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// Log4rs YAML configuration file.
    ///
    /// When omitted, log records at info level and above are written to
    /// stderr.
    #[arg(long)]
    pub log_config: Option<String>,
}

impl WorkerArgs {
    /** The host:port string handed to the TCP listener. */
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub args: WorkerArgs,
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the given file or, when none is given, from a
 * console appender writing to stderr.
 */
pub fn init_log(log_config: Option<&str>) -> Result<()> {
    match log_config {
        Some(file) => {
            if let Err(e) = log4rs::init_file(file, Default::default()) {
                eprintln!("{}", e);
                return Err(Errors::Log4rsInitialization(file.to_string()).into());
            }
            info!("Log4rs initialized using: {}", file);
        }
        None => {
            let config = default_log_config()?;
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("{}", e);
                return Err(Errors::Log4rsInitialization("built-in console configuration".to_string()).into());
            }
            info!("Log4rs initialized using the built-in console configuration.");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// default_log_config:
// ---------------------------------------------------------------------------
fn default_log_config() -> Result<LogConfig> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();

    let config = LogConfig::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(CONSOLE_APPENDER).build(LevelFilter::Info))
        .map_err(|e| Errors::Log4rsInitialization(e.to_string()))?;
    Ok(config)
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
/** Parse the command line.  A missing or invalid port makes clap print a
 * diagnostic and exit the process before any listener is created.
 */
pub fn init_runtime_context() -> RuntimeCtx {
    RuntimeCtx { args: WorkerArgs::parse() }
}
