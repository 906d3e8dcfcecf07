// file: src/utils/logging.rs
// description: Tracing subscriber initialization for terminal and function-runtime output

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact, optionally colored lines for a terminal.
    Compact { ansi: bool },
    /// One JSON object per line, no timestamp; the log sink adds its own.
    Json,
}

impl LogFormat {
    /// JSON inside the function runtime, compact everywhere else.
    pub fn detect(force_json: bool, colored_output: bool) -> Self {
        if force_json || std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
            LogFormat::Json
        } else {
            LogFormat::Compact {
                ansi: colored_output,
            }
        }
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Compact { ansi } => {
            let fmt_layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(true)
                .with_line_number(true)
                .compact()
                .with_ansi(ansi);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(false)
                .without_time()
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
    }
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_field(label: &str, value: &str) -> String {
    format!("  {} {}", format!("{}:", label).cyan().bold(), value)
}
