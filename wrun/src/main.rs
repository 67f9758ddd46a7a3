//! # WebAssembly invoker (wrun)
//!
//! Calls one exported function of a WebAssembly module from the command line.
//!
//! ## Usage
//!
//! ```bash
//! wrun [OPTIONS] <MODULE> <FUNCTION> [ARGS]...
//! ```
//!
//! The module is compiled and linked against a host-provided linear memory
//! (`memory`, 256 pages by default) and an empty indirect-call table
//! (`table`). `ARGS` may be given as separate integers or as one quoted
//! string of space-separated integers.
//!
//! If the module exports `__expose_tracer` and `__expose_tracer_len`, the
//! trace buffer they describe is printed after the call. `--dump-result`
//! treats the call's result as a pointer and prints the `i32` values there.
//!
//! Diagnostics go to standard error; `--log-level` picks the verbosity and
//! `RUST_LOG_FORMAT` (or `--log-format`) picks pretty, compact or JSON output.

#![warn(missing_docs)]

mod level;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wrun_runtime::{
    config::{DEFAULT_MEMORY_PAGES, DEFAULT_TABLE_SIZE},
    parse_int_args, read_trace,
    value::display_results,
    InvokeConfig, Invoker,
};

use crate::level::LogLevel;

/// Entries printed by `--dump-result` when no count is given
const DEFAULT_DUMP_ENTRIES: &str = "10";

/// Output format of the diagnostic log
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Multi-line, human-oriented
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// WebAssembly invoker CLI arguments
#[derive(Parser, Debug)]
#[command(version, about, allow_negative_numbers = true)]
struct Args {
    /// Path to the binary WebAssembly module
    module: PathBuf,

    /// Name of the exported function to call
    function: String,

    /// Integer arguments, separate or as one space-separated string
    args: Vec<String>,

    /// Initial size of the host memory in 64 KiB pages
    #[arg(long, env = "WRUN_MEMORY_PAGES", default_value_t = DEFAULT_MEMORY_PAGES)]
    memory_pages: u32,

    /// Initial size of the host indirect-call table
    #[arg(long, env = "WRUN_TABLE_SIZE", default_value_t = DEFAULT_TABLE_SIZE)]
    table_size: u32,

    /// Print N i32 values at the address returned by the function
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_DUMP_ENTRIES
    )]
    dump_result: Option<usize>,

    /// Do not read the trace buffer after the call
    #[arg(long)]
    no_trace: bool,

    /// Diagnostic verbosity (trace, debug, info, warn, error, critical)
    #[arg(long, env = "WRUN_LOG", default_value = "warn")]
    log_level: LogLevel,

    /// Diagnostic output format
    #[arg(long, value_enum, env = "RUST_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

impl Args {
    /// Invocation settings selected on the command line
    fn invoke_config(&self) -> InvokeConfig {
        InvokeConfig::default()
            .with_memory_pages(self.memory_pages)
            .with_table_size(self.table_size)
    }

    /// All argument tokens joined into one space-separated string
    fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_tracing(args.log_level, args.log_format);
    debug!(?args, "Parsed command line");

    run(&args)
}

/// Initialize the tracing system, writing to standard error
fn initialize_tracing(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_level_filter().into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }
}

/// Load the module, call the function and print what it produced
fn run(args: &Args) -> Result<()> {
    let wasm_bytes = fs::read(&args.module)
        .with_context(|| format!("Failed to read WebAssembly module {}", args.module.display()))?;
    info!("Loaded {} bytes from {}", wasm_bytes.len(), args.module.display());

    let int_args = parse_int_args(&args.joined_args())?;
    println!(
        "Invoking exported function {} with arguments {:?} ...",
        args.function, int_args
    );

    let mut invoker = Invoker::new(args.invoke_config())?;
    let mut invocation = invoker.compile_and_run(&wasm_bytes, &args.function, &int_args)?;
    println!("Result of function call: {}", display_results(&invocation.results));

    if !args.no_trace {
        if let Some(trace) = read_trace(&mut invocation.exports, &invoker.config().tracer)? {
            println!("Calls: {:?}", trace.entries);
        }
    }

    if let Some(count) = args.dump_result {
        let buffer = invocation.exports.dump_result(&invocation.results, count)?;
        println!("Buffer: {:?}", buffer);
    }

    debug!(stats = ?invoker.stats(), "Invocation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["wrun", "arithmetic.wasm", "add1", "10"]);
        assert_eq!(args.module, PathBuf::from("arithmetic.wasm"));
        assert_eq!(args.function, "add1");
        assert_eq!(args.joined_args(), "10");
        assert!(!args.no_trace);
        assert_eq!(args.dump_result, None);
    }

    #[test]
    fn test_quoted_and_separate_arguments_join_the_same() {
        let quoted = parse(&["wrun", "m.wasm", "sum3", "10 20 30"]);
        let separate = parse(&["wrun", "m.wasm", "sum3", "10", "20", "30"]);
        assert_eq!(
            parse_int_args(&quoted.joined_args()).unwrap(),
            parse_int_args(&separate.joined_args()).unwrap()
        );
    }

    #[test]
    fn test_negative_arguments_are_not_flags() {
        let args = parse(&["wrun", "m.wasm", "add1", "-5"]);
        assert_eq!(args.args, vec!["-5"]);
    }

    #[test]
    fn test_missing_function_is_usage_error() {
        let err = Args::try_parse_from(["wrun", "m.wasm"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_dump_result_default_count() {
        let args = parse(&["wrun", "--dump-result", "m.wasm", "buffer"]);
        assert_eq!(args.dump_result, Some(10));

        let args = parse(&["wrun", "--dump-result=3", "m.wasm", "buffer"]);
        assert_eq!(args.dump_result, Some(3));
    }

    #[test]
    fn test_environment_flags_map_to_config() {
        let args = parse(&[
            "wrun",
            "--memory-pages",
            "2",
            "--table-size",
            "8",
            "m.wasm",
            "f",
        ]);
        let config = args.invoke_config();
        assert_eq!(config.memory_pages, 2);
        assert_eq!(config.table_size, 8);
        assert_eq!(config.tracer, InvokeConfig::default().tracer);
    }

    #[test]
    fn test_log_options() {
        let args = parse(&[
            "wrun",
            "--log-level",
            "DEBUG",
            "--log-format",
            "json",
            "m.wasm",
            "f",
        ]);
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.log_format, LogFormat::Json);

        assert!(Args::try_parse_from(["wrun", "--log-level", "loud", "m.wasm", "f"]).is_err());
    }
}
