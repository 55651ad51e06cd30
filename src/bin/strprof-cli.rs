//! strprof CLI - Command-line interface for column profiling
//!
//! This binary profiles newline-separated values from files or stdin and
//! emits the profile as JSON, infers a single regex for a sample, or checks
//! a value against a freshly built profile.
//!
//! # Usage
//!
//! ```bash
//! strprof-cli profile values.txt
//! strprof-cli profile 'data/*.txt' --max-clusters 3
//! strprof-cli infer --stdin < values.txt
//! strprof-cli validate ACC-00123 values.txt
//! ```
//!
//! File arguments may be glob patterns; matches are concatenated in sorted
//! order. With no files (or `--stdin`) values are read from stdin.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};

use strprof::{export, infer_regex, profile, validate, ProfileOptions};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Silence log messages.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile values and print the JSON export
    Profile {
        /// Input files or glob patterns (omit for stdin)
        files: Vec<String>,

        /// Read from stdin instead of files
        #[arg(long)]
        stdin: bool,

        /// Upper bound on surviving clusters
        #[arg(long, default_value_t = 5)]
        max_clusters: usize,

        /// Max distinct values before generalizing at a position
        #[arg(long, default_value_t = 10)]
        enum_threshold: usize,

        /// Drop patterns below this coverage
        #[arg(long, default_value_t = 0.01)]
        min_coverage: f64,

        /// Skip anomaly detection
        #[arg(long)]
        no_anomalies: bool,

        /// Also print anomalous values, one per line, to stderr
        #[arg(long)]
        show_anomalies: bool,
    },

    /// Infer a single regex for the values and print it
    Infer {
        /// Input files or glob patterns (omit for stdin)
        files: Vec<String>,

        /// Read from stdin instead of files
        #[arg(long)]
        stdin: bool,

        /// Max distinct values before generalizing at a position
        #[arg(long, default_value_t = 10)]
        enum_threshold: usize,
    },

    /// Profile the values, then check VALUE against the result
    Validate {
        /// The value to check
        value: String,

        /// Input files or glob patterns (omit for stdin)
        files: Vec<String>,

        /// Read from stdin instead of files
        #[arg(long)]
        stdin: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => stderrlog::LogLevelNum::Warn,
        1 => stderrlog::LogLevelNum::Info,
        2 => stderrlog::LogLevelNum::Debug,
        _ => stderrlog::LogLevelNum::Trace,
    };
    if let Err(e) = stderrlog::new()
        .quiet(cli.quiet)
        .verbosity(level)
        .init()
    {
        eprintln!("failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Profile {
            files,
            stdin,
            max_clusters,
            enum_threshold,
            min_coverage,
            no_anomalies,
            show_anomalies,
        } => {
            let values = read_values_or_exit(&files, stdin);
            let options = ProfileOptions {
                max_clusters,
                enum_threshold,
                min_coverage,
                detect_anomalies: !no_anomalies,
                ..ProfileOptions::default()
            };
            match profile(&values, options) {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&export(&result))
                        .unwrap_or_else(|_| "{}".to_string()));
                    if show_anomalies {
                        for anomaly in &result.anomalies {
                            eprintln!("{}", anomaly);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Infer {
            files,
            stdin,
            enum_threshold,
        } => {
            let values = read_values_or_exit(&files, stdin);
            let options = ProfileOptions {
                enum_threshold,
                ..ProfileOptions::default()
            };
            println!("{}", infer_regex(&values, &options));
        }
        Commands::Validate {
            value,
            files,
            stdin,
        } => {
            let values = read_values_or_exit(&files, stdin);
            match profile(&values, ProfileOptions::default()) {
                Ok(result) => match validate(&result, &value) {
                    Ok(()) => println!("ok"),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn read_values_or_exit(files: &[String], stdin: bool) -> Vec<String> {
    match read_values(files, stdin) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    }
}

/// Read newline-separated values from the given files (glob patterns
/// allowed) or from stdin. Blank lines are skipped.
fn read_values(files: &[String], stdin: bool) -> io::Result<Vec<String>> {
    let mut values = Vec::new();
    if stdin || files.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        push_lines(&mut values, &buffer);
        return Ok(values);
    }

    for arg in files {
        if arg.chars().any(|c| matches!(c, '*' | '?' | '[')) {
            let paths = glob::glob(arg)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
            for entry in paths {
                let path =
                    entry.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
                push_lines(&mut values, &fs::read_to_string(&path)?);
            }
        } else {
            push_lines(&mut values, &fs::read_to_string(arg)?);
        }
    }
    Ok(values)
}

fn push_lines(values: &mut Vec<String>, content: &str) {
    for line in content.lines() {
        if !line.is_empty() {
            values.push(line.to_string());
        }
    }
}
