use clap::{Parser, ValueEnum};
use std::io::Read;

use shellfs::report::UsageReport;
use shellfs::transcript;

#[derive(Debug, Clone, ValueEnum, Default)]
enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    fn to_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[derive(Parser)]
#[command(name = "shellfs")]
#[command(about = "Replay a shell-session transcript and report disk usage")]
#[command(version)]
struct Cli {
    /// Transcript file to replay (stdin when omitted)
    #[arg()]
    transcript_file: Option<String>,

    /// Directory-size ceiling for the threshold sum
    #[arg(long, default_value_t = 100_000)]
    threshold: u64,

    /// Total disk capacity in bytes
    #[arg(long, default_value_t = 70_000_000)]
    capacity: u64,

    /// Free space the report's deletion candidate must achieve
    #[arg(long, default_value_t = 30_000_000)]
    required_free: u64,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    setup_tracing(&cli);

    // Determine transcript source: file or stdin
    let input = if let Some(ref file) = cli.transcript_file {
        match std::fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read transcript file: {}: {}", file, e);
                std::process::exit(1);
            }
        }
    } else {
        use std::io::IsTerminal;
        if std::io::stdin().is_terminal() {
            eprintln!("Error: No transcript provided. Provide a transcript file or pipe via stdin.");
            std::process::exit(1);
        }
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_default();
        buf
    };

    let navigator = match transcript::replay(input.lines()) {
        Ok(navigator) => navigator,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report =
        match UsageReport::build(&navigator, cli.threshold, cli.capacity, cli.required_free) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", report);
    }
}

fn setup_tracing(cli: &Cli) {
    if let Some(level) = cli.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .compact()
            .init();
    }
}
