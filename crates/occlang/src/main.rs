use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use occlang::parser::UnitParser;
use occlang::{ClangParser, NodeKind, ParserSettings, find_occurrences};

/// Extract symbol occurrences from one source file.
///
/// Parses the file fresh from disk and prints every node of the
/// requested kind with its source span.
#[derive(Parser, Debug)]
#[command(name = "occlang", version, about)]
struct Args {
    /// Source file to analyze.
    file: PathBuf,

    /// Node kind to collect.
    #[arg(long, value_enum, default_value = "member-expr")]
    kind: NodeKind,

    /// Emit records as JSON instead of one line per record.
    #[arg(long)]
    json: bool,

    /// Extra include path for the compiler (repeatable).
    #[arg(long = "include", short = 'I', value_name = "DIR")]
    include_paths: Vec<String>,

    /// Compiler binary to invoke (overrides occlang.toml).
    #[arg(long)]
    clang: Option<String>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(args: &Args) {
    let filter = || {
        if args.verbose {
            EnvFilter::new("occlang=debug")
        } else {
            EnvFilter::new("occlang=warn")
        }
    };

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(filter());

    let registry = tracing_subscriber::registry().with(stderr_layer);

    if let Some(log_path) = &args.log_file {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("occlang.log")),
        );
        let file_layer =
            fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(filter());
        registry.with(file_layer).init();
    } else {
        registry.init();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    let mut settings = ParserSettings::for_source(&args.file);
    settings.include_paths.extend(args.include_paths.iter().cloned());
    if let Some(clang) = &args.clang {
        settings.clang_path = clang.clone();
    }

    let parser = ClangParser::new(settings);
    let identity = args.file.display().to_string();

    info!("parsing {identity}");
    let unit = match parser.parse(&identity) {
        Ok(unit) => unit,
        Err(e) => {
            error!("{e}");
            eprintln!("occlang: {e}");
            return ExitCode::FAILURE;
        },
    };

    let records = match find_occurrences(&unit, args.kind) {
        Ok(records) => records,
        Err(e) => {
            error!("{e}");
            eprintln!("occlang: {e}");
            return ExitCode::FAILURE;
        },
    };

    if args.json {
        match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("occlang: failed to serialize records: {e}");
                return ExitCode::FAILURE;
            },
        }
    } else {
        println!("occurrences ({}):", records.len());
        for record in &records {
            println!("{record}");
        }
    }

    ExitCode::SUCCESS
}
