// src/main.rs

use anyhow::Context;
use log::{debug, info};
use runescan::config::{Config, OutputFormat, CONFIG};
use runescan::{Scanner, Token, TokenKind};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

const USAGE: &str = "Usage: runescan [--format text|json] [--config PATH] [FILE...]";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    format: Option<OutputFormat>,
    config: Option<PathBuf>,
    files: Vec<PathBuf>,
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("{}", USAGE);
    process::exit(2);
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            "-f" | "--format" => {
                let value = argv
                    .next()
                    .unwrap_or_else(|| usage_error("Missing value for --format"));
                match value.parse() {
                    Ok(format) => args.format = Some(format),
                    Err(e) => usage_error(&e.to_string()),
                }
            }
            "-c" | "--config" => {
                let value = argv
                    .next()
                    .unwrap_or_else(|| usage_error("Missing value for --config"));
                args.config = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') => {
                usage_error(&format!("Unknown argument: {}", flag))
            }
            file => args.files.push(PathBuf::from(file)),
        }
    }
    args
}

fn write_token(out: &mut impl Write, format: OutputFormat, token: &Token) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "\"{}\" -> {}", token.kind(), token.lexeme())?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, token)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Scans one input to the end. Returns the number of `ILLEGAL` tokens seen.
fn scan_input(
    input: impl Read,
    config: &Config,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let mut scanner = Scanner::from_reader(input);
    let mut illegal = 0;
    loop {
        let token = scanner.next_token();
        if token.kind() == TokenKind::Illegal {
            illegal += 1;
        }
        if token.is_eof() {
            if config.output.include_eof {
                write_token(out, format, &token)?;
            }
            return Ok(illegal);
        }
        write_token(out, format, &token)?;
    }
}

fn main() -> anyhow::Result<()> {
    let args = parse_args();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => CONFIG.clone(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.default_filter.as_str()),
    )
    .format_timestamp_micros()
    .init();

    debug!("Configuration: {:?}", config);
    let format = args.format.unwrap_or(config.output.format);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut illegal = 0;

    if args.files.is_empty() {
        info!("Scanning stdin");
        illegal += scan_input(io::stdin().lock(), &config, format, &mut out)
            .context("Failed to scan stdin")?;
    } else {
        for path in &args.files {
            info!("Scanning {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            illegal += scan_input(file, &config, format, &mut out)
                .with_context(|| format!("Failed to scan {}", path.display()))?;
        }
    }
    out.flush().context("Failed to flush output")?;

    if illegal > 0 {
        info!("{} illegal token(s)", illegal);
        if config.scan.fail_on_illegal {
            process::exit(1);
        }
    }
    Ok(())
}
