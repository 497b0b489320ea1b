mod debug_report;
mod fetch;

use anyhow::Context as _;
use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};
use passgrab::{EncodingHints, ParseError, PasswordSet, TokenClass, parse, parse_verbose};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "https://www.grc.com/passwords.htm";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                                  (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

#[derive(Parser)]
#[command(name = "passgrab", version, about = "Fetch a fresh set of GRC high-security passwords")]
struct Cli {
    /// Page to fetch the passwords from.
    #[arg(long, env = "PASSGRAB_URL", default_value = DEFAULT_URL)]
    url: String,
    /// Parse a saved page instead of fetching (`-` reads stdin).
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// User-Agent header sent with the request.
    #[arg(long, env = "PASSGRAB_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Request timeout in seconds.
    #[arg(long, env = "PASSGRAB_TIMEOUT", default_value_t = 15)]
    timeout: u64,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Fail instead of falling back to Latin-1 on invalid UTF-8.
    #[arg(long)]
    strict_utf8: bool,
    /// Print a stage-by-stage report before the result.
    #[arg(short, long)]
    verbose: bool,
    /// Force ANSI color in the verbose report.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,
    /// Disable ANSI color in the verbose report.
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Response bytes plus where they came from.
struct Page {
    source: String,
    bytes: Vec<u8>,
    hints: EncodingHints,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    hex: &'a str,
    ascii: &'a str,
    alphanumeric: &'a str,
    fetched_at: DateTime<Local>,
    source: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose))))
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// `Err` is reserved for usage problems; fetch and parse failures are
/// reported here and map to exit code 1.
fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut page = match &cli.input {
        Some(path) => read_page(path)?,
        None => {
            let config =
                fetch::FetchConfig { url: &cli.url, user_agent: &cli.user_agent, timeout: Duration::from_secs(cli.timeout) };
            match fetch::fetch_page(&config) {
                Ok(fetched) => Page { source: fetched.url.clone(), hints: fetched.hints(), bytes: fetched.bytes },
                Err(err) => {
                    tracing::error!(url = %cli.url, error = %err, "fetch failed");
                    eprintln!("{err}");
                    return Ok(ExitCode::from(1));
                }
            }
        }
    };
    if cli.strict_utf8 {
        page.hints.allow_latin1_fallback = false;
    }

    let outcome = if cli.verbose {
        let color = !cli.no_color && (cli.color || io::stdout().is_terminal());
        let report = parse_verbose(&page.bytes, &page.hints);
        debug_report::print_report(&page.source, &report, color);
        report.outcome
    } else {
        parse(&page.bytes, &page.hints)
    };

    match outcome {
        Ok(set) => {
            print_passwords(&set, cli.format, &page.source)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_failure(&page.source, &err);
            Ok(ExitCode::from(1))
        }
    }
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "passgrab=debug" } else { "warn" }
}

/// The engine already logged why the page was rejected; this adds only the
/// user-facing line.
fn report_failure(source: &str, err: &ParseError) {
    tracing::debug!(source = %source, kind = ?err.kind(), reason = %err, "no passwords recovered");
    eprintln!("{}", err.user_message());
}

fn read_page(path: &Path) -> anyhow::Result<Page> {
    let bytes = if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer).context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    Ok(Page { source: path.display().to_string(), bytes, hints: EncodingHints::default() })
}

fn print_passwords(set: &PasswordSet, format: Format, source: &str) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let out = JsonOutput {
                hex: set.hex(),
                ascii: set.ascii(),
                alphanumeric: set.alphanumeric(),
                fetched_at: Local::now(),
                source,
            };
            println!("{}", serde_json::to_string_pretty(&out).context("failed to encode passwords as JSON")?);
        }
        Format::Text => {
            for (idx, (class, password)) in set.entries().into_iter().enumerate() {
                let (label, description) = describe(class);
                if idx > 0 {
                    println!();
                }
                println!("{label}  ({description})");
                println!("{password}");
            }
        }
    }
    Ok(())
}

fn describe(class: TokenClass) -> (&'static str, &'static str) {
    match class {
        TokenClass::HexUpper64 => ("64-char Hex", "256 random bits, ideal for WPA pre-shared keys"),
        TokenClass::PrintableAscii63 => ("63-char ASCII", "full printable ASCII character set"),
        TokenClass::Alnum63 => ("63-char Alphanumeric", "letters and digits only, broadest device compatibility"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn structural_failure_logs_one_warning_by_default() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(default_filter(false)))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let err = parse(b"<p>nothing to see</p>", &EncodingHints::default()).unwrap_err();
            report_failure("saved.htm", &err);
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.lines().filter(|line| line.contains("WARN")).count(), 1, "{logs}");
        assert!(!logs.contains("no passwords recovered"));
    }

    #[test]
    fn verbose_raises_the_crate_to_debug() {
        assert_eq!(default_filter(true), "passgrab=debug");
        assert_eq!(default_filter(false), "warn");
    }
}
