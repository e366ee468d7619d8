/// `cbordiag`: render, validate and inspect encoded item streams.
///
/// # Command overview
///
/// ```text
/// cbordiag <COMMAND> [OPTIONS]
///
/// Commands:
///   diag       Print the diagnostic notation of every item in a file
///   validate   Check a file for well-formedness
///   inspect    List every item header: offset, depth, type, argument
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable debug logging on stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, malformed input, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_diag;
mod cmd_inspect;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Diagnostic tool for compact binary item streams.
#[derive(Parser)]
#[command(name = "cbordiag", version, about = "Render binary item streams as diagnostic text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (container enter/leave, decode failures).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the diagnostic notation of every item in a file.
    Diag(DiagArgs),
    /// Check a file for well-formedness.
    Validate(ValidateArgs),
    /// List every item header with its offset, depth and encoded width.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Where the bytes come from. Shared by every sub-command.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to the input file.
    pub file: PathBuf,

    /// Treat the file as hex text (whitespace is ignored).
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `cbordiag diag`.
///
/// ```text
/// ┌───────────────────────┬──────────────────────────────────────────────┐
/// │ Flag                  │ Effect                                       │
/// ├───────────────────────┼──────────────────────────────────────────────┤
/// │ --hex                 │ Input file holds hex text, not raw bytes     │
/// │ --escape-invalid-text │ Show non-UTF-8 text bytes as \xNN            │
/// │ --max-depth N         │ Nesting limit (default 256)                  │
/// └───────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DiagArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Render invalid UTF-8 in text strings as `\xNN` instead of failing.
    #[arg(long)]
    pub escape_invalid_text: bool,

    /// Maximum nesting depth of containers and tags.
    #[arg(long, default_value_t = cbor_decoder::config::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Arguments for `cbordiag validate`.
///
/// Walks every item and reports either a set of success checkmarks or the
/// first error. The process exits with code 1 on any structural problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `cbordiag inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Diag(args) => cmd_diag::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diag_flags_parse() {
        let cli = Cli::try_parse_from([
            "cbordiag",
            "-v",
            "diag",
            "in.hex",
            "--hex",
            "--escape-invalid-text",
            "--max-depth",
            "8",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Diag(args) = cli.command else {
            panic!("expected diag");
        };
        assert!(args.input.hex);
        assert!(args.escape_invalid_text);
        assert_eq!(args.max_depth, 8);
        assert_eq!(args.input.file, PathBuf::from("in.hex"));
    }

    #[test]
    fn max_depth_defaults() {
        let cli = Cli::try_parse_from(["cbordiag", "diag", "in.bin"]).unwrap();
        let Commands::Diag(args) = cli.command else {
            panic!("expected diag");
        };
        assert_eq!(args.max_depth, 256);
        assert!(!args.input.hex);
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["cbordiag", "inspect", "in.bin", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }
}
