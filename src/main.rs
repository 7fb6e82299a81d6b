use clap::{ArgAction, Parser};
use indexify::config::{Config, Overrides};
use indexify::{index, output};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "indexify")]
#[command(about = "Generate static HTML directory listings")]
#[command(long_about = "\
Generate static HTML directory listings

Writes an index page into a directory (or, with -r, into every directory
below it) listing its entries with sizes and modification times. Links and
breadcrumbs are relative to --root, so the pages work when the tree is
published behind any plain file server.

An existing index file is only replaced if an earlier run generated it.
Anything else in its place is reported as skipped and left untouched.

Defaults for --hidden, --index-name and --base-url can be set in a
.indexify.toml file in the root directory. Flags win over the file;
--no-hidden switches a configured `hidden = true` off.")]
#[command(version)]
struct Cli {
    /// Directory to index
    dir: PathBuf,

    /// Path to root directory
    #[arg(long)]
    root: PathBuf,

    /// Index hidden files
    #[arg(long, overrides_with = "no_hidden")]
    hidden: bool,

    /// Don't index hidden files, even if the config file enables them
    #[arg(long, overrides_with = "hidden")]
    no_hidden: bool,

    /// Don't write anything to disk
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Output to stdout only
    #[arg(long)]
    stdout: bool,

    /// Name of index file to generate [default: index.html]
    #[arg(long)]
    index_name: Option<String>,

    /// Base url to use for links (if the files are hosted elsewhere)
    #[arg(long)]
    base_url: Option<String>,

    /// More diagnostic logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", output::format_error(&*err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = Overrides {
        hidden: flag_pair(cli.hidden, cli.no_hidden),
        dry_run: cli.dry_run,
        recursive: cli.recursive,
        stdout: cli.stdout,
        index_name: cli.index_name,
        base_url: cli.base_url,
    };
    let config = Config::load(&cli.root, overrides)?;
    log::debug!("config: {config:?}");

    let stdout = io::stdout();
    let summary = index::run(&config, &cli.dir, &mut stdout.lock())?;

    if config.recursive && !cli.stdout {
        output::print_summary(&summary);
    }
    Ok(())
}

/// An on/off flag pair as a tri-state; the later flag has already won in clap.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// `RUST_LOG` wins; otherwise warnings only, raised by `-v`.
fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
