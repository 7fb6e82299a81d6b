//! The per-directory pipeline and the run driver.
//!
//! ```text
//! resolve → collect → breadcrumbs → IndexDocument → render → emit
//!                                                             ├─ stdout
//!                                                             ├─ dry-run notice
//!                                                             └─ guard → write
//! ```
//!
//! [`index_directory`] runs the pipeline once. [`run`] drives it over a
//! single target or every directory of a sweep, turning the recoverable
//! guard refusals into [`Outcome::Skipped`] and stopping on anything else.

use crate::breadcrumb::{Breadcrumb, build_breadcrumbs};
use crate::collect::{CollectError, ListingItem, collect_entries};
use crate::config::{Config, OutputMode};
use crate::guard::{GuardError, check_render_target};
use crate::output;
use crate::render::render_document;
use crate::resolve::{ResolveError, TargetDirectory};
use crate::walk;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl IndexError {
    /// Skip this directory and continue, rather than abort the run.
    pub fn is_skip(&self) -> bool {
        match self {
            IndexError::Guard(err) => err.is_skip(),
            _ => false,
        }
    }
}

/// Everything one page shows, built fresh for each directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub title: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub num_dirs: usize,
    pub num_files: usize,
    pub can_go_up: bool,
    pub items: Vec<ListingItem>,
}

/// What happened to one directory.
#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    DryRun(PathBuf),
    Stdout,
    Skipped(GuardError),
}

/// Totals for a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub directories: usize,
    pub written: usize,
    pub skipped: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome) {
        self.directories += 1;
        match outcome {
            Outcome::Written(_) => self.written += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::DryRun(_) | Outcome::Stdout => {}
        }
    }
}

/// Resolve and collect one directory into a document.
pub fn build_document(
    config: &Config,
    dir: &Path,
) -> Result<(TargetDirectory, IndexDocument), IndexError> {
    let target = config.root.resolve(dir)?;
    let listing = collect_entries(&target.absolute, &config.collect_options())?;

    let doc = IndexDocument {
        title: format!("Index: {}", target.chrooted),
        breadcrumbs: build_breadcrumbs(&target.chrooted),
        num_dirs: listing.num_dirs,
        num_files: listing.num_files,
        can_go_up: target.can_go_up,
        items: listing.items,
    };
    Ok((target, doc))
}

/// Run the whole pipeline for one directory.
///
/// Guard refusals come back as `Err`; the caller decides via
/// [`IndexError::is_skip`] whether to carry on.
pub fn index_directory(
    config: &Config,
    dir: &Path,
    out: &mut dyn Write,
) -> Result<Outcome, IndexError> {
    let (target, doc) = build_document(config, dir)?;
    let html = render_document(&doc).into_string();

    if config.output == OutputMode::Stdout {
        out.write_all(html.as_bytes())
            .map_err(|source| IndexError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        return Ok(Outcome::Stdout);
    }

    let path = target.index_path(&config.index_name);
    check_render_target(&path)?;

    if config.dry_run {
        return Ok(Outcome::DryRun(path));
    }

    fs::write(&path, html).map_err(|source| IndexError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(Outcome::Written(path))
}

/// Index `target`, or every directory under it for recursive runs.
///
/// Each outcome is reported as it happens. The first non-skip error ends the
/// run.
pub fn run(
    config: &Config,
    target: &Path,
    out: &mut dyn Write,
) -> Result<RunSummary, IndexError> {
    let mut summary = RunSummary::default();

    if config.recursive {
        for dir in walk::directories(target) {
            let outcome = visit(config, &dir?, out)?;
            summary.record(&outcome);
        }
    } else {
        let outcome = visit(config, target, out)?;
        summary.record(&outcome);
    }

    Ok(summary)
}

fn visit(config: &Config, dir: &Path, out: &mut dyn Write) -> Result<Outcome, IndexError> {
    let outcome = match index_directory(config, dir, out) {
        Ok(outcome) => outcome,
        Err(IndexError::Guard(err)) if err.is_skip() => Outcome::Skipped(err),
        Err(err) => return Err(err),
    };
    output::print_outcome(&outcome);
    Ok(outcome)
}
