//! Overwrite protection for the output file.
//!
//! The tool writes `index.html` (or the configured name) into directories
//! that belong to someone else. It may replace a file it generated itself on
//! an earlier run, and nothing else:
//!
//! | Existing path               | Decision                        |
//! |-----------------------------|---------------------------------|
//! | missing or unopenable       | write ([`TargetState::New`])    |
//! | file containing the marker  | overwrite ([`TargetState::Generated`]) |
//! | directory                   | skip ([`GuardError::TargetIsDirectory`]) |
//! | any other file              | skip ([`GuardError::TargetExistsForeign`]) |
//!
//! Recognition is a plain substring search for [`GENERATED_MARKER`] in the
//! file's bytes. Pages produced by older releases carry the same footer, so
//! they stay replaceable.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Substring every generated page contains in its footer.
pub const GENERATED_MARKER: &str = "Index generated with";

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("target is a directory: {0}")]
    TargetIsDirectory(PathBuf),
    #[error("target already exists and is not a generated file: {0}")]
    TargetExistsForeign(PathBuf),
    #[error("cannot inspect {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GuardError {
    /// Whether the caller should skip this directory and carry on.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            GuardError::TargetIsDirectory(_) | GuardError::TargetExistsForeign(_)
        )
    }
}

/// What a permitted write will do to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    New,
    Generated,
}

/// Decide whether `path` may be written.
///
/// The read handle is dropped before this returns, so the caller can open
/// the same path for writing straight away.
pub fn check_render_target(path: &Path) -> Result<TargetState, GuardError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} does not exist, writing new file", path.display());
            return Ok(TargetState::New);
        }
        Err(err) => {
            log::warn!("{} exists but cannot be read ({err}), treating as new", path.display());
            return Ok(TargetState::New);
        }
    };

    let io_error = |source| GuardError::Io {
        path: path.to_path_buf(),
        source,
    };

    if file.metadata().map_err(io_error)?.is_dir() {
        return Err(GuardError::TargetIsDirectory(path.to_path_buf()));
    }

    let mut content = Vec::new();
    file.read_to_end(&mut content).map_err(io_error)?;
    drop(file);

    if contains_marker(&content) {
        log::debug!("{} was generated earlier, overwriting", path.display());
        Ok(TargetState::Generated)
    } else {
        Err(GuardError::TargetExistsForeign(path.to_path_buf()))
    }
}

fn contains_marker(content: &[u8]) -> bool {
    let marker = GENERATED_MARKER.as_bytes();
    content.windows(marker.len()).any(|w| w == marker)
}
