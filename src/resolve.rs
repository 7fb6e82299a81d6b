//! Path resolution against the declared root.
//!
//! Every directory that gets an index is first placed relative to the root.
//! The root-relative form drives the page title, the breadcrumb trail, and
//! the "up" link, so a target outside the root is a configuration error, not
//! something to render.
//!
//! ```text
//! root:    /srv/files
//! target:  /srv/files/sub/dir
//! ────────────────────────────
//! relative_to_root:  sub/dir
//! chrooted:          /sub/dir
//! can_go_up:         true
//! ```
//!
//! Paths are made absolute against the working directory and then cleaned
//! lexically (`.` dropped, `..` popped). Symlinks are not resolved, so a
//! symlinked target is judged by where it appears, not where it points.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("root is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("directory is outside root: {target} is not under {root}")]
    OutsideRoot { target: PathBuf, root: PathBuf },
    #[error("cannot resolve {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The declared root, shared read-only by every directory visit of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootContext {
    root: PathBuf,
}

impl RootContext {
    /// Resolve `root` to an absolute path and check that it is a directory.
    pub fn new(root: &Path) -> Result<Self, ResolveError> {
        let root = absolute_clean(root)?;
        let meta = fs::metadata(&root).map_err(|source| ResolveError::Io {
            path: root.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(ResolveError::RootNotDirectory(root));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Place `target` relative to the root.
    ///
    /// Fails with [`ResolveError::OutsideRoot`] unless the target is the root
    /// itself or one of its descendants. Containment is decided per path
    /// component, so `root/..cache` is inside and `root-old` is not.
    pub fn resolve(&self, target: &Path) -> Result<TargetDirectory, ResolveError> {
        let absolute = absolute_clean(target)?;
        let relative = absolute
            .strip_prefix(&self.root)
            .map_err(|_| ResolveError::OutsideRoot {
                target: absolute.clone(),
                root: self.root.clone(),
            })?
            .to_path_buf();

        let chrooted = chroot(&relative);
        let can_go_up = absolute != self.root;

        log::debug!(
            "resolved {} -> {} (chrooted {})",
            target.display(),
            absolute.display(),
            chrooted
        );

        Ok(TargetDirectory {
            given: target.to_path_buf(),
            absolute,
            relative_to_root: relative,
            chrooted,
            can_go_up,
        })
    }
}

/// A directory placed relative to the root, owned by a single visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    /// The path as the caller supplied it. Output files are written here.
    pub given: PathBuf,
    pub absolute: PathBuf,
    /// Empty when the target is the root.
    pub relative_to_root: PathBuf,
    /// The root-relative path as if the root were `/`. Display only.
    pub chrooted: String,
    /// False only when the target is the root itself.
    pub can_go_up: bool,
}

impl TargetDirectory {
    /// Where this directory's index file goes.
    pub fn index_path(&self, index_name: &str) -> PathBuf {
        self.given.join(index_name)
    }
}

/// Join a root-relative path under a synthetic `/`, always with `/` separators.
fn chroot(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}

/// Make `path` absolute against the working directory and clean it lexically.
fn absolute_clean(path: &Path) -> Result<PathBuf, ResolveError> {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute = std::path::absolute(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            Component::Normal(part) => cleaned.push(part),
        }
    }
    Ok(cleaned)
}
