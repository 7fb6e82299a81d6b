//! Directory entry collection.
//!
//! Lists the immediate children of one directory and turns each visible
//! entry into a [`ListingItem`]. Two kinds of entry are never listed:
//!
//! - the index file this tool writes into the directory (so a regenerated
//!   page never lists its own previous output)
//! - hidden entries (`.name`), unless hidden inclusion is on
//!
//! Items come back in whatever order the directory read yields. That order
//! is filesystem-dependent and is not alphabetical in general.
//!
//! ## Symlinks
//!
//! `is_symlink` describes the entry itself. Size, modification time and the
//! directory flag describe what the link points to, so a link to a directory
//! is listed (and counted) as a directory. A dangling link has no such data
//! and fails the whole listing with [`CollectError::Metadata`]: a page that
//! silently omits entries would misrepresent the directory.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Filtering and linking settings for one collection pass.
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions<'a> {
    pub include_hidden: bool,
    /// Name of the generated index file, excluded from every listing.
    pub index_name: &'a str,
    /// Prefix for item links when files are hosted elsewhere.
    pub base_url: Option<&'a str>,
}

/// One visible child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    /// Base URL joined with the name, or the bare name.
    pub link: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// The visible children of one directory with running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<ListingItem>,
    pub num_dirs: usize,
    pub num_files: usize,
}

impl Listing {
    fn push(&mut self, item: ListingItem) {
        if item.is_dir {
            self.num_dirs += 1;
        } else {
            self.num_files += 1;
        }
        self.items.push(item);
    }
}

pub fn collect_entries(dir: &Path, options: &CollectOptions) -> Result<Listing, CollectError> {
    let read_dir_error = |source| CollectError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut listing = Listing::default();

    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if !is_visible(&name, options) {
            log::debug!("excluded {}", entry.path().display());
            continue;
        }

        listing.push(read_item(&entry.path(), name, options.base_url)?);
    }

    log::debug!(
        "collected {} ({} dirs, {} files)",
        dir.display(),
        listing.num_dirs,
        listing.num_files
    );
    Ok(listing)
}

fn is_visible(name: &str, options: &CollectOptions) -> bool {
    if !options.include_hidden && name.starts_with('.') {
        return false;
    }
    name != options.index_name
}

fn read_item(
    path: &Path,
    name: String,
    base_url: Option<&str>,
) -> Result<ListingItem, CollectError> {
    let metadata_error = |source| CollectError::Metadata {
        path: path.to_path_buf(),
        source,
    };

    let is_symlink = fs::symlink_metadata(path)
        .map_err(metadata_error)?
        .file_type()
        .is_symlink();
    let meta = fs::metadata(path).map_err(metadata_error)?;
    let modified = meta.modified().map_err(metadata_error)?;

    Ok(ListingItem {
        link: item_link(base_url, &name),
        is_dir: meta.is_dir(),
        is_symlink,
        size: meta.len(),
        modified: DateTime::<Utc>::from(modified),
        name,
    })
}

/// Join `name` onto the base URL with exactly one `/` between them.
pub fn item_link(base_url: Option<&str>, name: &str) -> String {
    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    const DEFAULTS: CollectOptions<'static> = CollectOptions {
        include_hidden: false,
        index_name: "index.html",
        base_url: None,
    };

    #[test]
    fn one_directory_and_one_file() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["docs/"]);
        write_file(&tmp.path().join("readme.txt"), "0123456789");

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();

        assert_eq!(listing.num_dirs, 1);
        assert_eq!(listing.num_files, 1);
        assert!(find_item(&listing, "docs").is_dir);
        let readme = find_item(&listing, "readme.txt");
        assert!(!readme.is_dir);
        assert!(!readme.is_symlink);
        assert_eq!(readme.size, 10);
    }

    #[test]
    fn generated_index_is_never_listed() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["index.html", "page.html"]);

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        assert_eq!(item_names(&listing), vec!["page.html"]);
    }

    #[test]
    fn configured_index_name_is_excluded_instead_of_default() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["index.html", "listing.html"]);

        let options = CollectOptions {
            index_name: "listing.html",
            ..DEFAULTS
        };
        let listing = collect_entries(tmp.path(), &options).unwrap();
        assert_eq!(item_names(&listing), vec!["index.html"]);
    }

    #[test]
    fn hidden_entries_skipped_by_default() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &[".git/", ".env", "visible.txt"]);

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        assert_eq!(item_names(&listing), vec!["visible.txt"]);
        assert_eq!(listing.num_dirs, 0);
    }

    #[test]
    fn hidden_entries_included_on_request() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &[".git/", ".env", "visible.txt"]);

        let options = CollectOptions {
            include_hidden: true,
            ..DEFAULTS
        };
        let listing = collect_entries(tmp.path(), &options).unwrap();
        assert_eq!(item_names(&listing), vec![".env", ".git", "visible.txt"]);
        assert_eq!(listing.num_dirs, 1);
        assert_eq!(listing.num_files, 2);
    }

    #[test]
    fn counts_match_item_flags() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["a/", "b/", "c/", "one.txt", "two.bin"]);

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        let dirs = listing.items.iter().filter(|i| i.is_dir).count();
        let files = listing.items.iter().filter(|i| !i.is_dir).count();
        assert_eq!(listing.num_dirs, dirs);
        assert_eq!(listing.num_files, files);
        assert_eq!((dirs, files), (3, 2));
    }

    #[test]
    fn empty_directory_has_no_items() {
        let tmp = TempDir::new().unwrap();
        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        assert_eq!(listing, Listing::default());
    }

    #[test]
    fn links_are_bare_names_without_base_url() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["report.pdf"]);

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        assert_eq!(find_item(&listing, "report.pdf").link, "report.pdf");
    }

    #[test]
    fn links_are_prefixed_with_base_url() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["report.pdf"]);

        let options = CollectOptions {
            base_url: Some("https://cdn.example.com/files/"),
            ..DEFAULTS
        };
        let listing = collect_entries(tmp.path(), &options).unwrap();
        assert_eq!(
            find_item(&listing, "report.pdf").link,
            "https://cdn.example.com/files/report.pdf"
        );
    }

    #[test]
    fn item_link_keeps_url_scheme_intact() {
        assert_eq!(
            item_link(Some("https://example.com"), "a b.txt"),
            "https://example.com/a b.txt"
        );
        assert_eq!(item_link(Some("/mirror"), "x"), "/mirror/x");
        assert_eq!(item_link(None, "x"), "x");
    }

    #[test]
    fn missing_directory_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_entries(&tmp.path().join("gone"), &DEFAULTS);
        assert!(matches!(result, Err(CollectError::ReadDir { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_counts_as_directory() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path(), &["real/"]);
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("alias")).unwrap();

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        let alias = find_item(&listing, "alias");
        assert!(alias.is_dir);
        assert!(alias.is_symlink);
        assert!(!find_item(&listing, "real").is_symlink);
        assert_eq!(listing.num_dirs, 2);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_metadata_error() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), tmp.path().join("broken"))
            .unwrap();

        let result = collect_entries(tmp.path(), &DEFAULTS);
        assert!(matches!(result, Err(CollectError::Metadata { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn hidden_dangling_symlink_is_filtered_before_metadata() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), tmp.path().join(".broken"))
            .unwrap();

        let listing = collect_entries(tmp.path(), &DEFAULTS).unwrap();
        assert!(listing.items.is_empty());
    }
}
