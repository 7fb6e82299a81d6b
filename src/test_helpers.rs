//! Shared test utilities: fixture trees and listing lookups.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! build_tree(tmp.path(), &["docs/", "docs/guide.md", "readme.txt"]);
//!
//! let listing = collect_entries(tmp.path(), &options).unwrap();
//! assert!(find_item(&listing, "docs").is_dir);
//! assert_eq!(item_names(&listing), vec!["docs", "readme.txt"]);
//! ```

use std::fs;
use std::path::Path;

use crate::collect::{Listing, ListingItem};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create entries under `root`. A trailing `/` makes a directory, anything
/// else a small file (parents are created as needed).
pub fn build_tree(root: &Path, entries: &[&str]) {
    for entry in entries {
        if let Some(dir) = entry.strip_suffix('/') {
            fs::create_dir_all(root.join(dir)).unwrap();
        } else {
            write_file(&root.join(entry), "fixture");
        }
    }
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Every path under `root`, relative and sorted, directories suffixed `/`.
pub fn snapshot(root: &Path) -> Vec<String> {
    let mut paths: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            let e = e.unwrap();
            let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().into_owned();
            if e.file_type().is_dir() {
                format!("{rel}/")
            } else {
                rel
            }
        })
        .collect();
    paths.sort();
    paths
}

// =========================================================================
// Listing lookups — panics with a clear message on miss
// =========================================================================

/// Find an item by name. Panics if not found.
pub fn find_item<'a>(listing: &'a Listing, name: &str) -> &'a ListingItem {
    listing
        .items
        .iter()
        .find(|i| i.name == name)
        .unwrap_or_else(|| {
            let names = item_names(listing);
            panic!("item '{name}' not found. Available: {names:?}")
        })
}

/// All item names, sorted (directory read order is not stable).
pub fn item_names(listing: &Listing) -> Vec<&str> {
    let mut names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    names.sort_unstable();
    names
}
