//! # indexify
//!
//! Generates static `index.html` directory listings for file trees served by
//! plain HTTP servers that cannot list directories themselves.
//!
//! ```text
//! indexify --root /srv/files -r /srv/files/releases
//! ```
//!
//! writes a listing page into `releases/` and every directory below it. Each
//! page has a breadcrumb trail back to the root, an "up" link, and one row per
//! entry with its size and UTC modification time.
//!
//! # Pipeline
//!
//! Every directory goes through the same stages, with nothing carried over
//! between directories except the immutable [`config::Config`]:
//!
//! ```text
//! 1. Resolve     target dir  →  TargetDirectory   (position under the root)
//! 2. Collect     directory   →  Listing           (visible entries + counts)
//! 3. Breadcrumb  chrooted    →  Vec<Breadcrumb>   (relative trail)
//! 4. Guard       index path  →  write / skip      (never clobber foreign files)
//! 5. Render      document    →  HTML              (stdout, dry-run, or file)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolve`] | Root containment, chrooted paths, the "can go up" flag |
//! | [`collect`] | Directory listing: filtering, metadata, links, counts |
//! | [`breadcrumb`] | Relative breadcrumb trail with per-segment decoding |
//! | [`guard`] | Decides whether the output file may be (over)written |
//! | [`render`] | Maud template for the listing page |
//! | [`index`] | Per-directory pipeline, skip-vs-fatal handling, run driver |
//! | [`walk`] | Depth-first directory sequence for recursive runs |
//! | [`config`] | Layered run configuration (defaults → `.indexify.toml` → flags) |
//! | [`output`] | Console lines for outcomes, summaries and errors |
//!
//! # Design Decisions
//!
//! ## Overwrite Safety
//!
//! The output file lands in directories full of other people's files. A page
//! is only ever replaced if it contains the footer marker written by this
//! tool ([`guard::GENERATED_MARKER`]). A foreign `index.html`, or a directory
//! with that name, makes the tool skip that directory and move on. It never
//! aborts a sweep.
//!
//! ## Relative Links Only
//!
//! Breadcrumbs and the "up" link are `../` hops, so generated pages keep
//! working wherever the tree is mounted. Item links are bare names unless a
//! base URL is configured for files hosted elsewhere.
//!
//! ## Skip Versus Fatal
//!
//! [`index::IndexError::is_skip`] is the only place that decides whether a
//! failure skips one directory or ends the run. A target outside the root, an
//! unreadable listing or unreadable entry metadata all end the run: a partial
//! listing would misrepresent the directory.

pub mod breadcrumb;
pub mod collect;
pub mod config;
pub mod guard;
pub mod index;
pub mod output;
pub mod render;
pub mod resolve;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
