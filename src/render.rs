//! HTML rendering of an [`IndexDocument`].
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the HTML in this
//! crate: markup is checked at compile time and every interpolated file name
//! is escaped. The stylesheet is embedded, so a generated page is a single
//! self-contained file.
//!
//! The footer always carries [`GENERATED_MARKER`]; the render-target guard
//! relies on it to recognise pages it may overwrite.

use crate::breadcrumb::Breadcrumb;
use crate::collect::ListingItem;
use crate::guard::GENERATED_MARKER;
use crate::index::IndexDocument;
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render a complete page.
pub fn render_document(doc: &IndexDocument) -> Markup {
    let content = html! {
        header {
            @if !doc.breadcrumbs.is_empty() {
                (breadcrumb_trail(&doc.breadcrumbs))
            }
            h1 { (doc.title) }
            p.summary { (summary(doc.num_dirs, doc.num_files)) }
        }
        main {
            table.listing {
                thead {
                    tr {
                        th { "Name" }
                        th { "Size" }
                        th { "Modified (UTC)" }
                    }
                }
                tbody {
                    @if doc.can_go_up {
                        tr.up {
                            td { a href="../" { "../" } }
                            td.size { "-" }
                            td.modified {}
                        }
                    }
                    @for item in &doc.items {
                        (item_row(item))
                    }
                }
            }
        }
        footer {
            (GENERATED_MARKER) " indexify " (VERSION)
        }
    };

    base_document(&doc.title, content)
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn breadcrumb_trail(crumbs: &[Breadcrumb]) -> Markup {
    html! {
        nav.breadcrumb {
            @for (i, crumb) in crumbs.iter().enumerate() {
                @if i > 1 {
                    span.sep { "/" }
                }
                @if crumb.link.is_empty() {
                    span.current { (crumb.text) }
                } @else {
                    a href=(crumb.link) { (crumb.text) }
                }
            }
        }
    }
}

fn item_row(item: &ListingItem) -> Markup {
    let href = item_href(item);
    let (href, label) = if item.is_dir {
        (format!("{href}/"), format!("{}/", item.name))
    } else {
        (href, item.name.clone())
    };

    html! {
        tr.dir[item.is_dir] {
            td.name {
                a href=(href) { (label) }
                @if item.is_symlink {
                    span.tag { "symlink" }
                }
            }
            td.size {
                @if item.is_dir { "-" } @else { (format_size(item.size)) }
            }
            td.modified { (format_modified(&item.modified)) }
        }
    }
}

/// The item's link with the name percent-encoded, so `#`, `?` and `%` in a
/// file name stay part of the path. The base URL prefix is used as given.
fn item_href(item: &ListingItem) -> String {
    match item.link.strip_suffix(item.name.as_str()) {
        Some(prefix) => format!("{prefix}{}", urlencoding::encode(&item.name)),
        None => item.link.clone(),
    }
}

fn summary(num_dirs: usize, num_files: usize) -> String {
    let dirs = if num_dirs == 1 { "directory" } else { "directories" };
    let files = if num_files == 1 { "file" } else { "files" };
    format!("{num_dirs} {dirs}, {num_files} {files}")
}

/// Human-readable size in binary units: `10 B`, `1.5 KiB`, `12 MiB`.
///
/// One decimal is shown below ten units, none above.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    if bytes < 10 {
        return format!("{bytes} B");
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = (scaled * 10.0 + 0.5).floor() / 10.0;
    if rounded < 10.0 {
        format!("{rounded:.1} {}", UNITS[unit])
    } else {
        format!("{rounded:.0} {}", UNITS[unit])
    }
}

fn format_modified(modified: &DateTime<Utc>) -> String {
    modified.format("%Y-%m-%d %H:%M").to_string()
}
