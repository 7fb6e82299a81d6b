//! Breadcrumb trail from the chrooted path.
//!
//! Links are relative (`../` hops), never absolute, so a generated page keeps
//! working wherever the published tree is mounted on the server.
//!
//! ```text
//! /sub/dir  →  "/" ../../   "sub" ../   "dir" (empty)
//! ```

/// One navigable segment of the trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub text: String,
    pub link: String,
}

/// Build the trail for a chrooted path such as `/sub/dir`.
///
/// Each segment is percent-decoded on its own. A directory literally named
/// `a%2Fb` must show up as one crumb `a/b`, not split into two.
pub fn build_breadcrumbs(chrooted: &str) -> Vec<Breadcrumb> {
    if chrooted.is_empty() {
        return Vec::new();
    }

    let path = chrooted.strip_suffix('/').unwrap_or(chrooted);
    let parts: Vec<&str> = path.split('/').collect();

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let text = if i == 0 && part.is_empty() {
                "/".to_string()
            } else {
                decode_segment(part)
            };
            Breadcrumb {
                text,
                link: "../".repeat(parts.len() - i - 1),
            }
        })
        .collect()
}

/// Percent-decode a segment, falling back to the raw text if the decoded
/// bytes are not UTF-8.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
