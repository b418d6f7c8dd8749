//! Input adapters feeding the staging area: browse (typed paths) and
//! drag-and-drop (a terminal paste of dropped file paths).

use crate::attachment::Attachment;
use crate::error::StagingError;
use std::path::{Path, PathBuf};

/// Result of loading a batch of paths. Loaded attachments keep the order of
/// the input paths; failures are reported per path.
#[derive(Debug, Default)]
pub struct BrowseOutcome {
    pub attachments: Vec<Attachment>,
    pub errors: Vec<StagingError>,
}

pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> BrowseOutcome {
    let mut outcome = BrowseOutcome::default();
    for path in paths {
        match Attachment::from_path(path.as_ref()) {
            Ok(attachment) => outcome.attachments.push(attachment),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load attachment");
                outcome.errors.push(err);
            }
        }
    }
    outcome
}

/// Interpret pasted text as a file drop.
///
/// Returns the paths only when the paste is non-empty and every token names
/// an existing regular file; anything else is ordinary typed text.
pub fn resolve_drop(text: &str) -> Option<Vec<PathBuf>> {
    let paths = parse_dropped_paths(text);
    if paths.is_empty() || !paths.iter().all(|path| path.is_file()) {
        return None;
    }
    Some(paths)
}

/// Split a path list the way terminals paste dropped files: whitespace
/// separated, with single/double quotes or backslash-escaped spaces for
/// names containing spaces, optionally as `file://` URIs.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
        .into_iter()
        .filter(|token| !token.is_empty())
        .map(|token| file_uri_path(&token).unwrap_or_else(|| PathBuf::from(token)))
        .collect()
}

/// `file:` URIs resolve to local paths; anything else is taken literally.
fn file_uri_path(token: &str) -> Option<PathBuf> {
    if !token.starts_with("file:") {
        return None;
    }
    url::Url::parse(token).ok()?.to_file_path().ok()
}
