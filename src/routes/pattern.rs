//! Path normalisation and segment patterns.
//!
//! Patterns are static segments with optional `:name` captures, e.g.
//! `/alert-settings` or `/symbols/:symbol`. Matching is exact on segment
//! count; there are no wildcards.

use std::collections::BTreeMap;

use super::error::RouteConfigError;

/// Captured `:name` segments.
pub type RouteParams = BTreeMap<String, String>;

/// Canonical form of a requested path.
///
/// Strips surrounding whitespace, query string and fragment, forces a leading
/// `/` and drops trailing slashes. The empty path becomes `/`.
pub fn normalize_path(raw: &str) -> String {
    let path = raw.trim();
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteConfigError> {
        if !pattern.starts_with('/') {
            return Err(RouteConfigError::InvalidPattern {
                path: pattern.to_string(),
                reason: "must start with '/'".to_string(),
            });
        }
        let source = normalize_path(pattern);
        let mut segments = Vec::new();
        for part in split_segments(&source) {
            match part.strip_prefix(':') {
                Some("") => {
                    return Err(RouteConfigError::InvalidPattern {
                        path: pattern.to_string(),
                        reason: "empty parameter name".to_string(),
                    })
                }
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None => segments.push(Segment::Static(part.to_string())),
            }
        }
        Ok(Self { source, segments })
    }

    /// Normalised pattern text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a normalised path, returning captured parameters.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

/// Substitute `:name` segments of a redirect target with captured values.
///
/// Unknown parameters are left in place.
pub fn fill_params(target: &str, params: &RouteParams) -> String {
    if params.is_empty() {
        return normalize_path(target);
    }
    let filled: Vec<&str> = split_segments(target)
        .map(|part| {
            part.strip_prefix(':')
                .and_then(|name| params.get(name))
                .map(String::as_str)
                .unwrap_or(part)
        })
        .collect();
    normalize_path(&filled.join("/"))
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
