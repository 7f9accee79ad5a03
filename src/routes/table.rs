//! Ordered route table and path resolution.

use std::collections::HashSet;
use std::fmt;

use super::error::RouteConfigError;
use super::loader::LoaderRef;
use super::pattern::{fill_params, normalize_path, RouteParams, RoutePattern};
use super::view::{lazy_view, ViewKind};

/// What a route leads to.
#[derive(Clone)]
pub enum RouteTarget {
    /// A lazily-loaded view.
    Loader(LoaderRef),
    /// Another path, resolved again.
    Redirect(String),
}

impl fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Loader(_) => f.write_str("Loader(..)"),
            RouteTarget::Redirect(to) => f.debug_tuple("Redirect").field(to).finish(),
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pattern: RoutePattern,
    name: Option<String>,
    target: RouteTarget,
}

impl RouteEntry {
    /// A route bound to a view loader.
    pub fn view(
        path: &str,
        name: Option<&str>,
        loader: LoaderRef,
    ) -> Result<Self, RouteConfigError> {
        Ok(Self {
            pattern: RoutePattern::parse(path)?,
            name: name.map(str::to_string),
            target: RouteTarget::Loader(loader),
        })
    }

    /// A pure redirect.
    pub fn redirect(path: &str, to: &str) -> Result<Self, RouteConfigError> {
        Ok(Self {
            pattern: RoutePattern::parse(path)?,
            name: None,
            target: RouteTarget::Redirect(to.to_string()),
        })
    }

    /// Build an entry from optional parts; exactly one of `loader` and
    /// `redirect_to` must be set.
    pub fn from_parts(
        path: &str,
        name: Option<&str>,
        loader: Option<LoaderRef>,
        redirect_to: Option<&str>,
    ) -> Result<Self, RouteConfigError> {
        let target = match (loader, redirect_to) {
            (Some(loader), None) => RouteTarget::Loader(loader),
            (None, Some(to)) => RouteTarget::Redirect(to.to_string()),
            (Some(_), Some(_)) => {
                return Err(RouteConfigError::Ambiguous {
                    path: path.to_string(),
                })
            }
            (None, None) => {
                return Err(RouteConfigError::MissingTarget {
                    path: path.to_string(),
                })
            }
        };
        Ok(Self {
            pattern: RoutePattern::parse(path)?,
            name: name.map(str::to_string),
            target,
        })
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::Loader(_) => None,
        }
    }
}

/// A path resolved all the way to a view loader.
#[derive(Clone)]
pub struct Resolution {
    /// Path as requested, normalised.
    pub requested: String,
    /// Path the loader is bound to, after redirects.
    pub path: String,
    pub name: Option<String>,
    pub params: RouteParams,
    /// Intermediate paths visited, in order, excluding the final one.
    pub redirects: Vec<String>,
    pub loader: LoaderRef,
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("requested", &self.requested)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("params", &self.params)
            .field("redirects", &self.redirects)
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered route table. First structural match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths and names.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteConfigError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for entry in &entries {
            if !paths.insert(entry.path().to_string()) {
                return Err(RouteConfigError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
            if let Some(name) = entry.name() {
                if !names.insert(name.to_string()) {
                    return Err(RouteConfigError::DuplicateName {
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// The application's routes: `/` redirects to the market overview and
    /// every view is mounted at its own path.
    pub fn default_routes() -> Result<Self, RouteConfigError> {
        let mut entries = vec![RouteEntry::redirect("/", ViewKind::MarketOverview.path())?];
        for kind in ViewKind::ALL {
            entries.push(RouteEntry::view(
                kind.path(),
                Some(kind.route_name()),
                lazy_view(kind),
            )?);
        }
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// First entry whose pattern matches the normalised `path`.
    pub fn match_path(&self, path: &str) -> Option<(&RouteEntry, RouteParams)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
    }

    /// Reverse lookup of a named route's path.
    pub fn path_for(&self, name: &str) -> Result<&str, RouteConfigError> {
        self.entries
            .iter()
            .find(|entry| entry.name() == Some(name))
            .map(RouteEntry::path)
            .ok_or_else(|| RouteConfigError::UnknownName {
                name: name.to_string(),
            })
    }

    /// Resolve `target` to a loader, following redirects.
    ///
    /// A path seen twice within one resolution is a cycle; chains longer than
    /// `max_redirects` are rejected as well.
    pub fn resolve(
        &self,
        target: &str,
        max_redirects: usize,
    ) -> Result<Resolution, RouteConfigError> {
        let requested = normalize_path(target);
        let mut path = requested.clone();
        let mut visited = vec![path.clone()];

        loop {
            let (entry, params) = self
                .match_path(&path)
                .ok_or_else(|| RouteConfigError::NotFound { path: path.clone() })?;

            match entry.target() {
                RouteTarget::Loader(loader) => {
                    visited.pop();
                    return Ok(Resolution {
                        requested,
                        path,
                        name: entry.name.clone(),
                        params,
                        redirects: visited,
                        loader: loader.clone(),
                    });
                }
                RouteTarget::Redirect(to) => {
                    let next = fill_params(to, &params);
                    tracing::debug!(from = %path, to = %next, "Following redirect");

                    if visited.contains(&next) {
                        visited.push(next);
                        return Err(RouteConfigError::RedirectCycle { chain: visited });
                    }
                    if visited.len() > max_redirects {
                        return Err(RouteConfigError::TooManyRedirects {
                            path: requested,
                            limit: max_redirects,
                        });
                    }
                    visited.push(next.clone());
                    path = next;
                }
            }
        }
    }
}
