use thiserror::Error;

/// Route table misconfiguration or an unresolvable path.
///
/// Fatal to the navigation attempt that hit it, never to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteConfigError {
    #[error("No route matches '{path}'")]
    NotFound { path: String },

    #[error("Redirect cycle: {}", chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },

    #[error("Redirect chain from '{path}' exceeds {limit} hops")]
    TooManyRedirects { path: String, limit: usize },

    #[error("Route '{path}' has neither a loader nor a redirect")]
    MissingTarget { path: String },

    #[error("Route '{path}' has both a loader and a redirect")]
    Ambiguous { path: String },

    #[error("Route '{path}' is declared more than once")]
    DuplicatePath { path: String },

    #[error("Route name '{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("Invalid route pattern '{path}': {reason}")]
    InvalidPattern { path: String, reason: String },

    #[error("No route named '{name}'")]
    UnknownName { name: String },
}

impl RouteConfigError {
    /// True for paths that simply have no route, as opposed to a broken table.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RouteConfigError::NotFound { .. } | RouteConfigError::UnknownName { .. }
        )
    }
}

/// A view loader failed to produce its module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct LoadError {
    pub reason: String,
}

impl LoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteConfigError),

    #[error("Failed to load view for '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },
}
