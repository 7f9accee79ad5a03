//! Navigation resolver state: generation counter and the active view.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::NavigationConfig;

use super::error::NavigationError;
use super::loader::{GenerationCounter, LoadResult, ModuleLoader};
use super::pattern::RouteParams;
use super::table::{Resolution, RouteTable};
use super::view::ViewModule;

/// The view currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
    /// Path as requested by the caller, normalised.
    pub requested: String,
    /// Path of the route that produced the view.
    pub path: String,
    pub name: Option<String>,
    pub params: RouteParams,
    pub generation: u64,
    pub module: ViewModule,
}

/// A navigation that has been issued and holds its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_path: String,
    pub generation: u64,
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The view was loaded and is now active.
    Committed(ActiveView),
    /// A newer navigation started before this one finished; its result was dropped.
    Superseded { generation: u64, current: u64 },
}

impl NavigationOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, NavigationOutcome::Committed(_))
    }
}

/// Resolves paths against the route table and owns the active view.
///
/// Shareable across tasks behind an `Arc`; last navigation issued wins,
/// regardless of the order loads complete in.
pub struct Navigator {
    table: Arc<RouteTable>,
    max_redirects: usize,
    generations: GenerationCounter,
    loader: ModuleLoader,
    active: Mutex<Option<ActiveView>>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>, config: &NavigationConfig) -> Self {
        let generations = GenerationCounter::new();
        Self {
            table,
            max_redirects: config.max_redirects,
            loader: ModuleLoader::new(generations.clone()),
            generations,
            active: Mutex::new(None),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Generation of the most recently issued navigation.
    pub fn generation(&self) -> u64 {
        self.generations.current()
    }

    /// Snapshot of the active view, if any navigation has committed.
    pub fn active(&self) -> Option<ActiveView> {
        self.active.lock().clone()
    }

    /// Issue a navigation to `path`.
    ///
    /// The generation is taken here, synchronously, so issue order decides
    /// which navigation wins no matter when the returned future is polled.
    pub fn begin(&self, path: &str) -> NavigationRequest {
        let generation = self.generations.advance();
        tracing::debug!(generation, path, "Navigation requested");
        NavigationRequest {
            target_path: path.to_string(),
            generation,
        }
    }

    /// Resolve, load and commit an issued navigation.
    ///
    /// Route errors and load failures leave the current view untouched.
    pub async fn complete(
        &self,
        request: NavigationRequest,
    ) -> Result<NavigationOutcome, NavigationError> {
        let NavigationRequest {
            target_path,
            generation,
        } = request;

        let resolution = self
            .table
            .resolve(&target_path, self.max_redirects)
            .inspect_err(|err| {
                tracing::warn!(
                    generation,
                    path = %target_path,
                    error = %err,
                    "Route resolution failed"
                )
            })?;

        match self.loader.load(&resolution.loader, generation).await {
            LoadResult::Loaded(module) => Ok(self.commit(resolution, generation, module)),
            LoadResult::Stale {
                generation,
                current,
            } => Ok(NavigationOutcome::Superseded {
                generation,
                current,
            }),
            LoadResult::Failed(source) => Err(NavigationError::Load {
                path: resolution.path,
                source,
            }),
        }
    }

    /// Navigate to `path`: [`begin`](Self::begin) now, [`complete`](Self::complete)
    /// when awaited.
    pub fn navigate<'a>(
        &'a self,
        path: &str,
    ) -> impl Future<Output = Result<NavigationOutcome, NavigationError>> + Send + 'a {
        let request = self.begin(path);
        self.complete(request)
    }

    /// Navigate to a named route. Unknown names fail without taking a generation.
    pub fn navigate_named<'a>(
        &'a self,
        name: &str,
    ) -> impl Future<Output = Result<NavigationOutcome, NavigationError>> + Send + 'a {
        let request = self.table.path_for(name).map(|path| self.begin(path));
        async move { self.complete(request?).await }
    }

    /// Drop the active view and invalidate any pending load.
    pub fn teardown(&self) -> Option<ActiveView> {
        self.generations.advance();
        self.active.lock().take()
    }

    fn commit(
        &self,
        resolution: Resolution,
        generation: u64,
        module: ViewModule,
    ) -> NavigationOutcome {
        let mut active = self.active.lock();

        // Re-check under the lock: a newer navigation may have started since
        // the loader's own check.
        let current = self.generations.current();
        if current != generation {
            tracing::debug!(generation, current, "Discarding stale load result");
            return NavigationOutcome::Superseded {
                generation,
                current,
            };
        }

        let view = ActiveView {
            requested: resolution.requested,
            path: resolution.path,
            name: resolution.name,
            params: resolution.params,
            generation,
            module,
        };
        tracing::info!(
            generation,
            path = %view.path,
            view = %view.module.kind,
            "Navigation committed"
        );
        *active = Some(view.clone());
        NavigationOutcome::Committed(view)
    }
}
