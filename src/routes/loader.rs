//! Module loading with stale-result suppression.
//!
//! Every navigation takes a generation from the shared [`GenerationCounter`].
//! A load only counts if its generation is still the newest one when it
//! finishes; anything older is discarded, whatever order the loads resolve in.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::error::LoadError;
use super::view::ViewModule;

/// Deferred producer of a view module.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Produce the module. Called once per navigation attempt.
    async fn load(&self) -> Result<ViewModule, LoadError>;
}

/// Shared reference to a loader, as stored in the route table.
pub type LoaderRef = Arc<dyn ViewLoader>;

struct FnLoader<F>(F);

#[async_trait]
impl<F, Fut> ViewLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ViewModule, LoadError>> + Send + 'static,
{
    async fn load(&self) -> Result<ViewModule, LoadError> {
        (self.0)().await
    }
}

/// Build a loader from an async closure.
pub fn loader_fn<F, Fut>(f: F) -> LoaderRef
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ViewModule, LoadError>> + Send + 'static,
{
    Arc::new(FnLoader(f))
}

/// Monotonic navigation generation.
///
/// Atomic so a multi-threaded runtime can share it; generation 0 means
/// "nothing issued yet".
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return it.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Outcome of one load attempt.
#[derive(Debug)]
pub enum LoadResult {
    /// Loaded and still current.
    Loaded(ViewModule),
    /// Finished (either way) after a newer navigation started.
    Stale { generation: u64, current: u64 },
    /// Loader failed while still current.
    Failed(LoadError),
}

/// Runs loaders on behalf of the navigator.
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    generations: GenerationCounter,
}

impl ModuleLoader {
    pub fn new(generations: GenerationCounter) -> Self {
        Self { generations }
    }

    /// Invoke `loader` exactly once for `generation`.
    ///
    /// No retries. The result is checked against the current generation
    /// after the loader resolves.
    pub async fn load(&self, loader: &LoaderRef, generation: u64) -> LoadResult {
        let result = loader.load().await;

        let current = self.generations.current();
        if current != generation {
            tracing::debug!(generation, current, "Discarding stale load result");
            return LoadResult::Stale {
                generation,
                current,
            };
        }

        match result {
            Ok(module) => LoadResult::Loaded(module),
            Err(err) => {
                tracing::warn!(generation, error = %err, "View load failed");
                LoadResult::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::view::ViewKind;

    #[test]
    fn test_generation_counter_is_monotonic() {
        let counter = GenerationCounter::new();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
        assert!(counter.is_current(2));
        assert!(!counter.is_current(1));
    }

    #[tokio::test]
    async fn test_load_current_generation() {
        let counter = GenerationCounter::new();
        let loader = ModuleLoader::new(counter.clone());
        let generation = counter.advance();

        let view = loader_fn(|| async { Ok(ViewModule::new(ViewKind::HelpSupport)) });
        match loader.load(&view, generation).await {
            LoadResult::Loaded(module) => assert_eq!(module.kind, ViewKind::HelpSupport),
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_discards_when_superseded() {
        let counter = GenerationCounter::new();
        let loader = ModuleLoader::new(counter.clone());
        let generation = counter.advance();

        let bump = counter.clone();
        let view = loader_fn(move || {
            // A newer navigation starts while this load is pending.
            bump.advance();
            async { Ok(ViewModule::new(ViewKind::HelpSupport)) }
        });

        match loader.load(&view, generation).await {
            LoadResult::Stale {
                generation,
                current,
            } => {
                assert_eq!(generation, 1);
                assert_eq!(current, 2);
            }
            other => panic!("expected Stale, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_is_reported_once() {
        let counter = GenerationCounter::new();
        let loader = ModuleLoader::new(counter.clone());
        let generation = counter.advance();

        let calls = Arc::new(AtomicU64::new(0));
        let seen = calls.clone();
        let view = loader_fn(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            async { Err(LoadError::new("chunk missing")) }
        });

        match loader.load(&view, generation).await {
            LoadResult::Failed(err) => assert_eq!(err.reason, "chunk missing"),
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
