//! Navigation: path → view module binding.
//!
//! ```text
//! navigate(path) → RouteTable::resolve (redirects, cycle check)
//!                → ModuleLoader::load (generation check)
//!                → Navigator::commit (active view)
//! ```

mod error;
mod loader;
mod navigator;
mod pattern;
mod table;
mod view;

pub use error::{LoadError, NavigationError, RouteConfigError};
pub use loader::{
    loader_fn, GenerationCounter, LoadResult, LoaderRef, ModuleLoader, ViewLoader,
};
pub use navigator::{ActiveView, NavigationOutcome, NavigationRequest, Navigator};
pub use pattern::{normalize_path, RouteParams, RoutePattern};
pub use table::{Resolution, RouteEntry, RouteTable, RouteTarget};
pub use view::{lazy_view, ViewKind, ViewModule};
