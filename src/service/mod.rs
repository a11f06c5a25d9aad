//! Read and write orchestration between the repositories and the cache.

mod invalidator;
mod list_view;

pub use invalidator::MutationInvalidator;
pub use list_view::ListViewService;
