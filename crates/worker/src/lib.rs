//! Worker primitives backing the typeahead pipeline.
//!
//! * [`spawn`]: runtime-aware task spawning tagged with a [`TaskClass`]
//! * [`debounce`]: last-value-wins quiet-window stage between two channels
//! * [`TaskGroup`]: shared cancellation and bounded join for per-widget tasks

mod class;
pub mod debounce;
mod group;
mod spawn;

pub use class::TaskClass;
pub use debounce::{DebounceSender, debounce};
pub use group::{TaskGroup, join_error_panic_message};
pub use spawn::spawn;
pub use tokio_util::sync::CancellationToken;
