//! Todo domain models and state transitions
//!
//! - `task`: the task record and its priority
//! - `store`: the ordered task collection and its operations
//! - `filter`: read-only views over the store
//! - `normalize`: cleanup applied to tasks read back from storage

pub mod filter;
mod normalize;
mod store;
mod task;

pub use filter::{Filter, Summary};
pub use normalize::{NormalizeReport, normalize_loaded_tasks};
pub use store::{Operation, TodoStore};
pub use task::{Priority, Task, TaskId, local_date_today, seed_tasks};
