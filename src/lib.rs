//! This crate provides a way to manage to-do tasks stored in a remote REST collection.
//!
//! It provides an HTTP client for such a collection in the [`client`] module, that can be used as a stand-alone module.
//!
//! The [`TaskStore`](store::TaskStore) keeps a local list of tasks in sync with a collection: it loads them, and applies every creation,
//! update or deletion remotely before mirroring the result locally. \
//! The local tasks can be displayed as a two-column (to do / done) [`Board`](board::Board).
//!
//! An in-memory collection is available in the [`mock`] module, e.g. for tests.

pub mod traits;

mod task;
pub use task::{NewTask, Task, TaskDraft, TaskId, TaskStatus, parse_date};
pub mod board;
pub use board::Board;
pub mod error;
pub use error::Error;
pub mod store;
pub use store::TaskStore;

pub mod client;
pub mod config;
pub mod mock;
pub mod mock_behaviour;

pub mod utils;
