//! Task types for fanout.
//!
//! A [`Task`] pairs a caller-chosen id and name with its [`Work`]. Running
//! the work through [`execute`] never unwinds: a panic comes back as a
//! [`TaskFailure`], which ends up in the task's [`TaskResult`].

mod error;
mod execute;
mod result;
mod types;

pub use error::TaskFailure;
pub use execute::execute;
pub use result::TaskResult;
pub use types::{Task, TaskId, TaskValue, Work};
