//! Concurrent task scheduler for fanout.
//!
//! This crate provides the [`TaskScheduler`] which handles:
//! - Task registration
//! - Concurrent execution, one tokio task per registered task
//! - Panic containment per task
//! - Timing aggregation and reporting
//!
//! # Architecture
//!
//! ```text
//! TaskScheduler
//! ├── add_task(id, name, work)   registering phase only
//! ├── execute()                  fan-out, wait barrier, fan-in
//! │     └── ConcurrentExecutor
//! │           ├── one unit per task: permit → time → fanout_task::execute → send
//! │           ├── coordinator: join all units, then close the channel
//! │           └── caller: drain channel into the ResultCollection
//! └── summarize() / results() / report()   completed phase only
//! ```

mod config;
mod error;
mod executor;
mod registry;
mod result;
mod scheduler;
mod summary;

pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use executor::ConcurrentExecutor;
pub use registry::TaskRegistry;
pub use result::{ExecutionReport, ResultCollection, TaskResult};
pub use scheduler::TaskScheduler;
pub use summary::{Report, Summary};

pub use fanout_task::{Task, TaskFailure, TaskId, TaskValue, Work};
