//! Scheduler configuration.

use std::num::NonZeroUsize;

/// Configuration for the task scheduler.
#[derive(Debug, Clone, Default)]
pub struct SchedulerConfig {
  /// Upper bound on how many tasks may be inside their work at once.
  ///
  /// `None` runs every task immediately. With a limit, every task still gets
  /// its own execution unit; units past the limit wait for a permit before
  /// their clock starts.
  pub max_concurrency: Option<NonZeroUsize>,
}

impl SchedulerConfig {
  /// Configuration with a concurrency limit.
  pub fn bounded(max_concurrency: NonZeroUsize) -> Self {
    Self {
      max_concurrency: Some(max_concurrency),
    }
  }
}
