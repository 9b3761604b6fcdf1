//! The task scheduler.

use std::future::Future;

use fanout_task::{Task, TaskId, TaskValue, Work};
use tokio::time::Instant;
use tracing::{Span, error, info, instrument};

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::executor::ConcurrentExecutor;
use crate::registry::TaskRegistry;
use crate::result::{ExecutionReport, ResultCollection, TaskResult};
use crate::summary::{Report, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Registering,
  Running,
  Completed,
}

/// Registers tasks, runs them all concurrently once, and reports on them.
///
/// Each scheduler owns its registry and result collection; any number of
/// them can coexist.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TaskScheduler::new();
/// scheduler.add_async_task(1, "fetch", || async { "ok" })?;
/// scheduler.add_blocking_task(2, "sum", || (1..=100).sum::<i64>())?;
///
/// let report = scheduler.execute().await?;
/// println!("{}", scheduler.report()?);
/// ```
#[derive(Debug)]
pub struct TaskScheduler {
  config: SchedulerConfig,
  registry: TaskRegistry,
  results: ResultCollection,
  phase: Phase,
}

impl Default for TaskScheduler {
  fn default() -> Self {
    Self::new()
  }
}

impl TaskScheduler {
  /// Create a scheduler with unbounded concurrency.
  pub fn new() -> Self {
    Self::with_config(SchedulerConfig::default())
  }

  pub fn with_config(config: SchedulerConfig) -> Self {
    Self {
      config,
      registry: TaskRegistry::new(),
      results: ResultCollection::new(),
      phase: Phase::Registering,
    }
  }

  /// Register a task.
  ///
  /// # Errors
  /// Returns [`SchedulerError::RegistrationClosed`] once execution has started.
  pub fn add_task(
    &mut self,
    id: TaskId,
    name: impl Into<String>,
    work: Work,
  ) -> Result<(), SchedulerError> {
    if self.phase != Phase::Registering {
      return Err(SchedulerError::RegistrationClosed { task_id: id });
    }
    self.registry.add(Task::new(id, name, work));
    Ok(())
  }

  /// Register a task whose work is an async closure.
  pub fn add_async_task<F, Fut, V>(
    &mut self,
    id: TaskId,
    name: impl Into<String>,
    f: F,
  ) -> Result<(), SchedulerError>
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = V> + Send + 'static,
    V: Into<TaskValue> + 'static,
  {
    self.add_task(id, name, Work::from_async(f))
  }

  /// Register a task whose work is a synchronous closure.
  pub fn add_blocking_task<F, V>(
    &mut self,
    id: TaskId,
    name: impl Into<String>,
    f: F,
  ) -> Result<(), SchedulerError>
  where
    F: FnOnce() -> V + Send + 'static,
    V: Into<TaskValue> + 'static,
  {
    self.add_task(id, name, Work::from_blocking(f))
  }

  /// Tasks waiting to run, in registration order. Empty once execution
  /// has started.
  pub fn tasks(&self) -> &[Task] {
    self.registry.tasks()
  }

  /// Number of tasks waiting to run.
  pub fn len(&self) -> usize {
    self.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registry.is_empty()
  }

  pub fn config(&self) -> &SchedulerConfig {
    &self.config
  }

  /// Run every registered task concurrently and wait for all of them.
  ///
  /// Task panics do not fail the batch; they show up as failed results.
  /// There is no timeout: a task that never finishes keeps this future
  /// pending.
  ///
  /// # Errors
  /// - [`SchedulerError::AlreadyExecuted`] on a second call.
  /// - [`SchedulerError::LostResults`] if a unit ended without reporting.
  #[instrument(
    name = "scheduler_execute",
    skip(self),
    fields(tasks = self.registry.len(), execution_id = tracing::field::Empty)
  )]
  pub async fn execute(&mut self) -> Result<ExecutionReport, SchedulerError> {
    if self.phase != Phase::Registering {
      return Err(SchedulerError::AlreadyExecuted);
    }
    self.phase = Phase::Running;

    let tasks = self.registry.take();
    let expected = tasks.len();
    let execution_id = uuid::Uuid::new_v4().to_string();
    Span::current().record("execution_id", execution_id.as_str());

    info!(
      execution_id = %execution_id,
      tasks = expected,
      max_concurrency = ?self.config.max_concurrency,
      "batch_started"
    );

    let started = Instant::now();
    let executor = ConcurrentExecutor::new(&self.config);
    let abnormal = executor
      .execute(&execution_id, tasks, &self.results)
      .await;
    let wall_time = started.elapsed();

    let received = self.results.len();
    if received != expected {
      error!(
        execution_id = %execution_id,
        expected = expected,
        received = received,
        abnormal = abnormal,
        "batch_incomplete"
      );
      return Err(SchedulerError::LostResults {
        expected,
        received,
      });
    }

    self.phase = Phase::Completed;
    let summary = self.results.summarize();

    info!(
      execution_id = %execution_id,
      succeeded = summary.succeeded,
      failed = summary.failed,
      wall_time_ms = wall_time.as_millis() as u64,
      total_duration_ms = summary.total_duration.as_millis() as u64,
      "batch_completed"
    );

    Ok(ExecutionReport {
      execution_id,
      wall_time,
      summary,
    })
  }

  /// Aggregates over the finished batch. Repeated calls return the same
  /// values.
  ///
  /// # Errors
  /// Returns [`SchedulerError::NotExecuted`] until `execute` has completed.
  pub fn summarize(&self) -> Result<Summary, SchedulerError> {
    self.ensure_completed()?;
    Ok(self.results.summarize())
  }

  /// Every task result, in completion order.
  pub fn results(&self) -> Result<Vec<TaskResult>, SchedulerError> {
    self.ensure_completed()?;
    Ok(self.results.snapshot())
  }

  /// Per-task outcomes and summary, ready for display.
  pub fn report(&self) -> Result<Report, SchedulerError> {
    Ok(Report::new(self.results()?))
  }

  fn ensure_completed(&self) -> Result<(), SchedulerError> {
    match self.phase {
      Phase::Completed => Ok(()),
      Phase::Registering | Phase::Running => Err(SchedulerError::NotExecuted),
    }
  }
}
