//! Concurrent executor: fan-out, wait barrier, fan-in.

use std::sync::Arc;

use fanout_task::{Task, TaskResult};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::config::SchedulerConfig;
use crate::result::ResultCollection;

/// Runs a batch of tasks, one execution unit per task.
pub struct ConcurrentExecutor {
  limiter: Option<Arc<Semaphore>>,
}

impl ConcurrentExecutor {
  pub fn new(config: &SchedulerConfig) -> Self {
    Self {
      limiter: config
        .max_concurrency
        .map(|n| Arc::new(Semaphore::new(n.get()))),
    }
  }

  /// Execute every task and collect its result.
  ///
  /// Returns once every unit has terminated and every delivered result has
  /// been appended to `collection`. Returns the number of units that ended
  /// without delivering a result.
  pub async fn execute(
    &self,
    execution_id: &str,
    tasks: Vec<Task>,
    collection: &ResultCollection,
  ) -> usize {
    // Sized to the batch so no unit waits on the consumer.
    let (sender, mut receiver) = mpsc::channel(tasks.len().max(1));

    let handles: Vec<JoinHandle<()>> = tasks
      .into_iter()
      .map(|task| {
        let sender = sender.clone();
        let limiter = self.limiter.clone();
        tokio::spawn(run_unit(execution_id.to_string(), task, limiter, sender))
      })
      .collect();

    // The coordinator owns the last sender; dropping it after the barrier is
    // the single close of the channel.
    let coordinator = {
      let execution_id = execution_id.to_string();
      tokio::spawn(async move {
        let joined = futures::future::join_all(handles).await;
        let abnormal = joined
          .into_iter()
          .filter_map(Result::err)
          .inspect(|e| {
            error!(
              execution_id = %execution_id,
              error = %e,
              "execution unit terminated outside its failure boundary"
            );
          })
          .count();
        drop(sender);
        abnormal
      })
    };

    while let Some(result) = receiver.recv().await {
      collection.push(result);
    }

    match coordinator.await {
      Ok(abnormal) => abnormal,
      Err(e) => {
        error!(execution_id = %execution_id, error = %e, "wait barrier failed");
        0
      }
    }
  }
}

/// One execution unit: wait for a permit, time the work, report the result.
async fn run_unit(
  execution_id: String,
  task: Task,
  limiter: Option<Arc<Semaphore>>,
  sender: mpsc::Sender<TaskResult>,
) {
  // Acquire only fails on a closed semaphore. Nothing closes this one.
  let _permit = match limiter {
    Some(limiter) => limiter.acquire_owned().await.ok(),
    None => None,
  };

  let (task_id, task_name, work) = task.into_parts();

  info!(
    execution_id = %execution_id,
    task_id = task_id,
    task_name = %task_name,
    "task_started"
  );

  let started = Instant::now();
  let outcome = fanout_task::execute(work).await;
  let duration = started.elapsed();

  match &outcome {
    Ok(value) => {
      info!(
        execution_id = %execution_id,
        task_id = task_id,
        task_name = %task_name,
        duration_ms = duration.as_millis() as u64,
        value = %value,
        "task_completed"
      );
    }
    Err(failure) => {
      warn!(
        execution_id = %execution_id,
        task_id = task_id,
        task_name = %task_name,
        duration_ms = duration.as_millis() as u64,
        error = %failure,
        "task_failed"
      );
    }
  }

  let result = TaskResult {
    task_id,
    task_name,
    outcome,
    duration,
  };

  if sender.send(result).await.is_err() {
    error!(
      execution_id = %execution_id,
      task_id = task_id,
      "result channel closed before the task result was delivered"
    );
  }
}
