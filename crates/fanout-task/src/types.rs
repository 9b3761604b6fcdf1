use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Caller-assigned task identifier. Uniqueness is not enforced.
pub type TaskId = u64;

/// Value produced by a task's work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TaskValue {
  /// Work that completed without producing anything.
  Unit,
  Integer(i64),
  Text(String),
  /// Arbitrary JSON for results that are neither a number nor text.
  Structured(serde_json::Value),
}

impl fmt::Display for TaskValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TaskValue::Unit => f.write_str("()"),
      TaskValue::Integer(n) => write!(f, "{}", n),
      TaskValue::Text(s) => f.write_str(s),
      TaskValue::Structured(v) => write!(f, "{}", v),
    }
  }
}

impl From<()> for TaskValue {
  fn from(_: ()) -> Self {
    TaskValue::Unit
  }
}

impl From<i64> for TaskValue {
  fn from(n: i64) -> Self {
    TaskValue::Integer(n)
  }
}

impl From<i32> for TaskValue {
  fn from(n: i32) -> Self {
    TaskValue::Integer(n.into())
  }
}

impl From<u32> for TaskValue {
  fn from(n: u32) -> Self {
    TaskValue::Integer(n.into())
  }
}

impl From<String> for TaskValue {
  fn from(s: String) -> Self {
    TaskValue::Text(s)
  }
}

impl From<&str> for TaskValue {
  fn from(s: &str) -> Self {
    TaskValue::Text(s.to_string())
  }
}

impl From<serde_json::Value> for TaskValue {
  fn from(v: serde_json::Value) -> Self {
    TaskValue::Structured(v)
  }
}

/// The computation a task runs.
///
/// Work is one-shot: it is consumed by the execution unit that runs it.
pub enum Work {
  /// Produces a future polled on the async runtime.
  Async(Box<dyn FnOnce() -> BoxFuture<'static, TaskValue> + Send>),
  /// Runs on the blocking thread pool. Use for CPU-bound work or anything
  /// that sleeps the current thread.
  Blocking(Box<dyn FnOnce() -> TaskValue + Send>),
  /// No work at all. Completes immediately with [`TaskValue::Unit`].
  Noop,
}

impl Work {
  /// Wrap an async closure.
  pub fn from_async<F, Fut, V>(f: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = V> + Send + 'static,
    V: Into<TaskValue> + 'static,
  {
    Work::Async(Box::new(move || -> BoxFuture<'static, TaskValue> {
      Box::pin(async move { Into::<TaskValue>::into(f().await) })
    }))
  }

  /// Wrap a synchronous closure.
  pub fn from_blocking<F, V>(f: F) -> Self
  where
    F: FnOnce() -> V + Send + 'static,
    V: Into<TaskValue> + 'static,
  {
    Work::Blocking(Box::new(move || -> TaskValue { f().into() }))
  }

  fn kind(&self) -> &'static str {
    match self {
      Work::Async(_) => "async",
      Work::Blocking(_) => "blocking",
      Work::Noop => "noop",
    }
  }
}

impl fmt::Debug for Work {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Work::{}", self.kind())
  }
}

/// A named, identified unit of deferred work.
#[derive(Debug)]
pub struct Task {
  id: TaskId,
  name: String,
  work: Work,
}

impl Task {
  pub fn new(id: TaskId, name: impl Into<String>, work: Work) -> Self {
    Self {
      id,
      name: name.into(),
      work,
    }
  }

  pub fn id(&self) -> TaskId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Split the task so its work can be handed to an execution unit.
  pub fn into_parts(self) -> (TaskId, String, Work) {
    (self.id, self.name, self.work)
  }
}
