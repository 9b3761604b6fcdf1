use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::debug;

use crate::error::TaskFailure;
use crate::types::{TaskValue, Work};

/// Run a task's work inside a failure boundary.
///
/// A panic raised by the work, whether while building its future, while
/// polling it, or on the blocking pool, is converted into a [`TaskFailure`]
/// and returned as data. Nothing unwinds past this call.
pub async fn execute(work: Work) -> Result<TaskValue, TaskFailure> {
  match work {
    Work::Noop => Ok(TaskValue::Unit),
    Work::Async(f) => AssertUnwindSafe(async move { f().await })
      .catch_unwind()
      .await
      .map_err(|payload| {
        let failure = TaskFailure::from_panic(payload);
        debug!(message = %failure.message(), "caught panic in async work");
        failure
      }),
    Work::Blocking(f) => match tokio::task::spawn_blocking(f).await {
      Ok(value) => Ok(value),
      Err(e) if e.is_panic() => {
        let failure = TaskFailure::from_panic(e.into_panic());
        debug!(message = %failure.message(), "caught panic in blocking work");
        Err(failure)
      }
      Err(e) => Err(TaskFailure::new(format!(
        "blocking work did not complete: {}",
        e
      ))),
    },
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use futures::future::BoxFuture;

  use super::*;

  #[tokio::test]
  async fn test_noop_yields_unit() {
    assert_eq!(execute(Work::Noop).await, Ok(TaskValue::Unit));
  }

  #[tokio::test]
  async fn test_async_value() {
    let work = Work::from_async(|| async {
      tokio::time::sleep(Duration::from_millis(1)).await;
      55
    });
    assert_eq!(execute(work).await, Ok(TaskValue::Integer(55)));
  }

  #[tokio::test]
  async fn test_async_panic_is_contained() {
    let work = Work::from_async(|| async {
      tokio::time::sleep(Duration::from_millis(1)).await;
      if true {
        panic!("negative input");
      }
      0
    });

    let failure = execute(work).await.unwrap_err();
    assert_eq!(failure.message(), "negative input");
  }

  #[tokio::test]
  async fn test_panic_before_first_poll_is_contained() {
    let work = Work::Async(Box::new(|| -> BoxFuture<'static, TaskValue> {
      panic!("no future for you")
    }));

    let failure = execute(work).await.unwrap_err();
    assert_eq!(failure.message(), "no future for you");
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_blocking_value() {
    let work = Work::from_blocking(|| (1..=10).sum::<i64>());
    assert_eq!(execute(work).await, Ok(TaskValue::Integer(55)));
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_blocking_panic_is_contained() {
    let work = Work::from_blocking(|| -> i64 { panic!("overflow at {}", 21) });

    let failure = execute(work).await.unwrap_err();
    assert_eq!(failure.message(), "overflow at 21");
  }
}
