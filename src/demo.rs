//! Sample workloads for the command-line driver.

use std::time::Duration;

use anyhow::{Context, Result};
use fanout_scheduler::{SchedulerError, TaskScheduler, TaskValue};

/// Register the sample batch: sums, factorials and simulated requests, one of
/// which panics.
pub fn register_sample_tasks(scheduler: &mut TaskScheduler) -> Result<(), SchedulerError> {
  scheduler.add_async_task(1, "sum of 1..=100", || sum_to(100))?;
  scheduler.add_blocking_task(2, "factorial of 5", || factorial(5))?;
  scheduler.add_async_task(3, "simulated request 1", || {
    simulate_request("https://api.example1.com")
  })?;
  scheduler.add_async_task(4, "sum of 1..=50", || sum_to(50))?;
  scheduler.add_blocking_task(5, "factorial of 7", || factorial(7))?;
  scheduler.add_async_task(6, "simulated request 2", || {
    simulate_request("https://api.example2.com/data")
  })?;
  scheduler.add_blocking_task(7, "factorial of -1", || factorial(-1))?;
  Ok(())
}

async fn sum_to(n: i64) -> i64 {
  let mut sum = 0;
  for i in 1..=n {
    sum += i;
    tokio::time::sleep(Duration::from_millis(10)).await;
  }
  sum
}

fn factorial(n: i64) -> i64 {
  if n < 0 {
    panic!("negative input");
  }
  let mut result: i64 = 1;
  for i in 1..=n {
    result = result.saturating_mul(i);
    std::thread::sleep(Duration::from_millis(15));
  }
  result
}

async fn simulate_request(url: &'static str) -> TaskValue {
  let latency = 200 + url.len() as u64 * 10;
  tokio::time::sleep(Duration::from_millis(latency)).await;
  TaskValue::Text(format!("response from {}", url))
}

/// Print odd and even numbers up to 10 from two concurrent tasks.
pub async fn odd_even() -> Result<()> {
  let odd = tokio::spawn(print_numbers("odd", 1, Duration::from_millis(100)));
  let even = tokio::spawn(print_numbers("even", 2, Duration::from_millis(120)));

  let (odd, even) = tokio::join!(odd, even);
  odd.context("odd printer failed")?;
  even.context("even printer failed")?;

  println!("both printers finished");
  Ok(())
}

async fn print_numbers(label: &'static str, first: u32, delay: Duration) {
  for n in (first..=10).step_by(2) {
    println!("{}: {}", label, n);
    tokio::time::sleep(delay).await;
  }
}
