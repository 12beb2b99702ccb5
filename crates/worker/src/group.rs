use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::TaskClass;

/// Set of tasks sharing one cancellation token, torn down together.
///
/// Dropping the group cancels the token without waiting; call
/// [`TaskGroup::shutdown`] to also join the tasks.
#[derive(Debug)]
pub struct TaskGroup {
	name: &'static str,
	cancel: CancellationToken,
	tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl TaskGroup {
	/// Creates an empty group with a fresh token.
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			cancel: CancellationToken::new(),
			tasks: Vec::new(),
		}
	}

	/// Returns a clone of the group token for tasks to observe.
	pub fn token(&self) -> CancellationToken {
		self.cancel.clone()
	}

	/// Spawns a task into the group.
	pub fn spawn<F>(&mut self, class: TaskClass, task: &'static str, fut: F)
	where
		F: std::future::Future<Output = ()> + Send + 'static,
	{
		self.tasks.push((task, crate::spawn(class, fut)));
	}

	/// Adopts an already spawned task.
	pub fn adopt(&mut self, task: &'static str, handle: JoinHandle<()>) {
		self.tasks.push((task, handle));
	}

	/// Returns the number of tasks owned by the group.
	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	/// Returns true if the group owns no tasks.
	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Cancels every task and joins them within `timeout`.
	///
	/// Tasks still running at the deadline are aborted. Returns `true` when
	/// every task finished on its own.
	pub async fn shutdown(mut self, timeout: Duration) -> bool {
		self.cancel.cancel();
		let deadline = tokio::time::Instant::now() + timeout;
		let mut clean = true;

		for (task, mut handle) in std::mem::take(&mut self.tasks) {
			let joined = tokio::select! {
				res = &mut handle => Some(res),
				_ = tokio::time::sleep_until(deadline) => None,
			};
			match joined {
				Some(Ok(())) => tracing::trace!(group = self.name, task, "worker.group.joined"),
				Some(Err(err)) => {
					clean = false;
					match join_error_panic_message(err) {
						Some(msg) => tracing::warn!(group = self.name, task, panic = %msg, "worker.group.task_panicked"),
						None => tracing::debug!(group = self.name, task, "worker.group.task_aborted"),
					}
				}
				None => {
					clean = false;
					tracing::warn!(group = self.name, task, "worker.group.join_timeout");
					handle.abort();
				}
			}
		}
		clean
	}
}

impl Drop for TaskGroup {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}

/// Extracts the panic payload message from a join error, or `None` if the
/// task was cancelled rather than panicking.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	let payload = err.try_into_panic().ok()?;
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		return Some((*msg).to_string());
	}
	if let Some(msg) = payload.downcast_ref::<String>() {
		return Some(msg.clone());
	}
	Some("<non-string panic payload>".to_string())
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, Ordering};

	use super::*;

	#[tokio::test]
	async fn extracts_static_str_payload() {
		let handle = tokio::spawn(async { panic!("boom-str") });
		let err = handle.await.unwrap_err();
		let msg = join_error_panic_message(err).expect("should be a panic");
		assert!(msg.contains("boom-str"), "expected 'boom-str', got: {msg}");
	}

	#[tokio::test]
	async fn returns_none_for_cancellation() {
		let handle = tokio::spawn(async {
			tokio::time::sleep(Duration::from_secs(60)).await;
		});
		handle.abort();
		let err = handle.await.unwrap_err();
		assert!(join_error_panic_message(err).is_none(), "cancelled task should return None");
	}

	#[tokio::test]
	async fn shutdown_cancels_and_joins_cooperative_tasks() {
		let mut group = TaskGroup::new("test");
		let token = group.token();
		let exited = Arc::new(AtomicBool::new(false));
		let flag = Arc::clone(&exited);
		group.spawn(TaskClass::Interactive, "waiter", async move {
			token.cancelled().await;
			flag.store(true, Ordering::SeqCst);
		});
		assert_eq!(group.len(), 1);

		assert!(group.shutdown(Duration::from_secs(1)).await);
		assert!(exited.load(Ordering::SeqCst));
	}

	#[tokio::test(start_paused = true)]
	async fn shutdown_aborts_stragglers_at_deadline() {
		let mut group = TaskGroup::new("test");
		group.spawn(TaskClass::Background, "stubborn", async {
			tokio::time::sleep(Duration::from_secs(3600)).await;
		});

		assert!(!group.shutdown(Duration::from_millis(10)).await);
	}

	#[tokio::test]
	async fn drop_cancels_token() {
		let group = TaskGroup::new("test");
		let token = group.token();
		drop(group);
		assert!(token.is_cancelled());
	}
}
