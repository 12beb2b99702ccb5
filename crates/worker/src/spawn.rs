use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::TaskClass;

/// Handle of the runtime the caller runs on. Widgets built from plain
/// threads share one small background runtime, created on first use.
fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static FALLBACK_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = FALLBACK_RUNTIME.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("typeahead-worker-global")
			.build()
			.expect("failed to build typeahead-worker global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns a typeahead task, tagged with its class in the spawn trace.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	runtime_handle().spawn(fut)
}
