//! Search dispatcher: turns settled queries into suggestion lists.
//!
//! One dispatcher task runs per widget. It takes one debounced query at a
//! time and finishes it (including waiting for an asynchronous reply) before
//! reading the next, so searches never overlap. A pending wait is abandoned
//! when the search generation moves on, when the source drops its reply
//! handle, or on teardown.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};
use typeahead_worker::CancellationToken;

use crate::source::Reply;
use crate::widget::Shared;

/// Why a single dispatch finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
	/// The source answered synchronously.
	Immediate,
	/// The asynchronous reply arrived.
	Replied,
	/// Results arrived for a generation that is no longer current.
	Stale,
	/// The generation moved on while waiting.
	Superseded,
	/// The source dropped its reply handle without answering.
	Dropped,
	/// The widget is shutting down.
	Cancelled,
}

pub(crate) async fn run<S>(shared: Arc<Shared<S>>, mut queries: mpsc::Receiver<String>, cancel: CancellationToken)
where
	S: Clone + PartialEq + Send + Sync + 'static,
{
	loop {
		let query = tokio::select! {
			biased;
			_ = cancel.cancelled() => break,
			query = queries.recv() => query,
		};
		let Some(text) = query else {
			break;
		};
		if dispatch(&shared, &text, &cancel).await == DispatchOutcome::Cancelled {
			break;
		}
	}
	debug!("typeahead.dispatch.stopped");
}

pub(crate) async fn dispatch<S>(shared: &Shared<S>, text: &str, cancel: &CancellationToken) -> DispatchOutcome
where
	S: Clone + PartialEq + Send + Sync + 'static,
{
	let (generation, source) = shared.search_context();
	let (reply, rx) = Reply::channel();

	// Registered before the source runs so a reset racing the query wakes us.
	let invalidated = shared.invalidated.notified();
	tokio::pin!(invalidated);
	invalidated.as_mut().enable();

	trace!(generation, query = text, "typeahead.dispatch");
	if let Some(suggestions) = source.query(text, reply) {
		return applied(shared.transition(|state, _| state.got_suggestions(generation, suggestions)), DispatchOutcome::Immediate);
	}
	drop(source);

	if !shared.transition(|state, _| state.begin_waiting(generation)) {
		return DispatchOutcome::Superseded;
	}

	tokio::select! {
		biased;
		_ = cancel.cancelled() => DispatchOutcome::Cancelled,
		_ = &mut invalidated => {
			debug!(generation, "typeahead.dispatch.superseded");
			DispatchOutcome::Superseded
		}
		answer = rx => match answer {
			Ok(suggestions) => applied(shared.transition(|state, _| state.got_suggestions(generation, suggestions)), DispatchOutcome::Replied),
			Err(_) => {
				warn!(generation, query = text, "data source dropped its reply without answering");
				DispatchOutcome::Dropped
			}
		},
	}
}

fn applied(accepted: bool, outcome: DispatchOutcome) -> DispatchOutcome {
	if accepted { outcome } else { DispatchOutcome::Stale }
}
