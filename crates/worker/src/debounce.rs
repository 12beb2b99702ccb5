//! Quiet-window debounce stage.
//!
//! Every value pushed through a [`DebounceSender`] arms a timer. A newer value
//! arriving before the timer elapses replaces the pending one and re-arms the
//! timer, so only the last value of a burst is forwarded, one delay after it
//! was received.
//!
//! The input side is unbounded so producers never block. The output side is a
//! bounded queue with backpressure: settled values are delivered in order and
//! never dropped, even when the consumer is slow.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::TaskClass;


/// Producer half of a debounce stage.
#[derive(Debug)]
pub struct DebounceSender<T> {
	tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for DebounceSender<T> {
	fn clone(&self) -> Self {
		Self { tx: self.tx.clone() }
	}
}

impl<T> DebounceSender<T> {
	/// Pushes a value into the stage. Returns `false` once the stage has stopped.
	pub fn send(&self, value: T) -> bool {
		self.tx.send(value).is_ok()
	}
}

/// Spawns a debounce stage and returns its producer half, the settled-value
/// receiver and the stage task handle.
///
/// `delay` is read each time the timer is armed, so an externally updated
/// delay applies from the next value on. The stage exits when `cancel` fires,
/// when every [`DebounceSender`] is dropped (after flushing a pending value),
/// or when the receiver is dropped.
pub fn debounce<T, D>(class: TaskClass, delay: D, capacity: usize, cancel: CancellationToken) -> (DebounceSender<T>, mpsc::Receiver<T>, JoinHandle<()>)
where
	T: Send + 'static,
	D: Fn() -> Duration + Send + 'static,
{
	let (in_tx, in_rx) = mpsc::unbounded_channel();
	let (out_tx, out_rx) = mpsc::channel(capacity.max(1));
	let task = crate::spawn(class, run(in_rx, out_tx, delay, cancel));
	(DebounceSender { tx: in_tx }, out_rx, task)
}

async fn run<T, D>(mut input: mpsc::UnboundedReceiver<T>, output: mpsc::Sender<T>, delay: D, cancel: CancellationToken)
where
	D: Fn() -> Duration,
{
	let mut pending: Option<T> = None;
	loop {
		let value = match pending.take() {
			Some(value) => value,
			None => {
				let next = tokio::select! {
					biased;
					_ = cancel.cancelled() => return,
					next = input.recv() => next,
				};
				match next {
					Some(value) => value,
					None => return,
				}
			}
		};

		let timer = tokio::time::sleep(delay());
		tokio::pin!(timer);

		tokio::select! {
			biased;
			_ = cancel.cancelled() => return,
			next = input.recv() => match next {
				Some(newer) => {
					trace!("debounce.superseded");
					pending = Some(newer);
				}
				None => {
					// Producers are gone; the last value still honours its delay.
					tokio::select! {
						biased;
						_ = cancel.cancelled() => return,
						_ = &mut timer => {}
					}
					let _ = forward(&output, value, &cancel).await;
					return;
				}
			},
			_ = &mut timer => {
				if !forward(&output, value, &cancel).await {
					return;
				}
			}
		}
	}
}

async fn forward<T>(output: &mpsc::Sender<T>, value: T, cancel: &CancellationToken) -> bool {
	trace!("debounce.settled");
	tokio::select! {
		biased;
		_ = cancel.cancelled() => false,
		sent = output.send(value) => sent.is_ok(),
	}
}
