//! Suggestion data sources.
//!
//! A data source answers a query in one of two ways:
//!
//! * synchronously, by returning `Some(suggestions)` and ignoring the reply
//!   handle;
//! * asynchronously, by returning `None` and later calling [`Reply::send`]
//!   exactly once, from any thread.
//!
//! [`Reply::send`] consumes the handle, so a source cannot answer twice.
//! Dropping the handle without sending abandons the search; the widget keeps
//! showing its waiting indicator until the next search answers.

use std::fmt;

use tokio::sync::oneshot;

/// One-shot answer handle for an asynchronous query.
pub struct Reply<S> {
	tx: oneshot::Sender<Vec<S>>,
}

impl<S> Reply<S> {
	pub(crate) fn channel() -> (Self, oneshot::Receiver<Vec<S>>) {
		let (tx, rx) = oneshot::channel();
		(Self { tx }, rx)
	}

	/// Delivers the suggestions. Returns `false` if the widget no longer
	/// waits for this search (it was superseded or the widget shut down).
	pub fn send(self, suggestions: Vec<S>) -> bool {
		self.tx.send(suggestions).is_ok()
	}

	/// Returns true once nobody waits for this reply anymore.
	pub fn is_abandoned(&self) -> bool {
		self.tx.is_closed()
	}
}

impl<S> fmt::Debug for Reply<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reply").field("abandoned", &self.is_abandoned()).finish()
	}
}

/// A pluggable suggestion provider.
pub trait DataSource<S>: Send + Sync {
	/// Starts a query for `text`.
	fn query(&self, text: &str, reply: Reply<S>) -> Option<Vec<S>>;
}

impl<S, F> DataSource<S> for F
where
	F: Fn(&str, Reply<S>) -> Option<Vec<S>> + Send + Sync,
{
	fn query(&self, text: &str, reply: Reply<S>) -> Option<Vec<S>> {
		self(text, reply)
	}
}

/// Adapts a plain synchronous lookup into a [`DataSource`].
pub fn from_fn<S, F>(lookup: F) -> impl DataSource<S>
where
	F: Fn(&str) -> Vec<S> + Send + Sync,
{
	move |text: &str, _reply: Reply<S>| Some(lookup(text))
}

/// A synchronous source filtering a fixed list by case-insensitive prefix
/// match on each entry's string form.
pub fn prefix_list<S>(items: Vec<S>, to_string: impl Fn(&S) -> String + Send + Sync) -> impl DataSource<S>
where
	S: Clone + Send + Sync,
{
	from_fn(move |text: &str| {
		let needle = text.to_lowercase();
		items.iter().filter(|item| to_string(item).to_lowercase().starts_with(&needle)).cloned().collect()
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn closures_are_sources() {
		let source = |text: &str, _reply: Reply<String>| Some(vec![text.to_uppercase()]);
		let (reply, _rx) = Reply::channel();
		assert_eq!(source.query("ab", reply), Some(vec!["AB".to_string()]));
	}

	#[test]
	fn reply_reports_abandonment() {
		let (reply, rx) = Reply::<u32>::channel();
		assert!(!reply.is_abandoned());
		drop(rx);
		assert!(reply.is_abandoned());
		assert!(!reply.send(vec![1]));
	}

	#[test]
	fn prefix_list_filters_case_insensitively() {
		let source = prefix_list(vec!["Apple", "apricot", "Banana"], |s: &&str| s.to_string());
		let (reply, _rx) = Reply::channel();
		assert_eq!(source.query("AP", reply), Some(vec!["Apple", "apricot"]));
	}

	#[tokio::test]
	async fn async_reply_arrives_once() {
		let (reply, rx) = Reply::channel();
		std::thread::spawn(move || reply.send(vec![7u8]));
		assert_eq!(rx.await.ok(), Some(vec![7]));
	}
}
