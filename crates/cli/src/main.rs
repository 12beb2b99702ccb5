//! Scripted terminal driver for the typeahead core.
//!
//! Reads event steps from stdin, applies them to one widget and prints the
//! resulting snapshot after each step. Model commits are printed as they are
//! reported. Logs go to stderr and honour `RUST_LOG`.

mod cli;
mod render;
mod script;

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use script::Step;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use typeahead_core::{DataSource, Model, Reply, Typeahead, TypeaheadOptions, source};

const BUILTIN_WORDS: &[&str] = &[
	"apple", "apricot", "avocado", "banana", "blackberry", "blueberry", "cherry", "clementine", "coconut", "cranberry", "date", "dragonfruit", "fig",
	"grape", "grapefruit", "guava", "kiwi", "lemon", "lime", "mango", "melon", "nectarine", "orange", "papaya", "peach", "pear", "pineapple", "plum",
	"pomegranate", "raspberry", "strawberry", "tangerine", "watermelon",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let words = load_words(cli.words.as_deref())?;
	let mut options = match &cli.options {
		Some(path) => {
			let text = std::fs::read_to_string(path).with_context(|| format!("reading options from {}", path.display()))?;
			TypeaheadOptions::from_toml_str(&text).with_context(|| format!("parsing options from {}", path.display()))?
		}
		None => TypeaheadOptions::default(),
	};
	if cli.free_text {
		options.rigid = false;
	}
	if cli.immediate {
		options.change_on_blur = false;
	}
	info!(words = words.len(), ?options, latency_ms = cli.latency_ms, "typeahead.cli.start");

	let builder = match cli.latency_ms {
		Some(ms) => Typeahead::builder(delayed_prefix_list(words, Duration::from_millis(ms))),
		None => Typeahead::builder(source::prefix_list(words, String::clone)),
	};
	let widget = builder
		.options(options)
		.render_suggestion(|input: &str, s: &String| render::highlight_prefix(input, s))
		.on_change(|value: Option<&Model<String>>| println!("{}", render::commit(value)))
		.build()?;

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut line_no = 0;
	while let Some(line) = lines.next_line().await? {
		line_no += 1;
		let Some(step) = script::parse_line(line_no, &line)? else {
			continue;
		};
		println!("> {}", line.trim());
		apply(&widget, step).await;
		print!("{}", render::snapshot(&widget.snapshot(), &widget.rendered_suggestions()));
	}

	if !widget.shutdown().await {
		warn!("typeahead.cli.unclean_shutdown");
	}
	Ok(())
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_words(path: Option<&Path>) -> anyhow::Result<Vec<String>> {
	let Some(path) = path else {
		return Ok(BUILTIN_WORDS.iter().map(|w| w.to_string()).collect());
	};
	let text = std::fs::read_to_string(path).with_context(|| format!("reading word list from {}", path.display()))?;
	Ok(text.lines().map(str::trim).filter(|w| !w.is_empty()).map(str::to_string).collect())
}

async fn apply(widget: &Typeahead<String>, step: Step) {
	match step {
		Step::Type(text) => widget.input_text_changed(&text),
		Step::Key(key) => {
			let result = widget.handle_key(key);
			println!("  key {key}: {result:?}");
		}
		Step::Hover(index) => widget.activate_suggestion_by_index(index),
		Step::Click(index) => widget.choose_suggestion_by_index(index),
		Step::Blur => widget.input_text_will_blur(),
		Step::Reset => widget.reset_typeahead(),
		Step::Wait(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
		Step::Show => {}
	}
}

/// Prefix search that answers through the reply handle after `latency`.
fn delayed_prefix_list(words: Vec<String>, latency: Duration) -> impl DataSource<String> {
	move |text: &str, reply: Reply<String>| -> Option<Vec<String>> {
		let needle = text.to_lowercase();
		let hits: Vec<String> = words.iter().filter(|w| w.to_lowercase().starts_with(&needle)).cloned().collect();
		tokio::spawn(async move {
			tokio::time::sleep(latency).await;
			if !reply.send(hits) {
				debug!("typeahead.cli.reply_abandoned");
			}
		});
		None
	}
}
