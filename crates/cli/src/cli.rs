use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "typeahead")]
#[command(about = "Drive a typeahead widget from a script read on stdin")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Word list, one suggestion per line (a built-in fruit list if omitted)
	#[arg(long, short = 'w', value_name = "PATH")]
	pub words: Option<PathBuf>,

	/// TOML file with widget options
	#[arg(long, short = 'o', value_name = "PATH")]
	pub options: Option<PathBuf>,

	/// Answer searches asynchronously after this many milliseconds
	#[arg(long, value_name = "MS")]
	pub latency_ms: Option<u64>,

	/// Allow committing typed text (overrides the options file)
	#[arg(long)]
	pub free_text: bool,

	/// Commit on every change instead of on blur (overrides the options file)
	#[arg(long)]
	pub immediate: bool,

	/// Verbose logging to stderr
	#[arg(short, long)]
	pub verbose: bool,
}
