use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{debug, warn};

use rs_markov_core::GenerationConfig;
use rs_markov_core::corpus::build_model;
use rs_markov_core::corpus::store::MessageStore;
use rs_markov_core::corpus::sync::{pull_messages, resolve_channel_id};
use rs_markov_core::model::generation_config::DEFAULT_MAX_STEPS;

use crate::slack::{DEFAULT_API_URL, SlackClient};

/// Markov chain sentences styled after chat channels.
#[derive(Debug, Parser)]
#[command(name = "rs-markov", version, about)]
pub struct Cli {
	/// Directory holding the raw message store
	#[arg(long, global = true, env = "RS_MARKOV_DATA_DIR", default_value = "./db")]
	data_dir: PathBuf,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Prints the id of each named channel
	GetChannel {
		#[command(flatten)]
		api: ApiArgs,
		/// Channel name(s) for which to fetch an id
		#[arg(required = true)]
		channel_names: Vec<String>,
	},
	/// Pulls new messages of the given channels into the store
	Update {
		#[command(flatten)]
		api: ApiArgs,
		/// Channel id(s) to update
		#[arg(required = true)]
		channel_ids: Vec<String>,
	},
	/// Prints generated messages based on the content of channels
	Print(PrintArgs),
}

#[derive(Debug, Args)]
struct ApiArgs {
	/// API token of the bot used to pull messages
	#[arg(long, env = "SLACK_API_KEY", hide_env_values = true)]
	api_key: String,
	/// Base URL of the chat Web API
	#[arg(long, env = "SLACK_API_URL", default_value = DEFAULT_API_URL)]
	api_url: String,
}

impl ApiArgs {
	fn client(&self) -> Result<SlackClient> {
		SlackClient::new(&self.api_url, &self.api_key).context("failed to build chat client")
	}
}

#[derive(Debug, Args)]
struct PrintArgs {
	/// Markov model order to use
	#[arg(long, default_value_t = 2)]
	order: usize,
	/// Number of messages to print
	#[arg(long, default_value_t = 10)]
	num_messages: usize,
	/// Maximum words per message before giving up (0 disables the cap)
	#[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
	max_steps: usize,
	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,
	/// Channel(s) on which to base a message
	#[arg(required = true)]
	channel_ids: Vec<String>,
}

impl PrintArgs {
	fn config(&self) -> Result<GenerationConfig> {
		let max_steps = (self.max_steps > 0).then_some(self.max_steps);
		Ok(GenerationConfig::new(self.order, self.num_messages)?
			.with_max_steps(max_steps)
			.with_seed(self.seed))
	}
}

pub fn run() -> Result<()> {
	let cli = Cli::parse();
	debug!("data dir: {}", cli.data_dir.display());

	match cli.command {
		Command::GetChannel { api, channel_names } => {
			let client = api.client()?;
			for name in channel_names {
				match resolve_channel_id(&client, &name)? {
					Some(id) => println!("{id}"),
					None => bail!("Unrecognized channel name: '{}'", name),
				}
			}
		}
		Command::Update { api, channel_ids } => {
			let client = api.client()?;
			let mut store = open_store(&cli.data_dir)?;
			pull_messages(&channel_ids, &client, &mut store)?;
		}
		Command::Print(args) => {
			let config = args.config()?;
			let store = open_store(&cli.data_dir)?;
			let model = build_model(&store, &args.channel_ids, config.order())?;
			if model.table().is_empty() {
				warn!("no stored messages for {}", args.channel_ids.join(", "));
			}
			let lines = model.lines(&config).context("generation failed")?;
			for line in lines {
				println!("{line}");
			}
		}
	}

	Ok(())
}

fn open_store(dir: &Path) -> Result<MessageStore> {
	MessageStore::open(dir).with_context(|| format!("failed to open store in {}", dir.display()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use rs_markov_core::MarkovError;

	fn parse(args: &[&str]) -> Cli {
		Cli::try_parse_from(args).unwrap()
	}

	#[test]
	fn command_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn print_defaults() {
		let cli = parse(&["rs-markov", "print", "C1", "C2"]);
		assert_eq!(cli.data_dir, PathBuf::from("./db"));
		let Command::Print(args) = cli.command else { panic!("expected print") };
		assert_eq!(args.order, 2);
		assert_eq!(args.num_messages, 10);
		assert_eq!(args.channel_ids, vec!["C1", "C2"]);

		let config = args.config().unwrap();
		assert_eq!(config.max_steps(), Some(DEFAULT_MAX_STEPS));
		assert_eq!(config.seed(), None);
	}

	#[test]
	fn zero_max_steps_disables_the_cap() {
		let cli = parse(&["rs-markov", "print", "--max-steps", "0", "--seed", "4", "C1"]);
		let Command::Print(args) = cli.command else { panic!("expected print") };
		let config = args.config().unwrap();
		assert_eq!(config.max_steps(), None);
		assert_eq!(config.seed(), Some(4));
	}

	#[test]
	fn non_positive_values_are_configuration_errors() {
		let cli = parse(&["rs-markov", "print", "--order", "0", "C1"]);
		let Command::Print(args) = cli.command else { panic!("expected print") };
		let err = args.config().unwrap_err();
		assert_eq!(err.downcast_ref::<MarkovError>(), Some(&MarkovError::InvalidOrder(0)));

		let cli = parse(&["rs-markov", "print", "--num-messages", "0", "C1"]);
		let Command::Print(args) = cli.command else { panic!("expected print") };
		let err = args.config().unwrap_err();
		assert_eq!(err.downcast_ref::<MarkovError>(), Some(&MarkovError::InvalidLineCount(0)));
	}

	#[test]
	fn channels_are_required() {
		assert!(Cli::try_parse_from(["rs-markov", "print"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "update", "--api-key", "k"]).is_err());
	}

	#[test]
	fn data_dir_is_global() {
		let cli = parse(&["rs-markov", "get-channel", "--api-key", "k", "--data-dir", "/tmp/x", "general"]);
		assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
		let Command::GetChannel { api, channel_names } = cli.command else { panic!("expected get-channel") };
		assert_eq!(api.api_key, "k");
		assert_eq!(channel_names, vec!["general"]);
	}
}
