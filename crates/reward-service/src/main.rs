//! Command-line entry point for the reward submitter.
//!
//! Loads the configuration, builds a submitter for the configured owner
//! account and runs a single command against the reward contract.

use clap::{Parser, Subcommand};
use reward_config::Config;
use reward_core::{account_factories, RewardSubmitter, RewardSubmitterBuilder};
use reward_types::{from_fixed_point, parse_address, Address, RewardRequest, TransactionHash};
use std::path::PathBuf;

/// Command-line arguments for the reward submitter.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "REWARD_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Reward a user for a completed order
	Submit {
		#[arg(long)]
		user_id: String,
		#[arg(long)]
		order_id: String,
		/// Reward in whole tokens, e.g. 0.2
		#[arg(long, allow_negative_numbers = true)]
		amount: f64,
		/// Overrides `contract.default_recipient`
		#[arg(long, value_parser = parse_address)]
		recipient: Option<Address>,
	},
	/// Print the total reward recorded for a user
	TotalReward {
		#[arg(long)]
		user_id: String,
	},
	/// Look up the receipt of a submitted transaction
	Receipt {
		#[arg(long, value_parser = TransactionHash::parse)]
		hash: TransactionHash,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	let config = Config::from_file(&args.config).await?;
	tracing::info!(config = %args.config.display(), "Loaded configuration");

	let submitter = build_submitter(config).await?;
	println!("{}", run(&submitter, args.command).await?);

	Ok(())
}

/// Builds the submitter with every compiled-in account implementation.
async fn build_submitter(config: Config) -> Result<RewardSubmitter, Box<dyn std::error::Error>> {
	Ok(RewardSubmitterBuilder::new(config)
		.build(&account_factories())
		.await?)
}

/// Executes one command and renders its result for stdout.
async fn run(
	submitter: &RewardSubmitter,
	command: Command,
) -> Result<String, Box<dyn std::error::Error>> {
	match command {
		Command::Submit {
			user_id,
			order_id,
			amount,
			recipient,
		} => {
			let mut request = RewardRequest::new(user_id, order_id, amount);
			if let Some(recipient) = recipient {
				request = request.with_recipient(recipient);
			}
			let tx_hash = submitter.submit(request).await?;
			Ok(format!("tx sent: {}", tx_hash))
		},
		Command::TotalReward { user_id } => {
			let total = submitter.total_reward_of_user(&user_id).await?;
			let settings = submitter.settings();
			Ok(format!(
				"{} {}",
				from_fixed_point(total, settings.decimals),
				settings.token_symbol
			))
		},
		Command::Receipt { hash } => match submitter.receipt(&hash).await? {
			Some(receipt) => Ok(format!(
				"{} block={} status={}",
				receipt.hash,
				receipt.block_number,
				if receipt.success { "success" } else { "reverted" }
			)),
			None => Ok(format!("{} pending", hash)),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	const CONFIG: &str = r#"
[network]
rpc_url = "http://127.0.0.1:1"
chain_id = 31337
request_timeout_seconds = 2

[contract]
address = "0x097da74bd636FBC91c017e03BF134a884A8C3dD1"
default_recipient = "0xec6D6D84369553655fE7235c07Af8742504f8397"

[account]
primary = "local"

[account.implementations.local]
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
"#;

	#[test]
	fn test_parse_submit() {
		let args = Args::try_parse_from([
			"reward",
			"-c",
			"reward.toml",
			"submit",
			"--user-id",
			"testUser",
			"--order-id",
			"orderTest",
			"--amount",
			"0.2",
		])
		.unwrap();

		assert_eq!(args.config, PathBuf::from("reward.toml"));
		assert_eq!(args.log_level, "info");
		match args.command {
			Command::Submit {
				user_id,
				order_id,
				amount,
				recipient,
			} => {
				assert_eq!(user_id, "testUser");
				assert_eq!(order_id, "orderTest");
				assert_eq!(amount, 0.2);
				assert!(recipient.is_none());
			},
			other => panic!("unexpected command: {:?}", other),
		}
	}

	#[test]
	fn test_parse_rejects_bad_recipient_and_hash() {
		assert!(Args::try_parse_from([
			"reward",
			"submit",
			"--user-id",
			"u",
			"--order-id",
			"o",
			"--amount",
			"1",
			"--recipient",
			"0x1234",
		])
		.is_err());

		assert!(Args::try_parse_from(["reward", "receipt", "--hash", "0xabc"]).is_err());
	}

	#[test]
	fn test_parse_total_reward() {
		let args =
			Args::try_parse_from(["reward", "-l", "debug", "total-reward", "--user-id", "testUser"])
				.unwrap();
		assert_eq!(args.log_level, "debug");
		assert!(matches!(args.command, Command::TotalReward { user_id } if user_id == "testUser"));
	}

	#[tokio::test]
	async fn test_build_from_file() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, CONFIG).unwrap();

		let config = Config::from_file(&path).await.unwrap();
		let submitter = build_submitter(config).await.unwrap();
		assert_eq!(submitter.settings().decimals, 18);
		assert_eq!(submitter.settings().gas_limit, 3_100_000);
	}

	#[tokio::test]
	async fn test_invalid_amount_rejected_before_connecting() {
		let config: Config = CONFIG.parse().unwrap();
		let submitter = build_submitter(config).await.unwrap();

		let command = Command::Submit {
			user_id: "testUser".to_string(),
			order_id: "orderTest".to_string(),
			amount: -1.0,
			recipient: None,
		};
		let err = run(&submitter, command).await.unwrap_err();
		assert!(err.to_string().starts_with("Invalid request"));
	}
}
