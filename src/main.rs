// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use clap::{Parser, Subcommand};
use nft_marketplace::app::config::GlobalSettings;
use nft_marketplace::app::logging::setup_logging;
use nft_marketplace::data::abi::ArtifactStore;
use nft_marketplace::domain::error::AppError;
use nft_marketplace::services::console::run_console;
use nft_marketplace::services::deploy::{DeployPlan, Deployer};
use nft_marketplace::services::marketplace::{AddressSource, ConsoleNotifier, MarketplaceSession};
use nft_marketplace::services::wallet::{deployer_gateway, detect_wallet};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deploy MyNFT + Marketplace and mint from a connected wallet")]
struct Cli {
    /// Path to config file (default: config.* detection)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Chain JSON-RPC endpoint (overrides config/env)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Compiled contract artifacts directory (overrides config/env)
    #[arg(long, global = true)]
    artifacts_dir: Option<String>,

    /// Where deployed addresses are recorded (overrides config/env)
    #[arg(long, global = true)]
    deployments_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy MyNFT, then Marketplace, printing each address
    Deploy,
    /// Interactive front end: Connect Wallet / Mint NFT
    Console {
        /// Metadata URI passed to mintNFT
        #[arg(long)]
        token_uri: Option<String>,
    },
    /// Connect the wallet and mint once
    Mint {
        /// Metadata URI passed to mintNFT
        #[arg(long)]
        token_uri: Option<String>,
    },
}

fn apply_overrides(cli: &Cli, settings: &mut GlobalSettings) -> Result<(), AppError> {
    if let Some(url) = &cli.rpc_url {
        settings.rpc_url = url.clone();
    }
    if let Some(dir) = &cli.artifacts_dir {
        settings.artifacts_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.deployments_dir {
        settings.deployments_dir = Some(dir.clone());
    }
    if let Command::Console {
        token_uri: Some(uri),
    }
    | Command::Mint {
        token_uri: Some(uri),
    } = &cli.command
    {
        settings.token_uri = uri.clone();
    }
    settings.validate()
}

fn build_session(settings: &GlobalSettings) -> Result<MarketplaceSession, AppError> {
    let addresses = AddressSource {
        nft: settings.explicit_nft_address()?,
        marketplace: settings.explicit_marketplace_address()?,
        deployments_dir: Some(settings.deployments_path()),
    };
    Ok(MarketplaceSession::new(
        detect_wallet(settings)?,
        addresses,
        settings.token_uri.clone(),
        settings.receipt_policy(),
        ConsoleNotifier,
    ))
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut settings = GlobalSettings::load_with_path(cli.config.as_deref())?;
    apply_overrides(&cli, &mut settings)?;
    setup_logging(&settings.log_filter(), settings.log_json);

    match cli.command {
        Command::Deploy => {
            let deployer = Deployer::new(
                deployer_gateway(&settings)?,
                ArtifactStore::new(settings.artifacts_path()),
                settings.receipt_policy(),
            )
            .with_deployments_dir(settings.deployments_path());
            let mut out = std::io::stdout();
            deployer.run(&DeployPlan::standard(), &mut out).await?;
        }
        Command::Console { .. } => {
            let mut session = build_session(&settings)?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            run_console(&mut session, input, &mut out).await?;
        }
        Command::Mint { .. } => {
            let mut session = build_session(&settings)?;
            if session.connect_and_mint().await?.is_none() {
                return Err(AppError::Config(
                    "nothing minted: no wallet account connected".into(),
                ));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
