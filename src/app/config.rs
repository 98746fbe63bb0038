// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::data_path::resolve_data_path;
use crate::common::parsing::{non_placeholder, parse_address_hex};
use crate::domain::constants;
use crate::domain::error::AppError;
use crate::infrastructure::network::receipt::ReceiptPolicy;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalSettings {
    // General
    #[serde(default = "default_false")]
    pub debug: bool,
    #[serde(default = "default_false")]
    pub log_json: bool,
    /// Bare level (`debug`) or a full `EnvFilter` directive string.
    pub log_level: Option<String>,
    pub data_dir: Option<String>,

    // Chain
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Deployer key; the node's first dev account is used when absent.
    pub deployer_key: Option<String>,

    // Wallet provider
    /// JSON-RPC endpoint answering `eth_requestAccounts` and signing `eth_sendTransaction`.
    pub wallet_rpc_url: Option<String>,
    /// Local private-key wallet, used when no wallet endpoint is configured.
    pub wallet_key: Option<String>,

    // Contracts
    pub artifacts_dir: Option<String>,
    pub deployments_dir: Option<String>,
    pub nft_address: Option<String>,
    pub marketplace_address: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    // Confirmation
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
    /// Unset means wait for the receipt indefinitely.
    pub receipt_timeout_ms: Option<u64>,
    #[serde(default = "default_receipt_confirm_blocks")]
    pub receipt_confirm_blocks: u64,
}

// Defaults
fn default_false() -> bool {
    false
}
fn default_rpc_url() -> String {
    constants::DEFAULT_RPC_URL.to_string()
}
fn default_token_uri() -> String {
    constants::DEFAULT_TOKEN_URI.to_string()
}
fn default_receipt_poll_ms() -> u64 {
    constants::DEFAULT_RECEIPT_POLL_MS
}
fn default_receipt_confirm_blocks() -> u64 {
    constants::DEFAULT_RECEIPT_CONFIRM_BLOCKS
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            debug: default_false(),
            log_json: default_false(),
            log_level: None,
            data_dir: None,
            rpc_url: default_rpc_url(),
            deployer_key: None,
            wallet_rpc_url: None,
            wallet_key: None,
            artifacts_dir: None,
            deployments_dir: None,
            nft_address: None,
            marketplace_address: None,
            token_uri: default_token_uri(),
            receipt_poll_ms: default_receipt_poll_ms(),
            receipt_timeout_ms: None,
            receipt_confirm_blocks: default_receipt_confirm_blocks(),
        }
    }
}

impl GlobalSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let selected_config = resolve_config_path(path);
        let mut builder = Config::builder();

        if let Some(ref selected_path) = selected_config {
            builder = builder.add_source(File::from(Path::new(selected_path)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Deterministic precedence: CLI (in main) > env/.env > selected profile file.
        builder = builder.add_source(Environment::default().try_parsing(true));

        let settings: GlobalSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        tracing::debug!(
            target: "config",
            file = selected_config.as_deref().unwrap_or("config.*"),
            rpc = %settings.rpc_url,
            "Settings loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        parse_url("rpc_url", &self.rpc_url)?;
        if let Some(url) = non_placeholder(self.wallet_rpc_url.as_deref()) {
            parse_url("wallet_rpc_url", url)?;
        }
        self.deployer_signer()?;
        self.wallet_signer()?;
        self.explicit_nft_address()?;
        self.explicit_marketplace_address()?;
        if self.token_uri.trim().is_empty() {
            return Err(AppError::Validation {
                field: "token_uri".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn log_filter(&self) -> String {
        match non_placeholder(self.log_level.as_deref()) {
            Some(level) => level.to_string(),
            None if self.debug => "debug".to_string(),
            None => "info".to_string(),
        }
    }

    pub fn rpc_url(&self) -> Result<Url, AppError> {
        parse_url("rpc_url", &self.rpc_url)
    }

    pub fn wallet_rpc_url(&self) -> Result<Option<Url>, AppError> {
        non_placeholder(self.wallet_rpc_url.as_deref())
            .map(|raw| parse_url("wallet_rpc_url", raw))
            .transpose()
    }

    pub fn deployer_signer(&self) -> Result<Option<PrivateKeySigner>, AppError> {
        parse_signer("deployer_key", self.deployer_key.as_deref())
    }

    pub fn wallet_signer(&self) -> Result<Option<PrivateKeySigner>, AppError> {
        parse_signer("wallet_key", self.wallet_key.as_deref())
    }

    pub fn explicit_nft_address(&self) -> Result<Option<Address>, AppError> {
        parse_optional_address("nft_address", self.nft_address.as_deref())
    }

    pub fn explicit_marketplace_address(&self) -> Result<Option<Address>, AppError> {
        parse_optional_address("marketplace_address", self.marketplace_address.as_deref())
    }

    pub fn artifacts_path(&self) -> PathBuf {
        let raw = non_placeholder(self.artifacts_dir.as_deref())
            .unwrap_or(constants::DEFAULT_ARTIFACTS_DIR);
        resolve_data_path(raw, self.data_dir.as_deref())
    }

    pub fn deployments_path(&self) -> PathBuf {
        let raw = non_placeholder(self.deployments_dir.as_deref())
            .unwrap_or(constants::DEFAULT_DEPLOYMENTS_DIR);
        resolve_data_path(raw, self.data_dir.as_deref())
    }

    pub fn receipt_policy(&self) -> ReceiptPolicy {
        ReceiptPolicy {
            poll: Duration::from_millis(self.receipt_poll_ms.max(50)),
            timeout: self
                .receipt_timeout_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            confirm_blocks: self.receipt_confirm_blocks.max(1),
        }
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, AppError> {
    Url::parse(raw.trim()).map_err(|e| AppError::Validation {
        field: field.to_string(),
        message: format!("invalid URL '{raw}': {e}"),
    })
}

fn parse_signer(field: &str, raw: Option<&str>) -> Result<Option<PrivateKeySigner>, AppError> {
    non_placeholder(raw)
        .map(|key| {
            PrivateKeySigner::from_str(key).map_err(|e| AppError::Validation {
                field: field.to_string(),
                message: format!("invalid private key: {e}"),
            })
        })
        .transpose()
}

fn parse_optional_address(field: &str, raw: Option<&str>) -> Result<Option<Address>, AppError> {
    non_placeholder(raw)
        .map(|value| {
            parse_address_hex(value)
                .ok_or_else(|| AppError::InvalidAddress(format!("{field} -> {value}")))
        })
        .transpose()
}

fn resolve_config_path(path: Option<&str>) -> Option<String> {
    if let Some(path) = path {
        return Some(path.to_string());
    }
    detect_active_config_file()
}

fn detect_active_config_file() -> Option<String> {
    let priority_files = [
        "config.local.toml",
        "config.testnet.toml",
        "config.example.toml",
        "config.toml",
    ];

    for file in priority_files.iter() {
        if let Some(true) = config_has_active_flag(file) {
            return Some((*file).to_string());
        }
    }

    // Fallback: scan current dir for config.*.toml with THIS_ACTIVE = true
    if let Ok(entries) = fs::read_dir(".") {
        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && name.starts_with("config.")
                && name.ends_with(".toml")
                && let Some(true) = config_has_active_flag(name)
            {
                return Some(name.to_string());
            }
        }
    }

    None
}

fn config_has_active_flag(path: &str) -> Option<bool> {
    let p = Path::new(path);
    if !p.exists() {
        return None;
    }

    Config::builder()
        .add_source(File::from(p))
        .build()
        .ok()?
        .get_bool("THIS_ACTIVE")
        .ok()
}
