// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use alloy::network::{Ethereum, EthereumWallet};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use url::Url;

/// Provider with nonce, gas and chain-id fillers; signs locally when built with a key.
pub type FilledProvider = DynProvider<Ethereum>;

pub struct ConnectionFactory;

impl ConnectionFactory {
    fn parse(rpc_url: &str) -> Result<Url, AppError> {
        Url::parse(rpc_url).map_err(|e| AppError::Config(format!("Invalid RPC URL: {}", e)))
    }

    /// Transactions are signed by the endpoint itself (`eth_sendTransaction`).
    pub fn node_signed(rpc_url: &str) -> Result<FilledProvider, AppError> {
        let url = Self::parse(rpc_url)?;
        Ok(ProviderBuilder::new().connect_http(url).erased())
    }

    /// Transactions are signed with `signer` and submitted raw.
    pub fn key_signed(rpc_url: &str, signer: PrivateKeySigner) -> Result<FilledProvider, AppError> {
        let url = Self::parse(rpc_url)?;
        let wallet = EthereumWallet::from(signer);
        Ok(ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased())
    }
}
