// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use crate::domain::constants::{EIP1193_USER_REJECTED, RPC_METHOD_NOT_FOUND};
use crate::network::provider::{ConnectionFactory, FilledProvider};
use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, B256, Log};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;
use serde_json::json;

/// The parts of a mined receipt this crate acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub success: bool,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
}

/// A chain endpoint that can hand out accounts and submit transactions for them.
///
/// This is the seam between the deploy/mint flows and the outside world: a browser-style
/// wallet provider, a dev node with unlocked accounts, or a local key all look the same here.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    async fn chain_id(&self) -> Result<u64, AppError>;

    /// EIP-1193 `eth_requestAccounts`; may prompt the user.
    async fn request_accounts(&self) -> Result<Vec<Address>, AppError>;

    /// Submit and return the transaction hash without waiting for inclusion.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256, AppError>;

    async fn receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>, AppError>;

    async fn block_number(&self) -> Result<u64, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signing {
    /// The endpoint holds the keys and signs `eth_sendTransaction`.
    Endpoint,
    Local(Address),
}

pub struct RpcGateway {
    provider: FilledProvider,
    signing: Signing,
    endpoint: String,
}

impl RpcGateway {
    pub fn node_signed(rpc_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            provider: ConnectionFactory::node_signed(rpc_url)?,
            signing: Signing::Endpoint,
            endpoint: rpc_url.to_string(),
        })
    }

    pub fn key_signed(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self, AppError> {
        let address = signer.address();
        Ok(Self {
            provider: ConnectionFactory::key_signed(rpc_url, signer)?,
            signing: Signing::Local(address),
            endpoint: rpc_url.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn signs_locally(&self) -> bool {
        matches!(self.signing, Signing::Local(_))
    }
}

fn error_code(err: &TransportError) -> Option<i64> {
    err.as_error_resp().map(|payload| payload.code)
}

fn map_rpc_error(method: &str, err: TransportError) -> AppError {
    match error_code(&err) {
        Some(EIP1193_USER_REJECTED) => AppError::WalletRejected(format!("{method}: {err}")),
        _ => AppError::Connection(format!("{method} failed: {err}")),
    }
}

#[async_trait]
impl ChainGateway for RpcGateway {
    async fn chain_id(&self) -> Result<u64, AppError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| map_rpc_error("eth_chainId", e))
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, AppError> {
        if let Signing::Local(address) = self.signing {
            return Ok(vec![address]);
        }

        let requested: Result<Vec<Address>, TransportError> = self
            .provider
            .raw_request("eth_requestAccounts".into(), json!([]))
            .await;
        match requested {
            Ok(accounts) => Ok(accounts),
            // Plain nodes don't know the EIP-1193 method; their unlocked accounts are equivalent.
            Err(e) if error_code(&e) == Some(RPC_METHOD_NOT_FOUND) => {
                tracing::debug!(
                    target: "wallet",
                    endpoint = %self.endpoint,
                    "eth_requestAccounts unsupported; falling back to eth_accounts"
                );
                self.provider
                    .get_accounts()
                    .await
                    .map_err(|e| map_rpc_error("eth_accounts", e))
            }
            Err(e) => Err(map_rpc_error("eth_requestAccounts", e)),
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256, AppError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| map_rpc_error("eth_sendTransaction", e))?;
        Ok(*pending.tx_hash())
    }

    async fn receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>, AppError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| map_rpc_error("eth_getTransactionReceipt", e))?;

        Ok(receipt.map(|r| ReceiptSummary {
            tx_hash: r.transaction_hash(),
            block_number: r.block_number(),
            success: r.status(),
            contract_address: r.contract_address(),
            logs: r.inner.logs().iter().map(|l| l.inner.clone()).collect(),
        }))
    }

    async fn block_number(&self) -> Result<u64, AppError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| map_rpc_error("eth_blockNumber", e))
    }
}
