// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::common::retry::retry_async;
use crate::data::abi::ArtifactStore;
use crate::data::deployments::DeploymentBook;
use crate::domain::constants::{MARKETPLACE, MINT_FUNCTION, MY_NFT};
use crate::network::gateway::ChainGateway;
use crate::network::receipt::{ReceiptPolicy, await_receipt};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256};
use alloy::rpc::types::TransactionRequest;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractSpec {
    pub name: &'static str,
    /// Functions the compiled ABI must expose before we spend gas on it.
    pub required_functions: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    pub contracts: Vec<ContractSpec>,
}

impl DeployPlan {
    /// `MyNFT` first, then `Marketplace`.
    pub fn standard() -> Self {
        Self {
            contracts: vec![
                ContractSpec {
                    name: MY_NFT,
                    required_functions: &[MINT_FUNCTION],
                },
                ContractSpec {
                    name: MARKETPLACE,
                    required_functions: &[],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

pub struct Deployer {
    gateway: Arc<dyn ChainGateway>,
    artifacts: ArtifactStore,
    receipt_policy: ReceiptPolicy,
    deployments_dir: Option<PathBuf>,
}

impl Deployer {
    pub fn new(
        gateway: Arc<dyn ChainGateway>,
        artifacts: ArtifactStore,
        receipt_policy: ReceiptPolicy,
    ) -> Self {
        Self {
            gateway,
            artifacts,
            receipt_policy,
            deployments_dir: None,
        }
    }

    /// Record deployed addresses under `dir` so the front end can find them.
    pub fn with_deployments_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.deployments_dir = Some(dir.into());
        self
    }

    async fn deployer_account(&self) -> Result<Address, AppError> {
        let accounts = self.gateway.request_accounts().await?;
        accounts.first().copied().ok_or_else(|| {
            AppError::Config(
                "endpoint exposes no accounts; set DEPLOYER_KEY or unlock a dev account".into(),
            )
        })
    }

    pub async fn deploy_one(
        &self,
        from: Address,
        spec: &ContractSpec,
    ) -> Result<DeployedContract, AppError> {
        let artifact = self.artifacts.load(spec.name)?;
        artifact.require_functions(spec.required_functions)?;
        let code = artifact.creation_code()?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code);
        let tx_hash = self.gateway.send_transaction(tx).await?;
        tracing::info!(
            target: "deploy",
            contract = spec.name,
            tx = %format!("{tx_hash:#x}"),
            "Deployment submitted; awaiting confirmation"
        );

        let receipt = await_receipt(self.gateway.as_ref(), tx_hash, &self.receipt_policy).await?;
        let address = receipt.contract_address.ok_or_else(|| AppError::Transaction {
            hash: format!("{tx_hash:#x}"),
            reason: "receipt carries no contract address".into(),
        })?;

        Ok(DeployedContract {
            name: spec.name.to_string(),
            address,
            tx_hash,
            block_number: receipt.block_number,
        })
    }

    /// Deploy every contract in `plan` in order, printing `<Name> deployed to: <address>`
    /// to `out` as each one confirms. The first failure aborts the rest.
    pub async fn run<W: Write>(
        &self,
        plan: &DeployPlan,
        out: &mut W,
    ) -> Result<Vec<DeployedContract>, AppError> {
        let gateway = self.gateway.clone();
        let chain_id = retry_async(
            move |_| {
                let gateway = gateway.clone();
                async move { gateway.chain_id().await }
            },
            3,
            Duration::from_millis(200),
        )
        .await?;
        let from = self.deployer_account().await?;
        tracing::info!(
            target: "deploy",
            chain_id,
            deployer = %from,
            artifacts = %self.artifacts.root().display(),
            "Deploying contracts"
        );

        let mut deployed = Vec::with_capacity(plan.contracts.len());
        for spec in &plan.contracts {
            let contract = self.deploy_one(from, spec).await?;
            writeln!(
                out,
                "{} deployed to: {}",
                contract.name,
                contract.address.to_checksum(None)
            )
            .map_err(|e| AppError::Unknown(e.into()))?;
            tracing::info!(
                target: "deploy",
                contract = %contract.name,
                address = %contract.address,
                block = ?contract.block_number,
                "Contract deployed"
            );
            deployed.push(contract);
        }

        if let Some(dir) = &self.deployments_dir {
            self.record(dir, chain_id, &deployed);
        }
        Ok(deployed)
    }

    fn record(&self, dir: &std::path::Path, chain_id: u64, deployed: &[DeployedContract]) {
        // The addresses are already on stdout; a bookkeeping failure must not fail the deploy.
        let mut book = match DeploymentBook::load(dir, chain_id) {
            Ok(existing) => existing.unwrap_or_else(|| DeploymentBook::new(chain_id)),
            Err(e) => {
                tracing::warn!(target: "deploy", error = %e, "Replacing unreadable deployment book");
                DeploymentBook::new(chain_id)
            }
        };
        for contract in deployed {
            book.record(&contract.name, contract.address);
        }
        match book.save(dir) {
            Ok(path) => {
                tracing::info!(target: "deploy", path = %path.display(), "Deployment book updated")
            }
            Err(e) => tracing::warn!(target: "deploy", error = %e, "Failed to write deployment book"),
        }
    }
}
