// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::data::bindings::{MyNFT, minted_token_id};
use crate::data::deployments::DeploymentBook;
use crate::domain::constants::{
    ALERT_CONNECT_FIRST, ALERT_INSTALL_WALLET, ALERT_MINTED, MARKETPLACE, MY_NFT,
};
use crate::network::gateway::ChainGateway;
use crate::network::receipt::{ReceiptPolicy, await_receipt};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy_sol_types::SolCall;
use std::path::PathBuf;
use std::sync::Arc;

/// Blocking, user-facing message surface (the browser's `alert`).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        println!("[!] {message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub nft: Address,
    /// Resolved alongside the NFT but not called from the front end.
    pub marketplace: Option<Address>,
}

/// Where contract addresses come from: explicit settings first, then the deployment book.
#[derive(Debug, Clone, Default)]
pub struct AddressSource {
    pub nft: Option<Address>,
    pub marketplace: Option<Address>,
    pub deployments_dir: Option<PathBuf>,
}

impl AddressSource {
    pub fn fixed(nft: Address) -> Self {
        Self {
            nft: Some(nft),
            ..Self::default()
        }
    }

    pub async fn resolve(&self, gateway: &dyn ChainGateway) -> Result<ContractAddresses, AppError> {
        if let Some(nft) = self.nft {
            let marketplace = match self.marketplace {
                Some(address) => Some(address),
                // Only the NFT address is needed to mint; a bad book must not block it.
                None => match self.load_book(gateway).await {
                    Ok(book) => book.and_then(|b| b.address_of(MARKETPLACE)),
                    Err(e) => {
                        tracing::warn!(
                            target: "mint",
                            error = %e,
                            "Deployment book unusable; marketplace address unresolved"
                        );
                        None
                    }
                },
            };
            return Ok(ContractAddresses { nft, marketplace });
        }

        let book = self.load_book(gateway).await?;
        let from_book = |name: &str| book.as_ref().and_then(|b| b.address_of(name));
        let nft = from_book(MY_NFT).ok_or_else(|| {
            AppError::Config(format!(
                "{MY_NFT} address unknown: set NFT_ADDRESS or run `deploy` against this chain first"
            ))
        })?;
        Ok(ContractAddresses {
            nft,
            marketplace: self.marketplace.or_else(|| from_book(MARKETPLACE)),
        })
    }

    async fn load_book(&self, gateway: &dyn ChainGateway) -> Result<Option<DeploymentBook>, AppError> {
        let Some(dir) = &self.deployments_dir else {
            return Ok(None);
        };
        let chain_id = gateway.chain_id().await?;
        DeploymentBook::load(dir, chain_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub nft: Address,
    pub minter: Address,
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub token_id: Option<U256>,
}

/// The marketplace front end: one optional wallet, one connected account, two actions.
pub struct MarketplaceSession<N: Notifier = ConsoleNotifier> {
    wallet: Option<Arc<dyn ChainGateway>>,
    addresses: AddressSource,
    token_uri: String,
    receipt_policy: ReceiptPolicy,
    notifier: N,
    account: Option<Address>,
}

impl<N: Notifier> MarketplaceSession<N> {
    pub fn new(
        wallet: Option<Arc<dyn ChainGateway>>,
        addresses: AddressSource,
        token_uri: impl Into<String>,
        receipt_policy: ReceiptPolicy,
        notifier: N,
    ) -> Self {
        Self {
            wallet,
            addresses,
            token_uri: token_uri.into(),
            receipt_policy,
            notifier,
            account: None,
        }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// "Connect Wallet": ask the wallet for accounts and keep the first one.
    pub async fn connect_wallet(&mut self) -> Result<Option<Address>, AppError> {
        let Some(wallet) = &self.wallet else {
            self.notifier.alert(ALERT_INSTALL_WALLET);
            return Ok(None);
        };

        let accounts = wallet.request_accounts().await?;
        self.account = accounts.first().copied();
        match self.account {
            Some(account) => {
                tracing::info!(target: "wallet", %account, "Wallet connected")
            }
            None => tracing::warn!(target: "wallet", "Wallet returned no accounts"),
        }
        Ok(self.account)
    }

    /// "Mint NFT": call `mintNFT(token_uri)` from the connected account and wait for it to be mined.
    ///
    /// `Ok(None)` means nothing was sent because no account is connected.
    pub async fn mint_nft(&mut self) -> Result<Option<MintReceipt>, AppError> {
        let (Some(account), Some(wallet)) = (self.account, self.wallet.as_ref()) else {
            self.notifier.alert(ALERT_CONNECT_FIRST);
            return Ok(None);
        };

        let contracts = self.addresses.resolve(wallet.as_ref()).await?;
        let calldata = MyNFT::mintNFTCall {
            tokenURI: self.token_uri.clone(),
        }
        .abi_encode();
        let tx = TransactionRequest::default()
            .with_from(account)
            .with_to(contracts.nft)
            .with_input(calldata);

        let tx_hash = wallet.send_transaction(tx).await?;
        tracing::info!(
            target: "mint",
            nft = %contracts.nft,
            tx = %format!("{tx_hash:#x}"),
            token_uri = %self.token_uri,
            "Mint submitted"
        );

        let receipt = await_receipt(wallet.as_ref(), tx_hash, &self.receipt_policy).await?;
        let token_id = minted_token_id(contracts.nft, &receipt.logs);
        tracing::info!(
            target: "mint",
            token_id = ?token_id,
            block = ?receipt.block_number,
            "Mint confirmed"
        );
        self.notifier.alert(ALERT_MINTED);

        Ok(Some(MintReceipt {
            nft: contracts.nft,
            minter: account,
            tx_hash,
            block_number: receipt.block_number,
            token_id,
        }))
    }

    /// Connect, then mint once. `Ok(None)` when no account could be connected; the connect
    /// alert is the only one shown in that case.
    pub async fn connect_and_mint(&mut self) -> Result<Option<MintReceipt>, AppError> {
        if self.connect_wallet().await?.is_none() {
            return Ok(None);
        }
        self.mint_nft().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorded(Mutex<Vec<String>>);

    impl Notifier for Recorded {
        fn alert(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn connect_without_wallet_asks_for_install() {
        let mut session = MarketplaceSession::new(
            None,
            AddressSource::default(),
            "ipfs://x",
            ReceiptPolicy::default(),
            Recorded::default(),
        );
        assert_eq!(session.connect_wallet().await.unwrap(), None);
        assert!(!session.is_connected());
        assert_eq!(
            *session.notifier().0.lock().unwrap(),
            vec!["Please install MetaMask!".to_string()]
        );
    }

    #[tokio::test]
    async fn mint_before_connect_is_refused() {
        let mut session = MarketplaceSession::new(
            None,
            AddressSource::fixed(Address::repeat_byte(1)),
            "ipfs://x",
            ReceiptPolicy::default(),
            Recorded::default(),
        );
        assert_eq!(session.mint_nft().await.unwrap(), None);
        assert_eq!(
            *session.notifier().0.lock().unwrap(),
            vec!["Connect your wallet first!".to_string()]
        );
    }

    #[tokio::test]
    async fn one_shot_mint_without_wallet_only_asks_for_install() {
        let mut session = MarketplaceSession::new(
            None,
            AddressSource::fixed(Address::repeat_byte(1)),
            "ipfs://x",
            ReceiptPolicy::default(),
            Recorded::default(),
        );
        assert_eq!(session.connect_and_mint().await.unwrap(), None);
        assert_eq!(
            *session.notifier().0.lock().unwrap(),
            vec!["Please install MetaMask!".to_string()]
        );
    }
}
