mod support;

use alloy::primitives::{Address, B256, Log, LogData, TxKind, U256};
use alloy_sol_types::{SolCall, SolEvent};
use nft_marketplace::data::bindings::MyNFT;
use nft_marketplace::data::deployments::DeploymentBook;
use nft_marketplace::domain::error::AppError;
use nft_marketplace::network::gateway::ChainGateway;
use nft_marketplace::services::marketplace::{AddressSource, MarketplaceSession};
use std::sync::Arc;
use support::{FakeChain, JournalNotifier, Outcome, fast_receipts, scratch_dir};

const TOKEN_URI: &str = "https://my-json-server.typicode.com/your-api/metadata/1";

fn nft() -> Address {
    Address::repeat_byte(0x42)
}

fn user() -> Address {
    Address::repeat_byte(0x07)
}

fn session_on(chain: &Arc<FakeChain>, addresses: AddressSource) -> MarketplaceSession<JournalNotifier> {
    let gateway: Arc<dyn ChainGateway> = chain.clone();
    MarketplaceSession::new(
        Some(gateway),
        addresses,
        TOKEN_URI,
        fast_receipts(),
        JournalNotifier(chain.journal.clone()),
    )
}

fn mint_log(token_id: u64) -> Log {
    Log {
        address: nft(),
        data: LogData::new_unchecked(
            vec![
                MyNFT::Transfer::SIGNATURE_HASH,
                Address::ZERO.into_word(),
                user().into_word(),
                B256::from(U256::from(token_id)),
            ],
            Default::default(),
        ),
    }
}

#[tokio::test]
async fn connect_without_wallet_alerts_install_message() {
    let journal = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut session = MarketplaceSession::new(
        None,
        AddressSource::fixed(nft()),
        TOKEN_URI,
        fast_receipts(),
        JournalNotifier(journal.clone()),
    );

    assert_eq!(session.connect_wallet().await.unwrap(), None);
    assert_eq!(
        *journal.lock().unwrap(),
        vec!["alert:Please install MetaMask!".to_string()]
    );
}

#[tokio::test]
async fn mint_before_connect_alerts_and_sends_nothing() {
    let chain = Arc::new(FakeChain::new(vec![user()], Vec::new()));
    let mut session = session_on(&chain, AddressSource::fixed(nft()));

    assert_eq!(session.mint_nft().await.unwrap(), None);
    assert!(chain.sent().is_empty());
    assert_eq!(chain.journal(), vec!["alert:Connect your wallet first!"]);
}

#[tokio::test]
async fn mint_alerts_only_after_receipt() {
    let chain = Arc::new(FakeChain::new(
        vec![user(), Address::repeat_byte(0x08)],
        vec![Outcome::Mined {
            pending_polls: 2,
            success: true,
            contract_address: None,
            logs: vec![mint_log(3)],
        }],
    ));
    let mut session = session_on(&chain, AddressSource::fixed(nft()));

    assert_eq!(session.connect_wallet().await.unwrap(), Some(user()));
    let minted = session.mint_nft().await.unwrap().expect("minted");

    assert_eq!(minted.minter, user());
    assert_eq!(minted.nft, nft());
    assert_eq!(minted.token_id, Some(U256::from(3u64)));
    assert_eq!(
        chain.journal(),
        vec![
            "request_accounts",
            "send",
            "receipt:pending",
            "receipt:pending",
            "receipt:mined",
            "alert:NFT Minted!",
        ]
    );

    let sent = chain.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, Some(user()));
    assert_eq!(sent[0].to, Some(TxKind::Call(nft())));
    let input = sent[0].input.input().expect("calldata");
    let call = MyNFT::mintNFTCall::abi_decode(input).unwrap();
    assert_eq!(call.tokenURI, TOKEN_URI);
}

#[tokio::test]
async fn reverted_mint_is_an_error_without_success_alert() {
    let chain = Arc::new(FakeChain::new(vec![user()], vec![Outcome::reverted()]));
    let mut session = session_on(&chain, AddressSource::fixed(nft()));

    session.connect_wallet().await.unwrap();
    let err = session.mint_nft().await.unwrap_err();

    assert!(matches!(err, AppError::Transaction { .. }));
    assert!(!chain.journal().iter().any(|e| e.starts_with("alert:")));
}

#[tokio::test]
async fn wallet_rejection_propagates() {
    let chain = Arc::new(FakeChain::new(
        vec![user()],
        vec![Outcome::Rejected(AppError::WalletRejected(
            "User denied transaction signature".into(),
        ))],
    ));
    let mut session = session_on(&chain, AddressSource::fixed(nft()));

    session.connect_wallet().await.unwrap();
    assert!(matches!(
        session.mint_nft().await,
        Err(AppError::WalletRejected(_))
    ));
}

#[tokio::test]
async fn wallet_with_no_accounts_stays_disconnected() {
    let chain = Arc::new(FakeChain::new(Vec::new(), Vec::new()));
    let mut session = session_on(&chain, AddressSource::fixed(nft()));

    assert_eq!(session.connect_wallet().await.unwrap(), None);
    assert!(!session.is_connected());
    assert_eq!(session.mint_nft().await.unwrap(), None);
    assert_eq!(
        chain.journal(),
        vec!["request_accounts", "alert:Connect your wallet first!"]
    );
}

#[tokio::test]
async fn nft_address_comes_from_deployment_book() {
    let dir = scratch_dir("book-lookup");
    let mut book = DeploymentBook::new(31337);
    book.record("MyNFT", nft());
    book.record("Marketplace", Address::repeat_byte(0x43));
    book.save(&dir).unwrap();

    let chain = Arc::new(FakeChain::new(vec![user()], vec![Outcome::mined_after(0)]));
    let mut session = session_on(
        &chain,
        AddressSource {
            deployments_dir: Some(dir),
            ..AddressSource::default()
        },
    );

    session.connect_wallet().await.unwrap();
    let minted = session.mint_nft().await.unwrap().expect("minted");
    assert_eq!(minted.nft, nft());
    assert_eq!(minted.token_id, None);
    assert_eq!(chain.sent()[0].to, Some(TxKind::Call(nft())));
}

#[tokio::test]
async fn unknown_nft_address_is_a_config_error() {
    let dir = scratch_dir("book-missing");
    let chain = Arc::new(FakeChain::new(vec![user()], Vec::new()));
    let mut session = session_on(
        &chain,
        AddressSource {
            deployments_dir: Some(dir),
            ..AddressSource::default()
        },
    );

    session.connect_wallet().await.unwrap();
    assert!(matches!(session.mint_nft().await, Err(AppError::Config(_))));
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn explicit_nft_address_ignores_unusable_deployment_book() {
    let dir = scratch_dir("book-mismatch");
    std::fs::write(
        DeploymentBook::path_for(&dir, 31337),
        r#"{"chain_id":1,"contracts":{}}"#,
    )
    .unwrap();

    let chain = Arc::new(FakeChain::new(vec![user()], vec![Outcome::mined_after(0)]));
    let mut session = session_on(
        &chain,
        AddressSource {
            nft: Some(nft()),
            deployments_dir: Some(dir),
            ..AddressSource::default()
        },
    );

    session.connect_wallet().await.unwrap();
    let minted = session.mint_nft().await.unwrap().expect("minted");
    assert_eq!(minted.nft, nft());
    assert_eq!(chain.sent().len(), 1);
    assert_eq!(chain.journal().last().map(String::as_str), Some("alert:NFT Minted!"));
}
