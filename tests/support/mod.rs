// In-memory chain used by the flow tests.
#![allow(dead_code)]

use alloy::primitives::{Address, B256, Log};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use nft_marketplace::domain::error::AppError;
use nft_marketplace::network::gateway::{ChainGateway, ReceiptSummary};
use nft_marketplace::network::receipt::ReceiptPolicy;
use nft_marketplace::services::marketplace::Notifier;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type Journal = Arc<Mutex<Vec<String>>>;

/// What happens to the next submitted transaction.
pub enum Outcome {
    Mined {
        pending_polls: usize,
        success: bool,
        contract_address: Option<Address>,
        logs: Vec<Log>,
    },
    Rejected(AppError),
}

impl Outcome {
    pub fn mined_after(pending_polls: usize) -> Self {
        Outcome::Mined {
            pending_polls,
            success: true,
            contract_address: None,
            logs: Vec::new(),
        }
    }

    pub fn created(address: Address) -> Self {
        Outcome::Mined {
            pending_polls: 1,
            success: true,
            contract_address: Some(address),
            logs: Vec::new(),
        }
    }

    pub fn reverted() -> Self {
        Outcome::Mined {
            pending_polls: 0,
            success: false,
            contract_address: None,
            logs: Vec::new(),
        }
    }
}

struct Pending {
    polls_left: usize,
    receipt: ReceiptSummary,
}

pub struct FakeChain {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub journal: Journal,
    pub sent: Mutex<Vec<TransactionRequest>>,
    outcomes: Mutex<VecDeque<Outcome>>,
    pending: Mutex<HashMap<B256, Pending>>,
    head: Mutex<u64>,
}

impl FakeChain {
    pub fn new(accounts: Vec<Address>, outcomes: Vec<Outcome>) -> Self {
        Self {
            chain_id: 31337,
            accounts,
            journal: Arc::new(Mutex::new(Vec::new())),
            sent: Mutex::new(Vec::new()),
            outcomes: Mutex::new(outcomes.into()),
            pending: Mutex::new(HashMap::new()),
            head: Mutex::new(100),
        }
    }

    pub fn note(&self, entry: impl Into<String>) {
        self.journal.lock().unwrap().push(entry.into());
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainGateway for FakeChain {
    async fn chain_id(&self) -> Result<u64, AppError> {
        Ok(self.chain_id)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, AppError> {
        self.note("request_accounts");
        Ok(self.accounts.clone())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256, AppError> {
        self.note("send");
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected transaction");
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx);
        let hash = B256::with_last_byte(sent.len() as u8);
        match outcome {
            Outcome::Rejected(err) => Err(err),
            Outcome::Mined {
                pending_polls,
                success,
                contract_address,
                logs,
            } => {
                let mut head = self.head.lock().unwrap();
                *head += 1;
                self.pending.lock().unwrap().insert(
                    hash,
                    Pending {
                        polls_left: pending_polls,
                        receipt: ReceiptSummary {
                            tx_hash: hash,
                            block_number: Some(*head),
                            success,
                            contract_address,
                            logs,
                        },
                    },
                );
                Ok(hash)
            }
        }
    }

    async fn receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>, AppError> {
        let mut pending = self.pending.lock().unwrap();
        let Some(entry) = pending.get_mut(&hash) else {
            return Ok(None);
        };
        if entry.polls_left > 0 {
            entry.polls_left -= 1;
            self.note("receipt:pending");
            return Ok(None);
        }
        self.note("receipt:mined");
        Ok(Some(entry.receipt.clone()))
    }

    async fn block_number(&self) -> Result<u64, AppError> {
        Ok(*self.head.lock().unwrap())
    }
}

/// Notifier that writes alerts into the chain's journal so ordering can be asserted.
pub struct JournalNotifier(pub Journal);

impl Notifier for JournalNotifier {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(format!("alert:{message}"));
    }
}

pub fn fast_receipts() -> ReceiptPolicy {
    ReceiptPolicy {
        poll: Duration::from_millis(1),
        timeout: Some(Duration::from_secs(5)),
        confirm_blocks: 1,
    }
}

pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "nft-marketplace-it-{tag}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
