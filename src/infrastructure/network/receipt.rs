// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::domain::constants::{DEFAULT_RECEIPT_CONFIRM_BLOCKS, DEFAULT_RECEIPT_POLL_MS};
use crate::network::gateway::{ChainGateway, ReceiptSummary};
use alloy::primitives::B256;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolicy {
    pub poll: Duration,
    /// `None` waits until the receipt shows up, however long that takes.
    pub timeout: Option<Duration>,
    pub confirm_blocks: u64,
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(DEFAULT_RECEIPT_POLL_MS),
            timeout: None,
            confirm_blocks: DEFAULT_RECEIPT_CONFIRM_BLOCKS,
        }
    }
}

fn receipt_is_confirmed(current_head: u64, receipt_block: u64, confirm_blocks: u64) -> bool {
    let needed_head = receipt_block.saturating_add(confirm_blocks.saturating_sub(1));
    current_head >= needed_head
}

/// Poll until `hash` is mined and buried `confirm_blocks - 1` blocks deep.
///
/// A reverted receipt is an error, as is running past the policy timeout.
pub async fn await_receipt(
    gateway: &dyn ChainGateway,
    hash: B256,
    policy: &ReceiptPolicy,
) -> Result<ReceiptSummary, AppError> {
    let started = Instant::now();
    let poll = policy.poll.max(Duration::from_millis(1));
    let confirm_blocks = policy.confirm_blocks.max(1);

    loop {
        match gateway.receipt(hash).await {
            Ok(Some(receipt)) => {
                if !receipt.success {
                    return Err(AppError::Transaction {
                        hash: format!("{hash:#x}"),
                        reason: "reverted".into(),
                    });
                }
                let Some(receipt_block) = receipt.block_number else {
                    return Ok(receipt);
                };
                if confirm_blocks == 1 {
                    return Ok(receipt);
                }
                match gateway.block_number().await {
                    Ok(head)
                        if receipt_is_confirmed(
                            head.max(receipt_block),
                            receipt_block,
                            confirm_blocks,
                        ) =>
                    {
                        return Ok(receipt);
                    }
                    Ok(head) => {
                        tracing::trace!(
                            target: "rpc",
                            hash = %format!("{hash:#x}"),
                            head,
                            receipt_block,
                            "Waiting for confirmations"
                        );
                    }
                    Err(e) => {
                        tracing::debug!(target: "rpc", error = %e, "Head lookup error; retrying");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(
                    target: "rpc",
                    error = %e,
                    hash = %format!("{hash:#x}"),
                    "Receipt lookup error; retrying"
                );
            }
        }

        if let Some(timeout) = policy.timeout
            && started.elapsed() >= timeout
        {
            return Err(AppError::Transaction {
                hash: format!("{hash:#x}"),
                reason: format!("timed out after {} ms", timeout.as_millis()),
            });
        }

        tokio::time::sleep(poll).await;
    }
}
