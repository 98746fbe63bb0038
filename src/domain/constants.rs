// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

// =============================================================================
// CONTRACTS
// =============================================================================

pub const MY_NFT: &str = "MyNFT";
pub const MARKETPLACE: &str = "Marketplace";

/// Function the NFT contract must expose for the mint button to work.
pub const MINT_FUNCTION: &str = "mintNFT";

// =============================================================================
// USER-FACING ALERTS
// =============================================================================

pub const ALERT_INSTALL_WALLET: &str = "Please install MetaMask!";
pub const ALERT_CONNECT_FIRST: &str = "Connect your wallet first!";
pub const ALERT_MINTED: &str = "NFT Minted!";

pub const UI_TITLE: &str = "NFT Marketplace";
pub const BUTTON_CONNECT: &str = "Connect Wallet 🔌";
pub const BUTTON_MINT: &str = "Mint NFT 🎨";

// =============================================================================
// DEFAULTS
// =============================================================================

pub const DEFAULT_TOKEN_URI: &str = "https://my-json-server.typicode.com/your-api/metadata/1";
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

pub const DEFAULT_RECEIPT_POLL_MS: u64 = 500;
pub const DEFAULT_RECEIPT_CONFIRM_BLOCKS: u64 = 1;

// EIP-1193 provider error codes
pub const EIP1193_USER_REJECTED: i64 = 4001;
pub const RPC_METHOD_NOT_FOUND: i64 = -32601;
