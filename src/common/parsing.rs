// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::primitives::{Address, Bytes};
use std::str::FromStr;

pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode contract bytecode. Unlinked library placeholders (`__$...$__`) are rejected.
pub fn parse_bytecode(s: &str) -> Option<Bytes> {
    let trimmed = strip_0x(s.trim());
    if trimmed.contains("__") {
        return None;
    }
    hex::decode(trimmed).ok().map(Bytes::from)
}

pub fn parse_address_hex(s: &str) -> Option<Address> {
    Address::from_str(strip_0x(s.trim())).ok()
}

/// Treats placeholder values like `YOUR_MY_NFT_CONTRACT_ADDRESS` or blanks as unset.
pub fn non_placeholder(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| !s.starts_with("YOUR_"))
}
