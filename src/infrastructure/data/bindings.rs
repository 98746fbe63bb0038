// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::primitives::{Address, Log, U256};
use alloy::sol;
use alloy_sol_types::SolEvent;

sol! {
    interface MyNFT {
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

        function mintNFT(string memory tokenURI) external returns (uint256);
    }
}

/// Token id of the first ERC-721 mint (`Transfer` from the zero address) emitted by `nft`.
pub fn minted_token_id(nft: Address, logs: &[Log]) -> Option<U256> {
    logs.iter()
        .filter(|log| log.address == nft)
        .filter_map(|log| MyNFT::Transfer::decode_log(log).ok())
        .find(|event| event.from == Address::ZERO)
        .map(|event| event.tokenId)
}
