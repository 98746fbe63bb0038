// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::app::config::GlobalSettings;
use crate::common::error::AppError;
use crate::network::gateway::{ChainGateway, RpcGateway};
use std::sync::Arc;

/// The wallet provider the front end talks to, if one is present.
///
/// A wallet endpoint wins over a local key. `Ok(None)` is the "no extension installed" case.
pub fn detect_wallet(settings: &GlobalSettings) -> Result<Option<Arc<dyn ChainGateway>>, AppError> {
    if let Some(url) = settings.wallet_rpc_url()? {
        tracing::info!(target: "wallet", endpoint = %url, "Using wallet provider endpoint");
        let gateway = RpcGateway::node_signed(url.as_str())?;
        return Ok(Some(Arc::new(gateway)));
    }
    if let Some(signer) = settings.wallet_signer()? {
        tracing::info!(target: "wallet", account = %signer.address(), "Using local key wallet");
        let gateway = RpcGateway::key_signed(&settings.rpc_url, signer)?;
        return Ok(Some(Arc::new(gateway)));
    }
    tracing::debug!(target: "wallet", "No wallet provider configured");
    Ok(None)
}

/// Gateway used by `deploy`: the deployer key if set, otherwise the node's own accounts.
pub fn deployer_gateway(settings: &GlobalSettings) -> Result<Arc<dyn ChainGateway>, AppError> {
    let gateway = match settings.deployer_signer()? {
        Some(signer) => RpcGateway::key_signed(&settings.rpc_url, signer)?,
        None => RpcGateway::node_signed(&settings.rpc_url)?,
    };
    tracing::debug!(
        target: "deploy",
        endpoint = gateway.endpoint(),
        local_signing = gateway.signs_locally(),
        "Deployer gateway ready"
    );
    Ok(Arc::new(gateway))
}
