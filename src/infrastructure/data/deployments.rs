// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Addresses written by `deploy`, one file per chain: `<dir>/<chain_id>.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentBook {
    pub chain_id: u64,
    pub contracts: BTreeMap<String, Address>,
}

impl DeploymentBook {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            contracts: BTreeMap::new(),
        }
    }

    pub fn path_for(dir: &Path, chain_id: u64) -> PathBuf {
        dir.join(format!("{chain_id}.json"))
    }

    /// `Ok(None)` when nothing has been deployed to this chain yet.
    pub fn load(dir: &Path, chain_id: u64) -> Result<Option<Self>, AppError> {
        let path = Self::path_for(dir, chain_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::Config(format!("Failed to read deployments {}: {}", path.display(), e))
        })?;
        let book: DeploymentBook = serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!("Failed to parse deployments {}: {}", path.display(), e))
        })?;
        if book.chain_id != chain_id {
            return Err(AppError::Validation {
                field: "chain_id".into(),
                message: format!(
                    "{} records chain {} but was loaded for chain {}",
                    path.display(),
                    book.chain_id,
                    chain_id
                ),
            });
        }
        Ok(Some(book))
    }

    pub fn record(&mut self, name: &str, address: Address) {
        self.contracts.insert(name.to_string(), address);
    }

    pub fn address_of(&self, name: &str) -> Option<Address> {
        self.contracts.get(name).copied()
    }

    pub fn save(&self, dir: &Path) -> Result<PathBuf, AppError> {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Initialization(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        let path = Self::path_for(dir, self.chain_id);
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Initialization(format!("Failed to encode deployments: {e}")))?;
        fs::write(&path, body).map_err(|e| {
            AppError::Initialization(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}
