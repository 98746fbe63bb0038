// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use crate::common::parsing::parse_bytecode;
use alloy::primitives::Bytes;
use alloy_json_abi::JsonAbi;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Compiled contract: interface plus creation bytecode.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Option<Bytes>,
    pub source: PathBuf,
}

impl ContractArtifact {
    pub fn creation_code(&self) -> Result<Bytes, AppError> {
        match &self.bytecode {
            Some(code) if !code.is_empty() => Ok(code.clone()),
            _ => Err(AppError::Artifact(format!(
                "{} has no creation bytecode ({}); is it abstract or an interface?",
                self.name,
                self.source.display()
            ))),
        }
    }

    pub fn require_functions(&self, names: &[&str]) -> Result<(), AppError> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| self.abi.function(name).is_none())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(AppError::Artifact(format!(
            "{} ABI is missing function(s): {}",
            self.name,
            missing.join(", ")
        )))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArtifact {
    /// Hardhat / Foundry build output.
    Compiled {
        abi: JsonAbi,
        #[serde(default)]
        bytecode: Option<RawBytecode>,
    },
    /// Bare ABI export.
    AbiOnly(JsonAbi),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn hex(&self) -> &str {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Hardhat layout first, then Foundry, then a flat `<Name>.json`.
    pub fn candidate_paths(&self, name: &str) -> Vec<PathBuf> {
        let file = format!("{name}.json");
        let sol_dir = format!("{name}.sol");
        vec![
            self.root.join("contracts").join(&sol_dir).join(&file),
            self.root.join(&sol_dir).join(&file),
            self.root.join(&file),
        ]
    }

    pub fn load(&self, name: &str) -> Result<ContractArtifact, AppError> {
        let candidates = self.candidate_paths(name);
        let path = candidates.iter().find(|p| p.is_file()).ok_or_else(|| {
            AppError::Artifact(format!(
                "no artifact for {name} under {}; compile the contracts first",
                self.root.display()
            ))
        })?;

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Artifact(format!("Failed to read {}: {}", path.display(), e)))?;
        let raw: RawArtifact = serde_json::from_str(&content).map_err(|e| {
            AppError::Artifact(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let (abi, bytecode) = match raw {
            RawArtifact::Compiled { abi, bytecode } => {
                let bytecode = match bytecode {
                    Some(raw) => Some(parse_bytecode(raw.hex()).ok_or_else(|| {
                        AppError::Artifact(format!(
                            "{name} bytecode in {} is not valid hex (unlinked libraries?)",
                            path.display()
                        ))
                    })?),
                    None => None,
                };
                (abi, bytecode)
            }
            RawArtifact::AbiOnly(abi) => (abi, None),
        };

        tracing::debug!(target: "deploy", contract = name, path = %path.display(), "Loaded artifact");
        Ok(ContractArtifact {
            name: name.to_string(),
            abi,
            bytecode,
            source: path.clone(),
        })
    }
}
