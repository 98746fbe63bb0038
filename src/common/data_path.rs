// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::path::PathBuf;

const DATA_DIR_ENV: &str = "DATA_DIR";

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

fn env_data_dir() -> Option<String> {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Base directory for relative artifact and deployment paths:
/// 1) explicit setting
/// 2) `DATA_DIR`
/// 3) current working directory
pub fn resolve_base_dir(explicit_data_dir: Option<&str>) -> PathBuf {
    explicit_data_dir
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .or_else(env_data_dir)
        .map(|dir| absolute(PathBuf::from(dir)))
        .unwrap_or_else(|| absolute(PathBuf::from(".")))
}

/// Absolute paths pass through; relative ones are joined onto [`resolve_base_dir`].
pub fn resolve_data_path(raw_path: &str, explicit_data_dir: Option<&str>) -> PathBuf {
    let as_path = PathBuf::from(raw_path.trim());
    if as_path.is_absolute() {
        return as_path;
    }
    resolve_base_dir(explicit_data_dir).join(as_path)
}
