// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod console;
pub mod deploy;
pub mod marketplace;
pub mod wallet;
