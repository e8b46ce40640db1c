// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanprep — Core types, fixed preprocessing constants and error definitions
// shared by the document crate.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::IsolationParams;
pub use error::ScanprepError;
pub use types::*;
