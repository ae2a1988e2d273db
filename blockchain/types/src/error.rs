// Copyright (c) 2024 The Arx Foundation

use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// Failures converting raw bytes into typed entities.
#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum ConvertError {
    /// Wrong byte length: expected {expected}, found {found}
    LengthMismatch {
        /// The protocol-mandated width.
        expected: usize,
        /// The width actually supplied.
        found: usize,
    },
}
