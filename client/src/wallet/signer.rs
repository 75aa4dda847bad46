//! Signer address handling.
//!
//! Writes receive their signer explicitly as a [`SignerAddress`]. The
//! [`SignerCell`] keeps the ambient "current signer" for readers that want it
//! (headers, profile badges); it has a single writer, the synchronizer, and
//! last write wins.

use std::fmt;

use parking_lot::RwLock;

/// Receives the resolved signer address whenever it changes.
///
/// Only called with settled states; `None` means no signer (disconnected).
pub trait SignerSink: Send + Sync {
    fn set_signer_address(&self, address: Option<&str>);
}

/// Single-writer, many-reader, last-write-wins signer cell.
#[derive(Debug, Default)]
pub struct SignerCell {
    current: RwLock<Option<String>>,
}

impl SignerCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.current.read().clone()
    }
}

impl SignerSink for SignerCell {
    fn set_signer_address(&self, address: Option<&str>) {
        *self.current.write() = address.map(str::to_string);
    }
}

/// A non-empty address that is allowed to sign a write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignerAddress(String);

impl SignerAddress {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            None
        } else {
            Some(Self(address))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SignerAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
