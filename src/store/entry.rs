//! Store Entry Module
//!
//! Defines the structure for individual scalar entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Store Entry ==
/// A scalar value held by the in-process store, with expiration metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored bytes
    pub value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// Returns None when the expiration time does not fit in a timestamp.
    ///
    /// # Arguments
    /// * `value` - The bytes to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: Vec<u8>, ttl_seconds: Option<u64>) -> Option<Self> {
        let expires_at = match ttl_seconds {
            Some(ttl) => Some(expiration_ms(ttl)?),
            None => None,
        };

        Some(Self { value, expires_at })
    }

    /// Creates an entry that never expires.
    pub fn persistent(value: Vec<u8>) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds, or None if no expiration is set.
    ///
    /// Rounds up, so an entry with any time left reports at least one second.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = current_timestamp_ms();
            expires.saturating_sub(now).div_ceil(1000)
        })
    }
}

// == Utility Functions ==
/// Absolute expiration time `ttl_seconds` from now, None on overflow.
fn expiration_ms(ttl_seconds: u64) -> Option<u64> {
    ttl_seconds
        .checked_mul(1000)
        .and_then(|ms| current_timestamp_ms().checked_add(ms))
}

/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
