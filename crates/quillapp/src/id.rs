//! # Resource Identity
//!
//! Every resource is keyed by a [`ResourceId`]: a short string that sorts
//! lexicographically by creation time and can be read aloud or retyped without
//! ambiguity.
//!
//! ## Format
//!
//! ```text
//! 1hk1p9749 0ar
//! └───┬───┘ └┬┘
//!     │      └── suffix: 3 symbols, unique within the millisecond
//!     └───────── prefix: millisecond timestamp, left-padded to 9 symbols
//! ```
//!
//! Both parts use a 32-symbol alphabet: the ten digits followed by lowercase
//! letters, skipping `i`, `l`, `o` and `u`. Nine symbols cover timestamps up to
//! 2^45 ms (roughly the year 3084); past that the prefix simply grows.
//!
//! ## Within-Millisecond Ordering
//!
//! The first ID in a millisecond draws a random suffix. Every further ID in the
//! same millisecond increments the previous suffix instead of drawing again, so
//! IDs stay strictly increasing without remembering every suffix handed out.
//! When the suffix would need a fourth symbol the bucket is exhausted and
//! [`IdError::Overflow`] is returned; the caller can retry on the next tick.
//!
//! ## Limitations
//!
//! Generator state lives in one [`IdGenerator`] per process. Two processes
//! generating in the same millisecond can collide. Quill is a single-operator
//! tool, so this is accepted rather than coordinated away.

use crate::error::IdError;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Symbols in value order.
pub const ALPHABET: [char; 32] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'j',
    'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x', 'y', 'z',
];

const BASE: u64 = ALPHABET.len() as u64;

/// Minimum width of the timestamp prefix.
pub const PREFIX_WIDTH: usize = 9;

/// Exact width of the per-millisecond suffix.
pub const SUFFIX_WIDTH: usize = 3;

/// Number of distinct suffixes (32^3).
pub const SUFFIX_SPACE: u32 = 32 * 32 * 32;

/// Encodes a non-negative integer in base 32.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return ALPHABET[0].to_string();
    }
    let mut symbols = Vec::new();
    while n > 0 {
        symbols.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    symbols.iter().rev().collect()
}

/// Decodes a base-32 string. Case-insensitive.
pub fn decode(s: &str) -> Result<u64, IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    s.chars().try_fold(0u64, |acc, c| {
        let value = symbol_value(c).ok_or(IdError::InvalidSymbol(c))?;
        acc.checked_mul(BASE)
            .and_then(|shifted| shifted.checked_add(value))
            .ok_or_else(|| IdError::OutOfRange(s.to_string()))
    })
}

fn symbol_value(c: char) -> Option<u64> {
    let lower = c.to_ascii_lowercase();
    ALPHABET
        .iter()
        .position(|&symbol| symbol == lower)
        .map(|pos| pos as u64)
}

/// Left-pads an encoded value with the zero symbol.
fn pad(encoded: &str, width: usize) -> String {
    format!("{:0>width$}", encoded, width = width)
}

fn encode_suffix(value: u32) -> String {
    pad(&encode(u64::from(value)), SUFFIX_WIDTH)
}

fn encode_prefix(timestamp: i64) -> Result<String, IdError> {
    let millis = u64::try_from(timestamp).map_err(|_| IdError::NegativeTimestamp(timestamp))?;
    Ok(pad(&encode(millis), PREFIX_WIDTH))
}

/// Primary key of a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The timestamp part of the ID.
    pub fn prefix(&self) -> &str {
        &self.0[..self.0.len() - SUFFIX_WIDTH]
    }

    /// The per-millisecond part of the ID.
    pub fn suffix(&self) -> &str {
        &self.0[self.0.len() - SUFFIX_WIDTH..]
    }

    /// Creation time encoded in the ID, in milliseconds since the epoch.
    pub fn timestamp_millis(&self) -> Result<u64, IdError> {
        decode(self.prefix())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let well_formed = normalized.len() >= PREFIX_WIDTH + SUFFIX_WIDTH
            && normalized.chars().all(|c| symbol_value(c).is_some());
        if !well_formed {
            return Err(IdError::Malformed(s.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for ResourceId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

#[derive(Debug, Default)]
struct BucketState {
    last_prefix: Option<String>,
    last_suffix: u32,
    last_timestamp: i64,
}

/// Hands out [`ResourceId`]s for one process.
///
/// Construct once and share by reference. The bucket state is behind a mutex,
/// so a shared generator is safe to use from several threads.
#[derive(Debug, Default)]
pub struct IdGenerator {
    state: Mutex<BucketState>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues from a previously issued ID: the next ID generated for the
    /// same millisecond increments its suffix.
    pub fn resume(last: &ResourceId) -> Result<Self, IdError> {
        let timestamp = last.timestamp_millis()?;
        let last_timestamp =
            i64::try_from(timestamp).map_err(|_| IdError::OutOfRange(last.to_string()))?;
        let last_suffix = decode(last.suffix())? as u32;
        Ok(Self {
            state: Mutex::new(BucketState {
                last_prefix: Some(last.prefix().to_string()),
                last_suffix,
                last_timestamp,
            }),
        })
    }

    /// Generates an ID for the current time.
    ///
    /// The clock is never allowed to run backwards relative to the previous
    /// call, so IDs from one generator are monotonic even across clock steps.
    pub fn generate(&self) -> Result<ResourceId, IdError> {
        let now = Utc::now().timestamp_millis();
        let mut state = self.lock_state();
        let timestamp = now.max(state.last_timestamp);
        Self::issue(&mut state, timestamp)
    }

    /// Generates an ID for an explicit millisecond timestamp.
    pub fn generate_at(&self, timestamp: i64) -> Result<ResourceId, IdError> {
        let mut state = self.lock_state();
        Self::issue(&mut state, timestamp)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BucketState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn issue(state: &mut BucketState, timestamp: i64) -> Result<ResourceId, IdError> {
        let prefix = encode_prefix(timestamp)?;

        let suffix = if state.last_prefix.as_deref() == Some(prefix.as_str()) {
            let next = state.last_suffix + 1;
            if next >= SUFFIX_SPACE {
                warn!(prefix = %prefix, "ID bucket exhausted");
                return Err(IdError::Overflow);
            }
            next
        } else {
            rand::rng().random_range(0..SUFFIX_SPACE)
        };

        let id = ResourceId(format!("{}{}", prefix, encode_suffix(suffix)));
        debug!(id = %id, "issued resource id");

        state.last_prefix = Some(prefix);
        state.last_suffix = suffix;
        state.last_timestamp = state.last_timestamp.max(timestamp);
        Ok(id)
    }
}
