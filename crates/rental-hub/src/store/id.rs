use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

const ID_LEN: usize = 12;

static ID_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Store-native document identifier: 12 bytes rendered as 24 hexadecimal characters.
///
/// Generated ids sort by creation second, then process, then a process-wide sequence, so
/// ids minted by one process are strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId([u8; ID_LEN]);

impl DocumentId {
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; ID_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..8].copy_from_slice(&std::process::id().to_be_bytes());
        bytes[8..].copy_from_slice(&sequence.to_be_bytes());
        Self(bytes)
    }

    /// True when `raw` is exactly 24 hex characters.
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<DocumentId>().is_ok()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != ID_LEN * 2 {
            return Err(InvalidDocumentId {
                value: raw.to_string(),
            });
        }

        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| InvalidDocumentId {
            value: raw.to_string(),
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for DocumentId {
    type Error = InvalidDocumentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.to_hex()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid document id")]
pub struct InvalidDocumentId {
    pub value: String,
}
