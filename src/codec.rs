//! Envelope codec between a store's in-memory state and its storage slot.
//!
//! Stored values are JSON envelopes `{ "state": .., "version": .. }`. Ordered
//! maps are not representable as plain JSON objects without losing insertion
//! order, so map-valued fields opt into [`ordered_pairs`] and travel as an
//! array of `[key, value]` pairs instead.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Written into every envelope. Tolerated-if-missing on read and never
/// compared; reserved for a future migration gate.
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Serialize)]
struct WriteEnvelope<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct ReadEnvelope<T> {
    state: T,
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
}

pub fn encode<T: Serialize>(state: &T) -> Result<String, SyncError> {
    let envelope = WriteEnvelope {
        state,
        version: ENVELOPE_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a raw storage value. Absent and malformed are the same outcome:
/// `None`, which callers treat as "store not yet initialized". Decode errors
/// never escape this boundary.
pub fn decode<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str::<ReadEnvelope<T>>(raw) {
        Ok(envelope) => Some(envelope.state),
        Err(e) => {
            log::debug!("discarding undecodable stored value: {}", e);
            None
        }
    }
}

/// Serde adapter for `IndexMap` fields: encodes as a sequence of
/// `[key, value]` pairs and rebuilds the map in the same order.
pub mod ordered_pairs {
    use std::hash::Hash;

    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<K, V, S>(map: &IndexMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<IndexMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Hash + Eq,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
