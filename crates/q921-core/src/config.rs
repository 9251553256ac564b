//! Per-trunk configuration.

use q921_proto::Address;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, QueueError},
    link::Role,
};

/// Largest header reservation a trunk accepts, in bytes.
pub const MAX_HEADER_SPACE: usize = 16;

/// Settings for one trunk.
///
/// Every field has a default, so a partial document deserializes into a
/// usable configuration. Call [`TrunkConfig::validate`] before use;
/// [`Trunk::new`](crate::Trunk::new) does so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrunkConfig {
    /// Service Access Point Identifier (0..=63)
    pub sapi: u8,
    /// Terminal Endpoint Identifier (0..=127)
    pub tei: u8,
    /// Network or user side
    pub role: Role,
    /// Bytes reserved before the LAPD header on every frame, in both
    /// directions
    pub header_space: usize,
    /// T200 duration in milliseconds
    pub t200_ms: u64,
    /// T203 duration in milliseconds
    pub t203_ms: u64,
    /// Maximum information field length (N201)
    pub n201: usize,
    /// Receive queue buffer size, slot index included
    pub queue_bytes: usize,
    /// Receive queue slot count
    pub queue_slots: usize,
}

impl Default for TrunkConfig {
    fn default() -> Self {
        Self {
            sapi: Address::SAPI_CALL_CONTROL,
            tei: 0,
            role: Role::User,
            header_space: 0,
            t200_ms: 1000,
            t203_ms: 10_000,
            n201: 260,
            queue_bytes: 3000,
            queue_slots: 10,
        }
    }
}

impl TrunkConfig {
    /// Check ranges and queue geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sapi > Address::MAX_SAPI {
            return Err(ConfigError::SapiOutOfRange(self.sapi));
        }
        if self.tei > Address::MAX_TEI {
            return Err(ConfigError::TeiOutOfRange(self.tei));
        }
        if self.header_space > MAX_HEADER_SPACE {
            return Err(ConfigError::HeaderSpaceTooLarge {
                actual: self.header_space,
                max: MAX_HEADER_SPACE,
            });
        }
        if self.t200_ms == 0 {
            return Err(ConfigError::ZeroTimer("T200"));
        }
        if self.t203_ms == 0 {
            return Err(ConfigError::ZeroTimer("T203"));
        }
        if self.queue_slots < 2 {
            return Err(QueueError::InvalidSlotCount(self.queue_slots).into());
        }

        let index_len = self.queue_slots.saturating_mul(8);
        if self.queue_bytes <= index_len {
            return Err(QueueError::BufferTooSmall {
                needed: index_len,
                actual: self.queue_bytes,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TrunkConfig::default();
        config.validate().unwrap();
        assert_eq!(config.t200_ms, 1000);
        assert_eq!(config.t203_ms, 10_000);
        assert_eq!(config.n201, 260);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad_sapi = TrunkConfig { sapi: 64, ..TrunkConfig::default() };
        assert_eq!(bad_sapi.validate(), Err(ConfigError::SapiOutOfRange(64)));

        let bad_tei = TrunkConfig { tei: 128, ..TrunkConfig::default() };
        assert_eq!(bad_tei.validate(), Err(ConfigError::TeiOutOfRange(128)));

        let bad_header = TrunkConfig { header_space: 17, ..TrunkConfig::default() };
        assert!(matches!(bad_header.validate(), Err(ConfigError::HeaderSpaceTooLarge { .. })));

        let bad_timer = TrunkConfig { t203_ms: 0, ..TrunkConfig::default() };
        assert_eq!(bad_timer.validate(), Err(ConfigError::ZeroTimer("T203")));
    }

    #[test]
    fn rejects_unusable_queue() {
        let config = TrunkConfig { queue_slots: 10, queue_bytes: 80, ..TrunkConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Queue(QueueError::BufferTooSmall { needed: 80, actual: 80 }))
        );
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = TrunkConfig { role: Role::Network, tei: 5, ..TrunkConfig::default() };

        let mut encoded = Vec::new();
        ciborium::into_writer(&config, &mut encoded).unwrap();
        let decoded: TrunkConfig = ciborium::from_reader(encoded.as_slice()).unwrap();
        assert_eq!(decoded, config);

        // A map with only `role` set
        let partial = ciborium::Value::Map(vec![(
            ciborium::Value::Text("role".into()),
            ciborium::Value::Text("network".into()),
        )]);
        let mut bytes = Vec::new();
        ciborium::into_writer(&partial, &mut bytes).unwrap();
        let decoded: TrunkConfig = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(decoded, TrunkConfig { role: Role::Network, ..TrunkConfig::default() });
    }
}
