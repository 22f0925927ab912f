//! SysEx configuration
//!
//! Stored as postcard binary data. A version byte leads the encoding so
//! layout changes can be detected instead of misread; everything decoded is
//! validated before use.

use midibox_protocol::{ParserConfig, RemoteMode, Variant};
use serde::{Deserialize, Serialize};

/// Current encoding version
pub const CONFIG_VERSION: u8 = 1;

/// Largest device ID representable in a SysEx data byte
pub const MAX_DEVICE_ID: u8 = 0x7F;

/// Default idle time before a partial message is dropped
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// Upper bound on the encoded size of [`SysexConfig`]
pub const MAX_ENCODED_SIZE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small
    Encode,
    /// Bytes are not a valid encoding
    Decode,
    /// Encoding written by an incompatible version
    UnsupportedVersion(u8),
    /// Device ID does not fit in seven bits
    InvalidDeviceId(u8),
    /// Zero timeout would drop every message
    InvalidTimeout,
    /// Neither protocol variant is enabled
    NoVariantEnabled,
}

/// SysEx protocol settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SysexConfig {
    pub version: u8,
    /// Device ID appended to the sequencer header
    pub device_id: u8,
    /// Serve the mixer surface protocol
    pub mixer: bool,
    /// Serve the sequencer remote protocol
    pub sequencer: bool,
    pub remote_mode: RemoteMode,
    /// Idle time in ms after which a partial message is dropped
    pub timeout_ms: u32,
    /// Let MIDI realtime bytes pass through SysEx messages
    pub realtime_passthrough: bool,
}

impl Default for SysexConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            device_id: 0x00,
            mixer: true,
            sequencer: true,
            remote_mode: RemoteMode::Auto,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            realtime_passthrough: false,
        }
    }
}

impl SysexConfig {
    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.device_id > MAX_DEVICE_ID {
            return Err(ConfigError::InvalidDeviceId(self.device_id));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if !self.mixer && !self.sequencer {
            return Err(ConfigError::NoVariantEnabled);
        }
        Ok(())
    }

    /// Enabled protocol variants
    pub fn variants(&self) -> impl Iterator<Item = Variant> + '_ {
        [(self.mixer, Variant::Mixer), (self.sequencer, Variant::Sequencer)]
            .into_iter()
            .filter_map(|(enabled, variant)| enabled.then_some(variant))
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            realtime_passthrough: self.realtime_passthrough,
        }
    }

    /// Encode into `buf`, returning the used part
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Decode and validate
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        // Check the version before the layout it describes
        match bytes.first() {
            Some(&CONFIG_VERSION) => {}
            Some(&other) => return Err(ConfigError::UnsupportedVersion(other)),
            None => return Err(ConfigError::Decode),
        }
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode stored bytes, falling back to defaults when unusable
    pub fn load_or_default(bytes: &[u8]) -> Self {
        match Self::from_bytes(bytes) {
            Ok(config) => config,
            Err(e) => {
                warn!("stored sysex config rejected: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(config: &SysexConfig) -> heapless::Vec<u8, MAX_ENCODED_SIZE> {
        let mut buf = [0u8; MAX_ENCODED_SIZE];
        let used = config.to_bytes(&mut buf).unwrap();
        heapless::Vec::from_slice(used).unwrap()
    }

    #[test]
    fn test_default_is_valid() {
        let config = SysexConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.timeout_ms, 1000);
        assert!(!config.realtime_passthrough);
    }

    #[test]
    fn test_persisted_config_loads() {
        let config = SysexConfig {
            device_id: 0x05,
            mixer: false,
            remote_mode: RemoteMode::Client,
            timeout_ms: 250,
            realtime_passthrough: true,
            ..SysexConfig::default()
        };
        let bytes = encode(&config);

        assert_eq!(bytes[0], CONFIG_VERSION);
        assert_eq!(SysexConfig::from_bytes(&bytes), Ok(config));
    }

    #[test]
    fn test_rejects_out_of_range_device_id() {
        let config = SysexConfig {
            device_id: 0x80,
            ..SysexConfig::default()
        };
        let bytes = encode(&config);
        assert_eq!(
            SysexConfig::from_bytes(&bytes),
            Err(ConfigError::InvalidDeviceId(0x80))
        );
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut bytes = encode(&SysexConfig::default());
        bytes[0] = 7;
        assert_eq!(
            SysexConfig::from_bytes(&bytes),
            Err(ConfigError::UnsupportedVersion(7))
        );
    }

    #[test]
    fn test_rejects_truncated_bytes() {
        let bytes = encode(&SysexConfig::default());
        assert_eq!(
            SysexConfig::from_bytes(&bytes[..2]),
            Err(ConfigError::Decode)
        );
        assert_eq!(SysexConfig::from_bytes(&[]), Err(ConfigError::Decode));
    }

    #[test]
    fn test_validation() {
        let no_variant = SysexConfig {
            mixer: false,
            sequencer: false,
            ..SysexConfig::default()
        };
        assert_eq!(no_variant.validate(), Err(ConfigError::NoVariantEnabled));

        let zero_timeout = SysexConfig {
            timeout_ms: 0,
            ..SysexConfig::default()
        };
        assert_eq!(zero_timeout.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            SysexConfig::default().to_bytes(&mut buf),
            Err(ConfigError::Encode)
        );
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(SysexConfig::load_or_default(&[0xFF]), SysexConfig::default());
    }

    #[test]
    fn test_variants() {
        let config = SysexConfig {
            mixer: false,
            ..SysexConfig::default()
        };
        let mut variants = config.variants();
        assert_eq!(variants.next(), Some(Variant::Sequencer));
        assert_eq!(variants.next(), None);
    }
}
