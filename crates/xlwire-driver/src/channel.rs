use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;
use tracing::debug;
use xlwire_schema::ChannelConfig;

use crate::error::Result;
use crate::traits::ChannelConfigSource;

/// Bit set of hardware channels; bit `n` selects channel index `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccessMask(pub u64);

impl AccessMask {
    pub const NONE: AccessMask = AccessMask(0);

    /// Mask selecting a single channel. Indices past 63 select nothing.
    pub fn from_channel(channel: u8) -> Self {
        AccessMask(1u64.checked_shl(u32::from(channel)).unwrap_or(0))
    }

    pub fn contains(self, channel: u8) -> bool {
        let bit = Self::from_channel(channel).0;
        bit != 0 && self.0 & bit == bit
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Set channel indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0u8..64).filter(move |channel| self.contains(*channel))
    }
}

impl From<u64> for AccessMask {
    fn from(bits: u64) -> Self {
        AccessMask(bits)
    }
}

impl FromIterator<u8> for AccessMask {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter()
            .fold(AccessMask::NONE, |mask, channel| mask | AccessMask::from_channel(channel))
    }
}

impl BitOr for AccessMask {
    type Output = AccessMask;

    fn bitor(self, rhs: AccessMask) -> AccessMask {
        AccessMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessMask {
    fn bitor_assign(&mut self, rhs: AccessMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Channel configurations fetched once per activation.
#[derive(Debug, Default)]
pub struct ChannelConfigCache {
    access: AccessMask,
    configs: BTreeMap<u8, ChannelConfig>,
}

impl ChannelConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query every channel in `access` and replace the cached records.
    ///
    /// On error the previous contents are kept.
    pub fn activate(&mut self, source: &dyn ChannelConfigSource, access: AccessMask) -> Result<()> {
        let configs = access
            .iter()
            .map(|channel| Ok((channel, source.channel_config(channel)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        debug!(%access, channels = configs.len(), "cached channel configuration");
        self.access = access;
        self.configs = configs;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.access = AccessMask::NONE;
        self.configs.clear();
    }

    /// Mask of the last successful activation.
    pub fn access(&self) -> AccessMask {
        self.access
    }

    pub fn get(&self, channel: u8) -> Option<&ChannelConfig> {
        self.configs.get(&channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &ChannelConfig)> {
        self.configs.iter().map(|(channel, config)| (*channel, config))
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use xlwire_schema::Record;

    use super::*;
    use crate::error::DriverStatusError;
    use crate::status::Status;

    #[test]
    fn mask_helpers() {
        let mask = AccessMask::from_channel(0) | AccessMask::from_channel(5);
        assert_eq!(mask, AccessMask(0b10_0001));
        assert!(mask.contains(5));
        assert!(!mask.contains(4));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 5]);
        assert_eq!(mask.len(), 2);
        assert_eq!([0u8, 5].into_iter().collect::<AccessMask>(), mask);
        assert_eq!(AccessMask::from_channel(64), AccessMask::NONE);
        assert!(!AccessMask(u64::MAX).contains(70));
    }

    struct Counting {
        calls: Cell<usize>,
        fail_on: Option<u8>,
    }

    impl ChannelConfigSource for Counting {
        fn channel_config(&self, channel: u8) -> Result<ChannelConfig> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_on == Some(channel) {
                return Err(DriverStatusError {
                    code: Status::ERR_INVALID_CHAN_INDEX.code(),
                    description: "invalid channel index".into(),
                    operation: "xlGetDriverConfig".into(),
                });
            }
            let mut config = ChannelConfig::zeroed();
            config.channel_index = channel;
            config.channel_mask = AccessMask::from_channel(channel).0;
            Ok(config)
        }
    }

    #[test]
    fn cache_queries_once_per_activation() {
        let source = Counting {
            calls: Cell::new(0),
            fail_on: None,
        };
        let mut cache = ChannelConfigCache::new();
        cache.activate(&source, AccessMask(0b110)).unwrap();
        assert_eq!(source.calls.get(), 2);

        for _ in 0..3 {
            assert_eq!(cache.get(2).map(|config| config.channel_index), Some(2));
        }
        assert!(cache.get(0).is_none());
        assert_eq!(source.calls.get(), 2);
        assert_eq!(cache.access(), AccessMask(0b110));

        cache.deactivate();
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_activation_keeps_previous_records() {
        let mut cache = ChannelConfigCache::new();
        let good = Counting {
            calls: Cell::new(0),
            fail_on: None,
        };
        cache.activate(&good, AccessMask(0b1)).unwrap();

        let bad = Counting {
            calls: Cell::new(0),
            fail_on: Some(3),
        };
        let err = cache.activate(&bad, AccessMask(0b1001)).unwrap_err();
        assert_eq!(err.code, 111);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.access(), AccessMask(0b1));
    }
}
