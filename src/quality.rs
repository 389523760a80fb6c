//! Encoding quality selection.
//!
//! Recordings are offered in several encodings. Only ad-free encodings are
//! ever downloaded; among those the highest quality tier wins.

use std::fmt;

/// Ordinal encoding quality as reported by the service. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityTier(pub u32);

impl QualityTier {
    /// H.264 HD.
    pub const HD: Self = Self(6);
    /// H.264 SD with high quality encoder settings.
    pub const SD_HIGH: Self = Self(5);
    /// H.264 SD with mobile encoder settings.
    pub const SD_MOBILE: Self = Self(4);

    /// Raw tier number, as sent back in `iFormat` requests.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::HD => f.write_str("H264 HD"),
            Self::SD_HIGH => f.write_str("H264 SD high quality"),
            Self::SD_MOBILE => f.write_str("H264 SD mobile"),
            Self(other) => write!(f, "{other}"),
        }
    }
}

/// One downloadable encoding of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingOption {
    /// Whether the service cut the ads out of this encoding.
    pub ad_free: bool,
    /// Quality of this encoding.
    pub rank: QualityTier,
}

impl EncodingOption {
    /// Creates an encoding option.
    #[must_use]
    pub fn new(ad_free: bool, rank: u32) -> Self {
        Self {
            ad_free,
            rank: QualityTier(rank),
        }
    }
}

/// Returns the best ad-free encoding, or `None` if every option carries ads.
///
/// Options containing ads are discarded unconditionally. When several
/// ad-free options share the maximum rank, any one of them is returned.
#[must_use]
pub fn select_best(options: &[EncodingOption]) -> Option<EncodingOption> {
    options
        .iter()
        .filter(|option| option.ad_free)
        .max_by_key(|option| option.rank)
        .copied()
}
