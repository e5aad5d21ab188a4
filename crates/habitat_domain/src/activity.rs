use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse bucket for a day's completion count, used for calendar heatmap
/// coloring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityTier {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("activity bands must be strictly increasing (got {low_min}, {medium_min}, {high_min})")]
pub struct BandsError {
    pub low_min: u32,
    pub medium_min: u32,
    pub high_min: u32,
}

/// Lower bounds of the low/medium/high bands. The defaults map 0 to none,
/// 1-2 to low, 3-4 to medium and 5+ to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityBands {
    low_min: u32,
    medium_min: u32,
    high_min: u32,
}

impl Default for ActivityBands {
    fn default() -> Self {
        Self {
            low_min: 1,
            medium_min: 3,
            high_min: 5,
        }
    }
}

impl ActivityBands {
    pub fn new(low_min: u32, medium_min: u32, high_min: u32) -> Result<Self, BandsError> {
        if low_min == 0 || low_min >= medium_min || medium_min >= high_min {
            return Err(BandsError {
                low_min,
                medium_min,
                high_min,
            });
        }
        Ok(Self {
            low_min,
            medium_min,
            high_min,
        })
    }

    pub fn classify(&self, count: u32) -> ActivityTier {
        if count >= self.high_min {
            ActivityTier::High
        } else if count >= self.medium_min {
            ActivityTier::Medium
        } else if count >= self.low_min {
            ActivityTier::Low
        } else {
            ActivityTier::None
        }
    }
}

/// Classification with the default bands.
pub fn classify(count: u32) -> ActivityTier {
    ActivityBands::default().classify(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_match_documented_thresholds() {
        assert_eq!(classify(0), ActivityTier::None);
        assert_eq!(classify(1), ActivityTier::Low);
        assert_eq!(classify(2), ActivityTier::Low);
        assert_eq!(classify(3), ActivityTier::Medium);
        assert_eq!(classify(4), ActivityTier::Medium);
        assert_eq!(classify(5), ActivityTier::High);
        assert_eq!(classify(250), ActivityTier::High);
    }

    #[test]
    fn classification_is_stable_for_repeated_counts() {
        for count in 0..32 {
            assert_eq!(classify(count), classify(count));
        }
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(ActivityTier::None < ActivityTier::Low);
        assert!(ActivityTier::Low < ActivityTier::Medium);
        assert!(ActivityTier::Medium < ActivityTier::High);
    }

    #[test]
    fn custom_bands_must_be_strictly_increasing() {
        let custom = ActivityBands::new(1, 4, 8).unwrap();
        assert_eq!(custom.classify(3), ActivityTier::Low);
        assert_eq!(custom.classify(4), ActivityTier::Medium);
        assert_eq!(custom.classify(8), ActivityTier::High);

        assert!(ActivityBands::new(0, 3, 5).is_err());
        assert!(ActivityBands::new(2, 2, 5).is_err());
        assert!(ActivityBands::new(1, 5, 3).is_err());
    }
}
