use std::{ops::RangeInclusive, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    /// UNIX timestamp e.g. duration after [`std::time::UNIX_EPOCH`]
    pub timestamp: Duration,
}

impl Sample {
    pub const fn new(latitude: f64, longitude: f64, timestamp: Duration) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Time passed since `earlier`, zero if `earlier` is not actually earlier.
    pub fn elapsed_since(&self, earlier: &Sample) -> Duration {
        self.timestamp.saturating_sub(earlier.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    Stationary,
    Moving,
}

/// Maximal run of [`MovementState::Stationary`] samples long enough to be reported.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationarySegment {
    pub start_index: usize,
    /// Inclusive
    pub end_index: usize,
    pub duration: Duration,
    /// Position of the first sample of the run
    pub anchor_latitude: f64,
    pub anchor_longitude: f64,
}

/// Index ranges of the three phases of a [`Trip`]. All ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripSegments {
    /// `None` when no long enough stop precedes the moving run
    pub start_stationary: Option<RangeInclusive<usize>>,
    pub moving: RangeInclusive<usize>,
    pub end_stationary: RangeInclusive<usize>,
}

/// One complete `stationary -> moving -> stationary` cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub start: usize,
    /// Inclusive
    pub end: usize,
    pub segments: TripSegments,
}

impl Trip {
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}
