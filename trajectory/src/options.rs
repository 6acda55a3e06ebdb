//! Thresholds for every stage.
//!
//! Nothing here has a default, every threshold is supplied by the caller through
//! `new`. Single values can be adjusted afterwards with `set_*`.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftOptions {
    /// Highest plausible speed in km/h
    pub max_speed_kmh: f64,
    /// Highest plausible acceleration in m/s²
    pub max_acceleration: f64,
    /// Heading change in degrees above which a fast fix is considered drift
    pub max_angle_change: f64,
}

impl DriftOptions {
    pub const fn new(max_speed_kmh: f64, max_acceleration: f64, max_angle_change: f64) -> Self {
        Self {
            max_speed_kmh,
            max_acceleration,
            max_angle_change,
        }
    }

    pub const fn set_max_speed_kmh(mut self, max_speed_kmh: f64) -> Self {
        self.max_speed_kmh = max_speed_kmh;
        self
    }

    pub const fn set_max_acceleration(mut self, max_acceleration: f64) -> Self {
        self.max_acceleration = max_acceleration;
        self
    }

    pub const fn set_max_angle_change(mut self, max_angle_change: f64) -> Self {
        self.max_angle_change = max_angle_change;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementOptions {
    /// Number of neighbouring distances averaged for every sample
    pub window_size: usize,
    /// Average step below this (meters) counts as standing still
    pub stationary_distance_threshold: f64,
    /// Average step above this (meters) counts as moving. Values in between keep the current state
    pub moving_distance_threshold: f64,
    /// How long a state must last before a different classification is accepted
    pub min_state_duration: Duration,
    /// Shortest stop reported as [`crate::StationarySegment`]
    pub min_segment_duration: Duration,
}

impl MovementOptions {
    pub const fn new(
        window_size: usize,
        stationary_distance_threshold: f64,
        moving_distance_threshold: f64,
        min_state_duration: Duration,
        min_segment_duration: Duration,
    ) -> Self {
        Self {
            window_size,
            stationary_distance_threshold,
            moving_distance_threshold,
            min_state_duration,
            min_segment_duration,
        }
    }

    pub const fn set_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub const fn set_distance_thresholds(mut self, stationary: f64, moving: f64) -> Self {
        self.stationary_distance_threshold = stationary;
        self.moving_distance_threshold = moving;
        self
    }

    pub const fn set_min_state_duration(mut self, min_state_duration: Duration) -> Self {
        self.min_state_duration = min_state_duration;
        self
    }

    pub const fn set_min_segment_duration(mut self, min_segment_duration: Duration) -> Self {
        self.min_segment_duration = min_segment_duration;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripOptions {
    /// Shortest stop that can open or close a trip
    pub min_stationary_duration: Duration,
    /// Shortest drive that counts as a trip
    pub min_moving_duration: Duration,
}

impl TripOptions {
    pub const fn new(min_stationary_duration: Duration, min_moving_duration: Duration) -> Self {
        Self {
            min_stationary_duration,
            min_moving_duration,
        }
    }

    pub const fn set_min_stationary_duration(mut self, min_stationary_duration: Duration) -> Self {
        self.min_stationary_duration = min_stationary_duration;
        self
    }

    pub const fn set_min_moving_duration(mut self, min_moving_duration: Duration) -> Self {
        self.min_moving_duration = min_moving_duration;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplifyOptions {
    /// Minimal spacing in meters between kept points
    pub min_distance: f64,
}

impl SimplifyOptions {
    pub const fn new(min_distance: f64) -> Self {
        Self { min_distance }
    }

    pub const fn set_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    pub drift: DriftOptions,
    pub movement: MovementOptions,
    pub trip: TripOptions,
    pub simplify: SimplifyOptions,
}

impl Options {
    pub const fn new(
        drift: DriftOptions,
        movement: MovementOptions,
        trip: TripOptions,
        simplify: SimplifyOptions,
    ) -> Self {
        Self {
            drift,
            movement,
            trip,
            simplify,
        }
    }

    pub const fn set_drift(mut self, drift: DriftOptions) -> Self {
        self.drift = drift;
        self
    }

    pub const fn set_movement(mut self, movement: MovementOptions) -> Self {
        self.movement = movement;
        self
    }

    pub const fn set_trip(mut self, trip: TripOptions) -> Self {
        self.trip = trip;
        self
    }

    pub const fn set_simplify(mut self, simplify: SimplifyOptions) -> Self {
        self.simplify = simplify;
        self
    }
}
