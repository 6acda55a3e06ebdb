//! All stages in order:
//!
//! ```notrust
//! samples -> drift filter -> movement states -> recent trips -> stops + simplified path
//! ```

use crate::{
    Options, Sample, StationarySegment, Trip,
    drift::filter_drift,
    movement::{ongoing_stop, stationary_segments},
    simplify::simplify,
    trip::recent_trips,
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Input without drift. Indices of [`Analysis::trips`] point here
    pub filtered: Vec<Sample>,
    /// Latest trips in chronological order, empty if none was complete
    pub trips: Vec<Trip>,
    /// Samples of the trips, or the recent window when there are none.
    /// Indices of stops point here
    pub selected: Vec<Sample>,
    pub stationary_segments: Vec<StationarySegment>,
    /// Stop the vehicle is standing in at the end of the data
    pub current_stop: Option<StationarySegment>,
    /// Simplified path of the selected samples, ready to draw
    pub trajectory: Vec<Sample>,
}

/// Analyze samples of a single vehicle sorted by timestamp in asc order.
pub fn analyze(samples: &[Sample], opt: &Options) -> Analysis {
    let filtered = filter_drift(samples, &opt.drift);

    let selection = recent_trips(&filtered, &opt.movement, &opt.trip);

    let stationary_segments = stationary_segments(&selection.samples, &opt.movement);
    let current_stop = ongoing_stop(&selection.samples, &stationary_segments, &opt.movement);

    let trajectory = simplify(&selection.samples, &opt.drift, &opt.simplify);

    log::info!(
        "Samples: {} raw, {} without drift, {} selected, {} drawn. {} trips, {} stops",
        samples.len(),
        filtered.len(),
        selection.samples.len(),
        trajectory.len(),
        selection.trips.len(),
        stationary_segments.len()
    );

    Analysis {
        filtered,
        trips: selection.trips,
        selected: selection.samples,
        stationary_segments,
        current_stop,
        trajectory,
    }
}
