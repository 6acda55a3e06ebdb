//! Latest complete trips.
//!
//! A trip is `stationary -> moving -> stationary`: the vehicle was parked, drove
//! somewhere and parked again. The search walks the state sequence backwards from
//! the end, so only the most recent activity is shown instead of hours of history.
//!
//! [`recent_trips`] looks for at most two trips. When none is found it keeps the last
//! [`FALLBACK_WINDOW`] samples.

use std::{collections::BTreeSet, ops::RangeInclusive, time::Duration};

use crate::{
    MovementOptions, MovementState, Sample, Trip, TripOptions, TripSegments,
    geometry::distance, movement::movement_states,
};

/// Samples kept when no trip is found (about an hour at 30 seconds per sample)
pub const FALLBACK_WINDOW: usize = 120;
/// Samples prepended to the moving run when no long enough stop precedes it
pub const START_LOOKBACK: usize = 5;
/// How many trips [`recent_trips`] looks for
const MAX_TRIPS: usize = 2;

/// Two consecutive merged samples further apart than this (meters) ...
const GAP_DISTANCE_M: f64 = 200.0;
/// ... within less than this are reported as a break between trips
const GAP_DURATION: Duration = Duration::from_secs(2 * 60);

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripSelection {
    /// Found trips in chronological order, indices into the searched samples
    pub trips: Vec<Trip>,
    /// Samples of all trips, deduplicated and sorted by timestamp.
    /// The recent window instead when no trip was found
    pub samples: Vec<Sample>,
}

impl TripSelection {
    pub fn is_fallback(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Search backwards for the latest trip that ends before index `before`.
///
/// `states` must be the labels of `samples`. Returns `None` unless both a closing stop
/// and a drive before it are long enough. The opening stop is optional.
pub fn find_trip(
    samples: &[Sample],
    states: &[MovementState],
    before: usize,
    opt: &TripOptions,
) -> Option<Trip> {
    let run = |state, before, min_duration| {
        find_run_before(samples, states, before, state, min_duration)
    };

    let end_stationary = run(
        MovementState::Stationary,
        before,
        opt.min_stationary_duration,
    )?;

    let moving = run(
        MovementState::Moving,
        *end_stationary.start(),
        opt.min_moving_duration,
    )?;

    let start_stationary = run(
        MovementState::Stationary,
        *moving.start(),
        opt.min_stationary_duration,
    );

    let start = match &start_stationary {
        Some(range) => *range.start(),
        None => moving.start().saturating_sub(START_LOOKBACK),
    };

    Some(Trip {
        start,
        end: *end_stationary.end(),
        segments: TripSegments {
            start_stationary,
            moving,
            end_stationary,
        },
    })
}

/// Up to two latest trips and their samples.
///
/// Samples should already be free of drift, see [`crate::drift::filter_drift`].
pub fn recent_trips(
    samples: &[Sample],
    movement: &MovementOptions,
    opt: &TripOptions,
) -> TripSelection {
    let states = movement_states(samples, movement);

    select_trips(samples, &states, opt)
}

/// Same as [`recent_trips`] for samples that are already labeled.
pub fn select_trips(
    samples: &[Sample],
    states: &[MovementState],
    opt: &TripOptions,
) -> TripSelection {
    let mut trips = Vec::with_capacity(MAX_TRIPS);
    let mut before = states.len();

    while trips.len() < MAX_TRIPS && before > 0 {
        let Some(trip) = find_trip(samples, states, before, opt) else {
            break;
        };

        before = trip.start;
        trips.push(trip);
    }

    trips.reverse();

    if trips.is_empty() {
        let start = samples.len().saturating_sub(FALLBACK_WINDOW);

        log::info!(
            "No complete trip in {} samples, keeping last {}",
            samples.len(),
            samples.len() - start
        );

        return TripSelection {
            trips,
            samples: samples[start..].to_vec(),
        };
    }

    let indices = trips
        .iter()
        .flat_map(Trip::indices)
        .collect::<BTreeSet<_>>();

    let mut selected = indices
        .into_iter()
        .filter_map(|index| samples.get(index).copied())
        .collect::<Vec<_>>();

    selected.sort_by_key(|this| this.timestamp);

    log::info!(
        "Found {} trips, {} samples in total",
        trips.len(),
        selected.len()
    );

    if trips.len() > 1 {
        log_gaps(&selected);
    }

    TripSelection {
        trips,
        samples: selected,
    }
}

/// Nearest maximal run of `state` entirely before index `before` lasting at least
/// `min_duration`. Shorter runs are skipped.
fn find_run_before(
    samples: &[Sample],
    states: &[MovementState],
    before: usize,
    state: MovementState,
    min_duration: Duration,
) -> Option<RangeInclusive<usize>> {
    let mut cursor = before.min(states.len()).min(samples.len());

    while cursor > 0 {
        let end = cursor - 1;

        if states[end] != state {
            cursor = end;
            continue;
        }

        let mut start = end;
        while start > 0 && states[start - 1] == state {
            start -= 1;
        }

        if samples[end].elapsed_since(&samples[start]) >= min_duration {
            return Some(start..=end);
        }

        cursor = start;
    }

    None
}

fn log_gaps(samples: &[Sample]) {
    for (i, pair) in samples.windows(2).enumerate() {
        let meters = distance(&pair[0], &pair[1]);
        let elapsed = pair[1].elapsed_since(&pair[0]);

        if meters > GAP_DISTANCE_M && elapsed < GAP_DURATION {
            log::debug!(
                "Break between trips at {}..{}: {meters:.2} m in {:.2} min",
                i,
                i + 1,
                elapsed.as_secs_f64() / 60.0
            );
        }
    }
}
