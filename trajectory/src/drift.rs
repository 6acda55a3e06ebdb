//! GPS drift filter.
//!
//! Walks samples left to right and compares every candidate to the last kept one.
//! A candidate is dropped when it implies:
//!
//! - speed above [`DriftOptions::max_speed_kmh`]
//! - a sub-meter jitter followed by an impossible jump
//! - a sharp turn at speed (heading change above [`DriftOptions::max_angle_change`])
//! - acceleration above [`DriftOptions::max_acceleration`]
//!
//! First and last samples always survive.

use crate::{
    DriftOptions, Sample,
    geometry::{bearing, distance, heading_change, speed_kmh},
};

/// Displacement in meters below which a fix may be receiver jitter
const JITTER_DISTANCE_M: f64 = 1.0;
/// Above this speed (km/h) turns are judged with the stricter threshold
const HIGH_SPEED_KMH: f64 = 60.0;
const HIGH_SPEED_TURN_THRESHOLD_KMH: f64 = 60.0;
const LOW_SPEED_TURN_THRESHOLD_KMH: f64 = 30.0;

const KMH_TO_MS: f64 = 1.0 / 3.6;

/// Filter drift from samples sorted by timestamp in asc order.
pub fn filter_drift(samples: &[Sample], opt: &DriftOptions) -> Vec<Sample> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Vec::new();
    };

    if samples.len() <= 2 {
        return samples.to_vec();
    }

    let mut kept = vec![*first];

    for (i, candidate) in samples.iter().enumerate().skip(1) {
        let next = samples.get(i + 1);

        if is_drift(&kept, candidate, next, opt) {
            continue;
        }

        kept.push(*candidate);
    }

    if kept.last().map(|this| this.timestamp) != Some(last.timestamp) {
        kept.push(*last);
    }

    kept
}

fn is_drift(kept: &[Sample], candidate: &Sample, next: Option<&Sample>, opt: &DriftOptions) -> bool {
    let Some(previous) = kept.last() else {
        return false;
    };

    let Some(speed) = speed_kmh(previous, candidate) else {
        log::debug!("Skipping sample at {:?}: time doesn't advance", candidate.timestamp);
        return true;
    };

    if speed > opt.max_speed_kmh {
        log::debug!(
            "Drift at {:?}: speed {speed:.2} km/h above {} km/h",
            candidate.timestamp,
            opt.max_speed_kmh
        );
        return true;
    }

    if distance(previous, candidate) < JITTER_DISTANCE_M {
        let next_speed = next.and_then(|next| speed_kmh(candidate, next));

        if let Some(next_speed) = next_speed.filter(|next_speed| *next_speed > opt.max_speed_kmh) {
            log::debug!(
                "Drift at {:?}: followed by a jump of {next_speed:.2} km/h",
                candidate.timestamp
            );
            return true;
        }
    }

    let before_previous = match kept.len() {
        2.. => &kept[kept.len() - 2],
        _ => return false,
    };

    // No heading while the receiver repeats the same fix
    if distance(before_previous, previous) >= JITTER_DISTANCE_M {
        let change = heading_change(
            bearing(before_previous, previous),
            bearing(previous, candidate),
        );

        let turn_threshold = match speed > HIGH_SPEED_KMH {
            true => HIGH_SPEED_TURN_THRESHOLD_KMH,
            false => LOW_SPEED_TURN_THRESHOLD_KMH,
        };

        if change > opt.max_angle_change && speed > turn_threshold {
            log::debug!(
                "Drift at {:?}: heading change {change:.2}° at {speed:.2} km/h",
                candidate.timestamp
            );
            return true;
        }
    }

    let previous_speed = speed_kmh(before_previous, previous).unwrap_or_default();

    if previous_speed > 0.0 {
        let seconds = candidate.elapsed_since(previous).as_secs_f64();
        let acceleration = ((speed - previous_speed) * KMH_TO_MS).abs() / seconds;

        if acceleration > opt.max_acceleration {
            log::debug!(
                "Drift at {:?}: acceleration {acceleration:.2} m/s² above {} m/s²",
                candidate.timestamp,
                opt.max_acceleration
            );
            return true;
        }
    }

    false
}
