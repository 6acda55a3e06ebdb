//! Movement state of every sample.
//!
//! The trajectory is treated like a noisy waveform:
//!
//! 1. `d[i]` is the distance from sample `i` to sample `i + 1`
//! 2. every sample gets the mean of `d` over a window of
//!    [`MovementOptions::window_size`] centered on its index, clamped to the
//!    available distances (the last sample reuses the trailing distances)
//! 3. the mean is compared against two thresholds, values between them keep
//!    the current state
//! 4. a new state replaces the current one only after the current one lasted
//!    [`MovementOptions::min_state_duration`]
//!
//! The very first sample has no current state and falls back to
//! [`MovementState::Moving`] when its mean is between the thresholds.

use crate::{MovementOptions, MovementState, Sample, StationarySegment, geometry::distance};

/// Fewer samples than this are not classified at all
const MIN_SAMPLES: usize = 3;

/// State of every sample. Empty for fewer than 3 samples.
pub fn movement_states(samples: &[Sample], opt: &MovementOptions) -> Vec<MovementState> {
    if samples.len() < MIN_SAMPLES {
        return Vec::new();
    }

    let distances = step_distances(samples);

    let mut states = Vec::with_capacity(samples.len());
    let mut current: Option<(MovementState, &Sample)> = None;

    for (i, sample) in samples.iter().enumerate() {
        let average = window_average(&distances, i, opt.window_size);

        let state = match current {
            None => {
                let state = classify(average, opt).unwrap_or(MovementState::Moving);
                current = Some((state, sample));
                state
            }
            Some((state, since)) => match classify(average, opt) {
                Some(candidate)
                    if candidate != state
                        && sample.elapsed_since(since) >= opt.min_state_duration =>
                {
                    current = Some((candidate, sample));
                    candidate
                }
                _ => state,
            },
        };

        states.push(state);
    }

    states
}

/// Stops long enough to be reported, in chronological order.
pub fn stationary_segments(samples: &[Sample], opt: &MovementOptions) -> Vec<StationarySegment> {
    let states = movement_states(samples, opt);

    let segments = runs(&states, MovementState::Stationary)
        .filter_map(|(start_index, end_index)| {
            let duration = samples[end_index].elapsed_since(&samples[start_index]);

            if duration < opt.min_segment_duration {
                return None;
            }

            Some(StationarySegment {
                start_index,
                end_index,
                duration,
                anchor_latitude: samples[start_index].latitude,
                anchor_longitude: samples[start_index].longitude,
            })
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Found {} stationary segments of at least {:?}",
        segments.len(),
        opt.min_segment_duration
    );

    segments
}

/// Whether the mean step around the last sample is below the stationary threshold.
///
/// Unlike [`movement_states`] this ignores the dwell smoothing, so a vehicle that just
/// stopped is reported as stopped right away.
pub fn is_last_sample_stationary(samples: &[Sample], opt: &MovementOptions) -> bool {
    if samples.len() < 2 {
        return false;
    }

    let distances = step_distances(samples);
    let average = window_average(&distances, samples.len() - 1, opt.window_size);

    average < opt.stationary_distance_threshold
}

/// Stop the vehicle is currently in, if it is standing still right now.
pub fn current_stop(samples: &[Sample], opt: &MovementOptions) -> Option<StationarySegment> {
    ongoing_stop(samples, &stationary_segments(samples, opt), opt)
}

/// Same as [`current_stop`] for `segments` already found by [`stationary_segments`].
pub fn ongoing_stop(
    samples: &[Sample],
    segments: &[StationarySegment],
    opt: &MovementOptions,
) -> Option<StationarySegment> {
    if !is_last_sample_stationary(samples, opt) {
        return None;
    }

    segments
        .last()
        .filter(|this| this.end_index + 1 == samples.len())
        .cloned()
}

/// Maximal runs of `state` as inclusive `(start, end)` index pairs.
pub(crate) fn runs(
    states: &[MovementState],
    state: MovementState,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut index = 0;

    std::iter::from_fn(move || {
        while index < states.len() && states[index] != state {
            index += 1;
        }

        if index >= states.len() {
            return None;
        }

        let start = index;
        while index < states.len() && states[index] == state {
            index += 1;
        }

        Some((start, index - 1))
    })
}

fn classify(average: f64, opt: &MovementOptions) -> Option<MovementState> {
    if average < opt.stationary_distance_threshold {
        return Some(MovementState::Stationary);
    }

    if average > opt.moving_distance_threshold {
        return Some(MovementState::Moving);
    }

    None
}

fn step_distances(samples: &[Sample]) -> Vec<f64> {
    samples
        .windows(2)
        .map(|this| distance(&this[0], &this[1]))
        .collect()
}

/// Mean of `distances` in a window centered on `index`, clamped to the slice.
fn window_average(distances: &[f64], index: usize, window_size: usize) -> f64 {
    let Some(last) = distances.len().checked_sub(1) else {
        return 0.0;
    };

    let half = window_size / 2;
    let end = (index + half).min(last);
    let start = index.saturating_sub(half).min(end);

    let window = &distances[start..=end];

    window.iter().sum::<f64>() / window.len() as f64
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::fixtures::{MOVEMENT, parked_drive_parked, track};

    use crate::MovementState::{Moving, Stationary};

    fn scenario_options() -> MovementOptions {
        MOVEMENT
    }

    #[test]
    fn test_too_short_input() {
        let data = track([0.0, 50.0], 0, 30);

        assert!(movement_states(&data, &scenario_options()).is_empty());
        assert!(stationary_segments(&data, &scenario_options()).is_empty());
        assert!(movement_states(&[], &scenario_options()).is_empty());
    }

    #[test]
    fn labels_parked_drive_parked() {
        let states = movement_states(&parked_drive_parked(), &scenario_options());

        let mut expected = vec![Stationary; 6];
        expected.extend([Moving; 10]);
        expected.extend([Stationary; 4]);

        assert_eq!(states, expected);
    }

    #[test]
    fn segments_parked_drive_parked() {
        let data = parked_drive_parked();

        let segments = stationary_segments(&data, &scenario_options());

        assert_eq!(segments.len(), 2);

        assert_eq!((segments[0].start_index, segments[0].end_index), (0, 5));
        assert_eq!(segments[0].duration, Duration::from_secs(150));
        assert_eq!(segments[0].anchor_latitude, data[0].latitude);
        assert_eq!(segments[0].anchor_longitude, data[0].longitude);

        assert_eq!((segments[1].start_index, segments[1].end_index), (16, 19));
        assert_eq!(segments[1].duration, Duration::from_secs(90));
        assert_eq!(segments[1].anchor_latitude, data[16].latitude);
    }

    #[test]
    fn short_stop_is_not_a_segment() {
        let data = parked_drive_parked();
        let opt = scenario_options().set_min_segment_duration(Duration::from_secs(120));

        let segments = stationary_segments(&data, &opt);

        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].start_index, segments[0].end_index), (0, 5));
    }

    #[test]
    fn isolated_outlier_does_not_flip_state() {
        // Parked, fixes every 10 seconds, one fix 90 m off at index 4 (before the dwell elapsed)
        let mut offsets = vec![0.0; 20];
        offsets[4] = 90.0;
        let data = track(offsets, 0, 10);

        let states = movement_states(&data, &scenario_options());

        assert_eq!(states, vec![Stationary; 20]);
    }

    #[test]
    fn switch_waits_for_dwell() {
        // Arrives with one long step, then stands still. Stationary is accepted
        // only 90 seconds after the moving state began
        let data = track([0.0, 50.0, 50.0, 50.5, 50.0, 50.5], 0, 30);
        let opt = scenario_options().set_window_size(1);

        let states = movement_states(&data, &opt);

        assert_eq!(
            states,
            vec![Moving, Moving, Moving, Stationary, Stationary, Stationary]
        );
    }

    #[test]
    fn switches_once_dwell_elapsed() {
        let data = track([0.0, 0.5, 0.0, 0.5, 50.0, 100.0, 150.0], 0, 30);
        let opt = scenario_options().set_window_size(1);

        let states = movement_states(&data, &opt);

        assert_eq!(
            states,
            vec![Stationary, Stationary, Stationary, Moving, Moving, Moving, Moving]
        );
    }

    #[test]
    fn band_keeps_current_state() {
        // 15 m steps are between thresholds, the vehicle stays parked
        let data = track([0.0, 1.0, 0.0, 15.0, 30.0, 45.0], 0, 30);
        let opt = scenario_options().set_window_size(1);

        let states = movement_states(&data, &opt);

        assert_eq!(states, vec![Stationary; 6]);
    }

    #[test]
    fn first_sample_in_band_is_moving() {
        let data = track([0.0, 15.0, 30.0, 45.0], 0, 30);
        let opt = scenario_options().set_window_size(1);

        assert_eq!(movement_states(&data, &opt), vec![Moving; 4]);
    }

    #[test]
    fn window_is_clamped_at_the_edges() {
        let distances = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(window_average(&distances, 0, 3), 1.5);
        assert_eq!(window_average(&distances, 2, 3), 3.0);
        assert_eq!(window_average(&distances, 4, 3), 4.0);
        assert_eq!(window_average(&distances, 4, 1), 4.0);
        assert_eq!(window_average(&distances, 4, 5), 3.5);
        assert_eq!(window_average(&distances, 1, 0), 2.0);
        assert_eq!(window_average(&[], 0, 3), 0.0);
    }

    #[test]
    fn runs_of_state() {
        let states = [Moving, Stationary, Stationary, Moving, Stationary];

        let stationary = runs(&states, Stationary).collect::<Vec<_>>();
        let moving = runs(&states, Moving).collect::<Vec<_>>();

        assert_eq!(stationary, vec![(1, 2), (4, 4)]);
        assert_eq!(moving, vec![(0, 0), (3, 3)]);
    }

    #[test]
    fn current_stop_when_parked_at_the_end() {
        let data = parked_drive_parked();

        let stop = current_stop(&data, &scenario_options()).expect("parked at the end");

        assert_eq!((stop.start_index, stop.end_index), (16, 19));
        assert!(is_last_sample_stationary(&data, &scenario_options()));
    }

    #[test]
    fn no_current_stop_while_driving() {
        let mut data = parked_drive_parked();
        data.truncate(14);

        assert!(!is_last_sample_stationary(&data, &scenario_options()));
        assert_eq!(current_stop(&data, &scenario_options()), None);
    }

    #[test]
    fn ongoing_stop_reuses_found_segments() {
        for len in [20, 18, 14] {
            let mut data = parked_drive_parked();
            data.truncate(len);

            let segments = stationary_segments(&data, &scenario_options());

            assert_eq!(
                ongoing_stop(&data, &segments, &scenario_options()),
                current_stop(&data, &scenario_options())
            );
        }

        let data = parked_drive_parked();
        let segments = stationary_segments(&data, &scenario_options());

        assert_eq!(
            ongoing_stop(&data, &segments, &scenario_options()),
            segments.last().cloned()
        );
        assert_eq!(ongoing_stop(&data, &[], &scenario_options()), None);
    }

    #[test]
    fn just_stopped_is_not_an_earlier_stop() {
        // Stopped one sample ago: the window says stationary, the dwell still says moving
        let mut data = parked_drive_parked();
        data.truncate(18);

        assert!(is_last_sample_stationary(&data, &scenario_options()));
        assert_eq!(stationary_segments(&data, &scenario_options()).len(), 1);
        assert_eq!(current_stop(&data, &scenario_options()), None);
    }
}
