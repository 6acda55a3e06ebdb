//! Trajectory simplification.
//!
//! With a 30 second interval a parked vehicle produces dozens of fixes within a few
//! meters. Dropping points closer than [`SimplifyOptions::min_distance`] to the last
//! kept one leaves the actual path.

use crate::{DriftOptions, Sample, SimplifyOptions, drift::filter_drift, geometry::distance};

/// Drift filter followed by minimal spacing. First and last samples are always kept.
pub fn simplify(samples: &[Sample], drift: &DriftOptions, opt: &SimplifyOptions) -> Vec<Sample> {
    if samples.len() <= 2 {
        return samples.to_vec();
    }

    let filtered = filter_drift(samples, drift);

    let (Some(first), Some(last)) = (filtered.first(), filtered.last()) else {
        return filtered;
    };

    if filtered.len() <= 2 {
        return filtered;
    }

    let mut kept = vec![*first];

    for sample in &filtered[1..filtered.len() - 1] {
        let previous = kept.last().unwrap_or(first);

        if distance(previous, sample) >= opt.min_distance {
            kept.push(*sample);
        }
    }

    kept.push(*last);

    log::debug!(
        "Simplified {} samples to {} ({} after drift filter)",
        samples.len(),
        kept.len(),
        filtered.len()
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DRIFT, parked_drive_parked, position, track};

    fn spacing(meters: f64) -> SimplifyOptions {
        SimplifyOptions::new(meters)
    }

    #[test]
    fn test_short_input_passes_through() {
        let data = track([0.0, 0.1], 0, 30);

        assert_eq!(simplify(&data, &DRIFT, &spacing(5.0)), data);
        assert!(simplify(&[], &DRIFT, &spacing(5.0)).is_empty());
    }

    #[test]
    fn collapses_parked_clusters() {
        let data = parked_drive_parked();

        let simplified = simplify(&data, &DRIFT, &spacing(5.0));

        let kept = simplified
            .iter()
            .map(|this| data.iter().position(|original| original == this))
            .collect::<Option<Vec<_>>>()
            .expect("only original samples");

        assert_eq!(kept, vec![0, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 19]);
    }

    #[test]
    fn keeps_endpoints_even_when_close() {
        let data = track([0.0, 1.0, 2.0, 3.0, 4.0], 0, 30);

        let simplified = simplify(&data, &DRIFT, &spacing(5.0));

        assert_eq!(simplified, vec![data[0], data[4]]);
    }

    #[test]
    fn spacing_holds_between_interior_points() {
        let data = (0..60)
            .map(|i| {
                let i = i as f64;
                position(i * 3.7 + (i * 1.3).sin() * 2.0, (i * 0.7).cos() * 4.0, i as u64 * 10)
            })
            .collect::<Vec<_>>();

        let min_distance = 6.0;
        let simplified = simplify(&data, &DRIFT, &spacing(min_distance));

        assert!(simplified.len() <= data.len());
        assert_eq!(simplified.first(), data.first());
        assert_eq!(simplified.last(), data.last());

        let last = simplified.len() - 1;
        for (i, pair) in simplified.windows(2).enumerate() {
            let touches_endpoint = i == 0 || i + 1 == last;
            assert!(touches_endpoint || distance(&pair[0], &pair[1]) >= min_distance);
        }

        assert!(
            simplified
                .windows(2)
                .all(|pair| pair[0].timestamp < pair[1].timestamp)
        );
    }

    #[test]
    fn removes_drift_first() {
        // 600 m spike in the middle of a slow drive
        let data = track([0.0, 10.0, 20.0, 620.0, 30.0, 40.0], 0, 30);

        let simplified = simplify(&data, &DRIFT, &spacing(5.0));

        assert!(!simplified.contains(&data[3]));
        assert_eq!(simplified.len(), 5);
    }
}
