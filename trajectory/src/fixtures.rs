//! Synthetic samples for tests. Positions are offsets north of a fixed yard origin so
//! the distance between two samples equals the difference of their offsets.

use std::time::Duration;

use crate::{
    DriftOptions, MovementOptions, Options, Sample, SimplifyOptions, TripOptions,
    geometry::EARTH_RADIUS_M,
};

pub const ORIGIN_LATITUDE: f64 = 30.835;
pub const ORIGIN_LONGITUDE: f64 = 104.417;

/// Electric carts in a factory yard reporting every 30 seconds
pub const DRIFT: DriftOptions = DriftOptions::new(40.0, 3.0, 120.0);
pub const MOVEMENT: MovementOptions = MovementOptions::new(
    3,
    10.0,
    20.0,
    Duration::from_secs(90),
    Duration::from_secs(60),
);
pub const TRIP: TripOptions = TripOptions::new(Duration::from_secs(60), Duration::from_secs(30));
pub const SIMPLIFY: SimplifyOptions = SimplifyOptions::new(5.0);
pub const OPTIONS: Options = Options::new(DRIFT, MOVEMENT, TRIP, SIMPLIFY);

/// Sample `north` meters north and `east` meters east of the origin at second `secs`.
pub fn position(north: f64, east: f64, secs: u64) -> Sample {
    let parallel_radius = EARTH_RADIUS_M * ORIGIN_LATITUDE.to_radians().cos();

    Sample::new(
        ORIGIN_LATITUDE + (north / EARTH_RADIUS_M).to_degrees(),
        ORIGIN_LONGITUDE + (east / parallel_radius).to_degrees(),
        Duration::from_secs(secs),
    )
}

/// Sample `meters` north of the origin at second `secs`.
pub fn north(meters: f64, secs: u64) -> Sample {
    position(meters, 0.0, secs)
}

/// Offsets north sampled every `interval` seconds starting at `start`.
pub fn track(offsets: impl IntoIterator<Item = f64>, start: u64, interval: u64) -> Vec<Sample> {
    offsets
        .into_iter()
        .enumerate()
        .map(|(i, meters)| north(meters, start + i as u64 * interval))
        .collect()
}

/// Parked for 6 samples, 10 steps of 25 m, parked again for 4 samples. 30 seconds apart.
pub fn parked_drive_parked() -> Vec<Sample> {
    let mut offsets = vec![0.0, 1.0, 0.5, 1.5, 0.0, 1.0];
    offsets.extend((1..=10).map(|step| 1.0 + 25.0 * step as f64));
    offsets.extend([276.0, 277.0, 276.5, 277.5]);

    track(offsets, 0, 30)
}
