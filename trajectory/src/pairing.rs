//! Pairing of raw feed records into [`Sample`]s.
//!
//! The tracker feed delivers latitude and longitude as separate records sharing a
//! timestamp:
//!
//! ```notrust
//! time,PN,value
//! 2024-05-01 08:00:00,lat,30.835
//! 2024-05-01 08:00:00,lon,104.417
//! ```
//!
//! Timestamps are UTC. Records of other channels are ignored.

use std::collections::BTreeMap;

use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, Result, Sample};

const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const LATITUDE: &str = "lat";
const LONGITUDE: &str = "lon";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawRecord {
    pub time: String,
    /// Channel name, `lat` or `lon`
    #[cfg_attr(feature = "serde", serde(rename = "PN"))]
    pub channel: String,
    pub value: String,
}

#[derive(Debug, Default)]
struct Pair {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Pair latitude and longitude records by timestamp.
///
/// Timestamps with only one of the two coordinates are dropped. The result is sorted by
/// timestamp in asc order.
pub fn pair_records(records: impl IntoIterator<Item = RawRecord>) -> Result<Vec<Sample>> {
    let mut pairs = BTreeMap::<PrimitiveDateTime, Pair>::new();

    for RawRecord {
        time,
        channel,
        value,
    } in records
    {
        let channel = match channel.trim() {
            LATITUDE => LATITUDE,
            LONGITUDE => LONGITUDE,
            _ => continue,
        };

        let timestamp = parse_time(&time)?;
        let coordinate = parse_coordinate(channel, &value, &time)?;

        let pair = pairs.entry(timestamp).or_default();
        match channel {
            LATITUDE => pair.latitude = Some(coordinate),
            _ => pair.longitude = Some(coordinate),
        }
    }

    let total = pairs.len();

    let samples = pairs
        .into_iter()
        .filter_map(|(time, pair)| match (pair.latitude, pair.longitude) {
            (Some(latitude), Some(longitude)) => Some((time, latitude, longitude)),
            _ => None,
        })
        .map(|(time, latitude, longitude)| {
            let since_epoch = time.assume_utc() - OffsetDateTime::UNIX_EPOCH;
            let timestamp = std::time::Duration::try_from(since_epoch)
                .map_err(|_| Error::BeforeEpoch(time.to_string()))?;

            Ok(Sample::new(latitude, longitude, timestamp))
        })
        .collect::<Result<Vec<_>>>()?;

    if samples.len() < total {
        log::debug!(
            "Dropped {} timestamps without both coordinates",
            total - samples.len()
        );
    }

    Ok(samples)
}

fn parse_time(value: &str) -> Result<PrimitiveDateTime> {
    PrimitiveDateTime::parse(value.trim(), TIME_FORMAT).map_err(|source| Error::InvalidTimestamp {
        value: value.to_owned(),
        source,
    })
}

fn parse_coordinate(channel: &'static str, value: &str, time: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|this| this.is_finite())
        .ok_or_else(|| Error::InvalidCoordinate {
            channel,
            value: value.to_owned(),
            time: time.to_owned(),
        })
}
