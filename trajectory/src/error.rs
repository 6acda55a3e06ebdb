use thiserror::Error;

/// Errors of turning raw feed records into [`crate::Sample`]s
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid timestamp `{value}`: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("Timestamp `{0}` is before the unix epoch")]
    BeforeEpoch(String),

    #[error("Invalid {channel} value `{value}` at {time}")]
    InvalidCoordinate {
        channel: &'static str,
        value: String,
        time: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
