mod wcif;
mod registry;

use serde::{Deserializer, Deserialize, Serializer};
use serde::de::Error;
pub use wcif::*;
pub use registry::*;

pub use chrono::{NaiveDateTime as DateTime, NaiveDate as Date};

/// WCIF timestamps are UTC and always carry a trailing `Z`.
fn de_date_time<'de, D>(deserializer: D) -> std::result::Result<DateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    match s.strip_suffix('Z') {
        Some(naive) => naive.parse::<DateTime>().map_err(D::Error::custom),
        None => Err(D::Error::custom(format!("expected a UTC timestamp ending in 'Z', got {s}")))
    }
}

fn ser_date_time<S>(date_time: &DateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer
{
    serializer.serialize_str(&format!("{}Z", date_time.format("%Y-%m-%dT%H:%M:%S%.f")))
}
