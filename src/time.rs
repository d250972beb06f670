use std::fmt;

use log::warn;
use ::time::{macros::format_description, OffsetDateTime};

/// When the report's data was fetched. Shown in local time where the
/// offset is known, UTC otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|e| {
            warn!("couldn't determine local offset, using UTC: {e}");
            OffsetDateTime::now_utc()
        });

        Self(now)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(dt: OffsetDateTime) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

        match self.0.format(format) {
            Ok(s) => write!(fmt, "{}", s),
            Err(_) => write!(fmt, "{}", self.0.unix_timestamp()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ::time::macros::datetime;

    #[test]
    fn display() {
        let ts = Timestamp::from(datetime!(2019-06-03 09:05:07 UTC));

        assert_eq!(ts.to_string(), "2019-06-03 09:05:07");
    }
}
