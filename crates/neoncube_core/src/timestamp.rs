use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Moment a shuffle was generated.
///
/// The timestamp is hashed together with the seed of [`crate::ScrambleParams`],
/// so it is kept at millisecond precision and printed in RFC 3339 form to let
/// the `scramble` command reproduce a shuffle from its printed parameters.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub DateTime<Utc>);
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rfc3339 = self.0.to_rfc3339_opts(SecondsFormat::Millis, true);
        f.write_str(&rfc3339)
    }
}
impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> chrono::ParseResult<Self> {
        let time: DateTime<Utc> = s.parse()?;
        Ok(Self(time.trunc_subsecs(3)))
    }
}
impl Timestamp {
    /// Returns the current time from the system clock, truncated to whole
    /// milliseconds.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(3))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ScrambleParams;

    #[test]
    fn test_timestamp_display() {
        let t: Timestamp = "2026-10-16T12:34:56.789Z".parse().unwrap();
        assert_eq!(t.to_string(), "2026-10-16T12:34:56.789Z");

        // Sub-millisecond precision and offsets are normalized away.
        let t: Timestamp = "2026-10-16T14:34:56.789123+02:00".parse().unwrap();
        assert_eq!(t.to_string(), "2026-10-16T12:34:56.789Z");

        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_printed_timestamp_reproduces_shuffle() {
        let params = ScrambleParams::new(20);
        let mut reparsed = params.clone();
        reparsed.time = params.time.to_string().parse().unwrap();
        assert_eq!(reparsed.time, params.time);
        assert_eq!(reparsed.generate(), params.generate());
    }
}
