//! Bar timeframe resolutions supported by the store.
//!
//! A [`Timeframe`] names one of the fixed bar tables. The enum doubles as
//! the table-name allow-set: only these variants can ever be interpolated
//! into a query, so caller-supplied strings are forced through [`FromStr`]
//! before they reach any SQL.

use std::{fmt, str::FromStr};

use crate::error::StoreError;

/// Supported bar window resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    /// 1-minute bars (`bars_1m`).
    M1,
    /// 5-minute bars (`bars_5m`).
    M5,
    /// 15-minute bars (`bars_15m`).
    M15,
}

impl Timeframe {
    /// All supported resolutions, smallest first.
    pub const ALL: [Timeframe; 3] = [Timeframe::M1, Timeframe::M5, Timeframe::M15];

    /// The bar table backing this resolution.
    pub const fn table(self) -> &'static str {
        match self {
            Timeframe::M1 => "bars_1m",
            Timeframe::M5 => "bars_5m",
            Timeframe::M15 => "bars_15m",
        }
    }

    /// Bar window length in seconds.
    pub const fn seconds(self) -> i64 {
        match self {
            Timeframe::M1 => 60,
            Timeframe::M5 => 300,
            Timeframe::M15 => 900,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Timeframe {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Timeframe::M1),
            "5m" => Ok(Timeframe::M5),
            "15m" => Ok(Timeframe::M15),
            other => Err(StoreError::Validation(format!(
                "unsupported timeframe: {other} (expected one of 1m, 5m, 15m)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn unsupported_resolution_is_rejected() {
        for bad in ["1h", "30m", "", "bars_1m; DROP TABLE bars_1m"] {
            assert!(matches!(
                bad.parse::<Timeframe>(),
                Err(StoreError::Validation(_))
            ));
        }
    }

    #[test]
    fn table_names_match_resolutions() {
        assert_eq!(Timeframe::M1.table(), "bars_1m");
        assert_eq!(Timeframe::M5.table(), "bars_5m");
        assert_eq!(Timeframe::M15.table(), "bars_15m");
        assert_eq!(Timeframe::M5.seconds(), 300);
    }
}
