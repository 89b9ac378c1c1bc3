//! Time zone model for a city's coordinates

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Time zone information for a set of coordinates at a given timestamp
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeZoneInfo {
    /// IANA time zone id (e.g. "Europe/Warsaw")
    pub timezone_id: String,
    /// Human-readable time zone name
    pub timezone_name: String,
    /// Offset from UTC in seconds, excluding DST
    pub raw_offset_seconds: i32,
    /// Additional DST offset in seconds at the queried timestamp
    pub dst_offset_seconds: i32,
}

impl TimeZoneInfo {
    /// Total offset from UTC in seconds at the queried timestamp
    #[must_use]
    pub fn total_offset_seconds(&self) -> i32 {
        self.raw_offset_seconds + self.dst_offset_seconds
    }

    /// Total offset as a chrono `FixedOffset`, if within the valid range
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.total_offset_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_offset_with_dst() {
        let tz = TimeZoneInfo {
            timezone_id: "Europe/Warsaw".to_string(),
            timezone_name: "Central European Summer Time".to_string(),
            raw_offset_seconds: 3600,
            dst_offset_seconds: 3600,
        };
        assert_eq!(tz.total_offset_seconds(), 7200);
        assert_eq!(tz.utc_offset(), FixedOffset::east_opt(7200));
    }

    #[test]
    fn test_invalid_offset_is_none() {
        let tz = TimeZoneInfo {
            timezone_id: "Bogus".to_string(),
            timezone_name: "Bogus".to_string(),
            raw_offset_seconds: 100_000,
            dst_offset_seconds: 0,
        };
        assert!(tz.utc_offset().is_none());
    }
}
