//! Service calendar categories.

use std::fmt;
use std::str::FromStr;

/// Error returned for a day code outside 1..=3.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day code: {0} (expected 1, 2 or 3)")]
pub struct InvalidDayCode(pub String);

/// Which timetable applies: weekday, Saturday, or Sunday/holiday.
///
/// Callers identify a day type by a small integer code (1/2/3); the
/// upstream API uses the uppercase names.
///
/// # Examples
///
/// ```
/// use bus_server::domain::DayType;
///
/// assert_eq!(DayType::from_code(2).unwrap(), DayType::Saturday);
/// assert_eq!(DayType::Saturday.as_str(), "SATURDAY");
/// assert!(DayType::from_code(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    /// Map the caller-facing integer code to a day type.
    pub fn from_code(code: u8) -> Result<Self, InvalidDayCode> {
        match code {
            1 => Ok(DayType::Weekday),
            2 => Ok(DayType::Saturday),
            3 => Ok(DayType::Sunday),
            other => Err(InvalidDayCode(other.to_string())),
        }
    }

    /// Parse a caller-supplied code that may not even be numeric.
    pub fn parse_code(s: &str) -> Result<Self, InvalidDayCode> {
        let code: u8 = s
            .trim()
            .parse()
            .map_err(|_| InvalidDayCode(s.to_string()))?;
        Self::from_code(code)
    }

    /// The caller-facing integer code.
    pub fn code(&self) -> u8 {
        match self {
            DayType::Weekday => 1,
            DayType::Saturday => 2,
            DayType::Sunday => 3,
        }
    }

    /// The name used by the upstream API and in fallback keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "WEEKDAY",
            DayType::Saturday => "SATURDAY",
            DayType::Sunday => "SUNDAY",
        }
    }
}

impl FromStr for DayType {
    type Err = InvalidDayCode;

    /// Parse the upstream name (`WEEKDAY`, `SATURDAY`, `SUNDAY`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEEKDAY" => Ok(DayType::Weekday),
            "SATURDAY" => Ok(DayType::Saturday),
            "SUNDAY" => Ok(DayType::Sunday),
            other => Err(InvalidDayCode(other.to_string())),
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_day_types() {
        assert_eq!(DayType::from_code(1).unwrap(), DayType::Weekday);
        assert_eq!(DayType::from_code(2).unwrap(), DayType::Saturday);
        assert_eq!(DayType::from_code(3).unwrap(), DayType::Sunday);
    }

    #[test]
    fn reject_unknown_codes() {
        assert!(DayType::from_code(0).is_err());
        assert!(DayType::from_code(4).is_err());
        assert!(DayType::parse_code("weekday").is_err());
        assert!(DayType::parse_code("").is_err());
        assert!(DayType::parse_code("-1").is_err());
    }

    #[test]
    fn parse_code_trims() {
        assert_eq!(DayType::parse_code(" 3 ").unwrap(), DayType::Sunday);
    }

    #[test]
    fn upstream_names() {
        for day in [DayType::Weekday, DayType::Saturday, DayType::Sunday] {
            assert_eq!(day.as_str().parse::<DayType>().unwrap(), day);
            assert_eq!(DayType::from_code(day.code()).unwrap(), day);
        }
        assert!("weekday".parse::<DayType>().is_err());
    }

    #[test]
    fn error_display() {
        let err = DayType::from_code(7).unwrap_err();
        assert_eq!(err.to_string(), "invalid day code: 7 (expected 1, 2 or 3)");
    }
}
