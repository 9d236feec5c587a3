//! Letter grade model

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A letter grade on the ten-point scale
///
/// The unset state is not a variant; it is `Option<Grade>::None` wherever a
/// subject may be ungraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    /// Outstanding (10)
    O,
    /// Excellent (9)
    APlus,
    /// Very good (8)
    A,
    /// Good (7)
    BPlus,
    /// Above average (6)
    B,
    /// Satisfactory (5)
    C,
    /// Reappearance required (0)
    U,
    /// Absent / withheld (0)
    Ra,
}

impl Grade {
    /// All grades in legend order, best first
    pub const ALL: [Self; 8] = [
        Self::O,
        Self::APlus,
        Self::A,
        Self::BPlus,
        Self::B,
        Self::C,
        Self::U,
        Self::Ra,
    ];

    /// Grade points awarded for this grade
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::O => 10,
            Self::APlus => 9,
            Self::A => 8,
            Self::BPlus => 7,
            Self::B => 6,
            Self::C => 5,
            Self::U | Self::Ra => 0,
        }
    }

    /// The symbol printed on a grade sheet (e.g. "A+")
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::U => "U",
            Self::Ra => "RA",
        }
    }

    /// Whether this grade is a fail (zero points, credits still counted)
    #[must_use]
    pub const fn is_failing(self) -> bool {
        self.points() == 0
    }

    /// Parse an optional grade, where an empty string or "-" means unset
    ///
    /// # Errors
    /// Returns an error if the text is neither empty nor a known grade symbol.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, String> {
        match s.trim() {
            "" | "-" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

/// The fixed grade legend as `(grade, points)` pairs, best first
#[must_use]
pub fn grade_scale() -> Vec<(Grade, u8)> {
    Grade::ALL.iter().map(|g| (*g, g.points())).collect()
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "O" => Ok(Self::O),
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "U" => Ok(Self::U),
            "RA" => Ok(Self::Ra),
            _ => Err(format!(
                "Unknown grade: '{s}' (expected one of O, A+, A, B+, B, C, U, RA)"
            )),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        let points: Vec<u8> = Grade::ALL.iter().map(|g| g.points()).collect();
        assert_eq!(points, vec![10, 9, 8, 7, 6, 5, 0, 0]);
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("O".parse::<Grade>(), Ok(Grade::O));
        assert_eq!("a+".parse::<Grade>(), Ok(Grade::APlus));
        assert_eq!("B+".parse::<Grade>(), Ok(Grade::BPlus));
        assert_eq!("ra".parse::<Grade>(), Ok(Grade::Ra));
        assert!("D".parse::<Grade>().is_err());
        assert!("".parse::<Grade>().is_err());
    }

    #[test]
    fn test_display_matches_symbol() {
        for grade in Grade::ALL {
            assert_eq!(grade.to_string(), grade.symbol());
            assert_eq!(grade.symbol().parse::<Grade>(), Ok(grade));
        }
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Grade::parse_optional(""), Ok(None));
        assert_eq!(Grade::parse_optional(" - "), Ok(None));
        assert_eq!(Grade::parse_optional("A"), Ok(Some(Grade::A)));
        assert!(Grade::parse_optional("Z").is_err());
    }

    #[test]
    fn test_failing_grades() {
        assert!(Grade::U.is_failing());
        assert!(Grade::Ra.is_failing());
        assert!(!Grade::C.is_failing());
    }

    #[test]
    fn test_grade_scale_order() {
        let scale = grade_scale();
        assert_eq!(scale.len(), 8);
        assert_eq!(scale[0], (Grade::O, 10));
        assert_eq!(scale[7], (Grade::Ra, 0));
    }
}
