//! Phone number formatting
//!
//! Dialing codes offered by the form and the digit grouping used to display
//! a number under each code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dialing codes selectable in the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    #[default]
    #[serde(rename = "+420")]
    Czechia,
    #[serde(rename = "+421")]
    Slovakia,
    #[serde(rename = "+43")]
    Austria,
    #[serde(rename = "+49")]
    Germany,
    #[serde(rename = "+44")]
    UnitedKingdom,
    #[serde(rename = "+48")]
    Poland,
}

impl CountryCode {
    /// Order matches the select box of the form
    pub const ALL: [CountryCode; 6] = [
        CountryCode::Czechia,
        CountryCode::Slovakia,
        CountryCode::Austria,
        CountryCode::Germany,
        CountryCode::UnitedKingdom,
        CountryCode::Poland,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CountryCode::Czechia => "+420",
            CountryCode::Slovakia => "+421",
            CountryCode::Austria => "+43",
            CountryCode::Germany => "+49",
            CountryCode::UnitedKingdom => "+44",
            CountryCode::Poland => "+48",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountryCode::Czechia => "+420 (Česko)",
            CountryCode::Slovakia => "+421 (Slovensko)",
            CountryCode::Austria => "+43 (Rakousko)",
            CountryCode::Germany => "+49 (Německo)",
            CountryCode::UnitedKingdom => "+44 (Velká Británie)",
            CountryCode::Poland => "+48 (Polsko)",
        }
    }

    /// Re-groups `raw` under this dialing code
    pub fn format(&self, raw: &str) -> String {
        format_phone(self.code(), raw)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CountryCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = if trimmed.starts_with('+') {
            trimmed.to_string()
        } else {
            format!("+{}", trimmed)
        };
        CountryCode::ALL
            .iter()
            .copied()
            .find(|cc| cc.code() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = CountryCode::ALL.iter().map(|cc| cc.code()).collect();
                format!("Unknown dialing code: {}. Use one of {}", s, known.join(", "))
            })
    }
}

/// Digit group sizes, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingPattern(&'static [usize]);

impl GroupingPattern {
    pub const THREE_THREE_THREE: GroupingPattern = GroupingPattern(&[3, 3, 3]);
    pub const FIVE_FIVE: GroupingPattern = GroupingPattern(&[5, 5]);
    pub const THREE_TWO_THREE: GroupingPattern = GroupingPattern(&[3, 2, 3]);

    /// Pattern for a dialing code; unknown codes get 3-3-3
    pub fn for_code(country_code: &str) -> Self {
        match country_code {
            "+420" | "+421" | "+48" => Self::THREE_THREE_THREE,
            "+44" => Self::FIVE_FIVE,
            "+47" => Self::THREE_TWO_THREE,
            _ => Self::THREE_THREE_THREE,
        }
    }

    pub fn groups(&self) -> &'static [usize] {
        self.0
    }

    /// Number of digits the pattern can hold; the rest is dropped
    pub fn max_digits(&self) -> usize {
        self.0.iter().sum()
    }

    /// Splits `digits` into the pattern's groups joined by single spaces.
    ///
    /// Empty groups are omitted and a short trailing group is kept as is.
    pub fn apply(&self, digits: &str) -> String {
        let digits: Vec<char> = digits.chars().take(self.max_digits()).collect();
        let mut groups = Vec::with_capacity(self.0.len());
        let mut start = 0;

        for &size in self.0 {
            if start >= digits.len() {
                break;
            }
            let end = (start + size).min(digits.len());
            groups.push(digits[start..end].iter().collect::<String>());
            start = end;
        }

        groups.join(" ")
    }
}

/// Keeps ASCII digits only, in order
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats a phone number for display under the given dialing code.
///
/// Never fails; any input (including an empty string) yields a string.
pub fn format_phone(country_code: &str, raw: &str) -> String {
    GroupingPattern::for_code(country_code).apply(&digits_only(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_three_three_codes() {
        for cc in ["+420", "+421", "+48"] {
            assert_eq!(format_phone(cc, "123456789"), "123 456 789");
            assert_eq!(format_phone(cc, "12345"), "123 45");
        }
    }

    #[test]
    fn test_united_kingdom() {
        assert_eq!(format_phone("+44", "1234567890"), "12345 67890");
        assert_eq!(format_phone("+44", "1234"), "1234");
    }

    #[test]
    fn test_norway() {
        assert_eq!(format_phone("+47", "12345678"), "123 45 678");
        assert_eq!(format_phone("+47", "1234"), "123 4");
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(format_phone("+1", "123456789"), format_phone("+420", "123456789"));
        assert_eq!(format_phone("", "123456789"), "123 456 789");
        assert_eq!(format_phone("+49", "12345678"), "123 456 78");
    }

    #[test]
    fn test_strips_non_digits() {
        assert_eq!(format_phone("+420", "(123) 456-789"), "123 456 789");
        assert_eq!(format_phone("+420", "abc"), "");
        assert_eq!(format_phone("+420", "１２３"), "");
    }

    #[test]
    fn test_extra_digits_dropped() {
        assert_eq!(format_phone("+420", "1234567890123"), "123 456 789");
        assert_eq!(format_phone("+44", "123456789012"), "12345 67890");
        assert_eq!(format_phone("+47", "123456789"), "123 45 678");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_phone("+420", ""), "");
        assert_eq!(format_phone("+44", "   "), "");
    }

    #[test]
    fn test_reformat_is_idempotent() {
        let inputs = ["", "1", "12345", "123456789", "+420 777-888-999 12", "1234567890"];
        for cc in ["+420", "+421", "+43", "+44", "+47", "+48", "+1"] {
            for raw in inputs {
                let once = format_phone(cc, raw);
                assert_eq!(format_phone(cc, &once), once, "cc={} raw={:?}", cc, raw);
            }
        }
    }

    #[test]
    fn test_country_change_keeps_digits() {
        let czech = format_phone("+420", "123456789");
        let uk = format_phone("+44", &czech);
        assert_eq!(uk, "12345 6789");
        assert_eq!(digits_only(&uk), digits_only(&czech));
    }

    #[test]
    fn test_country_code_parse() {
        assert_eq!("+420".parse::<CountryCode>().unwrap(), CountryCode::Czechia);
        assert_eq!("44".parse::<CountryCode>().unwrap(), CountryCode::UnitedKingdom);
        assert!("+47".parse::<CountryCode>().is_err());
        assert_eq!(CountryCode::default().code(), "+420");
    }

    #[test]
    fn test_country_code_serde() {
        let json = serde_json::to_string(&CountryCode::Slovakia).unwrap();
        assert_eq!(json, "\"+421\"");
        let cc: CountryCode = serde_json::from_str("\"+48\"").unwrap();
        assert_eq!(cc, CountryCode::Poland);
    }
}
