//! Airport identifier types.

use std::fmt;

/// Error returned when parsing an invalid IATA code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IATA code: {reason}")]
pub struct InvalidIata {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA location codes are always 3 uppercase ASCII letters. This type
/// guarantees that any `IataCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use flight_search::domain::IataCode;
///
/// let lhr = IataCode::parse("LHR").unwrap();
/// assert_eq!(lhr.as_str(), "LHR");
///
/// // Lowercase is rejected
/// assert!(IataCode::parse("lhr").is_err());
///
/// // Wrong length is rejected
/// assert!(IataCode::parse("LH").is_err());
/// assert!(IataCode::parse("LHRX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IataCode([u8; 3]);

impl IataCode {
    /// Parse an IATA code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidIata> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidIata {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidIata {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(IataCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only valid ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iata({})", self.as_str())
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to an airport as published by the lookup source.
///
/// The `id` is the airport's unique integer identity; the `code` is the
/// IATA code used as join and display key. Airport references are
/// immutable once read from the lookup source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AirportRef {
    /// Unique integer identity of the airport.
    pub id: i64,

    /// IATA code, unique across the dataset.
    pub code: IataCode,

    /// Human-readable airport name.
    pub name: String,
}

impl AirportRef {
    /// Create a new airport reference.
    pub fn new(id: i64, code: IataCode, name: impl Into<String>) -> Self {
        Self {
            id,
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for AirportRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(IataCode::parse("LHR").is_ok());
        assert!(IataCode::parse("JFK").is_ok());
        assert!(IataCode::parse("AAA").is_ok());
        assert!(IataCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(IataCode::parse("lhr").is_err());
        assert!(IataCode::parse("Lhr").is_err());
        assert!(IataCode::parse("LHr").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(IataCode::parse("").is_err());
        assert!(IataCode::parse("L").is_err());
        assert!(IataCode::parse("LH").is_err());
        assert!(IataCode::parse("LHRX").is_err());
        assert!(IataCode::parse("HEATHROW").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(IataCode::parse("L1R").is_err());
        assert!(IataCode::parse("L-R").is_err());
        assert!(IataCode::parse("L R").is_err());
        assert!(IataCode::parse("LÖR").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let code = IataCode::parse("LHR").unwrap();
        assert_eq!(code.as_str(), "LHR");
    }

    #[test]
    fn display_and_debug() {
        let code = IataCode::parse("JFK").unwrap();
        assert_eq!(format!("{}", code), "JFK");
        assert_eq!(format!("{:?}", code), "Iata(JFK)");
    }

    #[test]
    fn equality_and_hash() {
        use std::collections::HashSet;

        let a = IataCode::parse("LHR").unwrap();
        let b = IataCode::parse("LHR").unwrap();
        let c = IataCode::parse("JFK").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn airport_ref_display() {
        let code = IataCode::parse("LHR").unwrap();
        let airport = AirportRef::new(1, code, "Heathrow");
        assert_eq!(format!("{}", airport), "LHR Heathrow");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid IATA codes: 3 uppercase ASCII letters
    fn valid_iata_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z]{3}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_iata_string()) {
            let code = IataCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Any valid code can be parsed
        #[test]
        fn valid_always_parses(s in valid_iata_string()) {
            prop_assert!(IataCode::parse(&s).is_ok());
        }

        /// Lowercase codes are always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z]{3}") {
            prop_assert!(IataCode::parse(&s).is_err());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(IataCode::parse(&s).is_err());
        }

        /// Strings containing digits are rejected
        #[test]
        fn digits_rejected(s in "[A-Z0-9]{3}".prop_filter("has digit", |s| s.chars().any(|c| c.is_ascii_digit()))) {
            prop_assert!(IataCode::parse(&s).is_err());
        }
    }
}
