//! Unified court case number.
//!
//! A case number is exactly 20 digits, displayed as
//! `NNNNNNN-DD.AAAA.J.TR.OOOO` (sequence, check digits, filing year, judicial
//! segment, court, origin unit). It is stored digits-only and formatted only
//! for display.

use std::fmt;

use thiserror::Error;

/// Number of digits in a case number.
pub const CASE_NUMBER_DIGITS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseNumberError {
    #[error("case number must contain only digits and separators")]
    InvalidCharacter,

    #[error("case number must have exactly {CASE_NUMBER_DIGITS} digits, got {0}")]
    WrongLength(usize),
}

/// A validated, digits-only case number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseNumber(String);

impl CaseNumber {
    /// Parse a case number, accepting either the bare digits or the display
    /// form. Dots, dashes, and whitespace are stripped.
    ///
    /// # Errors
    ///
    /// Returns `CaseNumberError::InvalidCharacter` for any other character and
    /// `CaseNumberError::WrongLength` unless exactly 20 digits remain.
    pub fn parse(raw: &str) -> Result<Self, CaseNumberError> {
        let mut digits = String::with_capacity(CASE_NUMBER_DIGITS);
        for c in raw.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | '-' => {}
                c if c.is_whitespace() => {}
                _ => return Err(CaseNumberError::InvalidCharacter),
            }
        }
        if digits.len() != CASE_NUMBER_DIGITS {
            return Err(CaseNumberError::WrongLength(digits.len()));
        }
        Ok(Self(digits))
    }

    /// The stored, digits-only representation.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_digits(self) -> String {
        self.0
    }

    /// Display form `NNNNNNN-DD.AAAA.J.TR.OOOO`.
    #[must_use]
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!(
            "{}-{}.{}.{}.{}.{}",
            &d[0..7],
            &d[7..9],
            &d[9..13],
            &d[13..14],
            &d[14..16],
            &d[16..20]
        )
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_bare_digits() {
        let n = CaseNumber::parse("00012345620238260100").unwrap();
        assert_eq!(n.digits(), "00012345620238260100");
    }

    #[test]
    fn parses_display_form_and_stores_digits() {
        let n = CaseNumber::parse("0001234-56.2023.8.26.0100").unwrap();
        assert_eq!(n.digits(), "00012345620238260100");
        assert_eq!(n.formatted(), "0001234-56.2023.8.26.0100");
    }

    #[rstest]
    #[case("0001234562023826010", 19)]
    #[case("000123456202382601000", 21)]
    #[case("", 0)]
    #[case("0001234-56.2023.8.26", 16)]
    fn rejects_wrong_digit_count(#[case] raw: &str, #[case] count: usize) {
        assert_eq!(
            CaseNumber::parse(raw),
            Err(CaseNumberError::WrongLength(count))
        );
    }

    #[test]
    fn rejects_letters() {
        assert_eq!(
            CaseNumber::parse("0001234-5X.2023.8.26.0100"),
            Err(CaseNumberError::InvalidCharacter)
        );
    }
}
