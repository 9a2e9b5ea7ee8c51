//! Brazilian postal codes (CEP).

use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Number of digits in a CEP.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Position of the dash in the masked form (`01001-000`).
const DASH_AFTER: usize = 5;

/// A complete 8-digit CEP, stored as digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Build from raw user input, ignoring anything that isn't a digit.
    ///
    /// Returns `None` until exactly 8 digits have been typed; extra digits
    /// are dropped the same way [`mask_postal_input`] drops them.
    pub fn from_input(raw: &str) -> Option<Self> {
        let digits = input_digits(raw);
        (digits.len() == POSTAL_CODE_DIGITS).then_some(Self(digits))
    }

    /// The 8 digits without separator, as sent to the lookup service.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Masked form, `01001-000`.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..DASH_AFTER], &self.0[DASH_AFTER..])
    }
}

impl FromStr for PostalCode {
    type Err = CommerceError;

    /// Accepts `01001000` or `01001-000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.split_once('-') {
            Some((head, tail)) if head.len() == DASH_AFTER => format!("{}{}", head, tail),
            Some(_) => return Err(CommerceError::InvalidPostalCode(s.to_string())),
            None => trimmed.to_string(),
        };

        if digits.len() == POSTAL_CODE_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(digits))
        } else {
            Err(CommerceError::InvalidPostalCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for PostalCode {
    type Error = CommerceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Mask postal-code input as it is typed.
///
/// Strips non-digits, keeps at most 8 digits and inserts a dash after the
/// fifth: `"01001000"` becomes `"01001-000"`, `"010"` stays `"010"`.
pub fn mask_postal_input(raw: &str) -> String {
    let digits = input_digits(raw);
    if digits.len() > DASH_AFTER {
        format!("{}-{}", &digits[..DASH_AFTER], &digits[DASH_AFTER..])
    } else {
        digits
    }
}

fn input_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(POSTAL_CODE_DIGITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask_postal_input("01001000"), "01001-000");
        assert_eq!(mask_postal_input("010"), "010");
        assert_eq!(mask_postal_input("01001"), "01001");
        assert_eq!(mask_postal_input("010010"), "01001-0");
        assert_eq!(mask_postal_input("ab01.001-000xyz"), "01001-000");
        assert_eq!(mask_postal_input("0100100099"), "01001-000");
        assert_eq!(mask_postal_input(""), "");
    }

    #[test]
    fn test_from_input_requires_eight_digits() {
        assert!(PostalCode::from_input("0100100").is_none());
        let code = PostalCode::from_input("01001-000").unwrap();
        assert_eq!(code.digits(), "01001000");
        assert_eq!(code.to_string(), "01001-000");
    }

    #[test]
    fn test_parse() {
        assert_eq!("01001-000".parse::<PostalCode>().unwrap().digits(), "01001000");
        assert_eq!(" 01001000 ".parse::<PostalCode>().unwrap().digits(), "01001000");
        assert!("0100-1000".parse::<PostalCode>().is_err());
        assert!("0100100a".parse::<PostalCode>().is_err());
        assert!("010010001".parse::<PostalCode>().is_err());
    }

    #[test]
    fn test_serde_digits_only() {
        let code: PostalCode = serde_json::from_str("\"01001-000\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"01001000\"");
        assert!(serde_json::from_str::<PostalCode>("\"123\"").is_err());
    }
}
