use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::InvalidInputError;

static CONNECT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,7}#[0-9]{1,7}$").expect("Connect code pattern failed to compile"));

/// Returns whether `code` looks like a connect code (`NAME#NUMBER`, up to seven
/// letters and seven digits). Case is not significant.
pub fn validate_connect_code(code: &str) -> bool {
    CONNECT_CODE.is_match(code)
}

/// A connect code that passed validation, stored upper-cased as the ladder
/// expects it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ConnectCode(String);

impl ConnectCode {
    /// Validates and normalizes a user-supplied connect code.
    pub fn parse(code: &str) -> Result<Self, InvalidInputError> {
        let code = code.trim();

        if !validate_connect_code(code) {
            return Err(InvalidInputError::ConnectCode(code.to_string()));
        }

        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_codes_in_either_case() {
        assert!(validate_connect_code("MORS#762"));
        assert!(validate_connect_code("mors#762"));
        assert!(validate_connect_code("XATU#0"));
        assert!(validate_connect_code("A#1"));
        assert!(validate_connect_code("ABCDEFG#1234567"));
    }

    #[test]
    fn test_rejects_malformed_codes() {
        assert!(!validate_connect_code("TOOLONGNAME#1"));
        assert!(!validate_connect_code("AB#"));
        assert!(!validate_connect_code("#123"));
        assert!(!validate_connect_code("AB#12345678"));
        assert!(!validate_connect_code("AB123"));
        assert!(!validate_connect_code("A1#123"));
        assert!(!validate_connect_code("AB#12 "));
        assert!(!validate_connect_code(""));
        assert!(!validate_connect_code("ÄB#12"));
    }

    #[test]
    fn test_parse_uppercases() {
        let code = ConnectCode::parse(" mors#762 ").unwrap();
        assert_eq!(code.as_str(), "MORS#762");
        assert_eq!(code.to_string(), "MORS#762");
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        assert_eq!(
            ConnectCode::parse("TOOLONGNAME#1"),
            Err(InvalidInputError::ConnectCode("TOOLONGNAME#1".into()))
        );
    }
}
