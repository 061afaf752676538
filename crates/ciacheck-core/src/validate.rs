//! Local URL validation.

use url::Url;

use crate::error::InputError;

/// Validate the raw contents of the URL field.
///
/// Returns the trimmed input unchanged; the parsed form is only used as a
/// well-formedness check so the backend sees exactly what the user typed.
pub fn validate_url(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyUrl);
    }

    Url::parse(trimmed).map_err(|_| InputError::InvalidUrl)?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(validate_url(raw), Err(InputError::EmptyUrl), "input {:?}", raw);
        }
    }

    #[test]
    fn test_malformed() {
        for raw in ["not a url", "::::", "example.com", "/relative/path", "http://"] {
            assert_eq!(validate_url(raw), Err(InputError::InvalidUrl), "input {:?}", raw);
        }
    }

    #[test]
    fn test_valid_is_trimmed_not_normalized() {
        assert_eq!(
            validate_url("  https://Example.com  ").unwrap(),
            "https://Example.com"
        );
        assert_eq!(
            validate_url("http://localhost:8080/a?b=c").unwrap(),
            "http://localhost:8080/a?b=c"
        );
    }

    #[test]
    fn test_non_http_schemes_are_well_formed() {
        assert!(validate_url("ftp://files.example.org/pub").is_ok());
        assert!(validate_url("mailto:someone@example.com").is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(InputError::EmptyUrl.user_message(), "Please enter the URL.");
        assert_eq!(InputError::InvalidUrl.user_message(), "Please enter a valid URL.");
    }
}
