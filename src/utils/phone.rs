use crate::constants::media::MIN_PHONE_DIGITS;
use crate::errors::ToolError;

/// Strips everything but digits and rejects numbers too short to carry a
/// country code. The gateway expects e.g. `5511999999999`, never `+55 ...`.
pub fn format_phone_number(raw: &str) -> Result<String, ToolError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= MIN_PHONE_DIGITS {
        return Ok(digits);
    }
    Err(ToolError::invalid_params(format!(
        "Invalid phone number format: {}. Please include country code (e.g., 5511999999999)",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::format_phone_number;
    use crate::errors::ToolErrorKind;

    #[test]
    fn strips_formatting_characters() {
        assert_eq!(
            format_phone_number("+55 (11) 99999-9999").unwrap(),
            "5511999999999"
        );
    }

    #[test]
    fn rejects_numbers_without_country_code() {
        let err = format_phone_number("999-9999").unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
        assert!(err.message.contains("999-9999"));
    }

    #[test]
    fn accepts_exactly_ten_digits() {
        assert_eq!(format_phone_number("1234567890").unwrap(), "1234567890");
    }
}
