use crate::errors::ValidationError;

pub const ID_MAX_LEN: usize = 10;
pub const NAME_MAX_LEN: usize = 10;
pub const PHONE_LEN: usize = 10;
pub const ADDRESS_MAX_LEN: usize = 30;

// All length rules count characters, not bytes. Values are validated exactly
// as given; nothing here trims whitespace.

pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    validate_capped("Contact ID", id, ID_MAX_LEN)
}

pub fn validate_name(name: &str, field: &'static str) -> Result<(), ValidationError> {
    validate_capped(field, name, NAME_MAX_LEN)
}

pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    validate_capped("Address", address, ADDRESS_MAX_LEN)
}

/// Length is checked before character class, so a short non-numeric value
/// reports the length error.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let field = "Phone number";

    if phone.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if phone.chars().count() != PHONE_LEN {
        return Err(ValidationError::WrongLength {
            field,
            expected: PHONE_LEN,
        });
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotDigits { field });
    }
    Ok(())
}

fn validate_capped(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
