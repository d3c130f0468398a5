//! Validation rules for input entering the dashboard
//!
//! Applied at the boundaries where external data arrives: manual barcode
//! entry, CSV import, and the new item / new employee forms.

use crate::models::{parse_location, MAX_COPIES, MIN_COPIES};

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate SKU format: 2-4 uppercase letters, a hyphen, 3-6 digits (e.g. WPA-001)
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    let Some((prefix, number)) = sku.split_once('-') else {
        return Err("SKU must be in format ABC-123");
    };
    if prefix.len() < 2 || prefix.len() > 4 || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
        return Err("SKU prefix must be 2-4 uppercase letters");
    }
    if number.len() < 3 || number.len() > 6 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err("SKU number must be 3-6 digits");
    }
    Ok(())
}

/// Validate a location code parses (e.g. A1-B2)
pub fn validate_location(raw: &str) -> Result<(), &'static str> {
    parse_location(raw)
        .map(|_| ())
        .map_err(|_| "Location must be in format A1-B2")
}

/// Validate category is non-blank and reasonably short
pub fn validate_category(category: &str) -> Result<(), &'static str> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err("Category is required");
    }
    if trimmed.len() > 50 {
        return Err("Category must be at most 50 characters");
    }
    Ok(())
}

/// Validate a scanner quantity (at least one unit)
pub fn validate_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity == 0 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate a requested label copy count
pub fn validate_copies(copies: u32) -> Result<(), &'static str> {
    if !(MIN_COPIES..=MAX_COPIES).contains(&copies) {
        return Err("Copies must be between 1 and 10");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format");
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Validate phone number: 10 digits, or 11 starting with the US country code.
/// Accepts: 5551234567, (555) 123-4567, +1 (555) 123-4567
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'))
    {
        return Err("Phone number contains invalid characters");
    }
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Ok(()),
        11 if digits.starts_with('1') => Ok(()),
        _ => Err("Invalid phone number format"),
    }
}

/// Reject text with embedded control characters (tabs, newlines, NUL ...)
pub fn validate_no_control_chars(text: &str) -> Result<(), &'static str> {
    if text.chars().any(char::is_control) {
        return Err("Text must not contain control characters");
    }
    Ok(())
}

/// Validate a scanned or typed barcode: 8-14 digits
pub fn validate_barcode(code: &str) -> Result<(), &'static str> {
    let code = code.trim();
    if code.len() < 8 || code.len() > 14 {
        return Err("Barcode must be 8-14 digits");
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Barcode must contain digits only");
    }
    Ok(())
}
