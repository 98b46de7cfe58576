//! Tag-length-value fields of the EMV merchant-presented QR layout.
//!
//! Every field is `tag(2) + length(2) + value`, with no delimiters, so the
//! length prefix has to count the value exactly.

use crate::error::PixError;

pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
pub const MERCHANT_ACCOUNT_INFORMATION: &str = "26";
pub const MERCHANT_CATEGORY_CODE: &str = "52";
pub const TRANSACTION_CURRENCY: &str = "53";
pub const TRANSACTION_AMOUNT: &str = "54";
pub const COUNTRY_CODE: &str = "58";
pub const MERCHANT_NAME: &str = "59";
pub const MERCHANT_CITY: &str = "60";
pub const ADDITIONAL_DATA: &str = "62";

// Sub-tags inside the merchant account template (26)
pub const ACCOUNT_GUI: &str = "00";
pub const ACCOUNT_KEY: &str = "01";
pub const ACCOUNT_DESCRIPTION: &str = "02";

// Sub-tag inside the additional data template (62)
pub const REFERENCE_LABEL: &str = "05";

pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";
pub const MAX_VALUE_LEN: usize = 99;

/// Announces the trailing 4-character checksum; it is covered by the CRC itself.
pub const CRC_HEADER: &str = "6304";

/// Encodes `value` under `tag`.
pub fn format_field(tag: &'static str, value: &str) -> Result<String, PixError> {
    debug_assert!(tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit()));

    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong { tag, len });
    }

    Ok(format!("{}{:02}{}", tag, len, value))
}

/// Merchant account template: scheme GUI, destination key and an empty description.
pub fn merchant_account_information(destination_key: &str) -> Result<String, PixError> {
    let gui = format_field(ACCOUNT_GUI, PIX_GUI)?;
    let key = format_field(ACCOUNT_KEY, destination_key)?;
    let description = format_field(ACCOUNT_DESCRIPTION, "")?;

    format_field(MERCHANT_ACCOUNT_INFORMATION, &format!("{}{}{}", gui, key, description))
}

/// Additional data template carrying the transaction reference.
pub fn additional_data(reference: &str) -> Result<String, PixError> {
    let label = format_field(REFERENCE_LABEL, reference)?;
    format_field(ADDITIONAL_DATA, &label)
}
