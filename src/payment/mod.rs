use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::checksum::crc16_hex;
use crate::emv::{self, format_field};
use crate::error::PixError;
use crate::normalize::{merchant_city, merchant_name};

pub mod uri;

const PAYLOAD_FORMAT: &str = "01";
const CATEGORY_UNSPECIFIED: &str = "0000";
const CURRENCY_BRL: &str = "986";
const COUNTRY_BR: &str = "BR";
const REFERENCE_PLACEHOLDER: &str = "***";
const REFERENCE_MAX: usize = 25;

/// Everything needed to build one copy-and-pay charge code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub destination_key: String,
    pub merchant_name: String,
    pub merchant_city: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub amount: f64,
}

impl ChargeRequest {
    pub fn payload(&self) -> Result<String, PixError> {
        generate_charge_payload(
            &self.destination_key,
            &self.merchant_name,
            &self.merchant_city,
            self.transaction_id.as_deref().unwrap_or_default(),
            self.amount,
        )
    }
}

/// Builds the full charge string, checksum included.
///
/// `transaction_id` may be empty, in which case the `***` placeholder is sent.
pub fn generate_charge_payload(
    destination_key: &str,
    merchant: &str,
    city: &str,
    transaction_id: &str,
    amount: f64,
) -> Result<String, PixError> {
    if destination_key.is_empty() {
        return Err(PixError::EmptyDestinationKey);
    }
    let amount = format_amount(amount)?;
    let reference = if transaction_id.is_empty() {
        REFERENCE_PLACEHOLDER
    } else {
        transaction_id
    };

    let mut payload = String::with_capacity(160);
    payload.push_str(&format_field(emv::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT)?);
    payload.push_str(&emv::merchant_account_information(destination_key)?);
    payload.push_str(&format_field(emv::MERCHANT_CATEGORY_CODE, CATEGORY_UNSPECIFIED)?);
    payload.push_str(&format_field(emv::TRANSACTION_CURRENCY, CURRENCY_BRL)?);
    payload.push_str(&format_field(emv::TRANSACTION_AMOUNT, &amount)?);
    payload.push_str(&format_field(emv::COUNTRY_CODE, COUNTRY_BR)?);
    payload.push_str(&format_field(emv::MERCHANT_NAME, &merchant_name(merchant))?);
    payload.push_str(&format_field(emv::MERCHANT_CITY, &merchant_city(city))?);
    payload.push_str(&emv::additional_data(reference)?);
    payload.push_str(emv::CRC_HEADER);

    let crc = crc16_hex(&payload);
    payload.push_str(&crc);

    tracing::debug!("Generated charge payload: reference={} amount={} crc={}", reference, amount, crc);

    Ok(payload)
}

/// Transaction id for a stored order: its ASCII alphanumerics, at most 25 of them.
pub fn order_reference(order_id: &str) -> Option<String> {
    let reference: String = order_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(REFERENCE_MAX)
        .collect();

    (!reference.is_empty()).then_some(reference)
}

/// Two fractional digits, half-up, no grouping or symbol.
pub fn format_amount(amount: f64) -> Result<String, PixError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(PixError::InvalidAmount(amount));
    }

    // Shortest round-trip text, so 3.005 rounds as the decimal the caller wrote
    let value = BigDecimal::from_str(&amount.to_string())
        .map_err(|_| PixError::InvalidAmount(amount))?;

    // Work on the cent count; BigDecimal's Display drops the scale of zero
    let (cents, _) = value
        .with_scale_round(2, RoundingMode::HalfUp)
        .as_bigint_and_exponent();
    let digits = format!("{:0>3}", cents.to_string());
    let (units, fraction) = digits.split_at(digits.len() - 2);

    Ok(format!("{}.{}", units, fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(9.5).unwrap(), "9.50");
        assert_eq!(format_amount(12.5).unwrap(), "12.50");
        assert_eq!(format_amount(3.005).unwrap(), "3.01");
        assert_eq!(format_amount(0.0).unwrap(), "0.00");
        assert_eq!(format_amount(1234567.891).unwrap(), "1234567.89");
        assert_eq!(format_amount(7.0).unwrap(), "7.00");
        assert_eq!(format_amount(0.05).unwrap(), "0.05");
        assert_eq!(format_amount(0.5).unwrap(), "0.50");
    }

    #[test]
    fn test_format_amount_below_one_cent() {
        assert_eq!(format_amount(0.001).unwrap(), "0.00");
        assert_eq!(format_amount(0.004).unwrap(), "0.00");
        assert_eq!(format_amount(0.005).unwrap(), "0.01");
        assert_eq!(format_amount(1e-7).unwrap(), "0.00");
        assert_eq!(format_amount(5e-324).unwrap(), "0.00");
        assert_eq!(format_amount(-0.0).unwrap(), "0.00");
    }

    #[test]
    fn test_zero_amount_payload_keeps_two_digits() {
        let payload = generate_charge_payload("98970001048", "MERCADO ONLINE", "SuaCidade", "", 0.0).unwrap();
        assert!(payload.contains("530398654040.005802BR"));
    }

    #[test]
    fn test_format_amount_rejects_invalid() {
        assert_eq!(format_amount(-0.01), Err(PixError::InvalidAmount(-0.01)));
        assert!(matches!(format_amount(f64::NAN), Err(PixError::InvalidAmount(_))));
        assert!(matches!(format_amount(f64::INFINITY), Err(PixError::InvalidAmount(_))));
    }

    #[test]
    fn test_known_payload() {
        let payload = generate_charge_payload("98970001048", "MERCADO ONLINE", "SuaCidade", "", 12.50).unwrap();

        let body = "000201\
                    26370014BR.GOV.BCB.PIX0111989700010480200\
                    52040000\
                    5303986\
                    540512.50\
                    5802BR\
                    5914MERCADO ONLINE\
                    6009SUACIDADE\
                    62070503***\
                    6304";
        assert_eq!(&payload[..payload.len() - 4], body);
        assert_eq!(&payload[payload.len() - 4..], crc16_hex(body));
    }

    #[test]
    fn test_transaction_id_embedded_verbatim() {
        let payload = generate_charge_payload("key", "Loja", "Cidade", "PEDIDO42", 1.0).unwrap();
        assert!(payload.contains("62120508PEDIDO42"));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(
            generate_charge_payload("", "Loja", "Cidade", "", 1.0),
            Err(PixError::EmptyDestinationKey)
        );
    }

    #[test]
    fn test_order_reference() {
        assert_eq!(order_reference("ord-17").as_deref(), Some("ord17"));
        assert_eq!(
            order_reference("3f2a9c1e-8b7d-4e6f-a5b4-c3d2e1f0a9b8").as_deref(),
            Some("3f2a9c1e8b7d4e6fa5b4c3d2e")
        );
        assert_eq!(order_reference("--"), None);
    }

    #[test]
    fn test_charge_request_matches_free_function() {
        let request = ChargeRequest {
            destination_key: "98970001048".to_string(),
            merchant_name: "Mercado".to_string(),
            merchant_city: "São Luís".to_string(),
            transaction_id: None,
            amount: 5.0,
        };

        assert_eq!(
            request.payload().unwrap(),
            generate_charge_payload("98970001048", "Mercado", "São Luís", "", 5.0).unwrap()
        );
    }
}
