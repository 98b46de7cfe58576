use anyhow::{Result, anyhow};
use url::Url;

pub const DEFAULT_QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_QR_SIZE: u32 = 250;

/// Link to an external renderer that turns `payload` into a scannable image.
pub fn qr_code_url(service_url: &str, size: u32, payload: &str) -> Result<String> {
    let size = format!("{}x{}", size, size);
    let url = Url::parse_with_params(service_url, &[("size", size.as_str()), ("data", payload)])
        .map_err(|e| anyhow!("Invalid QR service URL {}: {}", service_url, e))?;

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_code_url() {
        let url = qr_code_url(DEFAULT_QR_SERVICE_URL, 250, "000201***6304ABCD").unwrap();
        assert_eq!(
            url,
            "https://api.qrserver.com/v1/create-qr-code/?size=250x250&data=000201***6304ABCD"
        );
    }

    #[test]
    fn test_qr_code_url_encodes_payload() {
        let url = qr_code_url(DEFAULT_QR_SERVICE_URL, 100, "MERCADO ONLINE&x=1").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let data = parsed
            .query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned());
        assert_eq!(data.as_deref(), Some("MERCADO ONLINE&x=1"));
    }

    #[test]
    fn test_invalid_service_url() {
        assert!(qr_code_url("not a url", 250, "payload").is_err());
    }
}
