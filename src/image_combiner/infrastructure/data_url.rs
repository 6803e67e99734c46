use super::error::InfrastructureError;
use base64::decode;

/// Payload of a `data:<media type>;base64,<data>` URL, the form browsers
/// produce when reading a picked file.
#[derive(Debug, PartialEq)]
pub struct DataUrl {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

pub fn parse_data_url(url: &str) -> Result<DataUrl, InfrastructureError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| InfrastructureError::DataUrl("missing data: scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| InfrastructureError::DataUrl("missing comma".to_string()))?;

    let mut params = header.split(';');
    let media_type = params.next().unwrap_or_default().trim().to_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(InfrastructureError::DataUrl(
            "only base64 encoded payloads are supported".to_string(),
        ));
    }

    let bytes = decode(payload.trim()).map_err(InfrastructureError::Base64DecodeError)?;
    Ok(DataUrl { media_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PIXEL_PNG: &str = concat!(
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNk",
        "YAAAAAYAAjCB0C8AAAAASUVORK5CYII=",
    );

    #[test]
    fn test_parse_base64_data_url() {
        let url = format!("data:image/PNG;base64,{}", PIXEL_PNG);
        let parsed = parse_data_url(&url).unwrap();
        assert_eq!(parsed.media_type, "image/png");
        assert_eq!(&parsed.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_parse_data_url_with_extra_params() {
        let url = format!("data:image/webp;name=a.webp;base64,{}", PIXEL_PNG);
        assert_eq!(parse_data_url(&url).unwrap().media_type, "image/webp");
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(matches!(
            parse_data_url("https://example.com/a.png"),
            Err(InfrastructureError::DataUrl(_))
        ));
        assert!(matches!(
            parse_data_url("data:image/png;base64"),
            Err(InfrastructureError::DataUrl(_))
        ));
        assert!(matches!(
            parse_data_url("data:text/plain,hello"),
            Err(InfrastructureError::DataUrl(_))
        ));
        assert!(matches!(
            parse_data_url("data:image/png;base64,@@@"),
            Err(InfrastructureError::Base64DecodeError(_))
        ));
    }
}
