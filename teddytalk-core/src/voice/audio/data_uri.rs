//! Parsing and encoding of `data:<mime>;base64,<payload>` strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::FlowError;

/// A validated base64 data URI.
///
/// Construction is the validation step: a `DataUri` value always carries a
/// well-formed MIME type and a decodable payload, so consumers (the cloning
/// provider in particular) never see malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    raw: String,
    mime: String,
    data: Vec<u8>,
}

impl DataUri {
    /// Parse a raw string, rejecting anything that does not match
    /// `data:<mime>;base64,<payload>` with a decodable payload.
    pub fn parse(raw: &str) -> Result<Self, FlowError> {
        let rest = raw.strip_prefix("data:").ok_or_else(|| {
            FlowError::validation("audio must be a data URI (expected a data: prefix)")
        })?;

        let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
            FlowError::validation("audio data URI must use base64 encoding (missing ;base64, marker)")
        })?;

        if mime.is_empty() || !mime.contains('/') {
            return Err(FlowError::validation(format!(
                "audio data URI has a malformed MIME type: {mime:?}"
            )));
        }

        let data = STANDARD
            .decode(payload)
            .map_err(|e| FlowError::validation(format!("audio payload is not valid base64: {e}")))?;

        Ok(Self {
            raw: raw.to_string(),
            mime: mime.to_string(),
            data,
        })
    }

    /// Encode raw bytes as a data URI with the given MIME type.
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        let payload = STANDARD.encode(bytes);
        Self {
            raw: format!("data:{mime};base64,{payload}"),
            mime: mime.to_string(),
            data: bytes.to_vec(),
        }
    }

    /// The original `data:...` string, forwarded verbatim on the wire.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_wav_data_uri() {
        let uri = DataUri::parse("data:audio/wav;base64,AAAA").unwrap();
        assert_eq!(uri.mime(), "audio/wav");
        assert_eq!(uri.bytes(), &[0, 0, 0]);
        assert_eq!(uri.as_str(), "data:audio/wav;base64,AAAA");
    }

    #[test]
    fn rejects_strings_without_the_data_prefix() {
        let err = DataUri::parse("audio/wav;base64,AAAA").unwrap_err();
        assert!(matches!(err, FlowError::Validation { .. }));
    }

    #[test]
    fn rejects_non_base64_encodings() {
        let err = DataUri::parse("data:audio/wav;charset=utf8,hello").unwrap_err();
        assert!(matches!(err, FlowError::Validation { .. }));
    }

    #[test]
    fn rejects_malformed_mime_types() {
        let err = DataUri::parse("data:;base64,AAAA").unwrap_err();
        assert!(matches!(err, FlowError::Validation { .. }));

        let err = DataUri::parse("data:audio;base64,AAAA").unwrap_err();
        assert!(matches!(err, FlowError::Validation { .. }));
    }

    #[test]
    fn rejects_invalid_base64_payloads() {
        let err = DataUri::parse("data:audio/wav;base64,not base64!!").unwrap_err();
        assert!(matches!(err, FlowError::Validation { .. }));
    }

    #[test]
    fn encode_round_trips_through_parse() {
        let bytes = [1u8, 2, 3, 4, 5];
        let encoded = DataUri::encode("audio/webm", &bytes);
        let parsed = DataUri::parse(encoded.as_str()).unwrap();
        assert_eq!(parsed.mime(), "audio/webm");
        assert_eq!(parsed.bytes(), &bytes);
    }
}
