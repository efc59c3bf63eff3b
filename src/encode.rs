//! Markup serialization, base64 and data URI encoding

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::dom::{Document, NodeId};
use crate::error::{Result, SvgError};

/// Prefix of a percent-encoded SVG data URI
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";

/// Prefix of a base64 SVG data URI
pub const DATA_URI64_PREFIX: &str = "data:image/svg+xml;charset=utf-8;base64,";

/// Standard alphabet decoder that accepts input with or without `=` padding
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Everything except the URI component unreserved marks gets escaped
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Outer markup of `node`
pub fn encode_html<D: Document>(doc: &D, node: NodeId) -> Result<String> {
    doc.serialize(node)
}

/// Base64 of the UTF-8 bytes of `text`
///
/// ```rust
/// use svg_utils::{decode_base64, encode_base64};
///
/// let encoded = encode_base64("パス");
/// assert_eq!(encoded, "44OR44K5");
/// assert_eq!(decode_base64(&encoded).unwrap(), "パス");
/// ```
pub fn encode_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Inverse of [`encode_base64`]
///
/// ASCII whitespace in the input is ignored and trailing `=` padding is
/// optional, matching what browser decoders accept. Malformed base64 or a
/// payload that is not UTF-8 is rejected.
pub fn decode_base64(encoded: &str) -> Result<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT
        .decode(compact)
        .map_err(|e| SvgError::invalid("decode_base64", e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SvgError::invalid("decode_base64", e.to_string()))
}

/// Wrap serialized markup in a percent-encoded data URI
pub fn markup_to_data_uri(markup: &str) -> String {
    format!(
        "{}{}",
        DATA_URI_PREFIX,
        utf8_percent_encode(markup, URI_COMPONENT)
    )
}

/// Wrap serialized markup in a base64 data URI
pub fn markup_to_data_uri64(markup: &str) -> String {
    format!("{}{}", DATA_URI64_PREFIX, encode_base64(markup))
}

/// Serialize `node` and wrap it in a percent-encoded data URI
pub fn to_data_uri<D: Document>(doc: &D, node: NodeId) -> Result<String> {
    let markup = encode_html(doc, node)?;
    Ok(markup_to_data_uri(&markup))
}

/// Serialize `node` and wrap it in a base64 data URI
pub fn to_data_uri64<D: Document>(doc: &D, node: NodeId) -> Result<String> {
    let markup = encode_html(doc, node)?;
    Ok(markup_to_data_uri64(&markup))
}

/// Recover the markup from either data URI form produced by this module
pub fn decode_data_uri(uri: &str) -> Result<String> {
    if let Some(payload) = uri.strip_prefix(DATA_URI64_PREFIX) {
        return decode_base64(payload);
    }
    if let Some(payload) = uri.strip_prefix(DATA_URI_PREFIX) {
        return percent_decode_str(payload)
            .decode_utf8()
            .map(|markup| markup.into_owned())
            .map_err(|e| SvgError::invalid("decode_data_uri", e.to_string()));
    }
    Err(SvgError::invalid(
        "decode_data_uri",
        "not an SVG data URI",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::SvgDocument;
    use crate::element::{create_ns, set_attribute};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base64_ascii() {
        assert_eq!(encode_base64("hello"), "aGVsbG8=");
        assert_eq!(decode_base64("aGVsbG8=").unwrap(), "hello");
    }

    #[test]
    fn test_base64_padding_optional() {
        assert_eq!(decode_base64("aGVsbG8").unwrap(), "hello");
        assert_eq!(decode_base64("aGk").unwrap(), "hi");
        assert_eq!(decode_base64("aGk=").unwrap(), "hi");
        assert!(decode_base64("aGVsbG8=x").is_err());
    }

    #[test]
    fn test_base64_multibyte_round_trip() {
        for text in ["日本語のテキスト", "émoji 🎨 ok", "", "a\u{0}b"] {
            assert_eq!(decode_base64(&encode_base64(text)).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_base64_ignores_whitespace() {
        assert_eq!(decode_base64("aGVs\nbG8=").unwrap(), "hello");
    }

    #[test]
    fn test_decode_base64_rejects_garbage() {
        let err = decode_base64("not base64!").unwrap_err();
        assert_eq!(err.method(), "decode_base64");
    }

    #[test]
    fn test_decode_base64_rejects_invalid_utf8() {
        // 0xff 0xfe is not UTF-8
        assert!(decode_base64("//4=").is_err());
    }

    #[test]
    fn test_markup_to_data_uri_escapes_component() {
        assert_eq!(
            markup_to_data_uri(r#"<svg a="1 (2)"/>"#),
            "data:image/svg+xml;charset=utf-8,%3Csvg%20a%3D%221%20(2)%22%2F%3E"
        );
    }

    #[test]
    fn test_data_uri_multibyte() {
        assert_eq!(
            markup_to_data_uri("é"),
            "data:image/svg+xml;charset=utf-8,%C3%A9"
        );
    }

    #[test]
    fn test_to_data_uri_round_trips() {
        let mut doc = SvgDocument::new();
        let svg = create_ns(&mut doc, "svg", Some(10.0), Some(10.0)).unwrap();
        let path = create_ns(&mut doc, "path", None, None).unwrap();
        set_attribute(&mut doc, path, [("d", "M0,0L10,10Z"), ("fill", "#f00")]).unwrap();
        doc.append_child(svg, path).unwrap();

        let markup = encode_html(&doc, svg).unwrap();
        let plain = to_data_uri(&doc, svg).unwrap();
        let b64 = to_data_uri64(&doc, svg).unwrap();

        assert!(plain.starts_with(DATA_URI_PREFIX));
        assert!(b64.starts_with(DATA_URI64_PREFIX));
        assert!(!plain.contains('#'));
        assert_eq!(decode_data_uri(&plain).unwrap(), markup);
        assert_eq!(decode_data_uri(&b64).unwrap(), markup);
        assert_eq!(
            decode_base64(b64.trim_start_matches(DATA_URI64_PREFIX)).unwrap(),
            markup
        );
    }

    #[test]
    fn test_decode_data_uri_rejects_other_schemes() {
        let err = decode_data_uri("data:text/plain,hello").unwrap_err();
        assert_eq!(err.method(), "decode_data_uri");
    }
}
