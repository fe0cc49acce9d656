use base64::{Engine as _, engine::general_purpose};

const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// Guess the image MIME type from its magic bytes.
#[must_use]
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map_or(FALLBACK_MIME_TYPE, |kind| kind.mime_type())
}

/// Inline an image as a `data:` URL.
#[must_use]
pub fn image_data_url(bytes: &[u8], mime_type: &str) -> String {
    let b64 = general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{b64}")
}
