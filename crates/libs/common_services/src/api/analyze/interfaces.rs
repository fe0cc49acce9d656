use crate::api::analyze::error::AnalyzeError;
use app_state::AnalysisSettings;
use language_model::sniff_mime_type;
use utoipa::ToSchema;

/// The `image` part of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Multipart fields as received, before any check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisUpload {
    pub image: Option<UploadedImage>,
    pub title: Option<String>,
    pub niche: Option<String>,
}

/// A request that passed input validation. Lives for one call only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub image_bytes: Vec<u8>,
    pub image_mime_type: String,
    /// Trimmed, non-empty, at most `max_title_chars` characters.
    pub title: String,
    pub niche_id: Option<String>,
}

impl AnalysisUpload {
    /// Checks presence and size limits. Runs before the model is ever called.
    pub fn validate(self, settings: &AnalysisSettings) -> Result<AnalysisRequest, AnalyzeError> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        let Some(image) = self.image.filter(|image| !image.bytes.is_empty()) else {
            return Err(AnalyzeError::MissingInput);
        };
        if title.is_empty() {
            return Err(AnalyzeError::MissingInput);
        }
        if image.bytes.len() > settings.max_image_bytes {
            return Err(AnalyzeError::ImageTooLarge {
                max_mib: settings.max_image_mib(),
            });
        }
        if title.chars().count() > settings.max_title_chars {
            return Err(AnalyzeError::TitleTooLong {
                max_chars: settings.max_title_chars,
            });
        }

        let image_mime_type = image
            .content_type
            .filter(|content_type| content_type.starts_with("image/"))
            .unwrap_or_else(|| sniff_mime_type(&image.bytes).to_string());

        Ok(AnalysisRequest {
            image_bytes: image.bytes,
            image_mime_type,
            title: title.to_string(),
            niche_id: self.niche,
        })
    }
}

/// Multipart body accepted by the analyze endpoints.
#[derive(ToSchema)]
pub struct AnalyzeForm {
    /// Thumbnail image file.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Video title.
    pub title: String,
    /// Niche id, see `GET /niches`. Unknown ids use the generic niche.
    pub niche: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::analyze::error::ErrorKind;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn upload(image: Option<&[u8]>, title: Option<&str>) -> AnalysisUpload {
        AnalysisUpload {
            image: image.map(|bytes| UploadedImage {
                bytes: bytes.to_vec(),
                content_type: Some("image/jpeg".to_string()),
            }),
            title: title.map(str::to_string),
            niche: Some("gaming".to_string()),
        }
    }

    fn kind_of(upload: AnalysisUpload, settings: &AnalysisSettings) -> Option<ErrorKind> {
        upload.validate(settings).err().map(|e| e.kind())
    }

    #[test]
    fn missing_or_blank_fields_are_missing_input() {
        let settings = AnalysisSettings::default();
        for candidate in [
            upload(None, Some("Titre")),
            upload(Some(b""), Some("Titre")),
            upload(Some(b"img"), None),
            upload(Some(b"img"), Some("")),
            upload(Some(b"img"), Some("   \n")),
        ] {
            assert_eq!(kind_of(candidate, &settings), Some(ErrorKind::MissingInput));
        }
    }

    #[test]
    fn oversized_image_is_payload_too_large() {
        let settings = AnalysisSettings {
            max_image_bytes: 4,
            ..AnalysisSettings::default()
        };
        assert_eq!(
            kind_of(upload(Some(b"12345"), Some("Titre")), &settings),
            Some(ErrorKind::PayloadTooLarge)
        );
        assert!(upload(Some(b"1234"), Some("Titre")).validate(&settings).is_ok());
    }

    #[test]
    fn overlong_title_is_payload_too_large() {
        let settings = AnalysisSettings {
            max_title_chars: 5,
            ..AnalysisSettings::default()
        };
        // Characters are counted, not bytes.
        assert!(upload(Some(b"img"), Some("ééééé")).validate(&settings).is_ok());
        assert_eq!(
            kind_of(upload(Some(b"img"), Some("éééééé")), &settings),
            Some(ErrorKind::PayloadTooLarge)
        );
    }

    #[test]
    fn title_is_trimmed_and_niche_passed_through() -> Result<(), AnalyzeError> {
        let request = upload(Some(b"img"), Some("  Great title \n")).validate(&AnalysisSettings::default())?;
        assert_eq!(request.title, "Great title");
        assert_eq!(request.niche_id.as_deref(), Some("gaming"));
        assert_eq!(request.image_mime_type, "image/jpeg");
        Ok(())
    }

    #[test]
    fn non_image_content_type_is_sniffed_from_bytes() -> Result<(), AnalyzeError> {
        let request = AnalysisUpload {
            image: Some(UploadedImage {
                bytes: PNG_HEADER.to_vec(),
                content_type: Some("application/octet-stream".to_string()),
            }),
            title: Some("Titre".to_string()),
            niche: None,
        }
        .validate(&AnalysisSettings::default())?;
        assert_eq!(request.image_mime_type, "image/png");
        Ok(())
    }
}
