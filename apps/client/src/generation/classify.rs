//! Subject classification with a silent fallback. A failed classification
//! must never block the upload flow.

use tracing::warn;

use crate::ai_client::GenerativeService;
use crate::generation::subject::{SubjectKind, HUMAN_DESCRIPTOR};
use crate::upload::UploadedPhoto;

/// Classifies the photo subject, defaulting to "Human" on any failure
/// (network error, empty text). The error is logged and absorbed; the caller
/// never sees it.
pub async fn detect_subject(service: &dyn GenerativeService, photo: &UploadedPhoto) -> SubjectKind {
    match service.classify_subject(&photo.bytes, photo.mime_type()).await {
        Ok(text) => SubjectKind::from_descriptor(&text),
        Err(e) => {
            warn!("Subject classification failed, defaulting to {HUMAN_DESCRIPTOR}: {e}");
            SubjectKind::Human
        }
    }
}
