//! Portrait fan-out — one generation task per career, settled together.
//!
//! All careers launch at once and the batch is done only when every task has
//! resolved or failed: an all-settled join, never fail-fast. One career's
//! failure stays on that career's card. Batches carry the session epoch they
//! were started from so completions that outlive a reset are discarded.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::ai_client::{AiError, GenerativeService, ResponsePart};
use crate::generation::subject::SubjectKind;
use crate::upload::UploadedPhoto;

/// Media type every resolved portrait is re-encoded under, regardless of
/// what the service labelled the payload.
const PORTRAIT_MEDIA_TYPE: &str = "image/png";

/// Inline error label for a failed card.
pub const CARD_ERROR_LABEL: &str = "Failed to generate.";

/// One career's pending generation inside a batch.
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub index: usize,
    pub career: String,
    pub prompt: String,
}

/// A prepared fan-out batch, tagged with the session epoch that created it.
#[derive(Debug, Clone)]
pub struct ImageBatch {
    pub epoch: u64,
    pub jobs: Vec<ImageJob>,
}

/// Terminal result of one career's generation.
#[derive(Debug, Clone)]
pub enum ImageOutcome {
    Resolved { image_url: String },
    Failed { message: String },
}

/// A settled job, ready to be applied back onto its gallery slot.
#[derive(Debug, Clone)]
pub struct SettledImage {
    pub index: usize,
    pub career: String,
    pub outcome: ImageOutcome,
}

/// Builds the batch for the given careers: one job per career, prompt chosen
/// by the subject policy.
pub fn prepare_batch(epoch: u64, careers: &[String], subject: &SubjectKind) -> ImageBatch {
    let jobs = careers
        .iter()
        .enumerate()
        .map(|(index, career)| ImageJob {
            index,
            career: career.clone(),
            prompt: subject.portrait_prompt(career),
        })
        .collect();
    ImageBatch { epoch, jobs }
}

/// Runs every job concurrently and waits for all of them to settle.
///
/// Failure of one job never cancels the others; results come back ordered by
/// job index. A job whose task dies without reporting simply has no entry —
/// the session settles the leftover slot as failed when it applies the batch.
pub async fn run_batch(
    service: Arc<dyn GenerativeService>,
    photo: &UploadedPhoto,
    batch: &ImageBatch,
) -> Vec<SettledImage> {
    let mut tasks = JoinSet::new();

    for job in &batch.jobs {
        let service = Arc::clone(&service);
        let bytes = photo.bytes.clone();
        let mime = photo.mime_type();
        let job = job.clone();
        tasks.spawn(async move {
            let outcome = match service.generate_image(&bytes, mime, &job.prompt).await {
                Ok(parts) => match extract_portrait(parts) {
                    Ok(image_url) => ImageOutcome::Resolved { image_url },
                    Err(e) => {
                        warn!("No portrait for {}: {e}", job.career);
                        ImageOutcome::Failed {
                            message: CARD_ERROR_LABEL.to_string(),
                        }
                    }
                },
                Err(e) => {
                    warn!("Portrait generation for {} failed: {e}", job.career);
                    ImageOutcome::Failed {
                        message: CARD_ERROR_LABEL.to_string(),
                    }
                }
            };
            SettledImage {
                index: job.index,
                career: job.career,
                outcome,
            }
        });
    }

    let mut settled = Vec::with_capacity(batch.jobs.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => settled.push(result),
            Err(e) => warn!("portrait task aborted: {e}"),
        }
    }
    settled.sort_by_key(|s| s.index);
    settled
}

/// Scans response parts for the first inline image payload and re-encodes it
/// as a PNG data URL. Text parts are diagnostic only: a text-only response is
/// a refusal, not a result, and is never surfaced as one.
fn extract_portrait(parts: Vec<ResponsePart>) -> Result<String, AiError> {
    let mut refusal_text: Option<String> = None;

    for part in parts {
        if let Some(inline) = part.inline_data {
            if !inline.data.is_empty() {
                return Ok(format!(
                    "data:{PORTRAIT_MEDIA_TYPE};base64,{}",
                    inline.data
                ));
            }
        }
        if refusal_text.is_none() {
            if let Some(text) = part.text {
                if !text.trim().is_empty() {
                    refusal_text = Some(text);
                }
            }
        }
    }

    if let Some(text) = refusal_text {
        debug!("service returned text instead of an image: {text}");
    }
    Err(AiError::NoImage)
}
