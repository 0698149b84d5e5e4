//! Session state machine — owns the whole flow from upload to plan view.
//!
//! One `Session` exists per user session, created at startup and torn down at
//! exit; an explicit `reset` wipes it back to the initial state. There is no
//! persistence across runs. All transitions run on the caller's single
//! logical thread; external calls are the only suspension points.
//!
//! `loading_message` is non-empty exactly while a blocking external call is
//! in flight (classification, the portrait batch, plan generation) and is
//! cleared on every exit path, error paths included.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::ai_client::GenerativeService;
use crate::careers::{AddOutcome, CareerList};
use crate::errors::AppError;
use crate::generation::images::{self, ImageBatch, ImageOutcome, SettledImage, CARD_ERROR_LABEL};
use crate::generation::subject::SubjectKind;
use crate::generation::{classify, plan};
use crate::models::image::CareerImage;
use crate::models::plan::CareerPlan;
use crate::upload::{self, UploadedPhoto};

/// Which view is active. Exactly one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    GeneratingImages,
    Gallery,
    GeneratingPlan,
    PlanView,
}

/// The session context: current step, uploaded photo, subject, career list,
/// gallery, plan cache, and transient loading status.
pub struct Session {
    service: Arc<dyn GenerativeService>,
    step: Step,
    photo: Option<UploadedPhoto>,
    subject: SubjectKind,
    careers: CareerList,
    images: Vec<CareerImage>,
    plan_cache: HashMap<String, CareerPlan>,
    selected_plan: Option<CareerPlan>,
    selected_career_image: Option<String>,
    loading_message: Option<String>,
    /// Bumped on reset and on every new portrait batch; completions carrying
    /// an older epoch are stale and get discarded instead of applied.
    epoch: u64,
}

impl Session {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self {
            service,
            step: Step::Upload,
            photo: None,
            subject: SubjectKind::Human,
            careers: CareerList::default(),
            images: Vec::new(),
            plan_cache: HashMap::new(),
            selected_plan: None,
            selected_career_image: None,
            loading_message: None,
            epoch: 0,
        }
    }

    // ── accessors ───────────────────────────────────────────────────────────

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn subject(&self) -> &SubjectKind {
        &self.subject
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn careers(&self) -> &[String] {
        self.careers.as_slice()
    }

    pub fn images(&self) -> &[CareerImage] {
        &self.images
    }

    pub fn cached_plan(&self, career: &str) -> Option<&CareerPlan> {
        self.plan_cache.get(career)
    }

    pub fn cached_plan_count(&self) -> usize {
        self.plan_cache.len()
    }

    pub fn selected_plan(&self) -> Option<&CareerPlan> {
        self.selected_plan.as_ref()
    }

    pub fn selected_career_image(&self) -> Option<&str> {
        self.selected_career_image.as_deref()
    }

    pub fn loading_message(&self) -> Option<&str> {
        self.loading_message.as_deref()
    }

    // ── upload ──────────────────────────────────────────────────────────────

    /// Validates and stores the photo, then classifies its subject. The step
    /// stays `Upload`; classification failure is absorbed (subject defaults
    /// to human) while a validation failure leaves the session untouched.
    pub async fn attach_photo(&mut self, bytes: Bytes) -> Result<(), AppError> {
        if self.step != Step::Upload {
            return Err(AppError::Validation(
                "A photo can only be attached on the upload screen.".to_string(),
            ));
        }

        let photo = upload::validate_photo(bytes)?;

        self.loading_message = Some("Analyzing subject...".to_string());
        let subject = classify::detect_subject(self.service.as_ref(), &photo).await;
        self.loading_message = None;

        info!("Detected subject: {}", subject.descriptor());
        self.subject = subject;
        self.photo = Some(photo);
        Ok(())
    }

    /// Drops the current photo without touching the career list, so the user
    /// can pick a different picture before generating.
    pub fn clear_photo(&mut self) {
        if self.step == Step::Upload {
            self.photo = None;
            self.subject = SubjectKind::Human;
        }
    }

    // ── career selection ────────────────────────────────────────────────────

    pub fn add_career(&mut self, name: &str) -> AddOutcome {
        self.careers.add(name)
    }

    pub fn remove_career(&mut self, name: &str) -> bool {
        self.careers.remove(name)
    }

    pub fn surprise_me(&mut self) {
        self.careers.surprise_me()
    }

    // ── portrait generation ─────────────────────────────────────────────────

    /// Runs the whole portrait flow: placeholders, concurrent fan-out,
    /// all-settled join, gallery. Individual failures stay on their cards and
    /// never fail the batch.
    pub async fn generate_images(&mut self) -> Result<(), AppError> {
        let batch = self.start_image_generation()?;
        let photo = self
            .photo
            .clone()
            .ok_or_else(|| AppError::Validation("Upload a photo before generating.".to_string()))?;

        let settled = images::run_batch(Arc::clone(&self.service), &photo, &batch).await;
        self.complete_image_generation(batch.epoch, settled);
        Ok(())
    }

    /// First phase: validates preconditions, creates one loading placeholder
    /// per career, and enters `GeneratingImages`. Returns the prepared batch
    /// tagged with a fresh epoch.
    pub fn start_image_generation(&mut self) -> Result<ImageBatch, AppError> {
        if self.photo.is_none() {
            return Err(AppError::Validation(
                "Upload a photo before generating.".to_string(),
            ));
        }
        if self.careers.is_empty() {
            return Err(AppError::Validation(
                "Pick at least one career first.".to_string(),
            ));
        }

        self.epoch += 1;
        self.images = self
            .careers
            .as_slice()
            .iter()
            .map(|career| CareerImage::placeholder(career))
            .collect();
        self.step = Step::GeneratingImages;
        self.loading_message = Some(format!("Reimagining your {}...", self.subject.descriptor()));

        Ok(images::prepare_batch(
            self.epoch,
            self.careers.as_slice(),
            &self.subject,
        ))
    }

    /// Final phase: applies the settled batch and moves to the gallery. A
    /// batch from a superseded epoch (the session was reset while requests
    /// were in flight) is discarded without touching the fresh state.
    pub fn complete_image_generation(&mut self, batch_epoch: u64, settled: Vec<SettledImage>) {
        if batch_epoch != self.epoch {
            debug!(
                "discarding stale portrait batch (epoch {batch_epoch}, current {})",
                self.epoch
            );
            return;
        }

        for result in settled {
            self.apply_image_outcome(result);
        }
        // Any slot no task reported for still has to settle.
        for image in &mut self.images {
            if image.loading {
                image.fail(CARD_ERROR_LABEL.to_string());
            }
        }

        self.loading_message = None;
        self.step = Step::Gallery;
    }

    fn apply_image_outcome(&mut self, settled: SettledImage) {
        let slot = self
            .images
            .get_mut(settled.index)
            .filter(|image| image.career == settled.career);
        let Some(image) = slot else {
            debug!("no gallery slot for settled career {}", settled.career);
            return;
        };
        match settled.outcome {
            ImageOutcome::Resolved { image_url } => image.resolve(image_url),
            ImageOutcome::Failed { message } => image.fail(message),
        }
    }

    // ── plan view ───────────────────────────────────────────────────────────

    /// Opens the plan for a career from the gallery. A cached plan shows
    /// immediately with no loading state; otherwise the plan is generated,
    /// cached on success, and a failure returns the session to the gallery
    /// with the cache untouched.
    pub async fn select_career(&mut self, career: &str) -> Result<(), AppError> {
        if self.step != Step::Gallery {
            return Err(AppError::Validation(
                "Pick a career from the gallery.".to_string(),
            ));
        }

        self.selected_career_image = self
            .images
            .iter()
            .find(|image| image.career == career)
            .filter(|image| image.has_image())
            .map(|image| image.image_url.clone());

        if let Some(cached) = self.plan_cache.get(career) {
            self.selected_plan = Some(cached.clone());
            self.step = Step::PlanView;
            return Ok(());
        }

        self.step = Step::GeneratingPlan;
        self.loading_message = Some(format!(
            "Drafting plan for {} as {career}...",
            self.subject.descriptor()
        ));

        let result = plan::generate_plan(self.service.as_ref(), &self.subject, career).await;
        self.loading_message = None;

        match result {
            Ok(generated) => {
                // First write wins; a cached career is never regenerated or
                // overwritten within a session.
                let entry = self
                    .plan_cache
                    .entry(career.to_string())
                    .or_insert(generated);
                self.selected_plan = Some(entry.clone());
                self.step = Step::PlanView;
                Ok(())
            }
            Err(e) => {
                self.step = Step::Gallery;
                Err(e)
            }
        }
    }

    /// Back-navigation from the plan view. Keeps the cache and the gallery.
    pub fn back_to_gallery(&mut self) {
        if self.step == Step::PlanView {
            self.step = Step::Gallery;
        }
    }

    /// Full session wipe back to the initial state. Outstanding requests are
    /// not aborted; their eventual completions carry a superseded epoch and
    /// get discarded.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.photo = None;
        self.subject = SubjectKind::Human;
        self.careers.clear();
        self.images.clear();
        self.plan_cache.clear();
        self.selected_plan = None;
        self.selected_career_image = None;
        self.loading_message = None;
        self.step = Step::Upload;
    }
}
