/// The analysis lifecycle state machine
///
/// Owns the five mutually exclusive UI states and all transition rules:
/// which view is rendered, when an outbound analysis call may be issued,
/// and whether a resolution that arrives later is still worth applying.
///
/// Concurrency policy lives here and nowhere else: at most one analysis
/// call is in flight and honored at a time. The rule is enforced by the
/// match on `Lifecycle::Loading`, not by a separate boolean flag, so it
/// cannot drift out of sync with the rendered state.

use crate::analysis::AnalysisRequest;
use crate::state::data::{AnalysisReport, SelectedImage};

/// The one user-facing message for any collaborator failure.
/// Internal detail is logged where the resolution is handled, never shown.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze the image. The AI may be unable to process this image, \
     or an internal error occurred. Please try a different image.";

/// Local validation error when analysis is requested with no image.
pub const NO_IMAGE_MESSAGE: &str = "Please upload an image first.";

/// The mutually exclusive states driving the UI.
///
/// A report or error is only ever attached alongside the image that
/// produced it; accepting a new image or clearing discards both.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle {
    /// No image selected
    Idle,
    /// An image is held and can be analyzed
    Ready { image: SelectedImage },
    /// One analysis call is in flight for the held image
    Loading { image: SelectedImage },
    /// The last call produced a report for the held image
    Success {
        image: SelectedImage,
        report: AnalysisReport,
    },
    /// The last call failed; `error` is the fixed user-facing message
    Failed { image: SelectedImage, error: String },
}

/// An analysis call the machine has decided to issue.
///
/// `generation` must be echoed back with the resolution; the machine
/// applies the result only if the generation is still current.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub request: AnalysisRequest,
    pub generation: u64,
}

/// State machine owning the upload -> analyze -> render lifecycle.
pub struct AnalysisLifecycle {
    state: Lifecycle,
    /// Monotonic counter tagging the in-flight call. Bumped by every
    /// event that invalidates a pending resolution (new call, new image,
    /// clear), so a stale resolution never matches and is discarded.
    generation: u64,
    /// Local input error (bad file, analyze-with-no-image). Surfaced by
    /// the UI without a state transition.
    validation_error: Option<String>,
}

impl AnalysisLifecycle {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Idle,
            generation: 0,
            validation_error: None,
        }
    }

    pub fn state(&self) -> &Lifecycle {
        &self.state
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// The currently held image, if any.
    pub fn image(&self) -> Option<&SelectedImage> {
        match &self.state {
            Lifecycle::Idle => None,
            Lifecycle::Ready { image }
            | Lifecycle::Loading { image }
            | Lifecycle::Success { image, .. }
            | Lifecycle::Failed { image, .. } => Some(image),
        }
    }

    /// A validated image arrived from either input channel.
    ///
    /// Always lands in `Ready` holding only the new image; any prior
    /// report, error, or in-flight call is discarded.
    pub fn image_accepted(&mut self, image: SelectedImage) {
        self.generation += 1;
        self.validation_error = None;
        self.state = Lifecycle::Ready { image };
    }

    /// The input channels rejected a file (non-image, unreadable).
    ///
    /// Surfaces a visible error without touching the held state, so a
    /// bad drop while a previous image is shown does not lose it.
    pub fn input_rejected(&mut self, error: String) {
        self.validation_error = Some(error);
    }

    /// The user asked for an analysis.
    ///
    /// Returns the call to issue, or `None` when no call may be made:
    /// - `Idle`: local validation error, no outbound call
    /// - `Loading`: already in flight, the request is ignored (not queued)
    /// - otherwise: transition to `Loading` and issue one call; from
    ///   `Success`/`Failed` this is the retry path
    pub fn analyze_requested(&mut self) -> Option<PendingAnalysis> {
        match &self.state {
            Lifecycle::Idle => {
                self.validation_error = Some(NO_IMAGE_MESSAGE.to_string());
                None
            }
            Lifecycle::Loading { .. } => None,
            Lifecycle::Ready { image }
            | Lifecycle::Success { image, .. }
            | Lifecycle::Failed { image, .. } => {
                let image = image.clone();
                self.generation += 1;
                self.validation_error = None;
                let pending = PendingAnalysis {
                    request: AnalysisRequest::from_image(&image),
                    generation: self.generation,
                };
                self.state = Lifecycle::Loading { image };
                Some(pending)
            }
        }
    }

    /// A call resolved with a report. Applied only if it carries the
    /// current generation and we are still waiting for it.
    pub fn call_succeeded(&mut self, generation: u64, report: AnalysisReport) {
        if generation != self.generation {
            return;
        }
        if let Lifecycle::Loading { image } = &self.state {
            self.state = Lifecycle::Success {
                image: image.clone(),
                report,
            };
        }
    }

    /// A call failed. The stored error is always the fixed generic
    /// message; the caller logs the detail before invoking this.
    pub fn call_failed(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        if let Lifecycle::Loading { image } = &self.state {
            self.state = Lifecycle::Failed {
                image: image.clone(),
                error: ANALYSIS_FAILED_MESSAGE.to_string(),
            };
        }
    }

    /// Reset to `Idle` from any state, discarding image, report, and
    /// errors. Bumps the generation so in-flight resolutions die stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.validation_error = None;
        self.state = Lifecycle::Idle;
    }
}

impl Default for AnalysisLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
