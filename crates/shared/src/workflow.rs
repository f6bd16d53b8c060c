//! Pick-a-point-then-fill-a-form flow for creating smokes.
//!
//! The controller is plain data so the page can keep it in a single signal.
//! Submission is split into [`AnnotationFlow::begin_submit`] and
//! [`AnnotationFlow::finish_submit`] so no borrow of that signal has to be
//! held across the network call; [`AnnotationFlow::submit`] composes the two
//! for callers that own the flow outright.

use crate::error::{FormError, ServiceError};
use crate::form::SmokeDraft;
use crate::models::{CreateSmokeData, Floor, MapId, PercentPoint, Smoke, SmokeId};

/// Mutation side of the smokes API, injected so tests can use a fake.
#[allow(async_fn_in_trait)]
pub trait SmokeService {
    async fn create(&self, data: &CreateSmokeData) -> Result<Smoke, ServiceError>;
    async fn delete(&self, id: SmokeId) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    /// Viewer clicks produce a candidate point.
    Picking,
    /// Creation dialog open with a picked point.
    Reviewing,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationFlow {
    state: FlowState,
    pending_point: Option<PercentPoint>,
    pub draft: SmokeDraft,
    submitting: bool,
    error: Option<String>,
}

impl AnnotationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn pending_point(&self) -> Option<PercentPoint> {
        self.pending_point
    }

    pub fn pick_mode_enabled(&self) -> bool {
        self.state == FlowState::Picking
    }

    pub fn dialog_open(&self) -> bool {
        self.state == FlowState::Reviewing
    }

    /// Marker clicks open details only outside of pick mode.
    pub fn accepts_marker_clicks(&self) -> bool {
        self.state != FlowState::Picking
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter pick mode. Closes the dialog and discards any earlier point.
    ///
    /// `floor` is the radar being picked on; when set, the draft takes it so
    /// the new smoke lands on the floor it was placed on.
    pub fn begin_pick(&mut self, floor: Option<Floor>) {
        if self.submitting {
            return;
        }
        if floor.is_some() {
            self.draft.floor = floor;
        }
        self.state = FlowState::Picking;
        self.pending_point = None;
        self.error = None;
    }

    /// Store a picked point and open the dialog.
    ///
    /// Ignored while idle; a second pick overwrites the first. Returns whether
    /// the point was taken.
    pub fn pick(&mut self, point: PercentPoint) -> bool {
        match self.state {
            FlowState::Idle => false,
            FlowState::Picking | FlowState::Reviewing => {
                if self.submitting {
                    return false;
                }
                tracing::debug!(x = point.x, y = point.y, "picked point");
                self.pending_point = Some(point);
                self.state = FlowState::Reviewing;
                true
            }
        }
    }

    /// Back to idle from either active state. The draft is kept for the next attempt.
    pub fn cancel(&mut self) {
        if self.submitting {
            return;
        }
        self.state = FlowState::Idle;
        self.pending_point = None;
        self.error = None;
    }

    /// Current validation result, used to enable the submit button.
    pub fn validation(&self) -> Result<(), FormError> {
        self.draft.check(self.pending_point)
    }

    pub fn can_submit(&self) -> bool {
        self.dialog_open() && !self.submitting && self.validation().is_ok()
    }

    /// Validate and mark a submission in flight.
    ///
    /// Fails without side effects when not reviewing, already submitting or the
    /// form is incomplete.
    pub fn begin_submit(
        &mut self,
        map_id: MapId,
        map_has_floors: bool,
    ) -> Result<CreateSmokeData, FormError> {
        if self.state != FlowState::Reviewing {
            return Err(FormError::NotReviewing);
        }
        if self.submitting {
            return Err(FormError::SubmitInFlight);
        }
        let payload = self
            .draft
            .to_payload(self.pending_point, map_id, map_has_floors)?;
        self.submitting = true;
        self.error = None;
        Ok(payload)
    }

    /// Apply the result of the create call started by `begin_submit`.
    ///
    /// Success resets to idle with a fresh draft. Failure stays in review with
    /// the point and draft intact and the message stored for display.
    pub fn finish_submit(&mut self, result: Result<Smoke, ServiceError>) -> Option<Smoke> {
        self.submitting = false;
        match result {
            Ok(smoke) => {
                tracing::info!(id = smoke.id, "smoke created");
                self.state = FlowState::Idle;
                self.pending_point = None;
                self.draft = SmokeDraft::default();
                self.error = None;
                Some(smoke)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create smoke failed");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub async fn submit<S: SmokeService>(
        &mut self,
        service: &S,
        map_id: MapId,
        map_has_floors: bool,
    ) -> Result<Option<Smoke>, FormError> {
        let payload = self.begin_submit(map_id, map_has_floors)?;
        let result = service.create(&payload).await;
        Ok(self.finish_submit(result))
    }
}
