//! Workbench
//!
//! The single state container of a drawing session: the drawing surface,
//! the current prediction, the last status message and the last error.
//!
//! Remote calls are split into `begin_*` (capture a sample and a freshness
//! `Ticket`) and `finish_*` (apply the outcome to whatever the state is by
//! then). The async `predict`/`train` helpers run both halves back to back.
//!
//! Freshness: a ticket is fresh while the raster revision it captured is
//! still current. Any painted segment or clear makes it stale.
//! - predict success is stored only when fresh
//! - train success always reports its status; the workflow reset only
//!   happens when fresh
//! - failures always land in the error slot

use digitpad_canvas::{DrawingSurface, PointerEvent};
use digitpad_net::{ClientError, Digit, InferenceClient, Transport};
use digitpad_sample::{Sample, SampleBuilder, SampleError};

/// User-visible session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    prediction: Option<Digit>,
    status: Option<String>,
    error: Option<String>,
}

impl SessionState {
    pub fn prediction(&self) -> Option<Digit> {
        self.prediction
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin_operation(&mut self) {
        self.status = None;
        self.error = None;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Raster revision captured when a call was dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    revision: u64,
}

impl Ticket {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// A predict call ready to be sent
#[derive(Debug, Clone)]
pub struct PendingPredict {
    pub ticket: Ticket,
    pub sample: Sample,
}

/// A train call ready to be sent
#[derive(Debug, Clone)]
pub struct PendingTrain {
    pub ticket: Ticket,
    pub sample: Sample,
    pub label: Digit,
}

/// Outcome of a successful call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    /// State was updated
    Applied(T),
    /// The raster changed while the call was in flight
    Stale(T),
}

impl<T> Completion<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Completion::Applied(v) | Completion::Stale(v) => v,
        }
    }
}

/// Workbench error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkbenchError {
    #[error("Please predict first before training")]
    MustPredictFirst,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Drawing session coordinator
#[derive(Debug)]
pub struct Workbench<T> {
    surface: DrawingSurface,
    builder: SampleBuilder,
    client: InferenceClient<T>,
    session: SessionState,
}

impl<T: Transport> Workbench<T> {
    pub fn new(surface: DrawingSurface, builder: SampleBuilder, client: InferenceClient<T>) -> Self {
        Self {
            surface,
            builder,
            client,
            session: SessionState::default(),
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn client(&self) -> &InferenceClient<T> {
        &self.client
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn prediction(&self) -> Option<Digit> {
        self.session.prediction
    }

    pub fn error(&self) -> Option<&str> {
        self.session.error()
    }

    pub fn status(&self) -> Option<&str> {
        self.session.status()
    }

    /// Feed a pointer event to the surface. Returns whether pixels changed.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        self.surface.handle(event)
    }

    /// Build a fresh sample from the current raster
    pub fn sample(&self) -> Result<Sample, SampleError> {
        self.builder.build(&self.surface.image_data())
    }

    /// Clear raster, prediction, status and error. Valid in any state.
    pub fn reset(&mut self) {
        self.surface.clear();
        self.session.clear();
        tracing::debug!(revision = self.surface.revision(), "workbench reset");
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            revision: self.surface.revision(),
        }
    }

    fn is_fresh(&self, ticket: Ticket) -> bool {
        ticket.revision == self.surface.revision()
    }

    fn record_error(&mut self, err: WorkbenchError) -> WorkbenchError {
        tracing::warn!(error = %err, "operation failed");
        self.session.error = Some(err.to_string());
        err
    }

    /// Start a predict call
    pub fn begin_predict(&mut self) -> Result<PendingPredict, WorkbenchError> {
        self.session.begin_operation();
        let sample = self.sample().map_err(|e| self.record_error(e.into()))?;
        Ok(PendingPredict {
            ticket: self.ticket(),
            sample,
        })
    }

    /// Apply the outcome of a predict call
    pub fn finish_predict(
        &mut self,
        ticket: Ticket,
        result: Result<Digit, ClientError>,
    ) -> Result<Completion<Digit>, WorkbenchError> {
        let digit = result.map_err(|e| self.record_error(e.into()))?;
        if !self.is_fresh(ticket) {
            tracing::debug!(%digit, "discarding prediction for a changed drawing");
            return Ok(Completion::Stale(digit));
        }
        self.session.prediction = Some(digit);
        Ok(Completion::Applied(digit))
    }

    /// Start a train call labeled with the current prediction.
    ///
    /// Fails without touching the network when nothing was predicted yet.
    pub fn begin_train(&mut self) -> Result<PendingTrain, WorkbenchError> {
        self.session.begin_operation();
        let Some(label) = self.session.prediction else {
            return Err(self.record_error(WorkbenchError::MustPredictFirst));
        };
        let sample = self.sample().map_err(|e| self.record_error(e.into()))?;
        Ok(PendingTrain {
            ticket: self.ticket(),
            sample,
            label,
        })
    }

    /// Apply the outcome of a train call
    pub fn finish_train(
        &mut self,
        ticket: Ticket,
        result: Result<String, ClientError>,
    ) -> Result<Completion<String>, WorkbenchError> {
        let status = result.map_err(|e| self.record_error(e.into()))?;
        let completion = if self.is_fresh(ticket) {
            self.reset();
            Completion::Applied(status.clone())
        } else {
            tracing::debug!("drawing changed during training; keeping it");
            Completion::Stale(status.clone())
        };
        self.session.status = Some(status);
        Ok(completion)
    }

    /// Predict the current drawing
    pub async fn predict(&mut self) -> Result<Digit, WorkbenchError> {
        let pending = self.begin_predict()?;
        let result = self.client.predict(&pending.sample).await;
        self.finish_predict(pending.ticket, result).map(Completion::into_inner)
    }

    /// Submit the current drawing labeled with the current prediction
    pub async fn train(&mut self) -> Result<String, WorkbenchError> {
        let pending = self.begin_train()?;
        let result = self.client.train(&pending.sample, pending.label).await;
        self.finish_train(pending.ticket, result).map(Completion::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion() {
        assert!(Completion::Applied(1).is_applied());
        assert!(!Completion::Stale(1).is_applied());
        assert_eq!(Completion::Stale("ok").into_inner(), "ok");
    }

    #[test]
    fn test_session_state_clear() {
        let mut state = SessionState {
            prediction: Digit::new(3),
            status: Some("ok".into()),
            error: Some("boom".into()),
        };
        state.begin_operation();
        assert_eq!(state.prediction(), Digit::new(3));
        assert_eq!(state.status(), None);
        assert_eq!(state.error(), None);

        state.clear();
        assert_eq!(state, SessionState::default());
    }
}
