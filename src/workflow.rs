//! Generic "collect input, process for a while, show a result" state machine.
//!
//! Resume analysis, video analysis and the live interview are all the same shape,
//! so each supplies a [`Workflow`] and reuses [`PhaseMachine`] for the
//! `Idle -> Processing -> Done` transitions and the processing deadline.

use std::fmt;
use std::time::Duration;

use log::debug;

use crate::PrepVistaError;
use crate::scheduler::{Scheduler, TimerId};

/// Input predicate, processing delay and result producer for a [`PhaseMachine`].
pub trait Workflow {
    /// Data collected before processing starts and carried through it.
    type Session;
    /// The structured result shown once processing finishes.
    type Report;

    /// Name used in logs and transition errors.
    fn name(&self) -> &'static str;

    fn validate(&self, session: &Self::Session) -> Result<(), PrepVistaError>;

    /// Fixed delay after which processing completes, or `None` when the owner
    /// decides when to complete.
    fn processing_delay(&self, session: &Self::Session) -> Option<Duration>;

    fn finish(&self, session: &Self::Session) -> Self::Report;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<S, R> {
    Idle,
    Processing(S),
    Done { session: S, report: R },
}

impl<S, R> Phase<S, R> {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Processing(_) => "processing",
            Phase::Done { .. } => "done",
        }
    }
}

pub struct PhaseMachine<W: Workflow> {
    workflow: W,
    phase: Phase<W::Session, W::Report>,
    deadline: Option<TimerId>,
}

impl<W> fmt::Debug for PhaseMachine<W>
where
    W: Workflow,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseMachine")
            .field("workflow", &self.workflow.name())
            .field("phase", &self.phase.label())
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl<W: Workflow> PhaseMachine<W> {
    pub fn new(workflow: W) -> Self {
        Self {
            workflow,
            phase: Phase::Idle,
            deadline: None,
        }
    }

    pub fn workflow(&self) -> &W {
        &self.workflow
    }

    pub fn phase(&self) -> &Phase<W::Session, W::Report> {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Processing(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done { .. })
    }

    pub fn session(&self) -> Option<&W::Session> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Processing(session) | Phase::Done { session, .. } => Some(session),
        }
    }

    /// Mutable access to the session while it is being processed.
    pub fn session_mut(&mut self) -> Option<&mut W::Session> {
        match &mut self.phase {
            Phase::Processing(session) => Some(session),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&W::Report> {
        match &self.phase {
            Phase::Done { report, .. } => Some(report),
            _ => None,
        }
    }

    /// `Idle -> Processing`. Validates the session and, if the workflow has a fixed
    /// delay, schedules `on_deadline` on the caller's scheduler.
    pub fn begin<E: Clone>(
        &mut self,
        session: W::Session,
        scheduler: &mut Scheduler<E>,
        on_deadline: E,
    ) -> Result<(), PrepVistaError> {
        if !self.is_idle() {
            return Err(PrepVistaError::invalid_transition(
                self.workflow.name(),
                "begin",
                self.phase.label(),
            ));
        }
        self.workflow.validate(&session)?;

        self.deadline = self
            .workflow
            .processing_delay(&session)
            .map(|delay| scheduler.schedule_once(delay, on_deadline));
        debug!("{}: idle -> processing", self.workflow.name());
        self.phase = Phase::Processing(session);
        Ok(())
    }

    /// `Processing -> Done`. Cancels the deadline if it has not fired yet.
    pub fn complete<E: Clone>(
        &mut self,
        scheduler: &mut Scheduler<E>,
    ) -> Result<&W::Report, PrepVistaError> {
        let session = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Processing(session) => session,
            other => {
                let label = other.label();
                self.phase = other;
                return Err(PrepVistaError::invalid_transition(
                    self.workflow.name(),
                    "complete",
                    label,
                ));
            }
        };

        if let Some(id) = self.deadline.take() {
            scheduler.cancel(id);
        }
        let report = self.workflow.finish(&session);
        debug!("{}: processing -> done", self.workflow.name());
        self.phase = Phase::Done { session, report };
        self.report().ok_or_else(|| {
            PrepVistaError::invalid_transition(self.workflow.name(), "complete", self.phase.label())
        })
    }

    /// Any phase -> `Idle`, dropping the session and any pending deadline.
    pub fn reset<E: Clone>(&mut self, scheduler: &mut Scheduler<E>) {
        if let Some(id) = self.deadline.take() {
            scheduler.cancel(id);
        }
        if !self.is_idle() {
            debug!("{}: {} -> idle", self.workflow.name(), self.phase.label());
        }
        self.phase = Phase::Idle;
    }

    /// Timer handle of the pending processing deadline, if any.
    pub fn deadline(&self) -> Option<TimerId> {
        self.deadline
    }
}
