use thiserror::Error;

use cohort_shared::MessageError;

use crate::session::InitStage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// An inbound payload could not be decoded; only that message is lost
    #[error("Discarded inbound message: {0}")]
    Message(#[from] MessageError),

    /// `tick` was called before `initialize` (or after `leave`)
    #[error("Session is not initialized. Call `initialize` first")]
    NotInitialized,

    /// Initialization stages could not be ordered
    #[error("Session initialization failed: {0}")]
    Init(#[from] InitError),

    /// Every `roster-request` attempt went unanswered
    #[error("Roster unavailable after {attempts} roster-request attempts")]
    RosterUnavailable { attempts: u32 },
}

/// Errors raised while ordering initialization stages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The declared dependencies form a cycle between these stages
    #[error("Initialization dependency cycle between stages {stages:?}")]
    DependencyCycle { stages: Vec<InitStage> },

    /// A stage depends on a stage that is not part of the plan
    #[error("Initialization stage {stage:?} depends on {dependency:?}, which is not scheduled")]
    MissingDependency {
        stage: InitStage,
        dependency: InitStage,
    },
}
