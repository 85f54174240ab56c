use std::collections::HashSet;

use crate::error::InitError;

/// One step of `SyncSession::initialize`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitStage {
    /// Opens a dispatch sender for the current session generation
    Dispatch,
    /// Binds the local id to the entity registry
    Registry,
    /// Resets the spawn barrier
    Coordinator,
    /// Binds the local id to the publisher and resumes it
    Publisher,
    /// Subscribes to every inbound event
    Subscriptions,
    /// Sends the first `roster-request`
    RosterRequest,
}

impl InitStage {
    pub const ALL: [InitStage; 6] = [
        InitStage::Dispatch,
        InitStage::Registry,
        InitStage::Coordinator,
        InitStage::Publisher,
        InitStage::Subscriptions,
        InitStage::RosterRequest,
    ];

    /// Stages that must have run before this one
    pub fn dependencies(&self) -> &'static [InitStage] {
        match self {
            InitStage::Dispatch | InitStage::Registry => &[],
            InitStage::Coordinator => &[InitStage::Registry],
            InitStage::Publisher => &[InitStage::Registry],
            InitStage::Subscriptions => &[
                InitStage::Dispatch,
                InitStage::Registry,
                InitStage::Coordinator,
            ],
            InitStage::RosterRequest => &[InitStage::Subscriptions, InitStage::Publisher],
        }
    }
}

/// Orders `stages` so every stage comes after its dependencies. Ties keep
/// the order of `stages`.
pub fn resolve_order<F>(stages: &[InitStage], dependencies: F) -> Result<Vec<InitStage>, InitError>
where
    F: Fn(InitStage) -> Vec<InitStage>,
{
    let planned: HashSet<InitStage> = stages.iter().copied().collect();
    for stage in stages {
        for dependency in dependencies(*stage) {
            if !planned.contains(&dependency) {
                return Err(InitError::MissingDependency {
                    stage: *stage,
                    dependency,
                });
            }
        }
    }

    let mut ordered: Vec<InitStage> = Vec::with_capacity(stages.len());
    let mut remaining: Vec<InitStage> = stages.to_vec();

    while !remaining.is_empty() {
        let ready = remaining.iter().position(|stage| {
            dependencies(*stage)
                .iter()
                .all(|dependency| ordered.contains(dependency))
        });

        match ready {
            Some(index) => ordered.push(remaining.remove(index)),
            None => return Err(InitError::DependencyCycle { stages: remaining }),
        }
    }

    Ok(ordered)
}
