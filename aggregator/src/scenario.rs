//! Scripted collaborator updates for the demo binary
//!
//! A scenario is a JSON list of steps, each publishing one snapshot into an
//! in-memory collaborator or failing one of them.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{Catalog, SourceId, SourceKind};
use tracing::debug;

use crate::error::{AggregatorError, AggregatorResult};
use crate::services::{InMemoryCatalogRepository, InMemoryLibraryRepository};

/// One scripted update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ScenarioStep {
    Internal { catalogs: Vec<Catalog> },
    Installed { catalogs: Vec<Catalog> },
    Favorites { ids: Vec<SourceId> },
    Fail { origin: SourceKind, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn from_json(json: &str) -> AggregatorResult<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        if scenario.steps.is_empty() {
            return Err(AggregatorError::scenario("scenario has no steps"));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> AggregatorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Publish every step in order, then complete all sources
    pub async fn play(
        &self,
        catalogs: &InMemoryCatalogRepository,
        library: &InMemoryLibraryRepository,
        step_delay: Duration,
    ) {
        for (index, step) in self.steps.iter().enumerate() {
            debug!(step = index, "Replaying scenario step");
            step.apply(catalogs, library);

            if step_delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(step_delay).await;
            }
        }

        catalogs.complete();
        library.complete();
    }
}

impl ScenarioStep {
    pub fn apply(&self, catalogs: &InMemoryCatalogRepository, library: &InMemoryLibraryRepository) {
        match self {
            ScenarioStep::Internal { catalogs: snapshot } => {
                catalogs.publish_internal(snapshot.clone());
            }
            ScenarioStep::Installed { catalogs: snapshot } => {
                catalogs.publish_installed(snapshot.clone());
            }
            ScenarioStep::Favorites { ids } => {
                library.publish_favorites(ids.clone());
            }
            ScenarioStep::Fail { origin, message } => match origin {
                SourceKind::Internal => catalogs.fail_internal(message.clone()),
                SourceKind::Installed => catalogs.fail_installed(message.clone()),
                SourceKind::Favorites => library.fail(message.clone()),
            },
        }
    }
}
