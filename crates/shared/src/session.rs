use serde::{Deserialize, Serialize};

use crate::grid;
use crate::models::{PlacedEntity, PlacementArtifact, Position, UserPositions};
use crate::scoring::{self, ScoreResult, ScoringConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Placing,
    Submitted,
}

/// One round of the placement game.
///
/// Positions start out holding only the reference entities, pinned at their
/// correct spots. Scoring reads a snapshot of the positions and never writes
/// them back.
#[derive(Debug, Clone)]
pub struct GameSession {
    entities: Vec<PlacedEntity>,
    config: ScoringConfig,
    positions: UserPositions,
    phase: GamePhase,
    last_score: Option<ScoreResult>,
    solution_shown: bool,
}

fn seeded_positions(entities: &[PlacedEntity], config: &ScoringConfig) -> UserPositions {
    entities
        .iter()
        .filter(|e| config.is_reference(&e.name))
        .map(|e| (e.name.clone(), e.correct_position.into()))
        .collect()
}

impl GameSession {
    pub fn new(entities: Vec<PlacedEntity>, config: ScoringConfig) -> Self {
        let positions = seeded_positions(&entities, &config);
        GameSession {
            entities,
            config,
            positions,
            phase: GamePhase::Placing,
            last_score: None,
            solution_shown: false,
        }
    }

    pub fn from_artifact(artifact: &PlacementArtifact, config: ScoringConfig) -> Self {
        Self::new(artifact.countries.clone(), config)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn positions(&self) -> &UserPositions {
        &self.positions
    }

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn last_score(&self) -> Option<&ScoreResult> {
        self.last_score.as_ref()
    }

    pub fn solution_shown(&self) -> bool {
        self.solution_shown
    }

    fn entity(&self, name: &str) -> Option<&PlacedEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Record a drag. Returns false (and changes nothing) for unknown names.
    pub fn place(&mut self, name: &str, position: Position) -> bool {
        if self.entity(name).is_none() {
            return false;
        }
        self.positions.insert(name.to_string(), position);
        true
    }

    /// Put an entity on its staging slot.
    pub fn place_at_default(&mut self, name: &str) -> bool {
        match self.entity(name) {
            Some(e) => {
                let pos: Position = e.default_position.into();
                self.place(name, pos)
            }
            None => false,
        }
    }

    /// Drop an entity picked from the "add country" list.
    pub fn add_from_list(&mut self, name: &str) -> bool {
        self.place(name, grid::DROP_POINT.into())
    }

    /// Move every entity onto its correct position.
    pub fn show_solution(&mut self) {
        self.positions = self
            .entities
            .iter()
            .map(|e| (e.name.clone(), e.correct_position.into()))
            .collect();
        self.solution_shown = true;
    }

    /// Score the current positions without submitting.
    pub fn live_scores(&self) -> ScoreResult {
        scoring::score(&self.positions, &self.entities, &self.config)
    }

    /// Score and move to `Submitted`. Can be called again after more drags.
    pub fn submit(&mut self) -> &ScoreResult {
        let result = self.live_scores();
        self.phase = GamePhase::Submitted;
        self.last_score.insert(result)
    }

    /// Back to the seeded positions and the `Placing` phase.
    pub fn reset(&mut self) {
        self.positions = seeded_positions(&self.entities, &self.config);
        self.phase = GamePhase::Placing;
        self.last_score = None;
        self.solution_shown = false;
    }

    /// Entities the player has not put anywhere yet, in artifact order.
    pub fn unplaced(&self) -> Vec<&PlacedEntity> {
        self.entities
            .iter()
            .filter(|e| !self.positions.contains_key(&e.name))
            .collect()
    }
}
