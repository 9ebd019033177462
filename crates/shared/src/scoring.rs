use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{PlacedEntity, Position, UserPositions};

/// Canvas distance at which a placement is worth nothing.
pub const MAX_DISTANCE: f64 = 500.0;

pub const PERFECT_SCORE: u32 = 100;

/// Seeded onto the map at session start and left out of the aggregate.
pub const REFERENCE_ENTITIES: [&str; 3] = ["India", "United States of America", "UK"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Must be positive and finite. Anything else scores every placement 0.
    pub max_distance: f64,
    pub reference_entities: Vec<String>,
    /// Lowest score counted as "correct".
    pub correct_threshold: u32,
    /// Lowest score counted as "almost there".
    pub almost_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            max_distance: MAX_DISTANCE,
            reference_entities: REFERENCE_ENTITIES.iter().map(|s| s.to_string()).collect(),
            correct_threshold: 80,
            almost_threshold: 50,
        }
    }
}

impl ScoringConfig {
    pub fn is_reference(&self, name: &str) -> bool {
        self.reference_entities.iter().any(|r| r == name)
    }
}

/// Outcome for a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EntityScore {
    Placed { score: u32 },
    /// No usable user position. Worth 0 in the aggregate.
    Unplaced,
    /// Pre-placed orientation entity; shown as perfect, never aggregated.
    Reference,
}

impl EntityScore {
    /// Display value: 0..=100.
    pub fn points(&self) -> u32 {
        match self {
            EntityScore::Placed { score } => *score,
            EntityScore::Unplaced => 0,
            EntityScore::Reference => PERFECT_SCORE,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, EntityScore::Placed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub correct: usize,
    pub almost_there: usize,
    pub off: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub individual_scores: BTreeMap<String, EntityScore>,
    /// Sum of the unrounded per-entity scores, rounded once.
    pub total_score: u32,
    pub max_score: u32,
    /// Mean per-entity score. 100 when nothing is scoreable.
    pub percentage: u32,
    pub countries_scored: usize,
}

impl ScoreResult {
    pub fn get(&self, name: &str) -> Option<EntityScore> {
        self.individual_scores.get(name).copied()
    }

    pub fn is_correct(&self, name: &str, config: &ScoringConfig) -> bool {
        matches!(self.get(name), Some(EntityScore::Placed { score }) if score >= config.correct_threshold)
    }

    /// Bucket the entities the player actually placed.
    pub fn breakdown(&self, config: &ScoringConfig) -> Breakdown {
        let mut out = Breakdown::default();
        for score in self.individual_scores.values().filter(|s| s.is_placed()) {
            let points = score.points();
            if points >= config.correct_threshold {
                out.correct += 1;
            } else if points >= config.almost_threshold {
                out.almost_there += 1;
            } else {
                out.off += 1;
            }
        }
        out
    }

    /// Best placements first, ties by name. Unplaced and reference entities
    /// are left out.
    pub fn top_scores(&self, n: usize) -> Vec<(&str, u32)> {
        let mut placed: Vec<(&str, u32)> = self
            .individual_scores
            .iter()
            .filter(|(_, s)| s.is_placed())
            .map(|(name, s)| (name.as_str(), s.points()))
            .collect();
        placed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        placed.truncate(n);
        placed
    }
}

/// Euclidean distance between two canvas positions.
pub fn distance(a: Position, b: Position) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Unrounded score: linear from 100 at the exact spot down to 0 at
/// `max_distance` and beyond. Always 0 unless `max_distance` is positive
/// and finite.
fn raw_score(user: Position, correct: Position, max_distance: f64) -> f64 {
    if !(max_distance > 0.0 && max_distance.is_finite()) {
        return 0.0;
    }
    let normalized = (distance(user, correct) / max_distance).clamp(0.0, 1.0);
    (100.0 * (1.0 - normalized)).max(0.0)
}

/// Rounded score for one placement.
pub fn placement_score(user: Position, correct: Position, max_distance: f64) -> u32 {
    raw_score(user, correct, max_distance).round() as u32
}

/// Score every entity in `entities` against the player's positions.
///
/// Pure: safe to call on every drag event. Entities with no entry (or a
/// non-finite one) in `user_positions` are `Unplaced`. User positions for
/// names not in `entities` are ignored.
pub fn score(
    user_positions: &UserPositions,
    entities: &[PlacedEntity],
    config: &ScoringConfig,
) -> ScoreResult {
    let mut individual_scores = BTreeMap::new();
    let mut total = 0.0;
    let mut countries_scored = 0usize;

    for entity in entities {
        if config.is_reference(&entity.name) {
            individual_scores.insert(entity.name.clone(), EntityScore::Reference);
            continue;
        }
        countries_scored += 1;

        let entry = match user_positions.get(&entity.name) {
            Some(pos) if pos.is_finite() => {
                let raw = raw_score(*pos, entity.correct_position.into(), config.max_distance);
                total += raw;
                EntityScore::Placed {
                    score: raw.round() as u32,
                }
            }
            _ => EntityScore::Unplaced,
        };
        individual_scores.insert(entity.name.clone(), entry);
    }

    let max_score = countries_scored as u32 * PERFECT_SCORE;
    let percentage = if countries_scored == 0 {
        PERFECT_SCORE
    } else {
        (total / max_score as f64 * 100.0).round() as u32
    };

    ScoreResult {
        individual_scores,
        total_score: total.round() as u32,
        max_score,
        percentage,
        countries_scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GpsCoordinate, PixelPosition};

    fn entity(name: &str, x: i32, y: i32) -> PlacedEntity {
        PlacedEntity {
            name: name.to_string(),
            capital: String::new(),
            correct_position: PixelPosition { x, y },
            gps_coordinates: GpsCoordinate {
                latitude: 0.0,
                longitude: 0.0,
            },
            population: 0,
            color: "#000000".to_string(),
            default_position: PixelPosition { x: 50, y: 50 },
        }
    }

    fn at(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    fn positions(entries: &[(&str, Position)]) -> UserPositions {
        entries.iter().map(|(n, p)| (n.to_string(), *p)).collect()
    }

    #[test]
    fn test_distance_diagonal() {
        assert!((distance(at(0.0, 0.0), at(3.0, 4.0)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_placement_is_perfect() {
        let entities = [entity("France", 455, 175)];
        let user = positions(&[("France", at(455.0, 175.0))]);
        let result = score(&user, &entities, &ScoringConfig::default());

        assert_eq!(result.get("France"), Some(EntityScore::Placed { score: 100 }));
        assert_eq!(result.percentage, 100);
        assert_eq!(result.total_score, 100);
        assert_eq!(result.max_score, 100);
        assert_eq!(result.countries_scored, 1);
    }

    #[test]
    fn test_half_max_distance_scores_fifty() {
        let entities = [entity("France", 100, 100)];
        let user = positions(&[("France", at(250.0, 300.0))]); // 150-200-250
        let result = score(&user, &entities, &ScoringConfig::default());
        assert_eq!(result.get("France"), Some(EntityScore::Placed { score: 50 }));
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn test_far_placement_floors_at_zero() {
        for d in [500.0, 501.0, 10_000.0] {
            assert_eq!(placement_score(at(d, 0.0), at(0.0, 0.0), MAX_DISTANCE), 0);
        }
    }

    #[test]
    fn test_rounding_to_nearest() {
        assert_eq!(placement_score(at(1.0, 0.0), at(0.0, 0.0), MAX_DISTANCE), 100); // 99.8
        assert_eq!(placement_score(at(3.0, 0.0), at(0.0, 0.0), MAX_DISTANCE), 99); // 99.4
    }

    #[test]
    fn test_non_positive_max_distance_scores_zero() {
        for max in [-500.0, 0.0, f64::NAN, f64::INFINITY] {
            assert_eq!(placement_score(at(250.0, 0.0), at(0.0, 0.0), max), 0);
            assert_eq!(placement_score(at(0.0, 0.0), at(0.0, 0.0), max), 0);
        }

        let config: ScoringConfig = serde_json::from_str(r#"{ "maxDistance": -500 }"#).unwrap();
        let entities = [entity("France", 0, 0)];
        let user = positions(&[("France", at(250.0, 0.0))]);
        let result = score(&user, &entities, &config);
        assert_eq!(result.get("France"), Some(EntityScore::Placed { score: 0 }));
        assert_eq!(result.total_score, 0);
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_unplaced_counts_as_zero() {
        let entities = [entity("A", 0, 0), entity("B", 0, 0)];
        let user = positions(&[("A", at(0.0, 0.0))]);
        let result = score(&user, &entities, &ScoringConfig::default());

        assert_eq!(result.get("B"), Some(EntityScore::Unplaced));
        assert_eq!(result.countries_scored, 2);
        assert_eq!(result.max_score, 200);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn test_non_finite_position_is_unplaced() {
        let entities = [entity("A", 0, 0)];
        let user = positions(&[("A", at(f64::NAN, 0.0))]);
        let result = score(&user, &entities, &ScoringConfig::default());
        assert_eq!(result.get("A"), Some(EntityScore::Unplaced));
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_unknown_user_positions_are_ignored() {
        let entities = [entity("A", 0, 0)];
        let user = positions(&[("A", at(0.0, 0.0)), ("Atlantis", at(1.0, 1.0))]);
        let result = score(&user, &entities, &ScoringConfig::default());
        assert!(result.get("Atlantis").is_none());
        assert_eq!(result.countries_scored, 1);
    }

    #[test]
    fn test_percentage_uses_unrounded_total() {
        // 99.4 + 99.4 = 198.8 -> total 199, mean 99.4 -> 99
        let entities = [entity("A", 0, 0), entity("B", 0, 0)];
        let user = positions(&[("A", at(3.0, 0.0)), ("B", at(0.0, 3.0))]);
        let result = score(&user, &entities, &ScoringConfig::default());
        assert_eq!(result.total_score, 199);
        assert_eq!(result.percentage, 99);
    }

    #[test]
    fn test_reference_entities_never_affect_aggregate() {
        let entities = [
            entity("India", 643, 250),
            entity("UK", 450, 199),
            entity("France", 455, 175),
        ];
        let config = ScoringConfig::default();

        let without = score(&positions(&[("France", at(455.0, 425.0))]), &entities, &config);
        let far_off = score(
            &positions(&[
                ("France", at(455.0, 425.0)),
                ("India", at(-5000.0, 9000.0)),
                ("UK", at(450.0, 199.0)),
            ]),
            &entities,
            &config,
        );

        for result in [&without, &far_off] {
            assert_eq!(result.countries_scored, 1);
            assert_eq!(result.max_score, 100);
            assert_eq!(result.total_score, 50);
            assert_eq!(result.percentage, 50);
            assert_eq!(result.get("India"), Some(EntityScore::Reference));
            assert_eq!(result.get("UK").map(|s| s.points()), Some(100));
        }
    }

    #[test]
    fn test_missing_reference_entity_is_not_reported() {
        let entities = [entity("France", 0, 0)];
        let result = score(&UserPositions::new(), &entities, &ScoringConfig::default());
        assert!(result.get("India").is_none());
    }

    #[test]
    fn test_only_reference_entities_is_vacuously_perfect() {
        let entities = [entity("India", 1, 1), entity("UK", 2, 2)];
        let result = score(&UserPositions::new(), &entities, &ScoringConfig::default());
        assert_eq!(result.countries_scored, 0);
        assert_eq!(result.max_score, 0);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_empty_reference_list_scores_everything() {
        let config = ScoringConfig {
            reference_entities: Vec::new(),
            ..Default::default()
        };
        let entities = [entity("India", 1, 1)];
        let result = score(&UserPositions::new(), &entities, &config);
        assert_eq!(result.countries_scored, 1);
        assert_eq!(result.get("India"), Some(EntityScore::Unplaced));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let entities = [entity("A", 10, 10), entity("B", 400, 300)];
        let user = positions(&[("A", at(40.0, 50.0))]);
        let config = ScoringConfig::default();
        assert_eq!(score(&user, &entities, &config), score(&user, &entities, &config));
    }

    #[test]
    fn test_breakdown_counts_only_placed() {
        let entities = [
            entity("India", 0, 0),
            entity("A", 0, 0),
            entity("B", 0, 0),
            entity("C", 0, 0),
            entity("D", 0, 0),
        ];
        let user = positions(&[
            ("A", at(50.0, 0.0)),   // 90
            ("B", at(150.0, 0.0)),  // 70
            ("C", at(499.0, 0.0)),  // 0
        ]);
        let config = ScoringConfig::default();
        let result = score(&user, &entities, &config);

        assert_eq!(
            result.breakdown(&config),
            Breakdown {
                correct: 1,
                almost_there: 1,
                off: 1
            }
        );
        assert!(result.is_correct("A", &config));
        assert!(!result.is_correct("B", &config));
        assert!(!result.is_correct("India", &config));
    }

    #[test]
    fn test_top_scores() {
        let entities = [entity("A", 0, 0), entity("B", 0, 0), entity("C", 0, 0), entity("UK", 0, 0)];
        let user = positions(&[
            ("A", at(250.0, 0.0)),
            ("B", at(0.0, 0.0)),
            ("C", at(0.0, 250.0)),
            ("UK", at(0.0, 0.0)),
        ]);
        let result = score(&user, &entities, &ScoringConfig::default());
        assert_eq!(result.top_scores(2), vec![("B", 100), ("A", 50)]);
        assert_eq!(result.top_scores(10).len(), 3);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{ "maxDistance": 250 }"#).unwrap();
        assert_eq!(config.max_distance, 250.0);
        assert_eq!(config.correct_threshold, 80);
        assert!(config.is_reference("UK"));
    }

    #[test]
    fn test_entity_score_wire_format() {
        let json = serde_json::to_value(EntityScore::Placed { score: 42 }).unwrap();
        assert_eq!(json["status"], "placed");
        assert_eq!(json["score"], 42);
        let json = serde_json::to_value(EntityScore::Unplaced).unwrap();
        assert_eq!(json["status"], "unplaced");
    }
}
