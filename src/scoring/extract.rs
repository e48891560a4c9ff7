use std::collections::BTreeMap;

use serde_json::Value;

use crate::slate::{
    EntityType, Exclusion, ExclusionReason, ExtValue, MalformedExtra, Position, PositionData,
    SlateInput,
};

use super::config::ScoringConfig;

/// Confidence multiplier per missing tracked optional field.
const MISSING_FIELD_PENALTY: f64 = 0.95;
/// Confidence multiplier applied once when the extras bag held malformed data.
const MALFORMED_EXTRAS_PENALTY: f64 = 0.90;

/// Statuses that take an entity off the slate entirely.
const INACTIVE_STATUSES: [&str; 3] = ["O", "OUT", "IR"];

/// Uniform per-entity view the evaluators work from. Built fresh each run;
/// never mutates the input records.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    pub entity_id: String,
    pub name: String,
    pub position: Position,
    pub entity_type: EntityType,
    pub team_id: Option<String>,
    pub opp_team_id: Option<String>,
    pub salary: u32,
    pub median: f64,
    pub floor: Option<f64>,
    pub ceiling: Option<f64>,
    pub ownership: Option<f64>,
    pub snap_share: Option<f64>,
    pub route_share: Option<f64>,
    pub touch_share: Option<f64>,
    /// Projected points per $1k of salary.
    pub value: f64,
    pub data: PositionData,
    pub extras: BTreeMap<String, ExtValue>,
    /// Scalar in (0, 1]; scales cash_score for entities scored on thin data.
    pub confidence: f64,
}

impl FeatureVector {
    pub fn extra_flag(&self, key: &str) -> bool {
        self.extras.get(key).and_then(ExtValue::as_bool).unwrap_or(false)
    }
}

#[derive(Debug)]
pub struct Extraction {
    pub vectors: Vec<FeatureVector>,
    pub exclusions: Vec<Exclusion>,
    pub malformed: Vec<MalformedExtra>,
}

/// Translate raw slate records into feature vectors.
///
/// Entities missing a mandatory field (positive salary, median projection)
/// or carrying an inactive status are excluded and reported, never silently
/// dropped. Optional fields stay absent; each missing tracked field costs
/// confidence, as does a malformed extras payload.
pub fn extract_slate(input: &SlateInput, config: &ScoringConfig) -> Extraction {
    let mut vectors = Vec::new();
    let mut exclusions = Vec::new();
    let mut malformed = Vec::new();

    for record in &input.entities {
        let position = record.features.position();

        if let Some(status) = &record.shared.status {
            let status = status.trim().to_ascii_uppercase();
            if INACTIVE_STATUSES.contains(&status.as_str()) {
                exclusions.push(Exclusion {
                    entity_id: record.entity_id.clone(),
                    name: record.name.clone(),
                    position,
                    reason: ExclusionReason::InactiveStatus,
                    detail: format!("status is '{status}'"),
                });
                continue;
            }
        }

        let salary = match record.shared.salary {
            Some(s) if s > 0 => s,
            Some(s) => {
                exclusions.push(Exclusion {
                    entity_id: record.entity_id.clone(),
                    name: record.name.clone(),
                    position,
                    reason: ExclusionReason::MissingMandatoryField,
                    detail: format!("salary must be positive, got {s}"),
                });
                continue;
            }
            None => {
                exclusions.push(Exclusion {
                    entity_id: record.entity_id.clone(),
                    name: record.name.clone(),
                    position,
                    reason: ExclusionReason::MissingMandatoryField,
                    detail: "salary is missing".to_string(),
                });
                continue;
            }
        };

        let median = match record.shared.proj_points_median {
            Some(m) if m.is_finite() => m,
            _ => {
                exclusions.push(Exclusion {
                    entity_id: record.entity_id.clone(),
                    name: record.name.clone(),
                    position,
                    reason: ExclusionReason::MissingMandatoryField,
                    detail: "proj_points_median is missing".to_string(),
                });
                continue;
            }
        };

        let mut missing = count_missing_fields(&record.features);
        let mut floor = record.shared.proj_points_floor;
        let mut ceiling = record.shared.proj_points_ceiling;
        if floor.is_none() {
            missing += 1;
        }
        if ceiling.is_none() {
            missing += 1;
        }

        // floor <= median <= ceiling must hold when all three are present;
        // a violating pair is untrustworthy, so score without it.
        if let (Some(f), Some(c)) = (floor, ceiling) {
            if !(f <= median && median <= c) {
                floor = None;
                ceiling = None;
                missing += 2;
            }
        }

        if record.shared.proj_ownership.is_none() {
            missing += 1;
        }
        // Usage shares only mean anything at the skill positions
        if matches!(position, Position::RB | Position::WR | Position::TE) {
            for share in [
                record.shared.proj_snap_share,
                record.shared.proj_route_share,
                record.shared.proj_touch_share,
            ] {
                if share.is_none() {
                    missing += 1;
                }
            }
        }

        let mut extras = BTreeMap::new();
        let mut extras_malformed = false;
        for (key, value) in &record.extras {
            match narrow_extra(value) {
                Some(v) => {
                    extras.insert(key.clone(), v);
                }
                None => {
                    extras_malformed = true;
                    malformed.push(MalformedExtra {
                        entity_id: record.entity_id.clone(),
                        key: key.clone(),
                        detail: format!("expected number/bool/string, got {}", kind_of(value)),
                    });
                }
            }
        }

        let mut confidence = MISSING_FIELD_PENALTY.powi(missing);
        if extras_malformed {
            confidence *= MALFORMED_EXTRAS_PENALTY;
        }
        confidence = confidence.max(config.confidence_floor);

        vectors.push(FeatureVector {
            entity_id: record.entity_id.clone(),
            name: record.name.clone(),
            position,
            entity_type: position.entity_type(),
            team_id: record.team_id.clone(),
            opp_team_id: record.opp_team_id.clone(),
            salary,
            median,
            floor,
            ceiling,
            ownership: record.shared.proj_ownership,
            snap_share: record.shared.proj_snap_share,
            route_share: record.shared.proj_route_share,
            touch_share: record.shared.proj_touch_share,
            value: median / (salary as f64 / 1000.0),
            data: record.features.clone(),
            extras,
            confidence,
        });
    }

    Extraction {
        vectors,
        exclusions,
        malformed,
    }
}

/// Count absent numeric fields among the position-native inputs. Absent
/// boolean flags read as false and cost nothing.
fn count_missing_fields(data: &PositionData) -> i32 {
    fn tally(fields: &[&Option<f64>]) -> i32 {
        fields.iter().filter(|f| f.is_none()).count() as i32
    }

    match data {
        PositionData::Qb(d) => tally(&[
            &d.proj_dropbacks,
            &d.neutral_pass_rate,
            &d.proj_designed_rush_att,
            &d.proj_goal_line_rush_att,
            &d.proj_scramble_att,
            &d.team_implied_points,
            &d.game_total,
            &d.opp_pressure_rate,
            &d.proj_interceptions,
        ]),
        PositionData::Rb(d) => tally(&[
            &d.proj_route_participation,
            &d.proj_target_share,
            &d.proj_targets,
            &d.proj_goal_line_share,
            &d.proj_third_down_share,
            &d.proj_high_value_touches,
            &d.spread,
        ]),
        PositionData::Wr(d) => tally(&[
            &d.proj_route_participation,
            &d.proj_target_share,
            &d.proj_targets,
            &d.proj_air_yards_share,
            &d.proj_deep_target_rate,
            &d.proj_adot,
            &d.proj_red_zone_targets,
        ]),
        PositionData::Te(d) => tally(&[
            &d.proj_route_participation,
            &d.proj_target_share,
            &d.proj_targets,
            &d.proj_red_zone_target_share,
            &d.proj_inline_rate,
        ]),
        PositionData::Dst(d) => tally(&[
            &d.opp_dropbacks_proj,
            &d.opp_sack_rate_allowed,
            &d.opp_interception_rate,
            &d.opp_implied_points,
            &d.proj_sacks,
            &d.proj_interceptions,
            &d.proj_fumbles_recovered,
        ]),
    }
}

fn narrow_extra(value: &Value) -> Option<ExtValue> {
    match value {
        Value::Number(n) => n.as_f64().map(ExtValue::Number),
        Value::Bool(b) => Some(ExtValue::Bool(*b)),
        Value::String(s) => Some(ExtValue::Text(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
