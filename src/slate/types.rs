use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a scorable entity. Fixed at scoring time; selects the
/// evaluator that processes the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DST,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DST,
    ];

    pub fn entity_type(self) -> EntityType {
        match self {
            Position::DST => EntityType::Dst,
            _ => EntityType::Player,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "DST",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum EntityType {
    #[serde(rename = "PLAYER")]
    Player,
    #[serde(rename = "DST")]
    Dst,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Player => f.write_str("PLAYER"),
            EntityType::Dst => f.write_str("DST"),
        }
    }
}

/// Recommendation bucket, ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Must,
    Want,
    Viable,
    Fade,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Must => "must",
            Tier::Want => "want",
            Tier::Viable => "viable",
            Tier::Fade => "fade",
        };
        f.write_str(s)
    }
}

/// Contest site. Drives a couple of small pricing nuances (DST pay-up).
/// Unrecognized site codes fold into `Other` rather than failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Site {
    #[serde(rename = "DK")]
    Dk,
    #[serde(rename = "FD")]
    Fd,
    #[serde(rename = "OTHER")]
    Other,
}

impl<'de> Deserialize<'de> for Site {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(match code.as_str() {
            "DK" => Site::Dk,
            "FD" => Site::Fd,
            _ => Site::Other,
        })
    }
}

/// Slate header: one contest window on one site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Slate {
    pub slate_id: String,
    pub site: Site,
    #[serde(default)]
    pub slate_type: Option<String>,
    pub salary_cap: u32,
}

/// Fields shared by every entity regardless of position. Everything is
/// optional at the input boundary; the extractor decides what is mandatory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SharedProjection {
    #[serde(default)]
    pub salary: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub proj_points_median: Option<f64>,
    #[serde(default)]
    pub proj_points_floor: Option<f64>,
    #[serde(default)]
    pub proj_points_ceiling: Option<f64>,
    #[serde(default)]
    pub proj_ownership: Option<f64>,
    #[serde(default)]
    pub proj_snap_share: Option<f64>,
    #[serde(default)]
    pub proj_route_share: Option<f64>,
    #[serde(default)]
    pub proj_touch_share: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QbData {
    #[serde(default)]
    pub proj_dropbacks: Option<f64>,
    #[serde(default)]
    pub neutral_pass_rate: Option<f64>,
    #[serde(default)]
    pub proj_designed_rush_att: Option<f64>,
    #[serde(default)]
    pub proj_goal_line_rush_att: Option<f64>,
    #[serde(default)]
    pub proj_scramble_att: Option<f64>,
    #[serde(default)]
    pub team_implied_points: Option<f64>,
    #[serde(default)]
    pub game_total: Option<f64>,
    #[serde(default)]
    pub opp_pressure_rate: Option<f64>,
    #[serde(default)]
    pub proj_interceptions: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RbData {
    #[serde(default)]
    pub proj_route_participation: Option<f64>,
    #[serde(default)]
    pub proj_target_share: Option<f64>,
    #[serde(default)]
    pub proj_targets: Option<f64>,
    #[serde(default)]
    pub proj_goal_line_share: Option<f64>,
    #[serde(default)]
    pub proj_third_down_share: Option<f64>,
    #[serde(default)]
    pub proj_high_value_touches: Option<f64>,
    /// Point spread from the entity's team perspective (negative = favored).
    #[serde(default)]
    pub spread: Option<f64>,
    #[serde(default)]
    pub committee_risk_flag: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WrData {
    #[serde(default)]
    pub proj_route_participation: Option<f64>,
    #[serde(default)]
    pub proj_target_share: Option<f64>,
    #[serde(default)]
    pub proj_targets: Option<f64>,
    #[serde(default)]
    pub proj_air_yards_share: Option<f64>,
    #[serde(default)]
    pub proj_deep_target_rate: Option<f64>,
    #[serde(default)]
    pub proj_adot: Option<f64>,
    #[serde(default)]
    pub proj_red_zone_targets: Option<f64>,
    #[serde(default)]
    pub every_down_role_flag: Option<bool>,
    #[serde(default)]
    pub boom_bust_flag: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeData {
    #[serde(default)]
    pub proj_route_participation: Option<f64>,
    #[serde(default)]
    pub proj_target_share: Option<f64>,
    #[serde(default)]
    pub proj_targets: Option<f64>,
    #[serde(default)]
    pub proj_red_zone_target_share: Option<f64>,
    #[serde(default)]
    pub proj_inline_rate: Option<f64>,
    #[serde(default)]
    pub full_route_role_flag: Option<bool>,
    #[serde(default)]
    pub td_or_bust_flag: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DstData {
    #[serde(default)]
    pub opp_dropbacks_proj: Option<f64>,
    #[serde(default)]
    pub opp_sack_rate_allowed: Option<f64>,
    #[serde(default)]
    pub opp_interception_rate: Option<f64>,
    #[serde(default)]
    pub opp_implied_points: Option<f64>,
    #[serde(default)]
    pub proj_sacks: Option<f64>,
    #[serde(default)]
    pub proj_interceptions: Option<f64>,
    #[serde(default)]
    pub proj_fumbles_recovered: Option<f64>,
    #[serde(default)]
    pub pay_up_viable_flag: Option<bool>,
}

/// Position-specific feature shape. The tag fixes the entity's position.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "position")]
pub enum PositionData {
    #[serde(rename = "QB")]
    Qb(QbData),
    #[serde(rename = "RB")]
    Rb(RbData),
    #[serde(rename = "WR")]
    Wr(WrData),
    #[serde(rename = "TE")]
    Te(TeData),
    #[serde(rename = "DST")]
    Dst(DstData),
}

impl PositionData {
    pub fn position(&self) -> Position {
        match self {
            PositionData::Qb(_) => Position::QB,
            PositionData::Rb(_) => Position::RB,
            PositionData::Wr(_) => Position::WR,
            PositionData::Te(_) => Position::TE,
            PositionData::Dst(_) => Position::DST,
        }
    }
}

/// One entity as delivered by the projection feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntityRecord {
    pub entity_id: String,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub opp_team_id: Option<String>,
    #[serde(flatten)]
    pub shared: SharedProjection,
    pub features: PositionData,
    /// Open extension bag. Only number/bool/string values are well formed;
    /// anything else is reported and costs confidence.
    #[serde(default)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

/// A whole slate input document: header plus entity records.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlateInput {
    pub slate: Slate,
    pub entities: Vec<EntityRecord>,
}

/// Validated extension value. The extractor narrows raw JSON into this.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExtValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl ExtValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtValue::Bool(b) => Some(*b),
            ExtValue::Number(n) => Some(*n != 0.0),
            ExtValue::Text(_) => None,
        }
    }
}

/// Why an entity was excluded from scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ExclusionReason {
    MissingMandatoryField,
    InactiveStatus,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingMandatoryField => f.write_str("MissingMandatoryField"),
            ExclusionReason::InactiveStatus => f.write_str("InactiveStatus"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Exclusion {
    pub entity_id: String,
    pub name: String,
    pub position: Position,
    pub reason: ExclusionReason,
    pub detail: String,
}

/// Malformed extension payload report: the entity was still scored, on its
/// typed fields only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MalformedExtra {
    pub entity_id: String,
    pub key: String,
    pub detail: String,
}

/// Final per-entity output. Fully replaced on every recomputation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRecord {
    pub entity_type: EntityType,
    pub position: Position,
    pub entity_id: String,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub opp_team_id: Option<String>,
    pub salary: u32,
    pub cash_score: f64,
    pub importance_score: f64,
    pub final_score: f64,
    pub tier: Tier,
    pub reasons: Vec<String>,
}

/// Run-level report: what was scored, what was left out and why, and the
/// configuration the run actually used.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunSummary {
    pub slate_id: String,
    pub site: Site,
    pub scored: usize,
    pub excluded: Vec<Exclusion>,
    pub empty_pools: Vec<Position>,
    pub malformed_extras: Vec<MalformedExtra>,
    pub looseness: f64,
    pub config: crate::scoring::ScoringConfig,
}
