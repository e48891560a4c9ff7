use anyhow::Result;

use crate::slate::{Position, RunSummary, ScoreRecord, SlateInput};

use super::config::ScoringConfig;
use super::evaluators::{evaluate_pool, evaluator_for, EvalContext, Flag};
use super::extract::{extract_slate, FeatureVector};
use super::leverage::importance_scores;
use super::percentile::percentile_ranks_scaled;
use super::tiering::{assign_tiers, build_reasons, final_score};
use super::validation::validate_scoring;
use super::weights::default_weight_profiles;

#[derive(Debug)]
pub struct RunOutput {
    pub records: Vec<ScoreRecord>,
    pub summary: RunSummary,
}

struct PoolScored {
    fv: FeatureVector,
    flags: Vec<Flag>,
    role_percentile: f64,
    cash_score: f64,
    importance_score: f64,
}

/// Score a whole slate.
///
/// Configuration problems fail the run before any scoring starts; per-entity
/// data problems degrade gracefully (exclude or down-weight) and land in the
/// run summary. The result is a complete record set or an error, never a
/// partial batch.
///
/// Two ordered phases per position pool: per-entity raw evaluation, then the
/// pool-wide percentile pass that no entity's normalized scores can precede.
pub fn score_slate(input: &SlateInput, config: &ScoringConfig) -> Result<RunOutput> {
    if let Err(errors) = validate_scoring(config) {
        anyhow::bail!("Configuration error:\n  - {}", errors.join("\n  - "));
    }

    let extraction = extract_slate(input, config);

    let values: Vec<Option<f64>> = extraction.vectors.iter().map(|v| Some(v.value)).collect();
    let looseness = super::weights::estimate_looseness(&values);

    let profiles = default_weight_profiles();

    // Partition valid entities into position pools, preserving input order
    let mut pools: std::collections::BTreeMap<Position, Vec<FeatureVector>> =
        std::collections::BTreeMap::new();
    for fv in extraction.vectors {
        pools.entry(fv.position).or_default().push(fv);
    }

    let mut empty_pools = Vec::new();
    let mut scored: Vec<PoolScored> = Vec::new();

    for position in Position::ALL {
        let Some(pool) = pools.remove(&position) else {
            empty_pools.push(position);
            continue;
        };

        let profile = &profiles[&position];
        let ctx = EvalContext {
            site: input.slate.site,
            config,
            role_weights: profile.role_weights(looseness),
            leverage_weights: profile.leverage.clone(),
        };

        // Phase 1: raw per-entity evaluation against the pool's component ranks
        let evals = evaluate_pool(evaluator_for(position), &pool, &ctx);

        // Phase 2: pool-wide normalization and replacement-based importance
        let roles: Vec<f64> = evals.iter().map(|e| e.role_score).collect();
        let leverages: Vec<f64> = evals.iter().map(|e| e.leverage_score).collect();
        let role_prs = percentile_ranks_scaled(&roles);
        let leverage_prs = percentile_ranks_scaled(&leverages);

        let salaries: Vec<u32> = pool.iter().map(|fv| fv.salary).collect();
        let importances = importance_scores(
            &salaries,
            &leverage_prs,
            config.replacement_salary_bracket,
        );

        for (i, (fv, eval)) in pool.into_iter().zip(evals).enumerate() {
            let cash_score = role_prs[i] * fv.confidence;
            scored.push(PoolScored {
                fv,
                flags: eval.flags,
                role_percentile: role_prs[i],
                cash_score,
                importance_score: importances[i],
            });
        }
    }

    // Final blend and tiering run over the whole population at once
    let finals: Vec<f64> = scored
        .iter()
        .map(|s| final_score(s.cash_score, s.importance_score, config))
        .collect();
    let tiers = assign_tiers(&finals);

    let mut records: Vec<ScoreRecord> = scored
        .into_iter()
        .zip(finals)
        .zip(tiers)
        .map(|((s, final_score), tier)| {
            let reasons = build_reasons(
                &s.flags,
                s.fv.confidence,
                s.role_percentile,
                s.importance_score,
                s.fv.position,
            );
            ScoreRecord {
                entity_type: s.fv.entity_type,
                position: s.fv.position,
                entity_id: s.fv.entity_id,
                name: s.fv.name,
                team_id: s.fv.team_id,
                opp_team_id: s.fv.opp_team_id,
                salary: s.fv.salary,
                cash_score: s.cash_score,
                importance_score: s.importance_score,
                final_score,
                tier,
                reasons,
            }
        })
        .collect();

    // Best plays first; entity id breaks exact ties so reruns are stable
    records.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });

    let summary = RunSummary {
        slate_id: input.slate.slate_id.clone(),
        site: input.slate.site,
        scored: records.len(),
        excluded: extraction.exclusions,
        empty_pools,
        malformed_extras: extraction.malformed,
        looseness,
        config: config.clone(),
    };

    Ok(RunOutput { records, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slate::{
        EntityRecord, ExclusionReason, PositionData, RbData, SharedProjection, Site, Slate, Tier,
        WrData,
    };
    use std::collections::BTreeMap;

    fn slate_with(entities: Vec<EntityRecord>) -> SlateInput {
        SlateInput {
            slate: Slate {
                slate_id: "2025-w08-main".to_string(),
                site: Site::Dk,
                slate_type: Some("classic".to_string()),
                salary_cap: 50_000,
            },
            entities,
        }
    }

    fn wr(id: &str, salary: u32, median: f64, tgt_share: f64) -> EntityRecord {
        EntityRecord {
            entity_id: id.to_string(),
            name: format!("WR {id}"),
            team_id: None,
            opp_team_id: None,
            shared: SharedProjection {
                salary: Some(salary),
                proj_points_median: Some(median),
                ..Default::default()
            },
            features: PositionData::Wr(WrData {
                proj_route_participation: Some(0.85),
                proj_target_share: Some(tgt_share),
                proj_targets: Some(tgt_share * 35.0),
                ..Default::default()
            }),
            extras: BTreeMap::new(),
        }
    }

    fn rb(id: &str, salary: u32, median: f64, committee: bool) -> EntityRecord {
        EntityRecord {
            entity_id: id.to_string(),
            name: format!("RB {id}"),
            team_id: None,
            opp_team_id: None,
            shared: SharedProjection {
                salary: Some(salary),
                proj_points_median: Some(median),
                ..Default::default()
            },
            features: PositionData::Rb(RbData {
                proj_route_participation: Some(0.55),
                proj_target_share: Some(0.12),
                proj_targets: Some(4.0),
                proj_goal_line_share: Some(0.6),
                proj_high_value_touches: Some(median * 0.6),
                committee_risk_flag: Some(committee),
                ..Default::default()
            }),
            extras: BTreeMap::new(),
        }
    }

    fn wr_pool() -> Vec<EntityRecord> {
        vec![
            wr("wr1", 8000, 17.0, 0.28),
            wr("wr2", 7800, 16.5, 0.26),
            wr("wr3", 7600, 16.0, 0.10),
            wr("wr4", 5200, 9.0, 0.14),
        ]
    }

    #[test]
    fn test_configuration_rejection_produces_no_records() {
        let config = ScoringConfig {
            w_cash: -0.1,
            ..Default::default()
        };
        let err = score_slate(&slate_with(wr_pool()), &config).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("w_cash"));
    }

    #[test]
    fn test_determinism_byte_identical_records() {
        let config = ScoringConfig::default();
        let input = slate_with(wr_pool());

        let a = score_slate(&input, &config).unwrap();
        let b = score_slate(&input, &config).unwrap();

        let ja = serde_json::to_string(&a.records).unwrap();
        let jb = serde_json::to_string(&b.records).unwrap();
        assert_eq!(ja, jb);
    }

    #[test]
    fn test_tight_pool_low_share_ranks_lowest_cash() {
        let config = ScoringConfig::default();
        let input = slate_with(vec![
            wr("wr1", 8000, 16.2, 0.28),
            wr("wr2", 7800, 16.0, 0.26),
            wr("wr3", 7600, 15.8, 0.10),
        ]);
        let out = score_slate(&input, &config).unwrap();

        let cash = |id: &str| {
            out.records
                .iter()
                .find(|r| r.entity_id == id)
                .unwrap()
                .cash_score
        };
        assert!(cash("wr3") < cash("wr1"));
        assert!(cash("wr3") < cash("wr2"));
    }

    #[test]
    fn test_committee_rb_scores_strictly_lower() {
        let config = ScoringConfig::default();
        // Identical raw profiles; only the committee flag differs
        let input = slate_with(vec![
            rb("clear", 6500, 15.0, false),
            rb("shared", 6400, 15.0, true),
            rb("filler", 5000, 9.0, false),
        ]);
        let out = score_slate(&input, &config).unwrap();

        let rec = |id: &str| out.records.iter().find(|r| r.entity_id == id).unwrap();
        assert!(rec("shared").cash_score < rec("clear").cash_score);
        assert!(rec("shared")
            .reasons
            .iter()
            .any(|r| r.contains("Committee")));
    }

    #[test]
    fn test_replacement_leverage_scenarios() {
        let config = ScoringConfig::default();
        let input = slate_with(vec![
            // Elite unique role, no comparable cheaper option
            rb("elite", 9000, 22.0, false),
            // Interchangeable teammates $500 apart
            rb("starter", 6500, 14.0, false),
            rb("backup", 6000, 14.0, false),
        ]);
        let out = score_slate(&input, &config).unwrap();

        let imp = |id: &str| {
            out.records
                .iter()
                .find(|r| r.entity_id == id)
                .unwrap()
                .importance_score
        };
        assert!(imp("elite") > imp("starter"));
        assert!(imp("starter") < 20.0);
    }

    #[test]
    fn test_exclusion_report_and_no_record() {
        let config = ScoringConfig::default();
        let mut missing = wr("no-salary", 7000, 14.0, 0.2);
        missing.shared.salary = None;
        let mut entities = wr_pool();
        entities.push(missing);

        let out = score_slate(&slate_with(entities), &config).unwrap();

        assert!(out.records.iter().all(|r| r.entity_id != "no-salary"));
        let ex = out
            .summary
            .excluded
            .iter()
            .find(|e| e.entity_id == "no-salary")
            .unwrap();
        assert_eq!(ex.reason, ExclusionReason::MissingMandatoryField);
    }

    #[test]
    fn test_empty_pools_reported_not_fatal() {
        let config = ScoringConfig::default();
        let out = score_slate(&slate_with(wr_pool()), &config).unwrap();

        assert_eq!(out.summary.scored, 4);
        assert!(out.summary.empty_pools.contains(&Position::QB));
        assert!(out.summary.empty_pools.contains(&Position::DST));
        assert!(!out.summary.empty_pools.contains(&Position::WR));
    }

    #[test]
    fn test_scores_bounded_and_max_role_gets_full_cash() {
        let config = ScoringConfig::default();
        let out = score_slate(&slate_with(wr_pool()), &config).unwrap();

        for r in &out.records {
            assert!((0.0..=100.0).contains(&r.cash_score));
            assert!((0.0..=100.0).contains(&r.importance_score));
            assert!((0.0..=100.0).contains(&r.final_score));
        }

        // wr1 dominates every component, so it owns the top role rank; its
        // vectors are fully populated except floor/ceiling/spread-style
        // fields shared by the whole pool
        let best = out.records.iter().find(|r| r.entity_id == "wr1").unwrap();
        let max_cash = out
            .records
            .iter()
            .map(|r| r.cash_score)
            .fold(f64::MIN, f64::max);
        assert_eq!(best.cash_score, max_cash);
    }

    #[test]
    fn test_tier_order_follows_final_score() {
        let config = ScoringConfig::default();
        let mut entities = wr_pool();
        entities.extend(vec![
            rb("rb1", 7000, 16.0, false),
            rb("rb2", 5600, 11.0, true),
        ]);
        let out = score_slate(&slate_with(entities), &config).unwrap();

        for a in &out.records {
            for b in &out.records {
                if a.final_score > b.final_score {
                    assert!(a.tier <= b.tier);
                }
            }
        }
    }

    #[test]
    fn test_records_sorted_best_first() {
        let config = ScoringConfig::default();
        let out = score_slate(&slate_with(wr_pool()), &config).unwrap();
        for pair in out.records.windows(2) {
            assert!(pair[0].final_score >= pair[1].final_score);
        }
    }

    #[test]
    fn test_single_entity_slate() {
        let config = ScoringConfig::default();
        let out = score_slate(&slate_with(vec![wr("solo", 6000, 13.0, 0.22)]), &config).unwrap();

        assert_eq!(out.records.len(), 1);
        let rec = &out.records[0];
        // Sole entity is its pool's maximum: full role percentile, scaled
        // only by confidence (its record is missing several optional fields)
        assert!(rec.cash_score > 0.0);
        assert!(rec.cash_score < 100.0);
        assert!(rec.reasons.iter().any(|r| r.starts_with("confidence")));
        assert_eq!(rec.tier, Tier::Must);
    }

    #[test]
    fn test_team_ids_carried_to_records() {
        let config = ScoringConfig::default();
        let mut entities = wr_pool();
        entities[0].team_id = Some("DAL".to_string());
        entities[0].opp_team_id = Some("NYG".to_string());

        let out = score_slate(&slate_with(entities), &config).unwrap();
        let rec = out.records.iter().find(|r| r.entity_id == "wr1").unwrap();
        assert_eq!(rec.team_id.as_deref(), Some("DAL"));
        assert_eq!(rec.opp_team_id.as_deref(), Some("NYG"));
    }

    #[test]
    fn test_empty_slate_is_a_complete_run() {
        let config = ScoringConfig::default();
        let out = score_slate(&slate_with(Vec::new()), &config).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.summary.empty_pools.len(), 5);
    }
}
