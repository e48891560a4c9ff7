use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::slate::{RunSummary, ScoreRecord, Tier};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Display width (in chars, not bytes) of everything but the name column.
fn fixed_columns_width(salary_str: &str, reason: &str) -> usize {
    4 + 1 + 6 + 1 + 3 + 1 + 5 + 2 + salary_str.chars().count() + 2 + reason.chars().count() + 2
}

fn tier_cell(tier: Tier, use_colors: bool) -> String {
    let padded = format!("{:<6}", tier.to_string());
    if !use_colors {
        return padded;
    }
    match tier {
        Tier::Must => padded.green().bold().to_string(),
        Tier::Want => padded.cyan().to_string(),
        Tier::Viable => padded.yellow().to_string(),
        Tier::Fade => padded.dimmed().to_string(),
    }
}

/// Format records as a ranked table:
/// Index, Tier, Pos, Score, Salary, Name, top reason
pub fn format_record_table(records: &[ScoreRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No entities scored.".to_string();
    }

    let term_width = get_terminal_width();

    records
        .iter()
        .enumerate()
        .map(|(idx, rec)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!("{:>5.1}", rec.final_score);
            let salary_str = format!("${}", rec.salary);
            let pos_str = format!("{:<3}", rec.position.to_string());
            let reason = rec.reasons.first().map(String::as_str).unwrap_or("");

            // Fixed columns: index(4) tier(6) pos(3) score(5) salary(<=6)
            // plus separators; the name gets what is left before the reason
            let name = if let Some(width) = term_width {
                let fixed = fixed_columns_width(&salary_str, reason);
                if width > fixed + 10 {
                    truncate_name(&rec.name, width - fixed)
                } else {
                    truncate_name(&rec.name, 20)
                }
            } else {
                rec.name.clone()
            };

            if use_colors {
                format!(
                    "{} {} {} {}  {}  {}  {}",
                    index_str.dimmed(),
                    tier_cell(rec.tier, true),
                    pos_str,
                    score_str.bold(),
                    salary_str,
                    name,
                    reason.dimmed()
                )
            } else {
                format!(
                    "{} {} {} {}  {}  {}  {}",
                    index_str,
                    tier_cell(rec.tier, false),
                    pos_str,
                    score_str,
                    salary_str,
                    name,
                    reason
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single record with detailed multi-line output (for verbose mode)
pub fn format_record_detail(rec: &ScoreRecord, use_colors: bool) -> String {
    let reasons = rec.reasons.join("; ");
    let matchup = match (rec.team_id.as_deref(), rec.opp_team_id.as_deref()) {
        (Some(team), Some(opp)) => format!(", {team} vs {opp}"),
        (Some(team), None) => format!(", {team}"),
        _ => String::new(),
    };
    if use_colors {
        format!(
            "{} ({} {}{})\n  Salary: ${}\n  Cash: {:.1}  Importance: {:.1}  Final: {:.1}\n  Tier: {}\n  Reasons: {}",
            rec.name.bold(),
            rec.position,
            rec.entity_type,
            matchup,
            rec.salary,
            rec.cash_score,
            rec.importance_score,
            rec.final_score,
            tier_cell(rec.tier, true).trim_end(),
            reasons
        )
    } else {
        format!(
            "{} ({} {}{})\n  Salary: ${}\n  Cash: {:.1}  Importance: {:.1}  Final: {:.1}\n  Tier: {}\n  Reasons: {}",
            rec.name,
            rec.position,
            rec.entity_type,
            matchup,
            rec.salary,
            rec.cash_score,
            rec.importance_score,
            rec.final_score,
            rec.tier,
            reasons
        )
    }
}

/// Format the run summary for stderr: exclusions, empty pools, malformed
/// extras, and the configuration the run used.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Scored {} entities on slate {} ({:?})",
        summary.scored, summary.slate_id, summary.site
    ));

    if !summary.excluded.is_empty() {
        lines.push(format!("Excluded {}:", summary.excluded.len()));
        for ex in &summary.excluded {
            lines.push(format!(
                "  - {} ({}, {}): {} - {}",
                ex.name, ex.position, ex.entity_id, ex.reason, ex.detail
            ));
        }
    }

    if !summary.empty_pools.is_empty() {
        let pools: Vec<String> = summary.empty_pools.iter().map(|p| p.to_string()).collect();
        lines.push(format!("Empty position pools: {}", pools.join(", ")));
    }

    for m in &summary.malformed_extras {
        lines.push(format!(
            "Malformed extras on {}: key '{}' {}",
            m.entity_id, m.key, m.detail
        ));
    }

    lines.push(format!(
        "Config: w_cash={} w_importance={} bracket=${} committee_penalty={} confidence_floor={}",
        summary.config.w_cash,
        summary.config.w_importance,
        summary.config.replacement_salary_bracket,
        summary.config.committee_penalty_fraction,
        summary.config.confidence_floor,
    ));

    lines.join("\n")
}
