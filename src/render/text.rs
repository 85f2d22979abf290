//! Text formatting for the output regions

use serde::Serialize;

use crate::calc::formula::CalcResult;
use crate::core::error::{CalcError, Result};
use crate::session::state::CreatureSummary;

/// Image reference shown when the record has no sprite
pub const FALLBACK_IMAGE: &str = "fallback.png";
/// First entry of the move dropdown
pub const MOVE_PLACEHOLDER: &str = "Select a move";

/// Lines describing a looked-up creature
pub fn details_lines(summary: &CreatureSummary) -> Vec<String> {
    let mut lines = vec![
        summary.name.clone(),
        format!(
            "Image: {}",
            summary.image.as_deref().unwrap_or(FALLBACK_IMAGE)
        ),
        format!("Type: {}", summary.type_label()),
        format!("ID: {}", summary.id),
        "Stats".to_string(),
    ];
    lines.extend(
        summary
            .stats
            .iter()
            .map(|stat| format!("  {}: {}", stat.name, stat.base)),
    );
    lines
}

/// `"min - max"` over the damage sequence
pub fn damage_range(damage: &[u16]) -> Option<String> {
    let (first, last) = (damage.first()?, damage.last()?);
    Some(format!("{} - {}", first, last))
}

/// `"min% - max%"` of the defender's HP, two decimals
pub fn percent_range(damage: &[u16], defender_hp: u16) -> Option<String> {
    if defender_hp == 0 {
        return None;
    }
    let (first, last) = (damage.first()?, damage.last()?);
    let hp = defender_hp as f64;
    Some(format!(
        "{}% - {}%",
        fixed_2(*first as f64 / hp * 100.0),
        fixed_2(*last as f64 / hp * 100.0)
    ))
}

/// Two decimals, rounding an exact tie up rather than to even
fn fixed_2(value: f64) -> String {
    // Only n/8 with odd n lies exactly halfway between two hundredths
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        return format!("{:.2}", value + 0.005);
    }
    format!("{:.2}", value)
}

/// Both result lines, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageReport {
    pub result: CalcResult,
    pub damage_line: String,
    pub roll_line: String,
}

impl DamageReport {
    pub fn from_result(result: CalcResult) -> Result<Self> {
        let range = damage_range(&result.damage)
            .ok_or_else(|| CalcError::NoDamage("empty damage sequence".into()))?;
        let percent = percent_range(&result.damage, result.defender_hp).ok_or_else(|| {
            CalcError::NoDamage(format!("{} has no HP to compare against", result.defender))
        })?;

        Ok(Self {
            damage_line: format!("Damage: {}", range),
            roll_line: format!("Damage Range: {}", percent),
            result,
        })
    }
}
