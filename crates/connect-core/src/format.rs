//! Display Formatting

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// `$1234.50`: dollars with exactly two decimals
pub fn usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// `3/7/2024`: month/day/year of a timestamp
pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// Nullable timestamp, `-` when absent
pub fn optional_date(at: Option<&DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".into(), date)
}

/// Keep the first `max_chars` characters of a long identifier
pub fn abbreviate(id: &str, max_chars: usize) -> String {
    if id.chars().count() <= max_chars {
        id.to_string()
    } else {
        let head: String = id.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

/// `✅ Yes` / `❌ No`
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "✅ Yes" } else { "❌ No" }
}

/// Colored status badge tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Success,
    Pending,
    Failed,
}

impl BadgeTier {
    /// Transactions only distinguish completed from everything else
    pub fn for_transaction(status: &str) -> Self {
        if status == "completed" {
            BadgeTier::Success
        } else {
            BadgeTier::Pending
        }
    }

    pub fn for_withdrawal(status: &str) -> Self {
        match status {
            "completed" => BadgeTier::Success,
            "failed" => BadgeTier::Failed,
            _ => BadgeTier::Pending,
        }
    }

    /// CSS class of the badge
    pub fn class(&self) -> &'static str {
        match self {
            BadgeTier::Success => "status-badge success",
            BadgeTier::Pending => "status-badge pending",
            BadgeTier::Failed => "status-badge failed",
        }
    }
}

/// Status text with its badge tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub tier: BadgeTier,
}
