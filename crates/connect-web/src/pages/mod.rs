//! Page Components

mod developer;
mod user;

pub use developer::DeveloperPage;
pub use user::UserPage;

use rust_decimal::Decimal;

/// Amount typed into a number input; anything unparsable counts as zero
fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or(Decimal::ZERO)
}
