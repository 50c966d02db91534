//! Bonus Engine
//!
//! The payout core of the platform. Split into pure decision functions and an
//! orchestrating [`BonusEngine`]:
//!
//! - `matcher` - pick the applicable base-bonus row and overachievement tier
//! - `calculator` - combine base and tier into a payout breakdown
//! - `progress` - monthly plan progress and linear projection
//! - `import` - CSV reconciliation of bonus rules
//! - `engine` - ties the pure functions to the repositories

pub mod calculator;
pub mod engine;
pub mod import;
pub mod matcher;
pub mod progress;

pub use calculator::BonusCalculation;
pub use engine::BonusEngine;
pub use import::{ImportItem, ImportSummary};
pub use progress::PlanProgress;
