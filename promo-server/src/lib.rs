//! Promo Server - back-office platform for a retail promoter network
//!
//! # Overview
//!
//! Tracks stores, products, inventory, promoter sales, monthly plans and a
//! tiered bonus-payout scheme, plus lightweight task/broadcast messaging.
//! The calculation core lives in [`bonus`]: base bonus resolution,
//! overachievement tiering and monthly plan projection.
//!
//! # Module structure
//!
//! ```text
//! promo-server/src/
//! ├── core/       # config, shared state, server, background tasks
//! ├── auth/       # JWT authentication, role gating
//! ├── api/        # HTTP routes and handlers
//! ├── bonus/      # bonus engine: matcher, calculator, progress, import
//! ├── services/   # invitation onboarding flow
//! ├── db/         # embedded SurrealDB, models and repositories
//! ├── freshness   # inventory last-update classification
//! ├── jobs        # weekly inventory reminder
//! └── utils/      # errors, logging, calendar helpers
//! ```

pub mod api;
pub mod auth;
pub mod bonus;
pub mod core;
pub mod db;
pub mod freshness;
pub mod jobs;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use bonus::{BonusCalculation, BonusEngine, PlanProgress};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
