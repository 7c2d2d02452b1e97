//! Hotel Server - reservation and room management backend
//!
//! # Architecture
//!
//! - **Pricing** (`pricing`): nightly price resolution from base price,
//!   room-type factor, seasonal periods and per-room overrides
//! - **Reservations** (`reservations`): availability checking and the
//!   booking lifecycle (create, confirm, cancel)
//! - **Reconciler** (`services`): periodic pass advancing room and
//!   reservation status with elapsed time
//! - **Database** (`db`): SQLite storage, models and repositories
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module layout
//!
//! ```text
//! hotel-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool, models, repositories
//! ├── pricing/       # nightly price resolver
//! ├── reservations/  # availability + lifecycle manager
//! ├── services/      # room-status reconciler
//! └── utils/         # errors, logging, date helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod reservations;
pub mod services;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use pricing::PricingResolver;
pub use reservations::{ReservationService, RoomLocks};
pub use services::Reconciler;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  __      __       __
   / / / /___  / /____  / /
  / /_/ / __ \/ __/ _ \/ /
 / __  / /_/ / /_/  __/ /
/_/ /_/\____/\__/\___/_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
