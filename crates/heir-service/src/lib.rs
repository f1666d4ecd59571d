//! # heir-service: Wire schema, configuration, and HTTP surface.
//!
//! - [`schema`]: JSON request/response documents and their conversion
//!   to and from the core tree
//! - [`config::ServiceConfig`]: environment-driven settings
//! - [`routes`]: the axum router
//! - [`error::ApiError`]: request failures rendered as JSON

use std::sync::Arc;

use heir_core::{CalculatorConfig, EstateCalculator, InheritanceCalculator};

pub mod config;
pub mod error;
pub mod routes;
pub mod schema;

pub use config::{LogFormat, ServiceConfig};
pub use error::ApiError;
pub use routes::router;
pub use schema::{CalculationRequest, CalculationResponse, FamilyNodeSchema, TreeDocument};

/// Shared application state passed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    /// The calculator behind `/calculate`.
    pub calculator: Arc<dyn EstateCalculator>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// State backed by the production calculator, configured from `config`.
    pub fn new(config: ServiceConfig) -> Self {
        let calculator = InheritanceCalculator::new(CalculatorConfig {
            vacant_side: config.vacant_side,
        });
        Self {
            calculator: Arc::new(calculator),
            config: Arc::new(config),
        }
    }
}
