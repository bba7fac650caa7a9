pub mod adapters;
pub mod calculators;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
pub use config::{batch_config::BatchConfig, CliConfig, DisplayFormat};
pub use crate::core::engine::{CalcEngine, EngineOptions, RunSummary};
pub use crate::core::request::{BatchRequest, CalcRequest};
pub use domain::model::{BatchOutcome, CalcRecord};
pub use domain::ports::{Calculator, Storage};
pub use utils::error::{CalcError, Result};
