pub mod engine;
pub mod report;
pub mod request;

pub use crate::domain::model::{BatchOutcome, CalcRecord};
pub use crate::domain::ports::{Calculator, Evaluate, Storage};
pub use crate::utils::error::Result;
