//! Prediction-market math for binary YES/NO shares paying $1.

pub mod arbitrage;
pub mod ev;
pub mod odds;

/// Share prices and probability inputs must fall in this band.
pub const MIN_PRICE: f64 = 0.01;
pub const MAX_PRICE: f64 = 0.99;
