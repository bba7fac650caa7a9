//! Every calculator is a leaf: an input struct implementing
//! [`Calculator`](crate::domain::ports::Calculator) and an output struct.

pub mod concrete;
pub mod conversion;
pub mod finance;
pub mod grade;
pub mod health;
pub mod polymarket;
pub mod statistics;
pub mod subnet;
pub mod time;
pub mod triangle;
