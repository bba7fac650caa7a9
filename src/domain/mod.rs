// Domain layer: result models and ports (interfaces) shared by every calculator.

pub mod model;
pub mod ports;
