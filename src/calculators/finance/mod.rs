//! Loan, savings and percentage calculators.

pub mod compound_interest;
pub mod mortgage;
pub mod percentage;
