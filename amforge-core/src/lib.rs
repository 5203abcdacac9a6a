//! Emission model and scenario evaluation for the Standard vs AM blade case.

pub mod builder;
pub mod catalog;
pub mod emission;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod report;
