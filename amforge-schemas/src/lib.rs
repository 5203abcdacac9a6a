//! Static data definitions for the blade case: process parameters, grid-mix
//! profiles, lifecycle stages and the YAML file wrappers they are loaded from.

pub mod file_formats;
pub mod grid;
pub mod parameters;
pub mod stage;
