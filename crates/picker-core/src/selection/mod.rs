//! Selection domain module.
//!
//! - `model`: the in-memory set of chosen product ids (`SelectionSet`)
//! - `repository`: persistence trait for the selection slot (`SelectionRepository`)

mod model;
mod repository;

pub use model::SelectionSet;
pub use repository::SelectionRepository;
