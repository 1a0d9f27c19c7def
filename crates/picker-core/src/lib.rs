//! Domain layer of the Routine Picker: catalog, selection, chat transcript and
//! the display models projected from them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod selection;
pub mod session;
pub mod view;

// Re-export common error type
pub use error::PickerError;
