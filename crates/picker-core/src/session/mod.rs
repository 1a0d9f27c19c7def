//! Chat session domain module.
//!
//! - `message`: role-tagged chat messages (`MessageRole`, `ChatMessage`)
//! - `transcript`: the append-only conversation log (`Transcript`)
//! - `routine`: the routine request built from the current selection

mod message;
mod routine;
mod transcript;

pub use message::{ChatMessage, MessageRole};
pub use routine::{ROUTINE_INSTRUCTION, build_routine_prompt};
pub use transcript::{SYSTEM_PROMPT, Transcript};
