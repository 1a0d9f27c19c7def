//! Application layer for the Routine Picker.
//!
//! Coordinates the domain and infrastructure layers: the session object that
//! owns selection and chat state, the chat request state machine, and the
//! display boundary the session renders into.

pub mod chat;
pub mod presenter;
pub mod render;
pub mod session;

pub use chat::{ChatConversation, ChatThread, EntryKind, PendingRequest, RequestState, RequestToken, ThreadEntry};
pub use presenter::{HtmlPresenter, Presenter, Region};
pub use render::HtmlRenderer;
pub use session::PickerSession;
