//! Network interaction: the browser-side relay client and the server-side
//! upstream chat-completion client.

pub mod openai_upstream;
pub mod relay_client;
pub mod wire;

pub use openai_upstream::{OpenAiUpstream, Upstream, UpstreamError, UpstreamResponse};
pub use relay_client::{ChatRelay, RelayClient, RelayError};
