//! Selection repository trait.

use async_trait::async_trait;

use super::model::SelectionSet;
use crate::error::Result;

/// Persistent slot holding the selected product ids.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Reads the persisted selection.
    ///
    /// Missing or malformed content yields an empty set; this never fails.
    async fn load(&self) -> SelectionSet;

    /// Overwrites the slot with `selection`, as an ordered list of ids.
    async fn save(&self, selection: &SelectionSet) -> Result<()>;
}
