//! The picker session.
//!
//! `PickerSession` owns all mutable client state: the selection, the active
//! category, the last fetched catalog and the chat conversation. Every action
//! mutates that state and then re-renders the affected regions through the
//! presenter. Actions take `&mut self`, so one action finishes before the next
//! one starts.

use crate::chat::{ChatConversation, ChatThread, RequestState};
use crate::presenter::Presenter;
use picker_core::catalog::{Catalog, CatalogLoader, Product, ProductId};
use picker_core::error::{PickerError, Result};
use picker_core::selection::{SelectionRepository, SelectionSet};
use picker_core::session::build_routine_prompt;
use picker_core::view::{CatalogView, ProductDetails, SelectionView};
use picker_interaction::ChatRelay;
use std::sync::Arc;

/// Thread line shown in place of the full routine prompt.
pub const ROUTINE_REQUEST_TEXT: &str = "Generate a routine with my selected products";

pub struct PickerSession {
    catalog_loader: Arc<dyn CatalogLoader>,
    selection_repository: Arc<dyn SelectionRepository>,
    relay: Arc<dyn ChatRelay>,
    presenter: Arc<dyn Presenter>,
    selection: SelectionSet,
    category: Option<String>,
    catalog: Catalog,
    chat: ChatConversation,
}

impl PickerSession {
    pub fn new(
        catalog_loader: Arc<dyn CatalogLoader>,
        selection_repository: Arc<dyn SelectionRepository>,
        relay: Arc<dyn ChatRelay>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            catalog_loader,
            selection_repository,
            relay,
            presenter,
            selection: SelectionSet::new(),
            category: None,
            catalog: Catalog::default(),
            chat: ChatConversation::new(),
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Products from the most recent catalog fetch.
    pub fn products(&self) -> &[Product] {
        &self.catalog.products
    }

    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    pub fn chat(&self) -> &ChatConversation {
        &self.chat
    }

    /// Restores the persisted selection and draws the initial regions.
    ///
    /// The product region starts on its placeholder. A catalog fetch failure
    /// is shown to the user and returned.
    pub async fn start(&mut self) -> Result<()> {
        self.selection = self.selection_repository.load().await;
        tracing::info!(
            "[PickerSession] Restored {} selected product(s)",
            self.selection.len()
        );

        self.category = None;
        self.presenter.show_catalog(&CatalogView::Placeholder);

        self.refresh_catalog().await?;
        self.render_selection();
        Ok(())
    }

    /// Switches the active category, re-fetching the catalog first.
    ///
    /// `None` or a blank name returns the product region to its placeholder.
    pub async fn change_category(&mut self, category: Option<&str>) -> Result<()> {
        self.category = category
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        tracing::debug!("[PickerSession] Category changed to {:?}", self.category);

        self.refresh_catalog().await?;
        self.render_products();
        self.render_selection();
        Ok(())
    }

    /// Flips membership of `id`, persists, and re-renders. Returns whether the
    /// product is now selected.
    ///
    /// Only products in the current catalog can be added. An already selected
    /// id can always be deselected, even once it no longer resolves.
    pub async fn toggle_product(&mut self, id: ProductId) -> Result<bool> {
        if !self.selection.contains(id) && self.catalog.find(id).is_none() {
            tracing::warn!("[PickerSession] Refusing to select unknown product {}", id);
            return Err(PickerError::not_found("Product", id.to_string()));
        }

        let selected = self.selection.toggle(id);
        tracing::debug!("[PickerSession] Product {} selected: {}", id, selected);

        let saved = self.persist_selection().await;
        self.render_products();
        self.render_selection();
        saved.map(|_| selected)
    }

    /// Removal from the selected-products panel.
    pub async fn remove_selected(&mut self, id: ProductId) -> Result<()> {
        if !self.selection.remove(id) {
            return Ok(());
        }

        let saved = self.persist_selection().await;
        self.render_products();
        self.render_selection();
        saved
    }

    pub async fn clear_selection(&mut self) -> Result<()> {
        self.selection.clear();

        let saved = self.persist_selection().await;
        self.render_products();
        self.render_selection();
        saved
    }

    /// Shows the full attributes of a product from the current catalog.
    pub fn show_details(&self, id: ProductId) -> Result<ProductDetails> {
        let product = self
            .catalog
            .find(id)
            .ok_or_else(|| PickerError::not_found("Product", id.to_string()))?;

        let details = ProductDetails::from(product);
        self.presenter.show_details(&details);
        Ok(details)
    }

    /// Sends a chat message. Blank input is ignored and yields `None`.
    pub async fn submit_chat(&mut self, text: &str) -> Option<RequestState> {
        let pending = self.chat.submit(text)?;
        self.presenter.show_thread(self.chat.thread());

        let outcome = self.relay.send(&pending.transcript).await;
        let state = self.chat.complete(pending.token, outcome);
        self.presenter.show_thread(self.chat.thread());
        Some(state)
    }

    /// Asks for a routine over the current selection.
    ///
    /// When no selected id resolves to a product an inline error joins the
    /// chat thread and no request is sent.
    pub async fn generate_routine(&mut self) -> Result<RequestState> {
        let prompt = match build_routine_prompt(&self.selection, &self.catalog.products) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::warn!("[PickerSession] Routine not requested: {}", err);
                self.chat.thread_mut().push_error(err.to_string());
                self.presenter.show_thread(self.chat.thread());
                return Err(err);
            }
        };

        tracing::info!(
            "[PickerSession] Requesting routine for {} product(s)",
            self.selection.len()
        );
        let pending = self.chat.submit_as(&prompt, ROUTINE_REQUEST_TEXT);
        self.presenter.show_thread(self.chat.thread());

        let outcome = self.relay.send(&pending.transcript).await;
        let state = self.chat.complete(pending.token, outcome);
        self.presenter.show_thread(self.chat.thread());
        Ok(state)
    }

    pub fn thread(&self) -> &ChatThread {
        self.chat.thread()
    }

    /// Redraws the selected-products panel from the current state.
    pub fn show_selection(&self) {
        self.render_selection();
    }

    async fn refresh_catalog(&mut self) -> Result<()> {
        match self.catalog_loader.load_catalog().await {
            Ok(products) => {
                tracing::debug!("[PickerSession] Catalog loaded: {} product(s)", products.len());
                self.catalog = Catalog::new(products);
                Ok(())
            }
            Err(err) => {
                tracing::error!("[PickerSession] Failed to load catalog: {}", err);
                self.presenter
                    .show_error(&format!("Failed to load products: {err}"));
                Err(err)
            }
        }
    }

    async fn persist_selection(&self) -> Result<()> {
        let result = self.selection_repository.save(&self.selection).await;
        if let Err(err) = &result {
            tracing::error!("[PickerSession] Failed to save selection: {}", err);
        }
        result
    }

    fn render_products(&self) {
        let view = CatalogView::project(
            &self.catalog.products,
            self.category.as_deref(),
            &self.selection,
        );
        self.presenter.show_catalog(&view);
    }

    fn render_selection(&self) {
        let view = SelectionView::project(&self.selection, &self.catalog.products);
        self.presenter.show_selection(&view);
    }
}
