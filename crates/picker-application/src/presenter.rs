//! Display boundary.
//!
//! The session hands every re-rendered region to a `Presenter`. Front ends
//! decide how a region is drawn: `HtmlPresenter` keeps one markup fragment per
//! region, the terminal front end prints.

use crate::chat::ChatThread;
use crate::render::HtmlRenderer;
use picker_core::error::Result;
use picker_core::view::{CatalogView, ProductDetails, SelectionView};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::error;

/// An independently re-rendered display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Products,
    Selection,
    Chat,
    Details,
}

pub trait Presenter: Send + Sync {
    fn show_catalog(&self, view: &CatalogView);

    fn show_selection(&self, view: &SelectionView);

    /// Blocking notification with the full product attributes.
    fn show_details(&self, details: &ProductDetails);

    fn show_thread(&self, thread: &ChatThread);

    /// User-visible failure outside the chat thread, such as a catalog fetch error.
    fn show_error(&self, message: &str);
}

/// Keeps the latest HTML fragment of every region.
pub struct HtmlPresenter {
    renderer: HtmlRenderer,
    document: Mutex<HashMap<Region, String>>,
    alerts: Mutex<Vec<String>>,
}

impl HtmlPresenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            renderer: HtmlRenderer::new()?,
            document: Mutex::new(HashMap::new()),
            alerts: Mutex::new(Vec::new()),
        })
    }

    /// Current markup of `region`, if it has been rendered.
    pub fn region(&self, region: Region) -> Option<String> {
        lock(&self.document).get(&region).cloned()
    }

    /// Error notifications raised so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }

    fn replace(&self, region: Region, rendered: Result<String>) {
        match rendered {
            Ok(html) => {
                lock(&self.document).insert(region, html);
            }
            Err(err) => error!("Failed to render {:?} region: {}", region, err),
        }
    }
}

impl Presenter for HtmlPresenter {
    fn show_catalog(&self, view: &CatalogView) {
        self.replace(Region::Products, self.renderer.render_products(view));
    }

    fn show_selection(&self, view: &SelectionView) {
        self.replace(Region::Selection, self.renderer.render_selection(view));
    }

    fn show_details(&self, details: &ProductDetails) {
        self.replace(Region::Details, self.renderer.render_details(details));
    }

    fn show_thread(&self, thread: &ChatThread) {
        self.replace(Region::Chat, self.renderer.render_chat(thread));
    }

    fn show_error(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
