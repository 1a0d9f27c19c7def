//! HTML rendering of the display models.
//!
//! Each region is a whole-fragment render; callers replace the previous
//! markup wholesale. Templates use `.html` names so minijinja escapes every
//! interpolated value.

use crate::chat::{ChatThread, EntryKind};
use minijinja::{Environment, context};
use picker_core::error::{PickerError, Result};
use picker_core::view::{CatalogView, NO_SELECTION_MESSAGE, ProductDetails, SelectionView};
use serde::Serialize;

const PRODUCTS_TEMPLATE: &str = r#"{% if message %}<div class="placeholder-message">{{ message }}</div>
{% else %}{% for card in cards %}<div class="product-card{% if card.selected %} selected{% endif %}" data-id="{{ card.id }}">
  <img src="{{ card.image }}" alt="{{ card.name }}">
  <div class="product-info">
    <h3>{{ card.name }}</h3>
    <p>{{ card.brand }}</p>
    <button class="toggle-btn" data-id="{{ card.id }}">{{ card.toggle_label }}</button>
    <button class="details-btn" data-id="{{ card.id }}">Details</button>
  </div>
</div>
{% endfor %}{% endif %}"#;

const SELECTION_TEMPLATE: &str = r#"{% if entries %}<ul class="selected-list">
{% for entry in entries %}  <li class="selected-item" data-id="{{ entry.id }}">{{ entry.name }} <span class="brand">{{ entry.brand }}</span> <button class="remove-btn" data-id="{{ entry.id }}">Remove</button></li>
{% endfor %}</ul>
{% else %}<div class="placeholder-message">{{ empty_message }}</div>
{% endif %}"#;

const DETAILS_TEMPLATE: &str = r#"<div class="product-details">
  <h3>{{ details.name }}</h3>
  <p class="brand">Brand: {{ details.brand }}</p>
  <p class="category">Category: {{ details.category }}</p>
  <p class="description">{{ details.description }}</p>
</div>
"#;

const CHAT_TEMPLATE: &str = r#"{% for entry in entries %}<div class="chat-message {{ entry.class }}" data-time="{{ entry.time }}">{% if entry.label %}<strong>{{ entry.label }}:</strong> {% endif %}{{ entry.text }}</div>
{% endfor %}"#;

/// Entry timestamps, UTC.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Serialize)]
struct CardContext<'a> {
    id: u32,
    name: &'a str,
    brand: &'a str,
    image: &'a str,
    selected: bool,
    toggle_label: &'static str,
}

#[derive(Serialize)]
struct ChatEntryContext<'a> {
    class: &'static str,
    label: Option<&'static str>,
    text: &'a str,
    time: String,
}

/// Renders display models into HTML fragments.
pub struct HtmlRenderer {
    env: Environment<'static>,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("products.html", PRODUCTS_TEMPLATE),
            ("selection.html", SELECTION_TEMPLATE),
            ("details.html", DETAILS_TEMPLATE),
            ("chat.html", CHAT_TEMPLATE),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    /// Product cards for the active category, or the region placeholder.
    pub fn render_products(&self, view: &CatalogView) -> Result<String> {
        let cards: Vec<CardContext<'_>> = view
            .cards()
            .iter()
            .map(|card| CardContext {
                id: card.id,
                name: &card.name,
                brand: &card.brand,
                image: &card.image,
                selected: card.selected,
                toggle_label: card.toggle_label(),
            })
            .collect();

        self.render(
            "products.html",
            context! { message => view.message(), cards => cards },
        )
    }

    pub fn render_selection(&self, view: &SelectionView) -> Result<String> {
        self.render(
            "selection.html",
            context! { entries => &view.entries, empty_message => NO_SELECTION_MESSAGE },
        )
    }

    pub fn render_details(&self, details: &ProductDetails) -> Result<String> {
        self.render("details.html", context! { details => details })
    }

    pub fn render_chat(&self, thread: &ChatThread) -> Result<String> {
        let entries: Vec<ChatEntryContext<'_>> = thread
            .entries()
            .iter()
            .map(|entry| {
                let (class, label) = match entry.kind {
                    EntryKind::User => ("user", Some("You")),
                    EntryKind::Assistant => ("assistant", Some("Assistant")),
                    EntryKind::Pending => ("assistant pending", None),
                    EntryKind::Error => ("assistant error", None),
                };
                ChatEntryContext {
                    class,
                    label,
                    text: &entry.text,
                    time: entry.created_at.format(TIME_FORMAT).to_string(),
                }
            })
            .collect();

        self.render("chat.html", context! { entries => entries })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> PickerError {
    PickerError::internal(format!("Template rendering failed: {err}"))
}
