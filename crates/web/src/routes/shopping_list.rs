//! Shopping list route handlers.
//!
//! Every add appends a row, so adding an item twice lists it twice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;

use grocery_core::ItemId;

use crate::db::{ItemRepository, ShoppingListRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{RequireAuth, push_flash};
use crate::models::Item;
use crate::routes::Layout;
use crate::routes::items::item_path;
use crate::state::AppState;

/// Shopping list page template.
#[derive(Template, WebTemplate)]
#[template(path = "shopping_list.html")]
pub struct ShoppingListTemplate {
    pub layout: Layout,
    /// Items in the order they were added.
    pub items: Vec<Item>,
}

/// Display the current user's shopping list.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<ShoppingListTemplate> {
    let items = ShoppingListRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(ShoppingListTemplate {
        layout: Layout::load(&session).await,
        items,
    })
}

/// Append an item to the current user's shopping list.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(item_id): Path<ItemId>,
) -> Result<Redirect> {
    let item = ItemRepository::new(state.pool())
        .get(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {item_id}")))?;

    let entry_id = ShoppingListRepository::new(state.pool())
        .add(user.id, item.id)
        .await?;

    tracing::info!(%entry_id, item_id = %item.id, user_id = %user.id, "Item added to shopping list");
    let id = item.id.to_string();
    add_breadcrumb("shopping_list", "Added item", Some(&[("item_id", id.as_str())]));

    push_flash(&session, "Item added to your shopping list.").await;
    Ok(Redirect::to(&item_path(item.id)))
}
