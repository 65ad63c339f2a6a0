//! Item route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use grocery_core::{ItemCategory, ItemId};

use crate::db::{ItemRepository, StoreRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::forms::{FormErrors, ItemForm, StoreChoice};
use crate::middleware::{RequireAuth, push_flash};
use crate::models::Item;
use crate::routes::Layout;
use crate::state::AppState;

/// An `<option>` of a `<select>` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// New item page template.
#[derive(Template, WebTemplate)]
#[template(path = "new_item.html")]
pub struct NewItemTemplate {
    pub layout: Layout,
    pub form: ItemForm,
    pub errors: FormErrors,
    pub categories: Vec<SelectOption>,
    pub stores: Vec<SelectOption>,
}

/// Item detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "item_detail.html")]
pub struct ItemDetailTemplate {
    pub layout: Layout,
    pub item: Item,
    pub form: ItemForm,
    pub errors: FormErrors,
    pub categories: Vec<SelectOption>,
    pub stores: Vec<SelectOption>,
}

/// Location of an item's detail page.
#[must_use]
pub fn item_path(id: ItemId) -> String {
    format!("/item/{id}")
}

/// Category options, with the form's current choice selected.
fn category_options(form: &ItemForm) -> Vec<SelectOption> {
    ItemCategory::ALL
        .iter()
        .map(|category| SelectOption {
            value: category.as_str().to_owned(),
            label: category.label().to_owned(),
            selected: form.is_category_selected(category),
        })
        .collect()
}

/// Store options, with the form's current choice selected.
fn store_options(form: &ItemForm, stores: &[StoreChoice]) -> Vec<SelectOption> {
    stores
        .iter()
        .map(|store| SelectOption {
            value: store.id.to_string(),
            label: store.title.clone(),
            selected: form.is_store_selected(store),
        })
        .collect()
}

/// Every store an item can be assigned to.
async fn store_choices(state: &AppState) -> Result<Vec<StoreChoice>> {
    let stores = StoreRepository::new(state.pool()).list_all().await?;
    Ok(stores.iter().map(StoreChoice::from).collect())
}

async fn load_item(state: &AppState, item_id: ItemId) -> Result<Item> {
    ItemRepository::new(state.pool())
        .get(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {item_id}")))
}

/// Display the new item form.
pub async fn new_page(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<NewItemTemplate> {
    let stores = store_choices(&state).await?;
    let form = ItemForm::default();

    Ok(NewItemTemplate {
        layout: Layout::load(&session).await,
        categories: category_options(&form),
        stores: store_options(&form, &stores),
        form,
        errors: FormErrors::new(),
    })
}

/// Create an item owned by the current user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ItemForm>,
) -> Result<Response> {
    let stores = store_choices(&state).await?;

    let input = match form.validate(&stores) {
        Ok(input) => input,
        Err(errors) => {
            let template = NewItemTemplate {
                layout: Layout::load(&session).await,
                categories: category_options(&form),
                stores: store_options(&form, &stores),
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let item = ItemRepository::new(state.pool())
        .create(&input, user.id)
        .await?;

    tracing::info!(item_id = %item.id, store_id = %item.store_id, user_id = %user.id, "Item created");
    let id = item.id.to_string();
    add_breadcrumb("item", "Created item", Some(&[("item_id", id.as_str())]));

    push_flash(&session, "New item was created successfully.").await;
    Ok(Redirect::to(&item_path(item.id)).into_response())
}

/// Display an item with its edit form.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(item_id): Path<ItemId>,
) -> Result<ItemDetailTemplate> {
    let item = load_item(&state, item_id).await?;
    let stores = store_choices(&state).await?;
    let form = ItemForm::from_item(&item);

    Ok(ItemDetailTemplate {
        layout: Layout::load(&session).await,
        categories: category_options(&form),
        stores: store_options(&form, &stores),
        item,
        form,
        errors: FormErrors::new(),
    })
}

/// Update every editable field of an item, including its store.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(item_id): Path<ItemId>,
    Form(form): Form<ItemForm>,
) -> Result<Response> {
    let item = load_item(&state, item_id).await?;
    let stores = store_choices(&state).await?;

    let input = match form.validate(&stores) {
        Ok(input) => input,
        Err(errors) => {
            let template = ItemDetailTemplate {
                layout: Layout::load(&session).await,
                categories: category_options(&form),
                stores: store_options(&form, &stores),
                item,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    ItemRepository::new(state.pool())
        .update(item_id, &input)
        .await?;

    tracing::info!(item_id = %item_id, user_id = %user.id, "Item updated");

    push_flash(&session, "Item updated successfully.").await;
    Ok(Redirect::to(&item_path(item_id)).into_response())
}
