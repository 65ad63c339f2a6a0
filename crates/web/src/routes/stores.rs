//! Store route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use grocery_core::StoreId;

use crate::db::{ItemRepository, StoreRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::forms::{FormErrors, StoreForm};
use crate::middleware::{RequireAuth, push_flash};
use crate::models::{Item, Store};
use crate::routes::Layout;
use crate::state::AppState;

/// New store page template.
#[derive(Template, WebTemplate)]
#[template(path = "new_store.html")]
pub struct NewStoreTemplate {
    pub layout: Layout,
    pub form: StoreForm,
    pub errors: FormErrors,
}

/// Store detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "store_detail.html")]
pub struct StoreDetailTemplate {
    pub layout: Layout,
    pub store: Store,
    /// Items sold at this store.
    pub items: Vec<Item>,
    pub form: StoreForm,
    pub errors: FormErrors,
}

/// Location of a store's detail page.
#[must_use]
pub fn store_path(id: StoreId) -> String {
    format!("/store/{id}")
}

/// Display the new store form.
pub async fn new_page(RequireAuth(_user): RequireAuth, session: Session) -> impl IntoResponse {
    NewStoreTemplate {
        layout: Layout::load(&session).await,
        form: StoreForm::default(),
        errors: FormErrors::new(),
    }
}

/// Create a store owned by the current user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let template = NewStoreTemplate {
                layout: Layout::load(&session).await,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let store = StoreRepository::new(state.pool())
        .create(&input, user.id)
        .await?;

    tracing::info!(store_id = %store.id, user_id = %user.id, "Store created");
    let id = store.id.to_string();
    add_breadcrumb("store", "Created store", Some(&[("store_id", id.as_str())]));

    push_flash(&session, "New store was created successfully.").await;
    Ok(Redirect::to(&store_path(store.id)).into_response())
}

/// Display a store with its items and an edit form.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(store_id): Path<StoreId>,
) -> Result<StoreDetailTemplate> {
    let store = load_store(&state, store_id).await?;
    let items = ItemRepository::new(state.pool())
        .list_for_store(store_id)
        .await?;

    Ok(StoreDetailTemplate {
        layout: Layout::load(&session).await,
        form: StoreForm::from_store(&store),
        store,
        items,
        errors: FormErrors::new(),
    })
}

/// Update a store's title and address.
///
/// The creator never changes.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(store_id): Path<StoreId>,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    let store = load_store(&state, store_id).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let items = ItemRepository::new(state.pool())
                .list_for_store(store_id)
                .await?;
            let template = StoreDetailTemplate {
                layout: Layout::load(&session).await,
                store,
                items,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    StoreRepository::new(state.pool())
        .update(store_id, &input)
        .await?;

    tracing::info!(store_id = %store_id, user_id = %user.id, "Store updated");

    push_flash(&session, "Store updated successfully.").await;
    Ok(Redirect::to(&store_path(store_id)).into_response())
}

async fn load_store(state: &AppState, store_id: StoreId) -> Result<Store> {
    StoreRepository::new(state.pool())
        .get(store_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))
}
