//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;

use crate::db::StoreRepository;
use crate::error::Result;
use crate::filters;
use crate::models::Store;
use crate::routes::Layout;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub stores: Vec<Store>,
}

/// Display every store, oldest first.
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let stores = StoreRepository::new(state.pool()).list_all().await?;

    Ok(HomeTemplate {
        layout: Layout::load(&session).await,
        stores,
    })
}
