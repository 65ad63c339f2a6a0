//! Authentication route handlers.
//!
//! Handles signup, login and logout with locally stored Argon2 password hashes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::forms::auth::USERNAME_TAKEN;
use crate::forms::{FormErrors, LoginForm, SignupForm};
use crate::middleware::auth::{LOGIN_PATH, safe_next};
use crate::middleware::{clear_current_user, push_flash, set_current_user};
use crate::models::CurrentUser;
use crate::routes::Layout;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    /// Where to go after a successful login.
    pub next: Option<String>,
}

impl NextQuery {
    /// Form action that carries `next` through the login POST.
    fn login_action(&self) -> String {
        match self.next.as_deref() {
            Some(next) if !next.is_empty() => {
                format!("{LOGIN_PATH}?next={}", urlencoding::encode(next))
            }
            _ => LOGIN_PATH.to_owned(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub layout: Layout,
    pub form: SignupForm,
    pub errors: FormErrors,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub form: LoginForm,
    pub errors: FormErrors,
    /// Form action, including any `?next=` target.
    pub action: String,
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(session: Session) -> impl IntoResponse {
    SignupTemplate {
        layout: Layout::load(&session).await,
        form: SignupForm::default(),
        errors: FormErrors::new(),
    }
}

/// Handle signup form submission.
///
/// On success the user is sent to the login page; signing up does not log in.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(signup_invalid(&session, &form, errors).await),
    };

    let auth = AuthService::new(state.pool());
    if auth.is_username_taken(&input.username).await? {
        return Ok(username_taken(&session, &form).await);
    }

    match auth.signup(&input.username, &input.password).await {
        Ok(_) => {}
        // Lost a race with a concurrent signup for the same name
        Err(AuthError::UsernameTaken) => return Ok(username_taken(&session, &form).await),
        Err(e) => return Err(e.into()),
    }

    push_flash(&session, "Account Created").await;
    Ok(Redirect::to(LOGIN_PATH).into_response())
}

async fn username_taken(session: &Session, form: &SignupForm) -> Response {
    let mut errors = FormErrors::new();
    errors.add("username", USERNAME_TAKEN);
    signup_invalid(session, form, errors).await
}

async fn signup_invalid(session: &Session, form: &SignupForm, errors: FormErrors) -> Response {
    let template = SignupTemplate {
        layout: Layout::load(session).await,
        form: form.redisplay(),
        errors,
    };
    (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(session: Session, Query(query): Query<NextQuery>) -> impl IntoResponse {
    LoginTemplate {
        layout: Layout::load(&session).await,
        form: LoginForm::default(),
        errors: FormErrors::new(),
        action: query.login_action(),
    }
}

/// Handle login form submission.
///
/// Wrong credentials re-render the form without saying which part was wrong.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if let Err(errors) = form.validate() {
        let template = login_template(&session, &form, errors, &query).await;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    let user = match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(username = %form.username.trim(), "Login failed");
            let template = login_template(&session, &form, FormErrors::new(), &query).await;
            return Ok(template.into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let current_user = CurrentUser {
        id: user.id,
        username: user.username.clone(),
    };
    set_current_user(&session, &current_user).await?;
    set_sentry_user(&user.id, user.username.as_str());
    tracing::info!(user_id = %user.id, "User logged in");

    let target = safe_next(query.next.as_deref()).unwrap_or("/");
    Ok(Redirect::to(target).into_response())
}

async fn login_template(
    session: &Session,
    form: &LoginForm,
    errors: FormErrors,
    query: &NextQuery,
) -> LoginTemplate {
    LoginTemplate {
        layout: Layout::load(session).await,
        form: form.redisplay(),
        errors,
        action: query.login_action(),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Log out and return to the home page.
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_action_without_next() {
        assert_eq!(NextQuery::default().login_action(), "/login");
        let empty = NextQuery {
            next: Some(String::new()),
        };
        assert_eq!(empty.login_action(), "/login");
    }

    #[test]
    fn test_login_action_encodes_next() {
        let query = NextQuery {
            next: Some("/store/4".to_owned()),
        };
        assert_eq!(query.login_action(), "/login?next=%2Fstore%2F4");
    }
}
