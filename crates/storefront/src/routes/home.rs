//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::{Shell, load_shell};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shell: Shell,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let shell = load_shell(&state, &session).await?;
    Ok(HomeTemplate { shell })
}
