use crate::error::{AppError, Result};
use crate::model::ShortenForm;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use tinylink_core::ShortCode;
use tracing::debug;

pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<String> {
    let code = state.shortener().shorten(&form.link).await?;
    Ok(code.into_string())
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = resolve(&state, short_code).await?;

    let location = HeaderValue::try_from(url.as_str())
        .map_err(|_| AppError::InvalidRedirectTarget(url.clone()))?;
    debug!(url = %url, "redirecting");

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

pub async fn full_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<String> {
    resolve(&state, short_code).await
}

async fn resolve(state: &AppState, short_code: String) -> Result<String> {
    let code = ShortCode::new(short_code);
    state
        .shortener()
        .resolve(&code)
        .await?
        .ok_or(AppError::NotFound(code))
}
