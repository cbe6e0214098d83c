use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, GetUrlResponse, ListedUrl};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

/// `201` for a new mapping, `200` when the URL was already shortened.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;
    let outcome = state.shortener().shorten(&request.original_url).await?;

    let status = if outcome.created {
        info!(code = %outcome.code, "Short URL created");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(CreateUrlResponse {
            short_url: outcome.code.to_url(state.base_url()),
            short_code: outcome.code.into(),
            original_url: request.original_url,
        }),
    ))
}

pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetUrlResponse>> {
    let record = state
        .shortener()
        .resolve(&short_code)
        .await?
        .ok_or_else(|| AppError::NotFound(short_code.clone()))?;

    Ok(Json(GetUrlResponse {
        original_url: record.original_url,
        short_code,
        created_at: record.created_at,
    }))
}

pub async fn delete_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    if state.shortener().delete(&short_code).await? {
        info!(code = %short_code, "Short URL deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(short_code))
    }
}

/// Every stored mapping, newest first.
pub async fn list_urls_handler(State(state): State<AppState>) -> Result<Json<Vec<ListedUrl>>> {
    let mappings = state.shortener().list().await?;

    Ok(Json(
        mappings
            .into_iter()
            .map(|mapping| ListedUrl {
                short_url: mapping.code.to_url(state.base_url()),
                short_code: mapping.code.into(),
                original_url: mapping.record.original_url,
                created_at: mapping.record.created_at,
            })
            .collect(),
    ))
}
