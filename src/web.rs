use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::{Pipeline, RankedCatalog};
use crate::error::AppError;
use crate::mosaic::MosaicRenderer;
use crate::steam::AccountId;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub renderer: Arc<MosaicRenderer>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/resolve", get(resolve))
        .route("/api/catalog", get(catalog))
        .route("/api/mosaic", get(mosaic))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    handle: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    account_id: AccountId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    account_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MosaicFormat {
    #[default]
    Png,
    Svg,
}

impl FromStr for MosaicFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(MosaicFormat::Png),
            "svg" => Ok(MosaicFormat::Svg),
            _ => Err(AppError::InvalidParameter("format")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MosaicQuery {
    handle: Option<String>,
    format: Option<String>,
}

async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, AppError> {
    let handle = query.handle.ok_or(AppError::MissingParameter("handle"))?;
    let account_id = state.pipeline.resolve(&handle).await?;

    Ok(Json(ResolveResponse { account_id }))
}

async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<RankedCatalog>, AppError> {
    let account_id = query
        .account_id
        .as_deref()
        .and_then(AccountId::new)
        .ok_or(AppError::MissingParameter("accountId"))?;

    let catalog = state.pipeline.fetch_catalog(&account_id).await?;

    Ok(Json(catalog))
}

async fn mosaic(
    State(state): State<AppState>,
    Query(query): Query<MosaicQuery>,
) -> Result<Response, AppError> {
    let format = query
        .format
        .as_deref()
        .map(MosaicFormat::from_str)
        .transpose()?
        .unwrap_or_default();
    let handle = query.handle.ok_or(AppError::MissingParameter("handle"))?;
    let catalog = state.pipeline.resolve_and_fetch(&handle).await?;

    info!(
        titles = catalog.len(),
        hours = catalog.total_hours().round() as u64,
        format = ?format,
        "🖼️ Rendering mosaic"
    );

    let response = match format {
        MosaicFormat::Svg => {
            let svg = state.renderer.build_svg(&catalog).await;
            ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
        }
        MosaicFormat::Png => {
            let png = state.renderer.generate_mosaic_image(&catalog).await?;
            ([(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
    };

    Ok(response)
}
