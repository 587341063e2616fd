//! JSON routes serving the daily and random picks.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::clients::{SearchClient, Song, errors::Error};
use crate::selector::{DailySongSelector, RandomSongSelector};

pub struct AppState<C> {
    pub daily: DailySongSelector<C>,
    pub random: RandomSongSelector<C>,
    pub default_count: usize,
}

#[derive(Deserialize)]
struct TodayParams {
    count: Option<usize>,
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct RandomParams {
    count: Option<usize>,
}

#[derive(Serialize)]
struct TodayBody {
    date: NaiveDate,
    songs: Vec<Song>,
}

#[derive(Serialize)]
struct RandomBody {
    songs: Vec<Song>,
}

/// Selection error rendered as `{"error": ...}`
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::NoResultsError | Error::TransportError(_) => StatusCode::BAD_GATEWAY,
            Error::ParseError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed with {status}: {}", self.0);
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

async fn today<C>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<TodayParams>,
) -> Result<Json<TodayBody>, ApiError>
where
    C: SearchClient + Send + Sync + 'static,
{
    let date = params.date.unwrap_or_else(|| Local::now().date_naive());
    let count = params.count.unwrap_or(state.default_count);
    let songs = state.daily.select(date, count).await.map_err(ApiError)?;
    Ok(Json(TodayBody { date, songs }))
}

async fn random<C>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<RandomParams>,
) -> Result<Json<RandomBody>, ApiError>
where
    C: SearchClient + Send + Sync + 'static,
{
    let count = params.count.unwrap_or(state.default_count);
    let songs = state.random.select(count).await.map_err(ApiError)?;
    Ok(Json(RandomBody { songs }))
}

/// `/api/songs/today` and `/api/songs/random` over any search backend
pub fn router<C>(state: AppState<C>) -> Router
where
    C: SearchClient + Send + Sync + 'static,
{
    Router::new()
        .route("/api/songs/today", get(today::<C>))
        .route("/api/songs/random", get(random::<C>))
        .with_state(Arc::new(state))
}
