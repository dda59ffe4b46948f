use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument, warn};

use crate::error::{ApiError, Message};
use crate::state::AppState;

use super::dto::{ListQuery, ProviderDetail, ProviderSummary, RegisterForm};
use super::repo;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_providers))
        .route("/drivers/:id", get(get_provider))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /register (multipart)
/// Text fields firstName..occupation, optional file field `profileimage`.
/// Order: parse → validate → save file → insert → respond.
#[instrument(skip(state, mp))]
pub async fn register(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<Message>, ApiError> {
    let mut form = RegisterForm::default();
    let mut upload: Option<(String, Bytes)> = None;

    while let Ok(Some(field)) = mp.next_field().await {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        if name == "profileimage" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let data = field.bytes().await.map_err(ApiError::internal)?;
            if !data.is_empty() {
                upload = Some((file_name, data));
            }
        } else {
            let value = field.text().await.map_err(ApiError::internal)?;
            form.set(&name, value);
        }
    }

    let mut user = form.validate()?;

    if let Some((file_name, data)) = upload {
        user.profile_image = state
            .images
            .save(&file_name, data)
            .await
            .map_err(ApiError::internal)?;
    }

    repo::insert(&state.db, &user).await.map_err(ApiError::internal)?;

    info!(email = %user.email, occupation = %user.occupation, "user registered");
    Ok(Json(Message {
        message: "User registered successfully".into(),
    }))
}

/// GET /drivers?occupation=<string>
#[instrument(skip(state))]
pub async fn list_providers(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ProviderSummary>>, ApiError> {
    let occupation = match q.occupation.as_deref() {
        Some(o) if !o.is_empty() => o,
        _ => {
            warn!("missing occupation filter");
            return Err(ApiError::bad_request("Occupation is required"));
        }
    };

    let rows = repo::list_by_occupation(&state.db, occupation)
        .await
        .map_err(ApiError::internal)?;

    if rows.is_empty() {
        return Err(ApiError::not_found("No drivers found"));
    }

    Ok(Json(rows.into_iter().map(ProviderSummary::from).collect()))
}

/// GET /drivers/:id
#[instrument(skip(state))]
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProviderDetail>, ApiError> {
    let row = repo::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("Provider not found"))?;

    Ok(Json(ProviderDetail::from(row)))
}
