use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::leads::query::ListParams;
use crate::leads::validation::{validate_email, validate_name, validate_resume};
use crate::models::lead::{Lead, NewLead};
use crate::notifier::spawn_notification;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LeadListResponse {
    pub items: Vec<Lead>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// POST /api/v1/leads
///
/// Public intake endpoint. The resume is written to blob storage before the
/// row is inserted, so a failed insert can only orphan a file, never leave a
/// row pointing at a missing one.
pub async fn submit_lead(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    let mut first_name = None;
    let mut last_name = None;
    let mut email = None;
    let mut resume: Option<(Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "first_name" => {
                first_name = Some(read_text(field).await?);
            }
            "last_name" => {
                last_name = Some(read_text(field).await?);
            }
            "email" => {
                email = Some(read_text(field).await?);
            }
            "resume" => {
                let filename = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("reading resume upload: {e}")))?;
                resume = Some((filename, data));
            }
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    let first_name = validate_name(
        "first_name",
        first_name.as_deref().unwrap_or_default(),
    )?;
    let last_name = validate_name("last_name", last_name.as_deref().unwrap_or_default())?;
    let email = validate_email(email.as_deref().unwrap_or_default())?;
    let (filename, data) = resume
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    let meta = validate_resume(filename.as_deref(), &data, state.config.max_upload_bytes)?;

    let id = Uuid::new_v4();
    let resume_key = format!("{id}.{}", meta.kind.extension());

    state.resumes.save(&resume_key, data).await?;

    let lead = state
        .leads
        .insert_lead(NewLead {
            id,
            first_name,
            last_name,
            email,
            resume_key,
            resume_original_filename: meta.original_filename,
            resume_mime_type: meta.kind.mime_type().to_string(),
            resume_size: meta.size,
        })
        .await?;

    tracing::info!("Created lead {} ({})", lead.id, lead.email);

    spawn_notification(
        state.notifier.clone(),
        lead.clone(),
        std::time::Duration::from_secs(state.config.notify_timeout_secs),
    );

    Ok((StatusCode::CREATED, Json(lead)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or("field").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("reading {name}: {e}")))
}

/// GET /api/v1/leads
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<LeadListResponse>, AppError> {
    let query = params.validate(&state.config)?;
    let page = state
        .leads
        .list_leads(&query.filter, query.limit, query.offset)
        .await?;

    Ok(Json(LeadListResponse {
        items: page.items,
        total: page.total,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// GET /api/v1/leads/:id
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lead>, AppError> {
    let lead = state
        .leads
        .get_lead(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;
    Ok(Json(lead))
}

/// PATCH/PUT /api/v1/leads/:id/reached-out
///
/// Idempotent: re-marking an already reached-out lead succeeds without
/// touching `updated_at`.
pub async fn mark_reached_out(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lead>, AppError> {
    let lead = state
        .leads
        .mark_reached_out(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;

    tracing::info!("Lead {} marked reached_out by {}", lead.id, user.email);
    Ok(Json(lead))
}

/// GET /api/v1/leads/:id/resume
pub async fn download_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let lead = state
        .leads
        .get_lead(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;

    let data = state
        .resumes
        .load(&lead.resume_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume for lead {id} not found")))?;

    let headers = [
        (header::CONTENT_TYPE, lead.resume_mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                lead.resume_original_filename.replace('"', "")
            ),
        ),
    ];

    Ok((headers, data).into_response())
}
