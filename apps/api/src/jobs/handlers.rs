use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::jobs::search::JobSearch;
use crate::jobs::validation::validate_job_form;
use crate::models::job::{JobForm, JobInput, JobRow};
use crate::models::user::CurrentUser;
use crate::state::AppState;

const INDEX_PATH: &str = "/Jobs";

/// Route ids arrive as raw strings so that a malformed id reads as a missing
/// job rather than a bad request.
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>().map_err(|_| {
        warn!("Job id {raw:?} is not a valid id");
        AppError::NotFound(format!("Job {raw} not found"))
    })
}

async fn load_owned(state: &AppState, user: &CurrentUser, id: i32) -> Result<JobRow, AppError> {
    state.jobs.find(id, &user.id).await?.ok_or_else(|| {
        warn!("Job with id {id} not found for user {}", user.id);
        AppError::NotFound(format!("Job {id} not found"))
    })
}

fn validated(form: &JobForm) -> Result<JobInput, AppError> {
    validate_job_form(form).map_err(|errors| {
        for e in &errors {
            warn!("Model error on {}: {}", e.field, e.message);
        }
        AppError::InvalidForm {
            form: serde_json::to_value(form).unwrap_or_default(),
            errors,
        }
    })
}

/// GET /Jobs
pub async fn handle_index(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(search): Query<JobSearch>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let search = search.normalized();
    if let Some(term) = &search.company {
        info!("Filtering jobs by company: {term}");
    }
    if let Some(term) = &search.description {
        info!("Filtering jobs by description: {term}");
    }

    let jobs = state.jobs.list(&user.id, &search).await?;
    info!("Fetched {} jobs for user {}", jobs.len(), user.id);
    Ok(Json(jobs))
}

/// GET /Jobs/Details/:id
pub async fn handle_details(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<JobRow>, AppError> {
    let id = parse_id(&id)?;
    let job = load_owned(&state, &user, id).await?;
    info!("Fetched job details for job with id {id}");
    Ok(Json(job))
}

/// GET /Jobs/Create
pub async fn handle_create_form(_user: CurrentUser) -> Json<JobForm> {
    Json(JobForm::default())
}

/// POST /Jobs/Create
pub async fn handle_create(
    State(state): State<AppState>,
    user: CurrentUser,
    WithRejection(Json(form), _): WithRejection<Json<JobForm>, AppError>,
) -> Result<Redirect, AppError> {
    if form.id.is_some() {
        info!("Ignoring client-supplied id on create");
    }
    let input = validated(&form)?;
    let job = state.jobs.insert(&user.id, &input).await?;
    info!("Job with id {} created for user {}", job.id, user.id);
    Ok(Redirect::to(INDEX_PATH))
}

/// GET /Jobs/Edit/:id
pub async fn handle_edit_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<JobForm>, AppError> {
    let id = parse_id(&id)?;
    let job = load_owned(&state, &user, id).await?;
    Ok(Json(JobForm::from(&job)))
}

/// POST /Jobs/Edit/:id
pub async fn handle_edit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<JobForm>, AppError>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    if let Some(body_id) = form.id {
        if body_id != id {
            warn!("Job id mismatch: {id} does not match {body_id}");
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
    }

    let input = validated(&form)?;
    if state
        .jobs
        .update(id, &user.id, form.version, &input)
        .await?
        .is_some()
    {
        info!("Job with id {id} updated");
        return Ok(Redirect::to(INDEX_PATH));
    }

    if !state.jobs.exists(id, &user.id).await? {
        error!("Job with id {id} no longer exists");
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    error!(
        "Job with id {id} was modified concurrently (expected version {:?})",
        form.version
    );
    Err(AppError::Conflict(format!(
        "Job {id} was changed by another request; reload and try again"
    )))
}

/// GET /Jobs/Delete/:id
pub async fn handle_delete_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<JobRow>, AppError> {
    let id = parse_id(&id)?;
    let job = load_owned(&state, &user, id).await?;
    Ok(Json(job))
}

/// POST /Jobs/Delete/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    if state.jobs.delete(id, &user.id).await? {
        info!("Job with id {id} deleted");
    } else {
        warn!("Job with id {id} was already gone; nothing deleted");
    }
    Ok(Redirect::to(INDEX_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id(""), Err(AppError::NotFound(_))));
    }
}
