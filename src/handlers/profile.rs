use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::middleware::AuthUser;
use crate::services::accounts;
use crate::services::profiles::{
    self, clean, ExperienceUpdate, NewEducation, NewExperience, ProfileFields,
};
use crate::state::AppState;
use crate::store::models::Profile;

/// GET /api/profile/me - the caller's profile.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Profile>, ApiError> {
    let profile = profiles::current_profile(state.store.as_ref(), auth.id).await?;
    Ok(Json(profile))
}

/// POST /api/profile - create or update the caller's profile.
pub async fn upsert(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(fields): Json<ProfileFields>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = Vec::new();
    if clean(&fields.status).is_none() {
        errors.push(FieldError::for_param("status", "Status is required."));
    }
    if clean(&fields.skills).is_none() {
        errors.push(FieldError::for_param("skills", "Skills is required."));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let profile = profiles::upsert_profile(state.store.as_ref(), auth.id, fields).await?;
    Ok(Json(profile))
}

/// GET /api/profile - all public profiles.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = profiles::list_profiles(state.store.as_ref()).await?;
    Ok(Json(profiles))
}

/// GET /api/profile/user/:user_id - profile by user id. An unparseable id
/// gets the same response as a missing profile.
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| ApiError::bad_request("No profile found."))?;
    let profile = profiles::profile_for(state.store.as_ref(), user_id).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile - delete the caller's profile and account.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    accounts::delete_account(state.store.as_ref(), auth.id).await?;
    Ok(Json(json!({ "msg": "Deletion successful." })))
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// PUT /api/profile/experience - prepend an experience entry.
pub async fn add_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ExperienceRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = Vec::new();
    let title = clean(&body.title);
    if title.is_none() {
        errors.push(FieldError::for_param("title", "Title is required."));
    }
    let company = clean(&body.company);
    if company.is_none() {
        errors.push(FieldError::for_param("company", "Company is required."));
    }
    if body.from.is_none() {
        errors.push(FieldError::for_param("from", "From date is required."));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let entry = NewExperience {
        title: title.unwrap_or_default(),
        company: company.unwrap_or_default(),
        location: clean(&body.location),
        from: body.from.unwrap_or_default(),
        to: body.to,
        current: body.current.unwrap_or(false),
        description: clean(&body.description),
    };

    let profile = profiles::add_experience(state.store.as_ref(), auth.id, entry).await?;
    Ok(Json(profile))
}

/// PUT /api/profile/experience/:exp_id - edit an entry in place.
pub async fn edit_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(exp_id): Path<String>,
    Json(body): Json<ExperienceUpdate>,
) -> Result<Json<Profile>, ApiError> {
    let exp_id = parse_entry_id(&exp_id, "Experience entry not found.")?;
    let profile = profiles::edit_experience(state.store.as_ref(), auth.id, exp_id, body).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/experience/:exp_id
pub async fn delete_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let exp_id = parse_entry_id(&exp_id, "Experience entry not found.")?;
    let profile = profiles::delete_experience(state.store.as_ref(), auth.id, exp_id).await?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// PUT /api/profile/education - prepend an education entry.
pub async fn add_education(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<EducationRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = Vec::new();
    let school = clean(&body.school);
    if school.is_none() {
        errors.push(FieldError::for_param("school", "School is required."));
    }
    let degree = clean(&body.degree);
    if degree.is_none() {
        errors.push(FieldError::for_param("degree", "Degree is required."));
    }
    let fieldofstudy = clean(&body.fieldofstudy);
    if fieldofstudy.is_none() {
        errors.push(FieldError::for_param("fieldofstudy", "Field of study is required."));
    }
    if body.from.is_none() {
        errors.push(FieldError::for_param("from", "From date is required."));
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let entry = NewEducation {
        school: school.unwrap_or_default(),
        degree: degree.unwrap_or_default(),
        fieldofstudy: fieldofstudy.unwrap_or_default(),
        from: body.from.unwrap_or_default(),
        to: body.to,
        current: body.current.unwrap_or(false),
        description: clean(&body.description),
    };

    let profile = profiles::add_education(state.store.as_ref(), auth.id, entry).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/education/:edu_id
pub async fn delete_education(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let edu_id = parse_entry_id(&edu_id, "Education entry not found.")?;
    let profile = profiles::delete_education(state.store.as_ref(), auth.id, edu_id).await?;
    Ok(Json(profile))
}

fn parse_entry_id(raw: &str, not_found_msg: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(not_found_msg))
}
