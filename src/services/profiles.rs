use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{
    models::{Education, Experience, Profile, Social},
    Store,
};

/// Raw upsert payload. Every field is optional at this layer; `status` and
/// `skills` presence is enforced by the handler before the call.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    /// Comma-delimited, e.g. "rust, sql , tokio"
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Partial in-place update; only provided non-empty fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct ExperienceUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Trim-and-omit-if-empty rule applied uniformly to optional text fields.
pub fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn no_profile() -> ApiError {
    ApiError::bad_request("No profile found.")
}

pub async fn current_profile(store: &dyn Store, user_id: Uuid) -> Result<Profile, ApiError> {
    store
        .profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("There is no profile for this user."))
}

pub async fn list_profiles(store: &dyn Store) -> Result<Vec<Profile>, ApiError> {
    Ok(store.list_profiles().await?)
}

pub async fn profile_for(store: &dyn Store, user_id: Uuid) -> Result<Profile, ApiError> {
    store.profile_by_user(user_id).await?.ok_or_else(no_profile)
}

/// Create or partially update the caller's profile.
///
/// Text fields merge in only when provided and non-empty after trimming.
/// The skills list and the social block are rebuilt wholesale from the
/// payload on every upsert, matching the historical behavior.
pub async fn upsert_profile(
    store: &dyn Store,
    user_id: Uuid,
    fields: ProfileFields,
) -> Result<Profile, ApiError> {
    let mut profile = store
        .profile_by_user(user_id)
        .await?
        .unwrap_or_else(|| Profile::new(user_id));

    if let Some(v) = clean(&fields.company) {
        profile.company = Some(v);
    }
    if let Some(v) = clean(&fields.website) {
        profile.website = Some(v);
    }
    if let Some(v) = clean(&fields.location) {
        profile.location = Some(v);
    }
    if let Some(v) = clean(&fields.bio) {
        profile.bio = Some(v);
    }
    if let Some(v) = clean(&fields.status) {
        profile.status = v;
    }
    if let Some(v) = clean(&fields.githubusername) {
        profile.githubusername = Some(v);
    }

    profile.skills = match clean(&fields.skills) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        None => Vec::new(),
    };

    profile.social = Social {
        youtube: clean(&fields.youtube),
        twitter: clean(&fields.twitter),
        facebook: clean(&fields.facebook),
        linkedin: clean(&fields.linkedin),
        instagram: clean(&fields.instagram),
    };

    store.put_profile(profile.clone()).await?;
    Ok(profile)
}

/// Prepend a new experience entry to the caller's profile.
pub async fn add_experience(
    store: &dyn Store,
    user_id: Uuid,
    entry: NewExperience,
) -> Result<Profile, ApiError> {
    let mut profile = store.profile_by_user(user_id).await?.ok_or_else(no_profile)?;

    profile.experience.insert(
        0,
        Experience {
            id: Uuid::new_v4(),
            title: entry.title,
            company: entry.company,
            location: entry.location,
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description,
        },
    );

    store.put_profile(profile.clone()).await?;
    Ok(profile)
}

/// Apply provided non-empty fields onto the matched entry in place.
pub async fn edit_experience(
    store: &dyn Store,
    user_id: Uuid,
    exp_id: Uuid,
    fields: ExperienceUpdate,
) -> Result<Profile, ApiError> {
    let mut profile = store.profile_by_user(user_id).await?.ok_or_else(no_profile)?;

    let entry = profile
        .experience
        .iter_mut()
        .find(|e| e.id == exp_id)
        .ok_or_else(|| ApiError::bad_request("Experience entry not found."))?;

    if let Some(v) = clean(&fields.title) {
        entry.title = v;
    }
    if let Some(v) = clean(&fields.company) {
        entry.company = v;
    }
    if let Some(v) = clean(&fields.location) {
        entry.location = Some(v);
    }
    if let Some(v) = fields.from {
        entry.from = v;
    }
    if let Some(v) = fields.to {
        entry.to = Some(v);
    }
    if let Some(v) = fields.current {
        entry.current = v;
    }
    if let Some(v) = clean(&fields.description) {
        entry.description = Some(v);
    }

    store.put_profile(profile.clone()).await?;
    Ok(profile)
}

pub async fn delete_experience(
    store: &dyn Store,
    user_id: Uuid,
    exp_id: Uuid,
) -> Result<Profile, ApiError> {
    let mut profile = store.profile_by_user(user_id).await?.ok_or_else(no_profile)?;

    let before = profile.experience.len();
    profile.experience.retain(|e| e.id != exp_id);
    if profile.experience.len() == before {
        return Err(ApiError::bad_request("Experience entry not found."));
    }

    store.put_profile(profile.clone()).await?;
    Ok(profile)
}

/// Prepend a new education entry to the caller's profile.
pub async fn add_education(
    store: &dyn Store,
    user_id: Uuid,
    entry: NewEducation,
) -> Result<Profile, ApiError> {
    let mut profile = store.profile_by_user(user_id).await?.ok_or_else(no_profile)?;

    profile.education.insert(
        0,
        Education {
            id: Uuid::new_v4(),
            school: entry.school,
            degree: entry.degree,
            fieldofstudy: entry.fieldofstudy,
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description,
        },
    );

    store.put_profile(profile.clone()).await?;
    Ok(profile)
}

pub async fn delete_education(
    store: &dyn Store,
    user_id: Uuid,
    edu_id: Uuid,
) -> Result<Profile, ApiError> {
    let mut profile = store.profile_by_user(user_id).await?.ok_or_else(no_profile)?;

    let before = profile.education.len();
    profile.education.retain(|e| e.id != edu_id);
    if profile.education.len() == before {
        return Err(ApiError::bad_request("Education entry not found."));
    }

    store.put_profile(profile.clone()).await?;
    Ok(profile)
}
