use chrono::Utc;
use tracing::info;

use crate::applications::tracking::clean_text;
use crate::errors::AppError;
use crate::models::profile::{
    CandidateProfile, Education, GraduationRecord, JobPreferences, ProfileUpdate, SchoolRecord,
};
use crate::profiles::store::ProfileStore;

/// The stored profile, or an empty, incomplete one.
pub async fn load_profile(
    store: &dyn ProfileStore,
    user_id: &str,
) -> Result<CandidateProfile, AppError> {
    Ok(store.get_profile(user_id).await?.unwrap_or_default())
}

/// Trimmed, blanks dropped, first spelling of each skill kept
/// (compared case-insensitively).
pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for skill in skills {
        let skill = skill.trim();
        if skill.is_empty() {
            continue;
        }
        let key = skill.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(skill.to_string());
        }
    }
    out
}

fn clean_school(record: SchoolRecord) -> SchoolRecord {
    SchoolRecord {
        school: clean_text(record.school),
        year: clean_text(record.year),
        percentage: clean_text(record.percentage),
    }
}

fn clean_education(education: Education) -> Education {
    let GraduationRecord {
        college,
        degree,
        year,
        score,
    } = education.graduation;
    Education {
        tenth: clean_school(education.tenth),
        twelfth: clean_school(education.twelfth),
        graduation: GraduationRecord {
            college: clean_text(college),
            degree: clean_text(degree),
            year: clean_text(year),
            score: clean_text(score),
        },
    }
}

/// Replaces the candidate's profile and marks it completed.
pub async fn save_profile(
    store: &dyn ProfileStore,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<CandidateProfile, AppError> {
    let now = Utc::now();
    let profile = CandidateProfile {
        name: clean_text(update.name),
        title: clean_text(update.title),
        bio: clean_text(update.bio),
        phone: clean_text(update.phone),
        education: clean_education(update.education),
        skills: normalize_skills(update.skills),
        experience: clean_text(update.experience),
        preferences: JobPreferences {
            location: clean_text(update.preferences.location),
            salary: clean_text(update.preferences.salary),
            job_type: update.preferences.job_type,
            role: clean_text(update.preferences.role),
        },
        resume_url: clean_text(update.resume_url),
        profile_completed: true,
        updated_at: Some(now),
    };

    store.put_profile(user_id, &profile, now).await?;
    info!("Profile saved for {user_id} ({} skills)", profile.skills.len());
    Ok(profile)
}
