use serde::{Deserialize, Serialize};

/// Profile role stored alongside the identity; gates write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Candidate,
    Employer,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "CANDIDATE" => Some(Role::Candidate),
            "EMPLOYER" => Some(Role::Employer),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
}
