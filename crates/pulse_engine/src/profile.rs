use serde::Deserialize;

/// The slice of the GitHub user payload the dashboard needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GithubProfile {
    pub avatar_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("malformed profile payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_profile(bytes: &[u8]) -> Result<GithubProfile, ProfileError> {
    let profile = serde_json::from_slice(bytes)?;
    Ok(profile)
}
