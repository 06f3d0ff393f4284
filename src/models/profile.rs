use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_NAME: &str = "MemeVerse User";
pub const DEFAULT_PROFILE_BIO: &str = "No bio yet";

/// The local user's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    /// Avatar as a `data:` URL
    pub avatar: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            bio: DEFAULT_PROFILE_BIO.to_string(),
            avatar: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.name, "MemeVerse User");
        assert_eq!(profile.bio, "No bio yet");
        assert!(profile.avatar.is_none());
    }
}
