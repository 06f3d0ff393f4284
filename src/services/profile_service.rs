use crate::error::AppError;
use crate::image_processing::image_path_to_data_url;
use crate::models::Profile;
use crate::storage::{keys, KeyValueStore};
use std::path::Path;

/// Reads a field; unreadable and empty values count as missing
fn read_field(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    storage
        .get(key)
        .unwrap_or_else(|e| {
            log::warn!("Could not read '{}': {}", key, e);
            None
        })
        .filter(|value| !value.is_empty())
}

/// Loads the profile, filling missing or empty fields with defaults
pub fn load_profile(storage: &dyn KeyValueStore) -> Profile {
    let defaults = Profile::default();
    Profile {
        name: read_field(storage, keys::PROFILE_NAME).unwrap_or(defaults.name),
        bio: read_field(storage, keys::PROFILE_BIO).unwrap_or(defaults.bio),
        avatar: read_field(storage, keys::PROFILE_AVATAR),
    }
}

/// Saves the profile as given; the avatar is only written when present
pub fn save_profile(storage: &dyn KeyValueStore, profile: &Profile) -> Result<(), AppError> {
    storage.set(keys::PROFILE_NAME, &profile.name)?;
    storage.set(keys::PROFILE_BIO, &profile.bio)?;
    if let Some(avatar) = &profile.avatar {
        storage.set(keys::PROFILE_AVATAR, avatar)?;
    }

    Ok(())
}

/// Replaces the avatar with the image at `path` and saves the profile
pub fn set_avatar_from_file(
    storage: &dyn KeyValueStore,
    path: &Path,
    max_bytes: usize,
) -> Result<Profile, AppError> {
    let data_url = image_path_to_data_url(path, max_bytes)?;

    let mut profile = load_profile(storage);
    profile.avatar = Some(data_url);
    save_profile(storage, &profile)?;

    log::info!("Avatar updated from {}", path.display());
    Ok(profile)
}
