use crate::error::AppError;
use crate::models::Comment;
use crate::storage::{self, keys, KeyValueStore};

/// Loads the comments of a meme, newest first
pub fn load_comments(storage: &dyn KeyValueStore, meme_id: &str) -> Result<Vec<Comment>, AppError> {
    Ok(storage::load_json(storage, &keys::comments(meme_id))?.unwrap_or_default())
}

/// Number of comments on a meme; unreadable lists count as zero
pub fn comment_count(storage: &dyn KeyValueStore, meme_id: &str) -> usize {
    load_comments(storage, meme_id)
        .map(|comments| comments.len())
        .unwrap_or(0)
}

/// Posts a comment and returns the updated list.
///
/// Blank text is ignored and the current list is returned unchanged. A
/// failing write is logged; the returned list still contains the comment.
/// When the stored list cannot be read nothing is written, so the stored
/// history is never replaced by a partial list.
pub fn post_comment(storage: &dyn KeyValueStore, meme_id: &str, text: &str) -> Vec<Comment> {
    let (mut comments, readable) = match load_comments(storage, meme_id) {
        Ok(comments) => (comments, true),
        Err(e) => {
            log::warn!("Could not read comments for {}: {}", meme_id, e);
            (Vec::new(), false)
        }
    };

    if text.trim().is_empty() {
        return comments;
    }

    comments.insert(0, Comment::new(text.to_string()));

    if !readable {
        log::warn!("Not saving comment on {}: stored comments are unreadable", meme_id);
        return comments;
    }

    let result = serde_json::to_string(&comments)
        .map_err(AppError::from)
        .and_then(|value| storage.set(&keys::comments(meme_id), &value));
    if let Err(e) = result {
        log::warn!("Could not persist comments for {}: {}", meme_id, e);
    }

    comments
}
