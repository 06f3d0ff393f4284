//! Top-level store composing the meme and theme state containers.
//!
//! The view layer talks only to [`AppStore`]; it never mutates state fields
//! directly.

pub mod memes;
pub mod theme;

pub use memes::{FetchStatus, MemeAction, MemeState, MemeStore, RequestId};
pub use theme::{detect_os_theme, ThemeAction, ThemeState, ThemeStore};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{Comment, Meme, Profile, Theme};
use crate::services::catalog_service::MemeCatalog;
use crate::services::explore_service::{self, ExploreQuery, MemeStats};
use crate::services::upload_service::{self, ImageHost};
use crate::services::{comment_service, profile_service};
use crate::storage::{Effect, KeyValueStore, MemoryStore, SqliteStore};

type ThemeListener = Box<dyn Fn(Theme)>;

pub struct AppStore {
    storage: Box<dyn KeyValueStore>,
    memes: MemeStore,
    theme: ThemeStore,
    theme_listener: Option<ThemeListener>,
}

impl AppStore {
    /// Builds both stores on top of `storage`
    pub fn new(storage: Box<dyn KeyValueStore>, os_theme: Option<Theme>) -> Self {
        let memes = MemeStore::hydrate(storage.as_ref());
        let theme = ThemeStore::initialize(storage.as_ref(), os_theme);
        Self {
            storage,
            memes,
            theme,
            theme_listener: None,
        }
    }

    /// Opens the on-disk store described by `config`.
    ///
    /// If the database cannot be opened the session continues in memory.
    pub fn open(config: &AppConfig) -> Self {
        let storage: Box<dyn KeyValueStore> = match SqliteStore::open(&config.data_dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::error!("Storage unavailable, changes will not be saved: {}", e);
                Box::new(MemoryStore::new())
            }
        };
        let os_theme = config.preferred_theme.or_else(detect_os_theme);
        Self::new(storage, os_theme)
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn memes(&self) -> &MemeState {
        self.memes.state()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Registers the callback that applies a theme to the view
    pub fn on_theme_change(&mut self, listener: impl Fn(Theme) + 'static) {
        self.theme_listener = Some(Box::new(listener));
    }

    pub async fn load_catalog<C: MemeCatalog>(&mut self, catalog: &C) {
        self.memes.load_catalog(catalog).await;
    }

    pub fn like(&mut self, id: &str) -> Result<(), AppError> {
        self.memes.like(self.storage.as_ref(), id)
    }

    pub fn unlike(&mut self, id: &str) -> Result<(), AppError> {
        self.memes.unlike(self.storage.as_ref(), id)
    }

    pub fn toggle_like(&mut self, id: &str) -> Result<bool, AppError> {
        self.memes.toggle_like(self.storage.as_ref(), id)
    }

    pub fn add_user_meme(&mut self, meme: Meme) -> Result<(), AppError> {
        self.memes.add_user_meme(self.storage.as_ref(), meme)
    }

    pub async fn upload_meme<H: ImageHost>(
        &mut self,
        host: &H,
        bytes: &[u8],
        caption: &str,
        max_bytes: usize,
    ) -> Result<Meme, AppError> {
        upload_service::upload_meme(
            &mut self.memes,
            self.storage.as_ref(),
            host,
            bytes,
            caption,
            max_bytes,
        )
        .await
    }

    pub fn liked_memes(&self) -> Vec<&Meme> {
        self.memes.liked_memes()
    }

    /// The user's own uploads, newest first
    pub fn posts(&self) -> &[Meme] {
        &self.memes.state().user_memes
    }

    /// Flips the theme and notifies the theme listener
    pub fn toggle_theme(&mut self) -> Theme {
        for effect in self.theme.toggle_theme(self.storage.as_ref()) {
            if let Effect::ApplyTheme(theme) = effect {
                if let Some(listener) = &self.theme_listener {
                    listener(theme);
                }
            }
        }
        self.theme.theme()
    }

    pub fn post_comment(&self, meme_id: &str, text: &str) -> Vec<Comment> {
        comment_service::post_comment(self.storage.as_ref(), meme_id, text)
    }

    pub fn comments(&self, meme_id: &str) -> Vec<Comment> {
        comment_service::load_comments(self.storage.as_ref(), meme_id).unwrap_or_else(|e| {
            log::warn!("Could not read comments for {}: {}", meme_id, e);
            Vec::new()
        })
    }

    pub fn profile(&self) -> Profile {
        profile_service::load_profile(self.storage.as_ref())
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), AppError> {
        profile_service::save_profile(self.storage.as_ref(), profile)
    }

    /// Engagement numbers derived from local likes and comments. Catalog
    /// memes carry no post date, so `posted_at` is always 0.
    pub fn stats(&self, meme: &Meme) -> MemeStats {
        MemeStats {
            likes: self.memes.state().like_count(&meme.id),
            comments: comment_service::comment_count(self.storage.as_ref(), &meme.id) as u64,
            posted_at: 0,
        }
    }

    /// Runs an explore query over the catalog
    pub fn explore(&self, query: &ExploreQuery) -> Vec<&Meme> {
        explore_service::explore(&self.memes.state().catalog, query, |meme| self.stats(meme))
    }

    /// Catalog memes ranked by local likes
    pub fn leaderboard(&self, limit: usize) -> Vec<&Meme> {
        let state = self.memes.state();
        explore_service::leaderboard(&state.catalog, |meme| state.like_count(&meme.id), limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::explore_service::SortKey;
    use crate::storage::keys;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StaticCatalog(Vec<Meme>);

    impl MemeCatalog for StaticCatalog {
        async fn fetch_memes(&self) -> Result<Vec<Meme>, AppError> {
            Ok(self.0.clone())
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog(vec![
            Meme::new("1", "u", "Doge"),
            Meme::new("2", "u", "Cat"),
            Meme::new("3", "u", "Stonks"),
        ])
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let storage = Rc::new(MemoryStore::new());

        struct Shared(Rc<MemoryStore>);
        impl KeyValueStore for Shared {
            fn get(&self, key: &str) -> Result<Option<String>, AppError> {
                self.0.get(key)
            }
            fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
                self.0.set(key, value)
            }
        }

        let mut app = AppStore::new(Box::new(Shared(storage.clone())), None);
        app.load_catalog(&catalog()).await;
        app.like("2").unwrap();
        app.add_user_meme(Meme::new("1700000000000", "u", "Mine")).unwrap();
        app.toggle_theme();

        let restarted = AppStore::new(Box::new(Shared(storage.clone())), None);
        assert_eq!(restarted.memes().liked_ids, vec!["2"]);
        assert_eq!(restarted.memes().user_memes.len(), 1);
        assert_eq!(restarted.theme(), Theme::Dark);
        // The catalog is never persisted
        assert!(restarted.memes().catalog.is_empty());
        assert_eq!(restarted.memes().fetch_status, FetchStatus::Idle);
    }

    #[test]
    fn test_theme_listener_is_notified() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut app = AppStore::new(Box::new(MemoryStore::new()), Some(Theme::Dark));
        let sink = seen.clone();
        app.on_theme_change(move |theme| sink.borrow_mut().push(theme));

        assert_eq!(app.toggle_theme(), Theme::Light);
        assert_eq!(app.toggle_theme(), Theme::Dark);
        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
        assert_eq!(
            app.storage().get(keys::THEME).unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_explore_uses_local_engagement() {
        let mut app = AppStore::new(Box::new(MemoryStore::new()), None);
        app.load_catalog(&catalog()).await;
        app.like("3").unwrap();
        app.post_comment("2", "nice");
        app.post_comment("2", "very nice");

        let by_likes: Vec<&str> = app
            .explore(&ExploreQuery::default())
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(by_likes, vec!["3", "1", "2"]);

        let query = ExploreQuery {
            sort: SortKey::Comments,
            ..ExploreQuery::default()
        };
        let by_comments: Vec<&str> = app.explore(&query).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(by_comments, vec!["2", "1", "3"]);

        let top: Vec<&str> = app.leaderboard(2).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(top, vec!["3", "1"]);
    }

    #[test]
    fn test_profile_round_trip() {
        let app = AppStore::new(Box::new(MemoryStore::new()), None);
        assert_eq!(app.profile(), Profile::default());

        let profile = Profile {
            bio: "Professional lurker".to_string(),
            ..Profile::default()
        };
        app.save_profile(&profile).unwrap();
        assert_eq!(app.profile(), profile);
    }

    #[tokio::test]
    async fn test_explore_covers_catalog_only_and_dates_tie() {
        let mut app = AppStore::new(Box::new(MemoryStore::new()), None);
        app.load_catalog(&catalog()).await;
        app.add_user_meme(Meme::new("1700000000000", "u", "Mine")).unwrap();

        let query = ExploreQuery {
            sort: SortKey::Date,
            ..ExploreQuery::default()
        };
        let by_date: Vec<&str> = app.explore(&query).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(by_date, vec!["1", "2", "3"]);
        assert_eq!(app.stats(&app.memes().user_memes[0]).posted_at, 0);
    }

    #[test]
    fn test_posts_are_newest_first() {
        let mut app = AppStore::new(Box::new(MemoryStore::new()), None);
        app.add_user_meme(Meme::new("1700000000000", "u", "First")).unwrap();
        app.add_user_meme(Meme::new("1700000000001", "u", "Second")).unwrap();

        let names: Vec<&str> = app.posts().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
