//! Meme catalog, user uploads and liked ids.
//!
//! [`MemeState::apply`] is the transition function for user actions: it
//! mutates the state in place and returns the effects to persist. It never
//! touches storage, so a storage failure can never corrupt a transition.
//! Catalog load transitions (`fetch_*`) persist nothing and cannot fail.
//! [`MemeStore`] wraps the state, executes effects and drives the
//! asynchronous catalog load.

use crate::error::AppError;
use crate::models::Meme;
use crate::services::catalog_service::MemeCatalog;
use crate::storage::{self, keys, Effect, KeyValueStore};

/// Identifies one catalog load; completions for older ids are ignored
pub type RequestId = u64;

/// Progress of the remote catalog load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemeAction {
    Like(String),
    Unlike(String),
    AddUserMeme(Meme),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemeState {
    pub catalog: Vec<Meme>,
    /// Most recent upload first
    pub user_memes: Vec<Meme>,
    /// Liked ids in the order they were liked, without duplicates
    pub liked_ids: Vec<String>,
    pub fetch_status: FetchStatus,
    pub fetch_error: Option<String>,
    pending_request: Option<RequestId>,
}

impl MemeState {
    /// Builds the initial state from previously persisted user data
    pub fn with_user_data(user_memes: Vec<Meme>, liked_ids: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(liked_ids.len());
        for id in liked_ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }

        Self {
            user_memes,
            liked_ids: deduped,
            ..Self::default()
        }
    }

    /// Applies one action. On `Err` the state is left untouched.
    pub fn apply(&mut self, action: MemeAction) -> Result<Vec<Effect>, AppError> {
        match action {
            MemeAction::Like(id) => {
                let value = if self.liked_ids.contains(&id) {
                    serde_json::to_string(&self.liked_ids)?
                } else {
                    let mut liked = self.liked_ids.clone();
                    liked.push(id);
                    let value = serde_json::to_string(&liked)?;
                    self.liked_ids = liked;
                    value
                };
                Ok(vec![Effect::persist(keys::LIKED_MEMES, value)])
            }
            MemeAction::Unlike(id) => {
                self.liked_ids.retain(|liked| liked != &id);
                let value = serde_json::to_string(&self.liked_ids)?;
                Ok(vec![Effect::persist(keys::LIKED_MEMES, value)])
            }
            MemeAction::AddUserMeme(meme) => {
                if self.find(&meme.id).is_some() {
                    return Err(AppError::Validation(format!(
                        "A meme with id {} already exists",
                        meme.id
                    )));
                }
                let mut user_memes = Vec::with_capacity(self.user_memes.len() + 1);
                user_memes.push(meme);
                user_memes.extend(self.user_memes.iter().cloned());
                let value = serde_json::to_string(&user_memes)?;
                self.user_memes = user_memes;
                Ok(vec![Effect::persist(keys::USER_MEMES, value)])
            }
        }
    }

    /// Marks `request` as the load whose completion will be accepted
    pub fn fetch_pending(&mut self, request: RequestId) {
        self.fetch_status = FetchStatus::Loading;
        self.fetch_error = None;
        self.pending_request = Some(request);
    }

    pub fn fetch_fulfilled(&mut self, request: RequestId, memes: Vec<Meme>) {
        if self.pending_request != Some(request) {
            log::debug!("Ignoring stale catalog completion #{}", request);
            return;
        }
        self.pending_request = None;
        self.fetch_status = FetchStatus::Succeeded;
        self.catalog = memes;
    }

    pub fn fetch_rejected(&mut self, request: RequestId, error: String) {
        if self.pending_request != Some(request) {
            log::debug!("Ignoring stale catalog failure #{}", request);
            return;
        }
        self.pending_request = None;
        self.fetch_status = FetchStatus::Failed;
        self.fetch_error = Some(error);
    }

    /// Looks a meme up in the catalog first, then in the user's uploads
    pub fn find(&self, id: &str) -> Option<&Meme> {
        self.catalog
            .iter()
            .find(|m| m.id == id)
            .or_else(|| self.user_memes.iter().find(|m| m.id == id))
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_ids.iter().any(|liked| liked == id)
    }

    /// Local like count: a single user can like a meme at most once
    pub fn like_count(&self, id: &str) -> u64 {
        u64::from(self.is_liked(id))
    }

    /// Liked memes in like order; ids that resolve to nothing are dropped
    pub fn liked_memes(&self) -> Vec<&Meme> {
        self.liked_ids.iter().filter_map(|id| self.find(id)).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_status == FetchStatus::Loading
    }
}

/// Owner of the meme state; the only way the view mutates it
#[derive(Debug, Default)]
pub struct MemeStore {
    state: MemeState,
    last_request: RequestId,
}

impl MemeStore {
    /// Restores user memes and liked ids from storage.
    ///
    /// Unreadable or corrupt values start as empty collections.
    pub fn hydrate(storage: &dyn KeyValueStore) -> Self {
        let user_memes = storage::load_json::<Vec<Meme>>(storage, keys::USER_MEMES)
            .unwrap_or_else(|e| {
                log::warn!("Discarding stored user memes: {}", e);
                None
            })
            .unwrap_or_default();
        let liked_ids = storage::load_json::<Vec<String>>(storage, keys::LIKED_MEMES)
            .unwrap_or_else(|e| {
                log::warn!("Discarding stored liked ids: {}", e);
                None
            })
            .unwrap_or_default();

        log::debug!(
            "Hydrated {} user memes and {} likes",
            user_memes.len(),
            liked_ids.len()
        );

        Self {
            state: MemeState::with_user_data(user_memes, liked_ids),
            last_request: 0,
        }
    }

    pub fn state(&self) -> &MemeState {
        &self.state
    }

    /// Applies an action and runs its effects against `storage`
    pub fn dispatch(
        &mut self,
        storage: &dyn KeyValueStore,
        action: MemeAction,
    ) -> Result<Vec<Effect>, AppError> {
        let effects = self.state.apply(action)?;
        Ok(storage::run_effects(storage, effects))
    }

    /// Moves to `loading` and returns the id the completion must carry
    pub fn begin_load(&mut self) -> RequestId {
        self.last_request += 1;
        let request = self.last_request;
        self.state.fetch_pending(request);
        request
    }

    /// Records the outcome of the load identified by `request`
    pub fn finish_load(&mut self, request: RequestId, result: Result<Vec<Meme>, AppError>) {
        match result {
            Ok(memes) => {
                log::info!("Catalog loaded with {} memes", memes.len());
                self.state.fetch_fulfilled(request, memes);
            }
            Err(e) => {
                log::error!("Catalog load failed: {}", e);
                self.state.fetch_rejected(request, e.to_string());
            }
        }
    }

    /// Fetches the catalog with exactly one call to `catalog`
    pub async fn load_catalog<C: MemeCatalog>(&mut self, catalog: &C) {
        let request = self.begin_load();
        let result = catalog.fetch_memes().await;
        self.finish_load(request, result);
    }

    pub fn like(&mut self, storage: &dyn KeyValueStore, id: &str) -> Result<(), AppError> {
        self.dispatch(storage, MemeAction::Like(id.to_string()))?;
        Ok(())
    }

    pub fn unlike(&mut self, storage: &dyn KeyValueStore, id: &str) -> Result<(), AppError> {
        self.dispatch(storage, MemeAction::Unlike(id.to_string()))?;
        Ok(())
    }

    /// Likes or unlikes depending on the current state; returns the new state
    pub fn toggle_like(&mut self, storage: &dyn KeyValueStore, id: &str) -> Result<bool, AppError> {
        if self.state.is_liked(id) {
            self.unlike(storage, id)?;
            Ok(false)
        } else {
            self.like(storage, id)?;
            Ok(true)
        }
    }

    pub fn add_user_meme(&mut self, storage: &dyn KeyValueStore, meme: Meme) -> Result<(), AppError> {
        log::debug!("Adding user meme {}", meme.id);
        self.dispatch(storage, MemeAction::AddUserMeme(meme))?;
        Ok(())
    }

    pub fn liked_memes(&self) -> Vec<&Meme> {
        self.state.liked_memes()
    }
}
