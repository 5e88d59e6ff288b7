//! Theme preference state.
//!
//! # Responsibility
//! - Load the active theme id once and write it back on every change.
//!
//! # Invariants
//! - Missing, unreadable or unknown stored ids resolve to `ThemeId::Dark`.
//! - The id is stored as bare text (`dark`, `light`, ...), not JSON.

use crate::config::StoreConfig;
use crate::model::theme::{Theme, ThemeId};
use crate::repo::state_repo::StateRepository;
use log::{error, info, warn};

/// Active theme preference backed by durable storage.
pub struct ThemeStore<R: StateRepository> {
    repo: R,
    theme_key: String,
    theme_id: ThemeId,
}

impl<R: StateRepository> ThemeStore<R> {
    pub fn load(repo: R) -> Self {
        Self::load_with_config(repo, &StoreConfig::default())
    }

    pub fn load_with_config(repo: R, config: &StoreConfig) -> Self {
        let theme_id = load_theme_id(&repo, &config.theme_key);
        Self {
            repo,
            theme_key: config.theme_key.clone(),
            theme_id,
        }
    }

    pub fn theme_id(&self) -> ThemeId {
        self.theme_id
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme_id.theme()
    }

    /// Switches the active theme and persists it. Write failures are logged.
    pub fn set_theme(&mut self, theme_id: ThemeId) {
        self.theme_id = theme_id;
        if let Err(err) = self.repo.set_item(&self.theme_key, theme_id.as_str()) {
            error!(
                "event=theme_save module=theme status=error theme={} error_code=save_failed error={}",
                theme_id, err
            );
        }
    }
}

fn load_theme_id<R: StateRepository>(repo: &R, key: &str) -> ThemeId {
    match repo.get_item(key) {
        Ok(Some(stored)) => match stored.parse::<ThemeId>() {
            Ok(theme_id) => {
                info!("event=theme_load module=theme status=ok theme={theme_id}");
                theme_id
            }
            Err(_) => {
                warn!("event=theme_load module=theme status=discarded error_code=unknown_theme");
                ThemeId::default()
            }
        },
        Ok(None) => ThemeId::default(),
        Err(err) => {
            error!(
                "event=theme_load module=theme status=error error_code=read_failed error={}",
                err
            );
            ThemeId::default()
        }
    }
}
