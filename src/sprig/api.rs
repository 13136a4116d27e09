//! # API Facade
//!
//! A thin layer over `commands/*.rs`. Every user operation has one method
//! here, and every UI client (the CLI today) goes through it.
//!
//! The facade:
//! - parses plant selectors (`"3"`, `"Monstera"`, a full id)
//! - stamps operations with the current time
//! - builds the configured identifier for `identify_plant`
//!
//! It does no printing and holds no business rules. `SprigApi<B>` is generic
//! over the storage backend, so tests run it on [`MemBackend`] while the
//! CLI uses [`FsBackend`].
//!
//! [`MemBackend`]: crate::store::mem_backend::MemBackend
//! [`FsBackend`]: crate::store::fs_backend::FsBackend

use crate::commands;
use crate::commands::helpers::parse_selectors;
use crate::config::SprigConfig;
use crate::error::Result;
use crate::identify::{Identifier, ImagePayload};
use crate::model::{CareAction, PlantDraft, PlantPatch};
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;
use crate::themes::ThemeId;
use chrono::Utc;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::{LocationFilter, PlantFilter};
pub use crate::commands::profile::ProfileUpdate;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct SprigApi<B: StorageBackend> {
    store: PlantStore<B>,
    config_dir: PathBuf,
}

impl<B: StorageBackend> SprigApi<B> {
    pub fn new(store: PlantStore<B>, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn store(&self) -> &PlantStore<B> {
        &self.store
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn load_config(&self) -> Result<SprigConfig> {
        SprigConfig::load(&self.config_dir)
    }

    pub fn add_plant(&mut self, draft: PlantDraft) -> Result<CmdResult> {
        commands::add::run(&mut self.store, draft, Utc::now())
    }

    pub fn list_plants(&self, filter: &PlantFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn view_plants<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn update_plant(&mut self, selector: &str, patch: &PlantPatch) -> Result<CmdResult> {
        let selector = selector.parse()?;
        commands::update::run(&mut self.store, &selector, patch)
    }

    pub fn delete_plants<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn record_care<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        action: CareAction,
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::care::run(&mut self.store, &selectors, action, Utc::now())
    }

    pub fn reminders(&self) -> Result<CmdResult> {
        commands::reminders::run(&self.store, Utc::now())
    }

    /// The "plants need water" notice shown when a session starts.
    pub fn startup_check(&self) -> Result<CmdResult> {
        commands::reminders::check(&self.store, Utc::now())
    }

    pub fn history(&self, limit: Option<usize>) -> Result<CmdResult> {
        commands::history::run(&self.store, limit)
    }

    pub async fn identify_plant(
        &mut self,
        image: ImagePayload,
        draft: PlantDraft,
        save: bool,
    ) -> Result<CmdResult> {
        let config = self.load_config()?;
        let identifier = Identifier::from_config(&config)?;
        commands::identify::run(&mut self.store, &identifier, image, draft, save, Utc::now()).await
    }

    pub fn profile(&self) -> Result<CmdResult> {
        commands::profile::show(&self.store, Utc::now())
    }

    pub fn update_profile(&self, changes: ProfileUpdate) -> Result<CmdResult> {
        commands::profile::update(&self.store, changes, Utc::now())
    }

    pub fn theme(&self) -> Result<CmdResult> {
        commands::theme::show(self.store.backend())
    }

    pub fn set_theme(&self, theme: ThemeId) -> Result<CmdResult> {
        commands::theme::set(self.store.backend(), theme)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}
