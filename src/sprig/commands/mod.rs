use crate::config::SprigConfig;
use crate::history::HistoryEntry;
use crate::identify::IdentifiedPlant;
use crate::model::{Plant, UserProfile};
use crate::reminders::ReminderBoard;
use crate::themes::ThemeId;

pub mod add;
pub mod care;
pub mod config;
pub mod delete;
pub mod helpers;
pub mod history;
pub mod identify;
pub mod list;
pub mod profile;
pub mod reminders;
pub mod theme;
pub mod update;
pub mod view;

pub use helpers::{DisplayPlant, PlantSelector};
pub use profile::ProfileStats;

/// Severity of a [`CmdMessage`]; the CLI colours by it and exits non-zero
/// when identification reports an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn new(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, content)
    }

    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }
}

/// What a command produced. Clients render whichever parts are filled in.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_plants: Vec<Plant>,
    pub listed_plants: Vec<DisplayPlant>,
    pub board: Option<ReminderBoard>,
    pub history: Vec<HistoryEntry>,
    pub profile: Option<UserProfile>,
    pub stats: Option<ProfileStats>,
    pub theme: Option<ThemeId>,
    pub config: Option<SprigConfig>,
    pub identified: Option<IdentifiedPlant>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_plants(mut self, plants: Vec<Plant>) -> Self {
        self.affected_plants = plants;
        self
    }

    pub fn with_listed_plants(mut self, plants: Vec<DisplayPlant>) -> Self {
        self.listed_plants = plants;
        self
    }

    pub fn with_board(mut self, board: ReminderBoard) -> Self {
        self.board = Some(board);
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_stats(mut self, stats: ProfileStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_theme(mut self, theme: ThemeId) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_config(mut self, config: SprigConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_identified(mut self, plant: IdentifiedPlant) -> Self {
        self.identified = Some(plant);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(CmdMessage::is_error)
    }
}
