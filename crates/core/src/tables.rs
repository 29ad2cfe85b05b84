#![forbid(unsafe_code)]

pub const KEY_PREFIX: &str = "orbit_";

/// Closed vocabulary of logical collections with a fixed storage key each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Projects,
    Visions,
    UserProfiles,
    Tasks,
    Prds,
    Prompts,
    Settings,
    TerminalPreferences,
    FavoriteCommands,
    TerminalSessions,
    TerminalOutput,
    ResearchApps,
    ResearchNotes,
    ResearchImages,
    ProjectConfigs,
    AiSettings,
}

impl Table {
    pub const ALL: [Table; 16] = [
        Table::Projects,
        Table::Visions,
        Table::UserProfiles,
        Table::Tasks,
        Table::Prds,
        Table::Prompts,
        Table::Settings,
        Table::TerminalPreferences,
        Table::FavoriteCommands,
        Table::TerminalSessions,
        Table::TerminalOutput,
        Table::ResearchApps,
        Table::ResearchNotes,
        Table::ResearchImages,
        Table::ProjectConfigs,
        Table::AiSettings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Projects => "projects",
            Table::Visions => "visions",
            Table::UserProfiles => "user_profiles",
            Table::Tasks => "tasks",
            Table::Prds => "prds",
            Table::Prompts => "prompts",
            Table::Settings => "settings",
            Table::TerminalPreferences => "terminal_preferences",
            Table::FavoriteCommands => "favorite_commands",
            Table::TerminalSessions => "terminal_sessions",
            Table::TerminalOutput => "terminal_output",
            Table::ResearchApps => "research_apps",
            Table::ResearchNotes => "research_notes",
            Table::ResearchImages => "research_images",
            Table::ProjectConfigs => "project_configs",
            Table::AiSettings => "ai_settings",
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            Table::Projects => "orbit_projects",
            Table::Visions => "orbit_visions",
            Table::UserProfiles => "orbit_user_profiles",
            Table::Tasks => "orbit_tasks",
            Table::Prds => "orbit_prds",
            Table::Prompts => "orbit_prompts",
            Table::Settings => "orbit_settings",
            Table::TerminalPreferences => "orbit_terminal_preferences",
            Table::FavoriteCommands => "orbit_favorite_commands",
            Table::TerminalSessions => "orbit_terminal_sessions",
            Table::TerminalOutput => "orbit_terminal_output",
            Table::ResearchApps => "orbit_research_apps",
            Table::ResearchNotes => "orbit_research_notes",
            Table::ResearchImages => "orbit_research_images",
            Table::ProjectConfigs => "orbit_project_configs",
            Table::AiSettings => "orbit_ai_settings",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.name() == name)
    }
}

/// Where a logical name lives in the backing store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageKey {
    Known(Table),
    Derived(String),
}

impl StorageKey {
    pub fn resolve(name: &str) -> Self {
        match Table::parse(name) {
            Some(table) => Self::Known(table),
            None => Self::Derived(format!("{KEY_PREFIX}{name}")),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(table) => table.storage_key(),
            Self::Derived(key) => key,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_round_trips_through_its_name() {
        for table in Table::ALL {
            assert_eq!(Table::parse(table.name()), Some(table));
            assert!(table.storage_key().starts_with(KEY_PREFIX));
        }
    }

    #[test]
    fn storage_keys_are_distinct() {
        let keys = Table::ALL
            .iter()
            .map(|table| table.storage_key())
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(keys.len(), Table::ALL.len());
    }

    #[test]
    fn unknown_names_fall_back_to_derived_key() {
        let key = StorageKey::resolve("success_metrics");
        assert!(key.is_derived());
        assert_eq!(key.as_str(), "orbit_success_metrics");

        let known = StorageKey::resolve("user_profiles");
        assert_eq!(known, StorageKey::Known(Table::UserProfiles));
        assert_eq!(known.as_str(), "orbit_user_profiles");
    }
}
