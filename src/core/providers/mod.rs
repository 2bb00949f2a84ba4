pub mod antigravity;
pub mod codex;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Codex,
    Antigravity,
}

impl Provider {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "codex" => Some(Self::Codex),
            "antigravity" => Some(Self::Antigravity),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Codex => "codex",
            Self::Antigravity => "antigravity",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Codex => "Codex",
            Self::Antigravity => "Antigravity",
        }
    }

    /// Emoji shown next to the provider in the status bar and dropdown.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Codex => "🤖",
            Self::Antigravity => "🌀",
        }
    }

    /// Single-letter code used in status-bar tokens, e.g. `🤖C:80%`.
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Codex => "C",
            Self::Antigravity => "A",
        }
    }

    /// All provider variants in display order.
    pub fn all() -> &'static [Provider] {
        &[Provider::Codex, Provider::Antigravity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_round_trips() {
        for provider in Provider::all() {
            assert_eq!(Provider::from_id(provider.id()), Some(*provider));
        }
    }

    #[test]
    fn from_id_is_case_insensitive() {
        assert_eq!(Provider::from_id("Codex"), Some(Provider::Codex));
        assert_eq!(Provider::from_id("ANTIGRAVITY"), Some(Provider::Antigravity));
    }

    #[test]
    fn from_id_rejects_unknown() {
        assert_eq!(Provider::from_id("gemini"), None);
        assert_eq!(Provider::from_id(""), None);
    }
}
