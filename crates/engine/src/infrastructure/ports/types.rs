//! Read-side projections returned by the ports.

use serde::{Deserialize, Serialize};

/// What the encounter engine needs to know about a character.
///
/// Owned by the character subsystem; read fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub hp: Option<i64>,
    pub hp_max: Option<i64>,
    pub statuses: Vec<String>,
}

impl CharacterProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: None,
            hp_max: None,
            statuses: Vec::new(),
        }
    }

    pub fn with_hp(mut self, hp: i64, hp_max: i64) -> Self {
        self.hp = Some(hp);
        self.hp_max = Some(hp_max);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.statuses.push(status.into());
        self
    }

    /// `"hp/max"`; `"hp/?"` when only current HP is known.
    pub fn hp_display(&self) -> Option<String> {
        match (self.hp, self.hp_max) {
            (Some(hp), Some(max)) => Some(format!("{hp}/{max}")),
            (Some(hp), None) => Some(format!("{hp}/?")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_display_formats() {
        assert_eq!(
            CharacterProfile::named("Brakka").with_hp(7, 22).hp_display(),
            Some("7/22".to_string())
        );
        assert_eq!(CharacterProfile::named("Ghost").hp_display(), None);
        let partial = CharacterProfile {
            hp: Some(3),
            ..CharacterProfile::named("Imp")
        };
        assert_eq!(partial.hp_display(), Some("3/?".to_string()));
    }
}
