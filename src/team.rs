use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GameError, Result};

/// One side of a game. Compared by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    name: String,
}

impl Team {
    /// Build a team from a display name; surrounding whitespace is dropped.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(GameError::invalid("team name must not be blank"));
        }
        Ok(Team {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Which side of a game a score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => f.write_str("home"),
            Side::Away => f.write_str("away"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_name_is_trimmed() {
        let team = Team::new("  Mexico ").unwrap();
        assert_eq!(team.name(), "Mexico");
        assert_eq!(team, Team::new("Mexico").unwrap());
    }

    #[test]
    fn test_blank_team_rejected() {
        assert!(matches!(
            Team::new("   "),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_team_serializes_as_plain_string() {
        let json = serde_json::to_string(&Team::new("Spain").unwrap()).unwrap();
        assert_eq!(json, "\"Spain\"");
        assert_eq!(serde_json::to_string(&Side::Away).unwrap(), "\"away\"");
    }
}
