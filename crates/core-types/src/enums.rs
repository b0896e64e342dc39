use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The entities persisted by crema. Used as a tag when translating store
/// errors so the resulting error names the right thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Sheet,
    Roaster,
    Beans,
    Shot,
}

impl Entity {
    pub const ALL: [Entity; 4] = [Entity::Sheet, Entity::Roaster, Entity::Beans, Entity::Shot];

    /// The table backing this entity.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Sheet => "sheets",
            Entity::Roaster => "roasters",
            Entity::Beans => "beans",
            Entity::Shot => "shots",
        }
    }

    /// Resolves a table name back to its entity.
    pub fn from_table(table: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entity| entity.table() == table)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Sheet => write!(f, "sheet"),
            Entity::Roaster => write!(f, "roaster"),
            Entity::Beans => write!(f, "beans"),
            Entity::Shot => write!(f, "shot"),
        }
    }
}

/// How far a batch of beans was roasted. Stored as a TINYINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[repr(i8)]
pub enum RoastLevel {
    Light = 0,
    LightToMedium = 1,
    Medium = 2,
    MediumToDark = 3,
    Dark = 4,
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoastLevel::Light => write!(f, "light"),
            RoastLevel::LightToMedium => write!(f, "light-to-medium"),
            RoastLevel::Medium => write!(f, "medium"),
            RoastLevel::MediumToDark => write!(f, "medium-to-dark"),
            RoastLevel::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for RoastLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(RoastLevel::Light),
            "light-to-medium" => Ok(RoastLevel::LightToMedium),
            "medium" => Ok(RoastLevel::Medium),
            "medium-to-dark" => Ok(RoastLevel::MediumToDark),
            "dark" => Ok(RoastLevel::Dark),
            other => Err(CoreError::InvalidInput("roast_level".to_string(), other.to_string())),
        }
    }
}

/// How a shot compared with the one pulled before it. Stored as a TINYINT.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[repr(i8)]
pub enum Comparison {
    #[default]
    Unknown = 0,
    Worst = 1,
    Same = 2,
    Better = 3,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Unknown => write!(f, "unknown"),
            Comparison::Worst => write!(f, "worst"),
            Comparison::Same => write!(f, "same"),
            Comparison::Better => write!(f, "better"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Entity::Sheet)]
    #[case(Entity::Roaster)]
    #[case(Entity::Beans)]
    #[case(Entity::Shot)]
    fn table_names_resolve_back_to_entity(#[case] entity: Entity) {
        assert_eq!(Entity::from_table(entity.table()), Some(entity));
    }

    #[test]
    fn unknown_table_has_no_entity() {
        assert_eq!(Entity::from_table("grinders"), None);
    }

    #[rstest]
    #[case("light", RoastLevel::Light)]
    #[case("light-to-medium", RoastLevel::LightToMedium)]
    #[case("medium", RoastLevel::Medium)]
    #[case("medium-to-dark", RoastLevel::MediumToDark)]
    #[case("dark", RoastLevel::Dark)]
    fn roast_level_parses_and_displays(#[case] text: &str, #[case] level: RoastLevel) {
        assert_eq!(text.parse::<RoastLevel>().unwrap(), level);
        assert_eq!(level.to_string(), text);
    }

    #[test]
    fn roast_level_serializes_as_kebab_case() {
        let json = serde_json::to_string(&RoastLevel::MediumToDark).unwrap();
        assert_eq!(json, "\"medium-to-dark\"");
    }

    #[test]
    fn rejects_unknown_roast_level() {
        let err = "charcoal".parse::<RoastLevel>().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("roast_level".to_string(), "charcoal".to_string())
        );
    }

    #[test]
    fn comparison_displays_in_snake_case() {
        assert_eq!(Comparison::Better.to_string(), "better");
        assert_eq!(Comparison::Unknown.to_string(), "unknown");
    }

    #[test]
    fn comparison_defaults_to_unknown() {
        assert_eq!(Comparison::default(), Comparison::Unknown);
        let parsed: Comparison = serde_json::from_str("\"better\"").unwrap();
        assert_eq!(parsed, Comparison::Better);
    }
}
