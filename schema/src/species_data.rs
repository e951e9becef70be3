use crate::{ElementType, MoveCategory, StatusEffect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
}

/// Immutable definition of an attack or status action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTemplate {
    pub name: String,
    pub element: ElementType,
    pub category: MoveCategory,
    /// Base power. Zero for pure status moves.
    #[serde(default)]
    pub damage: u16,
    /// Hit probability in [0, 1].
    pub accuracy: f64,
    pub pp: u8,
    #[serde(default)]
    pub effect: Option<StatusEffect>,
}

impl MoveTemplate {
    pub fn is_damaging(&self) -> bool {
        self.damage > 0
    }
}

/// Immutable definition of a creature, supplied by the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub id: u16,
    pub name: String,
    pub element: ElementType,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub sprite: String,
    pub moves: Vec<MoveTemplate>,
}

/// One row of the type chart: what an attacking type is strong and weak against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMatchups {
    #[serde(default)]
    pub super_effective: Vec<ElementType>,
    #[serde(default)]
    pub weak: Vec<ElementType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_template_reads_from_ron() {
        let text = r#"(
            name: "Thunder Shock",
            element: Electric,
            category: Special,
            damage: 40,
            accuracy: 1.0,
            pp: 30,
            effect: Some(Paralyzed),
        )"#;
        let template: MoveTemplate = ron::from_str(text).unwrap();
        assert_eq!(template.element, ElementType::Electric);
        assert_eq!(template.effect, Some(StatusEffect::Paralyzed));
        assert!(template.is_damaging());
    }

    #[test]
    fn test_status_move_defaults() {
        let text = r#"(name: "Growl", element: Normal, category: Status, accuracy: 1.0, pp: 40)"#;
        let template: MoveTemplate = ron::from_str(text).unwrap();
        assert_eq!(template.damage, 0);
        assert_eq!(template.effect, None);
        assert!(!template.is_damaging());
    }
}
