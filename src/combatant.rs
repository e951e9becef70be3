use schema::{BaseStats, ElementType, MoveCategory, MoveTemplate, SpeciesTemplate, StatusEffect};
use serde::{Deserialize, Serialize};

/// A move owned by one combatant, with its own PP counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub template: MoveTemplate,
    pub pp_used: u8,
}

impl MoveInstance {
    pub fn new(template: MoveTemplate) -> Self {
        MoveInstance {
            template,
            pp_used: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn max_pp(&self) -> u8 {
        self.template.pp
    }

    pub fn pp_left(&self) -> u8 {
        self.template.pp.saturating_sub(self.pp_used)
    }

    pub fn has_pp(&self) -> bool {
        self.pp_used < self.template.pp
    }

    /// Spend one PP. Returns false, leaving the counter alone, when none is left.
    pub fn use_pp(&mut self) -> bool {
        if self.has_pp() {
            self.pp_used += 1;
            true
        } else {
            false
        }
    }
}

/// One creature's live state for the duration of a single battle.
///
/// Built from a deep copy of a [`SpeciesTemplate`]; nothing here is shared
/// with the roster or with the other combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub species_id: u16,
    pub name: String,
    pub element: ElementType,
    pub stats: BaseStats,
    pub sprite: String,
    hp: u16,
    max_hp: u16,
    pub status: Option<StatusEffect>,
    pub moves: Vec<MoveInstance>,
}

impl Combatant {
    /// Fresh PP, no status, full HP.
    pub fn from_species(species: &SpeciesTemplate) -> Self {
        let max_hp = species.base_stats.hp;
        Combatant {
            species_id: species.id,
            name: species.name.clone(),
            element: species.element,
            stats: species.base_stats.clone(),
            sprite: species.sprite.clone(),
            hp: max_hp,
            max_hp,
            status: None,
            moves: species.moves.iter().cloned().map(MoveInstance::new).collect(),
        }
    }

    pub fn hp(&self) -> u16 {
        self.hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp == self.max_hp
    }

    /// Clamped to `0..=max_hp`.
    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp);
    }

    /// Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    pub fn find_move(&self, move_name: &str) -> Option<usize> {
        let wanted = move_name.trim();
        self.moves
            .iter()
            .position(|m| m.name().eq_ignore_ascii_case(wanted))
    }

    /// Indices of moves that still have PP, in listed order.
    pub fn usable_move_indices(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_pp())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn offensive_stat(&self, category: MoveCategory) -> Option<u16> {
        match category {
            MoveCategory::Physical => Some(self.stats.attack),
            MoveCategory::Special => Some(self.stats.sp_attack),
            MoveCategory::Status => None,
        }
    }

    pub fn defensive_stat(&self, category: MoveCategory) -> Option<u16> {
        match category {
            MoveCategory::Physical => Some(self.stats.defense),
            MoveCategory::Special => Some(self.stats.sp_defense),
            MoveCategory::Status => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template() -> SpeciesTemplate {
        SpeciesTemplate {
            id: 25,
            name: "Pikachu".to_string(),
            element: ElementType::Electric,
            base_stats: BaseStats {
                hp: 100,
                attack: 55,
                defense: 40,
                sp_attack: 50,
                sp_defense: 50,
            },
            sprite: String::new(),
            moves: vec![MoveTemplate {
                name: "Thunder Shock".to_string(),
                element: ElementType::Electric,
                category: MoveCategory::Special,
                damage: 40,
                accuracy: 1.0,
                pp: 2,
                effect: Some(StatusEffect::Paralyzed),
            }],
        }
    }

    #[test]
    fn test_fresh_combatant_state() {
        let combatant = Combatant::from_species(&template());
        assert_eq!(combatant.hp(), 100);
        assert_eq!(combatant.max_hp(), 100);
        assert_eq!(combatant.status, None);
        assert_eq!(combatant.moves[0].pp_used, 0);
        assert!(combatant.is_full_hp());
    }

    #[test]
    fn test_copies_are_independent() {
        let species = template();
        let mut first = Combatant::from_species(&species);
        let second = Combatant::from_species(&species);

        first.moves[0].use_pp();
        assert_eq!(first.moves[0].pp_used, 1);
        assert_eq!(second.moves[0].pp_used, 0);
        assert_eq!(species.moves[0].pp, 2);
    }

    #[test]
    fn test_pp_never_exceeds_budget() {
        let mut combatant = Combatant::from_species(&template());
        assert!(combatant.moves[0].use_pp());
        assert!(combatant.moves[0].use_pp());
        assert!(!combatant.moves[0].use_pp());
        assert_eq!(combatant.moves[0].pp_used, 2);
        assert_eq!(combatant.moves[0].pp_left(), 0);
        assert!(combatant.usable_move_indices().is_empty());
    }

    #[test]
    fn test_damage_and_heal_are_clamped() {
        let mut combatant = Combatant::from_species(&template());
        assert_eq!(combatant.take_damage(30), 30);
        assert_eq!(combatant.heal(50), 30);
        assert_eq!(combatant.hp(), 100);
        assert_eq!(combatant.take_damage(500), 100);
        assert_eq!(combatant.hp(), 0);
        assert!(combatant.is_fainted());
    }

    #[test]
    fn test_find_move_ignores_case() {
        let combatant = Combatant::from_species(&template());
        assert_eq!(combatant.find_move("thunder shock"), Some(0));
        assert_eq!(combatant.find_move("Surf"), None);
    }
}
