use crate::battle::engine::BattleEngine;
use crate::battle::rng::TurnRng;
use crate::battle::state::BattleSession;
use crate::combatant::Combatant;
use crate::errors::BattleResult;
use crate::roster::{Roster, TypeChart};
use schema::{
    BaseStats, Difficulty, ElementType, MoveCategory, MoveTemplate, SpeciesTemplate, StatusEffect,
};

/// Builds a standalone move template.
pub fn test_move(
    name: &str,
    element: ElementType,
    category: MoveCategory,
    damage: u16,
    accuracy: f64,
    pp: u8,
) -> MoveTemplate {
    MoveTemplate {
        name: name.to_string(),
        element,
        category,
        damage,
        accuracy,
        pp,
        effect: None,
    }
}

/// A status-only move that always lands.
pub fn status_move(name: &str, effect: StatusEffect) -> MoveTemplate {
    MoveTemplate {
        effect: Some(effect),
        ..test_move(name, ElementType::Normal, MoveCategory::Status, 0, 1.0, 10)
    }
}

/// A builder for creating test combatants with common defaults.
///
/// Defaults: Normal element, 100 HP, 100 attack and special attack, 0 defense
/// and special defense, and a single 40-power physical "Tackle" with 35 PP.
///
/// # Example
/// ```
/// let pikachu = TestCombatantBuilder::new("Pikachu")
///     .with_element(ElementType::Electric)
///     .with_hp(30)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    species_id: u16,
    element: ElementType,
    stats: BaseStats,
    moves: Option<Vec<MoveTemplate>>,
    status: Option<StatusEffect>,
    current_hp: Option<u16>,
    pp_used: Vec<(usize, u8)>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            species_id: 0,
            element: ElementType::Normal,
            stats: BaseStats {
                hp: 100,
                attack: 100,
                defense: 0,
                sp_attack: 100,
                sp_defense: 0,
            },
            moves: None,
            status: None,
            current_hp: None,
            pp_used: Vec::new(),
        }
    }

    pub fn with_species_id(mut self, species_id: u16) -> Self {
        self.species_id = species_id;
        self
    }

    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }

    /// Replaces every stat, including max HP.
    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.stats.hp = max_hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveTemplate>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_status(mut self, status: StatusEffect) -> Self {
        self.status = Some(status);
        self
    }

    /// Marks `count` PP of the move in `index` as already spent.
    pub fn with_pp_used(mut self, index: usize, count: u8) -> Self {
        self.pp_used.push((index, count));
        self
    }

    pub fn species(&self) -> SpeciesTemplate {
        SpeciesTemplate {
            id: self.species_id,
            name: self.name.clone(),
            element: self.element,
            base_stats: self.stats.clone(),
            sprite: String::new(),
            moves: self.moves.clone().unwrap_or_else(|| {
                vec![test_move(
                    "Tackle",
                    ElementType::Normal,
                    MoveCategory::Physical,
                    40,
                    1.0,
                    35,
                )]
            }),
        }
    }

    pub fn build(self) -> Combatant {
        let mut combatant = Combatant::from_species(&self.species());
        combatant.status = self.status;
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        for (index, count) in self.pp_used {
            combatant.moves[index].pp_used = count;
        }
        combatant
    }
}

/// Creates a fresh session with the player to move first.
pub fn create_test_session(player: Combatant, opponent: Combatant) -> BattleSession {
    BattleSession::new(player, opponent, Difficulty::Normal)
}

/// A roster built from the given test species.
pub fn create_test_roster(species: Vec<SpeciesTemplate>) -> Roster {
    match Roster::new(species) {
        Ok(roster) => roster,
        Err(err) => panic!("Failed to build test roster: {}", err),
    }
}

/// An engine over `roster`, already past difficulty selection, drawing from
/// the scripted `rolls`.
pub fn create_test_engine(roster: Roster, difficulty: Difficulty, rolls: Vec<f64>) -> BattleEngine {
    let chart = assert_ok(TypeChart::builtin().map_err(Into::into));
    let mut engine =
        BattleEngine::new(roster, chart).with_rng(Box::new(TurnRng::new_for_test(rolls)));
    assert_ok(engine.start_selection(difficulty));
    engine
}

/// Starts a battle between `player` (species 1) and `opponent` (species 2).
///
/// The first roll is spent drawing the opponent; `rolls` follow it.
pub fn start_test_battle(
    player: TestCombatantBuilder,
    opponent: TestCombatantBuilder,
    difficulty: Difficulty,
    rolls: Vec<f64>,
) -> BattleEngine {
    let roster = create_test_roster(vec![
        player.with_species_id(1).species(),
        opponent.with_species_id(2).species(),
    ]);
    let mut script = vec![0.75];
    script.extend(rolls);
    let mut engine = create_test_engine(roster, difficulty, script);
    assert_ok(engine.choose_starter(1));
    engine
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
