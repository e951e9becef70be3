//! Read-only views of battle state handed to hosts.

use crate::battle::state::{BattleEvent, BattleSession, GamePhase, Side};
use crate::combatant::{Combatant, MoveInstance};
use crate::player::Inventory;
use crate::stats_store::BattleTally;
use schema::{Difficulty, ElementType, MoveCategory, StatusEffect};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MoveSnapshot {
    pub name: String,
    pub element: ElementType,
    pub category: MoveCategory,
    pub power: u16,
    pub accuracy: f64,
    pub pp: u8,
    pub pp_left: u8,
    pub effect: Option<StatusEffect>,
}

impl From<&MoveInstance> for MoveSnapshot {
    fn from(instance: &MoveInstance) -> Self {
        MoveSnapshot {
            name: instance.template.name.clone(),
            element: instance.template.element,
            category: instance.template.category,
            power: instance.template.damage,
            accuracy: instance.template.accuracy,
            pp: instance.max_pp(),
            pp_left: instance.pp_left(),
            effect: instance.template.effect,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CombatantSnapshot {
    pub species_id: u16,
    pub name: String,
    pub element: ElementType,
    pub sprite: String,
    pub hp: u16,
    pub max_hp: u16,
    pub status: Option<StatusEffect>,
    pub moves: Vec<MoveSnapshot>,
}

impl From<&Combatant> for CombatantSnapshot {
    fn from(combatant: &Combatant) -> Self {
        CombatantSnapshot {
            species_id: combatant.species_id,
            name: combatant.name.clone(),
            element: combatant.element,
            sprite: combatant.sprite.clone(),
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
            status: combatant.status,
            moves: combatant.moves.iter().map(MoveSnapshot::from).collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub turn_number: u32,
    pub player: CombatantSnapshot,
    pub opponent: CombatantSnapshot,
    pub log: Vec<String>,
    pub inventory: Inventory,
    pub tally: BattleTally,
}

impl SessionSnapshot {
    pub fn capture(
        session: &BattleSession,
        phase: GamePhase,
        inventory: &Inventory,
        tally: &BattleTally,
    ) -> Self {
        SessionSnapshot {
            phase,
            difficulty: session.difficulty,
            turn_number: session.turn_number,
            player: CombatantSnapshot::from(&session.player),
            opponent: CombatantSnapshot::from(&session.opponent),
            log: session.log.clone(),
            inventory: *inventory,
            tally: *tally,
        }
    }
}

/// Everything a host needs after one half-turn.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ActionResult {
    /// Narration produced by this action, in order.
    pub log_entries: Vec<String>,
    pub events: Vec<BattleEvent>,
    pub player: CombatantSnapshot,
    pub opponent: CombatantSnapshot,
    pub inventory: Inventory,
    pub phase: GamePhase,
    /// The action was rejected without changing any state.
    pub no_op: bool,
    /// The side whose combatant fainted, if any.
    pub fainted: Option<Side>,
    pub session_ended: bool,
    pub winner: Option<Side>,
    /// Set only on the action that ends the battle.
    pub final_tally: Option<BattleTally>,
}

impl ActionResult {
    pub fn message(&self) -> String {
        self.log_entries.join("\n")
    }
}
