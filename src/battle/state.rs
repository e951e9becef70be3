use crate::combatant::Combatant;
use schema::{Difficulty, ItemKind, StatusEffect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Where the engine is in its lifecycle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingDifficulty,
    Selecting,
    PlayerTurn,
    OpponentTurn,
    Ended { winner: Side },
}

impl GamePhase {
    pub fn in_battle(self) -> bool {
        matches!(self, GamePhase::PlayerTurn | GamePhase::OpponentTurn)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::AwaitingDifficulty => write!(f, "waiting for a difficulty"),
            GamePhase::Selecting => write!(f, "choosing a starter"),
            GamePhase::PlayerTurn => write!(f, "waiting for the player"),
            GamePhase::OpponentTurn => write!(f, "waiting for the opponent"),
            GamePhase::Ended { winner } => write!(f, "the battle is over ({} won)", winner),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        player: String,
        opponent: String,
    },
    MoveUsed {
        side: Side,
        attacker: String,
        move_name: String,
        /// 0 for pure status moves.
        damage: u16,
        critical: bool,
        effectiveness: f64,
        remaining_hp: u16,
    },
    MoveMissed {
        side: Side,
        attacker: String,
        move_name: String,
    },
    StatusApplied {
        side: Side,
        target: String,
        status: StatusEffect,
        replaced: Option<StatusEffect>,
    },
    ItemUsed {
        pokemon: String,
        item: ItemKind,
        restored: u16,
        new_hp: u16,
    },
    TurnForfeited {
        side: Side,
        pokemon: String,
    },
    ActionFailed {
        reason: ActionFailureReason,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },
    BattleEnded {
        winner: Side,
        winner_name: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ActionFailureReason {
    NoPPRemaining { move_name: String },
    ItemUnavailable { item: ItemKind },
    AlreadyFullHealth { pokemon: String },
}

impl BattleEvent {
    /// Narration line for the battle log.
    pub fn format(&self) -> String {
        match self {
            BattleEvent::BattleStarted { player, opponent } => {
                format!("You sent out {}! Opponent sent out {}!", player, opponent)
            }
            BattleEvent::MoveUsed {
                attacker,
                move_name,
                damage,
                critical,
                effectiveness,
                ..
            } => {
                let mut text = format!("{} used {} for {} damage!", attacker, move_name, damage);
                if *critical {
                    text.push_str(" Critical hit!");
                }
                if let Some(note) = Self::effectiveness_note(*effectiveness) {
                    text.push(' ');
                    text.push_str(note);
                }
                text
            }
            BattleEvent::MoveMissed {
                attacker,
                move_name,
                ..
            } => format!("{} tried to use {} but missed!", attacker, move_name),
            BattleEvent::StatusApplied { target, status, .. } => {
                format!("{} is now {}!", target, status)
            }
            BattleEvent::ItemUsed { pokemon, item, .. } => {
                format!("{} used a {}!", pokemon, item)
            }
            BattleEvent::TurnForfeited { pokemon, .. } => {
                format!("{} has no moves left!", pokemon)
            }
            BattleEvent::ActionFailed { reason } => Self::format_action_failure_reason(reason),
            BattleEvent::PokemonFainted { pokemon, .. } => format!("{} fainted!", pokemon),
            BattleEvent::BattleEnded { winner_name, .. } => format!("{} wins!", winner_name),
        }
    }

    fn effectiveness_note(multiplier: f64) -> Option<&'static str> {
        if multiplier > 1.0 {
            Some("Super effective!")
        } else if multiplier < 1.0 {
            Some("Not very effective...")
        } else {
            None
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> String {
        match reason {
            ActionFailureReason::NoPPRemaining { move_name } => {
                format!("No PP left for {}!", move_name)
            }
            ActionFailureReason::ItemUnavailable { item } => format!("No {}s available!", item),
            ActionFailureReason::AlreadyFullHealth { pokemon } => {
                format!("Your {} is already at full health!", pokemon)
            }
        }
    }
}

/// Event bus for collecting the events of one resolved action.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Narration for every event, in order.
    pub fn formatted(&self) -> Vec<String> {
        self.events.iter().map(BattleEvent::format).collect()
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {}", event.format())?;
        }
        Ok(())
    }
}

/// The live state of one battle. Owned by the engine; discarded on reset.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleSession {
    pub player: Combatant,
    pub opponent: Combatant,
    /// Whose half-turn is next.
    pub turn: Side,
    pub turn_number: u32,
    pub difficulty: Difficulty,
    pub log: Vec<String>,
    pub winner: Option<Side>,
}

impl BattleSession {
    pub fn new(player: Combatant, opponent: Combatant, difficulty: Difficulty) -> Self {
        Self {
            player,
            opponent,
            turn: Side::Player,
            turn_number: 1,
            difficulty,
            log: Vec::new(),
            winner: None,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
