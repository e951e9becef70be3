//! Text presentation shared by the terminal host and the MCP server.
//!
//! The engine returns structured snapshots; everything here turns them into
//! the lines a person reads, and parses what a person types.

use crate::battle::engine::BattleEngine;
use crate::battle::snapshot::{ActionResult, CombatantSnapshot, SessionSnapshot};
use crate::battle::state::{GamePhase, Side};
use crate::errors::{ActionError, BattleResult};
use crate::player::PlayerAction;
use crate::stats_store::BattleTally;
use schema::{Difficulty, ItemKind};

/// Both halves of one turn as seen by the player.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub player: ActionResult,
    /// `None` when the player's action was rejected or ended the battle.
    pub opponent: Option<ActionResult>,
}

impl TurnReport {
    /// The result that decides the battle, if either half did.
    pub fn final_tally(&self) -> Option<BattleTally> {
        self.opponent
            .as_ref()
            .and_then(|r| r.final_tally)
            .or(self.player.final_tally)
    }

    pub fn text(&self) -> String {
        let mut output = format_action_result(&self.player);
        if let Some(opponent) = &self.opponent {
            output.push('\n');
            output.push_str(&format_action_result(opponent));
        }
        output
    }
}

/// Returns formatted text listing the species the player may start with
pub fn get_available_starters_display(engine: &BattleEngine) -> String {
    let mut output = String::from("Available Starters:\n");
    for species in engine.starters() {
        output.push_str(&format!(
            "  #{:<4} {} ({}) - HP {}\n",
            species.id, species.name, species.element, species.base_stats.hp
        ));
        let moves: Vec<&str> = species.moves.iter().map(|m| m.name.as_str()).collect();
        output.push_str(&format!("        Moves: {}\n", moves.join(", ")));
    }
    output
}

/// Accepts a species id or a species name.
pub fn resolve_starter(engine: &BattleEngine, input: &str) -> Result<u16, ActionError> {
    let input = input.trim();
    if let Ok(id) = input.trim_start_matches('#').parse::<u16>() {
        return Ok(id);
    }
    engine
        .roster()
        .find_by_name(input)
        .map(|species| species.id)
        .ok_or_else(|| ActionError::InvalidAction(format!("no starter called '{}'", input)))
}

pub fn parse_difficulty(input: &str) -> Result<Difficulty, ActionError> {
    input
        .trim()
        .parse::<Difficulty>()
        .map_err(|_| ActionError::InvalidAction(format!("unknown difficulty '{}'", input.trim())))
}

pub fn parse_item(input: &str) -> Result<ItemKind, ActionError> {
    input
        .trim()
        .parse::<ItemKind>()
        .map_err(|_| ActionError::InvalidAction(format!("unknown item '{}'", input.trim())))
}

/// Displays one combatant with its HP, status and move list
pub fn display_combatant(label: &str, combatant: &CombatantSnapshot) -> String {
    let status = combatant
        .status
        .map(|s| format!(" [{}]", s))
        .unwrap_or_default();
    let mut output = format!(
        "{}: {} ({}) HP {}/{}{}\n",
        label, combatant.name, combatant.element, combatant.hp, combatant.max_hp, status
    );
    for m in &combatant.moves {
        output.push_str(&format!(
            "    {:<14} {:<8} {:<8} power {:>3}  acc {:>3}%  PP {}/{}\n",
            m.name,
            m.element,
            m.category,
            m.power,
            (m.accuracy * 100.0).round() as u32,
            m.pp_left,
            m.pp
        ));
    }
    output
}

/// Displays the current battle state from the player's point of view
pub fn display_battle_status(snapshot: &SessionSnapshot) -> String {
    let mut output = format!(
        "Turn {} ({} difficulty) - {}\n",
        snapshot.turn_number, snapshot.difficulty, snapshot.phase
    );
    output.push_str(&display_combatant("You", &snapshot.player));
    output.push_str(&display_combatant("Opponent", &snapshot.opponent));
    output.push_str(&format!("Items: {}\n", snapshot.inventory));
    output.push_str(&display_tally(&snapshot.tally));
    output
}

pub fn display_tally(tally: &BattleTally) -> String {
    format!(
        "Record: {} wins, {} losses (streak {})\n",
        tally.wins, tally.losses, tally.streak
    )
}

/// The whole battle log, one numbered line per entry
pub fn display_log(snapshot: &SessionSnapshot) -> String {
    snapshot
        .log
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>3}. {}\n", i + 1, line))
        .collect()
}

/// Narration of one half-turn plus a closing banner when it ended the battle
pub fn format_action_result(result: &ActionResult) -> String {
    let mut output = result.message();
    if let GamePhase::Ended { winner } = result.phase {
        if result.session_ended {
            output.push_str(match winner {
                Side::Player => "\n\nYou won the battle!",
                Side::Opponent => "\n\nYou lost the battle!",
            });
        }
    }
    output
}

/// Submit the player's half-turn and, if the battle goes on, the opponent's.
pub fn execute_player_action(
    engine: &mut BattleEngine,
    action: PlayerAction,
) -> BattleResult<TurnReport> {
    let player = match &action {
        PlayerAction::UseMove { move_name } => engine.submit_player_move(move_name)?,
        PlayerAction::UseItem { item } => engine.submit_item_use(*item)?,
    };

    let opponent = if player.phase == GamePhase::OpponentTurn {
        Some(engine.get_opponent_action()?)
    } else {
        None
    };

    Ok(TurnReport { player, opponent })
}

/// Gets the current battle status as a formatted string
pub fn get_battle_status_summary(engine: &BattleEngine) -> String {
    match engine.snapshot() {
        Some(snapshot) => {
            let headline = match snapshot.phase {
                GamePhase::Ended {
                    winner: Side::Player,
                } => "Battle Over - You Won!",
                GamePhase::Ended {
                    winner: Side::Opponent,
                } => "Battle Over - You Lost!",
                _ => "Battle in Progress",
            };
            format!("{}\n{}", headline, display_battle_status(&snapshot))
        }
        None => format!(
            "No battle in progress ({}).\n{}",
            engine.phase(),
            display_tally(engine.tally())
        ),
    }
}
