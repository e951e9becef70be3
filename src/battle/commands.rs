use crate::battle::conditions::apply_status;
use crate::battle::state::{BattleEvent, BattleSession, EventBus, Side};
use crate::player::Inventory;
use schema::{ItemKind, StatusEffect};

/// Atomic commands representing final state changes.
///
/// Calculators decide *what* happens and return a batch of these; the batch
/// is then applied in order, so one half-turn is never interleaved with the
/// other side's.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    SpendPP { side: Side, move_index: usize },
    DealDamage { target: Side, amount: u16 },
    HealPokemon { target: Side, amount: u16 },
    SetStatus { target: Side, status: StatusEffect },
    ConsumeItem { item: ItemKind },
    /// Mark the session finished. Turn ownership no longer changes.
    EndBattle { winner: Side },
    /// Hand the next half-turn to the other side.
    PassTurn,
    EmitEvent(BattleEvent),
}

/// Error types for command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    InvalidMoveIndex { side: Side, move_index: usize },
    NoPPRemaining { side: Side, move_index: usize },
    ItemUnavailable(ItemKind),
    BattleAlreadyOver,
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionError::InvalidMoveIndex { side, move_index } => {
                write!(f, "{} has no move in slot {}", side, move_index)
            }
            ExecutionError::NoPPRemaining { side, move_index } => {
                write!(f, "{}'s move in slot {} has no PP left", side, move_index)
            }
            ExecutionError::ItemUnavailable(item) => write!(f, "no {} left to consume", item),
            ExecutionError::BattleAlreadyOver => write!(f, "the battle is already over"),
        }
    }
}

pub fn execute_command(
    command: BattleCommand,
    session: &mut BattleSession,
    inventory: &mut Inventory,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    match command {
        BattleCommand::SpendPP { side, move_index } => {
            let move_instance = session
                .combatant_mut(side)
                .moves
                .get_mut(move_index)
                .ok_or(ExecutionError::InvalidMoveIndex { side, move_index })?;
            if !move_instance.use_pp() {
                return Err(ExecutionError::NoPPRemaining { side, move_index });
            }
        }
        BattleCommand::DealDamage { target, amount } => {
            session.combatant_mut(target).take_damage(amount);
        }
        BattleCommand::HealPokemon { target, amount } => {
            session.combatant_mut(target).heal(amount);
        }
        BattleCommand::SetStatus { target, status } => {
            apply_status(session.combatant_mut(target), status);
        }
        BattleCommand::ConsumeItem { item } => {
            if !inventory.consume(item) {
                return Err(ExecutionError::ItemUnavailable(item));
            }
        }
        BattleCommand::EndBattle { winner } => {
            if session.winner.is_some() {
                return Err(ExecutionError::BattleAlreadyOver);
            }
            session.winner = Some(winner);
        }
        BattleCommand::PassTurn => {
            if session.winner.is_none() {
                if session.turn == Side::Opponent {
                    session.turn_number += 1;
                }
                session.turn = session.turn.opponent();
            }
        }
        BattleCommand::EmitEvent(event) => {
            session.log.push(event.format());
            bus.push(event);
        }
    }
    Ok(())
}

/// Apply a batch in order, stopping at the first failure.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    session: &mut BattleSession,
    inventory: &mut Inventory,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    for command in commands {
        execute_command(command, session, inventory, bus)?;
    }
    Ok(())
}
