//! Move selection for the computer-controlled opponent.

use crate::battle::rng::RandomSource;
use crate::combatant::Combatant;
use schema::{Difficulty, MoveTemplate};

/// A strategy for picking a move out of those that still have PP.
pub trait Behavior {
    /// Returns a position in `available`, which is never empty.
    fn choose(&self, available: &[&MoveTemplate], rng: &mut dyn RandomSource) -> usize;
}

/// Picks at random among the first two listed moves.
pub struct EasyAI;

/// Picks uniformly at random among every available move.
pub struct NormalAI;

/// Always picks the highest base power, earliest listed on ties.
pub struct HardAI;

impl Behavior for EasyAI {
    fn choose(&self, available: &[&MoveTemplate], rng: &mut dyn RandomSource) -> usize {
        rng.pick_index(available.len().min(2), "easy move choice")
    }
}

impl Behavior for NormalAI {
    fn choose(&self, available: &[&MoveTemplate], rng: &mut dyn RandomSource) -> usize {
        rng.pick_index(available.len(), "normal move choice")
    }
}

impl Behavior for HardAI {
    fn choose(&self, available: &[&MoveTemplate], _rng: &mut dyn RandomSource) -> usize {
        available
            .iter()
            .enumerate()
            .fold((0, 0u16), |(best, best_damage), (i, m)| {
                if i == 0 || m.damage > best_damage {
                    (i, m.damage)
                } else {
                    (best, best_damage)
                }
            })
            .0
    }
}

pub fn behavior_for(difficulty: Difficulty) -> &'static dyn Behavior {
    match difficulty {
        Difficulty::Easy => &EasyAI,
        Difficulty::Normal => &NormalAI,
        Difficulty::Hard => &HardAI,
    }
}

/// Index into `combatant.moves` of the chosen move, or `None` when every
/// move is out of PP and the turn must be forfeited.
pub fn select_move(
    combatant: &Combatant,
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) -> Option<usize> {
    let usable = combatant.usable_move_indices();
    if usable.is_empty() {
        return None;
    }

    let available: Vec<&MoveTemplate> = usable
        .iter()
        .map(|&i| &combatant.moves[i].template)
        .collect();
    let choice = behavior_for(difficulty).choose(&available, rng);
    let move_index = usable[choice];

    tracing::debug!(
        pokemon = %combatant.name,
        %difficulty,
        move_name = %combatant.moves[move_index].name(),
        "opponent chose a move"
    );
    Some(move_index)
}
