use crate::battle::commands::BattleCommand;
use crate::battle::rng::RandomSource;
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleSession, Side};
use crate::battle::stats::{get_type_effectiveness, NEUTRAL};
use crate::combatant::Combatant;
use crate::config::ArenaConfig;
use crate::player::Inventory;
use crate::roster::TypeChart;
use schema::{ItemKind, MoveTemplate};

/// Numeric constants of the rule set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleRules {
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub variance_min: f64,
    pub variance_max: f64,
    pub heal_amount: u16,
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules::from(&ArenaConfig::default())
    }
}

impl From<&ArenaConfig> for BattleRules {
    fn from(config: &ArenaConfig) -> Self {
        BattleRules {
            critical_chance: config.critical_chance,
            critical_multiplier: config.critical_multiplier,
            variance_min: config.variance_min,
            variance_max: config.variance_max,
            heal_amount: config.heal_amount,
        }
    }
}

/// Damage for one hit with the variance roll already decided.
///
/// `base * offense / 100`, then `* 100 / (100 + defense)`, then type
/// effectiveness, the critical multiplier and finally `variance`. Rounded,
/// and never below 1 for a move with base power. Pure status moves deal 0.
pub fn damage_with_variance(
    attacker: &Combatant,
    move_template: &MoveTemplate,
    defender: &Combatant,
    is_critical: bool,
    chart: &TypeChart,
    critical_multiplier: f64,
    variance: f64,
) -> u16 {
    if !move_template.is_damaging() {
        return 0;
    }

    let mut damage = move_template.damage as f64;

    if let Some(offense) = attacker.offensive_stat(move_template.category) {
        damage = damage * offense as f64 / 100.0;
    }
    if let Some(defense) = defender.defensive_stat(move_template.category) {
        damage *= 100.0 / (100.0 + defense as f64);
    }

    damage *= get_type_effectiveness(chart, move_template.element, defender.element);

    if is_critical {
        damage *= critical_multiplier;
    }

    damage *= variance;

    (damage.round() as u16).max(1)
}

/// Damage for one hit, drawing the variance multiplier from `rng`.
pub fn calculate_damage(
    attacker: &Combatant,
    move_template: &MoveTemplate,
    defender: &Combatant,
    is_critical: bool,
    chart: &TypeChart,
    rules: &BattleRules,
    rng: &mut dyn RandomSource,
) -> u16 {
    if !move_template.is_damaging() {
        return 0;
    }
    let spread = rules.variance_max - rules.variance_min;
    let variance = rules.variance_min + rng.next_unit("damage variance") * spread;
    damage_with_variance(
        attacker,
        move_template,
        defender,
        is_critical,
        chart,
        rules.critical_multiplier,
        variance,
    )
}

/// Decide the outcome of `side` using its move in `move_index`.
///
/// PP is spent first, even on a miss. Every hit rolls accuracy then critical
/// hit; only moves with base power go on to roll damage variance, so a status
/// move lands for 0 damage.
pub fn calculate_attack_outcome(
    session: &BattleSession,
    side: Side,
    move_index: usize,
    chart: &TypeChart,
    rules: &BattleRules,
    rng: &mut dyn RandomSource,
) -> Result<Vec<BattleCommand>, ActionFailureReason> {
    let attacker = session.combatant(side);
    let defender = session.combatant(side.opponent());
    let move_instance = &attacker.moves[move_index];
    let move_template = &move_instance.template;

    if !move_instance.has_pp() {
        return Err(ActionFailureReason::NoPPRemaining {
            move_name: move_template.name.clone(),
        });
    }

    let mut commands = vec![BattleCommand::SpendPP { side, move_index }];

    let accuracy_roll = rng.next_unit("accuracy");
    if accuracy_roll > move_template.accuracy {
        tracing::debug!(
            attacker = %attacker.name,
            move_name = %move_template.name,
            accuracy_roll,
            "move missed"
        );
        commands.push(BattleCommand::EmitEvent(BattleEvent::MoveMissed {
            side,
            attacker: attacker.name.clone(),
            move_name: move_template.name.clone(),
        }));
        commands.push(BattleCommand::PassTurn);
        return Ok(commands);
    }

    let critical = rng.next_unit("critical hit") < rules.critical_chance;
    let damage = calculate_damage(attacker, move_template, defender, critical, chart, rules, rng);
    let effectiveness = get_type_effectiveness(chart, move_template.element, defender.element);

    let dealt = damage.min(defender.hp());
    let remaining_hp = defender.hp() - dealt;

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = %move_template.name,
        damage,
        critical,
        effectiveness,
        remaining_hp,
        "move hit"
    );

    if damage > 0 {
        commands.push(BattleCommand::DealDamage {
            target: side.opponent(),
            amount: damage,
        });
    }
    commands.push(BattleCommand::EmitEvent(BattleEvent::MoveUsed {
        side,
        attacker: attacker.name.clone(),
        move_name: move_template.name.clone(),
        damage,
        critical,
        effectiveness,
        remaining_hp,
    }));

    if let Some(status) = move_template.effect {
        commands.push(BattleCommand::SetStatus {
            target: side.opponent(),
            status,
        });
        commands.push(BattleCommand::EmitEvent(BattleEvent::StatusApplied {
            side: side.opponent(),
            target: defender.name.clone(),
            status,
            replaced: defender.status,
        }));
    }

    if remaining_hp == 0 {
        commands.push(BattleCommand::EmitEvent(BattleEvent::PokemonFainted {
            side: side.opponent(),
            pokemon: defender.name.clone(),
        }));
        commands.push(BattleCommand::EndBattle { winner: side });
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            winner: side,
            winner_name: attacker.name.clone(),
        }));
    } else {
        commands.push(BattleCommand::PassTurn);
    }

    Ok(commands)
}

/// Decide the outcome of the player using `item`. Item use always costs the turn.
pub fn calculate_item_outcome(
    session: &BattleSession,
    inventory: &Inventory,
    item: ItemKind,
    rules: &BattleRules,
) -> Result<Vec<BattleCommand>, ActionFailureReason> {
    let pokemon = &session.player;

    if pokemon.is_full_hp() {
        return Err(ActionFailureReason::AlreadyFullHealth {
            pokemon: pokemon.name.clone(),
        });
    }
    if !inventory.has(item) {
        return Err(ActionFailureReason::ItemUnavailable { item });
    }

    let missing = pokemon.max_hp() - pokemon.hp();
    let restored = match item {
        ItemKind::Heal => rules.heal_amount.min(missing),
        ItemKind::FullRestore => missing,
    };

    Ok(vec![
        BattleCommand::ConsumeItem { item },
        BattleCommand::HealPokemon {
            target: Side::Player,
            amount: restored,
        },
        BattleCommand::EmitEvent(BattleEvent::ItemUsed {
            pokemon: pokemon.name.clone(),
            item,
            restored,
            new_hp: pokemon.hp() + restored,
        }),
        BattleCommand::PassTurn,
    ])
}

/// `side` has nothing it can do; the turn goes back without an action.
pub fn calculate_forfeit_outcome(session: &BattleSession, side: Side) -> Vec<BattleCommand> {
    vec![
        BattleCommand::EmitEvent(BattleEvent::TurnForfeited {
            side,
            pokemon: session.combatant(side).name.clone(),
        }),
        BattleCommand::PassTurn,
    ]
}
