use crate::battle::ai::select_move;
use crate::battle::calculators::{
    calculate_attack_outcome, calculate_forfeit_outcome, calculate_item_outcome, BattleRules,
};
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::rng::{RandomSource, SeededRandom, SystemRandom};
use crate::battle::snapshot::{ActionResult, CombatantSnapshot, SessionSnapshot};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleSession, EventBus, GamePhase, Side,
};
use crate::combatant::Combatant;
use crate::config::ArenaConfig;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::player::Inventory;
use crate::roster::{Roster, TypeChart};
use crate::stats_store::BattleTally;
use schema::{Difficulty, ItemKind, SpeciesTemplate};

/// The battle state machine and the only entry point for mutating a battle.
///
/// `AwaitingDifficulty -> Selecting -> PlayerTurn <-> OpponentTurn -> Ended`,
/// with `reset` returning to `Selecting`. Every entry point resolves its
/// half-turn completely before returning, so the host decides any pacing
/// between the player's action and `get_opponent_action`.
pub struct BattleEngine {
    roster: Roster,
    chart: TypeChart,
    rules: BattleRules,
    phase: GamePhase,
    difficulty: Difficulty,
    session: Option<BattleSession>,
    inventory: Inventory,
    tally: BattleTally,
    rng: Box<dyn RandomSource + Send>,
}

impl BattleEngine {
    pub fn new(roster: Roster, chart: TypeChart) -> Self {
        Self {
            roster,
            chart,
            rules: BattleRules::default(),
            phase: GamePhase::AwaitingDifficulty,
            difficulty: Difficulty::default(),
            session: None,
            inventory: Inventory::default(),
            tally: BattleTally::default(),
            rng: Box::new(SystemRandom),
        }
    }

    /// Build an engine from configuration, continuing from `tally`.
    pub fn from_config(config: &ArenaConfig, tally: BattleTally) -> BattleResult<Self> {
        let roster = config.load_roster()?;
        let chart = config.load_type_chart()?;
        let rng: Box<dyn RandomSource + Send> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SystemRandom),
        };
        Ok(Self::new(roster, chart)
            .with_rules(BattleRules::from(config))
            .with_inventory(config.starting_inventory)
            .with_tally(tally)
            .with_rng(rng))
    }

    pub fn with_rules(mut self, rules: BattleRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_tally(mut self, tally: BattleTally) -> Self {
        self.tally = tally;
        self
    }

    pub fn with_rng(mut self, rng: Box<dyn RandomSource + Send>) -> Self {
        self.rng = rng;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn tally(&self) -> &BattleTally {
        &self.tally
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The species a player may pick from.
    pub fn starters(&self) -> &[SpeciesTemplate] {
        self.roster.species()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session
            .as_ref()
            .map(|s| SessionSnapshot::capture(s, self.phase, &self.inventory, &self.tally))
    }

    /// Fix the difficulty and move to starter selection.
    ///
    /// Not allowed mid-battle. From `Ended` it discards the finished session.
    pub fn start_selection(&mut self, difficulty: Difficulty) -> BattleResult<()> {
        if self.phase.in_battle() {
            return Err(BattleStateError::WrongPhase {
                operation: "change difficulty",
                phase: self.phase,
            }
            .into());
        }
        self.difficulty = difficulty;
        self.session = None;
        self.phase = GamePhase::Selecting;
        tracing::info!(%difficulty, "difficulty selected");
        Ok(())
    }

    /// Clone the chosen species for the player, draw a random opponent, and
    /// hand the first half-turn to the player.
    pub fn choose_starter(&mut self, species_id: u16) -> BattleResult<SessionSnapshot> {
        if self.phase != GamePhase::Selecting {
            return Err(BattleStateError::WrongPhase {
                operation: "choose a starter",
                phase: self.phase,
            }
            .into());
        }

        let player_species = self
            .roster
            .get(species_id)
            .ok_or(ActionError::UnknownSpecies(species_id))?;
        let opponent_index = self
            .rng
            .pick_index(self.roster.len(), "opponent species");
        let opponent_species = &self.roster.species()[opponent_index];

        let player = Combatant::from_species(player_species);
        let opponent = Combatant::from_species(opponent_species);

        let mut session = BattleSession::new(player, opponent, self.difficulty);
        let intro = BattleEvent::BattleStarted {
            player: session.player.name.clone(),
            opponent: session.opponent.name.clone(),
        };
        session.log.push(intro.format());

        tracing::info!(
            player = %session.player.name,
            opponent = %session.opponent.name,
            difficulty = %self.difficulty,
            "battle started"
        );

        self.phase = GamePhase::PlayerTurn;
        let snapshot = SessionSnapshot::capture(&session, self.phase, &self.inventory, &self.tally);
        self.session = Some(session);
        Ok(snapshot)
    }

    /// The player attacks with the named move.
    pub fn submit_player_move(&mut self, move_name: &str) -> BattleResult<ActionResult> {
        self.require_turn(Side::Player, "use a move")?;
        let session = self.session.as_ref().ok_or(BattleStateError::NoActiveSession)?;

        let move_index =
            session
                .player
                .find_move(move_name)
                .ok_or_else(|| ActionError::UnknownMove {
                    pokemon: session.player.name.clone(),
                    move_name: move_name.to_string(),
                })?;

        let outcome = calculate_attack_outcome(
            session,
            Side::Player,
            move_index,
            &self.chart,
            &self.rules,
            self.rng.as_mut(),
        );
        self.apply_outcome(outcome)
    }

    /// The player uses an item from the inventory.
    pub fn submit_item_use(&mut self, item: ItemKind) -> BattleResult<ActionResult> {
        self.require_turn(Side::Player, "use an item")?;
        let session = self.session.as_ref().ok_or(BattleStateError::NoActiveSession)?;

        let outcome = calculate_item_outcome(session, &self.inventory, item, &self.rules);
        self.apply_outcome(outcome)
    }

    /// Resolve the opponent's half-turn. Hosts call this after the player's
    /// half-turn has been shown.
    pub fn get_opponent_action(&mut self) -> BattleResult<ActionResult> {
        self.require_turn(Side::Opponent, "run the opponent's turn")?;
        let session = self.session.as_ref().ok_or(BattleStateError::NoActiveSession)?;

        let outcome = match select_move(&session.opponent, self.difficulty, self.rng.as_mut()) {
            Some(move_index) => calculate_attack_outcome(
                session,
                Side::Opponent,
                move_index,
                &self.chart,
                &self.rules,
                self.rng.as_mut(),
            ),
            None => {
                tracing::debug!(pokemon = %session.opponent.name, "opponent has no PP left");
                Ok(calculate_forfeit_outcome(session, Side::Opponent))
            }
        };
        self.apply_outcome(outcome)
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> Option<&mut BattleSession> {
        self.session.as_mut()
    }

    /// Discard the current session and go back to starter selection.
    ///
    /// Refused before a difficulty has been picked.
    pub fn reset(&mut self) -> BattleResult<()> {
        if self.phase == GamePhase::AwaitingDifficulty {
            return Err(BattleStateError::WrongPhase {
                operation: "reset",
                phase: self.phase,
            }
            .into());
        }
        if self.session.take().is_some() {
            tracing::info!("battle session discarded");
        }
        self.phase = GamePhase::Selecting;
        Ok(())
    }

    fn require_turn(&self, side: Side, operation: &'static str) -> BattleResult<()> {
        match (self.phase, side) {
            (GamePhase::PlayerTurn, Side::Player) | (GamePhase::OpponentTurn, Side::Opponent) => {
                Ok(())
            }
            (GamePhase::PlayerTurn, _) | (GamePhase::OpponentTurn, _) => {
                Err(BattleStateError::NotYourTurn(side).into())
            }
            (phase, _) => Err(BattleStateError::WrongPhase { operation, phase }.into()),
        }
    }

    /// Run a calculated batch, or report the rejection without touching state.
    fn apply_outcome(
        &mut self,
        outcome: Result<Vec<BattleCommand>, ActionFailureReason>,
    ) -> BattleResult<ActionResult> {
        let commands = match outcome {
            Ok(commands) => commands,
            Err(reason) => return self.no_op_result(reason),
        };

        let session = self.session.as_mut().ok_or(BattleStateError::NoActiveSession)?;
        let mut bus = EventBus::new();
        execute_command_batch(commands, session, &mut self.inventory, &mut bus)
            .map_err(|e| BattleStateError::InconsistentState(e.to_string()))?;
        tracing::debug!("resolved action:\n{}", bus);

        let mut final_tally = None;
        if let Some(winner) = session.winner {
            match winner {
                Side::Player => self.tally.record_win(),
                Side::Opponent => self.tally.record_loss(),
            }
            final_tally = Some(self.tally);
            self.phase = GamePhase::Ended { winner };
            tracing::info!(%winner, tally = ?self.tally, "battle ended");
        } else {
            self.phase = match session.turn {
                Side::Player => GamePhase::PlayerTurn,
                Side::Opponent => GamePhase::OpponentTurn,
            };
        }

        let fainted = session.winner.map(Side::opponent);
        let log_entries = bus.formatted();
        Ok(ActionResult {
            log_entries,
            events: bus.into_events(),
            player: CombatantSnapshot::from(&session.player),
            opponent: CombatantSnapshot::from(&session.opponent),
            inventory: self.inventory,
            phase: self.phase,
            no_op: false,
            fainted,
            session_ended: session.is_over(),
            winner: session.winner,
            final_tally,
        })
    }

    fn no_op_result(&self, reason: ActionFailureReason) -> BattleResult<ActionResult> {
        let session = self.session.as_ref().ok_or(BattleStateError::NoActiveSession)?;
        let event = BattleEvent::ActionFailed { reason };
        tracing::debug!(?event, "action rejected");
        Ok(ActionResult {
            log_entries: vec![event.format()],
            events: vec![event],
            player: CombatantSnapshot::from(&session.player),
            opponent: CombatantSnapshot::from(&session.opponent),
            inventory: self.inventory,
            phase: self.phase,
            no_op: true,
            fainted: None,
            session_ended: false,
            winner: None,
            final_tally: None,
        })
    }
}
