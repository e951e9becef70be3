#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, GamePhase, Side};
    use crate::battle::tests::common::{
        assert_ok, start_test_battle, test_move, TestCombatantBuilder,
    };
    use crate::combatant::Combatant;
    use crate::errors::{BattleEngineError, BattleStateError};
    use crate::stats_store::BattleTally;
    use pretty_assertions::assert_eq;
    use schema::{Difficulty, ElementType, MoveCategory, MoveTemplate, StatusEffect};

    // --- Unit Tests for Combatant HP Logic ---

    #[test]
    fn test_hp_floors_at_zero() {
        let mut pokemon: Combatant = TestCombatantBuilder::new("Pikachu").with_hp(20).build();

        let dealt = pokemon.take_damage(10);
        assert_eq!(dealt, 10);
        assert_eq!(pokemon.hp(), 10);
        assert!(!pokemon.is_fainted());

        let dealt = pokemon.take_damage(15);
        assert_eq!(dealt, 10, "only the remaining HP can be lost");
        assert_eq!(pokemon.hp(), 0);
        assert!(pokemon.is_fainted());
    }

    // --- Battle-level fainting ---

    #[test]
    fn test_player_knockout_ends_the_battle() {
        // Arrange
        let mut engine = start_test_battle(
            TestCombatantBuilder::new("Pikachu"),
            TestCombatantBuilder::new("Eevee"),
            Difficulty::Normal,
            vec![0.5, 0.5, 0.5],
        );
        engine.session_mut().expect("battle in progress").opponent.set_hp(10);

        // Act
        let result = assert_ok(engine.submit_player_move("Tackle"));

        // Assert
        assert_eq!(
            result.log_entries,
            vec![
                "Pikachu used Tackle for 37 damage!",
                "Eevee fainted!",
                "Pikachu wins!",
            ]
        );
        assert_eq!(result.opponent.hp, 0);
        assert_eq!(result.fainted, Some(Side::Opponent));
        assert!(result.session_ended);
        assert_eq!(result.winner, Some(Side::Player));
        assert_eq!(result.phase, GamePhase::Ended { winner: Side::Player });
        assert_eq!(
            result.final_tally,
            Some(BattleTally {
                wins: 1,
                losses: 0,
                streak: 1
            })
        );
        assert_eq!(engine.tally(), &result.final_tally.expect("tally on last action"));
    }

    #[test]
    fn test_no_actions_after_the_battle_ends() {
        let mut engine = start_test_battle(
            TestCombatantBuilder::new("Pikachu"),
            TestCombatantBuilder::new("Eevee"),
            Difficulty::Normal,
            vec![0.5, 0.5, 0.5],
        );
        engine.session_mut().expect("battle in progress").opponent.set_hp(1);
        assert_ok(engine.submit_player_move("Tackle"));

        let err = engine.submit_player_move("Tackle").unwrap_err();
        assert!(matches!(
            err,
            BattleEngineError::BattleState(BattleStateError::WrongPhase { .. })
        ));
        assert!(engine.get_opponent_action().is_err());

        let snapshot = engine.snapshot().expect("finished session is kept until reset");
        assert_eq!(snapshot.phase, GamePhase::Ended { winner: Side::Player });
        assert_eq!(snapshot.log.last().map(String::as_str), Some("Pikachu wins!"));
    }

    #[test]
    fn test_opponent_knockout_records_a_loss() {
        let mut engine = start_test_battle(
            TestCombatantBuilder::new("Pikachu"),
            TestCombatantBuilder::new("Eevee"),
            Difficulty::Normal,
            vec![0.5, 0.5, 0.5, 0.0, 0.5, 0.5, 0.5],
        )
        .with_tally(BattleTally {
            wins: 4,
            losses: 1,
            streak: 3,
        });
        engine.session_mut().expect("battle in progress").player.set_hp(5);

        assert_ok(engine.submit_player_move("Tackle"));
        let result = assert_ok(engine.get_opponent_action());

        assert_eq!(result.player.hp, 0);
        assert_eq!(result.fainted, Some(Side::Player));
        assert_eq!(result.winner, Some(Side::Opponent));
        assert_eq!(
            result.final_tally,
            Some(BattleTally {
                wins: 4,
                losses: 2,
                streak: 0
            })
        );
        assert_eq!(result.message(), "Eevee used Tackle for 37 damage!\nPikachu fainted!\nEevee wins!");
    }

    #[test]
    fn test_status_is_applied_before_the_faint() {
        let venom = MoveTemplate {
            effect: Some(StatusEffect::Poisoned),
            ..test_move("Venom Fang", ElementType::Poison, MoveCategory::Physical, 40, 1.0, 10)
        };
        let mut engine = start_test_battle(
            TestCombatantBuilder::new("Arbok").with_moves(vec![venom]),
            TestCombatantBuilder::new("Eevee"),
            Difficulty::Normal,
            vec![0.5, 0.5, 0.5],
        );
        engine.session_mut().expect("battle in progress").opponent.set_hp(2);

        let result = assert_ok(engine.submit_player_move("Venom Fang"));

        let kinds: Vec<&str> = result
            .events
            .iter()
            .map(|e| match e {
                BattleEvent::MoveUsed { .. } => "move",
                BattleEvent::StatusApplied { .. } => "status",
                BattleEvent::PokemonFainted { .. } => "faint",
                BattleEvent::BattleEnded { .. } => "end",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["move", "status", "faint", "end"]);
        assert_eq!(result.opponent.status, Some(StatusEffect::Poisoned));
    }

    #[test]
    fn test_final_tally_only_on_the_ending_action() {
        let mut engine = start_test_battle(
            TestCombatantBuilder::new("Pikachu"),
            TestCombatantBuilder::new("Eevee"),
            Difficulty::Normal,
            vec![0.5, 0.5, 0.5],
        );

        let result = assert_ok(engine.submit_player_move("Tackle"));

        assert_eq!(result.final_tally, None);
        assert!(!result.session_ended);
        assert_eq!(result.fainted, None);
        assert_eq!(engine.tally(), &BattleTally::default());
    }
}
