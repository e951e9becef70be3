use crate::combatant::Combatant;
use schema::StatusEffect;

/// Put `status` on `target`, replacing whatever it had.
///
/// There is no immunity, resistance, or expiry: the newest status always
/// wins. Returns the status that was replaced.
pub fn apply_status(target: &mut Combatant, status: StatusEffect) -> Option<StatusEffect> {
    target.status.replace(status)
}
