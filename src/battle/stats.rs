use crate::roster::TypeChart;
use schema::ElementType;

pub const SUPER_EFFECTIVE: f64 = 1.5;
pub const NEUTRAL: f64 = 1.0;
pub const NOT_VERY_EFFECTIVE: f64 = 0.5;

/// Multiplier for a move of `move_type` hitting a creature of `defender_type`.
///
/// Exactly one of 1.5, 1.0 or 0.5. Types have a single element, so there is
/// never more than one lookup to combine.
pub fn get_type_effectiveness(
    chart: &TypeChart,
    move_type: ElementType,
    defender_type: ElementType,
) -> f64 {
    let Some(matchups) = chart.matchups(move_type) else {
        return NEUTRAL;
    };
    if matchups.super_effective.contains(&defender_type) {
        SUPER_EFFECTIVE
    } else if matchups.weak.contains(&defender_type) {
        NOT_VERY_EFFECTIVE
    } else {
        NEUTRAL
    }
}
