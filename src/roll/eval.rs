//! Rolling parsed specs against a random source.

use rand::Rng;

use super::{RollBatchResult, RollOutcome, RollRequest, RollSpec};

/// Source of individual die rolls.
///
/// Randomness is injected through this seam rather than drawn from a hidden
/// global, so evaluation is deterministic under test. Any [`rand::Rng`]
/// qualifies.
pub trait DieRoller {
    /// Rolls one die with `sides` faces, returning a value in `[1, sides]`.
    fn roll_die(&mut self, sides: i64) -> i64;
}

impl<R: Rng> DieRoller for R {
    fn roll_die(&mut self, sides: i64) -> i64 {
        self.random_range(1..=sides)
    }
}

/// Rolls a single spec, recording each die in draw order.
///
/// A zero multiplier yields no rolls and a total equal to the modifier.
/// Crit and crit-fail are single-die notions: both flags stay false unless
/// exactly one die was rolled.
pub fn evaluate<R: DieRoller + ?Sized>(spec: &RollSpec, roller: &mut R) -> RollOutcome {
    let mut base_rolls = Vec::with_capacity(spec.multiplier as usize);
    let mut sum = 0;

    for _ in 0..spec.multiplier {
        let roll = roller.roll_die(spec.die_size);
        sum += roll;
        base_rolls.push(roll);
    }

    let single = base_rolls.len() == 1;

    RollOutcome {
        spec: *spec,
        total: sum + spec.modifier,
        is_crit: single && base_rolls[0] == spec.die_size,
        is_crit_fail: single && base_rolls[0] == 1,
        base_rolls,
    }
}

/// Rolls every spec in the request, in order, and sums the totals.
///
/// A request that already classified as a troll is not evaluated at all;
/// its message is forwarded on an empty batch.
pub fn evaluate_batch<R: DieRoller + ?Sized>(request: &RollRequest, roller: &mut R) -> RollBatchResult {
    if let Some(message) = &request.troll_message {
        return RollBatchResult {
            outcomes: Vec::new(),
            grand_total: 0,
            troll_message: Some(message.clone()),
        };
    }

    let mut outcomes = Vec::with_capacity(request.specs.len());
    let mut grand_total = 0;

    for spec in &request.specs {
        let outcome = evaluate(spec, roller);
        grand_total += outcome.total;
        outcomes.push(outcome);
    }

    RollBatchResult {
        outcomes,
        grand_total,
        troll_message: None,
    }
}
