//! Rendering roll outcomes into channel-ready text.
//!
//! Pure string building; no I/O and no randomness, so formatting the same
//! outcome twice yields identical text.

use super::{RollBatchResult, RollOutcome, RollSpec};

/// Renders a spec the way a player would write it: "d20", "3d6+2".
pub fn format_spec(spec: &RollSpec) -> String {
    let mut out = String::new();
    if spec.multiplier != 1 {
        out.push_str(&spec.multiplier.to_string());
    }
    out.push('d');
    out.push_str(&spec.die_size.to_string());
    if spec.modifier != 0 {
        out.push_str(&format!("{:+}", spec.modifier));
    }
    out
}

/// Renders one outcome.
///
/// An unmodified single die gets the compact form `d20->**20**` with a crit
/// callout when applicable. Everything else gets the expanded form listing
/// each base roll, the signed modifier, and the bold total. At most
/// `max_shown` rolls are listed; the total is never truncated.
pub fn format_outcome(outcome: &RollOutcome, max_shown: usize) -> String {
    let mut s = format!("{}->", format_spec(&outcome.spec));

    if outcome.base_rolls.len() == 1 && outcome.spec.modifier == 0 {
        // Format unmodified, single die roll: dXX->Result
        if outcome.is_crit {
            s.push_str(&format!("**{} (Crit!)**", outcome.total));
        } else if outcome.is_crit_fail {
            s.push_str(&format!("**{} (Crit-Fail!)**", outcome.total));
        } else {
            s.push_str(&format!("**{}**", outcome.total));
        }
        return s;
    }

    // Format multi-die roll: dXX->r1+r2+...+rn
    s.push('*');
    if outcome.base_rolls.is_empty() {
        s.push_str("(nuthin)");
    }
    for (i, roll) in outcome.base_rolls.iter().enumerate() {
        if i > 0 {
            s.push('+');
        }
        if i >= max_shown {
            s.push_str(&format!("**({} rolls omitted, ass)**", outcome.base_rolls.len() - i));
            break;
        }
        if outcome.is_crit {
            s.push_str(&format!("{roll}(crit)"));
        } else if outcome.is_crit_fail {
            s.push_str(&format!("{roll}(crit-fail)"));
        } else {
            s.push_str(&roll.to_string());
        }
    }
    s.push('*');

    if outcome.spec.modifier != 0 {
        s.push_str(&format!("{:+}", outcome.spec.modifier));
    }

    s.push_str(&format!("=**{}**", outcome.total));
    s
}

/// Renders a whole batch.
///
/// A troll batch is just its message. A single outcome stands alone;
/// several are joined with ", " and followed by the grand total.
pub fn format_batch(batch: &RollBatchResult, max_shown: usize) -> String {
    if let Some(message) = &batch.troll_message {
        return message.clone();
    }

    let rendered: Vec<String> = batch.outcomes.iter().map(|o| format_outcome(o, max_shown)).collect();

    match rendered.as_slice() {
        [] => "lol, nice try".to_string(),
        [single] => single.clone(),
        _ => format!("{} Total=**{}**", rendered.join(", "), batch.grand_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(multiplier: u64, die_size: i64, modifier: i64, base_rolls: Vec<i64>) -> RollOutcome {
        let sum: i64 = base_rolls.iter().sum();
        let single = base_rolls.len() == 1;
        RollOutcome {
            spec: RollSpec {
                multiplier,
                die_size,
                modifier,
            },
            total: sum + modifier,
            is_crit: single && base_rolls[0] == die_size,
            is_crit_fail: single && base_rolls[0] == 1,
            base_rolls,
        }
    }

    #[test]
    fn spec_rendering() {
        assert_eq!(format_spec(&RollSpec { multiplier: 1, die_size: 20, modifier: 0 }), "d20");
        assert_eq!(format_spec(&RollSpec { multiplier: 3, die_size: 6, modifier: 2 }), "3d6+2");
        assert_eq!(format_spec(&RollSpec { multiplier: 2, die_size: 8, modifier: -1 }), "2d8-1");
        assert_eq!(format_spec(&RollSpec { multiplier: 0, die_size: 6, modifier: 0 }), "0d6");
    }

    #[test]
    fn single_die_compact_form() {
        assert_eq!(format_outcome(&outcome(1, 20, 0, vec![13]), 10), "d20->**13**");
    }

    #[test]
    fn single_die_crit_annotations() {
        assert_eq!(format_outcome(&outcome(1, 20, 0, vec![20]), 10), "d20->**20 (Crit!)**");
        assert_eq!(format_outcome(&outcome(1, 20, 0, vec![1]), 10), "d20->**1 (Crit-Fail!)**");
    }

    #[test]
    fn modified_single_die_uses_expanded_form() {
        assert_eq!(format_outcome(&outcome(1, 20, 3, vec![15]), 10), "d20+3->*15*+3=**18**");
    }

    #[test]
    fn expanded_form_lists_rolls_and_total() {
        assert_eq!(format_outcome(&outcome(3, 6, 2, vec![4, 5, 6]), 10), "3d6+2->*4+5+6*+2=**17**");
    }

    #[test]
    fn crit_annotates_the_die_in_expanded_form() {
        assert_eq!(format_outcome(&outcome(1, 20, 5, vec![20]), 10), "d20+5->*20(crit)*+5=**25**");
    }

    #[test]
    fn long_roll_lists_are_truncated_but_not_the_total() {
        let rolls: Vec<i64> = vec![2; 15];
        let text = format_outcome(&outcome(15, 6, 0, rolls), 10);

        assert!(text.contains("**(5 rolls omitted, ass)**"));
        assert!(text.ends_with("=**30**"));
    }

    #[test]
    fn empty_rolls_render_as_nuthin() {
        assert_eq!(format_outcome(&outcome(0, 6, 5, vec![]), 10), "0d6+5->*(nuthin)*+5=**5**");
    }

    #[test]
    fn troll_batch_is_the_message_verbatim() {
        let batch = RollBatchResult {
            outcomes: vec![outcome(1, 20, 0, vec![13])],
            grand_total: 13,
            troll_message: Some("I refuse to do that much work.".to_string()),
        };
        assert_eq!(format_batch(&batch, 10), "I refuse to do that much work.");
    }

    #[test]
    fn multiple_outcomes_append_the_grand_total() {
        let batch = RollBatchResult {
            outcomes: vec![outcome(1, 20, 0, vec![13]), outcome(2, 6, 0, vec![3, 4])],
            grand_total: 20,
            troll_message: None,
        };
        assert_eq!(format_batch(&batch, 10), "d20->**13**, 2d6->*3+4*=**7** Total=**20**");
    }

    #[test]
    fn formatting_is_idempotent() {
        let o = outcome(3, 6, 2, vec![4, 5, 6]);
        assert_eq!(format_outcome(&o, 10), format_outcome(&o, 10));
    }
}
