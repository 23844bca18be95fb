//! Scanning free-form text for dice expressions.

use regex::{Captures, Regex};
use tracing::debug;

use super::{RollLimits, RollRequest, RollSpec};

/// Extracts roll clauses of the form `[count]d<size>[+/-modifier]` from
/// anywhere in a message.
///
/// Parsing never fails: clauses that do not parse are dropped, and requests
/// that parse but ask for something absurd are classified as trolls. Limits
/// are owned by the parser instance so tests can run with alternate bounds.
pub struct RollParser {
    pattern: Regex,
    limits: RollLimits,
}

impl RollParser {
    pub fn new(limits: RollLimits) -> Self {
        // The pattern is a compile-time constant; compiled once per parser.
        let pattern = Regex::new(r"(\d*)\s*[dD](\d+)\s*([+-]\s*\d+)?").expect("roll pattern is valid");
        Self { pattern, limits }
    }

    /// Whether a user's free-form text includes a dice roll. Cheap enough to
    /// call on every inbound message.
    pub fn has_roll_request(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Parses every roll clause in the message, in order.
    ///
    /// All parsed specs are returned even when the request classifies as a
    /// troll, so callers can still introspect what was asked.
    pub fn parse(&self, text: &str) -> RollRequest {
        let matches: Vec<Captures> = self.pattern.captures_iter(text).collect();

        // The clause-count check is batch-level and takes precedence over
        // any per-clause classification.
        let mut troll_message = if matches.len() > self.limits.max_roll_clauses {
            Some("I refuse to do that much work.".to_string())
        } else {
            None
        };

        let mut specs = Vec::with_capacity(matches.len());
        let mut total_dice: u64 = 0;

        for caps in &matches {
            let Some(spec) = parse_clause(caps) else {
                // A clause that fails integer parsing is dropped without
                // aborting its siblings.
                debug!("Dropping unparsable roll clause: {}", &caps[0]);
                continue;
            };

            total_dice = total_dice.saturating_add(spec.multiplier);

            if troll_message.is_none() {
                troll_message = self.classify(&spec, total_dice);
            }

            specs.push(spec);
        }

        RollRequest { specs, troll_message }
    }

    /// First violation wins, in priority order: dice count, die too small,
    /// die too large, modifier magnitude.
    fn classify(&self, spec: &RollSpec, total_dice: u64) -> Option<String> {
        if total_dice > self.limits.max_total_dice {
            return Some("I ain't got that many dice.".to_string());
        }
        if spec.die_size < 2 {
            return Some(format!("A {}-sided die is pointless, you ass.", spec.die_size));
        }
        if spec.die_size > self.limits.max_die_size {
            return Some(format!("A d{} is basically a sphere, wtf.", spec.die_size));
        }
        if spec.modifier > self.limits.max_abs_modifier {
            return Some("You can't add that much to a modifier, that's unreasonable.".to_string());
        }
        if spec.modifier < -self.limits.max_abs_modifier {
            return Some("You can't subtract that much from a modifier, that's unreasonable.".to_string());
        }
        None
    }
}

fn parse_clause(caps: &Captures) -> Option<RollSpec> {
    let multiplier = match caps.get(1).map_or("", |m| m.as_str()) {
        "" => 1,
        digits => digits.parse().ok()?,
    };

    let die_size = caps.get(2)?.as_str().parse().ok()?;

    let modifier = match caps.get(3) {
        None => 0,
        Some(m) => {
            let digits: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            digits.parse().ok()?
        }
    };

    Some(RollSpec {
        multiplier,
        die_size,
        modifier,
    })
}
