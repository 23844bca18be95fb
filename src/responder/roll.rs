//! The dice-roll responder.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    base::types::{InboundEvent, Res, Response},
    roll::{self, DieRoller, RollLimits, RollParser, format},
};

use super::Responder;

/// Responds to any message containing a dice expression.
///
/// Generic over the roll source so tests can script exact die results; the
/// runtime uses an OS-seeded [`StdRng`]. The roller sits behind a mutex that
/// is locked only around the draw, never across an await.
pub struct RollResponder<R = StdRng> {
    parser: RollParser,
    max_shown_rolls: usize,
    roller: Mutex<R>,
}

impl RollResponder<StdRng> {
    pub fn new(limits: RollLimits) -> Self {
        Self::with_roller(limits, StdRng::from_os_rng())
    }
}

impl<R: DieRoller + Send + 'static> RollResponder<R> {
    pub fn with_roller(limits: RollLimits, roller: R) -> Self {
        Self {
            parser: RollParser::new(limits),
            max_shown_rolls: limits.max_shown_rolls,
            roller: Mutex::new(roller),
        }
    }
}

#[async_trait]
impl<R: DieRoller + Send + 'static> Responder for RollResponder<R> {
    fn name(&self) -> &str {
        "roll"
    }

    fn applies(&self, event: &InboundEvent) -> bool {
        self.parser.has_roll_request(&event.text)
    }

    async fn respond(&self, event: &InboundEvent) -> Res<Response> {
        let request = self.parser.parse(&event.text);

        let batch = {
            let mut roller = self.roller.lock().expect("roller lock poisoned");
            roll::evaluate_batch(&request, &mut *roller)
        };

        Ok(Response {
            text: format::format_batch(&batch, self.max_shown_rolls),
            mention_speaker: true,
            metadata: serde_json::to_value(&batch)?,
        })
    }
}
