//! Replays a fixed list of hero intents.
use std::collections::VecDeque;

use tactics_core::{Battle, Intent, Rejection};

use crate::api::{IntentProvider, Result, RuntimeError};

/// Hands out queued intents in order and fails once the queue runs dry.
///
/// Rejected intents are consumed like accepted ones, so a script that expects
/// a rejection simply lists the retry next.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIntents {
    queue: VecDeque<Intent>,
    consumed: usize,
    rejections: Vec<Rejection>,
}

impl ScriptedIntents {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            queue: intents.into_iter().collect(),
            consumed: 0,
            rejections: Vec::new(),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Rejections observed so far, oldest first.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }
}

impl IntentProvider for ScriptedIntents {
    fn provide_intent(&mut self, _battle: &Battle) -> Result<Intent> {
        let intent = self.queue.pop_front().ok_or(RuntimeError::ScriptExhausted {
            consumed: self.consumed,
        })?;
        self.consumed += 1;
        Ok(intent)
    }

    fn on_rejected(&mut self, rejection: &Rejection) {
        self.rejections.push(*rejection);
    }
}
