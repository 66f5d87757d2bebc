//! Abstraction for sourcing the hero's intent.
//!
//! Runtime users plug in [`IntentProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or an automatic hero. Enemies are
//! never driven through this trait; their turns come from the core policy.
use tactics_core::{Battle, Intent, Rejection};

use super::errors::Result;

/// Trait for providing the hero's intent based on the current battle.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed intents
/// - An automatic hero for simulations
/// - Testing fixtures
pub trait IntentProvider {
    /// Provide the next intent while the battle is on the hero's turn.
    fn provide_intent(&mut self, battle: &Battle) -> Result<Intent>;

    /// Called when the battle refused the last intent. The hero keeps the
    /// turn and is asked again.
    fn on_rejected(&mut self, _rejection: &Rejection) {}
}

impl<P: IntentProvider + ?Sized> IntentProvider for &mut P {
    fn provide_intent(&mut self, battle: &Battle) -> Result<Intent> {
        (**self).provide_intent(battle)
    }

    fn on_rejected(&mut self, rejection: &Rejection) {
        (**self).on_rejected(rejection)
    }
}

/// A provider that always ends the turn.
/// Useful for testing or as a fallback.
pub struct EndTurnProvider;

impl IntentProvider for EndTurnProvider {
    fn provide_intent(&mut self, _battle: &Battle) -> Result<Intent> {
        Ok(Intent::EndTurn)
    }
}
