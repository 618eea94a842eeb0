use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Semantic notification for the audio layer, nothing is ever returned from it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Flip,
    Match,
    LevelComplete,
    Tap,
    LevelStart,
}

/// Consumer of cue events.
///
/// Implementations must absorb their own failures: the signature is infallible so that a broken or blocked
/// audio backend can never stall or fail the engine.
pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

/// Records every cue, handy for headless drivers.
impl CueSink for Vec<Cue> {
    fn cue(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Muted sink.
impl CueSink for () {
    fn cue(&mut self, _cue: Cue) {}
}
