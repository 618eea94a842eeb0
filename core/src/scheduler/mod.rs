use crate::*;
pub use manual::*;

mod manual;

/// What a scheduled callback should do once it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Compare the two selected cards.
    Resolve,
    /// One second of play time has passed.
    Tick,
    /// Emit a cue that was deferred.
    Cue(Cue),
}

/// A deferred engine action, tagged with the round it was scheduled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub round: RoundId,
    pub kind: TaskKind,
}

impl Task {
    pub const fn new(round: RoundId, kind: TaskKind) -> Self {
        Self { round, kind }
    }
}

/// Source of deferred callbacks for the engine.
///
/// Whoever drives the engine must hand every fired task back through
/// [`MatchEngine::run_task`](crate::MatchEngine::run_task). Dropping a handle cancels the task it belongs to, the
/// engine relies on this to stop the tick and to void a pending resolution.
pub trait Scheduler {
    type Handle;

    fn schedule_once(&mut self, delay: Millis, task: Task) -> Self::Handle;

    fn schedule_every(&mut self, period: Millis, task: Task) -> Self::Handle;
}
