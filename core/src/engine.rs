use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::*;

/// Handles for everything the current round has scheduled, one slot each.
#[derive(Debug)]
struct RoundTimers<H> {
    resolution: Option<H>,
    ticker: Option<H>,
    deferred_cue: Option<H>,
}

impl<H> RoundTimers<H> {
    const fn new() -> Self {
        Self {
            resolution: None,
            ticker: None,
            deferred_cue: None,
        }
    }

    /// Drops every handle, which cancels the underlying callbacks.
    fn cancel_all(&mut self) {
        self.resolution = None;
        self.ticker = None;
        self.deferred_cue = None;
    }
}

/// Owner of the round state and of every transition applied to it.
pub struct MatchEngine<S: Scheduler, C: CueSink> {
    config: EngineConfig,
    generator: RandomDeckGenerator,
    round: RoundId,
    state: Rc<GameState>,
    timers: RoundTimers<S::Handle>,
    scheduler: S,
    cues: C,
}

impl<S: Scheduler, C: CueSink> core::fmt::Debug for MatchEngine<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("round", &self.round)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler, C: CueSink> MatchEngine<S, C> {
    /// Starts with a freshly dealt deck for `difficulty`.
    pub fn new(
        config: EngineConfig,
        difficulty: Difficulty,
        seed: u64,
        scheduler: S,
        cues: C,
    ) -> Result<Self> {
        let mut generator = RandomDeckGenerator::new(seed);
        let deck = generator.generate(difficulty.pair_count())?;
        Ok(Self::from_parts(config, generator, deck, scheduler, cues))
    }

    /// Starts with a known deck, later resets deal from `seed`.
    pub fn with_deck(config: EngineConfig, deck: Deck, seed: u64, scheduler: S, cues: C) -> Self {
        Self::from_parts(config, RandomDeckGenerator::new(seed), deck, scheduler, cues)
    }

    fn from_parts(
        config: EngineConfig,
        generator: RandomDeckGenerator,
        deck: Deck,
        scheduler: S,
        cues: C,
    ) -> Self {
        log::debug!("new round with {} pairs", deck.pair_count());
        Self {
            config,
            generator,
            round: 0,
            state: Rc::new(GameState::new(deck)),
            timers: RoundTimers::new(),
            scheduler,
            cues,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Cheap shared view of the current state, later transitions never change it.
    pub fn snapshot(&self) -> Rc<GameState> {
        self.state.clone()
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn total_pairs(&self) -> PairCount {
        self.state.total_pairs()
    }

    pub fn is_flip_disabled(&self) -> bool {
        self.state.is_flip_disabled()
    }

    pub fn is_game_complete(&self) -> bool {
        self.state.is_game_complete()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    fn check_flip(&self, id: CardId) -> core::result::Result<(), FlipRejection> {
        use FlipRejection::*;

        if self.state.is_complete {
            return Err(RoundComplete);
        }
        if self.state.is_flip_disabled() {
            return Err(SelectionFull);
        }
        if self.state.selection.contains(&id) {
            return Err(AlreadySelected);
        }
        match self.state.card(id) {
            None => Err(UnknownCard),
            Some(card) if card.is_matched => Err(AlreadyMatched),
            Some(_) => Ok(()),
        }
    }

    /// Tries to turn a card face up, refused flips leave the state untouched.
    pub fn flip_card(&mut self, id: CardId) -> FlipOutcome {
        if let Err(rejection) = self.check_flip(id) {
            log::debug!("flip {} rejected: {:?}", id, rejection);
            return FlipOutcome::Rejected(rejection);
        }

        let round = self.round;
        let state = Rc::make_mut(&mut self.state);
        let starts_round = !state.is_active;
        state.is_active = true;
        state.cards[id.to_index()].is_flipped = true;
        state.selection.push(id);

        // moves count comparisons started, so the increment happens before resolution
        let selection_complete = state.selection.len() == 2;
        if selection_complete {
            state.moves += 1;
        }

        if starts_round {
            log::debug!("round {} started", round);
            self.timers.ticker = Some(
                self.scheduler
                    .schedule_every(self.config.tick_period_ms, Task::new(round, TaskKind::Tick)),
            );
        }

        self.cues.cue(Cue::Flip);

        if selection_complete {
            log::trace!("selection {:?} waiting", self.state.selection);
            self.timers.resolution = Some(
                self.scheduler
                    .schedule_once(self.config.resolve_delay_ms, Task::new(round, TaskKind::Resolve)),
            );
            FlipOutcome::SelectionComplete
        } else {
            FlipOutcome::Revealed
        }
    }

    /// Applies a task handed back by the scheduler.
    pub fn run_task(&mut self, task: Task) -> TaskOutcome {
        if task.round != self.round {
            log::debug!(
                "ignoring {:?} from round {}, current round is {}",
                task.kind,
                task.round,
                self.round
            );
            return TaskOutcome::Stale;
        }

        match task.kind {
            TaskKind::Tick => self.tick(),
            TaskKind::Resolve => self.resolve_selection(),
            TaskKind::Cue(cue) => {
                self.timers.deferred_cue = None;
                self.cues.cue(cue);
                TaskOutcome::CueEmitted(cue)
            }
        }
    }

    fn tick(&mut self) -> TaskOutcome {
        if !self.state.phase().is_running() {
            log::warn!("tick outside a running round");
            self.timers.ticker = None;
            return TaskOutcome::Stale;
        }

        let state = Rc::make_mut(&mut self.state);
        state.elapsed_secs = state.elapsed_secs.saturating_add(1);
        TaskOutcome::Ticked(state.elapsed_secs)
    }

    fn resolve_selection(&mut self) -> TaskOutcome {
        self.timers.resolution = None;

        let (first, second) = match self.state.selection.as_slice() {
            &[first, second] => (first.to_index(), second.to_index()),
            _ => {
                log::warn!("resolution fired without two selected cards");
                return TaskOutcome::Stale;
            }
        };

        let state = Rc::make_mut(&mut self.state);
        state.selection.clear();

        if state.cards[first].symbol != state.cards[second].symbol {
            state.cards[first].is_flipped = false;
            state.cards[second].is_flipped = false;
            log::trace!("mismatch between cards {} and {}", first, second);
            return TaskOutcome::Mismatch;
        }

        state.cards[first].is_matched = true;
        state.cards[second].is_matched = true;
        state.matches_found += 1;
        let completed = state.matches_found == state.total_pairs;
        if completed {
            state.is_complete = true;
            state.is_active = false;
        }
        let (moves, elapsed_secs) = (state.moves, state.elapsed_secs);

        self.cues.cue(Cue::Match);

        if !completed {
            return TaskOutcome::Matched;
        }

        log::info!(
            "round {} complete in {} moves, {}s",
            self.round,
            moves,
            elapsed_secs
        );
        self.timers.ticker = None;
        self.timers.deferred_cue = Some(self.scheduler.schedule_once(
            self.config.completion_cue_delay_ms,
            Task::new(self.round, TaskKind::Cue(Cue::LevelComplete)),
        ));
        TaskOutcome::Completed
    }

    /// Replaces the round with a freshly dealt one.
    ///
    /// `None` keeps the current pair count. If dealing fails nothing is touched.
    pub fn reset(&mut self, difficulty: Option<Difficulty>) -> Result<()> {
        let pairs = difficulty.map_or(self.state.total_pairs, Difficulty::pair_count);
        let deck = self.generator.generate(pairs)?;
        self.reset_with_deck(deck);
        Ok(())
    }

    /// Replaces the round with one using `deck`, cancelling everything the old round scheduled.
    pub fn reset_with_deck(&mut self, deck: Deck) {
        self.timers.cancel_all();
        self.round = self.round.wrapping_add(1);
        self.state = Rc::new(GameState::new(deck));
        log::debug!(
            "round {} dealt with {} pairs",
            self.round,
            self.state.total_pairs
        );
    }
}

impl<C: CueSink> MatchEngine<ManualScheduler, C> {
    /// Moves virtual time forward by `ms`, running every task that comes due along the way.
    pub fn advance(&mut self, ms: Millis) -> Vec<TaskOutcome> {
        let until = self.scheduler.now() + u64::from(ms);
        let mut outcomes = Vec::new();
        while let Some(task) = self.scheduler.pop_due(until) {
            outcomes.push(self.run_task(task));
        }
        self.scheduler.advance_clock(until);
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use Symbol::*;

    type TestEngine = MatchEngine<ManualScheduler, Vec<Cue>>;

    fn engine(symbols: &[Symbol]) -> TestEngine {
        let deck = Deck::from_symbols(symbols).unwrap();
        MatchEngine::with_deck(
            EngineConfig::default(),
            deck,
            0,
            ManualScheduler::new(),
            Vec::new(),
        )
    }

    /// Deck `[A, A, B, B]` at ids `[0, 1, 2, 3]`.
    fn two_pairs() -> TestEngine {
        engine(&[Heart, Heart, Star, Star])
    }

    #[test]
    fn mismatch_flips_both_back_and_allows_reflip() {
        let mut engine = two_pairs();

        assert_eq!(engine.flip_card(0), FlipOutcome::Revealed);
        assert_eq!(engine.state().selection(), &[0]);
        assert_eq!(engine.state().moves(), 0);

        assert_eq!(engine.flip_card(2), FlipOutcome::SelectionComplete);
        assert_eq!(engine.state().selection(), &[0, 2]);
        assert_eq!(engine.state().moves(), 1);
        assert!(engine.is_flip_disabled());

        assert_eq!(engine.advance(999), vec![]);
        assert_eq!(
            engine.advance(1),
            vec![TaskOutcome::Ticked(1), TaskOutcome::Mismatch]
        );
        assert!(engine.state().selection().is_empty());
        assert!(!engine.state().card(0).unwrap().is_flipped);
        assert!(!engine.state().card(2).unwrap().is_flipped);
        assert_eq!(engine.state().moves(), 1);

        assert_eq!(engine.flip_card(0), FlipOutcome::Revealed);
        assert_eq!(engine.state().selection(), &[0]);
        assert_eq!(engine.cues(), &vec![Cue::Flip, Cue::Flip, Cue::Flip]);
    }

    #[test]
    fn match_keeps_cards_up_until_all_pairs_found() {
        let mut engine = two_pairs();

        engine.flip_card(0);
        engine.flip_card(1);
        assert_eq!(engine.state().moves(), 1);
        assert!(engine.advance(1000).contains(&TaskOutcome::Matched));

        let state = engine.state();
        assert!(state.card(0).unwrap().is_matched);
        assert!(state.card(1).unwrap().is_matched);
        assert_eq!(state.matches_found(), 1);
        assert!(state.selection().is_empty());
        assert!(!engine.is_game_complete());
        assert_eq!(state.phase(), Phase::Running);

        engine.flip_card(2);
        engine.flip_card(3);
        assert!(engine.advance(1000).contains(&TaskOutcome::Completed));

        let state = engine.state();
        assert_eq!(state.matches_found(), 2);
        assert_eq!(state.moves(), 2);
        assert!(engine.is_game_complete());
        assert!(!state.is_active());
        assert_eq!(state.phase(), Phase::Complete);
        assert!(state.cards().iter().all(|card| card.is_matched));
    }

    #[test]
    fn completion_stops_timer_and_defers_level_cue() {
        let mut engine = two_pairs();

        engine.flip_card(0);
        engine.flip_card(1);
        engine.advance(1000);
        engine.flip_card(2);
        engine.flip_card(3);
        let outcomes = engine.advance(1000);
        assert_eq!(
            outcomes,
            vec![TaskOutcome::Ticked(2), TaskOutcome::Completed]
        );
        assert_eq!(engine.state().elapsed_secs(), 2);
        assert!(!engine.cues().contains(&Cue::LevelComplete));

        assert_eq!(engine.advance(499), vec![]);
        assert_eq!(
            engine.advance(1),
            vec![TaskOutcome::CueEmitted(Cue::LevelComplete)]
        );
        assert_eq!(engine.cues().last(), Some(&Cue::LevelComplete));

        assert_eq!(engine.advance(10_000), vec![]);
        assert_eq!(engine.state().elapsed_secs(), 2);
        assert_eq!(engine.scheduler().pending(), 0);
    }

    #[test]
    fn completion_mid_second_stops_before_next_tick() {
        let mut engine = two_pairs();

        engine.flip_card(0);
        engine.advance(400);
        engine.flip_card(1);
        engine.advance(1000);
        engine.flip_card(2);
        engine.advance(300);
        engine.flip_card(3);
        // last resolution lands at 2700, between the ticks at 2000 and 3000
        engine.advance(1000);

        assert!(engine.is_game_complete());
        let elapsed = engine.state().elapsed_secs();
        assert_eq!(elapsed, 2);
        engine.advance(5000);
        assert_eq!(engine.state().elapsed_secs(), elapsed);
    }

    #[test]
    fn rejected_flips_leave_state_identical() {
        let mut engine = two_pairs();

        engine.flip_card(0);
        let before = engine.snapshot();
        assert_eq!(
            engine.flip_card(0),
            FlipOutcome::Rejected(FlipRejection::AlreadySelected)
        );
        assert_eq!(
            engine.flip_card(9),
            FlipOutcome::Rejected(FlipRejection::UnknownCard)
        );
        assert_eq!(engine.state(), &*before);

        engine.flip_card(1);
        let before = engine.snapshot();
        assert_eq!(
            engine.flip_card(2),
            FlipOutcome::Rejected(FlipRejection::SelectionFull)
        );
        assert_eq!(engine.state(), &*before);

        engine.advance(1000);
        let before = engine.snapshot();
        assert_eq!(
            engine.flip_card(1),
            FlipOutcome::Rejected(FlipRejection::AlreadyMatched)
        );
        assert_eq!(engine.state(), &*before);
        assert_eq!(engine.cues().iter().filter(|&&cue| cue == Cue::Flip).count(), 2);
    }

    #[test]
    fn flips_after_completion_are_refused() {
        let mut engine = engine(&[Gem, Gem]);

        engine.flip_card(0);
        engine.flip_card(1);
        engine.advance(1000);
        assert!(engine.is_game_complete());
        assert_eq!(
            engine.flip_card(0),
            FlipOutcome::Rejected(FlipRejection::RoundComplete)
        );
    }

    #[test]
    fn timer_waits_for_first_flip() {
        let mut engine = two_pairs();

        assert_eq!(engine.advance(5000), vec![]);
        assert_eq!(engine.state().elapsed_secs(), 0);
        assert_eq!(engine.state().phase(), Phase::Idle);

        engine.flip_card(3);
        assert_eq!(engine.state().phase(), Phase::Running);
        engine.advance(3000);
        assert_eq!(engine.state().elapsed_secs(), 3);
    }

    #[test]
    fn reset_voids_pending_resolution() {
        let mut engine = two_pairs();

        engine.flip_card(0);
        engine.flip_card(1);
        let old_round = engine.round();
        engine.reset_with_deck(Deck::from_symbols(&[Star, Heart, Heart, Star]).unwrap());

        assert_eq!(engine.round(), old_round + 1);
        assert_eq!(engine.scheduler().pending(), 0);
        assert_eq!(engine.advance(5000), vec![]);

        let state = engine.state();
        assert!(state.cards().iter().all(|card| !card.is_flipped && !card.is_matched));
        assert_eq!(state.moves(), 0);
        assert_eq!(state.matches_found(), 0);
        assert_eq!(state.elapsed_secs(), 0);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn stale_task_is_a_no_op() {
        let mut engine = two_pairs();

        engine.flip_card(0);
        engine.flip_card(1);
        let stale = Task::new(engine.round(), TaskKind::Resolve);
        engine.reset(None).unwrap();
        engine.flip_card(0);
        engine.flip_card(1);
        let before = engine.snapshot();

        assert_eq!(engine.run_task(stale), TaskOutcome::Stale);
        assert_eq!(engine.state(), &*before);
    }

    #[test]
    fn reset_with_difficulty_changes_pair_count() {
        let mut engine = two_pairs();

        engine.reset(Some(Difficulty::Hard)).unwrap();
        assert_eq!(engine.total_pairs(), 10);
        assert_eq!(engine.state().cards().len(), 20);

        engine.reset(None).unwrap();
        assert_eq!(engine.total_pairs(), 10);
    }

    #[test]
    fn snapshots_are_copy_on_write() {
        let mut engine = two_pairs();

        let before = engine.snapshot();
        engine.flip_card(2);

        assert!(!before.card(2).unwrap().is_flipped);
        assert!(engine.state().card(2).unwrap().is_flipped);
    }

    #[test]
    fn at_most_two_cards_pending_in_any_flip_sequence() {
        let mut engine = MatchEngine::new(
            EngineConfig::default(),
            Difficulty::Easy,
            99,
            ManualScheduler::new(),
            (),
        )
        .unwrap();

        // hammer every id, including one out of range, with time passing in between
        for step in 0u32..400 {
            let id = ((step * 7) % 13) as CardId;
            engine.flip_card(id);
            assert!(engine.state().pending_count() <= 2);
            assert!(engine.state().matches_found() <= engine.total_pairs());
            if step % 3 == 0 {
                engine.advance(1000);
            }
            assert_eq!(
                engine.is_game_complete(),
                engine.state().matches_found() == engine.total_pairs()
            );
        }
    }

    #[test]
    fn perfect_play_completes_hard_round() {
        let mut engine = MatchEngine::new(
            EngineConfig::default(),
            Difficulty::Hard,
            2024,
            ManualScheduler::new(),
            Vec::new(),
        )
        .unwrap();

        for symbol in &Symbol::CATALOG {
            let ids: Vec<CardId> = engine
                .state()
                .cards()
                .iter()
                .filter(|card| card.symbol == *symbol)
                .map(|card| card.id)
                .collect();
            assert_eq!(ids.len(), 2);
            engine.flip_card(ids[0]);
            engine.flip_card(ids[1]);
            engine.advance(engine.config().resolve_delay_ms);
        }

        let state = engine.state();
        assert!(state.is_game_complete());
        assert_eq!(state.moves(), 10);
        assert_eq!(state.matches_found(), 10);
        assert_eq!(state.elapsed_secs(), 10);
        let matches = engine.cues().iter().filter(|&&cue| cue == Cue::Match).count();
        assert_eq!(matches, 10);
    }

    #[test]
    fn state_serializes_for_inspection() {
        let mut engine = two_pairs();
        engine.flip_card(1);

        let json = serde_json::to_value(engine.state()).unwrap();
        assert_eq!(json["selection"], serde_json::json!([1]));
        assert_eq!(json["cards"][0]["symbol"], "heart");
        assert_eq!(json["is_active"], true);
    }
}
