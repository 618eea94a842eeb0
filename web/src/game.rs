use crate::audio::AudioCues;
use crate::scheduler::BrowserScheduler;
use crate::settings;
use crate::summary::SummaryView;
use crate::utils::*;
use clap::Args;
use memora_core as game;
use game::{Card, CardId, Cue, CueSink, Difficulty, Phase, Symbol};
use yew::prelude::*;

type Engine = game::MatchEngine<BrowserScheduler, AudioCues>;

const fn glyph(symbol: Symbol) -> &'static str {
    use Symbol::*;
    match symbol {
        Heart => "♥",
        Star => "★",
        Sparkles => "✨",
        Zap => "⚡",
        Crown => "♛",
        Gem => "💎",
        Diamond => "♦",
        Circle => "●",
        Square => "■",
        Triangle => "▲",
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(CardId),
    Task(game::Task),
    NewGame,
    NextLevel(Difficulty),
    ToggleSettings,
    UpdateSettings(settings::Settings),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: Card,
    #[prop_or_default]
    locked: bool,
    callback: Callback<CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        card.is_face_up().then_some("flipped"),
        card.is_matched.then_some("matched"),
        locked.then_some("locked"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.id);
        callback.emit(card.id);
    });

    html! {
        <li {class} {onclick} data-symbol={card.symbol.name()}>
            <div class="back"/>
            <div class="face">{glyph(card.symbol)}</div>
        </li>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Start at this difficulty instead of the saved one
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Start with sound muted
    #[arg(short, long)]
    pub mute: bool,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    difficulty: Difficulty,
    engine: Engine,
    settings_open: bool,
}

impl GameView {
    fn start_round(&mut self, difficulty: Difficulty) -> bool {
        match self.engine.reset(Some(difficulty)) {
            Ok(()) => {
                self.difficulty = difficulty;
                self.engine.cues_mut().cue(Cue::LevelStart);
                true
            }
            Err(err) => {
                log::error!("could not deal a {:?} round: {}", difficulty, err);
                false
            }
        }
    }

    fn apply_settings(&mut self, settings: settings::Settings) -> bool {
        settings.local_save();
        self.engine.cues_mut().set_enabled(settings.sound_enabled);

        let difficulty_changed = settings.difficulty != self.settings.difficulty;
        self.settings = settings;
        if difficulty_changed {
            self.start_round(settings.difficulty);
        }
        true
    }

    fn get_phase_class(&self) -> &'static str {
        match self.engine.state().phase() {
            Phase::Idle => "not-started",
            Phase::Running if self.engine.is_flip_disabled() => "comparing",
            Phase::Running => "in-progress",
            Phase::Complete => "win",
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut settings: settings::Settings = LocalOrDefault::local_or_default();
        if props.mute {
            settings.sound_enabled = false;
        }
        let difficulty = props.difficulty.unwrap_or(settings.difficulty);
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}, difficulty: {:?}", seed, difficulty);

        let engine = Engine::new(
            game::EngineConfig::default(),
            difficulty,
            seed,
            BrowserScheduler::new(ctx.link().callback(Msg::Task)),
            AudioCues::new(settings.sound_enabled),
        )
        .expect("every difficulty fits the symbol catalog");

        Self {
            settings,
            difficulty,
            engine,
            settings_open: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(id) => self.engine.flip_card(id).has_update(),
            Task(task) => self.engine.run_task(task).has_update(),
            NewGame => {
                self.engine.cues_mut().cue(Cue::Tap);
                self.start_round(self.difficulty)
            }
            NextLevel(difficulty) => {
                self.engine.cues_mut().cue(Cue::Tap);
                self.settings.difficulty = difficulty;
                self.settings.local_save();
                self.start_round(difficulty)
            }
            ToggleSettings => {
                self.engine.cues_mut().cue(Cue::Tap);
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                self.settings_open = false;
                self.apply_settings(settings)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;
        use Msg::*;

        let state = self.engine.snapshot();
        let locked = state.is_flip_disabled();
        let columns = grid_columns(state.cards().len());
        let elapsed_time = format_time(state.elapsed_secs());

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_toggle_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_apply_settings = ctx.link().callback(UpdateSettings);
        let cb_cancel_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_flip = ctx.link().callback(Flip);

        let summary = state.is_game_complete().then(|| {
            let on_restart = ctx.link().callback(|_| NewGame);
            let on_next_level = ctx.link().callback(NextLevel);
            html! {
                <Modal>
                    <SummaryView
                        moves={state.moves()}
                        elapsed_secs={state.elapsed_secs()}
                        difficulty={self.difficulty}
                        {on_restart}
                        {on_next_level}
                    />
                </Modal>
            }
        });

        html! {
            <div class="memora">
                <small onclick={cb_toggle_settings}>{"···"}</small>
                <nav>
                    <aside class="time">{elapsed_time}</aside>
                    <aside class="moves">{format!("{} moves", state.moves())}</aside>
                    <span><button class={self.get_phase_class()} onclick={cb_new_game}/></span>
                    <aside class="matches">{format!("{}/{}", state.matches_found(), state.total_pairs())}</aside>
                </nav>
                <ol class={classes!("board", locked.then_some("locked"))} style={format!("--columns: {}", columns)}>
                    {
                        for state.cards().iter().map(|&card| {
                            let callback = cb_flip.clone();
                            html! {
                                <CardView key={card.id} {card} {locked} {callback}/>
                            }
                        })
                    }
                </ol>
                { for summary }
                <Modal>
                    <SettingsView
                        open={self.settings_open}
                        settings={self.settings}
                        on_apply={cb_apply_settings}
                        on_cancel={cb_cancel_settings}
                    />
                </Modal>
            </div>
        }
    }
}
