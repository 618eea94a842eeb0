use memora_core::Difficulty;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::utils::*;

/// Player preferences, persisted across visits.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            sound_enabled: true,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "memora:settings:v1";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_apply: Callback<Settings>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let draft = use_state(|| props.settings);

    {
        // start from the applied settings every time the dialog opens
        let draft = draft.clone();
        use_effect_with((props.open, props.settings), move |&(_, settings)| {
            draft.set(settings);
        });
    }

    let difficulty_buttons = Difficulty::ALL.into_iter().map(|difficulty| {
        let draft = draft.clone();
        let pressed = draft.difficulty == difficulty;
        let onclick = Callback::from(move |_: MouseEvent| {
            draft.set(Settings {
                difficulty,
                ..*draft
            });
        });
        html! {
            <li>
                <button class={classes!(pressed.then_some("selected"))} aria-pressed={pressed.to_string()} {onclick}>
                    {difficulty.label()}
                    <small>{format!("{} pairs", difficulty.pair_count())}</small>
                </button>
            </li>
        }
    });

    let on_toggle_sound = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(Settings {
                sound_enabled: !draft.sound_enabled,
                ..*draft
            });
        })
    };

    let on_apply = {
        let draft = draft.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| on_apply.emit(*draft))
    };
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <h3>{"Difficulty"}</h3>
                <ul class="difficulty">
                    { for difficulty_buttons }
                </ul>
                <h3>{"Sound"}</h3>
                <button onclick={on_toggle_sound} aria-pressed={draft.sound_enabled.to_string()}>
                    { if draft.sound_enabled { "On" } else { "Off" } }
                </button>
                <footer>
                    <button onclick={on_cancel} type="reset">{"Cancel"}</button>
                    <button onclick={on_apply}>{"Apply"}</button>
                </footer>
            </article>
        </dialog>
    }
}
