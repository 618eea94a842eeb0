use memora_core::{Difficulty, MoveCount, Rating};
use yew::prelude::*;

use crate::utils::format_time;

#[derive(Properties, PartialEq)]
pub(crate) struct SummaryProps {
    pub moves: MoveCount,
    pub elapsed_secs: u32,
    pub difficulty: Difficulty,
    pub on_restart: Callback<()>,
    pub on_next_level: Callback<Difficulty>,
}

/// Results shown once every pair has been found.
#[function_component]
pub(crate) fn SummaryView(props: &SummaryProps) -> Html {
    let rating = Rating::for_result(props.difficulty, props.moves, props.elapsed_secs);

    let stars = (0..Rating::MAX_STARS).map(|i| {
        let lit = i < rating.stars();
        html! {
            <span class={classes!("star", lit.then_some("lit"))}>{"★"}</span>
        }
    });

    let next_level = props.difficulty.next().map(|next| {
        let on_next_level = props.on_next_level.reform(move |_: MouseEvent| next);
        html! {
            <button class="next" onclick={on_next_level}>
                {format!("Next Level ({})", next.label())}
            </button>
        }
    });
    let on_restart = props.on_restart.reform(|_: MouseEvent| ());

    html! {
        <dialog id="summary" open={true}>
            <article>
                <h2>{"Level Complete!"}</h2>
                <p>{rating.message()}</p>
                <p><small>{format!("{} difficulty conquered", props.difficulty.label())}</small></p>
                <div class="stars">{ for stars }</div>
                <dl>
                    <dt>{"Time"}</dt>
                    <dd>{format_time(props.elapsed_secs)}</dd>
                    <dt>{"Moves"}</dt>
                    <dd>{props.moves}</dd>
                </dl>
                <footer>
                    { for next_level }
                    <button onclick={on_restart}>{"Play Again"}</button>
                </footer>
            </article>
        </dialog>
    }
}
