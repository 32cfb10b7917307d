mod config;
mod content;
mod date_key;
mod quiz;
mod submission;

use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::events::{InputEvent, MouseEvent};
use yew::prelude::*;
use yew::TargetCast;

use crate::config::Config;
use crate::content::HttpSource;
use crate::date_key::DateKey;
use crate::quiz::{Failure, OptionState, Phase, QuizSession};
use crate::submission::{HttpSubmitter, SubmissionGate};

#[function_component(App)]
fn app() -> Html {
    let config = use_state(Config::load);
    let session = use_state(QuizSession::loading);
    let date_label = use_state(|| Option::<String>::None);
    let id_input = use_state(String::new);
    let word_input = use_state(String::new);
    let gate = use_state(SubmissionGate::default);

    // One load sequence per page view
    {
        let config = (*config).clone();
        let session = session.clone();
        let date_label = date_label.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let key = match DateKey::resolve(date_override().as_deref()) {
                    Ok(key) => key,
                    Err(e) => {
                        error!("Error getting date key: {e}");
                        session.set(QuizSession::unavailable(Failure::Date));
                        return;
                    }
                };
                date_label.set(Some(key.to_string()));

                match content::resolve(&HttpSource, &config.layout(), &key).await {
                    Some(resolved) => {
                        info!("Showing {:?} content for {key}", resolved.origin);
                        session.set(QuizSession::presenting(resolved));
                    }
                    None => session.set(QuizSession::unavailable(Failure::NoQuestion)),
                }
            });
            || ()
        });
    }

    let on_select = {
        let session = session.clone();
        Callback::from(move |index: usize| {
            let mut next = (*session).clone();
            let outcome = next.select(index);
            info!("Option {} -> {:?}", index + 1, outcome);
            session.set(next);
        })
    };

    let on_next = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*session).clone();
            if next.open_form() {
                session.set(next);
            }
        })
    };

    let on_id_input = {
        let id_input = id_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            id_input.set(input.value());
        })
    };

    let on_word_input = {
        let word_input = word_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            word_input.set(input.value());
        })
    };

    let on_submit = {
        let gate = gate.clone();
        let id_input = id_input.clone();
        let word_input = word_input.clone();
        let endpoint = config.endpoint.clone();

        Callback::from(move |_: MouseEvent| {
            let mut pending = (*gate).clone();
            let form = pending.begin(&id_input, &word_input);
            gate.set(pending.clone());

            let Some(form) = form else {
                return;
            };

            let gate = gate.clone();
            let submitter = HttpSubmitter::new(&endpoint);
            spawn_local(async move {
                let result = submission::send(&submitter, &form).await;
                pending.finish(result);
                gate.set(pending);
            });
        })
    };

    html! {
        <div class="app-shell">
            <header>
                <h1>{"Daily Aviation Quiz"}</h1>
                <p class="sub">
                    {"One picture, one question, every day."}
                    if let Some(date) = &*date_label {
                        {" · "}{ date }
                    }
                </p>
            </header>

            <main>
                { render_question(&session, date_label.as_deref()) }
                { render_options(&session, &on_select) }

                <div id="feedback" class="feedback">
                    { session.feedback().unwrap_or_default() }
                </div>

                if session.next_visible() {
                    <button id="next" class="btn btn-primary" onclick={on_next}>
                        {"Next"}
                    </button>
                }

                if session.form_open() {
                    { render_submission(&gate, &on_id_input, &on_word_input, &on_submit) }
                }
            </main>

            <footer class="footer">
                <span>{"Rust + Yew + WASM"}</span>
            </footer>
        </div>
    }
}

// --- Helper rendering functions -------------------------------------------------

fn render_question(session: &QuizSession, date: Option<&str>) -> Html {
    match session.phase() {
        Phase::Loading => html! {
            <div id="question"><p>{"Loading today's question..."}</p></div>
        },
        Phase::Unavailable(Failure::Date) => html! {
            <div id="question">
                <p class="error">{"Error getting current date."}</p>
            </div>
        },
        Phase::Unavailable(Failure::NoQuestion) => html! {
            <div id="question" style="padding:8px 0;">
                <p>{"Today's question failed to load or isn't available yet."}</p>
                if let Some(date) = date {
                    <p>{"("}{ date }{")"}</p>
                }
            </div>
        },
        Phase::Presenting | Phase::Revealed => {
            let alt = if *session.phase() == Phase::Revealed {
                "Answer Image"
            } else {
                "Question Image"
            };
            html! {
                <div id="question">
                    if let Some(heading) = session.heading() {
                        <h2>{ heading }</h2>
                    }
                    if let Some(src) = session.shown_image() {
                        <img src={src.to_string()} alt={alt} />
                    }
                </div>
            }
        }
    }
}

fn render_options(session: &QuizSession, on_select: &Callback<usize>) -> Html {
    html! {
        <div id="options" class="options">
            {
                for session.options().iter().enumerate().map(|(i, option)| {
                    let state = session.option_state(i);
                    let class = classes!(
                        "option-btn",
                        format!("option-btn-{}", i + 1),
                        match state {
                            OptionState::Wrong => Some("incorrect"),
                            OptionState::Correct => Some("correct"),
                            OptionState::Open | OptionState::Locked => None,
                        }
                    );
                    let onclick = on_select.reform(move |_: MouseEvent| i);
                    html! {
                        <button
                            class={class}
                            onclick={onclick}
                            disabled={state != OptionState::Open}
                        >
                            { option }
                        </button>
                    }
                })
            }
        </div>
    }
}

fn render_submission(
    gate: &SubmissionGate,
    on_id_input: &Callback<InputEvent>,
    on_word_input: &Callback<InputEvent>,
    on_submit: &Callback<MouseEvent>,
) -> Html {
    html! {
        <section id="submission">
            <div class="row">
                <div>
                    <label for="idNumber">{"Employee ID"}</label>
                    <input
                        id="idNumber"
                        type="text"
                        inputmode="numeric"
                        placeholder="12345"
                        oninput={on_id_input.clone()}
                    />
                </div>
                <div>
                    <label for="wordOfDay">{"Word of the day"}</label>
                    <input
                        id="wordOfDay"
                        type="text"
                        placeholder="gear"
                        oninput={on_word_input.clone()}
                    />
                </div>
            </div>
            <button
                id="submit"
                class="btn btn-primary"
                onclick={on_submit.clone()}
                disabled={gate.is_disabled()}
            >
                {"Submit"}
            </button>
            <div id="submitFeedback" class="status-line">
                { gate.status().unwrap_or_default() }
            </div>
        </section>
    }
}

// --- Browser helpers ------------------------------------------------------------

fn date_override() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get("date")
}

// -----------------------------------------------------------------------------

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
