//! Language picker: a row of pills for the common languages, a "more"
//! dropdown for the rest, and a hidden `<select>` mirroring the choice.

use leptos::ev;
use leptos::prelude::*;

use crate::language::{LanguageSelection, LanguageTag};
use crate::state::ReviewState;

const PILLS: [LanguageSelection; 6] = [
    LanguageSelection::Auto,
    LanguageSelection::Tag(LanguageTag::Python),
    LanguageSelection::Tag(LanguageTag::Javascript),
    LanguageSelection::Tag(LanguageTag::Typescript),
    LanguageSelection::Tag(LanguageTag::Java),
    LanguageSelection::Tag(LanguageTag::Sql),
];

const MORE: [LanguageTag; 4] = [
    LanguageTag::Csharp,
    LanguageTag::React,
    LanguageTag::Delphi,
    LanguageTag::Nosql,
];

fn pill_label(selection: LanguageSelection) -> &'static str {
    match selection {
        LanguageSelection::Auto => "Auto",
        LanguageSelection::Tag(tag) => tag.display_name(),
    }
}

#[component]
pub fn LanguagePicker(
    /// Called with every user choice, already-active ones included.
    #[prop(into)]
    on_select: Callback<LanguageSelection>,
) -> impl IntoView {
    let review = expect_context::<RwSignal<ReviewState>>();
    let selection = move || review.with(|state| state.selection());
    let (dropdown_open, set_dropdown_open) = signal(false);

    // Any click outside the toggle closes the dropdown
    let handle = window_event_listener(ev::click, move |_| set_dropdown_open.set(false));
    on_cleanup(move || handle.remove());

    let pills = PILLS
        .into_iter()
        .map(|choice| {
            let class = move || {
                if selection() == choice {
                    "lang-pill active"
                } else {
                    "lang-pill"
                }
            };
            view! {
                <button
                    type="button"
                    class=class
                    data-lang=choice.as_str()
                    on:click=move |_| on_select.run(choice)
                >
                    {pill_label(choice)}
                </button>
            }
        })
        .collect::<Vec<_>>();

    let more_options = MORE
        .into_iter()
        .map(|tag| {
            let choice = LanguageSelection::Tag(tag);
            let class = move || {
                if selection() == choice {
                    "lang-option active"
                } else {
                    "lang-option"
                }
            };
            view! {
                <li
                    class=class
                    data-lang=tag.as_str()
                    on:click=move |_| {
                        set_dropdown_open.set(false);
                        on_select.run(choice);
                    }
                >
                    {tag.display_name()}
                </li>
            }
        })
        .collect::<Vec<_>>();

    let more_label = move || match selection() {
        LanguageSelection::Tag(tag) if MORE.contains(&tag) => tag.display_name(),
        _ => "More",
    };

    view! {
        <div class="language-picker">
            <div class="lang-pills">
                {pills}
                <div class="more-langs">
                    <button
                        type="button"
                        class=move || {
                            if selection().tag().is_some_and(|t| MORE.contains(&t)) {
                                "lang-pill more-btn active"
                            } else {
                                "lang-pill more-btn"
                            }
                        }
                        on:click=move |e: ev::MouseEvent| {
                            e.stop_propagation();
                            set_dropdown_open.update(|open| *open = !*open);
                        }
                    >
                        {more_label} " \u{25BE}"
                    </button>
                    <ul class=move || {
                        if dropdown_open.get() { "more-langs-dropdown show" } else { "more-langs-dropdown" }
                    }>
                        {more_options}
                    </ul>
                </div>
            </div>

            <select
                id="language-select"
                class="d-none"
                prop:value=move || selection().as_str()
                on:change=move |e| {
                    if let Some(choice) = LanguageSelection::parse(&event_target_value(&e)) {
                        on_select.run(choice);
                    }
                }
            >
                <option value="auto">"Auto"</option>
                {LanguageTag::ALL
                    .into_iter()
                    .map(|tag| view! { <option value=tag.as_str()>{tag.display_name()}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}
