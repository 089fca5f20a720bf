//! View rendering for the timetable page.
//!
//! Layout: toast stack (fixed, top right), header, the main card with the
//! refresh button and one of loading / error / content, the admin entry
//! point in the footer, and the admin dialog when open.

use yew::html::Scope;
use yew::prelude::*;

use common::model::timetable::TimetableMetadata;
use common::shell::RenderState;

use super::dialogs::admin::admin_dialog;
use super::helpers::{action_button, format_last_updated};
use super::messages::Msg;
use super::state::TimetableComponent;
use super::toasts::toast_stack;

pub fn view(component: &TimetableComponent, ctx: &Context<TimetableComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="page">
            { toast_stack(component, link) }
            <div class="container">
                <header class="page-header">
                    <h1>{ "Weekly Timetable" }</h1>
                </header>

                <main class="card">
                    { refresh_button(component, link) }
                    { card_body(component, link) }
                </main>

                <footer class="page-footer">
                    <button class="link-btn" onclick={link.callback(|_| Msg::OpenAdmin)}>
                        { "Admin Panel" }
                    </button>
                </footer>
            </div>
            { admin_dialog(component, link) }
        </div>
    }
}

/// Disabled while a fetch is in flight, so a second one is never started
/// from here.
fn refresh_button(component: &TimetableComponent, link: &Scope<TimetableComponent>) -> Html {
    let fetching = component.shell.is_fetching();
    html! {
        <button
            class={classes!("refresh-btn", fetching.then_some("spinning"))}
            disabled={fetching}
            aria-label="Refresh timetable"
            onclick={link.callback(|_| Msg::Refresh)}
        >
            { "⟳" }
        </button>
    }
}

fn card_body(component: &TimetableComponent, link: &Scope<TimetableComponent>) -> Html {
    match component.shell.render_state() {
        RenderState::Loading => html! {
            <div class="card-state loading">
                <span class="spinner large" aria-hidden="true"></span>
                <p>{ "Loading latest timetable..." }</p>
            </div>
        },
        RenderState::ErrorNoData(message) => html! {
            <div class="card-state error">
                <p>{ message.to_string() }</p>
                { action_button("Retry", false, false, link.callback(|_| Msg::Refresh)) }
            </div>
        },
        RenderState::Content(metadata) => content(metadata),
    }
}

fn content(metadata: &TimetableMetadata) -> Html {
    html! {
        <>
            <a class="download-link" href={metadata.file_location.clone()} target="_blank" rel="noopener noreferrer">
                <button class="btn btn-primary btn-large">{ "Download weekly PDF (Mon–Fri)" }</button>
            </a>
            <p class="last-updated">
                { format!("Last updated: {}", format_last_updated(&metadata.last_updated)) }
            </p>
        </>
    }
}
