use yew::html::Scope;
use yew::prelude::*;

use common::model::notification::{Notification, NotificationKind};

use super::messages::Msg;
use super::state::TimetableComponent;

/// Stack of live toasts, oldest on top.
pub fn toast_stack(component: &TimetableComponent, link: &Scope<TimetableComponent>) -> Html {
    html! {
        <div class="toast-stack">
            { for component.shell.notifications().iter().map(|n| toast(n, link)) }
        </div>
    }
}

fn toast(notification: &Notification, link: &Scope<TimetableComponent>) -> Html {
    let id = notification.id;
    let kind_class = match notification.kind {
        NotificationKind::Success => "toast-success",
        NotificationKind::Error => "toast-error",
    };
    html! {
        <div key={id.to_string()} class={classes!("toast", kind_class)} role="alert">
            <div class="toast-text">{ notification.text.clone() }</div>
            <button
                type="button"
                class="toast-close"
                aria-label="Close"
                onclick={link.callback(move |_| Msg::DismissToast(id))}
            >
                { "✕" }
            </button>
        </div>
    }
}
