//! Small rendering helpers shared by the page, the toast stack and the admin
//! dialog.

use chrono::{DateTime, Utc};
use js_sys::{Date, Object, Reflect};
use wasm_bindgen::JsValue;
use yew::prelude::*;

/// Formats `timestamp` in the browser's time zone as `dd/mm/yyyy, hh:mm`.
pub fn format_last_updated(timestamp: &DateTime<Utc>) -> String {
    let date = Date::new(&JsValue::from_f64(timestamp.timestamp_millis() as f64));
    let options = Object::new();
    for (key, value) in [
        ("day", "2-digit"),
        ("month", "2-digit"),
        ("year", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
    ] {
        let _ = Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }
    date.to_locale_string("en-GB", &options).into()
}

/// Primary button that swaps its label for a spinner while `busy`.
pub fn action_button(label: &str, busy: bool, disabled: bool, on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="btn btn-primary" disabled={disabled || busy} onclick={on_click}>
            {
                if busy {
                    html! { <span class="spinner" aria-hidden="true"></span> }
                } else {
                    html! { {label.to_string()} }
                }
            }
        </button>
    }
}
