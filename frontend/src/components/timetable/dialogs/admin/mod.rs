//! Admin dialog: password form first, then the PDF picker and upload button.
//! Rendered only while the session is open; all state lives in
//! `TimetableComponent::admin`.

use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::timetable::helpers::action_button;
use crate::components::timetable::Msg::{
    CloseAdmin, FileChosen, OpenFilePicker, PasswordInput, SubmitPassword, Upload,
};
use crate::components::timetable::TimetableComponent;
use crate::modal::yw_material_modal::YwMaterialModal;

pub fn admin_dialog(component: &TimetableComponent, link: &Scope<TimetableComponent>) -> Html {
    let admin = &component.admin;
    if !admin.is_open() {
        return html! {};
    }

    let title = if admin.is_authenticated() {
        "Upload New Timetable"
    } else {
        "Admin Access"
    };
    let body = if admin.is_authenticated() {
        upload_form(component, link)
    } else {
        password_form(component, link)
    };

    html! {
        <YwMaterialModal title={title.to_string()} on_close={link.callback(|_| CloseAdmin)}>
            { body }
        </YwMaterialModal>
    }
}

fn inline_error(message: Option<&str>) -> Html {
    match message {
        Some(text) => html! { <p class="inline-error">{ text.to_string() }</p> },
        None => html! {},
    }
}

fn password_form(component: &TimetableComponent, link: &Scope<TimetableComponent>) -> Html {
    let admin = &component.admin;
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        SubmitPassword
    });
    let on_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        PasswordInput(input.value())
    });

    html! {
        <form class="password-form" onsubmit={on_submit}>
            <label for="password">{ "Password" }</label>
            <input
                type="password"
                id="password"
                name="password"
                required=true
                value={admin.password_input().to_string()}
                oninput={on_input}
            />
            { inline_error(admin.last_error()) }
            <button type="submit" class="btn btn-primary" disabled={admin.is_busy()}>
                { if admin.is_busy() { "Checking..." } else { "Login" } }
            </button>
        </form>
    }
}

fn upload_form(component: &TimetableComponent, link: &Scope<TimetableComponent>) -> Html {
    let admin = &component.admin;
    let on_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .and_then(|files| files.get(0))
            .map(FileChosen)
    });

    html! {
        <div class="upload-form">
            <div class="drop-zone" onclick={link.callback(|_| OpenFilePicker)}>
                <p><strong>{ "Click to upload" }</strong></p>
                <p class="hint">{ "PDF file only" }</p>
            </div>
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept="application/pdf"
                style="display:none;"
                onchange={on_change}
            />
            {
                match admin.selected_file() {
                    Some(file) => html! {
                        <p class="selected-file">{ "Selected file: " }<strong>{ file.file_name.clone() }</strong></p>
                    },
                    None => html! {},
                }
            }
            { inline_error(admin.last_error()) }
            {
                action_button(
                    if admin.is_busy() { "Uploading..." } else { "Upload & Update" },
                    admin.is_busy(),
                    admin.selected_file().is_none(),
                    link.callback(|_| Upload),
                )
            }
        </div>
    }
}
