use crate::app::App;

mod app;
mod components;
mod modal;
mod services;

fn main() {
    yew::Renderer::<App>::new().render();
}
