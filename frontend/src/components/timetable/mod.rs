//! Timetable page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and helpers.
//!
//! On first render the current metadata is fetched; everything after that is
//! driven by `Msg`.

use yew::prelude::*;

mod dialogs;
mod helpers;
mod messages;
mod state;
mod toasts;
mod update;
mod view;

pub use messages::Msg;
pub use state::TimetableComponent;

impl Component for TimetableComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        TimetableComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Refresh);
        }
    }
}
