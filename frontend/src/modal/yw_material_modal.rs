use yew::{html, Callback, Component, Context, Html, MouseEvent, Properties};

/// Centered dialog over a dimmed backdrop.
///
/// Clicking the backdrop emits `on_close`; clicks inside the dialog do not
/// reach the backdrop.
pub struct YwMaterialModal;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub title: String,
    pub on_close: Callback<()>,
}

impl Component for YwMaterialModal {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_backdrop = props.on_close.reform(|_: MouseEvent| ());
        let on_close_button = props.on_close.reform(|_: MouseEvent| ());
        let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

        html! {
            <div class="modal-backdrop" onclick={on_backdrop}>
                <div class="modal" role="dialog" onclick={stop}>
                    <div class="modal-header">
                        <h3>{ props.title.clone() }</h3>
                        <button type="button" class="modal-close" aria-label="Close modal" onclick={on_close_button}>
                            { "✕" }
                        </button>
                    </div>
                    <div class="modal-body">
                        { props.children.clone() }
                    </div>
                </div>
            </div>
        }
    }
}
