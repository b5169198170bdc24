use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ErrorPopupProps {
    pub message: Option<String>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn ErrorPopup(props: &ErrorPopupProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };
    let close_cb = props.on_close.clone();
    let close_btn = Callback::from(move |_| close_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; min-width:320px; max-width:640px; z-index:60;">
            <h2 style="margin:0 0 12px 0; color:#f85149; text-align:center;">{"Error"}</h2>
            <pre style="margin:4px 0; white-space:pre-wrap; font-size:12px;">{ message.clone() }</pre>
            <div style="margin-top:16px; display:flex; justify-content:center;">
                <button onclick={close_btn}>{"OK"}</button>
            </div>
        </div>
    }
}
