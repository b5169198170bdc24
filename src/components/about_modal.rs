use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AboutModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
}

#[function_component(AboutModal)]
pub fn about_modal(props: &AboutModalProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_cb = props.on_close.clone();
    let close_btn = Callback::from(move |_| close_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4; z-index:40;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{"SWR Area Editor"}</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{ format!("Version {}", env!("CARGO_PKG_VERSION")) }</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"Open an area file (.yaml) or start typing a new one."}</li>
                <li>{"Switch to the map to see rooms laid out by their compass exits."}</li>
                <li>{"Click a room on the map to jump to its text."}</li>
                <li>{"Exits to rooms that do not exist are drawn but lead nowhere."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={close_btn}>{"Close"}</button>
            </div>
        </div>
    }
}
