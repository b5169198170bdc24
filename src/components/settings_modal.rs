use yew::prelude::*;

use crate::state::Settings;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_close: Callback<()>,
    pub on_change: Callback<Settings>,
    pub on_clear_draft: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle = |flip: fn(&mut Settings)| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |_| {
            let mut next = current.clone();
            flip(&mut next);
            cb.emit(next);
        })
    };
    let clear_draft_cb = {
        let cb = props.on_clear_draft.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Forget the locally stored draft? Unsaved text in the editor stays.")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };
    let s = &props.settings;

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.restore_draft} onclick={toggle(|s| s.restore_draft = !s.restore_draft)} />
                    <span>{"Restore Draft On Startup"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.open_map_after_load} onclick={toggle(|s| s.open_map_after_load = !s.open_map_after_load)} />
                    <span>{"Show Map After Opening A File"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.verbose_logging} onclick={toggle(|s| s.verbose_logging = !s.verbose_logging)} />
                    <span>{"Verbose Console Logging"}</span>
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={clear_draft_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Clear Stored Draft"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings and the draft live in this browser's local storage only."}</div>
        </div>
    </div>}
}
