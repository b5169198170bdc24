use yew::prelude::*;

use crate::state::View;

/// Summary of the open document shown on the right of the menu bar.
#[derive(PartialEq, Clone)]
pub struct DocumentStatus {
    pub file_name: Option<String>,
    pub area_name: String,
    pub area_details: String,
    pub rooms: usize,
    /// One "room direction -> target" line per exit leading nowhere.
    pub dangling_exits: Vec<String>,
    pub dirty: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct MenuBarProps {
    pub view: View,
    pub status: DocumentStatus,
    pub on_new: Callback<()>,
    pub on_open: Callback<()>,
    pub on_save: Callback<()>,
    pub on_toggle_view: Callback<()>,
    pub on_open_settings: Callback<()>,
    pub on_about: Callback<()>,
}

#[function_component]
pub fn MenuBar(props: &MenuBarProps) -> Html {
    let click = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let toggle_label = match props.view {
        View::Text => "Map",
        View::Map => "Text",
    };
    let s = &props.status;
    let title = format!(
        "{}{}",
        s.file_name.as_deref().unwrap_or("untitled"),
        if s.dirty { " *" } else { "" }
    );
    let mut summary = format!("{} rooms", s.rooms);
    if !s.area_name.is_empty() {
        summary = format!("{} · {}", s.area_name, summary);
    }
    html! {<div id="top-bar" style="display:flex; align-items:center; gap:6px; padding:6px 10px; background:#161b22; border-bottom:1px solid #30363d; font-size:13px;">
        <button onclick={click(&props.on_new)}>{"New"}</button>
        <button onclick={click(&props.on_open)}>{"Open"}</button>
        <button onclick={click(&props.on_save)}>{"Save"}</button>
        <span style="width:8px;"></span>
        <button onclick={click(&props.on_toggle_view)}>{ toggle_label }</button>
        <button onclick={click(&props.on_open_settings)}>{"Settings"}</button>
        <button onclick={click(&props.on_about)}>{"About"}</button>
        <span style="flex:1;"></span>
        <span style="font-weight:600;">{ title }</span>
        <span style="color:#8b949e;" title={s.area_details.clone()}>{ summary }</span>
        if !s.dangling_exits.is_empty() {
            <span style="color:#f0883e;" title={s.dangling_exits.join("\n")}>
                { format!("{} dangling exits", s.dangling_exits.len()) }
            </span>
        }
        <span style="font-size:11px; opacity:0.6;">{"Ctrl+O open · Ctrl+S save · Ctrl+M map"}</span>
    </div>}
}
