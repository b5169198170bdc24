use std::rc::Rc;
use yew::prelude::*;

use crate::map::direction::Direction;
use crate::model::{Project, Room};

#[derive(Properties, PartialEq, Clone)]
pub struct RoomPanelProps {
    pub project: Rc<Project>,
    pub room: Option<Room>,
    pub on_select: Callback<Room>,
}

#[function_component]
pub fn RoomPanel(props: &RoomPanelProps) -> Html {
    let Some(room) = &props.room else {
        return html! {};
    };

    let panel_style = "position:absolute; right:12px; top:12px; \
        background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; \
        padding:12px 16px; min-width:220px; max-width:300px; font-size:13px; color:#c9d1d9;";
    let header_style = "font-weight:600; font-size:15px; margin-bottom:6px; display:flex; align-items:center; gap:8px;";
    let section_style = "margin-top:10px; padding-top:8px; border-top:1px solid #30363d;";
    let row_style = "display:flex; justify-content:space-between; margin:4px 0; font-size:12px;";
    let label_style = "color:#8b949e;";

    let exits = room.exits.iter().map(|exit| {
        let known = Direction::from_name(&exit.direction).is_some();
        let target = props.project.room(&exit.target).cloned();
        let value = match target {
            Some(target) => {
                let cb = props.on_select.clone();
                let onclick = Callback::from(move |_| cb.emit(target.clone()));
                html! { <button {onclick} style="padding:0 6px; font-size:12px;">{ exit.target.clone() }</button> }
            }
            None => html! {
                <span style="color:#f85149;">{ format!("{} (missing)", exit.target) }</span>
            },
        };
        let dir_style = if known { label_style } else { "color:#6e7681; font-style:italic;" };
        html! {
            <div style={row_style}>
                <span style={dir_style}>{ exit.direction.clone() }</span>
                { value }
            </div>
        }
    });

    html! {
        <div style={panel_style}>
            <div style={header_style}>
                <span style="color:#58a6ff;">{"■"}</span>
                <span>{ room.id.clone() }</span>
                if !room.name.is_empty() {
                    <span style="color:#8b949e; font-size:12px; font-weight:400;">{ room.name.clone() }</span>
                }
            </div>
            if !room.desc.is_empty() {
                <div style="font-size:11px; color:#8b949e; white-space:pre-wrap; max-height:120px; overflow:auto;">
                    { room.desc.clone() }
                </div>
            }
            if !room.flags.is_empty() {
                <div style="font-size:11px; margin-top:6px;">{ format!("Flags: {}", room.flags.join(", ")) }</div>
            }
            <div style={section_style}>
                <div style="font-weight:600; margin-bottom:4px;">{ format!("Exits ({})", room.exits.len()) }</div>
                if room.exits.is_empty() {
                    <div style="font-size:11px; color:#8b949e;">{"None"}</div>
                } else {
                    { for exits }
                }
            </div>
        </div>
    }
}
