use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::map::{DomSurface, MapRenderer};
use crate::model::{Project, Room};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub project: Rc<Project>,
    pub revision: u64,
    pub current: Option<Room>,
    pub visible: bool,
    pub on_room_click: Callback<Room>,
}

type RendererSlot = RefCell<Option<MapRenderer<DomSurface>>>;

fn redraw(container: &NodeRef, renderer: &RendererSlot, props: &MapViewProps) {
    if !props.visible {
        return;
    }
    let mut slot = renderer.borrow_mut();
    if slot.is_none() {
        let Some(el) = container.cast::<HtmlElement>() else {
            return;
        };
        let Some(surface) = DomSurface::new(el) else {
            log::warn!("map surface could not be created");
            return;
        };
        *slot = Some(MapRenderer::initialize(surface, props.on_room_click.clone()));
    }
    let Some(r) = slot.as_mut() else { return };
    r.set_on_room_click(props.on_room_click.clone());
    // the selection may be a copy from before the last re-parse
    let start = props
        .current
        .as_ref()
        .map(|room| props.project.room(&room.id).unwrap_or(room));
    let stats = r.show(&props.project, start);
    log::debug!(
        "map: {} rooms, {} exits ({} dangling, {} ignored), last at {:?}",
        stats.rooms_drawn,
        stats.exits_drawn,
        stats.dangling_exits,
        stats.unknown_exits,
        r.last_drawn()
    );
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let container_ref = use_node_ref();
    let renderer = use_mut_ref(|| None::<MapRenderer<DomSurface>>);
    let latest = use_mut_ref(|| props.clone());
    *latest.borrow_mut() = props.clone();

    // Re-show whenever the area, the focus room or visibility changes. A
    // hidden container measures 0x0, so showing it again must re-measure.
    {
        let container_ref = container_ref.clone();
        let renderer = renderer.clone();
        let latest = latest.clone();
        let deps = (
            props.revision,
            props.current.as_ref().map(|r| r.id.clone()),
            props.visible,
        );
        use_effect_with(deps, move |_| {
            redraw(&container_ref, &renderer, &latest.borrow());
            || ()
        });
    }

    {
        let container_ref = container_ref.clone();
        let renderer = renderer.clone();
        let latest = latest.clone();
        use_effect_with((), move |_| {
            let resize_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                redraw(&container_ref, &renderer, &latest.borrow());
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            if let Some(w) = &window {
                let _ = w.add_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
            }
            move || {
                if let Some(w) = window {
                    let _ = w.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let display = if props.visible { "block" } else { "none" };
    html! {
        <div ref={container_ref} id="map-view"
            style={format!("display:{display}; position:absolute; inset:0; overflow:hidden; background:#0e1116;")}>
        </div>
    }
}
