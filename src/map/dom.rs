use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};
use yew::Callback;

use super::renderer::{MapSurface, Point, RoomGlyph};
use crate::model::Room;
use crate::util::js_error;

type ClickListener = Closure<dyn FnMut(MouseEvent)>;

/// Canvas for fills and lines, one positioned `<div>` per room for the
/// label and click target. The canvas is created once and reused.
pub struct DomSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    listeners: Vec<ClickListener>,
    // Handlers of the previous draw; one of them may still be running
    // when its click triggers the next draw.
    retired: Vec<ClickListener>,
}

impl DomSurface {
    pub fn new(container: HtmlElement) -> Option<Self> {
        let document = container.owner_document()?;
        let canvas = document
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        canvas.set_width(container.client_width().max(0) as u32);
        canvas.set_height(container.client_height().max(0) as u32);
        canvas
            .set_attribute("style", "position:absolute; left:0; top:0; display:block;")
            .ok()?;
        container.append_child(&canvas).ok()?;
        Some(Self {
            container,
            canvas,
            listeners: Vec::new(),
            retired: Vec::new(),
        })
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()
    }

    fn overlay(&self, glyph: &RoomGlyph<'_>) -> Result<HtmlElement, String> {
        let document = self
            .container
            .owner_document()
            .ok_or("container is detached")?;
        let el = document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "not an html element".to_string())?;
        let half = glyph.size / 2.0;
        let border = if glyph.focused { "#58a6ff" } else { "#30363d" };
        el.set_attribute(
            "style",
            &format!(
                "position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; \
                 box-sizing:border-box; border:2px solid {}; color:#ff9933; \
                 font-size:11px; line-height:1.1; padding:2px; overflow:hidden; \
                 cursor:pointer; user-select:none;",
                glyph.center.x - half,
                glyph.center.y - half,
                glyph.size,
                glyph.size,
                border
            ),
        )
        .map_err(js_error)?;
        el.set_class_name("map-room");
        el.set_text_content(Some(&glyph.room.id));
        if !glyph.room.name.is_empty() {
            el.set_title(&glyph.room.name);
        }
        Ok(el)
    }
}

impl MapSurface for DomSurface {
    fn reset(&mut self) {
        self.container.set_inner_html("");
        if let Err(e) = self.container.append_child(&self.canvas) {
            log::warn!("could not re-attach map canvas: {}", js_error(e));
        }
        self.retired = std::mem::take(&mut self.listeners);
    }

    fn measure(&self) -> (f64, f64) {
        (
            self.container.client_width().max(0) as f64,
            self.container.client_height().max(0) as f64,
        )
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        if let Some(ctx) = self.context() {
            ctx.clear_rect(0.0, 0.0, width, height);
        }
    }

    fn fill_room(&mut self, glyph: &RoomGlyph<'_>) {
        let Some(ctx) = self.context() else { return };
        let half = glyph.size / 2.0;
        ctx.set_fill_style_str(if glyph.focused { "#1f6feb" } else { "#3c4454" });
        ctx.fill_rect(
            glyph.center.x - half,
            glyph.center.y - half,
            glyph.size,
            glyph.size,
        );
    }

    fn stroke_exit(&mut self, from: Point, to: Point) {
        let Some(ctx) = self.context() else { return };
        ctx.set_stroke_style_str("#c9d1d9");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }

    fn attach_room(&mut self, glyph: &RoomGlyph<'_>, on_click: Callback<Room>) {
        let el = match self.overlay(glyph) {
            Ok(el) => el,
            Err(e) => {
                log::warn!("room {}: no overlay: {}", glyph.room.id, e);
                return;
            }
        };
        let room = glyph.room.clone();
        let listener: ClickListener = Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            on_click.emit(room.clone());
        }) as Box<dyn FnMut(_)>);
        if let Err(e) =
            el.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        {
            log::warn!("room {}: click handler not attached: {}", glyph.room.id, js_error(e));
        }
        if let Err(e) = self.container.append_child(&el) {
            log::warn!("room {}: overlay not attached: {}", glyph.room.id, js_error(e));
        }
        self.listeners.push(listener);
    }
}
