use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::state::SeekRequest;
use crate::text::{jump_to_room, TextArea, TextBuffer};

#[derive(Properties, PartialEq, Clone)]
pub struct TextPaneProps {
    pub text: String,
    pub seek: Option<SeekRequest>,
    pub visible: bool,
    pub on_edit: Callback<String>,
}

#[function_component(TextPane)]
pub fn text_pane(props: &TextPaneProps) -> Html {
    let textarea_ref = use_node_ref();

    // The textarea owns its value while typing; only push text in when the
    // document was replaced from outside (open, new, restore).
    {
        let textarea_ref = textarea_ref.clone();
        use_effect_with(props.text.clone(), move |text| {
            if let Some(el) = textarea_ref.cast::<HtmlTextAreaElement>() {
                let mut buffer = TextArea::new(el);
                if buffer.value() != *text {
                    buffer.set_value(text);
                }
            }
            || ()
        });
    }

    {
        let textarea_ref = textarea_ref.clone();
        use_effect_with(props.seek.clone(), move |seek| {
            if let (Some(seek), Some(el)) = (seek, textarea_ref.cast::<HtmlTextAreaElement>()) {
                let mut buffer = TextArea::new(el);
                if jump_to_room(&mut buffer, &seek.room_id).is_none() {
                    log::debug!("no source text found for room {}", seek.room_id);
                }
            }
            || ()
        });
    }

    let oninput = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let el: HtmlTextAreaElement = e.target_unchecked_into();
            on_edit.emit(el.value());
        })
    };

    let display = if props.visible { "block" } else { "none" };
    html! {
        <textarea ref={textarea_ref} id="editor" spellcheck="false" {oninput}
            style={format!("display:{display}; position:absolute; inset:0; width:100%; height:100%; box-sizing:border-box; margin:0; padding:10px 14px; border:none; outline:none; resize:none; background:#0e1116; color:#c9d1d9; font-family:monospace; font-size:13px; line-height:18px; tab-size:2; white-space:pre;")}>
        </textarea>
    }
}
