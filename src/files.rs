// Opening and saving area files through the browser's own pickers.
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, FileReader, HtmlAnchorElement, HtmlInputElement, Url};
use yew::Callback;

use crate::util::js_error;

pub const AREA_EXTENSIONS: &str = ".yaml,.yml";
pub const DEFAULT_FILE_NAME: &str = "area.yaml";
const REVOKE_DELAY_MS: i32 = 10_000;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("no browser window")]
    NoWindow,
    #[error("browser refused: {0}")]
    Dom(String),
}

impl From<JsValue> for FileError {
    fn from(value: JsValue) -> Self {
        FileError::Dom(js_error(value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedFile {
    pub name: String,
    pub text: String,
}

fn document() -> Result<web_sys::Document, FileError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(FileError::NoWindow)
}

/// Show the file picker. `on_open` fires once the chosen file is read; it
/// never fires if the picker is dismissed.
pub fn open_file(accept: &str, on_open: Callback<OpenedFile>) -> Result<(), FileError> {
    let input = document()?
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| FileError::Dom("input is not an input element".into()))?;
    input.set_type("file");
    input.set_accept(accept);

    // One handler serves both `change` and `cancel`; exactly one of them fires
    // per pick, which frees it. Browsers without a `cancel` event keep the
    // handler of a dismissed picker alive with its detached input.
    let picker = input.clone();
    let on_change = Closure::once_into_js(move |_e: web_sys::Event| {
        let Some(file) = picker.files().and_then(|files| files.get(0)) else {
            log::debug!("open cancelled");
            return;
        };
        let reader = match FileReader::new() {
            Ok(r) => r,
            Err(e) => {
                log::error!("no file reader: {}", js_error(e));
                return;
            }
        };
        let name = file.name();
        let done = reader.clone();
        let on_load = Closure::once_into_js(move |_e: web_sys::Event| {
            match done.result().ok().and_then(|v| v.as_string()) {
                Some(text) => on_open.emit(OpenedFile { name, text }),
                None => log::error!("{name} is not readable as text"),
            }
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        if let Err(e) = reader.read_as_text(&file) {
            log::error!("reading {} failed: {}", file.name(), js_error(e));
        }
    });
    input.add_event_listener_with_callback("change", on_change.unchecked_ref())?;
    input.add_event_listener_with_callback("cancel", on_change.unchecked_ref())?;
    input.click();
    Ok(())
}

/// Offer `text` as a download named `name`.
pub fn save_file(name: &str, text: &str) -> Result<(), FileError> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/yaml");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor = document()?
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| FileError::Dom("a is not an anchor element".into()))?;
    anchor.set_href(&url);
    anchor.set_download(name);
    anchor.click();
    // the download starts asynchronously and fails if its url is already gone
    let expired = url;
    let revoke = Closure::once_into_js(move || {
        if let Err(e) = Url::revoke_object_url(&expired) {
            log::debug!("revoking {expired}: {}", js_error(e));
        }
    });
    web_sys::window()
        .ok_or(FileError::NoWindow)?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref(),
            REVOKE_DELAY_MS,
        )?;
    log::info!("saved {name} ({} bytes)", text.len());
    Ok(())
}
