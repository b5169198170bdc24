use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::{
    about_modal::AboutModal,
    error_popup::ErrorPopup,
    map_view::MapView,
    menu_bar::{DocumentStatus, MenuBar},
    room_panel::RoomPanel,
    settings_modal::SettingsModal,
    text_pane::TextPane,
};
use crate::files::{self, OpenedFile, AREA_EXTENSIONS, DEFAULT_FILE_NAME};
use crate::model::Room;
use crate::state::{Draft, DraftUpdate, EditorAction, EditorState, Settings, View};

/// Menu actions reachable from keyboard shortcuts; refreshed every render.
#[derive(Clone)]
struct Shortcuts {
    open: Callback<()>,
    save: Callback<()>,
    toggle_view: Callback<()>,
}

#[function_component(App)]
pub fn app() -> Html {
    let editor = use_reducer(EditorState::default);
    let settings = use_state(Settings::load);
    let show_settings = use_state(|| false);
    let show_about = use_state(|| false);

    // Restore the draft of the previous session
    {
        let editor = editor.clone();
        let restore = settings.restore_draft;
        use_effect_with((), move |_| {
            if restore {
                if let Some(draft) = Draft::load() {
                    log::info!("restoring draft ({} bytes)", draft.text.len());
                    editor.dispatch(EditorAction::RestoreDraft {
                        name: draft.file_name,
                        text: draft.text,
                    });
                }
            }
            || ()
        });
    }
    // Persist the draft while there are unsaved changes, drop it once saved
    let was_dirty = use_mut_ref(|| false);
    {
        let restore = settings.restore_draft;
        let deps = (editor.text.clone(), editor.file_name.clone(), editor.dirty);
        use_effect_with(deps, move |(text, file_name, dirty)| {
            let before = std::mem::replace(&mut *was_dirty.borrow_mut(), *dirty);
            match Draft::update(before, *dirty) {
                DraftUpdate::Save if restore => Draft {
                    file_name: file_name.clone(),
                    text: text.clone(),
                }
                .save(),
                DraftUpdate::Clear => {
                    log::debug!("changes saved, dropping draft");
                    Draft::clear();
                }
                _ => {}
            }
            || ()
        });
    }
    // Persist settings and apply the log level
    {
        use_effect_with((*settings).clone(), move |s| {
            s.save();
            log::set_max_level(s.log_level());
            || ()
        });
    }

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |()| {
            if editor.dirty {
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message("Discard unsaved changes?").ok())
                    .unwrap_or(true);
                if !confirmed {
                    return;
                }
            }
            Draft::clear();
            editor.dispatch(EditorAction::NewDocument);
        })
    };
    let on_open = {
        let editor = editor.clone();
        let show_map = settings.open_map_after_load;
        Callback::from(move |()| {
            let dispatcher = editor.dispatcher();
            let on_file = Callback::from(move |file: OpenedFile| {
                dispatcher.dispatch(EditorAction::Open {
                    name: Some(file.name),
                    text: file.text,
                    show_map,
                });
            });
            if let Err(e) = files::open_file(AREA_EXTENSIONS, on_file) {
                log::error!("open: {e}");
                editor.dispatch(EditorAction::ShowError(format!("Could not open a file: {e}")));
            }
        })
    };
    let on_save = {
        let editor = editor.clone();
        Callback::from(move |()| {
            let name = editor.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME);
            match files::save_file(name, &editor.text) {
                Ok(()) => editor.dispatch(EditorAction::MarkSaved),
                Err(e) => {
                    log::error!("save: {e}");
                    editor.dispatch(EditorAction::ShowError(format!("Could not save: {e}")));
                }
            }
        })
    };
    let on_toggle_view = {
        let editor = editor.clone();
        Callback::from(move |()| editor.dispatch(EditorAction::ToggleView))
    };
    let on_room_click = {
        let editor = editor.clone();
        Callback::from(move |room: Room| {
            log::debug!("selected room {}", room.id);
            editor.dispatch(EditorAction::SelectRoom(room));
        })
    };
    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |text: String| editor.dispatch(EditorAction::Edit(text)))
    };
    let dismiss_error = {
        let editor = editor.clone();
        Callback::from(move |()| editor.dispatch(EditorAction::DismissError))
    };

    // Keyboard shortcuts
    let shortcuts = use_mut_ref(|| Shortcuts {
        open: on_open.clone(),
        save: on_save.clone(),
        toggle_view: on_toggle_view.clone(),
    });
    *shortcuts.borrow_mut() = Shortcuts {
        open: on_open.clone(),
        save: on_save.clone(),
        toggle_view: on_toggle_view.clone(),
    };
    {
        let shortcuts = shortcuts.clone();
        use_effect_with((), move |_| {
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if !(e.ctrl_key() || e.meta_key()) {
                    return;
                }
                let s = shortcuts.borrow().clone();
                let action = match e.key().to_ascii_lowercase().as_str() {
                    "o" => s.open,
                    "s" => s.save,
                    "m" => s.toggle_view,
                    _ => return,
                };
                e.prevent_default();
                action.emit(());
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            if let Some(w) = &window {
                let _ = w
                    .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(w) = window {
                    let _ = w.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |()| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |()| show_settings.set(false))
    };
    let change_settings = {
        let settings = settings.clone();
        Callback::from(move |s: Settings| settings.set(s))
    };
    let clear_draft = Callback::from(|()| {
        Draft::clear();
        log::info!("stored draft cleared");
    });
    let open_about = {
        let show_about = show_about.clone();
        Callback::from(move |()| show_about.set(true))
    };
    let close_about = {
        let show_about = show_about.clone();
        Callback::from(move |()| show_about.set(false))
    };

    let status = DocumentStatus {
        file_name: editor.file_name.clone(),
        area_name: editor.project.name.clone(),
        area_details: editor.project.summary(),
        rooms: editor.project.rooms.len(),
        dangling_exits: editor
            .project
            .dangling_exits()
            .iter()
            .map(|d| format!("{} {} -> {}", d.room, d.direction, d.target))
            .collect(),
        dirty: editor.dirty,
    };
    let map_visible = editor.view == View::Map;

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; display:flex; flex-direction:column; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <MenuBar view={editor.view} {status}
                {on_new} {on_open} {on_save} on_toggle_view={on_toggle_view.clone()}
                on_open_settings={open_settings} on_about={open_about} />
            <div style="position:relative; flex:1; min-height:0;">
                <TextPane text={editor.text.clone()} seek={editor.seek.clone()} visible={!map_visible} {on_edit} />
                <MapView project={editor.project.clone()} revision={editor.revision}
                    current={editor.current_room.clone()} visible={map_visible} on_room_click={on_room_click.clone()} />
                if map_visible {
                    <RoomPanel project={editor.project.clone()} room={editor.current_room.clone()} on_select={on_room_click} />
                }
            </div>
            <SettingsModal show={*show_settings} settings={(*settings).clone()} on_close={close_settings}
                on_change={change_settings} on_clear_draft={clear_draft} />
            <AboutModal show={*show_about} on_close={close_about} />
            <ErrorPopup message={editor.error.clone()} on_close={dismiss_error} />
        </div>
    }
}
