//! Editor shell state: raw text, the parsed area, the selected room and
//! which view is showing. All changes go through [`EditorAction`].

use std::rc::Rc;
use yew::Reducible;

use crate::model::{load_document, Project, Room, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Text,
    Map,
}

/// Ask the text pane to find and select a room's source text. The nonce
/// makes repeated requests for the same room distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeekRequest {
    pub nonce: u64,
    pub room_id: RoomId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub text: String,
    pub file_name: Option<String>,
    /// Last successfully parsed area. Only replaced as a whole.
    pub project: Rc<Project>,
    /// Bumped every time `project` is replaced.
    pub revision: u64,
    pub current_room: Option<Room>,
    pub view: View,
    pub error: Option<String>,
    pub seek: Option<SeekRequest>,
    /// Text changed since the last open or save.
    pub dirty: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            text: String::new(),
            file_name: None,
            project: Rc::new(Project::default()),
            revision: 0,
            current_room: None,
            view: View::Text,
            error: None,
            seek: None,
            dirty: false,
        }
    }
}

pub enum EditorAction {
    NewDocument,
    Open {
        name: Option<String>,
        text: String,
        show_map: bool,
    },
    /// Like `Open`, but a broken draft still restores its text.
    RestoreDraft {
        name: Option<String>,
        text: String,
    },
    Edit(String),
    SelectRoom(Room),
    ToggleView,
    ShowError(String),
    DismissError,
    MarkSaved,
}

impl EditorState {
    fn replace_project(&mut self, project: Project) {
        let keep = self
            .current_room
            .as_ref()
            .and_then(|r| project.room(&r.id))
            .cloned();
        self.current_room = keep.or_else(|| project.first_room().cloned());
        if *self.project != project {
            self.project = Rc::new(project);
            self.revision += 1;
        }
    }

    fn next_seek(&self, room_id: RoomId) -> SeekRequest {
        SeekRequest {
            nonce: self.seek.as_ref().map_or(1, |s| s.nonce + 1),
            room_id,
        }
    }
}

impl Reducible for EditorState {
    type Action = EditorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use EditorAction::*;
        let mut new = (*self).clone();
        match action {
            NewDocument => {
                new = EditorState {
                    revision: self.revision + 1,
                    seek: self.seek.clone(),
                    ..Default::default()
                };
            }
            Open {
                name,
                text,
                show_map,
            } => match load_document(&text) {
                Ok(project) => {
                    log::info!(
                        "opened {} with {} rooms",
                        name.as_deref().unwrap_or("document"),
                        project.rooms.len()
                    );
                    new.current_room = None;
                    new.replace_project(project);
                    new.revision += 1;
                    new.text = text;
                    new.file_name = name;
                    new.error = None;
                    new.dirty = false;
                    if show_map {
                        new.view = View::Map;
                    }
                }
                Err(e) => {
                    log::warn!("open failed at {:?}:{:?}: {e}", e.line, e.column);
                    new.error = Some(format!("Could not read area: {e}"));
                }
            },
            RestoreDraft { name, text } => {
                match load_document(&text) {
                    Ok(project) => new.replace_project(project),
                    Err(e) => log::warn!("draft does not parse: {e}"),
                }
                new.text = text;
                new.file_name = name;
                new.dirty = true;
            }
            Edit(text) => {
                if text == new.text {
                    return self;
                }
                new.text = text;
                new.dirty = true;
            }
            SelectRoom(room) => {
                new.seek = Some(self.next_seek(room.id.clone()));
                new.current_room = Some(room);
            }
            ToggleView => match self.view {
                View::Map => new.view = View::Text,
                View::Text => match load_document(&self.text) {
                    Ok(project) => {
                        new.replace_project(project);
                        new.error = None;
                        new.view = View::Map;
                    }
                    Err(e) => {
                        log::warn!("map needs a valid document: {e}");
                        new.error = Some(format!("Fix the document before opening the map: {e}"));
                    }
                },
            },
            ShowError(msg) => new.error = Some(msg),
            DismissError => new.error = None,
            MarkSaved => new.dirty = false,
        }
        Rc::new(new)
    }
}
