pub mod editor;
pub mod settings;

pub use editor::{EditorAction, EditorState, SeekRequest, View};
pub use settings::{Draft, DraftUpdate, Settings};
