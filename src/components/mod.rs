pub mod about_modal;
pub mod app;
pub mod error_popup;
pub mod map_view;
pub mod menu_bar;
pub mod room_panel;
pub mod settings_modal;
pub mod text_pane;
