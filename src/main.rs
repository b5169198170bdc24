mod components;
mod files;
mod map;
mod model;
mod state;
mod text;
mod util;

fn main() {
    util::init_logging(state::Settings::load().log_level());
    log::info!("swr area editor {}", env!("CARGO_PKG_VERSION"));
    yew::Renderer::<components::app::App>::new().render();
}
