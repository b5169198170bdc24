pub mod direction;
pub mod dom;
pub mod renderer;

pub use dom::DomSurface;
pub use renderer::MapRenderer;
