mod backend;
mod clock;
mod layer;
mod menu;
mod panel;
mod shadow;

pub use clock::Clock;
pub use panel::Panel;
