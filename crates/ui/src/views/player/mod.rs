mod lesson;
mod quiz_panel;
mod view;

pub use view::PlayerView;
