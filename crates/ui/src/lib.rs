#![allow(non_snake_case)]

pub mod app;
pub mod context;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{
    AppContext, CurrentUser, SessionGuard, UiApp, build_app_context, use_session_guard,
};
