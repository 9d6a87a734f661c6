#![allow(non_snake_case)]

pub mod app;
pub mod app_state;
pub mod components;
pub mod context;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use app_state::AppState;
pub use context::{AppContext, UiApp, build_app_context};
