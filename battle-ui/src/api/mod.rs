//! HTTP API handlers for battle-ui

pub mod albums;
pub mod buildinfo;
pub mod compare;
pub mod error;
pub mod health;
pub mod ui;

pub use albums::list_albums;
pub use buildinfo::get_build_info;
pub use compare::get_comparison;
pub use error::ApiError;
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
