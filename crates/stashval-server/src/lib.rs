pub mod api;

pub use api::{get_data, AppState};
