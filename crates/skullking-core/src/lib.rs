#![deny(warnings)]
pub mod game;
pub mod history;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "skullking"
    }

    pub const fn codename() -> &'static str {
        "Score Keeper"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
