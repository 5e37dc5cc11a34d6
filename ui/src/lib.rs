//! Shared UI crate for OtuView: data layer, chart rendering and the
//! dashboard components used by the web and desktop launchers.

pub mod charts;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}
