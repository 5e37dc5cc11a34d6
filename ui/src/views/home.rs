use dioxus::prelude::*;

use crate::core::DashboardConfig;
use crate::dashboard::DashboardPage;

/// Dashboard opened on the first subject in the dataset.
#[component]
pub fn Home() -> Element {
    let config = use_context::<DashboardConfig>();

    rsx! {
        DashboardPage { config: config }
    }
}
