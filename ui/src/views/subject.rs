use dioxus::prelude::*;

use crate::core::{DashboardConfig, SubjectId};
use crate::dashboard::DashboardPage;

/// Deep link: dashboard opened on subject `id`. Unknown ids fall back to the
/// first subject with an error banner.
#[component]
pub fn Subject(id: String) -> Element {
    let config = use_context::<DashboardConfig>();
    tracing::debug!(subject = %id, "deep link");

    rsx! {
        DashboardPage { config: config, subject: SubjectId::new(id) }
    }
}
