use dioxus::prelude::*;

use ui::components::AppNavbar;
use ui::core::DashboardConfig;
use ui::views::{Home, Subject};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/subject/:id")]
    Subject { id: String },
}

const MAIN_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    tracing_wasm::set_as_global_default();
    tracing::info!(source = %DashboardConfig::bundled().source, "web dashboard starting");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    use_context_provider(DashboardConfig::bundled);
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{MAIN_CSS}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared header, which needs the
/// web-specific `Route` enum for its links.
#[component]
fn WebNavbar() -> Element {
    let home = ui::i18n::nav_home_label();

    rsx! {
        AppNavbar {
            Link { class: "navbar__link", to: Route::Home {}, "{home}" }
        }
        Outlet::<Route> {}
    }
}
