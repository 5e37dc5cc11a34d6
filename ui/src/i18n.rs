//! Localized UI chrome for `otuview-ui`.
//!
//! Fluent bundles live under `i18n/<lang>/otuview-ui.ftl` and are embedded at
//! compile time. Chart captions and axis labels are not translated; only
//! headings, states and buttons go through [`t!`](crate::t).
//!
//! ```ignore
//! ui::i18n::init();
//! let heading = ui::t!("dashboard-title");
//! ```
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Look up a message id (optionally with Fluent arguments) in the shared
/// [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; also the file stem of every `.ftl` bundle.
const DOMAIN: &str = "otuview-ui";

pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .unwrap_or_else(|_| LanguageIdentifier::default());
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred languages. Safe to call repeatedly.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => tracing::debug!(?selected, "localization ready"),
            Err(err) => tracing::warn!(error = %err, "language selection failed, using fallback"),
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Most preferred language currently loaded.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Label of the dashboard link. Launchers build their own router links and
/// cannot run `fl!` against this crate's bundles themselves.
pub fn nav_home_label() -> String {
    crate::t!("nav-home")
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_locales_are_embedded() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn switching_language_changes_lookups() {
        init();
        set_language("es-ES").unwrap();
        assert_eq!(fl!(&*LOADER, "metadata-title"), "Información demográfica");
        set_language("en-US").unwrap();
        assert_eq!(fl!(&*LOADER, "metadata-title"), "Demographic Info");
        assert_eq!(current_language(), "en-US");
    }

    #[test]
    fn invalid_tag_is_ignored() {
        init();
        assert!(set_language("not a tag!").is_ok());
    }
}
