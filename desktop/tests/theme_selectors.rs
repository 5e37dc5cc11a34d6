#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Checks that the selectors the dashboard components rely on are still present in
the shared theme (`ui/assets/theme/main.css`), so a rename in one place without
the other fails here instead of shipping an unstyled chart or selector.

This is a substring check, not a CSS parser. When a component class is renamed,
update `REQUIRED_SELECTORS` alongside the markup.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".dashboard__header",
    ".dashboard__grid",
    ".dashboard__sidebar",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Cards
    ".dashboard-card",
    ".dashboard-card__header",
    ".dashboard-card__meta",
    ".dashboard-chart",
    ".chart",
    // Subject selector
    ".subject-selector",
    ".subject-selector__toggle",
    ".subject-selector__caption",
    ".subject-selector__menu",
    ".subject-selector__menu--open",
    ".subject-selector__item",
    ".subject-selector__item--active",
    // Demographic table
    ".metadata-table",
    ".text-capitalize",
    // Export panel
    ".export-card__actions",
    // Accessibility
    ".visually-hidden",
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars), \
         did the file get truncated or the path change?"
    );
}

#[test]
fn state_blocks_are_paired() {
    let has_loading = THEME_CSS.contains(".dashboard-state--loading");
    let has_error = THEME_CSS.contains(".dashboard-state--error");
    let has_banner = THEME_CSS.contains(".dashboard-banner");
    assert!(
        has_loading && has_error && has_banner,
        "Dashboard state selectors missing (loading: {has_loading}, error: {has_error}, banner: {has_banner})"
    );
}
