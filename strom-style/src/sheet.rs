//! Style registration and class-name generation.

use std::hash::Hasher;

use fnv::{FnvHashMap, FnvHasher};
use parking_lot::Mutex;

use crate::{params::StyleParams, theme::Theme};

/// Collects generated style rules and hands out class names.
///
/// A class name is derived from a content hash of the CSS a description
/// generates, so the same description (under the same theme) always maps to
/// the same class — here and in any other sheet — and re-registering it is
/// a no-op.
#[derive(Default)]
pub struct StyleSheet {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Rules in registration order, as (class, css) pairs.
    rules: Vec<(String, String)>,
    by_class: FnvHashMap<String, usize>,
}

impl StyleSheet {
    pub fn new() -> StyleSheet {
        StyleSheet::default()
    }

    /// Registers a style description and returns its class name.
    pub fn add(&self, params: &StyleParams, theme: &Theme) -> String {
        let class = class_name(params, theme);
        let mut inner = self.inner.lock();
        if !inner.by_class.contains_key(&class) {
            let css = params.to_css(&class, theme);
            tracing::debug!(class = %class, "registered style");
            let index = inner.rules.len();
            inner.rules.push((class.clone(), css));
            inner.by_class.insert(class.clone(), index);
        }
        class
    }

    /// Registers verbatim declarations under a fixed class name.
    ///
    /// Counterpart of a hand-written base style shared by all instances of
    /// a component; later registrations under the same name are ignored.
    pub fn static_style(&self, name: &str, declarations: &str) -> String {
        let css = format!(".{} {{\n{}\n}}\n", name, declarations.trim());
        self.static_rule(name, css);
        name.to_owned()
    }

    /// Registers a verbatim top-level rule (e.g. `@keyframes`) keyed by
    /// `name` for deduplication.
    pub fn static_rule(&self, name: &str, css: String) {
        let mut inner = self.inner.lock();
        if !inner.by_class.contains_key(name) {
            tracing::debug!(name = %name, "registered static rule");
            let index = inner.rules.len();
            inner.rules.push((name.to_owned(), css));
            inner.by_class.insert(name.to_owned(), index);
        }
    }

    /// The whole sheet as CSS text, rules in registration order.
    pub fn css_text(&self) -> String {
        let inner = self.inner.lock();
        inner.rules.iter().map(|(_, css)| css.as_str()).collect()
    }
}

/// Pure function from style description (plus theme) to class name.
fn class_name(params: &StyleParams, theme: &Theme) -> String {
    // Hash the CSS generated under a placeholder class; the placeholder is
    // the same for every description, so equal CSS means equal class.
    let canonical = params.to_css("\u{1}", theme);
    let mut hasher = FnvHasher::default();
    hasher.write(canonical.as_bytes());
    format!("s-{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Responsive;

    #[test]
    fn identical_params_yield_identical_class() {
        let theme = Theme::default();
        let sheet = StyleSheet::new();
        let a = sheet.add(&StyleParams::new().width("1rem"), &theme);
        let b = sheet.add(&StyleParams::new().width("1rem"), &theme);
        assert_eq!(a, b);

        // Same description in a different sheet: same class.
        let other = StyleSheet::new();
        assert_eq!(other.add(&StyleParams::new().width("1rem"), &theme), a);
    }

    #[test]
    fn different_params_yield_different_classes() {
        let theme = Theme::default();
        let sheet = StyleSheet::new();
        let a = sheet.add(&StyleParams::new().width("1rem"), &theme);
        let b = sheet.add(&StyleParams::new().width("2rem"), &theme);
        assert_ne!(a, b);
    }

    #[test]
    fn registration_is_deduplicated() {
        let theme = Theme::default();
        let sheet = StyleSheet::new();
        let params = StyleParams::new().width(Responsive::new().sm("100%").md("50%"));
        let class = sheet.add(&params, &theme);
        sheet.add(&params, &theme);

        let css = sheet.css_text();
        assert_eq!(css.matches(&class).count(), 2, "base rule plus one media block");
    }

    #[test]
    fn static_style_keeps_its_name() {
        let sheet = StyleSheet::new();
        let class = sheet.static_style("spinner", "display: inline-block;");
        assert_eq!(class, "spinner");
        assert!(sheet.css_text().contains(".spinner {"));
    }
}
