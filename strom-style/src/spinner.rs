//! Spinner style preset.
//!
//! Produces class names and CSS only; attaching them to an element is the
//! rendering layer's business.

use crate::{params::StyleParams, sheet::StyleSheet, theme::Theme};

const FOUNDATION: &str = "display: inline-block;\n\
border-color: currentColor;\n\
border-style: solid;\n\
border-radius: 99999px;\n\
border-bottom-color: transparent;\n\
border-left-color: transparent;\n\
color: currentColor;";

const LOADING_KEYFRAMES: &str = "@keyframes loading {\n\
from { transform: rotate(0deg); }\n\
to { transform: rotate(360deg); }\n\
}\n";

/// The parametric part of the spinner: rotation plus border width.
pub fn spinner_style(border_width: &str) -> StyleParams {
    StyleParams::new()
        .css("animation: loading 0.6s linear infinite;")
        .border_width(border_width)
        .width("1rem")
        .height("1rem")
}

/// Registers the spinner's foundation and parametric styles, returning the
/// combined class attribute value.
pub fn spinner_class(sheet: &StyleSheet, theme: &Theme, border_width: &str) -> String {
    sheet.static_rule("loading-keyframes", LOADING_KEYFRAMES.to_owned());
    let foundation = sheet.static_style("spinner", FOUNDATION);
    let parametric = sheet.add(&spinner_style(border_width), theme);
    format!("{foundation} {parametric}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_classes_are_stable() {
        let theme = Theme::default();
        let sheet = StyleSheet::new();
        let a = spinner_class(&sheet, &theme, "2px");
        let b = spinner_class(&sheet, &theme, "2px");
        assert_eq!(a, b);
        assert!(a.starts_with("spinner "));

        let css = sheet.css_text();
        assert!(css.contains("@keyframes loading"));
        assert!(css.contains("border-bottom-color: transparent;"));
        assert!(css.contains("animation: loading 0.6s linear infinite;"));
        assert!(css.contains("border-width: 2px;"));
    }

    #[test]
    fn border_width_distinguishes_spinners() {
        let theme = Theme::default();
        let sheet = StyleSheet::new();
        let a = spinner_class(&sheet, &theme, "2px");
        let b = spinner_class(&sheet, &theme, "4px");
        assert_ne!(a, b);
    }
}
