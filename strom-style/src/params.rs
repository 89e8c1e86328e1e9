//! Style parameter builder and CSS emission.

use smallvec::SmallVec;

use crate::theme::Theme;

/// A CSS property value, e.g. `"1rem"` or `"rgb(0,0,0)"`.
pub type Property = String;

/// A declaration value: one value for all media, or per-breakpoint values.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponsiveValue {
    All(Property),
    /// Slots for `sm`, `md`, `lg`, `xl`; `sm` applies unprefixed
    /// (mobile-first), the rest inside `@media (min-width: ...)` blocks.
    PerBreakpoint([Option<Property>; 4]),
}

impl From<&str> for ResponsiveValue {
    fn from(value: &str) -> Self {
        ResponsiveValue::All(value.to_owned())
    }
}

impl From<String> for ResponsiveValue {
    fn from(value: String) -> Self {
        ResponsiveValue::All(value)
    }
}

/// Builder for a per-breakpoint value.
///
/// ```
/// # use strom_style::{Responsive, StyleParams};
/// let params = StyleParams::new().width(Responsive::new().sm("100%").lg("50%"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Responsive {
    slots: [Option<Property>; 4],
}

impl Responsive {
    pub fn new() -> Responsive {
        Responsive::default()
    }

    pub fn sm(mut self, value: impl Into<Property>) -> Self {
        self.slots[0] = Some(value.into());
        self
    }

    pub fn md(mut self, value: impl Into<Property>) -> Self {
        self.slots[1] = Some(value.into());
        self
    }

    pub fn lg(mut self, value: impl Into<Property>) -> Self {
        self.slots[2] = Some(value.into());
        self
    }

    pub fn xl(mut self, value: impl Into<Property>) -> Self {
        self.slots[3] = Some(value.into());
        self
    }
}

impl From<Responsive> for ResponsiveValue {
    fn from(value: Responsive) -> Self {
        ResponsiveValue::PerBreakpoint(value.slots)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Declaration {
    property: &'static str,
    value: ResponsiveValue,
}

/// Accumulated CSS declarations for one style description.
///
/// Builder methods consume and return `self` so styles chain; the property
/// set here is deliberately small, [`StyleParams::custom`] covers the rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleParams {
    decls: SmallVec<[Declaration; 8]>,
    /// Verbatim declaration lines emitted into the base rule.
    raw: Vec<String>,
}

macro_rules! style_props {
    ($($(#[$doc:meta])* $fn_name:ident => $css_name:literal,)*) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(self, value: impl Into<ResponsiveValue>) -> Self {
                self.declare($css_name, value)
            }
        )*
    };
}

impl StyleParams {
    pub fn new() -> StyleParams {
        StyleParams::default()
    }

    fn declare(mut self, property: &'static str, value: impl Into<ResponsiveValue>) -> Self {
        self.decls.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    /// Adds a declaration for a property not covered by a builder method.
    pub fn custom(mut self, property: &'static str, value: impl Into<ResponsiveValue>) -> Self {
        self.decls.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    /// Appends verbatim CSS declarations (`"prop: value;"` lines) to the
    /// base rule, for the occasional corner the typed surface doesn't reach.
    pub fn css(mut self, declarations: impl Into<String>) -> Self {
        self.raw.push(declarations.into());
        self
    }

    style_props! {
        width => "width",
        height => "height",
        min_width => "min-width",
        max_width => "max-width",
        min_height => "min-height",
        max_height => "max-height",
        margin => "margin",
        margin_top => "margin-top",
        margin_right => "margin-right",
        margin_bottom => "margin-bottom",
        margin_left => "margin-left",
        padding => "padding",
        padding_top => "padding-top",
        padding_right => "padding-right",
        padding_bottom => "padding-bottom",
        padding_left => "padding-left",
        /// Text color.
        color => "color",
        background_color => "background-color",
        opacity => "opacity",
        display => "display",
        flex_direction => "flex-direction",
        justify_content => "justify-content",
        align_items => "align-items",
        font_size => "font-size",
        font_weight => "font-weight",
        border => "border",
        border_width => "border-width",
        border_color => "border-color",
        border_radius => "border-radius",
    }

    /// Renders the full CSS for this description under `class`: the base
    /// rule first, then one `@media` block per breakpoint that has values.
    pub fn to_css(&self, class: &str, theme: &Theme) -> String {
        let mut base = String::new();
        // md, lg, xl bodies
        let mut media = [String::new(), String::new(), String::new()];

        for decl in &self.decls {
            match &decl.value {
                ResponsiveValue::All(value) => {
                    push_decl(&mut base, decl.property, value);
                }
                ResponsiveValue::PerBreakpoint(slots) => {
                    if let Some(value) = &slots[0] {
                        push_decl(&mut base, decl.property, value);
                    }
                    for (slot, body) in slots[1..].iter().zip(media.iter_mut()) {
                        if let Some(value) = slot {
                            push_decl(body, decl.property, value);
                        }
                    }
                }
            }
        }
        for raw in &self.raw {
            base.push_str("  ");
            base.push_str(raw.trim());
            base.push('\n');
        }

        let mut css = format!(".{class} {{\n{base}}}\n");
        let min_widths = [
            &theme.breakpoints.md,
            &theme.breakpoints.lg,
            &theme.breakpoints.xl,
        ];
        for (body, min_width) in media.iter().zip(min_widths) {
            if !body.is_empty() {
                css.push_str(&format!(
                    "@media (min-width: {min_width}) {{\n.{class} {{\n{body}}}\n}}\n"
                ));
            }
        }
        css
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty() && self.raw.is_empty()
    }
}

fn push_decl(out: &mut String, property: &str, value: &str) {
    out.push_str("  ");
    out.push_str(property);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(";\n");
}
