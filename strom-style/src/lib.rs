//! Typed CSS-in-code styling.
//!
//! [`StyleParams`] is a chained builder accumulating CSS declarations,
//! each either one value for all media or per-breakpoint values collapsed
//! into `@media` blocks. A [`StyleSheet`] turns a style description into a
//! class name derived from a content hash of the generated CSS, so the
//! same description always yields the same class and identical styles are
//! registered once.
//!
//! There is no ambient theme: the [`Theme`] (breakpoint table and
//! brightness factors) is passed explicitly wherever it is consulted.

pub mod color;
pub mod params;
pub mod sheet;
pub mod spinner;
pub mod theme;

pub use color::{alter_brightness, darken, hover, hsl, hsla, rgb, rgba, StyleError};
pub use params::{Property, Responsive, ResponsiveValue, StyleParams};
pub use sheet::StyleSheet;
pub use theme::{Breakpoints, Theme};
