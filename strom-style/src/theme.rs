//! Theme data consulted by styling functions.

use serde::{Deserialize, Serialize};

/// Mobile-first breakpoint table: `sm` styles apply unprefixed, the rest
/// under `@media (min-width: ...)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

/// Explicit theme value, passed into the styling functions that need it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub breakpoints: Breakpoints,
    /// Brightness factor applied by [`hover`](crate::color::hover), > 1.
    pub hover_brightness: f64,
    /// Brightness factor applied by [`darken`](crate::color::darken), < 1.
    pub hover_darkness: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            breakpoints: Breakpoints {
                sm: "30em".to_owned(),
                md: "48em".to_owned(),
                lg: "62em".to_owned(),
                xl: "80em".to_owned(),
            },
            hover_brightness: 1.3,
            hover_darkness: 0.7,
        }
    }
}
