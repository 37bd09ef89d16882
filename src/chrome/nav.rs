//! Navigation bar chrome.
//!
//! The nav class is always `baseline` plus one override fragment:
//!
//! | Transition              | Resulting class                  |
//! |-------------------------|----------------------------------|
//! | `new` / `reset_nav_style` | `baseline initial_override`    |
//! | `set_nav_style(extra)`  | `baseline extra`                 |
//! | `set_transparent_nav`   | `baseline nav-transparent`       |
//! | `set_solid_nav`         | `baseline nav-solid`             |

use std::ops::{Deref, DerefMut};

pub const TRANSPARENT_NAV: &str = "nav-transparent";
pub const SOLID_NAV: &str = "nav-solid";

/// Appearance a page asks for while it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavStyle {
    Transparent,
    Solid,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavChrome {
    baseline: String,
    initial_override: String,
    class_name: String,
    has_padding: bool,
}

impl NavChrome {
    pub fn new(baseline: &str, initial_override: &str, has_padding: bool) -> Self {
        Self {
            baseline: baseline.to_string(),
            initial_override: initial_override.to_string(),
            class_name: compose(baseline, initial_override),
            has_padding,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn has_padding(&self) -> bool {
        self.has_padding
    }

    pub fn set_nav_style(&mut self, extra: &str) {
        self.class_name = compose(&self.baseline, extra);
    }

    pub fn reset_nav_style(&mut self) {
        self.class_name = compose(&self.baseline, &self.initial_override);
    }

    pub fn set_transparent_nav(&mut self) {
        self.set_nav_style(TRANSPARENT_NAV);
    }

    pub fn set_solid_nav(&mut self) {
        self.set_nav_style(SOLID_NAV);
    }

    pub fn set_has_nav_padding(&mut self, has_padding: bool) {
        self.has_padding = has_padding;
    }

    fn apply(&mut self, style: &NavStyle) {
        match style {
            NavStyle::Transparent => self.set_transparent_nav(),
            NavStyle::Solid => self.set_solid_nav(),
            NavStyle::Custom(extra) => self.set_nav_style(extra),
        }
    }

    /// Apply `style` (and optionally padding) until the lease is released.
    pub fn acquire(&mut self, style: NavStyle, has_padding: Option<bool>) -> NavLease<'_> {
        let prev_padding = self.has_padding;
        self.apply(&style);
        if let Some(padding) = has_padding {
            self.set_has_nav_padding(padding);
        }
        NavLease {
            nav: self,
            prev_padding,
        }
    }
}

/// `baseline` and `extra` joined by a space, skipping empty parts.
fn compose(baseline: &str, extra: &str) -> String {
    match (baseline.trim(), extra.trim()) {
        (b, "") => b.to_string(),
        ("", e) => e.to_string(),
        (b, e) => format!("{b} {e}"),
    }
}

/// Scoped nav override. Releasing (or dropping) it resets the nav style and
/// restores the padding seen at acquisition.
#[must_use = "dropping the lease resets the nav immediately"]
pub struct NavLease<'a> {
    nav: &'a mut NavChrome,
    prev_padding: bool,
}

impl NavLease<'_> {
    pub fn release(self) {}
}

impl Deref for NavLease<'_> {
    type Target = NavChrome;

    fn deref(&self) -> &NavChrome {
        self.nav
    }
}

impl DerefMut for NavLease<'_> {
    fn deref_mut(&mut self) -> &mut NavChrome {
        self.nav
    }
}

impl Drop for NavLease<'_> {
    fn drop(&mut self) {
        self.nav.reset_nav_style();
        self.nav.has_padding = self.prev_padding;
    }
}
