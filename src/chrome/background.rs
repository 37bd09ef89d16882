//! Page background overlay.

use crate::utils::{html::escape_attr, url::encode_css_url};
use std::ops::{Deref, DerefMut};

/// HTML fragment placed behind the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay(String);

impl Overlay {
    /// Full-bleed cover image.
    ///
    /// The URL is percent-encoded for the CSS string first; attribute
    /// escaping alone is undone by the HTML parser before CSS sees it.
    pub fn image(url: &str) -> Self {
        Self(format!(
            r#"<div class="bg-overlay" style="background-image:url('{}')"></div>"#,
            escape_attr(&encode_css_url(url))
        ))
    }

    /// Trusted HTML, used as-is.
    pub fn html(fragment: impl Into<String>) -> Self {
        Self(fragment.into())
    }

    pub fn as_html(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    overlay: Option<Overlay>,
}

impl Background {
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn set_background(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    pub fn reset_background(&mut self) {
        self.overlay = None;
    }

    /// Show `overlay` until the lease is released.
    pub fn acquire(&mut self, overlay: Overlay) -> BackgroundLease<'_> {
        self.set_background(overlay);
        BackgroundLease { background: self }
    }
}

/// Scoped background. Releasing (or dropping) it removes the overlay.
#[must_use = "dropping the lease removes the overlay immediately"]
pub struct BackgroundLease<'a> {
    background: &'a mut Background,
}

impl BackgroundLease<'_> {
    pub fn release(self) {}
}

impl Deref for BackgroundLease<'_> {
    type Target = Background;

    fn deref(&self) -> &Background {
        self.background
    }
}

impl DerefMut for BackgroundLease<'_> {
    fn deref_mut(&mut self) -> &mut Background {
        self.background
    }
}

impl Drop for BackgroundLease<'_> {
    fn drop(&mut self) {
        self.background.reset_background();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_reset() {
        let mut bg = Background::default();
        assert!(bg.overlay().is_none());
        bg.set_background(Overlay::html("<div></div>"));
        assert_eq!(bg.overlay().map(Overlay::as_html), Some("<div></div>"));
        bg.reset_background();
        assert!(bg.overlay().is_none());
    }

    #[test]
    fn test_image_overlay_cannot_leave_css_string() {
        let overlay = Overlay::image("/a.png');color:red;x:url('<script>");
        let html = overlay.as_html();
        assert!(html.contains("url('/a.png%27%29;color:red;x:url%28%27%3Cscript%3E')"));
        assert!(!html.contains("&#39;"));
        assert_eq!(html.matches('\'').count(), 2);
    }

    #[test]
    fn test_image_overlay_keeps_query() {
        let overlay = Overlay::image("/c.png?w=1&h=2");
        assert!(overlay.as_html().contains("url('/c.png?w=1&amp;h=2')"));
    }

    #[test]
    fn test_lease_removes_overlay() {
        let mut bg = Background::default();
        let lease = bg.acquire(Overlay::image("/cover.jpg"));
        assert!(lease.overlay().is_some());
        lease.release();
        assert!(bg.overlay().is_none());

        {
            let _lease = bg.acquire(Overlay::html("x"));
        }
        assert!(bg.overlay().is_none());
    }
}
