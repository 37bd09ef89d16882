//! Site info: schema, merge-with-fallback and the shared store.
//!
//! ```text
//! backend JSON ──► PartialSiteInfo ──┐
//!                                    ├─► merge_with_fallback ──► SiteInfo
//! SiteInfo::fallback() ──────────────┘
//! ```
//!
//! Every write into [`SiteInfoStore`] goes through the merge, so readers never
//! deal with missing fields.

mod info;
mod merge;
mod store;

pub use info::{
    ColorScheme, ColorSchemes, Footer, FooterLink, Metadata, Owner, PartialColorScheme,
    PartialColorSchemes, PartialFooter, PartialMetadata, PartialOwner, PartialSiteInfo,
    SiteInfo, SocialLink,
};
pub use merge::Merge;
pub use store::{RefreshTicket, SiteInfoStore};

/// Fill every gap in `partial` from `fallback`.
pub fn merge_with_fallback(partial: PartialSiteInfo, fallback: &SiteInfo) -> SiteInfo {
    SiteInfo::merge(Some(partial), fallback)
}
