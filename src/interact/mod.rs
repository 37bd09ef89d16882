//! Reader actions: likes and the toasts they report.

mod like;
mod toast;

pub use like::{LikeState, toggle_like};
pub use toast::{Toast, ToastLevel, Toasts};
