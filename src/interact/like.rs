//! Like / unlike toggling.
//!
//! The state only changes after the backend confirms. A failed call leaves it
//! untouched and reports an error toast; there is no retry.

use super::Toasts;
use crate::{api::Backend, auth::AuthCookies, debug};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub is_liked: bool,
    pub like_count: u64,
}

impl LikeState {
    fn toggled(self) -> Self {
        if self.is_liked {
            Self {
                is_liked: false,
                like_count: self.like_count.saturating_sub(1),
            }
        } else {
            Self {
                is_liked: true,
                like_count: self.like_count.saturating_add(1),
            }
        }
    }
}

/// Flip the like on `post_id` and return the new state.
pub fn toggle_like(
    backend: &dyn Backend,
    auth: &AuthCookies,
    post_id: u64,
    state: LikeState,
    toasts: &mut Toasts,
) -> LikeState {
    if !auth.has_token() {
        toasts.error("Log in to like posts");
        return state;
    }

    let result = if state.is_liked {
        backend.unlike_post(auth, post_id)
    } else {
        backend.like_post(auth, post_id)
    };

    match result {
        Ok(()) => {
            let next = state.toggled();
            toasts.success(if next.is_liked { "Liked" } else { "Like removed" });
            next
        }
        Err(e) => {
            debug!("like"; "post {} toggle failed: {}", post_id, e);
            toasts.error(if state.is_liked {
                "Failed to remove like"
            } else {
                "Failed to like post"
            });
            state
        }
    }
}
