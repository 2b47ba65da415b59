//! Convenience re-exports for downstream crates.

pub use crate::note::Note;
pub use crate::session::Vodding;
pub use crate::url_state::UrlState;
pub use crate::video::{Provider, Video};
