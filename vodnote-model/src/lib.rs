//! Core data model definitions shared across Vodnote crates.

pub mod note;
pub mod prelude;
pub mod session;
pub mod url_state;
pub mod video;

pub use note::Note;
pub use session::Vodding;
pub use url_state::UrlState;
pub use video::{Provider, Video};
