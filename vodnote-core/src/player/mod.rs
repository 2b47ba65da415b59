//! Playback control over heterogeneous player backends.
//!
//! A mounted player may hand us a raw media element, a wrapper around a
//! provider's remote API, or a component that only exposes an accessor
//! to its internal player. The adapter presents one capability surface
//! over all of them, probing the handle's shape at call time instead of
//! assuming a fixed one. A handle that matches no known shape degrades
//! every operation to a silent no-op; a disconnected player must never
//! throw into the host.

mod adapter;
mod handle;
mod probe;

pub use adapter::PlayerAdapter;
pub use handle::{MediaElement, PlayerError, PlayerHandle, RemoteControls};
pub use probe::{PlayerShape, probe};
