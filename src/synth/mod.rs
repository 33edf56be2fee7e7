// Purpose: control plane between a UI/input thread and the audio callback.
// Start/stop requests travel over a lock-free queue; all generator state is
// mutated on the audio side only.

pub mod message;
#[cfg(feature = "rtrb")]
pub mod shared;

pub use message::{MessageReceiver, ToneMessage};
#[cfg(feature = "rtrb")]
pub use shared::{SharedTone, ToneHandle};
