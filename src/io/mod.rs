// Purpose - device-facing plumbing: interleaving for the output stream and
// the sample tap that feeds the display.

pub mod interleave;
#[cfg(feature = "rtrb")]
pub mod scope;

pub use interleave::{write_mono_frames, StreamRenderer};
#[cfg(feature = "rtrb")]
pub use scope::{scope_channel, ScopeReader, ScopeTap};
