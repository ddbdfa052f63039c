mod change_counter;
mod common;
mod local;
pub mod platform;

pub use change_counter::DigestChangeCounter;
pub use local::LocalClipboard;
