//! Utility modules.

pub mod debug;
pub mod platform;

pub use debug::init_debug_logging;
pub use platform::{get_arch, kernel_release};
