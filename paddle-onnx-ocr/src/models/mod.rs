mod plugin;
mod recognition;

pub use plugin::*;
pub use recognition::*;
