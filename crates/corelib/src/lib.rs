pub mod gfx;
#[cfg(feature = "logs")]
pub mod logger;
pub mod math;
