pub mod animation;
pub mod curtain;
pub mod driver;
pub mod timer;
pub mod wave;

#[doc(inline)]
pub use corelib::*;

#[doc(inline)]
pub use draw;

pub use animation::{AnimationHandle, WaveShiftAnimation};
pub use curtain::{ContainerIcon, FillCurtain, IconMetrics, Sector};
pub use driver::FillDriver;
pub use wave::{ShapeType, WaveConfig, WaveView};
