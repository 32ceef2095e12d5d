pub mod automator;
pub mod delay;
pub mod delay_engine;
pub mod mid_side;
pub mod xtc;

pub use automator::Automator;
pub use delay::Delay;
pub use delay_engine::DelayEngine;
pub use mid_side::MidSide;
pub use xtc::Crossfeed;
