pub mod audio;
pub mod audio_engine;
pub mod effect_stack;
pub mod messages;
pub mod nodes;
pub mod params;
pub mod traits;

pub use audio::{InterpolationMode, RingBuffer};
pub use audio_engine::AudioEngine;
pub use effect_stack::EffectStack;
pub use messages::{ControlMessage, RenderMessage};
pub use nodes::{Automator, Crossfeed, Delay, DelayEngine, MidSide};
pub use params::ParamDescriptor;
pub use traits::{AudioNode, PortId};

#[cfg(feature = "wasm")]
pub use audio_engine::EffectsEngine;
