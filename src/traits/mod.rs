use std::any::Any;

use rustc_hash::FxHashMap;
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::messages::{ControlMessage, RenderMessage};
use crate::params::ParamDescriptor;

#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortId {
    AudioInput0,
    AudioInput1,
    AudioOutput0,
    AudioOutput1,
}

impl PortId {
    pub fn is_audio_input(&self) -> bool {
        matches!(self, PortId::AudioInput0 | PortId::AudioInput1)
    }

    pub fn is_audio_output(&self) -> bool {
        matches!(self, PortId::AudioOutput0 | PortId::AudioOutput1)
    }

    pub fn to_input_index(&self) -> Option<usize> {
        match self {
            PortId::AudioInput0 => Some(0),
            PortId::AudioInput1 => Some(1),
            _ => None,
        }
    }

    pub fn from_input_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PortId::AudioInput0),
            1 => Some(PortId::AudioInput1),
            _ => None,
        }
    }

    pub fn from_output_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PortId::AudioOutput0),
            1 => Some(PortId::AudioOutput1),
            _ => None,
        }
    }
}

/// Number of audio channels present on the input side of a process call.
pub fn input_channel_count(inputs: &FxHashMap<PortId, &[f32]>) -> usize {
    inputs.keys().filter(|p| p.is_audio_input()).count()
}

pub trait AudioNode: Any {
    /// Port map: `true` marks an output.
    fn get_ports(&self) -> FxHashMap<PortId, bool>;

    /// Process one block. Parameter values are read once at the top of the
    /// call and held for the whole block; per-sample state is the node's own.
    fn process(
        &mut self,
        inputs: &FxHashMap<PortId, &[f32]>,
        outputs: &mut FxHashMap<PortId, &mut [f32]>,
        buffer_size: usize,
    );

    fn reset(&mut self);

    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn as_any(&self) -> &dyn Any;

    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    fn node_type(&self) -> &str;

    /// The named k-rate parameter surface this node exposes to the host.
    fn parameter_descriptors(&self) -> &'static [ParamDescriptor] {
        &[]
    }

    /// Set a named parameter. Values are clamped into the descriptor range;
    /// unknown names are ignored.
    fn set_parameter(&mut self, _name: &str, _value: f32) {}

    fn handle_message(&mut self, message: &ControlMessage) {
        match message {
            ControlMessage::SetParameter { name, value } => self.set_parameter(name, *value),
            ControlMessage::Enable { enabled } => self.set_active(*enabled),
            ControlMessage::SetTickInterval { .. } => {}
        }
    }

    /// Take any messages queued for the control side since the last drain.
    fn drain_messages(&mut self) -> Vec<RenderMessage> {
        Vec::new()
    }

    fn should_process(&self) -> bool {
        self.is_active()
    }
}
