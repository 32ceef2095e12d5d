use std::any::Any;

use rustc_hash::FxHashMap;

use crate::params::{self, ParamDescriptor};
use crate::traits::{input_channel_count, AudioNode, PortId};

pub const NODE_TYPE: &str = "midSide";

pub const PARAMETERS: &[ParamDescriptor] = &[
    ParamDescriptor::new("midGain", 1.0, -1.0, 1.0),
    ParamDescriptor::new("sideGain", 1.0, -1.0, 1.0),
];

/// L/R -> mid/side -> L/R, with independent gain on each derived channel.
/// Uses the halved symmetric convention so the round trip is the identity
/// at unit gains.
#[inline(always)]
pub fn encode(left: f32, right: f32, mid_gain: f32, side_gain: f32) -> (f32, f32) {
    let mid = 0.5 * (left + right);
    let side = 0.5 * (right - left);
    (mid_gain * mid, side_gain * side)
}

#[inline(always)]
pub fn decode(mid: f32, side: f32) -> (f32, f32) {
    (mid - side, mid + side)
}

/// Stateless mid/side width processor; the two gains are the only state and
/// are sampled once per block. Requires exactly two channels.
pub struct MidSide {
    enabled: bool,
    mid_gain: f32,
    side_gain: f32,
}

impl MidSide {
    pub fn new() -> Self {
        Self {
            enabled: true,
            mid_gain: 1.0,
            side_gain: 1.0,
        }
    }

    pub fn set_mid_gain(&mut self, gain: f32) {
        self.mid_gain = gain.clamp(-1.0, 1.0);
    }

    pub fn set_side_gain(&mut self, gain: f32) {
        self.side_gain = gain.clamp(-1.0, 1.0);
    }
}

impl Default for MidSide {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioNode for MidSide {
    fn get_ports(&self) -> FxHashMap<PortId, bool> {
        FxHashMap::from_iter([
            (PortId::AudioInput0, false),
            (PortId::AudioInput1, false),
            (PortId::AudioOutput0, true),
            (PortId::AudioOutput1, true),
        ])
    }

    fn process(
        &mut self,
        inputs: &FxHashMap<PortId, &[f32]>,
        outputs: &mut FxHashMap<PortId, &mut [f32]>,
        buffer_size: usize,
    ) {
        let outs = outputs.get_disjoint_mut([&PortId::AudioOutput0, &PortId::AudioOutput1]);
        let [Some(out_left), Some(out_right)] = outs else {
            eprintln!("MidSide error: missing stereo output buffers");
            return;
        };
        let out_left = &mut out_left[..buffer_size];
        let out_right = &mut out_right[..buffer_size];

        if input_channel_count(inputs) != 2 {
            eprintln!(
                "MidSide error: channel count must be 2, got {}",
                input_channel_count(inputs)
            );
            out_left.fill(0.0);
            out_right.fill(0.0);
            return;
        }
        let left_in = &inputs[&PortId::AudioInput0][..buffer_size];
        let right_in = &inputs[&PortId::AudioInput1][..buffer_size];

        let mid_gain = self.mid_gain;
        let side_gain = self.side_gain;

        for i in 0..buffer_size {
            let (mid, side) = encode(left_in[i], right_in[i], mid_gain, side_gain);
            let (left, right) = decode(mid, side);
            out_left[i] = left;
            out_right[i] = right;
        }
    }

    fn reset(&mut self) {}

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn set_active(&mut self, active: bool) {
        self.enabled = active;
    }

    fn node_type(&self) -> &str {
        NODE_TYPE
    }

    fn parameter_descriptors(&self) -> &'static [ParamDescriptor] {
        PARAMETERS
    }

    fn set_parameter(&mut self, name: &str, value: f32) {
        let Some(descriptor) = params::descriptor(PARAMETERS, name) else {
            return;
        };
        let value = descriptor.clamp(value);
        match name {
            "midGain" => self.mid_gain = value,
            "sideGain" => self.side_gain = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_identity_at_unit_gains() {
        for (left, right) in [(0.0, 0.0), (1.0, -1.0), (0.3, 0.7), (-0.25, -0.75)] {
            let (mid, side) = encode(left, right, 1.0, 1.0);
            let (l, r) = decode(mid, side);
            assert!((l - left).abs() < 1e-6);
            assert!((r - right).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_side_gain_collapses_to_mono() {
        let (mid, side) = encode(0.8, 0.2, 1.0, 0.0);
        let (l, r) = decode(mid, side);
        assert_eq!(side, 0.0);
        assert!((l - 0.5).abs() < 1e-6);
        assert!((r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn node_processes_per_sample() {
        let mut node = MidSide::new();
        node.set_parameter("sideGain", 0.0);
        let left = vec![1.0; 16];
        let right = vec![0.0; 16];
        let mut out_left = vec![0.0; 16];
        let mut out_right = vec![0.0; 16];
        let mut inputs: FxHashMap<PortId, &[f32]> = FxHashMap::default();
        inputs.insert(PortId::AudioInput0, &left[..]);
        inputs.insert(PortId::AudioInput1, &right[..]);
        let mut outputs: FxHashMap<PortId, &mut [f32]> = FxHashMap::default();
        outputs.insert(PortId::AudioOutput0, &mut out_left[..]);
        outputs.insert(PortId::AudioOutput1, &mut out_right[..]);
        node.process(&inputs, &mut outputs, 16);
        assert!(out_left.iter().all(|&x| (x - 0.5).abs() < 1e-6));
        assert!(out_right.iter().all(|&x| (x - 0.5).abs() < 1e-6));
    }

    #[test]
    fn mono_input_reports_and_emits_silence() {
        let mut node = MidSide::new();
        let input = vec![1.0; 8];
        let mut out_left = vec![3.0; 8];
        let mut out_right = vec![3.0; 8];
        let mut inputs: FxHashMap<PortId, &[f32]> = FxHashMap::default();
        inputs.insert(PortId::AudioInput0, &input[..]);
        let mut outputs: FxHashMap<PortId, &mut [f32]> = FxHashMap::default();
        outputs.insert(PortId::AudioOutput0, &mut out_left[..]);
        outputs.insert(PortId::AudioOutput1, &mut out_right[..]);
        node.process(&inputs, &mut outputs, 8);
        assert!(out_left.iter().all(|&x| x == 0.0));
        assert!(out_right.iter().all(|&x| x == 0.0));
    }
}
