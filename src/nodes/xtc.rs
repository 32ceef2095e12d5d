use std::any::Any;

use rustc_hash::FxHashMap;

use crate::nodes::delay_engine::DelayEngine;
use crate::params::{self, ParamDescriptor};
use crate::traits::{input_channel_count, AudioNode, PortId};

pub const NODE_TYPE: &str = "xtc";

pub const PARAMETERS: &[ParamDescriptor] = &[
    ParamDescriptor::new("delay", 0.0, 0.0, 1.0),
    ParamDescriptor::new("gain", 1.0, -1.0, 1.0),
    ParamDescriptor::new("reverseStereo", 0.0, 0.0, 1.0),
    ParamDescriptor::new("feedback", 0.0, -0.98, 0.98),
];

/// Crosstalk-cancellation filter for speaker-based binaural playback.
///
/// Each channel runs through its own short delay with feedback and is
/// blended half-and-half with the dry signal; `reverseStereo` then decides
/// which physical output channel the processed signal lands on, leaving the
/// crossfeed math itself untouched. Strictly stereo.
pub struct Crossfeed {
    enabled: bool,
    engine: DelayEngine,
    gain: f32,
    reverse_stereo: bool,
}

impl Crossfeed {
    pub fn new(sample_rate: f32) -> Self {
        let mut xtc = Self {
            enabled: true,
            engine: DelayEngine::new(sample_rate),
            gain: 1.0,
            reverse_stereo: false,
        };
        for descriptor in PARAMETERS {
            xtc.set_parameter(descriptor.name, descriptor.default_value);
        }
        xtc
    }

    pub fn set_delay_seconds(&mut self, seconds: f32) {
        self.engine.set_delay_seconds(seconds.clamp(0.0, 1.0));
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.engine.set_feedback(feedback);
    }

    pub fn set_reverse_stereo(&mut self, reverse: bool) {
        self.reverse_stereo = reverse;
    }
}

impl AudioNode for Crossfeed {
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
            eprintln!("Crossfeed error: missing stereo output buffers");
            return;
        };
        let out_left = &mut out_left[..buffer_size];
        let out_right = &mut out_right[..buffer_size];

        if input_channel_count(inputs) != 2 {
            eprintln!(
                "Crossfeed error: channel count must be 2, got {}",
                input_channel_count(inputs)
            );
            out_left.fill(0.0);
            out_right.fill(0.0);
            return;
        }
        let left_in = &inputs[&PortId::AudioInput0][..buffer_size];
        let right_in = &inputs[&PortId::AudioInput1][..buffer_size];

        self.engine.ensure_capacity();
        let gain = self.gain;
        let reverse = self.reverse_stereo;

        if self.engine.is_bypassed() {
            for i in 0..buffer_size {
                let (l, r) = (gain * left_in[i], gain * right_in[i]);
                let (a, b) = if reverse { (r, l) } else { (l, r) };
                out_left[i] = a;
                out_right[i] = b;
            }
            return;
        }

        for i in 0..buffer_size {
            let (delayed_left, delayed_right) = self.engine.process_sample(left_in[i], right_in[i]);
            let processed_left = 0.5 * gain * (left_in[i] + delayed_left);
            let processed_right = 0.5 * gain * (right_in[i] + delayed_right);
            let (a, b) = if reverse {
                (processed_right, processed_left)
            } else {
                (processed_left, processed_right)
            };
            out_left[i] = a;
            out_right[i] = b;
        }
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

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
        if active && !self.enabled {
            self.reset();
        }
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
            "delay" => self.engine.set_delay_seconds(value),
            "gain" => self.gain = value,
            "reverseStereo" => self.reverse_stereo = value >= 0.5,
            "feedback" => self.engine.set_feedback(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_block(
        xtc: &mut Crossfeed,
        left_in: &[f32],
        right_in: &[f32],
        out_left: &mut [f32],
        out_right: &mut [f32],
    ) {
        let buffer_size = left_in.len();
        let mut inputs: FxHashMap<PortId, &[f32]> = FxHashMap::default();
        inputs.insert(PortId::AudioInput0, left_in);
        inputs.insert(PortId::AudioInput1, right_in);
        let mut outputs: FxHashMap<PortId, &mut [f32]> = FxHashMap::default();
        outputs.insert(PortId::AudioOutput0, out_left);
        outputs.insert(PortId::AudioOutput1, out_right);
        xtc.process(&inputs, &mut outputs, buffer_size);
    }

    #[test]
    fn zero_delay_passes_gain_scaled_input() {
        let mut xtc = Crossfeed::new(48000.0);
        xtc.set_parameter("gain", 0.5);
        let left = vec![0.8; 64];
        let right = vec![-0.4; 64];
        let mut out_left = vec![0.0; 64];
        let mut out_right = vec![0.0; 64];
        run_block(&mut xtc, &left, &right, &mut out_left, &mut out_right);
        assert!(out_left.iter().all(|&x| (x - 0.4).abs() < 1e-6));
        assert!(out_right.iter().all(|&x| (x + 0.2).abs() < 1e-6));
    }

    #[test]
    fn delayed_copy_blends_into_each_channel() {
        // 10-sample delay at 1 kHz, no feedback, unity gain.
        let mut xtc = Crossfeed::new(1000.0);
        xtc.set_parameter("delay", 0.01);
        let mut left = vec![0.0; 64];
        left[0] = 1.0;
        let right = vec![0.0; 64];
        let mut out_left = vec![0.0; 64];
        let mut out_right = vec![0.0; 64];
        run_block(&mut xtc, &left, &right, &mut out_left, &mut out_right);
        assert_eq!(out_left[0], 0.5);
        assert_eq!(out_left[10], 0.5);
        assert!(out_right.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn reverse_stereo_swaps_output_channels_only() {
        let mut xtc = Crossfeed::new(1000.0);
        xtc.set_parameter("delay", 0.01);
        xtc.set_parameter("reverseStereo", 1.0);
        let mut left = vec![0.0; 64];
        left[0] = 1.0;
        let right = vec![0.0; 64];
        let mut out_left = vec![0.0; 64];
        let mut out_right = vec![0.0; 64];
        run_block(&mut xtc, &left, &right, &mut out_left, &mut out_right);
        // The left channel's processed signal lands on the right output.
        assert_eq!(out_right[0], 0.5);
        assert_eq!(out_right[10], 0.5);
        assert!(out_left.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn silence_in_produces_silence_out_with_feedback() {
        let mut xtc = Crossfeed::new(48000.0);
        xtc.set_parameter("delay", 0.001);
        xtc.set_parameter("feedback", 0.9);
        let zero = vec![0.0; 256];
        let mut out_left = vec![0.0; 256];
        let mut out_right = vec![0.0; 256];
        run_block(&mut xtc, &zero, &zero, &mut out_left, &mut out_right);
        assert!(out_left.iter().all(|&x| x == 0.0));
        assert!(out_right.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn mono_input_reports_and_emits_silence() {
        let mut xtc = Crossfeed::new(48000.0);
        let input = vec![1.0; 64];
        let mut out_left = vec![7.0; 64];
        let mut out_right = vec![7.0; 64];
        let mut inputs: FxHashMap<PortId, &[f32]> = FxHashMap::default();
        inputs.insert(PortId::AudioInput0, &input[..]);
        let mut outputs: FxHashMap<PortId, &mut [f32]> = FxHashMap::default();
        outputs.insert(PortId::AudioOutput0, &mut out_left[..]);
        outputs.insert(PortId::AudioOutput1, &mut out_right[..]);
        xtc.process(&inputs, &mut outputs, 64);
        assert!(out_left.iter().all(|&x| x == 0.0));
        assert!(out_right.iter().all(|&x| x == 0.0));
    }
}
