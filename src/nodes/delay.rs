use std::any::Any;

use rustc_hash::FxHashMap;

use crate::audio::InterpolationMode;
use crate::nodes::delay_engine::DelayEngine;
use crate::params::{self, ParamDescriptor};
use crate::traits::{input_channel_count, AudioNode, PortId};

pub const NODE_TYPE: &str = "delay";

pub const PARAMETERS: &[ParamDescriptor] = &[
    ParamDescriptor::new("delay", 0.5, 0.0, 1.0),
    ParamDescriptor::new("taps", 1.0, 1.0, 20.0),
    ParamDescriptor::new("decay", 2.0, 1.0, 3.0),
    ParamDescriptor::new("feedback", 0.0, -0.98, 0.98),
    ParamDescriptor::new("enablePingPong", 0.0, 0.0, 1.0),
    ParamDescriptor::new("gain", 1.0, 0.0, 2.0),
    ParamDescriptor::new("interpolationType", 0.0, 0.0, 2.0),
];

/// Multi-tap feedback delay. Wet-only output: each block produces
/// `0.5 * gain * tap_sum` per channel, with ping-pong optionally bouncing
/// odd taps across the stereo pair. Requires exactly two channels.
pub struct Delay {
    enabled: bool,
    engine: DelayEngine,
    gain: f32,
}

impl Delay {
    pub fn new(sample_rate: f32) -> Self {
        let mut delay = Self {
            enabled: true,
            engine: DelayEngine::new(sample_rate),
            gain: 1.0,
        };
        for descriptor in PARAMETERS {
            delay.set_parameter(descriptor.name, descriptor.default_value);
        }
        delay
    }

    pub fn set_delay_seconds(&mut self, seconds: f32) {
        self.engine.set_delay_seconds(seconds.clamp(0.0, 1.0));
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.engine.set_feedback(feedback);
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 2.0);
    }
}

impl AudioNode for Delay {
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
            eprintln!("Delay error: missing stereo output buffers");
            return;
        };
        let out_left = &mut out_left[..buffer_size];
        let out_right = &mut out_right[..buffer_size];

        if input_channel_count(inputs) != 2 {
            eprintln!(
                "Delay error: channel count must be 2, got {}",
                input_channel_count(inputs)
            );
            out_left.fill(0.0);
            out_right.fill(0.0);
            return;
        }
        let left_in = &inputs[&PortId::AudioInput0][..buffer_size];
        let right_in = &inputs[&PortId::AudioInput1][..buffer_size];

        // Block-rate snapshot: any capacity change happens here, before the
        // per-sample loop touches the line.
        self.engine.ensure_capacity();
        let gain = self.gain;

        if self.engine.is_bypassed() {
            for i in 0..buffer_size {
                out_left[i] = gain * left_in[i];
                out_right[i] = gain * right_in[i];
            }
            return;
        }

        for i in 0..buffer_size {
            let (wet_left, wet_right) = self.engine.process_sample(left_in[i], right_in[i]);
            out_left[i] = 0.5 * gain * wet_left;
            out_right[i] = 0.5 * gain * wet_right;
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
            "taps" => self.engine.set_tap_count(value as usize),
            "decay" => self.engine.set_decay(value),
            "feedback" => self.engine.set_feedback(value),
            "enablePingPong" => self.engine.set_ping_pong(value >= 0.5),
            "gain" => self.gain = value,
            "interpolationType" => {
                self.engine
                    .set_interpolation(InterpolationMode::from_param(value));
            }
            _ => {}
        }
    }
}
