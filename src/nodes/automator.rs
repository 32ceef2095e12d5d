use std::any::Any;
use std::collections::VecDeque;
use std::mem;

use rustc_hash::FxHashMap;

use crate::messages::{ControlMessage, RenderMessage};
use crate::params::{self, ParamDescriptor};
use crate::traits::{input_channel_count, AudioNode, PortId};

/// Window of recent frame averages feeding the running average.
const FRAME_QUEUE_LENGTH: usize = 4;

pub const NODE_TYPE: &str = "automator";

pub const PARAMETERS: &[ParamDescriptor] =
    &[ParamDescriptor::new("automationInterval", 0.1, 0.01, 60.0)];

/// Envelope-following automation clock.
///
/// Every block it averages the absolute sample values per channel, combines
/// them into a frame average, and folds that into a short sliding window.
/// When enabled, it posts a `Tick` plus the current measurements to the
/// control side each time the audio clock advances past the configured
/// interval. Audio passes through untouched; measurement is a side effect.
///
/// Measurement state updates whether or not ticking is enabled, so the
/// first tick after enabling reports a warm window rather than zeros.
pub struct Automator {
    enabled: bool,
    sample_rate: f32,
    tick_enabled: bool,
    tick_interval: f32,
    last_tick_time: f64,
    samples_processed: u64,
    channel_averages: Vec<f32>,
    frame_average: f32,
    recent_frame_averages: VecDeque<f32>,
    running_average: f32,
    outbox: Vec<RenderMessage>,
}

impl Automator {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            enabled: true,
            sample_rate,
            tick_enabled: false,
            tick_interval: 0.1,
            last_tick_time: 0.0,
            samples_processed: 0,
            channel_averages: Vec::with_capacity(2),
            frame_average: 0.0,
            recent_frame_averages: VecDeque::with_capacity(FRAME_QUEUE_LENGTH + 1),
            running_average: 0.0,
            outbox: Vec::new(),
        }
    }

    /// Audio time at the start of the current block.
    fn current_time(&self) -> f64 {
        self.samples_processed as f64 / self.sample_rate as f64
    }

    /// Toggling resets the tick reference so a re-enable never fires a
    /// stale, immediate tick.
    pub fn set_tick_enabled(&mut self, enabled: bool) {
        self.tick_enabled = enabled;
        self.last_tick_time = self.current_time();
    }

    pub fn set_tick_interval(&mut self, seconds: f32) {
        self.tick_interval = seconds.clamp(0.01, 60.0);
    }

    pub fn running_average(&self) -> f32 {
        self.running_average
    }

    fn measure(&mut self, channels: &[&[f32]], buffer_size: usize) {
        self.channel_averages.clear();
        for channel in channels {
            let sum: f32 = channel[..buffer_size].iter().map(|x| x.abs()).sum();
            self.channel_averages.push(sum / buffer_size as f32);
        }
        self.frame_average =
            self.channel_averages.iter().sum::<f32>() / channels.len() as f32;
        self.recent_frame_averages.push_back(self.frame_average);
        if self.recent_frame_averages.len() > FRAME_QUEUE_LENGTH {
            self.recent_frame_averages.pop_front();
        }
        self.running_average = self.recent_frame_averages.iter().sum::<f32>()
            / self.recent_frame_averages.len() as f32;
    }
}

impl AudioNode for Automator {
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
        const INPUT_PORTS: [PortId; 2] = [PortId::AudioInput0, PortId::AudioInput1];
        const OUTPUT_PORTS: [PortId; 2] = [PortId::AudioOutput0, PortId::AudioOutput1];

        let channel_count = input_channel_count(inputs);
        if channel_count > 0 {
            let mut channels: [&[f32]; 2] = [&[], &[]];
            let mut used = 0;
            for port in INPUT_PORTS {
                if let Some(buffer) = inputs.get(&port) {
                    channels[used] = &buffer[..buffer_size];
                    used += 1;
                }
            }
            let channels = &channels[..used];
            self.measure(channels, buffer_size);

            // Analysis tap in a linear chain: pass the audio through.
            for (in_port, out_port) in INPUT_PORTS.into_iter().zip(OUTPUT_PORTS) {
                if let Some(out) = outputs.get_mut(&out_port) {
                    match inputs.get(&in_port) {
                        Some(input) => {
                            out[..buffer_size].copy_from_slice(&input[..buffer_size])
                        }
                        None => out[..buffer_size].fill(0.0),
                    }
                }
            }
        }

        let now = self.current_time();
        if self.tick_enabled && now - self.last_tick_time >= self.tick_interval as f64 {
            self.last_tick_time = now;
            self.outbox.push(RenderMessage::Tick);
            self.outbox.push(RenderMessage::Measurement {
                channel_averages: self.channel_averages.clone(),
                frame_average: self.frame_average,
                running_average: self.running_average,
            });
        }
        self.samples_processed += buffer_size as u64;
    }

    fn reset(&mut self) {
        self.channel_averages.clear();
        self.frame_average = 0.0;
        self.recent_frame_averages.clear();
        self.running_average = 0.0;
        self.samples_processed = 0;
        self.last_tick_time = 0.0;
        self.outbox.clear();
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
            "automationInterval" => self.tick_interval = value,
            _ => {}
        }
    }

    fn handle_message(&mut self, message: &ControlMessage) {
        match message {
            ControlMessage::SetParameter { name, value } => self.set_parameter(name, *value),
            ControlMessage::Enable { enabled } => self.set_tick_enabled(*enabled),
            ControlMessage::SetTickInterval { seconds } => self.set_tick_interval(*seconds),
        }
    }

    fn drain_messages(&mut self) -> Vec<RenderMessage> {
        mem::take(&mut self.outbox)
    }
}
