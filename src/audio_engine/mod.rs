#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::EffectsEngine;

use crate::effect_stack::EffectStack;
use crate::messages::{ControlMessage, RenderMessage};
use crate::nodes::{Automator, Crossfeed, Delay, MidSide};

/// Owns the effect chain on the render side. The control side talks to it
/// exclusively through named parameters and `ControlMessage`s addressed by
/// effect index, and reads back per-instance `RenderMessage`s.
pub struct AudioEngine {
    sample_rate: f32,
    stack: EffectStack,
}

impl AudioEngine {
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            sample_rate,
            stack: EffectStack::new(),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn add_delay(&mut self) -> usize {
        self.stack.add_effect(Box::new(Delay::new(self.sample_rate)))
    }

    pub fn add_crossfeed(&mut self) -> usize {
        self.stack
            .add_effect(Box::new(Crossfeed::new(self.sample_rate)))
    }

    pub fn add_mid_side(&mut self) -> usize {
        self.stack.add_effect(Box::new(MidSide::new()))
    }

    pub fn add_automator(&mut self) -> usize {
        self.stack
            .add_effect(Box::new(Automator::new(self.sample_rate)))
    }

    pub fn effect_count(&self) -> usize {
        self.stack.get_effect_count()
    }

    pub fn node_type(&self, index: usize) -> Option<&str> {
        self.stack.node_type(index)
    }

    pub fn remove_effect(&mut self, index: usize) {
        self.stack.remove_effect(index);
    }

    pub fn reorder_effects(&mut self, from: usize, to: usize) {
        self.stack.reorder_effects(from, to);
    }

    pub fn set_effect_enabled(&mut self, index: usize, enabled: bool) {
        self.stack.set_effect_enabled(index, enabled);
    }

    pub fn set_parameter(&mut self, index: usize, name: &str, value: f32) {
        self.stack.set_parameter(index, name, value);
    }

    pub fn handle_message(&mut self, index: usize, message: &ControlMessage) {
        self.stack.handle_message(index, message);
    }

    pub fn drain_messages(&mut self, index: usize) -> Vec<RenderMessage> {
        self.stack.drain_messages(index)
    }

    pub fn process(
        &mut self,
        input_left: &[f32],
        input_right: &[f32],
        output_left: &mut [f32],
        output_right: &mut [f32],
    ) {
        self.stack
            .process_audio(input_left, input_right, output_left, output_right);
    }

    pub fn reset(&mut self) {
        self.stack.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_routes_messages_by_effect_index() {
        let mut engine = AudioEngine::new(12800.0);
        let delay = engine.add_delay();
        let automator = engine.add_automator();
        engine.set_parameter(delay, "delay", 0.0);
        engine.handle_message(automator, &ControlMessage::Enable { enabled: true });
        engine.handle_message(
            automator,
            &ControlMessage::SetTickInterval { seconds: 0.25 },
        );

        let input = vec![0.5; 128];
        let mut out_left = vec![0.0; 128];
        let mut out_right = vec![0.0; 128];
        for _ in 0..26 {
            engine.process(&input, &input, &mut out_left, &mut out_right);
        }
        assert!(engine.drain_messages(delay).is_empty());
        let messages = engine.drain_messages(automator);
        assert!(messages.contains(&RenderMessage::Tick));
        // Zero-delay delay node passes gain-scaled audio on to the tap.
        assert!(out_left.iter().all(|&x| (x - 0.5).abs() < 1e-6));
    }
}
