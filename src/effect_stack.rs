use rustc_hash::FxHashMap;

use crate::messages::{ControlMessage, RenderMessage};
use crate::{AudioNode, PortId};

pub struct Effect {
    pub node: Box<dyn AudioNode>,
}

/// Linear chain of stereo effects with ping-ponged work buffers.
pub struct EffectStack {
    pub effects: Vec<Effect>,
    work_left_a: Vec<f32>,
    work_right_a: Vec<f32>,
    work_left_b: Vec<f32>,
    work_right_b: Vec<f32>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
            work_left_a: Vec::new(),
            work_right_a: Vec::new(),
            work_left_b: Vec::new(),
            work_right_b: Vec::new(),
        }
    }

    fn ensure_capacity(&mut self, len: usize) {
        if self.work_left_a.len() < len {
            self.work_left_a.resize(len, 0.0);
        }
        if self.work_right_a.len() < len {
            self.work_right_a.resize(len, 0.0);
        }
        if self.work_left_b.len() < len {
            self.work_left_b.resize(len, 0.0);
        }
        if self.work_right_b.len() < len {
            self.work_right_b.resize(len, 0.0);
        }
    }

    pub fn add_effect(&mut self, effect: Box<dyn AudioNode>) -> usize {
        let index = self.effects.len();
        self.effects.push(Effect { node: effect });
        index
    }

    pub fn remove_effect(&mut self, index: usize) {
        if index < self.effects.len() {
            self.effects.remove(index);
        }
    }

    pub fn reorder_effects(&mut self, from: usize, to: usize) {
        if from < self.effects.len() && to < self.effects.len() {
            let effect = self.effects.remove(from);
            self.effects.insert(to, effect);
        }
    }

    pub fn set_effect_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(effect) = self.effects.get_mut(index) {
            effect.node.set_active(enabled);
        }
    }

    pub fn get_effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn node_type(&self, index: usize) -> Option<&str> {
        self.effects.get(index).map(|e| e.node.node_type())
    }

    pub fn set_parameter(&mut self, index: usize, name: &str, value: f32) {
        if let Some(effect) = self.effects.get_mut(index) {
            effect.node.set_parameter(name, value);
        }
    }

    pub fn handle_message(&mut self, index: usize, message: &ControlMessage) {
        if let Some(effect) = self.effects.get_mut(index) {
            effect.node.handle_message(message);
        }
    }

    pub fn drain_messages(&mut self, index: usize) -> Vec<RenderMessage> {
        self.effects
            .get_mut(index)
            .map(|e| e.node.drain_messages())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.node.reset();
        }
    }

    pub fn process_audio(
        &mut self,
        input_left: &[f32],
        input_right: &[f32],
        output_left: &mut [f32],
        output_right: &mut [f32],
    ) {
        let buffer_size = input_left
            .len()
            .min(input_right.len())
            .min(output_left.len())
            .min(output_right.len());

        if buffer_size == 0 {
            return;
        }

        // If every effect is disabled, bypass processing entirely.
        if self.effects.iter().all(|e| !e.node.is_active()) {
            output_left[..buffer_size].copy_from_slice(&input_left[..buffer_size]);
            output_right[..buffer_size].copy_from_slice(&input_right[..buffer_size]);
            return;
        }

        self.ensure_capacity(buffer_size);

        self.work_left_a[..buffer_size].copy_from_slice(&input_left[..buffer_size]);
        self.work_right_a[..buffer_size].copy_from_slice(&input_right[..buffer_size]);

        let mut current_is_a = true;

        for effect in &mut self.effects {
            if !effect.node.is_active() {
                continue;
            }

            let (current_left, current_right, next_left, next_right) = if current_is_a {
                (
                    &self.work_left_a,
                    &self.work_right_a,
                    &mut self.work_left_b,
                    &mut self.work_right_b,
                )
            } else {
                (
                    &self.work_left_b,
                    &self.work_right_b,
                    &mut self.work_left_a,
                    &mut self.work_right_a,
                )
            };

            next_left[..buffer_size].fill(0.0);
            next_right[..buffer_size].fill(0.0);

            let mut inputs: FxHashMap<PortId, &[f32]> =
                FxHashMap::with_capacity_and_hasher(2, Default::default());
            inputs.insert(PortId::AudioInput0, &current_left[..buffer_size]);
            inputs.insert(PortId::AudioInput1, &current_right[..buffer_size]);

            let mut outputs: FxHashMap<PortId, &mut [f32]> =
                FxHashMap::with_capacity_and_hasher(2, Default::default());
            outputs.insert(PortId::AudioOutput0, &mut next_left[..buffer_size]);
            outputs.insert(PortId::AudioOutput1, &mut next_right[..buffer_size]);

            effect.node.process(&inputs, &mut outputs, buffer_size);

            current_is_a = !current_is_a;
        }

        let (final_left, final_right) = if current_is_a {
            (&self.work_left_a, &self.work_right_a)
        } else {
            (&self.work_left_b, &self.work_right_b)
        };

        output_left[..buffer_size].copy_from_slice(&final_left[..buffer_size]);
        output_right[..buffer_size].copy_from_slice(&final_right[..buffer_size]);

        if buffer_size < output_left.len() {
            output_left[buffer_size..].fill(0.0);
        }
        if buffer_size < output_right.len() {
            output_right[buffer_size..].fill(0.0);
        }
    }
}

impl Default for EffectStack {
    fn default() -> Self {
        Self::new()
    }
}
