use wasm_bindgen::prelude::*;

use crate::audio_engine::AudioEngine;
use crate::messages::ControlMessage;
use crate::params;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
fn log_console(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(all(feature = "wasm", target_arch = "wasm32")))]
fn log_console(_message: &str) {}

/// JavaScript-facing engine wrapper. The worklet processor calls `process`
/// once per render quantum with the input/output channel views; everything
/// else arrives as named scalars or tagged messages from the control thread.
#[wasm_bindgen]
pub struct EffectsEngine {
    engine: AudioEngine,
}

#[wasm_bindgen]
impl EffectsEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: f32) -> Self {
        log_console(&format!("EffectsEngine ready at {} Hz", sample_rate));
        Self {
            engine: AudioEngine::new(sample_rate),
        }
    }

    pub fn add_delay(&mut self) -> usize {
        self.engine.add_delay()
    }

    pub fn add_crossfeed(&mut self) -> usize {
        self.engine.add_crossfeed()
    }

    pub fn add_mid_side(&mut self) -> usize {
        self.engine.add_mid_side()
    }

    pub fn add_automator(&mut self) -> usize {
        self.engine.add_automator()
    }

    pub fn effect_count(&self) -> usize {
        self.engine.effect_count()
    }

    pub fn remove_effect(&mut self, index: usize) {
        self.engine.remove_effect(index);
    }

    pub fn reorder_effects(&mut self, from: usize, to: usize) {
        self.engine.reorder_effects(from, to);
    }

    pub fn set_effect_enabled(&mut self, index: usize, enabled: bool) {
        self.engine.set_effect_enabled(index, enabled);
    }

    pub fn set_parameter(&mut self, index: usize, name: &str, value: f32) {
        self.engine.set_parameter(index, name, value);
    }

    /// Dispatch one tagged control message to the addressed effect.
    pub fn handle_message(&mut self, index: usize, message: JsValue) -> Result<(), JsValue> {
        let message: ControlMessage = serde_wasm_bindgen::from_value(message)
            .map_err(|e| JsValue::from_str(&format!("bad control message: {}", e)))?;
        self.engine.handle_message(index, &message);
        Ok(())
    }

    /// Messages queued by the addressed effect since the last drain, as an
    /// array of tagged objects.
    pub fn drain_messages(&mut self, index: usize) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.drain_messages(index))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Parameter descriptor table for a node type, for UI generation.
    pub fn get_parameter_descriptors(&self, node_type: &str) -> Result<JsValue, JsValue> {
        let descriptors = params::descriptors_for(node_type)
            .ok_or_else(|| JsValue::from_str(&format!("unknown node type: {}", node_type)))?;
        serde_wasm_bindgen::to_value(descriptors).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn process(
        &mut self,
        input_left: &[f32],
        input_right: &[f32],
        output_left: &mut [f32],
        output_right: &mut [f32],
    ) {
        self.engine
            .process(input_left, input_right, output_left, output_right);
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
