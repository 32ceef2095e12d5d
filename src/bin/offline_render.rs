//! Offline render of a demo effect chain to a WAV file.
//!
//! Feeds a short sine burst through delay -> crossfeed -> mid/side with an
//! automator tap at the end, writes the result to `effects_render.wav`, and
//! prints the automation measurements as JSON lines.

use anyhow::{Context, Result};
use effects_processor::{AudioEngine, ControlMessage};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK_SIZE: usize = 128;
const RENDER_SECONDS: f32 = 4.0;

fn main() -> Result<()> {
    let mut engine = AudioEngine::new(SAMPLE_RATE);

    let delay = engine.add_delay();
    engine.set_parameter(delay, "delay", 0.3);
    engine.set_parameter(delay, "taps", 3.0);
    engine.set_parameter(delay, "decay", 2.0);
    engine.set_parameter(delay, "feedback", 0.35);
    engine.set_parameter(delay, "enablePingPong", 1.0);

    let xtc = engine.add_crossfeed();
    engine.set_parameter(xtc, "delay", 0.00007);
    engine.set_parameter(xtc, "feedback", 0.85);

    let mid_side = engine.add_mid_side();
    engine.set_parameter(mid_side, "sideGain", 0.6);

    let automator = engine.add_automator();
    engine.handle_message(automator, &ControlMessage::Enable { enabled: true });
    engine.handle_message(automator, &ControlMessage::SetTickInterval { seconds: 0.25 });

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer =
        hound::WavWriter::create("effects_render.wav", spec).context("creating output wav")?;

    let total_blocks = (RENDER_SECONDS * SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
    let mut input_left = vec![0.0f32; BLOCK_SIZE];
    let mut input_right = vec![0.0f32; BLOCK_SIZE];
    let mut output_left = vec![0.0f32; BLOCK_SIZE];
    let mut output_right = vec![0.0f32; BLOCK_SIZE];

    for block in 0..total_blocks {
        for i in 0..BLOCK_SIZE {
            let t = (block * BLOCK_SIZE + i) as f32 / SAMPLE_RATE;
            // A 440 Hz burst over the first half second, then silence so the
            // echo tail is audible on its own.
            let sample = if t < 0.5 {
                0.5 * (std::f32::consts::TAU * 440.0 * t).sin()
            } else {
                0.0
            };
            input_left[i] = sample;
            input_right[i] = sample * 0.5;
        }

        engine.process(&input_left, &input_right, &mut output_left, &mut output_right);

        for i in 0..BLOCK_SIZE {
            writer.write_sample(output_left[i])?;
            writer.write_sample(output_right[i])?;
        }

        for message in engine.drain_messages(automator) {
            println!("{}", serde_json::to_string(&message)?);
        }
    }

    writer.finalize().context("finalizing output wav")?;
    Ok(())
}
