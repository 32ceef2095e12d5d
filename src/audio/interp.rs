use super::ring_buffer::RingBuffer;

/// How a fractional-sample delay offset is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    None,
    Linear,
    Cubic,
}

impl InterpolationMode {
    /// Parameter values arrive as k-rate floats (0 = none, 1 = linear,
    /// 2 = cubic); anything out of range falls back to no interpolation.
    pub fn from_param(value: f32) -> Self {
        match value as i32 {
            1 => InterpolationMode::Linear,
            2 => InterpolationMode::Cubic,
            _ => InterpolationMode::None,
        }
    }
}

#[inline(always)]
pub fn lerp(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Catmull-Rom cubic through four neighboring samples, `x` in [0, 1).
#[inline(always)]
pub fn cubic(x: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    p1 + 0.5
        * x
        * (p2 - p0
            + x * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3 + x * (3.0 * (p1 - p2) + p3 - p0)))
}

/// Read `buffer` at `delay + frac` samples ago.
///
/// With interpolation disabled or an exact integer offset this is a plain
/// buffer read. Until the line holds at least 3 samples the cubic
/// neighborhood does not exist yet, so the read falls back to a lerp
/// between the delayed sample and the incoming one, which bridges the
/// startup transient without a discontinuity.
#[inline(always)]
pub fn read_fractional(
    buffer: &RingBuffer,
    delay: usize,
    frac: f32,
    input: f32,
    mode: InterpolationMode,
) -> f32 {
    if mode == InterpolationMode::None || frac == 0.0 {
        return buffer.read(delay);
    }
    if buffer.len() < 3 {
        return lerp(buffer.read(delay), input, frac);
    }
    match mode {
        InterpolationMode::Linear => lerp(buffer.read(delay), buffer.read(delay + 1), frac),
        InterpolationMode::Cubic => {
            // One step toward "now" from the integer offset; at offset 0 the
            // newer neighbor is the incoming sample itself.
            let p0 = if delay == 0 {
                input
            } else {
                buffer.read(delay - 1)
            };
            cubic(
                frac,
                p0,
                buffer.read(delay),
                buffer.read(delay + 1),
                buffer.read(delay + 2),
            )
        }
        InterpolationMode::None => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_buffer() -> RingBuffer {
        let mut buffer = RingBuffer::new(16);
        for i in 0..16 {
            buffer.write(i as f32);
        }
        buffer
    }

    #[test]
    fn zero_fraction_matches_integer_read() {
        let buffer = filled_buffer();
        for mode in [
            InterpolationMode::None,
            InterpolationMode::Linear,
            InterpolationMode::Cubic,
        ] {
            assert_eq!(
                read_fractional(&buffer, 5, 0.0, 99.0, mode),
                buffer.read(5)
            );
        }
    }

    #[test]
    fn linear_interpolates_toward_older_neighbor() {
        let buffer = filled_buffer();
        // Samples are a ramp, so the half-offset sits exactly between.
        let value = read_fractional(&buffer, 4, 0.5, 0.0, InterpolationMode::Linear);
        assert!((value - (buffer.read(4) + buffer.read(5)) * 0.5).abs() < 1e-6);
    }

    #[test]
    fn cubic_is_exact_on_a_ramp() {
        // Catmull-Rom reproduces linear data exactly.
        let buffer = filled_buffer();
        let value = read_fractional(&buffer, 4, 0.25, 0.0, InterpolationMode::Cubic);
        let expected = lerp(buffer.read(4), buffer.read(5), 0.25);
        assert!((value - expected).abs() < 1e-5);
    }

    #[test]
    fn startup_falls_back_to_input_lerp() {
        let mut buffer = RingBuffer::new(16);
        buffer.write(2.0);
        let value = read_fractional(&buffer, 0, 0.5, 4.0, InterpolationMode::Cubic);
        assert!((value - 3.0).abs() < 1e-6);
    }

    #[test]
    fn mode_from_param_clamps_unknown_values() {
        assert_eq!(InterpolationMode::from_param(0.0), InterpolationMode::None);
        assert_eq!(InterpolationMode::from_param(1.0), InterpolationMode::Linear);
        assert_eq!(InterpolationMode::from_param(2.0), InterpolationMode::Cubic);
        assert_eq!(InterpolationMode::from_param(7.0), InterpolationMode::None);
    }
}
