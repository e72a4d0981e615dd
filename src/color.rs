use std::fmt;

use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::ConvertError;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// One stroke color. Channels are in [0, 1].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Color {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub fn from_hls(hue: f64, lightness: f64, saturation: f64) -> Self {
        let (red, green, blue) = hls_to_rgb(hue, lightness, saturation);
        Color {
            hue,
            lightness,
            saturation,
            red,
            green,
            blue,
        }
    }

    fn percent(channel: f64) -> u32 {
        (channel.clamp(0.0, 1.0) * 100.0) as u32
    }
}

/// SVG color descriptor, e.g. `rgb(96%,12%,12%)`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgb({}%,{}%,{}%)",
            Color::percent(self.red),
            Color::percent(self.green),
            Color::percent(self.blue)
        )
    }
}

fn hls_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

/// Hue, lightness and saturation all in [0, 1].
pub fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> (f64, f64, f64) {
    if saturation == 0.0 {
        return (lightness, lightness, lightness);
    }
    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;
    (
        hls_channel(m1, m2, hue + ONE_THIRD),
        hls_channel(m1, m2, hue),
        hls_channel(m1, m2, hue - ONE_THIRD),
    )
}

/// `n` colors with evenly spaced hues. Lightness and saturation are drawn from
/// `rng` so repeated runs look different while staying bright.
pub fn generate_colors<R: Rng>(n: usize, rng: &mut R) -> Result<Vec<Color>> {
    if n == 0 {
        return Err(ConvertError::degenerate("cannot generate colors for zero groups").into());
    }
    Ok((0..n)
        .map(|i| {
            let hue = i as f64 / n as f64;
            let lightness = rng.random_range(0.5..0.6);
            let saturation = rng.random_range(0.9..1.0);
            Color::from_hls(hue, lightness, saturation)
        })
        .collect())
}

/// Randomness for color generation. Seeded runs are reproducible.
pub struct ColorSource {
    rng: StdRng,
}

impl ColorSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        ColorSource { rng }
    }

    pub fn colors(&mut self, n: usize) -> Result<Vec<Color>> {
        generate_colors(n, &mut self.rng)
    }
}
