use rand::Rng;

/// An RGBA color with 8-bit channels and a floating-point alpha.
///
/// The alpha stored here is the color's own opacity; renderers multiply it
/// with a per-draw alpha when filling shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A fixed weighted color palette.
///
/// Colors are drawn by cumulative-probability thresholds on a single uniform
/// draw: the entry weights are walked in order and the first entry whose
/// cumulative weight exceeds the draw wins. Weights are expected to sum to 1.
#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<(f32, Rgba)>,
}

impl Palette {
    /// Creates a palette from `(weight, color)` entries.
    ///
    /// ### Panics
    /// Panics if `entries` is empty.
    pub fn new(entries: Vec<(f32, Rgba)>) -> Self {
        assert!(!entries.is_empty(), "palette must have at least one entry");
        Self { entries }
    }

    /// The default hero-section palette: cyan-dominant with a rare red accent.
    pub fn hero() -> Self {
        Self::new(vec![
            (0.35, Rgba::opaque(0x06, 0xB6, 0xD4)), // cyan
            (0.25, Rgba::opaque(0x3B, 0x82, 0xF6)), // blue
            (0.25, Rgba::opaque(0xFF, 0xFF, 0xFF)), // white
            (0.15, Rgba::opaque(0xEF, 0x44, 0x44)), // red
        ])
    }

    /// Draws one color using the supplied random source.
    pub fn pick(&self, rng: &mut impl Rng) -> Rgba {
        self.lookup(rng.random_range(0.0..1.0))
    }

    /// Selects the color whose cumulative weight band contains `t`.
    ///
    /// `t` is expected in `[0, 1)`. Values at or beyond the total weight fall
    /// through to the last entry, so slightly unnormalized weights stay safe.
    pub fn lookup(&self, t: f32) -> Rgba {
        let mut acc = 0.0;
        for &(weight, color) in &self.entries {
            acc += weight;
            if t < acc {
                return color;
            }
        }
        self.entries[self.entries.len() - 1].1
    }
}
