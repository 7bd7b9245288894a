use crate::foundation::core::Rgb;

/// Convert one sRGB-encoded channel to linear light.
pub fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB-encoded color to linear light, channel by channel.
pub fn srgb_to_linear(rgb: Rgb) -> Rgb {
    Rgb::new(
        srgb_channel_to_linear(rgb.r),
        srgb_channel_to_linear(rgb.g),
        srgb_channel_to_linear(rgb.b),
    )
}

/// Hue in degrees, saturation and value in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let chroma = v * s;
    let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Rgb::new(r + m, g + m, b + m)
}

/// Bit positions of the four 8-bit channels inside a packed 32-bit pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelLayout {
    /// Alpha shift.
    pub a: u32,
    /// Red shift.
    pub r: u32,
    /// Green shift.
    pub g: u32,
    /// Blue shift.
    pub b: u32,
}

impl PixelLayout {
    /// `0xAARRGGBB`: masks `0xff000000`, `0x00ff0000`, `0x0000ff00`, `0x000000ff`.
    pub const ARGB8888: Self = Self {
        a: 24,
        r: 16,
        g: 8,
        b: 0,
    };

    /// Pack a color already in the target encoding.
    ///
    /// Channels are scaled by 255 and truncated, not rounded.
    pub fn pack(self, color: Rgb, alpha: f32) -> u32 {
        fn to_u8(c: f32) -> u32 {
            u32::from((c * 255.0) as u8)
        }

        (to_u8(alpha) << self.a)
            | (to_u8(color.r) << self.r)
            | (to_u8(color.g) << self.g)
            | (to_u8(color.b) << self.b)
    }

    /// Split a packed pixel into `[r, g, b, a]` bytes.
    pub fn unpack_rgba8(self, px: u32) -> [u8; 4] {
        let ch = |shift: u32| ((px >> shift) & 0xff) as u8;
        [ch(self.r), ch(self.g), ch(self.b), ch(self.a)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
