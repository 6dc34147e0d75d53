/// 8-bit RGBA color as handed to render backends.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Builds a color from loosely typed integer channels, clamping each to `0..=255`.
    ///
    /// Accepts three (opaque) or four channels; any other length yields `None`.
    pub fn from_channels(channels: &[i64]) -> Option<Self> {
        let c = |v: i64| v.clamp(0, 255) as u8;
        match *channels {
            [r, g, b] => Some(Self::rgb(c(r), c(g), c(b))),
            [r, g, b, a] => Some(Self::rgba(c(r), c(g), c(b), c(a))),
            _ => None,
        }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::black()
    }
}
