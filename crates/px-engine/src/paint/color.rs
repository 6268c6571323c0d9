use bytemuck::{Pod, Zeroable};

/// Packed 32-bit ARGB color.
///
/// Layout of the underlying `u32`:
/// - alpha: bits 24-31
/// - red:   bits 16-23
/// - green: bits 8-15
/// - blue:  bits 0-7
///
/// On little-endian targets the in-memory byte order is B, G, R, A, which matches
/// `wgpu::TextureFormat::Bgra8Unorm`. A row of `Color` can therefore be uploaded
/// with `bytemuck::cast_slice` and no per-pixel conversion.
///
/// The default value is transparent black (all bits zero).
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Wraps a raw `0xAARRGGBB` value.
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Opaque color (alpha 255).
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    #[inline]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Copy of `color` with its alpha channel replaced.
    #[inline]
    pub const fn with_alpha(color: Color, alpha: u8) -> Self {
        Self((color.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Raw `0xAARRGGBB` value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_alpha(&mut self, alpha: u8) {
        self.0 = (self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24);
    }

    #[inline]
    pub fn set_red(&mut self, red: u8) {
        self.0 = (self.0 & 0xFF00_FFFF) | ((red as u32) << 16);
    }

    #[inline]
    pub fn set_green(&mut self, green: u8) {
        self.0 = (self.0 & 0xFFFF_00FF) | ((green as u32) << 8);
    }

    #[inline]
    pub fn set_blue(&mut self, blue: u8) {
        self.0 = (self.0 & 0xFFFF_FF00) | blue as u32;
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Decodes a texel stored in `Bgra8Unorm` byte order.
    #[inline]
    pub const fn from_bgra_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[2], bytes[1], bytes[0], bytes[3])
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    #[inline]
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Color = Color::from_u32(0x8040_2010);

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn default_is_transparent_black() {
        let c = Color::default();
        assert_eq!(c.value(), 0);
        assert_eq!(c, Color::TRANSPARENT);
    }

    #[test]
    fn rgb_is_opaque_and_reads_back() {
        for &(r, g, b) in &[(0u8, 0u8, 0u8), (255, 255, 255), (1, 2, 3), (200, 17, 99)] {
            let c = Color::rgb(r, g, b);
            assert_eq!(c.alpha(), 255);
            assert_eq!(c.red(), r);
            assert_eq!(c.green(), g);
            assert_eq!(c.blue(), b);
        }
    }

    #[test]
    fn rgba_packs_channels() {
        assert_eq!(Color::rgba(0x80, 0x40, 0x20, 0xFF).value(), 0xFF80_4020);
        assert_eq!(Color::rgba(0x11, 0x22, 0x33, 0x44).value(), 0x4411_2233);
    }

    #[test]
    fn with_alpha_replaces_alpha() {
        let c = Color::with_alpha(Color::rgb(10, 20, 30), 7);
        assert_eq!(c.alpha(), 7);
        assert_eq!((c.red(), c.green(), c.blue()), (10, 20, 30));
    }

    // ── mutators ──────────────────────────────────────────────────────────

    #[test]
    fn set_alpha_touches_only_alpha() {
        let mut c = SAMPLE;
        c.set_alpha(0xAB);
        assert_eq!(c.alpha(), 0xAB);
        assert_eq!((c.red(), c.green(), c.blue()), (SAMPLE.red(), SAMPLE.green(), SAMPLE.blue()));
    }

    #[test]
    fn set_red_touches_only_red() {
        let mut c = SAMPLE;
        c.set_red(0xAB);
        assert_eq!(c.red(), 0xAB);
        assert_eq!((c.alpha(), c.green(), c.blue()), (SAMPLE.alpha(), SAMPLE.green(), SAMPLE.blue()));
    }

    #[test]
    fn set_green_touches_only_green() {
        let mut c = SAMPLE;
        c.set_green(0xAB);
        assert_eq!(c.green(), 0xAB);
        assert_eq!((c.alpha(), c.red(), c.blue()), (SAMPLE.alpha(), SAMPLE.red(), SAMPLE.blue()));
    }

    #[test]
    fn set_blue_touches_only_blue() {
        let mut c = SAMPLE;
        c.set_blue(0xAB);
        assert_eq!(c.blue(), 0xAB);
        assert_eq!((c.alpha(), c.red(), c.green()), (SAMPLE.alpha(), SAMPLE.red(), SAMPLE.green()));
    }

    // ── byte order ────────────────────────────────────────────────────────

    #[test]
    fn bgra_bytes_round_trip() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(Color::from_bgra_bytes([3, 2, 1, 4]), c);
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn memory_layout_is_bgra() {
        let row = [Color::rgba(0x10, 0x20, 0x30, 0x40)];
        let bytes: &[u8] = bytemuck::cast_slice(&row);
        assert_eq!(bytes, &[0x30, 0x20, 0x10, 0x40]);
    }
}
