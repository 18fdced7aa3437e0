/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// `#F0F8FF`
    pub const ALICE_BLUE: Color = Color::new(240.0 / 255.0, 248.0 / 255.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            r: f32::from(red) / f32::from(u8::MAX),
            g: f32::from(green) / f32::from(u8::MAX),
            b: f32::from(blue) / f32::from(u8::MAX),
            a: f32::from(alpha) / f32::from(u8::MAX),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::ALICE_BLUE
    }
}
