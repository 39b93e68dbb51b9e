use crate::aspects::AspectKind;
use crate::wheel::primitives::Color;

/// Colors and proportions used when generating a wheel
#[derive(Debug, Clone, PartialEq)]
pub struct WheelStyle {
    pub background_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    /// Gap between the canvas edge and the outer circle
    pub padding: f32,
    /// Inner edge of the sign band, as a fraction of the outer radius
    pub sign_band_inner: f32,
    /// Radius bodies are placed at, as a fraction of the outer radius
    pub body_ring: f32,
    /// Radius aspect lines end at, as a fraction of the outer radius
    pub aspect_ring: f32,
    pub sign_colors: [Color; 12],
    pub direct_color: Color,
    pub retrograde_color: Color,
    pub aspect_width: f32,
}

impl WheelStyle {
    pub fn aspect_color(&self, kind: AspectKind) -> Color {
        match kind {
            AspectKind::Conjunction => Color::rgb(0xDC, 0x14, 0x3C),
            AspectKind::Opposition => Color::rgb(0x41, 0x69, 0xE1),
            AspectKind::Trine => Color::rgb(0x22, 0x8B, 0x22),
            AspectKind::Square => Color::RED,
            AspectKind::Sextile => Color::rgb(0xFF, 0xA5, 0x00),
        }
    }
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK,
            stroke_color: Color::WHITE,
            stroke_width: 1.0,
            padding: 20.0,
            sign_band_inner: 0.8,
            body_ring: 0.7,
            aspect_ring: 0.6,
            sign_colors: [
                Color::rgb(0xDC, 0x14, 0x3C), // Aries
                Color::rgb(0x8B, 0x45, 0x13), // Taurus
                Color::rgb(0xFF, 0xD7, 0x00), // Gemini
                Color::rgb(0x87, 0xCE, 0xEB), // Cancer
                Color::rgb(0xFF, 0xA5, 0x00), // Leo
                Color::rgb(0x90, 0xEE, 0x90), // Virgo
                Color::rgb(0xFF, 0xB6, 0xC1), // Libra
                Color::rgb(0x8B, 0x00, 0x00), // Scorpio
                Color::rgb(0xFF, 0xD7, 0x00), // Sagittarius
                Color::rgb(0x69, 0x69, 0x69), // Capricorn
                Color::rgb(0x00, 0xCE, 0xD1), // Aquarius
                Color::rgb(0x93, 0x70, 0xDB), // Pisces
            ],
            direct_color: Color::GREEN,
            retrograde_color: Color::RED,
            aspect_width: 1.5,
        }
    }
}
