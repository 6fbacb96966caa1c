use embedded_graphics::pixelcolor::Rgb888;

/// Colors used by the arc renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub body: Rgb888,
    pub body_outline: Rgb888,
    pub eaten: Rgb888,
    pub eaten_outline: Rgb888,
    pub eye: Rgb888,
    pub ball: Rgb888,
    /// Particle colors cycle through this wheel by particle index.
    pub particles: [Rgb888; 3],
}

impl Palette {
    /// Gold body on a light plate.
    pub const CLASSIC: Palette = Palette {
        body: Rgb888::new(0xFF, 0xD7, 0x00),
        body_outline: Rgb888::new(0xFF, 0x8C, 0x00),
        eaten: Rgb888::new(0xF0, 0xF0, 0xF0),
        eaten_outline: Rgb888::new(0xD0, 0xD0, 0xD0),
        eye: Rgb888::new(0x00, 0x00, 0x00),
        ball: Rgb888::new(0x4C, 0xAF, 0x50),
        particles: [
            Rgb888::new(0xFF, 0xD7, 0x00),
            Rgb888::new(0xFF, 0xA5, 0x00),
            Rgb888::new(0x4C, 0xAF, 0x50),
        ],
    };

    /// High-contrast variant for dark LED panels.
    pub const NEON: Palette = Palette {
        body: Rgb888::new(0xFF, 0xEB, 0x3B),
        body_outline: Rgb888::new(0xFF, 0x98, 0x00),
        eaten: Rgb888::new(0x21, 0x21, 0x21),
        eaten_outline: Rgb888::new(0x42, 0x42, 0x42),
        eye: Rgb888::new(0xFF, 0x00, 0xFF),
        ball: Rgb888::new(0x00, 0xE6, 0x76),
        particles: [
            Rgb888::new(0x00, 0xE5, 0xFF),
            Rgb888::new(0xFF, 0x40, 0x81),
            Rgb888::new(0x76, 0xFF, 0x03),
        ],
    };

    pub fn particle_color(&self, index: u32) -> Rgb888 {
        self.particles[index as usize % self.particles.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}
