use core::f32::consts::{FRAC_PI_4, PI};
use core::time::Duration;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Angle, Point},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Sector},
};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::{
    AnimatorConfig, MOUTH_ANGLE_EATING, MOUTH_ANGLE_IDLE, MOUTH_ANGLE_SWING,
};
use crate::palette::Palette;
use crate::types::{AnimationState, Ball, ExplosionParticle};

const TAU: f32 = 2.0 * PI;
const EYE_OFFSET: f32 = 0.3; // Fraction of the radius, along 45 degrees
const EYE_SIZE: f32 = 0.16; // Eye diameter as a fraction of the radius
const BALL_DIAMETER: f32 = 14.0;
const PARTICLE_DIAMETER: f32 = 6.0;
const PARTICLE_REACH: f32 = 50.0; // Distance per unit of speed over a particle's life
const OUTLINE_WIDTH: f32 = 3.0;

/// Everything needed to draw one frame.
pub struct Frame<'a> {
    pub state: &'a AnimationState,
    pub mouth_phase: f32,
    pub balls: &'a [Ball],
    pub particles: &'a [ExplosionParticle],
    pub now: Duration,
}

pub trait Renderer {
    fn draw<D: DrawTarget<Color = Rgb888>>(
        &self,
        target: &mut D,
        frame: &Frame<'_>,
    ) -> Result<(), D::Error>;
}

/// Mouth rotation in radians. Only swings while eating.
pub fn mouth_angle(is_eating: bool, phase: f32) -> f32 {
    if is_eating {
        MOUTH_ANGLE_EATING + phase.sin() * MOUTH_ANGLE_SWING
    } else {
        MOUTH_ANGLE_IDLE
    }
}

/// Where balls disappear into the mouth, in arc units relative to the centre.
pub fn landing_point(radius: f32) -> Point {
    Point::new((radius * 0.5) as i32, 0)
}

/// Draws the remaining-budget arc as a Pac-Man: the body spans the fill
/// percentage, the eaten part is greyed out, and balls fly into the mouth.
///
/// Arc units are scaled by `scale` and placed around `center`, so the same
/// animator drives a 64x64 LED panel or a desktop window.
pub struct PacManRenderer {
    center: Point,
    scale: f32,
    palette: Palette,
    ball_travel: Duration,
    particle_lifetime: Duration,
}

impl PacManRenderer {
    pub fn new(center: Point, scale: f32, config: &AnimatorConfig) -> Self {
        Self {
            center,
            scale: scale.max(0.0),
            palette: config.palette,
            ball_travel: config.ball_travel,
            particle_lifetime: config.particle_lifetime,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn to_screen(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.center.x + (x * self.scale) as i32,
            self.center.y + (y * self.scale) as i32,
        )
    }

    fn pixels(&self, length: f32) -> u32 {
        (length * self.scale).max(0.0) as u32
    }

    fn draw_body<D>(&self, fb: &mut D, state: &AnimationState, mouth: f32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let diameter = self.pixels(state.current_radius * 2.0);
        let filled = state.current_fill_percent.clamp(0.0, 100.0) / 100.0 * TAU;
        let outline = self.pixels(OUTLINE_WIDTH).max(1);

        if filled > 0.0 {
            let style = PrimitiveStyleBuilder::new()
                .fill_color(self.palette.body)
                .stroke_color(self.palette.body_outline)
                .stroke_width(outline)
                .build();
            Sector::with_center(
                self.center,
                diameter,
                Angle::from_radians(mouth),
                Angle::from_radians(filled),
            )
            .into_styled(style)
            .draw(fb)?;
        }

        if state.current_fill_percent < 100.0 {
            let style = PrimitiveStyleBuilder::new()
                .fill_color(self.palette.eaten)
                .stroke_color(self.palette.eaten_outline)
                .stroke_width((outline / 2).max(1))
                .build();
            Sector::with_center(
                self.center,
                diameter,
                Angle::from_radians(mouth + filled),
                Angle::from_radians(TAU - filled),
            )
            .into_styled(style)
            .draw(fb)?;

            // Bite edges.
            let radius = state.current_radius;
            let edge = PrimitiveStyle::with_stroke(self.palette.body_outline, outline);
            for angle in [mouth + filled, mouth] {
                let tip = self.to_screen(radius * angle.cos(), radius * angle.sin());
                Line::new(self.center, tip).into_styled(edge).draw(fb)?;
            }
        }

        let eye = self.to_screen(
            state.current_radius * EYE_OFFSET * FRAC_PI_4.cos(),
            state.current_radius * EYE_OFFSET * FRAC_PI_4.sin(),
        );
        Circle::with_center(eye, self.pixels(state.current_radius * EYE_SIZE).max(1))
            .into_styled(PrimitiveStyle::with_fill(self.palette.eye))
            .draw(fb)?;
        Ok(())
    }

    fn draw_balls<D>(&self, fb: &mut D, frame: &Frame<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let radius = frame.state.current_radius;
        let landing = landing_point(radius);
        let (entry_x, entry_y) = (radius * 2.5, -radius * 0.8);
        let style = PrimitiveStyle::with_fill(self.palette.ball);

        for ball in frame.balls {
            let progress = ball.progress(frame.now, self.ball_travel);
            if progress >= 1.0 {
                continue;
            }
            let x = entry_x + (landing.x as f32 - entry_x) * progress;
            let y = entry_y + (landing.y as f32 - entry_y) * progress;
            let diameter = self.pixels(BALL_DIAMETER * (1.0 - progress)).max(1);
            Circle::with_center(self.to_screen(x, y), diameter)
                .into_styled(style)
                .draw(fb)?;
        }
        Ok(())
    }

    fn draw_particles<D>(&self, fb: &mut D, frame: &Frame<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let lifetime = self.particle_lifetime.as_secs_f32();
        for particle in frame.particles {
            let age = if lifetime > 0.0 {
                (particle.age(frame.now).as_secs_f32() / lifetime).clamp(0.0, 1.0)
            } else {
                1.0
            };
            if age >= 1.0 {
                continue;
            }
            let direction = particle.angle.to_radians();
            let reach = particle.speed * PARTICLE_REACH * age;
            let x = particle.origin.x as f32 + direction.cos() * reach;
            let y = particle.origin.y as f32 + direction.sin() * reach;
            let diameter = self.pixels(PARTICLE_DIAMETER * (1.0 - age)).max(1);
            Circle::with_center(self.to_screen(x, y), diameter)
                .into_styled(PrimitiveStyle::with_fill(self.palette.particle_color(particle.id)))
                .draw(fb)?;
        }
        Ok(())
    }
}

impl Renderer for PacManRenderer {
    fn draw<D>(&self, fb: &mut D, frame: &Frame<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let mouth = mouth_angle(frame.state.is_eating, frame.mouth_phase);
        self.draw_body(fb, frame.state, mouth)?;
        self.draw_balls(fb, frame)?;
        self.draw_particles(fb, frame)
    }
}
