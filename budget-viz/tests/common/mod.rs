#![allow(dead_code)]
use std::convert::Infallible;
use std::time::Duration;

use budget_viz::{AnimatorConfig, BudgetArcAnimator, BudgetTotals};
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

pub const FRAME: Duration = Duration::from_millis(16);

pub fn animator(income: f32, expense: f32) -> BudgetArcAnimator {
    BudgetArcAnimator::new(AnimatorConfig::default(), BudgetTotals::new(income, expense))
        .expect("default config is valid")
}

/// Advances in display frames until `elapsed` has passed.
pub fn run_for(animator: &mut BudgetArcAnimator, elapsed: Duration) {
    let mut remaining = elapsed;
    while remaining > Duration::ZERO {
        let step = remaining.min(FRAME);
        animator.advance(step);
        remaining -= step;
    }
}

/// Advances frame by frame until the arc rests; returns the frame count.
pub fn run_until_settled(animator: &mut BudgetArcAnimator, max_frames: usize) -> usize {
    for frame in 0..max_frames {
        if !animator.is_animating() {
            return frame;
        }
        animator.advance(FRAME);
    }
    panic!("arc still animating after {} frames", max_frames);
}

/// In-memory frame buffer counting what gets drawn.
pub struct CountingDisplay {
    size: Size,
    pixels: Vec<Option<Rgb888>>,
}

impl CountingDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![None; (width * height) as usize],
        }
    }

    pub fn count(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|p| **p == Some(color)).count()
    }

    pub fn drawn(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = None);
    }
}

impl OriginDimensions for CountingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for CountingDisplay {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = (self.size.width as i32, self.size.height as i32);
        for Pixel(point, color) in pixels {
            if (0..width).contains(&point.x) && (0..height).contains(&point.y) {
                self.pixels[(point.y * width + point.x) as usize] = Some(color);
            }
        }
        Ok(())
    }
}
