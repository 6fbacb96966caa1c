use core::fmt;
use core::time::Duration;

use crate::palette::Palette;

// --- Interpolation ---
pub const SMOOTHING_ALPHA: f32 = 0.1; // Fraction of the remaining distance consumed per frame
pub const SNAP_EPSILON: f32 = 0.5; // Distance at which current snaps to target

// --- Geometry ---
pub const MIN_RADIUS: f32 = 80.0;
pub const MAX_RADIUS: f32 = 150.0;
pub const DEFAULT_RADIUS: f32 = 100.0; // Radius used while total income is zero
pub const RADIUS_INCOME_DIVISOR: f32 = 10.0; // radius = income / divisor, then clamped

// --- Choreography ---
pub const MAX_BALLS: usize = 8;
pub const AMOUNT_PER_BALL: f32 = 50.0;
pub const BALL_STAGGER: Duration = Duration::from_millis(100);
pub const BALL_TRAVEL: Duration = Duration::from_millis(800);
pub const SETTLE_DELAY: Duration = Duration::from_millis(400); // After the last ball lands
pub const BURST_SIZE: usize = 8;
pub const PARTICLE_LIFETIME: Duration = Duration::from_millis(600);
pub const EATING_PULSE: Duration = Duration::from_millis(500); // Expense mouth pulse
pub const TRIGGER_QUEUE_CAPACITY: usize = 4;

// --- Mouth ---
pub const MOUTH_ANGLE_IDLE: f32 = 0.3; // Radians
pub const MOUTH_ANGLE_EATING: f32 = 0.4;
pub const MOUTH_ANGLE_SWING: f32 = 0.15;
pub const MOUTH_PHASE_STEP: f32 = 0.2; // Phase advance per frame while eating

pub const PARTICLE_SEED: u64 = 0x5EED_BA11;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    SmoothingOutOfRange(f32),
    NegativeEpsilon(f32),
    InvalidRadiusRange { min: f32, max: f32 },
    DefaultRadiusOutOfRange(f32),
    NonPositiveDivisor(f32),
    NonPositiveAmountPerBall(f32),
    ZeroMaxBalls,
    ZeroQueueCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SmoothingOutOfRange(alpha) => {
                write!(f, "smoothing alpha must be in (0, 1], got {}", alpha)
            }
            ConfigError::NegativeEpsilon(eps) => {
                write!(f, "snap epsilon must not be negative, got {}", eps)
            }
            ConfigError::InvalidRadiusRange { min, max } => {
                write!(f, "radius range [{}, {}] is empty or not positive", min, max)
            }
            ConfigError::DefaultRadiusOutOfRange(radius) => {
                write!(f, "default radius {} lies outside the radius range", radius)
            }
            ConfigError::NonPositiveDivisor(divisor) => {
                write!(f, "radius income divisor must be positive, got {}", divisor)
            }
            ConfigError::NonPositiveAmountPerBall(amount) => {
                write!(f, "amount per ball must be positive, got {}", amount)
            }
            ConfigError::ZeroMaxBalls => f.write_str("max balls must be at least 1"),
            ConfigError::ZeroQueueCapacity => f.write_str("trigger queue capacity must be at least 1"),
        }
    }
}

/// Tunables for one animator instance.
///
/// The defaults reproduce the gold "Pac-Man" tracker: eight balls at most,
/// 100 ms stagger, 800 ms travel, bursts of eight particles.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    pub smoothing_alpha: f32,
    pub snap_epsilon: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub default_radius: f32,
    pub radius_income_divisor: f32,
    pub max_balls: usize,
    pub amount_per_ball: f32,
    pub ball_stagger: Duration,
    pub ball_travel: Duration,
    pub settle_delay: Duration,
    pub burst_size: usize,
    pub particle_lifetime: Duration,
    pub eating_pulse: Duration,
    pub trigger_queue_capacity: usize,
    pub particle_seed: u64,
    pub palette: Palette,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: SMOOTHING_ALPHA,
            snap_epsilon: SNAP_EPSILON,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            default_radius: DEFAULT_RADIUS,
            radius_income_divisor: RADIUS_INCOME_DIVISOR,
            max_balls: MAX_BALLS,
            amount_per_ball: AMOUNT_PER_BALL,
            ball_stagger: BALL_STAGGER,
            ball_travel: BALL_TRAVEL,
            settle_delay: SETTLE_DELAY,
            burst_size: BURST_SIZE,
            particle_lifetime: PARTICLE_LIFETIME,
            eating_pulse: EATING_PULSE,
            trigger_queue_capacity: TRIGGER_QUEUE_CAPACITY,
            particle_seed: PARTICLE_SEED,
            palette: Palette::CLASSIC,
        }
    }
}

impl AnimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing_alpha));
        }
        if !(self.snap_epsilon >= 0.0) {
            return Err(ConfigError::NegativeEpsilon(self.snap_epsilon));
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(ConfigError::InvalidRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.default_radius >= self.min_radius && self.default_radius <= self.max_radius) {
            return Err(ConfigError::DefaultRadiusOutOfRange(self.default_radius));
        }
        if !(self.radius_income_divisor > 0.0) {
            return Err(ConfigError::NonPositiveDivisor(self.radius_income_divisor));
        }
        if !(self.amount_per_ball > 0.0) {
            return Err(ConfigError::NonPositiveAmountPerBall(self.amount_per_ball));
        }
        if self.max_balls == 0 {
            return Err(ConfigError::ZeroMaxBalls);
        }
        if self.trigger_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }

    /// Time from spawn until the last of `ball_count` balls lands.
    pub fn last_landing(&self, ball_count: usize) -> Duration {
        self.ball_stagger * ball_count.saturating_sub(1) as u32 + self.ball_travel
    }
}
