use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use crate::errors::Error;

/// Strategy for adding randomness to delay calculations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JitterStrategy {
    Full,
    Decorrelated,
}

/// Exponential backoff for re-establishing the push channel.
#[derive(Clone, Debug)]
pub struct ReconnectPlan {
    /// The listener gives up once this many consecutive connects have failed.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: f32,
    pub max_delay: Duration,
    pub jitter: JitterStrategy,
}

impl ReconnectPlan {
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        multiplier: f32,
        max_delay: Duration,
        jitter: JitterStrategy,
    ) -> Result<Self, Error> {
        if max_attempts == 0 {
            return Err(Error::Config("Reconnect max_attempts must be > 0".into()));
        }
        if !(multiplier >= 1.0) {
            return Err(Error::Config(
                "Reconnect multiplier must be at least 1.0".into(),
            ));
        }
        if max_delay < initial_delay {
            return Err(Error::Config(
                "Reconnect max_delay must not be lower than initial_delay".into(),
            ));
        }
        Ok(Self {
            max_attempts,
            initial_delay,
            multiplier,
            max_delay,
            jitter,
        })
    }

    pub fn default_plan() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(30),
            jitter: JitterStrategy::Full,
        }
    }

    /// Jittered delay before reconnect attempt `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32, rng: &mut impl Rng) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let exp = self.multiplier.powi(exponent) as f64;
        let delay = if exponent == 0 {
            self.initial_delay
        } else if exp.is_finite() {
            self.initial_delay.mul_f64(exp.min(1e9)).min(self.max_delay)
        } else {
            self.max_delay
        };
        let jitter = match self.jitter {
            JitterStrategy::Full => rng.gen_range(0.0..1.0),
            JitterStrategy::Decorrelated => rng.gen_range(0.5..1.5),
        };
        delay.mul_f64(jitter).min(self.max_delay)
    }
}

impl Default for ReconnectPlan {
    fn default() -> Self {
        Self::default_plan()
    }
}

impl FromStr for JitterStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(JitterStrategy::Full),
            "decorrelated" => Ok(JitterStrategy::Decorrelated),
            other => Err(Error::Config(format!(
                "Unknown jitter strategy '{}'; expected 'full' or 'decorrelated'",
                other
            ))),
        }
    }
}
