use std::fs;
use std::path::Path;
use hifitime::Duration;
use serde::Deserialize;
use tracing::info;
use crate::animator::AnimationClock;
use crate::catalog::{Body, OrbitCatalog};
use crate::error::{CatalogError, ConfigError};
use crate::planner::UNIT_GRAVITATIONAL_PARAMETER;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AnimationConfig {
    /// Wall clock time between ticks [ms]
    pub(crate) tick_interval_ms: u64,
    /// Simulated time per tick [days]
    pub(crate) step_days: f64,
    pub(crate) frame_count: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            tick_interval_ms: 50,
            step_days: 10.0,
            frame_count: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BodyConfig {
    pub(crate) name: String,
    pub(crate) radius: f64,
    pub(crate) period: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MissionConfig {
    /// Central body gravitational parameter [AU^3/year^2]
    pub(crate) gravitational_parameter: f64,
    pub(crate) animation: AnimationConfig,
    pub(crate) bodies: Option<Vec<BodyConfig>>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            gravitational_parameter: UNIT_GRAVITATIONAL_PARAMETER,
            animation: AnimationConfig::default(),
            bodies: None,
        }
    }
}

impl MissionConfig {
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<MissionConfig, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub(crate) fn parse(text: &str) -> Result<MissionConfig, ConfigError> {
        let config: MissionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mu = self.gravitational_parameter;
        if !(mu.is_finite() && mu > 0.0) {
            return Err(ConfigError::InvalidGravitationalParameter(mu));
        }

        let animation = &self.animation;
        if animation.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidAnimation("tick interval must be positive".to_string()));
        }
        if !(animation.step_days.is_finite() && animation.step_days > 0.0) {
            return Err(ConfigError::InvalidAnimation(format!("step of {} days", animation.step_days)));
        }
        if animation.frame_count == 0 {
            return Err(ConfigError::InvalidAnimation("frame count must be positive".to_string()));
        }

        // Bodies must form a valid catalog
        self.catalog()?;

        Ok(())
    }

    pub(crate) fn catalog(&self) -> Result<OrbitCatalog, CatalogError> {
        match self.bodies {
            Some(ref bodies) => OrbitCatalog::new(
                bodies.iter().map(|body| Body::new(&body.name, body.radius, body.period)).collect()
            ),
            None => Ok(OrbitCatalog::solar_system()),
        }
    }

    pub(crate) fn clock(&self) -> AnimationClock {
        AnimationClock::new(
            Duration::from_milliseconds(self.animation.tick_interval_ms as f64),
            Duration::from_days(self.animation.step_days),
            self.animation.frame_count,
        )
    }
}
