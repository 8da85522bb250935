use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::engine::geodesy;
use crate::engine::models::{Directive, Pose, Steering};
use crate::engine::oracle::WorldMap;
use crate::engine::route::RouteStatus;
use crate::error::ConfigError;

/// Which command wins when the vessel is on land and also has a checkpoint
/// to sail for. A directive carries exactly one steering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// Emit the evasive heading and drop the location for this tick.
    #[default]
    LandAvoidance,
    /// Emit the checkpoint location and ignore the evasive heading.
    GoalSeeking,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigatorConfig {
    /// Angular increment between candidate headings, degrees
    pub probe_step_deg: f64,
    /// How far ahead each candidate is probed, degrees of lat/lon
    pub probe_distance_deg: f64,
    /// Start slowing once within `approach_factor * radius + jump` of the goal
    pub approach_factor: f64,
    pub precedence: Precedence,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            probe_step_deg: 45.0,
            probe_distance_deg: 0.01,
            approach_factor: 2.0,
            precedence: Precedence::LandAvoidance,
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.probe_step_deg > 0.0 && self.probe_step_deg <= 360.0) {
            return Err(ConfigError::Navigator(format!(
                "probe-step-deg must be in (0, 360], got {}",
                self.probe_step_deg
            )));
        }
        if !(self.probe_distance_deg > 0.0 && self.probe_distance_deg.is_finite()) {
            return Err(ConfigError::Navigator(format!(
                "probe-distance-deg must be positive, got {}",
                self.probe_distance_deg
            )));
        }
        if !(self.approach_factor >= 0.0 && self.approach_factor.is_finite()) {
            return Err(ConfigError::Navigator(format!(
                "approach-factor must be non-negative, got {}",
                self.approach_factor
            )));
        }
        Ok(())
    }
}

/// Per-tick steering and sail policy.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    pub config: NavigatorConfig,
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self { config }
    }

    /// Greedy one-step land escape.
    ///
    /// If the vessel is on land, candidate headings are tried starting at the
    /// current heading and sweeping a full turn. Each is probed a short
    /// distance ahead on a flat lat/lon plane (no geodesy, so it gets worse
    /// near the poles and the date line). The first candidate that lands in
    /// the sea is returned. `None` when already at sea or when every probe
    /// is land.
    pub fn avoid_land(&self, pose: &Pose, world_map: &impl WorldMap) -> Option<f64> {
        if world_map.is_sea(pose.latitude, pose.longitude) {
            return None;
        }

        let step = self.config.probe_step_deg;
        let reach = self.config.probe_distance_deg;

        for offset in (0..).map(|k| k as f64 * step).take_while(|o| *o < 360.0) {
            let candidate = geodesy::normalize_heading(pose.heading + offset);
            let rad = candidate.to_radians();
            let probe_lon = pose.longitude + reach * rad.cos();
            let probe_lat = pose.latitude + reach * rad.sin();

            if world_map.is_sea(probe_lat, probe_lon) {
                debug!("On land, escaping on heading {:.0}", candidate);
                return Some(candidate);
            }
        }

        warn!(
            "On land at ({:.4}, {:.4}) and no probe found sea; keeping heading {:.0}",
            pose.latitude, pose.longitude, pose.heading
        );
        None
    }

    /// Sail fraction for a checkpoint `distance` km away.
    ///
    /// Far from the checkpoint this is full sail. Inside the approach zone
    /// the sail is cut so one tick of travel (`jump`) does not overshoot the
    /// radius by much. A vessel that is not moving gets full sail.
    pub fn throttle(&self, distance: f64, radius: f64, jump: f64) -> f64 {
        if distance >= self.config.approach_factor * radius + jump {
            return 1.0;
        }
        if jump.is_nan() || jump <= f64::EPSILON {
            warn!("No travel this tick (jump = {}), using full sail", jump);
            return 1.0;
        }
        (radius / jump).clamp(0.0, 1.0)
    }

    /// Merges the land-avoidance result and the active checkpoint into one
    /// directive.
    pub fn decide(
        &self,
        pose: &Pose,
        dt: f64,
        status: &RouteStatus,
        evasive_heading: Option<f64>,
    ) -> Directive {
        let active = match status {
            RouteStatus::Active(active) => active,
            RouteStatus::Complete => {
                let heading = evasive_heading.unwrap_or(pose.heading);
                return Directive::new(Steering::Heading(heading), Some(0.0));
            }
        };

        let jump = dt * pose.speed.abs();
        let sail = self.throttle(active.distance, active.checkpoint.radius(), jump);
        let location = Steering::Location(active.checkpoint.location());

        let steering = match (evasive_heading, self.config.precedence) {
            (Some(heading), Precedence::LandAvoidance) => {
                debug!("Heading override {:.0} replaces location this tick", heading);
                Steering::Heading(heading)
            }
            (Some(heading), Precedence::GoalSeeking) => {
                debug!("Ignoring heading override {:.0} in favour of location", heading);
                location
            }
            (None, _) => location,
        };

        Directive::new(steering, Some(sail))
    }
}
