use log::{Level, debug, log_enabled};

use crate::engine::models::{Directive, Pose};
use crate::engine::navigator::Navigator;
use crate::engine::oracle::{Forecast, WorldMap};
use crate::engine::route::RouteTracker;
use crate::error::ConfigError;
use crate::parsers::course::CourseConfig;

/// The ship-controlling agent. The host calls [`Bot::run`] once per
/// simulation step, serially.
#[derive(Debug, Clone)]
pub struct Bot {
    pub team: String,
    pub route: RouteTracker,
    pub navigator: Navigator,
}

impl Bot {
    pub fn new(config: CourseConfig) -> Result<Self, ConfigError> {
        config.navigator.validate()?;
        let checkpoints = config.checkpoints()?;
        Ok(Self {
            team: config.team,
            route: RouteTracker::new(checkpoints),
            navigator: Navigator::new(config.navigator),
        })
    }

    /// Computes this tick's directive.
    ///
    /// `t` and `dt` are in hours, `pose.speed` in km/h. The forecast is
    /// accepted for interface compatibility and only consulted for debug
    /// output.
    pub fn run(
        &mut self,
        t: f64,
        dt: f64,
        pose: &Pose,
        forecast: &impl Forecast,
        world_map: &impl WorldMap,
    ) -> Directive {
        if log_enabled!(Level::Debug) {
            let wind = forecast.wind(pose.latitude, pose.longitude, 0.0);
            debug!(
                "t={:.2}h at ({:.4}, {:.4}) heading {:.0}, {:.1} km/h, wind {:.1} m/s from {:.0}",
                t,
                pose.latitude,
                pose.longitude,
                pose.heading,
                pose.speed,
                wind.speed(),
                wind.direction()
            );
        }

        let evasive_heading = self.navigator.avoid_land(pose, world_map);
        let status = self.route.advance(pose);
        self.navigator.decide(pose, dt, &status, evasive_heading)
    }

    pub fn is_finished(&self) -> bool {
        self.route.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::{Coordinate, Steering, WindData};
    use crate::engine::navigator::{NavigatorConfig, Precedence};
    use crate::parsers::course::CheckpointSpec;

    fn calm(_lat: f64, _lon: f64, _t: f64) -> WindData {
        WindData { u: 0.0, v: 0.0 }
    }

    fn sea(_lat: f64, _lon: f64) -> f64 {
        1.0
    }

    fn config(checkpoints: &[(f64, f64, f64)]) -> CourseConfig {
        CourseConfig {
            team: "Test".to_string(),
            start: Coordinate::new(0.0, 0.0),
            navigator: NavigatorConfig::default(),
            checkpoints: checkpoints
                .iter()
                .map(|&(latitude, longitude, radius)| CheckpointSpec { latitude, longitude, radius })
                .collect(),
        }
    }

    #[test]
    fn test_far_checkpoint_directive() {
        let mut bot = Bot::new(config(&[(10.0, 10.0, 50.0), (20.0, 20.0, 50.0)])).unwrap();
        let pose = Pose::new(0.0, 0.0, 45.0, 1.0);

        let directive = bot.run(0.0, 1.0, &pose, &calm, &sea);
        assert_eq!(directive.steering, Steering::Location(Coordinate::new(10.0, 10.0)));
        assert_eq!(directive.sail, Some(1.0));
    }

    #[test]
    fn test_finishing_at_last_checkpoint() {
        let mut bot = Bot::new(config(&[(46.5, -1.8, 5.0)])).unwrap();
        let pose = Pose::new(46.5, -1.8, 300.0, 20.0);

        let directive = bot.run(100.0, 1.0, &pose, &calm, &sea);
        assert!(bot.is_finished());
        assert_eq!(directive, Directive::new(Steering::Heading(300.0), Some(0.0)));

        // Subsequent ticks keep the terminal directive, wherever the boat drifts
        let drifted = Pose::new(46.0, -2.0, 310.0, 5.0);
        let directive = bot.run(101.0, 1.0, &drifted, &calm, &sea);
        assert_eq!(directive, Directive::new(Steering::Heading(310.0), Some(0.0)));
    }

    #[test]
    fn test_on_land_escapes_before_seeking() {
        let mut bot = Bot::new(config(&[(10.0, 10.0, 50.0)])).unwrap();
        let world = |_lat: f64, lon: f64| if lon < -0.009 { 1.0 } else { 0.0 };
        let pose = Pose::new(0.0, 0.0, 0.0, 10.0);

        let directive = bot.run(0.0, 1.0, &pose, &calm, &world);
        assert_eq!(directive.steering, Steering::Heading(180.0));
        assert_eq!(directive.sail, Some(1.0));
    }

    #[test]
    fn test_goal_seeking_precedence_from_config() {
        let mut cfg = config(&[(10.0, 10.0, 50.0)]);
        cfg.navigator.precedence = Precedence::GoalSeeking;
        let mut bot = Bot::new(cfg).unwrap();
        let land = |_lat: f64, _lon: f64| 0.0;

        let directive = bot.run(0.0, 1.0, &Pose::new(0.0, 0.0, 0.0, 10.0), &calm, &land);
        assert_eq!(directive.steering, Steering::Location(Coordinate::new(10.0, 10.0)));
    }

    #[test]
    fn test_throttle_follows_the_active_checkpoint() {
        // First checkpoint is tiny and already passed this tick; the second
        // is large and far, so the sail must be the second one's value.
        let mut bot = Bot::new(config(&[(0.0, 0.0, 1.0), (5.0, 0.0, 50.0)])).unwrap();
        let pose = Pose::new(0.0, 0.001, 0.0, 100.0);

        let directive = bot.run(0.0, 1.0, &pose, &calm, &sea);
        assert_eq!(directive.steering, Steering::Location(Coordinate::new(5.0, 0.0)));
        assert_eq!(directive.sail, Some(1.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(Bot::new(config(&[])).is_err());
        assert!(Bot::new(config(&[(0.0, 0.0, -5.0)])).is_err());

        let mut cfg = config(&[(0.0, 0.0, 5.0)]);
        cfg.navigator.probe_step_deg = 0.0;
        assert!(matches!(Bot::new(cfg), Err(ConfigError::Navigator(_))));
    }
}
