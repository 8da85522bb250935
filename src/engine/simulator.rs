use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::engine::bot::Bot;
use crate::engine::geodesy;
use crate::engine::models::{BoatState, Coordinate, Directive, WindData};
use crate::engine::oracle::{Forecast, WorldMap};

/// Kinematic stand-in for the race host.
///
/// The boat turns instantly to the commanded heading and moves at
/// `hull_speed * sail` along the great circle for `dt` hours. No wind, no
/// polars.
pub struct Simulator {
    pub state: BoatState,
    /// Speed at full sail, km/h
    pub hull_speed: f64,
    /// Time step, hours
    pub dt: f64,
    /// Current sail setting, kept between ticks
    pub sail: f64,
}

impl Simulator {
    pub fn new(start: Coordinate, hull_speed: f64, dt: f64, departure: DateTime<Utc>) -> Self {
        Self {
            state: BoatState {
                position: start,
                heading: 0.0,
                speed: 0.0,
                time: departure,
                elapsed_time: 0.0,
            },
            hull_speed,
            dt,
            sail: 1.0,
        }
    }

    /// Applies a directive and advances the clock by one step.
    pub fn apply(&mut self, directive: &Directive) {
        let pose = self.state.pose();
        let heading = directive.steering.heading_from(&pose);
        if let Some(sail) = directive.sail {
            self.sail = sail.clamp(0.0, 1.0);
        }

        let speed = self.hull_speed * self.sail;
        let distance_km = speed * self.dt;
        let position = geodesy::destination(
            &self.state.position,
            distance_km,
            geodesy::math_to_compass(heading),
        );

        debug!(
            "Moved {:.1} km on heading {:.0} to ({:.4}, {:.4})",
            distance_km, heading, position.lat, position.lon
        );

        self.state = BoatState {
            position,
            heading,
            speed,
            time: self.state.time + Duration::milliseconds((self.dt * 3_600_000.0) as i64),
            elapsed_time: self.state.elapsed_time + self.dt,
        };
    }

    /// One full host step: ask the bot, then move.
    pub fn step(
        &mut self,
        bot: &mut Bot,
        forecast: &impl Forecast,
        world_map: &impl WorldMap,
    ) -> Directive {
        let pose = self.state.pose();
        let directive = bot.run(self.state.elapsed_time, self.dt, &pose, forecast, world_map);
        self.apply(&directive);
        directive
    }

    /// Runs until the bot finishes or `max_steps` is hit. Returns the
    /// number of steps taken.
    pub fn run(
        &mut self,
        bot: &mut Bot,
        forecast: &impl Forecast,
        world_map: &impl WorldMap,
        max_steps: usize,
    ) -> usize {
        for step in 0..max_steps {
            if bot.is_finished() {
                return step;
            }
            self.step(bot, forecast, world_map);
        }
        max_steps
    }
}

/// Forecast that reports no wind anywhere.
pub fn calm(_lat: f64, _lon: f64, _hours: f64) -> WindData {
    WindData { u: 0.0, v: 0.0 }
}
