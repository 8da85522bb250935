//! Read-only queries the host answers on the bot's behalf.
//!
//! Both traits are implemented for plain closures so a host can hand over
//! functions directly:
//!
//! ```
//! use sail_agent::engine::oracle::WorldMap;
//!
//! let all_sea = |_lat: f64, _lon: f64| 1.0;
//! assert!(all_sea.is_sea(46.5, -1.8));
//! ```

use crate::engine::models::WindData;

/// Terrain classification: 1.0 for sea, 0.0 for land.
pub trait WorldMap {
    fn terrain(&self, lat: f64, lon: f64) -> f64;

    fn is_sea(&self, lat: f64, lon: f64) -> bool {
        self.terrain(lat, lon) >= 0.5
    }

    fn is_land(&self, lat: f64, lon: f64) -> bool {
        !self.is_sea(lat, lon)
    }
}

impl<F> WorldMap for F
where
    F: Fn(f64, f64) -> f64,
{
    fn terrain(&self, lat: f64, lon: f64) -> f64 {
        self(lat, lon)
    }
}

/// Weather forecast lookup. `hours` is measured from now.
pub trait Forecast {
    fn wind(&self, lat: f64, lon: f64, hours: f64) -> WindData;
}

impl<F> Forecast for F
where
    F: Fn(f64, f64, f64) -> WindData,
{
    fn wind(&self, lat: f64, lon: f64, hours: f64) -> WindData {
        self(lat, lon, hours)
    }
}
