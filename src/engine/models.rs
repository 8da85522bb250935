use serde::{Deserialize, Serialize};

use crate::engine::geodesy;
use crate::error::CourseError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A geofenced waypoint. The vessel must come within `radius` km of the
/// center for it to count as reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Checkpoint {
    latitude: f64,
    longitude: f64,
    radius: f64,
    reached: bool,
}

impl Checkpoint {
    pub fn new(latitude: f64, longitude: f64, radius: f64) -> Result<Self, CourseError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CourseError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CourseError::Longitude(longitude));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CourseError::Radius(radius));
        }
        Ok(Self { latitude, longitude, radius, reached: false })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn reached(&self) -> bool {
        self.reached
    }

    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Flags the checkpoint as reached. There is no way back.
    pub fn mark_reached(&mut self) {
        self.reached = true;
    }
}

/// Kinematic state of the vessel as reported by the host for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub longitude: f64,
    pub latitude: f64,
    /// Mathematical convention: 0 = East, counter-clockwise, degrees
    pub heading: f64,
    /// km/h
    pub speed: f64,
    /// Heading and speed as an (east, north) vector
    pub vector: [f64; 2],
}

impl Pose {
    pub fn new(latitude: f64, longitude: f64, heading: f64, speed: f64) -> Self {
        let rad = heading.to_radians();
        Self {
            longitude,
            latitude,
            heading,
            speed,
            vector: [speed * rad.cos(), speed * rad.sin()],
        }
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Weather data for wind at a specific point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindData {
    /// U component of wind (m/s)
    pub u: f32,
    /// V component of wind (m/s)
    pub v: f32,
}

impl WindData {
    pub fn speed(&self) -> f32 {
        (self.u.powi(2) + self.v.powi(2)).sqrt()
    }

    /// Direction the wind blows from, compass degrees
    pub fn direction(&self) -> f32 {
        let angle = self.v.atan2(self.u).to_degrees();
        let mut dir = 270.0 - angle;
        if dir < 0.0 { dir += 360.0; }
        if dir >= 360.0 { dir -= 360.0; }
        dir
    }
}

/// The one navigational field a directive carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Steering {
    /// Absolute heading, mathematical degrees
    Heading(f64),
    /// Let the host steer towards this point
    Location(Coordinate),
    /// (east, north) direction to follow
    Vector { x: f64, y: f64 },
    /// Degrees to turn left of the current heading
    TurnLeft(f64),
    /// Degrees to turn right of the current heading
    TurnRight(f64),
}

impl Steering {
    /// Resolves the steering command to an absolute heading (mathematical
    /// degrees) for a vessel currently at `pose`.
    pub fn heading_from(&self, pose: &Pose) -> f64 {
        match *self {
            Steering::Heading(h) => geodesy::normalize_heading(h),
            Steering::Location(target) => {
                geodesy::compass_to_math(geodesy::bearing(&pose.position(), &target))
            }
            Steering::Vector { x, y } => geodesy::normalize_heading(y.atan2(x).to_degrees()),
            Steering::TurnLeft(deg) => geodesy::normalize_heading(pose.heading + deg),
            Steering::TurnRight(deg) => geodesy::normalize_heading(pose.heading - deg),
        }
    }
}

/// Per-tick command returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub steering: Steering,
    /// Sail fraction in [0, 1]. `None` leaves the sails as they are.
    pub sail: Option<f64>,
}

impl Directive {
    pub fn new(steering: Steering, sail: Option<f64>) -> Self {
        Self { steering, sail }
    }
}

/// The state of the boat at a specific point in time
#[derive(Debug, Clone, PartialEq)]
pub struct BoatState {
    pub position: Coordinate,
    /// Mathematical degrees
    pub heading: f64,
    /// Speed over ground, km/h
    pub speed: f64,
    pub time: chrono::DateTime<chrono::Utc>,
    /// Elapsed time since departure in hours
    pub elapsed_time: f64,
}

impl BoatState {
    pub fn pose(&self) -> Pose {
        Pose::new(self.position.lat, self.position.lon, self.heading, self.speed)
    }
}
