//! Course file loader.
//!
//! A course is a TOML document naming the team, the start line, optional
//! navigator tuning and the ordered list of checkpoints:
//!
//! ```toml
//! team = "Fast Bått"
//! start = { lat = 46.47, lon = -1.85 }
//!
//! [navigator]
//! probe-step-deg = 45.0
//! precedence = "land-avoidance"
//!
//! [[checkpoints]]
//! latitude = 17.38
//! longitude = -68.9
//! radius = 10.0
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::models::{Checkpoint, Coordinate};
use crate::engine::navigator::NavigatorConfig;
use crate::error::{ConfigError, CourseError};

/// Start line off Les Sables-d'Olonne; the course finishes there too.
pub const DEFAULT_START: Coordinate = Coordinate { lat: 46.47, lon: -1.85 };

/// A checkpoint as written in a course file, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSpec {
    pub latitude: f64,
    pub longitude: f64,
    /// km
    pub radius: f64,
}

impl CheckpointSpec {
    pub fn new(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self { latitude, longitude, radius }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseConfig {
    pub team: String,
    pub start: Coordinate,
    #[serde(default)]
    pub navigator: NavigatorConfig,
    pub checkpoints: Vec<CheckpointSpec>,
}

impl Default for CourseConfig {
    /// Westabout round-the-world course: through the Caribbean and the
    /// Panama canal gates, across the Pacific, down into the Southern Ocean,
    /// over the Indian Ocean, round the Cape and back up the Atlantic.
    fn default() -> Self {
        let checkpoints = vec![
            CheckpointSpec::new(17.38, -68.9, 10.0),
            CheckpointSpec::new(9.35529, -80.593349, 50.0),
            CheckpointSpec::new(8.82625, -79.64060, 5.0),
            CheckpointSpec::new(8.83, -79.48, 20.0),
            CheckpointSpec::new(4.50, -79.25, 50.0),
            CheckpointSpec::new(2.806318, -168.943864, 1990.0),
            CheckpointSpec::new(-62.052286, 169.214572, 50.0),
            CheckpointSpec::new(-15.668984, 77.674694, 1190.0),
            CheckpointSpec::new(-39.438937, 19.836265, 50.0),
            CheckpointSpec::new(14.881699, -21.024326, 50.0),
            CheckpointSpec::new(44.076538, -18.292936, 50.0),
            CheckpointSpec::new(DEFAULT_START.lat, DEFAULT_START.lon, 5.0),
        ];

        Self {
            team: "Fast Bått".to_string(),
            start: DEFAULT_START,
            navigator: NavigatorConfig::default(),
            checkpoints,
        }
    }
}

impl CourseConfig {
    /// Reads and validates a course file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading course from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.navigator.validate()?;
        config.checkpoints()?;

        info!("Course '{}' has {} checkpoints", config.team, config.checkpoints.len());
        Ok(config)
    }

    /// Validated checkpoints in course order, all unreached.
    pub fn checkpoints(&self) -> Result<Vec<Checkpoint>, CourseError> {
        if self.checkpoints.is_empty() {
            return Err(CourseError::Empty);
        }
        self.checkpoints
            .iter()
            .map(|c| Checkpoint::new(c.latitude, c.longitude, c.radius))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::navigator::Precedence;
    use tempfile::TempDir;

    fn write(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("course.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_course_is_valid() {
        let config = CourseConfig::default();
        let checkpoints = config.checkpoints().unwrap();
        assert_eq!(checkpoints.len(), 12);
        assert!(checkpoints.iter().all(|c| !c.reached()));

        // Finish line is the start line
        let finish = checkpoints.last().unwrap();
        assert_eq!(finish.location(), config.start);
        assert_eq!(finish.radius(), 5.0);
    }

    #[test]
    fn test_bundled_course_matches_default() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/course.toml");
        let config = CourseConfig::load(path).unwrap();
        assert_eq!(config, CourseConfig::default());
    }

    #[test]
    fn test_navigator_section_is_optional() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
team = "Solo"
start = { lat = 10.0, lon = 20.0 }

[[checkpoints]]
latitude = 11.0
longitude = 21.0
radius = 25.0
"#,
        );

        let config = CourseConfig::load(&path).unwrap();
        assert_eq!(config.navigator, NavigatorConfig::default());
        assert_eq!(config.checkpoints, vec![CheckpointSpec::new(11.0, 21.0, 25.0)]);
    }

    #[test]
    fn test_partial_navigator_section() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
team = "Solo"
start = { lat = 10.0, lon = 20.0 }

[navigator]
probe-step-deg = 30.0
precedence = "goal-seeking"

[[checkpoints]]
latitude = 11.0
longitude = 21.0
radius = 25.0
"#,
        );

        let config = CourseConfig::load(&path).unwrap();
        assert_eq!(config.navigator.probe_step_deg, 30.0);
        assert_eq!(config.navigator.probe_distance_deg, 0.01);
        assert_eq!(config.navigator.precedence, Precedence::GoalSeeking);
    }

    #[test]
    fn test_invalid_checkpoint_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
team = "Solo"
start = { lat = 10.0, lon = 20.0 }

[[checkpoints]]
latitude = 95.0
longitude = 21.0
radius = 25.0
"#,
        );

        let err = CourseConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Course(CourseError::Latitude(_))));
    }

    #[test]
    fn test_empty_course_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
team = "Solo"
start = { lat = 10.0, lon = 20.0 }
checkpoints = []
"#,
        );

        let err = CourseConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Course(CourseError::Empty)));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "team = ");
        assert!(matches!(CourseConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = CourseConfig::load("/nonexistent/course.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
