use serde::Deserialize;
use std::error::Error;
use std::fs;
use uom::si::f64::Time;
use uom::si::time::second;

/// One timestamped sample of a trajectory, as the path planner exports it.
/// Units are SI: seconds, meters, meters/second, radians.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrajectoryState {
    pub time: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub pose: Pose,
    pub curvature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Pose {
    pub translation: Translation,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rotation {
    pub radians: f64,
}

/// An ordered run of trajectory samples for the drivetrain to chase.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    states: Vec<TrajectoryState>,
}

impl Path {
    pub fn empty() -> Path {
        Path { states: Vec::new() }
    }

    /// Parses the contents of a trajectory JSON export.
    pub fn from_trajectory(content: &str) -> Result<Path, serde_json::Error> {
        let states = serde_json::from_str(content)?;
        Ok(Path { states })
    }

    /// Reads and parses `<dir>/<name>.json`.
    pub fn from_file(dir: &str, name: &str) -> Result<Path, Box<dyn Error>> {
        let content = fs::read_to_string(format!("{}/{}.json", dir, name))?;
        Ok(Path::from_trajectory(&content)?)
    }

    /// Like `from_file`, but a missing or malformed file becomes an empty
    /// path so a bad deploy can't take down the robot loop.
    pub fn load_or_empty(dir: &str, name: &str) -> Path {
        match Path::from_file(dir, name) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Failed to load trajectory {}: {}", name, e);
                Path::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[TrajectoryState] {
        &self.states
    }

    /// Total run time of the path.
    pub fn length(&self) -> Time {
        Time::new::<second>(self.states.last().map(|s| s.time).unwrap_or(0.))
    }

    /// Samples the path at `time`, interpolating between the recorded
    /// states. Clamps to the endpoints outside the recorded range; `None`
    /// only for an empty path.
    pub fn get(&self, time: Time) -> Option<TrajectoryState> {
        let first = self.states.first()?;
        let last = self.states.last()?;

        let t = time.get::<second>();
        if t <= first.time {
            return Some(*first);
        }
        if t >= last.time {
            return Some(*last);
        }

        let next_index = self.states.iter().position(|s| s.time > t)?;
        let before = &self.states[next_index - 1];
        let after = &self.states[next_index];

        let span = after.time - before.time;
        if span <= 0. {
            return Some(*after);
        }
        let frac = (t - before.time) / span;

        Some(TrajectoryState {
            time: t,
            velocity: lerp(before.velocity, after.velocity, frac),
            acceleration: lerp(before.acceleration, after.acceleration, frac),
            curvature: lerp(before.curvature, after.curvature, frac),
            pose: Pose {
                translation: Translation {
                    x: lerp(before.pose.translation.x, after.pose.translation.x, frac),
                    y: lerp(before.pose.translation.y, after.pose.translation.y, frac),
                },
                rotation: Rotation {
                    radians: lerp(
                        before.pose.rotation.radians,
                        after.pose.rotation.radians,
                        frac,
                    ),
                },
            },
        })
    }
}

fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + (b - a) * frac
}

#[cfg(test)]
mod path_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const TWO_STATE_TRAJECTORY: &str = r#"[
        {"time": 0.0, "velocity": 0.0, "acceleration": 2.0,
         "pose": {"translation": {"x": 0.762, "y": 0.762}, "rotation": {"radians": 0.0}},
         "curvature": 0.0},
        {"time": 1.0, "velocity": 2.0, "acceleration": 0.0,
         "pose": {"translation": {"x": 1.762, "y": 0.762}, "rotation": {"radians": 0.5}},
         "curvature": 0.2}
    ]"#;

    #[test]
    fn parses_planner_export() {
        let path = Path::from_trajectory(TWO_STATE_TRAJECTORY).unwrap();

        assert_eq!(path.states().len(), 2);
        assert_approx_eq!(f64, path.states()[0].pose.translation.x, 0.762);
        assert_approx_eq!(f64, path.states()[1].velocity, 2.0);
        assert_approx_eq!(f64, path.length().get::<second>(), 1.0);
    }

    #[test]
    fn get_interpolates_between_samples() {
        let path = Path::from_trajectory(TWO_STATE_TRAJECTORY).unwrap();

        let sample = path.get(Time::new::<second>(0.5)).unwrap();
        assert_approx_eq!(f64, sample.velocity, 1.0);
        assert_approx_eq!(f64, sample.pose.translation.x, 1.262);
        assert_approx_eq!(f64, sample.pose.translation.y, 0.762);
        assert_approx_eq!(f64, sample.pose.rotation.radians, 0.25);
        assert_approx_eq!(f64, sample.curvature, 0.1);
    }

    #[test]
    fn get_clamps_to_the_endpoints() {
        let path = Path::from_trajectory(TWO_STATE_TRAJECTORY).unwrap();

        let before = path.get(Time::new::<second>(-1.0)).unwrap();
        assert_approx_eq!(f64, before.velocity, 0.0);

        let after = path.get(Time::new::<second>(10.0)).unwrap();
        assert_approx_eq!(f64, after.velocity, 2.0);
        assert_approx_eq!(f64, after.pose.translation.x, 1.762);
    }

    #[test]
    fn empty_path_has_no_samples() {
        let path = Path::empty();
        assert!(path.is_empty());
        assert_approx_eq!(f64, path.length().get::<second>(), 0.0);
        assert_eq!(path.get(Time::new::<second>(0.0)), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Path::from_file("/nonexistent", "BarrelRacing").is_err());
    }

    #[test]
    fn malformed_trajectory_is_an_error() {
        assert!(Path::from_trajectory("this is not a trajectory").is_err());
    }

    #[test]
    fn load_or_empty_swallows_bad_files() {
        let path = Path::load_or_empty("/nonexistent", "BarrelRacing");
        assert!(path.is_empty());
    }
}
