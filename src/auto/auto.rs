use crate::Robot;
use crate::auto::path::Path;
use crate::chooser::{ChooserFactory, SendableChooser};
use crate::command::Command;
use crate::constants::auto::{
    AUTO_TICK_MS, BARREL_RACING_START_INCHES, BOUNCE_START_INCHES, DEPLOY_PATHS_DIR,
    SLALOM_START_INCHES,
};
use crate::subsystems::drivetrain::{Drivetrain, RobotPoseEstimate};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::time::{Duration, Instant, sleep};
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length, Time};
use uom::si::length::inch;
use uom::si::time::second;

/// The AutoNav challenges we have paths for.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Auto {
    BarrelRacing,
    Bounce,
    Slalom,
}

impl Auto {
    pub fn from_dashboard(s: &str) -> Option<Self> {
        match s {
            "BarrelRacing" => Some(Auto::BarrelRacing),
            "Bounce" => Some(Auto::Bounce),
            "Slalom" => Some(Auto::Slalom),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Auto::BarrelRacing => "BarrelRacing",
            Auto::Bounce => "Bounce",
            Auto::Slalom => "Slalom",
        }
    }

    pub fn iterator() -> Vec<Self> {
        vec![Auto::BarrelRacing, Auto::Bounce, Auto::Slalom]
    }

    pub fn names() -> Vec<String> {
        Self::iterator()
            .iter()
            .map(|a| a.name().to_owned())
            .collect()
    }

    /// Where the robot gets placed for this challenge, facing +x.
    pub fn start_pose(&self) -> RobotPoseEstimate {
        let start_inches = match self {
            Auto::BarrelRacing => BARREL_RACING_START_INCHES,
            Auto::Bounce => BOUNCE_START_INCHES,
            Auto::Slalom => SLALOM_START_INCHES,
        };

        RobotPoseEstimate::new(
            Length::new::<inch>(start_inches.x),
            Length::new::<inch>(start_inches.y),
            Angle::new::<radian>(0.),
        )
    }

    /// Runs the chosen challenge on the robot loop until its command
    /// reports finished.
    pub async fn run_auto(robot: Rc<RefCell<Robot>>, chosen: Auto) {
        let drivetrain = robot.borrow().drivetrain.clone();
        let mut command = AutoNavCommand::new(drivetrain, chosen);

        command.initialize();
        loop {
            command.execute();
            if command.is_finished() {
                command.end(false);
                break;
            }
            sleep(Duration::from_millis(AUTO_TICK_MS)).await;
        }
    }
}

/// Builds the dashboard chooser the drive team picks a challenge from.
pub fn auto_chooser(factory: &ChooserFactory) -> SendableChooser<Auto> {
    let chooser = factory.create();
    chooser.set_default_option(Auto::BarrelRacing.name(), Auto::BarrelRacing);
    for auto in Auto::iterator() {
        chooser.add_option(auto.name(), auto);
    }
    chooser
}

/// Drives one AutoNav challenge: reset odometry to the challenge's start
/// pose, then chase its trajectory until the clock runs out. The trajectory
/// is read from the deploy directory once, up front; a challenge whose file
/// didn't deploy becomes a no-op instead of a crash.
pub struct AutoNavCommand {
    drivetrain: Rc<RefCell<Drivetrain>>,
    challenge: Auto,
    path: Path,
    started: Option<Instant>,
}

impl AutoNavCommand {
    pub fn new(drivetrain: Rc<RefCell<Drivetrain>>, challenge: Auto) -> AutoNavCommand {
        let path = Path::load_or_empty(DEPLOY_PATHS_DIR, challenge.name());
        AutoNavCommand::with_path(drivetrain, challenge, path)
    }

    /// Builds the command around an already-parsed path.
    pub fn with_path(
        drivetrain: Rc<RefCell<Drivetrain>>,
        challenge: Auto,
        path: Path,
    ) -> AutoNavCommand {
        AutoNavCommand {
            drivetrain,
            challenge,
            path,
            started: None,
        }
    }
}

impl Command for AutoNavCommand {
    fn initialize(&mut self) {
        if let Ok(mut drivetrain) = self.drivetrain.try_borrow_mut() {
            drivetrain.reset_odometry(self.challenge.start_pose());
        } else {
            eprintln!("Couldn't borrow drivetrain to reset odometry");
        }
        self.started = Some(Instant::now());
    }

    fn execute(&mut self) {
        if let Some(started) = self.started {
            let elapsed = Time::new::<second>(started.elapsed().as_secs_f64());
            if let Some(sample) = self.path.get(elapsed) {
                if let Ok(mut drivetrain) = self.drivetrain.try_borrow_mut() {
                    drivetrain.follow(&sample);
                }
            }
        }
    }

    fn end(&mut self, interrupted: bool) {
        // a cancelled auto must not leave the drivetrain running
        if interrupted {
            if let Ok(mut drivetrain) = self.drivetrain.try_borrow_mut() {
                drivetrain.tank_drive_volts(0., 0.);
            }
        }
    }

    fn is_finished(&self) -> bool {
        if self.path.is_empty() {
            return true;
        }
        match self.started {
            Some(started) => started.elapsed().as_secs_f64() >= self.path.length().get::<second>(),
            None => false,
        }
    }
}

#[cfg(test)]
mod auto_tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use uom::si::length::meter;

    const STRAIGHT_LINE: &str = r#"[
        {"time": 0.0, "velocity": 1.0, "acceleration": 0.0,
         "pose": {"translation": {"x": 0.762, "y": 0.762}, "rotation": {"radians": 0.0}},
         "curvature": 0.0},
        {"time": 2.0, "velocity": 1.0, "acceleration": 0.0,
         "pose": {"translation": {"x": 2.762, "y": 0.762}, "rotation": {"radians": 0.0}},
         "curvature": 0.0}
    ]"#;

    fn test_drivetrain() -> Rc<RefCell<Drivetrain>> {
        Rc::new(RefCell::new(Drivetrain::new(RobotPoseEstimate::new(
            Length::new::<meter>(0.),
            Length::new::<meter>(0.),
            Angle::new::<radian>(0.),
        ))))
    }

    #[test]
    fn dashboard_names_round_trip() {
        for auto in Auto::iterator() {
            assert_eq!(Auto::from_dashboard(auto.name()), Some(auto));
        }
        assert_eq!(Auto::from_dashboard("DoesNotExist"), None);
    }

    #[test]
    fn start_poses_sit_thirty_inches_in() {
        for auto in Auto::iterator() {
            let pose = auto.start_pose();
            assert_approx_eq!(f64, pose.x.get::<meter>(), 0.762, epsilon = 0.000001);
            assert_approx_eq!(f64, pose.y.get::<meter>(), 0.762, epsilon = 0.000001);
            assert_approx_eq!(f64, pose.angle.get::<radian>(), 0.);
        }
    }

    #[test]
    fn chooser_defaults_to_barrel_racing() {
        let factory = ChooserFactory::new();
        let chooser = auto_chooser(&factory);

        assert_eq!(chooser.snapshot().options, Auto::names());
        assert_eq!(chooser.get_selected(), Some(Auto::BarrelRacing));

        chooser.set_selected("Slalom");
        assert_eq!(chooser.get_selected(), Some(Auto::Slalom));
    }

    #[test]
    fn missing_trajectory_degrades_to_a_noop() {
        let drivetrain = test_drivetrain();
        // nothing is deployed at /home/lvuser on a dev machine
        let mut command = AutoNavCommand::new(drivetrain.clone(), Auto::Slalom);

        command.initialize();
        assert!(command.is_finished());

        // the reset still happened; the robot just stays put
        let pose = drivetrain.borrow().get_pose_estimate();
        assert_approx_eq!(f64, pose.x.get::<meter>(), 0.762, epsilon = 0.000001);
        assert_eq!(drivetrain.borrow().get_volts(), (0., 0.));
    }

    #[test]
    fn interrupted_run_zeroes_both_sides() {
        let drivetrain = test_drivetrain();
        let path = Path::from_trajectory(STRAIGHT_LINE).unwrap();
        let mut command = AutoNavCommand::with_path(drivetrain.clone(), Auto::Bounce, path);

        command.initialize();
        command.execute();
        assert_ne!(drivetrain.borrow().get_volts(), (0., 0.));

        command.end(true);
        assert_eq!(drivetrain.borrow().get_volts(), (0., 0.));
    }

    #[test]
    fn normal_completion_leaves_the_last_command_standing() {
        let drivetrain = test_drivetrain();
        let path = Path::from_trajectory(STRAIGHT_LINE).unwrap();
        let mut command = AutoNavCommand::with_path(drivetrain.clone(), Auto::Bounce, path);

        command.initialize();
        command.execute();
        let running_volts = drivetrain.borrow().get_volts();
        assert_ne!(running_volts, (0., 0.));

        command.end(false);
        assert_eq!(drivetrain.borrow().get_volts(), running_volts);
    }

    #[tokio::test]
    async fn run_auto_finishes_immediately_without_a_trajectory() {
        let robot = Rc::new(RefCell::new(Robot::new()));

        Auto::run_auto(robot.clone(), Auto::BarrelRacing).await;

        let pose = robot.borrow().drivetrain.borrow().get_pose_estimate();
        assert_approx_eq!(f64, pose.x.get::<meter>(), 0.762, epsilon = 0.000001);
        assert_eq!(robot.borrow().drivetrain.borrow().get_volts(), (0., 0.));
    }
}
