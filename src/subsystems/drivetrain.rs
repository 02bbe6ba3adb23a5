use crate::auto::path::TrajectoryState;
use crate::constants::config::TRACK_WIDTH_INCHES;
use crate::constants::drivetrain::{DRIVE_KS, DRIVE_KV, MAX_VOLTS};
use nalgebra::Vector2;
use uom::si::f64::{Angle, Length};
use uom::si::length::{inch, meter};

/// Where the robot thinks it is.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotPoseEstimate {
    pub x: Length,
    pub y: Length,
    pub angle: Angle,
}

impl RobotPoseEstimate {
    pub fn new(x: Length, y: Length, angle: Angle) -> RobotPoseEstimate {
        RobotPoseEstimate { x, y, angle }
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x.get::<meter>(), self.y.get::<meter>())
    }
}

/// Tank drivetrain state. Wheel voltages commanded here are picked up by
/// the motor-controller layer each frame; odometry resets land in the pose
/// estimate, which encoder updates move from there.
pub struct Drivetrain {
    odometry: RobotPoseEstimate,
    left_volts: f64,
    right_volts: f64,
}

impl Drivetrain {
    pub fn new(starting_pose: RobotPoseEstimate) -> Drivetrain {
        Drivetrain {
            odometry: starting_pose,
            left_volts: 0.,
            right_volts: 0.,
        }
    }

    /// Moves the pose estimate to a known pose, usually the spot the robot
    /// was placed at before an auto.
    pub fn reset_odometry(&mut self, pose: RobotPoseEstimate) {
        self.odometry = pose;
    }

    pub fn get_pose_estimate(&self) -> RobotPoseEstimate {
        self.odometry.clone()
    }

    /// Commands raw voltages to the left and right sides.
    pub fn tank_drive_volts(&mut self, left: f64, right: f64) {
        self.left_volts = left.clamp(-MAX_VOLTS, MAX_VOLTS);
        self.right_volts = right.clamp(-MAX_VOLTS, MAX_VOLTS);
    }

    pub fn get_volts(&self) -> (f64, f64) {
        (self.left_volts, self.right_volts)
    }

    /// Chases one trajectory sample: wheel speeds come from the sampled
    /// velocity and curvature, voltages from the characterization
    /// feedforward.
    pub fn follow(&mut self, sample: &TrajectoryState) {
        let track_width = Length::new::<inch>(TRACK_WIDTH_INCHES).get::<meter>();

        // counterclockwise positive, so positive curvature slows the left side
        let angular_velocity = sample.velocity * sample.curvature;
        let left_speed = sample.velocity - angular_velocity * track_width / 2.;
        let right_speed = sample.velocity + angular_velocity * track_width / 2.;

        self.tank_drive_volts(feedforward(left_speed), feedforward(right_speed));
    }

    pub fn stop(&mut self) {
        self.tank_drive_volts(0., 0.);
    }
}

fn feedforward(speed: f64) -> f64 {
    if speed == 0. {
        0.
    } else {
        DRIVE_KS * speed.signum() + DRIVE_KV * speed
    }
}
