use crate::subsystems::drivetrain::{Drivetrain, RobotPoseEstimate};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

pub mod auto;
pub mod chooser;
pub mod command;
pub mod constants;
pub mod subsystems;

/// Everything on the robot, handed around the robot loop.
#[derive(Clone)]
pub struct Robot {
    pub drivetrain: Rc<RefCell<Drivetrain>>,
    // other subsystems here
    pub dt: Duration,
}

impl Default for Robot {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot {
    pub fn new() -> Self {
        Robot {
            drivetrain: Rc::new(RefCell::new(Drivetrain::new(RobotPoseEstimate::new(
                Length::new::<meter>(0.),
                Length::new::<meter>(0.),
                Angle::new::<radian>(0.),
            )))),
            // other subsystems here
            dt: Duration::from_millis(0),
        }
    }

    pub fn stop(&self) {
        if let Ok(mut drivetrain) = self.drivetrain.try_borrow_mut() {
            drivetrain.stop();
        }
        // other subsystems here
    }
}
