pub mod drivetrain;
pub mod ultrasonic;
