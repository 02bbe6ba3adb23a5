pub mod config {
    /// Wheel-Wheel width of robot.
    pub const TRACK_WIDTH_INCHES: f64 = 21.87;

    pub const WHEEL_DIAMETER_INCHES: f64 = 6.0;
}

pub mod robotmap {
    pub mod drivetrain_map {
        pub const FL_DRIVE_ID: i32 = 1;
        pub const BL_DRIVE_ID: i32 = 2;
        pub const FR_DRIVE_ID: i32 = 3;
        pub const BR_DRIVE_ID: i32 = 4;
    }

    pub mod intake {
        pub const INTAKE_MOTOR_ID: i32 = 7;
    }

    pub mod launcher {
        pub const LAUNCHER_LEFT_MOTOR_ID: i32 = 8;
        /// On the electronics board this is labeled #8b, which the motor
        /// controllers can't express, so it gets its own ID.
        pub const LAUNCHER_RIGHT_MOTOR_ID: i32 = 11;
        pub const BELT_MOTOR_ID: i32 = 10;

        // PCM channels for the cannon double solenoid.
        pub const CANNON_SOLENOID_FORWARD_CHANNEL: i32 = 6;
        pub const CANNON_SOLENOID_BACKWARD_CHANNEL: i32 = 5;
    }

    pub mod ultrasonic {
        /// Analog input the ultrasonic sensor reads on.
        pub const SENSOR_PORT: i32 = 0;
    }
}

pub mod ultrasonic {
    /// MB1013 analog scaling: 293 mV at 300 mm, 4.885 V at 5000 mm.
    /// See pin 3 of https://www.maxbotix.com/documents/HRLV-MaxSonar-EZ_Datasheet.pdf
    pub const METERS_PER_VOLT: f64 = (5000. / 4.885) / 1000.;
    /// Shortest distance the sensor can actually measure.
    pub const MINIMUM_READING_METERS: f64 = 300. / 1000.;
    /// Longest distance the sensor can actually measure.
    pub const MAXIMUM_READING_METERS: f64 = 5000. / 1000.;
}

pub mod auto {
    use nalgebra::Vector2;

    /// Trajectory exports land here when code is deployed to the RIO.
    pub const DEPLOY_PATHS_DIR: &str = "/home/lvuser/deploy/paths";

    /// How often the auto loop polls its command.
    pub const AUTO_TICK_MS: u64 = 20;

    // TODO: verify these start positions against the field drawings.
    pub const BARREL_RACING_START_INCHES: Vector2<f64> = Vector2::new(30., 30.);
    pub const BOUNCE_START_INCHES: Vector2<f64> = Vector2::new(30., 30.);
    pub const SLALOM_START_INCHES: Vector2<f64> = Vector2::new(30., 30.);
}

pub mod drivetrain {
    /// Static friction feedforward, volts.
    pub const DRIVE_KS: f64 = 0.65;
    /// Velocity feedforward, volts per meter/second.
    pub const DRIVE_KV: f64 = 2.13;

    pub const MAX_VOLTS: f64 = 12.0;
}
