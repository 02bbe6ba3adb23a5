use crate::constants::ultrasonic::{
    MAXIMUM_READING_METERS, METERS_PER_VOLT, MINIMUM_READING_METERS,
};
use uom::si::f64::Length;
use uom::si::length::meter;

/// Converts an analog reading from the ultrasonic rangefinder to a
/// distance. The sensor is only trustworthy between 0.3 m and 5.0 m, so
/// readings that decode outside that window clamp to it.
pub fn distance_from_voltage(voltage: f64) -> Length {
    let meters = (voltage * METERS_PER_VOLT).clamp(MINIMUM_READING_METERS, MAXIMUM_READING_METERS);
    Length::new::<meter>(meters)
}
