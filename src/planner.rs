use std::f64::consts::PI;
use tracing::{debug, info};
use crate::catalog::OrbitCatalog;
use crate::error::TransferError;

const DAYS_PER_YEAR: f64 = 365.0;

// [AU^3/year^2]
pub(crate) const UNIT_GRAVITATIONAL_PARAMETER: f64 = 1.0;
pub(crate) const SUN_GRAVITATIONAL_PARAMETER: f64 = 4.0 * PI * PI;

pub(crate) struct TransferPlanner<'a> {
    catalog: &'a OrbitCatalog,
    gravitational_parameter: f64,
}

impl<'a> TransferPlanner<'a> {
    pub(crate) fn new(catalog: &'a OrbitCatalog, gravitational_parameter: f64) -> TransferPlanner<'a> {
        TransferPlanner { catalog, gravitational_parameter }
    }

    /// One way Hohmann transfer duration in days, rounded to one decimal
    pub(crate) fn compute_transfer_time(&self, departure: &str, destination: &str) -> Result<f64, TransferError> {
        let from = self.catalog.get(departure)?;
        let to = self.catalog.get(destination)?;

        if from.name == to.name {
            debug!(body = %from.name, "Same departure and destination");
            return Ok(0.0);
        }

        let (r1, r2) = (from.radius, to.radius);

        // Half the period of the ellipse with semi-major axis (r1 + r2) / 2
        let years = PI * ((r1 + r2).powi(3) / (8.0 * self.gravitational_parameter)).sqrt();
        let days = round_to_tenths(years * DAYS_PER_YEAR);

        info!(departure = %from.name, destination = %to.name, days, "Computed transfer time");

        Ok(days)
    }

    // Half a turn from angle 0 to PI, radius interpolated linearly
    pub(crate) fn transfer_arc(&self, departure: &str, destination: &str, point_number: usize)
        -> Result<Vec<(f64, f64)>, TransferError> {
        let r1 = self.catalog.get(departure)?.radius;
        let r2 = self.catalog.get(destination)?.radius;

        if point_number < 2 {
            return Ok(vec![(r1, 0.0); point_number]);
        }

        let last = (point_number - 1) as f64;
        Ok((0..point_number)
            .map(|i| i as f64 / last)
            .map(|fraction| {
                let radius = r1 + (r2 - r1) * fraction;
                let angle = PI * fraction;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect())
    }
}

fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn trip_length_label(days: f64) -> String {
    format!("Trip Length: {days:.1} days")
}
