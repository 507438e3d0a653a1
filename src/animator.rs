use std::f64::consts::TAU;
use hifitime::{Duration, Unit};
use tracing::{debug, info};
use crate::catalog::OrbitCatalog;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct MarkerPosition<'a> {
    pub(crate) name: &'a str,
    /// [AU]
    pub(crate) x: f64,
    /// [AU]
    pub(crate) y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnimationFrame<'a> {
    markers: Vec<MarkerPosition<'a>>,
}

impl<'a> AnimationFrame<'a> {
    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<(f64, f64)> {
        self.markers.iter()
            .find(|marker| marker.name == name)
            .map(|marker| (marker.x, marker.y))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &MarkerPosition<'a>> {
        self.markers.iter()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.markers.len()
    }
}

pub(crate) struct OrbitAnimator<'a> {
    catalog: &'a OrbitCatalog,
}

impl<'a> OrbitAnimator<'a> {
    pub(crate) fn new(catalog: &'a OrbitCatalog) -> OrbitAnimator<'a> {
        OrbitAnimator { catalog }
    }

    // Every body starts on the positive x axis at day zero
    pub(crate) fn positions_at(&self, elapsed_sim_days: f64) -> AnimationFrame<'a> {
        let markers = self.catalog.bodies().iter()
            .map(|body| {
                let angle = TAU * (elapsed_sim_days / body.period);
                MarkerPosition {
                    name: body.name.as_str(),
                    x: body.radius * angle.cos(),
                    y: body.radius * angle.sin(),
                }
            })
            .collect();

        AnimationFrame { markers }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum AnimationState {
    Stopped,
    Running,
}

#[derive(Debug, Clone)]
pub(crate) struct AnimationClock {
    tick_interval: Duration,
    step: Duration,
    frame_count: u32,

    state: AnimationState,
    frame: u32,
    accumulated: Duration,
}

impl AnimationClock {
    pub(crate) fn new(tick_interval: Duration, step: Duration, frame_count: u32) -> AnimationClock {
        AnimationClock {
            tick_interval,
            step,
            frame_count: frame_count.max(1),
            state: AnimationState::Stopped,
            frame: 0,
            accumulated: Duration::ZERO,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> AnimationState {
        self.state
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub(crate) fn frame(&self) -> u32 {
        self.frame
    }

    /// Does nothing if already running
    pub(crate) fn start(&mut self) {
        if self.state == AnimationState::Stopped {
            info!(frame = self.frame, "Animation started");
            self.state = AnimationState::Running;
        }
    }

    pub(crate) fn stop(&mut self) {
        if self.state == AnimationState::Running {
            info!(frame = self.frame, "Animation stopped");
            self.state = AnimationState::Stopped;
            self.accumulated = Duration::ZERO;
        }
    }

    pub(crate) fn restart(&mut self) {
        info!("Animation restarted");
        self.frame = 0;
        self.accumulated = Duration::ZERO;
        self.state = AnimationState::Running;
    }

    /// Returns the number of ticks that fired
    pub(crate) fn advance(&mut self, wall_elapsed: Duration) -> u32 {
        if self.state == AnimationState::Stopped || self.tick_interval <= Duration::ZERO {
            return 0;
        }

        let accumulated = (self.accumulated + wall_elapsed).total_nanoseconds();
        let interval = self.tick_interval.total_nanoseconds();
        if accumulated < 0 {
            self.accumulated = Duration::ZERO;
            return 0;
        }

        let ticks = accumulated / interval;
        self.accumulated = Duration::from_total_nanoseconds(accumulated % interval);

        if ticks > 0 {
            self.frame = ((self.frame as i128 + ticks) % self.frame_count as i128) as u32;
            debug!(ticks = ticks as u64, frame = self.frame, "Animation ticked");
        }

        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    pub(crate) fn elapsed_sim_days(&self) -> f64 {
        self.frame as f64 * self.step.to_unit(Unit::Day)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::catalog::Body;
    use super::*;

    fn clock(frame_count: u32) -> AnimationClock {
        AnimationClock::new(Duration::from_milliseconds(50.0), Duration::from_days(10.0), frame_count)
    }

    #[test]
    fn test_start_on_positive_x_axis() {
        let catalog = OrbitCatalog::solar_system();
        let frame = OrbitAnimator::new(&catalog).positions_at(0.0);

        assert_eq!(frame.len(), catalog.bodies().len());
        for body in catalog.bodies() {
            assert_eq!(frame.get(&body.name), Some((body.radius, 0.0)));
        }
    }

    #[test]
    fn test_full_revolution() {
        let catalog = OrbitCatalog::solar_system();
        let animator = OrbitAnimator::new(&catalog);

        for body in catalog.bodies() {
            let (x, y) = animator.positions_at(body.period).get(&body.name).unwrap();
            assert_float_absolute_eq!(x, body.radius, 1e-9);
            assert_float_absolute_eq!(y, 0.0, 1e-9);
        }
    }

    #[test]
    fn test_quarter_revolution() {
        let catalog = OrbitCatalog::new(vec![Body::new("Earth", 1.0, 365.0)]).unwrap();
        let (x, y) = OrbitAnimator::new(&catalog).positions_at(365.0 / 4.0).get("Earth").unwrap();

        assert_float_absolute_eq!(x, 0.0, 1e-9);
        assert_float_absolute_eq!(y, 1.0, 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let catalog = OrbitCatalog::solar_system();
        let animator = OrbitAnimator::new(&catalog);

        assert_eq!(animator.positions_at(1234.5), animator.positions_at(1234.5));
        assert_eq!(animator.positions_at(-10.0), OrbitAnimator::new(&catalog).positions_at(-10.0));
    }

    #[test]
    fn test_radius_is_preserved() {
        let catalog = OrbitCatalog::solar_system();
        let frame = OrbitAnimator::new(&catalog).positions_at(777.0);

        for marker in frame.iter() {
            let radius = catalog.get(marker.name).unwrap().radius;
            assert_float_absolute_eq!(marker.x.hypot(marker.y), radius, 1e-12);
        }
        assert_eq!(frame.get("Pluto"), None);
    }

    #[test]
    fn test_start_stop() {
        let mut clock = clock(1000);
        assert_eq!(clock.state(), AnimationState::Stopped);

        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.advance(Duration::from_milliseconds(120.0)), 2);

        // Starting twice keeps the current frame
        clock.start();
        assert_eq!(clock.frame(), 2);

        clock.stop();
        assert_eq!(clock.state(), AnimationState::Stopped);
        assert_eq!(clock.advance(Duration::from_seconds(10.0)), 0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_leftover_time_is_kept() {
        let mut clock = clock(1000);
        clock.start();

        assert_eq!(clock.advance(Duration::from_milliseconds(30.0)), 0);
        assert_eq!(clock.advance(Duration::from_milliseconds(30.0)), 1);
        assert_eq!(clock.advance(Duration::from_milliseconds(90.0)), 2);
        assert_eq!(clock.frame(), 3);
        assert_float_absolute_eq!(clock.elapsed_sim_days(), 30.0, 1e-9);
    }

    #[test]
    fn test_loops_back_to_first_frame() {
        let mut clock = clock(4);
        clock.start();

        assert_eq!(clock.advance(Duration::from_milliseconds(150.0)), 3);
        assert_eq!(clock.frame(), 3);
        assert_eq!(clock.advance(Duration::from_milliseconds(50.0)), 1);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed_sim_days(), 0.0);
    }

    #[test]
    fn test_long_stall_ticks_at_once() {
        let mut clock = clock(1000);
        clock.start();
        clock.advance(Duration::from_milliseconds(70.0));
        assert_eq!(clock.frame(), 1);

        assert_eq!(clock.advance(Duration::from_hours(1.0)), 72000);
        assert_eq!(clock.frame(), 1);

        // 20 ms left over from the first call
        assert_eq!(clock.advance(Duration::from_milliseconds(30.0)), 1);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_restart() {
        let mut clock = clock(1000);
        clock.start();
        clock.advance(Duration::from_milliseconds(500.0));
        assert_eq!(clock.frame(), 10);

        clock.stop();
        clock.restart();
        assert!(clock.is_running());
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_position_depends_only_on_tick() {
        let catalog = OrbitCatalog::solar_system();
        let animator = OrbitAnimator::new(&catalog);

        let mut stepped = clock(1000);
        stepped.start();
        for _ in 0..7 {
            stepped.advance(Duration::from_milliseconds(50.0));
        }

        let mut jumped = clock(1000);
        jumped.start();
        jumped.advance(Duration::from_milliseconds(350.0));

        assert_eq!(stepped.frame(), jumped.frame());
        assert_eq!(animator.positions_at(stepped.elapsed_sim_days()),
                   animator.positions_at(jumped.elapsed_sim_days()));
    }
}
