use std::collections::HashMap;
use std::ffi::{c_char, CStr};
use hifitime::Duration;
use raylib::color::Color;
use raylib::drawing::{RaylibDraw, RaylibDrawHandle};
use raylib::{ffi, RaylibHandle, RaylibThread};
use raylib::math::{Rectangle, Vector2};
use raylib::misc::AsF32;
use raylib::prelude::RaylibDrawGui;
use tracing::warn;
use crate::animator::{AnimationClock, AnimationFrame, OrbitAnimator};
use crate::catalog::OrbitCatalog;
use crate::error::TransferError;
use crate::input::normalize_name;
use crate::planner::{trip_length_label, TransferPlanner, SUN_GRAVITATIONAL_PARAMETER};

const UI_GRID_SIZE: f32 = 8.0;

const NAME_BUFFER_SIZE: usize = 64;

const ARC_POINT_NUMBER: usize = 300;
const SUN_RADIUS: f32 = 10.0;
const MARKER_RADIUS: f32 = 5.0;

const NO_MISSION_MESSAGE: &str = "No plot window open! Calculate a mission first.";

const MARKER_COLORS: [Color; 8] = [
    Color::GRAY, Color::ORANGE, Color::BLUE, Color::RED,
    Color::BROWN, Color::GOLD, Color::SKYBLUE, Color::DARKBLUE,
];

fn gui_text_box_helper(bounds: impl Into<ffi::Rectangle>, buffer: &mut [u8], edit_mode: bool) -> bool {
    let result = unsafe {
        ffi::GuiTextBox(
            bounds.into(),
            buffer.as_mut_ptr() as *mut c_char,
            buffer.len() as i32,
            edit_mode,
        )
    };
    result > 0
}

fn buffer_text(buffer: &[u8]) -> &str {
    CStr::from_bytes_until_nul(buffer)
        .ok()
        .and_then(|text| text.to_str().ok())
        .unwrap_or("")
}

fn grid_value(value: f32) -> f32 {
    value / UI_GRID_SIZE
}

fn grid_anchor(x: f32, y: f32) -> Vector2 {
    Vector2::new(x * UI_GRID_SIZE, y * UI_GRID_SIZE)
}

fn grid_anchor_from(reference: Vector2, x: f32, y: f32) -> Vector2 {
    reference + grid_anchor(x, y)
}

fn central_body_label(gravitational_parameter: f64) -> String {
    if (gravitational_parameter - SUN_GRAVITATIONAL_PARAMETER).abs() < 1e-6 {
        "Central body: Sun (mu = 4 pi^2 AU^3/yr^2)".to_string()
    } else {
        format!("Central body: mu = {gravitational_parameter} AU^3/yr^2")
    }
}

fn toggle_animation(clock: &mut AnimationClock, has_mission: bool) -> Result<(), &'static str> {
    if !has_mission {
        return Err(NO_MISSION_MESSAGE);
    }

    if clock.is_running() {
        clock.stop();
    } else {
        clock.start();
    }
    Ok(())
}

fn grid_rectangle(anchor: Vector2, x: f32, y: f32, w: f32, h: f32) -> Rectangle {
    Rectangle::new(
        anchor.x + x * UI_GRID_SIZE,
        anchor.y + y * UI_GRID_SIZE,
        w * UI_GRID_SIZE,
        h * UI_GRID_SIZE
    )
}

// Square region centered on the star, y pointing up
#[derive(Debug, Copy, Clone)]
struct PlotArea {
    bounds: Rectangle,
    center: Vector2,
    /// [px/AU]
    scale: f32,
}

impl PlotArea {
    const MARGIN: f64 = 1.4;

    fn fit(bounds: Rectangle, max_radius: f64) -> PlotArea {
        let center = Vector2::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0);
        let extent = (max_radius * Self::MARGIN) as f32;
        let scale = bounds.width.min(bounds.height) / 2.0 / extent;
        PlotArea { bounds, center, scale }
    }

    fn to_screen(&self, x: f64, y: f64) -> Vector2 {
        Vector2::new(self.center.x + x as f32 * self.scale, self.center.y - y as f32 * self.scale)
    }

    fn to_pixels(&self, distance: f64) -> f32 {
        distance as f32 * self.scale
    }
}

struct MissionPlot {
    departure: String,
    destination: String,
    arc: Vec<(f64, f64)>,
}

pub(crate) struct Window<'a> {
    rl: RaylibHandle,
    thread: RaylibThread,

    catalog: &'a OrbitCatalog,
    planner: TransferPlanner<'a>,
    animator: OrbitAnimator<'a>,
    clock: AnimationClock,

    layout: HashMap<&'static str, Rectangle>,
    plot_area: PlotArea,

    departure_buffer: [u8; NAME_BUFFER_SIZE],
    departure_edit: bool,
    destination_buffer: [u8; NAME_BUFFER_SIZE],
    destination_edit: bool,

    calculate_requested: bool,
    toggle_animation_requested: bool,

    trip_label: String,
    central_body: String,
    error_message: Option<String>,
    mission: Option<MissionPlot>,
}

impl<'a> Window<'a> {
    const WIDTH: i32 = 1200;
    const HEIGHT: i32 = 800;

    const FPS: u32 = 60;

    pub(crate) fn init(catalog: &'a OrbitCatalog, gravitational_parameter: f64, clock: AnimationClock) -> Window<'a> {
        // Initialization
        let (mut rl, thread) = raylib::init()
            .size(Self::WIDTH, Self::HEIGHT)
            .title("Space Mission Planner")
            .build();

        // Mission inputs
        let panel = grid_anchor(2.0, 2.0);
        let inputs = grid_anchor_from(panel, 0.0, 4.0);
        let result = grid_anchor_from(inputs, 0.0, 16.0);

        let layout = HashMap::from([
            ("title",                 grid_rectangle(panel, 0.0, 0.0, 40.0, 3.0)),
            ("departure_label",       grid_rectangle(inputs, 0.0, 0.0, 30.0, 3.0)),
            ("departure_box",         grid_rectangle(inputs, 0.0, 3.0, 30.0, 3.0)),
            ("destination_label",     grid_rectangle(inputs, 0.0, 7.0, 30.0, 3.0)),
            ("destination_box",       grid_rectangle(inputs, 0.0, 10.0, 30.0, 3.0)),
            ("calculate_button",      grid_rectangle(result, 0.0, 0.0, 20.0, 4.0)),
            ("trip_label",            grid_rectangle(result, 0.0, 6.0, 40.0, 3.0)),
            ("error_label",           grid_rectangle(result, 0.0, 9.0, 40.0, 3.0)),
            ("animation_button",      grid_rectangle(result, 0.0, 13.0, 20.0, 4.0)),
            ("elapsed_label",         grid_rectangle(result, 0.0, 18.0, 40.0, 3.0)),
            ("central_body_label",    grid_rectangle(result, 0.0, 21.0, 40.0, 3.0)),
            ("plot",                  grid_rectangle(grid_anchor(50.0, 0.0), 0.0, 0.0,
                                                     grid_value(Self::WIDTH.as_f32()) - 50.0,
                                                     grid_value(Self::HEIGHT.as_f32()))),
        ]);

        let plot_area = PlotArea::fit(layout["plot"], catalog.max_radius());

        rl.set_target_fps(Self::FPS);

        Window {
            rl,
            thread,
            catalog,
            planner: TransferPlanner::new(catalog, gravitational_parameter),
            animator: OrbitAnimator::new(catalog),
            clock,
            layout,
            plot_area,
            departure_buffer: [0; NAME_BUFFER_SIZE],
            departure_edit: false,
            destination_buffer: [0; NAME_BUFFER_SIZE],
            destination_edit: false,
            calculate_requested: false,
            toggle_animation_requested: false,
            trip_label: "Trip Length: --".to_string(),
            central_body: central_body_label(gravitational_parameter),
            error_message: None,
            mission: None,
        }
    }

    pub(crate) fn run(&mut self) {
        while !self.rl.window_should_close() {
            self.update();
            self.draw();
        }
    }

    fn update(&mut self) {
        if self.calculate_requested {
            self.calculate_mission();
            self.calculate_requested = false;
        }

        if self.toggle_animation_requested {
            if let Err(message) = toggle_animation(&mut self.clock, self.mission.is_some()) {
                warn!(reason = message, "Animation toggle ignored");
                self.error_message = Some(message.to_string());
            }
            self.toggle_animation_requested = false;
        }

        let frame_time = Duration::from_seconds(self.rl.get_frame_time() as f64);
        self.clock.advance(frame_time);
    }

    fn calculate_mission(&mut self) {
        let departure = normalize_name(buffer_text(&self.departure_buffer));
        let destination = normalize_name(buffer_text(&self.destination_buffer));

        match self.plan(departure, destination) {
            Ok((days, mission)) => {
                self.trip_label = trip_length_label(days);
                self.error_message = None;
                self.mission = Some(mission);
                self.clock.restart();
            }
            Err(error) => {
                warn!(%error, "Rejected transfer request");
                self.error_message = Some(error.to_string());
            }
        }
    }

    fn plan(&self, departure: String, destination: String) -> Result<(f64, MissionPlot), TransferError> {
        let days = self.planner.compute_transfer_time(&departure, &destination)?;
        let arc = self.planner.transfer_arc(&departure, &destination, ARC_POINT_NUMBER)?;
        Ok((days, MissionPlot { departure, destination, arc }))
    }

    fn draw(&mut self) {
        let frame = self.animator.positions_at(self.clock.elapsed_sim_days());
        let elapsed = Duration::from_days(self.clock.elapsed_sim_days());

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::RAYWHITE);

        // Orbit plot
        draw_plot(&mut d, &self.plot_area, self.catalog, &frame, self.mission.as_ref());

        // Mission panel
        {
            d.gui_label(self.layout["title"], "Space Mission Planner");

            d.gui_label(self.layout["departure_label"], "Select Departure Planet:");
            if gui_text_box_helper(self.layout["departure_box"], &mut self.departure_buffer, self.departure_edit) {
                self.departure_edit = !self.departure_edit;
            }

            d.gui_label(self.layout["destination_label"], "Select Destination Planet:");
            if gui_text_box_helper(self.layout["destination_box"], &mut self.destination_buffer, self.destination_edit) {
                self.destination_edit = !self.destination_edit;
            }

            if d.gui_button(self.layout["calculate_button"], "Calculate Mission") { self.calculate_requested = true; }

            d.gui_label(self.layout["trip_label"], self.trip_label.as_str());

            if let Some(ref error_message) = self.error_message {
                let bounds = self.layout["error_label"];
                d.draw_text(error_message, bounds.x as i32, bounds.y as i32, 16, Color::RED);
            }

            let animation_text = if self.clock.is_running() { "Stop Animation" } else { "Start Animation" };
            if d.gui_button(self.layout["animation_button"], animation_text) { self.toggle_animation_requested = true; }

            d.gui_label(self.layout["elapsed_label"],
                        format!("Simulated time: {} (frame {})", elapsed, self.clock.frame()).as_str());
            d.gui_label(self.layout["central_body_label"], self.central_body.as_str());
        }
    }
}

fn draw_plot(d: &mut RaylibDrawHandle, plot: &PlotArea, catalog: &OrbitCatalog, frame: &AnimationFrame,
             mission: Option<&MissionPlot>) {
    d.draw_rectangle_rec(plot.bounds, Color::BLACK);

    for (i, body) in catalog.bodies().iter().enumerate() {
        let color = MARKER_COLORS[i % MARKER_COLORS.len()];
        d.draw_circle_lines(plot.center.x as i32, plot.center.y as i32, plot.to_pixels(body.radius),
                            color.alpha(0.5));
    }

    // Sun
    d.draw_circle_v(plot.center, SUN_RADIUS, Color::YELLOW);

    if let Some(mission) = mission {
        // Dashed transfer arc
        for (i, segment) in mission.arc.windows(2).enumerate() {
            if i % 4 < 2 {
                let (start, end) = (segment[0], segment[1]);
                d.draw_line_v(plot.to_screen(start.0, start.1), plot.to_screen(end.0, end.1), Color::GREEN);
            }
        }
        d.draw_text(format!("{} -> {}", mission.departure, mission.destination).as_str(),
                    plot.bounds.x as i32 + 10, plot.bounds.y as i32 + 30, 16, Color::GREEN);
    }

    for (i, marker) in frame.iter().enumerate() {
        let color = MARKER_COLORS[i % MARKER_COLORS.len()];
        let position = plot.to_screen(marker.x, marker.y);
        d.draw_circle_v(position, MARKER_RADIUS, color);
        d.draw_text(marker.name, position.x as i32 + 8, position.y as i32 - 8, 10, Color::LIGHTGRAY);
    }

    d.draw_text("Planetary Orbits [AU]", plot.bounds.x as i32 + 10, plot.bounds.y as i32 + 10, 16, Color::LIGHTGRAY);
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn test_plot_fits_outermost_orbit() {
        let plot = PlotArea::fit(Rectangle::new(400.0, 0.0, 800.0, 800.0), 30.07);

        let edge = plot.to_screen(30.07 * 1.4, 0.0);
        assert_float_absolute_eq!(edge.x, 1200.0, 0.01);
        assert_float_absolute_eq!(edge.y, 400.0, 0.01);
    }

    #[test]
    fn test_plot_y_points_up() {
        let plot = PlotArea::fit(Rectangle::new(0.0, 0.0, 100.0, 100.0), 1.0);

        let top = plot.to_screen(0.0, 1.0);
        assert!(top.y < plot.center.y);
        assert_float_absolute_eq!(plot.to_pixels(1.0), 50.0 / 1.4, 1e-4);
    }

    #[test]
    fn test_animation_needs_a_mission() {
        let mut clock = AnimationClock::new(Duration::from_milliseconds(50.0), Duration::from_days(10.0), 1000);

        assert_eq!(toggle_animation(&mut clock, false), Err(NO_MISSION_MESSAGE));
        assert!(!clock.is_running());

        assert_eq!(toggle_animation(&mut clock, true), Ok(()));
        assert!(clock.is_running());
        assert_eq!(toggle_animation(&mut clock, false), Err(NO_MISSION_MESSAGE));
        assert!(clock.is_running());
        assert_eq!(toggle_animation(&mut clock, true), Ok(()));
        assert!(!clock.is_running());
    }

    #[test]
    fn test_central_body_label() {
        assert_eq!(central_body_label(SUN_GRAVITATIONAL_PARAMETER), "Central body: Sun (mu = 4 pi^2 AU^3/yr^2)");
        assert_eq!(central_body_label(1.0), "Central body: mu = 1 AU^3/yr^2");
    }

    #[test]
    fn test_buffer_text() {
        let mut buffer = [0u8; NAME_BUFFER_SIZE];
        assert_eq!(buffer_text(&buffer), "");

        buffer[..5].copy_from_slice(b"Earth");
        assert_eq!(buffer_text(&buffer), "Earth");
        assert_eq!(normalize_name(buffer_text(&buffer)), "Earth");
    }
}
