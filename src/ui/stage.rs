//! egui side of the search display: mapping between stage and screen, shape painting,
//! and the `Renderer` / `InputDevice` adapters the frame loop runs against.

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::core::geometry::Point;
use crate::search::io::{InputDevice, PressSample, Renderer};
use crate::search::item::Item;
use crate::search::shapes::{ShapeCatalogue, ShapeKind, ShapeSpec};

pub const BACKGROUND: Color32 = Color32::from_gray(128);

/// Stage centimetres (origin at the centre, y up) to egui points (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageTransform {
    center: Pos2,
    points_per_cm: f32,
}

impl StageTransform {
    pub fn new(screen: Rect, points_per_cm: f32) -> Self {
        Self {
            center: screen.center(),
            points_per_cm,
        }
    }

    pub fn points_per_cm(&self) -> f32 {
        self.points_per_cm
    }

    pub fn to_screen(&self, p: Point) -> Pos2 {
        Pos2::new(
            self.center.x + p.x as f32 * self.points_per_cm,
            self.center.y - p.y as f32 * self.points_per_cm,
        )
    }

    pub fn to_stage(&self, p: Pos2) -> Point {
        Point::new(
            ((p.x - self.center.x) / self.points_per_cm) as f64,
            ((self.center.y - p.y) / self.points_per_cm) as f64,
        )
    }
}

pub fn paint_shape(painter: &Painter, transform: &StageTransform, spec: &ShapeSpec, at: Point) {
    let [r, g, b] = spec.rgb;
    let fill = Color32::from_rgb(r, g, b);
    let center = transform.to_screen(at);
    let scale = transform.points_per_cm();
    match spec.kind {
        ShapeKind::Circle { radius } => {
            painter.circle_filled(center, radius as f32 * scale, fill);
        }
        ShapeKind::Rect { width, height } => {
            let size = Vec2::new(width as f32 * scale, height as f32 * scale);
            painter.rect_filled(
                Rect::from_center_size(center, size),
                egui::CornerRadius::ZERO,
                fill,
            );
        }
        ShapeKind::Polygon { edges, radius } => {
            // First vertex points straight up.
            let points = (0..edges)
                .map(|k| {
                    let a = FRAC_PI_2 + TAU * k as f64 / edges as f64;
                    transform.to_screen(Point::new(
                        at.x + radius * a.cos(),
                        at.y + radius * a.sin(),
                    ))
                })
                .collect();
            painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
        }
    }
}

/// Input state sampled once at the start of an egui frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    pub time: f64,
    pub primary_down: bool,
    pub pointer: Option<Pos2>,
    pub key_pressed: bool,
    pub close_requested: bool,
}

impl InputSnapshot {
    pub fn capture(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            time: i.time,
            primary_down: i.pointer.primary_down(),
            pointer: i.pointer.latest_pos(),
            key_pressed: i
                .events
                .iter()
                .any(|e| matches!(e, egui::Event::Key { pressed: true, .. })),
            close_requested: i.viewport().close_requested(),
        })
    }
}

pub struct EguiRenderer<'a> {
    pub ctx: &'a egui::Context,
    pub painter: &'a Painter,
    pub transform: StageTransform,
    pub catalogue: &'a ShapeCatalogue,
    pub cursor_visible: &'a mut bool,
}

impl Renderer for EguiRenderer<'_> {
    fn draw(&mut self, item: &Item) {
        let (Some(at), Some(spec)) = (item.position, self.catalogue.get(item.shape)) else {
            return;
        };
        paint_shape(self.painter, &self.transform, spec, at);
    }

    /// eframe flips after `update` returns; all that is left is asking for
    /// the next frame.
    fn present(&mut self) {
        self.ctx.request_repaint();
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        *self.cursor_visible = visible;
    }
}

pub struct EguiInput<'a> {
    pub snapshot: &'a InputSnapshot,
    pub transform: StageTransform,
    /// egui time of the last press-clock reset.
    pub press_epoch: &'a mut f64,
}

impl InputDevice for EguiInput<'_> {
    fn poll_termination(&mut self) -> bool {
        self.snapshot.key_pressed || self.snapshot.close_requested
    }

    fn poll_press(&mut self) -> PressSample {
        PressSample {
            down: self.snapshot.primary_down,
            time_secs: self.snapshot.time - *self.press_epoch,
        }
    }

    fn poll_position(&mut self) -> Point {
        self.snapshot
            .pointer
            .map(|p| self.transform.to_stage(p))
            .unwrap_or(Point::ORIGIN)
    }

    fn reset_press_state(&mut self) {
        *self.press_epoch = self.snapshot.time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_flips_y_and_round_trips() {
        let screen = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let t = StageTransform::new(screen, 10.0);
        assert_eq!(t.to_screen(Point::ORIGIN), Pos2::new(400.0, 300.0));
        assert_eq!(t.to_screen(Point::new(10.0, 10.0)), Pos2::new(500.0, 200.0));
        let back = t.to_stage(Pos2::new(250.0, 450.0));
        assert_eq!(back, Point::new(-15.0, -15.0));
    }

    #[test]
    fn input_adapter_reports_snapshot() {
        let screen = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let snapshot = InputSnapshot {
            time: 12.5,
            primary_down: true,
            pointer: Some(Pos2::new(420.0, 300.0)),
            key_pressed: false,
            close_requested: false,
        };
        let mut epoch = 10.0;
        let mut input = EguiInput {
            snapshot: &snapshot,
            transform: StageTransform::new(screen, 10.0),
            press_epoch: &mut epoch,
        };
        assert!(!input.poll_termination());
        assert_eq!(
            input.poll_press(),
            PressSample {
                down: true,
                time_secs: 2.5
            }
        );
        assert_eq!(input.poll_position(), Point::new(2.0, 0.0));
        input.reset_press_state();
        assert_eq!(input.poll_press().time_secs, 0.0);
    }
}
