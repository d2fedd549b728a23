use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use egui::{Align2, CentralPanel, Color32, CursorIcon, FontId, ViewportCommand};
use tracing::{error, info};

use crate::config::DisplayConfig;
use crate::core::geometry::{Bounds, Point};
use crate::error::{Error, PlacementError, Result};
use crate::search::events::StdoutLog;
use crate::search::shapes::ShapeCatalogue;
use crate::search::{FrameLoop, FrameOutcome};
use crate::ui::stage::{
    BACKGROUND, EguiInput, EguiRenderer, InputSnapshot, StageTransform, paint_shape,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Showing the target shape; `since` is filled on the first frame.
    Preview { since: Option<f64> },
    Running,
    Finished,
}

pub struct SearchApp {
    session: FrameLoop<StdoutLog>,
    catalogue: ShapeCatalogue,
    stage: Bounds,
    px_per_cm: f32,
    preview_secs: f64,
    phase: Phase,
    cursor_visible: bool,
    press_epoch: f64,
    exiting: Arc<AtomicBool>,
    failure: Arc<Mutex<Option<PlacementError>>>,
}

/// Window size in egui points for a size given in physical pixels.
fn logical_size(width_px: u32, height_px: u32, pixels_per_point: f32) -> egui::Vec2 {
    let ppp = if pixels_per_point > 0.0 { pixels_per_point } else { 1.0 };
    egui::vec2(width_px as f32 / ppp, height_px as f32 / ppp)
}

fn stage_transform(ctx: &egui::Context, screen: egui::Rect, px_per_cm: f32) -> StageTransform {
    StageTransform::new(screen, px_per_cm / ctx.pixels_per_point())
}

impl SearchApp {
    fn close(&mut self, ctx: &egui::Context) {
        self.phase = Phase::Finished;
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }

    fn show_preview(&mut self, ctx: &egui::Context, now: f64, since: f64) {
        let px_per_cm = self.px_per_cm;
        CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let transform = stage_transform(ctx, ui.max_rect(), px_per_cm);
                let height = self.stage.height();
                ui.painter().text(
                    transform.to_screen(Point::new(0.0, height / 4.0)),
                    Align2::CENTER_CENTER,
                    "Target stimulus",
                    FontId::proportional((0.05 * height) as f32 * transform.points_per_cm()),
                    Color32::WHITE,
                );
                if let Some(spec) = self.catalogue.get(self.session.target_shape()) {
                    paint_shape(ui.painter(), &transform, spec, Point::ORIGIN);
                }
            });
        if now - since >= self.preview_secs {
            info!("preview done; search starts");
            self.phase = Phase::Running;
        }
        ctx.request_repaint();
    }

    fn show_search(&mut self, ctx: &egui::Context, snapshot: &InputSnapshot) {
        let px_per_cm = self.px_per_cm;
        let mut outcome = Ok(FrameOutcome::Continue);
        CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let transform = stage_transform(ctx, ui.max_rect(), px_per_cm);
                let mut renderer = EguiRenderer {
                    ctx,
                    painter: ui.painter(),
                    transform,
                    catalogue: &self.catalogue,
                    cursor_visible: &mut self.cursor_visible,
                };
                let mut input = EguiInput {
                    snapshot,
                    transform,
                    press_epoch: &mut self.press_epoch,
                };
                outcome = self.session.step(&mut renderer, &mut input);
            });

        match outcome {
            Ok(FrameOutcome::Continue) => {}
            Ok(FrameOutcome::Terminate) => {
                let stats = self.session.stats();
                info!(
                    frames = stats.frames,
                    mean_visible = stats.mean_visible(),
                    targets = stats.targets,
                    "session finished"
                );
                self.close(ctx);
            }
            Err(err) => {
                error!(%err, frame = self.session.frame(), "session aborted");
                if let Ok(mut slot) = self.failure.lock() {
                    *slot = Some(err);
                }
                self.close(ctx);
            }
        }
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.exiting.load(Ordering::SeqCst) && self.phase != Phase::Finished {
            info!("SIGINT received: closing window");
            self.close(ctx);
            return;
        }

        let snapshot = InputSnapshot::capture(ctx);
        match self.phase {
            Phase::Preview { since } => {
                let since = since.unwrap_or(snapshot.time);
                self.phase = Phase::Preview { since: Some(since) };
                if snapshot.close_requested {
                    self.close(ctx);
                    return;
                }
                self.show_preview(ctx, snapshot.time, since);
            }
            Phase::Running => self.show_search(ctx, &snapshot),
            Phase::Finished => {}
        }

        if !self.cursor_visible {
            ctx.set_cursor_icon(CursorIcon::None);
        }
    }
}

/// Opens the search window and blocks until it closes.
pub fn run(
    session: FrameLoop<StdoutLog>,
    display: &DisplayConfig,
    stage: Bounds,
    exiting: Arc<AtomicBool>,
) -> Result<()> {
    let px_per_cm = display.width_px as f64 / stage.width();
    let failure = Arc::new(Mutex::new(None));
    let app = SearchApp {
        session,
        catalogue: ShapeCatalogue::standard(),
        stage,
        px_per_cm: px_per_cm as f32,
        preview_secs: display.preview_secs,
        phase: Phase::Preview { since: None },
        cursor_visible: false,
        press_epoch: 0.0,
        exiting,
        failure: failure.clone(),
    };

    let (width_px, height_px, fullscreen) =
        (display.width_px, display.height_px, display.fullscreen);
    // width_px/height_px are physical pixels; the viewport size is in points.
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("blinksearch")
            .with_inner_size([display.width_px as f32, display.height_px as f32])
            .with_fullscreen(display.fullscreen),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "blinksearch",
        native_options,
        Box::new(move |cc| {
            let ppp = cc.egui_ctx.pixels_per_point();
            if !fullscreen && ppp != 1.0 {
                let size = logical_size(width_px, height_px, ppp);
                info!(ppp, width = size.x, height = size.y, "resizing window to logical points");
                cc.egui_ctx.send_viewport_cmd(ViewportCommand::InnerSize(size));
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| Error::Display(err.to_string()))?;

    let failed = failure.lock().ok().and_then(|mut slot| slot.take());
    match failed {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
