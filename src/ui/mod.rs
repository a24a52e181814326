//! # Joystick Console
//!
//! eframe application that puts the configured joysticks on screen and shows
//! what they report.
//!
//! ## Layout
//!
//! - **Top Panel**: rebuild and teardown buttons
//! - **Central Panel**: the joysticks, drawn by [`EguiHost`]
//! - **Bottom Panel**: latest report and drag state per joystick
//!
//! ## Data Flow
//!
//! ```text
//! egui input ─► EguiHost::show ─► JoystickPanel::dispatch ─► callback
//!                                                              │
//!            Bottom Panel ◄─[watch]─ ReportSink ◄─[mpsc]───────┘
//! ```
//!
//! The callbacks only `try_send`, so a slow sink never stalls a frame.

pub mod common;
pub mod egui_host;

use crate::config::ConsoleConfig;
use crate::host::WidgetId;
use crate::joystick::{JoystickConfig, JoystickHandle, JoystickPanel, StickReport};
use crate::report_sink::{forwarder, Telemetry};
use eframe::egui::{self, Button, Vec2};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use self::common::{create_frame, UiColors};

pub use egui_host::EguiHost;

/// The console app
pub struct JoystickConsole {
    panel: JoystickPanel<EguiHost>,

    /// Handles of the joysticks created from the layout
    handles: Vec<JoystickHandle>,

    /// Layout the joysticks are (re)built from
    layout: Vec<JoystickConfig>,

    report_sender: mpsc::Sender<StickReport>,
    telemetry: watch::Receiver<Telemetry>,

    frame_interval: Duration,
}

impl JoystickConsole {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ConsoleConfig,
        report_sender: mpsc::Sender<StickReport>,
        telemetry: watch::Receiver<Telemetry>,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut console = Self {
            panel: JoystickPanel::new(EguiHost::new(config.default_style)),
            handles: Vec::new(),
            layout: config.joysticks,
            report_sender,
            telemetry,
            frame_interval: Duration::from_millis(1000 / u64::from(config.fps.max(1))),
        };
        console.build_joysticks();
        console
    }

    /// Creates every joystick of the layout that is not alive yet
    fn build_joysticks(&mut self) {
        for config in &self.layout {
            if self.handles.iter().any(|h| h.id() == config.id) {
                continue;
            }
            match self.panel.create(
                WidgetId::SCREEN,
                config,
                Some(forwarder(self.report_sender.clone())),
            ) {
                Ok(handle) => self.handles.push(handle),
                Err(e) => error!("Skipping {}: {}", config.id, e),
            }
        }
        info!("{} joysticks on screen", self.panel.len());
    }

    /// Explicit teardown through the owning handles
    fn destroy_joysticks(&mut self) {
        for handle in self.handles.drain(..) {
            self.panel.destroy(handle);
        }
    }

    /// Teardown initiated by the host, delivered as destroy notifications
    fn clear_screen(&mut self) {
        for base in self.panel.host().bases() {
            self.panel.host_mut().remove(base);
        }
    }

    // Handles whose instance the host has already destroyed
    fn forget_destroyed(&mut self) {
        let (alive, gone): (Vec<_>, Vec<_>) = self
            .handles
            .drain(..)
            .partition(|h| self.panel.contains(h.stick_widget()));
        self.handles = alive;
        for handle in gone {
            self.panel.destroy(handle);
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let telemetry = self.telemetry.borrow();
        ui.horizontal_wrapped(|ui| {
            for handle in &self.handles {
                let dragging = self
                    .panel
                    .is_dragging(handle.stick_widget())
                    .unwrap_or(false);
                let color = if dragging {
                    UiColors::ACTIVE
                } else {
                    UiColors::INACTIVE
                };

                create_frame(UiColors::INNER_BG, UiColors::BORDER).show(ui, |ui| {
                    ui.colored_label(color, handle.id().to_string());
                    match telemetry.latest.get(&handle.id()) {
                        Some(stamped) => ui.label(format!(
                            "({}, {}) @ {}",
                            stamped.report.x,
                            stamped.report.y,
                            stamped.received.format("%H:%M:%S%.3f")
                        )),
                        None => ui.label("no reports yet"),
                    };
                });
            }
            ui.label(format!("total reports: {}", telemetry.total_reports));
        });
    }
}

impl eframe::App for JoystickConsole {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(self.frame_interval);

        egui::TopBottomPanel::top("top_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let size = Vec2 { x: 140.0, y: 24.0 };
                    if ui.add(Button::new("Rebuild").min_size(size)).clicked() {
                        self.build_joysticks();
                    }
                    if ui.add(Button::new("Destroy").min_size(size)).clicked() {
                        self.destroy_joysticks();
                    }
                    if ui.add(Button::new("Clear screen").min_size(size)).clicked() {
                        self.clear_screen();
                    }
                });
            });

        egui::TopBottomPanel::bottom("bottom_panel")
            .show_separator_line(false)
            .show(ctx, |ui| self.render_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let events = self.panel.host_mut().show(ui);
            for (widget, event) in events {
                self.panel.dispatch(widget, event);
            }
        });

        self.forget_destroyed();
    }
}
