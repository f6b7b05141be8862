use std::collections::HashSet;
use std::time::Instant;

use crate::metrics::MetricsEngine;
use crate::settings::{show_settings_window, Settings};
use crate::ui::{show_memory_view, show_network_view, show_system_view};

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SystemMonitorApp {
    #[serde(skip)]
    engine: MetricsEngine,
    settings: Settings,
    process_filter: String,
    // Pids are not stable across reboots, so the selection is not worth
    // persisting.
    #[serde(skip)]
    selected_pids: HashSet<i32>,
}

impl Default for SystemMonitorApp {
    fn default() -> Self {
        Self {
            engine: MetricsEngine::new(),
            settings: Settings::default(),
            process_filter: String::new(),
            selected_pids: HashSet::new(),
        }
    }
}

impl SystemMonitorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any). Telemetry always starts from
        // scratch; only the UI settings survive a restart.
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }

        Default::default()
    }
}

impl eframe::App for SystemMonitorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.settings.apply(ctx);
        self.engine.apply_history_length(self.settings.history_length);

        // All sampling happens here, before any panel reads the outputs.
        self.engine.tick(
            Instant::now(),
            self.settings.plot_fps,
            self.settings.plot_paused,
        );

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.add_space(16.0);
                egui::widgets::global_theme_preference_buttons(ui);

                ui.add_space(16.0);
                if ui.button("⚙").clicked() {
                    self.settings.show();
                }
            });
        });

        show_settings_window(ctx, &mut self.settings);

        egui::TopBottomPanel::bottom("network_panel")
            .resizable(true)
            .default_height(260.0)
            .show(ctx, |ui| {
                ui.heading("Network");
                egui::ScrollArea::vertical()
                    .id_salt("network_scroll")
                    .show(ui, |ui| {
                        show_network_view(ui, &self.engine, self.settings.plot_y_scale);
                    });
            });

        egui::SidePanel::left("system_panel")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.heading("System");
                show_system_view(ui, &self.engine, &mut self.settings);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Memory and Processes");
            show_memory_view(
                ui,
                &self.engine,
                &mut self.process_filter,
                &mut self.selected_pids,
            );
        });

        // Keep frames coming so the sampling gates are re-evaluated even
        // without input events.
        ctx.request_repaint();
    }
}
