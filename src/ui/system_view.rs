use super::history_plot;
use crate::metrics::MetricsEngine;
use crate::settings::Settings;

/// The system window: host facts plus the tabbed CPU / fan / thermal
/// plots with their sampling controls.
pub fn show_system_view(ui: &mut egui::Ui, engine: &MetricsEngine, settings: &mut Settings) {
    let host = engine.host();
    ui.label(format!("Operating System: {}", host.os_name));
    ui.label(format!("Logged in User: {}", host.user));
    ui.label(format!("Hostname: {}", host.hostname));
    ui.label(format!("Total Processes: {}", engine.processes().len()));
    ui.label(format!("CPU Type: {}", host.cpu_model));

    ui.separator();

    ui.horizontal(|ui| {
        ui.checkbox(&mut settings.plot_paused, "Pause Plots");
        ui.add(
            egui::Slider::new(&mut settings.plot_fps, 1.0..=120.0)
                .step_by(1.0)
                .text("Plot FPS"),
        );
        ui.add(
            egui::Slider::new(&mut settings.plot_y_scale, 0.1..=2.0)
                .step_by(0.1)
                .text("Plot Y-Scale"),
        );
    });

    let y_scale = settings.plot_y_scale;
    let plot_height = (ui.available_height() - 60.0).max(80.0);

    let tab_id = ui.make_persistent_id("system_tab");
    let mut tab = ui.ctx().data_mut(|d| *d.get_temp_mut_or(tab_id, 0usize));

    ui.horizontal(|ui| {
        for (i, label) in ["CPU", "Fan", "Thermal"].iter().enumerate() {
            if ui.selectable_label(tab == i, *label).clicked() {
                tab = i;
            }
        }
    });
    ui.ctx().data_mut(|d| d.insert_temp(tab_id, tab));

    match tab {
        0 => {
            ui.label(format!("CPU Usage: {:.1}%", engine.cpu_usage()));
            history_plot(
                ui,
                "cpu_plot",
                plot_height,
                &engine.cpu_history,
                100.0 * y_scale,
            );
        }
        1 => {
            match engine.fan_rpm() {
                Some(rpm) => {
                    let status = if rpm > 0.0 { "Active" } else { "Inactive" };
                    ui.label(format!("Status: {}", status));
                    ui.label(format!("Speed: {:.0} RPM", rpm));
                }
                None => {
                    ui.label("Status: no fan sensor");
                }
            }
            history_plot(
                ui,
                "fan_plot",
                plot_height,
                &engine.fan_history,
                engine.fan_history.max_value() * y_scale,
            );
        }
        _ => {
            match engine.cpu_temperature() {
                Some(temp) => {
                    ui.label(format!("Temperature: {:.1} °C", temp));
                }
                None => {
                    ui.label("Temperature: no thermal sensor");
                }
            }
            history_plot(
                ui,
                "thermal_plot",
                plot_height,
                &engine.thermal_history,
                engine.thermal_history.max_value() * y_scale,
            );
        }
    }
}
