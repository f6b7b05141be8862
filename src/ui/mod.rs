mod memory_view;
mod network_view;
mod system_view;

pub use memory_view::*;
pub use network_view::*;
pub use system_view::*;

use crate::metrics::HistoryBuffer;

/// Draws one rolling history plot with a fixed X window and a Y range
/// derived from the buffer's all-time maximum, so the scale never jumps
/// back down mid-session.
pub fn history_plot(
    ui: &mut egui::Ui,
    id: impl std::hash::Hash,
    height: f32,
    history: &HistoryBuffer,
    y_max: f32,
) {
    let plot = egui_plot::Plot::new(id)
        .height(height)
        .show_axes(true)
        .set_margin_fraction(egui::Vec2::ZERO)
        .include_x(0.0)
        .include_x(history.capacity() as f64)
        .include_y(0.0)
        .include_y(y_max.max(1.0) as f64)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);

    plot.show(ui, |plot_ui| {
        let points: egui_plot::PlotPoints = history
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, v as f64])
            .collect();
        plot_ui.line(egui_plot::Line::new(points));
    });
}

/// Human-readable byte count for the network statistics tables.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_format_scales_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
