use std::collections::HashSet;

use crate::metrics::MetricsEngine;

/// The memory & processes window: RAM/swap/disk gauges, a name filter and
/// the process table with per-row selection.
pub fn show_memory_view(
    ui: &mut egui::Ui,
    engine: &MetricsEngine,
    filter: &mut String,
    selected_pids: &mut HashSet<i32>,
) {
    let mem = engine.mem();

    ui.label(format!(
        "Physical Memory (RAM) Usage: {:.1}%",
        mem.ram_percent()
    ));
    ui.add(egui::ProgressBar::new(mem.ram_percent() / 100.0).show_percentage());

    ui.label(format!(
        "Virtual Memory (SWAP) Usage: {:.1}%",
        mem.swap_percent()
    ));
    ui.add(egui::ProgressBar::new(mem.swap_percent() / 100.0).show_percentage());

    ui.label(format!("Disk Usage: {:.1}%", engine.disk().percent()));
    ui.add(egui::ProgressBar::new(engine.disk().percent() / 100.0).show_percentage());

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Filter processes:");
        ui.text_edit_singleline(filter);
        if ui.small_button("❌").clicked() {
            filter.clear();
        }
    });

    let needle = filter.to_lowercase();
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("process_table")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .show(ui, |ui| {
                ui.strong("Select");
                ui.strong("PID");
                ui.strong("Name");
                ui.strong("State");
                ui.strong("CPU (%)");
                ui.strong("Memory (KB)");
                ui.end_row();

                for row in engine.processes() {
                    if !needle.is_empty() && !row.name.to_lowercase().contains(&needle) {
                        continue;
                    }
                    let mut selected = selected_pids.contains(&row.pid);
                    if ui.checkbox(&mut selected, "").changed() {
                        set_selected(selected_pids, row.pid, selected);
                    }
                    ui.label(row.pid.to_string());
                    ui.label(&row.name);
                    ui.label(row.state.to_string());
                    ui.label(format!("{:.2}", row.cpu_percent));
                    ui.label(format!("{} ({:.1}%)", row.rss_kb, row.mem_percent));
                    ui.end_row();
                }
            });
    });
}

fn set_selected(selected_pids: &mut HashSet<i32>, pid: i32, selected: bool) {
    if selected {
        selected_pids.insert(pid);
    } else {
        selected_pids.remove(&pid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_toggles_per_pid() {
        let mut selected = HashSet::new();
        set_selected(&mut selected, 42, true);
        set_selected(&mut selected, 7, true);
        assert!(selected.contains(&42) && selected.contains(&7));

        set_selected(&mut selected, 42, false);
        assert!(!selected.contains(&42));
        assert!(selected.contains(&7));

        // Deselecting an unknown pid is a no-op.
        set_selected(&mut selected, 999, false);
        assert_eq!(selected.len(), 1);
    }
}
