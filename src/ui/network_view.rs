use super::{format_bytes, history_plot};
use crate::metrics::MetricsEngine;

/// The network window: interface addresses, RX/TX rate plots and the raw
/// per-interface statistics tables.
pub fn show_network_view(ui: &mut egui::Ui, engine: &MetricsEngine, y_scale: f32) {
    ui.label("Network Interfaces");
    egui::Grid::new("ipv4_table")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Interface");
            ui.strong("IPv4 Address");
            ui.end_row();
            for iface in engine.ipv4_interfaces() {
                ui.label(&iface.name);
                ui.label(&iface.address);
                ui.end_row();
            }
        });

    ui.separator();

    ui.label(format!(
        "RX Rate: {:.2} MiB/s    TX Rate: {:.2} MiB/s",
        engine.rx_rate(),
        engine.tx_rate()
    ));
    ui.add(egui::ProgressBar::new(engine.rx_rate() / 100.0).text("RX"));
    ui.add(egui::ProgressBar::new(engine.tx_rate() / 100.0).text("TX"));

    ui.columns(2, |cols| {
        cols[0].label("RX (MiB/s)");
        history_plot(
            &mut cols[0],
            "rx_plot",
            100.0,
            &engine.rx_history,
            engine.rx_history.max_value() * y_scale,
        );
        cols[1].label("TX (MiB/s)");
        history_plot(
            &mut cols[1],
            "tx_plot",
            100.0,
            &engine.tx_history,
            engine.tx_history.max_value() * y_scale,
        );
    });

    ui.separator();

    ui.collapsing("RX Statistics", |ui| {
        egui::Grid::new("rx_table")
            .num_columns(9)
            .striped(true)
            .show(ui, |ui| {
                for header in [
                    "Interface",
                    "Bytes",
                    "Packets",
                    "Errors",
                    "Drop",
                    "FIFO",
                    "Frame",
                    "Compressed",
                    "Multicast",
                ] {
                    ui.strong(header);
                }
                ui.end_row();

                for (name, rx) in engine.rx_table() {
                    ui.label(name);
                    ui.label(format_bytes(rx.bytes));
                    ui.label(rx.packets.to_string());
                    ui.label(rx.errs.to_string());
                    ui.label(rx.drop.to_string());
                    ui.label(rx.fifo.to_string());
                    ui.label(rx.frame.to_string());
                    ui.label(rx.compressed.to_string());
                    ui.label(rx.multicast.to_string());
                    ui.end_row();
                }
            });
    });

    ui.collapsing("TX Statistics", |ui| {
        egui::Grid::new("tx_table")
            .num_columns(9)
            .striped(true)
            .show(ui, |ui| {
                for header in [
                    "Interface",
                    "Bytes",
                    "Packets",
                    "Errors",
                    "Drop",
                    "FIFO",
                    "Colls",
                    "Carrier",
                    "Compressed",
                ] {
                    ui.strong(header);
                }
                ui.end_row();

                for (name, tx) in engine.tx_table() {
                    ui.label(name);
                    ui.label(format_bytes(tx.bytes));
                    ui.label(tx.packets.to_string());
                    ui.label(tx.errs.to_string());
                    ui.label(tx.drop.to_string());
                    ui.label(tx.fifo.to_string());
                    ui.label(tx.colls.to_string());
                    ui.label(tx.carrier.to_string());
                    ui.label(tx.compressed.to_string());
                    ui.end_row();
                }
            });
    });
}
