// src/gui/components/standings.rs
//
// Standings table next to the chart. Columns follow `report::TABLE_HEADERS`.

use eframe::egui::{ self, Align, Layout, RichText };
use egui_extras::{ Column, TableBuilder };

use crate::report::{ ReportRow, TABLE_HEADERS };

const WIDTHS: [f32; 8] = [56.0, 40.0, 36.0, 36.0, 36.0, 52.0, 52.0, 52.0];

pub fn draw(ui: &mut egui::Ui, rows: &[ReportRow]) {
    if rows.is_empty() {
        ui.label("No snapshot yet");
        return;
    }

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .cell_layout(Layout::right_to_left(Align::Center));
    for w in WIDTHS {
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    table
        .header(22.0, |mut header| {
            for h in TABLE_HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut tr| {
                let r = &rows[tr.index()];
                let color = egui::Color32::from_rgb(r.color.r, r.color.g, r.color.b);
                for (ci, cell) in r.cells().into_iter().enumerate() {
                    tr.col(|ui| {
                        if ci == 0 {
                            ui.label(RichText::new(cell).color(color).strong())
                                .on_hover_text(&r.team_name);
                        } else {
                            ui.label(cell);
                        }
                    });
                }
            });
        });
}
