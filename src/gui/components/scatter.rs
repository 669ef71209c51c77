// src/gui/components/scatter.rs
//
// Offensive (x) vs defensive (y, reversed: better defense is higher) rating
// scatter. One marker per team in its color, labelled "[rank-ABR]", with the
// off == def reference diagonal. Purely a view over report rows.

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2,
};

use crate::{ config::colors::TeamColor, report::ReportRow };

const DIAGONAL: (f64, f64) = (105.0, 125.0);
const MARGIN: f32 = 40.0;
const MARKER_R: f32 = 5.0;

/// Data-space bounds of the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Axes {
    /// Smallest box holding every team and the reference diagonal, padded a point.
    pub fn fit(rows: &[ReportRow]) -> Self {
        let (mut lo, mut hi) = DIAGONAL;
        let (mut ylo, mut yhi) = DIAGONAL;
        for r in rows {
            lo = lo.min(r.offensive_rating);
            hi = hi.max(r.offensive_rating);
            ylo = ylo.min(r.defensive_rating);
            yhi = yhi.max(r.defensive_rating);
        }
        Self { x: (lo - 1.0, hi + 1.0), y: (ylo - 1.0, yhi + 1.0) }
    }

    /// Data → screen. y is reversed: the lowest defensive rating sits at the top.
    pub fn to_screen(&self, rect: Rect, x: f64, y: f64) -> Pos2 {
        let fx = ((x - self.x.0) / (self.x.1 - self.x.0)) as f32;
        let fy = ((y - self.y.0) / (self.y.1 - self.y.0)) as f32;
        Pos2::new(rect.left() + fx * rect.width(), rect.top() + fy * rect.height())
    }
}

fn color32(c: TeamColor) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

pub fn draw(ui: &mut egui::Ui, rows: &[ReportRow]) {
    let size = ui.available_size().max(Vec2::splat(200.0));
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let plot = response.rect.shrink(MARGIN);
    let axes = Axes::fit(rows);
    let visuals = ui.visuals();
    let fg = visuals.text_color();
    let grid = visuals.weak_text_color();

    painter.rect_stroke(plot, 0.0, Stroke::new(1.0, grid), StrokeKind::Inside);

    // off == def
    let a = axes.to_screen(plot, DIAGONAL.0, DIAGONAL.0);
    let b = axes.to_screen(plot, DIAGONAL.1, DIAGONAL.1);
    painter.line_segment([a, b], Stroke::new(1.0, grid));

    let font = FontId::proportional(11.0);
    painter.text(
        Pos2::new(plot.center().x, plot.bottom() + MARGIN * 0.5),
        Align2::CENTER_CENTER,
        "Offensive rating",
        font.clone(),
        fg,
    );
    painter.text(
        Pos2::new(plot.left() - MARGIN * 0.5, plot.center().y),
        Align2::CENTER_CENTER,
        "Def",
        font.clone(),
        fg,
    );
    for (x, align) in [(axes.x.0, Align2::LEFT_TOP), (axes.x.1, Align2::RIGHT_TOP)] {
        let p = axes.to_screen(plot, x, axes.y.1);
        painter.text(p + Vec2::new(0.0, 4.0), align, format!("{x:.0}"), font.clone(), grid);
    }
    for (y, align) in [(axes.y.0, Align2::RIGHT_TOP), (axes.y.1, Align2::RIGHT_BOTTOM)] {
        let p = axes.to_screen(plot, axes.x.0, y);
        painter.text(p - Vec2::new(4.0, 0.0), align, format!("{y:.0}"), font.clone(), grid);
    }

    let mut hovered: Option<&ReportRow> = None;
    let pointer = response.hover_pos();
    for r in rows {
        let p = axes.to_screen(plot, r.offensive_rating, r.defensive_rating);
        let color = color32(r.color);
        painter.circle(p, MARKER_R, color, Stroke::new(1.0, fg));
        painter.text(
            p + Vec2::new(MARKER_R + 2.0, 0.0),
            Align2::LEFT_CENTER,
            format!("[{}]", r.label),
            font.clone(),
            color,
        );
        if pointer.is_some_and(|h| h.distance(p) <= MARKER_R * 2.0) {
            hovered = Some(r);
        }
    }

    if let Some(r) = hovered {
        response.on_hover_text(format!(
            "{} ({}-{})\noff {:.1}  def {:.1}  net {:+.1}",
            r.team_name, r.wins, r.losses, r.offensive_rating, r.defensive_rating, r.net_rating
        ));
    }
}
