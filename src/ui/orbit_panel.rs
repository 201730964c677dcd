use eframe::egui;

use crate::control::interaction::{Click, MouseButton};
use crate::data::datetime;
use crate::data::instrument::{Instrument, InstrumentSeries, SeriesData};
use crate::processing::downsampling::{column_buckets, lttb_indices, select};
use crate::render::colormap::{Colormap, LogScale};
use crate::render::figure::{Figure, FigureContent};
use crate::render::markers::{dash_segments, MarkerLine};
use crate::render::plot_interaction::{
    compute_grid_lines, compute_time_ticks, format_tick_value, value_to_screen_y, TimeView,
};
use crate::render::theme::Theme;

const LEFT_MARGIN: f32 = 70.0;
const RIGHT_MARGIN: f32 = 16.0;
const TOP_MARGIN: f32 = 8.0;
const BOTTOM_MARGIN: f32 = 40.0;
const PANEL_GAP: f32 = 8.0;

/// Paint the figure title and its three stacked panels.
/// Returns the click delivered on the plot area this frame, if any.
pub fn show_orbit_figure(figure: &mut Figure, ui: &mut egui::Ui, theme: &Theme) -> Option<Click> {
    ui.vertical_centered(|ui| {
        ui.heading(&figure.title);
    });
    ui.add_space(4.0);

    let total_height = ui.available_height().max(300.0);
    let total_rect = ui
        .allocate_space(egui::vec2(ui.available_width(), total_height))
        .1;
    figure.frame_rect = Some(total_rect);

    let painter = ui.painter_at(total_rect);
    painter.rect_filled(total_rect, 0.0, theme.panel_bg());

    let FigureContent::Orbit {
        bundle, validity, ..
    } = &figure.content
    else {
        let notice = match figure.content.orbit() {
            Some(orbit) => format!("no data to display for orbit {orbit}"),
            None => "no data to display".to_string(),
        };
        draw_centered_notice(&painter, total_rect, &notice);
        return None;
    };
    let bundle = bundle.clone();
    let validity = *validity;

    let plot_area = egui::Rect::from_min_max(
        egui::pos2(total_rect.left() + LEFT_MARGIN, total_rect.top() + TOP_MARGIN),
        egui::pos2(total_rect.right() - RIGHT_MARGIN, total_rect.bottom() - BOTTOM_MARGIN),
    );
    let panel_height = ((plot_area.height() - 2.0 * PANEL_GAP) / 3.0).max(40.0);
    let panels: [egui::Rect; 3] = std::array::from_fn(|i| {
        egui::Rect::from_min_size(
            egui::pos2(
                plot_area.left(),
                plot_area.top() + i as f32 * (panel_height + PANEL_GAP),
            ),
            egui::vec2(plot_area.width(), panel_height),
        )
    });

    let plot_id = egui::Id::new("orbit_figure");
    let response = ui.interact(plot_area, plot_id, egui::Sense::click_and_drag());
    figure.view.handle_input(&response, plot_area);
    let click = read_click(&response, &figure.view, plot_area);

    let view = &figure.view;
    let ticks = compute_time_ticks(
        view.t_min,
        view.t_max,
        (plot_area.width() / 110.0).max(2.0) as usize,
    );

    for instrument in Instrument::ALL {
        let rect = panels[instrument.panel_index()];
        let limits = figure.limits.get(instrument);
        painter.rect_filled(rect, 0.0, theme.panel_bg());

        let clipped = painter.with_clip_rect(rect);
        match bundle.series(instrument) {
            Some(series) if validity.get(instrument) => match instrument {
                Instrument::Ima => {
                    draw_heatmap(&clipped, series, Colormap::Bwr, limits, view, rect)
                }
                Instrument::Els => {
                    draw_heatmap(&clipped, series, Colormap::Coolwarm, limits, view, rect)
                }
                Instrument::Mag => draw_field(&clipped, series, limits, view, rect, theme),
            },
            _ => draw_centered_notice(&clipped, rect, "no data"),
        }

        draw_panel_axes(&painter, instrument, limits, &ticks, view, rect, total_rect, theme);
    }

    draw_time_labels(&painter, &ticks, view, panels[2], total_rect);

    let marker_painter = painter.with_clip_rect(plot_area);
    for marker in &figure.markers {
        draw_marker(&marker_painter, marker, view, &panels, theme);
    }

    if let Some(pos) = response.hover_pos() {
        let dim = ui.visuals().text_color().gamma_multiply(0.7);
        painter.text(
            egui::pos2(plot_area.right(), total_rect.bottom() - 4.0),
            egui::Align2::RIGHT_BOTTOM,
            datetime::format_timestamp(view.screen_to_time(pos.x, plot_area)),
            egui::FontId::monospace(11.0),
            dim,
        );
    }

    click
}

/// Translate this frame's click, if any, into a timestamped click.
fn read_click(response: &egui::Response, view: &TimeView, rect: egui::Rect) -> Option<Click> {
    if !view.has_axis() {
        return None;
    }
    let button = if response.clicked_by(egui::PointerButton::Primary) {
        MouseButton::Left
    } else if response.secondary_clicked() {
        MouseButton::Right
    } else if response.middle_clicked()
        || response.clicked_by(egui::PointerButton::Extra1)
        || response.clicked_by(egui::PointerButton::Extra2)
    {
        MouseButton::Other
    } else {
        return None;
    };
    let pos = response.interact_pointer_pos()?;
    Some(Click::new(view.screen_to_time(pos.x, rect), button))
}

fn draw_centered_notice(painter: &egui::Painter, rect: egui::Rect, text: &str) {
    let color = painter.ctx().style().visuals.weak_text_color();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        color,
    );
}

/// Index range of timestamps inside the window, widened by one sample on
/// each side so edge cells and line segments reach the border.
fn visible_range(timestamps: &[f64], view: &TimeView) -> std::ops::Range<usize> {
    let start = timestamps
        .partition_point(|t| *t < view.t_min)
        .saturating_sub(1);
    let end = (timestamps.partition_point(|t| *t <= view.t_max) + 1).min(timestamps.len());
    start..end.max(start)
}

fn draw_heatmap(
    painter: &egui::Painter,
    series: &InstrumentSeries,
    colormap: Colormap,
    limits: (f64, f64),
    view: &TimeView,
    rect: egui::Rect,
) {
    let SeriesData::Spectrogram(spec) = &series.data else {
        return;
    };
    let cols = spec.cols.min(series.timestamps.len());
    if cols == 0 || spec.rows == 0 {
        return;
    }
    let Some(scale) = LogScale::from_values(&spec.values) else {
        return;
    };
    let ts = &series.timestamps[..cols];
    let cadence = if cols > 1 {
        (ts[cols - 1] - ts[0]) / (cols - 1) as f64
    } else {
        1.0
    };

    let visible = visible_range(ts, view);
    let first = visible.start;
    let mut mesh = egui::Mesh::default();
    for bucket in column_buckets(visible.len(), rect.width().max(1.0) as usize) {
        let (start, end) = (first + bucket.start, first + bucket.end);
        let t0 = ts[start];
        let t1 = if end < cols { ts[end] } else { ts[cols - 1] + cadence };
        let x0 = view.time_to_screen(t0, rect);
        let x1 = view.time_to_screen(t1, rect);

        for row in 0..spec.rows {
            let (sum, count) = (start..end)
                .filter_map(|col| spec.value(row, col))
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            if count == 0 {
                continue;
            }
            let y_top = value_to_screen_y(row as f64 + 1.0, limits, rect);
            let y_bottom = value_to_screen_y(row as f64, limits, rect);
            let cell = egui::Rect::from_min_max(egui::pos2(x0, y_top), egui::pos2(x1, y_bottom));
            mesh.add_colored_rect(cell, colormap.sample(scale.normalize(sum / count as f64)));
        }
    }
    painter.add(egui::Shape::mesh(mesh));
}

fn draw_field(
    painter: &egui::Painter,
    series: &InstrumentSeries,
    limits: (f64, f64),
    view: &TimeView,
    rect: egui::Rect,
    theme: &Theme,
) {
    let SeriesData::Vector(field) = &series.data else {
        return;
    };
    let magnitude = field.magnitude();
    let [bx, by, bz] = field.axes();
    let [cx, cy, cz] = theme.axis_colors();
    let traces: [(&str, &[f64], egui::Color32); 4] = [
        ("|B|", magnitude.as_slice(), theme.foreground()),
        ("Bx", bx, cx),
        ("By", by, cy),
        ("Bz", bz, cz),
    ];

    let target = (rect.width() as usize * 2).max(3);
    for (_, values, color) in &traces {
        let n = series.timestamps.len().min(values.len());
        let window = visible_range(&series.timestamps[..n], view);
        let ts = &series.timestamps[window.clone()];
        let vs = &values[window];
        let keep = lttb_indices(ts, vs, target);
        let points: Vec<egui::Pos2> = select(ts, &keep)
            .into_iter()
            .zip(select(vs, &keep))
            .filter(|(t, v)| t.is_finite() && v.is_finite())
            .map(|(t, v)| egui::pos2(view.time_to_screen(t, rect), value_to_screen_y(v, limits, rect)))
            .collect();
        if points.len() >= 2 {
            painter.add(egui::Shape::line(points, egui::Stroke::new(1.2, *color)));
        }
    }

    draw_legend(painter, &traces.map(|(label, _, color)| (label, color)), rect);
}

fn draw_legend(painter: &egui::Painter, entries: &[(&str, egui::Color32)], rect: egui::Rect) {
    let text_color = painter.ctx().style().visuals.text_color();
    let bg_color = painter.ctx().style().visuals.window_fill;
    let font = egui::FontId::proportional(11.0);
    let max_width = entries
        .iter()
        .map(|(label, _)| {
            painter
                .layout_no_wrap(label.to_string(), font.clone(), text_color)
                .rect
                .width()
        })
        .fold(0.0_f32, f32::max);

    let legend_width = max_width + 24.0;
    let x = rect.right() - 8.0;
    let mut y = rect.top() + 8.0;
    let legend_rect = egui::Rect::from_min_size(
        egui::pos2(x - legend_width - 4.0, y - 4.0),
        egui::vec2(legend_width + 8.0, entries.len() as f32 * 16.0 + 8.0),
    );
    painter.rect_filled(legend_rect, 4.0, bg_color.gamma_multiply(0.85));

    for (label, color) in entries {
        let swatch = egui::Rect::from_min_size(egui::pos2(x - legend_width, y), egui::vec2(12.0, 12.0));
        painter.rect_filled(swatch, 2.0, *color);
        painter.text(
            egui::pos2(x - legend_width + 16.0, y + 6.0),
            egui::Align2::LEFT_CENTER,
            *label,
            font.clone(),
            text_color,
        );
        y += 16.0;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_panel_axes(
    painter: &egui::Painter,
    instrument: Instrument,
    limits: (f64, f64),
    ticks: &[f64],
    view: &TimeView,
    rect: egui::Rect,
    total_rect: egui::Rect,
    theme: &Theme,
) {
    let text_color = painter.ctx().style().visuals.text_color();
    let dim_color = text_color.gamma_multiply(0.6);
    let grid = egui::Stroke::new(1.0, theme.grid_color());

    for &t in ticks {
        let x = view.time_to_screen(t, rect);
        if x >= rect.left() && x <= rect.right() {
            painter.vline(x, rect.y_range(), grid);
        }
    }

    for (value, is_major) in compute_grid_lines(limits.0, limits.1) {
        if !is_major {
            continue;
        }
        let y = value_to_screen_y(value, limits, rect);
        painter.hline(rect.x_range(), y, grid);
        painter.text(
            egui::pos2(rect.left() - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            format_tick_value(value),
            egui::FontId::proportional(10.0),
            dim_color,
        );
    }

    painter.text(
        egui::pos2(total_rect.left() + 2.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        instrument.short_name(),
        egui::FontId::proportional(11.0),
        text_color,
    );
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, dim_color),
        egui::StrokeKind::Outside,
    );
}

fn draw_time_labels(
    painter: &egui::Painter,
    ticks: &[f64],
    view: &TimeView,
    bottom_panel: egui::Rect,
    total_rect: egui::Rect,
) {
    let text_color = painter.ctx().style().visuals.text_color();
    let dim_color = text_color.gamma_multiply(0.6);
    let span = view.span();

    for &t in ticks {
        let x = view.time_to_screen(t, bottom_panel);
        if x < bottom_panel.left() || x > bottom_panel.right() {
            continue;
        }
        painter.text(
            egui::pos2(x, bottom_panel.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            datetime::format_tick(t, span),
            egui::FontId::proportional(10.0),
            dim_color,
        );
    }

    painter.text(
        egui::pos2(bottom_panel.center().x, total_rect.bottom() - 4.0),
        egui::Align2::CENTER_BOTTOM,
        format!("Time (UTC) {}", datetime::format_date(view.t_min)),
        egui::FontId::proportional(12.0),
        text_color,
    );
}

fn draw_marker(
    painter: &egui::Painter,
    marker: &MarkerLine,
    view: &TimeView,
    panels: &[egui::Rect; 3],
    theme: &Theme,
) {
    let (color, dash) = marker.appearance(theme);
    let stroke = egui::Stroke::new(1.5, color);
    let x = view.time_to_screen(marker.time, panels[0]);
    if x < panels[0].left() || x > panels[0].right() {
        return;
    }

    for rect in panels {
        for (top, bottom) in dash_segments(rect.top(), rect.bottom(), dash) {
            painter.line_segment([egui::pos2(x, top), egui::pos2(x, bottom)], stroke);
        }
    }

    if marker.is_free() {
        painter.text(
            egui::pos2(x + 4.0, panels[0].top() + 4.0),
            egui::Align2::LEFT_TOP,
            datetime::format_timestamp(marker.time),
            egui::FontId::proportional(11.0),
            color,
        );
    }
}
