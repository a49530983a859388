use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, Painter, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use planner_timeline::config::PlannerSettings;
use planner_timeline::engine::{
    index_items, visible_bars, BarGeometry, BarShape, ConflictReport, DragController, DragMode,
    DragRefusal, ItemPhase, Viewport, ViewportTracker, VisibleBar, VisibleWindow, WindowParams,
};
use planner_timeline::model::{FlatRow, GroupBy, ScheduleItem, Timeline, ZoomLevel};

use crate::app::ScrollTarget;
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_WIDTH;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Everything the chart reads for one frame.
pub struct ChartInput<'a> {
    pub timeline: &'a Timeline,
    /// Optimistic view of the items.
    pub items: &'a [ScheduleItem],
    pub conflicts: &'a BTreeMap<String, ConflictReport>,
    pub conflicting: &'a HashSet<Uuid>,
    pub settings: &'a PlannerSettings,
    pub today: NaiveDate,
    pub scroll_target: Option<ScrollTarget>,
}

/// What the chart asks the app to do after the frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub zoom: Option<ZoomLevel>,
    pub message: Option<String>,
}

/// Content-to-screen mapping for the current frame.
#[derive(Clone, Copy)]
struct Frame {
    /// Screen position of content (0, 0).
    origin: Pos2,
    /// Visible part of the content, in screen coordinates.
    visible: Rect,
    row_height: f32,
}

impl Frame {
    fn grid_x(&self, x: f32) -> f32 {
        self.origin.x + LABEL_WIDTH + x
    }

    fn row_top(&self, row: usize) -> f32 {
        self.origin.y + HEADER_HEIGHT + row as f32 * self.row_height
    }

    /// Visible area not covered by the pinned header and label column.
    fn grid_clip(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.visible.left() + LABEL_WIDTH, self.visible.top() + HEADER_HEIGHT),
            self.visible.max,
        )
    }

    fn bar_rect(&self, geometry: &BarGeometry) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.grid_x(geometry.x), self.origin.y + HEADER_HEIGHT + geometry.y),
            Vec2::new(geometry.width, geometry.height),
        )
    }
}

/// Render the schedule chart (central panel).
pub fn show_gantt_chart(
    input: ChartInput<'_>,
    drag: &mut DragController,
    tracker: &mut ViewportTracker,
    selected: &mut Option<Uuid>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let timeline = input.timeline;
    let row_height = input.settings.row_height;

    // Ctrl+Scroll zooms the timeline
    if !drag.is_dragging() && ui.rect_contains_pointer(ui.max_rect()) {
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta > 1.0 {
            interaction.zoom = Some(timeline.zoom.zoom_in());
        } else if zoom_delta < 1.0 {
            interaction.zoom = Some(timeline.zoom.zoom_out());
        }
    }

    if timeline.flat_rows.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No items to show")
                    .font(theme::font_header())
                    .color(theme::TEXT_DIM),
            );
        });
        return interaction;
    }

    let content = Vec2::new(
        LABEL_WIDTH + timeline.total_width,
        HEADER_HEIGHT + timeline.flat_rows.len() as f32 * row_height,
    );

    let mut scroll = egui::ScrollArea::both().auto_shrink([false, false]);
    match input.scroll_target {
        Some(ScrollTarget::Date(date)) => {
            scroll = scroll.horizontal_scroll_offset(timeline.scroll_offset_for_date(date));
        }
        Some(ScrollTarget::By(dx)) => {
            let x = (tracker.viewport().scroll_left + dx).max(0.0);
            scroll = scroll.horizontal_scroll_offset(x);
        }
        None => {}
    }

    scroll.show_viewport(ui, |ui, viewport| {
        ui.set_min_size(content);
        let origin = ui.max_rect().min;
        let frame = Frame {
            origin,
            visible: viewport.translate(origin.to_vec2()),
            row_height,
        };

        // Labels and header are pinned, so the grid sees what is left of the viewport.
        let observed = Viewport {
            scroll_left: viewport.min.x,
            scroll_top: viewport.min.y,
            width: (viewport.width() - LABEL_WIDTH).max(0.0),
            height: (viewport.height() - HEADER_HEIGHT).max(0.0),
        };
        if observed != tracker.viewport() {
            tracker.observe(observed);
        }
        let params = WindowParams::for_timeline(timeline, row_height, input.settings.overscan);
        let window = tracker.on_frame(params);

        let painter = ui.painter_at(frame.visible);
        painter.rect_filled(frame.visible, 0.0, theme::BG_DARK);

        draw_rows(&painter, &frame, timeline, &window);
        draw_day_grid(&painter, &frame, timeline, &window);
        draw_today_line(&painter, &frame, timeline, input.today);

        let by_id = index_items(input.items);
        let bars = visible_bars(timeline, &by_id, &window, row_height);
        for bar in &bars {
            match bar.shape {
                BarShape::Dated { geometry, .. } => {
                    handle_dated_bar(
                        ui,
                        &painter,
                        &frame,
                        bar,
                        &geometry,
                        &input,
                        drag,
                        selected,
                        &mut interaction,
                    );
                }
                BarShape::MissingDates { geometry } => {
                    if input.settings.highlight_missing_dates {
                        draw_missing_dates(ui, &painter, &frame, bar, &geometry);
                    }
                }
            }
        }

        draw_row_labels(&painter, &frame, &input, &window);
        draw_timeline_header(&painter, &frame, timeline, &window);
        draw_corner(&painter, &frame, input.settings.group_by);
    });

    interaction
}

#[allow(clippy::too_many_arguments)]
fn handle_dated_bar(
    ui: &mut Ui,
    painter: &Painter,
    frame: &Frame,
    bar: &VisibleBar<'_>,
    geometry: &BarGeometry,
    input: &ChartInput<'_>,
    drag: &mut DragController,
    selected: &mut Option<Uuid>,
    interaction: &mut ChartInteraction,
) {
    let item = bar.item;
    let bar_rect = frame.bar_rect(geometry);
    let clip = frame.grid_clip();
    let phase = drag.item_phase(item.id);
    let is_selected = *selected == Some(item.id);
    let conflicted = input.settings.show_conflicts && input.conflicting.contains(&item.id);

    draw_item_bar(painter, bar_rect, item, phase, is_selected, conflicted);

    let visible_part = bar_rect.intersect(clip);
    if !visible_part.is_positive() {
        return;
    }

    // Handles are added after the bar so they win the hit test at the edges.
    let bar_response = ui.interact(
        visible_part,
        ui.make_persistent_id(("item-bar", item.id)),
        Sense::click_and_drag(),
    );
    let left_handle = Rect::from_min_max(
        Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
        Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
    )
    .intersect(clip);
    let right_handle = Rect::from_min_max(
        Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
        Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
    )
    .intersect(clip);
    let left_response = left_handle.is_positive().then(|| {
        ui.interact(
            left_handle,
            ui.make_persistent_id(("item-resize-start", item.id)),
            Sense::drag(),
        )
    });
    let right_response = right_handle.is_positive().then(|| {
        ui.interact(
            right_handle,
            ui.make_persistent_id(("item-resize-end", item.id)),
            Sense::drag(),
        )
    });

    let started = |r: &Option<egui::Response>| r.as_ref().is_some_and(|r| r.drag_started());
    let hovered = |r: &Option<egui::Response>| r.as_ref().is_some_and(|r| r.hovered());

    let mode = if started(&left_response) {
        Some(DragMode::ResizeStart)
    } else if started(&right_response) {
        Some(DragMode::ResizeEnd)
    } else if bar_response.drag_started() {
        Some(DragMode::Move)
    } else {
        None
    };

    if let Some(mode) = mode {
        let anchor = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| bar_response.interact_pointer_pos())
            .map(|p| p.x)
            .unwrap_or(bar_rect.left());
        match drag.begin_drag(item, mode, anchor, input.timeline) {
            Ok(()) => *selected = Some(item.id),
            Err(DragRefusal::CommitPending) => {
                interaction.message = Some(format!("'{}' is still being saved", item.name));
            }
            Err(DragRefusal::MissingDates) => {
                interaction.message = Some(format!("'{}' has no dates to move", item.name));
            }
            Err(DragRefusal::AlreadyDragging) => {}
        }
    }

    if bar_response.clicked() {
        *selected = Some(item.id);
    }

    match phase {
        ItemPhase::Dragging => {
            let icon = match drag.drag_state().map(|s| s.mode) {
                Some(DragMode::Move) => egui::CursorIcon::Grabbing,
                _ => egui::CursorIcon::ResizeHorizontal,
            };
            ui.ctx().set_cursor_icon(icon);
        }
        ItemPhase::Committing => {
            if bar_response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Progress);
            }
        }
        ItemPhase::Idle => {
            if hovered(&left_response) || hovered(&right_response) {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            } else if bar_response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }
    }

    // Handle affordances
    if phase == ItemPhase::Idle && (is_selected || bar_response.hovered()) {
        let handle_h = bar_rect.height() * 0.55;
        let handle_y = bar_rect.center().y - handle_h / 2.0;
        let lh = Rect::from_min_size(
            Pos2::new(bar_rect.left() - 1.5, handle_y),
            Vec2::new(4.0, handle_h),
        );
        let rh = Rect::from_min_size(
            Pos2::new(bar_rect.right() - 2.5, handle_y),
            Vec2::new(4.0, handle_h),
        );
        let handles = painter.with_clip_rect(clip);
        handles.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
        handles.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
    }

    if !drag.is_dragging() {
        bar_response.on_hover_ui_at_pointer(|ui| {
            ui.strong(&item.name);
            if let (Some(start), Some(end)) = (item.start, item.end) {
                ui.label(format!(
                    "{} → {}",
                    start.format("%d/%m/%Y"),
                    end.format("%d/%m/%Y")
                ));
            }
            if let Some(resource) = &item.resource {
                ui.label(format!("Resource: {}", resource));
            }
            ui.label(format!("Status: {}", item.status.label()));
            if let Some(progress) = item.progress {
                ui.label(format!("Progress: {}%", progress));
            }
            if phase == ItemPhase::Committing {
                ui.label(egui::RichText::new("Saving…").color(theme::TEXT_DIM));
            }
            if conflicted {
                ui.label(
                    egui::RichText::new(format!(
                        "{} Double-booked",
                        egui_phosphor::regular::WARNING
                    ))
                    .color(theme::CONFLICT),
                );
            }
        });
    }
}

fn draw_item_bar(
    painter: &Painter,
    bar_rect: Rect,
    item: &ScheduleItem,
    phase: ItemPhase,
    is_selected: bool,
    conflicted: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::status_color(item.status);
    let fill = match phase {
        ItemPhase::Committing => color.gamma_multiply(0.6),
        _ => color,
    };

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, fill);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if let Some(progress) = item.progress.filter(|p| *p > 0) {
        let progress_width = bar_rect.width() * f32::from(progress.min(100)) / 100.0;
        let progress_rect =
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    if conflicted {
        painter.rect_stroke(bar_rect, rounding, Stroke::new(2.0, theme::CONFLICT));
    }
    match phase {
        ItemPhase::Dragging => {
            painter.rect_stroke(
                bar_rect.expand(1.5),
                Rounding::same(theme::BAR_ROUNDING + 1.5),
                Stroke::new(2.0, theme::BORDER_ACCENT),
            );
        }
        ItemPhase::Committing => {
            painter.rect_stroke(
                bar_rect.expand(1.0),
                Rounding::same(theme::BAR_ROUNDING + 1.0),
                Stroke::new(1.0, theme::COMMITTING.gamma_multiply(0.7)),
            );
        }
        ItemPhase::Idle if is_selected => {
            painter.rect_stroke(
                bar_rect.expand(1.5),
                Rounding::same(theme::BAR_ROUNDING + 1.5),
                Stroke::new(2.0, theme::BORDER_ACCENT),
            );
        }
        ItemPhase::Idle => {}
    }

    // Name on the bar, clipped to it
    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(item.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect.intersect(painter.clip_rect())).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

/// Undated items get a fixed warning bar at the left of the visible grid.
fn draw_missing_dates(
    ui: &mut Ui,
    painter: &Painter,
    frame: &Frame,
    bar: &VisibleBar<'_>,
    geometry: &BarGeometry,
) {
    let rect = Rect::from_min_size(
        Pos2::new(
            frame.visible.left() + LABEL_WIDTH + geometry.x,
            frame.origin.y + HEADER_HEIGHT + geometry.y,
        ),
        Vec2::new(geometry.width, geometry.height),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    painter.rect_filled(rect, rounding, theme::MISSING_DATES.gamma_multiply(0.18));
    painter.rect_stroke(rect, rounding, Stroke::new(1.0, theme::MISSING_DATES));
    painter.text(
        Pos2::new(rect.left() + 8.0, rect.center().y),
        Align2::LEFT_CENTER,
        format!("{} No dates set", egui_phosphor::regular::WARNING),
        theme::font_bar(),
        theme::MISSING_DATES,
    );

    let visible_part = rect.intersect(frame.grid_clip());
    if visible_part.is_positive() {
        let item = bar.item;
        ui.interact(
            visible_part,
            ui.make_persistent_id(("item-missing-dates", item.id)),
            Sense::hover(),
        )
        .on_hover_text(format!(
            "'{}' needs a start and end date (start on or before end) to be scheduled",
            item.name
        ));
    }
}

fn draw_rows(painter: &Painter, frame: &Frame, timeline: &Timeline, window: &VisibleWindow) {
    for row in window.row_start..window.row_end {
        let Some(flat) = timeline.flat_rows.get(row) else {
            break;
        };
        let top = frame.row_top(row);
        let rect = Rect::from_min_size(
            Pos2::new(frame.visible.left(), top),
            Vec2::new(frame.visible.width(), frame.row_height),
        );
        let fill = match flat {
            FlatRow::Header { .. } => theme::BG_GROUP_ROW,
            FlatRow::Item { .. } if row % 2 == 0 => theme::BG_PANEL,
            FlatRow::Item { .. } => theme::BG_DARK,
        };
        painter.rect_filled(rect, 0.0, fill);
        painter.line_segment(
            [rect.left_bottom(), rect.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_day_grid(painter: &Painter, frame: &Frame, timeline: &Timeline, window: &VisibleWindow) {
    let top = frame.visible.top() + HEADER_HEIGHT;
    let bottom = frame.visible.bottom();
    let ppd = timeline.pixels_per_day;

    for (i, date) in timeline
        .days_between(window.day_start, window.day_end)
        .into_iter()
        .enumerate()
    {
        let x = frame.grid_x((window.day_start + i) as f32 * ppd);
        let weekend = date.weekday().number_from_monday() >= 6;
        if weekend && timeline.zoom != ZoomLevel::Month {
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(x, top), Pos2::new(x + ppd, bottom)),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        let boundary = match timeline.zoom {
            ZoomLevel::Day => true,
            ZoomLevel::Week => date.weekday() == chrono::Weekday::Mon,
            ZoomLevel::Month => date.day() == 1,
        };
        if boundary {
            painter.line_segment(
                [Pos2::new(x, top), Pos2::new(x, bottom)],
                Stroke::new(0.5, theme::GRID_LINE),
            );
        }
    }
}

fn draw_today_line(painter: &Painter, frame: &Frame, timeline: &Timeline, today: NaiveDate) {
    if today < timeline.range.start || today > timeline.range.end {
        return;
    }
    let x = frame.grid_x(timeline.date_to_x(today));
    painter.line_segment(
        [
            Pos2::new(x, frame.visible.top() + HEADER_HEIGHT),
            Pos2::new(x, frame.visible.bottom()),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_row_labels(painter: &Painter, frame: &Frame, input: &ChartInput<'_>, window: &VisibleWindow) {
    let timeline = input.timeline;
    let left = frame.visible.left();
    let by_id = index_items(input.items);

    for row in window.row_start..window.row_end {
        let Some(flat) = timeline.flat_rows.get(row) else {
            break;
        };
        let rect = Rect::from_min_size(
            Pos2::new(left, frame.row_top(row)),
            Vec2::new(LABEL_WIDTH, frame.row_height),
        );
        let text_pos = Pos2::new(rect.left() + 10.0, rect.center().y);

        match *flat {
            FlatRow::Header { group } => {
                painter.rect_filled(rect, 0.0, theme::BG_GROUP_ROW);
                let Some(row_data) = timeline.rows.get(group) else {
                    continue;
                };
                painter.text(
                    text_pos,
                    Align2::LEFT_CENTER,
                    format!("{}  ({})", row_data.key, row_data.item_ids.len()),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );

                if !input.settings.show_conflicts {
                    continue;
                }
                let conflicts = match input.settings.group_by {
                    GroupBy::Resource => input
                        .conflicts
                        .get(&row_data.key)
                        .map_or(0, |report| report.count),
                    GroupBy::Group => row_data
                        .item_ids
                        .iter()
                        .filter(|id| input.conflicting.contains(*id))
                        .count(),
                };
                if conflicts > 0 {
                    draw_conflict_badge(painter, rect, conflicts);
                }
            }
            FlatRow::Item { item_id, .. } => {
                painter.rect_filled(rect, 0.0, theme::BG_PANEL);
                let Some(item) = by_id.get(&item_id) else {
                    continue;
                };
                let galley =
                    painter.layout_no_wrap(item.name.clone(), theme::font_sub(), theme::TEXT_SECONDARY);
                let text_y = rect.center().y - galley.size().y / 2.0;
                painter.with_clip_rect(rect.shrink2(Vec2::new(4.0, 0.0))).galley(
                    Pos2::new(rect.left() + 22.0, text_y),
                    galley,
                    Color32::TRANSPARENT,
                );
            }
        }
    }

    painter.line_segment(
        [
            Pos2::new(left + LABEL_WIDTH, frame.visible.top()),
            Pos2::new(left + LABEL_WIDTH, frame.visible.bottom()),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_conflict_badge(painter: &Painter, row_rect: Rect, count: usize) {
    let text = format!("{} {}", egui_phosphor::regular::WARNING, count);
    let galley = painter.layout_no_wrap(text, theme::font_small(), Color32::WHITE);
    let size = galley.size() + Vec2::new(12.0, 4.0);
    let badge = Rect::from_min_size(
        Pos2::new(row_rect.right() - size.x - 8.0, row_rect.center().y - size.y / 2.0),
        size,
    );
    painter.rect_filled(badge, Rounding::same(size.y / 2.0), theme::CONFLICT);
    painter.galley(
        Pos2::new(badge.left() + 6.0, badge.top() + 2.0),
        galley,
        Color32::TRANSPARENT,
    );
}

fn draw_timeline_header(
    painter: &Painter,
    frame: &Frame,
    timeline: &Timeline,
    window: &VisibleWindow,
) {
    let top = frame.visible.top();
    let header = Rect::from_min_max(
        Pos2::new(frame.visible.left(), top),
        Pos2::new(frame.visible.right(), top + HEADER_HEIGHT),
    );
    painter.rect_filled(header, 0.0, theme::BG_HEADER);

    let ppd = timeline.pixels_per_day;
    let days = timeline.days_between(window.day_start, window.day_end);
    for (i, date) in days.iter().enumerate() {
        let x = frame.grid_x((window.day_start + i) as f32 * ppd);

        // Month label on the first of the month, and on the first day drawn
        if date.day() == 1 || i == 0 {
            painter.text(
                Pos2::new(x + 3.0, top + 12.0),
                Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        let label = match timeline.zoom {
            ZoomLevel::Day => Some(date.format("%a %d").to_string()),
            ZoomLevel::Week if date.weekday() == chrono::Weekday::Mon => {
                Some(date.format("W%V").to_string())
            }
            ZoomLevel::Week => None,
            ZoomLevel::Month if date.day() == 1 || date.day() == 15 => {
                Some(date.format("%d").to_string())
            }
            ZoomLevel::Month => None,
        };
        if let Some(label) = label {
            painter.line_segment(
                [Pos2::new(x, top + 22.0), Pos2::new(x, top + HEADER_HEIGHT)],
                Stroke::new(0.5, theme::GRID_LINE),
            );
            painter.text(
                Pos2::new(x + 3.0, top + 32.0),
                Align2::LEFT_CENTER,
                label,
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    painter.line_segment(
        [header.left_bottom(), header.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_corner(painter: &Painter, frame: &Frame, group_by: GroupBy) {
    let corner = Rect::from_min_size(frame.visible.min, Vec2::new(LABEL_WIDTH, HEADER_HEIGHT));
    painter.rect_filled(corner, 0.0, theme::BG_HEADER);
    painter.text(
        Pos2::new(corner.left() + 10.0, corner.center().y),
        Align2::LEFT_CENTER,
        group_by.label(),
        theme::font_header(),
        theme::TEXT_DIM,
    );
    painter.line_segment(
        [corner.right_top(), corner.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}
