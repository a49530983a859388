use egui::{Color32, FontId, Rounding, Stroke, Visuals};
use planner_timeline::model::ItemStatus;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(22, 25, 31);
pub const BG_PANEL: Color32 = Color32::from_rgb(28, 32, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(33, 38, 48);
pub const BG_GROUP_ROW: Color32 = Color32::from_rgb(37, 43, 55);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(64, 150, 200, 48);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 40);
const BG_INPUT: Color32 = Color32::from_rgb(18, 21, 27);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(48, 54, 66);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(72, 160, 210);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 231, 238);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 160, 175);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 106, 120);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

pub const ACCENT: Color32 = Color32::from_rgb(72, 160, 210);
pub const TODAY_LINE: Color32 = Color32::from_rgb(236, 84, 84);
pub const GRID_LINE: Color32 = Color32::from_rgb(41, 46, 57);
pub const HANDLE_COLOR: Color32 = Color32::WHITE;

/// Darkens the completed part of a bar.
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 60);
pub const CONFLICT: Color32 = Color32::from_rgb(232, 64, 60);
pub const MISSING_DATES: Color32 = Color32::from_rgb(246, 190, 30);
/// Dashed outline around bars whose commit has not resolved.
pub const COMMITTING: Color32 = Color32::from_rgb(240, 244, 250);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 44.0;
pub const LABEL_WIDTH: f32 = 200.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Bar colors ───────────────────────────────────────────────────────────────

pub fn status_color(status: ItemStatus) -> Color32 {
    match status {
        ItemStatus::Waiting => Color32::from_rgb(70, 130, 230),
        ItemStatus::InProgress => Color32::from_rgb(240, 140, 20),
        ItemStatus::Done => Color32::from_rgb(56, 164, 96),
        ItemStatus::Late => CONFLICT,
        ItemStatus::Blocked => Color32::from_rgb(118, 122, 138),
    }
}

// ── Visuals ──────────────────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.faint_bg_color = BG_PANEL;
    visuals.extreme_bg_color = BG_INPUT;
    visuals.striped = false;

    // (widget state, fill, border, foreground)
    let widgets = &mut visuals.widgets;
    for (state, fill, border, fg) in [
        (&mut widgets.noninteractive, BG_PANEL, BORDER_SUBTLE, TEXT_SECONDARY),
        (&mut widgets.inactive, Color32::from_rgb(40, 46, 58), BORDER_SUBTLE, TEXT_PRIMARY),
        (&mut widgets.hovered, Color32::from_rgb(50, 57, 71), ACCENT, TEXT_PRIMARY),
        (&mut widgets.active, Color32::from_rgb(58, 66, 82), ACCENT, Color32::WHITE),
        (&mut widgets.open, Color32::from_rgb(48, 55, 69), ACCENT, TEXT_PRIMARY),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, border);
        state.fg_stroke = Stroke::new(1.0, fg);
        state.rounding = Rounding::same(4.0);
    }

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    });
}
