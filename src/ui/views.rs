use chrono::{NaiveDate, Weekday};
use egui::{Color32, RichText, Ui};

use stretch_planner::config::WeekendMode;
use stretch_planner::schedule::{
    current_day_column, BlockId, CategoryId, CategoryRegistry, GridMetrics, GridRow, Layout,
    ReminderList, TimeBlock, DAY_NAMES, PLACEHOLDER_MESSAGE,
};

use super::theme::{block_colors, category_color, grid_colors, today_fill, ACCENT};

pub const SUGGESTIONS: [&str; 5] = [
    "Morning focus block",
    "Lunch break",
    "Team meeting",
    "Exercise",
    "Review session",
];

/// Tip shown in the suggestions panel, with an optional action label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub text: &'static str,
    pub action: Option<&'static str>,
}

pub const DEFAULT_TIPS: [Suggestion; 1] = [Suggestion {
    text: "Add a 15-minute break after your focus block",
    action: Some("Apply Suggestion"),
}];

const INPUT_HINT: &str =
    "Try: 'Block 2 hours for deep work tomorrow morning' or 'Meeting with Sarah Friday 3pm'";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekNav {
    Previous,
    Today,
    Next,
}

/// Result from grid interactions
#[derive(Default)]
pub struct GridResult {
    pub remove: Option<BlockId>,
    pub toggle_reminder: Option<BlockId>,
}

pub enum CategoryAction {
    Add(String),
    Remove(CategoryId),
}

/// In `Auto` mode weekends show when today is Saturday/Sunday
/// or any block lands on one.
pub fn should_show_weekends(mode: WeekendMode, blocks: &[TimeBlock], today: Weekday) -> bool {
    let is_weekend = |day: Weekday| matches!(day, Weekday::Sat | Weekday::Sun);
    match mode {
        WeekendMode::Always => true,
        WeekendMode::Never => false,
        WeekendMode::Auto => is_weekend(today) || blocks.iter().any(|b| is_weekend(b.day)),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title row with the week range and prev / today / next buttons
pub fn render_week_header(ui: &mut Ui, week: &[NaiveDate; 7]) -> Option<WeekNav> {
    let mut nav = None;

    ui.horizontal(|ui| {
        ui.heading("Weekly View");
        ui.label(
            RichText::new(format!(
                "{} - {}",
                week[0].format("%B %-d"),
                week[6].format("%B %-d, %Y")
            ))
            .color(grid_colors().1),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(egui_phosphor::regular::CARET_RIGHT).clicked() {
                nav = Some(WeekNav::Next);
            }
            if ui.button("Today").clicked() {
                nav = Some(WeekNav::Today);
            }
            if ui.button(egui_phosphor::regular::CARET_LEFT).clicked() {
                nav = Some(WeekNav::Previous);
            }
        });
    });

    nav
}

/// Paint the week grid from a computed layout.
pub fn render_week_grid(
    ui: &mut Ui,
    layout: &Layout,
    blocks: &[TimeBlock],
    week: &[NaiveDate; 7],
    today: NaiveDate,
    show_weekends: bool,
    metrics: &GridMetrics,
) -> GridResult {
    let mut result = GridResult::default();

    let columns: Vec<u8> = (0..7u8).filter(|c| show_weekends || *c < 5).collect();
    let today_column = current_day_column(week, today).map(|c| c as u8);

    // Layout constants
    let hour_label_width = 80.0;
    let header_height = 48.0;
    let row_height = metrics.row_height;
    let (grid_line_color, header_text, muted_text) = grid_colors();

    let available_width = ui.available_width();
    let day_width = (available_width - hour_label_width) / columns.len().max(1) as f32;

    // Day headers
    let (header_rect, _) = ui.allocate_exact_size(
        egui::vec2(available_width, header_height),
        egui::Sense::hover(),
    );
    let painter = ui.painter().clone();

    painter.text(
        egui::pos2(header_rect.min.x + 8.0, header_rect.center().y),
        egui::Align2::LEFT_CENTER,
        "Time",
        egui::FontId::proportional(13.0),
        muted_text,
    );

    for (i, column) in columns.iter().enumerate() {
        let x = header_rect.min.x + hour_label_width + i as f32 * day_width;
        let center_x = x + day_width / 2.0;
        let is_today = today_column == Some(*column);
        let date = week[*column as usize];

        if is_today {
            let rect = egui::Rect::from_min_size(
                egui::pos2(x, header_rect.min.y),
                egui::vec2(day_width, header_height),
            );
            painter.rect_filled(rect, 4.0, today_fill());
        }

        let name_color = if is_today { ACCENT } else { header_text };
        painter.text(
            egui::pos2(center_x, header_rect.min.y + 14.0),
            egui::Align2::CENTER_CENTER,
            capitalize(DAY_NAMES[*column as usize]),
            egui::FontId::proportional(13.0),
            name_color,
        );
        painter.text(
            egui::pos2(center_x, header_rect.min.y + 34.0),
            egui::Align2::CENTER_CENTER,
            date.format("%-d").to_string(),
            egui::FontId::proportional(16.0),
            Color32::WHITE,
        );
    }

    let overhang = (metrics.block_height - row_height).max(0.0);
    let total_grid_height = layout.rows.len() as f32 * row_height + overhang;

    egui::ScrollArea::vertical().show(ui, |ui| {
        let (grid_rect, _) = ui.allocate_exact_size(
            egui::vec2(available_width, total_grid_height),
            egui::Sense::hover(),
        );
        let painter = ui.painter().clone();
        let column_x = |i: usize| grid_rect.min.x + hour_label_width + i as f32 * day_width;

        // Highlight current day column
        if let Some(i) = columns.iter().position(|c| today_column == Some(*c)) {
            let col_rect = egui::Rect::from_min_size(
                egui::pos2(column_x(i), grid_rect.min.y),
                egui::vec2(day_width, total_grid_height),
            );
            painter.rect_filled(col_rect, 0.0, today_fill());
        }

        for i in 0..=columns.len() {
            let x = column_x(i);
            painter.line_segment(
                [egui::pos2(x, grid_rect.min.y), egui::pos2(x, grid_rect.max.y)],
                egui::Stroke::new(1.0, grid_line_color),
            );
        }

        for (row_idx, row) in layout.rows.iter().enumerate() {
            let y = grid_rect.min.y + row_idx as f32 * row_height;

            painter.text(
                egui::pos2(grid_rect.min.x + hour_label_width - 8.0, y + 6.0),
                egui::Align2::RIGHT_TOP,
                row.label(),
                egui::FontId::proportional(11.0),
                muted_text,
            );
            painter.line_segment(
                [
                    egui::pos2(grid_rect.min.x + hour_label_width, y),
                    egui::pos2(grid_rect.max.x, y),
                ],
                egui::Stroke::new(1.0, grid_line_color),
            );

            if let GridRow::Placeholder = row {
                for i in 0..columns.len() {
                    painter.text(
                        egui::pos2(column_x(i) + day_width / 2.0, y + row_height / 2.0),
                        egui::Align2::CENTER_CENTER,
                        PLACEHOLDER_MESSAGE,
                        egui::FontId::proportional(12.0),
                        muted_text,
                    );
                }
            }
        }

        for placement in &layout.placements {
            let Some(i) = columns.iter().position(|c| *c == placement.column) else {
                continue;
            };
            let Some(block) = blocks.iter().find(|b| b.id == placement.block_id) else {
                continue;
            };

            let rect = egui::Rect::from_min_size(
                egui::pos2(
                    column_x(i) + 4.0,
                    grid_rect.min.y + placement.row as f32 * row_height + placement.offset_px,
                ),
                egui::vec2(day_width - 8.0, placement.height_px),
            );
            render_block(&painter, rect, block);

            let response = ui
                .interact(rect, ui.id().with(block.id.as_str()), egui::Sense::click())
                .on_hover_text(format!(
                    "{} ({} - {})",
                    block.title, block.start_time, block.end_time
                ));
            response.context_menu(|ui| {
                let reminder_label = if block.has_reminder {
                    "Remove reminder"
                } else {
                    "Set reminder"
                };
                if ui.button(reminder_label).clicked() {
                    result.toggle_reminder = Some(block.id.clone());
                    ui.close_menu();
                }
                if ui.button("Delete").clicked() {
                    result.remove = Some(block.id.clone());
                    ui.close_menu();
                }
            });
        }
    });

    result
}

fn render_block(painter: &egui::Painter, rect: egui::Rect, block: &TimeBlock) {
    let accent = category_color(block.category_color);
    let (bg, text_color, secondary) = block_colors();
    let corner_radius = 4.0;

    painter.rect(rect, corner_radius, bg, egui::Stroke::new(1.0, accent));

    // Left accent stripe
    let stripe = egui::Rect::from_min_size(rect.min, egui::vec2(3.0, rect.height()));
    painter.rect(
        stripe,
        egui::Rounding {
            nw: corner_radius,
            sw: corner_radius,
            ne: 0.0,
            se: 0.0,
        },
        accent,
        egui::Stroke::NONE,
    );

    let clipped = painter.with_clip_rect(rect.shrink(1.0));
    let left = rect.min.x + 8.0;

    clipped.text(
        egui::pos2(left, rect.min.y + 6.0),
        egui::Align2::LEFT_TOP,
        &block.title,
        egui::FontId::proportional(13.0),
        text_color,
    );
    clipped.text(
        egui::pos2(left, rect.min.y + 26.0),
        egui::Align2::LEFT_TOP,
        format!("{} - {}", block.start_time, block.end_time),
        egui::FontId::proportional(11.0),
        secondary,
    );

    clipped.circle_filled(egui::pos2(left + 3.0, rect.min.y + 50.0), 3.0, accent);
    clipped.text(
        egui::pos2(left + 10.0, rect.min.y + 50.0),
        egui::Align2::LEFT_CENTER,
        block.category.label(),
        egui::FontId::proportional(11.0),
        secondary,
    );

    if block.has_reminder {
        clipped.text(
            egui::pos2(rect.max.x - 6.0, rect.min.y + 6.0),
            egui::Align2::RIGHT_TOP,
            egui_phosphor::regular::CLOCK,
            egui::FontId::proportional(12.0),
            ACCENT,
        );
    }
}

/// Input box plus suggestion chips. Returns the submitted text.
pub fn render_quick_input(ui: &mut Ui, input: &mut String) -> Option<String> {
    let mut submitted = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(egui_phosphor::regular::SPARKLE).color(ACCENT));
        ui.label(RichText::new("Quick Schedule").strong());
    });

    ui.horizontal(|ui| {
        let add_width = 90.0;
        let response = ui.add(
            egui::TextEdit::singleline(input)
                .hint_text(INPUT_HINT)
                .desired_width(ui.available_width() - add_width),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let has_text = !input.trim().is_empty();
        let add_clicked = ui
            .add_enabled(
                has_text,
                egui::Button::new(format!("{} Add", egui_phosphor::regular::PLUS)),
            )
            .clicked();

        if has_text && (enter || add_clicked) {
            submitted = Some(std::mem::take(input));
        }
    });

    ui.horizontal_wrapped(|ui| {
        for suggestion in SUGGESTIONS {
            if ui.small_button(suggestion).clicked() {
                *input = suggestion.to_string();
            }
        }
    });

    submitted
}

/// Returns the id of a dismissed reminder. Draws nothing when the list is empty.
pub fn render_reminders(ui: &mut Ui, reminders: &ReminderList) -> Option<BlockId> {
    if reminders.is_empty() {
        return None;
    }

    let mut dismissed = None;
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, ACCENT.linear_multiply(0.4)))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(egui_phosphor::regular::BELL).color(ACCENT));
                ui.label(RichText::new("Reminders").strong());
            });

            let (_, _, secondary) = block_colors();
            for reminder in reminders.iter() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").color(category_color(reminder.color)));
                    ui.vertical(|ui| {
                        ui.label(&reminder.title);
                        ui.label(
                            RichText::new(format!(
                                "{} {} • {}",
                                egui_phosphor::regular::CLOCK,
                                reminder.time,
                                reminder.category
                            ))
                            .small()
                            .color(secondary),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Dismiss").clicked() {
                            dismissed = Some(reminder.id.clone());
                        }
                    });
                });
            }
        });

    dismissed
}

/// Returns the tip whose action button was clicked.
pub fn render_optimization_tips(ui: &mut Ui, tips: &[Suggestion]) -> Option<Suggestion> {
    let mut applied = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(egui_phosphor::regular::LIGHTBULB).color(ACCENT));
        ui.label(RichText::new("Optimization Suggestions").strong());
    });

    let (_, _, secondary) = block_colors();
    for tip in tips {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Stretch suggests:").strong().color(secondary));
                ui.label(RichText::new(tip.text).color(secondary));
            });
            if let Some(action) = tip.action {
                if ui.small_button(action).clicked() {
                    applied = Some(*tip);
                }
            }
        });
    }

    applied
}

pub fn render_categories(
    ui: &mut Ui,
    registry: &CategoryRegistry,
    new_name: &mut String,
) -> Option<CategoryAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(egui_phosphor::regular::PALETTE).color(ACCENT));
        ui.label(RichText::new("Categories").strong());
    });

    ui.horizontal_wrapped(|ui| {
        for category in registry.iter() {
            let color = category_color(category.color);
            ui.label(RichText::new("●").color(color));
            ui.label(RichText::new(&category.name).color(color));
            if ui
                .small_button(egui_phosphor::regular::X)
                .on_hover_text("Remove category")
                .clicked()
            {
                action = Some(CategoryAction::Remove(category.id.clone()));
            }
            ui.add_space(8.0);
        }
    });

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(new_name)
                .hint_text("Category name")
                .desired_width(160.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let has_text = !new_name.trim().is_empty();
        let clicked = ui
            .add_enabled(
                has_text,
                egui::Button::new(format!("{} Add Category", egui_phosphor::regular::PLUS)),
            )
            .clicked();
        if has_text && (enter || clicked) {
            action = Some(CategoryAction::Add(std::mem::take(new_name)));
        }
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use stretch_planner::schedule::parse;

    fn saturday_block() -> TimeBlock {
        let now = NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        parse("Hike Saturday 8am", now).commit()
    }

    #[test]
    fn weekends_follow_mode() {
        let blocks = vec![saturday_block()];
        assert!(should_show_weekends(WeekendMode::Auto, &blocks, Weekday::Wed));
        assert!(!should_show_weekends(WeekendMode::Auto, &[], Weekday::Wed));
        assert!(should_show_weekends(WeekendMode::Auto, &[], Weekday::Sun));
        assert!(!should_show_weekends(WeekendMode::Never, &blocks, Weekday::Sun));
        assert!(should_show_weekends(WeekendMode::Always, &[], Weekday::Mon));
    }

    #[test]
    fn default_tip_offers_an_action() {
        assert_eq!(DEFAULT_TIPS.len(), 1);
        assert!(DEFAULT_TIPS[0].text.contains("15-minute break"));
        assert_eq!(DEFAULT_TIPS[0].action, Some("Apply Suggestion"));
    }

    #[test]
    fn day_names_capitalize() {
        assert_eq!(capitalize("monday"), "Monday");
        assert_eq!(capitalize(""), "");
    }
}
