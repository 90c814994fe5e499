use chrono::{Datelike, Local, NaiveDate};
use eframe::egui;
use egui::{Color32, RichText};
use log::{info, warn};

use stretch_planner::config::Config;
use stretch_planner::schedule::{shift_week, week_dates, CategoryRegistry, Session};

use super::theme::{setup_fonts, setup_theme};
use super::views::{
    render_categories, render_optimization_tips, render_quick_input, render_reminders,
    render_week_grid, render_week_header, should_show_weekends, CategoryAction, WeekNav,
    DEFAULT_TIPS,
};

pub struct PlannerApp {
    config: Config,
    session: Session,
    anchor_date: NaiveDate,
    input: String,
    new_category: String,
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        setup_fonts(&cc.egui_ctx);
        setup_theme(&cc.egui_ctx);

        let now = Local::now().naive_local();
        let session = Session::new(
            now,
            CategoryRegistry::seeded(&config.default_categories),
            config.grid_metrics(),
        );

        Self {
            config,
            session,
            anchor_date: now.date(),
            input: String::new(),
            new_category: String::new(),
            status_message: None,
        }
    }

    fn handle_nav(&mut self, nav: WeekNav) {
        self.anchor_date = match nav {
            WeekNav::Previous => shift_week(self.anchor_date, -1),
            WeekNav::Next => shift_week(self.anchor_date, 1),
            WeekNav::Today => Local::now().date_naive(),
        };
    }

    fn submit_input(&mut self, text: String) {
        let now = Local::now().naive_local();
        if let Some(id) = self.session.submit(&text, now) {
            if let Some(block) = self.session.block(&id) {
                let message = format!(
                    "Added \"{}\" {} - {}",
                    block.title, block.start_time, block.end_time
                );
                if block.wraps_midnight() {
                    self.status_message =
                        Some((format!("{} (ends after midnight)", message), true));
                } else {
                    self.status_message = Some((message, false));
                }
            }
        }
    }

    fn handle_category(&mut self, action: CategoryAction) {
        match action {
            CategoryAction::Add(name) => match self.session.categories.add(&name) {
                Ok(category) => {
                    info!(
                        "event=category_added module=ui color={}",
                        category.color
                    );
                    self.status_message = None;
                }
                Err(e) => {
                    warn!("event=category_rejected module=ui reason=\"{}\"", e);
                    self.status_message = Some((e.to_string(), true));
                }
            },
            CategoryAction::Remove(id) => {
                self.session.categories.remove(&id);
            }
        }
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let mut dismiss_message = false;
        if let Some((msg, is_error)) = &self.status_message {
            let color = if *is_error {
                Color32::from_rgb(224, 108, 117)
            } else {
                Color32::from_rgb(152, 195, 121)
            };
            let dim_color = Color32::from_rgb(120, 120, 130);
            ui.horizontal(|ui| {
                ui.label(RichText::new(msg).color(color));
                ui.add_space(8.0);

                let close_btn = ui.add(
                    egui::Label::new(
                        RichText::new(egui_phosphor::regular::X).size(14.0).color(dim_color),
                    )
                    .sense(egui::Sense::click()),
                );
                if close_btn.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if close_btn.clicked() {
                    dismiss_message = true;
                }
            });
        }
        if dismiss_message {
            self.status_message = None;
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom (trackpad pinch or Ctrl+scroll)
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                if let Err(e) = self.config.save() {
                    warn!("event=config_save module=ui status=error error=\"{:#}\"", e);
                }
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        let now = Local::now().naive_local();
        self.session.set_now(now);
        let today = now.date();
        let week = week_dates(self.anchor_date);
        let show_weekends = should_show_weekends(
            self.config.weekend_mode,
            self.session.blocks(),
            today.weekday(),
        );

        egui::TopBottomPanel::top("week_header")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 10.0)))
            .show(ctx, |ui| {
                if let Some(nav) = render_week_header(ui, &week) {
                    self.handle_nav(nav);
                }
            });

        egui::SidePanel::right("planner_side")
            .resizable(false)
            .exact_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                if let Some(text) = render_quick_input(ui, &mut self.input) {
                    self.submit_input(text);
                }
                ui.add_space(8.0);
                self.render_status(ui);

                ui.separator();
                if let Some(id) = render_reminders(ui, self.session.reminders()) {
                    self.session.dismiss_reminder(&id);
                }

                ui.add_space(8.0);
                if let Some(action) =
                    render_categories(ui, &self.session.categories, &mut self.new_category)
                {
                    self.handle_category(action);
                }

                ui.add_space(8.0);
                ui.separator();
                if let Some(tip) = render_optimization_tips(ui, &DEFAULT_TIPS) {
                    // tips are static; applying only acknowledges the click
                    info!("event=tip_selected module=ui");
                    self.status_message = Some((format!("Noted: {}", tip.text), false));
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 0.0)))
            .show(ctx, |ui| {
                let metrics = self.config.grid_metrics();
                let result = render_week_grid(
                    ui,
                    self.session.layout(),
                    self.session.blocks(),
                    &week,
                    today,
                    show_weekends,
                    &metrics,
                );

                if let Some(id) = result.toggle_reminder {
                    let enabled = self.session.block(&id).map(|b| !b.has_reminder);
                    if let Some(enabled) = enabled {
                        self.session.set_reminder(&id, enabled);
                    }
                }
                if let Some(id) = result.remove {
                    self.session.remove_block(&id);
                }
            });
    }
}
