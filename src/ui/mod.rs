mod app;
mod theme;
mod views;

pub use app::PlannerApp;
