mod layout;
mod parser;
mod session;
mod slots;
mod time;
mod types;

pub use layout::{
    compute_layout, compute_layout_with, place_blocks, GridMetrics, GridRow, Layout, Placement,
    PLACEHOLDER_LABEL, PLACEHOLDER_MESSAGE,
};
pub use parser::{
    clean_title, extract_day, extract_duration, extract_explicit_times, extract_named_period,
    infer_category, parse, parse_with_id, DurationAmount, Extracted, Step, TimeSpan, PIPELINE,
};
pub use session::{CategoryError, CategoryRegistry, ReminderList, Session};
pub use slots::{block_hours, occupied_hours, occupied_slots, SlotRow};
pub use time::{
    current_day_column, day_index, hour_label, monday_index, shift_week, to_12_hour, to_24_hour,
    today_index, tomorrow_index, week_dates, week_start, weekday_from_index, ClockTime, Meridiem,
    TimeParseError, DAY_NAMES,
};
pub use types::*;
