//! In-memory schedule state
//!
//! Every mutation builds a new collection and swaps it in; nothing is
//! edited in place. Derived data (rows, placements, reminders) is rebuilt
//! whenever the block set is replaced.

use chrono::{NaiveDateTime, Weekday};
use log::{info, warn};
use thiserror::Error;

use super::layout::{compute_layout_with, GridMetrics, Layout};
use super::parser;
use super::time::{today_index, weekday_from_index};
use super::types::{BlockId, Category, CategoryId, ColorToken, EventDraft, Reminder, TimeBlock};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("category name is empty")]
    EmptyName,
    #[error("category `{0}` already exists")]
    DuplicateName(String),
}

/// User-managed category labels with round-robin palette colors.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with `names` in order. Blank and repeated names are skipped.
    pub fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(Self::new(), |mut registry, name| {
            // seed lists come from config; a bad entry should not block startup
            if let Err(e) = registry.add(name.as_ref()) {
                warn!("event=category_seed_skipped module=session reason=\"{}\"", e);
            }
            registry
        })
    }

    /// Color is `(current count % 8) + 1`, so removals can cause repeats.
    pub fn add(&mut self, name: &str) -> Result<Category, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if self
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Err(CategoryError::DuplicateName(name.to_string()));
        }

        let category = Category {
            id: CategoryId::new(),
            name: name.to_string(),
            color: ColorToken::round_robin(self.categories.len()),
        };

        let mut next = self.categories.clone();
        next.push(category.clone());
        self.categories = next;
        Ok(category)
    }

    /// Returns whether a category was removed.
    pub fn remove(&mut self, id: &CategoryId) -> bool {
        let before = self.categories.len();
        let next: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| &c.id != id)
            .cloned()
            .collect();
        let removed = next.len() != before;
        self.categories = next;
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderList {
    reminders: Vec<Reminder>,
}

impl ReminderList {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    /// Reminders for blocks on `day` that have one set, earliest first.
    pub fn from_blocks(blocks: &[TimeBlock], day: Weekday) -> Self {
        let mut reminders: Vec<Reminder> = blocks
            .iter()
            .filter(|b| b.has_reminder && b.day == day)
            .map(Reminder::from)
            .collect();
        reminders.sort_by_key(|r| r.time);
        Self { reminders }
    }

    /// List without the reminder `id`; unknown ids leave it unchanged.
    pub fn dismiss(&self, id: &BlockId) -> Self {
        Self {
            reminders: self
                .reminders
                .iter()
                .filter(|r| &r.id != id)
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

/// Everything the shell shows for one running instance.
#[derive(Debug, Clone)]
pub struct Session {
    blocks: Vec<TimeBlock>,
    pub categories: CategoryRegistry,
    reminders: ReminderList,
    dismissed: Vec<BlockId>,
    today: Weekday,
    metrics: GridMetrics,
    layout: Layout,
}

impl Session {
    pub fn new(now: NaiveDateTime, categories: CategoryRegistry, metrics: GridMetrics) -> Self {
        Self {
            blocks: Vec::new(),
            categories,
            reminders: ReminderList::default(),
            dismissed: Vec::new(),
            today: weekday_from_index(today_index(now)).unwrap_or(Weekday::Mon),
            layout: compute_layout_with(&[], &metrics),
            metrics,
        }
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn reminders(&self) -> &ReminderList {
        &self.reminders
    }

    pub fn block(&self, id: &BlockId) -> Option<&TimeBlock> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Parse `input` and add the result. Blank input adds nothing.
    pub fn submit(&mut self, input: &str, now: NaiveDateTime) -> Option<BlockId> {
        if input.trim().is_empty() {
            return None;
        }
        let draft = parser::parse(input, now);
        Some(self.add_draft(draft))
    }

    pub fn add_draft(&mut self, draft: EventDraft) -> BlockId {
        self.add_block(draft.commit())
    }

    pub fn add_block(&mut self, block: TimeBlock) -> BlockId {
        let id = block.id.clone();
        info!(
            "event=block_added module=session block_id={} day={:?} category=\"{}\"",
            id, block.day, block.category
        );
        if block.wraps_midnight() {
            warn!(
                "event=block_wraps_midnight module=session id={} start=\"{}\" end=\"{}\"",
                id, block.start_time, block.end_time
            );
        }
        let mut next = self.blocks.clone();
        next.push(block);
        self.replace_blocks(next);
        id
    }

    pub fn remove_block(&mut self, id: &BlockId) -> bool {
        let next: Vec<TimeBlock> = self.blocks.iter().filter(|b| &b.id != id).cloned().collect();
        let removed = next.len() != self.blocks.len();
        if removed {
            info!("event=block_removed module=session block_id={}", id);
            self.replace_blocks(next);
        }
        removed
    }

    pub fn set_reminder(&mut self, id: &BlockId, enabled: bool) -> bool {
        if self.block(id).is_none() {
            return false;
        }
        let next: Vec<TimeBlock> = self
            .blocks
            .iter()
            .map(|b| {
                if &b.id == id {
                    TimeBlock {
                        has_reminder: enabled,
                        ..b.clone()
                    }
                } else {
                    b.clone()
                }
            })
            .collect();
        if enabled {
            self.dismissed.retain(|d| d != id);
        }
        self.replace_blocks(next);
        true
    }

    pub fn dismiss_reminder(&mut self, id: &BlockId) {
        if !self.dismissed.contains(id) {
            let mut next = self.dismissed.clone();
            next.push(id.clone());
            self.dismissed = next;
        }
        self.reminders = self.reminders.dismiss(id);
    }

    /// Move "today" forward, e.g. when the shell notices the date changed.
    pub fn set_now(&mut self, now: NaiveDateTime) {
        let today = weekday_from_index(today_index(now)).unwrap_or(Weekday::Mon);
        if today != self.today {
            self.today = today;
            self.dismissed = Vec::new();
            self.refresh_reminders();
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn replace_blocks(&mut self, blocks: Vec<TimeBlock>) {
        self.layout = compute_layout_with(&blocks, &self.metrics);
        self.blocks = blocks;
        self.refresh_reminders();
    }

    fn refresh_reminders(&mut self) {
        let mut reminders = ReminderList::from_blocks(&self.blocks, self.today);
        for id in &self.dismissed {
            reminders = reminders.dismiss(id);
        }
        self.reminders = reminders;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wednesday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn session() -> Session {
        Session::new(wednesday_at(8), CategoryRegistry::new(), GridMetrics::default())
    }

    #[test]
    fn nine_categories_wrap_palette() {
        let mut registry = CategoryRegistry::new();
        let colors: Vec<u8> = (1..=9)
            .map(|n| registry.add(&format!("Category {}", n)).unwrap().color.index())
            .collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7, 8, 1]);
    }

    #[test]
    fn category_names_must_be_unique_and_non_empty() {
        let mut registry = CategoryRegistry::new();
        registry.add("Deep Work").unwrap();
        assert_eq!(registry.add("  "), Err(CategoryError::EmptyName));
        assert_eq!(
            registry.add("deep work"),
            Err(CategoryError::DuplicateName("deep work".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removal_reuses_count_based_color() {
        let mut registry = CategoryRegistry::seeded(["Deep Work", "Meetings", "Breaks"]);
        let breaks = registry.iter().nth(2).unwrap().id.clone();
        let meetings = registry.iter().nth(1).unwrap().id.clone();
        assert!(registry.remove(&meetings));
        assert!(!registry.remove(&meetings));
        // two left, next color is 3 again, same as Breaks
        let added = registry.add("Health").unwrap();
        assert_eq!(added.color.index(), 3);
        assert!(registry.iter().any(|c| c.id == breaks && c.color.index() == 3));
    }

    #[test]
    fn submit_adds_parsed_block() {
        let mut session = session();
        let id = session.submit("Team meeting Friday 2pm", wednesday_at(8)).unwrap();
        let block = session.block(&id).unwrap();
        assert_eq!(block.day, Weekday::Fri);
        assert_eq!(block.category_color.to_string(), "category-2");
        assert!(session.submit("   ", wednesday_at(8)).is_none());
        assert_eq!(session.blocks().len(), 1);
    }

    #[test]
    fn remove_block_by_id() {
        let mut session = session();
        let id = session.submit("Gym 6pm", wednesday_at(8)).unwrap();
        assert!(session.remove_block(&id));
        assert!(!session.remove_block(&id));
        assert!(session.layout().is_placeholder());
    }

    #[test]
    fn reminders_follow_todays_blocks_and_dismissals() {
        let mut session = session();
        let today = session.submit("Standup today 9am", wednesday_at(8)).unwrap();
        let later = session.submit("Lunch today noon", wednesday_at(8)).unwrap();
        let other_day = session.submit("Standup Friday 9am", wednesday_at(8)).unwrap();

        session.set_reminder(&later, true);
        session.set_reminder(&today, true);
        session.set_reminder(&other_day, true);
        let titles: Vec<&str> = session.reminders().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Standup", "Lunch"]);

        session.dismiss_reminder(&today);
        assert_eq!(session.reminders().len(), 1);

        // unrelated changes must not resurrect a dismissed reminder
        session.submit("Focus 3pm", wednesday_at(8));
        assert_eq!(session.reminders().len(), 1);

        // next day starts fresh
        let friday = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        session.set_now(friday.and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(session.reminders().len(), 1);
        assert_eq!(session.reminders().iter().next().unwrap().id, other_day);
    }

    #[test]
    fn layout_follows_block_set() {
        let mut session = session();
        assert!(session.layout().is_placeholder());

        let night = session.submit("Night shift 11pm", wednesday_at(8)).unwrap();
        let focus = session.submit("Focus Monday 9am", wednesday_at(8)).unwrap();
        let hours: Vec<Option<u8>> = session.layout().rows.iter().map(|r| r.hour()).collect();
        assert_eq!(hours, vec![Some(9), Some(10), Some(23)]);
        assert_eq!(session.layout().placements.len(), 2);

        // reminder changes keep the same placements
        let before = session.layout().clone();
        session.set_reminder(&focus, true);
        assert_eq!(session.layout(), &before);

        assert!(session.remove_block(&night));
        let hours: Vec<Option<u8>> = session.layout().rows.iter().map(|r| r.hour()).collect();
        assert_eq!(hours, vec![Some(9), Some(10)]);
    }

    #[test]
    fn seeding_skips_invalid_names() {
        let registry = CategoryRegistry::seeded(["Deep Work", " ", "deep work", "Meetings"]);
        let names: Vec<&str> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Deep Work", "Meetings"]);
        assert_eq!(registry.iter().nth(1).unwrap().color.index(), 2);
    }

    #[test]
    fn dismiss_is_pure_removal() {
        let list = ReminderList::new(vec![]);
        assert_eq!(list.dismiss(&BlockId::from("missing")), list);
    }
}
