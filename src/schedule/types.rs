use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::time::{day_index, day_index_serde, ClockTime};

/// Number of distinct category color tokens.
pub const PALETTE_SIZE: u8 = 8;

/// Placeholder title used when a phrase yields no usable title.
pub const PLACEHOLDER_TITLE: &str = "New Event";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Palette slot, 1-based. Rendered as `category-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ColorToken(u8);

impl ColorToken {
    /// Wraps any index into the palette range 1–8.
    pub fn new(index: u8) -> Self {
        Self((index.saturating_sub(1) % PALETTE_SIZE) + 1)
    }

    /// Next token for a collection currently holding `count` entries.
    pub fn round_robin(count: usize) -> Self {
        Self((count % PALETTE_SIZE as usize) as u8 + 1)
    }

    pub fn index(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category-{}", self.0)
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color token `{0}`")]
pub struct ColorTokenError(String);

impl TryFrom<String> for ColorToken {
    type Error = ColorTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let index = value
            .strip_prefix("category-")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=PALETTE_SIZE).contains(n));
        match index {
            Some(index) => Ok(ColorToken(index)),
            None => Err(ColorTokenError(value)),
        }
    }
}

/// Categories the phrase parser can infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BlockCategory {
    #[serde(rename = "Deep Work")]
    DeepWork,
    Meetings,
    Breaks,
    Health,
    #[default]
    General,
}

impl BlockCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BlockCategory::DeepWork => "Deep Work",
            BlockCategory::Meetings => "Meetings",
            BlockCategory::Breaks => "Breaks",
            BlockCategory::Health => "Health",
            BlockCategory::General => "General",
        }
    }

    /// General shares the Deep Work token.
    pub fn color(&self) -> ColorToken {
        match self {
            BlockCategory::DeepWork | BlockCategory::General => ColorToken(1),
            BlockCategory::Meetings => ColorToken(2),
            BlockCategory::Breaks => ColorToken(3),
            BlockCategory::Health => ColorToken(4),
        }
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A committed event on the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: BlockId,
    pub title: String,
    #[serde(with = "day_index_serde")]
    pub day: Weekday,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub category: BlockCategory,
    pub category_color: ColorToken,
    #[serde(default)]
    pub has_reminder: bool,
}

impl TimeBlock {
    pub fn column(&self) -> u8 {
        day_index(self.day)
    }

    /// End at or before start means the block runs past midnight,
    /// which the grid does not model.
    pub fn wraps_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }
}

/// Parser output, not yet part of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub id: BlockId,
    pub title: String,
    #[serde(with = "day_index_serde")]
    pub day: Weekday,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub category: BlockCategory,
    pub has_reminder: bool,
}

impl EventDraft {
    pub fn category_color(&self) -> ColorToken {
        self.category.color()
    }

    pub fn commit(self) -> TimeBlock {
        TimeBlock {
            category_color: self.category.color(),
            id: self.id,
            title: self.title,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            category: self.category,
            has_reminder: self.has_reminder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-defined label in the category registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: ColorToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub id: BlockId,
    pub title: String,
    pub time: ClockTime,
    pub category: String,
    pub color: ColorToken,
}

impl From<&TimeBlock> for Reminder {
    fn from(block: &TimeBlock) -> Self {
        Self {
            id: block.id.clone(),
            title: block.title.clone(),
            time: block.start_time,
            category: block.category.label().to_string(),
            color: block.category_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_wraps_after_eight() {
        let tokens: Vec<u8> = (0..9).map(|n| ColorToken::round_robin(n).index()).collect();
        assert_eq!(tokens, vec![1, 2, 3, 4, 5, 6, 7, 8, 1]);
        assert_eq!(ColorToken::new(9).index(), 1);
        assert_eq!(ColorToken::new(0).index(), 1);
    }

    #[test]
    fn block_serializes_with_display_times_and_day_index() {
        let block = TimeBlock {
            id: BlockId::from("1"),
            title: "Morning Focus Block".to_string(),
            day: Weekday::Mon,
            start_time: ClockTime::new(9, 0).unwrap(),
            end_time: ClockTime::new(11, 0).unwrap(),
            category: BlockCategory::DeepWork,
            category_color: BlockCategory::DeepWork.color(),
            has_reminder: true,
        };

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["day"], 0);
        assert_eq!(json["startTime"], "9:00 AM");
        assert_eq!(json["endTime"], "11:00 AM");
        assert_eq!(json["category"], "Deep Work");
        assert_eq!(json["categoryColor"], "category-1");
        assert_eq!(json["hasReminder"], true);

        let back: TimeBlock = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn rejects_out_of_palette_tokens() {
        assert!(ColorToken::try_from("category-9".to_string()).is_err());
        assert!(ColorToken::try_from("blue".to_string()).is_err());
        assert_eq!(
            ColorToken::try_from("category-3".to_string()).unwrap().index(),
            3
        );
    }

    #[test]
    fn category_colors() {
        assert_eq!(BlockCategory::Meetings.color().to_string(), "category-2");
        assert_eq!(BlockCategory::General.color(), BlockCategory::DeepWork.color());
        assert_eq!(BlockCategory::Health.color().index(), 4);
    }

    #[test]
    fn wrap_is_flagged() {
        let mut block = TimeBlock {
            id: BlockId::new(),
            title: "Late shift".to_string(),
            day: Weekday::Fri,
            start_time: ClockTime::new(23, 0).unwrap(),
            end_time: ClockTime::new(0, 0).unwrap(),
            category: BlockCategory::General,
            category_color: BlockCategory::General.color(),
            has_reminder: false,
        };
        assert!(block.wraps_midnight());
        block.end_time = ClockTime::new(23, 30).unwrap();
        assert!(!block.wraps_midnight());
    }
}
