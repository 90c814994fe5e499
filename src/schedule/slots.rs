//! Occupied-hour rows for the week grid
//!
//! A block occupies every hour from its start hour through its end hour,
//! inclusive on both ends. A block ending exactly at 11:00 therefore still
//! claims the 11 AM row. This is coarser than real interval overlap and is
//! kept that way on purpose.

use std::collections::BTreeSet;

use serde::Serialize;

use super::time::hour_label;
use super::types::TimeBlock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRow {
    pub hour: u8,
    pub label: String,
}

impl SlotRow {
    pub fn new(hour: u8) -> Self {
        Self {
            hour,
            label: hour_label(hour),
        }
    }
}

/// Hours claimed by one block. A block that wraps past midnight claims
/// only its start hour.
pub fn block_hours(block: &TimeBlock) -> std::ops::RangeInclusive<u8> {
    let start = block.start_time.hour24();
    if block.wraps_midnight() {
        return start..=start;
    }
    start..=block.end_time.hour24()
}

pub fn occupied_hours(blocks: &[TimeBlock]) -> BTreeSet<u8> {
    blocks.iter().flat_map(block_hours).collect()
}

/// Ascending, deduplicated rows. Empty when there are no blocks.
pub fn occupied_slots(blocks: &[TimeBlock]) -> Vec<SlotRow> {
    occupied_hours(blocks).into_iter().map(SlotRow::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::time::ClockTime;
    use crate::schedule::types::{BlockCategory, BlockId};
    use chrono::Weekday;

    fn block(start: (u8, u8), end: (u8, u8)) -> TimeBlock {
        TimeBlock {
            id: BlockId::new(),
            title: "Block".to_string(),
            day: Weekday::Tue,
            start_time: ClockTime::new(start.0, start.1).unwrap(),
            end_time: ClockTime::new(end.0, end.1).unwrap(),
            category: BlockCategory::General,
            category_color: BlockCategory::General.color(),
            has_reminder: false,
        }
    }

    #[test]
    fn rows_are_sorted_and_deduplicated() {
        let blocks = vec![
            block((14, 0), (14, 30)),
            block((9, 0), (10, 0)),
            block((9, 30), (10, 15)),
        ];
        let hours: Vec<u8> = occupied_slots(&blocks).iter().map(|r| r.hour).collect();
        assert_eq!(hours, vec![9, 10, 14]);
    }

    #[test]
    fn end_hour_is_inclusive() {
        let rows = occupied_slots(&[block((9, 0), (11, 0))]);
        let hours: Vec<u8> = rows.iter().map(|r| r.hour).collect();
        assert_eq!(hours, vec![9, 10, 11]);
        assert_eq!(rows[2].label, "11:00 AM");
    }

    #[test]
    fn no_blocks_no_rows() {
        assert!(occupied_slots(&[]).is_empty());
    }

    #[test]
    fn afternoon_hours_use_24_hour_values() {
        let rows = occupied_slots(&[block((13, 0), (14, 0))]);
        assert_eq!(rows, vec![SlotRow::new(13), SlotRow::new(14)]);
        assert_eq!(rows[0].label, "1:00 PM");
    }

    #[test]
    fn wrapping_block_claims_start_hour_only() {
        let hours = occupied_hours(&[block((23, 0), (0, 0))]);
        assert_eq!(hours.into_iter().collect::<Vec<_>>(), vec![23]);
    }
}
