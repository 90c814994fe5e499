//! Week grid placement
//!
//! Each block lands in the row for its start hour and the column for its
//! day. Overlapping blocks are not separated: two blocks starting at the same
//! time on the same day get identical placements and draw on top of each
//! other.

use log::warn;
use serde::{Deserialize, Serialize};

use super::slots::{occupied_slots, SlotRow};
use super::types::{BlockId, TimeBlock};

pub const PLACEHOLDER_LABEL: &str = "--";
pub const PLACEHOLDER_MESSAGE: &str = "No scheduled blocks";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub row_height: f32,
    pub block_height: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            row_height: 60.0,
            block_height: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GridRow {
    Slot(SlotRow),
    /// Shown alone when no block occupies any hour
    Placeholder,
}

impl GridRow {
    pub fn label(&self) -> &str {
        match self {
            GridRow::Slot(slot) => &slot.label,
            GridRow::Placeholder => PLACEHOLDER_LABEL,
        }
    }

    pub fn hour(&self) -> Option<u8> {
        match self {
            GridRow::Slot(slot) => Some(slot.hour),
            GridRow::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub block_id: BlockId,
    /// Day index, Monday = 0
    pub column: u8,
    pub row: usize,
    pub offset_px: f32,
    pub height_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub rows: Vec<GridRow>,
    pub placements: Vec<Placement>,
}

impl Layout {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [GridRow::Placeholder])
    }

    pub fn placements_at(&self, row: usize, column: u8) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| p.row == row && p.column == column)
    }
}

pub fn compute_layout(blocks: &[TimeBlock]) -> Layout {
    compute_layout_with(blocks, &GridMetrics::default())
}

pub fn compute_layout_with(blocks: &[TimeBlock], metrics: &GridMetrics) -> Layout {
    let slots = occupied_slots(blocks);
    let placements = place_blocks(&slots, blocks, metrics);

    let rows = if slots.is_empty() {
        vec![GridRow::Placeholder]
    } else {
        slots.into_iter().map(GridRow::Slot).collect()
    };

    Layout { rows, placements }
}

/// Blocks whose start hour has no matching row are skipped.
pub fn place_blocks(
    slots: &[SlotRow],
    blocks: &[TimeBlock],
    metrics: &GridMetrics,
) -> Vec<Placement> {
    blocks
        .iter()
        .filter_map(|block| {
            let start_hour = block.start_time.hour24();
            let Some(row) = slots.iter().position(|slot| slot.hour == start_hour) else {
                warn!(
                    "event=layout_drop module=layout block_id={} start_hour={}",
                    block.id, start_hour
                );
                return None;
            };

            Some(Placement {
                block_id: block.id.clone(),
                column: block.column(),
                row,
                offset_px: block.start_time.minute() as f32 / 60.0 * metrics.row_height,
                height_px: metrics.block_height,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::time::ClockTime;
    use crate::schedule::types::BlockCategory;
    use chrono::Weekday;

    fn block(id: &str, day: Weekday, start: (u8, u8), end: (u8, u8)) -> TimeBlock {
        TimeBlock {
            id: BlockId::from(id),
            title: id.to_string(),
            day,
            start_time: ClockTime::new(start.0, start.1).unwrap(),
            end_time: ClockTime::new(end.0, end.1).unwrap(),
            category: BlockCategory::Meetings,
            category_color: BlockCategory::Meetings.color(),
            has_reminder: false,
        }
    }

    #[test]
    fn empty_schedule_gets_placeholder_row() {
        let layout = compute_layout(&[]);
        assert_eq!(layout.rows, vec![GridRow::Placeholder]);
        assert!(layout.is_placeholder());
        assert!(layout.placements.is_empty());
        assert_eq!(layout.rows[0].label(), PLACEHOLDER_LABEL);
    }

    #[test]
    fn places_by_day_and_start_hour() {
        let blocks = vec![
            block("focus", Weekday::Mon, (9, 0), (11, 0)),
            block("standup", Weekday::Tue, (14, 0), (14, 30)),
        ];
        let layout = compute_layout(&blocks);

        let hours: Vec<Option<u8>> = layout.rows.iter().map(GridRow::hour).collect();
        assert_eq!(hours, vec![Some(9), Some(10), Some(11), Some(14)]);

        let focus = &layout.placements[0];
        assert_eq!((focus.column, focus.row), (0, 0));
        let standup = &layout.placements[1];
        assert_eq!((standup.column, standup.row), (1, 3));
        assert_eq!(standup.height_px, 80.0);
    }

    #[test]
    fn minutes_become_offset_within_row() {
        let layout = compute_layout_with(
            &[block("half", Weekday::Wed, (12, 30), (13, 0))],
            &GridMetrics {
                row_height: 40.0,
                block_height: 50.0,
            },
        );
        let placement = &layout.placements[0];
        assert_eq!(placement.offset_px, 20.0);
        assert_eq!(placement.height_px, 50.0);
    }

    #[test]
    fn same_slot_blocks_stack_at_same_offset() {
        let blocks = vec![
            block("a", Weekday::Thu, (10, 15), (11, 0)),
            block("b", Weekday::Thu, (10, 15), (10, 45)),
        ];
        let layout = compute_layout(&blocks);
        let (a, b) = (&layout.placements[0], &layout.placements[1]);
        assert_eq!((a.row, a.column, a.offset_px), (b.row, b.column, b.offset_px));
        assert_eq!(layout.placements_at(a.row, a.column).count(), 2);
    }

    #[test]
    fn block_without_row_is_dropped() {
        let slots = vec![SlotRow::new(9)];
        let blocks = vec![
            block("kept", Weekday::Fri, (9, 0), (10, 0)),
            block("lost", Weekday::Fri, (15, 0), (16, 0)),
        ];
        let placements = place_blocks(&slots, &blocks, &GridMetrics::default());
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].block_id, BlockId::from("kept"));
    }
}
