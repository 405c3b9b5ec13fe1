// Outage intervals - reduces half-hour samples to merged time ranges
use crate::domain::grid::BlockSamples;

/// Hours covered by one grid column.
pub const SLOT_HOURS: f64 = 0.5;
/// Hours covered by one block of the chart.
pub const BLOCK_HOURS: f64 = 12.0;

/// A contiguous outage range in fractional hours since midnight,
/// `start < end`, `end <= 24.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutageInterval {
    pub start: f64,
    pub end: f64,
}

/// Scan one block's slots in time order. A false-to-true transition opens an
/// interval at the slot's start; a true-to-false transition closes it at
/// that slot's start, the boundary rather than the slot end. An interval
/// still open when the block runs out closes at the block's end. Intervals
/// never span blocks: outage on both sides of a block boundary stays two
/// touching intervals.
pub fn extract_block(slots: &[bool], hour_offset: f64) -> Vec<OutageInterval> {
    let mut intervals = Vec::new();
    let mut open: Option<f64> = None;

    for (slot, &outage) in slots.iter().enumerate() {
        let slot_start = hour_offset + slot as f64 * SLOT_HOURS;
        match (open, outage) {
            (None, true) => open = Some(slot_start),
            (Some(start), false) => {
                intervals.push(OutageInterval {
                    start,
                    end: slot_start,
                });
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        intervals.push(OutageInterval {
            start,
            end: hour_offset + BLOCK_HOURS,
        });
    }

    intervals
}

/// All blocks' intervals concatenated in chronological order.
pub fn extract_row(blocks: &[BlockSamples]) -> Vec<OutageInterval> {
    blocks
        .iter()
        .flat_map(|block| extract_block(&block.slots, block.hour_offset))
        .collect()
}

/// Zero-padded `HH:MM` from a fractional hour. `24.0` renders as `24:00`.
pub fn format_clock(time: f64) -> String {
    let hours = time as u32;
    let minutes = ((time - hours as f64) * 60.0).round() as u32;
    format!("{:02}:{:02}", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == 'x').collect()
    }

    #[test]
    fn test_all_clear_yields_no_intervals() {
        assert!(extract_block(&slots("........................"), 0.0).is_empty());
    }

    #[test]
    fn test_adjacent_slots_merge_into_one_interval() {
        // Outage over [2.0, 4.0) immediately followed by [4.0, 4.5) must come
        // out as a single interval, never two touching ones.
        let samples = slots("....xxxxx...............");
        let intervals = extract_block(&samples, 0.0);
        assert_eq!(
            intervals,
            vec![OutageInterval {
                start: 2.0,
                end: 4.5
            }]
        );
    }

    #[test]
    fn test_close_is_exclusive_at_slot_boundary() {
        let samples = slots("x.......................");
        let intervals = extract_block(&samples, 0.0);
        assert_eq!(
            intervals,
            vec![OutageInterval {
                start: 0.0,
                end: 0.5
            }]
        );
    }

    #[test]
    fn test_open_interval_closes_at_block_end() {
        let samples = slots("......................xx");
        let intervals = extract_block(&samples, 12.0);
        assert_eq!(
            intervals,
            vec![OutageInterval {
                start: 23.0,
                end: 24.0
            }]
        );
    }

    #[test]
    fn test_blocks_do_not_merge_across_the_noon_boundary() {
        // Last slot of the morning block and first slot of the evening block
        // are both outage. The source chart draws them as separate regions
        // and the extractor keeps them as two intervals touching at 12.0.
        let blocks = vec![
            BlockSamples {
                hour_offset: 0.0,
                slots: slots(".......................x"),
                points: Vec::new(),
            },
            BlockSamples {
                hour_offset: 12.0,
                slots: slots("x......................."),
                points: Vec::new(),
            },
        ];
        let intervals = extract_row(&blocks);
        assert_eq!(
            intervals,
            vec![
                OutageInterval {
                    start: 11.5,
                    end: 12.0
                },
                OutageInterval {
                    start: 12.0,
                    end: 12.5
                },
            ]
        );
    }

    #[test]
    fn test_intervals_are_sorted_and_disjoint() {
        let samples = slots("xx..xxx...x.....xxxx...x");
        let intervals = extract_block(&samples, 0.0);
        for interval in &intervals {
            assert!(interval.start < interval.end);
            assert!(interval.end <= 24.0);
        }
        for pair in intervals.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(2.5), "02:30");
        assert_eq!(format_clock(6.0), "06:00");
        assert_eq!(format_clock(10.5), "10:30");
        assert_eq!(format_clock(24.0), "24:00");
    }
}
