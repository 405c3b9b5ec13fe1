// Notification captions
use crate::domain::interval::{format_clock, OutageInterval};
use crate::domain::signature::ChangeKind;

/// Caption for the notification photo. Telegram renders it as Markdown.
pub fn schedule_caption(
    change: ChangeKind,
    queue_label: &str,
    date: &str,
    intervals: &[OutageInterval],
) -> String {
    let header = match change {
        ChangeKind::Changed => format!("🔄 *Schedule changed (queue {})*", queue_label),
        _ => format!("⚡ *New schedule (queue {})*", queue_label),
    };
    format!(
        "{}\n📅 {}\n\n{}",
        header,
        date,
        intervals_pretty(intervals)
    )
}

fn intervals_pretty(intervals: &[OutageInterval]) -> String {
    if intervals.is_empty() {
        return "✅ No outages scheduled.".to_string();
    }
    intervals
        .iter()
        .map(|interval| {
            format!(
                "⚫ `{} - {}`",
                format_clock(interval.start),
                format_clock(interval.end)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_for_new_schedule() {
        let intervals = vec![OutageInterval {
            start: 6.0,
            end: 10.5,
        }];
        let caption = schedule_caption(ChangeKind::New, "4.1", "04.03.2025", &intervals);
        assert!(caption.contains("New schedule (queue 4.1)"));
        assert!(caption.contains("04.03.2025"));
        assert!(caption.contains("06:00 - 10:30"));
    }

    #[test]
    fn test_caption_for_changed_schedule_renders_day_end() {
        let intervals = vec![OutageInterval {
            start: 20.0,
            end: 24.0,
        }];
        let caption = schedule_caption(ChangeKind::Changed, "4.1", "04.03.2025", &intervals);
        assert!(caption.contains("Schedule changed"));
        assert!(caption.contains("20:00 - 24:00"));
    }

    #[test]
    fn test_caption_for_clear_day() {
        let caption = schedule_caption(ChangeKind::Changed, "4.1", "04.03.2025", &[]);
        assert!(caption.contains("No outages scheduled"));
    }
}
