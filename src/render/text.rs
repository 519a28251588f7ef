//! User-facing result text formatting
//!
//! Templates for segment and route-thread lists, both inline (small result
//! sets) and paginated, plus duration/time helpers and itinerary rendering.

use chrono::{DateTime, NaiveDateTime};

use crate::models::{Itinerary, RouteThread, Segment};
use super::window::Page;

const NO_SEGMENTS_FOUND: &str = "Рейсов не найдено 😔";
const NO_THREADS_FOUND: &str = "Маршрутов не найдено 😔";
const PICK_THREAD_FOOTER: &str = "\nВыберите маршрут и введите его порядковый номер из списка";

/// Render a duration in seconds as hours/minutes, rounding up to whole minutes
pub fn format_duration(seconds: f64) -> String {
    if seconds >= 3600.0 {
        let total_minutes = (seconds / 60.0).ceil() as u64;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        format!("{} ч {} мин", hours, minutes)
    } else {
        let minutes = (seconds / 60.0).ceil() as u64;
        format!("{} мин", minutes)
    }
}

/// Render an ISO-8601 instant as HH:MM; unparseable input passes through
pub fn format_time(instant: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(instant) {
        return parsed.format("%H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(instant, "%Y-%m-%dT%H:%M:%S") {
        return parsed.format("%H:%M").to_string();
    }
    instant.to_string()
}

fn segment_entry(ordinal: usize, segment: &Segment) -> String {
    format!(
        "{}. Рейс № {} {} - {}\n🕐 {} – {} ({})\nПеревозчик: {}",
        ordinal,
        segment.number,
        segment.from_title,
        segment.to_title,
        format_time(&segment.departure),
        format_time(&segment.arrival),
        format_duration(segment.duration),
        segment.carrier,
    )
}

// Entries are separated by a blank line, except after every fifth one.
fn entry_separator(ordinal: usize) -> &'static str {
    if ordinal % 5 == 0 { "\n" } else { "\n\n" }
}

/// Render a whole (small) segment list without pagination controls
pub fn render_segments(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return NO_SEGMENTS_FOUND.to_string();
    }

    let mut text = String::new();
    for (index, segment) in segments.iter().enumerate() {
        let ordinal = index + 1;
        text.push_str(&segment_entry(ordinal, segment));
        text.push_str(entry_separator(ordinal));
    }
    text
}

/// Render a whole (small) route-thread list without pagination controls
pub fn render_threads(threads: &[RouteThread]) -> String {
    if threads.is_empty() {
        return NO_SEGMENTS_FOUND.to_string();
    }

    let mut text = String::new();
    for (index, thread) in threads.iter().enumerate() {
        let ordinal = index + 1;
        text.push_str(&format!(
            "{}. Рейс № {} {}\nПеревозчик: {}",
            ordinal, thread.number, thread.title, thread.carrier
        ));
        text.push_str(entry_separator(ordinal));
    }
    text.push_str(PICK_THREAD_FOOTER);
    text
}

/// Render one page of a paginated segment list.
///
/// Ordinal numbering reflects the item's global position, not its position
/// within the page.
pub fn render_segment_page(page: &Page<'_, Segment>) -> String {
    if page.total_items == 0 {
        return NO_SEGMENTS_FOUND.to_string();
    }

    let mut text = format!(
        "Рейсы {}/{} (найдено {}):\n\n",
        page.number, page.total_pages, page.total_items
    );
    for (index, segment) in page.items.iter().enumerate() {
        let ordinal = page.offset + index + 1;
        text.push_str(&segment_entry(ordinal, segment));
        text.push_str(entry_separator(ordinal));
    }
    text
}

/// Render one page of a paginated route-thread list
pub fn render_thread_page(page: &Page<'_, RouteThread>) -> String {
    if page.total_items == 0 {
        return NO_THREADS_FOUND.to_string();
    }

    let mut text = format!(
        "Маршруты {}/{} (найдено {}):\n\n",
        page.number, page.total_pages, page.total_items
    );
    for (index, thread) in page.items.iter().enumerate() {
        let ordinal = page.offset + index + 1;
        text.push_str(&format!(
            "{}. Маршрут № {} {}\nПеревозчик: {}",
            ordinal, thread.number, thread.title, thread.carrier
        ));
        text.push_str(entry_separator(ordinal));
    }
    text.push_str(PICK_THREAD_FOOTER);
    text
}

/// Render a stop-by-stop itinerary.
///
/// The first stop has no in-transit line (nothing to measure from) and the
/// last stop has no dwell line or connector after it. Zero durations are
/// treated as absent.
pub fn render_itinerary(itinerary: &Itinerary) -> String {
    let mut text = String::new();
    let last = itinerary.stops.len().saturating_sub(1);

    for (index, stop) in itinerary.stops.iter().enumerate() {
        text.push_str(&stop.title);
        text.push('\n');

        if index != 0 {
            if let Some(elapsed) = stop.elapsed.filter(|v| *v > 0.0) {
                text.push_str(&format!("Время в пути: {}\n", format_duration(elapsed)));
            }
        }

        if index != last {
            if let Some(dwell) = stop.dwell.filter(|v| *v > 0.0) {
                text.push_str(&format!("Остановка: {}\n", format_duration(dwell)));
            }
            text.push_str("     ↓\n");
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StopPoint;
    use crate::render::window::paginate;
    use proptest::prelude::*;

    fn segment(n: u32) -> Segment {
        Segment {
            number: format!("70{}", n),
            from_title: "Москва (Казанский вокзал)".to_string(),
            to_title: "Казань".to_string(),
            departure: "2026-06-15T08:10:00+03:00".to_string(),
            arrival: "2026-06-15T20:40:00+03:00".to_string(),
            duration: 45000.0,
            carrier: "РЖД".to_string(),
        }
    }

    fn thread(n: u32) -> RouteThread {
        RouteThread {
            number: format!("{}", 100 + n),
            title: "Москва - Казань".to_string(),
            carrier: "РЖД".to_string(),
            uid: format!("uid-{}", n),
        }
    }

    #[test]
    fn duration_boundaries() {
        assert_eq!(format_duration(3599.0), "60 мин");
        assert_eq!(format_duration(3600.0), "1 ч 0 мин");
        assert_eq!(format_duration(61.0), "2 мин");
        assert_eq!(format_duration(0.0), "0 мин");
    }

    #[test]
    fn duration_longer_trips() {
        assert_eq!(format_duration(5400.0), "1 ч 30 мин");
        assert_eq!(format_duration(45000.0), "12 ч 30 мин");
    }

    proptest! {
        #[test]
        fn duration_never_rounds_down(seconds in 0u32..100_000) {
            let rendered = format_duration(seconds as f64);
            let minutes: u64 = rendered
                .split_whitespace()
                .zip(rendered.split_whitespace().skip(1))
                .filter_map(|(value, unit)| match unit {
                    "ч" => value.parse::<u64>().ok().map(|h| h * 60),
                    "мин" => value.parse::<u64>().ok(),
                    _ => None,
                })
                .sum();
            prop_assert!(minutes * 60 >= seconds as u64);
            prop_assert!(minutes * 60 < seconds as u64 + 60);
        }
    }

    #[test]
    fn time_from_offset_instant() {
        assert_eq!(format_time("2026-06-15T08:10:00+03:00"), "08:10");
        assert_eq!(format_time("2026-06-15T23:05:00"), "23:05");
        assert_eq!(format_time("nonsense"), "nonsense");
    }

    #[test]
    fn inline_segments_are_numbered_from_one() {
        let segments: Vec<Segment> = (1..=3).map(segment).collect();
        let text = render_segments(&segments);

        assert!(text.starts_with("1. Рейс № 701 Москва (Казанский вокзал) - Казань"));
        assert!(text.contains("2. Рейс № 702"));
        assert!(text.contains("3. Рейс № 703"));
        assert!(text.contains("🕐 08:10 – 20:40 (12 ч 30 мин)"));
        assert!(text.contains("Перевозчик: РЖД"));
    }

    #[test]
    fn empty_lists_render_not_found() {
        assert_eq!(render_segments(&[]), "Рейсов не найдено 😔");
        let empty: Vec<Segment> = Vec::new();
        let page = paginate(&empty, 1, 5);
        assert_eq!(render_segment_page(&page), "Рейсов не найдено 😔");
    }

    #[test]
    fn page_ordinals_are_global() {
        let segments: Vec<Segment> = (1..=12).map(segment).collect();
        let page = paginate(&segments, 2, 5);
        let text = render_segment_page(&page);

        assert!(text.starts_with("Рейсы 2/3 (найдено 12):"));
        assert!(text.contains("6. Рейс № 706"));
        assert!(text.contains("10. Рейс № 7010"));
        assert!(!text.contains("11. Рейс №"));
    }

    #[test]
    fn thread_page_offers_ordinal_selection() {
        let threads: Vec<RouteThread> = (1..=7).map(thread).collect();
        let page = paginate(&threads, 1, 5);
        let text = render_thread_page(&page);

        assert!(text.starts_with("Маршруты 1/2 (найдено 7):"));
        assert!(text.contains("1. Маршрут № 101 Москва - Казань"));
        assert!(text.ends_with("Выберите маршрут и введите его порядковый номер из списка"));
    }

    #[test]
    fn inline_threads_keep_selection_footer() {
        let threads: Vec<RouteThread> = (1..=2).map(thread).collect();
        let text = render_threads(&threads);
        assert!(text.contains("1. Рейс № 101"));
        assert!(text.ends_with("Выберите маршрут и введите его порядковый номер из списка"));
    }

    #[test]
    fn itinerary_respects_first_and_last_stop_rules() {
        let itinerary = Itinerary {
            stops: vec![
                StopPoint {
                    title: "Москва (Казанский вокзал)".to_string(),
                    elapsed: None,
                    dwell: Some(600.0),
                },
                StopPoint {
                    title: "Рязань-2".to_string(),
                    elapsed: Some(9000.0),
                    dwell: Some(120.0),
                },
                StopPoint {
                    title: "Казань".to_string(),
                    elapsed: Some(28800.0),
                    dwell: Some(900.0),
                },
            ],
        };

        let text = render_itinerary(&itinerary);
        let expected = "Москва (Казанский вокзал)\n\
                        Остановка: 10 мин\n     ↓\n\
                        Рязань-2\n\
                        Время в пути: 2 ч 30 мин\n\
                        Остановка: 2 мин\n     ↓\n\
                        Казань\n\
                        Время в пути: 8 ч 0 мин\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn itinerary_omits_zero_durations() {
        let itinerary = Itinerary {
            stops: vec![
                StopPoint { title: "А".to_string(), elapsed: None, dwell: Some(0.0) },
                StopPoint { title: "Б".to_string(), elapsed: Some(0.0), dwell: None },
            ],
        };

        assert_eq!(render_itinerary(&itinerary), "А\n     ↓\nБ\n");
    }
}
