//! Free-text phrase → event draft
//!
//! The parser is an ordered pipeline of extraction steps. Each step reads the
//! text left over by the previous one and returns the field it found together
//! with the text that remains once its match is cut out. Earlier steps win
//! when two could claim the same words, with one deliberate exception: an
//! explicit clock time always replaces a named period ("tomorrow morning at
//! 7am" starts at 7:00 AM, not 9:00 AM).
//!
//! Parsing never fails. Anything not recognised falls back to a default:
//! current day, next full hour, `General`, and the "New Event" title.

use chrono::{NaiveDateTime, Weekday};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::time::{today_index, tomorrow_index, weekday_from_index, ClockTime, DAY_NAMES};
use super::types::{BlockCategory, BlockId, EventDraft, PLACEHOLDER_TITLE};

const LEADING_FILLER: [&str; 8] = ["for", "at", "on", "from", "to", "the", "a", "an"];
const TRAILING_FILLER: [&str; 5] = ["for", "at", "on", "from", "to"];

/// Extraction steps in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Day,
    NamedPeriod,
    ExplicitTime,
    Duration,
    Category,
    Title,
}

pub const PIPELINE: [Step; 6] = [
    Step::Day,
    Step::NamedPeriod,
    Step::ExplicitTime,
    Step::Duration,
    Step::Category,
    Step::Title,
];

/// What a step found, plus the text left for the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    pub field: Option<T>,
    pub remaining: String,
}

impl<T> Extracted<T> {
    fn miss(text: &str) -> Self {
        Self {
            field: None,
            remaining: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSpan {
    fn one_hour_from(start: ClockTime) -> Self {
        Self {
            start,
            end: start.add_hours(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationAmount {
    Hours(i64),
    Minutes(i64),
}

struct NamedPeriod {
    pattern: Regex,
    span: TimeSpan,
}

static WEEKDAY_PATTERNS: Lazy<Vec<(Weekday, Regex)>> = Lazy::new(|| {
    DAY_NAMES
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            let day = weekday_from_index(index as u8)?;
            Some((day, word_pattern(name)))
        })
        .collect()
});

static TOMORROW: Lazy<Regex> = Lazy::new(|| word_pattern("tomorrow"));
static TODAY: Lazy<Regex> = Lazy::new(|| word_pattern("today"));

static NAMED_PERIODS: Lazy<Vec<NamedPeriod>> = Lazy::new(|| {
    [
        ("morning", 9),
        ("afternoon", 14),
        ("evening", 18),
        ("noon", 12),
        ("midnight", 0),
    ]
    .into_iter()
    .filter_map(|(name, hour)| {
        let start = ClockTime::new(hour, 0)?;
        Some(NamedPeriod {
            pattern: word_pattern(name),
            span: TimeSpan::one_hour_from(start),
        })
    })
    .collect()
});

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*([ap])\.?\s*m\b\.?")
        .expect("valid clock time regex")
});

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(hours?|hrs?|minutes?|mins?)\b").expect("valid duration regex")
});

static CATEGORY_KEYWORDS: Lazy<Vec<(BlockCategory, Regex)>> = Lazy::new(|| {
    [
        (BlockCategory::Meetings, "meeting|standup|call|sync"),
        (BlockCategory::DeepWork, "focus|work|code|dev|deep"),
        (BlockCategory::Breaks, "break|lunch|eat|coffee"),
        (BlockCategory::Health, "exercise|gym|workout|run"),
    ]
    .into_iter()
    .map(|(category, words)| (category, word_pattern(&format!("(?:{})s?", words))))
    .collect()
});

/// Case-insensitive whole-word pattern. Inputs are fixed literals.
fn word_pattern(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", word)).expect("valid keyword regex")
}

/// Parse one line of text into a draft with a fresh id.
pub fn parse(input: &str, now: NaiveDateTime) -> EventDraft {
    parse_with_id(input, now, BlockId::new())
}

/// Same as [`parse`] with a caller-chosen id, so output is fully determined
/// by the arguments.
pub fn parse_with_id(input: &str, now: NaiveDateTime, id: BlockId) -> EventDraft {
    let state = PIPELINE
        .iter()
        .fold(DraftState::new(input, now), |state, step| state.apply(*step));
    state.finish(id)
}

struct DraftState<'a> {
    input: &'a str,
    now: NaiveDateTime,
    remaining: String,
    day: Option<Weekday>,
    span: Option<TimeSpan>,
    category: BlockCategory,
    title: String,
}

impl<'a> DraftState<'a> {
    fn new(input: &'a str, now: NaiveDateTime) -> Self {
        Self {
            input,
            now,
            remaining: input.to_string(),
            day: None,
            span: None,
            category: BlockCategory::General,
            title: String::new(),
        }
    }

    fn apply(mut self, step: Step) -> Self {
        match step {
            Step::Day => {
                let found = extract_day(&self.remaining, self.now);
                self.day = found.field;
                self.remaining = found.remaining;
            }
            Step::NamedPeriod => {
                let found = extract_named_period(&self.remaining);
                if found.field.is_some() {
                    self.span = found.field;
                }
                self.remaining = found.remaining;
            }
            Step::ExplicitTime => {
                let found = extract_explicit_times(&self.remaining);
                if found.field.is_some() {
                    self.span = found.field;
                }
                self.remaining = found.remaining;
            }
            Step::Duration => {
                let found = extract_duration(&self.remaining);
                if let Some(amount) = found.field {
                    let start = self.span.unwrap_or_else(|| default_span(self.now)).start;
                    let end = match amount {
                        DurationAmount::Hours(n) => start.add_hours(n),
                        DurationAmount::Minutes(n) => start.add_minutes(n),
                    };
                    self.span = Some(TimeSpan { start, end });
                }
                self.remaining = found.remaining;
            }
            Step::Category => {
                self.category = infer_category(self.input);
            }
            Step::Title => {
                self.title = clean_title(&self.remaining);
            }
        }
        self
    }

    fn finish(self, id: BlockId) -> EventDraft {
        let day = self.day.unwrap_or_else(|| current_day(self.now));
        let span = self.span.unwrap_or_else(|| default_span(self.now));

        if span.end <= span.start {
            warn!(
                "event=parse_wraps_midnight module=parser start=\"{}\" end=\"{}\"",
                span.start, span.end
            );
        }
        debug!(
            "event=parse_draft module=parser day={:?} start=\"{}\" end=\"{}\" category=\"{}\"",
            day, span.start, span.end, self.category
        );

        EventDraft {
            id,
            title: self.title,
            day,
            start_time: span.start,
            end_time: span.end,
            category: self.category,
            has_reminder: false,
        }
    }
}

fn current_day(now: NaiveDateTime) -> Weekday {
    weekday_from_index(today_index(now)).unwrap_or(Weekday::Mon)
}

fn default_span(now: NaiveDateTime) -> TimeSpan {
    TimeSpan::one_hour_from(ClockTime::next_full_hour(now.time()))
}

fn cut(pattern: &Regex, text: &str) -> String {
    pattern.replace_all(text, " ").into_owned()
}

/// Weekday name first (table order), then "tomorrow", then "today".
pub fn extract_day(text: &str, now: NaiveDateTime) -> Extracted<Weekday> {
    for (day, pattern) in WEEKDAY_PATTERNS.iter() {
        if pattern.is_match(text) {
            return Extracted {
                field: Some(*day),
                remaining: cut(pattern, text),
            };
        }
    }

    let relative = [
        (&*TOMORROW, tomorrow_index(now)),
        (&*TODAY, today_index(now)),
    ];
    for (pattern, index) in relative {
        if pattern.is_match(text) {
            return Extracted {
                field: weekday_from_index(index),
                remaining: cut(pattern, text),
            };
        }
    }

    Extracted::miss(text)
}

pub fn extract_named_period(text: &str) -> Extracted<TimeSpan> {
    for period in NAMED_PERIODS.iter() {
        if period.pattern.is_match(text) {
            return Extracted {
                field: Some(period.span),
                remaining: cut(&period.pattern, text),
            };
        }
    }
    Extracted::miss(text)
}

/// First clock time is the start, a second one the end. With only one, the
/// block lasts an hour. Readings that are not valid 12-hour times stay in the
/// text.
pub fn extract_explicit_times(text: &str) -> Extracted<TimeSpan> {
    let mut times = Vec::new();
    let mut remaining = String::with_capacity(text.len());
    let mut last = 0;

    for caps in CLOCK_TIME.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(time) = clock_time_from_captures(&caps) else {
            continue;
        };
        times.push(time);
        remaining.push_str(&text[last..whole.start()]);
        remaining.push(' ');
        last = whole.end();
    }
    remaining.push_str(&text[last..]);

    let field = match times.as_slice() {
        [] => None,
        [start] => Some(TimeSpan::one_hour_from(*start)),
        [start, end, ..] => Some(TimeSpan {
            start: *start,
            end: *end,
        }),
    };

    Extracted { field, remaining }
}

fn clock_time_from_captures(caps: &regex::Captures<'_>) -> Option<ClockTime> {
    let hour = caps.get(1)?.as_str().parse::<u8>().ok()?;
    let minute = match caps.get(2) {
        Some(m) => m.as_str().parse::<u8>().ok()?,
        None => 0,
    };
    let meridiem = caps.get(3)?.as_str();
    format!("{}:{:02}{}m", hour, minute, meridiem).parse().ok()
}

/// First "N hours" / "N min" phrase. A zero amount is cut but has no effect.
pub fn extract_duration(text: &str) -> Extracted<DurationAmount> {
    let Some(caps) = DURATION.captures(text) else {
        return Extracted::miss(text);
    };

    let amount = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .filter(|n| *n > 0);
    let unit = caps
        .get(2)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default();

    let field = amount.map(|n| {
        if unit.starts_with('h') {
            DurationAmount::Hours(n)
        } else {
            DurationAmount::Minutes(n)
        }
    });

    Extracted {
        field,
        remaining: cut(&DURATION, text),
    }
}

/// Keyword scan over the whole input; first matching group wins.
pub fn infer_category(input: &str) -> BlockCategory {
    let lowered = input.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

pub fn clean_title(text: &str) -> String {
    let mut words: Vec<&str> = text.split_whitespace().collect();

    while let Some(first) = words.first() {
        if !is_filler(first, &LEADING_FILLER) {
            break;
        }
        words.remove(0);
    }
    while let Some(last) = words.last() {
        if !is_filler(last, &TRAILING_FILLER) {
            break;
        }
        words.pop();
    }

    let title = words.join(" ");
    if title.chars().count() < 2 {
        PLACEHOLDER_TITLE.to_string()
    } else {
        title
    }
}

fn is_filler(word: &str, fillers: &[&str]) -> bool {
    fillers.iter().any(|f| f.eq_ignore_ascii_case(word))
}
