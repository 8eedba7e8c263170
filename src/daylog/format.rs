//! # Date Format Inference
//!
//! Daily notes are named after their date, but vaults disagree on *how*:
//! `2025-07-19-Saturday.md`, `19-07-2025.md`, `July 19, 2025.md`, ...
//! This module owns the fixed catalog of supported layouts and the vote that
//! picks one of them from a sample of existing filenames.
//!
//! ## The Catalog
//!
//! Every layout is one row of a single ordered table: the token users write in
//! their config (`YYYY-MM-DD-dddd`), a matcher that recognizes the shape of a
//! stem, and the `strftime` string that renders a stem for a date. Inference,
//! rendering and the any-format lookup in [`candidate_paths`] all read the
//! same table, and the [`DateFormat`] variants are declared in table order.
//!
//! Table order is priority order. Layouts carrying a weekday, a month name or a
//! leading four-digit year come first; the two-digit-year layouts come last.
//!
//! ## Voting
//!
//! Each stem votes once, for the first row whose matcher accepts it. Stems of
//! the shape `N-N-YYYY` are set aside: both `DD-MM-YYYY` and `MM-DD-YYYY`
//! produce them. They are settled together by looking for a number above 12
//! (which cannot be a month) in either slot, and the whole set goes to the
//! winner. When the evidence is even, [`DayMonthOrder`] decides.
//!
//! The two-digit-year rows `YY-MM-DD` and `MM-DD-YY` get the same treatment.
//! A stem both of them accept (`07-05-09`) has no field above 12 to tell them
//! apart, so it is set aside and the whole set joins whichever of the two won
//! more stems outright. With no outright stems it goes to `MM-DD-YY`: a
//! `YY-MM-DD` stem only lacks such a field for the years 2000-2012.
//!
//! The highest total wins; equal totals go to the row declared first.

use crate::error::DaylogError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Extension of daily note files, stripped to get a stem.
pub const NOTE_EXTENSION: &str = ".md";

const WEEKDAYS: &str = "(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)";
const MONTHS: &str = "(?:January|February|March|April|May|June|July|August|September|October|November|December)";

/// A supported daily note filename layout.
///
/// Variants are declared in catalog (priority) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "YYYY-MM-DD-dddd")]
    IsoDashWeekday,
    #[serde(rename = "YYYY-MM-DD dddd")]
    IsoSpaceWeekday,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
    #[serde(rename = "YYYY/MM/DD")]
    IsoSlashed,
    #[serde(rename = "MMMM DD, YYYY")]
    MonthNameDayYear,
    #[serde(rename = "DD MMMM YYYY")]
    DayMonthNameYear,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYear,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYear,
    #[serde(rename = "YY-MM-DD")]
    ShortIso,
    #[serde(rename = "MM-DD-YY")]
    ShortMonthDayYear,
}

/// Which of `DD-MM-YYYY` / `MM-DD-YYYY` wins when the sample gives no evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayMonthOrder {
    #[default]
    MonthFirst,
    DayFirst,
}

impl DayMonthOrder {
    fn format(self) -> DateFormat {
        match self {
            DayMonthOrder::MonthFirst => DateFormat::MonthDayYear,
            DayMonthOrder::DayFirst => DateFormat::DayMonthYear,
        }
    }
}

impl fmt::Display for DayMonthOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayMonthOrder::MonthFirst => write!(f, "month-first"),
            DayMonthOrder::DayFirst => write!(f, "day-first"),
        }
    }
}

impl FromStr for DayMonthOrder {
    type Err = DaylogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month-first" => Ok(DayMonthOrder::MonthFirst),
            "day-first" => Ok(DayMonthOrder::DayFirst),
            other => Err(DaylogError::Config(format!(
                "Unknown day/month order: {} (expected month-first or day-first)",
                other
            ))),
        }
    }
}

/// No catalog layout matched any stem of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No known date format matched {sampled} sampled filename(s)")]
pub struct NoMatch {
    pub sampled: usize,
}

/// Votes collected by one layout during inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub format: DateFormat,
    pub count: usize,
}

enum Matcher {
    Shape(Regex),
    /// Numeric layout whose month and day capture groups must hold plausible values.
    Numeric {
        shape: Regex,
        month: usize,
        day: usize,
    },
    /// Shares the `N-N-YYYY` shape with its sibling; settled by [`resolve_day_month`].
    DayMonth { month: usize, day: usize },
}

impl Matcher {
    fn matches(&self, stem: &str) -> bool {
        match self {
            Matcher::Shape(shape) => shape.is_match(stem),
            Matcher::Numeric { shape, month, day } => fields_plausible(shape, stem, *month, *day),
            Matcher::DayMonth { month, day } => {
                fields_plausible(&AMBIGUOUS_DAY_MONTH, stem, *month, *day)
            }
        }
    }
}

fn fields_plausible(shape: &Regex, stem: &str, month: usize, day: usize) -> bool {
    let Some(caps) = shape.captures(stem) else {
        return false;
    };
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    matches!(field(month), Some(1..=12)) && matches!(field(day), Some(1..=31))
}

struct Pattern {
    format: DateFormat,
    token: &'static str,
    strftime: &'static str,
    matcher: Matcher,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("catalog patterns are valid regexes")
}

static AMBIGUOUS_DAY_MONTH: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{1,2})-(\d{1,2})-(\d{4})$"));

static CATALOG: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        Pattern {
            format: DateFormat::IsoDashWeekday,
            token: "YYYY-MM-DD-dddd",
            strftime: "%Y-%m-%d-%A",
            matcher: Matcher::Shape(compile(&format!(r"^\d{{4}}-\d{{2}}-\d{{2}}-{WEEKDAYS}$"))),
        },
        Pattern {
            format: DateFormat::IsoSpaceWeekday,
            token: "YYYY-MM-DD dddd",
            strftime: "%Y-%m-%d %A",
            matcher: Matcher::Shape(compile(&format!(r"^\d{{4}}-\d{{2}}-\d{{2}} {WEEKDAYS}$"))),
        },
        Pattern {
            format: DateFormat::Iso,
            token: "YYYY-MM-DD",
            strftime: "%Y-%m-%d",
            matcher: Matcher::Shape(compile(r"^\d{4}-\d{2}-\d{2}$")),
        },
        Pattern {
            format: DateFormat::IsoSlashed,
            token: "YYYY/MM/DD",
            strftime: "%Y/%m/%d",
            matcher: Matcher::Shape(compile(r"^\d{4}/\d{2}/\d{2}$")),
        },
        Pattern {
            format: DateFormat::MonthNameDayYear,
            token: "MMMM DD, YYYY",
            strftime: "%B %d, %Y",
            matcher: Matcher::Shape(compile(&format!(r"^{MONTHS} \d{{1,2}}, \d{{4}}$"))),
        },
        Pattern {
            format: DateFormat::DayMonthNameYear,
            token: "DD MMMM YYYY",
            strftime: "%d %B %Y",
            matcher: Matcher::Shape(compile(&format!(r"^\d{{1,2}} {MONTHS} \d{{4}}$"))),
        },
        Pattern {
            format: DateFormat::DayMonthYear,
            token: "DD-MM-YYYY",
            strftime: "%d-%m-%Y",
            matcher: Matcher::DayMonth { month: 2, day: 1 },
        },
        Pattern {
            format: DateFormat::MonthDayYear,
            token: "MM-DD-YYYY",
            strftime: "%m-%d-%Y",
            matcher: Matcher::DayMonth { month: 1, day: 2 },
        },
        Pattern {
            format: DateFormat::ShortIso,
            token: "YY-MM-DD",
            strftime: "%y-%m-%d",
            matcher: Matcher::Numeric {
                shape: compile(r"^(\d{2})-(\d{2})-(\d{2})$"),
                month: 2,
                day: 3,
            },
        },
        Pattern {
            format: DateFormat::ShortMonthDayYear,
            token: "MM-DD-YY",
            strftime: "%m-%d-%y",
            matcher: Matcher::Numeric {
                shape: compile(r"^(\d{1,2})-(\d{1,2})-(\d{2})$"),
                month: 1,
                day: 2,
            },
        },
    ]
});

impl DateFormat {
    fn pattern(self) -> &'static Pattern {
        &CATALOG[self as usize]
    }

    /// All layouts, in catalog order.
    pub fn all() -> impl Iterator<Item = DateFormat> {
        CATALOG.iter().map(|p| p.format)
    }

    /// The config token, e.g. `YYYY-MM-DD-dddd`.
    pub fn token(self) -> &'static str {
        self.pattern().token
    }

    /// Renders the filename stem this layout gives `date`.
    pub fn render(self, date: NaiveDate) -> String {
        date.format(self.pattern().strftime).to_string()
    }

    /// Whether `stem` has this layout's shape.
    pub fn matches(self, stem: &str) -> bool {
        self.pattern().matcher.matches(stem)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DateFormat {
    type Err = DaylogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::all()
            .find(|format| format.token() == s)
            .ok_or_else(|| DaylogError::Config(format!("Unknown date format: {}", s)))
    }
}

enum Classified {
    Decided(DateFormat),
    DayMonth,
    ShortYear,
}

fn classify(stem: &str) -> Option<Classified> {
    if DateFormat::ShortIso.matches(stem) && DateFormat::ShortMonthDayYear.matches(stem) {
        return Some(Classified::ShortYear);
    }
    CATALOG.iter().find_map(|pattern| match &pattern.matcher {
        Matcher::DayMonth { .. } => AMBIGUOUS_DAY_MONTH
            .is_match(stem)
            .then_some(Classified::DayMonth),
        matcher => matcher
            .matches(stem)
            .then_some(Classified::Decided(pattern.format)),
    })
}

fn resolve_day_month(stems: &[&str], order: DayMonthOrder) -> DateFormat {
    let mut day_first = 0usize;
    let mut month_first = 0usize;

    for stem in stems {
        let mut numbers = stem.split('-').map(|part| part.parse::<u32>().unwrap_or(0));
        if numbers.next().is_some_and(|n| n > 12) {
            day_first += 1;
        }
        if numbers.next().is_some_and(|n| n > 12) {
            month_first += 1;
        }
    }

    match day_first.cmp(&month_first) {
        Ordering::Greater => DateFormat::DayMonthYear,
        Ordering::Less => DateFormat::MonthDayYear,
        Ordering::Equal => order.format(),
    }
}

/// Counts votes per layout for `sample`.
///
/// Only layouts with at least one vote are returned, in catalog order.
pub fn tally<S: AsRef<str>>(sample: &[S], order: DayMonthOrder) -> Vec<Vote> {
    let mut counts = vec![0usize; CATALOG.len()];
    let mut ambiguous = Vec::new();
    let mut short_year = 0usize;

    for stem in sample.iter().map(AsRef::as_ref) {
        match classify(stem) {
            Some(Classified::Decided(format)) => counts[format as usize] += 1,
            Some(Classified::DayMonth) => ambiguous.push(stem),
            Some(Classified::ShortYear) => short_year += 1,
            None => {}
        }
    }

    if !ambiguous.is_empty() {
        let winner = resolve_day_month(&ambiguous, order);
        counts[winner as usize] += ambiguous.len();
    }

    if short_year > 0 {
        let winner = if counts[DateFormat::ShortIso as usize]
            > counts[DateFormat::ShortMonthDayYear as usize]
        {
            DateFormat::ShortIso
        } else {
            DateFormat::ShortMonthDayYear
        };
        counts[winner as usize] += short_year;
    }

    CATALOG
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(pattern, count)| Vote {
            format: pattern.format,
            count,
        })
        .collect()
}

/// Picks the layout that best explains `sample`.
pub fn infer_format<S: AsRef<str>>(
    sample: &[S],
    order: DayMonthOrder,
) -> Result<DateFormat, NoMatch> {
    let mut best: Option<Vote> = None;
    for vote in tally(sample, order) {
        // strictly greater: the earlier catalog row keeps a tie
        if best.map_or(true, |b| vote.count > b.count) {
            best = Some(vote);
        }
    }
    best.map(|vote| vote.format).ok_or(NoMatch {
        sampled: sample.len(),
    })
}

/// Every path a note for `date` could have under `dir`, one per layout, in catalog order.
pub fn candidate_paths(dir: &Path, date: NaiveDate) -> Vec<(PathBuf, DateFormat)> {
    DateFormat::all()
        .map(|format| {
            let filename = format!("{}{}", format.render(date), NOTE_EXTENSION);
            (dir.join(filename), format)
        })
        .collect()
}
