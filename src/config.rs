//! Run configuration.
//!
//! Every option is a typed value threaded through the pipeline; nothing is
//! read from globals. The `FromStr` impls double as the CLI value parsers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MIN_CM: u32 = 0;
pub const DEFAULT_MAX_CM: u32 = 5000;
pub const DEFAULT_MAX_GENERATIONS: usize = 128;
pub const DEFAULT_MAX_PATHS_PER_ANCESTOR: usize = 64;

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Event type (`2 TYPE`) holding the DNA data, compared case-insensitively.
    pub event_name: String,
    /// Which part of the event carries the text.
    pub field: EventField,
    pub value_mode: ValueMode,
    /// Inclusive cM range of retained matches.
    pub min_cm: u32,
    pub max_cm: u32,
    pub format: OutputFormat,
    pub show_relationship: bool,
    pub title: Option<String>,
    pub title_placement: TitlePlacement,
    pub reverse_arrows: bool,
    pub orientation: Orientation,
    pub short_names: bool,
    /// Edge pen width.
    pub thickness: u32,
    /// Upper bound on generations walked by the ancestor search.
    pub max_generations: usize,
    /// Upper bound on hop sequences enumerated per ancestor and side.
    pub max_paths_per_ancestor: usize,
}

impl Config {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            field: EventField::Note,
            value_mode: ValueMode::Strict,
            min_cm: DEFAULT_MIN_CM,
            max_cm: DEFAULT_MAX_CM,
            format: OutputFormat::Tree,
            show_relationship: false,
            title: None,
            title_placement: TitlePlacement::default(),
            reverse_arrows: false,
            orientation: Orientation::LeftRight,
            short_names: false,
            thickness: 1,
            max_generations: DEFAULT_MAX_GENERATIONS,
            max_paths_per_ancestor: DEFAULT_MAX_PATHS_PER_ANCESTOR,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_name.trim().is_empty() {
            return Err(Error::InvalidConfiguration("event name is empty".into()));
        }
        if self.min_cm > self.max_cm {
            return Err(Error::InvalidConfiguration(format!(
                "--min ({}) is greater than --max ({})",
                self.min_cm, self.max_cm
            )));
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfiguration("max generations must be positive".into()));
        }
        if self.max_paths_per_ancestor == 0 {
            return Err(Error::InvalidConfiguration("max paths per ancestor must be positive".into()));
        }
        if self.thickness == 0 {
            return Err(Error::InvalidConfiguration("line thickness must be positive".into()));
        }
        Ok(())
    }

    pub fn in_range(&self, cm: u32) -> bool {
        (self.min_cm..=self.max_cm).contains(&cm)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("dnamatch")
    }
}

// ============================================================================
// Option enums
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Tree,
    Matrix,
    Gedcom,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(OutputFormat::Tree),
            "matrix" => Ok(OutputFormat::Matrix),
            "gedcom" | "gedcom-like" => Ok(OutputFormat::Gedcom),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown format \"{other}\", expected tree, matrix or gedcom"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Matrix => "matrix",
            OutputFormat::Gedcom => "gedcom",
        })
    }
}

/// Where inside the DNA event the text lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventField {
    /// `2 NOTE 290 cM across 15 segments`
    #[default]
    Note,
    /// `1 EVEN 290 cM`
    Value,
}

impl FromStr for EventField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "note" => Ok(EventField::Note),
            "value" => Ok(EventField::Value),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown event type \"{other}\", expected note or value"
            ))),
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventField::Note => "note",
            EventField::Value => "value",
        })
    }
}

/// How strictly the cM number is recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueMode {
    /// The number must be followed by `cM`.
    #[default]
    Strict,
    /// Any number will do.
    Lenient,
}

impl FromStr for ValueMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValueMode::Strict),
            "lenient" => Ok(ValueMode::Lenient),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown value mode \"{other}\", expected strict or lenient"
            ))),
        }
    }
}

impl fmt::Display for ValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueMode::Strict => "strict",
            ValueMode::Lenient => "lenient",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    LeftRight,
    TopBottom,
    BottomTop,
    RightLeft,
}

impl Orientation {
    /// Graphviz `rankdir` value.
    pub fn rankdir(&self) -> &'static str {
        match self {
            Orientation::LeftRight => "LR",
            Orientation::TopBottom => "TB",
            Orientation::BottomTop => "BT",
            Orientation::RightLeft => "RL",
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lr" => Ok(Orientation::LeftRight),
            "tb" => Ok(Orientation::TopBottom),
            "bt" => Ok(Orientation::BottomTop),
            "rl" => Ok(Orientation::RightLeft),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown orientation \"{other}\", expected lr, tb, bt or rl"
            ))),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rankdir())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalPlacement {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalPlacement {
    #[default]
    Center,
    Left,
    Right,
}

/// Title position: `tc`, `tl`, `tr`, `bc`, `bl`, `br` (either letter order).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitlePlacement {
    pub vertical: VerticalPlacement,
    pub horizontal: HorizontalPlacement,
}

impl FromStr for TitlePlacement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let invalid = || {
            Error::InvalidConfiguration(format!(
                "unknown title placement \"{lower}\", expected tc, tl, tr, bc, bl or br"
            ))
        };
        if lower.len() != 2 {
            return Err(invalid());
        }

        let mut vertical = None;
        let mut horizontal = None;
        for c in lower.chars() {
            match c {
                't' if vertical.is_none() => vertical = Some(VerticalPlacement::Top),
                'b' if vertical.is_none() => vertical = Some(VerticalPlacement::Bottom),
                'c' if horizontal.is_none() => horizontal = Some(HorizontalPlacement::Center),
                'l' if horizontal.is_none() => horizontal = Some(HorizontalPlacement::Left),
                'r' if horizontal.is_none() => horizontal = Some(HorizontalPlacement::Right),
                _ => return Err(invalid()),
            }
        }
        match (vertical, horizontal) {
            (Some(vertical), Some(horizontal)) => Ok(Self { vertical, horizontal }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for TitlePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            VerticalPlacement::Top => 't',
            VerticalPlacement::Bottom => 'b',
        };
        let h = match self.horizontal {
            HorizontalPlacement::Center => 'c',
            HorizontalPlacement::Left => 'l',
            HorizontalPlacement::Right => 'r',
        };
        write!(f, "{v}{h}")
    }
}
