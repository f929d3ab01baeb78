//! Addressable parts of a version and the storage slots they resolve to.

use crate::error::{Result, VersionBumperError};
use std::fmt;
use std::str::FromStr;

/// A named unit of a version that `bump` and `set` can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Epoch,
    Major,
    Minor,
    Patch,
    /// Alpha pre-release, `a`
    Alpha,
    /// Beta pre-release, `b`
    Beta,
    /// Release candidate, `rc`
    ReleaseCandidate,
    Post,
    Dev,
    Local,
}

/// Internal storage slot of a version, in canonical left-to-right order.
///
/// The three pre-release parts share the single `Pre` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Epoch,
    Major,
    Minor,
    Patch,
    Pre,
    Post,
    Dev,
    Local,
}

impl Part {
    /// Every part, in canonical order.
    pub const ALL: [Part; 10] = [
        Part::Epoch,
        Part::Major,
        Part::Minor,
        Part::Patch,
        Part::Alpha,
        Part::Beta,
        Part::ReleaseCandidate,
        Part::Post,
        Part::Dev,
        Part::Local,
    ];

    /// Parse a part from its name
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// The name used on the command line and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Epoch => "epoch",
            Part::Major => "major",
            Part::Minor => "minor",
            Part::Patch => "patch",
            Part::Alpha => "a",
            Part::Beta => "b",
            Part::ReleaseCandidate => "rc",
            Part::Post => "post",
            Part::Dev => "dev",
            Part::Local => "local",
        }
    }

    /// The storage slot this part reads and writes.
    pub fn slot(&self) -> Slot {
        match self {
            Part::Epoch => Slot::Epoch,
            Part::Major => Slot::Major,
            Part::Minor => Slot::Minor,
            Part::Patch => Slot::Patch,
            Part::Alpha | Part::Beta | Part::ReleaseCandidate => Slot::Pre,
            Part::Post => Slot::Post,
            Part::Dev => Slot::Dev,
            Part::Local => Slot::Local,
        }
    }

    /// Whether the part holds a plain integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Part::Epoch | Part::Major | Part::Minor | Part::Patch)
    }

    /// Whether the part is one of the pre-release letters.
    pub fn is_pre_release(&self) -> bool {
        self.slot() == Slot::Pre
    }
}

impl FromStr for Part {
    type Err = VersionBumperError;

    fn from_str(s: &str) -> Result<Self> {
        Part::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| VersionBumperError::InvalidPart(s.to_string()))
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Slot {
    /// Every slot, in canonical order.
    pub const ALL: [Slot; 8] = [
        Slot::Epoch,
        Slot::Major,
        Slot::Minor,
        Slot::Patch,
        Slot::Pre,
        Slot::Post,
        Slot::Dev,
        Slot::Local,
    ];

    /// Slots strictly to the right of this one.
    pub fn after(self) -> impl Iterator<Item = Slot> {
        Slot::ALL.into_iter().filter(move |slot| *slot > self)
    }
}
