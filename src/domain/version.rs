use crate::domain::normalize;
use crate::domain::part::{Part, Slot};
use crate::error::{Result, VersionBumperError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

/// Version grammar from the PyPA version specifiers appendix, anchored and
/// without the optional `v` prefix (that is stripped before matching).
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^
        (?:(?P<epoch>[0-9]+)!)?                             # epoch
        (?P<release>[0-9]+(?:\.[0-9]+)*)                    # release segment
        (?P<pre>                                            # pre-release
            [-_\.]?
            (?:a|b|c|rc|alpha|beta|pre|preview)
            [-_\.]?
            (?:[0-9]+)?
        )?
        (?P<post>                                           # post release
            (?:-[0-9]+)
            |
            (?:
                [-_\.]?
                (?:post|rev|r)
                [-_\.]?
                (?:[0-9]+)?
            )
        )?
        (?P<dev>                                            # dev release
            [-_\.]?
            dev
            [-_\.]?
            (?:[0-9]+)?
        )?
        (?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?     # local version
        $",
    )
    .expect("version grammar is a valid regex")
});

/// Leading and trailing whitespace ignored by the parser.
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0c', '\x0b'];

/// A version conforming to the PyPA version specifiers.
///
/// Every field is stored in normalized form. `minor` and `patch` keep the
/// difference between "not written" (`None`) and an explicit `0`. The tag
/// fields are empty when absent; `post` and `dev` are stored without their
/// leading `.` and `local` without its `+`.
///
/// Equality is equality of the canonical rendering. Fields are only
/// changed through parse and the mutators, so a present `patch` always
/// comes with a present `minor`.
#[derive(Debug, Clone, Default)]
pub struct Version {
    epoch: u64,
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: String,
    post: String,
    dev: String,
    local: String,
    input: String,
}

impl Version {
    /// Parse and normalize a version string.
    ///
    /// Surrounding whitespace, letter case and a single leading `v` are
    /// ignored. Fails with [`VersionBumperError::InvalidVersion`] when the
    /// text does not match the version grammar.
    ///
    /// # Example
    /// ```
    /// use version_bumper::Version;
    ///
    /// let v = Version::parse(" V1.2.3-Alpha.1 ").unwrap();
    /// assert_eq!(v.to_string(), "1.2.3a1");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let lowered = text.to_lowercase();
        let trimmed = lowered.trim_matches(WHITESPACE);
        let input = trimmed.strip_prefix('v').unwrap_or(trimmed).to_string();

        let invalid = || VersionBumperError::InvalidVersion(input.clone());
        let captures = VERSION_RE.captures(&input).ok_or_else(invalid)?;
        let group = |name: &str| captures.name(name).map_or("", |m| m.as_str());

        let epoch = match captures.name("epoch") {
            Some(m) => m.as_str().parse::<u64>().map_err(|_| invalid())?,
            None => 0,
        };

        // components past the third are accepted by the grammar but not kept
        let release = group("release")
            .split('.')
            .map(str::parse::<u64>)
            .collect::<std::result::Result<Vec<u64>, _>>()
            .map_err(|_| invalid())?;

        let version = Version {
            epoch,
            major: release.first().copied().unwrap_or(0),
            minor: release.get(1).copied(),
            patch: release.get(2).copied(),
            pre: normalize::pre_release(group("pre")),
            post: normalize::post_release(group("post")),
            dev: normalize::dev_release(group("dev")),
            local: normalize::local(group("local")),
            input: input.clone(),
        };
        debug!(input = %input, version = %version, "parsed version");
        Ok(version)
    }

    /// The lowercased, trimmed text this version was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    /// `None` when the minor number was not written.
    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    /// `None` when the patch number was not written.
    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// Normalized pre-release tag such as `rc1`, empty when absent.
    pub fn pre(&self) -> &str {
        &self.pre
    }

    /// Post-release tag without its leading dot, such as `post2`.
    pub fn post(&self) -> &str {
        &self.post
    }

    /// Dev-release tag without its leading dot, such as `dev3`.
    pub fn dev(&self) -> &str {
        &self.dev
    }

    /// Local label without its `+`.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Increment the named part and clear every part to its right.
    ///
    /// Fails with [`VersionBumperError::InvalidPart`] before touching any
    /// field when `part` is not a known part name.
    pub fn bump(&mut self, part: &str) -> Result<&mut Self> {
        let part = Part::parse(part)?;
        Ok(self.bump_part(part))
    }

    /// Increment `part` and clear every part to its right.
    ///
    /// Absent `minor`/`patch` count as `0`. Bumping `patch` writes an
    /// explicit minor so `1` becomes `1.0.1`. A pre-release letter that
    /// differs from the stored one restarts at `1`. Bumping `epoch` clears
    /// nothing.
    pub fn bump_part(&mut self, part: Part) -> &mut Self {
        match part {
            Part::Epoch => self.epoch = self.epoch.saturating_add(1),
            Part::Major => self.major = self.major.saturating_add(1),
            Part::Minor => self.minor = Some(self.minor.unwrap_or(0).saturating_add(1)),
            Part::Patch => {
                self.minor = Some(self.minor.unwrap_or(0));
                self.patch = Some(self.patch.unwrap_or(0).saturating_add(1));
            }
            Part::Alpha | Part::Beta | Part::ReleaseCandidate => {
                self.pre = bump_tag(&self.pre, part.as_str());
            }
            Part::Post => self.post = bump_tag(&self.post, "post"),
            Part::Dev => self.dev = bump_tag(&self.dev, "dev"),
            Part::Local => self.local = bump_local(&self.local),
        }

        if part != Part::Epoch {
            self.clear_after(part.slot());
        }
        debug!(part = %part, version = %self, "bumped version");
        self
    }

    /// Drop the pre, post, dev and local parts, leaving the release.
    pub fn bump_release(&mut self) -> &mut Self {
        self.clear_after(Slot::Patch);
        self
    }

    /// Set the named part to `value`.
    ///
    /// An unknown part name leaves the version unchanged. See
    /// [`Version::set_part`].
    pub fn set(&mut self, part: &str, value: &str, clear_right: bool) -> Result<&mut Self> {
        match Part::parse(part) {
            Ok(part) => self.set_part(part, value, clear_right),
            Err(_) => {
                debug!(part, "ignoring set of unknown part");
                Ok(self)
            }
        }
    }

    /// Set `part` to `value`, normalizing tag values.
    ///
    /// A pre-release letter is prefixed to `value` before normalizing
    /// (`rc` + `4` gives `rc4`); post and dev values are normalized alone
    /// (`4` gives `.post4`), and an empty value clears them. Integer parts
    /// must parse as non-negative integers, otherwise
    /// [`VersionBumperError::NumericConversion`] is returned and the version
    /// is left unchanged. Setting `patch` writes an explicit minor.
    ///
    /// With `clear_right`, every part to the right of `part` is cleared.
    pub fn set_part(&mut self, part: Part, value: &str, clear_right: bool) -> Result<&mut Self> {
        if part.is_integer() {
            let number = value.trim().parse::<u64>().map_err(|source| {
                VersionBumperError::NumericConversion {
                    part: part.to_string(),
                    value: value.to_string(),
                    source,
                }
            })?;
            match part {
                Part::Epoch => self.epoch = number,
                Part::Major => self.major = number,
                Part::Minor => self.minor = Some(number),
                _ => {
                    self.minor = Some(self.minor.unwrap_or(0));
                    self.patch = Some(number);
                }
            }
        } else if part.is_pre_release() {
            self.pre = normalize::pre_release(&format!("{}{}", part.as_str(), value));
        } else {
            match part {
                Part::Post => self.post = normalize::post_release(value),
                Part::Dev => self.dev = normalize::dev_release(value),
                _ => self.local = normalize::local(value),
            }
        }

        if clear_right {
            self.clear_after(part.slot());
        }
        debug!(part = %part, value, clear_right, version = %self, "set version part");
        Ok(self)
    }

    /// Reset every slot to the right of `slot`.
    ///
    /// Present `minor`/`patch` become `0`, absent ones stay absent, tag
    /// slots become empty. `major` is never cleared.
    fn clear_after(&mut self, slot: Slot) {
        for slot in slot.after() {
            match slot {
                Slot::Epoch | Slot::Major => {}
                Slot::Minor => self.minor = self.minor.map(|_| 0),
                Slot::Patch => self.patch = self.patch.map(|_| 0),
                Slot::Pre => self.pre.clear(),
                Slot::Post => self.post.clear(),
                Slot::Dev => self.dev.clear(),
                Slot::Local => self.local.clear(),
            }
        }
    }
}

/// Increment the numeral of a `stem`-prefixed tag, or start it at `1` when
/// the stored tag has a different stem.
fn bump_tag(current: &str, stem: &str) -> String {
    match current.strip_prefix(stem) {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            format!("{stem}{}", normalize::increment_digits(digits))
        }
        _ => format!("{stem}1"),
    }
}

/// Increment the trailing digits of a local tag, appending `1` when it has
/// none.
fn bump_local(current: &str) -> String {
    let (stem, digits) = normalize::split_trailing_digits(current);
    format!("{stem}{}", normalize::increment_digits(digits))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}!", self.epoch)?;
        }
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        f.write_str(&self.pre)?;
        if !self.post.is_empty() {
            write!(f, ".{}", self.post)?;
        }
        if !self.dev.is_empty() {
            write!(f, ".{}", self.dev)?;
        }
        if !self.local.is_empty() {
            write!(f, "+{}", self.local)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionBumperError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Version {}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Field by field: epoch, major, minor, patch (absent before present),
    /// then pre, post, dev and local as plain strings, so `a10` sorts
    /// before `a9`.
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.major.cmp(&other.major))
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev.cmp(&other.dev))
            .then_with(|| self.local.cmp(&other.local))
    }
}
