//! NuGet package versions and version ranges.
//!
//! Versions have one to four numeric parts, an optional `-prerelease`
//! label and optional `+metadata`, which is ignored for comparison.
//! Ranges use NuGet's interval notation:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | `1.0` | `1.0 <= v` |
//! | `[1.0]` | `v == 1.0` |
//! | `(1.0,)` | `1.0 < v` |
//! | `(,1.0]` | `v <= 1.0` |
//! | `[1.0,2.0)` | `1.0 <= v < 2.0` |

use std::cmp::Ordering;
use std::fmt;

/// A parsed package version.
#[derive(Debug, Clone)]
pub struct NuGetVersion {
    parts: [u64; 4],
    prerelease: Vec<String>,
    original: String,
}

impl NuGetVersion {
    /// Parses a version string, returning `None` if it is malformed.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let original = text.trim();
        let without_metadata = original.split_once('+').map_or(original, |(v, _)| v);
        let (numbers, label) = match without_metadata.split_once('-') {
            Some((numbers, label)) => (numbers, Some(label)),
            None => (without_metadata, None),
        };

        let mut parts = [0u64; 4];
        let mut count = 0;
        for piece in numbers.split('.') {
            if count == parts.len() || piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            parts[count] = piece.parse().ok()?;
            count += 1;
        }

        let prerelease = match label {
            Some(label) => {
                let labels: Vec<String> = label.split('.').map(str::to_string).collect();
                let valid = labels.iter().all(|l| {
                    !l.is_empty() && l.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
                });
                if !valid {
                    return None;
                }
                labels
            }
            None => Vec::new(),
        };

        Some(Self {
            parts,
            prerelease,
            original: original.to_string(),
        })
    }

    /// Returns true if the version carries a prerelease label.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }
}

impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for NuGetVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NuGetVersion {}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts).then_with(|| {
            match (self.is_prerelease(), other.is_prerelease()) {
                (false, false) => Ordering::Equal,
                (false, true) => Ordering::Greater,
                (true, false) => Ordering::Less,
                (true, true) => compare_labels(&self.prerelease, &other.prerelease),
            }
        })
    }
}

fn compare_labels(left: &[String], right: &[String]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

/// One end of a version range.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: NuGetVersion,
    inclusive: bool,
}

/// A range of acceptable package versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl VersionSpec {
    /// Parses a version range, returning `None` if it is malformed or empty.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let Some(first) = text.chars().next().filter(|c| matches!(c, '[' | '(')) else {
            let version = NuGetVersion::parse(text)?;
            return Some(Self {
                min: Some(Bound {
                    version,
                    inclusive: true,
                }),
                max: None,
            });
        };
        let last = text.chars().last().filter(|c| matches!(c, ']' | ')'))?;
        if text.len() < 3 {
            return None;
        }
        let min_inclusive = first == '[';
        let max_inclusive = last == ']';
        let inner = &text[1..text.len() - 1];

        let Some((low, high)) = inner.split_once(',') else {
            if !(min_inclusive && max_inclusive) {
                return None;
            }
            let version = NuGetVersion::parse(inner)?;
            return Some(Self {
                min: Some(Bound {
                    version: version.clone(),
                    inclusive: true,
                }),
                max: Some(Bound {
                    version,
                    inclusive: true,
                }),
            });
        };
        if high.contains(',') {
            return None;
        }

        let min = bound(low, min_inclusive)?;
        let max = bound(high, max_inclusive)?;
        match (&min, &max) {
            (None, None) => return None,
            (Some(min), Some(max)) => match min.version.cmp(&max.version) {
                Ordering::Greater => return None,
                Ordering::Equal if !(min.inclusive && max.inclusive) => return None,
                _ => {}
            },
            _ => {}
        }
        Some(Self { min, max })
    }

    /// Returns true if `version` lies within the range.
    #[must_use]
    pub fn satisfies(&self, version: &NuGetVersion) -> bool {
        let above_min = self.min.as_ref().map_or(true, |min| match version.cmp(&min.version) {
            Ordering::Greater => true,
            Ordering::Equal => min.inclusive,
            Ordering::Less => false,
        });
        let below_max = self.max.as_ref().map_or(true, |max| match version.cmp(&max.version) {
            Ordering::Less => true,
            Ordering::Equal => max.inclusive,
            Ordering::Greater => false,
        });
        above_min && below_max
    }
}

/// Parses one side of an interval. An empty side is unbounded.
#[allow(clippy::option_option)]
fn bound(text: &str, inclusive: bool) -> Option<Option<Bound>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(None);
    }
    NuGetVersion::parse(text).map(|version| Some(Bound { version, inclusive }))
}
