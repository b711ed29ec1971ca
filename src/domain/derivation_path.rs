//! `DerivationPath` addressing shares inside a [`ShareSet`](crate::primitive::ShareSet)

use std::fmt;
use std::str::FromStr;

use crate::primitive::SplitError;

/// Path selecting mnemonics from a split result
///
/// - `r` selects every mnemonic, group by group
/// - `r/i` selects the members of group `i`
/// - `r/i/j` selects member `j` of group `i`
///
/// Group and member indices are 4-bit fields in a SLIP-39 mnemonic, so
/// both are limited to 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivationPath {
    Root,
    Group(u8),
    Member { group: u8, member: u8 },
}

impl DerivationPath {
    /// Largest group or member index a path may carry
    pub const MAX_INDEX: u8 = 15;

    /// Path of a whole group, `r/{index}`
    #[must_use]
    pub fn group(index: u8) -> Self {
        Self::Group(index)
    }

    /// Path of a single member, `r/{group}/{member}`
    #[must_use]
    pub fn member(group: u8, member: u8) -> Self {
        Self::Member { group, member }
    }

    fn parse_index(segment: &str, path: &str) -> Result<u8, SplitError> {
        segment
            .parse::<u8>()
            .ok()
            .filter(|index| *index <= Self::MAX_INDEX)
            .ok_or_else(|| SplitError::InvalidPath(path.to_string()))
    }
}

impl FromStr for DerivationPath {
    type Err = SplitError;

    /// # Examples
    ///
    /// ```rust
    /// use slip39_tool::domain::DerivationPath;
    ///
    /// let path: DerivationPath = "r/3".parse().unwrap();
    /// assert_eq!(path, DerivationPath::group(3));
    ///
    /// assert!("x/3".parse::<DerivationPath>().is_err());
    /// assert!("r/16".parse::<DerivationPath>().is_err());
    /// ```
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut segments = path.split('/');
        if segments.next() != Some("r") {
            return Err(SplitError::InvalidPath(path.to_string()));
        }

        let group = segments
            .next()
            .map(|s| Self::parse_index(s, path))
            .transpose()?;
        let member = segments
            .next()
            .map(|s| Self::parse_index(s, path))
            .transpose()?;

        if segments.next().is_some() {
            return Err(SplitError::InvalidPath(path.to_string()));
        }

        Ok(match (group, member) {
            (None, _) => Self::Root,
            (Some(group), None) => Self::Group(group),
            (Some(group), Some(member)) => Self::Member { group, member },
        })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "r"),
            Self::Group(group) => write!(f, "r/{group}"),
            Self::Member { group, member } => write!(f, "r/{group}/{member}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for path in ["r", "r/0", "r/15", "r/2/7"] {
            assert_eq!(path.parse::<DerivationPath>().unwrap().to_string(), path);
        }
    }

    #[test]
    fn test_rejects_malformed_paths() {
        for path in ["", "m/0", "r/", "r/a", "r/1/2/3", "r/-1", "r/16", "r/0/16"] {
            assert_eq!(
                path.parse::<DerivationPath>().unwrap_err(),
                SplitError::InvalidPath(path.to_string()),
                "{path}"
            );
        }
    }
}
