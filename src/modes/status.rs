//! PEP status codes and the labels each code accepts
//!
//! The numerical index abbreviates every PEP as two letters, type then
//! status (`SF` is a Standards Track PEP with status Final). The status
//! letter is one of a closed set; each letter stands for one or more full
//! labels as printed on the PEP page itself.

use crate::{Result, ScraperError};
use std::fmt;

/// Status letter from the PEP index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `A`: Active or Accepted
    Active,
    /// `D`
    Deferred,
    /// `F`
    Final,
    /// `P`
    Provisional,
    /// `R`
    Rejected,
    /// `S`
    Superseded,
    /// `W`
    Withdrawn,
    /// No status letter: Draft or Active
    Unset,
}

impl StatusCode {
    /// Every code, in table order
    pub const ALL: [StatusCode; 8] = [
        Self::Active,
        Self::Deferred,
        Self::Final,
        Self::Provisional,
        Self::Rejected,
        Self::Superseded,
        Self::Withdrawn,
        Self::Unset,
    ];

    /// Parses a status letter
    ///
    /// # Returns
    ///
    /// * `Ok(StatusCode)` - The letter is a known status
    /// * `Err(ScraperError::LookupFailure)` - Anything else
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'A' => Ok(Self::Active),
            'D' => Ok(Self::Deferred),
            'F' => Ok(Self::Final),
            'P' => Ok(Self::Provisional),
            'R' => Ok(Self::Rejected),
            'S' => Ok(Self::Superseded),
            'W' => Ok(Self::Withdrawn),
            other => Err(ScraperError::LookupFailure(other)),
        }
    }

    /// The letter as it appears in the index, `None` for `Unset`
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Active => Some('A'),
            Self::Deferred => Some('D'),
            Self::Final => Some('F'),
            Self::Provisional => Some('P'),
            Self::Rejected => Some('R'),
            Self::Superseded => Some('S'),
            Self::Withdrawn => Some('W'),
            Self::Unset => None,
        }
    }

    /// Labels a PEP page may show for this code
    pub fn accepted_labels(&self) -> &'static [&'static str] {
        match self {
            Self::Active => &["Active", "Accepted"],
            Self::Deferred => &["Deferred"],
            Self::Final => &["Final"],
            Self::Provisional => &["Provisional"],
            Self::Rejected => &["Rejected"],
            Self::Superseded => &["Superseded"],
            Self::Withdrawn => &["Withdrawn"],
            Self::Unset => &["Draft", "Active"],
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "''"),
        }
    }
}

/// Accepted labels for a status letter
pub fn lookup(code: char) -> Result<&'static [&'static str]> {
    Ok(StatusCode::from_char(code)?.accepted_labels())
}
