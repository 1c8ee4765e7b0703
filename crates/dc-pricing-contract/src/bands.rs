// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Band labels used as keys in factor and scale tables
//!
//! A band is either a closed range `"<lo>-<hi>"` or an open-ended
//! `"<lo>+"`, both over non-negative integers.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Range { lo: u64, hi: u64 },
    AtLeast(u64),
}

impl Band {
    pub fn lower(&self) -> u64 {
        match self {
            Band::Range { lo, .. } | Band::AtLeast(lo) => *lo,
        }
    }

    /// Inclusive upper bound, `None` when open-ended
    pub fn upper(&self) -> Option<u64> {
        match self {
            Band::Range { hi, .. } => Some(*hi),
            Band::AtLeast(_) => None,
        }
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(lo) = s.strip_suffix('+') {
            return parse_bound(lo).map(Band::AtLeast);
        }

        let (lo, hi) = s
            .split_once('-')
            .ok_or_else(|| "expected '<lo>-<hi>' or '<lo>+'".to_string())?;
        let lo = parse_bound(lo)?;
        let hi = parse_bound(hi)?;
        if lo > hi {
            return Err(format!("lower bound {} exceeds upper bound {}", lo, hi));
        }
        Ok(Band::Range { lo, hi })
    }
}

fn parse_bound(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' is not a non-negative integer", raw));
    }
    raw.parse::<u64>().map_err(|e| format!("'{}': {}", raw, e))
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Range { lo, hi } => write!(f, "{}-{}", lo, hi),
            Band::AtLeast(lo) => write!(f, "{}+", lo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_closed_and_open_bands() {
        assert_eq!(
            "20001-50000".parse::<Band>().unwrap(),
            Band::Range {
                lo: 20001,
                hi: 50000
            }
        );
        assert_eq!("33+".parse::<Band>().unwrap(), Band::AtLeast(33));
        assert_eq!("0-4".parse::<Band>().unwrap().upper(), Some(4));
        assert_eq!("100000+".parse::<Band>().unwrap().upper(), None);
        assert_eq!("100000+".parse::<Band>().unwrap().lower(), 100000);
    }

    #[test]
    fn display_matches_label() {
        for label in ["0-20000", "100000+", "17-32"] {
            assert_eq!(label.parse::<Band>().unwrap().to_string(), label);
        }
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "abc", "10-", "-5", "5-3", "1.5-2", "+", "-1+", "0-20k"] {
            assert!(label.parse::<Band>().is_err(), "{label} should not parse");
        }
    }
}
