//! FBS conference table and name resolution.

use crate::error::{CfbError, CfbResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conference {
    /// Abbreviation the provider accepts as a query filter.
    pub abbreviation: &'static str,
    /// Name the provider reports on game records.
    pub short_name: &'static str,
    pub full_name: &'static str,
}

pub const FBS_CONFERENCES: &[Conference] = &[
    Conference { abbreviation: "AAC", short_name: "American Athletic", full_name: "American Athletic Conference" },
    Conference { abbreviation: "ACC", short_name: "ACC", full_name: "Atlantic Coast Conference" },
    Conference { abbreviation: "B12", short_name: "Big 12", full_name: "Big 12 Conference" },
    Conference { abbreviation: "B1G", short_name: "Big Ten", full_name: "Big Ten Conference" },
    Conference { abbreviation: "CUSA", short_name: "Conference USA", full_name: "Conference USA" },
    Conference { abbreviation: "IND", short_name: "FBS Independents", full_name: "FBS Independents" },
    Conference { abbreviation: "MAC", short_name: "Mid-American", full_name: "Mid-American Conference" },
    Conference { abbreviation: "MWC", short_name: "Mountain West", full_name: "Mountain West Conference" },
    Conference { abbreviation: "PAC", short_name: "Pac-12", full_name: "Pac-12 Conference" },
    Conference { abbreviation: "SBC", short_name: "Sun Belt", full_name: "Sun Belt Conference" },
    Conference { abbreviation: "SEC", short_name: "SEC", full_name: "Southeastern Conference" },
];

impl Conference {
    fn matches_exactly(&self, name: &str) -> bool {
        [self.abbreviation, self.short_name, self.full_name]
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Resolve a user-supplied conference name.
///
/// Exact abbreviation or name first, then a substring of exactly one full name.
pub fn resolve(name: &str) -> CfbResult<&'static Conference> {
    let needle = name.trim();
    if needle.is_empty() {
        return Err(CfbError::conference_not_found(name));
    }

    if let Some(conf) = FBS_CONFERENCES.iter().find(|c| c.matches_exactly(needle)) {
        return Ok(conf);
    }

    let lowered = needle.to_lowercase();
    let mut candidates = FBS_CONFERENCES
        .iter()
        .filter(|c| c.full_name.to_lowercase().contains(&lowered));

    match (candidates.next(), candidates.next()) {
        (Some(conf), None) => Ok(conf),
        _ => Err(CfbError::conference_not_found(name)),
    }
}

/// Whether a conference name reported on a game record refers to `query`.
pub fn same_conference(reported: &str, query: &str) -> bool {
    if reported.eq_ignore_ascii_case(query) {
        return true;
    }
    match resolve(query) {
        Ok(conf) => conf.matches_exactly(reported),
        Err(_) => false,
    }
}
