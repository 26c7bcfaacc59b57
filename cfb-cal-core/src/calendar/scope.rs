use std::fmt;

use crate::constants::FILE_PREFIX;
use crate::utils::slugify;

/// What a calendar document covers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scope {
    Team(String),
    /// Keyed by conference abbreviation.
    Conference(String),
    AllFbs,
    /// The combined document holding every tracked game.
    AllTracked,
}

impl Scope {
    /// Whether this scope gets a file of its own. All-FBS games only land in
    /// the combined document.
    pub fn has_own_document(&self) -> bool {
        matches!(self, Scope::Team(_) | Scope::Conference(_))
    }

    pub fn slug(&self) -> String {
        match self {
            Scope::Team(name) | Scope::Conference(name) => slugify(name),
            Scope::AllFbs => "fbs".to_string(),
            Scope::AllTracked => "schedule".to_string(),
        }
    }

    /// `cfb_ohiostate.ics`, `cfb_sec.ics`, `cfb_schedule.ics`.
    pub fn file_name(&self) -> String {
        format!("{FILE_PREFIX}{}.ics", self.slug())
    }

    /// Calendar name written into the document. The combined document takes
    /// the user's configured name.
    pub fn document_name(&self, calendar_name: &str) -> String {
        match self {
            Scope::Team(name) | Scope::Conference(name) => format!("{name} Football Schedule"),
            Scope::AllFbs => "FBS Football Schedule".to_string(),
            Scope::AllTracked => calendar_name.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scope::Team(name) => write!(f, "team {name}"),
            Scope::Conference(abbr) => write!(f, "conference {abbr}"),
            Scope::AllFbs => write!(f, "all FBS"),
            Scope::AllTracked => write!(f, "all tracked"),
        }
    }
}
