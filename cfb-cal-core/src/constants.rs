use chrono::Duration;

/// Estimated length of a game; kickoff is published, the final whistle isn't.
pub fn game_duration() -> Duration {
    Duration::hours(3)
}

/// Namespace appended to every event UID.
pub const UID_DOMAIN: &str = "cfb-cal";

pub const PRODID: &str = "-//cfb-cal//College Football Schedule//EN";

/// File stem shared by every published calendar (`cfb_<scope>.ics`).
pub const FILE_PREFIX: &str = "cfb_";

pub const DEFAULT_CALENDAR_NAME: &str = "CFB Schedule";

pub const DEFAULT_REMINDER_MINUTES: u32 = 60;

/// Environment variable holding the College Football Data API key.
pub const API_KEY_ENV: &str = "CFBD_API_KEY";

pub const CFBD_BASE_URL: &str = "https://api.collegefootballdata.com";
