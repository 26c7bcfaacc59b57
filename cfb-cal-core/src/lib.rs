//! Core library for cfb-cal.
//!
//! Fetches college-football schedules from the College Football Data API and
//! publishes them as iCalendar subscription files:
//! - `provider` talks to the API and produces validated `GameRecord`s
//! - `mapper` turns each game into a `CalendarEvent` with a stable UID
//! - `calendar` assembles events into documents and writes them out
//! - `config` holds the persisted tracking selection and output options
//! - `sync` ties the above together

pub mod calendar;
pub mod conferences;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod game;
pub mod ics;
pub mod mapper;
pub mod provider;
pub mod sync;
pub mod utils;

pub use error::{CfbError, CfbResult};
