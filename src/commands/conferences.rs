use anyhow::Result;
use cfb_cal_core::conferences::FBS_CONFERENCES;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run() -> Result<()> {
    for conference in FBS_CONFERENCES {
        println!("{}", conference.render());
    }
    println!(
        "\n{}",
        "Track one with `cfb-cal track --conference <abbreviation>`".dimmed()
    );
    Ok(())
}
