//! List command - show your day-off requests

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use serde::Serialize;

use exceptional_core::domain::quota;
use exceptional_core::DayOffRequest;

use super::{get_context, require_login};
use crate::output::{create_table, spinner, status_cell};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput {
    remaining: u32,
    day_offs: Vec<DayOffRequest>,
}

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let pb = spinner("Loading day offs");
    let result = ctx.day_off_service.load_mine().await;
    pb.finish_and_clear();
    let day_offs = result?;

    let remaining = ctx.day_off_service.remaining();

    if json {
        let out = ListOutput {
            remaining,
            day_offs,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match ctx.session.user() {
        Some(user) => println!("{}", format!("Day offs for {}", user.name).bold()),
        None => println!("{}", "Day offs".bold()),
    }
    println!();

    if day_offs.is_empty() {
        println!(
            "{}",
            "No day-off requests yet. Use 'exc request <date>' to add one.".yellow()
        );
    } else {
        let mut table = create_table();
        table.set_header(vec!["ID", "Date", "Status", "Requested"]);
        for day_off in &day_offs {
            table.add_row(vec![
                Cell::new(&day_off.id),
                Cell::new(day_off.date.to_string()),
                status_cell(day_off.status),
                Cell::new(day_off.created_at.format("%Y-%m-%d").to_string()),
            ]);
        }
        println!("{}", table);
    }

    println!();
    println!("Remaining: {} of {}", remaining, quota::MAX_REQUESTS);

    Ok(())
}
