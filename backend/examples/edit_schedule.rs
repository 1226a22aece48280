//! Example: load a schedule, add slots with default LST windows, and print
//! the project's slot groups.
//!
//! ```bash
//! cargo run --example edit_schedule -- schedule.json C3132
//! ```
//!
//! Without arguments a small in-memory schedule is used.

use std::env;

use anyhow::{Context, Result};

use atsched::models::{load_schedule_file, Project, Schedule, Telescope};
use atsched::services::editor::{add_slot, SlotRequest};
use atsched::services::{summarize_groups, ScheduleHistory};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (schedule, ident) = match args.as_slice() {
        [path, ident, ..] => (load_schedule_file(path)?, ident.clone()),
        _ => {
            let mut schedule = Schedule::new("2025OCT", Telescope::Atca);
            schedule.projects.push(Project::new("C3132"));
            (schedule, "C3132".to_string())
        }
    };

    let site = schedule.observatory();
    println!(
        "Schedule {} at {} (lat {:.3}, elevation limit {})",
        schedule.term,
        site.name,
        site.latitude.value(),
        site.elevation_limit.value()
    );

    let mut history = ScheduleHistory::new(schedule);
    let targets = [
        ("1934-638", "19:39:25.03", "-63:42:45.6"),
        ("0823-500", "08:25:26.87", "-50:10:38.5"),
        ("crab", "05:34:32", "+22:00:48"),
    ];

    for (source, ra, dec) in targets {
        let request = SlotRequest {
            source: source.to_string(),
            ra: ra.to_string(),
            dec: dec.to_string(),
            requested_duration: 2.0,
            array: "6A".to_string(),
            bandwidth: "CFB1M".to_string(),
            bands: vec!["4cm".to_string()],
            ..Default::default()
        };
        let (next, added) = history
            .apply(|s| add_slot(s, &ident, &request, &site, 2))
            .with_context(|| format!("Failed to add {}", source))?;
        println!("Added {} at indices {:?}", source, added);
        history = next;
    }

    let project = history
        .current()
        .project(&ident)
        .with_context(|| format!("Project {} not found", ident))?;
    println!("\n{:<12} {:>6} {:>6} {:>5} {:>9}", "source", "start", "end", "count", "scheduled");
    for row in summarize_groups(&project.slots) {
        println!(
            "{:<12} {:>6} {:>6} {:>5} {:>9}",
            row.representative.source,
            row.representative.lst_start,
            row.representative.lst_end,
            row.count,
            row.scheduled_count
        );
    }

    Ok(())
}
