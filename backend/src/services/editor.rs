//! Editing operations on a schedule.
//!
//! Every operation takes the schedule by mutable reference and either applies
//! the whole change or returns an error. They are meant to run inside
//! [`EditHistory::apply`](super::history::EditHistory::apply), which keeps the
//! previous schedule for undo and discards the copy when an edit fails.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::astro::sexagesimal::parse_hours;
use crate::astro::visibility::compute_default_window;
use crate::error::{EditError, EditResult};
use crate::models::{ObservationSlot, Observatory, Position, Project, Schedule, SlotKey};

/// Slot fields as entered in the "add slot" form.
///
/// `lst_start` and `lst_end` may both be left blank, in which case the window
/// is derived from the target's rise and set at the observatory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotRequest {
    pub source: String,
    pub ra: String,
    pub dec: String,
    #[serde(default)]
    pub lst_start: String,
    #[serde(default)]
    pub lst_end: String,
    pub requested_duration: f64,
    pub array: String,
    pub bandwidth: String,
    #[serde(default)]
    pub bands: Vec<String>,
}

impl SlotRequest {
    /// Validate the request and turn it into slot key fields.
    pub fn resolve(&self, observatory: &Observatory) -> EditResult<SlotKey> {
        let source = self.source.trim();
        if source.is_empty() {
            return Err(EditError::InvalidRequest("source name is empty".to_string()));
        }
        if !self.requested_duration.is_finite() || self.requested_duration <= 0.0 {
            return Err(EditError::InvalidRequest(format!(
                "requested duration must be a positive number of hours, got {}",
                self.requested_duration
            )));
        }

        let position = Position::new(self.ra.trim(), self.dec.trim());
        position.to_angles()?;

        let (lst_start, lst_end) = match (self.lst_start.trim(), self.lst_end.trim()) {
            ("", "") => {
                let window = compute_default_window(&position.ra, &position.dec, observatory)?;
                debug!(
                    "no LST window given for {}, using {}-{}",
                    source, window.lst_start, window.lst_end
                );
                (window.lst_start, window.lst_end)
            }
            (start, end) if start.is_empty() || end.is_empty() => {
                return Err(EditError::IncompleteLstWindow {
                    start: start.to_string(),
                    end: end.to_string(),
                })
            }
            (start, end) => {
                parse_hours(start)?;
                parse_hours(end)?;
                (start.to_string(), end.to_string())
            }
        };

        Ok(SlotKey {
            source: source.to_string(),
            position,
            lst_start,
            lst_end,
            requested_duration: self.requested_duration,
            array: self.array.trim().to_string(),
            bandwidth: self.bandwidth.trim().to_string(),
            bands: self.bands.iter().map(|b| b.trim().to_string()).collect(),
        })
    }
}

fn project_mut<'a>(schedule: &'a mut Schedule, ident: &str) -> EditResult<&'a mut Project> {
    schedule
        .project_mut(ident)
        .ok_or_else(|| EditError::ProjectNotFound(ident.to_string()))
}

/// Sorted, de-duplicated copy of `indices`, checked against the project's slots.
fn checked_indices(project: &Project, indices: &[usize]) -> EditResult<Vec<usize>> {
    if indices.is_empty() {
        return Err(EditError::EmptySelection);
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let len = project.slots.len();
    if let Some(&index) = sorted.iter().find(|&&i| i >= len) {
        return Err(EditError::SlotIndexOutOfRange {
            ident: project.ident.clone(),
            index,
            len,
        });
    }
    Ok(sorted)
}

/// Add a new project to the schedule.
pub fn add_project(schedule: &mut Schedule, project: Project) -> EditResult<()> {
    if schedule.project(&project.ident).is_some() {
        return Err(EditError::DuplicateProject(project.ident));
    }
    debug!("adding project {} to {}", project.ident, schedule.term);
    schedule.projects.push(project);
    Ok(())
}

/// Remove a project and return it.
pub fn remove_project(schedule: &mut Schedule, ident: &str) -> EditResult<Project> {
    let position = schedule
        .projects
        .iter()
        .position(|p| p.ident == ident)
        .ok_or_else(|| EditError::ProjectNotFound(ident.to_string()))?;
    debug!("removing project {} from {}", ident, schedule.term);
    Ok(schedule.projects.remove(position))
}

/// Append `repeats` identical slots built from `request`.
///
/// Returns the indices of the new slots.
pub fn add_slot(
    schedule: &mut Schedule,
    ident: &str,
    request: &SlotRequest,
    observatory: &Observatory,
    repeats: usize,
) -> EditResult<Vec<usize>> {
    if repeats == 0 {
        return Err(EditError::InvalidRequest(
            "at least one slot must be requested".to_string(),
        ));
    }
    let key = request.resolve(observatory)?;
    let project = project_mut(schedule, ident)?;

    let first = project.slots.len();
    project
        .slots
        .extend(std::iter::repeat_with(|| key.to_slot()).take(repeats));
    debug!(
        "added {} x {} to project {} (lst {}-{})",
        repeats, key.source, ident, key.lst_start, key.lst_end
    );
    Ok((first..first + repeats).collect())
}

/// Rewrite the key fields of every slot in `indices`.
///
/// Scheduling outcomes are left as they are.
pub fn update_group(
    schedule: &mut Schedule,
    ident: &str,
    indices: &[usize],
    request: &SlotRequest,
    observatory: &Observatory,
) -> EditResult<()> {
    let key = request.resolve(observatory)?;
    let project = project_mut(schedule, ident)?;
    let indices = checked_indices(project, indices)?;

    for &index in &indices {
        key.apply_to(&mut project.slots[index]);
    }
    debug!("updated {} slots of project {}", indices.len(), ident);
    Ok(())
}

/// Grow or shrink a group of identical slots to `size` members.
///
/// Growing appends unscheduled copies of the group's first member. Shrinking
/// removes members from the end of the group, skipping scheduled ones; if
/// that is not enough the edit fails with [`EditError::WouldDropScheduledSlot`].
pub fn set_group_size(
    schedule: &mut Schedule,
    ident: &str,
    indices: &[usize],
    size: usize,
) -> EditResult<()> {
    if size == 0 {
        return Err(EditError::InvalidRequest(
            "a group needs at least one slot; remove the slots instead".to_string(),
        ));
    }
    let project = project_mut(schedule, ident)?;
    let indices = checked_indices(project, indices)?;
    let current = indices.len();

    if size > current {
        let key = SlotKey::from(&project.slots[indices[0]]);
        project
            .slots
            .extend(std::iter::repeat_with(|| key.to_slot()).take(size - current));
    } else if size < current {
        let excess = current - size;
        let removable: Vec<usize> = indices
            .iter()
            .rev()
            .copied()
            .filter(|&i| !project.slots[i].scheduled)
            .take(excess)
            .collect();
        if removable.len() < excess {
            let blocked = indices
                .iter()
                .rev()
                .copied()
                .find(|&i| project.slots[i].scheduled && !removable.contains(&i))
                .unwrap_or(indices[0]);
            return Err(EditError::WouldDropScheduledSlot {
                ident: ident.to_string(),
                index: blocked,
            });
        }
        // `removable` is descending, so earlier removals never shift later ones
        for index in removable {
            project.slots.remove(index);
        }
    }
    debug!(
        "resized group in project {} from {} to {}",
        ident, current, size
    );
    Ok(())
}

/// Remove the slots at `indices` and return them in ascending index order.
pub fn remove_slots(
    schedule: &mut Schedule,
    ident: &str,
    indices: &[usize],
) -> EditResult<Vec<ObservationSlot>> {
    let project = project_mut(schedule, ident)?;
    let indices = checked_indices(project, indices)?;

    let mut removed: Vec<ObservationSlot> = indices
        .iter()
        .rev()
        .map(|&i| project.slots.remove(i))
        .collect();
    removed.reverse();
    debug!("removed {} slots from project {}", removed.len(), ident);
    Ok(removed)
}

/// Place a slot on the timeline.
pub fn assign_slot(
    schedule: &mut Schedule,
    ident: &str,
    index: usize,
    start_epoch: i64,
    duration_hours: f64,
) -> EditResult<()> {
    if !duration_hours.is_finite() || duration_hours <= 0.0 {
        return Err(EditError::InvalidRequest(format!(
            "scheduled duration must be a positive number of hours, got {}",
            duration_hours
        )));
    }
    let project = project_mut(schedule, ident)?;
    let index = checked_indices(project, &[index])?[0];

    let slot = &mut project.slots[index];
    slot.scheduled = true;
    slot.scheduled_start = start_epoch;
    slot.scheduled_duration = duration_hours;
    debug!(
        "assigned {} slot {} at {} for {}h",
        ident, index, start_epoch, duration_hours
    );
    Ok(())
}

/// Take a slot off the timeline.
pub fn unassign_slot(schedule: &mut Schedule, ident: &str, index: usize) -> EditResult<()> {
    let project = project_mut(schedule, ident)?;
    let index = checked_indices(project, &[index])?[0];
    project.slots[index].unschedule();
    Ok(())
}
