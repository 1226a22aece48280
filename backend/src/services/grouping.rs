//! Grouping of identical slot requests.
//!
//! Projects often ask for the same observation several times (same source,
//! window, array and bands). For display and editing those slots are collapsed
//! into one [`SlotGroup`] that remembers which slot indices it stands for.

use serde::{Deserialize, Serialize};

use crate::models::{ObservationSlot, SlotKey};

/// Slots of one project sharing identical key fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotGroup {
    /// Key fields of the first slot seen with this key
    pub representative: SlotKey,
    /// Positions of the member slots in the project's slot list, ascending
    pub indices: Vec<usize>,
}

impl SlotGroup {
    fn start(slot: &ObservationSlot, index: usize) -> Self {
        Self {
            representative: SlotKey::from(slot),
            indices: vec![index],
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the member slots of this group within `slots`.
    ///
    /// Indices past the end of `slots` are skipped.
    pub fn members<'a>(
        &'a self,
        slots: &'a [ObservationSlot],
    ) -> impl Iterator<Item = &'a ObservationSlot> + 'a {
        self.indices.iter().filter_map(move |&i| slots.get(i))
    }
}

/// Partition `slots` into groups of identical key fields.
///
/// Groups appear in order of their first member and each group's indices are
/// ascending. Every index in `0..slots.len()` lands in exactly one group.
///
/// # Examples
///
/// ```
/// use atsched::models::{ObservationSlot, Position};
/// use atsched::services::grouping::group_slots;
///
/// let slot = |source: &str| ObservationSlot {
///     source: source.to_string(),
///     position: Position::new("05:34:32", "+22:00:48"),
///     lst_start: "01:42".to_string(),
///     lst_end: "09:26".to_string(),
///     requested_duration: 4.0,
///     array: "6A".to_string(),
///     bandwidth: "CFB1M".to_string(),
///     bands: vec!["4cm".to_string()],
///     scheduled: false,
///     scheduled_duration: 0.0,
///     scheduled_start: 0,
/// };
///
/// let groups = group_slots(&[slot("A"), slot("B"), slot("A")]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].indices, vec![0, 2]);
/// assert_eq!(groups[1].indices, vec![1]);
/// ```
pub fn group_slots(slots: &[ObservationSlot]) -> Vec<SlotGroup> {
    slots
        .iter()
        .enumerate()
        .fold(Vec::new(), |mut groups: Vec<SlotGroup>, (index, slot)| {
            match groups
                .iter_mut()
                .find(|group| group.representative.matches(slot))
            {
                Some(group) => group.indices.push(index),
                None => groups.push(SlotGroup::start(slot, index)),
            }
            groups
        })
}

/// One display row per slot group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    #[serde(flatten)]
    pub representative: SlotKey,
    /// Number of member slots
    pub count: usize,
    /// Number of member slots already placed on the timeline
    pub scheduled_count: usize,
    pub indices: Vec<usize>,
}

/// Group `slots` and summarize each group for display.
pub fn summarize_groups(slots: &[ObservationSlot]) -> Vec<GroupSummary> {
    group_slots(slots)
        .into_iter()
        .map(|group| {
            let scheduled_count = group.members(slots).filter(|s| s.scheduled).count();
            GroupSummary {
                count: group.len(),
                scheduled_count,
                representative: group.representative,
                indices: group.indices,
            }
        })
        .collect()
}
