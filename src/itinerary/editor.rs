//! Copy-on-write edits over a day plan list.
//!
//! Every operation clones the input and returns the edited copy; the caller's
//! list is never touched. Days are addressed by `day_number`, activities by
//! their zero-based index within the day.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::itinerary::{Activity, DayPlan};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("day {0} not found in itinerary")]
    UnknownDay(u32),
    #[error("activity index {index} out of range for day {day} ({len} activities)")]
    IndexOutOfRange { day: u32, index: usize, len: usize },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub duration_label: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ItineraryEdit {
    #[serde(rename_all = "camelCase")]
    Reorder {
        day: u32,
        from_index: usize,
        to_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    Move {
        source_day: u32,
        source_index: usize,
        dest_day: u32,
        dest_index: usize,
    },
    Add { day: u32 },
    Remove { day: u32, index: usize },
    Update {
        day: u32,
        index: usize,
        patch: ActivityPatch,
    },
}

pub fn apply_edit(days: &[DayPlan], edit: &ItineraryEdit) -> Result<Vec<DayPlan>, EditError> {
    match edit {
        ItineraryEdit::Reorder {
            day,
            from_index,
            to_index,
        } => reorder_within_day(days, *day, *from_index, *to_index),
        ItineraryEdit::Move {
            source_day,
            source_index,
            dest_day,
            dest_index,
        } => move_between_days(days, *source_day, *source_index, *dest_day, *dest_index),
        ItineraryEdit::Add { day } => add_activity(days, *day),
        ItineraryEdit::Remove { day, index } => remove_activity(days, *day, *index),
        ItineraryEdit::Update { day, index, patch } => {
            update_activity(days, *day, *index, patch)
        }
    }
}

// Target indexes past the end are clamped.
pub fn reorder_within_day(
    days: &[DayPlan],
    day: u32,
    from_index: usize,
    to_index: usize,
) -> Result<Vec<DayPlan>, EditError> {
    let mut out = days.to_vec();
    let plan = day_mut(&mut out, day)?;
    check_index(plan, from_index)?;
    let activity = plan.activities.remove(from_index);
    let target = to_index.min(plan.activities.len());
    plan.activities.insert(target, activity);
    Ok(out)
}

pub fn move_between_days(
    days: &[DayPlan],
    source_day: u32,
    source_index: usize,
    dest_day: u32,
    dest_index: usize,
) -> Result<Vec<DayPlan>, EditError> {
    let mut out = days.to_vec();
    day_mut(&mut out, dest_day)?;
    let source = day_mut(&mut out, source_day)?;
    check_index(source, source_index)?;
    let activity = source.activities.remove(source_index);

    let dest = day_mut(&mut out, dest_day)?;
    let target = dest_index.min(dest.activities.len());
    dest.activities.insert(target, activity);
    Ok(out)
}

pub fn add_activity(days: &[DayPlan], day: u32) -> Result<Vec<DayPlan>, EditError> {
    let mut out = days.to_vec();
    let id = next_custom_id(&out, day);
    let plan = day_mut(&mut out, day)?;
    plan.activities.push(Activity {
        id,
        name: "New Activity".to_string(),
        duration_label: "1 hour".to_string(),
        location: String::new(),
        category: "custom".to_string(),
    });
    Ok(out)
}

pub fn remove_activity(
    days: &[DayPlan],
    day: u32,
    index: usize,
) -> Result<Vec<DayPlan>, EditError> {
    let mut out = days.to_vec();
    let plan = day_mut(&mut out, day)?;
    check_index(plan, index)?;
    plan.activities.remove(index);
    Ok(out)
}

pub fn update_activity(
    days: &[DayPlan],
    day: u32,
    index: usize,
    patch: &ActivityPatch,
) -> Result<Vec<DayPlan>, EditError> {
    let mut out = days.to_vec();
    let plan = day_mut(&mut out, day)?;
    check_index(plan, index)?;
    let activity = &mut plan.activities[index];
    if let Some(name) = &patch.name {
        activity.name = name.clone();
    }
    if let Some(duration_label) = &patch.duration_label {
        activity.duration_label = duration_label.clone();
    }
    if let Some(location) = &patch.location {
        activity.location = location.clone();
    }
    if let Some(category) = &patch.category {
        activity.category = category.clone();
    }
    Ok(out)
}

fn day_mut(days: &mut [DayPlan], day: u32) -> Result<&mut DayPlan, EditError> {
    days.iter_mut()
        .find(|d| d.day_number == day)
        .ok_or(EditError::UnknownDay(day))
}

fn check_index(plan: &DayPlan, index: usize) -> Result<(), EditError> {
    if index < plan.activities.len() {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange {
            day: plan.day_number,
            index,
            len: plan.activities.len(),
        })
    }
}

fn next_custom_id(days: &[DayPlan], day: u32) -> String {
    let mut counter = 1usize;
    loop {
        let candidate = format!("day-{day}-custom-{counter}");
        let taken = days
            .iter()
            .flat_map(|d| d.activities.iter())
            .any(|a| a.id == candidate);
        if !taken {
            return candidate;
        }
        counter += 1;
    }
}
