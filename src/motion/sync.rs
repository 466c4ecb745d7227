//! Putting independently planned axes on a common timeline.

use crate::trajectory::Trajectory;

use super::axis::AxisTracker;

/// Index of the longest trajectory; the first one wins ties.
fn leader_index(durations: impl Iterator<Item = i32>) -> Option<usize> {
    durations
        .enumerate()
        .fold(None, |best: Option<(usize, i32)>, (i, d)| match best {
            Some((_, longest)) if longest >= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Stretch every trajectory onto the timeline of the longest one.
///
/// All trajectories end up with the same segment durations while keeping
/// their own start time and displacement. Empty and single-element slices
/// are left alone.
pub fn synchronize(trajectories: &mut [Trajectory]) {
    let Some(lead) = leader_index(trajectories.iter().map(Trajectory::duration)) else {
        return;
    };
    let leader = trajectories[lead];
    debug!("synchronizing {} axes onto a {} us leader", trajectories.len(), leader.duration());

    for (i, trj) in trajectories.iter_mut().enumerate() {
        if i != lead {
            trj.stretch(&leader);
        }
    }
}

/// Stretch the live trajectories of several axes onto the longest one.
pub fn synchronize_axes(axes: &mut [AxisTracker]) {
    let Some(lead) = leader_index(axes.iter().map(AxisTracker::duration)) else {
        return;
    };
    let leader = *axes[lead].trajectory();

    for (i, axis) in axes.iter_mut().enumerate() {
        if i != lead {
            axis.stretch_to(&leader);
        }
    }
}
