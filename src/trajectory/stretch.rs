//! Re-timing a trajectory onto another trajectory's segment boundaries.

use super::fixed::{saturate, scaled_product, scaled_quadratic, EXT_PER_COUNT, US_PER_SECOND};
use super::Trajectory;

impl Trajectory {
    /// Adopt the segment durations of `leader`, keeping `t0`, `th0`, `w0`,
    /// `th3` and the total displacement.
    ///
    /// The cruise speed follows from the displacement, and both ramp
    /// accelerations follow from the cruise speed. A leader of zero duration
    /// leaves the trajectory untouched.
    pub fn stretch(&mut self, leader: &Trajectory) {
        let [d10, d21, d32] = leader.segment_durations();
        let t10 = d10 as i64;
        let t20 = t10 + d21 as i64;
        let t30 = t20 + d32 as i64;
        let t32 = d32 as i64;

        if t30 == 0 {
            return;
        }

        let w0 = self.w0 as i64;
        let w3 = self.w3 as i64;

        // Area under the speed profile equals the displacement:
        // 2·Δθ = w0·t10 + w1·(t30 + t20 - t10) + w3·t32
        let twice_distance = 2 * self.displacement().millicounts() as i128 * EXT_PER_COUNT as i128;
        let num = twice_distance - w0 as i128 * t10 as i128 - w3 as i128 * t32 as i128;
        let w1 = (num / (t30 + t20 - t10) as i128).clamp(i32::MIN as i128, i32::MAX as i128) as i32;

        let a0 = if t10 == 0 {
            0
        } else {
            saturate((w1 as i64 - w0) * US_PER_SECOND / t10)
        };
        let a2 = if t32 == 0 {
            0
        } else {
            saturate((w3 - w1 as i64) * US_PER_SECOND / t32)
        };

        trace!("stretch: w1 {} -> {}", self.w1, w1);

        self.t1 = self.t0.wrapping_add(d10);
        self.t2 = self.t1.wrapping_add(d21);
        self.t3 = self.t2.wrapping_add(d32);
        self.w1 = w1;
        self.a0 = a0;
        self.a2 = a2;
        if t32 == 0 {
            // No final ramp: the maneuver ends at cruise speed.
            self.w3 = w1;
        }

        // Ramps are rebuilt from both ends so th3 stays put; the truncated
        // cruise speed leaves its difference to the cruise segment.
        self.th1 = self.th0 + scaled_product(self.w0, d10) + scaled_quadratic(a0, d10);
        self.th2 = self.th3 - scaled_product(w1, d32) - scaled_quadratic(a2, d32);
        self.close_cruise();
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Angle, TrajectoryCommand};
    use super::*;

    fn to_angle(target: i32) -> Trajectory {
        let cmd = TrajectoryCommand::builder()
            .target(target)
            .speed(500)
            .speed_max(1000)
            .ramps(2000, 2000)
            .build();
        Trajectory::new_angle_command(&cmd).unwrap()
    }

    #[test]
    fn test_stretch_onto_longer_leader() {
        let leader = to_angle(1000);
        let mut trj = to_angle(500);
        trj.stretch(&leader);

        assert_eq!(trj.segment_durations(), leader.segment_durations());
        assert_eq!(trj.w1, 250);
        assert_eq!((trj.a0, trj.a2), (1000, -1000));
        assert_eq!(trj.th1, Angle::from_millicounts(31_250));
        assert_eq!(trj.th2, Angle::from_millicounts(468_750));
        assert_eq!(trj.th3, Angle::from_counts(500));
    }

    fn assert_knots_reproduced(trj: &Trajectory) {
        assert_eq!(trj.reference(trj.t1).angle, trj.th1);
        assert_eq!(trj.reference(trj.t2).angle, trj.th2);
        assert_eq!(trj.reference(trj.t3).angle, trj.th3);
    }

    #[test]
    fn test_stretch_with_truncated_cruise_speed() {
        // 33 333 counts over a 100 s leader cruises at 333.33 counts/s.
        let leader = Trajectory::new_angle_command(
            &TrajectoryCommand::builder()
                .target(100_000)
                .speed(1000)
                .speed_max(1000)
                .ramps(2000, 2000)
                .build(),
        )
        .unwrap();
        let mut trj = to_angle(33_333);
        trj.stretch(&leader);

        assert_eq!(trj.w1, 333);
        assert_eq!(trj.th3, Angle::from_counts(33_333));
        assert_knots_reproduced(&trj);

        let before = trj.reference(trj.t3 - 1).angle;
        assert!((trj.th3 - before).millicounts() <= 1);
    }

    #[test]
    fn test_stretch_onto_triangle_leader() {
        let leader = Trajectory::new_time_command(
            &TrajectoryCommand::builder()
                .duration(800_000)
                .speed(1000)
                .speed_max(1000)
                .ramps(2000, 2000)
                .build(),
        )
        .unwrap();
        assert_eq!(leader.t1, leader.t2);

        let mut trj = to_angle(77);
        trj.stretch(&leader);

        assert_eq!(trj.segment_durations(), leader.segment_durations());
        assert_eq!(trj.th1, trj.th2);
        assert_knots_reproduced(&trj);
    }

    #[test]
    fn test_stretch_zero_duration_leader_is_noop() {
        let leader = Trajectory::constant(0, Angle::ZERO, 0, false);
        let mut trj = to_angle(500);
        let before = trj;
        trj.stretch(&leader);
        assert_eq!(trj, before);
    }

    #[test]
    fn test_stretch_keeps_own_start_time() {
        let leader = to_angle(1000);
        let mut trj = to_angle(500);
        trj.t0 = 1000;
        trj.t1 += 1000;
        trj.t2 += 1000;
        trj.t3 += 1000;
        trj.stretch(&leader);

        assert_eq!(trj.t0, 1000);
        assert_eq!(trj.t3, 1000 + leader.t3);
    }
}
