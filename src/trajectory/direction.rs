//! Mapping backward maneuvers onto forward ones.

use super::Trajectory;

impl Trajectory {
    /// Mirror every angle knot about `th0` and negate speeds and accelerations.
    ///
    /// A forward solution of the flipped command becomes the solution of the
    /// backward command as given. Applying it twice restores the trajectory.
    pub fn reverse(&mut self) {
        self.th1 = self.th1.mirror(self.th0);
        self.th2 = self.th2.mirror(self.th0);
        self.th3 = self.th3.mirror(self.th0);

        self.w0 = self.w0.saturating_neg();
        self.w1 = self.w1.saturating_neg();
        self.w3 = self.w3.saturating_neg();
        self.a0 = self.a0.saturating_neg();
        self.a2 = self.a2.saturating_neg();
    }

    /// Reversed copy of this trajectory.
    pub fn reversed(mut self) -> Self {
        self.reverse();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::super::Angle;
    use super::*;

    fn sample() -> Trajectory {
        Trajectory {
            t0: 0,
            t1: 100,
            t2: 300,
            t3: 400,
            th0: Angle::from_parts(10, 500),
            th1: Angle::from_parts(12, 0),
            th2: Angle::from_parts(20, 250),
            th3: Angle::from_parts(21, 0),
            w0: 5,
            w1: 40,
            w3: 0,
            a0: 350,
            a2: -400,
        }
    }

    #[test]
    fn test_reverse_mirrors_about_start() {
        let trj = sample().reversed();
        assert_eq!(trj.th0, Angle::from_parts(10, 500));
        assert_eq!(trj.th1, Angle::from_parts(9, 0));
        assert_eq!(trj.th3, Angle::from_parts(0, 0));
        assert_eq!((trj.w0, trj.w1, trj.w3), (-5, -40, 0));
        assert_eq!((trj.a0, trj.a2), (-350, 400));
        assert_eq!((trj.t0, trj.t1, trj.t2, trj.t3), (0, 100, 300, 400));
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        assert_eq!(sample().reversed().reversed(), sample());
    }
}
