//! Property tests for trajectory synthesis, stretching and evaluation.

use proptest::prelude::*;

use servo_trajectory::error::{Error, ErrorKind};
use servo_trajectory::trajectory::{MAX_DURATION_MS, REBASE_AFTER_US};
use servo_trajectory::{Angle, Trajectory, TrajectoryCommand};

const MAX_DURATION_US: i32 = MAX_DURATION_MS * 1000;

fn time_command() -> impl Strategy<Value = TrajectoryCommand> {
    (
        any::<i32>(),
        1..=MAX_DURATION_US,
        -20_000i32..20_000,
        -20_000i32..20_000,
        1i32..20_000,
        (1i32..200_000, 1i32..200_000),
        any::<bool>(),
    )
        .prop_map(|(start, duration, w0, wt, wmax, (acc, dec), cont)| {
            TrajectoryCommand::builder()
                .start(start, Angle::ZERO)
                .start_speed(w0)
                .duration(duration)
                .speed(wt)
                .speed_max(wmax)
                .ramps(acc, dec)
                .continue_running(cont)
                .build()
        })
}

fn angle_command() -> impl Strategy<Value = TrajectoryCommand> {
    (
        -1_000_000i32..1_000_000,
        0i32..1000,
        -1_000_000i32..1_000_000,
        -20_000i32..20_000,
        1i32..20_000,
        (100i32..200_000, 100i32..200_000),
        any::<bool>(),
    )
        .prop_map(|(start, ext, end, w0, wt, (acc, dec), cont)| {
            TrajectoryCommand::builder()
                .start(0, Angle::from_parts(start, ext))
                .start_speed(w0)
                .target(end)
                .speed(wt)
                .speed_max(20_000)
                .ramps(acc, dec)
                .continue_running(cont)
                .build()
        })
}

fn monotonic(trj: &Trajectory) -> bool {
    trj.segment_durations().iter().all(|d| *d >= 0)
}

fn fits_clock(trj: &Trajectory) -> bool {
    (0..=MAX_DURATION_US).contains(&trj.duration())
}

fn knots_reproduced(trj: &Trajectory) -> bool {
    trj.reference(trj.t0).angle == trj.th0
        && trj.reference(trj.t1).angle == trj.th1
        && trj.reference(trj.t2).angle == trj.th2
        && trj.reference(trj.t3).angle == trj.th3
}

proptest! {
    #[test]
    fn time_command_is_exact(cmd in time_command()) {
        let trj = Trajectory::new_time_command(&cmd).unwrap();

        prop_assert!(monotonic(&trj));
        prop_assert_eq!(trj.duration(), cmd.duration);
        prop_assert_eq!(trj.th0, cmd.start_angle());
    }

    #[test]
    fn time_command_reproduces_angle_knots(cmd in time_command()) {
        let trj = Trajectory::new_time_command(&cmd).unwrap();

        prop_assert_eq!(trj.reference(trj.t0).angle, trj.th0);
        prop_assert_eq!(trj.reference(trj.t1).angle, trj.th1);
        prop_assert_eq!(trj.reference(trj.t2).angle, trj.th2);
        prop_assert_eq!(trj.reference(trj.t3).angle, trj.th3);
        prop_assert_eq!(trj.reference(trj.t3.wrapping_add(1)).rate, trj.w3);
    }

    #[test]
    fn angle_command_is_exact(cmd in angle_command()) {
        // Equal counts is a stationary command at the exact start angle.
        prop_assume!(cmd.angle_end != cmd.angle_start);

        match Trajectory::new_angle_command(&cmd) {
            Ok(trj) => {
                prop_assert!(monotonic(&trj));
                prop_assert!(fits_clock(&trj));
                prop_assert_eq!(trj.th0, Angle::from_counts(cmd.angle_start));
                prop_assert_eq!(trj.th3, Angle::from_counts(cmd.angle_end));
                prop_assert_eq!(trj.displacement(), Angle::from_counts(cmd.angle_end - cmd.angle_start));
                prop_assert!(knots_reproduced(&trj), "{:?}", trj);

                let end = trj.reference(trj.t3.wrapping_add(1));
                if trj.w3 == 0 {
                    prop_assert_eq!(end.angle, trj.th3);
                }
            }
            Err(Error::Trajectory(e)) => prop_assert_eq!(e.kind(), ErrorKind::InvalidArgument),
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }

    #[test]
    fn wide_commands_never_fail(
        w0 in any::<i32>(),
        wt in any::<i32>(),
        wmax in any::<i32>(),
        acc in 1..=i32::MAX,
        dec in 1..=i32::MAX,
        duration in 1..=MAX_DURATION_US,
        end in any::<i32>(),
        cont in any::<bool>(),
    ) {
        let cmd = TrajectoryCommand::builder()
            .start_speed(w0)
            .duration(duration)
            .target(end)
            .speed(wt)
            .speed_max(wmax)
            .ramps(acc, dec)
            .continue_running(cont)
            .build();

        let trj = Trajectory::new_time_command(&cmd).unwrap();
        prop_assert!(monotonic(&trj));
        prop_assert!(fits_clock(&trj));

        match Trajectory::new_angle_command(&cmd) {
            Ok(trj) => {
                prop_assert!(monotonic(&trj));
                prop_assert!(fits_clock(&trj));
                prop_assert!(knots_reproduced(&trj), "{:?}", trj);
            }
            Err(Error::Trajectory(e)) => prop_assert_eq!(e.kind(), ErrorKind::InvalidArgument),
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }

    #[test]
    fn reverse_twice_is_identity(cmd in time_command()) {
        let trj = Trajectory::new_time_command(&cmd).unwrap();
        prop_assert_eq!(trj.reversed().reversed(), trj);
    }

    #[test]
    fn stretch_preserves_displacement(a in angle_command(), b in angle_command()) {
        let (Ok(mut trj), Ok(leader)) = (Trajectory::new_angle_command(&a), Trajectory::new_angle_command(&b)) else {
            return Ok(());
        };
        prop_assume!(leader.duration() > 0);

        let displacement = trj.displacement();
        let (t0, th0) = (trj.t0, trj.th0);
        trj.stretch(&leader);

        prop_assert_eq!(trj.displacement(), displacement);
        prop_assert_eq!((trj.t0, trj.th0), (t0, th0));
        prop_assert_eq!(trj.segment_durations(), leader.segment_durations());
        prop_assert!(knots_reproduced(&trj), "{:?}", trj);
    }

    #[test]
    fn rebase_is_transparent(
        speed in -5000i32..5000,
        duration in 1i32..5_000_000,
        extra in 1i32..100_000_000,
        later in 0i32..100_000_000,
    ) {
        let cmd = TrajectoryCommand::builder()
            .duration(duration)
            .speed(speed)
            .speed_max(5000)
            .ramps(2000, 2000)
            .continue_running(true)
            .build();
        let trj = Trajectory::new_time_command(&cmd).unwrap();

        let time = REBASE_AFTER_US + extra;
        let r = trj.reference(time);
        prop_assert_eq!(r.rate, trj.w3);

        let rebased = trj.rebased(&r).unwrap();
        let sample = time + later;
        let drift = (rebased.reference(sample).angle - trj.reference(sample).angle).millicounts();
        prop_assert!(drift.abs() <= 1);
        prop_assert_eq!(rebased.reference(sample).rate, trj.w3);
    }
}
