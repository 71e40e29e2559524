//! Property-based tests for the pose sequencer using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p robosprite-core --test sequence_properties
//! ```

use proptest::prelude::*;

use robosprite_core::sequence::{self, ARM_STEP, LEG_STEP, ROTATE_FRAMES, WALK_FRAMES};

fn angle() -> impl Strategy<Value = f64> {
    -720.0f64..720.0
}

proptest! {
    /// Every walk has 13 frames and keeps the body at the requested bias.
    #[test]
    fn walk_length_and_bias(bias in angle()) {
        let poses = sequence::walk(bias);
        prop_assert_eq!(poses.len(), WALK_FRAMES);
        prop_assert!(poses.iter().all(|p| p.body == bias));
    }

    /// Continuing the last walk segment by one step lands on the first frame.
    #[test]
    fn walk_wraps_around(bias in angle()) {
        let poses = sequence::walk(bias);
        let first = poses[0];
        let last = poses[WALK_FRAMES - 1];
        let before_last = poses[WALK_FRAMES - 2];

        let next_arm = last.left_arm + (last.left_arm - before_last.left_arm);
        let next_leg = last.left_leg + (last.left_leg - before_last.left_leg);
        prop_assert!((next_arm - first.left_arm).abs() < 1e-9);
        prop_assert!((next_leg - first.left_leg).abs() < 1e-9);
    }

    /// Neighbouring walk frames never differ by more than one gait step.
    #[test]
    fn walk_moves_at_most_one_step_per_frame(bias in angle()) {
        let poses = sequence::walk(bias);
        for pair in poses.windows(2) {
            prop_assert!((pair[1].left_arm - pair[0].left_arm).abs() <= ARM_STEP + 1e-9);
            prop_assert!((pair[1].right_leg - pair[0].right_leg).abs() <= LEG_STEP + 1e-9);
        }
    }

    /// Rotation hits both endpoints and steps evenly between them.
    #[test]
    fn rotate_is_evenly_spaced(a1 in angle(), a2 in angle()) {
        let poses = sequence::rotate(a1, a2);
        prop_assert_eq!(poses.len(), ROTATE_FRAMES);
        prop_assert_eq!(poses[0].body, a1);
        prop_assert_eq!(poses[ROTATE_FRAMES - 1].body, a2);

        let step = (a2 - a1) / 10.0;
        for pair in poses.windows(2) {
            prop_assert!(((pair[1].body - pair[0].body) - step).abs() < 1e-6);
        }
    }

    /// Rotation limbs follow the three-phase cycle.
    #[test]
    fn rotate_limb_phase(a1 in angle(), a2 in angle()) {
        for (i, pose) in sequence::rotate(a1, a2).iter().enumerate() {
            let j = (i % 3) as f64 - 1.0;
            prop_assert_eq!(pose.limbs(), [10.0 * j, -10.0 * j, -12.0 * j, 12.0 * j]);
        }
    }

    /// The check sweep never moves anything but the right arm.
    #[test]
    fn check_only_moves_right_arm(bias in angle()) {
        let poses = sequence::check(bias);
        prop_assert_eq!(poses.len(), 19);
        for pose in &poses {
            prop_assert_eq!(pose.body, bias);
            prop_assert_eq!(pose.left_arm, 0.0);
            prop_assert_eq!(pose.left_leg, 0.0);
            prop_assert_eq!(pose.right_leg, 0.0);
            prop_assert!((0.0..=90.0).contains(&pose.right_arm));
        }
    }

    /// Figure rotation scale stays within (0, 1] and is symmetric around the
    /// middle for odd frame counts.
    #[test]
    fn rotate_scale_bounds(half in 1usize..20) {
        let total = half * 2 + 1;
        for i in 0..total {
            let s = sequence::rotate_scale(i, total);
            prop_assert!(s > 0.0 && s <= 1.0);
        }
        prop_assert_eq!(sequence::rotate_scale(0, total), 1.0);
        prop_assert_eq!(sequence::rotate_scale(total - 1, total), 1.0);
        for i in 1..half {
            let a = sequence::rotate_scale(half - i, total);
            let b = sequence::rotate_scale(half + i, total);
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    /// Identical input always yields identical sequences.
    #[test]
    fn sequences_are_deterministic(bias in angle(), a2 in angle()) {
        prop_assert_eq!(sequence::walk(bias), sequence::walk(bias));
        prop_assert_eq!(sequence::rotate(bias, a2), sequence::rotate(bias, a2));
        prop_assert_eq!(sequence::check(bias), sequence::check(bias));
    }
}
