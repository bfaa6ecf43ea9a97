use micromouse_sensing::calibration::ChannelCalibration;
use micromouse_sensing::table::{front_distance, front_steering, FRONT_TABLE_LEN};
use micromouse_sensing::{ChannelValues, Debouncer, SensorCalibration};
use proptest::prelude::*;

fn channel_values() -> impl Strategy<Value = ChannelValues> {
    (0u16..4096, 0u16..4096, 0u16..4096, 0u16..4096).prop_map(
        |(left, right, front_left, front_right)| ChannelValues {
            left,
            right,
            front_left,
            front_right,
        },
    )
}

/// Ratios within a factor of two of unity, what real emitters drift to
fn calibration() -> impl Strategy<Value = ChannelCalibration> {
    (50u16..400).prop_flat_map(|nominal| {
        (Just(nominal), (nominal / 2).max(1)..=nominal * 2)
            .prop_map(|(nominal, measured)| ChannelCalibration::new(nominal, measured))
    })
}

proptest! {
    #[test]
    fn reflected_light_is_never_negative(lit in channel_values(), dark in channel_values()) {
        let raw = ChannelValues::reflected(&lit, &dark);
        prop_assert_eq!(raw.left, lit.left.saturating_sub(dark.left));
        prop_assert_eq!(raw.front_right, lit.front_right.saturating_sub(dark.front_right));
        prop_assert!(raw.front_left <= lit.front_left);
    }

    #[test]
    fn normalisation_round_trips_within_one(
        raw in channel_values(),
        left in calibration(),
        right in calibration(),
        front_left in calibration(),
        front_right in calibration(),
    ) {
        let cal = SensorCalibration { left, right, front_left, front_right };
        let back = raw.normalized(&cal).denormalized(&cal);
        prop_assert!(raw.left.abs_diff(back.left) <= 1);
        prop_assert!(raw.right.abs_diff(back.right) <= 1);
        prop_assert!(raw.front_left.abs_diff(back.front_left) <= 1);
        prop_assert!(raw.front_right.abs_diff(back.front_right) <= 1);
    }

    #[test]
    fn normalisation_matches_integer_ratio(raw in 0u16..4096, cal in calibration()) {
        let expected = u32::from(raw) * u32::from(cal.nominal()) / u32::from(cal.measured());
        prop_assert_eq!(u32::from(cal.apply(raw)), expected);
    }

    #[test]
    fn stronger_signal_is_never_farther(sum in -100i32..1000, step in 1i32..200) {
        prop_assert!(front_distance(sum + step) <= front_distance(sum));
        prop_assert!(front_distance(sum) <= FRONT_TABLE_LEN);
    }

    #[test]
    fn steering_outside_table_is_neutral(diff in -1000i32..1000, distance in prop_oneof![
        i32::MIN..0,
        (FRONT_TABLE_LEN as i32)..i32::MAX,
    ]) {
        prop_assert_eq!(front_steering(diff, distance), 0);
    }

    #[test]
    fn mixed_windows_never_change_state(windows in proptest::collection::vec(0u8..6, 1..50)) {
        // every window of three holds between one and two active samples
        let mut debouncer = Debouncer::new(3);
        for mask in windows {
            let mask = mask + 1;
            for bit in 0..3 {
                prop_assert_eq!(debouncer.tick(mask & (1 << bit) != 0), None);
            }
        }
        prop_assert!(debouncer.is_released());
    }
}
