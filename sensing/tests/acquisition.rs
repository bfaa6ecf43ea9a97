mod common;

use common::{emitters, Access, Bench, MockAdc, MockDelay};
use micromouse_sensing::calibration::ChannelCalibration;
use micromouse_sensing::hal::SensorChannel;
use micromouse_sensing::sensors::EMITTER_SETTLE_US;
use micromouse_sensing::table::FRONT_TABLE_LEN;
use micromouse_sensing::{
    ChannelValues, IrSensors, SensorCalibration, SensorConfig, WallThresholds,
};

fn config() -> SensorConfig {
    SensorConfig {
        calibration: SensorCalibration {
            left: ChannelCalibration::new(80, 100),
            right: ChannelCalibration::UNITY,
            front_left: ChannelCalibration::UNITY,
            front_right: ChannelCalibration::new(100, 50),
        },
        thresholds: WallThresholds {
            front: 100,
            side: 200,
            hysteresis: 5,
        },
        occluded_level: 300,
    }
}

fn values(left: u16, right: u16, front_left: u16, front_right: u16) -> ChannelValues {
    ChannelValues {
        left,
        right,
        front_left,
        front_right,
    }
}

#[test]
fn update_cancels_ambient_and_normalises() {
    let bench = Bench::shared(values(10, 20, 30, 40), values(110, 15, 230, 140));
    let mut sensors = IrSensors::new(
        MockAdc(bench.clone()),
        emitters(&bench),
        MockDelay(bench.clone()),
        config(),
    );

    let readings = sensors.update();

    assert_eq!(readings.raw, values(100, 0, 200, 100));
    assert_eq!(readings.normalized, values(80, 0, 200, 200));
    assert_eq!(readings.front_sum, 400);
    assert_eq!(readings.front_diff, 0);
    assert!(readings.walls.front_left);
    assert!(readings.walls.front_right);
    assert!(readings.walls.front);
    assert!(!readings.walls.left);
    assert_eq!(sensors.readings(), readings);
}

#[test]
fn dark_samples_precede_emitters_and_front_precedes_side() {
    let bench = Bench::shared(ChannelValues::default(), values(1, 1, 1, 1));
    let mut sensors = IrSensors::new(
        MockAdc(bench.clone()),
        emitters(&bench),
        MockDelay(bench.clone()),
        config(),
    );
    bench.borrow_mut().log.clear();

    sensors.update();

    let log = bench.borrow().log.clone();
    let settle = Access::DelayNs(u64::from(EMITTER_SETTLE_US) * 1_000);
    let expected = vec![
        Access::Read(SensorChannel::Left),
        Access::Read(SensorChannel::Right),
        Access::Read(SensorChannel::FrontLeft),
        Access::Read(SensorChannel::FrontRight),
        Access::Emitter(SensorChannel::FrontRight, true),
        Access::Emitter(SensorChannel::FrontLeft, true),
        settle,
        Access::Read(SensorChannel::FrontLeft),
        Access::Read(SensorChannel::FrontRight),
        Access::Emitter(SensorChannel::FrontRight, false),
        Access::Emitter(SensorChannel::FrontLeft, false),
        Access::Emitter(SensorChannel::Right, true),
        Access::Emitter(SensorChannel::Left, true),
        settle,
        Access::Read(SensorChannel::Left),
        Access::Read(SensorChannel::Right),
        Access::Emitter(SensorChannel::Right, false),
        Access::Emitter(SensorChannel::Left, false),
    ];
    assert_eq!(log, expected);
    assert!(!bench.borrow().any_emitter_on());
}

#[test]
fn side_walls_hold_across_cycles() {
    let bench = Bench::shared(ChannelValues::default(), ChannelValues::default());
    let mut sensors = IrSensors::new(
        MockAdc(bench.clone()),
        emitters(&bench),
        MockDelay(bench.clone()),
        config(),
    );

    let mut seen = Vec::new();
    for reading in [150, 190, 210, 202, 150] {
        bench.borrow_mut().lit.right = reading;
        seen.push(sensors.update().walls.right);
    }
    assert_eq!(seen, [false, false, true, true, false]);

    bench.borrow_mut().lit.right = 210;
    assert!(sensors.update().walls.right);
    bench.borrow_mut().lit.right = 195;
    assert!(!sensors.update().walls.right);
}

#[test]
fn queries_use_latest_cycle() {
    let bench = Bench::shared(ChannelValues::default(), ChannelValues::default());
    let mut sensors = IrSensors::new(
        MockAdc(bench.clone()),
        emitters(&bench),
        MockDelay(bench.clone()),
        SensorConfig::default(),
    );

    sensors.update();
    assert_eq!(sensors.front_distance(), FRONT_TABLE_LEN);
    assert_eq!(sensors.front_steering(-1), 0);

    {
        let mut b = bench.borrow_mut();
        b.lit.front_left = 235;
        b.lit.front_right = 250;
    }
    sensors.update();
    assert_eq!(sensors.front_distance(), 0);
    // index 0 expects -15, live difference is -15
    assert_eq!(sensors.front_steering(0), 0);
    assert_eq!(sensors.front_steering(FRONT_TABLE_LEN as i32), 0);
}

#[test]
fn new_and_release_leave_emitters_off() {
    let bench = Bench::shared(ChannelValues::default(), ChannelValues::default());
    bench.borrow_mut().emitters = [true; 4];
    let sensors = IrSensors::new(
        MockAdc(bench.clone()),
        emitters(&bench),
        MockDelay(bench.clone()),
        SensorConfig::default(),
    );
    assert!(!bench.borrow().any_emitter_on());

    let (_adc, _emitters, _delay) = sensors.release();
    assert!(!bench.borrow().any_emitter_on());
}
