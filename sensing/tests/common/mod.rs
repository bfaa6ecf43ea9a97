//! Mock hardware shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use micromouse_sensing::{AnalogSource, ChannelValues, Emitters, SensorChannel};

/// Something the hardware saw, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(SensorChannel),
    Emitter(SensorChannel, bool),
    DelayNs(u64),
}

/// Simulated sensor board: detectors return `lit` while their own emitter
/// is on and `dark` otherwise
#[derive(Debug, Default)]
pub struct Bench {
    pub dark: ChannelValues,
    pub lit: ChannelValues,
    pub emitters: [bool; 4],
    pub log: Vec<Access>,
}

fn slot(channel: SensorChannel) -> usize {
    match channel {
        SensorChannel::Left => 0,
        SensorChannel::Right => 1,
        SensorChannel::FrontLeft => 2,
        SensorChannel::FrontRight => 3,
    }
}

impl Bench {
    pub fn shared(dark: ChannelValues, lit: ChannelValues) -> Rc<RefCell<Bench>> {
        Rc::new(RefCell::new(Bench {
            dark,
            lit,
            ..Bench::default()
        }))
    }

    pub fn any_emitter_on(&self) -> bool {
        self.emitters.iter().any(|&on| on)
    }
}

pub struct MockAdc(pub Rc<RefCell<Bench>>);

impl AnalogSource for MockAdc {
    fn read(&mut self, channel: SensorChannel) -> u16 {
        let mut bench = self.0.borrow_mut();
        bench.log.push(Access::Read(channel));
        if bench.emitters[slot(channel)] {
            bench.lit.get(channel)
        } else {
            bench.dark.get(channel)
        }
    }
}

pub struct MockEmitter {
    bench: Rc<RefCell<Bench>>,
    channel: SensorChannel,
}

impl MockEmitter {
    fn set(&mut self, on: bool) {
        let mut bench = self.bench.borrow_mut();
        bench.emitters[slot(self.channel)] = on;
        bench.log.push(Access::Emitter(self.channel, on));
    }
}

impl ErrorType for MockEmitter {
    type Error = Infallible;
}

impl OutputPin for MockEmitter {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

pub fn emitters(bench: &Rc<RefCell<Bench>>) -> Emitters<MockEmitter> {
    let pin = |channel| MockEmitter {
        bench: Rc::clone(bench),
        channel,
    };
    Emitters {
        front_left: pin(SensorChannel::FrontLeft),
        front_right: pin(SensorChannel::FrontRight),
        left: pin(SensorChannel::Left),
        right: pin(SensorChannel::Right),
    }
}

pub struct MockDelay(pub Rc<RefCell<Bench>>);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().log.push(Access::DelayNs(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.0
            .borrow_mut()
            .log
            .push(Access::DelayNs(u64::from(us) * 1_000));
    }
}

/// Input pin playing back a fixed level until changed
#[derive(Debug, Clone)]
pub struct MockButtonPin {
    pub high: Rc<RefCell<bool>>,
    pub fail: bool,
}

impl MockButtonPin {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(RefCell::new(high)),
            fail: false,
        }
    }

    pub fn set_high(&self, high: bool) {
        *self.high.borrow_mut() = high;
    }
}

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for MockButtonPin {
    type Error = PinFault;
}

impl InputPin for MockButtonPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(PinFault);
        }
        Ok(*self.high.borrow())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
