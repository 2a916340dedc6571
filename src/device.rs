//! Static description of the touchscreen for whatever registers it with the host input layer.

use heapless::String;

use crate::event::{MAX_COORD, MIN_COORD};

pub const DRIVER_NAME: &str = "flytouch";
pub const DESCRIPTION: &str = "FlyPOS Pro serial touchscreen driver";
pub const DEVICE_NAME: &str = "FlyPOS Pro Serial TouchScreen";

/// Serio protocol id the line discipline is attached with
pub const SERIO_PROTOCOL: u8 = 0xE4;

/// Physical path buffer, including the terminator slot
pub const PHYS_LEN: usize = 32;
const PHYS_SUFFIX: &str = "/input0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    Rs232 = 0x13,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    pub bus: Bus,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsAxis {
    pub axis: Axis,
    pub min: u16,
    pub max: u16,
    pub fuzz: u16,
    pub flat: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    BtnTouch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: &'static str,
    pub id: DeviceId,
    pub keys: &'static [Key],
    pub axes: &'static [AbsAxis],
}

pub const DEVICE: DeviceInfo = DeviceInfo {
    name: DEVICE_NAME,
    id: DeviceId {
        bus: Bus::Rs232,
        // The vendor has no registered id
        vendor: 0,
        product: 0,
        version: 0x0001,
    },
    keys: &[Key::BtnTouch],
    axes: &[
        AbsAxis { axis: Axis::X, min: MIN_COORD, max: MAX_COORD, fuzz: 0, flat: 0 },
        AbsAxis { axis: Axis::Y, min: MIN_COORD, max: MAX_COORD, fuzz: 0, flat: 0 },
    ],
};

impl DeviceInfo {
    pub fn axis(&self, axis: Axis) -> Option<&AbsAxis> {
        self.axes.iter().find(|a| a.axis == axis)
    }
}

/// `<serio_phys>/input0`, cut to fit `PHYS_LEN - 1` bytes on a char boundary.
pub fn physical_path(serio_phys: &str) -> String<PHYS_LEN> {
    let mut s = String::new();
    for c in serio_phys.chars().chain(PHYS_SUFFIX.chars()) {
        if s.len() + c.len_utf8() > PHYS_LEN - 1 || s.push(c).is_err() {
            break;
        }
    }
    s
}
