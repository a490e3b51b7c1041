//! Mock smart-switch fleet and the base-load selection policy.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Latest reading of one smart switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub ip: String,
    /// Relay on/off.
    pub state: bool,
    /// Watts.
    pub power: f64,
    /// Volts.
    pub voltage: f64,
    /// Milliamps.
    pub current: u32,
    /// Energy consumed today (kWh).
    pub today: f64,
    pub updated_at: DateTime<FixedOffset>,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.state { "on" } else { "off" };
        write!(
            f,
            "{:<2} {:<16} {:<15} {:<3} {:>7.1} W {:>6.1} V {:>5} mA {:>5.1} kWh",
            self.id, self.name, self.ip, state, self.power, self.voltage, self.current, self.today
        )
    }
}

/// Nominal loads used when synthesizing chart data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadPolicy {
    /// Base load for the whole-house view (W).
    pub aggregate_base_w: f64,
    /// Base load for a single selected device (W).
    pub device_base_w: f64,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            aggregate_base_w: 400.0,
            device_base_w: 100.0,
        }
    }
}

/// Which consumption the analytics view is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceSelection {
    /// Total consumption across the fleet.
    #[default]
    All,
    /// A single device by id.
    Device(String),
}

impl DeviceSelection {
    pub fn base_load(&self, policy: &LoadPolicy) -> f64 {
        match self {
            DeviceSelection::All => policy.aggregate_base_w,
            DeviceSelection::Device(_) => policy.device_base_w,
        }
    }
}

impl FromStr for DeviceSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => DeviceSelection::All,
            id => DeviceSelection::Device(id.to_string()),
        })
    }
}

impl fmt::Display for DeviceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelection::All => f.write_str("all"),
            DeviceSelection::Device(id) => f.write_str(id),
        }
    }
}

/// Fleet-wide figures shown in the overview panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overview {
    pub active_devices: usize,
    pub total_devices: usize,
    pub total_power_w: f64,
    pub today_kwh: f64,
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Active devices:     {} / {}",
            self.active_devices, self.total_devices
        )?;
        writeln!(f, "Total power:        {:.0} W", self.total_power_w)?;
        write!(f, "Today's energy:     {:.1} kWh", self.today_kwh)
    }
}

/// A set of devices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Fleet {
    pub devices: Vec<Device>,
}

impl Fleet {
    /// The four demo switches, stamped relative to `now`.
    pub fn mock<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let now = now.fixed_offset();
        let an_hour_ago = now - TimeDelta::hours(1);
        let device = |id: &str,
                      name: &str,
                      ip: &str,
                      state: bool,
                      power: f64,
                      voltage: f64,
                      current: u32,
                      today: f64,
                      at: DateTime<FixedOffset>| {
            Device {
                id: id.to_string(),
                name: name.to_string(),
                ip: ip.to_string(),
                state,
                power,
                voltage,
                current,
                today,
                updated_at: at,
            }
        };
        Self {
            devices: vec![
                device("1", "Oficina", "192.168.1.101", true, 125.5, 220.1, 570, 1.2, now),
                device("2", "Termo", "192.168.1.102", true, 350.2, 219.8, 1590, 4.5, now),
                device(
                    "3",
                    "Nevera Siemens",
                    "192.168.1.105",
                    false,
                    0.0,
                    221.0,
                    0,
                    0.8,
                    an_hour_ago,
                ),
                device("4", "Nevera Daewoo", "192.168.1.106", true, 85.0, 220.5, 385, 1.1, now),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Checks that a selection refers to a device in this fleet.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnknownDevice`] for an id not in the fleet.
    pub fn resolve(&self, selection: &DeviceSelection) -> Result<Option<&Device>, SeriesError> {
        match selection {
            DeviceSelection::All => Ok(None),
            DeviceSelection::Device(id) => self
                .get(id)
                .map(Some)
                .ok_or_else(|| SeriesError::UnknownDevice(id.clone())),
        }
    }

    pub fn overview(&self) -> Overview {
        Overview {
            active_devices: self.devices.iter().filter(|d| d.state).count(),
            total_devices: self.devices.len(),
            total_power_w: self.devices.iter().map(|d| d.power).sum(),
            today_kwh: self.devices.iter().map(|d| d.today).sum(),
        }
    }
}
