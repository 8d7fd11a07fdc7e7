use crate::core::units::{DAYS_PER_YEAR, HOURS_PER_DAY};

// Hours that start each month (and end the previous one), with a 13th value so that the end of
// the final month is handled correctly. E.g. Jan is hours 0-743
const MONTH_START_END_HOURS: [u32; 13] = [
    0, 744, 1416, 2160, 2880, 3624, 4344, 5088, 5832, 6552, 7296, 8016, 8760,
];

/// Length of a half-hourly timestep, in hours.
pub const HALF_HOUR: f64 = 0.5;

/// The shared time index for every profile in a calculation, in hours from the start of the year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationTime {
    start_time: f64,
    end_time: f64,
    step: f64,
}

impl SimulationTime {
    pub fn new(start_time: f64, end_time: f64, step: f64) -> Self {
        Self {
            start_time,
            end_time,
            step,
        }
    }

    /// A full non-leap year at half-hourly resolution.
    pub fn base_year() -> Self {
        Self::new(0., (DAYS_PER_YEAR * HOURS_PER_DAY) as f64, HALF_HOUR)
    }

    pub fn total_steps(&self) -> usize {
        ((self.end_time - self.start_time) / self.step).ceil() as usize
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn iter(&self) -> SimulationTimeIterator {
        SimulationTimeIterator::from(*self)
    }
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::base_year()
    }
}

#[derive(Clone, Debug)]
pub struct SimulationTimeIterator {
    current_index: usize,
    current_time: f64,
    started: bool,
    simulation_time: SimulationTime,
}

impl SimulationTimeIterator {
    fn from(simulation_time: SimulationTime) -> Self {
        SimulationTimeIterator {
            current_index: 0,
            current_time: simulation_time.start_time,
            started: false,
            simulation_time,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationTimeIteration {
    pub index: usize,
    pub time: f64,
    pub timestep: f64,
}

impl SimulationTimeIteration {
    pub fn current_hour(&self) -> u32 {
        self.time.floor() as u32
    }

    pub fn hour_of_day(&self) -> u32 {
        self.current_hour() % HOURS_PER_DAY
    }

    /// Zero-based month of the year, or None once past the end of the base year.
    pub fn current_month(&self) -> Option<u32> {
        let current_hour = self.current_hour();
        MONTH_START_END_HOURS
            .iter()
            .position(|end_hour| current_hour < *end_hour)
            .map(|i| (i - 1) as u32)
    }
}

impl Iterator for SimulationTimeIterator {
    type Item = SimulationTimeIteration;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started && self.simulation_time.start_time != self.simulation_time.end_time {
            self.started = true;
            return Some(SimulationTimeIteration {
                index: 0,
                time: self.simulation_time.start_time,
                timestep: self.simulation_time.step,
            });
        }
        match self.current_time < (self.simulation_time.end_time - self.simulation_time.step) {
            true => {
                self.current_index += 1;
                self.current_time += self.simulation_time.step;
                Some(SimulationTimeIteration {
                    index: self.current_index,
                    time: self.current_time,
                    timestep: self.simulation_time.step,
                })
            }
            false => None,
        }
    }
}
