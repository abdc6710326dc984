//! Band edges and single-step frequency arithmetic.

use crate::command::Module;

/// Tuning direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

/// Step increment in native units (10 kHz on FM, 1 kHz on AM).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepSize {
    /// 1 unit.
    Fine,
    /// 5 units, the usual seek increment (50 kHz on FM).
    #[default]
    Seek,
    /// 10 units.
    Coarse,
    /// 100 units.
    Jump,
}

impl StepSize {
    pub const fn units(self) -> u16 {
        match self {
            StepSize::Fine => 1,
            StepSize::Seek => 5,
            StepSize::Coarse => 10,
            StepSize::Jump => 100,
        }
    }
}

/// A tunable range on one radio module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    pub module: Module,
    /// Lowest frequency, native units.
    pub low: u16,
    /// Highest frequency, native units.
    pub high: u16,
}

impl Band {
    /// 87.50 – 108.00 MHz.
    pub const FM_EUROPE: Band = Band {
        module: Module::Fm,
        low: 8750,
        high: 10800,
    };

    /// 76.00 – 95.00 MHz.
    pub const FM_JAPAN: Band = Band {
        module: Module::Fm,
        low: 7600,
        high: 9500,
    };

    /// 522 – 1620 kHz.
    pub const AM_MW: Band = Band {
        module: Module::Am,
        low: 522,
        high: 1620,
    };

    pub const fn new(module: Module, low: u16, high: u16) -> Self {
        Self { module, low, high }
    }

    pub fn contains(&self, frequency: u16) -> bool {
        (self.low..=self.high).contains(&frequency)
    }

    /// Out-of-band frequencies snap to the low edge.
    pub fn snap(&self, frequency: u16) -> u16 {
        if self.contains(frequency) {
            frequency
        } else {
            self.low
        }
    }
}

/// The currently tuned frequency on one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyStepper {
    current: u16,
}

impl FrequencyStepper {
    pub const fn new(frequency: u16) -> Self {
        Self { current: frequency }
    }

    pub fn current(&self) -> u16 {
        self.current
    }

    /// Jump to `frequency`, snapped into `band`.
    pub fn set(&mut self, frequency: u16, band: &Band) -> u16 {
        self.current = band.snap(frequency);
        self.current
    }

    /// Advance one step, wrapping to the opposite edge on overshoot.
    ///
    /// A frequency outside `band` is snapped to the low edge first.
    pub fn step(&mut self, direction: Direction, size: StepSize, band: &Band) -> u16 {
        let units = size.units();
        let current = band.snap(self.current);
        self.current = match direction {
            Direction::Up => match current.checked_add(units) {
                Some(f) if f <= band.high => f,
                _ => band.low,
            },
            Direction::Down => match current.checked_sub(units) {
                Some(f) if f >= band.low => f,
                _ => band.high,
            },
        };
        self.current
    }
}
