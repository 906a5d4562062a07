use crate::command::basic_connect::types::RegisterState;

impl RegisterState {
    /// Home, roaming and partner registrations all allow a packet service
    /// attach.
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Home | Self::Roaming | Self::Partner)
    }
}

/// Bounded counter of registration state polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegistrationAttempts {
    count: u32,
    max: u32,
}

impl RegistrationAttempts {
    pub const fn new(max: u32) -> Self {
        Self {
            count: 0,
            max: if max == 0 { 1 } else { max },
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Count one completed poll, returning the new total
    pub fn record(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn exhausted(&self) -> bool {
        self.count >= self.max
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}
