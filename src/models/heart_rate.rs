//! Heart rate reading.

use uuid::Uuid;

use super::Metric;

/// Heart rate in beats per minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartRate {
    id: Uuid,
    bpm: u32,
}

impl HeartRate {
    /// Create a reading with a fresh identity.
    pub fn new(bpm: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            bpm,
        }
    }

    /// Beats per minute.
    pub fn bpm(&self) -> u32 {
        self.bpm
    }
}

impl Metric for HeartRate {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        "Heart Rate"
    }

    fn value(&self) -> String {
        format!("{} BPM", self.bpm)
    }
}
