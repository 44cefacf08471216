//! Step count reading.

use uuid::Uuid;

use super::Metric;

/// Number of steps taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Steps {
    id: Uuid,
    count: u32,
}

impl Steps {
    /// Create a reading with a fresh identity.
    pub fn new(count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            count,
        }
    }

    /// Step count.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Metric for Steps {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        "Steps"
    }

    fn value(&self) -> String {
        format!("{} steps", self.count)
    }
}
