use serde::{Deserialize, Serialize};

use super::super::domain::Pillar;

/// Net breakdown below which a pillar's advisory is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightThresholds {
    pub diet: i32,
    pub activity: i32,
    pub sleep: i32,
    pub stress: i32,
}

impl InsightThresholds {
    pub const fn for_pillar(&self, pillar: Pillar) -> Option<i32> {
        match pillar {
            Pillar::Diet => Some(self.diet),
            Pillar::Activity => Some(self.activity),
            Pillar::Sleep => Some(self.sleep),
            Pillar::Stress => Some(self.stress),
            Pillar::General => None,
        }
    }
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            diet: 0,
            activity: 0,
            sleep: 0,
            stress: -1,
        }
    }
}
