use serde::{Deserialize, Serialize};

use crate::campaign::{Day, Locale};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub day_found: u32,
    pub description: String,
}

pub fn reward_id(day: u32) -> String {
    format!("reward_day_{day}")
}

impl InventoryItem {
    /// The evidence a day grants on completion, if it declares a reward.
    pub fn reward_for(day: &Day) -> Option<Self> {
        let reward = day.reward.as_ref()?;
        let number = day.number();
        let description = reward.description.clone().unwrap_or_else(|| {
            format!("Evidence from Day {number}: {}", day.title(Locale::En))
        });
        Some(InventoryItem {
            id: reward_id(number),
            name: reward.name.clone(),
            day_found: number,
            description,
        })
    }
}
