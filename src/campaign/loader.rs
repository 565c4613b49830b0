use std::path::Path;

use log::debug;

use super::table::Campaign;
use super::types::Day;
use crate::error::CampaignError;

pub fn load_day(path: &Path) -> Result<Day, CampaignError> {
    let content = std::fs::read_to_string(path).map_err(|source| CampaignError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| CampaignError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_campaign(campaign_dir: &Path) -> Result<Campaign, CampaignError> {
    let pattern = campaign_dir.join("day_*.toml");
    let mut paths: Vec<_> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .collect();

    // Sort by filename so day_01, day_02, day_03 are in order
    paths.sort();

    let mut days = Vec::with_capacity(paths.len());
    for path in paths {
        let day = load_day(&path)?;
        debug!("loaded day {} from {}", day.number(), path.display());
        days.push(day);
    }

    Campaign::from_days(days)
}
