use super::types::Day;
use crate::error::CampaignError;

/// Uppercases and strips whitespace and hyphens, so `" 88-21 "` and
/// `"8821"` compare equal.
pub fn normalize_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// The static, ordered list of days. Day `n` lives at index `n - 1`.
#[derive(Debug, Clone)]
pub struct Campaign {
    days: Vec<Day>,
}

impl Campaign {
    /// Validates that days are dense from 1, unique, and each carries at
    /// least one hint. Solutions are stored normalized.
    pub fn from_days(mut days: Vec<Day>) -> Result<Self, CampaignError> {
        if days.is_empty() {
            return Err(CampaignError::Empty);
        }
        days.sort_by_key(Day::number);

        for (index, day) in days.iter_mut().enumerate() {
            let expected = index as u32 + 1;
            let found = day.number();
            if found < expected {
                return Err(CampaignError::Duplicate(found));
            }
            if found > expected {
                return Err(CampaignError::Gap { expected, found });
            }
            if day.hints().is_empty() {
                return Err(CampaignError::NoHints(found));
            }
            if !(1..=3).contains(&day.meta.act) {
                return Err(CampaignError::BadAct {
                    day: found,
                    act: day.meta.act,
                });
            }
            if let Some(solution) = day.challenge.solution.as_mut() {
                *solution = normalize_answer(solution);
            }
        }

        Ok(Campaign { days })
    }

    pub fn get_day(&self, n: u32) -> Option<&Day> {
        let index = n.checked_sub(1)? as usize;
        self.days.get(index)
    }

    pub fn contains(&self, n: u32) -> bool {
        self.get_day(n).is_some()
    }

    pub fn len(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Day> {
        self.days.iter()
    }

    pub fn days_in_act(&self, act: u8) -> impl Iterator<Item = &Day> {
        self.days.iter().filter(move |d| d.meta.act == act)
    }

    /// Compares an already-normalized candidate with the day's solution.
    /// Days without a solution never match.
    pub fn is_solution(&self, day: u32, candidate_normalized: &str) -> bool {
        self.get_day(day)
            .and_then(Day::solution)
            .is_some_and(|solution| solution == candidate_normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::PuzzleKind;

    fn day(n: u32) -> Day {
        Day::new(n, PuzzleKind::Code, Some("88-21"), &["hint"], None)
    }

    #[test]
    fn normalize_strips_spaces_and_hyphens() {
        assert_eq!(normalize_answer("  8 8-21  "), "8821");
        assert_eq!(normalize_answer("blue_vial"), "BLUE_VIAL");
        assert_eq!(normalize_answer("Sector\t9"), "SECTOR9");
    }

    #[test]
    fn solutions_are_normalized_on_load() {
        let campaign = Campaign::from_days(vec![day(1)]).unwrap();
        assert_eq!(campaign.get_day(1).unwrap().solution(), Some("8821"));
        assert!(campaign.is_solution(1, "8821"));
        assert!(!campaign.is_solution(1, "88-21"));
    }

    #[test]
    fn days_are_sorted_and_indexed() {
        let campaign = Campaign::from_days(vec![day(3), day(1), day(2)]).unwrap();
        assert_eq!(campaign.len(), 3);
        assert_eq!(campaign.get_day(2).unwrap().number(), 2);
        assert!(campaign.get_day(0).is_none());
        assert!(campaign.get_day(4).is_none());
    }

    #[test]
    fn rejects_gaps_and_duplicates() {
        assert!(matches!(
            Campaign::from_days(vec![day(1), day(3)]),
            Err(CampaignError::Gap {
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            Campaign::from_days(vec![day(1), day(1)]),
            Err(CampaignError::Duplicate(1))
        ));
        assert!(matches!(
            Campaign::from_days(Vec::new()),
            Err(CampaignError::Empty)
        ));
    }

    #[test]
    fn rejects_days_without_hints() {
        let bare = Day::new(1, PuzzleKind::Ending, None, &[], None);
        assert!(matches!(
            Campaign::from_days(vec![bare]),
            Err(CampaignError::NoHints(1))
        ));
    }

    #[test]
    fn null_solution_never_matches() {
        let story = Day::new(1, PuzzleKind::NarrativeOnly, None, &["read"], None);
        let campaign = Campaign::from_days(vec![story]).unwrap();
        assert!(!campaign.is_solution(1, ""));
        assert!(!campaign.is_solution(1, "ANYTHING"));
    }
}
