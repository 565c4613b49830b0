use std::collections::BTreeMap;

/// Per-day cursors into each day's ordered hint list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintDispenser {
    cursors: BTreeMap<u32, usize>,
}

impl HintDispenser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the hint at the day's cursor and advances it. Once every hint
    /// has been served the last one keeps coming back. Returns `None` only
    /// when `hints` is empty.
    pub fn next<'a>(&mut self, day: u32, hints: &'a [String]) -> Option<&'a str> {
        let last = hints.last()?;
        let cursor = self.cursors.entry(day).or_insert(0);
        match hints.get(*cursor) {
            Some(hint) => {
                *cursor += 1;
                Some(hint)
            }
            None => Some(last),
        }
    }

    /// How many distinct hints have been served for `day`.
    pub fn seen(&self, day: u32) -> usize {
        self.cursors.get(&day).copied().unwrap_or(0)
    }

    pub fn cursors(&self) -> &BTreeMap<u32, usize> {
        &self.cursors
    }

    /// Restores a cursor, capped at `hint_count`.
    pub fn restore(&mut self, day: u32, cursor: usize, hint_count: usize) {
        let cursor = cursor.min(hint_count);
        if cursor > 0 {
            self.cursors.insert(day, cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["first".into(), "second".into(), "third".into()]
    }

    #[test]
    fn serves_in_order_then_saturates() {
        let hints = hints();
        let mut dispenser = HintDispenser::new();
        let served: Vec<_> = (0..6).map(|_| dispenser.next(5, &hints).unwrap()).collect();
        assert_eq!(served, ["first", "second", "third", "third", "third", "third"]);
        assert_eq!(dispenser.seen(5), 3);
    }

    #[test]
    fn cursors_are_independent_per_day() {
        let hints = hints();
        let mut dispenser = HintDispenser::new();
        dispenser.next(3, &hints);
        dispenser.next(3, &hints);
        assert_eq!(dispenser.next(5, &hints), Some("first"));
        assert_eq!(dispenser.seen(3), 2);
        assert_eq!(dispenser.seen(5), 1);
    }

    #[test]
    fn empty_hint_list_yields_nothing_and_keeps_cursor() {
        let mut dispenser = HintDispenser::new();
        assert_eq!(dispenser.next(1, &[]), None);
        assert_eq!(dispenser.seen(1), 0);
    }

    #[test]
    fn restore_caps_at_hint_count() {
        let mut dispenser = HintDispenser::new();
        dispenser.restore(2, 10, 3);
        assert_eq!(dispenser.seen(2), 3);
        dispenser.restore(4, 0, 3);
        assert!(!dispenser.cursors().contains_key(&4));
    }
}
