// ---------------------------------------------------------------------------
// Comparison selection
// ---------------------------------------------------------------------------

/// Whether anything is selected for the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Accumulating,
}

/// Names the user clicked for comparison, in click order.
///
/// Each session owns its own `Selection`; there is no shared global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `name` if it is selected, otherwise append it.
    /// Returns `true` when the name is selected afterwards.
    ///
    /// Re-adding a removed name puts it at the end, so two toggles restore
    /// membership but not necessarily click order.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            log::debug!("selection: removed {name}, {} left", self.names.len());
            false
        } else {
            self.names.push(name.to_string());
            log::debug!("selection: added {name}, {} total", self.names.len());
            true
        }
    }

    pub fn clear(&mut self) {
        if !self.names.is_empty() {
            log::debug!("selection: cleared {} names", self.names.len());
        }
        self.names.clear();
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.names.is_empty() {
            SelectionPhase::Idle
        } else {
            SelectionPhase::Accumulating
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn selection_of(names: &[&str]) -> Selection {
        let mut s = Selection::new();
        for n in names {
            s.toggle(n);
        }
        s
    }

    #[test]
    fn toggle_appends_in_click_order() {
        let s = selection_of(&["Mary", "Anna", "John"]);
        assert_eq!(s.names(), ["Mary", "Anna", "John"]);
        assert_eq!(s.phase(), SelectionPhase::Accumulating);
    }

    #[test]
    fn toggle_removes_existing() {
        let mut s = selection_of(&["Mary", "Anna", "John"]);
        assert!(!s.toggle("Anna"));
        assert_eq!(s.names(), ["Mary", "John"]);
        assert!(s.toggle("Anna"));
        assert_eq!(s.names(), ["Mary", "John", "Anna"]);
    }

    fn members(s: &Selection) -> BTreeSet<String> {
        s.names().iter().cloned().collect()
    }

    #[test]
    fn double_toggle_restores_membership() {
        for start in [&[][..], &["Mary"][..], &["Mary", "Anna"][..]] {
            for name in ["Mary", "Anna", "Ida"] {
                let before = selection_of(start);
                let mut s = before.clone();
                s.toggle(name);
                s.toggle(name);
                assert_eq!(members(&s), members(&before));
                assert_eq!(s.len(), before.len());
            }
        }
    }

    #[test]
    fn double_toggle_of_absent_name_keeps_order() {
        let before = selection_of(&["Mary", "Anna"]);
        let mut s = before.clone();
        s.toggle("Ida");
        s.toggle("Ida");
        assert_eq!(s, before);
    }

    #[test]
    fn double_toggle_of_present_name_moves_it_last() {
        let mut s = selection_of(&["Mary", "Anna"]);
        s.toggle("Mary");
        s.toggle("Mary");
        assert_eq!(s.names(), ["Anna", "Mary"]);
    }

    #[test]
    fn clear_then_toggle_matches_fresh() {
        let mut s = selection_of(&["Mary", "Anna"]);
        s.clear();
        assert_eq!(s.phase(), SelectionPhase::Idle);
        s.toggle("Anna");
        assert_eq!(s, selection_of(&["Anna"]));
    }

    #[test]
    fn clear_on_empty_is_fine() {
        let mut s = Selection::new();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn contains_is_exact() {
        let s = selection_of(&["Mary"]);
        assert!(s.contains("Mary"));
        assert!(!s.contains("mary"));
    }
}
