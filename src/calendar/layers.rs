use crate::calendar::category::known_layer_ids;
use crate::calendar::CivicEvent;

/// Active category layers shared by the map and every category-aware list.
///
/// An empty active set does not hide anything: `filter` then returns its input
/// unchanged, so "no layers" and "all layers" render the same.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFilter {
    known: Vec<String>,
    active: Vec<String>,
}

impl LayerFilter {
    /// Starts with every known layer active.
    pub fn new(known: Vec<String>) -> Self {
        let mut unique = Vec::with_capacity(known.len());
        for id in known {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            active: unique.clone(),
            known: unique,
        }
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|active| active == id)
    }

    /// Flips one layer. Returns whether it is active afterwards; unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.known.iter().any(|known| known == id) {
            tracing::warn!("Ignoring toggle for unknown layer: {}", id);
            return false;
        }

        if let Some(position) = self.active.iter().position(|active| active == id) {
            self.active.remove(position);
            false
        } else {
            self.active.push(id.to_string());
            true
        }
    }

    pub fn select_all(&mut self) {
        self.active = self.known.clone();
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn filter(&self, events: &[CivicEvent]) -> Vec<CivicEvent> {
        if self.active.is_empty() {
            return events.to_vec();
        }

        events
            .iter()
            .filter(|event| self.is_active(&event.category))
            .cloned()
            .collect()
    }
}

impl Default for LayerFilter {
    fn default() -> Self {
        Self::new(known_layer_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn sample_events() -> Vec<CivicEvent> {
        vec![
            CivicEvent::new("1", "Cabildo", "movilidad"),
            CivicEvent::new("2", "Feria", "salud"),
            CivicEvent::new("3", "Sesión", "legislativo"),
            CivicEvent::new("4", "Concierto", "cultura"),
        ]
    }

    #[test]
    fn starts_with_all_known_layers_active() {
        let filter = LayerFilter::default();

        assert_eq!(filter.active(), filter.known());
        assert_eq!(filter.active().len(), 5);
    }

    #[test]
    fn duplicate_known_ids_collapse() {
        let filter = LayerFilter::new(vec!["salud".into(), "salud".into(), "movilidad".into()]);

        assert_eq!(filter.known(), &["salud".to_string(), "movilidad".to_string()]);
    }

    #[test]
    fn toggle_removes_then_restores_layer() {
        let mut filter = LayerFilter::default();

        assert!(!filter.toggle("salud"));
        assert!(!filter.is_active("salud"));

        assert!(filter.toggle("salud"));
        assert!(filter.is_active("salud"));
        assert_eq!(filter.active().iter().filter(|id| *id == "salud").count(), 1);
    }

    #[test]
    fn toggle_ignores_unknown_layer() {
        let mut filter = LayerFilter::default();
        let before = filter.clone();

        assert!(!filter.toggle("cultura"));
        assert_eq!(filter, before);
    }

    #[test]
    fn filter_keeps_only_active_categories() {
        let mut filter = LayerFilter::default();
        filter.clear();
        filter.toggle("salud");
        filter.toggle("legislativo");

        let ids: Vec<_> = filter
            .filter(&sample_events())
            .into_iter()
            .map(|event| event.id)
            .collect();

        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn unknown_category_is_hidden_while_any_layer_is_active() {
        let filter = LayerFilter::default();

        let filtered = filter.filter(&sample_events());

        assert!(filtered.iter().all(|event| event.category != "cultura"));
    }

    #[test]
    fn empty_active_set_returns_input_unchanged() {
        let mut filter = LayerFilter::default();
        filter.clear();

        assert_eq!(filter.filter(&sample_events()), sample_events());
    }

    #[test]
    fn select_all_after_clearing_every_layer_restores_known_set() {
        let mut filter = LayerFilter::default();
        for id in known_layer_ids() {
            filter.toggle(&id);
        }
        assert!(filter.active().is_empty());

        filter.select_all();

        let active: HashSet<_> = filter.active().iter().cloned().collect();
        let known: HashSet<_> = known_layer_ids().into_iter().collect();
        assert_eq!(active, known);
    }

    #[test]
    fn filter_preserves_encounter_order() {
        let filter = LayerFilter::default();
        let events = vec![
            CivicEvent::new("b", "B", "salud"),
            CivicEvent::new("a", "A", "salud"),
        ];

        assert_eq!(filter.filter(&events), events);
    }
}
