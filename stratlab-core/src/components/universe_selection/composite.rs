use chrono::{DateTime, Utc};

use crate::domain::Universe;
use crate::error::ComponentResult;

use super::UniverseSelectionModel;

/// Union of several selection models. Due as soon as any member is due.
pub struct CompositeUniverseSelection {
    name: String,
    models: Vec<Box<dyn UniverseSelectionModel>>,
}

impl CompositeUniverseSelection {
    pub fn new(models: Vec<Box<dyn UniverseSelectionModel>>) -> Self {
        let names: Vec<&str> = models.iter().map(|m| m.name()).collect();
        let name = format!("composite({})", names.join(","));
        Self { name, models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl UniverseSelectionModel for CompositeUniverseSelection {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_refresh_time_utc(&self) -> DateTime<Utc> {
        self.models
            .iter()
            .map(|m| m.next_refresh_time_utc())
            .min()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn create_universes(&mut self, now: DateTime<Utc>) -> ComponentResult<Vec<Universe>> {
        let mut universes = Vec::new();
        for model in &mut self.models {
            universes.extend(model.create_universes(now)?);
        }
        Ok(universes)
    }
}
