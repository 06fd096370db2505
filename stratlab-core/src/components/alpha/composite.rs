use crate::domain::{Insight, SecurityChanges, Slice};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

use super::AlphaModel;

/// Runs several alpha models in registration order and concatenates their
/// insights. Insights without a source model are attributed to the member
/// that produced them rather than to the composite.
pub struct CompositeAlpha {
    name: String,
    models: Vec<Box<dyn AlphaModel>>,
}

impl CompositeAlpha {
    pub fn new(models: Vec<Box<dyn AlphaModel>>) -> Self {
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

impl AlphaModel for CompositeAlpha {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_no_op(&self) -> bool {
        self.models.iter().all(|m| m.is_no_op())
    }

    fn update(&mut self, ctx: &AlgorithmContext<'_>, slice: &Slice) -> ComponentResult<Vec<Insight>> {
        let mut insights = Vec::new();
        for model in &mut self.models {
            for mut insight in model.update(ctx, slice)? {
                if insight.source_model.is_empty() {
                    insight.source_model = model.name().to_string();
                }
                insights.push(insight);
            }
        }
        Ok(insights)
    }

    fn on_securities_changed(&mut self, changes: &SecurityChanges) {
        for model in &mut self.models {
            model.on_securities_changed(changes);
        }
    }
}
