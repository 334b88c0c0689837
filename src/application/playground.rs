//! Playground selections: the live context the creation modal reads from.

use crate::domain::{EnabledModel, RetrieverDescriptor, SelectionContext, SelectionProvider};

/// Current playground state. Cycled from the main screen and snapshotted on submit.
#[derive(Debug, Clone, Default)]
pub struct Playground {
    pub collection: String,
    pub models: Vec<EnabledModel>,
    pub selected_model: String,
    pub model_config_text: String,
    pub retrievers: Vec<RetrieverDescriptor>,
    pub selected_retriever: Option<usize>,
    pub retriever_config_text: String,
    pub prompt_template: String,
    pub query_controller: String,
}

impl Playground {
    /// Selects the enabled model after the current one, wrapping around.
    pub fn cycle_model(&mut self) {
        if self.models.is_empty() {
            return;
        }
        let next = self
            .models
            .iter()
            .position(|model| model.name == self.selected_model)
            .map_or(0, |current| (current + 1) % self.models.len());
        self.selected_model = self.models[next].name.clone();
    }

    /// Steps through the retrievers, then back to no retriever.
    pub fn cycle_retriever(&mut self) {
        self.selected_retriever = match self.selected_retriever {
            None if !self.retrievers.is_empty() => Some(0),
            Some(current) if current + 1 < self.retrievers.len() => Some(current + 1),
            _ => None,
        };
    }

    pub fn retriever(&self) -> Option<&RetrieverDescriptor> {
        self.selected_retriever.and_then(|index| self.retrievers.get(index))
    }
}

impl SelectionProvider for Playground {
    fn snapshot(&self) -> SelectionContext {
        SelectionContext {
            selected_collection: self.collection.clone(),
            enabled_models: self.models.clone(),
            selected_query_model: self.selected_model.clone(),
            model_config_text: self.model_config_text.clone(),
            selected_retriever: self.retriever().cloned(),
            retriever_config_text: self.retriever_config_text.clone(),
            prompt_template: self.prompt_template.clone(),
            selected_query_controller: self.query_controller.clone(),
        }
    }
}
