//! Request assembly for application creation.
//!
//! Everything here is pure: given a name, a question draft and a selection
//! snapshot, the same request comes out every time.

use super::errors::{DomainError, DomainResult};
use super::models::{
    ApplicationConfig, ApplicationName, CreateApplicationRequest, EnabledModel, QuestionDraft,
    SelectionContext,
};
use serde_json::{Map, Value};

/// Layers `overrides` on top of `base`.
///
/// Keys present in both take the value from `overrides`, so free-form model
/// configuration can replace the derived `name` and `provider` fields.
///
/// # Examples
///
/// ```
/// use ragapp::domain::with_overrides;
/// use serde_json::{json, Map, Value};
///
/// let base: Map<String, Value> = json!({"name": "gpt", "provider": "openai"})
///     .as_object().cloned().unwrap();
/// let overrides: Map<String, Value> = json!({"name": "override"})
///     .as_object().cloned().unwrap();
///
/// let merged = with_overrides(base, overrides);
/// assert_eq!(merged["name"], "override");
/// assert_eq!(merged["provider"], "openai");
/// ```
pub fn with_overrides(mut base: Map<String, Value>, overrides: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overrides {
        base.insert(key, value);
    }
    base
}

/// Parses configuration text typed by the user.
pub fn parse_config(field: &'static str, text: &str) -> DomainResult<Value> {
    serde_json::from_str(text).map_err(|source| DomainError::InvalidJson { field, source })
}

/// Turns any parsed JSON value into override entries.
///
/// Objects contribute their keys. Arrays and strings contribute one entry per
/// element or character, keyed by index. Scalars and `null` contribute nothing.
pub fn spread_overrides(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::String(text) => text
            .chars()
            .enumerate()
            .map(|(index, c)| (index.to_string(), Value::String(c.to_string())))
            .collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) => Map::new(),
    }
}

/// Finds the enabled model whose name matches the playground selection.
pub fn find_selected_model<'a>(context: &'a SelectionContext) -> DomainResult<&'a EnabledModel> {
    context
        .enabled_models
        .iter()
        .find(|model| model.name == context.selected_query_model)
        .ok_or_else(|| DomainError::ModelNotFound(context.selected_query_model.clone()))
}

/// Builds the creation request for the current form state and selection snapshot.
///
/// The name is not checked here; callers gate on emptiness and validity first.
///
/// # Errors
///
/// Returns an error if the selected model is not enabled, or if either
/// configuration text is not valid JSON.
pub fn build_request(
    name: &ApplicationName,
    questions: &QuestionDraft,
    context: &SelectionContext,
) -> DomainResult<CreateApplicationRequest> {
    let model = find_selected_model(context)?;

    let mut derived = Map::new();
    derived.insert("name".to_string(), Value::String(model.name.clone()));
    derived.insert("provider".to_string(), Value::String(model.provider.clone()));
    let overrides = spread_overrides(parse_config("model configuration", &context.model_config_text)?);

    let retriever_config = parse_config("retriever configuration", &context.retriever_config_text)?;

    Ok(CreateApplicationRequest {
        name: name.qualified(),
        config: ApplicationConfig {
            collection_name: context.selected_collection.clone(),
            model_configuration: with_overrides(derived, overrides),
            retriever_name: context
                .selected_retriever
                .as_ref()
                .map(|retriever| retriever.name.clone())
                .unwrap_or_default(),
            retriever_config,
            prompt_template: context.prompt_template.clone(),
            query_controller: context.selected_query_controller.clone(),
        },
        questions: questions.as_slice().to_vec(),
    })
}
