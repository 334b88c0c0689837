use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Suffix appended to every user-chosen name to form the deployed resource name.
pub const APPLICATION_NAME_SUFFIX: &str = "-rag-app";

/// Hard cap on the number of seed questions an application may carry.
pub const MAX_QUESTIONS: usize = 4;

/// Longest question the input control accepts, in characters.
pub const MAX_QUESTION_LENGTH: usize = 100;

pub const INVALID_NAME_MESSAGE: &str = "Application name should start with a lowercase letter and can only contain lowercase letters, numbers and hyphens";

/// Returns true iff `name` matches `^[a-z][a-z0-9-]*$`.
///
/// # Examples
///
/// ```
/// use ragapp::domain::is_valid_application_name;
///
/// assert!(is_valid_application_name("query-bot"));
/// assert!(!is_valid_application_name("Query-bot"));
/// assert!(!is_valid_application_name(""));
/// ```
pub fn is_valid_application_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// What the name field shows under the input, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameHint {
    /// Nothing typed yet
    None,
    /// Name typed but does not match the pattern
    Invalid(&'static str),
    /// Fully-qualified name the application will be created under
    Preview(String),
}

/// Candidate application name exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationName(String);

impl ApplicationName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Stores `raw` verbatim. No trimming or case folding happens here.
    pub fn set(&mut self, raw: impl Into<String>) {
        self.0 = raw.into();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_application_name(&self.0)
    }

    pub fn qualified(&self) -> String {
        format!("{}{}", self.0, APPLICATION_NAME_SUFFIX)
    }

    pub fn hint(&self) -> NameHint {
        if self.is_empty() {
            NameHint::None
        } else if !self.is_valid() {
            NameHint::Invalid(INVALID_NAME_MESSAGE)
        } else {
            NameHint::Preview(self.qualified())
        }
    }

    pub(crate) fn as_mut_string(&mut self) -> &mut String {
        &mut self.0
    }
}

/// Ordered list of optional seed questions, never longer than [`MAX_QUESTIONS`].
///
/// Empty strings and duplicates are kept; the list is submitted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    questions: Vec<String>,
}

impl QuestionDraft {
    pub fn can_add(&self) -> bool {
        self.questions.len() < MAX_QUESTIONS
    }

    /// Appends an empty question. Returns false (and changes nothing) at the cap.
    pub fn add(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.questions.push(String::new());
        true
    }

    /// Replaces the question at `index`. Stale indices are ignored.
    pub fn update(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.questions.get_mut(index) {
            *slot = text.into();
        }
    }

    /// Removes the question at `index`, shifting later ones left. Stale indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.questions.len() {
            Some(self.questions.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut String> {
        self.questions.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn clear(&mut self) {
        self.questions.clear();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.questions
    }
}

/// A model the playground has enabled, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledModel {
    pub name: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieverDescriptor {
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

/// Read-only snapshot of the playground selections, taken when Submit fires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionContext {
    pub selected_collection: String,
    pub enabled_models: Vec<EnabledModel>,
    pub selected_query_model: String,
    /// Raw JSON text typed into the model configuration editor
    pub model_config_text: String,
    pub selected_retriever: Option<RetrieverDescriptor>,
    /// Raw JSON text typed into the retriever configuration editor
    pub retriever_config_text: String,
    pub prompt_template: String,
    pub selected_query_controller: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationConfig {
    pub collection_name: String,
    pub model_configuration: Map<String, Value>,
    pub retriever_name: String,
    pub retriever_config: Value,
    pub prompt_template: String,
    pub query_controller: String,
}

/// Body sent to the creation service. Built fresh for every submit attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApplicationRequest {
    pub name: String,
    pub config: ApplicationConfig,
    pub questions: Vec<String>,
}
