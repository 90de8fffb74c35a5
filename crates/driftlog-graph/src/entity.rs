use serde::{Deserialize, Serialize};

/// A named piece of code with a stated purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntity {
    pub file_path: String,
    /// Kind of entity, e.g. `function` or `class`.
    pub entity_type: String,
    pub name: String,
    pub code: String,
    pub purpose: String,
}

impl CodeEntity {
    pub fn new(
        file_path: impl Into<String>,
        entity_type: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            entity_type: entity_type.into(),
            name: name.into(),
            code: code.into(),
            purpose: purpose.into(),
        }
    }

    /// Text fed to the embedder.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.purpose, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::CodeEntity;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedding_text_puts_purpose_first() {
        let entity = CodeEntity::new("src/lib.rs", "function", "add", "fn add() {}", "adds");
        assert_eq!(entity.embedding_text(), "adds\nfn add() {}");
    }
}
