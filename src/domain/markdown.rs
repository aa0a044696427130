//! Fenced Python code extraction from markdown documents.

use regex::Regex;

use crate::error::HubError;

/// Body returned by the Python endpoint when a document has no Python fences.
pub const NO_PYTHON_CODE: &str = "No Python code found in this document.";

/// Opening fence with a `py`/`python` info string (attributes allowed,
/// `pycon` and friends excluded), lazily matched up to a closing fence at
/// the start of a line.
const PYTHON_FENCE: &str = r"(?ms)^[ \t]*```[ \t]*(?:python|py)(?:[ \t][^\n]*)?\r?\n(.*?)^[ \t]*```";

/// Extracts fenced Python blocks from markdown.
#[derive(Debug, Clone)]
pub struct PythonExtractor {
    fence: Regex,
}

impl PythonExtractor {
    /// Compiles the fence pattern.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Internal`] if the pattern fails to compile.
    pub fn new() -> Result<Self, HubError> {
        let fence = Regex::new(PYTHON_FENCE).map_err(|e| HubError::Internal(e.to_string()))?;
        Ok(Self { fence })
    }

    /// Returns every Python block in document order, joined by one blank
    /// line, or `None` if the document has none.
    #[must_use]
    pub fn extract(&self, markdown: &str) -> Option<String> {
        let blocks: Vec<&str> = self
            .fence
            .captures_iter(markdown)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end_matches(['\n', '\r']))
            .collect();

        if blocks.is_empty() {
            None
        } else {
            Some(blocks.join("\n\n"))
        }
    }

    /// Like [`Self::extract`], falling back to [`NO_PYTHON_CODE`].
    #[must_use]
    pub fn extract_or_sentinel(&self, markdown: &str) -> String {
        self.extract(markdown)
            .unwrap_or_else(|| NO_PYTHON_CODE.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn extractor() -> PythonExtractor {
        let Ok(extractor) = PythonExtractor::new() else {
            panic!("pattern should compile");
        };
        extractor
    }

    #[test]
    fn joins_blocks_in_document_order() {
        let md = "# Title\n\n```python\nimport instructor\n```\n\ntext\n\n```py\nprint(1)\nprint(2)\n```\n";
        assert_eq!(
            extractor().extract(md).as_deref(),
            Some("import instructor\n\nprint(1)\nprint(2)")
        );
    }

    #[test]
    fn ignores_other_languages() {
        let md = "```bash\npip install instructor\n```\n\n```pycon\n>>> 1\n```\n\n```json\n{}\n```\n";
        assert_eq!(extractor().extract(md), None);
    }

    #[test]
    fn accepts_info_string_attributes() {
        let md = "```python title=\"run.py\" hl_lines=\"2\"\nfrom pydantic import BaseModel\n```\n";
        assert_eq!(
            extractor().extract(md).as_deref(),
            Some("from pydantic import BaseModel")
        );
    }

    #[test]
    fn indented_fences_inside_admonitions() {
        let md = "!!! note\n\n    ```python\n    x = 1\n    ```\n";
        assert_eq!(extractor().extract(md).as_deref(), Some("    x = 1"));
    }

    #[test]
    fn inline_backticks_do_not_open_a_block() {
        let md = "Use ```python``` fences.\n\n```python\nok = True\n```\n";
        assert_eq!(extractor().extract(md).as_deref(), Some("ok = True"));
    }

    #[test]
    fn crlf_documents_are_supported() {
        let md = "```python\r\na = 1\r\n```\r\n";
        assert_eq!(extractor().extract(md).as_deref(), Some("a = 1"));
    }

    #[test]
    fn sentinel_when_no_code() {
        assert_eq!(
            extractor().extract_or_sentinel("just prose"),
            NO_PYTHON_CODE
        );
    }
}
