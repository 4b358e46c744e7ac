//! Canonical solution shape shared by every solving backend.
//!
//! Steps travel on the wire as plain strings in one of three shapes:
//! pre-rendered markup, a `\text{Label:} body` pair, or plain math markup.
//! The shape is decided once, when a step enters the pipeline, so the
//! renderer never has to re-guess it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire prefix of a labeled step.
const LABEL_PREFIX: &str = "\\text{";

/// Delimiter closing the label part of a labeled step.
const LABEL_DELIMITER: &str = ":}";

/// One explanatory unit in a solution sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Step {
    /// Pre-rendered markup. Passed through to the display verbatim.
    Html(String),

    /// A `\text{Label:} body` pair. Label and body render independently:
    /// the label as inline text-mode math, the body in display mode.
    Labeled { label: String, body: String },

    /// Plain math markup, rendered in display mode.
    Math(String),
}

impl Step {
    /// Classify a raw wire string into its display shape.
    ///
    /// A `\text{` prefix without a closing `:}` stays `Math`, so malformed
    /// labels fall back to whole-string rendering on their own.
    pub fn from_raw(raw: &str) -> Self {
        if raw.contains('<') && raw.contains('>') {
            return Step::Html(raw.to_string());
        }

        if raw.starts_with(LABEL_PREFIX) {
            if let Some(delim) = raw.find(LABEL_DELIMITER) {
                let label = raw[LABEL_PREFIX.len()..delim].to_string();
                let body = raw[delim + LABEL_DELIMITER.len()..].trim_start().to_string();
                return Step::Labeled { label, body };
            }
        }

        Step::Math(raw.to_string())
    }

    /// Build a labeled step directly, without going through the wire shape.
    pub fn labeled(label: impl Into<String>, body: impl Into<String>) -> Self {
        Step::Labeled {
            label: label.into(),
            body: body.into(),
        }
    }

    /// True when the wire text carries nothing to display.
    pub fn is_empty(&self) -> bool {
        match self {
            Step::Html(s) | Step::Math(s) => s.is_empty(),
            Step::Labeled { .. } => false,
        }
    }
}

impl fmt::Display for Step {
    /// Re-encode the step to its canonical wire string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Html(s) | Step::Math(s) => write!(f, "{}", s),
            Step::Labeled { label, body } => write!(f, "\\text{{{}:}} {}", label, body),
        }
    }
}

impl From<String> for Step {
    fn from(raw: String) -> Self {
        Step::from_raw(&raw)
    }
}

impl From<Step> for String {
    fn from(step: Step) -> Self {
        step.to_string()
    }
}

/// The canonical result every backend normalizes into.
///
/// Constructed once per submission and immutable afterwards. `steps` is the
/// pedagogical sequence shown to the user; `solution` is the single
/// terminal answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    steps: Vec<Step>,
    solution: Step,
}

impl SolveResult {
    /// Build a result, enforcing the canonical invariants: empty steps are
    /// dropped, and a placeholder is injected when nothing remains.
    pub fn new(steps: Vec<Step>, solution: Step) -> Self {
        let mut steps: Vec<Step> = steps.into_iter().filter(|s| !s.is_empty()).collect();
        if steps.is_empty() {
            steps.push(Step::from_raw("No steps available"));
        }
        Self { steps, solution }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn solution(&self) -> &Step {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prerendered_markup() {
        let step = Step::from_raw("<span class=\"katex\">x</span>");
        assert!(matches!(step, Step::Html(_)));
    }

    #[test]
    fn test_classify_labeled() {
        let step = Step::from_raw("\\text{Result:} x=2");
        assert_eq!(
            step,
            Step::Labeled {
                label: "Result".to_string(),
                body: "x=2".to_string()
            }
        );
    }

    #[test]
    fn test_classify_malformed_label_as_math() {
        // No closing `:}` after the prefix.
        let step = Step::from_raw("\\text{Result x=2");
        assert_eq!(step, Step::Math("\\text{Result x=2".to_string()));
    }

    #[test]
    fn test_classify_plain_math() {
        let step = Step::from_raw("x^2 + 2x - 3 = 0");
        assert!(matches!(step, Step::Math(_)));
    }

    #[test]
    fn test_labeled_wire_round_trip() {
        let step = Step::from_raw("\\text{Input:} 2x+3=7");
        assert_eq!(step.to_string(), "\\text{Input:} 2x+3=7");
        assert_eq!(Step::from_raw(&step.to_string()), step);
    }

    #[test]
    fn test_colon_space_brace_is_not_a_label() {
        // The local evaluator writes `\text{Simplify: }` with a space before
        // the brace; that shape renders whole-string, like the original.
        let step = Step::from_raw("\\text{Simplify: } 2+2");
        assert!(matches!(step, Step::Math(_)));
    }

    #[test]
    fn test_result_drops_empty_steps() {
        let result = SolveResult::new(
            vec![Step::from_raw("a"), Step::from_raw(""), Step::from_raw("b")],
            Step::from_raw("b"),
        );
        assert_eq!(result.steps().len(), 2);
    }

    #[test]
    fn test_result_injects_placeholder() {
        let result = SolveResult::new(vec![], Step::from_raw("No solution found"));
        assert_eq!(result.steps().len(), 1);
        assert_eq!(result.steps()[0].to_string(), "No steps available");
    }

    #[test]
    fn test_step_serde_as_wire_string() {
        let json = "\"\\\\text{Result:} 42\"";
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(
            step,
            Step::Labeled {
                label: "Result".to_string(),
                body: "42".to_string()
            }
        );
        assert_eq!(serde_json::to_string(&step).unwrap(), json);
    }
}
