//! Step renderer - converts canonical steps into safe HTML fragments.
//!
//! The math markup engine itself is an external collaborator behind the
//! `MathEngine` trait. Whatever the engine does, rendering never raises to
//! the caller: a failing fragment degrades to escaped plain text and the
//! rest of the result stays intact.

use crate::error::RenderError;
use crate::solution::{SolveResult, Step};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Block-centered vs. inline-with-text math rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Inline,
    Display,
}

/// The consumed markup engine: math markup in, safe HTML fragment out.
pub trait MathEngine {
    fn render(&self, markup: &str, mode: DisplayMode) -> Result<String, RenderError>;
}

/// Minimal built-in engine: escapes the markup and wraps it in a math
/// container. Embedders inject a real typesetting engine; this one keeps
/// the pipeline usable without it.
#[derive(Debug, Default)]
pub struct HtmlFallbackEngine;

impl MathEngine for HtmlFallbackEngine {
    fn render(&self, markup: &str, mode: DisplayMode) -> Result<String, RenderError> {
        let escaped = escape_html(markup);
        Ok(match mode {
            DisplayMode::Inline => format!("<span class=\"math math-inline\">{}</span>", escaped),
            DisplayMode::Display => format!("<div class=\"math math-display\">{}</div>", escaped),
        })
    }
}

/// A displayable HTML fragment produced from one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment(String);

impl RenderedFragment {
    pub fn as_html(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render the step sequence of a result, collapsing repeated steps to their
/// first occurrence. The solution is not part of this sequence; render it
/// with [`render_solution`].
pub fn render_steps(result: &SolveResult, engine: &dyn MathEngine) -> Vec<RenderedFragment> {
    let mut seen = HashSet::new();
    let mut fragments = Vec::new();

    for step in result.steps() {
        if seen.insert(step.to_string()) {
            fragments.push(render_step(step, engine));
        }
    }

    fragments
}

/// Render the final answer. Exempt from step deduplication.
pub fn render_solution(result: &SolveResult, engine: &dyn MathEngine) -> RenderedFragment {
    render_step(result.solution(), engine)
}

fn render_step(step: &Step, engine: &dyn MathEngine) -> RenderedFragment {
    let html = match step {
        Step::Html(html) => html.clone(),
        Step::Labeled { label, body } => {
            let label_markup = format!("\\text{{{}:}}", label);
            let label_html = render_or_fallback(engine, &label_markup, DisplayMode::Inline);
            let body_html = render_or_fallback(engine, body, DisplayMode::Display);
            format!("{} {}", label_html, body_html)
        }
        Step::Math(markup) => render_or_fallback(engine, markup, DisplayMode::Display),
    };

    RenderedFragment(html)
}

fn render_or_fallback(engine: &dyn MathEngine, markup: &str, mode: DisplayMode) -> String {
    match engine.render(markup, mode) {
        Ok(html) => html,
        Err(e) => {
            debug!("Math rendering failed, using plain text: {}", e);
            format!("<span>{}</span>", escape_html(markup))
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Step;

    /// Engine that rejects everything, for exercising the fallback path.
    struct BrokenEngine;

    impl MathEngine for BrokenEngine {
        fn render(&self, _markup: &str, _mode: DisplayMode) -> Result<String, RenderError> {
            Err(RenderError("engine offline".to_string()))
        }
    }

    fn result_of(steps: &[&str], solution: &str) -> SolveResult {
        SolveResult::new(
            steps.iter().map(|s| Step::from_raw(s)).collect(),
            Step::from_raw(solution),
        )
    }

    #[test]
    fn test_prerendered_markup_passes_through() {
        let result = result_of(&["<b>already html</b>"], "42");
        let fragments = render_steps(&result, &HtmlFallbackEngine);
        assert_eq!(fragments[0].as_html(), "<b>already html</b>");
    }

    #[test]
    fn test_labeled_step_splits_into_two_fragments() {
        let result = result_of(&["\\text{Result:} 42"], "42");
        let fragments = render_steps(&result, &HtmlFallbackEngine);
        assert_eq!(
            fragments[0].as_html(),
            "<span class=\"math math-inline\">\\text{Result:}</span> \
             <div class=\"math math-display\">42</div>"
        );
    }

    #[test]
    fn test_malformed_label_renders_whole_string() {
        let result = result_of(&["\\text{Result 42"], "42");
        let fragments = render_steps(&result, &HtmlFallbackEngine);
        assert_eq!(
            fragments[0].as_html(),
            "<div class=\"math math-display\">\\text{Result 42</div>"
        );
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let result = result_of(&["a", "a", "b"], "b");
        let fragments = render_steps(&result, &HtmlFallbackEngine);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].as_html().contains(">a<"));
        assert!(fragments[1].as_html().contains(">b<"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let result = result_of(&["a", "a", "b"], "b");
        let first = render_steps(&result, &HtmlFallbackEngine);
        let second = render_steps(&result, &HtmlFallbackEngine);
        assert_eq!(first, second);
    }

    #[test]
    fn test_solution_is_exempt_from_dedup() {
        let result = result_of(&["x=2"], "x=2");
        let fragments = render_steps(&result, &HtmlFallbackEngine);
        let solution = render_solution(&result, &HtmlFallbackEngine);
        assert_eq!(fragments.len(), 1);
        assert_eq!(solution.as_html(), fragments[0].as_html());
    }

    #[test]
    fn test_engine_failure_degrades_to_plain_text() {
        let result = result_of(&["x^2"], "x^2");
        let fragments = render_steps(&result, &BrokenEngine);
        assert_eq!(fragments[0].as_html(), "<span>x^2</span>");
    }

    #[test]
    fn test_engine_failure_on_labeled_body_degrades_body_only() {
        let step = Step::labeled("Result", "42");
        let fragment = render_step(&step, &BrokenEngine);
        assert_eq!(
            fragment.as_html(),
            "<span>\\text{Result:}</span> <span>42</span>"
        );
    }

    #[test]
    fn test_fallback_escapes_markup() {
        let result = result_of(&["1 < 2 & 3"], "true");
        let fragments = render_steps(&result, &BrokenEngine);
        assert_eq!(fragments[0].as_html(), "<span>1 &lt; 2 &amp; 3</span>");
    }
}
