//! Template rendering for the replacement subtitle track
//!
//! Templates are printf-style format strings restricted to four variables:
//! `%(gx)`, `%(gy)`, `%(gz)` and `%(v_kmh)`, each with an optional width and
//! precision and a mandatory `f` conversion, e.g. `%(v_kmh)6.1f`. `%%` is a
//! literal percent; all other text passes through unchanged. Templates are
//! compiled and validated once, before any frame is processed, so a bad
//! configuration can never surface mid-stream.

use crate::error::{DcstError, Result};
use crate::types::RenderContext;
use regex::Regex;
use std::sync::OnceLock;

/// Template the CLI renders with when the user supplies none
pub const DEFAULT_TEMPLATE: &str = "%(gx).2f %(gy).2f %(gz).2f %(v_kmh).0f km/h";

/// Decimal places of a bare `f` conversion, matching printf
const DEFAULT_PRECISION: usize = 6;

/// `%(name)[width][.precision]f`
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"%\(([A-Za-z_][A-Za-z0-9_]*)\)(\d+)?(?:\.(\d+))?f").unwrap()
    })
}

/// The recognized template variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variable {
    Gx,
    Gy,
    Gz,
    VKmh,
}

impl Variable {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "gx" => Some(Variable::Gx),
            "gy" => Some(Variable::Gy),
            "gz" => Some(Variable::Gz),
            "v_kmh" => Some(Variable::VKmh),
            _ => None,
        }
    }

    fn value(self, ctx: &RenderContext) -> f64 {
        match self {
            Variable::Gx => ctx.gx,
            Variable::Gy => ctx.gy,
            Variable::Gz => ctx.gz,
            Variable::VKmh => ctx.v_kmh,
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder {
        variable: Variable,
        width: Option<usize>,
        precision: usize,
    },
}

/// A validated, compiled render template
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile and validate a template source string.
    ///
    /// Unknown variable names and unsupported conversions are configuration
    /// errors and fail here, eagerly, never during frame processing.
    pub fn compile(source: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for captures in placeholder_re().captures_iter(source) {
            let whole = captures.get(0).unwrap();
            push_literal(&mut segments, &source[last_end..whole.start()])?;
            last_end = whole.end();

            let name = captures.get(1).unwrap().as_str();
            let variable = Variable::from_name(name)
                .ok_or_else(|| DcstError::UnknownVariable(name.to_string()))?;
            let width = captures
                .get(2)
                .map(|m| m.as_str().parse::<usize>())
                .transpose()
                .map_err(|_| DcstError::InvalidTemplate("width out of range".into()))?;
            let precision = captures
                .get(3)
                .map(|m| m.as_str().parse::<usize>())
                .transpose()
                .map_err(|_| DcstError::InvalidTemplate("precision out of range".into()))?
                .unwrap_or(DEFAULT_PRECISION);

            segments.push(Segment::Placeholder {
                variable,
                width,
                precision,
            });
        }

        push_literal(&mut segments, &source[last_end..])?;
        Ok(Template { segments })
    }

    /// Expand the template against one frame's variable values.
    ///
    /// Infallible: everything that could go wrong was rejected at compile.
    pub fn render(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder {
                    variable,
                    width,
                    precision,
                } => {
                    let value = variable.value(ctx);
                    match width {
                        Some(w) => {
                            out.push_str(&format!("{:>w$.p$}", value, w = *w, p = *precision))
                        }
                        None => out.push_str(&format!("{:.p$}", value, p = *precision)),
                    }
                }
            }
        }
        out
    }
}

/// Append inter-placeholder text, resolving `%%` and rejecting any other
/// percent conversion left over after placeholder extraction.
fn push_literal(segments: &mut Vec<Segment>, raw: &str) -> Result<()> {
    let mut text = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => text.push('%'),
            trailer => {
                return Err(DcstError::InvalidTemplate(format!(
                    "unsupported conversion '%{}'",
                    trailer.map(String::from).unwrap_or_default()
                )))
            }
        }
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text));
    }
    Ok(())
}
