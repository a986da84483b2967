//! Minimal YAML frontmatter writer.
//!
//! Supports exactly the shapes digest documents need: numbers, strings
//! (quoted, or block literals when they span lines), lists of strings and
//! lists of flat records. Only double quotes are escaped.

/// Frontmatter delimiter line
const DELIMITER: &str = "---";

/// A scalar inside a record entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

/// A top-level frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
    /// Omitted from the output entirely
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    Records(Vec<Vec<(String, FieldValue)>>),
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FrontmatterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for FrontmatterValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FrontmatterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<String>> for FrontmatterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<FrontmatterValue>> From<Option<T>> for FrontmatterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered set of frontmatter fields.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    fields: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Fields render in insertion order.
    pub fn field(mut self, key: &str, value: impl Into<FrontmatterValue>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    /// Renders the block, delimiters included, without a trailing newline.
    pub fn render(&self) -> String {
        let mut lines = vec![DELIMITER.to_string()];

        for (key, value) in &self.fields {
            match value {
                FrontmatterValue::Null => {}
                FrontmatterValue::Int(n) => lines.push(format!("{key}: {n}")),
                FrontmatterValue::Float(n) => lines.push(format!("{key}: {}", format_float(*n))),
                FrontmatterValue::Str(s) if s.contains('\n') => {
                    lines.push(format!("{key}: |"));
                    lines.extend(s.split('\n').map(|line| format!("  {line}")));
                }
                FrontmatterValue::Str(s) => lines.push(format!("{key}: \"{}\"", escape(s))),
                FrontmatterValue::List(items) if items.is_empty() => {
                    lines.push(format!("{key}: []"));
                }
                FrontmatterValue::Records(records) if records.is_empty() => {
                    lines.push(format!("{key}: []"));
                }
                FrontmatterValue::List(items) => {
                    lines.push(format!("{key}:"));
                    lines.extend(items.iter().map(|item| format!("  - \"{}\"", escape(item))));
                }
                FrontmatterValue::Records(records) => {
                    lines.push(format!("{key}:"));
                    for record in records {
                        lines.push("  -".to_string());
                        for (field, value) in record {
                            lines.push(format!("    {field}: {}", render_field(value)));
                        }
                    }
                }
            }
        }

        lines.push(DELIMITER.to_string());
        lines.join("\n")
    }
}

fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

fn render_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "null".to_string(),
        FieldValue::Int(n) => n.to_string(),
        FieldValue::Float(n) => format_float(*n),
        FieldValue::Str(s) => format!("\"{}\"", escape(s)),
    }
}

/// Whole floats keep a `.0` so scores stay recognisably fractional.
fn format_float(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}
