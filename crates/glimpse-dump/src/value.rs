use std::fmt::Write as _;

use serde_json::Value;

/// Field visibility on a dumped object, rendered as a `:protected` /
/// `:private` key suffix that the formatter colorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// A named field of a dumped object.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub visibility: Visibility,
    pub value: DumpValue,
}

impl Field {
    pub fn public(name: impl Into<String>, value: impl Into<DumpValue>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            value: value.into(),
        }
    }

    pub fn protected(name: impl Into<String>, value: impl Into<DumpValue>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Protected,
            value: value.into(),
        }
    }

    pub fn private(name: impl Into<String>, value: impl Into<DumpValue>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Private,
            value: value.into(),
        }
    }

    fn key(&self) -> String {
        match self.visibility {
            Visibility::Public => self.name.clone(),
            Visibility::Protected => format!("{}:protected", self.name),
            Visibility::Private => format!("{}:private", self.name),
        }
    }
}

/// Explicit value model for dumps.
///
/// Rendering and type labeling are a match over these variants; nothing
/// is inspected at runtime. `Object` carries its type tag explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum DumpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<(String, DumpValue)>),
    Object { class: String, fields: Vec<Field> },
}

impl DumpValue {
    pub fn object(class: impl Into<String>, fields: Vec<Field>) -> Self {
        DumpValue::Object {
            class: class.into(),
            fields,
        }
    }

    /// Sequentially indexed array, the common case.
    pub fn list(items: Vec<DumpValue>) -> Self {
        DumpValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
        )
    }

    /// Type label shown in the dump header. Objects also name their class.
    pub fn type_label(&self) -> String {
        match self {
            DumpValue::Null => "<i>null</i>".to_string(),
            DumpValue::Bool(_) => "<i>bool</i>".to_string(),
            DumpValue::Int(_) => "<i>int</i>".to_string(),
            DumpValue::Float(_) => "<i>float</i>".to_string(),
            DumpValue::Str(_) => "<i>string</i>".to_string(),
            DumpValue::Array(_) => "<i>array</i>".to_string(),
            DumpValue::Object { class, .. } => {
                format!("<i>object</i> (of type: <i>{}</i>)", class)
            }
        }
    }

    /// Render in the classic indented `[key] => value` style.
    ///
    /// Line shape is load-bearing: a nested group's opening paren ends a
    /// line preceded by whitespace and its closing paren ends a line of
    /// its own, which is exactly what the toggle rewriting keys on.
    /// Top-level parens sit at column zero and stay uncollapsible.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        match self {
            DumpValue::Null => {}
            DumpValue::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            DumpValue::Int(value) => {
                let _ = write!(out, "{}", value);
            }
            DumpValue::Float(value) => {
                let _ = write!(out, "{}", value);
            }
            DumpValue::Str(value) => out.push_str(value),
            DumpValue::Array(entries) => {
                out.push_str("Array\n");
                self.render_block(
                    out,
                    indent,
                    entries.iter().map(|(key, value)| (key.clone(), value)),
                );
            }
            DumpValue::Object { class, fields } => {
                let _ = writeln!(out, "{} Object", class);
                self.render_block(
                    out,
                    indent,
                    fields.iter().map(|field| (field.key(), &field.value)),
                );
            }
        }
    }

    fn render_block<'a>(
        &self,
        out: &mut String,
        indent: usize,
        entries: impl Iterator<Item = (String, &'a DumpValue)>,
    ) {
        let pad = " ".repeat(indent);
        out.push_str(&pad);
        out.push_str("(\n");
        for (key, value) in entries {
            let _ = write!(out, "{}    [{}] => ", pad, key);
            value.render_into(out, indent + 8);
            out.push('\n');
        }
        out.push_str(&pad);
        out.push_str(")\n");
    }
}

impl From<bool> for DumpValue {
    fn from(value: bool) -> Self {
        DumpValue::Bool(value)
    }
}

impl From<i32> for DumpValue {
    fn from(value: i32) -> Self {
        DumpValue::Int(value.into())
    }
}

impl From<i64> for DumpValue {
    fn from(value: i64) -> Self {
        DumpValue::Int(value)
    }
}

impl From<f64> for DumpValue {
    fn from(value: f64) -> Self {
        DumpValue::Float(value)
    }
}

impl From<&str> for DumpValue {
    fn from(value: &str) -> Self {
        DumpValue::Str(value.to_string())
    }
}

impl From<String> for DumpValue {
    fn from(value: String) -> Self {
        DumpValue::Str(value)
    }
}

impl From<Value> for DumpValue {
    /// JSON objects become string-keyed arrays; there is no class tag to
    /// carry over.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DumpValue::Null,
            Value::Bool(b) => DumpValue::Bool(b),
            Value::Number(number) => match number.as_i64() {
                Some(int) => DumpValue::Int(int),
                None => DumpValue::Float(number.as_f64().unwrap_or_default()),
            },
            Value::String(s) => DumpValue::Str(s),
            Value::Array(items) => {
                DumpValue::list(items.into_iter().map(DumpValue::from).collect())
            }
            Value::Object(map) => DumpValue::Array(
                map.into_iter()
                    .map(|(key, value)| (key, DumpValue::from(value)))
                    .collect(),
            ),
        }
    }
}
