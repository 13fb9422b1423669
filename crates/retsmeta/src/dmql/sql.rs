use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Int(i)
    }
}

impl From<i32> for SqlValue {
    fn from(i: i32) -> Self {
        SqlValue::Int(i64::from(i))
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

/// Compiled predicate: SQL text with `?` placeholders and their values in
/// placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlStatement {
    pub text: String,
    pub params: Vec<SqlValue>,
}

/// Accumulates SQL text and bound parameters.
#[derive(Debug, Default)]
pub struct SqlWriter {
    statement: SqlStatement,
    inline: bool,
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that renders values as quoted literals instead of binding
    /// them. For logs and display only; never execute its output.
    pub fn inlined() -> Self {
        Self {
            inline: true,
            ..Self::default()
        }
    }

    pub fn push(&mut self, sql: &str) {
        self.statement.text.push_str(sql);
    }

    /// Emit a placeholder for `value`, or the literal when inlining.
    pub fn bind(&mut self, value: SqlValue) {
        if self.inline {
            self.statement.text.push_str(&value.to_string());
        } else {
            self.statement.text.push('?');
            self.statement.params.push(value);
        }
    }

    pub fn finish(self) -> SqlStatement {
        self.statement
    }
}

/// Anything that renders itself as a SQL predicate.
pub trait ToSql {
    fn to_sql(&self, out: &mut SqlWriter);

    fn compile(&self) -> SqlStatement {
        let mut out = SqlWriter::new();
        self.to_sql(&mut out);
        out.finish()
    }
}
