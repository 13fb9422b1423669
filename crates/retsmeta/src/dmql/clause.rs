use serde::{Deserialize, Serialize};
use std::fmt;

use super::sql::{SqlValue, SqlWriter, ToSql};

/// Boolean operator of a composite clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// AND/OR over an ordered, appendable list of clauses.
///
/// Every element is parenthesized when rendered, at any depth, so the output
/// never depends on the SQL engine's operator precedence. Two composites are
/// equal when their operators and element lists are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeClause {
    op: BoolOp,
    #[serde(default)]
    elements: Vec<SqlClause>,
}

impl CompositeClause {
    pub fn new(op: BoolOp) -> Self {
        Self {
            op,
            elements: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(BoolOp::And)
    }

    pub fn or() -> Self {
        Self::new(BoolOp::Or)
    }

    pub fn and_of(left: impl Into<SqlClause>, right: impl Into<SqlClause>) -> Self {
        Self::and().with(left).with(right)
    }

    pub fn or_of(left: impl Into<SqlClause>, right: impl Into<SqlClause>) -> Self {
        Self::or().with(left).with(right)
    }

    pub fn add(&mut self, clause: impl Into<SqlClause>) {
        self.elements.push(clause.into());
    }

    pub fn with(mut self, clause: impl Into<SqlClause>) -> Self {
        self.add(clause);
        self
    }

    pub fn op(&self) -> BoolOp {
        self.op
    }

    pub fn elements(&self) -> &[SqlClause] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ToSql for CompositeClause {
    fn to_sql(&self, out: &mut SqlWriter) {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                out.push(" ");
                out.push(self.op.keyword());
                out.push(" ");
            }
            out.push("(");
            element.to_sql(out);
            out.push(")");
        }
    }
}

impl fmt::Display for CompositeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.op.keyword())?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str("]")
    }
}

/// One node of a DMQL clause tree.
///
/// Literal values are always bound as `?` parameters. Column names and
/// [`SqlClause::Raw`] text are emitted as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SqlClause {
    /// SQL produced elsewhere, emitted verbatim.
    Raw { sql: String },
    Compare {
        column: String,
        op: CompareOp,
        value: SqlValue,
    },
    Between {
        column: String,
        low: SqlValue,
        high: SqlValue,
    },
    /// Membership in a lookup list. An empty list matches nothing.
    In {
        column: String,
        values: Vec<SqlValue>,
    },
    StartsWith { column: String, prefix: String },
    Contains { column: String, text: String },
    IsNull { column: String },
    Not { clause: Box<SqlClause> },
    Composite(CompositeClause),
}

impl SqlClause {
    pub fn raw(sql: impl Into<String>) -> Self {
        SqlClause::Raw { sql: sql.into() }
    }

    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<SqlValue>) -> Self {
        SqlClause::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equals(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    pub fn between(column: impl Into<String>, low: impl Into<SqlValue>, high: impl Into<SqlValue>) -> Self {
        SqlClause::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn one_of<V: Into<SqlValue>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        SqlClause::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        SqlClause::IsNull {
            column: column.into(),
        }
    }

    pub fn not(clause: impl Into<SqlClause>) -> Self {
        SqlClause::Not {
            clause: Box::new(clause.into()),
        }
    }
}

impl From<CompositeClause> for SqlClause {
    fn from(composite: CompositeClause) -> Self {
        SqlClause::Composite(composite)
    }
}

impl ToSql for SqlClause {
    fn to_sql(&self, out: &mut SqlWriter) {
        match self {
            SqlClause::Raw { sql } => out.push(sql),
            SqlClause::Compare { column, op, value } => {
                out.push(column);
                out.push(" ");
                out.push(op.as_sql());
                out.push(" ");
                out.bind(value.clone());
            }
            SqlClause::Between { column, low, high } => {
                out.push(column);
                out.push(" BETWEEN ");
                out.bind(low.clone());
                out.push(" AND ");
                out.bind(high.clone());
            }
            SqlClause::In { values, .. } if values.is_empty() => out.push("1 = 0"),
            SqlClause::In { column, values } => {
                out.push(column);
                out.push(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(", ");
                    }
                    out.bind(value.clone());
                }
                out.push(")");
            }
            SqlClause::StartsWith { column, prefix } => {
                out.push(column);
                out.push(" LIKE ");
                out.bind(SqlValue::Text(format!("{}%", escape_like(prefix))));
                out.push(LIKE_ESCAPE);
            }
            SqlClause::Contains { column, text } => {
                out.push(column);
                out.push(" LIKE ");
                out.bind(SqlValue::Text(format!("%{}%", escape_like(text))));
                out.push(LIKE_ESCAPE);
            }
            SqlClause::IsNull { column } => {
                out.push(column);
                out.push(" IS NULL");
            }
            SqlClause::Not { clause } => {
                out.push("NOT (");
                clause.to_sql(out);
                out.push(")");
            }
            SqlClause::Composite(composite) => composite.to_sql(out),
        }
    }
}

impl fmt::Display for SqlClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlClause::Composite(composite) => fmt::Display::fmt(composite, f),
            leaf => {
                let mut out = SqlWriter::inlined();
                leaf.to_sql(&mut out);
                f.write_str(&out.finish().text)
            }
        }
    }
}

/// Wildcards in LIKE operands are escaped with a backslash, which not every
/// engine treats as the default escape character.
const LIKE_ESCAPE: &str = " ESCAPE '\\'";

fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
