//! Dynamic SELECT assembly with positional placeholders
//!
//! Repositories start from a trusted base query and add optional filters,
//! a sort and a limit. Values never reach the SQL text; they are returned
//! separately, ordered so that position `i` binds placeholder `$i+1`.

use std::fmt;

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use thiserror::Error;

/// Marker inside a condition fragment that is replaced by the reserved
/// placeholder number, e.g. `"title ILIKE ${}"`.
pub const PLACEHOLDER_MARKER: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryBuilderError {
    #[error("Invalid sort column: {0}")]
    InvalidSortColumn(String),

    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("Limit cannot be negative: {0}")]
    NegativeLimit(i64),
}

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<&str> for QueryParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryParam {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryParam {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for QueryParam {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = QueryBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(QueryBuilderError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// Sort column checked against an allow-list, plus direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    column: &'static str,
    direction: SortDirection,
}

impl SortClause {
    /// Parse `column` or `column ASC|DESC`.
    ///
    /// The returned column is the allow-list entry itself, so caller text
    /// never ends up in the query.
    pub fn parse(expr: &str, allowed: &[&'static str]) -> Result<Self, QueryBuilderError> {
        let mut parts = expr.split_whitespace();
        let requested = parts
            .next()
            .ok_or_else(|| QueryBuilderError::InvalidSortColumn(expr.to_string()))?;

        let column = allowed
            .iter()
            .copied()
            .find(|candidate| *candidate == requested)
            .ok_or_else(|| QueryBuilderError::InvalidSortColumn(requested.to_string()))?;

        let direction = match parts.next() {
            Some(dir) => dir.parse::<SortDirection>()?,
            None => SortDirection::Asc,
        };

        if let Some(extra) = parts.next() {
            return Err(QueryBuilderError::InvalidSortDirection(extra.to_string()));
        }

        Ok(Self { column, direction })
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for SortClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction.as_sql())
    }
}

#[derive(Debug, Clone)]
struct Condition {
    fragment: String,
    placeholder: usize,
}

/// Incrementally composes a parameterized SELECT statement.
///
/// ```
/// use mock_commerce::infrastructure::persistence::{QueryBuilder, QueryParam};
///
/// let mut qb = QueryBuilder::new("SELECT id FROM t", &["id", "title"]);
/// qb.add_condition("title ILIKE ${}", "%foo%");
/// qb.set_limit(5).unwrap();
///
/// let (sql, params) = qb.build();
/// assert_eq!(sql, "SELECT id FROM t WHERE title ILIKE $1 LIMIT $2");
/// assert_eq!(params, vec![QueryParam::from("%foo%"), QueryParam::Integer(5)]);
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    sortable_columns: &'static [&'static str],
    conditions: Vec<Condition>,
    params: Vec<QueryParam>,
    sort: Option<SortClause>,
    limit_slot: Option<usize>,
}

impl QueryBuilder {
    /// `base` must not already carry WHERE, ORDER BY or LIMIT clauses.
    pub fn new(base: impl Into<String>, sortable_columns: &'static [&'static str]) -> Self {
        Self {
            base: base.into(),
            sortable_columns,
            conditions: Vec::new(),
            params: Vec::new(),
            sort: None,
            limit_slot: None,
        }
    }

    /// Placeholder number the next bound value will receive
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    fn reserve(&mut self, value: QueryParam) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Append a condition joined to the others with AND.
    ///
    /// # Panics
    ///
    /// Panics if `fragment` does not contain exactly one
    /// [`PLACEHOLDER_MARKER`]. Fragments are written at call sites, so this
    /// is a programming error rather than bad input.
    pub fn add_condition(&mut self, fragment: &str, value: impl Into<QueryParam>) -> &mut Self {
        let markers = fragment.matches(PLACEHOLDER_MARKER).count();
        assert!(
            markers == 1,
            "condition fragment must contain exactly one `{}` marker, found {} in {:?}",
            PLACEHOLDER_MARKER,
            markers,
            fragment
        );

        let placeholder = self.reserve(value.into());
        self.conditions.push(Condition {
            fragment: fragment.to_string(),
            placeholder,
        });
        self
    }

    /// Set the ORDER BY clause, replacing any previous one.
    ///
    /// Rejected input leaves the current sort untouched.
    pub fn set_sort_by(&mut self, expr: &str) -> Result<&mut Self, QueryBuilderError> {
        let clause = SortClause::parse(expr, self.sortable_columns)?;
        self.sort = Some(clause);
        Ok(self)
    }

    /// Set the row limit, replacing any previous one.
    ///
    /// The first call reserves a placeholder; later calls reuse it.
    pub fn set_limit(&mut self, limit: i64) -> Result<&mut Self, QueryBuilderError> {
        if limit < 0 {
            return Err(QueryBuilderError::NegativeLimit(limit));
        }

        match self.limit_slot {
            Some(slot) => self.params[slot - 1] = QueryParam::Integer(limit),
            None => {
                let slot = self.reserve(QueryParam::Integer(limit));
                self.limit_slot = Some(slot);
            }
        }
        Ok(self)
    }

    /// Render the statement and the values to bind, in placeholder order.
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut sql = self.base.clone();

        if !self.conditions.is_empty() {
            let clauses: Vec<String> = self
                .conditions
                .iter()
                .map(|c| {
                    c.fragment
                        .replacen(PLACEHOLDER_MARKER, &c.placeholder.to_string(), 1)
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if let Some(sort) = &self.sort {
            sql.push_str(" ORDER BY ");
            sql.push_str(&sort.to_string());
        }

        if let Some(slot) = self.limit_slot {
            sql.push_str(&format!(" LIMIT ${}", slot));
        }

        (sql, self.params.clone())
    }
}

/// `ILIKE` pattern matching `value` anywhere in the column
///
/// `%`, `_` and `\` in `value` are escaped with a backslash, Postgres's default
/// `LIKE` escape character, so they match themselves.
pub fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Attach `params` to a sqlx query in placeholder order
pub fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: Vec<QueryParam>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for param in params {
        query = match param {
            QueryParam::Text(value) => query.bind(value),
            QueryParam::Integer(value) => query.bind(value),
            QueryParam::Float(value) => query.bind(value),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["id", "title", "price"];

    fn builder() -> QueryBuilder {
        QueryBuilder::new("SELECT id FROM t", COLUMNS)
    }

    #[test]
    fn test_single_condition() {
        let mut qb = builder();
        qb.add_condition("title ILIKE ${}", "%foo%");

        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t WHERE title ILIKE $1");
        assert_eq!(params, vec![QueryParam::Text("%foo%".to_string())]);
    }

    #[test]
    fn test_condition_and_limit() {
        let mut qb = builder();
        qb.add_condition("title ILIKE ${}", "%foo%");
        qb.set_limit(5).unwrap();

        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t WHERE title ILIKE $1 LIMIT $2");
        assert_eq!(
            params,
            vec![QueryParam::Text("%foo%".to_string()), QueryParam::Integer(5)]
        );
    }

    #[test]
    fn test_empty_builder_returns_base() {
        let (sql, params) = builder().build();
        assert_eq!(sql, "SELECT id FROM t");
        assert!(params.is_empty());
    }

    #[test]
    fn test_conditions_joined_with_and_in_order() {
        let mut qb = builder();
        qb.add_condition("title ILIKE ${}", "%a%")
            .add_condition("category_id = ${}", 3i64)
            .add_condition("price < ${}", 9.5);

        let (sql, params) = qb.build();
        assert_eq!(
            sql,
            "SELECT id FROM t WHERE title ILIKE $1 AND category_id = $2 AND price < $3"
        );
        assert_eq!(
            params,
            vec![
                QueryParam::from("%a%"),
                QueryParam::Integer(3),
                QueryParam::Float(9.5)
            ]
        );
    }

    #[test]
    fn test_full_statement_clause_order() {
        let mut qb = builder();
        qb.add_condition("title ILIKE ${}", "%x%");
        qb.set_sort_by("price desc").unwrap();
        qb.set_limit(10).unwrap();

        let (sql, _) = qb.build();
        assert_eq!(
            sql,
            "SELECT id FROM t WHERE title ILIKE $1 ORDER BY price DESC LIMIT $2"
        );
    }

    #[test]
    fn test_sort_overwrites_previous() {
        let mut qb = builder();
        qb.set_sort_by("title").unwrap();
        qb.set_sort_by("price DESC").unwrap();

        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t ORDER BY price DESC");
        assert!(params.is_empty());
    }

    #[test]
    fn test_sort_defaults_to_ascending() {
        let mut qb = builder();
        qb.set_sort_by("id").unwrap();
        assert_eq!(qb.build().0, "SELECT id FROM t ORDER BY id ASC");
    }

    #[test]
    fn test_sort_outside_allow_list_rejected_and_state_kept() {
        let mut qb = builder();
        qb.set_sort_by("title").unwrap();

        let err = qb.set_sort_by("title; DROP TABLE t").unwrap_err();
        assert_eq!(err, QueryBuilderError::InvalidSortColumn("title;".to_string()));

        let err = qb.set_sort_by("password").unwrap_err();
        assert!(matches!(err, QueryBuilderError::InvalidSortColumn(_)));

        assert_eq!(qb.build().0, "SELECT id FROM t ORDER BY title ASC");
    }

    #[test]
    fn test_sort_with_bad_direction_rejected() {
        let mut qb = builder();
        let err = qb.set_sort_by("title sideways").unwrap_err();
        assert_eq!(
            err,
            QueryBuilderError::InvalidSortDirection("sideways".to_string())
        );

        let err = qb.set_sort_by("title ASC, id").unwrap_err();
        assert_eq!(err, QueryBuilderError::InvalidSortDirection("ASC,".to_string()));

        let err = qb.set_sort_by("title ASC extra").unwrap_err();
        assert!(matches!(err, QueryBuilderError::InvalidSortDirection(_)));

        assert_eq!(qb.build().0, "SELECT id FROM t");
    }

    #[test]
    fn test_empty_sort_rejected() {
        let mut qb = builder();
        assert!(matches!(
            qb.set_sort_by("   "),
            Err(QueryBuilderError::InvalidSortColumn(_))
        ));
    }

    #[test]
    fn test_negative_limit_rejected_without_reserving() {
        let mut qb = builder();
        assert_eq!(
            qb.set_limit(-1).unwrap_err(),
            QueryBuilderError::NegativeLimit(-1)
        );
        assert_eq!(qb.next_placeholder(), 1);

        qb.add_condition("title ILIKE ${}", "%foo%");
        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t WHERE title ILIKE $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_zero_limit_accepted() {
        let mut qb = builder();
        qb.set_limit(0).unwrap();
        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t LIMIT $1");
        assert_eq!(params, vec![QueryParam::Integer(0)]);
    }

    #[test]
    fn test_limit_overwrite_reuses_slot() {
        let mut qb = builder();
        qb.set_limit(5).unwrap();
        qb.set_limit(7).unwrap();
        qb.add_condition("title ILIKE ${}", "%foo%");

        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t WHERE title ILIKE $2 LIMIT $1");
        assert_eq!(
            params,
            vec![QueryParam::Integer(7), QueryParam::from("%foo%")]
        );
    }

    #[test]
    fn test_build_is_repeatable() {
        let mut qb = builder();
        qb.add_condition("title ILIKE ${}", "%foo%");
        qb.set_sort_by("id DESC").unwrap();
        qb.set_limit(3).unwrap();

        let first = qb.build();
        let second = qb.build();
        assert_eq!(first, second);
        assert_eq!(qb.next_placeholder(), 3);
    }

    #[test]
    fn test_value_is_never_interpolated() {
        let mut qb = builder();
        qb.add_condition("title = ${}", "'; DELETE FROM t; --");

        let (sql, params) = qb.build();
        assert_eq!(sql, "SELECT id FROM t WHERE title = $1");
        assert_eq!(params, vec![QueryParam::from("'; DELETE FROM t; --")]);
    }

    #[test]
    #[should_panic(expected = "exactly one")]
    fn test_fragment_without_marker_panics() {
        builder().add_condition("title ILIKE $1", "%foo%");
    }

    #[test]
    #[should_panic(expected = "exactly one")]
    fn test_fragment_with_two_markers_panics() {
        builder().add_condition("price BETWEEN ${} AND ${}", 1i64);
    }

    #[test]
    fn test_sort_clause_parse() {
        let clause = SortClause::parse("price DESC", COLUMNS).unwrap();
        assert_eq!(clause.column(), "price");
        assert_eq!(clause.direction(), SortDirection::Desc);
        assert_eq!(clause.to_string(), "price DESC");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("bar"), "%bar%");
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\d"), r"%c:\\d%");
        assert_eq!(contains_pattern(""), "%%");
    }
}
