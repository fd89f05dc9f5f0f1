//! Property-based tests using proptest
//!
//! Placeholder numbering and parameter alignment of the query assembler
//! must hold for any mix of conditions, sorts and limits.

use proptest::prelude::*;

use mock_commerce::application::validation::parse_limit;
use mock_commerce::infrastructure::persistence::{QueryBuilder, QueryBuilderError, QueryParam};

const BASE: &str = "SELECT id FROM products";
const COLUMNS: &[&str] = &["id", "title", "price", "category_id"];

/// One builder call
#[derive(Debug, Clone)]
enum Step {
    Condition(String),
    Limit(i64),
    Sort(&'static str),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => "[a-z]{1,8}".prop_map(Step::Condition),
        1 => (0i64..1000).prop_map(Step::Limit),
        1 => prop::sample::select(vec!["id", "title DESC", "price asc", "category_id"])
            .prop_map(Step::Sort),
    ]
}

/// Every `$n` in the text, in order of appearance
fn placeholders(sql: &str) -> Vec<usize> {
    sql.split('$')
        .skip(1)
        .filter_map(|chunk| {
            let digits: String = chunk.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .collect()
}

proptest! {
    /// N conditions produce $1..$N in call order with aligned values
    #[test]
    fn conditions_are_numbered_in_call_order(values in prop::collection::vec("[a-z]{1,12}", 0..12)) {
        let mut builder = QueryBuilder::new(BASE, COLUMNS);
        for value in &values {
            builder.add_condition("title ILIKE ${}", format!("%{}%", value));
        }

        let (sql, params) = builder.build();

        let expected: Vec<usize> = (1..=values.len()).collect();
        prop_assert_eq!(placeholders(&sql), expected);
        prop_assert_eq!(params.len(), values.len());
        for (param, value) in params.iter().zip(&values) {
            prop_assert_eq!(param, &QueryParam::Text(format!("%{}%", value)));
        }
    }

    /// Placeholders stay unique and contiguous however calls interleave
    #[test]
    fn numbering_is_contiguous_for_any_call_sequence(steps in prop::collection::vec(step_strategy(), 0..20)) {
        let mut builder = QueryBuilder::new(BASE, COLUMNS);
        let mut last_limit = None;
        for step in &steps {
            match step {
                Step::Condition(value) => {
                    builder.add_condition("title = ${}", value.as_str());
                }
                Step::Limit(limit) => {
                    builder.set_limit(*limit).unwrap();
                    last_limit = Some(*limit);
                }
                Step::Sort(expr) => {
                    builder.set_sort_by(expr).unwrap();
                }
            }
        }

        let (sql, params) = builder.build();
        let mut numbers = placeholders(&sql);
        numbers.sort_unstable();

        let expected: Vec<usize> = (1..=params.len()).collect();
        prop_assert_eq!(numbers, expected);
        prop_assert_eq!(builder.next_placeholder(), params.len() + 1);
        prop_assert_eq!(sql.matches(" ORDER BY ").count(), usize::from(sql.contains("ORDER BY")));

        if let Some(limit) = last_limit {
            let slot = sql
                .rsplit("LIMIT $")
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap();
            prop_assert_eq!(&params[slot - 1], &QueryParam::Integer(limit));
        }
    }

    /// Building never mutates
    #[test]
    fn build_is_repeatable(values in prop::collection::vec("[a-z]{1,6}", 0..6), limit in 0i64..50) {
        let mut builder = QueryBuilder::new(BASE, COLUMNS);
        for value in &values {
            builder.add_condition("title = ${}", value.as_str());
        }
        builder.set_limit(limit).unwrap();

        prop_assert_eq!(builder.build(), builder.build());
    }

    /// Negative limits never reserve a placeholder
    #[test]
    fn negative_limit_is_rejected(limit in i64::MIN..0) {
        let mut builder = QueryBuilder::new(BASE, COLUMNS);
        builder.add_condition("id = ${}", 1_i64);

        let err = builder.set_limit(limit).unwrap_err();
        prop_assert_eq!(err, QueryBuilderError::NegativeLimit(limit));
        prop_assert_eq!(builder.next_placeholder(), 2);
        prop_assert!(!builder.build().0.contains("LIMIT"));
    }

    /// Only allow-listed columns are accepted for sorting
    #[test]
    fn sort_outside_allow_list_is_rejected(column in "[a-z_]{1,12}") {
        prop_assume!(!COLUMNS.contains(&column.as_str()));

        let mut builder = QueryBuilder::new(BASE, COLUMNS);
        let result = builder.set_sort_by(&column);

        prop_assert!(
            matches!(result, Err(QueryBuilderError::InvalidSortColumn(_))),
            "expected InvalidSortColumn for {:?}",
            column
        );
        prop_assert_eq!(builder.build().0, BASE);
    }

    /// Numeric limit text within bounds parses to itself, larger values are capped
    #[test]
    fn parse_limit_caps_at_max(limit in 0i64..100_000, max in 1i64..1000) {
        let parsed = parse_limit(Some(limit.to_string().as_str()), max).unwrap();
        prop_assert_eq!(parsed, Some(limit.min(max)));
    }
}
