use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::analysis::Statistics;
use crate::features::Feature;

/// Groups reported per category dataview.
pub const MAX_CATEGORIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub category: String,
    pub value: usize,
    pub agg: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub categories: Vec<CategoryEntry>,
    pub categories_count: usize,
    /// Features with a value in the column; `count + nulls` is the total.
    pub count: usize,
    /// Smallest and largest group sizes.
    pub max: usize,
    pub min: usize,
    /// Features where the column is missing or `null`.
    pub nulls: usize,
}

fn category_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(super) fn generate(features: &[Feature], column: &str) -> CategoryData {
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    let mut nulls = 0;
    for feature in features {
        match feature.property(column) {
            Some(value) => *groups.entry(category_key(value)).or_default() += 1,
            None => nulls += 1,
        }
    }

    let (min, max) = Statistics::count_range(groups.values().copied()).unwrap_or((0, 0));
    let categories_count = groups.len();
    let count = features.len() - nulls;

    // BTreeMap iteration is name-ordered, so the stable sort breaks count ties
    // alphabetically.
    let mut sorted: Vec<(String, usize)> = groups.into_iter().collect();
    sorted.sort_by_key(|(_, n)| Reverse(*n));
    let categories = sorted
        .into_iter()
        .take(MAX_CATEGORIES)
        .map(|(category, value)| CategoryEntry {
            category,
            value,
            agg: false,
        })
        .collect();

    CategoryData {
        categories,
        categories_count,
        count,
        max,
        min,
        nulls,
    }
}

#[cfg(test)]
mod tests {
    use super::{generate, CategoryEntry, MAX_CATEGORIES};
    use crate::features::Feature;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn features(values: Vec<Value>) -> Vec<Feature> {
        values
            .into_iter()
            .map(|v| {
                let mut props = serde_json::Map::new();
                props.insert("kind".to_string(), v);
                Feature::with_properties(props)
            })
            .collect()
    }

    fn entry(category: &str, value: usize) -> CategoryEntry {
        CategoryEntry {
            category: category.to_string(),
            value,
            agg: false,
        }
    }

    #[test]
    fn counts_groups_from_data() {
        let fs = features(vec![
            json!("park"),
            json!("school"),
            json!("park"),
            Value::Null,
            json!("park"),
            json!("school"),
            json!("museum"),
        ]);
        let data = generate(&fs, "kind");
        assert_eq!(
            data.categories,
            vec![entry("park", 3), entry("school", 2), entry("museum", 1)]
        );
        assert_eq!(data.categories_count, 3);
        assert_eq!(data.count, 6);
        assert_eq!((data.min, data.max), (1, 3));
        assert_eq!(data.nulls, 1);
        assert_eq!(data.count + data.nulls, fs.len());
    }

    #[test]
    fn keeps_top_five_of_seven() {
        let mut values = Vec::new();
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            for _ in 0..=i {
                values.push(json!(name));
            }
        }
        let data = generate(&features(values), "kind");
        assert_eq!(data.categories.len(), MAX_CATEGORIES);
        assert_eq!(data.categories_count, 7);
        let names: Vec<_> = data.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["g", "f", "e", "d", "c"]);
    }

    #[test]
    fn ties_break_by_name() {
        let data = generate(&features(vec![json!("z"), json!("a"), json!("m")]), "kind");
        let names: Vec<_> = data.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn numbers_are_stringified() {
        let data = generate(&features(vec![json!(3), json!(3), json!(true)]), "kind");
        assert_eq!(data.categories, vec![entry("3", 2), entry("true", 1)]);
    }

    #[test]
    fn empty_input_has_zero_summary() {
        let data = generate(&[], "kind");
        assert!(data.categories.is_empty());
        assert_eq!((data.count, data.min, data.max, data.nulls), (0, 0, 0, 0));
    }

    proptest! {
        /// Property: entries are capped, sorted by count and sum within count.
        #[test]
        fn prop_categories_sorted_and_capped(values in proptest::collection::vec(0u8..12, 0..80)) {
            let fs = features(values.into_iter().map(|v| json!(v)).collect());
            let data = generate(&fs, "kind");
            prop_assert!(data.categories.len() <= MAX_CATEGORIES);
            for pair in data.categories.windows(2) {
                prop_assert!(pair[0].value >= pair[1].value);
            }
            let listed: usize = data.categories.iter().map(|c| c.value).sum();
            prop_assert!(listed <= data.count);
        }
    }
}
