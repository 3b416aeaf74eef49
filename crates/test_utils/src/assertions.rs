//! Custom Test Assertions
//!
//! Assertion helpers for composition snapshots and the JSON bodies the API
//! returns, with failure messages that name the offending rows.

use std::collections::HashSet;

use domain_etf::CompositionSnapshot;
use serde_json::Value;

/// Asserts that every holding belongs to a fund present in the summaries
pub fn assert_no_orphan_holdings(snapshot: &CompositionSnapshot) {
    let codes: HashSet<&str> = snapshot.summaries.iter().map(|s| s.etf_code.as_str()).collect();

    for holding in &snapshot.holdings {
        assert!(
            codes.contains(holding.etf_code.as_str()),
            "Holding {} references fund {} which has no summary",
            holding.stock_code,
            holding.etf_code
        );
    }
}

/// Asserts that holdings are in non-decreasing stock code order
pub fn assert_holdings_sorted(snapshot: &CompositionSnapshot) {
    let codes: Vec<&str> = snapshot.holdings.iter().map(|h| h.stock_code.as_str()).collect();
    assert_sorted(&codes, "stock_code");
}

/// Asserts that the string values of `key` in a JSON array are sorted
///
/// # Panics
///
/// Panics if `items` is not an array or an element lacks a string `key`
pub fn assert_json_sorted_by(items: &Value, key: &str) {
    let values = json_strings(items, key);
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    assert_sorted(&refs, key);
}

/// Asserts that the integer values of `key` in a JSON array are strictly increasing
pub fn assert_json_ids_increasing(items: &Value, key: &str) {
    let array = items.as_array().unwrap_or_else(|| panic!("Expected a JSON array, got {}", items));
    let ids: Vec<i64> = array
        .iter()
        .map(|item| {
            item.get(key)
                .and_then(Value::as_i64)
                .unwrap_or_else(|| panic!("Element {} has no integer '{}'", item, key))
        })
        .collect();

    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "'{}' values not increasing: {:?}", key, ids);
    }
}

/// Asserts that a JSON object has exactly the given keys
pub fn assert_json_keys(item: &Value, expected: &[&str]) {
    let object = item
        .as_object()
        .unwrap_or_else(|| panic!("Expected a JSON object, got {}", item));

    let mut actual: Vec<&str> = object.keys().map(String::as_str).collect();
    actual.sort_unstable();
    let mut wanted = expected.to_vec();
    wanted.sort_unstable();

    assert_eq!(actual, wanted, "Unexpected keys in {}", item);
}

/// Asserts that every `etf_code` of the stock array appears in the fund array
pub fn assert_json_no_orphans(etfs: &Value, stocks: &Value) {
    let codes: HashSet<String> = json_strings(etfs, "etf_code").into_iter().collect();

    for code in json_strings(stocks, "etf_code") {
        assert!(codes.contains(&code), "Stock row references unknown fund {}", code);
    }
}

fn json_strings(items: &Value, key: &str) -> Vec<String> {
    let array = items.as_array().unwrap_or_else(|| panic!("Expected a JSON array, got {}", items));
    array
        .iter()
        .map(|item| {
            item.get(key)
                .and_then(Value::as_str)
                .unwrap_or_else(|| panic!("Element {} has no string '{}'", item, key))
                .to_string()
        })
        .collect()
}

fn assert_sorted(values: &[&str], label: &str) {
    for pair in values.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "'{}' values out of order: {} before {} in {:?}",
            label,
            pair[0],
            pair[1],
            values
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_sorted_passes() {
        assert_json_sorted_by(&json!([{"c": "0005"}, {"c": "0700"}, {"c": "0700"}]), "c");
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_json_sorted_fails() {
        assert_json_sorted_by(&json!([{"c": "0700"}, {"c": "0005"}]), "c");
    }

    #[test]
    #[should_panic(expected = "unknown fund")]
    fn test_json_orphan_detected() {
        assert_json_no_orphans(&json!([{"etf_code": "2800"}]), &json!([{"etf_code": "7500"}]));
    }

    #[test]
    fn test_json_keys() {
        assert_json_keys(&json!({"b": 1, "a": 2}), &["a", "b"]);
    }
}
