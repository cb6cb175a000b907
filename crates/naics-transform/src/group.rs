//! Order-preserving group-by on code.

use std::collections::HashMap;

/// Group values by code, keeping codes in order of first appearance and
/// values in input order.
pub fn group_by_code<V>(items: impl IntoIterator<Item = (String, V)>) -> Vec<(String, Vec<V>)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<V>)> = Vec::new();
    for (code, value) in items {
        match positions.get(&code) {
            Some(&idx) => groups[idx].1.push(value),
            None => {
                positions.insert(code.clone(), groups.len());
                groups.push((code, vec![value]));
            }
        }
    }
    groups
}
