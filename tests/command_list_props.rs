// tests/command_list_props.rs

use proptest::prelude::*;
use stagger::config::load_from_reader;
use stagger::types::CommandList;

// Raw records: a mix of empty and non-empty argv vectors.
fn raw_records() -> impl Strategy<Value = Vec<Vec<String>>> {
    proptest::collection::vec(
        proptest::collection::vec("[a-z0-9 _-]{0,8}", 0..4),
        0..12,
    )
}

proptest! {
    #[test]
    fn from_raw_keeps_exactly_the_non_empty_entries_in_order(raw in raw_records()) {
        let expected: Vec<Vec<String>> = raw.iter().filter(|r| !r.is_empty()).cloned().collect();
        let list = CommandList::from_raw(raw);

        prop_assert_eq!(list.len(), expected.len());
        for (spec, argv) in list.iter().zip(expected.iter()) {
            prop_assert!(!spec.argv().is_empty());
            prop_assert_eq!(spec.argv(), argv.as_slice());
        }
    }

    #[test]
    fn loader_agrees_with_from_raw(raw in raw_records()) {
        let stream: String = raw
            .iter()
            .map(|r| serde_json::to_string(r).unwrap())
            .collect::<Vec<_>>()
            .join("\n");

        let loaded = load_from_reader(stream.as_bytes()).unwrap();
        prop_assert_eq!(loaded, CommandList::from_raw(raw));
    }
}
