//! Decoding, filtering and encoding of the INFO column.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::parser;
use crate::types::{InfoAllowList, InfoEntry};

/// A decoded INFO column, borrowing from the raw text.
///
/// Keys keep the position of their first occurrence; a repeated key takes the
/// value of its last occurrence.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Info<'a> {
    entries: IndexMap<&'a str, Option<&'a str>>,
}

impl<'a> Info<'a> {
    pub fn decode(text: &'a str) -> Result<Self> {
        let text = text.trim_end_matches(&['\r', '\n'][..]);
        let mut entries = IndexMap::new();
        if text.trim().is_empty() {
            return Ok(Self { entries });
        }
        for field in text.split(';').filter(|field| !field.is_empty()) {
            let (_, entry) =
                parser::info_entry(field).map_err(|_| Error::MalformedInfo(field.to_owned()))?;
            entries.insert(entry.key(), entry.value());
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<InfoEntry<'a>> {
        self.entries
            .get_key_value(key)
            .map(|(&key, &value)| InfoEntry::new(key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in their original order.
    pub fn iter(&self) -> impl Iterator<Item = InfoEntry<'a>> + '_ {
        self.entries
            .iter()
            .map(|(&key, &value)| InfoEntry::new(key, value))
    }

    /// Entries named by `allow_list`, in allow-list order. Keys this INFO does
    /// not carry are skipped.
    pub fn filter<'s>(
        &'s self,
        allow_list: &'s InfoAllowList,
    ) -> impl Iterator<Item = InfoEntry<'a>> + 's {
        allow_list.keys().filter_map(move |key| self.get(key))
    }
}

/// Join entries back into INFO text. No entries gives the empty string.
pub fn encode<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = InfoEntry<'a>>,
{
    entries.into_iter().join(";")
}

/// Decode `text`, keep the allow-listed keys and encode the result.
pub fn filter_info(text: &str, allow_list: &InfoAllowList) -> Result<String> {
    let info = Info::decode(text)?;
    Ok(encode(info.filter(allow_list)))
}

#[cfg(test)]
mod test {
    use super::*;

    const INFO: &str = "AC=10;AF=0.5;DB";

    #[test]
    fn test_decode() {
        let info = Info::decode(INFO).unwrap();
        assert_eq!(
            info.iter().collect_vec(),
            vec![
                InfoEntry::KeyValue("AC", "10"),
                InfoEntry::KeyValue("AF", "0.5"),
                InfoEntry::Flag("DB"),
            ]
        );
        assert_eq!(info.get("DB").and_then(|e| e.value()), None);
        assert_eq!(info.get("DB"), Some(InfoEntry::Flag("DB")));
    }

    #[test]
    fn test_decode_last_duplicate_wins() {
        let info = Info::decode("AC=1;DP=7;AC=2").unwrap();
        assert_eq!(info.len(), 2);
        assert_eq!(info.get("AC"), Some(InfoEntry::KeyValue("AC", "2")));
        assert_eq!(info.iter().map(|e| e.key()).collect_vec(), vec!["AC", "DP"]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(Info::decode("").unwrap().is_empty());
        assert!(Info::decode("  \t").unwrap().is_empty());
        assert!(Info::decode("\r\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_skips_empty_entries() {
        let info = Info::decode("AC=1;;DB;").unwrap();
        assert_eq!(info.iter().map(|e| e.key()).collect_vec(), vec!["AC", "DB"]);
    }

    #[test]
    fn test_decode_empty_key() {
        match Info::decode("AC=1;=5") {
            Err(Error::MalformedInfo(entry)) => assert_eq!(entry, "=5"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_filter() {
        let info = Info::decode(INFO).unwrap();
        let allow_list = InfoAllowList::new(vec!["AC", "DB"]);
        let pairs = info.filter(&allow_list).map(|e| e.to_string()).collect_vec();
        assert_eq!(pairs, vec!["AC=10", "DB"]);
        assert_eq!(encode(info.filter(&allow_list)), "AC=10;DB");
    }

    #[test]
    fn test_filter_follows_allow_list_order() {
        let allow_list = InfoAllowList::new(vec!["DB", "AF", "AC"]);
        assert_eq!(filter_info(INFO, &allow_list).unwrap(), "DB;AF=0.5;AC=10");
    }

    #[test]
    fn test_filter_absent_keys() {
        let allow_list = InfoAllowList::new(vec!["XYZ", "DP"]);
        assert_eq!(filter_info(INFO, &allow_list).unwrap(), "");
    }

    #[test]
    fn test_empty_value_written_as_flag() {
        let allow_list = InfoAllowList::new(vec!["AF"]);
        assert_eq!(filter_info("AF=;AC=3", &allow_list).unwrap(), "AF");
    }

    #[test]
    fn test_value_keeps_later_equals() {
        let allow_list = InfoAllowList::new(vec!["CSQ"]);
        assert_eq!(filter_info("CSQ=x=y;DP=3", &allow_list).unwrap(), "CSQ=x=y");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn info_text() -> impl Strategy<Value = String> {
            let entry = ("[A-Z][A-Z0-9_]{0,4}", prop::option::of("[a-z0-9.,=]{1,6}"));
            prop::collection::vec(entry, 0..8).prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(key, value)| match value {
                        Some(value) => format!("{}={}", key, value),
                        None => key,
                    })
                    .join(";")
            })
        }

        fn allow_list() -> impl Strategy<Value = Vec<String>> {
            prop::collection::hash_set("[A-Z][A-Z0-9_]{0,4}", 0..6)
                .prop_map(|keys| keys.into_iter().collect::<Vec<_>>())
        }

        proptest! {
            /// decode(encode(filter(decode(t)))) is decode(t) restricted to the allow-list
            #[test]
            fn prop_filtered_round_trip(text in info_text(), keys in allow_list()) {
                let allow_list = InfoAllowList::new(keys.clone());
                let original = Info::decode(&text).unwrap();
                let encoded = filter_info(&text, &allow_list).unwrap();
                let decoded = Info::decode(&encoded).unwrap();

                let expected = keys
                    .iter()
                    .filter_map(|key| original.get(key))
                    .collect_vec();
                prop_assert_eq!(decoded.iter().collect_vec(), expected);
            }

            /// permuted allow-lists keep the same keys, each in its own list's order
            #[test]
            fn prop_permuted_allow_list(text in info_text(), keys in allow_list()) {
                let forward = InfoAllowList::new(keys.clone());
                let reversed = InfoAllowList::new(keys.iter().rev().cloned());
                let info = Info::decode(&text).unwrap();

                let a = info.filter(&forward).collect_vec();
                let mut b = info.filter(&reversed).collect_vec();
                b.reverse();
                prop_assert_eq!(a, b);
            }
        }
    }
}
