use std::time::Duration;

use jsonstruct::{
    JsonStruct,
    format_duration,
    parse_duration,
};
use proptest::prelude::*;

fn dot_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z_-]{1,8}", 1..5).prop_map(|keys| format!(".{}", keys.join(".")))
}

proptest! {
    #[test]
    fn string_set_then_get(path in dot_path(), value in "\\PC*") {
        let mut values = JsonStruct::new();
        values.set_string(&path, &value).unwrap();
        prop_assert_eq!(values.string(&path), Some(value));
    }

    #[test]
    fn int_set_then_get(path in dot_path(), value in any::<i64>()) {
        let mut values = JsonStruct::new();
        values.set_int(&path, value).unwrap();
        prop_assert_eq!(values.int(&path), Some(value));
    }

    #[test]
    fn duration_set_then_get(path in dot_path(), secs in any::<u64>(), nanos in 0u32..1_000_000_000) {
        let mut values = JsonStruct::new();
        let duration = Duration::new(secs, nanos);
        values.set_duration(&path, duration).unwrap();
        prop_assert_eq!(values.duration(&path), Ok(duration));
    }

    #[test]
    fn duration_format_reads_back(secs in any::<u64>(), nanos in 0u32..1_000_000_000) {
        let duration = Duration::new(secs, nanos);
        prop_assert_eq!(parse_duration(&format_duration(duration)), Ok(duration));
    }

    #[test]
    fn never_set_is_missing(set_path in dot_path(), get_path in dot_path(), default in any::<i64>()) {
        prop_assume!(set_path != get_path && !set_path.starts_with(&format!("{}.", get_path)));
        let mut values = JsonStruct::new();
        values.set_int(&set_path, 1).unwrap();
        prop_assert_eq!(values.int_with_default(&get_path, default), default);
    }

    #[test]
    fn deep_copy_is_independent(paths in prop::collection::vec(dot_path(), 1..6)) {
        let mut orig = JsonStruct::new();
        for (n, path) in paths.iter().enumerate() {
            orig.set_int(path, n as i64).unwrap();
        }
        let snapshot = orig.to_json();

        let mut copy = orig.deep_copy();
        prop_assert_eq!(&copy, &orig);
        for path in &paths {
            copy.set_string(path, "changed").unwrap();
        }
        prop_assert_eq!(orig.to_json(), snapshot);
    }

    #[test]
    fn writer_output_reads_back(paths in prop::collection::vec(dot_path(), 1..6), value in "\\PC*") {
        let mut values = JsonStruct::new();
        for path in &paths {
            values.set_string(path, &value).unwrap();
        }
        let reparsed = JsonStruct::from_json_str(&values.to_json()).unwrap();
        prop_assert_eq!(reparsed, values);
    }
}
