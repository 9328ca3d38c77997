use anyhow::Result;
use jsonstruct::{
    JsonStruct,
    JsonValue,
};

#[test]
fn test_deep_copy_with_no_shared_mutables() -> Result<()> {
    let mut orig = JsonStruct::new();
    orig.set_int(".int-val", 737)?;
    orig.set_string(".sub.sub.value", "neat string")?;

    let mut copy = orig.deep_copy();
    assert_eq!(copy, orig);
    assert!(!std::ptr::eq(&*orig, &*copy));
    assert_eq!(orig.get("int-val"), copy.get("int-val"));

    let orig_sub = orig.find_element(".sub")?.as_object().map(|m| m as *const _);
    let copy_sub = copy.find_element(".sub")?.as_object().map(|m| m as *const _);
    assert!(orig_sub.is_some() && copy_sub.is_some());
    assert_ne!(orig_sub, copy_sub);

    copy.set_string(".sub.sub.value", "changed in copy")?;
    copy.set_string(".sub.added", "only in copy")?;
    assert_eq!(orig.string(".sub.sub.value").as_deref(), Some("neat string"));
    assert!(!orig.contains(".sub.added"));
    Ok(())
}

#[test]
fn test_deep_copy_copies_lists() -> Result<()> {
    let orig = JsonStruct::from_json_str(r#"{"items": [{"name": "a"}, 2]}"#)?;
    let mut copy = orig.clone();

    if let Some(items) = copy.find_element_mut(".items")?.as_array_mut() {
        items.push(JsonValue::from(3));
        if let Some(JsonValue::Object(first)) = items.first_mut() {
            first.insert(String::from("name"), JsonValue::from("b"));
        }
    }

    assert_eq!(orig.list(".items").map(Vec::len), Some(2));
    assert_eq!(orig.to_json(), r#"{"items":[{"name":"a"},2]}"#);
    assert_eq!(copy.to_json(), r#"{"items":[{"name":"b"},2,3]}"#);
    Ok(())
}

#[test]
fn test_deep_copy_moves_to_another_thread() -> Result<()> {
    let mut orig = JsonStruct::new();
    orig.set_string(".shared.value", "original")?;

    let mut snapshot = orig.deep_copy();
    let handle = std::thread::spawn(move || {
        snapshot.set_string(".shared.value", "from thread").map(|_| snapshot)
    });
    orig.set_string(".shared.value", "from main")?;

    let snapshot = handle.join().map_err(|_| anyhow::anyhow!("thread panicked"))??;
    assert_eq!(snapshot.string(".shared.value").as_deref(), Some("from thread"));
    assert_eq!(orig.string(".shared.value").as_deref(), Some("from main"));
    Ok(())
}
