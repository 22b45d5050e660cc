use mindos_core::{extract, inspect, FrontMatter, FrontMatterStatus, MetaValue};

#[test]
fn minimal_block_yields_single_text_entry() {
    let front_matter = extract("---\nkey: value\n---\n").unwrap();
    let expected: FrontMatter = [("key".to_string(), MetaValue::Text("value".to_string()))]
        .into_iter()
        .collect();
    assert_eq!(front_matter, expected);
}

#[test]
fn documents_without_leading_delimiter_are_absent() {
    for content in [
        "",
        "# 标题\n\n正文",
        "正文\n---\nkey: value\n---\n",
        "key: value\n",
    ] {
        assert!(extract(content).is_none(), "expected absent for {content:?}");
        assert_eq!(inspect(content), FrontMatterStatus::NotPresent);
    }
}

#[test]
fn unterminated_block_is_absent_but_classified() {
    let content = "---\ntitle: 草稿\n正文没有结束标记";
    assert!(extract(content).is_none());
    assert_eq!(inspect(content), FrontMatterStatus::Unterminated);
}

#[test]
fn empty_block_is_distinct_from_absent() {
    let content = "---\n---\n正文";
    assert!(extract(content).is_none());
    assert_eq!(inspect(content), FrontMatterStatus::Empty);
}

#[test]
fn invalid_yaml_is_malformed_not_partial() {
    let content = "---\ntitle: ok\ntags: [unclosed\n---\n";
    assert!(extract(content).is_none());
    assert!(matches!(inspect(content), FrontMatterStatus::Malformed { .. }));
}

#[test]
fn non_mapping_block_is_malformed() {
    let status = inspect("---\n- one\n- two\n---\n");
    match status {
        FrontMatterStatus::Malformed { detail } => assert!(detail.contains("mapping")),
        other => panic!("unexpected status: {other:?}"),
    }
}

#[test]
fn only_first_block_is_read() {
    let content = "---\nfirst: 1\n---\nbody\n---\nsecond: 2\n---\n";
    let front_matter = extract(content).unwrap();
    assert_eq!(front_matter.len(), 1);
    assert_eq!(front_matter.get_number("first"), Some(1.0));
    assert!(!front_matter.contains_key("second"));
}
