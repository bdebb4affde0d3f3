use activity_core::{
    parse_descriptions, Activity, AttributeValue, BindError, DescriptionError, ElementKind,
    ElementStore, NodePath,
};

const MENU_ACTIVITY: &str = r#"
[
  {
    "type": "container",
    "attributes": { "x": "0", "y": "0", "width": "40", "height": "7" },
    "children": [
      {
        "type": "inscroll",
        "children": [
          { "type": "text", "attributes": { "value": "Clock" } },
          { "type": "text", "attributes": { "value": "Weather" } }
        ]
      }
    ]
  },
  { "type": "text" }
]
"#;

fn started(store: &ElementStore) -> Activity {
    Activity::start("test.main", store.root_handle().clone())
}

#[test]
fn attaches_json_activity_under_root() {
    let mut store = ElementStore::new();
    let mut activity = started(&store);
    let descriptions = parse_descriptions(MENU_ACTIVITY).unwrap();

    let added = activity.attach(&mut store, &descriptions).unwrap();

    assert_eq!(added, 2);
    assert_eq!(activity.name(), "test.main");
    assert_eq!(activity.node_count(), 5);
    assert_eq!(store.len(), 6);

    let root_children = store.children_of(activity.root()).unwrap();
    assert_eq!(root_children.len(), 2);
    assert_eq!(root_children[0], *activity.children()[0].handle());

    let menu = &activity.children()[0].children()[0];
    assert_eq!(store.kind_of(menu.handle()), Some(ElementKind::Menu));
    let labels: Vec<_> = menu
        .children()
        .iter()
        .map(|item| item.attributes(&mut store).get("value").unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            Some(AttributeValue::from("Clock")),
            Some(AttributeValue::from("Weather")),
        ]
    );

    let plain_text = &activity.children()[1];
    assert_eq!(
        plain_text.attributes(&mut store).get("value").unwrap(),
        Some(AttributeValue::from("test"))
    );
}

#[test]
fn repeated_attach_appends_children() {
    let mut store = ElementStore::new();
    let mut activity = started(&store);

    activity
        .attach(&mut store, &parse_descriptions(r#"{"type":"text"}"#).unwrap())
        .unwrap();
    activity
        .attach(&mut store, &parse_descriptions(r#"[{"type":"container"}]"#).unwrap())
        .unwrap();

    let types: Vec<&str> = activity
        .children()
        .iter()
        .map(|child| child.type_tag())
        .collect();
    assert_eq!(types, vec!["text", "container"]);
}

#[test]
fn failed_attach_keeps_natively_created_nodes() {
    let mut store = ElementStore::new();
    let mut activity = started(&store);
    let descriptions = parse_descriptions(
        r#"[{"type":"text"},{"type":"container","children":[{"type":"gauge"}]},{"type":"text"}]"#,
    )
    .unwrap();

    let err = activity.attach(&mut store, &descriptions).unwrap_err();

    assert!(matches!(
        err,
        BindError::CreationFailure { ref type_tag, .. } if type_tag == "gauge"
    ));
    assert_eq!(err.path(), Some(&NodePath::from(vec![1, 0])));
    assert_eq!(activity.children().len(), 2);
    assert_eq!(activity.node_count(), 2);
    assert_eq!(store.len(), 3);
}

#[test]
fn malformed_json_is_rejected_before_binding() {
    let err = parse_descriptions(r#"[{"type":"container","children":[{"children":[]}]}]"#)
        .unwrap_err();
    assert_eq!(err, DescriptionError::MissingType(NodePath::from(vec![0, 0])));
}

#[test]
fn end_releases_every_top_level_element() {
    let mut store = ElementStore::new();
    let mut activity = started(&store);
    activity
        .attach(&mut store, &parse_descriptions(MENU_ACTIVITY).unwrap())
        .unwrap();

    activity.end(&mut store).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.children_of(store.root_handle()), Some(&[][..]));
}
