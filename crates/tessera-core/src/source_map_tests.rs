use crate::{SourceId, SourceKind, SourceMap};

#[test]
fn ids_follow_insertion_order() {
    let mut map = SourceMap::new();

    let a = map.add_inline("int a;");
    let b = map.add_file("lib.c", "int b;");

    assert_eq!(a.raw(), 0);
    assert_eq!(b.raw(), 1);
    assert_eq!(map.len(), 2);
    assert_eq!(map.content(b), Some("int b;"));
}

#[test]
fn path_only_for_files() {
    let mut map = SourceMap::new();

    let inline = map.add_inline("x");
    let file = map.add_file("src/main.c", "y");

    assert_eq!(map.path(inline), None);
    assert_eq!(map.path(file), Some("src/main.c"));
    assert_eq!(map.get(inline).unwrap().kind.display_name(), "<input>");
}

#[test]
fn unknown_id_is_none() {
    let map = SourceMap::new();

    assert!(map.is_empty());
    assert!(map.get(SourceId::new(3)).is_none());
}

#[test]
fn iter_yields_every_source() {
    let mut map = SourceMap::new();
    map.add_inline("a");
    map.add_file("b.c", "b");

    let kinds: Vec<_> = map.iter().map(|s| s.kind.clone()).collect();

    assert_eq!(kinds, vec![SourceKind::Inline, SourceKind::File("b.c".into())]);
}
