//! Postfix text format for drawings.
//!
//! Every row is `<TAG> <payload>`. Leaf rows push a shape onto a reconstruction
//! stack; `@COMP n` pops the last `n` shapes into a composite and pushes that.
//! Composites are written after their children, so one pass rebuilds the tree.

use std::io::Write as _;
use std::path::Path;

use crate::document::DocumentModel;
use crate::error::{CodecError, CodecResult};
use crate::shapes::GraphicalObject;

/// One instance of every variant, used to dispatch rows by tag.
pub fn prototypes() -> Vec<GraphicalObject> {
    vec![
        GraphicalObject::default_line(),
        GraphicalObject::default_oval(),
        GraphicalObject::composite(Vec::new()),
    ]
}

pub fn serialize(objects: &[GraphicalObject]) -> Vec<String> {
    let mut rows = Vec::new();
    for object in objects {
        object.save(&mut rows);
    }
    rows
}

/// Rebuilds the top-level objects described by `rows`, bottom of the z-order first.
/// Blank rows are ignored.
pub fn deserialize<S: AsRef<str>>(rows: &[S]) -> CodecResult<Vec<GraphicalObject>> {
    let prototypes = prototypes();
    let mut stack = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let row = row.as_ref().trim();
        if row.is_empty() {
            continue;
        }
        let line = index + 1;
        let (tag, payload) = row.split_once(char::is_whitespace).unwrap_or((row, ""));
        let Some(prototype) = prototypes.iter().find(|p| p.shape_id() == tag) else {
            return Err(CodecError::UnknownTag {
                line,
                tag: tag.to_string(),
            });
        };
        prototype
            .load(&mut stack, payload)
            .map_err(|source| CodecError::Payload {
                line,
                tag: tag.to_string(),
                source,
            })?;
    }
    Ok(stack)
}

/// Writes `contents` to a temporary file beside `path`, then renames it into place.
pub fn write_atomic(path: &Path, contents: &str) -> CodecResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn read_rows(path: &Path) -> CodecResult<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

pub fn save_document(doc: &DocumentModel, path: &Path) -> CodecResult<()> {
    let mut text = serialize(doc.list()).join("\n");
    text.push('\n');
    write_atomic(path, &text)?;
    log::info!("saved {} object(s) to {}", doc.len(), path.display());
    Ok(())
}

/// Replaces the document's contents with the drawing at `path`. On any error the
/// document is left as it was.
pub fn load_document(doc: &mut DocumentModel, path: &Path) -> CodecResult<()> {
    let rows = read_rows(path)?;
    let objects = deserialize(&rows)?;
    log::info!("loaded {} object(s) from {}", objects.len(), path.display());
    doc.replace_all(objects);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayloadError;
    use crate::model::Point;

    fn two_lines_and_their_group() -> Vec<GraphicalObject> {
        let a = GraphicalObject::line(Point::new(0, 0), Point::new(10, 10));
        let b = GraphicalObject::line(Point::new(20, 5), Point::new(-3, 7));
        let group = GraphicalObject::composite(vec![a.duplicate(), b.duplicate()]);
        vec![a, b, group]
    }

    #[test]
    fn rows_are_postfix() {
        let rows = serialize(&two_lines_and_their_group());
        assert_eq!(
            rows,
            vec![
                "@LINE 0 0 10 10",
                "@LINE 20 5 -3 7",
                "@LINE 0 0 10 10",
                "@LINE 20 5 -3 7",
                "@COMP 2",
            ]
        );
    }

    #[test]
    fn composite_consumes_preceding_rows() {
        let rows = ["@LINE 0 0 10 10", "@LINE 20 5 -3 7", "@COMP 2"];
        let objects = deserialize(&rows).unwrap();
        assert_eq!(objects.len(), 1);
        let children = objects[0].as_composite().unwrap().children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].hot_point(0).unwrap(), Point::new(0, 0));
        assert_eq!(children[1].hot_point(1).unwrap(), Point::new(-3, 7));
    }

    #[test]
    fn round_trip_preserves_nesting_and_coordinates() {
        let inner = GraphicalObject::composite(vec![
            GraphicalObject::default_line(),
            GraphicalObject::oval(Point::new(40, 10), Point::new(20, 30)),
        ]);
        let objects = vec![
            GraphicalObject::line(Point::new(-5, 6), Point::new(7, -8)),
            GraphicalObject::composite(vec![inner, GraphicalObject::default_oval()]),
            GraphicalObject::composite(Vec::new()),
        ];
        let rows = serialize(&objects);
        let restored = deserialize(&rows).unwrap();
        assert_eq!(serialize(&restored), rows);
        assert_eq!(restored.len(), 3);
        let outer = restored[1].as_composite().unwrap();
        assert!(outer.children()[0].is_composite());
        assert_eq!(restored[2].as_composite().unwrap().children().len(), 0);
    }

    #[test]
    fn restored_composites_forward_child_changes() {
        let rows = ["@LINE 0 0 10 10", "@COMP 1"];
        let objects = deserialize(&rows).unwrap();
        let child = &objects[0].as_composite().unwrap().children()[0];
        assert_eq!(child.listener_count(), 1);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = ["", "@OVAL 150 100 100 150", "   ", "@LINE 1 2 3 4"];
        assert_eq!(deserialize(&rows).unwrap().len(), 2);
    }

    #[test]
    fn unknown_tag_reports_line() {
        let rows = ["@LINE 1 2 3 4", "", "@RECT 1 2 3 4"];
        match deserialize(&rows) {
            Err(CodecError::UnknownTag { line, tag }) => {
                assert_eq!(line, 3);
                assert_eq!(tag, "@RECT");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn payload_errors_carry_position() {
        match deserialize(&["@LINE 1 2 x 4"]) {
            Err(CodecError::Payload { line, tag, source }) => {
                assert_eq!(line, 1);
                assert_eq!(tag, "@LINE");
                assert!(matches!(source, PayloadError::BadInt { .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            deserialize(&["@OVAL 1 2 3"]),
            Err(CodecError::Payload {
                source: PayloadError::FieldCount {
                    expected: 4,
                    found: 3
                },
                ..
            })
        ));
        assert!(matches!(
            deserialize(&["@LINE 1 2 3 4", "@COMP 2"]),
            Err(CodecError::Payload {
                line: 2,
                source: PayloadError::StackUnderflow { .. },
                ..
            })
        ));
        assert!(matches!(
            deserialize(&["@COMP -1"]),
            Err(CodecError::Payload {
                source: PayloadError::BadInt { .. },
                ..
            })
        ));
    }

    #[test]
    fn save_then_load_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.txt");

        let mut doc = DocumentModel::new();
        for object in two_lines_and_their_group() {
            doc.add(object);
        }
        save_document(&doc, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("@COMP 2\n"));

        let mut loaded = DocumentModel::new();
        load_document(&mut loaded, &path).unwrap();
        assert_eq!(serialize(loaded.list()), serialize(doc.list()));
    }

    #[test]
    fn failed_load_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, "@LINE 0 0 1 1\n@COMP 5\n").unwrap();

        let mut doc = DocumentModel::new();
        doc.add(GraphicalObject::default_oval());
        let before = serialize(doc.list());

        assert!(load_document(&mut doc, &path).is_err());
        assert_eq!(serialize(doc.list()), before);

        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            load_document(&mut doc, &missing),
            Err(CodecError::Io(_))
        ));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn atomic_write_replaces_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old").unwrap();
        write_atomic(&path, "new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn atomic_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.txt");
        assert!(matches!(write_atomic(&path, "x"), Err(CodecError::Io(_))));
        assert!(!path.exists());
    }
}
