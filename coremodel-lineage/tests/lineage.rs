//! Loading lineages through the public API.

use coremodel_lineage::{
    Error, LINEAGE_FILE, Library, MemoryFs, Scalar, SchemaVersion, Type, load, schema_for,
};

const PLAYLIST: &str = r#"
[[seqs]]
[[seqs.schemas]]
fields = { name = { type = "string" } }
[[seqs.schemas]]
fields = { name = { type = "string" }, interval = { type = "duration", optional = true } }

[[seqs]]
[[seqs.schemas]]
fields = { title = { type = "string" } }
"#;

fn fs(src: &str) -> MemoryFs {
    MemoryFs::single(LINEAGE_FILE, src)
}

#[test]
fn test_versions_and_custom_library() {
    let lib = Library::new().with_alias("duration", Scalar::String);
    let lin = load("pkg/coremodel/playlist", &fs(PLAYLIST), &lib).unwrap();

    assert_eq!(lin.name(), "playlist");
    let versions: Vec<String> = lin.versions().map(|v| v.to_string()).collect();
    assert_eq!(versions, ["0.0", "0.1", "1.0"]);
    assert_eq!(lin.latest_version(), SchemaVersion::new(1, 0));

    let previous = schema_for(&lin, SchemaVersion::new(0, 1)).unwrap();
    let interval = previous.root().field("interval").unwrap();
    assert_eq!(interval.ty, Type::Scalar(Scalar::String));
    assert!(interval.optional);

    let err = schema_for(&lin, SchemaVersion::new(2, 0)).unwrap_err();
    assert!(matches!(*err, Error::VersionNotFound { .. }));
    assert_eq!(err.to_string(), "lineage 'playlist' has no schema version 2.0");
}

#[test]
fn test_unknown_alias_without_library_entry() {
    let err = load("pkg/coremodel/playlist", &fs(PLAYLIST), Library::shared()).unwrap_err();
    assert!(matches!(*err, Error::Validation { .. }));
    assert!(err.to_string().contains("unknown type 'duration'"), "{err}");
}

#[test]
fn test_required_field_added_within_sequence() {
    let src = r#"
        [[seqs]]
        [[seqs.schemas]]
        fields = { name = { type = "string" } }
        [[seqs.schemas]]
        fields = { name = { type = "string" }, interval = { type = "string" } }
    "#;
    let err = load("pkg/coremodel/playlist", &fs(src), Library::shared()).unwrap_err();
    assert!(
        err.to_string().contains(
            "schema 0.1 is not backwards compatible with 0.0: new field 'interval' must be optional"
        ),
        "{err}"
    );
}

#[test]
fn test_openapi_document() {
    let src = "[[seqs]]\n[[seqs.schemas]]\nfields = { title = { type = \"string\" } }\n";
    let lin = load("pkg/coremodel/panel", &fs(src), Library::shared()).unwrap();
    let doc = serde_json::to_string_pretty(&lin.latest().to_openapi(lin.name())).unwrap();

    insta::assert_snapshot!(doc, @r#"
    {
      "openapi": "3.0.0",
      "info": {
        "title": "panel",
        "version": "0.0"
      },
      "paths": {},
      "components": {
        "schemas": {
          "panel": {
            "type": "object",
            "properties": {
              "title": {
                "type": "string"
              }
            },
            "required": [
              "title"
            ]
          }
        }
      }
    }
    "#);
}
