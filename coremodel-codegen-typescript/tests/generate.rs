//! Writing TypeScript declarations into a repository layout.

use std::fs;

use coremodel_codegen::{Config, Layout, load_lineages};
use coremodel_codegen_typescript::{Generator, LanguageCodegen};
use coremodel_core::WriteResult;
use coremodel_lineage::Library;
use tempfile::TempDir;

const PLAYLIST: &str = r#"
[[seqs]]
[[seqs.schemas]]
description = "A list of dashboards played in turn."
[seqs.schemas.fields]
name = { type = "string" }
interval = { type = "string", default = "5m" }
items = { type = "array", items = { type = "PlaylistItem" }, optional = true }
[seqs.schemas.definitions.PlaylistItem]
fields = { kind = { enum = ["dashboard_by_uid", "dashboard_by_tag"] }, value = { type = "string" } }
"#;

fn repo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let dir = temp.path().join("pkg/coremodel/playlist");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("lineage.toml"), PLAYLIST).unwrap();
    temp
}

#[test]
fn test_creates_destination_directory() {
    let temp = repo();
    let layout = Layout::new(temp.path(), Config::default());
    let sources = load_lineages(&layout, Library::shared()).unwrap();

    let written = Generator::new(&layout).generate(&sources[0]).unwrap();
    assert_eq!(written.result, WriteResult::Written);
    assert!(
        written
            .path
            .ends_with("packages/grafana-schema/src/schema/playlist/playlist.gen.ts")
    );

    let content = fs::read_to_string(&written.path).unwrap();
    insta::assert_snapshot!(content, @r#"
    // This file is autogenerated. DO NOT EDIT.
    //
    // Derived from the lineage at pkg/coremodel/playlist/lineage.toml

    export interface PlaylistItem {
      kind: 'dashboard_by_uid' | 'dashboard_by_tag';
      value: string;
    }

    /** A list of dashboards played in turn. */
    export interface Model {
      name: string;
      interval: string;
      items?: PlaylistItem[];
    }

    export const defaultModel: Partial<Model> = {
      interval: '5m',
    };
    "#);
}

#[test]
fn test_existing_directory_and_unrelated_files_untouched() {
    let temp = repo();
    let mut config = Config::default();
    config.typescript.package = "schema".to_string();
    let layout = Layout::new(temp.path(), config);

    let dest = temp.path().join("packages/schema/src/schema/playlist");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("index.ts"), "export * from './playlist.gen';\n").unwrap();

    let sources = load_lineages(&layout, Library::shared()).unwrap();
    let generator = Generator::new(&layout);
    assert_eq!(generator.generate(&sources[0]).unwrap().result, WriteResult::Written);
    assert_eq!(generator.generate(&sources[0]).unwrap().result, WriteResult::Unchanged);

    assert_eq!(
        fs::read_to_string(dest.join("index.ts")).unwrap(),
        "export * from './playlist.gen';\n"
    );
    assert!(dest.join("playlist.gen.ts").is_file());
}
