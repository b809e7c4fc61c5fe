use std::collections::{BTreeMap, BTreeSet};

use coremodel_codegen::{Layout, LineageSource, Templates, language::LanguageCodegen};
use coremodel_core::{Artifact, ArtifactKind};
use coremodel_lineage::{LINEAGE_FILE, Schema, schema_for};
use eyre::{Result, WrapErr, bail};
use serde_json::{Map, Value, json};
use syn::Item;

use crate::{
    format::normalize_imports,
    rewrite::{MODEL_IDENT, collect_idents, declared_types, rename_prefix},
    typegen::{self, BUILTIN_IDENTS, IMPORTS_TEMPLATE, Options, TYPEDEF_TEMPLATE},
};

const ADDENDA_TEMPLATE: &str = "addenda.tmpl";

const IMPORTS: &str = include_str!("../templates/imports.tmpl");
const TYPEDEF: &str = include_str!("../templates/typedef.tmpl");
const ADDENDA: &str = include_str!("../templates/addenda.tmpl");

/// Generates `coremodel_gen.rs` for one lineage: serde types for the latest
/// schema, with the lineage's title-cased name replaced by `Model`, followed
/// by the `Coremodel` wrapper implementing the runtime `Interface`.
pub struct Generator<'a> {
    layout: &'a Layout,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn preview(&self, source: &LineageSource) -> Result<Artifact> {
        let content = self
            .render(source)
            .wrap_err_with(|| format!("failed to generate Rust code for {}", source.name))?;
        Ok(Artifact::new(
            ArtifactKind::Rust,
            self.layout.rust_output(source),
            content,
        ))
    }
}

impl<'a> Generator<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Render the Rust file for `source` without writing it.
    ///
    /// Only the generated type declarations go through the prefix rename.
    /// The imports and the addenda already refer to `Model` and are joined
    /// back in afterwards.
    pub fn render(&self, source: &LineageSource) -> Result<String> {
        let lineage = &source.lineage;
        let schema = schema_for(lineage, lineage.latest_version()).wrap_err("schema lookup")?;

        let doc = schema.to_openapi(&source.name);
        let doc_json = serde_json::to_string(&doc).wrap_err("openapi serialization")?;

        let vars = self.vars(source, schema);
        let options = Options {
            generate_types: true,
            skip_prune: true,
            skip_fmt: true,
            user_templates: BTreeMap::from([
                (IMPORTS_TEMPLATE.to_string(), IMPORTS.to_string()),
                (TYPEDEF_TEMPLATE.to_string(), TYPEDEF.to_string()),
            ]),
            vars: vars.clone(),
        };
        let types =
            typegen::generate(&doc_json, &source.name, &options).wrap_err("rust type generation")?;

        let addenda = Templates::new()
            .with(ADDENDA_TEMPLATE, ADDENDA)
            .render(ADDENDA_TEMPLATE, &vars)
            .wrap_err("addenda rendering")?;

        let file = syn::parse_file(&types).wrap_err("parsing generated rust")?;
        let addenda = syn::parse_file(&addenda).wrap_err("parsing generated rust")?;

        let (imports, decls): (Vec<Item>, Vec<Item>) = file
            .items
            .into_iter()
            .partition(|item| matches!(item, Item::Use(_)));
        let mut types = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: decls,
        };

        let declared = declared_types(&types);
        let renamed = rename_prefix(&mut types, &source.title_name);
        let scaffolding = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: imports.iter().chain(&addenda.items).cloned().collect(),
        };
        check_renames(
            &declared,
            &renamed,
            &declared_types(&types),
            &scaffolding,
            &source.title_name,
        )
        .wrap_err("identifier rewrite")?;
        tracing::debug!(lineage = %source.name, renamed = renamed.len(), "renamed identifiers");

        let mut items = imports;
        items.extend(types.items);
        items.extend(addenda.items);
        let file = syn::File {
            shebang: file.shebang,
            attrs: file.attrs,
            items,
        };

        normalize_imports(&prettyplease::unparse(&file)).wrap_err("import normalization")
    }

    fn vars(&self, source: &LineageSource, schema: &Schema) -> Map<String, Value> {
        let version = schema.version();
        let vars = json!({
            "name": source.name,
            "title_name": source.title_name,
            "relative_path": source.relative_path,
            "lineage_path": source.lineage.path(),
            "lineage_file": LINEAGE_FILE,
            "runtime_crate": self.layout.config().rust.runtime_crate,
            "seq": version.seq(),
            "schema": version.schema(),
        });
        match vars {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Fail when the prefix rename would leave the generated file inconsistent.
///
/// `before` and `after` are the declared type names on either side of the
/// rename. Only schema types may be renamed, no schema type may reuse a name
/// the declarations refer to, and the renamed types must neither collide
/// with each other nor with what the imports and the addenda use.
fn check_renames(
    before: &[String],
    renamed: &BTreeSet<String>,
    after: &[String],
    scaffolding: &syn::File,
    prefix: &str,
) -> Result<()> {
    if let Some(ident) = renamed.iter().find(|ident| !before.contains(*ident)) {
        bail!(
            "generated identifier `{ident}` starts with the lineage prefix `{prefix}` and cannot be renamed"
        );
    }
    if let Some(name) = before.iter().find(|name| BUILTIN_IDENTS.contains(&name.as_str())) {
        bail!("schema type `{name}` shadows a type the generated declarations use");
    }

    let mut seen = BTreeSet::new();
    if let Some(name) = after.iter().find(|name| !seen.insert(name.as_str())) {
        bail!("renaming `{prefix}` to `{MODEL_IDENT}` declares `{name}` twice");
    }

    let mut reserved = collect_idents(scaffolding);
    reserved.extend(BUILTIN_IDENTS.iter().map(|ident| ident.to_string()));
    reserved.remove(MODEL_IDENT);
    if let Some(name) = after.iter().find(|name| reserved.contains(*name)) {
        bail!("generated type `{name}` clashes with an identifier the generated file already uses");
    }
    Ok(())
}
