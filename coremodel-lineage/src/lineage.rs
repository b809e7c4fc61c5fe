//! Loading and querying lineages.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::{
    Definition, Error, Field, Library, MemoryFs, ObjectType, Result, SchemaVersion, Type,
    raw::{RawLineage, RawSchema, RawType, toml_to_json},
    validate::{ParseContext, validate_lineage_name},
};

/// Name of the file a lineage is read from.
pub const LINEAGE_FILE: &str = "lineage.toml";

/// One schema version within a lineage.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    version: SchemaVersion,
    description: Option<String>,
    root: ObjectType,
    definitions: Vec<Definition>,
}

impl Schema {
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The top-level object every instance of this schema is.
    pub fn root(&self) -> &ObjectType {
        &self.root
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name == name)
    }
}

/// A versioned family of schemas for one logical model.
///
/// A loaded lineage always holds at least one schema, ordered by version.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineage {
    name: String,
    path: String,
    schemas: Vec<Schema>,
}

impl Lineage {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the lineage was loaded from, relative to the repository root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn versions(&self) -> impl Iterator<Item = SchemaVersion> + '_ {
        self.schemas.iter().map(Schema::version)
    }

    pub fn schema(&self, version: SchemaVersion) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.version == version)
    }

    pub fn latest(&self) -> &Schema {
        &self.schemas[self.schemas.len() - 1]
    }

    pub fn latest_version(&self) -> SchemaVersion {
        self.latest().version
    }
}

/// Look up one schema of a lineage by version.
pub fn schema_for(lineage: &Lineage, version: SchemaVersion) -> Result<&Schema> {
    lineage
        .schema(version)
        .ok_or_else(|| Error::version_not_found(lineage.name(), version))
}

/// Load the lineage stored as [`LINEAGE_FILE`] in `fs`.
///
/// `path` is the lineage directory relative to the repository root; its last
/// component names the lineage unless the file declares a `name`.
pub fn load(path: &str, fs: &MemoryFs, lib: &Library) -> Result<Lineage> {
    let path = path.trim_end_matches('/');
    let bytes = fs.read(LINEAGE_FILE).ok_or_else(|| {
        Box::new(Error::MissingFile {
            path: path.to_string(),
            file: LINEAGE_FILE.to_string(),
        })
    })?;

    let filename = if path.is_empty() {
        LINEAGE_FILE.to_string()
    } else {
        format!("{path}/{LINEAGE_FILE}")
    };
    let src = std::str::from_utf8(bytes).map_err(|_| {
        Box::new(Error::Encoding {
            filename: filename.clone(),
        })
    })?;

    let ctx = ParseContext::new(src, &filename);
    let raw: RawLineage = toml::from_str(src).map_err(|e| ctx.parse_error(e))?;

    let name = raw
        .name
        .clone()
        .unwrap_or_else(|| path.rsplit('/').next().unwrap_or_default().to_string());
    if let Some(reason) = validate_lineage_name(&name) {
        return Err(Error::invalid_name(name, reason));
    }

    let schemas = lower_lineage(&ctx, &raw, lib)?;
    tracing::debug!(lineage = %name, versions = schemas.len(), "lineage loaded");

    Ok(Lineage {
        name,
        path: path.to_string(),
        schemas,
    })
}

fn lower_lineage(ctx: &ParseContext<'_>, raw: &RawLineage, lib: &Library) -> Result<Vec<Schema>> {
    if raw.seqs.is_empty() {
        return Err(ctx.error("a lineage needs at least one schema sequence"));
    }

    let mut schemas: Vec<Schema> = Vec::new();
    for (seq_idx, seq) in raw.seqs.iter().enumerate() {
        let seq_ctx = ctx.push("seqs").push(format!("[{seq_idx}]"));
        if seq.schemas.is_empty() {
            return Err(seq_ctx.error("schema sequence is empty"));
        }

        for (schema_idx, raw_schema) in seq.schemas.iter().enumerate() {
            let schema_ctx = seq_ctx.push("schemas").push(format!("[{schema_idx}]"));
            let version = SchemaVersion::new(seq_idx as u32, schema_idx as u32);
            let schema = Lowerer::new(&schema_ctx, lib, raw_schema).schema(version, raw_schema)?;

            let prev = if schema_idx > 0 { schemas.last() } else { None };
            if let Some(prev) = prev {
                check_compatible(&schema_ctx, prev, &schema)?;
            }
            schemas.push(schema);
        }
    }

    Ok(schemas)
}

/// Resolves raw type expressions against a library and the schema's own definitions.
struct Lowerer<'a> {
    ctx: &'a ParseContext<'a>,
    lib: &'a Library,
    definitions: BTreeSet<&'a str>,
}

impl<'a> Lowerer<'a> {
    fn new(ctx: &'a ParseContext<'a>, lib: &'a Library, raw: &'a RawSchema) -> Self {
        Self {
            ctx,
            lib,
            definitions: raw.definitions.keys().map(String::as_str).collect(),
        }
    }

    fn schema(&self, version: SchemaVersion, raw: &RawSchema) -> Result<Schema> {
        let root = self.object(&self.ctx.push("fields"), &raw.fields)?;

        let mut definitions = Vec::with_capacity(raw.definitions.len());
        for (name, def) in &raw.definitions {
            let def_ctx = self.ctx.push("definitions").push(name.as_str());
            if self.lib.resolve(name).is_some() {
                return Err(def_ctx.error_near(
                    format!("definition '{name}' shadows a library type"),
                    Some(name),
                ));
            }
            definitions.push(Definition {
                name: name.clone(),
                ty: self.ty(&def_ctx, def)?,
                description: def.description.clone(),
                default: def.default.as_ref().map(toml_to_json),
            });
        }

        Ok(Schema {
            version,
            description: raw.description.clone(),
            root,
            definitions,
        })
    }

    fn object(
        &self,
        ctx: &ParseContext<'_>,
        fields: &IndexMap<String, RawType>,
    ) -> Result<ObjectType> {
        let mut lowered = Vec::with_capacity(fields.len());
        for (name, raw) in fields {
            let field_ctx = ctx.push(name.as_str());
            lowered.push(Field {
                name: name.clone(),
                ty: self.ty(&field_ctx, raw)?,
                description: raw.description.clone(),
                optional: raw.optional,
                default: raw.default.as_ref().map(toml_to_json),
            });
        }
        Ok(ObjectType { fields: lowered })
    }

    fn ty(&self, ctx: &ParseContext<'_>, raw: &RawType) -> Result<Type> {
        if let Some(variants) = &raw.variants {
            return self.enumeration(ctx, raw, variants);
        }

        let ty = match raw.ty.as_deref() {
            Some("array") => {
                let items = raw
                    .items
                    .as_deref()
                    .ok_or_else(|| ctx.error("arrays need an `items` type"))?;
                Type::Array(Box::new(self.ty(&ctx.push("items"), items)?))
            }
            Some("map") => {
                let values = raw
                    .values
                    .as_deref()
                    .ok_or_else(|| ctx.error("maps need a `values` type"))?;
                Type::Map(Box::new(self.ty(&ctx.push("values"), values)?))
            }
            Some("object") | None if raw.fields.is_some() => {
                let fields = raw.fields.as_ref().map(|f| self.object(&ctx.push("fields"), f));
                Type::Object(fields.transpose()?.unwrap_or_default())
            }
            Some("object") => Type::Object(ObjectType::default()),
            None => return Err(ctx.error("missing `type`")),
            Some(name) => {
                if let Some(scalar) = self.lib.resolve(name) {
                    Type::Scalar(scalar)
                } else if self.definitions.contains(name) {
                    Type::Ref(name.to_string())
                } else {
                    return Err(ctx.error_near(format!("unknown type '{name}'"), Some(name)));
                }
            }
        };

        self.check_extra_keys(ctx, raw, &ty)?;
        Ok(ty)
    }

    fn enumeration(
        &self,
        ctx: &ParseContext<'_>,
        raw: &RawType,
        variants: &[String],
    ) -> Result<Type> {
        if raw.ty.as_deref().is_some_and(|t| t != "string") {
            return Err(ctx.error("enums are always string typed"));
        }
        if variants.is_empty() {
            return Err(ctx.error("enum has no values"));
        }

        let mut seen = BTreeSet::new();
        for value in variants {
            if !seen.insert(value.as_str()) {
                return Err(ctx.error_near(format!("duplicate enum value '{value}'"), Some(value)));
            }
        }

        if let Some(default) = &raw.default {
            let valid = default.as_str().is_some_and(|d| seen.contains(d));
            if !valid {
                return Err(ctx.error("enum default must be one of its values"));
            }
        }

        let ty = Type::Enum(variants.to_vec());
        self.check_extra_keys(ctx, raw, &ty)?;
        Ok(ty)
    }

    fn check_extra_keys(&self, ctx: &ParseContext<'_>, raw: &RawType, ty: &Type) -> Result<()> {
        let misplaced = if raw.items.is_some() && !matches!(ty, Type::Array(_)) {
            Some("items")
        } else if raw.values.is_some() && !matches!(ty, Type::Map(_)) {
            Some("values")
        } else if raw.fields.is_some() && !matches!(ty, Type::Object(_)) {
            Some("fields")
        } else {
            None
        };
        match misplaced {
            Some(key) => Err(ctx.error(format!("`{key}` is not valid on a {} type", ty.kind()))),
            None => Ok(()),
        }
    }
}

/// Within a sequence, every schema must accept all data its predecessor accepted.
fn check_compatible(ctx: &ParseContext<'_>, prev: &Schema, next: &Schema) -> Result<()> {
    let incompatible = |reason: String| {
        ctx.error(format!(
            "schema {} is not backwards compatible with {}: {reason}",
            next.version, prev.version
        ))
    };

    for old in &prev.root.fields {
        let Some(new) = next.root.field(&old.name) else {
            return Err(incompatible(format!("field '{}' was removed", old.name)));
        };
        if new.ty != old.ty {
            return Err(incompatible(format!("field '{}' changed type", old.name)));
        }
        if old.optional && !new.optional {
            return Err(incompatible(format!("field '{}' became required", old.name)));
        }
    }

    for new in &next.root.fields {
        if prev.root.field(&new.name).is_none() && !new.optional {
            return Err(incompatible(format!(
                "new field '{}' must be optional",
                new.name
            )));
        }
    }

    for old in &prev.definitions {
        match next.definition(&old.name) {
            Some(new) if new.ty == old.ty => {}
            Some(_) => return Err(incompatible(format!("definition '{}' changed", old.name))),
            None => return Err(incompatible(format!("definition '{}' was removed", old.name))),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    fn load_str(path: &str, src: &str) -> Result<Lineage> {
        load(path, &MemoryFs::single(LINEAGE_FILE, src), Library::shared())
    }

    const PANEL: &str = r#"
        [[seqs]]
        [[seqs.schemas]]
        [seqs.schemas.fields]
        title = { type = "string" }

        [[seqs.schemas]]
        [seqs.schemas.fields]
        title = { type = "string" }
        transparent = { type = "bool", optional = true, default = false }

        [[seqs.schemas]]
        description = "A panel on a dashboard."
        [seqs.schemas.fields]
        title = { type = "string", description = "Panel title" }
        transparent = { type = "bool", optional = true, default = false }
        gridPos = { type = "GridPos", optional = true }
        [seqs.schemas.definitions.GridPos]
        type = "object"
        fields = { x = { type = "int32" }, y = { type = "int32" } }
    "#;

    #[test]
    fn test_load_name_from_directory() {
        let lin = load_str("pkg/coremodel/panel", PANEL).unwrap();
        assert_eq!(lin.name(), "panel");
        assert_eq!(lin.path(), "pkg/coremodel/panel");
    }

    #[test]
    fn test_declared_name_overrides_directory() {
        let src = format!("name = \"widget\"\n{PANEL}");
        let lin = load_str("pkg/coremodel/panel", &src).unwrap();
        assert_eq!(lin.name(), "widget");
    }

    #[test]
    fn test_versions_and_latest() {
        let lin = load_str("pkg/coremodel/panel", PANEL).unwrap();
        let versions: Vec<_> = lin.versions().collect();
        assert_eq!(
            versions,
            [
                SchemaVersion::new(0, 0),
                SchemaVersion::new(0, 1),
                SchemaVersion::new(0, 2)
            ]
        );
        assert_eq!(lin.latest_version(), SchemaVersion::new(0, 2));
        assert_eq!(lin.latest().description(), Some("A panel on a dashboard."));
    }

    #[test]
    fn test_schema_for() {
        let lin = load_str("pkg/coremodel/panel", PANEL).unwrap();
        let schema = schema_for(&lin, SchemaVersion::new(0, 2)).unwrap();

        let grid = schema.root().field("gridPos").unwrap();
        assert_eq!(grid.ty, Type::Ref("GridPos".into()));
        assert!(grid.optional);

        let title = schema.root().field("title").unwrap();
        assert_eq!(title.ty, Type::Scalar(Scalar::String));
        assert_eq!(title.description.as_deref(), Some("Panel title"));

        let err = schema_for(&lin, SchemaVersion::new(1, 0)).unwrap_err();
        assert_eq!(err.to_string(), "lineage 'panel' has no schema version 1.0");
    }

    #[test]
    fn test_empty_file_is_a_parse_error() {
        let err = load_str("pkg/coremodel/widget", "").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
        let msg = err.to_string();
        assert!(msg.contains("pkg/coremodel/widget/lineage.toml"), "{msg}");
        assert!(msg.contains("seqs"), "{msg}");
    }

    #[test]
    fn test_missing_file() {
        let err = load("pkg/coremodel/widget", &MemoryFs::new(), Library::shared()).unwrap_err();
        assert!(matches!(*err, Error::MissingFile { .. }));
    }

    #[test]
    fn test_invalid_name() {
        let err = load_str("pkg/coremodel/Panel", PANEL).unwrap_err();
        assert!(matches!(*err, Error::InvalidName { .. }));
    }

    #[test]
    fn test_unknown_type() {
        let src = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { pos = { type = "Position" } }
        "#;
        let err = load_str("pkg/coremodel/panel", src).unwrap_err();
        assert_eq!(
            err.to_string(),
            "pkg/coremodel/panel/lineage.toml: seqs[0].schemas[0].fields.pos: unknown type 'Position'"
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let src = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { title = { type = "string", nullable = true } }
        "#;
        let err = load_str("pkg/coremodel/panel", src).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_nested_types() {
        let src = r#"
            [[seqs]]
            [[seqs.schemas]]
            [seqs.schemas.fields]
            tags = { type = "array", items = { type = "string" } }
            options = { type = "map", values = { type = "any" } }
            mode = { enum = ["time", "series"], default = "time" }
            pos = { fields = { x = { type = "int32" } } }
        "#;
        let lin = load_str("pkg/coremodel/panel", src).unwrap();
        let root = lin.latest().root();

        assert_eq!(
            root.field("tags").unwrap().ty,
            Type::Array(Box::new(Type::Scalar(Scalar::String)))
        );
        assert_eq!(
            root.field("options").unwrap().ty,
            Type::Map(Box::new(Type::Scalar(Scalar::Any)))
        );
        assert_eq!(
            root.field("mode").unwrap().ty,
            Type::Enum(vec!["time".into(), "series".into()])
        );
        assert!(matches!(root.field("pos").unwrap().ty, Type::Object(_)));
        assert!(root.has_defaults());
    }

    #[test]
    fn test_enum_validation() {
        let duplicate = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { mode = { enum = ["a", "a"] } }
        "#;
        assert!(load_str("pkg/coremodel/panel", duplicate).is_err());

        let bad_default = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { mode = { enum = ["a", "b"], default = "c" } }
        "#;
        assert!(load_str("pkg/coremodel/panel", bad_default).is_err());
    }

    #[test]
    fn test_misplaced_items() {
        let src = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { title = { type = "string", items = { type = "string" } } }
        "#;
        let err = load_str("pkg/coremodel/panel", src).unwrap_err();
        assert!(err.to_string().contains("`items` is not valid on a string type"));
    }

    #[test]
    fn test_empty_sequences_rejected() {
        assert!(load_str("pkg/coremodel/panel", "seqs = []").is_err());
        assert!(load_str("pkg/coremodel/panel", "[[seqs]]").is_err());
    }

    #[test]
    fn test_incompatible_schema_in_sequence() {
        let src = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { title = { type = "string" } }
            [[seqs.schemas]]
            fields = { title = { type = "int64" } }
        "#;
        let err = load_str("pkg/coremodel/panel", src).unwrap_err();
        assert!(err.to_string().contains(
            "schema 0.1 is not backwards compatible with 0.0: field 'title' changed type"
        ));

        let required = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { title = { type = "string" } }
            [[seqs.schemas]]
            fields = { title = { type = "string" }, span = { type = "int32" } }
        "#;
        assert!(load_str("pkg/coremodel/panel", required).is_err());
    }

    #[test]
    fn test_breaking_change_across_sequences() {
        let src = r#"
            [[seqs]]
            [[seqs.schemas]]
            fields = { title = { type = "string" } }
            [[seqs]]
            [[seqs.schemas]]
            fields = { name = { type = "string" } }
        "#;
        let lin = load_str("pkg/coremodel/panel", src).unwrap();
        assert_eq!(lin.latest_version(), SchemaVersion::new(1, 0));
    }
}
