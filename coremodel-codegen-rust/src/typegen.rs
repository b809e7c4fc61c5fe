//! Rust type generation from OpenAPI component schemas.
//!
//! Every component schema becomes one declaration: objects with properties
//! become serde structs, string enums become unit enums, and everything else
//! becomes a type alias. Inline objects and enums are lifted into their own
//! named declarations, emitted right after the declaration that uses them.
//!
//! Output is assembled from two templates. `imports.tmpl` renders once at the
//! top of the file; `typedef.tmpl` renders once per declaration with
//! `type_name`, `json_name`, `description` and `declaration` in scope. Both
//! templates also see every entry of [`Options::vars`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use coremodel_codegen::{
    Templates,
    builder::{CodeBuilder, CodeFragment, Renderable},
};
use coremodel_core::to_pascal_case;
use eyre::{Result, WrapErr, bail, eyre};
use indexmap::IndexMap;
use petgraph::{algo::tarjan_scc, graph::DiGraph};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    RUST_NAMING,
    ast::{Enum, Field, Struct, TypeAlias, Variant},
    naming::{field_ident, unraw, variant_ident},
    openapi::{AdditionalProperties, Document, SchemaObject},
};

pub const IMPORTS_TEMPLATE: &str = "imports.tmpl";
pub const TYPEDEF_TEMPLATE: &str = "typedef.tmpl";

const DEFAULT_IMPORTS: &str =
    "use serde::{Deserialize, Serialize};\nuse std::collections::HashMap;\n";
const DEFAULT_TYPEDEF: &str =
    "{% if description %}{{ description | rust_doc }}\n{% endif %}{{ declaration }}";

/// Derives on every generated struct.
pub const STRUCT_DERIVES: [&str; 6] = [
    "Debug",
    "Clone",
    "Default",
    "PartialEq",
    "Serialize",
    "Deserialize",
];

/// Derives on every generated enum.
pub const ENUM_DERIVES: [&str; 9] = [
    "Debug",
    "Clone",
    "Copy",
    "Default",
    "PartialEq",
    "Eq",
    "Hash",
    "Serialize",
    "Deserialize",
];

/// Identifiers generated declarations refer to besides their own names.
pub const BUILTIN_IDENTS: &[&str] = &[
    "Box",
    "HashMap",
    "Option",
    "String",
    "Value",
    "Vec",
    "serde_json",
];

#[derive(Debug, Clone)]
pub struct Options {
    /// Emit type declarations; when off only the imports are rendered
    pub generate_types: bool,
    /// Keep component schemas the root does not reach
    pub skip_prune: bool,
    /// Return the rendered text without parsing and pretty-printing it
    pub skip_fmt: bool,
    /// Templates replacing the built-in `imports.tmpl`/`typedef.tmpl`
    pub user_templates: BTreeMap<String, String>,
    /// Extra variables visible to every template
    pub vars: Map<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            generate_types: true,
            skip_prune: false,
            skip_fmt: false,
            user_templates: BTreeMap::new(),
            vars: Map::new(),
        }
    }
}

/// Generate Rust declarations for the OpenAPI document in `doc_json`.
///
/// `name` is the component holding the root object; pruning keeps only what
/// it reaches.
pub fn generate(doc_json: &str, name: &str, options: &Options) -> Result<String> {
    let doc: Document = serde_json::from_str(doc_json).wrap_err("invalid OpenAPI document")?;
    tracing::debug!(title = %doc.info.title, version = %doc.info.version, "generating rust types");

    let mut templates = Templates::new()
        .with(IMPORTS_TEMPLATE, DEFAULT_IMPORTS)
        .with(TYPEDEF_TEMPLATE, DEFAULT_TYPEDEF);
    for (template, source) in &options.user_templates {
        templates.insert(template.clone(), source.clone());
    }

    let mut out = templates.render(IMPORTS_TEMPLATE, &options.vars)?;

    if options.generate_types {
        let schemas = if options.skip_prune {
            doc.components.schemas
        } else {
            prune(doc.components.schemas, name)?
        };

        for decl in TypeGen::new(&schemas).run()? {
            let ctx = TypedefContext {
                declaration: CodeBuilder::rust().emit(&decl.item).build(),
                type_name: &decl.type_name,
                json_name: &decl.json_name,
                description: decl.description.as_deref(),
                vars: &options.vars,
            };
            out.push('\n');
            out.push_str(&templates.render(TYPEDEF_TEMPLATE, ctx)?);
        }
    }

    if options.skip_fmt {
        return Ok(out);
    }
    let file = syn::parse_file(&out).wrap_err("generated types are not valid Rust")?;
    Ok(prettyplease::unparse(&file))
}

#[derive(Serialize)]
struct TypedefContext<'a> {
    type_name: &'a str,
    json_name: &'a str,
    description: Option<&'a str>,
    declaration: String,
    #[serde(flatten)]
    vars: &'a Map<String, Value>,
}

/// Drop component schemas `root` does not reach through `$ref`s.
fn prune(
    mut schemas: IndexMap<String, SchemaObject>,
    root: &str,
) -> Result<IndexMap<String, SchemaObject>> {
    if !schemas.contains_key(root) {
        bail!("document has no component schema named '{root}'");
    }

    let mut reachable = BTreeSet::new();
    let mut queue = VecDeque::from([root.to_string()]);
    while let Some(name) = queue.pop_front() {
        if !reachable.insert(name.clone()) {
            continue;
        }
        let Some(schema) = schemas.get(&name) else {
            continue;
        };
        let mut stack = vec![schema];
        while let Some(schema) = stack.pop() {
            if let Some(target) = schema.ref_name() {
                queue.push_back(target.to_string());
            }
            stack.extend(schema.children());
        }
    }

    schemas.retain(|name, _| reachable.contains(name));
    Ok(schemas)
}

/// Strongly connected component of every component schema, over the
/// graph of schemas held by value.
///
/// Two schemas in the same group contain each other, so a field of one
/// referring to the other needs a `Box`.
fn recursive_groups(schemas: &IndexMap<String, SchemaObject>) -> HashMap<&str, usize> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let nodes: HashMap<&str, _> = schemas
        .keys()
        .map(|name| (name.as_str(), graph.add_node(name.as_str())))
        .collect();

    for (name, schema) in schemas {
        for target in schema.value_refs() {
            if let Some(&to) = nodes.get(target) {
                graph.update_edge(nodes[name.as_str()], to, ());
            }
        }
    }

    let mut groups = HashMap::new();
    for (group, scc) in tarjan_scc(&graph).into_iter().enumerate() {
        for node in scc {
            groups.insert(graph[node], group);
        }
    }
    groups
}

/// One generated declaration.
struct TypeDecl {
    type_name: String,
    json_name: String,
    description: Option<String>,
    item: Item,
}

enum Item {
    Struct(Struct),
    Enum(Enum),
    Alias(TypeAlias),
}

impl Renderable for Item {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Item::Struct(s) => s.to_fragments(),
            Item::Enum(e) => e.to_fragments(),
            Item::Alias(a) => a.to_fragments(),
        }
    }
}

struct TypeGen<'a> {
    schemas: &'a IndexMap<String, SchemaObject>,
    /// Component name to Rust type name
    names: IndexMap<&'a str, String>,
    used: HashSet<String>,
    groups: HashMap<&'a str, usize>,
    /// Component schema being generated
    current: Option<&'a str>,
}

impl<'a> TypeGen<'a> {
    fn new(schemas: &'a IndexMap<String, SchemaObject>) -> Self {
        let mut generator = Self {
            schemas,
            names: IndexMap::new(),
            used: HashSet::new(),
            groups: recursive_groups(schemas),
            current: None,
        };
        for name in schemas.keys() {
            let type_name = generator.unique(&RUST_NAMING.type_name(name));
            generator.names.insert(name, type_name);
        }
        generator
    }

    fn run(mut self) -> Result<Vec<TypeDecl>> {
        let mut decls = Vec::new();
        for (name, schema) in self.schemas {
            self.current = Some(name.as_str());
            let type_name = self.names[name.as_str()].clone();
            let mut nested = Vec::new();
            let item = self
                .declaration(&type_name, name, schema, &mut nested)
                .wrap_err_with(|| format!("component schema '{name}'"))?;
            decls.push(TypeDecl {
                type_name,
                json_name: name.clone(),
                description: schema.description.clone(),
                item,
            });
            decls.extend(nested);
        }
        Ok(decls)
    }

    /// Reserve `base`, or `base` plus the smallest free numeric suffix.
    fn unique(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }

    /// Whether a field of the current component referring to `schema` would
    /// make the containing type infinitely sized.
    fn needs_box(&self, schema: &SchemaObject) -> bool {
        let Some(target) = schema.ref_name() else {
            return false;
        };
        let current = self.current.and_then(|name| self.groups.get(name));
        current.is_some() && current == self.groups.get(target)
    }

    fn resolve_ref(&self, schema: &SchemaObject) -> Result<Option<String>> {
        let Some(target) = schema.ref_name() else {
            return Ok(None);
        };
        match self.names.get(target) {
            Some(name) => Ok(Some(name.clone())),
            None => bail!("unresolved reference '{target}'"),
        }
    }

    fn declaration(
        &mut self,
        type_name: &str,
        json: &str,
        schema: &SchemaObject,
        nested: &mut Vec<TypeDecl>,
    ) -> Result<Item> {
        if let Some(values) = &schema.variants {
            return Ok(Item::Enum(enum_decl(type_name, values)?));
        }
        if schema.is_struct() {
            return Ok(Item::Struct(self.struct_decl(type_name, json, schema, nested)?));
        }
        let target = self.type_ref(type_name, json, schema, nested)?;
        Ok(Item::Alias(TypeAlias::new(type_name, target)))
    }

    fn struct_decl(
        &mut self,
        type_name: &str,
        json: &str,
        schema: &SchemaObject,
        nested: &mut Vec<TypeDecl>,
    ) -> Result<Struct> {
        let mut decl = Struct::new(type_name).derives(STRUCT_DERIVES);
        let Some(properties) = &schema.properties else {
            return Ok(decl);
        };

        for (prop, prop_schema) in properties {
            let inline_name = format!("{type_name}{}", to_pascal_case(prop));
            let mut ty =
                self.type_ref(&inline_name, &format!("{json}.{prop}"), prop_schema, nested)?;
            if self.needs_box(prop_schema) {
                ty = format!("Box<{ty}>");
            }

            let ident = field_ident(prop);
            let mut field = Field::new(ident.clone(), String::new());
            if let Some(description) = &prop_schema.description {
                field = field.doc(description.clone());
            }
            if unraw(&ident) != prop {
                field = field.attr(format!("serde(rename = {prop:?})"));
            }
            if !schema.required.iter().any(|r| r == prop) {
                ty = format!("Option<{ty}>");
                field = field.attr("serde(default, skip_serializing_if = \"Option::is_none\")");
            }
            field.ty = ty;
            decl = decl.field(field);
        }

        Ok(decl)
    }

    /// The Rust type for `schema`, lifting inline objects and enums into
    /// declarations named `name`.
    fn type_ref(
        &mut self,
        name: &str,
        json: &str,
        schema: &SchemaObject,
        nested: &mut Vec<TypeDecl>,
    ) -> Result<String> {
        if let Some(target) = self.resolve_ref(schema)? {
            return Ok(target);
        }

        if let Some(values) = &schema.variants {
            let type_name = self.unique(name);
            let item = Item::Enum(enum_decl(&type_name, values)?);
            nested.push(self.inline(type_name.clone(), json, schema, item));
            return Ok(type_name);
        }

        if schema.is_struct() {
            let type_name = self.unique(name);
            let mut inner = Vec::new();
            let item = Item::Struct(self.struct_decl(&type_name, json, schema, &mut inner)?);
            nested.push(self.inline(type_name.clone(), json, schema, item));
            nested.extend(inner);
            return Ok(type_name);
        }

        let format = schema.format.as_deref();
        let ty = match schema.ty.as_deref() {
            Some("string") if format == Some("byte") => "Vec<u8>".to_string(),
            Some("string") => "String".to_string(),
            Some("boolean") => "bool".to_string(),
            Some("integer") => integer_type(format).to_string(),
            Some("number") if format == Some("float") => "f32".to_string(),
            Some("number") => "f64".to_string(),
            Some("array") => {
                let items = schema
                    .items
                    .as_deref()
                    .ok_or_else(|| eyre!("array schema at {json} has no items"))?;
                let item =
                    self.type_ref(&format!("{name}Item"), &format!("{json}[]"), items, nested)?;
                format!("Vec<{item}>")
            }
            Some("object") => match &schema.additional_properties {
                Some(AdditionalProperties::Schema(values)) => {
                    let value = self.type_ref(
                        &format!("{name}Value"),
                        &format!("{json}{{}}"),
                        values,
                        nested,
                    )?;
                    format!("HashMap<String, {value}>")
                }
                Some(AdditionalProperties::Allowed(true)) => {
                    "HashMap<String, serde_json::Value>".to_string()
                }
                _ => "serde_json::Value".to_string(),
            },
            None => "serde_json::Value".to_string(),
            Some(other) => bail!("unsupported schema type '{other}' at {json}"),
        };
        Ok(ty)
    }

    fn inline(&self, type_name: String, json: &str, schema: &SchemaObject, item: Item) -> TypeDecl {
        TypeDecl {
            type_name,
            json_name: json.to_string(),
            description: schema.description.clone(),
            item,
        }
    }
}

fn integer_type(format: Option<&str>) -> &'static str {
    match format {
        Some("int8") => "i8",
        Some("int16") => "i16",
        Some("int32") => "i32",
        Some("uint8") => "u8",
        Some("uint16") => "u16",
        Some("uint32") => "u32",
        Some("uint64") => "u64",
        _ => "i64",
    }
}

fn enum_decl(type_name: &str, values: &[Value]) -> Result<Enum> {
    let mut decl = Enum::new(type_name).derives(ENUM_DERIVES);
    let mut seen = HashSet::new();

    for (i, value) in values.iter().enumerate() {
        let Some(value) = value.as_str() else {
            bail!("enum {type_name} has a non-string value {value}");
        };

        let base = variant_ident(value);
        let mut ident = base.clone();
        let mut n = 2;
        while !seen.insert(ident.clone()) {
            ident = format!("{base}{n}");
            n += 1;
        }

        let mut variant = Variant::new(ident);
        if i == 0 {
            variant = variant.attr("default");
        }
        decl = decl.variant(variant.attr(format!("serde(rename = {value:?})")));
    }

    if values.is_empty() {
        bail!("enum {type_name} has no values");
    }
    Ok(decl)
}
