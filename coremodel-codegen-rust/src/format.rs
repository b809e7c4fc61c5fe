//! Import normalization for generated Rust files.

use std::collections::{BTreeMap, BTreeSet};

use eyre::{Result, WrapErr};
use syn::{Item, UseTree, Visibility, visit::Visit};

use crate::rewrite::IdentCollector;

/// Which block of imports a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Std,
    External,
    Local,
}

impl Group {
    fn of(root: &str) -> Self {
        match root.trim_start_matches("::") {
            "std" | "core" | "alloc" => Group::Std,
            "crate" | "self" | "super" => Group::Local,
            _ => Group::External,
        }
    }
}

/// One imported name: `use <module>::<leaf>;`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Import {
    module: Vec<String>,
    leaf: Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Leaf {
    Name(String),
    Rename(String, String),
    Glob,
}

impl Leaf {
    fn render(&self) -> String {
        match self {
            Leaf::Name(name) => name.clone(),
            Leaf::Rename(name, alias) => format!("{name} as {alias}"),
            Leaf::Glob => "*".to_string(),
        }
    }
}

impl Import {
    /// Whether the imported binding is referenced anywhere in `used`.
    fn is_used(&self, used: &BTreeSet<String>) -> bool {
        match &self.leaf {
            Leaf::Name(name) => used.contains(name),
            Leaf::Rename(_, alias) => alias == "_" || used.contains(alias),
            Leaf::Glob => true,
        }
    }

    fn root(&self) -> &str {
        let first = self.module.iter().find(|segment| *segment != "::");
        match (first, &self.leaf) {
            (Some(root), _) => root,
            (None, Leaf::Name(name) | Leaf::Rename(name, _)) => name,
            (None, Leaf::Glob) => "",
        }
    }
}

/// Rewrite the `use` items of a Rust file.
///
/// Imports are flattened to one name each, deduplicated, and dropped when the
/// imported name is never referenced. The survivors are regrouped into std,
/// external and crate-local blocks, sorted, and merged per module. `use`
/// items carrying attributes or visibility are kept where they are.
///
/// A trait used only through method calls is never referenced by name, so it
/// has to be imported as `use path::Trait as _` to survive.
pub fn normalize_imports(source: &str) -> Result<String> {
    let file = syn::parse_file(source).wrap_err("failed to parse rust source")?;

    let mut imports = BTreeSet::new();
    let mut rest = Vec::new();
    for item in file.items {
        match item {
            Item::Use(item)
                if item.attrs.is_empty() && matches!(item.vis, Visibility::Inherited) =>
            {
                let prefix = if item.leading_colon.is_some() {
                    vec!["::".to_string()]
                } else {
                    Vec::new()
                };
                flatten(&item.tree, prefix, &mut imports);
            }
            other => rest.push(other),
        }
    }

    let mut collector = IdentCollector::default();
    for item in &rest {
        collector.visit_item(item);
    }
    let used = collector.idents;

    let mut groups: BTreeMap<Group, BTreeMap<String, Vec<Leaf>>> = BTreeMap::new();
    for import in imports.into_iter().filter(|i| i.is_used(&used)) {
        let group = Group::of(import.root());
        let module = render_module(&import.module);
        groups
            .entry(group)
            .or_default()
            .entry(module)
            .or_default()
            .push(import.leaf);
    }

    let header = prettyplease::unparse(&syn::File {
        shebang: file.shebang,
        attrs: file.attrs,
        items: Vec::new(),
    });
    let body = prettyplease::unparse(&syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: rest,
    });

    let mut out = header;
    if !out.is_empty() {
        out.push('\n');
    }
    for modules in groups.values() {
        for (module, leaves) in modules {
            out.push_str(&render_use(module, leaves));
        }
        out.push('\n');
    }
    out.push_str(&body);

    tracing::debug!(bytes = out.len(), "normalized imports");
    Ok(out)
}

fn flatten(tree: &UseTree, mut module: Vec<String>, out: &mut BTreeSet<Import>) {
    match tree {
        UseTree::Path(path) => {
            module.push(path.ident.to_string());
            flatten(&path.tree, module, out);
        }
        UseTree::Name(name) => {
            let name = name.ident.to_string();
            // `use a::b::{self}` imports `b`
            if name == "self" {
                if let Some(last) = module.pop() {
                    out.insert(Import {
                        module,
                        leaf: Leaf::Name(last),
                    });
                }
                return;
            }
            out.insert(Import {
                module,
                leaf: Leaf::Name(name),
            });
        }
        UseTree::Rename(rename) => {
            let name = rename.ident.to_string();
            let alias = rename.rename.to_string();
            let (module, name) = if name == "self" {
                let mut module = module;
                match module.pop() {
                    Some(last) => (module, last),
                    None => return,
                }
            } else {
                (module, name)
            };
            out.insert(Import {
                module,
                leaf: Leaf::Rename(name, alias),
            });
        }
        UseTree::Glob(_) => {
            out.insert(Import {
                module,
                leaf: Leaf::Glob,
            });
        }
        UseTree::Group(group) => {
            for tree in &group.items {
                flatten(tree, module.clone(), out);
            }
        }
    }
}

fn render_module(module: &[String]) -> String {
    let mut out = String::new();
    for segment in module {
        if !out.is_empty() && !out.ends_with("::") {
            out.push_str("::");
        }
        out.push_str(segment);
    }
    out
}

fn render_use(module: &str, leaves: &[Leaf]) -> String {
    let leaves: Vec<String> = leaves.iter().map(Leaf::render).collect();
    let joiner = if module.is_empty() || module.ends_with("::") {
        ""
    } else {
        "::"
    };
    match leaves.as_slice() {
        [single] => format!("use {module}{joiner}{single};\n"),
        _ => format!("use {module}{joiner}{{{}}};\n", leaves.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_group_sort_and_prune() {
        let source = r#"
            //! Generated.

            use crate::coremodel::panel;
            use std::collections::HashMap;
            use serde::{Deserialize, Serialize};
            use std::sync::{Arc, OnceLock};
            use std::collections::{BTreeMap, HashMap as Map};
            use serde::Serialize;

            #[derive(Serialize, Deserialize)]
            pub struct Model {
                pub tags: HashMap<String, String>,
            }

            static CACHE: OnceLock<Arc<panel::Coremodel>> = OnceLock::new();
        "#;

        let out = normalize_imports(source).unwrap();
        assert!(out.starts_with("//! Generated.\n\n"), "{out}");
        assert!(
            out.contains(
                "\nuse std::collections::HashMap;\n\
                 use std::sync::{Arc, OnceLock};\n\
                 \n\
                 use serde::{Deserialize, Serialize};\n\
                 \n\
                 use crate::coremodel::panel;\n\
                 \n\
                 #[derive(Serialize, Deserialize)]\n"
            ),
            "{out}"
        );
        assert!(!out.contains("BTreeMap"));
        assert!(!out.contains("as Map"));
        assert!(syn::parse_file(&out).is_ok());
    }

    #[test]
    fn test_keeps_self_rename_glob_and_attributed_uses() {
        let source = r#"
            use std::fmt::{self, Write as _};
            use std::io::prelude::*;
            #[cfg(test)]
            use std::path::PathBuf;
            pub use crate::generated::Model;

            fn show(f: &mut fmt::Formatter<'_>) {}
        "#;

        let out = normalize_imports(source).unwrap();
        assert!(
            out.starts_with(
                "use std::fmt;\nuse std::fmt::Write as _;\nuse std::io::prelude::*;\n\n"
            ),
            "{out}"
        );
        assert!(out.contains("#[cfg(test)]\nuse std::path::PathBuf;\n"));
        assert!(out.contains("pub use crate::generated::Model;\n"));
    }

    #[test]
    fn test_idempotent() {
        let source = "use std::sync::Arc;\nuse serde::Serialize;\n\n#[derive(Serialize)]\npub struct Model {\n    pub a: Arc<String>,\n}\n";
        let once = normalize_imports(source).unwrap();
        let twice = normalize_imports(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_source() {
        let err = normalize_imports("pub struct {").unwrap_err();
        assert_eq!(err.to_string(), "failed to parse rust source");
    }
}
