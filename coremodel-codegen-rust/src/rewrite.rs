//! Renaming of lineage-prefixed identifiers to `Model`.

use std::collections::BTreeSet;

use proc_macro2::{TokenStream, TokenTree};
use syn::{
    Ident, Item, Macro, MetaList,
    visit::{self, Visit},
    visit_mut::{self, VisitMut},
};

/// What the lineage prefix is replaced with.
pub const MODEL_IDENT: &str = "Model";

/// Replace a leading `prefix` of `s` with [`MODEL_IDENT`].
///
/// `replace_prefix("DashboardPanel", "Dashboard")` is `"ModelPanel"`;
/// strings not starting with `prefix` are returned unchanged.
pub fn replace_prefix(s: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return s.to_string();
    }
    match s.strip_prefix(prefix) {
        Some(rest) => format!("{MODEL_IDENT}{rest}"),
        None => s.to_string(),
    }
}

/// Syntax tree pass applying [`replace_prefix`] to every identifier.
///
/// Token streams inside macro invocations and attribute arguments are left
/// alone, so `#[serde(rename = "...")]` and `include_str!` survive untouched.
#[derive(Debug)]
pub struct ModelRenamer {
    prefix: String,
    renamed: BTreeSet<String>,
}

impl ModelRenamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            renamed: BTreeSet::new(),
        }
    }

    /// Original text of every identifier that was renamed.
    pub fn into_renamed(self) -> BTreeSet<String> {
        self.renamed
    }
}

impl VisitMut for ModelRenamer {
    fn visit_ident_mut(&mut self, ident: &mut Ident) {
        let text = ident.to_string();
        let replaced = replace_prefix(&text, &self.prefix);
        if replaced != text {
            *ident = Ident::new(&replaced, ident.span());
            self.renamed.insert(text);
        }
        visit_mut::visit_ident_mut(self, ident);
    }
}

/// Rename every identifier in `file` starting with `prefix`.
///
/// Returns the original identifiers that were changed.
pub fn rename_prefix(file: &mut syn::File, prefix: &str) -> BTreeSet<String> {
    let mut renamer = ModelRenamer::new(prefix);
    renamer.visit_file_mut(file);
    renamer.into_renamed()
}

/// Names of the structs, enums and type aliases declared at the top level
/// of `file`, in declaration order and with repeats kept.
pub fn declared_types(file: &syn::File) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Struct(item) => Some(item.ident.to_string()),
            Item::Enum(item) => Some(item.ident.to_string()),
            Item::Type(item) => Some(item.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Every identifier appearing in `file`, including those inside macro and
/// attribute token streams.
pub fn collect_idents(file: &syn::File) -> BTreeSet<String> {
    let mut collector = IdentCollector::default();
    collector.visit_file(file);
    collector.idents
}

#[derive(Default)]
pub(crate) struct IdentCollector {
    pub(crate) idents: BTreeSet<String>,
}

impl IdentCollector {
    pub(crate) fn tokens(&mut self, tokens: &TokenStream) {
        for tree in tokens.clone() {
            match tree {
                TokenTree::Ident(ident) => {
                    self.idents.insert(ident.to_string());
                }
                TokenTree::Group(group) => self.tokens(&group.stream()),
                TokenTree::Punct(_) | TokenTree::Literal(_) => {}
            }
        }
    }
}

impl<'ast> Visit<'ast> for IdentCollector {
    fn visit_ident(&mut self, ident: &'ast Ident) {
        self.idents.insert(ident.to_string());
    }

    fn visit_macro(&mut self, mac: &'ast Macro) {
        self.tokens(&mac.tokens);
        visit::visit_macro(self, mac);
    }

    fn visit_meta_list(&mut self, list: &'ast MetaList) {
        self.tokens(&list.tokens);
        visit::visit_meta_list(self, list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_prefix() {
        assert_eq!(replace_prefix("DashboardPanel", "Dashboard"), "ModelPanel");
        assert_eq!(replace_prefix("Dashboard", "Dashboard"), "Model");
        assert_eq!(replace_prefix("Dash", "Dashboard"), "Dash");
        assert_eq!(replace_prefix("dashboardPanel", "Dashboard"), "dashboardPanel");
        assert_eq!(replace_prefix("GridPos", "Dashboard"), "GridPos");
        assert_eq!(replace_prefix("DashboardDashboard", "Dashboard"), "ModelDashboard");
    }

    #[test]
    fn test_rename_file() {
        let mut file: syn::File = syn::parse_str(
            r#"
            #[derive(Serialize)]
            pub struct Panel {
                #[serde(rename = "gridPos")]
                pub grid_pos: Option<PanelGridPos>,
            }
            pub struct PanelGridPos {}
            pub const NAME: &str = stringify!(Panel);
            fn new_model() -> Panel { Panel { grid_pos: None } }
            "#,
        )
        .unwrap();

        let renamed = rename_prefix(&mut file, "Panel");
        assert_eq!(
            renamed.into_iter().collect::<Vec<_>>(),
            ["Panel", "PanelGridPos"]
        );

        let idents = collect_idents(&file);
        assert!(idents.contains("Model"));
        assert!(idents.contains("ModelGridPos"));
        assert!(idents.contains("Serialize"));
        assert!(!idents.contains("PanelGridPos"));
        // Macro token streams are not rewritten.
        assert!(idents.contains("Panel"));
        assert_eq!(declared_types(&file), ["Model", "ModelGridPos"]);
    }

    #[test]
    fn test_declared_types_keep_repeats() {
        let file: syn::File = syn::parse_str(
            "pub struct Model {}\npub type Id = u32;\nfn helper() {}\npub enum Model { A }\n",
        )
        .unwrap();
        assert_eq!(declared_types(&file), ["Model", "Id", "Model"]);
    }
}
