//! Data models for catalog entries (blocks, components, dashboards)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The kind of showcased unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Block,
    Component,
    Dashboard,
}

impl ItemKind {
    pub fn all() -> [ItemKind; 3] {
        [ItemKind::Block, ItemKind::Component, ItemKind::Dashboard]
    }

    /// Tab title for this kind
    pub fn plural(&self) -> &'static str {
        match self {
            ItemKind::Block => "Blocks",
            ItemKind::Component => "Components",
            ItemKind::Dashboard => "Dashboards",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Block => "block",
            ItemKind::Component => "component",
            ItemKind::Dashboard => "dashboard",
        }
    }
}

/// Where a file's code text comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeSource {
    /// Path to a file, relative to the catalog directory until resolved
    Path { path: PathBuf },
    /// Code embedded in the catalog itself
    Inline { code: String },
}

/// One source file attached to a catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub name: String,
    #[serde(flatten)]
    pub source: CodeSource,
}

impl CatalogFile {
    pub fn inline(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            source: CodeSource::Inline {
                code: code.to_string(),
            },
        }
    }

    #[cfg(test)]
    pub fn at_path(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            source: CodeSource::Path { path: path.into() },
        }
    }
}

/// A single metric shown by a dashboard preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub trend: Vec<u64>,
}

/// Declarative description of an item's live preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewSpec {
    /// Static text art read from a file
    Text { path: PathBuf },
    /// Static text art embedded in the catalog
    Inline { text: String },
    /// Progress gauge that fills up to `percent` after mounting
    Gauge { label: String, percent: u16 },
    /// Scrolling sparkline over the given samples
    Sparkline { title: String, data: Vec<u64> },
    /// Simple data table
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Grid of metric cards with trend lines
    Dashboard { title: String, metrics: Vec<Metric> },
}

impl Default for PreviewSpec {
    fn default() -> Self {
        PreviewSpec::Inline {
            text: String::new(),
        }
    }
}

/// One showcased unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Scaffolding command, e.g. `npx shadcn@latest add button`
    #[serde(default)]
    pub install: Option<String>,
    #[serde(default)]
    pub files: Vec<CatalogFile>,
    #[serde(default)]
    pub preview: PreviewSpec,
}

impl CatalogItem {
    /// Get an icon for the item kind
    pub fn icon(&self) -> &str {
        match self.kind {
            ItemKind::Block => "▦",
            ItemKind::Component => "◆",
            ItemKind::Dashboard => "▤",
        }
    }

    /// Category used for grouping in the browser
    pub fn group_category(&self) -> &str {
        if self.category.is_empty() {
            "general"
        } else {
            &self.category
        }
    }

    /// Names of the attached files in list order
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// Scaffolding command for this item, derived from the slug if not given
    pub fn scaffold_command(&self) -> String {
        self.install
            .clone()
            .unwrap_or_else(|| format!("npx shadcn@latest add {}", self.slug))
    }

    /// Dependency install command, if the item has any dependencies
    pub fn dependency_command(&self) -> Option<String> {
        if self.dependencies.is_empty() {
            None
        } else {
            Some(format!("npm install {}", self.dependencies.join(" ")))
        }
    }

    /// Rewrite relative file and preview paths to live under `root`
    pub fn resolve_paths(&mut self, root: &Path) {
        for file in &mut self.files {
            if let CodeSource::Path { path } = &mut file.source {
                if path.is_relative() {
                    *path = root.join(&*path);
                }
            }
        }
        if let PreviewSpec::Text { path } = &mut self.preview {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
}

/// The catalog file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub name: Option<String>,
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn find(&self, slug: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str) -> CatalogItem {
        CatalogItem {
            slug: slug.to_string(),
            name: slug.to_string(),
            description: String::new(),
            kind: ItemKind::Component,
            category: String::new(),
            dependencies: vec![],
            install: None,
            files: vec![],
            preview: PreviewSpec::default(),
        }
    }

    #[test]
    fn test_scaffold_command_defaults_to_slug() {
        assert_eq!(item("button").scaffold_command(), "npx shadcn@latest add button");
    }

    #[test]
    fn test_dependency_command() {
        let mut i = item("calendar");
        assert_eq!(i.dependency_command(), None);
        i.dependencies = vec!["date-fns".to_string(), "react-day-picker".to_string()];
        assert_eq!(
            i.dependency_command().as_deref(),
            Some("npm install date-fns react-day-picker")
        );
    }

    #[test]
    fn test_resolve_paths_only_touches_relative_paths() {
        let mut i = item("card");
        i.files = vec![
            CatalogFile::at_path("card.tsx", "card/card.tsx"),
            CatalogFile::at_path("abs.tsx", "/abs/abs.tsx"),
            CatalogFile::inline("demo.tsx", "export {}"),
        ];
        i.preview = PreviewSpec::Text {
            path: PathBuf::from("card/preview.txt"),
        };
        i.resolve_paths(Path::new("/catalog"));

        assert_eq!(
            i.files[0].source,
            CodeSource::Path {
                path: PathBuf::from("/catalog/card/card.tsx")
            }
        );
        assert_eq!(
            i.files[1].source,
            CodeSource::Path {
                path: PathBuf::from("/abs/abs.tsx")
            }
        );
        assert_eq!(i.files[2].source, CodeSource::Inline { code: "export {}".to_string() });
        assert_eq!(
            i.preview,
            PreviewSpec::Text {
                path: PathBuf::from("/catalog/card/preview.txt")
            }
        );
    }

    #[test]
    fn test_file_deserializes_path_or_inline() {
        let path: CatalogFile = serde_json::from_str(r#"{"name":"a.tsx","path":"a.tsx"}"#).unwrap();
        let inline: CatalogFile =
            serde_json::from_str(r#"{"name":"b.tsx","code":"export {}"}"#).unwrap();
        assert!(matches!(path.source, CodeSource::Path { .. }));
        assert!(matches!(inline.source, CodeSource::Inline { .. }));
    }
}
