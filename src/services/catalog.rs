//! Catalog loading and ordering services

use crate::model::catalog::{Catalog, CatalogFile, CatalogItem, ItemKind, Metric, PreviewSpec};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("catalog item '{name}' has an empty slug")]
    EmptySlug { name: String },
    #[error("duplicate slug '{0}' in catalog")]
    DuplicateSlug(String),
}

/// Load a catalog from a JSON or YAML file
///
/// Relative file and preview paths are resolved against the catalog's
/// directory. Items come back in browsing order.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let mut catalog: Catalog = if is_yaml {
        serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    };

    validate(&catalog)?;

    let root = path.parent().unwrap_or_else(|| Path::new("."));
    for item in &mut catalog.items {
        item.resolve_paths(root);
    }
    sort_items(&mut catalog.items);

    tracing::info!("Loaded {} catalog items from {}", catalog.items.len(), path.display());
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in &catalog.items {
        if item.slug.trim().is_empty() {
            return Err(CatalogError::EmptySlug {
                name: item.name.clone(),
            });
        }
        if !seen.insert(item.slug.as_str()) {
            return Err(CatalogError::DuplicateSlug(item.slug.clone()));
        }
    }
    Ok(())
}

/// Sort by kind, then by category, then by name
pub fn sort_items(items: &mut [CatalogItem]) {
    items.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.group_category().cmp(b.group_category()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn item(slug: &str, name: &str, kind: ItemKind, category: &str, description: &str) -> CatalogItem {
    CatalogItem {
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind,
        category: category.to_string(),
        dependencies: vec![],
        install: None,
        files: vec![],
        preview: PreviewSpec::default(),
    }
}

fn metric(label: &str, value: &str, trend: &[u64]) -> Metric {
    Metric {
        label: label.to_string(),
        value: value.to_string(),
        trend: trend.to_vec(),
    }
}

const BUTTON_TSX: &str = r#"import * as React from "react"
import { Slot } from "@radix-ui/react-slot"
import { cn } from "@/lib/utils"

export interface ButtonProps
  extends React.ButtonHTMLAttributes<HTMLButtonElement> {
  asChild?: boolean
}

// Renders a native button unless asChild is set
export const Button = React.forwardRef<HTMLButtonElement, ButtonProps>(
  ({ className, asChild = false, ...props }, ref) => {
    const Comp = asChild ? Slot : "button"
    return <Comp className={cn("btn", className)} ref={ref} {...props} />
  }
)
Button.displayName = "Button"
"#;

const BUTTON_DEMO_TSX: &str = r#"import { Mail } from "lucide-react"
import { Button } from "@/components/ui/button"

export default function ButtonDemo() {
  return (
    <Button>
      <Mail className="mr-2 h-4 w-4" /> Login with Email
    </Button>
  )
}
"#;

const PROGRESS_TSX: &str = r#"import * as React from "react"
import * as ProgressPrimitive from "@radix-ui/react-progress"

export function Progress({ value = 0 }: { value?: number }) {
  return (
    <ProgressPrimitive.Root className="progress">
      <ProgressPrimitive.Indicator
        style={{ transform: `translateX(-${100 - value}%)` }}
      />
    </ProgressPrimitive.Root>
  )
}
"#;

const LOGIN_FORM_TSX: &str = r#"import { Button } from "@/components/ui/button"
import { Input } from "@/components/ui/input"

export function LoginForm() {
  return (
    <form className="grid gap-4">
      <Input id="email" type="email" placeholder="m@example.com" required />
      <Input id="password" type="password" required />
      <Button type="submit">Login</Button>
    </form>
  )
}
"#;

const LOGIN_PAGE_TSX: &str = r#"import { LoginForm } from "./login-form"

export default function Page() {
  return (
    <div className="flex min-h-svh items-center justify-center">
      <LoginForm />
    </div>
  )
}
"#;

const LOGIN_PREVIEW: &str = r#"
        ┌──────────────────────────────┐
        │            Login             │
        │                              │
        │  Email                       │
        │  ┌────────────────────────┐  │
        │  │ m@example.com          │  │
        │  └────────────────────────┘  │
        │  Password                    │
        │  ┌────────────────────────┐  │
        │  │ ••••••••               │  │
        │  └────────────────────────┘  │
        │  ┌────────────────────────┐  │
        │  │         Login          │  │
        │  └────────────────────────┘  │
        └──────────────────────────────┘
"#;

const DASHBOARD_PAGE_TSX: &str = r#"import { MetricCard } from "./metric-card"
import { data } from "./data"

export default function Dashboard() {
  return (
    <main className="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
      {data.metrics.map((m) => (
        <MetricCard key={m.label} {...m} />
      ))}
    </main>
  )
}
"#;

const METRIC_CARD_TSX: &str = r#"import { Area, AreaChart } from "recharts"

export function MetricCard({ label, value, trend }: Metric) {
  return (
    <div className="card">
      <p className="label">{label}</p>
      <p className="value">{value}</p>
      <AreaChart data={trend.map((v) => ({ v }))} width={160} height={40}>
        <Area dataKey="v" />
      </AreaChart>
    </div>
  )
}
"#;

const DASHBOARD_DATA_TS: &str = r#"export const data = {
  metrics: [
    { label: "Revenue", value: "$45,231", trend: [4, 6, 5, 8, 9, 12] },
    { label: "Subscriptions", value: "+2,350", trend: [2, 3, 3, 5, 4, 6] },
    { label: "Active now", value: "573", trend: [7, 5, 6, 4, 6, 8] },
  ],
}
"#;

/// Demo catalog used when no catalog file is configured
pub fn builtin_catalog() -> Catalog {
    let mut button = item(
        "button",
        "Button",
        ItemKind::Component,
        "inputs",
        "Displays a button or a component that looks like a button.",
    );
    button.dependencies = vec!["@radix-ui/react-slot".to_string(), "lucide-react".to_string()];
    button.files = vec![
        CatalogFile::inline("button-demo.tsx", BUTTON_DEMO_TSX),
        CatalogFile::inline("button.tsx", BUTTON_TSX),
    ];
    button.preview = PreviewSpec::Inline {
        text: "\n   ╭──────────────────────────╮\n   │  ✉  Login with Email     │\n   ╰──────────────────────────╯\n"
            .to_string(),
    };

    let mut progress = item(
        "progress",
        "Progress",
        ItemKind::Component,
        "feedback",
        "Displays an indicator showing the completion progress of a task.",
    );
    progress.dependencies = vec!["@radix-ui/react-progress".to_string()];
    progress.files = vec![CatalogFile::inline("progress.tsx", PROGRESS_TSX)];
    progress.preview = PreviewSpec::Gauge {
        label: "Uploading".to_string(),
        percent: 66,
    };

    let mut table = item(
        "table",
        "Table",
        ItemKind::Component,
        "data display",
        "A responsive table component.",
    );
    table.files = vec![CatalogFile::inline(
        "table-demo.tsx",
        "export default function TableDemo() {\n  return <Table>{/* rows */}</Table>\n}\n",
    )];
    table.preview = PreviewSpec::Table {
        headers: vec!["Invoice".to_string(), "Status".to_string(), "Amount".to_string()],
        rows: vec![
            vec!["INV001".to_string(), "Paid".to_string(), "$250.00".to_string()],
            vec!["INV002".to_string(), "Pending".to_string(), "$150.00".to_string()],
            vec!["INV003".to_string(), "Unpaid".to_string(), "$350.00".to_string()],
        ],
    };

    let mut chart = item(
        "chart-area",
        "Area Chart",
        ItemKind::Component,
        "charts",
        "An area chart with a scrolling series.",
    );
    chart.dependencies = vec!["recharts".to_string()];
    chart.files = vec![CatalogFile::inline("chart-area.tsx", METRIC_CARD_TSX)];
    chart.preview = PreviewSpec::Sparkline {
        title: "Visitors".to_string(),
        data: vec![3, 5, 9, 4, 7, 12, 8, 6, 10, 14, 9, 11, 7, 5, 8, 13],
    };

    let mut login = item(
        "login-01",
        "Login Form",
        ItemKind::Block,
        "authentication",
        "A simple login form.",
    );
    login.files = vec![
        CatalogFile::inline("page.tsx", LOGIN_PAGE_TSX),
        CatalogFile::inline("login-form.tsx", LOGIN_FORM_TSX),
    ];
    login.preview = PreviewSpec::Inline {
        text: LOGIN_PREVIEW.to_string(),
    };

    let mut dashboard = item(
        "dashboard-01",
        "Sales Overview",
        ItemKind::Dashboard,
        "analytics",
        "A dashboard with metric cards and trend lines.",
    );
    dashboard.dependencies = vec!["recharts".to_string()];
    dashboard.files = vec![
        CatalogFile::inline("page.tsx", DASHBOARD_PAGE_TSX),
        CatalogFile::inline("metric-card.tsx", METRIC_CARD_TSX),
        CatalogFile::inline("data.ts", DASHBOARD_DATA_TS),
    ];
    dashboard.preview = PreviewSpec::Dashboard {
        title: "Sales Overview".to_string(),
        metrics: vec![
            metric("Revenue", "$45,231", &[4, 6, 5, 8, 9, 12, 10, 13]),
            metric("Subscriptions", "+2,350", &[2, 3, 3, 5, 4, 6, 7, 6]),
            metric("Sales", "+12,234", &[5, 4, 6, 7, 9, 8, 11, 12]),
            metric("Active now", "573", &[7, 5, 6, 4, 6, 8, 7, 9]),
        ],
    };

    let mut items = vec![button, progress, table, chart, login, dashboard];
    sort_items(&mut items);

    Catalog {
        name: Some("Built-in catalog".to_string()),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::CodeSource;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_catalog_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{
                "name": "Test",
                "items": [
                    {
                        "slug": "card",
                        "name": "Card",
                        "kind": "component",
                        "files": [{"name": "card.tsx", "path": "src/card.tsx"}],
                        "preview": {"type": "text", "path": "previews/card.txt"}
                    }
                ]
            }"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        let card = catalog.find("card").unwrap();
        assert_eq!(
            card.files[0].source,
            CodeSource::Path {
                path: dir.path().join("src/card.tsx")
            }
        );
        assert_eq!(
            card.preview,
            PreviewSpec::Text {
                path: dir.path().join("previews/card.txt")
            }
        );
    }

    #[test]
    fn test_load_yaml_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        fs::write(
            &path,
            r#"
items:
  - slug: stats
    name: Stats
    kind: dashboard
    category: analytics
    dependencies: [recharts]
    files:
      - name: page.tsx
        code: "export default function Page() {}"
    preview:
      type: gauge
      label: Load
      percent: 40
  - slug: accordion
    name: Accordion
    kind: component
"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.items.len(), 2);
        // Components sort before dashboards
        assert_eq!(catalog.items[0].slug, "accordion");
        assert_eq!(catalog.items[1].kind, ItemKind::Dashboard);
        assert_eq!(catalog.items[1].dependencies, vec!["recharts".to_string()]);
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"items": [
                {"slug": "a", "name": "A", "kind": "block"},
                {"slug": "a", "name": "B", "kind": "block"}
            ]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_catalog(&path),
            Err(CatalogError::DuplicateSlug(slug)) if slug == "a"
        ));
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{"items": [{"slug": " ", "name": "A", "kind": "block"}]}"#).unwrap();
        assert!(matches!(load_catalog(&path), Err(CatalogError::EmptySlug { .. })));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_catalog(dir.path().join("nope.json")),
            Err(CatalogError::Read { .. })
        ));
    }

    #[test]
    fn test_sort_items() {
        let mut items = vec![
            item("z", "Zeta", ItemKind::Dashboard, "", ""),
            item("b", "Beta", ItemKind::Component, "inputs", ""),
            item("a", "Alpha", ItemKind::Component, "inputs", ""),
            item("c", "Gamma", ItemKind::Block, "auth", ""),
        ];
        sort_items(&mut items);
        let slugs: Vec<&str> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b", "z"]);
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin_catalog();
        assert!(validate(&catalog).is_ok());
        for kind in ItemKind::all() {
            assert!(catalog.items.iter().any(|i| i.kind == kind));
        }
    }

    #[test]
    fn test_demo_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/catalog.yaml");
        let catalog = load_catalog(&path).unwrap();

        assert_eq!(catalog.name.as_deref(), Some("Demo catalog"));
        assert_eq!(catalog.items.len(), 4);

        let badge = catalog.find("badge").unwrap();
        for file in &badge.files {
            match &file.source {
                CodeSource::Path { path } => assert!(path.exists(), "{}", path.display()),
                CodeSource::Inline { .. } => panic!("expected a path"),
            }
        }
    }
}
