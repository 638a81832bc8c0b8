//! Layering rules for the module graph.
//!
//! Production code under `src/` is scanned for `use` declarations. Test
//! modules are skipped since they may reach into `testkit`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

struct Source {
    /// Path relative to `src/`, with `/` separators.
    path: String,
    text: String,
}

impl Source {
    /// Top-level module the file belongs to, such as `domain` or `error`.
    fn layer(&self) -> &str {
        let first = self.path.split('/').next().unwrap_or_default();
        first.trim_end_matches(".rs")
    }

    /// Code above the first `#[cfg(test)]` item.
    fn production(&self) -> &str {
        self.text
            .find("#[cfg(test)]\nmod tests")
            .map_or(self.text.as_str(), |end| &self.text[..end])
    }

    /// Child modules declared with `mod` or `pub mod`.
    fn child_modules(&self) -> BTreeSet<&str> {
        self.production()
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                let line = line.strip_prefix("pub ").unwrap_or(line);
                line.strip_prefix("mod ")?.strip_suffix(';')
            })
            .collect()
    }

    /// Every `use` declaration, joined onto one line, with its line number.
    fn uses(&self) -> Vec<(usize, String)> {
        let mut found = Vec::new();
        let mut pending: Option<(usize, String)> = None;

        for (idx, line) in self.production().lines().enumerate() {
            let line = line.trim();
            if let Some((start, mut decl)) = pending.take() {
                decl.push(' ');
                decl.push_str(line);
                if line.ends_with(';') {
                    found.push((start, decl));
                } else {
                    pending = Some((start, decl));
                }
                continue;
            }

            let decl = line.strip_prefix("pub ").unwrap_or(line);
            if let Some(rest) = decl.strip_prefix("use ") {
                if rest.ends_with(';') {
                    found.push((idx + 1, rest.to_owned()));
                } else {
                    pending = Some((idx + 1, rest.to_owned()));
                }
            }
        }
        found
    }
}

fn load(dir: &Path, root: &Path, out: &mut Vec<Source>) {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("read {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            load(&path, root, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(Source {
                path: path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/"),
                text: fs::read_to_string(&path).unwrap(),
            });
        }
    }
}

fn sources() -> Vec<Source> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut out = Vec::new();
    load(&root, &root, &mut out);
    assert!(!out.is_empty(), "no sources under {}", root.display());
    out
}

/// First path segment of a `use` declaration: `crate`, `super`, `std` or a
/// dependency name.
fn root_of(decl: &str) -> &str {
    decl.split("::").next().unwrap_or_default().trim()
}

/// Crate layers named anywhere in a `use` declaration (`crate::domain`, ...).
fn crate_layers(decl: &str) -> BTreeSet<String> {
    decl.match_indices("crate::")
        .map(|(at, prefix)| {
            decl[at + prefix.len()..]
                .split(|c: char| !c.is_alphanumeric() && c != '_')
                .next()
                .unwrap_or_default()
                .to_owned()
        })
        .collect()
}

/// `use` declarations in `layer` that reach a crate layer or dependency not
/// on the allow lists.
fn violations(layer: &str, crate_layers_allowed: &[&str], deps_allowed: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for source in sources().iter().filter(|s| s.layer() == layer) {
        let children = source.child_modules();
        for (line, decl) in source.uses() {
            let root = root_of(&decl);
            let dep_ok = matches!(root, "crate" | "super" | "self" | "std")
                || children.contains(root)
                || deps_allowed.contains(&root);
            let layers_ok = crate_layers(&decl)
                .iter()
                .all(|l| crate_layers_allowed.contains(&l.as_str()));
            if !dep_ok || !layers_ok {
                out.push(format!("src/{}:{line}: use {decl}", source.path));
            }
        }
    }
    out
}

#[test]
fn domain_is_pure() {
    let hits = violations(
        "domain",
        &["domain", "error"],
        &["alloy_primitives", "rust_decimal", "serde"],
    );
    assert!(
        hits.is_empty(),
        "domain reaches outside itself:\n{}",
        hits.join("\n")
    );

    let async_fns: Vec<_> = sources()
        .iter()
        .filter(|s| s.layer() == "domain" && s.production().contains("async fn"))
        .map(|s| s.path.clone())
        .collect();
    assert!(async_fns.is_empty(), "domain must stay synchronous: {async_fns:?}");
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = violations("port", &["domain", "error"], &["async_trait", "chrono"]);
    assert!(hits.is_empty(), "ports reach past the domain:\n{}", hits.join("\n"));
}

#[test]
fn services_use_ports_not_adapters() {
    let hits = violations(
        "service",
        &["domain", "error", "port"],
        &["futures_util", "rust_decimal", "tracing"],
    );
    assert!(
        hits.is_empty(),
        "services reach into outer layers:\n{}",
        hits.join("\n")
    );
}

#[test]
fn only_the_cli_wires_adapters() {
    let wiring: BTreeSet<String> = sources()
        .iter()
        .filter(|s| !matches!(s.layer(), "adapter" | "cli" | "testkit"))
        .flat_map(|s| {
            s.uses()
                .into_iter()
                .filter(|(_, decl)| crate_layers(decl).contains("adapter"))
                .map(|(line, _)| format!("src/{}:{line}", s.path))
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(wiring.is_empty(), "adapters imported outside the cli: {wiring:?}");
}

#[test]
fn mod_files_only_declare_and_export() {
    let mut hits = Vec::new();
    for source in sources().iter().filter(|s| s.path.ends_with("mod.rs")) {
        let mut in_use = false;
        for (idx, raw) in source.text.lines().enumerate() {
            let line = raw.trim();
            let allowed = in_use
                || line.is_empty()
                || line.starts_with("//")
                || line.starts_with("#[cfg")
                || line.starts_with("mod ")
                || line.starts_with("pub mod ")
                || line.starts_with("pub use ");
            if !allowed {
                hits.push(format!("src/{}:{}: {raw}", source.path, idx + 1));
            }
            if line.starts_with("pub use ") || in_use {
                in_use = !line.ends_with(';');
            }
        }
    }
    assert!(
        hits.is_empty(),
        "mod.rs files should only declare and re-export:\n{}",
        hits.join("\n")
    );
}

#[test]
fn use_scanner_joins_multi_line_declarations() {
    let source = Source {
        path: "service/x.rs".into(),
        text: concat!(
            "use crate::domain::{\n    A,\n    B,\n};\n",
            "use tracing::debug;\n\n",
            "#[cfg(test)]\nmod tests {\n    use crate::adapter::Snapshot;\n}\n",
        )
        .into(),
    };
    let uses = source.uses();
    assert_eq!(uses.len(), 2);
    assert_eq!(uses[0].0, 1);
    assert_eq!(crate_layers(&uses[0].1), BTreeSet::from(["domain".to_owned()]));
    assert_eq!(root_of(&uses[1].1), "tracing");
    assert_eq!(source.layer(), "service");
}
