use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a `recast` crate as seen from the
/// Cargo.toml of the crate invoking a derive.
///
/// # Example
///
/// ```rust
/// # use recast_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("recast_reflect"));
/// ```
///
/// The result should be computed once per macro invocation and passed around.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `recast_` and the caller depends
///    on the facade crate `recast`, return `::recast::short_name`
///    (e.g. `recast_reflect` -> `::recast::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A crate that derives on its own types needs `extern crate self as name;`
/// in its root so that `::name` resolves inside the crate as well.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "recast";
const MEMBER_PREFIX: &str = "recast_";

impl Manifest {
    /// The caller's `Cargo.toml` and its modification time.
    #[inline(never)]
    fn locate() -> (PathBuf, SystemTime) {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("`CARGO_MANIFEST_DIR` is not set, macros must be expanded by cargo");
        };
        let path = Path::new(&dir).join("Cargo.toml");
        match std::fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(modified) => (path, modified),
            Err(err) => panic!("cannot stat cargo manifest {}: {err}", path.display()),
        }
    }

    #[inline(never)]
    fn load(path: &Path, modified_time: SystemTime) -> Self {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source.into_boxed_str(),
            Err(err) => panic!("cannot read cargo manifest {}: {err}", path.display()),
        };
        match Document::parse(source) {
            Ok(manifest) => Self { manifest, modified_time },
            Err(err) => panic!("cannot parse cargo manifest {}: {err}", path.display()),
        }
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
            path.segments.push(Self::parse_str(module));
            return Some(path);
        }
        None
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Parsed manifests are cached per path and invalidated when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let (path, modified_time) = Self::locate();
        {
            let cache = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&path)
                && cached.modified_time == modified_time
            {
                return func(cached);
            }
        }

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);
        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::{Document, Item, Table};

    use super::Manifest;

    fn path_string(path: &syn::Path) -> String {
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    fn deps(src: &str) -> Table {
        let doc = Document::parse(src.to_owned()).unwrap();
        match doc.get("dependencies") {
            Some(Item::Table(table)) => table.clone(),
            _ => panic!("no dependencies table"),
        }
    }

    #[test]
    fn direct_dependency_wins() {
        let table = deps("[dependencies]\nrecast_reflect = \"0.0.1\"\nrecast = \"0.0.1\"\n");
        let path = Manifest::find_in_deps(&table, "recast_reflect").unwrap();
        assert_eq!(path_string(&path), "recast_reflect");
    }

    #[test]
    fn facade_dependency_is_used_for_members() {
        let table = deps("[dependencies]\nrecast = \"0.0.1\"\n");
        let path = Manifest::find_in_deps(&table, "recast_reflect").unwrap();
        assert_eq!(path_string(&path), "recast::reflect");
        assert!(Manifest::find_in_deps(&table, "serde").is_none());
    }
}
