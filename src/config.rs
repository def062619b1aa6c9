use crate::scanner::ResolverKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_RESOLVERS_DIR: &str = "../hrea/modules/vf-graphql-holochain";
pub const DEFAULT_SCHEMA_DIR: &str = "../vf-graphql/lib/schemas";
pub const DEFAULT_OUTPUT_DIR: &str = "../graphql-developer-docs/reference/graphql-api-reference";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VfdocsConfig {
    /// Root of the resolver implementation package
    pub resolvers: Option<String>,
    /// Query resolver directory, relative to `resolvers`
    pub queries: Option<String>,
    /// Mutation resolver directory, relative to `resolvers`
    pub mutations: Option<String>,
    /// Directory of schema SDL files
    pub schema: Option<String>,
    /// Extra SDL files applied after the schema directory
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Reference docs output directory
    pub output: Option<String>,
}

/// Fully resolved paths for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub queries: PathBuf,
    pub mutations: PathBuf,
    pub schema: PathBuf,
    pub extensions: Vec<PathBuf>,
    pub output: PathBuf,
}

impl Paths {
    pub fn resolver_dir(&self, kind: ResolverKind) -> &Path {
        match kind {
            ResolverKind::Query => &self.queries,
            ResolverKind::Mutation => &self.mutations,
        }
    }
}

impl VfdocsConfig {
    /// A config spelling out every default
    pub fn defaults() -> Self {
        Self {
            resolvers: Some(DEFAULT_RESOLVERS_DIR.to_string()),
            queries: Some(ResolverKind::Query.default_dir().to_string()),
            mutations: Some(ResolverKind::Mutation.default_dir().to_string()),
            schema: Some(DEFAULT_SCHEMA_DIR.to_string()),
            extensions: Vec::new(),
            output: Some(DEFAULT_OUTPUT_DIR.to_string()),
        }
    }

    /// Resolve configured paths against `base`, falling back to defaults
    pub fn resolve(&self, base: &Path) -> Paths {
        let resolvers = base.join(self.resolvers.as_deref().unwrap_or(DEFAULT_RESOLVERS_DIR));
        let resolver_dir = |configured: &Option<String>, kind: ResolverKind| {
            resolvers.join(configured.as_deref().unwrap_or(kind.default_dir()))
        };

        Paths {
            queries: resolver_dir(&self.queries, ResolverKind::Query),
            mutations: resolver_dir(&self.mutations, ResolverKind::Mutation),
            schema: base.join(self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA_DIR)),
            extensions: self.extensions.iter().map(|e| base.join(e)).collect(),
            output: base.join(self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("vfdocs.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<VfdocsConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: VfdocsConfig = toml::from_str(&contents)
        .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &VfdocsConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Directory that relative config paths are resolved against
pub fn config_base(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
