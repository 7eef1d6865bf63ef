//! Configuration management for Quire.
//!
//! Parses `quire.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `layout.style_dir`
//! - `layout.style`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Enable the outline with this header range.
    pub toc: Option<TocRange>,
    /// Override outline class.
    pub toc_class: Option<String>,
    /// Override style name.
    pub style: Option<String>,
    /// Override style directory.
    pub style_dir: Option<PathBuf>,
    /// Override XHTML output.
    pub xhtml: Option<bool>,
    /// Override safe-link filtering.
    pub safelink: Option<bool>,
    /// Override raw HTML escaping.
    pub escape: Option<bool>,
    /// Override hard line wrapping.
    pub hard_wrap: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Default outline range begin level.
const DEFAULT_TOC_BEGIN: u8 = 2;

/// Deepest header level.
const MAX_LEVEL: u8 = 6;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML output options.
    pub render: RenderConfig,
    /// List class overrides.
    pub classes: ClassConfig,
    /// Outline configuration.
    pub toc: TocConfig,
    /// Markdown extension configuration.
    pub markdown: MarkdownConfig,
    /// Layout configuration (paths are relative strings from TOML).
    #[serde(default)]
    layout: LayoutConfigRaw,

    /// Resolved layout configuration (set after loading).
    #[serde(skip)]
    pub layout_resolved: LayoutConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// HTML output options.
///
/// Each field maps to one render flag.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderConfig {
    /// Self-close void elements.
    pub xhtml: bool,
    /// Drop all raw HTML.
    pub skip_html: bool,
    /// Drop raw `<style>` tags.
    pub skip_style: bool,
    /// Drop links and raw `<a>` tags.
    pub skip_links: bool,
    /// Drop images and raw `<img>` tags.
    pub skip_images: bool,
    /// Entity-escape all raw HTML.
    pub escape: bool,
    /// Only render links with safe URLs.
    pub safelink: bool,
    /// Turn paragraph line breaks into `<br>`.
    pub hard_wrap: bool,
    /// Join paragraph lines with a space.
    pub skip_linebreak: bool,
    /// Render task list checkboxes.
    pub task_lists: bool,
}

/// Optional list `class` values.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Class for `<ul>`.
    pub ul: Option<String>,
    /// Class for `<ol>`.
    pub ol: Option<String>,
    /// Class for lists with task items.
    pub task: Option<String>,
}

/// Outline header range, parsed from `"B"` or `"B:E"`.
///
/// Parsing never fails: a missing, zero or non-numeric component keeps its
/// default (begin 2, end unbounded).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct TocRange {
    /// Shallowest header level included.
    pub begin: u8,
    /// Deepest header level included, if bounded.
    pub end: Option<u8>,
}

impl TocRange {
    /// Parse a range specification.
    #[must_use]
    pub fn parse(range: &str) -> Self {
        let (begin, end) = match range.split_once(':') {
            Some((begin, end)) => (begin, Some(end)),
            None => (range, None),
        };

        Self {
            begin: parse_level(begin).unwrap_or(DEFAULT_TOC_BEGIN),
            end: end.and_then(parse_level),
        }
    }
}

impl Default for TocRange {
    fn default() -> Self {
        Self {
            begin: DEFAULT_TOC_BEGIN,
            end: None,
        }
    }
}

impl From<String> for TocRange {
    fn from(range: String) -> Self {
        Self::parse(&range)
    }
}

/// Parse a positive level; zero and garbage yield `None`.
fn parse_level(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok().filter(|&level| level > 0)
}

/// Outline configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Whether `render` prepends an outline.
    pub enabled: bool,
    /// Header range.
    pub range: TocRange,
    /// Class of the outermost outline list. Empty means none.
    pub class: String,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            range: TocRange::default(),
            class: "toc".to_owned(),
        }
    }
}

impl TocConfig {
    /// Outline class, or `None` if configured empty.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        Some(self.class.as_str()).filter(|class| !class.is_empty())
    }
}

/// Markdown extension configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Tables, strikethrough, task lists and superscript.
    pub gfm: bool,
    /// `{#id .class}` heading attributes.
    pub heading_attributes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            heading_attributes: true,
        }
    }
}

/// Raw layout configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LayoutConfigRaw {
    style_dir: Option<String>,
    style: Option<String>,
    extension: Option<String>,
}

/// Resolved layout configuration with absolute paths.
#[derive(Debug, Default)]
pub struct LayoutConfig {
    /// Directory holding style templates.
    pub style_dir: PathBuf,
    /// Style name (template file stem).
    pub style: String,
    /// Template file extension, including the dot.
    pub extension: String,
}

impl LayoutConfig {
    /// Template path for a style name.
    #[must_use]
    pub fn template_path(&self, style: &str) -> PathBuf {
        self.style_dir.join(format!("{style}{}", self.extension))
    }
}

/// Default style name.
pub const DEFAULT_STYLE: &str = "default";

/// Default template extension.
const DEFAULT_EXTENSION: &str = ".html";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`layout.style_dir`").
        field: String,
        /// Error message (e.g., "${`STYLE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a header level field to be within 1-6.
fn require_level(level: u8, field: &str) -> Result<(), ConfigError> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between 1 and {MAX_LEVEL}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(range) = settings.toc {
            self.toc.enabled = true;
            self.toc.range = range;
        }
        if let Some(class) = &settings.toc_class {
            self.toc.class.clone_from(class);
        }
        if let Some(style) = &settings.style {
            self.layout_resolved.style.clone_from(style);
        }
        if let Some(style_dir) = &settings.style_dir {
            self.layout_resolved.style_dir.clone_from(style_dir);
        }
        if let Some(xhtml) = settings.xhtml {
            self.render.xhtml = xhtml;
        }
        if let Some(safelink) = settings.safelink {
            self.render.safelink = safelink;
        }
        if let Some(escape) = settings.escape {
            self.render.escape = escape;
        }
        if let Some(hard_wrap) = settings.hard_wrap {
            self.render.hard_wrap = hard_wrap;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            render: RenderConfig::default(),
            classes: ClassConfig::default(),
            toc: TocConfig::default(),
            markdown: MarkdownConfig::default(),
            layout: LayoutConfigRaw::default(),
            layout_resolved: LayoutConfig {
                style_dir: base.join("styles"),
                style: DEFAULT_STYLE.to_owned(),
                extension: DEFAULT_EXTENSION.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_toc()?;
        self.validate_layout()?;
        Ok(())
    }

    /// Validate outline configuration.
    fn validate_toc(&self) -> Result<(), ConfigError> {
        let range = self.toc.range;
        require_level(range.begin, "toc.range begin")?;
        if let Some(end) = range.end {
            require_level(end, "toc.range end")?;
        }
        Ok(())
    }

    /// Validate layout configuration.
    fn validate_layout(&self) -> Result<(), ConfigError> {
        let layout = &self.layout_resolved;
        require_non_empty(&layout.style, "layout.style")?;
        if layout.style.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "layout.style must be a name, not a path".to_owned(),
            ));
        }
        if !layout.extension.is_empty() && !layout.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "layout.extension must start with '.'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.layout.style_dir {
            self.layout.style_dir = Some(expand::expand_env(dir, "layout.style_dir")?);
        }
        if let Some(ref style) = self.layout.style {
            self.layout.style = Some(expand::expand_env(style, "layout.style")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = &self.layout;
        self.layout_resolved = LayoutConfig {
            style_dir: config_dir.join(raw.style_dir.as_deref().unwrap_or("styles")),
            style: raw.style.clone().unwrap_or_else(|| DEFAULT_STYLE.to_owned()),
            extension: raw
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
        };
    }
}
