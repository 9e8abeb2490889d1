use serde::Deserialize;
use std::path::{Path, PathBuf};
use transform2pdf_core::{Orientation, PageSize, RenderOptions};

/// Prefix of environment overrides, e.g. `TRANSFORM2PDF__PORT=9000` or
/// `TRANSFORM2PDF__RENDERER__PAGE_SIZE=Letter`.
pub const ENV_PREFIX: &str = "TRANSFORM2PDF";

/// Config file looked up in the working directory when none is given
/// (`transform2pdf.toml`, `.yaml` or `.json`).
pub const DEFAULT_CONFIG_NAME: &str = "transform2pdf";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Uploaded documents are written here for the duration of a request.
    pub upload_dir: PathBuf,
    /// Scratch directory for transform files and PDF artifacts.
    pub work_dir: PathBuf,
    /// Directory holding `cii-xr.xsl`, `ubl-xr.xsl`, ... and `xrechnung-html.uni.xsl`.
    pub stylesheet_dir: PathBuf,
    /// Translation tables replacing the embedded ones.
    pub translations: Option<PathBuf>,
    pub default_language: String,
    pub show_ids: bool,
    pub max_upload_mb: usize,
    pub enable_cors: bool,
    pub saxon: SaxonConfig,
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SaxonConfig {
    pub program: String,
    /// Arguments placed before `-s:`/`-xsl:`/`-o:`.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub program: String,
    pub args: Vec<String>,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let scratch = std::env::temp_dir().join("transform2pdf");
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8025,
            upload_dir: scratch.join("uploads"),
            work_dir: scratch.join("work"),
            stylesheet_dir: PathBuf::from("xsl"),
            translations: None,
            default_language: "de".to_string(),
            show_ids: false,
            max_upload_mb: 20,
            enable_cors: true,
            saxon: SaxonConfig::default(),
            renderer: RendererConfig::default(),
        }
    }
}

impl Default for SaxonConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec!["-jar".to_string(), "saxon-he.jar".to_string()],
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            program: "wkhtmltopdf".to_string(),
            args: vec!["--quiet".to_string(), "--encoding".to_string(), "utf-8".to_string()],
            page_size: options.page_size,
            orientation: options.orientation,
            margin_mm: options.margin_mm,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// An explicitly given `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config: AppConfig = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        if config.max_upload_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_upload_mb must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            page_size: self.renderer.page_size,
            orientation: self.renderer.orientation,
            margin_mm: self.renderer.margin_mm,
        }
    }
}
