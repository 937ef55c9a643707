// src/lib.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

// --- Declare modules ---
pub mod catalog;
mod config;
pub mod db;
pub mod editor;
pub mod template;

// --- Expose public types ---
pub use catalog::{label_matches, CatalogError, Exercise, ExerciseCatalog, StaticCatalog};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, CatalogSource, Config, ConfigError, StandardColor, Theme,
};
pub use db::{get_db_path as get_db_path_util, DbError, ExerciseType, SqliteCatalog};
pub use editor::{EditorError, EditorOptions, SearchPhase, TemplateEditor};
pub use template::{ExerciseActivity, ExerciseSet, Template, WeightUnit};

pub struct TemplateService {
    pub config: Config,
    pub catalog: Box<dyn ExerciseCatalog>,
    pub config_path: PathBuf,
}

impl TemplateService {
    /// Loads the config and builds the configured catalog.
    /// # Errors
    /// Returns `anyhow::Error` if the config cannot be located or parsed, or
    /// the catalog database cannot be opened.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        let catalog = build_catalog(&config.catalog)?;

        Ok(Self {
            config,
            catalog,
            config_path,
        })
    }

    /// Builds a service around an already constructed catalog, without
    /// touching the filesystem.
    pub fn with_catalog(config: Config, catalog: Box<dyn ExerciseCatalog>) -> Self {
        Self {
            config,
            catalog,
            config_path: PathBuf::new(),
        }
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            default_unit: self.config.default_unit,
            allow_duplicates: self.config.allow_duplicate_exercises,
        }
    }

    /// A closed editor configured from the current settings.
    pub fn new_editor(&self) -> TemplateEditor {
        TemplateEditor::new(self.editor_options())
    }

    /// # Errors
    /// Returns `CatalogError` if the catalog cannot be read.
    pub fn list_exercises(&self) -> Result<Vec<Exercise>, CatalogError> {
        self.catalog.all()
    }

    /// Runs the label search the editor uses.
    /// # Errors
    /// Returns `CatalogError` if the catalog cannot be read.
    pub fn search_exercises(&self, query: &str) -> Result<Vec<Exercise>, CatalogError> {
        self.catalog.find_by_label_substring(query)
    }

    /// Caps a match list to the configured display limit.
    pub fn visible_results<'a>(&self, results: &'a [Exercise]) -> &'a [Exercise] {
        match self.config.search_result_limit {
            Some(limit) if limit < results.len() => &results[..limit],
            _ => results,
        }
    }

    /// Seed templates from the config.
    pub fn templates(&self) -> &[Template] {
        &self.config.templates
    }

    pub fn find_template(&self, name: &str) -> Option<&Template> {
        self.config
            .templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }
}

fn build_catalog(source: &CatalogSource) -> Result<Box<dyn ExerciseCatalog>> {
    match source {
        CatalogSource::Builtin => Ok(Box::new(StaticCatalog::builtin())),
        CatalogSource::Sqlite { db_path } => {
            let path = match db_path {
                Some(path) => path.clone(),
                None => db::get_db_path().context("Failed to determine database path")?,
            };
            let catalog = SqliteCatalog::open(&path)
                .with_context(|| format!("Failed to open catalog database at {path:?}"))?;
            catalog
                .seed_if_empty(&StaticCatalog::builtin())
                .context("Failed to seed catalog database")?;
            tracing::info!(path = %path.display(), "Using SQLite exercise catalog");
            Ok(Box::new(catalog))
        }
    }
}
