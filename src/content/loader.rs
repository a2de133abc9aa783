//! Content domain: reading level and tuning files from disk.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// A content file that could not be read or parsed.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse RON text, tagging failures with `file`.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    let data: DataFile<T> = parse_ron(&path.display().to_string(), &contents)?;
    Ok(data.items)
}

fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    parse_ron(&path.display().to_string(), &contents)
}

/// Load `levels.ron` and `simulation_defaults.ron` from `base_path`.
/// Every failing file is reported; nothing is returned partially.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(ContentRegistry, SimulationDefaults), Vec<ContentLoadError>> {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    match load_data_file::<LevelDef>(&base_path.join("levels.ron")) {
        Ok(items) => {
            for item in items {
                if registry.levels.contains_key(&item.id) {
                    errors.push(ContentLoadError {
                        file: "levels.ron".to_string(),
                        message: format!("duplicate level id '{}'", item.id),
                    });
                    continue;
                }
                registry.insert_level(item);
            }
        }
        Err(e) => errors.push(e),
    }

    let defaults = match load_single_file::<SimulationDefaults>(
        &base_path.join("simulation_defaults.ron"),
    ) {
        Ok(defaults) => Some(defaults),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match defaults {
        Some(defaults) if errors.is_empty() => Ok((registry, defaults)),
        _ => Err(errors),
    }
}
