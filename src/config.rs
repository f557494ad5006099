// SPDX-License-Identifier: MPL-2.0

use std::{env, fs::read_to_string, path::PathBuf};

use anyhow::{anyhow, Result};

const APP_NAME: &str = "staffbook";
const DATABASE_ENV: &str = "STAFFBOOK_DATABASE";

pub fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let config_toml: PartialConfig = config_path
        .or_else(|| dirs::config_local_dir().map(|dir| dir.join(APP_NAME).join("config.toml")))
        .and_then(|path| {
            log::debug!("Reading configuration at path {:?}", &path);
            match read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => Some(config),
                    Err(err) => {
                        log::warn!("Could not parse config at path {:?} {err}", path);
                        None
                    }
                },
                Err(err) => {
                    log::trace!(
                        "Could not read path {path:?} (assuming no config file set yet) {err}"
                    );
                    None
                }
            }
        })
        .unwrap_or_default();

    let database_path = env::var_os(DATABASE_ENV)
        .map(PathBuf::from)
        .or(config_toml.database_path)
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_NAME).join("staffbook.db")))
        .ok_or_else(|| {
            anyhow!("OS data directory could not be determined, use config file to set a database file location")
        })?;
    log::trace!("Config: database_path is {:?}", &database_path);

    Ok(Config { database_path })
}

pub struct Config {
    pub database_path: PathBuf,
}

#[derive(Default, serde::Deserialize)]
struct PartialConfig {
    database_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_database_path_from_toml() {
        let config: PartialConfig = toml::from_str(r#"database_path = "/tmp/staff.db""#).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/staff.db")));
    }

    #[test]
    fn database_path_is_optional() {
        let config: PartialConfig = toml::from_str("").unwrap();
        assert_eq!(config.database_path, None);
    }
}
