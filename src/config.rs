use log::info;

use crate::content::AssetLayout;

const DEFAULT_ASSETS: &str = "assets";
const DEFAULT_FOLDER: &str = "default";
const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbxN_QRhW6F7ogSh_twhLlfMZNbSyGlzip3AmhiWHt1wJ0It4fReU53RJ5Ub5w_nWTLE/exec";

/// Build-time settings. Values come from `option_env!` so a deployment can
/// point the widget elsewhere without touching the code.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub assets_root: String,
    pub default_folder: String,
    pub endpoint: String,
}

impl Config {
    pub fn load() -> Self {
        Self::from_values(
            option_env!("DAILY_QUIZ_ASSETS"),
            option_env!("DAILY_QUIZ_DEFAULT_FOLDER"),
            option_env!("DAILY_QUIZ_ENDPOINT"),
        )
    }

    fn from_values(assets: Option<&str>, folder: Option<&str>, endpoint: Option<&str>) -> Self {
        Self {
            assets_root: try_load("DAILY_QUIZ_ASSETS", assets, DEFAULT_ASSETS)
                .trim_end_matches('/')
                .to_string(),
            default_folder: try_load("DAILY_QUIZ_DEFAULT_FOLDER", folder, DEFAULT_FOLDER)
                .trim_matches('/')
                .to_string(),
            endpoint: try_load("DAILY_QUIZ_ENDPOINT", endpoint, DEFAULT_ENDPOINT),
        }
    }

    pub fn layout(&self) -> AssetLayout {
        AssetLayout::new(&self.assets_root, &self.default_folder)
    }
}

fn try_load(key: &str, value: Option<&str>, default: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}
