use std::path::PathBuf;

use crate::io::MapFormat;

/// Glass parameters that persist across runs.
#[derive(Clone, Debug, PartialEq)]
pub struct GlassSettings {
    /// Corner radius of the glass element, in pixels
    pub border_radius: f64,
    /// Radial extent of the curved rim, in pixels
    pub bezel_width: f64,
    /// `scale` written into the feDisplacementMap filter
    pub refraction_scale: f64,
    pub output_format: MapFormat,
    /// `id` of the generated SVG filter
    pub filter_id: String,
}

impl Default for GlassSettings {
    fn default() -> Self {
        Self {
            border_radius: 20.0,
            bezel_width: 10.0,
            refraction_scale: 20.0,
            output_format: MapFormat::Png,
            filter_id: "liquid-glass".to_string(),
        }
    }
}

impl GlassSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/liquidglass/liquidglass_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\LiquidGlass\liquidglass_settings.cfg
    /// On macOS:   ~/Library/Application Support/LiquidGlass/liquidglass_settings.cfg
    /// Fallback:   same directory as the executable.
    pub fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("liquidglass");
            return Some(config_dir.join("liquidglass_settings.cfg"));
        }
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()?;
            return Some(
                PathBuf::from(appdata)
                    .join("LiquidGlass")
                    .join("liquidglass_settings.cfg"),
            );
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("LiquidGlass")
                    .join("liquidglass_settings.cfg"),
            );
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("liquidglass_settings.cfg")))
        }
    }

    /// Render as `key=value` lines.
    pub fn to_config_string(&self) -> String {
        format!(
            "border_radius={}\n\
             bezel_width={}\n\
             refraction_scale={}\n\
             output_format={}\n\
             filter_id={}\n",
            self.border_radius,
            self.bezel_width,
            self.refraction_scale,
            self.output_format.name(),
            self.filter_id,
        )
    }

    /// Parse `key=value` lines. Unknown keys are skipped, bad values keep
    /// their default.
    pub fn from_config_str(content: &str) -> Self {
        let mut s = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let key = key.trim();
            let val = val.trim();
            match key {
                "border_radius" => {
                    if let Ok(v) = val.parse() { s.border_radius = v; }
                }
                "bezel_width" => {
                    if let Ok(v) = val.parse() { s.bezel_width = v; }
                }
                "refraction_scale" => {
                    if let Ok(v) = val.parse() { s.refraction_scale = v; }
                }
                "output_format" => {
                    if let Ok(f) = MapFormat::parse(val) { s.output_format = f; }
                }
                "filter_id" => {
                    if !val.is_empty() { s.filter_id = val.to_string(); }
                }
                _ => {}
            }
        }
        s
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<PathBuf> {
        let Some(path) = Self::settings_path() else {
            return Err(std::io::Error::other("no settings directory available"));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.to_config_string())?;
        Ok(path)
    }

    /// Load settings from disk (returns default if file missing or corrupt)
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else { return Self::default() };
        let Ok(content) = std::fs::read_to_string(&path) else { return Self::default() };
        Self::from_config_str(&content)
    }
}
