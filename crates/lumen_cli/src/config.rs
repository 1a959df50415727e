//! Render job configuration.
//!
//! Settings are layered: the scene preset supplies a camera, a JSON config
//! file may replace it and set render options, and command line flags win
//! over both.

use crate::cli::Args;
use crate::scenes::Preset;
use anyhow::{Context, Result};
use lumen_renderer::{CameraSettings, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a `--config` file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderFile {
    pub scene: Option<Preset>,
    pub camera: Option<CameraSettings>,
    pub render: RenderConfig,
}

impl RenderFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let file = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(file)
    }
}

/// Everything needed to run one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub preset: Preset,
    /// Camera from the config file, if any; otherwise the preset's is used
    pub camera: Option<CameraSettings>,
    pub render: RenderConfig,
    pub single_threaded: bool,
}

impl Job {
    pub fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => RenderFile::load(path)?,
            None => RenderFile::default(),
        };
        Ok(Self::merge(file, args))
    }

    fn merge(file: RenderFile, args: &Args) -> Self {
        let mut render = file.render;
        if args.threads.is_some() {
            render.threads = args.threads;
        }
        if args.seed.is_some() {
            render.seed = args.seed;
        }

        Self {
            preset: args.scene.or(file.scene).unwrap_or_default(),
            camera: file.camera,
            render,
            single_threaded: args.single_threaded,
        }
    }

    /// Resolve the final camera from the preset's defaults and flag overrides.
    pub fn camera_settings(&self, preset_camera: CameraSettings, args: &Args) -> CameraSettings {
        let mut settings = self.camera.clone().unwrap_or(preset_camera);
        if let Some(width) = args.width {
            settings.image_width = width;
        }
        if let Some(samples) = args.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(depth) = args.max_depth {
            settings.max_depth = depth;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use lumen_renderer::Background;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("lumen-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_partial_file() {
        let path = write_temp(
            "partial.json",
            r#"{
                "scene": "fog",
                "render": { "seed": 7 }
            }"#,
        );
        let file = RenderFile::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(file.scene, Some(Preset::Fog));
        assert!(file.camera.is_none());
        assert_eq!(file.render.seed, Some(7));
        assert_eq!(file.render.ray_epsilon, RenderConfig::default().ray_epsilon);
    }

    #[test]
    fn test_load_camera_section() {
        let path = write_temp(
            "camera.json",
            r#"{
                "camera": {
                    "image_width": 32,
                    "samples_per_pixel": 4,
                    "background": "sky_gradient"
                }
            }"#,
        );
        let file = RenderFile::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let camera = file.camera.unwrap();
        assert_eq!(camera.image_width, 32);
        assert_eq!(camera.samples_per_pixel, 4);
        assert_eq!(camera.background, Background::SkyGradient);
        assert_eq!(camera.max_depth, CameraSettings::default().max_depth);
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let missing = std::env::temp_dir().join("lumen-does-not-exist.json");
        let err = RenderFile::load(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("lumen-does-not-exist.json"));

        let path = write_temp("bad.json", r#"{ "scene": "nope" }"#);
        let err = RenderFile::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err}").contains("failed to parse config"));
    }

    #[test]
    fn test_flags_override_file() {
        let file = RenderFile {
            scene: Some(Preset::Fog),
            camera: None,
            render: RenderConfig {
                threads: Some(2),
                seed: Some(1),
                ..RenderConfig::default()
            },
        };
        let args = Args::parse_from(["lumen", "--scene", "simple-light", "--seed", "5"]);
        let job = Job::merge(file, &args);

        assert_eq!(job.preset, Preset::SimpleLight);
        assert_eq!(job.render.seed, Some(5));
        assert_eq!(job.render.threads, Some(2));
        assert!(!job.single_threaded);
    }

    #[test]
    fn test_camera_settings_layering() {
        let preset_camera = CameraSettings {
            image_width: 400,
            vfov: 20.0,
            ..CameraSettings::default()
        };

        let args = Args::parse_from(["lumen", "--width", "64", "--max-depth", "3"]);
        let job = Job::merge(RenderFile::default(), &args);
        let settings = job.camera_settings(preset_camera.clone(), &args);
        assert_eq!(settings.image_width, 64);
        assert_eq!(settings.max_depth, 3);
        assert_eq!(settings.vfov, 20.0);
        assert_eq!(job.preset, Preset::ThreeSpheres);

        // A camera from the file replaces the preset's entirely
        let file = RenderFile {
            camera: Some(CameraSettings::default()),
            ..RenderFile::default()
        };
        let args = Args::parse_from(["lumen"]);
        let job = Job::merge(file, &args);
        assert_eq!(job.camera_settings(preset_camera, &args), CameraSettings::default());
    }
}
