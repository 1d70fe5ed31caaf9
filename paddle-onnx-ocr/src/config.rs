use std::env;
use std::time::Duration;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Recognition pipeline configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub timeout_secs: u64,
    /// Intra-op threads handed to the engine; 0 lets the runtime decide.
    pub num_threads: usize,
    /// Keep one engine alive across calls instead of loading models per request.
    pub reuse_engine: bool,
    pub engine: EngineOptions,
}

/// Detection parameters passed to every detect call
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub padding: u32,
    pub max_side_len: u32,
    pub box_score_thresh: f32,
    pub box_thresh: f32,
    pub unclip_ratio: f32,
    pub do_angle: bool,
    pub most_angle: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            padding: 50,
            max_side_len: 1024,
            box_score_thresh: 0.5,
            box_thresh: 0.3,
            unclip_ratio: 1.6,
            do_angle: true,
            most_angle: true,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        let defaults = EngineOptions::default();
        Self {
            timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
            num_threads: parse_env_or("OCR_NUM_THREADS", 0),
            reuse_engine: parse_env_or("OCR_REUSE_ENGINE", false),
            engine: EngineOptions {
                padding: parse_env_or("OCR_PADDING", defaults.padding),
                max_side_len: parse_env_or("OCR_MAX_SIDE_LEN", defaults.max_side_len),
                box_score_thresh: parse_env_or("OCR_BOX_SCORE_THRESH", defaults.box_score_thresh),
                box_thresh: parse_env_or("OCR_BOX_THRESH", defaults.box_thresh),
                unclip_ratio: parse_env_or("OCR_UNCLIP_RATIO", defaults.unclip_ratio),
                do_angle: parse_env_or("OCR_DO_ANGLE", defaults.do_angle),
                most_angle: parse_env_or("OCR_MOST_ANGLE", defaults.most_angle),
            },
        }
    }
}

impl OcrConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "OCR_TIMEOUT",
        "OCR_NUM_THREADS",
        "OCR_REUSE_ENGINE",
        "OCR_PADDING",
        "OCR_MAX_SIDE_LEN",
        "OCR_BOX_SCORE_THRESH",
        "OCR_BOX_THRESH",
        "OCR_UNCLIP_RATIO",
        "OCR_DO_ANGLE",
        "OCR_MOST_ANGLE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_ocr_config_defaults() {
        clear_env();

        let config = OcrConfig::from_env();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.num_threads, 0);
        assert!(!config.reuse_engine);
        assert_eq!(config.engine, EngineOptions::default());
    }

    #[test]
    fn test_engine_option_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.padding, 50);
        assert_eq!(options.max_side_len, 1024);
        assert!((options.box_score_thresh - 0.5).abs() < f32::EPSILON);
        assert!((options.box_thresh - 0.3).abs() < f32::EPSILON);
        assert!((options.unclip_ratio - 1.6).abs() < f32::EPSILON);
        assert!(options.do_angle);
        assert!(options.most_angle);
    }

    #[test]
    #[serial]
    fn test_ocr_config_from_env() {
        clear_env();
        std::env::set_var("OCR_TIMEOUT", "5");
        std::env::set_var("OCR_NUM_THREADS", "4");
        std::env::set_var("OCR_REUSE_ENGINE", "true");
        std::env::set_var("OCR_MAX_SIDE_LEN", "2048");
        std::env::set_var("OCR_DO_ANGLE", "false");

        let config = OcrConfig::from_env();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.num_threads, 4);
        assert!(config.reuse_engine);
        assert_eq!(config.engine.max_side_len, 2048);
        assert!(!config.engine.do_angle);
        assert_eq!(config.engine.padding, 50);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_value_falls_back_to_default() {
        clear_env();
        std::env::set_var("OCR_TIMEOUT", "thirty");

        let config = OcrConfig::from_env();
        assert_eq!(config.timeout_secs, 30);

        clear_env();
    }
}
