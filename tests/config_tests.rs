use std::io::Write;

use shape_drift::cli::Cli;
use shape_drift::config::AnimatorConfig;
use shape_drift::scenes::Variant;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = AnimatorConfig::from_json("{}").unwrap();
        assert_eq!(config, AnimatorConfig::default());
        assert_eq!(config.damping, 0.04);
        assert_eq!(config.variant, Variant::Geometric);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = AnimatorConfig::from_json(
            r#"{"variant":"petals","shape_count":30,"spawn":{"extent":[10.0,5.0,5.0]}}"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Petals);
        assert_eq!(config.effective_shape_count(), 30);
        assert_eq!(config.spawn.extent, [10.0, 5.0, 5.0]);
        // Unspecified nested fields keep defaults
        assert_eq!(config.spawn.scale_min, 0.8);
    }

    #[test]
    fn test_defaults_round_trip_through_json() {
        let json = serde_json::to_string(&AnimatorConfig::default()).unwrap();
        assert_eq!(AnimatorConfig::from_json(&json).unwrap(), AnimatorConfig::default());
    }

    #[test]
    fn test_rejects_zero_shapes() {
        assert!(AnimatorConfig::from_json(r#"{"shape_count":0}"#).is_err());
    }

    #[test]
    fn test_rejects_oversized_shape_count() {
        assert!(AnimatorConfig::from_json(r#"{"shape_count":3000000}"#).is_err());
        let cli = Cli {
            shape_count: Some(3_000_000),
            ..Default::default()
        };
        let err = AnimatorConfig::resolve(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("shape_count"));
    }

    #[test]
    fn test_rejects_bad_damping() {
        assert!(AnimatorConfig::from_json(r#"{"damping":0.0}"#).is_err());
        assert!(AnimatorConfig::from_json(r#"{"damping":1.5}"#).is_err());
        assert!(AnimatorConfig::from_json(r#"{"damping":1.0}"#).is_ok());
    }

    #[test]
    fn test_rejects_negative_extent() {
        assert!(AnimatorConfig::from_json(r#"{"spawn":{"extent":[-1.0,2.0,2.0]}}"#).is_err());
    }

    #[test]
    fn test_rejects_inverted_scale_range() {
        assert!(
            AnimatorConfig::from_json(r#"{"spawn":{"scale_min":2.0,"scale_max":1.0}}"#).is_err()
        );
    }

    #[test]
    fn test_rejects_zero_window() {
        assert!(AnimatorConfig::from_json(r#"{"width":0}"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(AnimatorConfig::from_json(r#"{"variant":"leaves"}"#).is_err());
    }

    #[test]
    fn test_resolve_reads_file_then_flags() {
        let path = std::env::temp_dir().join(format!("shape-drift-{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, r#"{{"variant":"petals","seed":5,"width":640}}"#).unwrap();
        }

        let cli = Cli {
            config: Some(path.clone()),
            seed: Some(6),
            hud: true,
            ..Default::default()
        };
        let config = AnimatorConfig::resolve(&cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.variant, Variant::Petals);
        assert_eq!(config.seed, Some(6));
        assert_eq!(config.width, 640);
        assert!(config.hud);
    }

    #[test]
    fn test_resolve_missing_file_errors() {
        let cli = Cli {
            config: Some("/nonexistent/shape-drift.json".into()),
            ..Default::default()
        };
        let err = AnimatorConfig::resolve(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read config file"));
    }

    #[test]
    fn test_resolve_validates_cli_values() {
        let cli = Cli {
            shape_count: Some(0),
            ..Default::default()
        };
        assert!(AnimatorConfig::resolve(&cli).is_err());
    }
}
