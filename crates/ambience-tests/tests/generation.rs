//! End-to-end generation tests driven by a scripted stand-in encoder.
//!
//! These cover the per-theme outcome classification, cleanup of scratch and
//! staging files, and overwrite behaviour without requiring ffmpeg.

use ambience_cli::{generate, ThemeStatus};
use ambience_spec::ThemeTable;
use ambience_tests::{output_files, staging_files, TestHarness};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn missing_encoder_skips_single_theme() {
    let harness = TestHarness::new();
    let table = ThemeTable::from_pairs([("tape", 16)]).unwrap();

    let report = generate(&table, &harness.config(harness.missing_encoder()));

    assert_eq!(report.themes.len(), 1);
    assert_eq!(report.skipped(), 1);
    assert!(matches!(
        &report.themes[0].status,
        ThemeStatus::Skipped { reason, .. } if reason.starts_with("encoder unavailable")
    ));
    assert!(output_files(&harness.out_dir()).is_empty());
    assert!(staging_files(&harness.out_dir()).is_empty());
    assert!(harness.leftover_scratch().is_empty());
}

#[test]
fn missing_encoder_skips_reference_table() {
    let harness = TestHarness::new();

    let report = generate(
        &ThemeTable::reference(),
        &harness.config(harness.missing_encoder()),
    );

    assert_eq!(report.skipped(), 5);
    assert_eq!(report.generated() + report.failed(), 0);
    assert!(output_files(&harness.out_dir()).is_empty());
    assert!(harness.leftover_scratch().is_empty());
}

#[cfg(unix)]
mod with_fake_encoder {
    use super::*;
    use ambience_spec::defaults;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_theme_gets_a_non_empty_output() {
        let harness = TestHarness::new();
        let table = ThemeTable::reference();

        let report = generate(&table, &harness.config(harness.fake_encoder(&[], 1)));

        assert!(report.all_generated(), "report: {report:#?}");
        for entry in &table {
            let path = entry.output_path(&harness.out_dir());
            let meta = fs::metadata(&path).unwrap();
            assert!(meta.len() > 0, "{} is empty", path.display());
            assert_eq!(report.outcome(&entry.name).unwrap().output_path(), Some(path.as_path()));
        }
        assert_eq!(output_files(&harness.out_dir()).len(), 5);
        assert!(staging_files(&harness.out_dir()).is_empty());
        assert!(harness.leftover_scratch().is_empty());
    }

    #[test]
    fn operator_scenario_produces_exactly_one_file() {
        let harness = TestHarness::new();
        let table = ThemeTable::from_pairs([("operator", 8)]).unwrap();
        let config = harness
            .config(harness.fake_encoder(&[], 1))
            .sample_rate(defaults::SAMPLE_RATE);

        let report = generate(&table, &config);

        assert_eq!(report.generated(), 1);
        assert_eq!(
            output_files(&harness.out_dir()),
            vec![harness.out_dir().join("operator.ogg")]
        );
        assert!(harness.leftover_scratch().is_empty());

        // The stand-in encoder copies its input, so the output is the
        // scratch container itself.
        let mut reader = hound::WavReader::open(harness.out_dir().join("operator.ogg")).unwrap();
        assert_eq!(reader.spec().sample_rate, 44_100);
        assert_eq!(reader.duration(), 44_100 * 8);
        assert!(reader.samples::<i16>().all(|s| s.unwrap() == 0));
    }

    #[test]
    fn encoder_failure_skips_only_that_theme() {
        let harness = TestHarness::new();

        let report = generate(
            &ThemeTable::reference(),
            &harness.config(harness.fake_encoder(&["map"], 2)),
        );

        assert_eq!(report.generated(), 4);
        assert_eq!(report.skipped(), 1);
        let map = report.outcome("map").unwrap();
        match &map.status {
            ThemeStatus::Skipped { reason, code } => {
                assert_eq!(code, "ENCODER_004");
                assert!(reason.contains("status 2"), "reason: {reason}");
            }
            other => panic!("expected skip, got {other:?}"),
        }

        // Themes after the failing one still ran.
        assert!(report.outcome("timeline").unwrap().is_generated());
        assert!(report.outcome("tape").unwrap().is_generated());
        assert!(!harness.out_dir().join("map.ogg").exists());
        assert!(staging_files(&harness.out_dir()).is_empty());
        assert!(harness.leftover_scratch().is_empty());
    }

    #[test]
    fn encoder_failure_leaves_existing_output_untouched() {
        let harness = TestHarness::new();
        let table = ThemeTable::from_pairs([("tape", 2)]).unwrap();
        fs::create_dir_all(harness.out_dir()).unwrap();
        let existing = harness.out_dir().join("tape.ogg");
        fs::write(&existing, b"previous take").unwrap();

        let report = generate(&table, &harness.config(harness.fake_encoder(&["tape"], 1)));

        assert_eq!(report.skipped(), 1);
        assert_eq!(fs::read(&existing).unwrap(), b"previous take");
        assert!(staging_files(&harness.out_dir()).is_empty());
    }

    #[test]
    fn rerun_overwrites_existing_outputs() {
        let harness = TestHarness::new();
        let table = ThemeTable::from_pairs([("guide", 1), ("tape", 2)]).unwrap();
        let config = harness.config(harness.fake_encoder(&[], 1)).sample_rate(8_000);

        let first = generate(&table, &config);
        assert!(first.all_generated());

        let guide = harness.out_dir().join("guide.ogg");
        fs::write(&guide, b"stale").unwrap();

        let second = generate(&table, &config);
        assert!(second.all_generated());
        assert_ne!(fs::read(&guide).unwrap(), b"stale");
        assert_eq!(output_files(&harness.out_dir()).len(), 2);
        assert!(harness.leftover_scratch().is_empty());
    }

    #[test]
    fn outputs_get_regular_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let harness = TestHarness::new();
        let table = ThemeTable::from_pairs([("operator", 1)]).unwrap();
        let config = harness.config(harness.fake_encoder(&[], 1)).sample_rate(8_000);

        let plain = harness.path().join("plain.bin");
        fs::write(&plain, b"x").unwrap();
        let plain_mode = fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

        let output = harness.out_dir().join("operator.ogg");
        for _ in 0..2 {
            assert!(generate(&table, &config).all_generated());
            let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, plain_mode, "output mode {mode:o}, plain mode {plain_mode:o}");
        }
    }

    #[test]
    fn report_serializes_outcomes_in_order() {
        let harness = TestHarness::new();
        let table = ThemeTable::from_pairs([("operator", 1), ("map", 1)]).unwrap();

        let report = generate(
            &table,
            &harness
                .config(harness.fake_encoder(&["map"], 3))
                .sample_rate(8_000),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["themes"][0]["theme"], "operator");
        assert_eq!(json["themes"][0]["status"], "generated");
        assert_eq!(json["themes"][1]["theme"], "map");
        assert_eq!(json["themes"][1]["status"], "skipped");
        assert_eq!(json["themes"][1]["code"], "ENCODER_004");
    }
}
