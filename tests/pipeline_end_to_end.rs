mod common;

use fingermatch::{
    CollectingReporter, FeatureStore, FingerMatchError, Pipeline, PipelineConfig, Stage,
    StoreConfig,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

fn config(root: &Path, reference: &str) -> PipelineConfig {
    PipelineConfig {
        dataset_dir: root.join("dataset"),
        reference_name: reference.to_string(),
        store: StoreConfig {
            database_path: root.join("fingerprints.db"),
        },
        ..PipelineConfig::default()
    }
}

fn dataset(root: &Path) -> std::path::PathBuf {
    let dir = root.join("dataset");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn six_point_reference_matches_eight_point_record() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());
    common::write_png(&data, "octagon.png", &common::octagon());

    let pipeline = Pipeline::new(config(root.path(), "ref.png"));
    let enrolled = pipeline.enroll_dataset().unwrap();
    assert_eq!(enrolled.enrolled, vec!["octagon.png", "ref.png"]);

    let mut scan = pipeline.run().unwrap();
    assert_eq!(scan.reference().len(), 6);
    assert_eq!(scan.stage(), Stage::Scored);

    let comparison = scan.next().unwrap().unwrap();
    assert_eq!(comparison.name, "octagon.png");
    assert_eq!(comparison.minutiae, 8);
    assert_eq!(comparison.score, 2);
    assert!(comparison.is_match);
    assert_eq!(comparison.image, common::octagon());

    assert!(scan.next().is_none());
    assert_eq!(scan.stage(), Stage::Done);
}

#[test]
fn reference_is_not_compared_with_itself() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());

    let pipeline = Pipeline::new(config(root.path(), "ref.png"));
    let mut reporter = CollectingReporter::default();
    let summary = pipeline.run().unwrap().report_to(&mut reporter);
    assert!(reporter.comparisons.is_empty());
    assert_eq!(summary.compared(), 0);
    assert_eq!(reporter.summary, Some(summary));
}

#[test]
fn threshold_boundary_is_a_non_match() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());
    common::write_png(&data, "octagon.png", &common::octagon());

    let mut cfg = config(root.path(), "ref.png");
    cfg.threshold = 2;
    let pipeline = Pipeline::new(cfg);
    pipeline.enroll_dataset().unwrap();
    let comparisons: Vec<_> = pipeline.run().unwrap().collect();
    assert_eq!(comparisons.len(), 1);
    let comparison = comparisons[0].as_ref().unwrap();
    assert_eq!(comparison.score, 2);
    assert!(!comparison.is_match);
}

#[test]
fn noise_only_reference_stores_empty_features() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "noise.png", &common::specks());

    let cfg = config(root.path(), "noise.png");
    let scan = Pipeline::new(cfg.clone()).run().unwrap();
    assert!(scan.reference().is_empty());
    drop(scan);

    let store = FeatureStore::open(&cfg.store).unwrap();
    let record = store.get("noise.png").unwrap().unwrap();
    assert!(record.features.is_empty());
    assert_eq!(record.image, common::specks());
}

#[test]
fn missing_reference_aborts_before_storing() {
    let root = tempfile::tempdir().unwrap();
    dataset(root.path());

    let cfg = config(root.path(), "absent.tif");
    let err = Pipeline::new(cfg.clone()).run().err().unwrap();
    assert!(matches!(err, FingerMatchError::ImageNotFound { .. }));
    assert!(err.is_fatal());

    let store = FeatureStore::open(&cfg.store).unwrap();
    assert!(store.is_empty().unwrap());
}

#[test]
fn unreachable_store_aborts_before_extraction() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());

    let mut cfg = config(root.path(), "ref.png");
    cfg.store.database_path = root.path().join("no/such/dir/fingerprints.db");
    let err = Pipeline::new(cfg.clone()).run().err().unwrap();
    assert!(matches!(err, FingerMatchError::Storage(_)), "got {err:?}");
    assert!(err.is_fatal());

    // A missing reference still reports the store failure: init runs first.
    cfg.reference_name = "absent.tif".to_string();
    let err = Pipeline::new(cfg.clone()).run().err().unwrap();
    assert!(matches!(err, FingerMatchError::Storage(_)), "got {err:?}");
    assert!(!root.path().join("no").exists());
}

#[test]
fn corrupt_record_is_skipped_not_fatal() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());
    common::write_png(&data, "octagon.png", &common::octagon());

    let cfg = config(root.path(), "ref.png");
    let pipeline = Pipeline::new(cfg.clone());
    pipeline.enroll_dataset().unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::new().filename(&cfg.store.database_path))
            .await
            .unwrap();
        sqlx::query("INSERT INTO fingerprints (name, minutiae, image) VALUES (?, ?, ?)")
            .bind("corrupt.tif")
            .bind("[(1, 2), (3, 4)]")
            .bind(vec![1u8, 2, 3])
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    });

    let mut reporter = CollectingReporter::default();
    let summary = pipeline.run().unwrap().report_to(&mut reporter);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.matches, 1);
    match &reporter.skipped[0] {
        FingerMatchError::Decode { name, .. } => assert_eq!(name, "corrupt.tif"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn enrollment_skips_non_images() {
    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());
    std::fs::write(data.join("notes.txt"), "not an image").unwrap();

    let summary = Pipeline::new(config(root.path(), "ref.png"))
        .enroll_dataset()
        .unwrap();
    assert_eq!(summary.enrolled, vec!["ref.png"]);
    assert_eq!(summary.skipped.len(), 1);
}

#[cfg(unix)]
#[test]
fn enrollment_records_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = tempfile::tempdir().unwrap();
    let data = dataset(root.path());
    common::write_png(&data, "ref.png", &common::hexagon());
    std::fs::write(data.join(OsStr::from_bytes(b"bad\xff.png")), b"").unwrap();

    let summary = Pipeline::new(config(root.path(), "ref.png"))
        .enroll_dataset()
        .unwrap();
    assert_eq!(summary.enrolled, vec!["ref.png"]);
    assert_eq!(summary.skipped.len(), 1);
    match &summary.skipped[0] {
        FingerMatchError::ImageNotFound { reason, .. } => assert!(reason.contains("UTF-8")),
        other => panic!("expected image-not-found, got {other:?}"),
    }
}
