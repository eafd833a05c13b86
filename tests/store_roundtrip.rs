use fingermatch::{FeatureSet, FeatureStore, FingerprintImage, MinutiaPoint, StoreConfig};

fn open(dir: &tempfile::TempDir) -> FeatureStore {
    let store = FeatureStore::open(&StoreConfig {
        database_path: dir.path().join("fingerprints.db"),
    })
    .unwrap();
    store.ensure_schema().unwrap();
    store
}

fn gradient(width: usize, height: usize, seed: u8) -> FingerprintImage {
    let data = (0..width * height)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect();
    FingerprintImage::new(data, width, height).unwrap()
}

#[test]
fn put_then_get_all_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let features: FeatureSet = vec![
        MinutiaPoint::new(4, 2),
        MinutiaPoint::new(0, 9),
        MinutiaPoint::new(4, 2),
    ]
    .into();
    let image = gradient(13, 7, 3);
    store.put("101_1.tif", &features, &image).unwrap();

    let records = store.get_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "101_1.tif");
    assert_eq!(records[0].features, features);
    assert_eq!(records[0].image, image);
}

#[test]
fn put_with_same_name_replaces_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let first: FeatureSet = vec![MinutiaPoint::new(1, 1)].into();
    let second: FeatureSet = vec![MinutiaPoint::new(2, 2), MinutiaPoint::new(3, 3)].into();
    store.put("other.tif", &first, &gradient(4, 4, 0)).unwrap();
    store.put("a.tif", &first, &gradient(5, 3, 1)).unwrap();
    let old_id = store.get("a.tif").unwrap().unwrap().id;

    store.put("a.tif", &second, &gradient(6, 2, 9)).unwrap();

    let records = store.get_all().unwrap();
    let named: Vec<_> = records.iter().filter(|r| r.name == "a.tif").collect();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].features, second);
    assert_eq!(named[0].image, gradient(6, 2, 9));
    assert!(named[0].id > old_id);
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn empty_feature_set_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    store
        .put("blank.png", &FeatureSet::new(), &gradient(3, 3, 0))
        .unwrap();
    let record = store.get("blank.png").unwrap().unwrap();
    assert!(record.features.is_empty());
}

#[test]
fn records_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let features: FeatureSet = vec![MinutiaPoint::new(8, 1)].into();
    {
        let store = open(&dir);
        store.put("kept.tif", &features, &gradient(2, 2, 5)).unwrap();
        store.close();
    }
    let store = open(&dir);
    let records = store.get_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].features, features);
}
