use landmask::driver::{MaskTable, DEFAULT_TABLE_NAME};
use landmask::{generate_mask_table, Config, Dim2, IoLayout, Layout, MaskConvention, SearchConfig};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_topography(dir: &Path, field: &str, rows: Vec<Vec<u8>>) -> PathBuf {
    let path = dir.join("topography.json");
    let doc = json!({ field: rows, "name": "test grid" });
    fs::write(&path, doc.to_string()).unwrap();
    path
}

fn config(npes: usize, target_io_pes: usize, halo: usize) -> Config {
    let mut config = Config::new(npes, target_io_pes);
    config.search = SearchConfig {
        halo: Dim2::repeat(halo),
        ..SearchConfig::default()
    };
    config
}

#[test]
fn test_land_only_grid() {
    let dir = TempDir::new().unwrap();
    let input = write_topography(dir.path(), "mask", vec![vec![0; 10]; 10]);

    let outcome =
        generate_mask_table(&input, &config(90, 1, 2), dir.path(), DEFAULT_TABLE_NAME).unwrap();

    assert_eq!(outcome.path, dir.path().join("MOM_auto_mask_table"));
    assert_eq!(outcome.decomposition.layout, Layout::new(10, 10));
    assert_eq!(outcome.decomposition.io_layout, IoLayout::new(1, 1));
    assert_eq!(outcome.decomposition.state.max_feasible_p, 100);

    let mut expected = String::from("10\n10,10\n");
    for j in 1..=10 {
        expected += &format!("1,{}\n", j);
    }
    assert_eq!(fs::read_to_string(&outcome.path).unwrap(), expected);

    let table = MaskTable::load(&outcome.path).unwrap();
    assert_eq!(table, outcome.table);
    assert_eq!(table.npes(), 90);
}

#[test]
fn test_coastal_grid() {
    // ocean in the two easternmost columns, given as a `wet` field
    let rows = vec![vec![0, 0, 0, 0, 0, 0, 1, 1]; 4];
    let dir = TempDir::new().unwrap();
    let input = write_topography(dir.path(), "wet", rows.clone());

    let outcome = generate_mask_table(&input, &config(2, 2, 1), dir.path(), "table").unwrap();
    assert_eq!(outcome.decomposition.io_layout, IoLayout::new(1, 2));
    assert_eq!(
        fs::read_to_string(dir.path().join("table")).unwrap(),
        "4\n3,2\n1,1\n1,2\n2,1\n2,2\n"
    );

    // the same grid with land marked as `1`
    let inverted = rows
        .iter()
        .map(|row| row.iter().map(|v| 1 - v).collect())
        .collect();
    let input = write_topography(dir.path(), "mask", inverted);

    let mut config = config(2, 2, 1);
    config.convention = MaskConvention::ZeroIsActive;
    let other = generate_mask_table(&input, &config, dir.path(), "inverted").unwrap();

    assert_eq!(other.table, outcome.table);
}

#[test]
fn test_infeasible_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_topography(dir.path(), "mask", vec![vec![1; 10]; 10]);

    let err = generate_mask_table(&input, &config(90, 1, 2), dir.path(), DEFAULT_TABLE_NAME)
        .unwrap_err();

    assert!(format!("{:#}", err).contains("increase the number of tasks"));
    assert!(!dir.path().join(DEFAULT_TABLE_NAME).exists());
}

#[test]
fn test_invalid_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_topography(dir.path(), "mask", vec![vec![0, 2], vec![0, 0]]);

    let err =
        generate_mask_table(&input, &config(1, 1, 2), dir.path(), DEFAULT_TABLE_NAME).unwrap_err();

    assert!(format!("{:#}", err).contains("row 0, column 1"));
    assert!(!dir.path().join(DEFAULT_TABLE_NAME).exists());

    let missing = dir.path().join("missing.json");
    assert!(generate_mask_table(&missing, &config(1, 1, 2), dir.path(), "x").is_err());
}
