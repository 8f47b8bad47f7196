use float_cmp::assert_approx_eq;
use pdb_geometry_rs::{
    analyze, analyze_all, load_coordinates, AnalysisConfig, AnalysisError, LoaderConfig,
    MalformedPolicy,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn atom_line(serial: usize, x: f64, y: f64, z: f64) -> String {
    format!(
        "ATOM  {:>5}  CA  GLY A{:>4}    {:8.3}{:8.3}{:8.3}  1.00  0.00           C",
        serial, serial % 10000, x, y, z
    )
}

fn write_file(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

#[test]
fn two_atom_fixture() {
    let report = analyze("test_files/two_atoms.pdb", &LoaderConfig::default()).unwrap();

    assert_eq!(report.atoms, 2);
    assert_approx_eq!(f64, report.centroid.x, 1.5);
    assert_approx_eq!(f64, report.centroid.y, 2.0);
    assert_approx_eq!(f64, report.centroid.z, 0.0);
    assert_approx_eq!(f64, report.radius_of_gyration, 2.5);
    assert_approx_eq!(f64, report.max_distance, 5.0);

    assert_eq!(
        report.to_string(),
        "PDB file test_files/two_atoms.pdb, 2 atoms were read\n\
         Cg = 1.500 2.000 0.000\n\
         Rg = 2.500\n\
         Dmax = 5.000\n"
    );
}

#[test]
fn peptide_fixture_ignores_hetatm() {
    let report = analyze("test_files/small_peptide.pdb", &LoaderConfig::default()).unwrap();

    assert_eq!(report.atoms, 6);
    assert_eq!(
        report.to_string(),
        "PDB file test_files/small_peptide.pdb, 6 atoms were read\n\
         Cg = 26.642 25.933 3.360\n\
         Rg = 1.541\n\
         Dmax = 3.547\n"
    );
}

#[test]
fn file_without_atoms_is_an_error() {
    match analyze("test_files/no_atoms.pdb", &LoaderConfig::default()) {
        Err(AnalysisError::EmptyStructure { path }) => {
            assert_eq!(path, Path::new("test_files/no_atoms.pdb"))
        }
        other => panic!("Expected EmptyStructure, got {:?}", other),
    }
}

#[test]
fn capacity_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let lines: Vec<String> = (1..=4)
        .map(|i| atom_line(i, i as f64, 0.0, 0.0))
        .collect();
    let path = write_file(&dir, "four.pdb", &lines);

    let at_limit = LoaderConfig {
        max_atoms: 4,
        ..LoaderConfig::default()
    };
    let report = analyze(&path, &at_limit).unwrap();
    assert_eq!(report.atoms, 4);
    assert_approx_eq!(f64, report.max_distance, 3.0);

    let below = LoaderConfig {
        max_atoms: 3,
        ..LoaderConfig::default()
    };
    assert!(matches!(
        analyze(&path, &below),
        Err(AnalysisError::CapacityExceeded { capacity: 3, .. })
    ));
}

#[test]
fn default_capacity_accepts_twenty_thousand_atoms() {
    let dir = tempfile::tempdir().unwrap();
    let lines: Vec<String> = (0..20000)
        .map(|i| atom_line(i % 99999 + 1, (i % 100) as f64, (i / 100) as f64, 0.0))
        .collect();
    let path = write_file(&dir, "full.pdb", &lines);
    let coords = load_coordinates(&path, &LoaderConfig::default()).unwrap();
    assert_eq!(coords.len(), 20000);

    let mut more = lines;
    more.push(atom_line(1, 0.0, 0.0, 1.0));
    let path = write_file(&dir, "overfull.pdb", &more);
    assert!(matches!(
        load_coordinates(&path, &LoaderConfig::default()),
        Err(AnalysisError::CapacityExceeded { capacity: 20000, .. })
    ));
}

#[test]
fn unopenable_path_does_not_stop_other_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdb");
    let paths = vec![
        PathBuf::from("test_files/two_atoms.pdb"),
        missing.clone(),
        PathBuf::from("test_files/no_atoms.pdb"),
        PathBuf::from("test_files/small_peptide.pdb"),
    ];

    let outcomes = analyze_all(&paths, &AnalysisConfig::default());
    assert_eq!(outcomes.len(), 4);

    let returned: Vec<&Path> = outcomes.iter().map(|o| o.path.as_path()).collect();
    let expected: Vec<&Path> = paths.iter().map(|p| p.as_path()).collect();
    assert_eq!(returned, expected);

    assert_eq!(outcomes[0].result.as_ref().unwrap().atoms, 2);
    assert!(matches!(
        &outcomes[1].result,
        Err(AnalysisError::FileOpen { path, .. }) if *path == missing
    ));
    assert!(matches!(
        &outcomes[2].result,
        Err(AnalysisError::EmptyStructure { .. })
    ));
    assert_eq!(outcomes[3].result.as_ref().unwrap().atoms, 6);
}

#[test]
fn fail_fast_stops_after_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        PathBuf::from("test_files/two_atoms.pdb"),
        dir.path().join("missing.pdb"),
        PathBuf::from("test_files/small_peptide.pdb"),
    ];

    let config = AnalysisConfig {
        fail_fast: true,
        ..AnalysisConfig::default()
    };
    let outcomes = analyze_all(&paths, &config);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_ok());
    assert!(!outcomes[1].is_ok());
}

#[test]
fn reject_policy_fails_only_the_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_file(
        &dir,
        "bad.pdb",
        &[
            atom_line(1, 1.0, 1.0, 1.0),
            "ATOM      2  CA  GLY A   2       1.000     n/a   1.000  1.00  0.00           C"
                .to_string(),
        ],
    );
    let paths = vec![bad.clone(), PathBuf::from("test_files/two_atoms.pdb")];

    let config = AnalysisConfig {
        loader: LoaderConfig {
            policy: MalformedPolicy::Reject,
            ..LoaderConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let outcomes = analyze_all(&paths, &config);
    assert!(matches!(
        &outcomes[0].result,
        Err(AnalysisError::MalformedNumber { line: 2, .. })
    ));
    assert!(outcomes[1].is_ok());

    // the default policy reads the broken field as 0.0
    let report = analyze(&bad, &LoaderConfig::default()).unwrap();
    assert_eq!(report.atoms, 2);
    assert_approx_eq!(f64, report.centroid.y, 0.5);
}
