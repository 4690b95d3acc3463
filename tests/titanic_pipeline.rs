//! Integration tests for the Titanic survival-by-port analysis.

use approx::assert_relative_eq;
use crosstab::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Passengers per (port, class) in the Titanic manifest.
const CLASS_BY_PORT: [(&str, [usize; 3]); 3] = [
    ("C", [85, 17, 66]),
    ("Q", [2, 3, 72]),
    ("S", [127, 164, 353]),
];

/// Passengers who died per port; the rest survived.
const DIED_BY_PORT: [(&str, usize); 3] = [("C", 75), ("Q", 47), ("S", 427)];

/// Write a 891-record manifest whose survival and class counts match the
/// real passenger list. Two records have no port of embarkation and every
/// fifth age is missing.
fn create_manifest() -> NamedTempFile {
    let mut records: Vec<(u8, u8, &str)> = Vec::new();
    for (port, classes) in CLASS_BY_PORT {
        let died = DIED_BY_PORT
            .iter()
            .find(|(p, _)| *p == port)
            .map(|(_, d)| *d)
            .unwrap();
        let mut k = 0;
        for (c, &n) in classes.iter().enumerate() {
            for _ in 0..n {
                let survived = if k < died { 0 } else { 1 };
                records.push((survived, c as u8 + 1, port));
                k += 1;
            }
        }
    }
    records.insert(100, (1, 1, ""));
    records.insert(500, (1, 1, ""));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "PassengerId,Survived,Pclass,Name,Age,Embarked").unwrap();
    for (i, (survived, class, port)) in records.iter().enumerate() {
        let age = if i % 5 == 2 {
            String::new()
        } else {
            (20 + i % 40).to_string()
        };
        writeln!(
            file,
            "{},{},{},\"Passenger, No. {}\",{},{}",
            i + 1,
            survived,
            class,
            i + 1,
            age,
            port
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn load_manifest() -> Table {
    let file = create_manifest();
    Table::from_csv(file.path()).unwrap()
}

fn survival_by_port(records: &Table) -> CountTable {
    let config = TwoWayConfig {
        include_margins: true,
        row_order: LevelOrder::Sorted,
        col_order: LevelOrder::Sorted,
    };
    crosstab(records, "Survived", "Embarked", &config)
        .unwrap()
        .with_row_labels(vec!["Died".into(), "Survived".into()])
        .unwrap()
        .with_col_labels(vec![
            "Cherbourg".into(),
            "Queenstown".into(),
            "Southampton".into(),
        ])
        .unwrap()
}

#[test]
fn test_load_manifest() {
    let records = load_manifest();

    assert_eq!(records.n_rows(), 891);
    assert_eq!(records.n_columns(), 6);
    assert!(records.column("Survived").unwrap().is_numeric());
    assert!(!records.column("Embarked").unwrap().is_numeric());
    assert_eq!(records.column("Embarked").unwrap().n_missing(), 2);
    assert_eq!(
        records.get(0, "Name").and_then(|v| v.as_text()),
        Some("Passenger, No. 1")
    );
}

#[test]
fn test_drop_missing_ports() {
    let records = load_manifest();
    let complete = drop_rows_missing(&records, "Embarked").unwrap();

    assert_eq!(complete.n_rows(), 889);
    assert_eq!(complete.column("Embarked").unwrap().n_missing(), 0);
}

#[test]
fn test_survival_by_port_counts() {
    let records = load_manifest();
    let complete = drop_rows_missing(&records, "Embarked").unwrap();
    let counts = survival_by_port(&complete);

    assert_eq!(counts.row(0), vec![75, 47, 427]);
    assert_eq!(counts.row(1), vec![93, 30, 217]);
    assert_eq!(counts.row_totals(), vec![549, 340]);
    assert_eq!(counts.col_totals(), vec![168, 77, 644]);
    assert_eq!(counts.grand_total(), 889);

    // tabulating without dropping first excludes the same records
    let direct = survival_by_port(&records);
    assert_eq!(direct, counts);
}

#[test]
fn test_expected_and_chi_squared() {
    let records = drop_rows_missing(&load_manifest(), "Embarked").unwrap();
    let counts = survival_by_port(&records);

    let expected = expected_counts(&counts).unwrap();
    assert!((expected.get_by_label("Died", "Queenstown").unwrap() - 47.55).abs() < 0.1);
    assert!((expected.get_by_label("Survived", "Queenstown").unwrap() - 29.45).abs() < 0.1);

    let result = test_chi_squared(&counts).unwrap();
    assert_eq!(result.df, 2);
    assert_relative_eq!(result.statistic, 26.4891, epsilon = 1e-3);
    assert!(result.p_value < 0.05);
    assert_eq!(result.decision(0.05), IndependenceDecision::RejectIndependence);
}

#[test]
fn test_row_proportions() {
    let records = drop_rows_missing(&load_manifest(), "Embarked").unwrap();
    let counts = survival_by_port(&records);
    let props = row_proportions(&counts);

    for i in 0..props.n_rows() {
        assert_relative_eq!(props.row(i).iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }
    assert_relative_eq!(
        props.get_by_label("Survived", "Cherbourg").unwrap(),
        93.0 / 340.0,
        epsilon = 1e-12
    );

    // expected proportions repeat the port distribution in every row
    let expected = row_proportions(&expected_counts(&counts).unwrap());
    assert_relative_eq!(expected.get(0, 1), 77.0 / 889.0, epsilon = 1e-9);
    assert_relative_eq!(expected.get(1, 1), 77.0 / 889.0, epsilon = 1e-9);
}

#[test]
fn test_port_by_class() {
    let records = drop_rows_missing(&load_manifest(), "Embarked").unwrap();
    let config = TwoWayConfig {
        include_margins: true,
        row_order: LevelOrder::Sorted,
        col_order: LevelOrder::Sorted,
    };
    let counts = crosstab(&records, "Embarked", "Pclass", &config).unwrap();

    assert_eq!(counts.col_labels(), &["1", "2", "3"]);
    assert_eq!(counts.row(0), vec![85, 17, 66]);
    assert_eq!(counts.row(2), vec![127, 164, 353]);
    assert_eq!(counts.col_totals(), vec![214, 184, 491]);
}

#[test]
fn test_age_policies() {
    let records = load_manifest();

    let dropped = apply_missing_strategy(&records, "Age", MissingStrategy::DropValues).unwrap();
    assert_eq!(dropped.len(), 713);

    let filled =
        apply_missing_strategy(&records, "Age", MissingStrategy::InterpolateLinear).unwrap();
    assert_eq!(filled.len(), 891);
    assert_eq!(filled.n_missing(), 0);

    let stats = describe(&filled).unwrap();
    assert_eq!(stats.count, 891);
    assert!(stats.min >= 20.0 && stats.max <= 59.0);
}

#[test]
fn test_titanic_pipeline() {
    let records = load_manifest();
    let report = titanic_pipeline().run(&records).unwrap();

    assert_eq!(report.n_records, 891);
    assert_eq!(report.len(), 14);

    let tables = report.count_tables();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].row_labels(), &["Died", "Survived"]);
    assert_eq!(tables[0].get_by_label("Died", "Queenstown"), Some(47));
    assert_eq!(tables[1].col_labels(), &["1st Class", "2nd Class", "3rd Class"]);

    let chi2 = report.chi_squared_results();
    assert_eq!(chi2.len(), 1);
    assert!(chi2[0].is_significant(0.05));

    let text = report.to_string();
    assert!(text.contains("Row Total"));
    assert!(text.contains("Column Total"));
    assert!(report.to_json().unwrap().contains("Southampton"));
}

#[test]
fn test_pipeline_from_yaml_file() {
    let config = titanic_pipeline().to_config(Some("Titanic"));
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", config.to_yaml().unwrap()).unwrap();
    file.flush().unwrap();

    let yaml = std::fs::read_to_string(file.path()).unwrap();
    let loaded = PipelineConfig::from_yaml(&yaml).unwrap();
    let records = load_manifest();

    let from_file = Pipeline::from_config(&loaded).run(&records).unwrap();
    let direct = titanic_pipeline().run(&records).unwrap();
    assert_eq!(from_file.count_tables(), direct.count_tables());
}

#[test]
fn test_count_table_tsv_output() {
    let records = drop_rows_missing(&load_manifest(), "Embarked").unwrap();
    let counts = survival_by_port(&records);

    let file = NamedTempFile::new().unwrap();
    counts.to_tsv(file.path()).unwrap();
    let content = std::fs::read_to_string(file.path()).unwrap();

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Survived\tCherbourg\tQueenstown\tSouthampton\tRow Total");
    assert_eq!(lines[1], "Died\t75\t47\t427\t549");
    assert_eq!(lines[3], "Column Total\t168\t77\t644\t889");
}
