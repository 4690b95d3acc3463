//! Basic example demonstrating the tabulation pipeline.
//!
//! This example shows how to:
//! 1. Load records
//! 2. Handle missing values
//! 3. Build one-way and two-way tables
//! 4. Test independence and compare proportions

use crosstab::prelude::*;

const MANIFEST: &str = "\
PassengerId,Survived,Pclass,Age,Embarked
1,0,3,22,S
2,1,1,38,C
3,1,3,26,S
4,1,1,35,S
5,0,3,35,S
6,0,3,,Q
7,0,1,54,S
8,0,3,2,S
9,1,3,27,S
10,1,2,14,C
11,1,3,4,S
12,1,1,58,S
13,0,3,20,S
14,0,3,39,S
15,0,3,14,S
16,1,2,55,S
17,0,3,2,Q
18,1,2,,S
19,0,3,31,S
20,1,3,,C
21,0,2,35,S
22,1,2,34,S
23,1,3,15,Q
24,1,1,28,S
25,0,3,8,S
26,1,3,38,S
27,0,3,,C
28,0,1,19,S
29,1,3,,Q
30,0,3,,S
31,0,1,40,C
32,1,1,,C
33,1,3,,Q
34,0,2,66,S
35,0,1,28,C
36,0,1,42,S
37,1,3,,C
38,0,3,21,S
39,0,3,18,S
40,1,3,14,C
41,0,3,40,S
42,0,2,27,S
43,0,3,,C
44,1,2,3,C
45,1,3,19,Q
46,0,3,,S
47,0,3,,Q
48,1,3,,Q
49,0,3,,C
50,0,3,18,S
51,0,3,7,S
52,0,3,21,S
53,1,1,49,C
54,1,2,29,S
55,0,1,65,C
56,1,1,,S
57,1,2,21,S
58,0,3,28.5,C
59,1,2,5,S
60,0,3,11,S
61,0,3,22,C
62,1,1,38,
63,0,1,45,S
";

fn main() -> Result<()> {
    println!("=== Crosstab Example ===\n");

    let records = Table::from_csv_str(MANIFEST)?;
    println!("Loaded {} records, {} columns", records.n_rows(), records.n_columns());
    println!();

    // Missing ages under the two policies
    println!("=== Ages ===\n");
    let dropped = apply_missing_strategy(&records, "Age", MissingStrategy::DropValues)?;
    let filled = apply_missing_strategy(&records, "Age", MissingStrategy::InterpolateLinear)?;
    println!("{}", describe(&dropped)?);
    println!("{}", describe(&filled)?);
    println!("{}", histogram(&filled.present_numbers()?, 8)?);

    // Tabulation needs a port of embarkation
    let complete = drop_rows_missing(&records, "Embarked")?;
    println!(
        "Dropped {} record(s) without a port\n",
        records.n_rows() - complete.n_rows()
    );

    println!("=== Frequencies ===\n");
    println!("{}", tabulate_one_way(complete.column("Embarked")?));
    println!();

    let config = TwoWayConfig {
        include_margins: true,
        row_order: LevelOrder::Sorted,
        col_order: LevelOrder::Sorted,
    };
    let counts = crosstab(&complete, "Survived", "Embarked", &config)?
        .with_row_labels(vec!["Died".into(), "Survived".into()])?;

    println!("=== Survival by Port ===\n");
    println!("{}", counts);
    println!();
    println!("{}", expected_counts(&counts)?);
    println!();
    println!("{}", row_proportions(&counts));
    println!();

    let result = test_chi_squared(&counts)?;
    println!("{}", result);
    println!();

    // The same analysis as a configurable pipeline
    println!("=== Pipeline ===\n");
    let pipeline = Pipeline::new()
        .name("survival-by-port")
        .drop_rows_missing("Embarked")
        .two_way_with("Survived", "Embarked", config, None, None)
        .expected()
        .proportions(Axis::Row)
        .chi_squared(false);

    println!("{}", pipeline.to_config(Some("Survival by port")).to_yaml()?);
    let report = pipeline.run(&records)?;
    println!("{}", report);

    Ok(())
}
