//! End-to-end runs: load a dataset file, interpret a script file, compare output.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use county_ops::app::{self, Status};
use county_ops::cli::{self, Invocation};
use county_ops::data::loader::load_file;
use county_ops::script;
use tempfile::NamedTempFile;

fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(tmp, "{contents}").unwrap();
    tmp
}

fn run_app(data: &Path, ops: &Path) -> (Status, String) {
    let Invocation::Run(cli) = cli::parse([
        OsStr::new("county-ops"),
        OsStr::new("--data"),
        data.as_os_str(),
        ops.as_os_str(),
    ]) else {
        panic!("arguments should parse");
    };
    let mut out = Vec::new();
    let status = app::run(&cli, &mut out).unwrap();
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn fixture_script_matches_expected_output() {
    let (status, out) = run_app(&testdata("counties.csv"), &testdata("ops.txt"));
    assert_eq!(status, Status::Success);

    let expected = "\
Loaded 6 entries from the dataset.
2014 population: 12447400
2014 Age.Percent 65 and Older percentage: 12.775323810594985
Filter: state == CA (2 entries)
Displaying county information:
{'County': 'Los Angeles County, Central', 'State': 'CA', 'Age.Percent 65 and Older': '12.5', \"Education.Bachelor's Degree or Higher\": '31.2', 'Population': '10116705'}
{'County': 'Alpine County', 'State': 'CA', 'Age.Percent 65 and Older': '22.0', \"Education.Bachelor's Degree or Higher\": '38.1', 'Population': '1175'}
Filter: Population gt 100000.0 (1 entries)
2014 Education.Bachelor's Degree or Higher population: 3156411.96
Error: Malformed line 9 - filter-lt:Population
Error: Invalid operation on line 10
2014 population: 10116705
";
    assert_eq!(out, expected);
}

#[test]
fn three_county_totals() {
    let data = temp_file(".csv", "State,Population,X\nA,100,10\nB,200,20\nC,300,30\n");
    let ops = temp_file(
        ".txt",
        "population-total\nfilter-gt:Population:150\npopulation-total\npercent:X\n",
    );
    let (status, out) = run_app(data.path(), ops.path());
    assert_eq!(status, Status::Success);
    assert_eq!(
        out,
        "Loaded 3 entries from the dataset.\n\
         2014 population: 600\n\
         Filter: Population gt 150.0 (2 entries)\n\
         2014 population: 500\n\
         2014 X percentage: 26.0\n"
    );
}

#[test]
fn empty_view_reports_zero_and_scientific_thresholds() {
    let data = temp_file(".csv", "State,Population,X\nA,100,10\nB,200,20\nC,300,30\n");
    let ops = temp_file(
        ".txt",
        "filter-state:ZZ\npopulation:X\npercent:X\nfilter-gt:Population:1e20\nfilter-lt:X:0.00001\n",
    );
    let (_, out) = run_app(data.path(), ops.path());
    assert_eq!(
        out,
        "Loaded 3 entries from the dataset.\n\
         Filter: state == ZZ (0 entries)\n\
         2014 X population: 0\n\
         2014 X percentage: 0\n\
         Filter: Population gt 1e+20 (0 entries)\n\
         Filter: X lt 1e-05 (0 entries)\n"
    );
}

#[test]
fn chained_filters_equal_the_conjunction() {
    let dataset = load_file(&testdata("counties.csv")).unwrap();

    let ops = temp_file(".txt", "filter-state:NV\nfilter-gt:Population:100000\ndisplay\n");
    let mut out = Vec::new();
    let summary = script::run(dataset.clone(), ops.path(), &mut out).unwrap();
    assert_eq!(summary.applied, 3);

    let out = String::from_utf8(out).unwrap();
    let listed: Vec<&str> = out
        .lines()
        .skip_while(|l| !l.starts_with("Displaying"))
        .skip(1)
        .collect();

    let expected: Vec<String> = dataset
        .iter()
        .filter(|r| {
            r.get("State") == Some("NV")
                && r.float("Population", 0).map(|p| p > 100000.0).unwrap_or(false)
        })
        .map(|r| r.to_string())
        .collect();
    assert_eq!(listed, expected);
    assert_eq!(listed.len(), 1);
}

#[test]
fn repeated_display_is_stable() {
    let dataset = load_file(&testdata("counties.csv")).unwrap();
    let ops = temp_file(".txt", "display\ndisplay\n");
    let mut out = Vec::new();
    script::run(dataset.clone(), ops.path(), &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    let (first, second) = lines.split_at(lines.len() / 2);
    assert_eq!(first, second);
    assert_eq!(first.len(), dataset.len() + 1);
}

#[test]
fn json_dataset_runs_the_same_script() {
    let data = temp_file(
        ".json",
        r#"[{"State": "A", "Population": 100}, {"State": "B", "Population": 200}]"#,
    );
    let ops = temp_file(".txt", "filter-lt:Population:150\npopulation-total\n");
    let (status, out) = run_app(data.path(), ops.path());
    assert_eq!(status, Status::Success);
    assert_eq!(
        out,
        "Loaded 2 entries from the dataset.\n\
         Filter: Population lt 150.0 (1 entries)\n\
         2014 population: 100\n"
    );
}

#[test]
fn missing_data_file_fails_before_the_script() {
    let ops = temp_file(".txt", "population-total\n");
    let (status, out) = run_app(Path::new("/no/such/demographics.csv"), ops.path());
    assert_eq!(status, Status::Failure);
    assert_eq!(
        out,
        "Error: Could not open data file '/no/such/demographics.csv'\n"
    );
}

#[test]
fn missing_script_fails_after_loading() {
    let (status, out) = run_app(&testdata("counties.csv"), Path::new("/no/such/ops.txt"));
    assert_eq!(status, Status::Failure);
    assert_eq!(
        out,
        "Loaded 6 entries from the dataset.\n\
         Error: Could not open operations file '/no/such/ops.txt'\n"
    );
}

#[test]
fn short_rows_list_absent_cells_as_none() {
    let data = temp_file(".csv", "State,Population,X\nA,100,10\nB,200\n");
    let ops = temp_file(".txt", "display\npopulation:X\n");
    let (status, out) = run_app(data.path(), ops.path());
    assert_eq!(status, Status::Success);
    assert_eq!(
        out,
        "Loaded 2 entries from the dataset.\n\
         Displaying county information:\n\
         {'State': 'A', 'Population': '100', 'X': '10'}\n\
         {'State': 'B', 'Population': '200', 'X': None}\n\
         Error: Malformed line 2 - population:X\n"
    );
}

#[test]
fn digit_group_underscores_are_numbers() {
    let data = temp_file(".csv", "State,Population\nA,1_000\nB,20\n");
    let ops = temp_file(".txt", "filter-gt:Population: 1_50\npopulation-total\n");
    let (_, out) = run_app(data.path(), ops.path());
    assert_eq!(
        out,
        "Loaded 2 entries from the dataset.\n\
         Filter: Population gt 150.0 (1 entries)\n\
         2014 population: 1000\n"
    );
}

#[test]
fn carriage_return_only_script() {
    let data = temp_file(".csv", "State,Population,X\nA,100,10\nB,200,20\n");
    let ops = temp_file(".txt", "population-total\rfilter-state:B\r\npopulation-total\r");
    let (_, out) = run_app(data.path(), ops.path());
    assert_eq!(
        out,
        "Loaded 2 entries from the dataset.\n\
         2014 population: 300\n\
         Filter: state == B (1 entries)\n\
         2014 population: 200\n"
    );
}
