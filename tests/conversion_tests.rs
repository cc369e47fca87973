use indoc::indoc;
use isbn_range_message::{
    Config, Error, RangeTable, convert, convert_in_directory, read_rows,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EXPECTED_SAMPLE_CSV: &str = indoc! {"
    978,0,00,19
    978,0,200,227
    978,0,2280,2289
    978,3,00,02
    978,3,030,033
    978,3,200,699
    979,10,00,19
"};

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("RangeMessage.xml")
}

fn write_message(dir: &TempDir, groups: &str) -> PathBuf {
    let path = dir.path().join("RangeMessage.xml");
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ISBNRangeMessage>\n<RegistrationGroups>\n{}\n</RegistrationGroups>\n</ISBNRangeMessage>\n",
        groups
    );
    fs::write(&path, xml).unwrap();
    path
}

#[test]
fn test_convert_sample_message() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("RangeMessage.csv");

    let count = convert(sample_path(), &output).unwrap();

    assert_eq!(count, 7);
    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED_SAMPLE_CSV);
}

#[test]
fn test_single_rule_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_message(
        &temp_dir,
        "<Group><Prefix>978-0</Prefix><Rules><Rule><Length>2</Length><Range>00-19</Range></Rule></Rules></Group>",
    );
    let output = temp_dir.path().join("out.csv");

    convert(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "978,0,00,19\n");
}

#[test]
fn test_zero_length_rule_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_message(
        &temp_dir,
        indoc! {"
            <Group>
              <Prefix>978-1</Prefix>
              <Rules>
                <Rule><Length>0</Length><Range>0000000-0999999</Range></Rule>
                <Rule><Length>1</Length><Range>5-599</Range></Rule>
                <Rule><Length></Length><Range>6000000-6999999</Range></Rule>
              </Rules>
            </Group>
        "},
    );
    let output = temp_dir.path().join("out.csv");

    assert_eq!(convert(&input, &output).unwrap(), 1);
    assert_eq!(fs::read_to_string(&output).unwrap(), "978,1,5,5\n");
}

#[test]
fn test_empty_registration_groups_creates_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_message(&temp_dir, "");
    let output = temp_dir.path().join("out.csv");

    assert_eq!(convert(&input, &output).unwrap(), 0);
    assert!(output.exists());
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_conversion_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.csv");

    convert(sample_path(), &output).unwrap();
    let first = fs::read(&output).unwrap();
    convert(sample_path(), &output).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_existing_output_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_message(&temp_dir, "");
    let output = temp_dir.path().join("out.csv");
    fs::write(&output, "stale,rows,from,before\n").unwrap();

    convert(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_malformed_xml_leaves_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("RangeMessage.xml");
    fs::write(&input, "<ISBNRangeMessage><RegistrationGroups></Group>").unwrap();
    let output = temp_dir.path().join("out.csv");

    let result = convert(&input, &output);

    assert!(matches!(result, Err(Error::XmlParse(_))));
    assert!(!output.exists());
}

#[test]
fn test_malformed_range_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_message(
        &temp_dir,
        indoc! {"
            <Group>
              <Prefix>978-0</Prefix>
              <Rules>
                <Rule><Length>2</Length><Range>00-19</Range></Rule>
                <Rule><Length>3</Length><Range>2000000</Range></Rule>
              </Rules>
            </Group>
        "},
    );
    let output = temp_dir.path().join("out.csv");

    let error = convert(&input, &output).unwrap_err();

    assert!(matches!(error, Error::MalformedField { field: "Range", .. }));
    assert!(!output.exists());
}

#[test]
fn test_missing_prefix_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_message(
        &temp_dir,
        "<Group><Rules><Rule><Length>2</Length><Range>00-19</Range></Rule></Rules></Group>",
    );

    let error = read_rows(&input).unwrap_err();

    assert_eq!(error.to_string(), "missing <Prefix> in group #1");
}

#[test]
fn test_convert_in_directory_uses_fixed_names() {
    let temp_dir = TempDir::new().unwrap();
    fs::copy(sample_path(), temp_dir.path().join("RangeMessage.xml")).unwrap();
    let config = Config::new(temp_dir.path());

    assert_eq!(convert_in_directory(&config).unwrap(), 7);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("RangeMessage.csv")).unwrap(),
        EXPECTED_SAMPLE_CSV
    );
}

#[test]
fn test_generated_table_hyphenates() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("RangeMessage.csv");
    convert(sample_path(), &output).unwrap();

    let table = RangeTable::read_from(&output).unwrap();

    assert_eq!(table.len(), 7);
    assert_eq!(
        table.hyphenate("9783551752130").unwrap().as_deref(),
        Some("978-3-551-75213-0")
    );
    assert_eq!(
        table.hyphenate("9780192132475").unwrap().as_deref(),
        Some("978-0-19-213247-5")
    );
}
