// tests/search_test.rs

use talentis_core::parsers::search::find_matching_row;

const LISTING: &str = r#"<html><body>
  <table>
    <tr><th>Name</th><th>Profile</th><th></th></tr>
    <tr>
      <td><a href="/candidates/11">Someone Else</a></td>
      <td><a href="https://linkedin.com/in/someone-else-55555">profile</a></td>
    </tr>
    <tr>
      <td><a href="/candidates/42">Kaidi Cao</a></td>
      <td><a href="https://www.linkedin.com/in/Kaidi-Cao-398131117/">profile</a></td>
    </tr>
  </table>
</body></html>"#;

#[test]
fn test_matching_row_returns_detail_path() {
    let path = find_matching_row(LISTING, "http://linkedin.com/in/kaidi-cao-398131117");
    assert_eq!(path, Some("/candidates/42".to_string()));
}

#[test]
fn test_first_matching_row_wins() {
    let listing = r#"<table>
      <tr><th>Name</th></tr>
      <tr><td><a href="/candidates/1">A</a> <a href="https://linkedin.com/in/dup-99999">p</a></td></tr>
      <tr><td><a href="/candidates/2">B</a> <a href="https://linkedin.com/in/dup-99999">p</a></td></tr>
    </table>"#;
    assert_eq!(
        find_matching_row(listing, "https://linkedin.com/in/dup-99999"),
        Some("/candidates/1".to_string())
    );
}

#[test]
fn test_no_matching_row() {
    assert_eq!(
        find_matching_row(LISTING, "https://linkedin.com/in/nobody-home-00000"),
        None
    );
}

#[test]
fn test_matching_row_without_detail_link() {
    let listing = r#"<table>
      <tr><th>Name</th></tr>
      <tr><td><a href="https://linkedin.com/in/kaidi-cao-398131117">profile</a></td></tr>
    </table>"#;
    assert_eq!(
        find_matching_row(listing, "https://linkedin.com/in/kaidi-cao-398131117"),
        None
    );
}

#[test]
fn test_no_table_at_all() {
    assert_eq!(
        find_matching_row("<html><body><p>No results</p></body></html>", "https://linkedin.com/in/x-12345"),
        None
    );
}
