use crate::parsers::collapse_whitespace;
use scraper::{Html, Selector};

/// Finds the option in the creation form's owner select whose visible label
/// equals `email`, ignoring case, and returns its submit value.
///
/// Markup assumption: the form carries a
/// `select[name="candidate[current_owner_id]"]` listing users by their
/// email address. No matching option means the record gets created unowned.
pub fn owner_option_value(html: &str, email: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let options =
        Selector::parse(r#"select[name="candidate[current_owner_id]"] option"#).unwrap();
    let wanted = email.trim().to_lowercase();

    document.select(&options).find_map(|option| {
        let label = collapse_whitespace(&option.text().collect::<String>());
        if label.to_lowercase() != wanted {
            return None;
        }
        option
            .value()
            .attr("value")
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Pulls a human-readable validation message out of a rejected form
/// re-render: the first container whose class attribute mentions `error` or
/// `alert`, markup stripped and whitespace collapsed.
pub fn error_message(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let flagged = Selector::parse(r#"[class*="error"], [class*="alert"]"#).unwrap();

    document.select(&flagged).find_map(|el| {
        let text = collapse_whitespace(&el.text().collect::<String>());
        (!text.is_empty()).then_some(text)
    })
}
