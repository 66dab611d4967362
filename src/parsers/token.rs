use scraper::{Html, Selector};

/// Extracts the anti-forgery token the CRM embeds in every page.
///
/// Two shapes are recognized, in order: the `<meta name="csrf-token">` tag
/// in the document head, then a hidden `<input name="authenticity_token">`
/// inside a form. Attribute order within the tag does not matter, and
/// entity-encoded token bytes (named or numeric) arrive decoded from the
/// tree parser.
///
/// Returns `None` when neither shape is present; callers decide whether
/// that is fatal for their flow.
pub fn extract_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let meta = Selector::parse(r#"meta[name="csrf-token"]"#).unwrap();
    if let Some(content) = document
        .select(&meta)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
    {
        return Some(content.to_string());
    }

    let hidden = Selector::parse(r#"input[name="authenticity_token"]"#).unwrap();
    document
        .select(&hidden)
        .next()
        .and_then(|el| el.value().attr("value"))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
