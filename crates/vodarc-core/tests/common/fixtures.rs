//! Helix JSON builders shared by the integration tests.

/// One `/videos` item.
pub fn video(id: &str, title: &str, created_at: &str, category: Option<&str>) -> String {
    let category = match category {
        Some(c) => format!(r#","game_name":"{}""#, c),
        None => String::new(),
    };
    format!(
        r#"{{"id":"{id}","title":"{title}","created_at":"{created_at}","url":"https://www.twitch.tv/videos/{id}"{category}}}"#
    )
}

/// A `/videos` page body; `cursor` is the continuation for the next page.
pub fn page(items: &[String], cursor: Option<&str>) -> String {
    let pagination = match cursor {
        Some(c) => format!(r#"{{"cursor":"{}"}}"#, c),
        None => "{}".to_string(),
    };
    format!(r#"{{"data":[{}],"pagination":{}}}"#, items.join(","), pagination)
}
