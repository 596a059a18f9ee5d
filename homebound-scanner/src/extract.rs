use scraper::{Html, Selector};

/// Raw `href` values of every anchor in `html`, in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_in_document_order() {
        let html = r##"<html><body>
            <a href="http://a.edu/b">B</a>
            <p><a class="x" href="/c">C</a></p>
            <a name="anchor-only">no href</a>
            <a href="#top">Top</a>
        </body></html>"##;
        assert_eq!(extract_links(html), vec!["http://a.edu/b", "/c", "#top"]);
    }

    #[test]
    fn test_links_are_not_normalized() {
        let html = r#"<a href="people.html#staff">Staff</a><a href="mailto:x@a.edu">Mail</a>"#;
        assert_eq!(
            extract_links(html),
            vec!["people.html#staff", "mailto:x@a.edu"]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(extract_links("plain text, not markup").is_empty());
        assert!(extract_links("").is_empty());
    }
}
