use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{html, Options, Parser};

/// Renders Markdown to HTML and strips anything unsafe from the result.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_html(&raw_html)
}

pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

/// Escapes text for use inside HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    ammonia::clean_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_is_rendered_and_scripts_removed() {
        let html = safe_markdown_to_html("**Suncore** <script>alert(1)</script>");
        assert!(html.contains("<strong>Suncore</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn links_get_a_safe_rel() {
        let html = safe_markdown_to_html("[repo](https://github.com/Dimeji-G/suncore)");
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""));
    }

    #[test]
    fn escaping_neutralises_markup() {
        let escaped = escape_html("<b>\"x\"</b>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('"'));
    }

    #[test]
    fn plain_words_pass_through_unchanged() {
        assert_eq!(escape_html("Suncore"), "Suncore");
        assert_eq!(escape_html("OneTimeLink"), "OneTimeLink");
    }
}
