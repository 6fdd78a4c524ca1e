//! URL 校验 - 业务能力层
//!
//! 在任何网络请求之前判断候选 URL 是否为维基百科文章地址。
//! 非文章命名空间（如 `Talk:`、`Special:`）不做额外排除。

use url::Url;

const WIKIPEDIA_HOST: &str = "wikipedia.org";
const ARTICLE_PATH_SEGMENT: &str = "/wiki/";
const SCHEME_PREFIXES: [&str; 2] = ["http://", "https://"];

/// 判断 URL 是否可以交给抽取器
///
/// 要求：绝对 URL，以小写 `http://` 或 `https://` 开头（不做去空白），
/// 主机包含 `wikipedia.org`，路径包含 `/wiki/`。
pub fn is_valid(url: &str) -> bool {
    if !SCHEME_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
        || url.ends_with(char::is_whitespace)
    {
        return false;
    }

    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let host_ok = parsed
        .host_str()
        .is_some_and(|host| host.to_ascii_lowercase().contains(WIKIPEDIA_HOST));

    host_ok && parsed.path().contains(ARTICLE_PATH_SEGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_article_urls() {
        assert!(is_valid("https://en.wikipedia.org/wiki/Rust_(programming_language)"));
        assert!(is_valid("http://de.wikipedia.org/wiki/Berlin"));
        assert!(is_valid("https://en.m.wikipedia.org/wiki/Alan_Turing#Early_life"));
    }

    #[test]
    fn test_non_article_namespaces_are_not_excluded() {
        assert!(is_valid("https://en.wikipedia.org/wiki/Talk:Alan_Turing"));
        assert!(is_valid("https://en.wikipedia.org/wiki/Special:Random"));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(!is_valid("en.wikipedia.org/wiki/Berlin"));
        assert!(!is_valid("//en.wikipedia.org/wiki/Berlin"));
    }

    #[test]
    fn test_rejects_wrong_scheme() {
        assert!(!is_valid("ftp://en.wikipedia.org/wiki/Berlin"));
    }

    #[test]
    fn test_scheme_must_be_literal_prefix() {
        assert!(!is_valid("  https://en.wikipedia.org/wiki/Berlin"));
        assert!(!is_valid("\thttp://en.wikipedia.org/wiki/Berlin"));
        assert!(!is_valid("HTTPS://en.wikipedia.org/wiki/Berlin"));
        assert!(!is_valid("Http://en.wikipedia.org/wiki/Berlin"));
        assert!(!is_valid("https://en.wikipedia.org/wiki/Berlin\n"));
    }

    #[test]
    fn test_rejects_wrong_host() {
        assert!(!is_valid("https://en.wikibooks.org/wiki/Rust"));
        assert!(!is_valid("https://example.com/wiki/Rust"));
        assert!(!is_valid("https://example.com/?next=wikipedia.org/wiki/Rust"));
    }

    #[test]
    fn test_rejects_missing_wiki_segment() {
        assert!(!is_valid("https://en.wikipedia.org/w/index.php?title=Berlin"));
        assert!(!is_valid("https://en.wikipedia.org/"));
    }

    #[test]
    fn test_never_panics_on_garbage() {
        for input in ["", "   ", "http://", "https://[::1", "\u{0}", "wikipedia.org/wiki/"] {
            assert!(!is_valid(input));
        }
    }
}
