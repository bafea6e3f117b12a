use crate::StringFilter;

/// Unescapes `&lt;`, `&gt;` and `&amp;`. Other entities are left untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlEntityFilter;

impl StringFilter for HtmlEntityFilter {
    fn filter(&self, string: &str) -> String {
        // `&amp;` must come last so that `&amp;lt;` becomes `&lt;`, not `<`.
        string
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        let filter = HtmlEntityFilter;
        assert_eq!("<3 & >_<", filter.filter("&lt;3 &amp; &gt;_&lt;"));
    }

    #[test]
    fn test_unescape_once() {
        let filter = HtmlEntityFilter;
        assert_eq!("&lt;", filter.filter("&amp;lt;"));
    }

    #[test]
    fn test_other_entities() {
        let filter = HtmlEntityFilter;
        assert_eq!("&quot;hi&quot; &#39;", filter.filter("&quot;hi&quot; &#39;"));
    }
}
