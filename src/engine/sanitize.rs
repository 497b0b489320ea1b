//! Markup removal.
//!
//! The output still contains character references; see `entities.rs`.
//!
//! Steps run in a fixed order:
//!
//! 1. `<script>` blocks   ─▶ " "
//! 2. `<style>` blocks    ─▶ " "
//! 3. comments            ─▶ " "
//! 4. `<wbr>` hints       ─▶ ""   (they sit *inside* passwords)
//! 5. any remaining tag   ─▶ " "  (between content, safe as a word break)
//!
//! Blocks go before comments: a script body may well contain `<!--` as
//! string data, and it must not open a comment that eats the page.
//!
//! An unclosed comment, script or style block runs to the end of the input so
//! its body never reaches the scans. A `<` with no closing `>` is left alone.

use tracing::trace;

pub fn sanitize(html: &str) -> String {
    let text = regex!(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)").replace_all(html, " ");
    let text = regex!(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|\z)").replace_all(&text, " ");
    let text = regex!(r"(?s)<!--.*?(?:-->|\z)").replace_all(&text, " ");
    let text = regex!(r"(?i)<wbr\b[^>]*>").replace_all(&text, "");
    let text = regex!(r"<[^>]+>").replace_all(&text, " ");

    trace!(target: "passgrab", input = html.len(), output = text.len(), "sanitized");
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_and_style_bodies_are_dropped() {
        let html = "a<SCRIPT type=\"x\">var k = 'DEADBEEF';\n</Script>b<style>\np { x: y }\n</style >c";
        assert_eq!(sanitize(html), "a b c");
    }

    #[test]
    fn non_greedy_blocks_keep_content_between_them() {
        let html = "<script>1</script>keep<script>2</script>";
        assert_eq!(sanitize(html), " keep ");
    }

    #[test]
    fn wbr_is_deleted_without_a_gap() {
        assert_eq!(sanitize("AB<wbr>CD<wbr/>EF<WBR />GH<wbr >IJ"), "ABCDEFGHIJ");
    }

    #[test]
    fn wbr_with_attributes_is_deleted_too() {
        assert_eq!(sanitize("AB<wbr class=\"x\">CD<WBR id=1/>EF"), "ABCDEF");
        assert_eq!(sanitize("<wbrx>"), " ");
    }

    #[test]
    fn comment_opener_inside_script_is_script_data() {
        let html = "<script>document.write(\"<!--\");</script><p>keep</p><!-- gone -->end";
        assert_eq!(sanitize(html), "  keep  end");
    }

    #[test]
    fn other_tags_become_word_breaks() {
        assert_eq!(sanitize("<td><font face=\"courier\">X</font></td>"), "  X  ");
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(sanitize("a<!-- <b>hidden</b> -->b"), "a b");
    }

    #[test]
    fn unclosed_script_swallows_the_rest() {
        assert_eq!(sanitize("ok<script>leak leak"), "ok ");
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        assert_eq!(sanitize("x < y and <div"), "x < y and <div");
        assert_eq!(sanitize(""), "");
    }
}
