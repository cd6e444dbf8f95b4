//! Tests for the structural parser.
//!
//! Each case parses a small document and compares an indented outline of
//! the resulting tree. Every parse is also run through the tree invariants.


use md2html_syntax::{lex, lex_lines};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{Parser, Structure, StructureKind, parse};

fn parse_str(md: &str) -> Vec<Structure> {
    let structures = parse(lex_lines(md)).expect("parse failed");
    invariants::check(&structures);
    structures
}

fn outline(structures: &[Structure]) -> String {
    let mut out = String::new();
    for s in structures {
        write_node(&mut out, s, 0);
    }
    out
}

fn write_node(out: &mut String, s: &Structure, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&s.kind.to_string());
    if let Some(text) = s.as_text() {
        out.push_str(&format!(" {text:?}"));
    }
    if let Some(link) = &s.link {
        out.push_str(&format!(" -> {:?}", link.address));
        if let Some(title) = &link.title {
            out.push_str(&format!(" title {title:?}"));
        }
    }
    out.push('\n');
    for child in s.children() {
        write_node(out, child, depth + 1);
    }
}

fn assert_outline(md: &str, expected: &[&str]) {
    let mut expected = expected.join("\n");
    expected.push('\n');
    assert_eq!(outline(&parse_str(md)), expected);
}

// Paragraphs and line handling

#[test]
fn single_line_paragraph() {
    assert_outline("Hello world.", &["PARAGRAPH", "  TEXT \"Hello world.\""]);
}

#[test]
fn blank_line_splits_paragraphs() {
    assert_outline(
        "first line\nsecond line\n\nthird line",
        &[
            "PARAGRAPH",
            "  TEXT \"first line second line\"",
            "PARAGRAPH",
            "  TEXT \"third line\"",
        ],
    );
}

#[test]
fn continuation_indent_is_not_kept() {
    assert_outline("a\n   b", &["PARAGRAPH", "  TEXT \"a b\""]);
}

#[test]
fn two_trailing_spaces_force_line_break() {
    assert_outline(
        "a  \nb",
        &["PARAGRAPH", "  TEXT \"a\"", "  LINE_BREAK", "  TEXT \"b\""],
    );
}

#[test]
fn one_trailing_space_is_kept() {
    assert_outline("a \nb", &["PARAGRAPH", "  TEXT \"a b\""]);
}

#[test]
fn indent_after_trailing_space_is_dropped() {
    assert_outline("a \n  b", &["PARAGRAPH", "  TEXT \"a b\""]);
}

#[test]
fn indent_after_line_break_is_dropped() {
    assert_outline(
        "a  \n   b",
        &["PARAGRAPH", "  TEXT \"a\"", "  LINE_BREAK", "  TEXT \"b\""],
    );
}

// Emphasis

#[test]
fn matched_emphasis() {
    assert_outline(
        "Some *text* here",
        &[
            "PARAGRAPH",
            "  TEXT \"Some \"",
            "  EMPHASIS",
            "    TEXT \"text\"",
            "  TEXT \" here\"",
        ],
    );
}

#[test]
fn delimiter_followed_by_space_stays_text() {
    assert_outline("Some * text here", &["PARAGRAPH", "  TEXT \"Some * text here\""]);
}

#[test]
fn strong_with_underscores() {
    assert_outline(
        "__bold__ and *em*",
        &[
            "PARAGRAPH",
            "  STRONG",
            "    TEXT \"bold\"",
            "  TEXT \" and \"",
            "  EMPHASIS",
            "    TEXT \"em\"",
        ],
    );
}

#[test]
fn different_delimiters_do_not_close() {
    assert_outline(
        "*a_ b*",
        &["PARAGRAPH", "  EMPHASIS", "    TEXT \"a_ b\""],
    );
}

#[test]
fn emphasis_spans_lines() {
    assert_outline(
        "*one\ntwo*",
        &["PARAGRAPH", "  EMPHASIS", "    TEXT \"one two\""],
    );
}

#[test]
fn triple_run_is_literal() {
    assert_outline("***a", &["PARAGRAPH", "  TEXT \"***a\""]);
}

// Escapes

#[rstest]
#[case("\\\\")]
#[case("\\`")]
#[case("\\*")]
#[case("\\_")]
#[case("\\{")]
#[case("\\}")]
#[case("\\[")]
#[case("\\]")]
#[case("\\(")]
#[case("\\)")]
#[case("\\#")]
#[case("\\+")]
#[case("\\-")]
#[case("\\.")]
#[case("\\!")]
fn escaped_punctuation_is_literal(#[case] escape: &str) {
    let expected = format!("  TEXT {:?}", format!("x{}y", &escape[1..]));
    assert_outline(&format!("x{escape}y"), &["PARAGRAPH", &expected]);
}

#[test]
fn backslash_before_plain_text_is_kept() {
    assert_outline("a\\b", &["PARAGRAPH", "  TEXT \"a\\\\b\""]);
}

#[test]
fn trailing_backslash_is_kept() {
    assert_outline("a\\", &["PARAGRAPH", "  TEXT \"a\\\\\""]);
}

#[test]
fn escape_only_takes_first_character_of_run() {
    assert_outline(
        "\\**a*",
        &["PARAGRAPH", "  TEXT \"*\"", "  EMPHASIS", "    TEXT \"a\""],
    );
}

// Links

#[test]
fn link_extraction() {
    assert_outline(
        "Visit [this link](http://example.com) now.",
        &[
            "PARAGRAPH",
            "  TEXT \"Visit \"",
            "  LINK -> \"http://example.com\"",
            "    TEXT \"this link\"",
            "  TEXT \" now.\"",
        ],
    );
}

#[test]
fn unterminated_link_is_literal() {
    assert_outline("[text](addr", &["PARAGRAPH", "  TEXT \"[text](addr\""]);
}

#[test]
fn brackets_without_address_are_literal() {
    assert_outline("[text] (addr)", &["PARAGRAPH", "  TEXT \"[text] (addr)\""]);
}

#[test]
fn link_with_title() {
    assert_outline(
        "[home](/ \"Start page\")",
        &[
            "PARAGRAPH",
            "  LINK -> \"/\" title \"Start page\"",
            "    TEXT \"home\"",
        ],
    );
}

#[test]
fn image_drops_bang() {
    assert_outline(
        "See ![a cat](cat.png)",
        &[
            "PARAGRAPH",
            "  TEXT \"See \"",
            "  IMAGE -> \"cat.png\"",
            "    TEXT \"a cat\"",
        ],
    );
}

#[test]
fn escaped_bang_is_not_image() {
    assert_outline(
        "\\![a](b)",
        &["PARAGRAPH", "  TEXT \"!\"", "  LINK -> \"b\"", "    TEXT \"a\""],
    );
}

#[test]
fn link_text_joins_lines() {
    assert_outline(
        "[two\nlines](x)",
        &["PARAGRAPH", "  LINK -> \"x\"", "    TEXT \"two lines\""],
    );
}

// Inline code

#[test]
fn code_span_is_raw() {
    assert_outline(
        "a `b *c*` d",
        &[
            "PARAGRAPH",
            "  TEXT \"a \"",
            "  CODE",
            "    TEXT \"b *c*\"",
            "  TEXT \" d\"",
        ],
    );
}

#[test]
fn code_span_closes_only_on_equal_run() {
    assert_outline(
        "``a ` b`` c",
        &["PARAGRAPH", "  CODE", "    TEXT \"a ` b\"", "  TEXT \" c\""],
    );
}

#[test]
fn code_span_keeps_continuation_indent() {
    assert_outline("`a\n  b`", &["PARAGRAPH", "  CODE", "    TEXT \"a   b\""]);
}

#[test]
fn unclosed_code_span_closes_with_paragraph() {
    assert_outline("`open", &["PARAGRAPH", "  CODE", "    TEXT \"open\""]);
}

// Headings and rules

#[rstest]
#[case("# One", 1)]
#[case("### Three ###", 3)]
#[case("###### Six", 6)]
fn atx_headings(#[case] md: &str, #[case] level: u8) {
    let structures = parse_str(md);
    assert_eq!(structures.len(), 1);
    assert_eq!(structures[0].kind, StructureKind::Heading(level));
}

#[test]
fn heading_content_is_inline_parsed() {
    assert_outline(
        "## A *b* ##",
        &[
            "HEADING_2",
            "  TEXT \"A \"",
            "  EMPHASIS",
            "    TEXT \"b\"",
        ],
    );
}

#[test]
fn seven_hashes_are_text() {
    assert_outline("####### x", &["PARAGRAPH", "  TEXT \"####### x\""]);
}

#[test]
fn heading_ends_at_line_end() {
    assert_outline(
        "# Title\nbody",
        &["HEADING_1", "  TEXT \"Title\"", "PARAGRAPH", "  TEXT \"body\""],
    );
}

#[rstest]
#[case("Title\n===", "HEADING_1")]
#[case("Title\n--", "HEADING_2")]
fn setext_headings(#[case] md: &str, #[case] kind: &str) {
    assert_outline(md, &[kind, "  TEXT \"Title\""]);
}

#[test]
fn setext_underline_without_paragraph_is_text() {
    assert_outline("===", &["PARAGRAPH", "  TEXT \"===\""]);
}

#[test]
fn rule_closes_paragraph() {
    assert_outline(
        "text\n---\nmore",
        &[
            "PARAGRAPH",
            "  TEXT \"text\"",
            "HR",
            "PARAGRAPH",
            "  TEXT \"more\"",
        ],
    );
}

#[rstest]
#[case("***")]
#[case("- - -")]
#[case("___")]
fn standalone_rules(#[case] md: &str) {
    assert_outline(md, &["HR"]);
}

// Blockquotes and code blocks

#[test]
fn blockquote_lines_join() {
    assert_outline("> a\n> b", &["BLOCKQUOTE", "  TEXT \"a b\""]);
}

#[test]
fn blockquote_lazy_continuation() {
    assert_outline("> a\nb", &["BLOCKQUOTE", "  TEXT \"a b\""]);
}

#[test]
fn nested_blockquote() {
    assert_outline(
        "> a\n> > b",
        &[
            "BLOCKQUOTE",
            "  TEXT \"a\"",
            "  BLOCKQUOTE",
            "    TEXT \"b\"",
        ],
    );
}

#[test]
fn blank_line_ends_blockquote() {
    assert_outline(
        "> a\n\nb",
        &["BLOCKQUOTE", "  TEXT \"a\"", "PARAGRAPH", "  TEXT \"b\""],
    );
}

#[test]
fn indented_code_block_keeps_extra_indent() {
    assert_outline(
        "    fn main() {}\n        x",
        &["CODEBLOCK", "  TEXT \"fn main() {}\\n    x\\n\""],
    );
}

#[test]
fn code_block_is_raw() {
    assert_outline("    *a* ---", &["CODEBLOCK", "  TEXT \"*a* ---\\n\""]);
}

#[test]
fn unindented_line_ends_code_block() {
    assert_outline(
        "    code\ntext",
        &["CODEBLOCK", "  TEXT \"code\\n\"", "PARAGRAPH", "  TEXT \"text\""],
    );
}

// Lists

#[test]
fn unordered_list_items() {
    assert_outline(
        "- a\n+ b\n* c",
        &[
            "UNORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"a\"",
            "  LIST_ITEM",
            "    TEXT \"b\"",
            "  LIST_ITEM",
            "    TEXT \"c\"",
        ],
    );
}

#[test]
fn nested_list_closes_correctly() {
    assert_outline(
        "1. one\n  - inner\n2. two",
        &[
            "ORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"one\"",
            "    UNORDERED_LIST",
            "      LIST_ITEM",
            "        TEXT \"inner\"",
            "  LIST_ITEM",
            "    TEXT \"two\"",
        ],
    );
}

#[test]
fn nested_list_takes_further_items() {
    assert_outline(
        "- a\n  - b\n  - c",
        &[
            "UNORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"a\"",
            "    UNORDERED_LIST",
            "      LIST_ITEM",
            "        TEXT \"b\"",
            "      LIST_ITEM",
            "        TEXT \"c\"",
        ],
    );
}

#[test]
fn list_item_lazy_continuation() {
    assert_outline(
        "- a\nb",
        &["UNORDERED_LIST", "  LIST_ITEM", "    TEXT \"a b\""],
    );
}

#[test]
fn code_block_in_list_item() {
    assert_outline(
        "- a\n      code",
        &[
            "UNORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"a\"",
            "    CODEBLOCK",
            "      TEXT \"code\\n\"",
        ],
    );
}

#[test]
fn item_after_code_block_is_a_sibling() {
    assert_outline(
        "- a\n      code\n- b",
        &[
            "UNORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"a\"",
            "    CODEBLOCK",
            "      TEXT \"code\\n\"",
            "  LIST_ITEM",
            "    TEXT \"b\"",
        ],
    );
}

#[test]
fn items_keep_coming_after_code_block() {
    assert_outline(
        "1. a\n      x\n2. b\n3. c",
        &[
            "ORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"a\"",
            "    CODEBLOCK",
            "      TEXT \"x\\n\"",
            "  LIST_ITEM",
            "    TEXT \"b\"",
            "  LIST_ITEM",
            "    TEXT \"c\"",
        ],
    );
}

#[test]
fn item_blockquote_does_not_leak_into_next_item() {
    assert_outline(
        "- a\n  > q\n- > b",
        &[
            "UNORDERED_LIST",
            "  LIST_ITEM",
            "    TEXT \"a\"",
            "    BLOCKQUOTE",
            "      TEXT \"q\"",
            "  LIST_ITEM",
            "    BLOCKQUOTE",
            "      TEXT \"b\"",
        ],
    );
}

#[test]
fn list_inside_blockquote() {
    assert_outline(
        "> - a\n> - b",
        &[
            "BLOCKQUOTE",
            "  UNORDERED_LIST",
            "    LIST_ITEM",
            "      TEXT \"a\"",
            "    LIST_ITEM",
            "      TEXT \"b\"",
        ],
    );
}

#[test]
fn ordered_list_keeps_first_number() {
    let structures = parse_str("3. a\n4. b");
    assert_eq!(structures[0].kind, StructureKind::OrderedList);
    assert_eq!(structures[0].metadata[0].text, "3");
}

// HTML blocks

#[test]
fn html_block_is_verbatim() {
    assert_outline(
        "<div>\n*not em*\n\nafter",
        &[
            "HTML",
            "  TEXT \"<div>\\n*not em*\\n\"",
            "PARAGRAPH",
            "  TEXT \"after\"",
        ],
    );
}

// Cleanup

#[rstest]
#[case("plain")]
#[case("> - 1. deep\n>   - deeper")]
#[case("*open **strong `code")]
#[case("    code\n\n<div>")]
#[case("[dangling](link")]
#[case("1. a\n      x\n2. b\n3. c")]
#[case("# heading\n> quote\n- item")]
fn no_scope_survives_end_of_document(#[case] md: &str) {
    let mut parser = Parser::new();
    for line in lex_lines(md) {
        parser.parse_line(line).unwrap();
    }
    parser.close_document().unwrap();
    assert_eq!(parser.scope_hierarchy(), vec![]);
}

#[test]
fn parse_line_accepts_single_lexed_line() {
    let mut parser = Parser::new();
    parser.parse_line(lex("- item")).unwrap();
    assert_eq!(parser.scope_hierarchy().len(), 1);
}
