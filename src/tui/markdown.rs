//! Markdown → ratatui `Text` renderer.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Headings, bold, italic, inline code, fenced
//! code blocks (with syntect highlighting), lists, blockquotes, and links.
//! Applied to bot messages only; user-authored text is never parsed as
//! markup.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::theme::Palette;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Parse markdown into styled `Text` using the active palette.
///
/// Returns owned text (`'static`) so callers aren't constrained by input
/// lifetime.
pub fn render(content: &str, base_fg: Color, palette: &Palette) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = MdWriter::new(base_fg, palette);
    for event in Parser::new_ext(content, opts) {
        writer.handle(event);
    }
    writer.finish()
}

struct MdWriter {
    done: Vec<Line<'static>>,
    /// Spans of the line currently being assembled.
    current: Vec<Span<'static>>,
    /// Inline style stack; entries compose via `patch` so nested
    /// bold+italic works.
    styles: Vec<Style>,
    /// Blockquote nesting; flush() prepends one `│ ` per level.
    quote_depth: usize,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    lists: Vec<Option<u64>>,
    /// Active highlighter inside a fenced code block.
    highlighter: Option<HighlightLines<'static>>,
    in_plain_code: bool,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    wants_gap: bool,
    base_fg: Color,
    dim: Color,
    accent: Color,
    code_theme: &'static str,
}

impl MdWriter {
    fn new(base_fg: Color, palette: &Palette) -> Self {
        // Fall back to the dark theme if the palette names an unknown one.
        let theme_name = if THEME_SET.themes.contains_key(palette.code_theme) {
            palette.code_theme
        } else {
            "base16-ocean.dark"
        };
        Self {
            done: Vec::new(),
            current: Vec::new(),
            styles: Vec::new(),
            quote_depth: 0,
            lists: Vec::new(),
            highlighter: None,
            in_plain_code: false,
            link_url: None,
            wants_gap: false,
            base_fg,
            dim: palette.dim,
            accent: palette.accent,
            code_theme: theme_name,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.done)
    }

    // ── Style helpers ───────────────────────────────────────────────────

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line assembly ───────────────────────────────────────────────────

    /// Close the current line, applying blockquote prefixes.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + self.quote_depth);
        for _ in 0..self.quote_depth {
            spans.push(Span::styled("│ ", Style::default().fg(self.dim)));
        }
        spans.append(&mut self.current);
        self.done.push(Line::from(spans));
    }

    fn span(&mut self, span: Span<'static>) {
        self.current.push(span);
    }

    fn gap_if_needed(&mut self) {
        self.flush();
        if self.wants_gap && !self.done.is_empty() {
            self.done.push(Line::default());
        }
        self.wants_gap = false;
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => {
                let style = Style::default().fg(Color::White).bg(Color::DarkGray);
                self.span(Span::styled(c.to_string(), style));
            }
            Event::SoftBreak => self.span(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.gap_if_needed();
                self.done.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(self.dim),
                )));
                self.wants_gap = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.span(Span::raw(marker));
            }
            _ => {} // HTML, footnotes, math: skip
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.gap_if_needed(),
            Tag::Heading { level, .. } => {
                self.gap_if_needed();
                let hs = self.heading_style(level);
                self.span(Span::styled(
                    format!("{} ", "#".repeat(heading_depth(level))),
                    hs,
                ));
                // Heading text inherits the heading style.
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.gap_if_needed();
                self.quote_depth += 1;
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                self.gap_if_needed();
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref().to_string(),
                    CodeBlockKind::Indented => String::new(),
                };

                let border = Style::default().fg(self.dim);
                let top = if lang.is_empty() {
                    Line::from(Span::styled("┌──", border))
                } else {
                    Line::from(vec![
                        Span::styled("┌── ", border),
                        Span::styled(lang.clone(), border.add_modifier(Modifier::BOLD)),
                    ])
                };
                self.done.push(top);

                if !lang.is_empty()
                    && let Some(syntax) = SYNTAX_SET.find_syntax_by_token(&lang)
                {
                    let theme = &THEME_SET.themes[self.code_theme];
                    self.highlighter = Some(HighlightLines::new(syntax, theme));
                }
                if self.highlighter.is_none() {
                    self.in_plain_code = true;
                }
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.gap_if_needed();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}- "),
                };
                self.span(Span::styled(marker, Style::default().fg(self.dim)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(self.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions: skip
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                self.wants_gap = true;
            }
            TagEnd::Heading(_) => {
                self.pop_style();
                self.flush();
                self.wants_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth -= 1;
                self.pop_style();
                self.wants_gap = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_plain_code = false;
                self.flush();
                self.done
                    .push(Line::from(Span::styled("└──", Style::default().fg(self.dim))));
                self.wants_gap = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                self.wants_gap = true;
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.span(Span::raw(" ("));
                    self.span(Span::styled(
                        url,
                        Style::default()
                            .fg(self.accent)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // Expand tabs → 4 spaces (ratatui renders \t as zero-width)
        let text = cow.replace('\t', "    ");

        // Take the highlighter out to avoid a double mutable borrow.
        if let Some(mut hl) = self.highlighter.take() {
            for line in LinesWithEndings::from(&text) {
                if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(hl_style, fragment)| {
                            let content = fragment.trim_end_matches('\n');
                            if content.is_empty() {
                                return None;
                            }
                            let fg = Color::Rgb(
                                hl_style.foreground.r,
                                hl_style.foreground.g,
                                hl_style.foreground.b,
                            );
                            Some(Span::styled(
                                content.to_owned(),
                                Style::default().fg(fg),
                            ))
                        })
                        .collect();
                    if !spans.is_empty() {
                        let mut line_spans =
                            vec![Span::styled("│ ", Style::default().fg(self.dim))];
                        line_spans.extend(spans);
                        self.done.push(Line::from(line_spans));
                    }
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        if self.in_plain_code {
            for line in text.lines() {
                self.done.push(Line::from(vec![
                    Span::styled("│ ", Style::default().fg(self.dim)),
                    Span::styled(line.to_owned(), Style::default().fg(self.base_fg)),
                ]));
            }
            return;
        }

        let style = self.style();
        self.span(Span::styled(text, style));
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        let base = Style::default().fg(self.base_fg);
        match level {
            HeadingLevel::H1 => base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            HeadingLevel::H2 => base.add_modifier(Modifier::BOLD),
            _ => base.add_modifier(Modifier::BOLD | Modifier::ITALIC),
        }
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Theme;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    fn rendered_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green, &palette());
        let span = &text.lines[0].spans[0];
        assert_eq!(span.style.fg, Some(Color::Green));
    }

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = render("## Hello", Color::Blue, &palette());
        let line = &text.lines[0];
        assert!(line.spans.len() >= 2, "expected >= 2 spans, got {:?}", line);
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[1].style.fg, Some(Color::Blue));
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render("Some **bold** text", Color::Blue, &palette());
        let bold_span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "bold")
            .unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = render("Use `foo()` here", Color::Blue, &palette());
        let code_span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "foo()")
            .unwrap();
        assert_eq!(code_span.style.fg, Some(Color::White));
        assert_eq!(code_span.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn code_block_has_border_structure() {
        let text = render("```\nline1\nline2\n```", Color::Blue, &palette());
        let lines = rendered_lines(&text);
        assert!(lines[0].starts_with('┌'), "expected top border, got {:?}", lines[0]);
        assert!(lines[1].starts_with("│ "), "expected │ prefix, got {:?}", lines[1]);
        assert!(lines[1].contains("line1"));
        assert!(lines[2].contains("line2"));
        let last = lines.last().unwrap();
        assert!(last.starts_with('└'), "expected bottom border, got {:?}", last);
    }

    #[test]
    fn unordered_list_uses_dash_markers() {
        let text = render("- one\n- two", Color::Blue, &palette());
        let lines = rendered_lines(&text);
        assert!(lines.iter().any(|l| l.starts_with("- ") && l.contains("one")));
        assert!(lines.iter().any(|l| l.starts_with("- ") && l.contains("two")));
    }

    #[test]
    fn ordered_list_counts_upwards() {
        let text = render("1. first\n2. second", Color::Blue, &palette());
        let lines = rendered_lines(&text);
        assert!(lines.iter().any(|l| l.starts_with("1. ")));
        assert!(lines.iter().any(|l| l.starts_with("2. ")));
    }

    #[test]
    fn blockquote_lines_carry_prefix() {
        let text = render("> quoted words", Color::Blue, &palette());
        let lines = rendered_lines(&text);
        assert!(
            lines.iter().any(|l| l.starts_with("│ ") && l.contains("quoted")),
            "got {:?}",
            lines
        );
    }

    #[test]
    fn link_url_appended_after_text() {
        let text = render("[docs](https://example.com)", Color::Blue, &palette());
        let joined = rendered_lines(&text).join("\n");
        assert!(joined.contains("docs"));
        assert!(joined.contains("https://example.com"));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue, &palette());
        let has_tabs = text
            .lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.content.contains('\t')));
        assert!(!has_tabs, "no raw tabs should remain");
    }
}
