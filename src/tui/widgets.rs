use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::Row;
use crate::color::Color as AppColor;

const SWATCH: &str = "      ";
const NAME_WIDTH: usize = 28;

pub fn to_color(c: &AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Black text on light swatches, white on dark ones.
pub fn contrast_fg(c: &AppColor) -> Color {
    if c.relative_luminance() > 0.4 {
        Color::Black
    } else {
        Color::White
    }
}

/// The results table: swatch, name, hex, RGB and HSL, plus the distance
/// column while a search is active.
pub struct ResultsWidget<'a> {
    rows: &'a [Row<'a>],
    caption: &'a str,
    scroll: usize,
}

impl<'a> ResultsWidget<'a> {
    pub fn new(rows: &'a [Row<'a>], caption: &'a str, scroll: usize) -> Self {
        Self {
            rows,
            caption,
            scroll,
        }
    }
}

fn header_line(with_distance: bool) -> Line<'static> {
    let mut text = format!(
        "  {SWATCH} {:<NAME_WIDTH$} {:<8} {:<14} {:<15}",
        "Name", "Hex", "RGB", "HSL"
    );
    if with_distance {
        text.push_str(" Distance");
    }
    Line::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn row_line(row: &Row<'_>) -> Line<'static> {
    let entry = row.entry;
    let mut name = entry.name.clone();
    if name.chars().count() > NAME_WIDTH {
        name = name.chars().take(NAME_WIDTH - 1).collect::<String>() + "…";
    }

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(SWATCH, Style::default().bg(to_color(&entry.rgb))),
        Span::raw(format!(
            " {:<NAME_WIDTH$} {:<8} {:<14} {:<15}",
            name,
            entry.hex,
            entry.rgb.to_rgb_string(),
            entry.hsl.to_string(),
        )),
    ];
    if let Some(distance) = row.similarity {
        spans.push(Span::styled(
            format!(" {distance:>8.2}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let with_distance = self.rows.iter().any(|r| r.similarity.is_some());
        let mut lines = vec![
            Line::styled(
                format!("  {}", self.caption),
                Style::default().fg(Color::Gray),
            ),
            header_line(with_distance),
        ];

        let visible = (area.height as usize).saturating_sub(lines.len());
        lines.extend(
            self.rows
                .iter()
                .skip(self.scroll)
                .take(visible)
                .map(row_line),
        );

        if self.rows.is_empty() {
            lines.push(Line::styled(
                "  No colours.",
                Style::default().fg(Color::DarkGray),
            ));
        }

        Paragraph::new(lines).render(area, buf);
    }
}

/// A bordered message box, used for loading, validation and fetch failures.
pub struct BannerWidget<'a> {
    title: &'a str,
    lines: Vec<String>,
    style: Style,
}

impl<'a> BannerWidget<'a> {
    pub fn info(title: &'a str, lines: Vec<String>) -> Self {
        Self {
            title,
            lines,
            style: Style::default().fg(Color::Gray),
        }
    }

    pub fn error(title: &'a str, lines: Vec<String>) -> Self {
        Self {
            title,
            lines,
            style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Widget for BannerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title.to_string())
            .border_style(self.style);
        let lines: Vec<Line> = self
            .lines
            .into_iter()
            .map(|l| Line::styled(l, self.style))
            .collect();
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Key hints along the bottom edge.
pub struct KeyHintsWidget<'a> {
    bindings: &'a [(&'a str, &'a str)],
}

impl<'a> KeyHintsWidget<'a> {
    pub fn new(bindings: &'a [(&'a str, &'a str)]) -> Self {
        Self { bindings }
    }
}

impl Widget for KeyHintsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, (key, description)) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(60, 60, 60))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {description}"),
                Style::default().fg(Color::Gray),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::RawColor;
    use crate::catalog::Palette;

    fn buffer_text(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn palette() -> Palette {
        Palette::from_raw(&[
            RawColor {
                color: "red".into(),
                hex: "#ff0000".into(),
            },
            RawColor {
                color: "pale yellow".into(),
                hex: "#ffff84".into(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn contrast_fg_picks_readable_text() {
        assert_eq!(contrast_fg(&AppColor::new(255, 255, 255)), Color::Black);
        assert_eq!(contrast_fg(&AppColor::new(0, 0, 80)), Color::White);
    }

    #[test]
    fn renders_rows_with_all_representations() {
        let palette = palette();
        let rows: Vec<Row> = palette
            .entries()
            .iter()
            .map(|entry| Row {
                entry,
                similarity: None,
            })
            .collect();

        let area = Rect::new(0, 0, 90, 5);
        let mut buf = Buffer::empty(area);
        ResultsWidget::new(&rows, "All colours.", 0).render(area, &mut buf);
        let text = buffer_text(&buf);

        assert!(text[0].contains("All colours."));
        assert!(text[1].contains("Name") && text[1].contains("HSL"));
        assert!(!text[1].contains("Distance"));
        assert!(text[2].contains("red"));
        assert!(text[2].contains("#ff0000"));
        assert!(text[2].contains("255, 0, 0"));
        assert!(text[2].contains("0, 100%, 50%"));
        assert!(text[3].contains("pale yellow"));

        // Swatch cell carries the entry color.
        assert_eq!(buf[(2, 2)].bg, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn renders_distance_when_searching() {
        let palette = palette();
        let rows = [Row {
            entry: &palette.entries()[0],
            similarity: Some(1.0),
        }];
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        ResultsWidget::new(&rows, "Searched for ' #fe0000 '", 0).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text[1].contains("Distance"));
        assert!(text[2].contains("1.00"));
    }

    #[test]
    fn scroll_skips_leading_rows() {
        let palette = palette();
        let rows: Vec<Row> = palette
            .entries()
            .iter()
            .map(|entry| Row {
                entry,
                similarity: None,
            })
            .collect();
        let area = Rect::new(0, 0, 90, 3);
        let mut buf = Buffer::empty(area);
        ResultsWidget::new(&rows, "All colours.", 1).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text[2].contains("pale yellow"));
    }

    #[test]
    fn banner_shows_title_and_message() {
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        BannerWidget::error("Error", vec!["Invalid color.".into()]).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text[0].contains("Error"));
        assert!(text[1].contains("Invalid color."));
    }
}
