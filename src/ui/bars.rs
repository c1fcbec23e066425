//! Projects a bar sequence onto a terminal rect: one column per bar, cell
//! height proportional to the bar's height units against the fixed
//! 200-unit scale, value labels underneath when there is room.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::session::{Bar, HEIGHT_UNITS};
use crate::theme::Theme;

/// Rows a bar occupies when the group has `rows` rows available:
/// `ceil(height / 200 * rows)`, clamped so oversized `place` values stay
/// inside the group.
fn bar_rows(height: i64, rows: u16) -> u16 {
    if height <= 0 || rows == 0 {
        return 0;
    }
    let rows = rows as i64;
    let cells = (height * rows + HEIGHT_UNITS - 1) / HEIGHT_UNITS;
    cells.clamp(1, rows) as u16
}

pub fn draw_bar_group(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    title_spans: Vec<Span<'_>>,
    bars: &[Bar],
    border_color: Color,
) {
    let block = Block::default()
        .title(Line::from(title_spans))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if bars.is_empty() {
        let empty = Paragraph::new("No array to display")
            .style(Style::default().fg(theme.text_dim));
        f.render_widget(empty, inner);
        return;
    }
    if inner.height < 2 || inner.width < bars.len() as u16 {
        return;
    }

    // label row at the bottom, bar field above it
    let rows = inner.height - 1;
    let n = bars.len() as u16;

    let mut bar_width = (inner.width / n).saturating_sub(1).clamp(1, 4);
    let mut gap = 1u16;
    if (bar_width + gap) * n > inner.width + gap {
        bar_width = 1;
        gap = if 2 * n <= inner.width + 1 { 1 } else { 0 };
    }

    let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(bars.len() * 2);
        for (i, bar) in bars.iter().enumerate() {
            let filled = bar_rows(bar.height, rows) >= rows - row;
            let cell = if filled {
                Span::styled(
                    "█".repeat(bar_width as usize),
                    Style::default().fg(theme.bar_color(bar.highlight)),
                )
            } else {
                Span::raw(" ".repeat(bar_width as usize))
            };
            spans.push(cell);
            if gap > 0 && i + 1 < bars.len() {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    // value labels, truncated to the column width
    let mut labels = Vec::with_capacity(bars.len() * 2);
    for (i, bar) in bars.iter().enumerate() {
        let cell = bar_width as usize;
        let mut label = bar.value.to_string();
        label.truncate(cell);
        labels.push(Span::styled(
            format!("{:^1$}", label, cell),
            Style::default().fg(theme.text_dim),
        ));
        if gap > 0 && i + 1 < bars.len() {
            labels.push(Span::raw(" "));
        }
    }
    lines.push(Line::from(labels));

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_rows_scaling() {
        // full-height bar fills every row
        assert_eq!(bar_rows(200, 10), 10);
        // half-height bar fills half, rounded up
        assert_eq!(bar_rows(100, 10), 5);
        assert_eq!(bar_rows(101, 10), 6);
        // any positive height shows at least one cell
        assert_eq!(bar_rows(1, 10), 1);
        assert_eq!(bar_rows(0, 10), 0);
        // oversized place values clamp to the group
        assert_eq!(bar_rows(400, 10), 10);
    }

    #[test]
    fn test_bar_rows_monotonic() {
        let rows = 12;
        let mut prev = 0;
        for height in 0..=HEIGHT_UNITS {
            let cells = bar_rows(height, rows);
            assert!(cells >= prev);
            prev = cells;
        }
    }
}
