use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};
use chatbot_core::ChatMessage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use crate::app::App;
use crate::theme::{Palette, Token};

const PLACEHOLDER: &str = "Type your message...";

/// Split a word into pieces no wider than `width` columns. A single char
/// wider than `width` still gets a piece of its own.
fn chop_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;

    for c in word.chars() {
        let char_width = c.width().unwrap_or(0);
        if piece_width + char_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(c);
        piece_width += char_width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Wrap text to fit within `width` terminal columns, returning multiple lines.
/// Breaks on word boundaries, keeps explicit newlines and splits words that
/// are wider than the whole line.
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let mut pieces = if word.width() > width {
                chop_word(word, width)
            } else {
                vec![word.to_string()]
            };
            let Some(word) = pieces.pop() else {
                continue;
            };

            // Every piece but the last fills a line on its own
            for piece in pieces {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }
                lines.push(piece);
            }

            let word_width = word.width();
            if current_width == 0 {
                current_line = word;
                current_width = word_width;
            } else if current_width + 1 + word_width <= width {
                current_line.push(' ');
                current_line.push_str(&word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut current_line, word));
                current_width = word_width;
            }
        }

        lines.push(current_line);
    }

    lines
}

/// One message rendered as a padded block of lines, aligned to its side.
fn bubble_lines(text: &str, max_text_width: usize, style: Style, alignment: Alignment) -> Vec<Line<'static>> {
    let wrapped = wrap_text_to_width(text, max_text_width);
    let width = wrapped.iter().map(|line| line.width()).max().unwrap_or(0);

    wrapped
        .into_iter()
        .map(|line| {
            let pad = " ".repeat(width - line.width());
            Line::from(Span::styled(format!(" {}{} ", line, pad), style)).alignment(alignment)
        })
        .collect()
}

/// Visible slice of the draft and the cursor column inside it. Text scrolls
/// off the left so the cursor cell stays within `width` columns.
fn visible_input(draft: &str, cursor: usize, width: usize) -> (String, u16) {
    let chars: Vec<char> = draft.chars().collect();
    let cursor = cursor.min(chars.len());
    let columns = |c: &char| c.width().unwrap_or(0);

    let mut start = 0;
    let mut before_cursor: usize = chars[..cursor].iter().map(columns).sum();
    while start < cursor && before_cursor + 1 > width {
        before_cursor -= columns(&chars[start]);
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for c in &chars[start..] {
        let char_width = columns(c);
        if used + char_width > width {
            break;
        }
        visible.push(*c);
        used += char_width;
    }

    (visible, u16::try_from(before_cursor).unwrap_or(u16::MAX))
}

fn message_lines(app: &App, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    // Bubbles take at most 80% of the row, minus one column of padding each side
    let max_text_width = (width * 4 / 5).saturating_sub(2).max(1);
    let mut lines = Vec::new();

    for message in app.chat.messages() {
        lines.extend(render_message(message, palette, max_text_width));
        lines.push(Line::default());
    }

    if app.chat.is_loading() {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat(app.animation_frame as usize + 1);
        lines.extend(bubble_lines(
            &format!("{:<3}", dots),
            max_text_width,
            palette.style(Token::Text, Token::BotBubble),
            Alignment::Left,
        ));
    }

    lines
}

fn render_message(message: &ChatMessage, palette: &Palette, max_text_width: usize) -> Vec<Line<'static>> {
    let (bubble, alignment) = if message.is_user() {
        (Token::UserBubble, Alignment::Right)
    } else {
        (Token::BotBubble, Alignment::Left)
    };
    bubble_lines(&message.text, max_text_width, palette.style(Token::Text, bubble), alignment)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let palette = Palette::for_mode(app.chat.is_dark());
    let area = frame.area();

    frame.render_widget(
        Block::default().style(palette.style(Token::Text, Token::Background)),
        area,
    );

    // Main layout: header, messages, input, footer
    let [header_area, messages_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, palette, frame, header_area);
    render_messages(app, palette, frame, messages_area);
    render_input(app, palette, frame, input_area);
    render_footer(palette, frame, footer_area);
}

fn render_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.style(Token::Border, Token::HeaderBackground))
        .style(palette.style(Token::Title, Token::HeaderBackground));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, toggle_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(12),
    ])
    .areas(inner);

    let title = Line::from(vec![
        Span::styled(" AI BOT ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(app.model.clone(), Style::default().fg(palette.color(Token::Hint))),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    let toggle = Line::from(format!("{} Ctrl+T ", palette.icon)).alignment(Alignment::Right);
    frame.render_widget(Paragraph::new(toggle), toggle_area);
}

fn render_messages(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default().padding(Padding::horizontal(1));
    let inner = block.inner(area);

    let lines = message_lines(app, palette, inner.width as usize);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    app.chat_height = inner.height;
    app.max_scroll = total.saturating_sub(inner.height);

    // Follow the end of the conversation whenever it changes
    if app.take_content_changed() {
        app.scroll_to_bottom();
    } else {
        app.scroll = app.scroll.min(app.max_scroll);
    }

    let messages = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll, 0));

    frame.render_widget(messages, area);
}

fn render_input(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [field_area, send_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(10),
    ])
    .areas(area);

    let loading = app.chat.is_loading();
    let field_block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.style(Token::Border, Token::Background))
        .style(palette.style(Token::InputText, Token::InputBackground));

    let inner_width = field_area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = visible_input(app.chat.draft(), app.chat.cursor(), inner_width);

    let field = if app.chat.draft().is_empty() {
        Paragraph::new(Span::styled(PLACEHOLDER, Style::default().fg(palette.color(Token::Placeholder))))
    } else {
        Paragraph::new(visible_text)
    };
    frame.render_widget(field.block(field_block), field_area);

    let send_fill = if app.chat.can_send() { Token::SendEnabled } else { Token::SendDisabled };
    let send_label = if loading { "..." } else { "Send" };
    let send = Paragraph::new(send_label)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.style(Token::Border, Token::Background)),
        )
        .style(palette.style(Token::Text, send_fill));
    frame.render_widget(send, send_area);

    // The input is disabled while a reply is pending
    if !loading {
        frame.set_cursor_position((field_area.x + cursor_x + 1, field_area.y + 1));
    }
}

fn render_footer(palette: &Palette, frame: &mut Frame, area: Rect) {
    let key_style = palette.style(Token::Title, Token::Background).add_modifier(Modifier::BOLD);
    let label_style = palette.style(Token::Hint, Token::Background);

    let hints = [("Enter", "send"), ("Ctrl+T", "theme"), ("PgUp/PgDn", "scroll"), ("Esc", "quit")];
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {}", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
