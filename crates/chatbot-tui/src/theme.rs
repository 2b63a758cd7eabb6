//! Colour tokens for the light and dark themes.
//!
//! Render code asks for a semantic [`Token`]; the palette picked by the
//! screen's dark flag decides the colour.

use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Background,
    HeaderBackground,
    Border,
    Title,
    Text,
    UserBubble,
    BotBubble,
    InputBackground,
    InputText,
    Placeholder,
    SendEnabled,
    SendDisabled,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    background: Color,
    header_background: Color,
    border: Color,
    title: Color,
    text: Color,
    user_bubble: Color,
    bot_bubble: Color,
    input_background: Color,
    input_text: Color,
    placeholder: Color,
    send_enabled: Color,
    send_disabled: Color,
    hint: Color,
    pub icon: &'static str,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(0xff, 0xff, 0xff),
    header_background: Color::Rgb(0xf7, 0xf7, 0xf7),
    border: Color::Rgb(0xcc, 0xcc, 0xcc),
    title: Color::Rgb(0x00, 0x00, 0x00),
    text: Color::Rgb(0x00, 0x00, 0x00),
    user_bubble: Color::Rgb(0x00, 0x7a, 0xff),
    bot_bubble: Color::Rgb(0xf0, 0xf0, 0xf0),
    input_background: Color::Rgb(0xf0, 0xf0, 0xf0),
    input_text: Color::Rgb(0x00, 0x00, 0x00),
    placeholder: Color::Rgb(0x88, 0x88, 0x88),
    send_enabled: Color::Rgb(0x00, 0x7a, 0xff),
    send_disabled: Color::Rgb(0xcc, 0xcc, 0xcc),
    hint: Color::Rgb(0x88, 0x88, 0x88),
    icon: "☾",
};

const DARK: Palette = Palette {
    background: Color::Rgb(0x00, 0x00, 0x00),
    header_background: Color::Rgb(0x00, 0x00, 0x00),
    border: Color::Rgb(0x44, 0x44, 0x44),
    title: Color::Rgb(0xff, 0xff, 0xff),
    text: Color::Rgb(0xff, 0xff, 0xff),
    user_bubble: Color::Rgb(0x44, 0x44, 0x44),
    bot_bubble: Color::Rgb(0x1a, 0x1a, 0x1a),
    input_background: Color::Rgb(0x33, 0x33, 0x33),
    input_text: Color::Rgb(0xff, 0xff, 0xff),
    placeholder: Color::Rgb(0xaa, 0xaa, 0xaa),
    send_enabled: Color::Rgb(0x00, 0x7a, 0xff),
    send_disabled: Color::Rgb(0x44, 0x44, 0x44),
    hint: Color::Rgb(0xaa, 0xaa, 0xaa),
    icon: "☀",
};

impl Palette {
    pub fn for_mode(dark: bool) -> &'static Palette {
        if dark {
            &DARK
        } else {
            &LIGHT
        }
    }

    pub fn color(&self, token: Token) -> Color {
        match token {
            Token::Background => self.background,
            Token::HeaderBackground => self.header_background,
            Token::Border => self.border,
            Token::Title => self.title,
            Token::Text => self.text,
            Token::UserBubble => self.user_bubble,
            Token::BotBubble => self.bot_bubble,
            Token::InputBackground => self.input_background,
            Token::InputText => self.input_text,
            Token::Placeholder => self.placeholder,
            Token::SendEnabled => self.send_enabled,
            Token::SendDisabled => self.send_disabled,
            Token::Hint => self.hint,
        }
    }

    /// `fg` text on a `bg` fill
    pub fn style(&self, fg: Token, bg: Token) -> Style {
        Style::default().fg(self.color(fg)).bg(self.color(bg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_only_by_mode() {
        assert_eq!(Palette::for_mode(false).color(Token::Background), Color::Rgb(0xff, 0xff, 0xff));
        assert_eq!(Palette::for_mode(true).color(Token::Background), Color::Rgb(0x00, 0x00, 0x00));
        assert_eq!(Palette::for_mode(true).color(Token::Text), Color::Rgb(0xff, 0xff, 0xff));
    }

    #[test]
    fn test_icon_shows_the_other_mode() {
        assert_eq!(Palette::for_mode(false).icon, "☾");
        assert_eq!(Palette::for_mode(true).icon, "☀");
    }

    #[test]
    fn test_style_combines_tokens() {
        let palette = Palette::for_mode(false);
        let style = palette.style(Token::Text, Token::BotBubble);
        assert_eq!(style.fg, Some(palette.color(Token::Text)));
        assert_eq!(style.bg, Some(palette.color(Token::BotBubble)));
    }
}
