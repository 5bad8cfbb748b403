use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub focus: FocusStyle,
    pub list: ListStyle,
    pub divider: DividerStyle,
    pub modal: ModalStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
            focus: FocusStyle::default(),
            list: ListStyle::default(),
            divider: DividerStyle::default(),
            modal: ModalStyle::default(),
        }
    }
}

impl Theme {
    /// Built-in theme by name, for `--theme`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" | "dark" => Some(Self::default()),
            "vibrant" => Some(Self::vibrant()),
            _ => None,
        }
    }

    pub fn vibrant() -> Self {
        Self {
            name: "vibrant".to_string(),
            colors: ThemeColors {
                foreground: HexColor::new("#e0e0e0"),
                accent: HexColor::new("#ffe66d"),
                error: HexColor::new("#ff6b6b"),
                muted: HexColor::new("#6c757d"),
            },
            focus: FocusStyle {
                focused_border: HexColor::new("#ff6b6b"),
                unfocused_border: HexColor::new("#3d3d4d"),
                focused_title: HexColor::new("#ffe66d"),
                unfocused_title: HexColor::new("#6c757d"),
                use_bold_focused: true,
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub foreground: HexColor,
    pub accent: HexColor,
    pub error: HexColor,
    pub muted: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            foreground: HexColor::new("#c0caf5"),
            accent: HexColor::new("#bb9af7"),
            error: HexColor::new("#f7768e"),
            muted: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusStyle {
    pub focused_border: HexColor,
    pub unfocused_border: HexColor,
    pub focused_title: HexColor,
    pub unfocused_title: HexColor,
    pub use_bold_focused: bool,
}

impl Default for FocusStyle {
    fn default() -> Self {
        Self {
            focused_border: HexColor::new("#7aa2f7"),
            unfocused_border: HexColor::new("#3b4261"),
            focused_title: HexColor::new("#bb9af7"),
            unfocused_title: HexColor::new("#565f89"),
            use_bold_focused: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListStyle {
    pub item_fg: HexColor,
    pub dir_fg: HexColor,
    pub selected_fg: HexColor,
    pub selected_bg: HexColor,
    pub hover_bg: HexColor,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            item_fg: HexColor::new("#c0caf5"),
            dir_fg: HexColor::new("#7dcfff"),
            selected_fg: HexColor::new("#1a1b26"),
            selected_bg: HexColor::new("#7aa2f7"),
            hover_bg: HexColor::new("#292e42"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerStyle {
    pub idle: HexColor,
    pub hover: HexColor,
    pub active: HexColor,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            idle: HexColor::new("#3b4261"),
            hover: HexColor::new("#7aa2f7"),
            active: HexColor::new("#bb9af7"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalStyle {
    pub border: HexColor,
    pub button_fg: HexColor,
    pub button_hover_fg: HexColor,
    pub button_hover_bg: HexColor,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            border: HexColor::new("#e0af68"),
            button_fg: HexColor::new("#c0caf5"),
            button_hover_fg: HexColor::new("#1a1b26"),
            button_hover_bg: HexColor::new("#e0af68"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn to_color(&self) -> Color {
        self.parse_hex().unwrap_or(Color::Reset)
    }

    fn parse_hex(&self) -> Option<Color> {
        let hex = self.0.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_border.to_color()
        } else {
            self.focus.unfocused_border.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn title_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_title.to_color()
        } else {
            self.focus.unfocused_title.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn item_style(&self, is_dir: bool, selected: bool, hovered: bool) -> Style {
        if selected {
            return Style::default()
                .fg(self.list.selected_fg.to_color())
                .bg(self.list.selected_bg.to_color())
                .add_modifier(Modifier::BOLD);
        }

        let fg = if is_dir {
            self.list.dir_fg.to_color()
        } else {
            self.list.item_fg.to_color()
        };
        let style = Style::default().fg(fg);
        if hovered {
            style.bg(self.list.hover_bg.to_color())
        } else {
            style
        }
    }

    pub fn divider_style(&self, hovered: bool, dragging: bool) -> Style {
        let color = if dragging {
            self.divider.active.to_color()
        } else if hovered {
            self.divider.hover.to_color()
        } else {
            self.divider.idle.to_color()
        };
        Style::default().fg(color)
    }

    pub fn button_style(&self, hovered: bool) -> Style {
        if hovered {
            Style::default()
                .fg(self.modal.button_hover_fg.to_color())
                .bg(self.modal.button_hover_bg.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.modal.button_fg.to_color())
        }
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.colors.muted.to_color())
    }
}
