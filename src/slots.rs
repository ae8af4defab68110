//! Rendering hooks of the autocomplete widget. Each slot only turns props
//! into terminal output; all state lives in the widget.

use crossterm::style::{Attribute, Attributes, Color, ContentStyle, StyledContent, Stylize};

use crate::term::{TermBox, TermPos};

pub struct InputProps<'a> {
    pub value: &'a str,
    pub caret: usize,
    pub active: bool,
    /// A menu entry is highlighted, so the text itself is not the focus.
    pub highlighting: bool,
    pub width: usize,
}

pub trait InputSlot {
    fn render(&self, props: &InputProps) -> StyledContent<String>;

    /// Column of the caret relative to the start of the rendered line.
    fn caret_column(&self, props: &InputProps) -> usize;
}

pub struct ListProps {
    pub len: usize,
    /// Cell where the completed token starts, on the input line.
    pub anchor: TermPos,
    pub window: TermBox,
}

pub trait ListSlot {
    /// Box the menu is drawn in, one entry per row.
    fn frame(&self, props: &ListProps) -> TermBox;
}

pub struct ListItemProps<'a> {
    pub item: &'a str,
    pub index: usize,
    pub highlighted: bool,
    pub width: usize,
}

pub trait ListItemSlot {
    fn render(&self, props: &ListItemProps) -> StyledContent<String>;
}

pub struct PromptInput {
    prompt: String,
}

impl PromptInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self{prompt: prompt.into()}
    }

    fn room(&self, props: &InputProps) -> usize {
        props.width.saturating_sub(self.prompt.chars().count()).max(1)
    }

    // Chars scrolled off the left so the caret stays visible.
    fn scroll(&self, props: &InputProps) -> usize {
        props.caret.saturating_sub(self.room(props) - 1)
    }
}

impl Default for PromptInput {
    fn default() -> Self {
        Self::new("> ")
    }
}

impl InputSlot for PromptInput {
    fn render(&self, props: &InputProps) -> StyledContent<String> {
        let visible: String = props.value.chars().skip(self.scroll(props)).take(self.room(props)).collect();
        let mut tmp = format!("{}{}", self.prompt, visible).bold();
        if props.active && !props.highlighting {
            tmp = tmp.reverse();
        }
        tmp
    }

    fn caret_column(&self, props: &InputProps) -> usize {
        self.prompt.chars().count() + props.caret - self.scroll(props)
    }
}

pub struct DropdownList {
    max_items: usize,
}

impl DropdownList {
    pub fn new(max_items: usize) -> Self {
        Self{max_items: max_items.max(1)}
    }
}

impl Default for DropdownList {
    fn default() -> Self {
        Self::new(8)
    }
}

impl ListSlot for DropdownList {
    fn frame(&self, props: &ListProps) -> TermBox {
        let ListProps{len, anchor, window} = *props;
        let wanted = len.min(self.max_items);
        let left = anchor.col.clamp(window.left, window.right);

        let room_below = window.bottom.saturating_sub(anchor.row + 1);
        let room_above = anchor.row.saturating_sub(window.top);
        if wanted <= room_below || room_below >= room_above {
            let top = anchor.row + 1;
            TermBox::new(left, window.right, top, top + wanted.min(room_below))
        } else {
            let rows = wanted.min(room_above);
            TermBox::new(left, window.right, anchor.row - rows, anchor.row)
        }
    }
}

pub struct MarkerListItem {
    style: ContentStyle,
    highlighted_style: ContentStyle,
}

fn bold_style(reverse: bool) -> ContentStyle {
    let mut attributes = Attributes::default();
    attributes.set(Attribute::Bold);
    if reverse {
        attributes.set(Attribute::Reverse);
    }
    ContentStyle{attributes, ..ContentStyle::default()}
}

impl MarkerListItem {
    pub fn new(style: ContentStyle, highlighted_style: ContentStyle) -> Self {
        Self{style, highlighted_style}
    }

    /// Highlights with a background colour instead of reversed video.
    pub fn with_highlight(color: Color) -> Self {
        let highlighted_style = ContentStyle{background_color: Some(color), ..bold_style(false)};
        Self::new(bold_style(false), highlighted_style)
    }
}

impl Default for MarkerListItem {
    fn default() -> Self {
        Self::new(bold_style(false), bold_style(true))
    }
}

impl ListItemSlot for MarkerListItem {
    fn render(&self, props: &ListItemProps) -> StyledContent<String> {
        let (text, style) = if props.highlighted {
            (format!(">{}<", props.item), self.highlighted_style)
        } else {
            (format!(" {} ", props.item), self.style)
        };
        style.apply(text.chars().take(props.width).collect())
    }
}
