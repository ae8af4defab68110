use std::io::stdout;

use crate::combobox::Combobox;
use crate::completion::{self, Autocompletions, Splice};
use crate::slots::{
    DropdownList, InputProps, InputSlot, ListItemProps, ListItemSlot, ListProps, ListSlot,
    MarkerListItem, PromptInput,
};
use crate::term::{InputEvent, TermBox, TermElement, TermPos};

/// Single-line text input whose trigger symbols open a completion menu.
///
/// The suggestions are never stored: they are recomputed from the value, the
/// caret and the trigger table every time they are needed. Pressing space
/// hides them until the next key.
pub struct Autocomplete {
    table: Autocompletions,
    on_submit: Box<dyn FnMut(String)>,
    value: String,
    caret: usize,
    dismissed: bool,
    combobox: Combobox,
    input: Box<dyn InputSlot>,
    list: Box<dyn ListSlot>,
    list_item: Box<dyn ListItemSlot>,
}

impl Autocomplete {
    pub fn new(table: Autocompletions, on_submit: impl FnMut(String) + 'static) -> Self {
        Self {
            table,
            on_submit: Box::new(on_submit),
            value: String::new(),
            caret: 0,
            dismissed: false,
            combobox: Combobox::new(),
            input: Box::new(PromptInput::default()),
            list: Box::new(DropdownList::default()),
            list_item: Box::new(MarkerListItem::default()),
        }
    }

    pub fn with_input(mut self, input: impl InputSlot + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_list(mut self, list: impl ListSlot + 'static) -> Self {
        self.list = Box::new(list);
        self
    }

    pub fn with_list_item(mut self, list_item: impl ListItemSlot + 'static) -> Self {
        self.list_item = Box::new(list_item);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn suggestions(&self) -> Vec<String> {
        if self.dismissed {
            return Vec::new();
        }
        completion::suggestions(&self.table, &self.value, self.caret)
    }

    /// Whether the menu is showing.
    pub fn is_open(&self) -> bool {
        self.combobox.is_open() && !self.suggestions().is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.combobox.highlighted_in(self.suggestions().len())
    }

    /// Replaces the whole value, as a change event from the input would.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.caret = self.caret.min(self.value.chars().count());
        self.changed();
    }

    pub fn set_caret(&mut self, caret: usize) {
        let caret = caret.min(self.value.chars().count());
        if caret != self.caret {
            self.caret = caret;
            self.combobox.reset_highlight();
        }
    }

    /// Key-down hook, run before `event` touches the value.
    pub fn key_down(&mut self, event: &InputEvent) {
        self.dismissed = *event == InputEvent::Char(' ');
        if self.dismissed {
            self.combobox.close();
        }
    }

    /// Splices `item` in at the caret and leaves the caret right after it.
    pub fn select(&mut self, item: &str) {
        let Splice{value, caret} = completion::splice(&self.table, &self.value, self.caret, item);
        log::debug!("selected {item:?}: {:?} -> {value:?}", self.value);
        self.value = value;
        self.caret = caret;
        self.combobox.close();
    }

    /// Hands the current value to the submit callback and clears the input.
    pub fn submit(&mut self) {
        let value = std::mem::take(&mut self.value);
        self.caret = 0;
        self.combobox.close();
        log::debug!("submitting {value:?}");
        (self.on_submit)(value);
    }

    fn changed(&mut self) {
        self.combobox.open();
        self.combobox.reset_highlight();
    }

    fn insert(&mut self, c: char) {
        let at = completion::byte_offset(&self.value, self.caret);
        self.value.insert(at, c);
        self.caret += 1;
        self.changed();
    }

    fn backspace(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
            let at = completion::byte_offset(&self.value, self.caret);
            self.value.remove(at);
            self.changed();
        }
    }

    fn delete(&mut self) {
        if self.caret < self.value.chars().count() {
            let at = completion::byte_offset(&self.value, self.caret);
            self.value.remove(at);
            self.changed();
        }
    }

    fn enter(&mut self) {
        let items = self.suggestions();
        match self.combobox.accept(&items) {
            Some(item) => self.select(item),
            None => self.submit(),
        }
    }

    fn input_props(&self, element_box: TermBox, active: bool) -> InputProps<'_> {
        InputProps {
            value: &self.value,
            caret: self.caret,
            active,
            highlighting: self.highlighted().is_some(),
            width: element_box.width(),
        }
    }

    // Screen cell where the token being completed starts.
    fn anchor(&self, element_box: TermBox) -> TermPos {
        let start = completion::current_word_start(&self.value, self.caret);
        let props = self.input_props(element_box, true);
        let column = self.input.caret_column(&props).saturating_sub(self.caret.saturating_sub(start));
        TermPos::new(element_box.left + column, element_box.top)
    }
}

impl TermElement for Autocomplete {
    fn display(&self, element_box: TermBox, active: bool) -> crossterm::Result<()> {
        use crossterm::{queue, style::PrintStyledContent};

        element_box.begin().goto()?;
        let line = self.input.render(&self.input_props(element_box, active));
        queue!(stdout(), PrintStyledContent(line))
    }

    fn popup(&self, element_box: TermBox, window_box: TermBox) -> crossterm::Result<()> {
        use crossterm::{queue, style::PrintStyledContent};

        let items = self.suggestions();
        if !self.combobox.is_open() || items.is_empty() {
            return Ok(());
        }

        let frame = self.list.frame(&ListProps {
            len: items.len(),
            anchor: self.anchor(element_box),
            window: window_box,
        });
        if frame.height() == 0 {
            return Ok(());
        }

        let highlighted = self.combobox.highlighted_in(items.len());
        let first = highlighted.map_or(0, |n| n.saturating_sub(frame.height() - 1));
        for (row, (index, item)) in (frame.top..frame.bottom).zip(items.iter().enumerate().skip(first)) {
            let line = self.list_item.render(&ListItemProps {
                item,
                index,
                highlighted: highlighted == Some(index),
                width: frame.width(),
            });
            TermPos::new(frame.left, row).goto()?;
            queue!(stdout(), PrintStyledContent(line))?;
        }

        Ok(())
    }

    fn set_cursor(&self, element_box: TermBox, _window_box: TermBox) -> crossterm::Result<()> {
        use crossterm::{queue, cursor};

        let column = self.input.caret_column(&self.input_props(element_box, true));
        TermPos::new(element_box.left + column, element_box.top).goto()?;
        queue!(stdout(), cursor::Show)?;
        if self.highlighted().is_none() {
            queue!(stdout(), cursor::SetCursorStyle::BlinkingBar)
        } else {
            queue!(stdout(), cursor::SetCursorStyle::SteadyBar)
        }
    }

    fn input(&mut self, event: InputEvent) -> Option<InputEvent> {
        use InputEvent::*;

        self.key_down(&event);

        match event {
            Char(c) => self.insert(c),
            Backspace => self.backspace(),
            Delete => self.delete(),
            Left => self.set_caret(self.caret.saturating_sub(1)),
            Right => self.set_caret(self.caret + 1),
            Home => self.set_caret(0),
            End => self.set_caret(usize::MAX),
            Down => {
                let len = self.suggestions().len();
                self.combobox.next(len);
            },
            Up => {
                let len = self.suggestions().len();
                self.combobox.prev(len);
            },
            Enter => self.enter(),
            Esc if self.is_open() => self.combobox.close(),
            other => return Some(other),
        }

        None
    }
}
