use std::io::{stdout, Write};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TermPos {
    pub col: usize,
    pub row: usize,
}

impl TermPos {
    pub fn new(col: usize, row: usize) -> Self {
        Self{col, row}
    }

    pub fn goto(&self) -> crossterm::Result<()> {
        use crossterm::{queue, cursor};
        queue!(stdout(), cursor::MoveTo(to_u16(self.col), to_u16(self.row)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TermBox {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl TermBox {
    pub fn new(left: usize, right: usize, top: usize, bottom: usize) -> Self {
        Self{left, right: right.max(left), top, bottom: bottom.max(top)}
    }

    pub fn window() -> crossterm::Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(0, cols.into(), 0, rows.into()))
    }

    /// The `height` rows starting at `row`, clipped to this box.
    pub fn rows(&self, row: usize, height: usize) -> Self {
        let top = row.clamp(self.top, self.bottom);
        Self::new(self.left, self.right, top, top.saturating_add(height).min(self.bottom))
    }

    pub fn begin(&self) -> TermPos {
        TermPos::new(self.left, self.top)
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Esc,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Enter,
    Char(char),
}

/// Maps a terminal event to an `InputEvent`, dropping everything the widgets
/// do not react to (releases, mouse, resize, control chords).
pub fn translate(event: Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent{code, modifiers, kind, ..}) = event else {
        return None;
    };
    if kind == KeyEventKind::Release {
        return None;
    }

    match (modifiers, code) {
        (KeyModifiers::NONE, KeyCode::Esc) => Some(InputEvent::Esc),
        (KeyModifiers::NONE, KeyCode::Enter) => Some(InputEvent::Enter),
        (KeyModifiers::NONE, KeyCode::Up) => Some(InputEvent::Up),
        (KeyModifiers::NONE, KeyCode::Down) => Some(InputEvent::Down),
        (KeyModifiers::NONE, KeyCode::Left) => Some(InputEvent::Left),
        (KeyModifiers::NONE, KeyCode::Right) => Some(InputEvent::Right),
        (KeyModifiers::NONE, KeyCode::Home) => Some(InputEvent::Home),
        (KeyModifiers::NONE, KeyCode::End) => Some(InputEvent::End),
        (KeyModifiers::NONE, KeyCode::Backspace) => Some(InputEvent::Backspace),
        (KeyModifiers::NONE, KeyCode::Delete) => Some(InputEvent::Delete),
        (KeyModifiers::NONE, KeyCode::Tab) => Some(InputEvent::Tab),
        (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(InputEvent::BackTab),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Some(InputEvent::Char(c)),
        _ => None,
    }
}

pub fn get_event() -> crossterm::Result<InputEvent> {
    loop {
        if let Some(event) = translate(crossterm::event::read()?) {
            return Ok(event);
        }
    }
}

pub trait TermElement {
    fn display(&self, element_box: TermBox, active: bool) -> crossterm::Result<()>;

    fn popup(&self, element_box: TermBox, window_box: TermBox) -> crossterm::Result<()>;

    fn set_cursor(&self, element_box: TermBox, window_box: TermBox) -> crossterm::Result<()>;

    /// Handles `event`; events the element has no use for are handed back.
    fn input(&mut self, event: InputEvent) -> Option<InputEvent>;

    fn draw(&self) -> crossterm::Result<()> {
        use crossterm::{queue, terminal::{Clear, ClearType}};

        let window = TermBox::window()?;
        queue!(stdout(), Clear(ClearType::All))?;
        self.display(window, true)?;
        self.popup(window, window)?;
        self.set_cursor(window, window)?;
        stdout().flush()
    }

    /// Draws and feeds key events until one comes back unhandled.
    fn event_loop(&mut self) -> crossterm::Result<()> {
        loop {
            self.draw()?;
            if self.input(get_event()?).is_some() {
                return Ok(());
            }
        }
    }

    fn run(&mut self) -> crossterm::Result<()> {
        use crossterm::{
            terminal::{enable_raw_mode, disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
            execute,
            cursor,
        };

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;

        let result = self.event_loop();

        disable_raw_mode()?;
        execute!(stdout(), cursor::Show, cursor::SetCursorStyle::DefaultUserShape, LeaveAlternateScreen)?;

        result
    }
}
