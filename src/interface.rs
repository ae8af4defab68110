use std::cell::RefCell;
use std::fmt;
use std::io::stdout;
use std::rc::Rc;

use chrono::{Local, NaiveTime};

use crate::autocomplete::Autocomplete;
use crate::config::Config;
use crate::term::{InputEvent, TermBox, TermElement, TermPos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: NaiveTime,
    pub text: String,
}

impl Entry {
    pub fn now(text: String) -> Self {
        Self{time: Local::now().time(), text}
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time.format("%H:%M:%S"), self.text)
    }
}

/// One autocomplete line with the lines submitted so far, newest first.
pub struct Journal {
    widget: Autocomplete,
    entries: Rc<RefCell<Vec<Entry>>>,
    header: String,
}

impl Journal {
    pub fn new(config: &Config) -> Self {
        let entries = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&entries);
        let widget = config.autocomplete(move |text| sink.borrow_mut().push(Entry::now(text)));

        let triggers: Vec<String> = config.autocompletions.triggers().map(String::from).collect();
        let header = if triggers.is_empty() {
            "Press ESC to quit. No triggers configured.".to_string()
        } else {
            format!("Press ESC to quit. Triggers: {}", triggers.join(" "))
        };

        Self{widget, entries, header}
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries.take()
    }

    fn input_box(element_box: TermBox) -> TermBox {
        element_box.rows(element_box.top + 2, 1)
    }
}

impl TermElement for Journal {
    fn display(&self, element_box: TermBox, active: bool) -> crossterm::Result<()> {
        use crossterm::{queue, style::{Print, PrintStyledContent, Stylize}};

        element_box.begin().goto()?;
        let header: String = self.header.chars().take(element_box.width()).collect();
        queue!(stdout(), PrintStyledContent(header.bold()))?;

        self.widget.display(Self::input_box(element_box), active)?;

        let history = element_box.rows(element_box.top + 4, usize::MAX);
        let entries = self.entries.borrow();
        for (row, entry) in (history.top..history.bottom).zip(entries.iter().rev()) {
            TermPos::new(history.left, row).goto()?;
            let line: String = entry.to_string().chars().take(history.width()).collect();
            queue!(stdout(), Print(line))?;
        }

        Ok(())
    }

    fn popup(&self, element_box: TermBox, window_box: TermBox) -> crossterm::Result<()> {
        self.widget.popup(Self::input_box(element_box), window_box)
    }

    fn set_cursor(&self, element_box: TermBox, window_box: TermBox) -> crossterm::Result<()> {
        self.widget.set_cursor(Self::input_box(element_box), window_box)
    }

    fn input(&mut self, event: InputEvent) -> Option<InputEvent> {
        match self.widget.input(event) {
            Some(InputEvent::Esc) => Some(InputEvent::Esc),
            _ => None,
        }
    }
}

pub fn app(config: &Config) -> crossterm::Result<Vec<Entry>> {
    let mut journal = Journal::new(config);
    journal.run()?;
    let entries = journal.into_entries();
    log::info!("{} line(s) submitted", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Autocompletions;

    fn config() -> Config {
        Config {
            autocompletions: Autocompletions::new().with('@', ["Walmart"]).with('#', ["Grosseries"]),
            ..Config::default()
        }
    }

    fn feed(journal: &mut Journal, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            assert_eq!(journal.input(event), None);
        }
    }

    #[test]
    fn header_lists_the_triggers() {
        assert_eq!(Journal::new(&config()).header, "Press ESC to quit. Triggers: # @");
        assert_eq!(Journal::new(&Config::default()).header, "Press ESC to quit. No triggers configured.");
    }

    #[test]
    fn submitted_lines_are_journaled() {
        let mut journal = Journal::new(&config());
        feed(&mut journal, "@wa".chars().map(InputEvent::Char));
        feed(&mut journal, [InputEvent::Down, InputEvent::Enter, InputEvent::Enter]);
        feed(&mut journal, "#".chars().map(InputEvent::Char));
        feed(&mut journal, [InputEvent::Enter]);

        let texts: Vec<String> = journal.entries().into_iter().map(|entry| entry.text).collect();
        assert_eq!(texts, vec!["@Walmart", "#"]);
    }

    #[test]
    fn only_escape_ends_the_session() {
        let mut journal = Journal::new(&config());
        assert_eq!(journal.input(InputEvent::Tab), None);
        assert_eq!(journal.input(InputEvent::Esc), Some(InputEvent::Esc));
        assert!(journal.into_entries().is_empty());
    }

    #[test]
    fn entry_shows_its_time() {
        let entry = Entry{time: NaiveTime::from_hms_opt(9, 5, 7).unwrap(), text: "@Walmart".to_string()};
        assert_eq!(entry.to_string(), "09:05:07 @Walmart");
    }
}
