/// Menu behaviour of a combobox: whether the list is open and which entry is
/// highlighted. The entries themselves belong to the caller, so every query
/// takes the current length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Combobox {
    open: bool,
    highlighted: Option<usize>,
}

impl Combobox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    pub fn reset_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Highlighted entry, if the menu is open and the index still fits.
    pub fn highlighted_in(&self, len: usize) -> Option<usize> {
        self.highlighted.filter(|&n| self.open && n < len)
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.open = true;
        self.highlighted = Some(match self.highlighted_in(len) {
            Some(n) => (n + 1) % len,
            None => 0,
        });
    }

    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.open = true;
        self.highlighted = Some(match self.highlighted_in(len) {
            Some(0) | None => len - 1,
            Some(n) => n - 1,
        });
    }

    /// Takes the highlighted entry out of `items` and closes the menu.
    pub fn accept<'a>(&mut self, items: &'a [String]) -> Option<&'a str> {
        let n = self.highlighted_in(items.len())?;
        self.close();
        items.get(n).map(String::as_str)
    }
}
