//! A terminal text input with symbol-triggered completions: typing one of the
//! configured trigger symbols (say `@` or `#`) opens a menu of that symbol's
//! candidates, filtered by what follows it.

pub mod autocomplete;
pub mod color;
pub mod combobox;
pub mod completion;
pub mod config;
pub mod interface;
pub mod slots;
pub mod term;
pub mod yamlread;

pub use autocomplete::Autocomplete;
pub use completion::Autocompletions;
