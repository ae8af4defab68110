use std::error::Error;

use symcomplete::config::Config;
use symcomplete::interface;

fn app() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "autocomplete.yaml".to_string());
    let config = Config::load(&path)?;
    config.init_logging()?;
    for entry in interface::app(&config)? {
        println!("{entry}");
    }
    Ok(())
}

fn main() {
    better_panic::install();

    if let Err(err) = app() {
        eprintln!("{err}");
    }
}
