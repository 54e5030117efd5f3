//! `extract`: show the raw signals found in one passage.

use nl_extract::extract;

/// Print the signals in `text` as pretty JSON.
pub fn run(text: &str) -> Result<(), String> {
    let updates = extract(text);
    let json = serde_json::to_string_pretty(&updates).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
