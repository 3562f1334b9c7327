use anyhow::Result;
use keepintouch_core::KeepInTouch;
use owo_colors::OwoColorize;

pub fn run(app: &KeepInTouch) -> Result<()> {
    let store = app.store()?;

    println!("{}", "Paths".bold());
    println!("  Config:        {}", app.config_path().display());
    println!("  Tracked list:  {}", store.path().display());
    println!("  Address book:  {}", app.contacts_path().display());

    println!("{}", "Calls".bold());
    println!("  Voice:  {}://", app.config().voice_scheme);
    println!("  Video:  {}://", app.config().video_scheme);

    Ok(())
}
