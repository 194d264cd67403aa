use centerwin_core::config;
use centerwin_core::settings::BUILTIN_IGNORE_TITLES;

pub fn add(title: &str) {
    let mut config = super::load_for_edit();
    if !config.add_ignore_title(title) {
        println!("\"{title}\" is already ignored.");
        return;
    }
    let path = super::save(&config);
    println!("Ignoring windows titled \"{title}\" (saved to {}).", path.display());
}

pub fn remove(title: &str) {
    if BUILTIN_IGNORE_TITLES.contains(&title) {
        eprintln!("\"{title}\" is built in and can't be removed.");
        std::process::exit(1);
    }

    let mut config = super::load_for_edit();
    if !config.remove_ignore_title(title) {
        println!("\"{title}\" is not in the ignore list.");
        return;
    }
    let path = super::save(&config);
    println!("No longer ignoring \"{title}\" (saved to {}).", path.display());
}

pub fn list() {
    let config = config::load();

    println!("Built-in:");
    for title in BUILTIN_IGNORE_TITLES {
        println!("  {title}");
    }

    println!("\nUser-added:");
    if config.extra_ignore_titles.is_empty() {
        println!("  (none)");
    }
    for title in &config.extra_ignore_titles {
        println!("  {title}");
    }
}
