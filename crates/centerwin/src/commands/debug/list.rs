use serde::Serialize;

/// One row of `debug list`.
#[derive(Debug, Serialize)]
#[cfg_attr(not(windows), allow(dead_code))]
struct WindowRow {
    handle: String,
    title: String,
    width: i32,
    height: i32,
    maximized: bool,
    ignored: bool,
    /// Where the window would be moved under the current mode.
    target_x: i32,
    target_y: i32,
}

#[cfg(windows)]
pub fn execute(json: bool) {
    use centerwin_core::monitor::usable_area;
    use centerwin_core::{WindowQuery, config};
    use centerwin_windows::Desktop;

    centerwin_windows::dpi::enable_dpi_awareness();

    let config = config::load();
    let mode = config.display_mode();
    let ignore = config.ignore_titles();
    let desktop = Desktop;

    let rows: Vec<WindowRow> = desktop
        .enumerate_top_level_windows()
        .into_iter()
        .filter(|&handle| desktop.is_visible(handle) && desktop.is_app_window(handle))
        .filter_map(|handle| {
            let title = desktop.title(handle);
            if title.is_empty() {
                return None;
            }
            let size = desktop.size(handle).ok()?;
            let (target_x, target_y) = usable_area(&desktop, handle, mode).center_of(size);
            Some(WindowRow {
                handle: handle.to_string(),
                ignored: ignore.contains(&title),
                title,
                width: size.width,
                height: size.height,
                maximized: desktop.is_maximized(handle),
                target_x,
                target_y,
            })
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&rows) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print_table(&rows);
}

#[cfg(not(windows))]
pub fn execute(_json: bool) {
    super::super::unsupported("debug list");
}

#[cfg_attr(not(windows), allow(dead_code))]
fn print_table(rows: &[WindowRow]) {
    let title_width = rows
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 48);

    println!(
        "{:<12} {:<title_width$} {:>11} {:>5} {:>7} {:>13}",
        "HWND", "Title", "Size", "Max", "Ignored", "Target"
    );
    for row in rows {
        let title: String = row.title.chars().take(title_width).collect();
        let size = format!("{}x{}", row.width, row.height);
        let target = format!("({}, {})", row.target_x, row.target_y);
        println!(
            "{:<12} {:<title_width$} {:>11} {:>5} {:>7} {:>13}",
            row.handle,
            title,
            size,
            yes_no(row.maximized),
            yes_no(row.ignored),
            target
        );
    }
    println!("\n{} windows found", rows.len());
}

#[cfg_attr(not(windows), allow(dead_code))]
fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
