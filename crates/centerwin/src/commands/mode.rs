use centerwin_core::DisplayMode;

/// Persists the display mode. A running daemon picks it up on its next
/// config reload; windows already placed stay where they are.
pub fn execute(mode: DisplayMode) {
    let mut config = super::load_for_edit();
    config.respect_work_area = mode.respects_work_area();
    let path = super::save(&config);

    let label = match mode {
        DisplayMode::RespectWorkArea => "work area",
        DisplayMode::FullMonitor => "full monitor",
    };
    println!("New windows will be centered on the {label}.");
    println!("Saved to {}", path.display());
}
