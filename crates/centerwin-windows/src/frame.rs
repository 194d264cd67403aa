use std::mem;

use centerwin_core::{Rect, Result};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

/// Width of the transparent resize margin left of and above a window.
///
/// Windows 10 and 11 draw shadows outside the visible frame, and
/// `GetWindowRect` counts them (usually 7px on the left, none on top).
/// `SetWindowPos` positions the outer rectangle, so a move has to
/// subtract the margin. Only the top-left corner matters for a move.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BorderOffset {
    pub left: i32,
    pub top: i32,
}

impl BorderOffset {
    fn between(outer: Rect, visible: Rect) -> Self {
        Self {
            left: visible.x - outer.x,
            top: visible.y - outer.y,
        }
    }
}

/// Outer rectangle, shadows included.
pub fn window_rect(hwnd: HWND) -> Result<Rect> {
    let mut outer = RECT::default();
    // SAFETY: writes into a stack RECT; fails for destroyed handles.
    unsafe { GetWindowRect(hwnd, &mut outer) }.map_err(|e| e.message())?;
    Ok(to_rect(outer))
}

/// What the user actually sees. Uses the DWM frame when available and
/// the outer rectangle otherwise (e.g. before the window is composed).
pub fn visible_rect(hwnd: HWND) -> Result<Rect> {
    let mut bounds = RECT::default();
    // SAFETY: pointer and size both describe `bounds`.
    let dwm = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut bounds as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    };

    match dwm {
        Ok(()) => Ok(to_rect(bounds)),
        Err(_) => window_rect(hwnd),
    }
}

pub fn border_offset(hwnd: HWND) -> Result<BorderOffset> {
    Ok(BorderOffset::between(window_rect(hwnd)?, visible_rect(hwnd)?))
}

fn to_rect(r: RECT) -> Rect {
    Rect::from_edges(r.left, r.top, r.right, r.bottom)
}
