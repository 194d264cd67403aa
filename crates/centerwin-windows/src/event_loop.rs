//! Show-event appearance source backed by `SetWinEventHook`.
//!
//! The hook and its message pump live on a dedicated thread. The
//! callback forwards each shown top-level window through a channel
//! that [`WinEventSource::wait`] drains.

use std::cell::RefCell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use centerwin_core::{AppearanceSource, Error, Result, SourceEvent, WindowHandle};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, EVENT_OBJECT_SHOW, GetMessageW, MSG, PostThreadMessageW, TranslateMessage,
    WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS, WM_QUIT,
};

use crate::event;

// The hook callback has no user-data parameter, so the sender lives in
// a thread-local on the hook thread for as long as the hook is installed.
thread_local! {
    static SHOWN_SENDER: RefCell<Option<Sender<WindowHandle>>> = const { RefCell::new(None) };
}

/// Notifications for windows that were just shown.
///
/// Dropping the source unhooks and joins the hook thread.
pub struct WinEventSource {
    rx: Receiver<WindowHandle>,
    thread_id: u32,
    thread: Option<thread::JoinHandle<()>>,
}

impl WinEventSource {
    /// Installs the hook on a new thread.
    ///
    /// Fails with [`Error::HookInstall`] if the OS refuses the hook.
    pub fn start() -> Result<Self> {
        let (tx, rx) = mpsc::channel::<WindowHandle>();
        let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<u32, String>>();

        let thread = thread::Builder::new()
            .name("win-event-hook".into())
            .spawn(move || hook_thread(tx, ready_tx))?;

        let thread_id = ready_rx
            .recv()
            .map_err(|_| Error::HookInstall("hook thread exited unexpectedly".into()))?
            .map_err(Error::HookInstall)?;

        tracing::debug!(thread_id, "window show hook installed");

        Ok(Self {
            rx,
            thread_id,
            thread: Some(thread),
        })
    }
}

impl AppearanceSource for WinEventSource {
    fn wait(&mut self, timeout: Duration) -> SourceEvent {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => {
                let mut handles = vec![first];
                handles.extend(self.rx.try_iter());
                SourceEvent::Candidates(handles)
            }
            Err(RecvTimeoutError::Timeout) => SourceEvent::Idle,
            Err(RecvTimeoutError::Disconnected) => SourceEvent::Closed,
        }
    }
}

impl Drop for WinEventSource {
    fn drop(&mut self) {
        // SAFETY: posting to a thread that already exited just fails.
        if let Err(e) = unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
            tracing::debug!("hook thread already gone: {e}");
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn hook_thread(tx: Sender<WindowHandle>, ready_tx: Sender<std::result::Result<u32, String>>) {
    SHOWN_SENDER.with(|cell| *cell.borrow_mut() = Some(tx));

    // SAFETY: the callback only touches the thread-local sender.
    // OUTOFCONTEXT delivers events on this thread's message queue;
    // SKIPOWNPROCESS keeps our own windows out.
    let hook = unsafe {
        SetWinEventHook(
            EVENT_OBJECT_SHOW,
            EVENT_OBJECT_SHOW,
            None,
            Some(win_event_proc),
            0,
            0,
            WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
        )
    };

    if hook.is_invalid() {
        let _ = ready_tx.send(Err("SetWinEventHook returned a null hook".into()));
        return;
    }

    // SAFETY: plain query.
    let thread_id = unsafe { GetCurrentThreadId() };
    let _ = ready_tx.send(Ok(thread_id));

    run_message_pump();

    // SAFETY: `hook` was returned by SetWinEventHook on this thread.
    unsafe {
        let _ = UnhookWinEvent(hook);
    }
    SHOWN_SENDER.with(|cell| cell.borrow_mut().take());
}

/// Pumps messages until `WM_QUIT`. Out-of-context WinEvents are
/// delivered from inside `GetMessageW`.
fn run_message_pump() {
    let mut msg = MSG::default();

    // SAFETY: `msg` is a valid out-pointer for the whole loop.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    let Some(handle) = event::translate(event, hwnd, id_object) else {
        return;
    };
    SHOWN_SENDER.with(|cell| {
        if let Some(sender) = cell.borrow().as_ref() {
            let _ = sender.send(handle);
        }
    });
}
