use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use prompt_flow::{Board, Control, FlowError, Gallery, InFlight};

use crate::app::api::{ApiClient, ApiResult};
use crate::app::config::AppConfig;
use crate::app::types::{Modal, Page, Toast, ToastKind};
use crate::app::utils::{after_ms, copy_to_clipboard};

static NEXT_TOAST: AtomicU32 = AtomicU32::new(1);

/// Everything the views share, handed around through context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub board: RwSignal<Board>,
    pub gallery: RwSignal<Gallery>,
    pub in_flight: RwSignal<InFlight>,
    pub toast: RwSignal<Option<Toast>>,
    pub modal: RwSignal<Option<Modal>>,
    pub page: RwSignal<Page>,
    pub config: StoredValue<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            board: RwSignal::new(Board::new()),
            gallery: RwSignal::new(Gallery::new()),
            in_flight: RwSignal::new(InFlight::new()),
            toast: RwSignal::new(None),
            modal: RwSignal::new(None),
            page: RwSignal::new(Page::default()),
            config: StoredValue::new(config),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.config.with_value(|c| ApiClient::new(&c.base_url))
    }

    pub fn busy(&self, control: Control) -> bool {
        self.in_flight.with(|f| f.is_busy(control))
    }

    pub fn open(&self, modal: Modal) {
        self.modal.set(Some(modal));
    }

    pub fn close_modal(&self) {
        self.modal.set(None);
    }

    pub fn notify(&self, message: impl Into<String>, kind: ToastKind) {
        let id = NEXT_TOAST.fetch_add(1, Ordering::Relaxed);
        self.toast.set(Some(Toast { id, message: message.into(), kind }));
        let toast = self.toast;
        let ms = self.config.with_value(|c| c.toast_ms);
        after_ms(ms, move || {
            // A newer toast owns the slot by now.
            if toast.with_untracked(|t| t.as_ref().map(|t| t.id)) == Some(id) {
                toast.set(None);
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, ToastKind::Success);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(message, ToastKind::Info);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, ToastKind::Error);
    }

    pub fn flow_error(&self, err: &FlowError) {
        log::warn!("{err}");
        self.error(err.notice());
    }

    /// Runs a named board action and reports the result. Returns whether the
    /// action went through.
    pub fn dispatch(&self, name: &str, arg: Option<&str>) -> bool {
        match self.board.try_update(|board| board.run(name, arg)) {
            Some(Ok(outcome)) => {
                if let Some(notice) = outcome.notice() {
                    self.success(notice);
                }
                true
            }
            Some(Err(err)) => {
                self.flow_error(&err);
                false
            }
            None => false,
        }
    }

    pub fn copy(&self, text: String) {
        if text.trim().is_empty() {
            self.error("没有可复制的内容");
            return;
        }
        let state = *self;
        spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => state.success("已复制到剪贴板"),
                Err(err) => {
                    log::warn!("clipboard write failed: {err}");
                    state.error("复制失败");
                }
            }
        });
    }

    /// Starts `task` unless `control` already has a request outstanding. The
    /// control is released when the task ends, whatever the outcome.
    pub fn spawn_guarded<Fut>(self, control: Control, fallback: &'static str, task: Fut)
    where
        Fut: Future<Output = ApiResult<()>> + 'static,
    {
        match self.in_flight.try_update(|f| f.begin(control)) {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                self.flow_error(&err);
                return;
            }
            None => return,
        }
        spawn_local(async move {
            if let Err(err) = task.await {
                log::error!("{control} failed: {err}");
                self.error(err.notice(fallback));
            }
            self.in_flight.update(|f| f.finish(control));
        });
    }
}
