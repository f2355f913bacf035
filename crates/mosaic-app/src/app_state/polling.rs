//! Webview event polling and wake-up scheduling.

use std::time::Instant;

use mosaic_common::SurfaceId;
use mosaic_shell::{Backend, IpcSource, SurfaceEvent};
use mosaic_webview::{IpcMessage, PageLoadState, WebViewEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::MosaicApp;
use super::types::POLL_INTERVAL;

impl MosaicApp {
    /// Feed pending events to the shell, run its due timers, build any
    /// windows it opened, and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        if !self.started || self.shut_down {
            return;
        }
        self.poll_webview_events();

        if self
            .shell
            .next_deadline()
            .is_some_and(|deadline| deadline <= Instant::now())
        {
            self.shell.tick();
        }

        self.shell.backend_mut().realize(event_loop);

        if self.shell.backend().quit_requested() {
            self.shutdown();
            event_loop.exit();
            return;
        }

        let poll = Instant::now() + POLL_INTERVAL;
        let wake = match self.shell.next_deadline() {
            Some(deadline) => deadline.min(poll),
            None => poll,
        };
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    fn poll_webview_events(&mut self) {
        let events = self.shell.backend_mut().webviews_mut().drain_events();
        for event in events {
            self.shell.backend_mut().observe(&event);
            match event {
                WebViewEvent::PageLoad {
                    surface,
                    state,
                    url,
                } => match state {
                    PageLoadState::Started => {
                        self.shell
                            .on_surface_event(surface, SurfaceEvent::LoadStarted { url });
                    }
                    PageLoadState::Finished => {
                        self.shell.on_surface_event(surface, SurfaceEvent::DomReady);
                        self.shell
                            .on_surface_event(surface, SurfaceEvent::LoadFinished { url });
                    }
                },
                WebViewEvent::IpcMessage { surface, body } => {
                    self.route_ipc(surface, &body);
                }
                WebViewEvent::NewWindowRequested { surface, url } => {
                    self.shell.backend_mut().load_url(surface, &url);
                }
                WebViewEvent::NavigationRequested { surface, url } => {
                    self.shell
                        .on_surface_event(surface, SurfaceEvent::Navigated { url });
                }
                WebViewEvent::Closed { .. } => {}
            }
        }
    }

    fn route_ipc(&mut self, surface: SurfaceId, body: &str) {
        let Some(msg) = IpcMessage::from_json(body) else {
            tracing::warn!(
                surface = surface.0,
                body_len = body.len(),
                "IPC message rejected: failed to parse"
            );
            return;
        };
        let source = match self.shell.backend().overlay_of(surface) {
            Some((window, kind)) => IpcSource::Overlay(window, kind),
            None => IpcSource::Surface(surface),
        };
        tracing::debug!(surface = surface.0, kind = %msg.kind, "IPC message dispatched");
        self.shell.handle_ipc(source, &msg.kind, &msg.payload);
    }
}
