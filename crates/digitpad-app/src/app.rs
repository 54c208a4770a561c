//! Digit Pad Window
//!
//! Desktop shell: presents the raster, feeds it mouse input and runs remote
//! calls on the smol executor. Completions come back to the event loop as
//! user events and are applied through the workbench.
//!
//! Keys: `P` predict, `T` train, `C`/`Esc`/`Delete`/`Backspace` clear.

use std::error::Error;
use std::fmt::Write as _;
use std::num::NonZeroU32;
use std::sync::Arc;

use digitpad_canvas::{Point, PointerEvent};
use digitpad_net::{ClientError, Digit, HttpClient};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::session::{Completion, SessionState, Ticket, Workbench};

/// Letterbox color outside the raster (softbuffer uses 0x00RRGGBB)
const BACKDROP: u32 = 0x0080_8080;

/// Completion of a remote call, delivered to the event loop
#[derive(Debug)]
pub enum UserEvent {
    Predicted {
        ticket: Ticket,
        result: Result<Digit, ClientError>,
    },
    Trained {
        ticket: Ticket,
        result: Result<String, ClientError>,
    },
}

/// Digit Pad application
pub struct DigitPad {
    config: AppConfig,
}

impl DigitPad {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Open the window and block until it is closed
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let transport = HttpClient::with_config(self.config.client_config())?;
        let workbench = self.config.build_workbench(transport)?;

        let mut app = DigitPadApp::new(workbench, event_loop.create_proxy());
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

/// Window title summarizing the session
pub fn status_line(session: &SessionState, in_flight: usize) -> String {
    let mut line = String::from("Digit Pad");
    if let Some(digit) = session.prediction() {
        let _ = write!(line, " | Prediction: {digit}");
    }
    if let Some(status) = session.status() {
        let _ = write!(line, " | {status}");
    }
    if let Some(error) = session.error() {
        let _ = write!(line, " | Error: {error}");
    }
    if in_flight > 0 {
        line.push_str(" | working...");
    }
    line
}

struct DigitPadApp {
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    workbench: Workbench<HttpClient>,
    proxy: EventLoopProxy<UserEvent>,
    /// Last cursor position, surface-local
    cursor: Point,
    /// Remote calls not yet completed
    in_flight: usize,
}

impl DigitPadApp {
    fn new(workbench: Workbench<HttpClient>, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            window: None,
            surface: None,
            workbench,
            proxy,
            cursor: Point::default(),
            in_flight: 0,
        }
    }

    fn render(&mut self) {
        let Some(window) = &self.window else { return };
        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        let Some(surface) = &mut self.surface else { return };

        if let Err(e) = surface.resize(width, height) {
            tracing::warn!("surface resize failed: {e}");
            return;
        }
        let mut buffer = match surface.buffer_mut() {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("no frame buffer: {e}");
                return;
            }
        };

        buffer.fill(BACKDROP);
        let image = self.workbench.surface().image_data();
        let buffer_width = size.width as usize;
        for y in 0..image.height().min(size.height) {
            for x in 0..image.width().min(size.width) {
                if let Some((r, g, b, _)) = image.get_pixel(x, y) {
                    let pixel = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
                    buffer[y as usize * buffer_width + x as usize] = pixel;
                }
            }
        }

        if let Err(e) = buffer.present() {
            tracing::warn!("present failed: {e}");
        }
    }

    fn refresh(&self) {
        if let Some(window) = &self.window {
            window.set_title(&status_line(self.workbench.session(), self.in_flight));
            window.request_redraw();
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        if self.workbench.pointer(event) {
            self.refresh();
        }
    }

    fn predict(&mut self) {
        let pending = match self.workbench.begin_predict() {
            Ok(pending) => pending,
            Err(_) => return self.refresh(),
        };
        let client = self.workbench.client().clone();
        let proxy = self.proxy.clone();
        self.in_flight += 1;
        smol::spawn(async move {
            let result = client.predict(&pending.sample).await;
            let event = UserEvent::Predicted {
                ticket: pending.ticket,
                result,
            };
            if proxy.send_event(event).is_err() {
                tracing::debug!("event loop closed before prediction arrived");
            }
        })
        .detach();
        self.refresh();
    }

    fn train(&mut self) {
        let pending = match self.workbench.begin_train() {
            Ok(pending) => pending,
            Err(_) => return self.refresh(),
        };
        let client = self.workbench.client().clone();
        let proxy = self.proxy.clone();
        self.in_flight += 1;
        smol::spawn(async move {
            let result = client.train(&pending.sample, pending.label).await;
            let event = UserEvent::Trained {
                ticket: pending.ticket,
                result,
            };
            if proxy.send_event(event).is_err() {
                tracing::debug!("event loop closed before training finished");
            }
        })
        .detach();
        self.refresh();
    }

    fn reset(&mut self) {
        self.workbench.reset();
        self.refresh();
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::KeyP) => self.predict(),
            PhysicalKey::Code(KeyCode::KeyT) => self.train(),
            PhysicalKey::Code(
                KeyCode::KeyC | KeyCode::Escape | KeyCode::Delete | KeyCode::Backspace,
            ) => self.reset(),
            _ => {}
        }
    }
}

impl ApplicationHandler<UserEvent> for DigitPadApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let raster = self.workbench.surface();
        let attrs = Window::default_attributes()
            .with_title("Digit Pad")
            .with_inner_size(PhysicalSize::new(raster.width(), raster.height()))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                tracing::error!("failed to create software surface: {e}");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.refresh();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            WindowEvent::Resized(_) => {
                self.refresh();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as f32, position.y as f32);
                self.pointer(PointerEvent::moved(self.cursor.x, self.cursor.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer(PointerEvent::leave(self.cursor.x, self.cursor.y));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match state {
                    ElementState::Pressed => PointerEvent::down(self.cursor.x, self.cursor.y),
                    ElementState::Released => PointerEvent::up(self.cursor.x, self.cursor.y),
                };
                self.pointer(event);
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            UserEvent::Predicted { ticket, result } => {
                match self.workbench.finish_predict(ticket, result) {
                    Ok(Completion::Applied(digit)) => tracing::info!(%digit, "prediction shown"),
                    Ok(Completion::Stale(digit)) => {
                        tracing::info!(%digit, "prediction ignored: drawing changed")
                    }
                    Err(e) => tracing::warn!("predict failed: {e}"),
                }
            }
            UserEvent::Trained { ticket, result } => {
                match self.workbench.finish_train(ticket, result) {
                    Ok(completion) => {
                        tracing::info!(applied = completion.is_applied(), "training finished")
                    }
                    Err(e) => tracing::warn!("train failed: {e}"),
                }
            }
        }
        self.refresh();
    }
}
