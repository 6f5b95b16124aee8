use std::error::Error;
use std::path::Path;
use std::time::Instant;

use copypasta::{ClipboardContext, ClipboardProvider};
use glium::backend::glutin::SimpleWindowBuilder;
use glium::winit::event::{Event, WindowEvent};
use glium::winit::event_loop::EventLoop;
use glium::Surface;
use imgui::{ClipboardBackend, Context, FontConfig, FontSource, Ui};
use imgui_glium_renderer::Renderer;
use imgui_winit_support::{HiDpiMode, WinitPlatform};

struct Clipboard(ClipboardContext);

impl ClipboardBackend for Clipboard {
    fn get(&mut self) -> Option<String> {
        self.0.get_contents().ok()
    }

    fn set(&mut self, value: &str) {
        if let Err(err) = self.0.set_contents(value.to_owned()) {
            tracing::warn!(%err, "Failed to write clipboard");
        }
    }
}

fn create_context() -> Context {
    let mut imgui = Context::create();
    imgui.set_ini_filename(None);
    imgui.fonts().add_font(&[FontSource::DefaultFontData {
        config: Some(FontConfig {
            size_pixels: 15.0,
            ..FontConfig::default()
        }),
    }]);
    imgui
}

/// Opens a window and calls `run_ui` once per frame until it clears its
/// `run` flag or the window is closed.
pub fn simple_init<F>(title: &str, mut run_ui: F) -> Result<(), Box<dyn Error>>
where
    F: FnMut(&mut bool, &mut Ui) + 'static,
{
    let title = Path::new(title)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| title.to_string());

    let mut imgui = create_context();
    let event_loop = EventLoop::new()?;
    let (window, display) = SimpleWindowBuilder::new()
        .with_title(&title)
        .with_inner_size(1280, 800)
        .build(&event_loop);

    let mut renderer = Renderer::new(&mut imgui, &display)?;

    match ClipboardContext::new() {
        Ok(context) => imgui.set_clipboard_backend(Clipboard(context)),
        Err(err) => tracing::warn!(%err, "Clipboard unavailable"),
    }

    let mut platform = WinitPlatform::new(&mut imgui);
    platform.attach_window(imgui.io_mut(), &window, HiDpiMode::Default);

    let mut last_frame = Instant::now();

    #[allow(deprecated)]
    event_loop.run(move |event, window_target| match event {
        Event::NewEvents(_) => {
            let now = Instant::now();
            imgui.io_mut().update_delta_time(now - last_frame);
            last_frame = now;
        }
        Event::AboutToWait => {
            if let Err(err) = platform.prepare_frame(imgui.io_mut(), &window) {
                tracing::error!(%err, "Failed to prepare frame");
            }
            window.request_redraw();
        }
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            let ui = imgui.frame();

            let mut run = true;
            run_ui(&mut run, ui);
            if !run {
                window_target.exit();
            }

            let mut target = display.draw();
            target.clear_color_srgb(1.0, 1.0, 1.0, 1.0);
            platform.prepare_render(ui, &window);
            let draw_data = imgui.render();
            if let Err(err) = renderer.render(&mut target, draw_data) {
                tracing::error!(%err, "Rendering failed");
            }
            if let Err(err) = target.finish() {
                tracing::error!(%err, "Failed to swap buffers");
            }
        }
        Event::WindowEvent {
            event: WindowEvent::Resized(new_size),
            ..
        } => {
            if new_size.width > 0 && new_size.height > 0 {
                display.resize((new_size.width, new_size.height));
            }
            platform.handle_event(imgui.io_mut(), &window, &event);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => window_target.exit(),
        event => {
            platform.handle_event(imgui.io_mut(), &window, &event);
        }
    })?;

    Ok(())
}
