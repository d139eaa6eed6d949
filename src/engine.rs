//! Overlay engine: the per-tick orchestrator
//!
//! Owns every component and drives them in a fixed order from a single
//! `tick`. Settings are polled through the store's generation counter and
//! diffed, so nothing here reacts to callbacks.

use crate::animation::{ClickAnimator, ClickState};
use crate::host::{Actor, Host, ProgramCache, ShaderLoader};
use crate::input::{KeyDisposition, KeyEvent};
use crate::magnifier::MagnifierCompositor;
use crate::processing::{InertiaConfig, InertiaSmoother};
use crate::render::{DrawSettings, RingRenderer};
use crate::settings::{hsl_to_rgb, Settings, SettingsKey, SettingsStore};
use crate::spotlight::SpotlightOverlay;
use crate::visibility::AutoHideDetector;
use tiny_skia::Pixmap;

pub struct OverlayEngine<S: SettingsStore> {
    store: S,
    settings: Settings,
    generation: u64,
    started: bool,
    programs: ProgramCache,

    smoother: InertiaSmoother,
    click: ClickAnimator,
    auto_hide: AutoHideDetector,
    magnifier: MagnifierCompositor,
    spotlight: SpotlightOverlay,
    renderer: RingRenderer,

    draw: Option<DrawSettings>,
    accent: Option<String>,
    committed: Option<(f64, f64)>,
    clock_ms: f64,
}

impl<S: SettingsStore> OverlayEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_programs(store, ProgramCache::default())
    }

    /// Engine whose shader sources come from `loader` instead of the
    /// built-in copies.
    pub fn with_loader(store: S, loader: Box<dyn ShaderLoader + Send>) -> Self {
        Self::with_programs(store, ProgramCache::new(loader))
    }

    fn with_programs(store: S, programs: ProgramCache) -> Self {
        let settings = store.snapshot().sanitized();
        let generation = store.generation();

        Self {
            smoother: InertiaSmoother::new(InertiaConfig::from_settings(&settings)),
            click: ClickAnimator::new(),
            auto_hide: AutoHideDetector::new(
                settings.auto_hide,
                settings.auto_hide_delay.max(0) as f64,
            ),
            magnifier: MagnifierCompositor::new(&settings),
            spotlight: SpotlightOverlay::new(&settings),
            renderer: RingRenderer::new(),
            draw: None,
            accent: None,
            committed: None,
            clock_ms: 0.0,
            store,
            settings,
            generation,
            started: false,
            programs,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Total time fed to `tick`.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn click_state(&self) -> ClickState {
        self.click.state()
    }

    /// Smoothed pointer position.
    pub fn position(&self) -> (f64, f64) {
        self.smoother.position()
    }

    pub fn magnifier(&self) -> &MagnifierCompositor {
        &self.magnifier
    }

    pub fn spotlight(&self) -> &SpotlightOverlay {
        &self.spotlight
    }

    pub fn draw_settings(&self) -> Option<&DrawSettings> {
        self.draw.as_ref()
    }

    /// Side of the square overlay surface; zero before the first tick.
    pub fn canvas_size(&self) -> u32 {
        self.draw.as_ref().map_or(0, DrawSettings::canvas_size)
    }

    /// Advance every component by one frame, `delta_ms` after the last.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H, delta_ms: f64) {
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.clock_ms += delta_ms;

        if !self.started {
            self.start(host);
        }
        self.poll_settings(host);
        self.poll_accent(host);

        if !self.settings.enabled {
            return;
        }

        let pointer = host.pointer();
        self.smoother.update(pointer.x, pointer.y);

        self.magnifier
            .poll_activation(host, pointer.mask, &mut self.smoother, &mut self.programs);
        self.spotlight
            .poll_activation(host, pointer.mask, &mut self.programs);

        // A hard magnifier activation resets the smoother.
        let (x, y) = self.smoother.position();

        self.magnifier.advance(host, delta_ms);
        self.magnifier.update(host, delta_ms, x, y);
        self.spotlight.advance(host, delta_ms);
        self.spotlight.update(host, x, y);

        let mut needs_repaint = self.click.update(pointer.mask);

        self.auto_hide.update(x, y, delta_ms).apply(host);

        let half = self.canvas_size() as f64 / 2.0;
        let target = (x - half, y - half);
        if self.committed != Some(target) {
            host.set_position(Actor::Overlay, target.0, target.1);
            self.committed = Some(target);
        }

        if self.settings.rgb_enabled {
            if let Some(draw) = self.draw.as_mut() {
                let hue = (self.clock_ms * self.settings.rgb_speed * 0.1) % 360.0;
                draw.color = hsl_to_rgb(hue, 1.0, 0.5).to_unit();
                needs_repaint = true;
            }
        }

        if needs_repaint {
            host.queue_repaint();
        }
    }

    /// Repaint the overlay surface for the current state.
    pub fn repaint(&mut self) -> Option<&Pixmap> {
        if !self.settings.enabled {
            return None;
        }
        let click = self.click.state();
        self.renderer.render(self.draw.as_ref(), &click)
    }

    /// Captured key events go to the magnifier; everything else passes.
    pub fn handle_key_event<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
    ) -> KeyDisposition {
        if !self.settings.enabled {
            return KeyDisposition::PassThrough;
        }
        self.magnifier
            .handle_key_event(host, event, &mut self.smoother, &mut self.programs)
    }

    /// Tear everything down and hide the overlay.
    pub fn shutdown<H: Host + ?Sized>(&mut self, host: &mut H) {
        tracing::info!("Overlay engine shutting down");
        self.hide_overlay(host);
        self.started = false;
    }

    fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.started = true;
        self.accent = self.current_accent(host);
        self.refresh_style(host);
        if self.settings.enabled {
            self.show_overlay(host);
        }
    }

    fn poll_settings<H: Host + ?Sized>(&mut self, host: &mut H) {
        let generation = self.store.generation();
        if generation == self.generation {
            return;
        }
        self.generation = generation;

        let next = self.store.snapshot().sanitized();
        let changed = self.settings.diff(&next);
        if changed.is_empty() {
            return;
        }
        tracing::debug!("{} settings changed", changed.len());
        self.settings = next;

        self.smoother.update_constants(&self.settings);
        self.auto_hide.update_constants(&self.settings);
        self.magnifier.update_constants(&self.settings);
        self.spotlight.update_constants(&self.settings);
        self.refresh_style(host);

        if changed.contains(&SettingsKey::Enabled) {
            if self.settings.enabled {
                self.show_overlay(host);
            } else {
                self.hide_overlay(host);
            }
        }
    }

    /// Follow the host accent while `use-system-accent` is on.
    fn poll_accent<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.settings.use_system_accent {
            return;
        }
        let accent = host.accent_color();
        if accent != self.accent {
            tracing::debug!("Accent color changed to {:?}", accent);
            self.accent = accent;
            self.refresh_style(host);
        }
    }

    fn current_accent<H: Host + ?Sized>(&self, host: &H) -> Option<String> {
        if self.settings.use_system_accent {
            host.accent_color()
        } else {
            None
        }
    }

    fn refresh_style<H: Host + ?Sized>(&mut self, host: &mut H) {
        let draw = DrawSettings::build(&self.settings, self.accent.as_deref());
        let side = draw.canvas_size() as f64;
        if self.draw.as_ref().map(DrawSettings::canvas_size) != Some(draw.canvas_size()) {
            host.set_size(Actor::Overlay, side, side);
            self.committed = None;
        }
        self.draw = Some(draw);
        host.queue_repaint();
    }

    fn show_overlay<H: Host + ?Sized>(&mut self, host: &mut H) {
        tracing::info!("Overlay enabled");
        self.click.reset();
        self.committed = None;
        self.auto_hide.reset_actor(host);
        host.set_visible(Actor::Overlay, true);
        host.queue_repaint();
    }

    fn hide_overlay<H: Host + ?Sized>(&mut self, host: &mut H) {
        tracing::info!("Overlay disabled");
        self.magnifier.destroy(host);
        self.spotlight.destroy(host);
        self.click.reset();
        self.auto_hide.reset();
        host.remove_all_transitions(Actor::Overlay);
        host.set_visible(Actor::Overlay, false);
    }
}
