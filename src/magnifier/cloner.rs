//! Scene mirroring for the magnifier
//!
//! Builds clones of the background, the workspace windows and the top
//! panel inside the magnifier content group, stacked bottom to top in that
//! order, and keeps them scaled and translated so the focus point sits at
//! the viewport center.

use super::viewport::Viewport;
use crate::host::{ClonePlacement, CloneId, SceneSource, Stage, SurfaceId};

/// Window clones are rebuilt at most this often.
pub const WINDOW_REBUILD_INTERVAL_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Background,
    Window,
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneLayer {
    pub source: SurfaceId,
    pub clone: CloneId,
    pub kind: LayerKind,
}

#[derive(Debug, Default)]
pub struct SceneCloner {
    background: Option<CloneLayer>,
    windows: Vec<CloneLayer>,
    panel: Option<CloneLayer>,
    since_rebuild_ms: Option<f64>,
}

impl SceneCloner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create whatever clones are missing. Existing background and panel
    /// clones are kept; windows are always rebuilt.
    pub fn init<H: SceneSource + Stage + ?Sized>(&mut self, host: &mut H) {
        self.create_background(host);
        self.rebuild_windows(host);
        self.create_panel(host);
        self.since_rebuild_ms = Some(0.0);
    }

    /// Reposition every clone for a new focus point, rebuilding the window
    /// clones when the interval has passed.
    pub fn update<H: SceneSource + Stage + ?Sized>(
        &mut self,
        host: &mut H,
        delta_ms: f64,
        viewport: &Viewport,
        focus: (f64, f64),
        zoom: f64,
    ) {
        let elapsed = self.since_rebuild_ms.map(|t| t + delta_ms.max(0.0));
        match elapsed {
            Some(t) if t <= WINDOW_REBUILD_INTERVAL_MS => self.since_rebuild_ms = Some(t),
            _ => {
                self.rebuild_windows(host);
                self.since_rebuild_ms = Some(0.0);
            }
        }

        for layer in self.layers() {
            let origin = match layer.kind {
                LayerKind::Window => host.surface_origin(layer.source).unwrap_or((0.0, 0.0)),
                LayerKind::Background | LayerKind::Panel => (0.0, 0.0),
            };
            let (tx, ty) = viewport.clone_translation(focus, origin, zoom);
            host.set_clone_transform(layer.clone, zoom, tx, ty);
        }
    }

    /// Destroy every clone.
    pub fn destroy<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        let layers: Vec<CloneLayer> = self.layers().collect();
        for layer in &layers {
            stage.destroy_clone(layer.clone);
        }
        if !layers.is_empty() {
            tracing::debug!("Destroyed {} magnifier clones", layers.len());
        }
        self.background = None;
        self.windows.clear();
        self.panel = None;
        self.since_rebuild_ms = None;
    }

    /// All layers, bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = CloneLayer> + '_ {
        self.background
            .iter()
            .chain(self.windows.iter())
            .chain(self.panel.iter())
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.windows.is_empty() && self.panel.is_none()
    }

    fn create_background<H: SceneSource + Stage + ?Sized>(&mut self, host: &mut H) {
        if self.background.is_some() {
            return;
        }
        let source = match host.background() {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("No background clone: {}", e);
                return;
            }
        };
        match host.create_clone(source, ClonePlacement::At(0)) {
            Ok(clone) => {
                self.background = Some(CloneLayer {
                    source,
                    clone,
                    kind: LayerKind::Background,
                })
            }
            Err(e) => tracing::debug!("No background clone: {}", e),
        }
    }

    fn rebuild_windows<H: SceneSource + Stage + ?Sized>(&mut self, host: &mut H) {
        for layer in self.windows.drain(..) {
            host.destroy_clone(layer.clone);
        }

        let mut windows = match host.windows() {
            Ok(windows) => windows,
            Err(e) => {
                tracing::debug!("Failed to list windows: {}", e);
                return;
            }
        };
        windows.retain(|w| w.is_clonable());
        windows.sort_by_key(|w| w.stacking);

        let base = usize::from(self.background.is_some());
        for window in windows {
            let placement = ClonePlacement::At(base + self.windows.len());
            match host.create_clone(window.surface, placement) {
                Ok(clone) => self.windows.push(CloneLayer {
                    source: window.surface,
                    clone,
                    kind: LayerKind::Window,
                }),
                Err(e) => tracing::debug!("Skipping window {:?}: {}", window.surface, e),
            }
        }
        tracing::trace!("Rebuilt {} window clones", self.windows.len());
    }

    fn create_panel<H: SceneSource + Stage + ?Sized>(&mut self, host: &mut H) {
        if self.panel.is_some() {
            return;
        }
        let Some(source) = host.panel() else {
            return;
        };
        match host.create_clone(source, ClonePlacement::Top) {
            Ok(clone) => {
                self.panel = Some(CloneLayer {
                    source,
                    clone,
                    kind: LayerKind::Panel,
                })
            }
            Err(e) => tracing::debug!("No panel clone: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::settings::Settings;

    fn viewport() -> Viewport {
        Viewport::compute(&Settings::default(), 0.0, 0.0)
    }

    #[test]
    fn test_stacking_order() {
        let mut host = RecordingHost::new();
        host.add_window(30, 5, (0.0, 0.0));
        host.add_window(10, 1, (0.0, 0.0));
        host.add_window(20, 3, (0.0, 0.0));

        let mut cloner = SceneCloner::new();
        cloner.init(&mut host);

        assert_eq!(
            host.clone_sources(),
            vec![SurfaceId(1), SurfaceId(10), SurfaceId(20), SurfaceId(30), SurfaceId(2)]
        );
    }

    #[test]
    fn test_skips_hidden_and_failed_windows() {
        let mut host = RecordingHost::new();
        host.add_window(10, 1, (0.0, 0.0));
        host.add_window(11, 2, (0.0, 0.0));
        host.add_window(12, 3, (0.0, 0.0));
        host.add_window(13, 4, (0.0, 0.0));
        host.windows[1].minimized = true;
        host.windows[2].visible = false;
        host.broken.insert(SurfaceId(13));

        let mut cloner = SceneCloner::new();
        cloner.init(&mut host);
        assert_eq!(host.clone_sources(), vec![SurfaceId(1), SurfaceId(10), SurfaceId(2)]);
    }

    #[test]
    fn test_missing_background_keeps_windows_at_bottom() {
        let mut host = RecordingHost::new();
        host.background = None;
        host.panel = None;
        host.add_window(10, 2, (0.0, 0.0));
        host.add_window(11, 1, (0.0, 0.0));

        let mut cloner = SceneCloner::new();
        cloner.init(&mut host);
        assert_eq!(host.clone_sources(), vec![SurfaceId(11), SurfaceId(10)]);
    }

    #[test]
    fn test_windows_rebuilt_on_interval() {
        let mut host = RecordingHost::new();
        host.add_window(10, 1, (0.0, 0.0));
        let mut cloner = SceneCloner::new();
        cloner.init(&mut host);
        let created = host.clones_created;

        let v = viewport();
        for _ in 0..31 {
            cloner.update(&mut host, 16.0, &v, (0.0, 0.0), 2.0);
        }
        // 496 ms so far
        assert_eq!(host.clones_created, created);

        host.add_window(11, 2, (0.0, 0.0));
        cloner.update(&mut host, 16.0, &v, (0.0, 0.0), 2.0);
        assert_eq!(host.clones_created, created + 2);
        assert_eq!(
            host.clone_sources(),
            vec![SurfaceId(1), SurfaceId(10), SurfaceId(11), SurfaceId(2)]
        );
    }

    #[test]
    fn test_clone_transforms_track_focus() {
        let mut host = RecordingHost::new();
        host.add_window(10, 1, (100.0, 50.0));
        let mut cloner = SceneCloner::new();
        cloner.init(&mut host);

        let v = viewport();
        cloner.update(&mut host, 16.0, &v, (120.0, 60.0), 2.0);

        for layer in cloner.layers() {
            let state = host.clones[&layer.clone];
            assert_eq!(state.scale, 2.0);
            let expected = match layer.kind {
                LayerKind::Window => (-4.0, 16.0),
                _ => (36.0 - 240.0, 36.0 - 120.0),
            };
            assert_eq!((state.translate_x, state.translate_y), expected);
        }
    }

    #[test]
    fn test_destroy_removes_everything() {
        let mut host = RecordingHost::new();
        host.add_window(10, 1, (0.0, 0.0));
        let mut cloner = SceneCloner::new();
        cloner.init(&mut host);
        assert!(!cloner.is_empty());

        cloner.destroy(&mut host);
        assert!(cloner.is_empty());
        assert!(host.children.is_empty());
        assert_eq!(host.clones_created, host.clones_destroyed);
    }
}
