//! Editor session: the single owner of editor state.
//!
//! [`EditorSession`] holds the source image, the adjustment settings and
//! the crop state. Every UI event goes through [`EditorSession::handle`],
//! which mutates the state and returns the [`RenderCommand`]s the host must
//! execute, in order. [`EditorHost`] pairs a session with a
//! [`RenderTarget`] and a [`UiState`] mirror for hosts that just want to
//! dispatch events.
//!
//! Before an image is loaded every event except [`EditorEvent::Load`] is a
//! no-op that produces no commands.

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{ConfigError, EditorConfig};
use crate::crop_session::{transition, CropContext, CropEffect, CropEvent, CropState};
use crate::decode::{Bitmap, CHANNELS};
use crate::encode::{encode_png, EncodeError};
use crate::geometry::{Cursor, Point, Size};
use crate::pipeline::render_frame;
use crate::render::{frame_commands, RenderCommand, RenderTarget, UiState};
use crate::transform::apply_crop;
use crate::{AdjustmentSettings, Setting};

/// Errors from [`EditorSession::export_png`].
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No image loaded")]
    NotLoaded,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Everything the UI can ask the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Replace the source image and reset the editor.
    Load(Bitmap),
    /// Slider input.
    SetSetting { setting: Setting, value: f64 },
    /// Number field input; non-numeric text resets the setting.
    SetSettingText { setting: Setting, text: String },
    StartCrop,
    /// Pointer positions are canvas pixels (see `geometry::client_to_canvas`).
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    ApplyCrop,
    CancelCrop,
}

/// Editor state and event handling.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    source: Option<Bitmap>,
    settings: AdjustmentSettings,
    crop: CropState,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            source: None,
            settings: AdjustmentSettings::default(),
            crop: CropState::Inactive,
        }
    }
}

impl EditorSession {
    /// Create an empty session after validating `config`.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Bitmap> {
        self.source.as_ref()
    }

    pub fn settings(&self) -> &AdjustmentSettings {
        &self.settings
    }

    pub fn crop_state(&self) -> &CropState {
        &self.crop
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Canvas size, which always equals the source size.
    pub fn canvas_size(&self) -> Option<Size> {
        self.source.as_ref().map(Bitmap::size)
    }

    /// Apply one event and return the commands that bring the host up to date.
    pub fn handle(&mut self, event: EditorEvent) -> Vec<RenderCommand> {
        if !self.is_loaded() && !matches!(event, EditorEvent::Load(_)) {
            debug!("ignoring {}: no image loaded", event_name(&event));
            return Vec::new();
        }

        match event {
            EditorEvent::Load(image) => self.load(image),
            EditorEvent::SetSetting { setting, value } => self.set_setting(setting, value),
            EditorEvent::SetSettingText { setting, text } => {
                let value = setting.parse(&text);
                self.set_setting(setting, value)
            }
            EditorEvent::StartCrop => self.crop_event(CropEvent::Start),
            EditorEvent::PointerDown(p) => self.crop_event(CropEvent::PointerDown(p)),
            EditorEvent::PointerMove(p) => self.crop_event(CropEvent::PointerMove(p)),
            EditorEvent::PointerUp(_) => self.crop_event(CropEvent::PointerUp),
            EditorEvent::ApplyCrop => self.crop_event(CropEvent::Apply),
            EditorEvent::CancelCrop => self.crop_event(CropEvent::Cancel),
        }
    }

    /// Commands that repaint the canvas: frame plus crop overlay when active.
    pub fn render(&self) -> Vec<RenderCommand> {
        match self.frame() {
            Some(frame) => frame_commands(frame, self.crop.rect(), &self.config),
            None => Vec::new(),
        }
    }

    /// The adjusted frame without any overlay.
    pub fn frame(&self) -> Option<Bitmap> {
        self.source
            .as_ref()
            .map(|source| render_frame(source, &self.settings))
    }

    /// Encode the adjusted frame as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        let frame = self.frame().ok_or(ExportError::NotLoaded)?;
        let bytes = encode_png(&frame)?;
        info!(
            "exported {}x{} frame as {} ({} bytes)",
            frame.width,
            frame.height,
            self.config.export_file_name,
            bytes.len()
        );
        Ok(bytes)
    }

    fn load(&mut self, image: Bitmap) -> Vec<RenderCommand> {
        if image.is_empty() {
            warn!("ignoring empty image ({}x{})", image.width, image.height);
            return Vec::new();
        }
        if !image.has_valid_len() {
            warn!(
                "ignoring {}x{} image with {} pixel bytes, expected {}",
                image.width,
                image.height,
                image.pixels.len(),
                image.pixel_count() * CHANNELS
            );
            return Vec::new();
        }
        info!("loaded {}x{} image", image.width, image.height);

        let size = image.size();
        self.source = Some(image);
        self.settings = AdjustmentSettings::default();
        self.crop = CropState::Inactive;

        let mut commands = vec![RenderCommand::ResizeCanvas(size)];
        commands.extend(Setting::ALL.map(|setting| RenderCommand::SyncSetting {
            setting,
            value: self.settings.get(setting),
        }));
        commands.extend([
            RenderCommand::SetCropControls(false),
            RenderCommand::SetApplyEnabled(false),
            RenderCommand::SetCursor(Cursor::Default),
            RenderCommand::SetControlsEnabled(true),
        ]);
        commands.extend(self.render());
        commands
    }

    fn set_setting(&mut self, setting: Setting, value: f64) -> Vec<RenderCommand> {
        let value = self.settings.set(setting, value);
        debug!("{} = {}", setting.name(), value);

        let mut commands = vec![RenderCommand::SyncSetting { setting, value }];
        commands.extend(self.render());
        commands
    }

    fn crop_event(&mut self, event: CropEvent) -> Vec<RenderCommand> {
        let Some(canvas) = self.canvas_size() else {
            return Vec::new();
        };
        let ctx = CropContext::new(canvas, self.config.handle_size);
        let next = transition(&self.crop, event, &ctx);
        self.crop = next.state;

        let mut commands = Vec::new();
        for effect in next.effects {
            match effect {
                CropEffect::Redraw => commands.extend(self.render()),
                CropEffect::SetCursor(cursor) => commands.push(RenderCommand::SetCursor(cursor)),
                CropEffect::SetApplyEnabled(enabled) => {
                    commands.push(RenderCommand::SetApplyEnabled(enabled))
                }
                CropEffect::ShowCropControls(visible) => {
                    commands.push(RenderCommand::SetCropControls(visible))
                }
                CropEffect::Commit(region) => {
                    if let Some(source) = self.source.take() {
                        let cropped = apply_crop(&source, region);
                        info!(
                            "cropped {}x{} to {}x{} at ({}, {})",
                            source.width,
                            source.height,
                            cropped.width,
                            cropped.height,
                            region.x,
                            region.y
                        );
                        commands.push(RenderCommand::ResizeCanvas(cropped.size()));
                        self.source = Some(cropped);
                    }
                }
            }
        }
        commands
    }
}

fn event_name(event: &EditorEvent) -> &'static str {
    match event {
        EditorEvent::Load(_) => "Load",
        EditorEvent::SetSetting { .. } => "SetSetting",
        EditorEvent::SetSettingText { .. } => "SetSettingText",
        EditorEvent::StartCrop => "StartCrop",
        EditorEvent::PointerDown(_) => "PointerDown",
        EditorEvent::PointerMove(_) => "PointerMove",
        EditorEvent::PointerUp(_) => "PointerUp",
        EditorEvent::ApplyCrop => "ApplyCrop",
        EditorEvent::CancelCrop => "CancelCrop",
    }
}

/// A session wired to a render target.
///
/// Every command is folded into the [`UiState`] mirror before it is
/// executed, so the mirror is up to date even when the target fails.
#[derive(Debug)]
pub struct EditorHost<T: RenderTarget> {
    session: EditorSession,
    target: T,
    ui: UiState,
}

impl<T: RenderTarget> EditorHost<T> {
    pub fn new(session: EditorSession, target: T) -> Self {
        Self {
            session,
            target,
            ui: UiState::default(),
        }
    }

    /// Handle `event` and execute the resulting commands on the target.
    pub fn dispatch(&mut self, event: EditorEvent) -> Result<(), T::Error> {
        let commands = self.session.handle(event);
        for command in &commands {
            self.ui.apply(command);
            self.target.execute(command)?;
        }
        Ok(())
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
