//! Headless sprite list
//!
//! Keeps sprites in draw order and records what the last frame drew instead of
//! touching a GPU. Hit tests use each sprite's axis-aligned rectangle.

use glam::Vec2;

use super::{SpriteDesc, SpriteHandle, SpriteList, Texture};
use crate::physics::Pose;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(String),
    Sprite { texture: Texture, pose: Pose },
    Line { from: Vec2, to: Vec2, width: f32 },
    Text { text: String, at: Vec2 },
}

#[derive(Debug, Clone)]
struct Entry {
    handle: SpriteHandle,
    desc: SpriteDesc,
}

/// Recording implementation of `SpriteList`
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    sprites: Vec<Entry>,
    background: Option<String>,
    /// Lines and text queued since the last `draw`
    overlay: Vec<DrawCommand>,
    /// Everything the last completed frame drew
    frame: Vec<DrawCommand>,
    next_handle: u32,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn contains(&self, handle: SpriteHandle) -> bool {
        self.sprites.iter().any(|e| e.handle == handle)
    }

    /// Current description (texture, size, pose) of a sprite
    pub fn sprite(&self, handle: SpriteHandle) -> Option<&SpriteDesc> {
        self.sprites.iter().find(|e| e.handle == handle).map(|e| &e.desc)
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Commands recorded by the most recent `draw`
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.frame
    }
}

impl SpriteList for DrawList {
    fn add(&mut self, desc: SpriteDesc) -> SpriteHandle {
        let handle = SpriteHandle(self.next_handle);
        self.next_handle += 1;
        self.sprites.push(Entry { handle, desc });
        handle
    }

    fn remove(&mut self, handle: SpriteHandle) -> bool {
        let before = self.sprites.len();
        self.sprites.retain(|e| e.handle != handle);
        self.sprites.len() != before
    }

    fn set_pose(&mut self, handle: SpriteHandle, pose: Pose) {
        if let Some(entry) = self.sprites.iter_mut().find(|e| e.handle == handle) {
            entry.desc.pose = pose;
        }
    }

    fn hit_test(&self, handle: SpriteHandle, point: Vec2) -> bool {
        self.sprite(handle).is_some_and(|desc| {
            let d = (point - desc.pose.position).abs();
            let half = desc.size / 2.0;
            d.x <= half.x && d.y <= half.y
        })
    }

    fn set_background(&mut self, id: &str) {
        self.background = Some(id.to_string());
    }

    fn draw(&mut self) {
        let mut frame = Vec::with_capacity(self.sprites.len() + self.overlay.len() + 1);
        if let Some(bg) = &self.background {
            frame.push(DrawCommand::Background(bg.clone()));
        }
        frame.extend(self.sprites.iter().map(|e| DrawCommand::Sprite {
            texture: e.desc.texture,
            pose: e.desc.pose,
        }));
        frame.append(&mut self.overlay);
        self.frame = frame;
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32) {
        self.overlay.push(DrawCommand::Line { from, to, width });
    }

    fn draw_text(&mut self, text: &str, at: Vec2) {
        self.overlay.push(DrawCommand::Text {
            text: text.to_string(),
            at,
        });
    }
}
