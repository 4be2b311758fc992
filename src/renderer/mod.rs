//! Rendering module
//!
//! The match is drawn through a [`Canvas`], a minimal immediate-mode
//! drawing surface the host provides. Draw state changes are bracketed by
//! [`DrawScope`] so they never leak into the next element.

pub mod scene;

use std::ops::{Deref, DerefMut};

use glam::Vec2;

pub use scene::draw_match;

use crate::sim::Rect;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::gray(255);
    pub const BLACK: Color = Color::gray(0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear blend toward `other`; `t` = 0 gives `self`, 1 gives `other`
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Outline for filled shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub weight: f32,
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Drawing surface the host implements
pub trait Canvas {
    /// Save draw state
    fn push(&mut self);
    /// Restore the last saved draw state
    fn pop(&mut self);
    fn background(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, stroke: Option<Stroke>);
    /// Filled rectangle, `corner_radius` rounds the corners
    fn fill_rect(&mut self, rect: Rect, fill: Color, corner_radius: f32);
    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: Align);
    /// Draw a named icon image centred on `center`
    fn icon(&mut self, name: &str, center: Vec2, size: Vec2);
}

/// Pushes draw state on creation and pops it when dropped
pub struct DrawScope<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> DrawScope<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.push();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for DrawScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for DrawScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for DrawScope<'_, C> {
    fn drop(&mut self) {
        self.canvas.pop();
    }
}
