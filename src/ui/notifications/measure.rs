// SPDX-License-Identifier: MPL-2.0
//! Toast size measurement.
//!
//! A toast's slot cannot be computed before its rendered size is known.
//! Renderers with real font metrics implement [`Measure`]; the default
//! [`ContentMeasure`] estimates sizes from character counts using fixed
//! average glyph widths.

use super::notification::{ToastContent, ToastOptions};
use crate::config::defaults::{TOAST_MAX_WIDTH, TOAST_MIN_WIDTH};
use iced::Size;

/// Size-measurement service.
pub trait Measure {
    /// Returns the rendered size of a toast with this content and options.
    fn measure(&self, content: &ToastContent, options: &ToastOptions) -> Size;
}

impl<F> Measure for F
where
    F: Fn(&ToastContent, &ToastOptions) -> Size,
{
    fn measure(&self, content: &ToastContent, options: &ToastOptions) -> Size {
        self(content, options)
    }
}

/// Metric-free estimator with word wrapping approximated per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentMeasure {
    pub min_width: f32,
    pub max_width: f32,
    pub padding: f32,
    pub spacing: f32,
    pub icon_size: f32,
    pub button_size: f32,
    pub progress_height: f32,
    pub title_char_width: f32,
    pub title_line_height: f32,
    pub body_char_width: f32,
    pub body_line_height: f32,
}

impl Default for ContentMeasure {
    fn default() -> Self {
        Self {
            min_width: TOAST_MIN_WIDTH,
            max_width: TOAST_MAX_WIDTH,
            padding: 16.0,
            spacing: 8.0,
            icon_size: 20.0,
            button_size: 32.0,
            progress_height: 4.0,
            title_char_width: 8.0,
            title_line_height: 20.0,
            body_char_width: 7.0,
            body_line_height: 18.0,
        }
    }
}

impl ContentMeasure {
    fn chrome_width(&self, content: &ToastContent, options: &ToastOptions) -> f32 {
        let icon = if content.icon().is_some() {
            self.icon_size + self.spacing
        } else {
            0.0
        };
        let close = if options.closable {
            self.button_size + self.spacing
        } else {
            0.0
        };
        icon + close + 2.0 * self.padding
    }

    fn text_width(text: &str, char_width: f32) -> f32 {
        text.chars().count() as f32 * char_width
    }

    fn line_count(text: &str, char_width: f32, available: f32) -> f32 {
        if available <= 0.0 {
            return 1.0;
        }
        (Self::text_width(text, char_width) / available).ceil().max(1.0)
    }
}

impl Measure for ContentMeasure {
    fn measure(&self, content: &ToastContent, options: &ToastOptions) -> Size {
        let chrome = self.chrome_width(content, options);
        let natural = Self::text_width(&content.title, self.title_char_width)
            .max(Self::text_width(&content.message, self.body_char_width));
        let width = (natural + chrome).clamp(self.min_width, self.max_width.max(self.min_width));
        let available = width - chrome;

        let mut height = self.padding;
        if !content.title.is_empty() {
            let lines = Self::line_count(&content.title, self.title_char_width, available);
            height += lines * self.title_line_height + self.spacing / 2.0;
        }
        if !content.message.is_empty() {
            let lines = Self::line_count(&content.message, self.body_char_width, available);
            height += lines * self.body_line_height + self.spacing / 2.0;
        }
        if options.show_progress {
            height += self.progress_height + self.spacing;
        }
        if !content.actions.is_empty() {
            height += self.button_size + self.spacing;
        }
        height += self.padding;

        Size::new(width, height)
    }
}
