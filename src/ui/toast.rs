/// Toast notification system for user feedback.
///
/// Non-intrusive, temporary notifications rendered in the top-right
/// corner that dismiss themselves after a per-level duration.
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::theme::Theme;

/// Maximum number of toasts to display simultaneously
const MAX_VISIBLE_TOASTS: usize = 4;

const TOAST_WIDTH: u16 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: String, level: ToastLevel) -> Self {
        let duration = match level {
            ToastLevel::Info => Duration::from_secs(3),
            ToastLevel::Success => Duration::from_secs(2),
            ToastLevel::Warning => Duration::from_secs(4),
            ToastLevel::Error => Duration::from_secs(5),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            message,
            level,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    pub fn icon(&self) -> &'static str {
        match self.level {
            ToastLevel::Info => "ℹ",
            ToastLevel::Success => "✓",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }
}

/// Queue of pending toasts; oldest visible toasts drop off as they
/// expire or as newer ones push past the visibility limit.
pub struct ToastStack {
    toasts: VecDeque<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastLevel::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastLevel::Success));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastLevel::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastLevel::Error));
    }

    pub fn remove_expired(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.right().saturating_sub(width);
        let mut y = area.y;

        for toast in self.toasts.iter().take(MAX_VISIBLE_TOASTS) {
            if y + 3 > area.bottom() {
                break;
            }

            let color = match toast.level {
                ToastLevel::Info => theme.accent,
                ToastLevel::Success => theme.success,
                ToastLevel::Warning => theme.warning,
                ToastLevel::Error => theme.error,
            };

            let toast_area = Rect::new(x, y, width, 3);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(ratatui::style::Style::default().fg(color));
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", toast.icon()),
                    ratatui::style::Style::default().fg(color),
                ),
                Span::styled(toast.message.clone(), theme.text_style()),
            ]);

            frame.render_widget(Clear, toast_area);
            frame.render_widget(Paragraph::new(line).block(block), toast_area);

            y += 3;
        }
    }
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_caps_visible_toasts() {
        let mut stack = ToastStack::new();
        for i in 0..10 {
            stack.info(format!("toast {}", i));
        }
        assert_eq!(stack.len(), MAX_VISIBLE_TOASTS);
    }

    #[test]
    fn test_expired_toasts_are_removed() {
        let mut stack = ToastStack::new();
        let mut toast = Toast::new("done".to_string(), ToastLevel::Success);
        toast.duration = Duration::from_secs(0);
        stack.push(toast);
        stack.success("still here");

        stack.remove_expired();
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_error_toasts_outlive_success_toasts() {
        let error = Toast::new("failed".to_string(), ToastLevel::Error);
        let success = Toast::new("saved".to_string(), ToastLevel::Success);
        assert!(error.duration > success.duration);
    }
}
