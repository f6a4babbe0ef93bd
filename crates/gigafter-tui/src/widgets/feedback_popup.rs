//! Detail popup for one signup: contact details, full address, and the
//! applicant's beta feedback wrapped to the popup width.
//!
//! Opened with `Enter` on a table row; closed with `Enter` or `Escape`.

use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use chrono::FixedOffset;
use gigafter_core::export::SIGNUP_DATE_FORMAT;
use gigafter_core::SignupRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct FeedbackPopup<'a> {
    record: &'a SignupRecord,
    offset: FixedOffset,
    theme: &'a Theme,
}

impl<'a> FeedbackPopup<'a> {
    pub fn new(record: &'a SignupRecord, offset: FixedOffset, theme: &'a Theme) -> Self {
        Self { record, offset, theme }
    }
}

impl Widget for FeedbackPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 18, area);
        Clear.render(popup, buf);

        let r = self.record;
        let block = Block::bordered()
            .title(format!(" {} (Enter to close) ", r.establishment_name))
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let label = Style::default().add_modifier(Modifier::BOLD);
        let field = |name: &'static str, value: String| {
            Line::from(vec![Span::styled(format!("{name:<12}"), label), Span::raw(value)])
        };
        let missing = || "—".to_string();

        let mut lines = vec![
            field(
                "Signed up",
                r.created_at.with_timezone(&self.offset).format(SIGNUP_DATE_FORMAT).to_string(),
            ),
            field("Contact", r.contact_name.clone()),
            field("Email", r.email.clone()),
            field("Phone", r.phone.clone().unwrap_or_else(missing)),
            field("Address", r.full_address()),
            field("", format!("{}, {} {}", r.city, r.state, r.zip_code)),
            field("Source", r.how_heard_about_us.clone().unwrap_or_else(missing)),
            Line::from(""),
            Line::from(Span::styled("Beta feedback", label)),
        ];
        match r.beta_feedback.as_deref() {
            Some(text) => lines.extend(text.lines().map(|l| Line::from(l.to_string()))),
            None => lines.push(Line::from(Span::styled("(none given)", self.theme.table_muted))),
        }

        Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
    }
}
