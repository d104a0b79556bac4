//! Desk screen: pick a channel, then either write a message or read how to reach us.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph, Wrap};

use crate::form::FormLabels;
use crate::model::{Channel, Field, Submission, SubmissionOutcome};
use crate::notify::{Notifier, Severity, StatusLine};
use crate::registry::ChannelRegistry;
use crate::submit::SubmissionController;

/// What keystrokes currently act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Channels,
    Field(Field),
}

pub struct DeskScreen<'r> {
    desk: SubmissionController<'r, StatusLine>,
    focus: Focus,
    last_submission: Option<Submission>,
}

impl<'r> DeskScreen<'r> {
    pub fn new(registry: &'r ChannelRegistry) -> Self {
        Self {
            desk: SubmissionController::new(registry, StatusLine::default()),
            focus: Focus::Channels,
            last_submission: None,
        }
    }

    pub fn current_channel(&self) -> &'r Channel {
        self.desk.current()
    }

    pub fn in_channel_list(&self) -> bool {
        self.focused_field().is_none()
    }

    /// The field being edited, if the selected channel has a form at all.
    fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Focus::Field(field) if self.desk.current().accepts_inline() => Some(field),
            _ => None,
        }
    }

    pub fn move_up(&mut self) {
        if let Some(index) = self.current_index()
            && index > 0
        {
            self.select_index(index - 1);
        }
    }

    pub fn move_down(&mut self) {
        if let Some(index) = self.current_index() {
            self.select_index(index + 1);
        }
    }

    /// Shortcut offered on redirect channels: back to the default channel.
    pub fn jump_to_default(&mut self) {
        self.desk.reset_selection();
        self.desk.notifier().clear();
    }

    pub fn on_enter(&mut self) {
        match self.focused_field() {
            None => {
                if self.desk.current().accepts_inline() {
                    self.focus = Focus::Field(Field::Name);
                }
            }
            Some(Field::Message) => self.submit(),
            Some(field) => self.focus = Focus::Field(field.next()),
        }
    }

    pub fn on_tab(&mut self) {
        match self.focused_field() {
            None => self.on_enter(),
            Some(field) => self.focus = Focus::Field(field.next()),
        }
    }

    pub fn on_back_tab(&mut self) {
        if let Some(field) = self.focused_field() {
            // Two steps forward around a cycle of three is one step back.
            self.focus = Focus::Field(field.next().next());
        }
    }

    pub fn on_esc(&mut self) {
        self.focus = Focus::Channels;
    }

    pub fn on_char(&mut self, c: char) {
        self.edit(|value| value.push(c));
    }

    pub fn on_backspace(&mut self) {
        self.edit(|value| {
            value.pop();
        });
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.desk.form().get(field).to_string();
        change(&mut value);
        self.desk.form_mut().set(field, value);
    }

    fn current_index(&self) -> Option<usize> {
        self.desk.registry().position(&self.desk.current().id)
    }

    fn select_index(&mut self, index: usize) {
        let Some(channel) = self.desk.registry().list_channels().get(index) else {
            return;
        };
        if let Err(e) = self.desk.select(&channel.id) {
            tracing::error!(error = %e, "channel list out of sync with registry");
            return;
        }
        self.desk.notifier().clear();
    }

    fn submit(&mut self) {
        match self.desk.submit() {
            Ok(SubmissionOutcome::Rejected { missing }) => {
                if let Some(first) = missing.first() {
                    self.focus = Focus::Field(*first);
                }
            }
            Ok(SubmissionOutcome::Accepted { submission, .. }) => {
                self.last_submission = Some(submission);
                self.focus = Focus::Field(Field::Name);
            }
            Err(e) => {
                tracing::error!(error = %e, "submit reached a channel without a form");
                self.desk.notifier().notify(&e.to_string(), Severity::Error);
                self.focus = Focus::Channels;
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::vertical([
            Constraint::Length(3), // title
            Constraint::Min(0),    // panes
            Constraint::Length(1), // status / help
        ])
        .split(area);

        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::DarkGray);

        let title = Paragraph::new(Line::from(vec![Span::styled(
            "Patient Contact Desk",
            highlight,
        )]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(title, rows[0]);

        let panes = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);
        self.render_channels(frame, panes[0]);

        let channel = self.desk.current();
        match self.desk.labels() {
            Some(labels) => self.render_form(frame, panes[1], channel, &labels),
            None => self.render_contact(frame, panes[1], channel),
        }

        let status = match self.desk.notifier().current() {
            Some(notice) => {
                let color = match notice.severity {
                    Severity::Info => Color::Green,
                    Severity::Error => Color::Red,
                };
                Line::from(Span::styled(
                    format!(" {}", notice.message),
                    Style::default().fg(color),
                ))
            }
            None => {
                let help = if self.in_channel_list() {
                    " ↑↓ channel  ⏎ write  d default  q quit"
                } else {
                    " tab next field  ⏎ next / send  esc channels"
                };
                Line::from(Span::styled(help, muted))
            }
        };
        frame.render_widget(Paragraph::new(status), rows[2]);
    }

    fn render_channels(&self, frame: &mut Frame, area: Rect) {
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::DarkGray);

        let current = self.desk.current();
        let items: Vec<ListItem> = self
            .desk
            .registry()
            .list_channels()
            .iter()
            .map(|channel| {
                let selected = channel.id == current.id;
                let style = if selected { highlight } else { normal };
                let pointer = if selected { "› " } else { "  " };
                let mut spans = vec![
                    Span::styled(pointer, style),
                    Span::styled(channel.display_name.as_str(), style),
                ];
                if selected {
                    spans.push(Span::styled("  selected", muted));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(
            Block::bordered()
                .title(" Channels ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(list, area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, channel: &Channel, labels: &FormLabels) {
        let muted = Style::default().fg(Color::DarkGray);
        let value_style = Style::default().fg(Color::White);
        let focused_label = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                "Fill in your details and tell us how we can help.",
                muted,
            )),
            Line::default(),
        ];

        let focused = self.focused_field();
        for field in Field::ALL {
            let is_focused = focused == Some(field);
            let label_style = if is_focused {
                focused_label
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(labels.label(field), label_style)));

            let value = self.desk.form().get(field);
            let mut spans = vec![Span::raw("  ")];
            if value.is_empty() && !is_focused {
                spans.push(Span::styled(labels.placeholder(field), muted));
            } else {
                spans.push(Span::styled(value, value_style));
            }
            if is_focused {
                spans.push(Span::styled("█", muted));
            }
            lines.push(Line::from(spans));
            lines.push(Line::default());
        }

        if let Some(submission) = &self.last_submission {
            let short_id = &submission.id.to_string()[..8];
            lines.push(Line::from(Span::styled(
                format!("Last message: {short_id} via {}", submission.channel_name),
                muted,
            )));
        }

        let pane = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .title(format!(" {} ", channel.display_name))
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(pane, area);
    }

    fn render_contact(&self, frame: &mut Frame, area: Rect, channel: &Channel) {
        let muted = Style::default().fg(Color::DarkGray);
        let strong = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                "Use the details below to get in touch.",
                muted,
            )),
            Line::default(),
            Line::from(format!("Contact us via {}", channel.display_name)),
            Line::from(Span::styled(
                format!("  {}", channel.contact_info().unwrap_or_default()),
                strong,
            )),
        ];

        let registry = self.desk.registry();
        let hours = registry.service_hours();
        if !hours.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Service hours:", muted)));
            lines.extend(hours.iter().map(|h| Line::from(format!("  {h}"))));
        }

        let default = registry.default_channel();
        if default.accepts_inline() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!(
                    "Tip: for immediate help press d to use {}.",
                    default.display_name
                ),
                muted,
            )));
        }

        let pane = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .title(format!(" {} ", channel.display_name))
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(pane, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormSnapshot;
    use crate::registry::tests::sample_registry;

    fn type_str(screen: &mut DeskScreen, s: &str) {
        for c in s.chars() {
            screen.on_char(c);
        }
    }

    fn fill_and_send(screen: &mut DeskScreen, name: &str, contact: &str, message: &str) {
        screen.on_enter(); // into the form
        type_str(screen, name);
        screen.on_enter();
        type_str(screen, contact);
        screen.on_enter();
        type_str(screen, message);
        screen.on_enter(); // send
    }

    #[test]
    fn full_flow_sends_message() {
        let registry = sample_registry();
        let mut screen = DeskScreen::new(&registry);

        fill_and_send(&mut screen, "Ana", "ana@x.com", "Dúvida sobre consulta");

        let submission = screen.last_submission.as_ref().unwrap();
        assert_eq!(submission.channel_id, "online");
        assert_eq!(submission.message, "Dúvida sobre consulta");
        assert_eq!(screen.desk.form().snapshot(), FormSnapshot::default());
        assert_eq!(screen.focus, Focus::Field(Field::Name));

        let notice = screen.desk.notifier().current().unwrap();
        assert_eq!(notice.severity, Severity::Info);
    }

    #[test]
    fn missing_field_refocuses_it() {
        let registry = sample_registry();
        let mut screen = DeskScreen::new(&registry);

        fill_and_send(&mut screen, "Ana", "   ", "Hello");

        assert!(screen.last_submission.is_none());
        assert_eq!(screen.focus, Focus::Field(Field::Contact));
        assert_eq!(screen.desk.form().get(Field::Name), "Ana");
        let notice = screen.desk.notifier().current().unwrap();
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn redirect_channel_has_no_form() {
        let registry = sample_registry();
        let mut screen = DeskScreen::new(&registry);

        screen.move_down();
        assert_eq!(screen.current_channel().id, "whatsapp");

        screen.on_enter();
        assert!(screen.in_channel_list());
        type_str(&mut screen, "ignored");
        assert_eq!(screen.desk.form().snapshot(), FormSnapshot::default());
    }

    #[test]
    fn list_navigation_stops_at_edges() {
        let registry = sample_registry();
        let mut screen = DeskScreen::new(&registry);

        screen.move_up();
        assert_eq!(screen.current_channel().id, "online");

        for _ in 0..10 {
            screen.move_down();
        }
        assert_eq!(screen.current_channel().id, "phone");

        screen.jump_to_default();
        assert_eq!(screen.current_channel().id, "online");
    }

    #[test]
    fn backspace_and_field_cycling() {
        let registry = sample_registry();
        let mut screen = DeskScreen::new(&registry);

        screen.on_tab();
        type_str(&mut screen, "Anna");
        screen.on_backspace();
        assert_eq!(screen.desk.form().get(Field::Name), "Ann");

        screen.on_tab();
        assert_eq!(screen.focus, Focus::Field(Field::Contact));
        screen.on_back_tab();
        assert_eq!(screen.focus, Focus::Field(Field::Name));
        screen.on_back_tab();
        assert_eq!(screen.focus, Focus::Field(Field::Message));

        screen.on_esc();
        assert!(screen.in_channel_list());
        // Leaving the form keeps what was typed.
        assert_eq!(screen.desk.form().get(Field::Name), "Ann");
    }

    #[test]
    fn switching_channel_clears_status() {
        let registry = sample_registry();
        let mut screen = DeskScreen::new(&registry);

        fill_and_send(&mut screen, "", "", "");
        assert!(screen.desk.notifier().current().is_some());

        screen.on_esc();
        screen.move_down();
        assert!(screen.desk.notifier().current().is_none());
    }
}
