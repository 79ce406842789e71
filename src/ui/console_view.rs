// LogPane - ui/console_view.rs
//
// The embeddable console widget: a movable overlay that is either a small
// folded badge or the expanded panel (filter bar, log rows, control buttons).
//
// The widget owns its `Console` (and through it the store), so the log
// history lives exactly as long as the widget. Rendering is immediate-mode:
// every frame pumps queued commands, then re-derives the visible entries.
//
// Store changes reach the presentation state through a store subscription:
//   - Appended: follow to the bottom if the view was at the bottom.
//   - Cleared / FilterChanged: row indices shift, so per-row expansion resets.

use crate::app::console::{Console, ConsoleHandle};
use crate::core::format;
use crate::core::model::LogEntry;
use crate::core::store::{StoreEvent, SubscriptionToken};
use crate::platform::config::{Appearance, ConsoleConfig, ToastConfig};
use crate::ui::follow;
use crate::ui::theme::{self, Theme};
use crate::ui::toast::Toast;
use crate::util::constants::{FOLLOW_TOLERANCE, TOAST_COPIED_ALL, TOAST_COPIED_SELECTED};
use egui::text::{LayoutJob, TextFormat};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Callback for the custom action button, invoked with every entry in the
/// store (unfiltered, in order).
pub type CustomAction = Box<dyn FnMut(&[LogEntry])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollTarget {
    Top,
    Bottom,
}

/// Store events collected by the subscription, consumed once per frame.
#[derive(Debug, Default)]
struct PendingChanges {
    appended: bool,
    rows_invalidated: bool,
}

/// Collapsible on-screen log console.
pub struct LogConsole {
    id: egui::Id,
    console: Console,
    appearance: Appearance,
    toast_config: ToastConfig,
    theme: Theme,
    custom_action: Option<CustomAction>,

    expanded: bool,
    filter_input: String,
    expanded_rows: HashSet<usize>,
    scroll_target: Option<ScrollTarget>,
    was_at_bottom: bool,
    toast: Option<Toast>,

    changes: Rc<RefCell<PendingChanges>>,
    subscription: SubscriptionToken,
}

impl LogConsole {
    /// Create a folded console styled from `config`.
    pub fn new(config: &ConsoleConfig) -> Self {
        let mut console = Console::new();
        let changes = Rc::new(RefCell::new(PendingChanges::default()));
        let sink = Rc::clone(&changes);
        let subscription = console.store_mut().subscribe(move |event| {
            let mut pending = sink.borrow_mut();
            match event {
                StoreEvent::Appended { .. } => pending.appended = true,
                StoreEvent::Cleared | StoreEvent::FilterChanged => {
                    pending.rows_invalidated = true;
                }
            }
        });

        Self {
            id: egui::Id::new("logpane_console"),
            console,
            appearance: config.appearance.clone(),
            toast_config: config.toast.clone(),
            theme: Theme::from_config(config),
            custom_action: None,
            expanded: false,
            filter_input: String::new(),
            expanded_rows: HashSet::new(),
            scroll_target: None,
            was_at_bottom: true,
            toast: None,
            changes,
            subscription,
        }
    }

    /// Use a distinct egui id; required when showing more than one console.
    pub fn with_id(mut self, id_source: impl std::hash::Hash) -> Self {
        self.id = egui::Id::new(id_source);
        self
    }

    /// Add the custom action button.
    pub fn with_custom_action(mut self, action: impl FnMut(&[LogEntry]) + 'static) -> Self {
        self.custom_action = Some(Box::new(action));
        self
    }

    /// A thread-safe handle for pushing logs into this console.
    pub fn handle(&self) -> ConsoleHandle {
        self.console.handle()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn has_custom_action(&self) -> bool {
        self.custom_action.is_some()
    }

    /// Message of the toast currently on screen, if any.
    pub fn toast_message(&self) -> Option<&str> {
        self.toast.as_ref().map(Toast::message)
    }

    // =========================================================================
    // Actions (shared by the buttons and by host code)
    // =========================================================================

    /// Text placed on the clipboard by "copy all".
    pub fn copy_all_text(&self) -> String {
        format::all_entries_formatted(self.console.store().entries(), &self.appearance.date_format)
    }

    /// Text placed on the clipboard by "copy selected" for a visible row.
    ///
    /// `None` when the row is past the current visible count.
    pub fn copy_row_text(&self, row: usize) -> Option<String> {
        self.console
            .store()
            .visible_entries()
            .get(row)
            .map(|entry| format::formatted(entry, &self.appearance.date_format))
    }

    /// Run the custom action, if configured, and show its toast.
    pub fn run_custom_action(&mut self) -> bool {
        let Some(action) = self.custom_action.as_mut() else {
            return false;
        };
        action(self.console.store().entries());
        let text = self.toast_config.custom_action_text.clone();
        self.show_toast(text);
        true
    }

    /// Replace the filter text, keeping the filter box in sync.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_input = text.to_string();
        self.console.store_mut().set_filter(Some(text));
        self.apply_changes();
    }

    /// Scroll to the first visible row on the next frame. No-op when nothing
    /// is visible.
    pub fn scroll_to_top(&mut self) {
        self.scroll_target = Some(ScrollTarget::Top);
    }

    /// Scroll to the last visible row on the next frame. No-op when nothing
    /// is visible.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_target = Some(ScrollTarget::Bottom);
    }

    /// Remove every entry from the store.
    pub fn clear(&mut self) {
        self.console.store_mut().clear();
        self.apply_changes();
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        let toast = Toast::new(message, Duration::from_secs(self.toast_config.dismiss_secs));
        tracing::debug!(message = toast.message(), "Toast shown");
        self.toast = Some(toast);
    }

    /// Fold pending store events into presentation state.
    fn apply_changes(&mut self) {
        let pending = std::mem::take(&mut *self.changes.borrow_mut());
        if pending.rows_invalidated {
            self.expanded_rows.clear();
        }
        if pending.appended && self.was_at_bottom && self.scroll_target.is_none() {
            self.scroll_target = Some(ScrollTarget::Bottom);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Pump queued logs and draw the console. Call once per frame, after the
    /// host's own UI so logs raised while building it are picked up.
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.console.has_repaint_hook() {
            let repaint_ctx = ctx.clone();
            self.console
                .set_repaint_hook(Arc::new(move || repaint_ctx.request_repaint()));
        }

        self.console.pump();
        self.apply_changes();

        let now = Instant::now();
        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }

        let panel = egui::Area::new(self.id)
            .order(egui::Order::Foreground)
            .default_pos(egui::pos2(theme::PANEL_MARGIN, theme::PANEL_MARGIN))
            .movable(true)
            .show(ctx, |ui| {
                if self.expanded {
                    self.show_expanded(ui);
                } else {
                    self.show_folded(ui);
                }
            });

        if self.expanded {
            if let Some(toast) = &self.toast {
                self.paint_toast(ctx, panel.response.rect, toast);
                ctx.request_repaint_after(toast.remaining_at(now));
            }
        }

        if self.console.take_deferred_wake() {
            ctx.request_repaint();
        }
    }

    fn show_folded(&mut self, ui: &mut egui::Ui) {
        if self.show_title(ui, &self.appearance.folded_title, self.appearance.folded_width) {
            self.expanded = true;
        }
    }

    fn show_expanded(&mut self, ui: &mut egui::Ui) {
        if self.show_title(ui, &self.appearance.expanded_title, self.appearance.expanded_width) {
            self.expanded = false;
            return;
        }

        let frame = egui::Frame::default()
            .fill(self.theme.background)
            .stroke(self.theme.border_stroke())
            .inner_margin(4.0);
        let width = self.appearance.expanded_width;
        frame.show(ui, |ui| {
            ui.set_width(width);
            self.show_filter_bar(ui);
            self.show_rows(ui);
            self.show_controls(ui);
        });
    }

    /// Title strip; returns true when tapped.
    fn show_title(&self, ui: &mut egui::Ui, title: &str, width: f32) -> bool {
        let height = self.appearance.title_area_height;
        egui::Frame::default()
            .fill(self.theme.background)
            .stroke(self.theme.border_stroke())
            .show(ui, |ui| {
                ui.set_width(width);
                ui.set_height(height);
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new(title).color(self.theme.text))
                            .sense(egui::Sense::click()),
                    )
                    .clicked()
                })
                .inner
            })
            .inner
    }

    fn show_filter_bar(&mut self, ui: &mut egui::Ui) {
        let height = self.appearance.top_control_area_height;
        let changed = ui
            .horizontal(|ui| {
                ui.set_height(height);
                ui.label(egui::RichText::new("\u{1F50D}").color(self.theme.text));
                ui.add(
                    egui::TextEdit::singleline(&mut self.filter_input)
                        .hint_text("Filter")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            })
            .inner;

        if changed {
            self.console
                .store_mut()
                .set_filter(Some(self.filter_input.as_str()));
            self.apply_changes();
        }
    }

    fn show_rows(&mut self, ui: &mut egui::Ui) {
        let height = self.appearance.log_area_height;
        let scroll_target = self.scroll_target.take();
        let mut toggled_row: Option<usize> = None;
        let mut copy_row: Option<usize> = None;

        let visible = self.console.store().visible_entries();
        let output = egui::ScrollArea::vertical()
            .id_salt(self.id.with("rows"))
            .max_height(height)
            .auto_shrink([false; 2])
            // Scroll targets must land within this frame: the follow check
            // below reads the final offset.
            .animated(false)
            .show(ui, |ui| {
                if visible.is_empty() {
                    let hint = if self.console.store().is_empty() {
                        "No logs yet."
                    } else {
                        "No logs match the filter."
                    };
                    ui.label(egui::RichText::new(hint).weak());
                    return;
                }

                let last = visible.len() - 1;
                for (row, entry) in visible.iter().enumerate() {
                    let response = self.show_row(ui, entry, self.expanded_rows.contains(&row));
                    if response.clicked() {
                        toggled_row = Some(row);
                    }
                    if response.secondary_clicked() || response.long_touched() {
                        copy_row = Some(row);
                    }
                    match scroll_target {
                        Some(ScrollTarget::Top) if row == 0 => {
                            response.scroll_to_me(Some(egui::Align::TOP));
                        }
                        Some(ScrollTarget::Bottom) if row == last => {
                            response.scroll_to_me(Some(egui::Align::BOTTOM));
                        }
                        _ => {}
                    }
                }
            });

        self.was_at_bottom = follow::is_near_bottom(
            output.state.offset.y,
            output.inner_rect.height(),
            output.content_size.y,
            FOLLOW_TOLERANCE,
        );

        if let Some(row) = toggled_row {
            if !self.expanded_rows.remove(&row) {
                self.expanded_rows.insert(row);
            }
        }
        if let Some(text) = copy_row.and_then(|row| self.copy_row_text(row)) {
            ui.ctx().copy_text(text);
            self.show_toast(TOAST_COPIED_SELECTED);
        }
    }

    fn show_row(&self, ui: &mut egui::Ui, entry: &LogEntry, expanded: bool) -> egui::Response {
        let text_format = TextFormat {
            font_id: egui::FontId::monospace(theme::ROW_FONT_SIZE),
            color: self.theme.level_colour(entry.level()),
            ..Default::default()
        };

        let mut job = LayoutJob::default();
        job.append(if expanded { "\u{25BE}" } else { ">" }, 0.0, text_format.clone());
        job.append(
            &self.appearance.date_format.render(entry.timestamp()),
            theme::DATE_COLUMN_SPACING,
            text_format.clone(),
        );
        job.append(entry.text(), theme::DATE_COLUMN_SPACING, text_format);

        let label = egui::Label::new(job).sense(egui::Sense::click());
        let label = if expanded { label.wrap() } else { label.truncate() };
        ui.add(label)
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let height = self.appearance.bottom_control_area_height;
        let count = if self.custom_action.is_some() { 5.0 } else { 4.0 };
        let button_size = egui::vec2(theme::CONTROL_ICON_SIZE * 2.0, height);

        let (up, down, clear, copy, custom) = ui
            .horizontal(|ui| {
                ui.set_height(height);
                let free = ui.available_width() - count * button_size.x;
                ui.spacing_mut().item_spacing.x = (free / (count - 1.0)).max(2.0);

                let icon = |ui: &mut egui::Ui, glyph: &str, hint: &str| {
                    ui.add(
                        egui::Button::new(egui::RichText::new(glyph).color(self.theme.text))
                            .frame(false)
                            .min_size(button_size),
                    )
                    .on_hover_text(hint)
                    .clicked()
                };

                let up = icon(ui, "\u{2B06}", "Scroll to top");
                let down = icon(ui, "\u{2B07}", "Scroll to bottom");
                let clear = icon(ui, "\u{1F5D1}", "Clear logs");
                let copy = icon(ui, "\u{1F4CB}", "Copy all logs");
                let custom =
                    self.custom_action.is_some() && icon(ui, "\u{270F}", "Custom action");
                (up, down, clear, copy, custom)
            })
            .inner;

        if up {
            self.scroll_to_top();
        }
        if down {
            self.scroll_to_bottom();
        }
        if clear {
            self.clear();
        }
        if copy {
            ui.ctx().copy_text(self.copy_all_text());
            self.show_toast(TOAST_COPIED_ALL);
        }
        if custom {
            self.run_custom_action();
        }
    }

    fn paint_toast(&self, ctx: &egui::Context, panel: egui::Rect, toast: &Toast) {
        let pos = panel.center_top()
            + egui::vec2(
                0.0,
                self.appearance.title_area_height + self.toast_config.distance_from_top,
            );
        egui::Area::new(self.id.with("toast"))
            .order(egui::Order::Tooltip)
            .fixed_pos(pos)
            .pivot(egui::Align2::CENTER_TOP)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::default()
                    .fill(self.theme.toast_background)
                    .inner_margin(self.toast_config.padding)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(toast.message()).color(self.theme.toast_text));
                    });
            });
    }
}

impl Drop for LogConsole {
    fn drop(&mut self) {
        self.console.store_mut().unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for LogConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogConsole")
            .field("id", &self.id)
            .field("console", &self.console)
            .field("expanded", &self.expanded)
            .field("filter_input", &self.filter_input)
            .field("custom_action", &self.custom_action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;

    fn console_with(lines: &[&str]) -> LogConsole {
        let mut view = LogConsole::new(&ConsoleConfig::default());
        let handle = view.handle();
        for line in lines {
            handle.send(LogEntry::new(*line));
        }
        view.console_mut().pump();
        view.apply_changes();
        view
    }

    fn render(view: &mut LogConsole) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| view.show(ctx));
    }

    /// Headless egui context driven at 60 frames per second.
    struct Frames {
        ctx: egui::Context,
        time: f64,
    }

    impl Frames {
        fn new() -> Self {
            Self {
                ctx: egui::Context::default(),
                time: 0.0,
            }
        }

        fn run(&mut self, view: &mut LogConsole, count: usize) {
            for _ in 0..count {
                self.time += 1.0 / 60.0;
                let input = egui::RawInput {
                    screen_rect: Some(egui::Rect::from_min_size(
                        egui::Pos2::ZERO,
                        egui::vec2(1024.0, 768.0),
                    )),
                    time: Some(self.time),
                    predicted_dt: 1.0 / 60.0,
                    ..Default::default()
                };
                let _ = self.ctx.run(input, |ctx| view.show(ctx));
            }
        }
    }

    fn expanded_view(frames: &mut Frames) -> LogConsole {
        let mut view = LogConsole::new(&ConsoleConfig::default());
        view.set_expanded(true);
        frames.run(&mut view, 5);
        view
    }

    fn seed(view: &LogConsole, count: usize) {
        let handle = view.handle();
        for i in 0..count {
            handle.send(LogEntry::new(format!("seed {i}")));
        }
    }

    #[test]
    fn test_copy_row_text_is_bounds_guarded() {
        let mut view = console_with(&["alpha", "beta", "alphabet"]);
        view.set_filter("alpha");

        let copied = view.copy_row_text(1).unwrap();
        assert!(copied.starts_with("> ["));
        assert!(copied.ends_with("] alphabet"));
        assert_eq!(view.copy_row_text(2), None);
    }

    #[test]
    fn test_copy_all_ignores_filter() {
        let mut view = console_with(&["one", "two"]);
        view.set_filter("one");
        let text = view.copy_all_text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with(" two"));
    }

    #[test]
    fn test_custom_action_receives_all_entries() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        let mut view = console_with(&["a", "b", "c"]).with_custom_action(move |entries| {
            sink.borrow_mut()
                .extend(entries.iter().map(|e| e.text().to_string()));
        });
        view.set_filter("b");

        assert!(view.has_custom_action());
        assert!(view.run_custom_action());
        assert_eq!(*received.borrow(), vec!["a", "b", "c"]);
        assert_eq!(
            view.toast_message(),
            Some(crate::util::constants::DEFAULT_CUSTOM_ACTION_TEXT)
        );
    }

    #[test]
    fn test_without_custom_action_nothing_runs() {
        let mut view = console_with(&["a"]);
        assert!(!view.run_custom_action());
        assert_eq!(view.toast_message(), None);
    }

    #[test]
    fn test_filter_change_resets_row_expansion() {
        let mut view = console_with(&["a", "b"]);
        view.expanded_rows.insert(1);
        view.set_filter("b");
        assert!(view.expanded_rows.is_empty());

        view.expanded_rows.insert(0);
        view.clear();
        assert!(view.expanded_rows.is_empty());
    }

    #[test]
    fn test_append_follows_only_when_at_bottom() {
        let mut view = console_with(&[]);
        view.handle().log(Level::High, "new");
        view.console_mut().pump();
        view.apply_changes();
        assert_eq!(view.scroll_target, Some(ScrollTarget::Bottom));

        view.scroll_target = None;
        view.was_at_bottom = false;
        view.handle().log(Level::Low, "newer");
        view.console_mut().pump();
        view.apply_changes();
        assert_eq!(view.scroll_target, None);
    }

    #[test]
    fn test_content_that_fits_counts_as_bottom() {
        let mut frames = Frames::new();
        let mut view = expanded_view(&mut frames);
        seed(&view, 3);
        frames.run(&mut view, 10);

        assert_eq!(view.console().store().len(), 3);
        assert!(view.was_at_bottom);
    }

    #[test]
    fn test_burst_of_appends_keeps_following() {
        let mut frames = Frames::new();
        let mut view = expanded_view(&mut frames);
        seed(&view, 40);
        frames.run(&mut view, 120);
        assert!(view.was_at_bottom, "settled at the bottom after seeding");

        let handle = view.handle();
        for i in 0..10 {
            handle.send(LogEntry::new(format!("burst {i}")));
            frames.run(&mut view, 1);
            assert!(view.was_at_bottom, "still following after burst line {i}");
        }
        frames.run(&mut view, 240);
        assert!(view.was_at_bottom);
    }

    #[test]
    fn test_scrolled_away_view_does_not_follow() {
        let mut frames = Frames::new();
        let mut view = expanded_view(&mut frames);
        seed(&view, 40);
        frames.run(&mut view, 60);
        assert!(view.was_at_bottom);

        view.scroll_to_top();
        frames.run(&mut view, 5);
        assert!(!view.was_at_bottom);

        view.handle().send(LogEntry::new("while reading history"));
        frames.run(&mut view, 30);
        assert_eq!(view.console().store().len(), 41);
        assert!(!view.was_at_bottom);

        view.scroll_to_bottom();
        frames.run(&mut view, 5);
        assert!(view.was_at_bottom);
    }

    #[test]
    fn test_scroll_controls_with_nothing_visible() {
        let mut frames = Frames::new();
        let mut view = expanded_view(&mut frames);
        seed(&view, 40);
        frames.run(&mut view, 10);
        view.set_filter("no such text");

        view.scroll_to_top();
        frames.run(&mut view, 1);
        assert_eq!(view.scroll_target, None);

        view.scroll_to_bottom();
        frames.run(&mut view, 1);
        assert_eq!(view.scroll_target, None);
        assert_eq!(view.copy_row_text(0), None);
    }

    #[test]
    fn test_tracing_inside_context_lock_does_not_deadlock() {
        use crate::app::capture::ConsoleLayer;
        use tracing_subscriber::filter::LevelFilter;
        use tracing_subscriber::layer::SubscriberExt;

        let mut frames = Frames::new();
        let mut view = expanded_view(&mut frames);
        assert!(view.console().has_repaint_hook());

        let layer = ConsoleLayer::new(view.handle()).with_max_level(LevelFilter::TRACE);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            frames.ctx.fonts(|_| {
                tracing::warn!(target: "epaint::texture_atlas", "atlas full");
                tracing::warn!(target: "host::render", "raised during layout");
            });
        });

        frames.run(&mut view, 1);
        let texts: Vec<&str> = view
            .console()
            .store()
            .entries()
            .iter()
            .map(LogEntry::text)
            .collect();
        assert_eq!(texts, vec!["host::render: raised during layout"]);
    }

    #[test]
    fn test_show_pumps_and_installs_repaint_hook() {
        let mut view = LogConsole::new(&ConsoleConfig::default());
        view.handle().send(LogEntry::new("from another thread"));
        assert!(view.console().store().is_empty());

        render(&mut view);
        assert_eq!(view.console().store().len(), 1);
        assert!(view.console().has_repaint_hook());

        view.set_expanded(true);
        render(&mut view);
        assert!(view.is_expanded());
    }
}
