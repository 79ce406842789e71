// LogPane - gui.rs
//
// Demo host application: an ordinary eframe window with some host content,
// background producer threads, and the LogPane console overlaid on top.

use crate::app::console::ConsoleHandle;
use crate::core::export;
use crate::core::model::{Level, LogEntry};
use crate::ui::console_view::LogConsole;
use crate::util::constants::EXPORT_FILE_PREFIX;
use crate::util::error::{self, ExportError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Messages the demo producers cycle through. Mixed vocabulary so the filter
/// box has something to bite on.
const PRODUCER_MESSAGES: &[(Level, &str)] = &[
    (Level::Middle, "request served in 12ms"),
    (Level::Low, "cache hit for key user:42"),
    (Level::Middle, "request served in 87ms"),
    (Level::High, "upstream timeout, retrying"),
    (Level::Low, "heartbeat"),
    (Level::Middle, "session opened"),
    (Level::High, "disk usage above 90%"),
    (Level::Middle, "session closed"),
];

/// Write every entry to a timestamped JSON file under `dir`.
pub fn export_entries(dir: &Path, entries: &[LogEntry]) -> error::Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let file_name = format!(
        "{EXPORT_FILE_PREFIX}-{}.json",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    let path = dir.join(file_name);
    export::export_json_file(entries, &path)?;
    Ok(path)
}

/// Start `count` threads that each push a line every `interval` until `stop`
/// is raised.
pub fn spawn_producers(
    handle: &ConsoleHandle,
    count: usize,
    interval: Duration,
    stop: &Arc<AtomicBool>,
) -> Vec<JoinHandle<()>> {
    let sequence = Arc::new(AtomicU64::new(0));
    (0..count)
        .map(|worker| {
            let handle = handle.clone();
            let stop = Arc::clone(stop);
            let sequence = Arc::clone(&sequence);
            std::thread::Builder::new()
                .name(format!("producer-{worker}"))
                .spawn(move || {
                    let mut tick = worker;
                    while !stop.load(Ordering::SeqCst) {
                        let n = sequence.fetch_add(1, Ordering::SeqCst);
                        let (level, message) = PRODUCER_MESSAGES[tick % PRODUCER_MESSAGES.len()];
                        handle.log(level, format!("#{n} worker-{worker}: {message}"));
                        tick += count.max(1);
                        std::thread::sleep(interval);
                    }
                })
        })
        .filter_map(|spawned| match spawned {
            Ok(join) => Some(join),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to spawn producer thread");
                None
            }
        })
        .collect()
}

/// The demo application.
pub struct DemoApp {
    pub console: LogConsole,
    producers: Vec<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    clicks: u64,
}

impl DemoApp {
    pub fn new(console: LogConsole, producers: Vec<JoinHandle<()>>, stop: Arc<AtomicBool>) -> Self {
        Self {
            console,
            producers,
            stop,
            clicks: 0,
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(120.0);
            ui.heading("LogPane demo host");
            ui.label(
                "The console overlay can be dragged anywhere. Tap its title to \
                 expand or fold it; click a row to expand it; right-click or \
                 long-press a row to copy it.",
            );
            ui.separator();

            let handle = self.console.handle();
            ui.horizontal(|ui| {
                for level in Level::all() {
                    if ui.button(format!("Send {level}")).clicked() {
                        self.clicks += 1;
                        handle.log(*level, format!("button press #{} ({level})", self.clicks));
                    }
                }
            });
            if ui.button("Emit tracing warning").clicked() {
                tracing::warn!(clicks = self.clicks, "Warning raised from host UI");
            }
            if ui.button("Clear from host").clicked() {
                handle.clear();
            }

            ui.separator();
            let store = self.console.console().store();
            ui.label(format!(
                "{} entries, {} visible, {} producer thread(s)",
                store.len(),
                store.visible_entries().len(),
                self.producers.len()
            ));
        });

        self.console.show(ctx);
    }
}

impl Drop for DemoApp {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        for producer in self.producers.drain(..) {
            let _ = producer.join();
        }
        tracing::info!("Demo producers stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::console::Console;

    #[test]
    fn test_producers_stop_on_flag() {
        let mut console = Console::new();
        let stop = Arc::new(AtomicBool::new(false));
        let producers = spawn_producers(&console.handle(), 2, Duration::from_millis(1), &stop);
        std::thread::sleep(Duration::from_millis(20));
        stop.store(true, Ordering::SeqCst);
        for p in producers {
            p.join().unwrap();
        }

        console.pump();
        assert!(!console.store().is_empty());
        assert!(console
            .store()
            .entries()
            .iter()
            .all(|e| e.text().contains("worker-")));
    }

    #[test]
    fn test_export_entries_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = Console::new();
        console.handle().send("exported".into());
        console.pump();

        let path = export_entries(&dir.path().join("exports"), console.store().entries()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("exported"));
    }
}
