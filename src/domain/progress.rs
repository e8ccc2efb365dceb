use log::info;

const LOG_EVERY: usize = 20;

/// Track progress of game parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProgress {
    total: usize,
    parsed: usize,
    skipped: usize,
}

impl ParseProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            parsed: 0,
            skipped: 0,
        }
    }

    pub fn increment_parsed(&mut self) {
        self.parsed += 1;
        self.log_progress();
    }

    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.parsed + self.skipped
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn parsed(&self) -> usize {
        self.parsed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_complete(&self) -> bool {
        is_complete(self.current_count(), self.total)
    }

    /// Text progress bar, e.g. `[#####-----] 50/100`.
    pub fn render_bar(&self, width: usize) -> String {
        let current = self.current_count();
        let filled = if self.total == 0 {
            width
        } else {
            (current * width / self.total).min(width)
        };

        format!(
            "[{}{}] {}/{}",
            "#".repeat(filled),
            "-".repeat(width - filled),
            current,
            self.total
        )
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Parsed {}/{} games ({} skipped)",
                current, self.total, self.skipped
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % LOG_EVERY == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
