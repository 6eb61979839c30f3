//! Console presentation of batch results and skill statistics

use crate::processing::batch::BatchOutcome;
use crate::processing::stats::SkillStatistics;
use colored::{Color, Colorize};
use std::path::Path;

pub struct StatsFormatter {
    use_colors: bool,
}

impl StatsFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    pub fn format_run_header(&self, input: &Path, output: &Path) -> String {
        format!(
            "📂 Резюме: {}\n💾 Результаты: {}\n",
            self.colorize(&input.display().to_string(), Color::Cyan),
            self.colorize(&output.display().to_string(), Color::Cyan)
        )
    }

    pub fn format_statistics(&self, stats: &SkillStatistics) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 Статистика:"));
        output.push_str(&format!("Всего резюме: {}\n", stats.total_candidates));
        output.push_str(&format!("Среднее количество навыков: {}\n", stats.average_skills));

        if stats.top_skills.is_empty() {
            output.push_str(&self.colorize("Навыки не найдены\n", Color::Yellow));
            return output;
        }

        output.push_str(&format!("Топ-{} навыков:\n", stats.top_skills.len()));
        let max_count = stats.top_skills.iter().map(|s| s.count).max().unwrap_or(1).max(1);
        for skill in &stats.top_skills {
            let bar = "█".repeat((skill.count * 20).div_ceil(max_count));
            output.push_str(&format!(
                "  {:<24} {:>4}  {}\n",
                skill.skill,
                skill.count,
                self.colorize(&bar, Color::Green)
            ));
        }

        output
    }

    pub fn format_batch_summary(&self, outcome: &BatchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} Обработано: {}\n",
            self.colorize("[+]", Color::Green),
            outcome.records.len()
        ));

        if !outcome.failures.is_empty() {
            output.push_str(&format!(
                "{} Ошибок: {}\n",
                self.colorize("[!]", Color::Red),
                outcome.failures.len()
            ));
            for failure in &outcome.failures {
                output.push_str(&format!(
                    "    {} {}\n",
                    failure.filename,
                    self.colorize(&format!("({})", failure.reason), Color::BrightBlack)
                ));
            }
        }

        output
    }
}

impl Default for StatsFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}
