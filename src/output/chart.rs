//! Top-skills bar chart rendered as a standalone HTML page with inline SVG

use crate::error::Result;
use crate::processing::stats::SkillStatistics;
use askama::Template;

pub const CHART_FILE: &str = "skills_chart.html";

const CHART_WIDTH: u32 = 760;
const CHART_HEIGHT: u32 = 440;
const MARGIN_LEFT: u32 = 50;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 120;

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <title>{{ title }}</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 820px; margin: 0 auto; padding: 20px; }
        .bar { fill: #4a7bd0; }
        .count { font-size: 12px; text-anchor: middle; }
        .label { font-size: 12px; text-anchor: end; }
        .axis { stroke: #999; }
        .meta { color: #777; font-size: 13px; }
    </style>
</head>
<body>
    <h1>{{ title }}</h1>
    <p class="meta">Всего резюме: {{ total_candidates }} | Среднее количество навыков: {{ average_skills }} | {{ generated_at }}</p>
    <svg xmlns="http://www.w3.org/2000/svg" width="{{ width }}" height="{{ height }}" viewBox="0 0 {{ width }} {{ height }}">
        <line class="axis" x1="{{ axis_x }}" y1="{{ axis_top }}" x2="{{ axis_x }}" y2="{{ axis_y }}" />
        <line class="axis" x1="{{ axis_x }}" y1="{{ axis_y }}" x2="{{ axis_end }}" y2="{{ axis_y }}" />
        {% for bar in bars %}
        <rect class="bar" x="{{ bar.x }}" y="{{ bar.y }}" width="{{ bar.width }}" height="{{ bar.height }}"><title>{{ bar.label }}: {{ bar.count }}</title></rect>
        <text class="count" x="{{ bar.center }}" y="{{ bar.count_y }}">{{ bar.count }}</text>
        <text class="label" x="{{ bar.center }}" y="{{ bar.label_y }}" transform="rotate(-45 {{ bar.center }} {{ bar.label_y }})">{{ bar.label }}</text>
        {% endfor %}
    </svg>
</body>
</html>"#, ext = "html")]
struct SkillChartTemplate {
    title: String,
    generated_at: String,
    total_candidates: usize,
    average_skills: String,
    width: u32,
    height: u32,
    axis_x: u32,
    axis_y: u32,
    axis_top: u32,
    axis_end: u32,
    bars: Vec<ChartBar>,
}

#[derive(Debug, Clone)]
struct ChartBar {
    label: String,
    count: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    center: u32,
    count_y: u32,
    label_y: u32,
}

/// Render the top skills of `stats` as an HTML page.
pub fn render_skill_chart(stats: &SkillStatistics) -> Result<String> {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let axis_y = MARGIN_TOP + plot_height;

    let max_count = stats.top_skills.iter().map(|s| s.count).max().unwrap_or(0).max(1);
    let slot = (plot_width / (stats.top_skills.len().max(1) as u32)).max(1);
    let bar_width = (slot * 7 / 10).clamp(1, slot);

    let bars = stats
        .top_skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let height = (skill.count as u64 * plot_height as u64 / max_count as u64) as u32;
            let x = MARGIN_LEFT + slot * i as u32 + slot.saturating_sub(bar_width) / 2;
            let y = axis_y - height;
            ChartBar {
                label: skill.skill.clone(),
                count: skill.count,
                x,
                y,
                width: bar_width,
                height,
                center: x + bar_width / 2,
                count_y: y.saturating_sub(4),
                label_y: axis_y + 16,
            }
        })
        .collect();

    let template = SkillChartTemplate {
        title: format!("Топ-{} навыков среди кандидатов", stats.top_skills.len()),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        total_candidates: stats.total_candidates,
        average_skills: format!("{:.2}", stats.average_skills),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        axis_x: MARGIN_LEFT,
        axis_y,
        axis_top: MARGIN_TOP,
        axis_end: CHART_WIDTH - MARGIN_RIGHT,
        bars,
    };

    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::stats::SkillCount;

    fn stats() -> SkillStatistics {
        SkillStatistics {
            total_candidates: 4,
            average_skills: 1.75,
            top_skills: vec![
                SkillCount { skill: "python".into(), count: 4 },
                SkillCount { skill: "c<script>".into(), count: 2 },
                SkillCount { skill: "docker".into(), count: 1 },
            ],
        }
    }

    #[test]
    fn test_chart_contains_one_bar_per_skill() {
        let html = render_skill_chart(&stats()).unwrap();
        assert!(html.contains("<svg"));
        assert_eq!(html.matches("<rect class=\"bar\"").count(), 3);
        assert!(html.contains("Топ-3 навыков"));
        assert!(html.contains("1.75"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let html = render_skill_chart(&stats()).unwrap();
        assert!(!html.contains("c<script>"));
        assert!(html.contains("c&lt;script&gt;") || html.contains("c&#60;script&#62;"));
    }

    #[test]
    fn test_more_bars_than_pixels() {
        let many = SkillStatistics {
            total_candidates: 1,
            average_skills: 700.0,
            top_skills: (0..700)
                .map(|i| SkillCount { skill: format!("skill{}", i), count: 1 })
                .collect(),
        };

        let html = render_skill_chart(&many).unwrap();
        assert_eq!(html.matches("<rect class=\"bar\"").count(), 700);
        assert!(html.contains("width=\"1\""));
    }

    #[test]
    fn test_tallest_bar_fills_plot() {
        let html = render_skill_chart(&stats()).unwrap();
        let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        assert!(html.contains(&format!("height=\"{}\"", plot_height)));
    }
}
