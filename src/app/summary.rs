use std::io::Write;
use std::time::Duration;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::{LatencyJudgment, RunReport};

const PERCENT_DIVISOR: u64 = 100;
const LABEL_WIDTH: usize = 23;

pub(super) struct Segment {
    pub(super) text: String,
    pub(super) color: Option<Color>,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

type Line = Vec<Segment>;

fn labeled(label: &str, value: Segment) -> Line {
    vec![Segment::plain(format!("{:<width$}", label, width = LABEL_WIDTH)), value]
}

pub(super) fn report_lines(report: &RunReport) -> Vec<Line> {
    let mut lines = vec![
        vec![Segment::colored("Benchmark Results:", Color::Cyan)],
        labeled(
            "Total Requests:",
            Segment::colored(report.total_requests.to_string(), Color::White),
        ),
        labeled(
            "Concurrency:",
            Segment::colored(report.concurrency.to_string(), Color::White),
        ),
    ];

    let dropped = report.dropped_requests();
    if dropped > 0 {
        lines.push(labeled(
            "Dropped Requests:",
            Segment::colored(
                format!("{} (not divisible across workers)", dropped),
                Color::Yellow,
            ),
        ));
    }

    lines.push(labeled(
        "Total Time Taken:",
        Segment::colored(format_duration(report.wall_clock_duration), Color::White),
    ));
    lines.push(labeled(
        "Requests per Second:",
        Segment::colored(
            format!(
                "{}.{:02}",
                report.requests_per_second_x100 / PERCENT_DIVISOR,
                report.requests_per_second_x100 % PERCENT_DIVISOR
            ),
            Color::Cyan,
        ),
    ));

    let mut average = labeled(
        "Average Response Time:",
        Segment::colored(format_duration(report.average_latency), Color::Blue),
    );
    average.push(Segment::plain(" "));
    average.push(judgment_segment(report.judgment));
    lines.push(average);

    lines.push(labeled(
        "Min Response Time:",
        Segment::colored(format_duration(report.min_latency), Color::Blue),
    ));
    lines.push(labeled(
        "Max Response Time:",
        Segment::colored(format_duration(report.max_latency), Color::Blue),
    ));
    lines.push(labeled(
        "P95 Response Time:",
        Segment::colored(format_duration(report.p95_latency), Color::Magenta),
    ));
    lines.push(labeled(
        "P99 Response Time:",
        Segment::colored(format_duration(report.p99_latency), Color::Magenta),
    ));

    if report.error_count > 0 {
        lines.push(vec![
            Segment::colored("Failed Requests:", Color::Red),
            Segment::plain(format!(" {} requests failed", report.error_count)),
        ]);
        for (kind, count) in &report.failure_kinds {
            lines.push(vec![Segment::plain(format!("  {} => {}", kind, count))]);
        }
    } else {
        lines.push(vec![
            Segment::colored("Failed Requests:", Color::Green),
            Segment::plain(format!(" {}", report.error_count)),
        ]);
    }

    lines.push(vec![Segment::colored("Status Code Summary:", Color::Magenta)]);
    for (code, count) in &report.status_histogram {
        lines.push(vec![
            Segment::plain(format!("  {} => ", code)),
            Segment::colored(count.to_string(), status_color(*code)),
            Segment::plain(" responses"),
        ]);
    }

    lines
}

pub(super) fn print_report(report: &RunReport, no_color: bool) -> AppResult<()> {
    let mut out = std::io::stdout().lock();
    write_lines(&mut out, &report_lines(report), no_color)
        .map_err(|err| AppError::sink(SinkError::Render { source: err }))
}

pub(super) fn write_lines<W: Write>(
    out: &mut W,
    lines: &[Line],
    no_color: bool,
) -> Result<(), std::io::Error> {
    queue!(out, Print("\n"))?;
    for line in lines {
        for segment in line {
            match segment.color {
                Some(color) if !no_color => {
                    queue!(
                        out,
                        SetForegroundColor(color),
                        Print(&segment.text),
                        ResetColor
                    )?;
                }
                Some(_) | None => queue!(out, Print(&segment.text))?,
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

fn judgment_segment(judgment: LatencyJudgment) -> Segment {
    match judgment {
        LatencyJudgment::Excellent => Segment::colored("Excellent", Color::Green),
        LatencyJudgment::Fair => Segment::colored("Fair", Color::Yellow),
        LatencyJudgment::Slow => Segment::colored("Slow", Color::Red),
    }
}

const fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        400..=499 => Color::Yellow,
        500.. => Color::Red,
        _ => Color::White,
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{:?}", duration)
}
