use chrono::Duration;

use super::baselines::{quote_for, ReferenceBaselines};
use super::{ReportContext, ReportWriter};
use crate::domain::{GamePhase, Termination};
use crate::insights::{ExpectedGain, Insights, OutcomeSummary};
use crate::metrics::stats::percentage;
use crate::metrics::{ColorStats, Metrics};

const NA: &str = "n/a";
const NEXT_ANALYSIS_DAYS: i64 = 30;
const TOO_MANY_OPENINGS: usize = 20;
const OPENINGS_KEPT: usize = 3;
const OPENINGS_TO_FIX: usize = 2;
const OPPONENT_BAR_MAX: usize = 20;
const STAR_DAY_RATE: f64 = 60.0;
const STAR_TIME_RATE: f64 = 55.0;
const WEAK_TIME_RATE: f64 = 40.0;

pub(super) fn header(out: &mut ReportWriter, context: &ReportContext) {
    out.border();
    out.centered("CHESS PERFORMANCE ANALYSIS REPORT");
    out.centered(&format!("Player: {}", context.profile.username));
    out.centered(&format!(
        "Generated: {}",
        context.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.border();
    out.blank();
}

pub(super) fn performance_overview(
    out: &mut ReportWriter,
    metrics: &Metrics,
    insights: &Insights,
    context: &ReportContext,
) {
    let basic = &metrics.basic;
    let profile = &context.profile;

    out.heading("📊 PERFORMANCE OVERVIEW");
    out.line(format!(
        "Rating: {} ({} level)",
        profile.current_rating,
        profile.rating_level.as_str()
    ));

    let window = if context.days == 0 {
        "all available archives".to_string()
    } else {
        format!("last {} days", context.days)
    };
    out.line(format!("Games Analyzed: {} ({})", basic.total_games, window));
    out.line(format!(
        "Overall Record: {}W - {}L - {}D ({:.1}% win rate)",
        basic.wins, basic.losses, basic.draws, basic.win_rate
    ));
    if basic.total_games > 0 {
        out.line(format!(
            "Average Opponent: {:.0} (your average rating: {:.0})",
            basic.avg_opponent_rating, basic.avg_player_rating
        ));
    }

    for (label, summary) in [("Wins", &insights.patterns.winning), ("Losses", &insights.patterns.losing)] {
        if let Some(line) = outcome_line(label, summary) {
            out.line(line);
        }
    }
    out.blank();
}

pub(super) fn rating_trend(out: &mut ReportWriter, metrics: &Metrics) {
    let trends = &metrics.rating_trends;

    out.heading("📈 RATING TREND (Last 4 Weeks)");
    if trends.weeks.is_empty() {
        out.line("Not enough dated games to chart a trend.");
        out.blank();
        return;
    }

    for week in &trends.weeks {
        out.line(format!(
            "Week {}: {} → {} ({:+})  {}",
            week.week,
            week.start_rating,
            week.end_rating,
            week.change,
            trend_bar(week.change)
        ));
    }
    out.blank();

    out.line("Monthly Performance:");
    if let Some(best) = trends
        .weeks
        .iter()
        .reduce(|best, week| if week.win_rate > best.win_rate { week } else { best })
    {
        out.line(format!(
            "• Best week: Week {} ({:.0}% win rate, {} games)",
            best.week, best.win_rate, best.games
        ));
    }
    out.line(format!("• Rating change: {:+}", trends.overall_change));

    let consistency = if trends.consistency_improving {
        "Improving"
    } else {
        "Declining"
    };
    out.line(format!(
        "• Consistency: {} (std dev: {:.1} → {:.1})",
        consistency, trends.start_std_dev, trends.end_std_dev
    ));
    out.blank();
}

pub(super) fn priorities(out: &mut ReportWriter, insights: &Insights) {
    out.heading("🎯 TOP 3 PRIORITIES FOR IMPROVEMENT");

    for (i, priority) in insights.priorities.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        out.line(format!("{}. {}: {}", i + 1, priority.area.title(), priority.stat));
        out.line(format!("   → Action: {}", priority.action));
    }
    out.blank();
}

pub(super) fn time_controls(out: &mut ReportWriter, metrics: &Metrics) {
    out.heading("⏱️ TIME CONTROL BREAKDOWN");

    if metrics.time_controls.is_empty() {
        out.line("No games to break down.");
        out.blank();
        return;
    }

    out.line(format!(
        "{:<10}{:>6}{:>7}  {:<10}{:>6}{:>8}{:>7}{:>7}{:>8}{:>8}",
        "Format", "Games", "Share", "Record", "Win%", "Avg Opp", "Moves", "Mate%", "Resign%", "Time%"
    ));

    let total = metrics.basic.total_games;
    for tc in &metrics.time_controls {
        let record = format!("{}W-{}L-{}D", tc.tally.wins, tc.tally.losses, tc.tally.draws);
        out.line(format!(
            "{:<10}{:>6}{:>7}  {:<10}{:>6}{:>8.0}{:>7.0}{:>7}{:>8}{:>8}",
            tc.time_class,
            tc.tally.games,
            pct(percentage(tc.tally.games, total)),
            record,
            pct(tc.win_rate),
            tc.avg_opponent_rating,
            tc.avg_moves,
            pct(tc.checkmate_pct),
            pct(tc.resignation_pct),
            pct(tc.time_loss_pct)
        ));
    }
    out.blank();

    if metrics.time_controls.len() > 1 {
        out.line("📊 Quick Insights by Format:");
        if let Some(best) = metrics
            .time_controls
            .iter()
            .reduce(|best, tc| if tc.win_rate > best.win_rate { tc } else { best })
        {
            out.line(format!(
                "• Strongest format: {} ({:.0}% win rate)",
                best.time_class, best.win_rate
            ));
        }
        if let Some(worst) = metrics
            .time_controls
            .iter()
            .filter(|tc| tc.time_loss_pct > 0.0)
            .reduce(|worst, tc| if tc.time_loss_pct > worst.time_loss_pct { tc } else { worst })
        {
            out.line(format!(
                "• Most time losses: {} ({:.0}% of games lost on time)",
                worst.time_class, worst.time_loss_pct
            ));
        }
        out.blank();
    }
}

pub(super) fn color_performance(out: &mut ReportWriter, metrics: &Metrics) {
    let white = &metrics.color.white;
    let black = &metrics.color.black;

    out.heading("♟️ COLOR PERFORMANCE ANALYSIS");
    out.line(format!(
        "{:<8}{:>7}{:>8}{:>12}{:>10}",
        "", "Games", "Win%", "Avg Moves", "vs 50%"
    ));
    out.line(color_row("White:", white));
    out.line(color_row("Black:", black));
    out.blank();

    if white.games > 0 && black.games > 0 {
        let gap = white.win_rate - black.win_rate;
        let (better, worse) = if gap >= 0.0 { ("White", "Black") } else { ("Black", "White") };
        if gap.abs() >= 15.0 {
            out.line(format!(
                "🔍 Insight: Your {} results are {:.0} points ahead of your {} results.",
                better,
                gap.abs(),
                worse
            ));
            out.line(format!("Bring the plans that work with {} to your {} games.", better, worse));
        } else {
            out.line("🔍 Insight: Your results are balanced across both colors.");
        }
        out.blank();
    }
}

pub(super) fn openings(out: &mut ReportWriter, metrics: &Metrics) {
    let openings = &metrics.openings;

    out.heading("📚 OPENING REPERTOIRE HEALTH CHECK");
    let warning = if openings.unique_openings > TOO_MANY_OPENINGS {
        " ⚠️ Too many! Aim for 15-20"
    } else {
        ""
    };
    out.line(format!("Total Unique Openings: {}{}", openings.unique_openings, warning));
    out.line(format!(
        "Openings in regular rotation: {}",
        openings.repertoire.len()
    ));
    out.blank();

    if openings.repertoire.is_empty() {
        out.line("Not enough repeated openings to judge yet.");
        out.blank();
        return;
    }

    out.line("✅ KEEP PLAYING (most played):");
    for opening in openings.top.iter().take(OPENINGS_KEPT) {
        let comment = if opening.win_rate > 60.0 {
            "Excellent results!"
        } else {
            "Good performance"
        };
        out.line(format!(
            "• {}: {:.0}% ({} games: {} as White, {} as Black) - {}",
            opening.name, opening.win_rate, opening.tally.games, opening.as_white, opening.as_black, comment
        ));
    }
    out.blank();

    out.line("⚠️ NEEDS WORK:");
    for opening in openings.worst.iter().take(OPENINGS_TO_FIX) {
        let advice = if opening.tally.games >= 5 {
            "Study main lines"
        } else {
            "Need more practice"
        };
        out.line(format!(
            "• {}: {:.0}% ({} games) - {}",
            opening.name, opening.win_rate, opening.tally.games, advice
        ));
    }
    out.blank();
}

pub(super) fn game_phases(out: &mut ReportWriter, metrics: &Metrics, baselines: &ReferenceBaselines) {
    let phases = &metrics.phases;

    out.heading("📈 GAME PHASE BREAKDOWN");
    out.line("Phase game ended in:");
    out.line(format!(
        "{:<12}{:>6}{:>8}{:>12}{:>10}",
        "Phase", "Games", "Win%", "Reference*", "Gap"
    ));
    for phase in GamePhase::ALL {
        let stats = phases.ended_in(phase);
        let reference = baselines.phase_win_rate(phase);
        let gap = stats.win_rate - reference;
        let indicator = if stats.games == 0 {
            ""
        } else if gap < 0.0 {
            " ⚠️"
        } else if gap < 5.0 {
            " ✓"
        } else {
            " ✅"
        };
        out.line(format!(
            "{:<12}{:>6}{:>8}{:>12}{:>9.0}%{}",
            capitalize(phase.as_str()),
            stats.games,
            pct(stats.win_rate),
            pct(reference),
            gap,
            indicator
        ));
    }
    out.line("* reference values are fixed placeholders, not computed from your games");
    out.blank();

    out.line(format!(
        "Reached the middlegame in {:.0}% of games, the endgame in {:.0}%",
        phases.middlegame_reach_rate, phases.endgame_reach_rate
    ));

    let quick = &metrics.patterns;
    if !quick.quick_losses.is_empty() {
        out.line(format!(
            "Quick losses: {} ({:.0}% of losses ended early)",
            quick.quick_losses.len(),
            quick.quick_loss_rate
        ));
        for loss in quick.quick_losses.iter().take(3) {
            out.line(format!("  • {} moves, {}", loss.moves, loss.opening));
        }
    }
    out.blank();
}

pub(super) fn opponents(out: &mut ReportWriter, metrics: &Metrics, context: &ReportContext) {
    let opponents = &metrics.opponents;
    let rating = context.profile.current_rating;

    out.heading("👥 OPPONENT ANALYSIS");
    out.line("Opponent Rating Distribution:");
    for bucket in &opponents.buckets {
        let bar = "█".repeat((bucket.games as usize / 4).min(OPPONENT_BAR_MAX));
        out.line(format!(
            "  {:<8} {} {} games ({:.0}% win rate)",
            format!("{}:", bucket.label),
            bar,
            bucket.games,
            bucket.win_rate
        ));
    }
    out.blank();

    out.line("Average opponent when:");
    out.line(format!(
        "• Winning: {}",
        relative_rating(opponents.avg_opponent_in_wins, rating, metrics.basic.wins)
    ));
    out.line(format!(
        "• Losing: {}",
        relative_rating(opponents.avg_opponent_in_losses, rating, metrics.basic.losses)
    ));
    out.blank();
}

pub(super) fn clock_management(out: &mut ReportWriter, metrics: &Metrics) {
    let time = &metrics.time;

    out.heading("⏰ CLOCK MANAGEMENT ANALYSIS");
    out.line(format!(
        "Time losses: {} ({:.0}% of games)",
        time.time_losses, time.time_loss_pct
    ));

    if time.games_with_clock == 0 {
        out.line("No clock data available for these games.");
        out.blank();
        return;
    }

    out.blank();
    out.line("Average Clock Remaining (seconds):");
    out.line(format!(
        "{:<9}{:>9}{:>9}{:>9}{:>11}",
        "", "Opening", "Middle", "Endgame", "Per Move"
    ));
    for (label, averages) in [("Wins:", &time.wins), ("Losses:", &time.losses)] {
        out.line(format!(
            "{:<9}{:>9}{:>9}{:>9}{:>11}",
            label,
            seconds(averages.phase(GamePhase::Opening)),
            seconds(averages.phase(GamePhase::Middlegame)),
            seconds(averages.phase(GamePhase::Endgame)),
            seconds(averages.per_move)
        ));
    }
    out.blank();

    out.line("Time Pressure Patterns:");
    out.line(format!(
        "• Games ending under time pressure: {} ({:.0}% of games with clock data)",
        time.time_pressure_games, time.time_pressure_pct
    ));
    let pressure_rate = if time.time_pressure_games > 0 {
        format!("{:.0}%", time.time_pressure_win_rate)
    } else {
        NA.to_string()
    };
    out.line(format!("• Win rate under time pressure: {}", pressure_rate));
    out.blank();
}

pub(super) fn piece_exchanges(out: &mut ReportWriter, metrics: &Metrics, baselines: &ReferenceBaselines) {
    let exchanges = &metrics.exchanges;

    out.heading("♟️ PIECE EXCHANGE PATTERNS");
    out.line("Trading Behavior Analysis:");
    out.line(format!(
        "{:<20}{:>12}{:>12}   {}",
        "", "Your Games", "Reference*", "Assessment"
    ));

    let trade_assessment = if exchanges.avg_trades_per_game > baselines.trades_per_game {
        "Over-trading ⚠️"
    } else if exchanges.avg_trades_per_game < baselines.trades_per_game * 0.8 {
        "Under-trading ⚠️"
    } else {
        "Balanced ✓"
    };
    out.line(format!(
        "{:<20}{:>12.1}{:>12.1}   {}",
        "Avg trades/game:", exchanges.avg_trades_per_game, baselines.trades_per_game, trade_assessment
    ));

    let (ahead, ahead_assessment) = if exchanges.games_ahead == 0 {
        (NA.to_string(), "")
    } else if exchanges.trade_frequency_when_ahead >= baselines.trade_when_ahead {
        (pct(exchanges.trade_frequency_when_ahead), "Good! ✓")
    } else {
        (pct(exchanges.trade_frequency_when_ahead), "Too passive ⚠️")
    };
    out.line(format!(
        "{:<20}{:>12}{:>12}   {}",
        "Trade when ahead:",
        ahead,
        pct(baselines.trade_when_ahead),
        ahead_assessment
    ));

    let (behind, behind_assessment) = if exchanges.games_behind == 0 {
        (NA.to_string(), "")
    } else if exchanges.trade_frequency_when_behind > baselines.trade_when_behind {
        (pct(exchanges.trade_frequency_when_behind), "Too eager ⚠️")
    } else {
        (pct(exchanges.trade_frequency_when_behind), "Good! ✓")
    };
    out.line(format!(
        "{:<20}{:>12}{:>12}   {}",
        "Trade when behind:",
        behind,
        pct(baselines.trade_when_behind),
        behind_assessment
    ));
    out.line("* reference values are fixed placeholders, not computed from your games");
    out.blank();

    if !exchanges.good_imbalances.is_empty() {
        out.line("Material Imbalances You Handle Well:");
        for imbalance in &exchanges.good_imbalances {
            out.line(format!(
                "• {}: {:.0}% win rate ({} games)",
                imbalance.name, imbalance.win_rate, imbalance.games
            ));
        }
        out.blank();
    }

    if !exchanges.bad_imbalances.is_empty() {
        out.line("Material Imbalances to Avoid:");
        for imbalance in &exchanges.bad_imbalances {
            out.line(format!(
                "• {}: {:.0}% win rate ({} games)",
                imbalance.name, imbalance.win_rate, imbalance.games
            ));
        }
        out.blank();
    }
}

pub(super) fn tactical_patterns(out: &mut ReportWriter, metrics: &Metrics, baselines: &ReferenceBaselines) {
    let tactics = &metrics.tactics;

    out.heading("🎯 TACTICAL PATTERN DETECTION");

    if !tactics.winning_patterns.is_empty() {
        out.line("Common Winning Patterns Found:");
        for pattern in &tactics.winning_patterns {
            out.line(format!("• {}: {} games", pattern.name, pattern.count));
        }
        out.blank();
    }

    if !tactics.losing_patterns.is_empty() {
        out.line("Common Losing Patterns:");
        for pattern in &tactics.losing_patterns {
            out.line(format!("• {}: {} games ⚠️", pattern.name, pattern.count));
        }
        out.blank();
    }

    let trend = if tactics.recent_blunder_rate < tactics.early_blunder_rate {
        "Decreasing ✓"
    } else if tactics.recent_blunder_rate > tactics.early_blunder_rate {
        "Increasing ⚠️"
    } else {
        "Stable"
    };

    out.line("Blunder Frequency:");
    out.line(format!("• Your rate: {:.2} per game", tactics.blunder_rate));
    out.line(format!(
        "• Reference: {:.1} per game (fixed placeholder)",
        baselines.blunders_per_game
    ));
    out.line(format!(
        "• Trend: {} ({:.2} → {:.2}, earliest vs latest games)",
        trend, tactics.early_blunder_rate, tactics.recent_blunder_rate
    ));
    out.line(format!(
        "• Losses with a tactical pattern: {:.0}%",
        tactics.tactical_loss_rate
    ));
    out.blank();
}

pub(super) fn performance_trends(out: &mut ReportWriter, metrics: &Metrics) {
    let performance = &metrics.performance;

    out.heading("📊 PERFORMANCE TRENDS");
    out.line("Daily Performance Pattern:");
    for day in &performance.by_weekday {
        let bar = "█".repeat(((day.win_rate / 10.0) as usize).min(10));
        let star = if day.win_rate >= STAR_DAY_RATE { " ⭐" } else { "" };
        out.line(format!(
            "{}: {:<10} {:.0}% win rate ({} games){}",
            day.slot, bar, day.win_rate, day.games, star
        ));
    }
    out.blank();

    out.line("Best Playing Times:");
    for slot in &performance.by_time_of_day {
        let marker = if slot.win_rate >= STAR_TIME_RATE {
            " ⭐"
        } else if slot.win_rate < WEAK_TIME_RATE {
            " ⚠️"
        } else {
            ""
        };
        out.line(format!(
            "{} ({}): {:.0}% win rate ({} games){}",
            slot.slot.as_str(),
            slot.slot.hours_label(),
            slot.win_rate,
            slot.games,
            marker
        ));
    }
    out.blank();
}

pub(super) fn psychology(out: &mut ReportWriter, metrics: &Metrics) {
    let psychology = &metrics.psychology;

    out.heading("🧠 PSYCHOLOGICAL PATTERNS");
    out.line(format!(
        "Tilt Indicator: longest losing streak {} games (longest winning streak {})",
        psychology.max_loss_streak, psychology.max_win_streak
    ));

    let recovery = if psychology.games_after_loss > 0 {
        format!(
            "{:.0}% wins in the game after a loss ({} games)",
            psychology.recovery_rate, psychology.games_after_loss
        )
    } else {
        NA.to_string()
    };
    out.line(format!("Recovery Rate: {}", recovery));
    out.line(format!("Playing days: {}", psychology.playing_days));
    out.blank();

    out.line("Optimal Playing Conditions:");
    let best_hour = psychology
        .best_hour()
        .map(|h| format!("{}:00 ({:.0}% win rate, {} games)", h.hour, h.win_rate, h.games))
        .unwrap_or_else(|| NA.to_string());
    out.line(format!("🌟 Best Hour: {}", best_hour));

    let best_session = psychology
        .best_session()
        .map(|s| format!("{} ({:.0}% win rate over {} sessions)", s.label, s.avg_win_rate, s.sessions))
        .unwrap_or_else(|| NA.to_string());
    out.line(format!("🌟 Best Session: {}", best_session));
    out.blank();
}

pub(super) fn strengths(out: &mut ReportWriter, insights: &Insights) {
    out.heading("🏆 YOUR HIDDEN STRENGTHS");
    for (i, strength) in insights.strengths.iter().enumerate() {
        out.line(format!("{}. {}", i + 1, strength));
    }
    out.blank();
}

pub(super) fn recommendations(out: &mut ReportWriter, insights: &Insights) {
    out.heading("📝 RECOMMENDATIONS");
    for recommendation in &insights.recommendations {
        out.line(format!("• {}", recommendation));
    }
    out.blank();
}

pub(super) fn projections(out: &mut ReportWriter, insights: &Insights) {
    let projections = &insights.projections;

    out.heading("📈 PROJECTED OUTCOMES");
    if !projections.improvements.is_empty() {
        out.line("Target Improvements → Expected Results:");
        out.blank();
        for improvement in &projections.improvements {
            let result = match improvement.gain {
                ExpectedGain::Percent(gain) => format!("Overall win rate: +{:.1}%", gain),
                ExpectedGain::Points { min, max } => format!("Rating gain: +{}-{} points", min, max),
            };
            out.line(format!(
                "{}: {:.0}% → {:.0}%    →  {}",
                improvement.area, improvement.current, improvement.target, result
            ));
        }
        out.blank();
    }

    out.line(format!(
        "Combined 30-day projection: {}-{} rating",
        projections.thirty_day.min, projections.thirty_day.max
    ));
    out.line(format!(
        "Combined 90-day projection: {}-{} rating",
        projections.ninety_day.min, projections.ninety_day.max
    ));
    out.blank();
}

pub(super) fn footer(out: &mut ReportWriter, metrics: &Metrics, context: &ReportContext) {
    out.border();
    out.blank();
    out.centered(quote_for(metrics.basic.total_games));
    out.blank();
    out.separator();
    out.centered("Chess Insights | Analyze • Improve • Win");

    let next = context.generated_at + Duration::days(NEXT_ANALYSIS_DAYS);
    out.centered(&format!("Next Analysis: {}", next.format("%Y-%m-%d")));
    out.separator();
    out.border();
}

// --- Helper Methods ---

fn outcome_line(label: &str, summary: &OutcomeSummary) -> Option<String> {
    let termination = summary.most_common_termination?;
    let ending = match termination {
        Termination::Checkmate => "checkmate",
        Termination::Resignation => "resignation",
        Termination::Time => "timeout",
        Termination::Stalemate => "stalemate",
        Termination::Draw => "agreement or rule",
        Termination::Other => "other means",
    };
    Some(format!(
        "{} usually end by {} (avg {:.0} moves)",
        label, ending, summary.avg_game_length
    ))
}

fn trend_bar(change: i32) -> &'static str {
    match change {
        c if c > 10 => "▅▅███",
        c if c > 5 => "▅▅▅▅█",
        c if c > 0 => "▅▅▅▃▃",
        c if c > -5 => "▅▅▃▃▃",
        _ => "▅▃▃▃▃",
    }
}

fn color_row(label: &str, stats: &ColorStats) -> String {
    let vs_even = if stats.games > 0 {
        format!("{:+.0}", stats.win_rate - 50.0)
    } else {
        NA.to_string()
    };
    format!(
        "{:<8}{:>7}{:>8}{:>12.0}{:>10}",
        label,
        stats.games,
        pct(stats.win_rate),
        stats.avg_moves,
        vs_even
    )
}

fn relative_rating(avg: f64, rating: i32, games: u32) -> String {
    if games == 0 {
        return NA.to_string();
    }
    let avg = avg.round() as i32;
    format!("{} ({:+} from you)", avg, avg - rating)
}

fn pct(value: f64) -> String {
    format!("{:.0}%", value)
}

fn seconds(value: f64) -> String {
    if value > 0.0 {
        format!("{:.1}", value)
    } else {
        "-".to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_bar_thresholds() {
        assert_eq!(trend_bar(11), "▅▅███");
        assert_eq!(trend_bar(6), "▅▅▅▅█");
        assert_eq!(trend_bar(1), "▅▅▅▃▃");
        assert_eq!(trend_bar(0), "▅▅▃▃▃");
        assert_eq!(trend_bar(-5), "▅▃▃▃▃");
    }

    #[test]
    fn test_relative_rating() {
        assert_eq!(relative_rating(842.4, 800, 3), "842 (+42 from you)");
        assert_eq!(relative_rating(0.0, 800, 0), "n/a");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("middlegame"), "Middlegame");
        assert_eq!(capitalize(""), "");
    }
}
