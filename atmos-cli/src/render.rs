use atmos_core::{
    CurrentConditions, DailySummary, Scene, Theme, WeatherReport, forecast::local_datetime, icons,
};
use std::fmt::{self, Write};

/// ANSI styling for the selected theme; every field is empty when colors are off.
#[derive(Debug, Clone)]
pub struct Palette {
    accent: &'static str,
    muted: &'static str,
    strong: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme, enabled: bool) -> Self {
        if !enabled {
            return Self::plain();
        }
        match theme {
            Theme::Light => Self {
                accent: "\x1b[34m",
                muted: "\x1b[90m",
                strong: "\x1b[1;30m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                accent: "\x1b[96m",
                muted: "\x1b[37m",
                strong: "\x1b[1;97m",
                reset: "\x1b[0m",
            },
        }
    }

    pub fn plain() -> Self {
        Self { accent: "", muted: "", strong: "", reset: "" }
    }
}

/// `Mon, Jan 1` in the location's local time.
pub fn format_date(dt: i64, timezone_offset: i32) -> String {
    format_local(dt, timezone_offset, "%a, %b %-d")
}

/// `09:30 AM` in the location's local time.
pub fn format_time(dt: i64, timezone_offset: i32) -> String {
    format_local(dt, timezone_offset, "%I:%M %p")
}

fn format_local(dt: i64, timezone_offset: i32, fmt: &str) -> String {
    local_datetime(dt, timezone_offset)
        .map(|t| t.format(fmt).to_string())
        .unwrap_or_else(|| "--".to_string())
}

fn degrees(value: f64) -> i64 {
    value.round() as i64
}

fn percent(chance: f64) -> i64 {
    (chance * 100.0).round() as i64
}

pub fn scene_banner(scene: Scene, night: bool) -> &'static str {
    match (scene, night) {
        (Scene::Clear, false) => "☀  Clear skies",
        (Scene::Clear, true) => "☾  Clear night",
        (Scene::Clouds, _) => "☁  Cloud cover",
        (Scene::Rain, _) => "☂  Rain showers",
        (Scene::Snow, _) => "❄  Snowfall",
        (Scene::Fog, _) => "≋  Low visibility",
    }
}

pub fn report(report: &WeatherReport, palette: &Palette) -> Result<String, fmt::Error> {
    let mut out = String::new();
    current(&mut out, &report.current, palette)?;
    writeln!(out)?;
    outlook(&mut out, &report.daily, report.forecast.location.timezone_offset, palette)?;
    Ok(out)
}

fn current(out: &mut String, current: &CurrentConditions, p: &Palette) -> fmt::Result {
    let loc = &current.location;
    let s = &current.sample;
    let tz = loc.timezone_offset;

    let scene = Scene::for_condition(s.condition);
    let visibility = s
        .visibility_m
        .map(|m| format!("{:.1} km", f64::from(m) / 1000.0))
        .unwrap_or_else(|| "--".to_string());

    writeln!(
        out,
        "{}{}{}  {}{} · {}{}",
        p.strong,
        loc.display_name(),
        p.reset,
        p.muted,
        format_date(s.dt, tz),
        format_time(s.dt, tz),
        p.reset
    )?;
    writeln!(out, "{}{}{}", p.accent, scene_banner(scene, icons::is_night(&s.icon)), p.reset)?;
    writeln!(out)?;
    writeln!(out, "  {}{}°C{}  {}", p.strong, degrees(s.temp), p.reset, s.description)?;
    writeln!(
        out,
        "  Feels like {}°C   Humidity {}%   Pressure {} hPa",
        degrees(s.feels_like),
        s.humidity_pct,
        s.pressure_hpa.round()
    )?;
    writeln!(out, "  Wind {:.1} m/s   Visibility {}", s.wind_speed_mps, visibility)?;

    if let (Some(rise), Some(set)) = (loc.sunrise, loc.sunset) {
        writeln!(out, "  Sunrise {}   Sunset {}", format_time(rise, tz), format_time(set, tz))?;
    }
    writeln!(out, "  {}{}{}", p.muted, icons::icon_url(&s.icon), p.reset)
}

fn outlook(out: &mut String, days: &[DailySummary], tz: i32, p: &Palette) -> fmt::Result {
    if days.is_empty() {
        return Ok(());
    }

    writeln!(out, "{}5-Day Outlook{}", p.strong, p.reset)?;
    for (index, day) in days.iter().enumerate() {
        let rep = &day.representative;
        let label = if index == 0 { "Today".to_string() } else { format_local(rep.dt, tz, "%a") };

        writeln!(
            out,
            "  {:<6}{:<13}H {:>3}°  L {:>3}°  Rain {:>3}%  {}{}{}",
            label,
            rep.condition.as_str(),
            degrees(day.max_temp),
            degrees(day.min_temp),
            percent(day.max_precip_chance),
            p.muted,
            icons::icon_url(&rep.icon),
            p.reset
        )?;
    }
    Ok(())
}
