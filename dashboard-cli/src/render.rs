use chrono::{DateTime, Local, Utc};
use dashboard_core::{
    ConditionCategory, CurrentConditions, DashboardView, ForecastSample, model::Classification,
};

const MISSING: &str = "--";

/// Render the whole dashboard as plain text.
pub fn dashboard(view: &DashboardView<'_>) -> String {
    let mut out = String::new();

    if let Some(current) = view.current {
        out.push_str(&current_conditions(current));
    }

    if let Some(forecast) = &view.forecast {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&forecast_strip(forecast));
    }

    if view.current.is_none() && !view.loading {
        out.push_str("Search for a city to get started.\n");
        out.push_str("Make sure you have set your OpenWeatherMap API key.\n");
    }

    out
}

pub fn current_conditions(current: &CurrentConditions) -> String {
    let primary = current.primary();
    let category = category(primary);

    let lines = [
        current.location_label(),
        format!(
            "  {} {}  {} ({category})",
            category.glyph(),
            celsius(current.main.temp),
            description(primary)
        ),
        format!("  Feels like {}", celsius(current.main.feels_like)),
        format!("  Wind        {}", or_missing(current.wind.speed, |v| format!("{v} m/s"))),
        format!("  Humidity    {}", percent(current.main.humidity)),
        format!(
            "  Visibility  {}",
            or_missing(current.visibility_km(), |v| format!("{v:.1} km"))
        ),
        format!("  Pressure    {}", or_missing(current.main.pressure, |v| format!("{v} hPa"))),
        format!(
            "  Sunrise {}   Sunset {}",
            clock(current.sunrise()),
            clock(current.sunset())
        ),
        format!("  Observed at {}", clock(current.observed_at())),
    ];

    block(lines)
}

pub fn forecast_strip(samples: &[ForecastSample]) -> String {
    let rows = samples.iter().map(|sample| {
        let primary = sample.primary();
        let day = sample
            .time()
            .map(|t| t.with_timezone(&Local).format("%a %b %-d").to_string())
            .unwrap_or_else(|| MISSING.to_string());

        format!(
            "  {:<10}  {}  {:>5}  {:<20}  💧 {}",
            day,
            category(primary).glyph(),
            celsius(sample.main.temp),
            description(primary),
            percent(sample.main.humidity),
        )
    });

    block(std::iter::once("5-Day Forecast".to_string()).chain(rows))
}

/// Join lines, each terminated by a newline.
fn block(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn category(primary: Option<&Classification>) -> ConditionCategory {
    primary
        .map(|w| ConditionCategory::from_icon_code(&w.icon))
        .unwrap_or_default()
}

fn description(primary: Option<&Classification>) -> String {
    primary
        .map(|w| w.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| MISSING.to_string())
}

fn celsius(temp: Option<f64>) -> String {
    or_missing(temp, |t| {
        // Avoid printing "-0".
        let rounded = t.round() + 0.0;
        format!("{rounded}°C")
    })
}

fn percent(value: Option<f64>) -> String {
    or_missing(value, |v| format!("{v}%"))
}

fn clock(time: Option<DateTime<Utc>>) -> String {
    or_missing(time, |t| t.with_timezone(&Local).format("%H:%M").to_string())
}

fn or_missing<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{DashboardState, model::Measurements};

    #[test]
    fn celsius_rounds_and_hides_negative_zero() {
        assert_eq!(celsius(Some(11.6)), "12°C");
        assert_eq!(celsius(Some(-0.3)), "0°C");
        assert_eq!(celsius(None), "--");
    }

    #[test]
    fn sparse_conditions_render_placeholders() {
        let current = CurrentConditions {
            name: "Nowhere".into(),
            ..Default::default()
        };

        let text = current_conditions(&current);

        assert!(text.starts_with("Nowhere\n"));
        assert!(text.contains("Wind        --"));
        assert!(text.contains("Sunrise --   Sunset --"));
    }

    #[test]
    fn forecast_strip_has_one_line_per_sample() {
        let samples: Vec<ForecastSample> = (0..3)
            .map(|i| ForecastSample {
                dt: 1_700_000_000 + i * 86_400,
                main: Measurements {
                    temp: Some(20.0),
                    humidity: Some(40.0),
                    ..Default::default()
                },
                weather: vec![Classification {
                    description: "clear sky".into(),
                    icon: "01d".into(),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .collect();

        let text = forecast_strip(&samples);

        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.matches("clear sky").count(), 3);
        assert!(text.contains("20°C"));
        assert!(text.contains("💧 40%"));
    }

    #[test]
    fn empty_view_shows_hint() {
        let view = DashboardView {
            state: DashboardState::Idle,
            current: None,
            forecast: None,
            loading: false,
            credential_requested: false,
        };

        assert!(dashboard(&view).contains("Search for a city"));
    }
}
