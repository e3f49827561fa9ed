//! Provider icon codes (`01d`, `10n`, ...) to display assets.

const METEOCONS_BASE: &str = "https://basmilius.github.io/weather-icons/production/fill/all/";
const FALLBACK_BASE: &str = "https://openweathermap.org/img/wn/";
const DEFAULT_CODE: &str = "01d";

fn meteocon(code: &str) -> Option<&'static str> {
    let name = match code {
        "01d" => "clear-day",
        "01n" => "clear-night",
        "02d" => "partly-cloudy-day",
        "02n" => "partly-cloudy-night",
        "03d" | "03n" => "cloudy",
        "04d" | "04n" => "overcast",
        "09d" | "09n" | "10d" | "10n" => "rain",
        "11d" | "11n" => "thunderstorms",
        "13d" | "13n" => "snow",
        "50d" | "50n" => "mist",
        _ => return None,
    };
    Some(name)
}

/// Asset URL for an icon code. Unknown codes fall back to the provider's own
/// PNG, and an empty code to the clear-day icon.
pub fn icon_url(code: &str) -> String {
    let code = code.trim();
    match meteocon(code) {
        Some(name) => format!("{METEOCONS_BASE}{name}.svg"),
        None => {
            let code = if code.is_empty() { DEFAULT_CODE } else { code };
            format!("{FALLBACK_BASE}{code}@2x.png")
        }
    }
}

/// Night icons carry an `n` suffix.
pub fn is_night(code: &str) -> bool {
    code.trim().ends_with('n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_meteocons() {
        assert_eq!(
            icon_url("01d"),
            "https://basmilius.github.io/weather-icons/production/fill/all/clear-day.svg"
        );
        assert!(icon_url("02n").ends_with("partly-cloudy-night.svg"));
        assert!(icon_url("09d").ends_with("/rain.svg"));
        assert!(icon_url("10n").ends_with("/rain.svg"));
        assert!(icon_url("11d").ends_with("thunderstorms.svg"));
        assert!(icon_url("50n").ends_with("mist.svg"));
    }

    #[test]
    fn unknown_code_falls_back_to_provider_png() {
        assert_eq!(icon_url("99x"), "https://openweathermap.org/img/wn/99x@2x.png");
    }

    #[test]
    fn empty_code_falls_back_to_clear_day() {
        assert_eq!(icon_url(""), "https://openweathermap.org/img/wn/01d@2x.png");
    }

    #[test]
    fn night_detection() {
        assert!(is_night("01n"));
        assert!(!is_night("01d"));
        assert!(!is_night(""));
    }
}
