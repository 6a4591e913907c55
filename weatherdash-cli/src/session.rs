//! Interactive dashboard: a menu loop over one [`WeatherStore`].

use std::fmt;

use anyhow::{Context, Result};
use inquire::{InquireError, Select, Text};
use weatherdash_core::{WeatherState, WeatherStore};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuChoice {
    Search,
    OpenFavorite,
    AddFavorite(String),
    RemoveFavorite,
    Quit,
}

impl MenuChoice {
    /// Menu entries that make sense for `state`.
    fn available(state: &WeatherState) -> Vec<MenuChoice> {
        let mut choices = vec![MenuChoice::Search];
        if !state.favorites.is_empty() {
            choices.push(MenuChoice::OpenFavorite);
        }
        if let Some(current) = &state.current
            && !state.favorites.contains(&current.city_name)
        {
            choices.push(MenuChoice::AddFavorite(current.city_name.clone()));
        }
        if !state.favorites.is_empty() {
            choices.push(MenuChoice::RemoveFavorite);
        }
        choices.push(MenuChoice::Quit);
        choices
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Search => f.write_str("Search city"),
            MenuChoice::OpenFavorite => f.write_str("Open favorite"),
            MenuChoice::AddFavorite(city) => write!(f, "Add {city} to favorites"),
            MenuChoice::RemoveFavorite => f.write_str("Remove favorite"),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

/// Run a blocking prompt off the async runtime. `None` means the user backed out.
async fn prompt<T, F>(f: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(f)
        .await
        .context("Prompt task failed")?;

    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read input"),
    }
}

async fn fetch(store: &WeatherStore, city: &str) {
    println!("{}", render::LOADING);
    store.fetch_weather(city).await;
}

pub async fn run(store: WeatherStore) -> Result<()> {
    loop {
        let state = store.snapshot();
        println!("\n{}", render::screen(&state));

        let choices = MenuChoice::available(&state);
        let Some(choice) = prompt(move || Select::new("What next?", choices).prompt()).await?
        else {
            break;
        };

        match choice {
            MenuChoice::Search => {
                let city = prompt(|| {
                    Text::new("City:")
                        .with_placeholder("e.g. Karachi")
                        .prompt()
                })
                .await?;
                if let Some(city) = city {
                    fetch(&store, &city).await;
                }
            }
            MenuChoice::OpenFavorite => {
                let favorites = state.favorites.clone();
                let picked = prompt(move || Select::new("Favorite:", favorites).prompt()).await?;
                if let Some(city) = picked {
                    fetch(&store, &city).await;
                }
            }
            MenuChoice::AddFavorite(city) => {
                store.add_favorite(&city);
            }
            MenuChoice::RemoveFavorite => {
                let favorites = state.favorites.clone();
                let picked = prompt(move || Select::new("Remove:", favorites).prompt()).await?;
                if let Some(city) = picked {
                    store.remove_favorite(&city);
                }
            }
            MenuChoice::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherdash_core::CurrentWeather;
    use weatherdash_core::store::{Action, reduce};

    fn showing(city: &str) -> WeatherState {
        let mut state = WeatherState::default();
        state.current = Some(CurrentWeather {
            city_name: city.to_string(),
            country_code: "PK".to_string(),
            observed_at_unix: 1_700_000_000,
            timezone_offset_seconds: 18_000,
            temperature_c: 24.0,
            feels_like_c: 23.0,
            humidity_pct: 40,
            pressure_hpa: 1012,
            wind_speed_ms: 3.5,
            wind_bearing_deg: 90.0,
            clouds_pct: 10,
            visibility_meters: 10_000,
            sunrise_unix: None,
            sunset_unix: None,
            condition_main: "Clear".to_string(),
            condition_description: "clear sky".to_string(),
            icon_id: "01d".to_string(),
        });
        state
    }

    #[test]
    fn empty_state_offers_search_and_quit() {
        let choices = MenuChoice::available(&WeatherState::default());
        assert_eq!(choices, [MenuChoice::Search, MenuChoice::Quit]);
    }

    #[test]
    fn favorites_enable_open_and_remove() {
        let mut state = WeatherState::default();
        reduce(&mut state, Action::AddFavorite("Lahore".into()));

        let choices = MenuChoice::available(&state);
        assert_eq!(
            choices,
            [
                MenuChoice::Search,
                MenuChoice::OpenFavorite,
                MenuChoice::RemoveFavorite,
                MenuChoice::Quit,
            ]
        );
    }

    #[test]
    fn shown_city_can_be_added_once() {
        let mut state = showing("Lahore");
        assert_eq!(
            MenuChoice::available(&state),
            [
                MenuChoice::Search,
                MenuChoice::AddFavorite("Lahore".into()),
                MenuChoice::Quit,
            ]
        );

        reduce(&mut state, Action::AddFavorite("Lahore".into()));
        assert!(
            !MenuChoice::available(&state)
                .iter()
                .any(|c| matches!(c, MenuChoice::AddFavorite(_)))
        );
    }

    #[test]
    fn labels() {
        assert_eq!(
            MenuChoice::AddFavorite("Lahore".into()).to_string(),
            "Add Lahore to favorites"
        );
        assert_eq!(MenuChoice::Quit.to_string(), "Quit");
    }
}
