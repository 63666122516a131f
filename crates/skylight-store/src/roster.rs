//! In-memory roster: the ordered city list plus the current selection.
//!
//! Ordering is user-significant and preserved exactly as stored. Selection
//! follows the user's focus: adding selects the new city; removing the
//! selected city falls back to the first remaining entry, or clears the
//! selection (and with it any displayed weather) when the list empties.

use skylight_weather::City;

#[derive(Debug, Clone, Default)]
pub struct CityRoster {
    cities: Vec<City>,
    selected: Option<i64>,
}

impl CityRoster {
    /// Build a roster from a stored list; the first city starts selected.
    pub fn new(cities: Vec<City>) -> Self {
        let selected = cities.first().map(|c| c.id);
        Self { cities, selected }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected_city(&self) -> Option<&City> {
        let id = self.selected?;
        self.cities.iter().find(|c| c.id == id)
    }

    /// Select a tracked city. Returns false when the id is not in the list.
    pub fn select(&mut self, city_id: i64) -> bool {
        if self.cities.iter().any(|c| c.id == city_id) {
            self.selected = Some(city_id);
            true
        } else {
            false
        }
    }

    /// Append a city and select it. Returns false (and only selects) when
    /// the city is already tracked.
    pub fn add(&mut self, city: City) -> bool {
        if self.cities.iter().any(|c| c.id == city.id) {
            self.selected = Some(city.id);
            return false;
        }
        self.selected = Some(city.id);
        self.cities.push(city);
        true
    }

    /// Remove a city from the list.
    ///
    /// Removing the selected city selects the new first entry; removing the
    /// last remaining city clears the selection.
    pub fn remove(&mut self, city_id: i64) -> bool {
        let Some(index) = self.cities.iter().position(|c| c.id == city_id) else {
            return false;
        };
        self.cities.remove(index);

        if self.selected == Some(city_id) {
            self.selected = self.cities.first().map(|c| c.id);
        }
        true
    }
}
