//! Sort-by-distance over located records.

use super::coordinate::Coordinate;
use super::distance::haversine_km;
use crate::model::school::School;
use serde::Serialize;

/// Anything with a position that can be ranked.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for School {
    fn coordinate(&self) -> Coordinate {
        School::coordinate(self)
    }
}

/// A record paired with its distance to the query point.
///
/// Serializes as the record's own fields plus `distance` in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

pub type RankedSchool = Ranked<School>;

/// Pairs every item with its distance to `origin` and sorts ascending.
///
/// The sort is stable, so items at equal distance keep their input order.
/// A NaN distance (only possible for unvalidated coordinates) sorts last.
pub fn rank_by_distance<T: Located>(
    origin: Coordinate,
    items: impl IntoIterator<Item = T>,
) -> Vec<Ranked<T>> {
    let mut ranked: Vec<Ranked<T>> = items
        .into_iter()
        .map(|item| {
            let distance_km = haversine_km(origin, item.coordinate());
            Ranked { item, distance_km }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .is_nan()
            .cmp(&b.distance_km.is_nan())
            .then_with(|| a.distance_km.total_cmp(&b.distance_km))
    });
    ranked
}
