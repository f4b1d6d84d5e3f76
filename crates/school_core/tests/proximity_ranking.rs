use school_core::{
    haversine_km, rank_by_distance, Coordinate, Located, NewSchool, School, EARTH_RADIUS_KM,
};
use std::f64::consts::PI;
use uuid::Uuid;

fn school(name: &str, latitude: f64, longitude: f64) -> School {
    School::from_draft(
        Uuid::new_v4(),
        &NewSchool::new(name, "addr", latitude, longitude),
    )
}

fn names(ranked: &[school_core::RankedSchool]) -> Vec<&str> {
    ranked.iter().map(|entry| entry.item.name.as_str()).collect()
}

#[test]
fn identical_points_are_zero_apart() {
    let points = [
        Coordinate::new(0.0, 0.0),
        Coordinate::new(51.5074, -0.1278),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(90.0, 180.0),
    ];
    for point in points {
        assert_eq!(haversine_km(point, point), 0.0);
    }
}

#[test]
fn distance_is_symmetric() {
    let paris = Coordinate::new(48.8566, 2.3522);
    let tokyo = Coordinate::new(35.6762, 139.6503);

    let there = haversine_km(paris, tokyo);
    let back = haversine_km(tokyo, paris);
    assert!((there - back).abs() < 1e-9, "{there} != {back}");
}

#[test]
fn half_the_equator_is_pi_r() {
    let distance = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
    assert!((distance - PI * EARTH_RADIUS_KM).abs() < 1.0, "got {distance}");
    assert!((distance - 20015.0).abs() < 1.0, "got {distance}");
}

#[test]
fn one_degree_of_longitude_at_the_equator() {
    let distance = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
    assert!((distance - 111.19).abs() < 0.01, "got {distance}");
}

#[test]
fn known_city_pair_distance() {
    // London to Paris is roughly 343.5 km on a 6371 km sphere.
    let london = Coordinate::new(51.5074, -0.1278);
    let paris = Coordinate::new(48.8566, 2.3522);
    let distance = haversine_km(london, paris);
    assert!((distance - 343.5).abs() < 1.0, "got {distance}");
}

#[test]
fn ranks_nearest_first() {
    let origin = Coordinate::new(0.0, 0.0);
    let km_per_degree = haversine_km(origin, Coordinate::new(0.0, 1.0));
    let schools = vec![
        school("fifty", 0.0, 50.0 / km_per_degree),
        school("ten", 0.0, 10.0 / km_per_degree),
        school("thirty", 0.0, 30.0 / km_per_degree),
    ];

    let ranked = rank_by_distance(origin, schools);

    assert_eq!(names(&ranked), ["ten", "thirty", "fifty"]);
    let distances: Vec<f64> = ranked.iter().map(|entry| entry.distance_km).collect();
    for (actual, expected) in distances.iter().zip([10.0, 30.0, 50.0]) {
        assert!((actual - expected).abs() < 1e-6, "got {actual}");
    }
}

#[test]
fn equal_distances_keep_input_order() {
    let origin = Coordinate::new(0.0, 0.0);
    // North, east, south and west of the origin are all one degree away.
    let schools = vec![
        school("far", 0.0, 3.0),
        school("north", 1.0, 0.0),
        school("east", 0.0, 1.0),
        school("south", -1.0, 0.0),
        school("west", 0.0, -1.0),
    ];

    let ranked = rank_by_distance(origin, schools);

    assert_eq!(names(&ranked), ["north", "east", "south", "west", "far"]);
}

#[test]
fn ranking_pairs_without_mutating_records() {
    let origin = Coordinate::new(10.0, 10.0);
    let original = school("only", 11.0, 11.0);

    let ranked = rank_by_distance(origin, vec![original.clone()]);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].item, original);
    assert!(ranked[0].distance_km > 0.0);
}

#[test]
fn empty_input_ranks_to_empty_output() {
    let ranked = rank_by_distance(Coordinate::new(0.0, 0.0), Vec::<School>::new());
    assert!(ranked.is_empty());
}

#[test]
fn nan_distances_sort_last() {
    struct Spot(&'static str, Coordinate);
    impl Located for Spot {
        fn coordinate(&self) -> Coordinate {
            self.1
        }
    }

    let origin = Coordinate::new(0.0, 0.0);
    let spots = vec![
        Spot("broken", Coordinate::new(f64::NAN, 0.0)),
        Spot("far", Coordinate::new(0.0, 2.0)),
        Spot("near", Coordinate::new(0.0, 1.0)),
    ];

    let ranked = rank_by_distance(origin, spots);
    let order: Vec<&str> = ranked.iter().map(|entry| entry.item.0).collect();
    assert_eq!(order, ["near", "far", "broken"]);
    assert!(ranked[2].distance_km.is_nan());
}

#[test]
fn ranked_school_serializes_flat_with_distance() {
    let origin = Coordinate::new(0.0, 0.0);
    let ranked = rank_by_distance(origin, vec![school("A", 0.0, 1.0)]);

    let value = serde_json::to_value(&ranked[0]).unwrap();
    assert_eq!(value["name"], "A");
    assert_eq!(value["address"], "addr");
    assert_eq!(value["latitude"], 0.0);
    assert_eq!(value["longitude"], 1.0);
    assert!(value["id"].is_string());
    let distance = value["distance"].as_f64().unwrap();
    assert!((distance - 111.19).abs() < 0.01);
}
