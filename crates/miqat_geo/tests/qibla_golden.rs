//! Golden values for Qibla bearing and distance from well-known cities.
//!
//! Reference bearings agree with published Qibla tables to within a
//! fraction of a degree; distances are haversine on a 6371 km sphere.

use miqat_geo::{
    CompassPoint, GeoCoordinates, GeoError, KAABA, bearing_to, distance_to, haversine_km, qibla,
};
use proptest::prelude::*;

const CAIRO: GeoCoordinates = GeoCoordinates::new(30.0444, 31.2357);
const NEW_YORK: GeoCoordinates = GeoCoordinates::new(40.7128, -74.0060);
const LONDON: GeoCoordinates = GeoCoordinates::new(51.5074, -0.1278);
const JAKARTA: GeoCoordinates = GeoCoordinates::new(-6.2088, 106.8456);

#[test]
fn cairo_faces_south_east() {
    let q = qibla(&CAIRO).unwrap();
    assert!(
        (q.bearing_degrees - 136.0).abs() < 1.0,
        "Cairo qibla = {:.3}°, expected ~136°",
        q.bearing_degrees
    );
    assert!(
        (q.distance_km - 1287.2).abs() < 1.0,
        "Cairo distance = {:.1} km",
        q.distance_km
    );
    assert_eq!(q.compass_point(), CompassPoint::SE);
}

#[test]
fn new_york_faces_north_east() {
    let q = qibla(&NEW_YORK).unwrap();
    assert!(
        (q.bearing_degrees - 58.48).abs() < 0.1,
        "New York qibla = {:.3}°",
        q.bearing_degrees
    );
    // Haversine on the 6371 km sphere: ~10,306 km
    assert!(
        (q.distance_km - 10_306.0).abs() < 5.0,
        "New York distance = {:.1} km",
        q.distance_km
    );
    assert_eq!(q.compass_point(), CompassPoint::ENE);
}

#[test]
fn london_and_jakarta() {
    let london = qibla(&LONDON).unwrap();
    assert!((london.bearing_degrees - 118.99).abs() < 0.1, "{london:?}");
    assert!((london.distance_km - 4793.8).abs() < 2.0, "{london:?}");

    let jakarta = qibla(&JAKARTA).unwrap();
    assert!((jakarta.bearing_degrees - 295.15).abs() < 0.1, "{jakarta:?}");
    assert!((jakarta.distance_km - 7920.1).abs() < 2.0, "{jakarta:?}");
}

#[test]
fn mecca_end_to_end() {
    let q = qibla(&KAABA).unwrap();
    assert_eq!(q.distance_km, 0.0);
    // Documented convention: coincident points report true North.
    assert_eq!(q.bearing_degrees, 0.0);

    // A few metres away the bearing is well defined again.
    let near = GeoCoordinates::new(KAABA.latitude - 0.001, KAABA.longitude);
    let q = qibla(&near).unwrap();
    assert!(q.distance_km > 0.1 && q.distance_km < 0.12, "{q:?}");
    assert!(q.bearing_degrees < 1e-6 || q.bearing_degrees > 359.999, "{q:?}");
}

#[test]
fn poles_and_antimeridian_are_accepted() {
    for c in [
        GeoCoordinates::new(90.0, 0.0),
        GeoCoordinates::new(-90.0, 0.0),
        GeoCoordinates::new(0.0, 180.0),
        GeoCoordinates::new(0.0, -180.0),
    ] {
        let q = qibla(&c).unwrap();
        assert!((0.0..360.0).contains(&q.bearing_degrees), "{c}: {q:?}");
        assert!(q.distance_km > 0.0);
    }
}

#[test]
fn out_of_range_fails_fast() {
    let err = qibla(&GeoCoordinates::new(91.0, 0.0)).unwrap_err();
    assert!(matches!(err, GeoError::InvalidCoordinates { .. }));
    assert!(qibla(&GeoCoordinates::new(0.0, -180.5)).is_err());
}

#[test]
fn repeated_calls_are_bit_identical() {
    let a = qibla(&LONDON).unwrap();
    let b = qibla(&LONDON).unwrap();
    assert_eq!(a.bearing_degrees.to_bits(), b.bearing_degrees.to_bits());
    assert_eq!(a.distance_km.to_bits(), b.distance_km.to_bits());
}

fn coords() -> impl Strategy<Value = GeoCoordinates> {
    (-90.0..=90.0_f64, -180.0..=180.0_f64).prop_map(|(lat, lon)| GeoCoordinates::new(lat, lon))
}

proptest! {
    #[test]
    fn bearing_in_range(a in coords(), b in coords()) {
        let bearing = bearing_to(&a, &b).unwrap();
        prop_assert!((0.0..360.0).contains(&bearing));
    }

    #[test]
    fn distance_non_negative_and_symmetric(a in coords(), b in coords()) {
        let ab = distance_to(&a, &b).unwrap();
        let ba = distance_to(&b, &a).unwrap();
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab <= std::f64::consts::PI * 6371.0 + 1e-6);
    }

    #[test]
    fn distance_zero_to_self(a in coords()) {
        prop_assert_eq!(haversine_km(&a, &a), 0.0);
    }

    #[test]
    fn triangle_inequality(a in coords(), b in coords(), c in coords()) {
        let ab = haversine_km(&a, &b);
        let bc = haversine_km(&b, &c);
        let ac = haversine_km(&a, &c);
        prop_assert!(ac <= ab + bc + 1e-6);
    }
}
