//! Great-circle distance between two towers.
//!
//! Note that the earth radius here is the rounded 6371 km rather than
//! the IUGG mean radius [geo] uses, so results differ from
//! `geo::HaversineDistance` by a constant factor.

use crate::{
    constants::{DISTANCE_DECIMALS, EARTH_RADIUS_KM},
    C,
};
use geo::{point, CoordFloat, Point};

/// Returns the haversine distance in meters between `start` and `end`,
/// rounded to [`DISTANCE_DECIMALS`] places.
///
/// Points are `(x: longitude, y: latitude)` in degrees. Coordinates
/// are not validated; NaN in, NaN out.
pub fn haversine_m<T>(start: Point<T>, end: Point<T>) -> T
where
    T: CoordFloat + From<f32>,
{
    let one = T::one();
    let two = one + one;

    let lat1 = start.y().to_radians();
    let lat2 = end.y().to_radians();
    let d_lat = (end.y() - start.y()).to_radians();
    let d_lon = (end.x() - start.x()).to_radians();

    let a = (d_lat / two).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / two).sin().powi(2);
    let c = two * a.sqrt().atan2((one - a).sqrt());

    let radius_m = <T as From<f32>>::from(EARTH_RADIUS_KM) * <T as From<f32>>::from(1000.0);
    round(radius_m * c)
}

/// Returns the distance in meters between two `(lat, lon)` pairs.
pub fn distance(lat1: C, lon1: C, lat2: C, lon2: C) -> C {
    haversine_m(point!(x: lon1, y: lat1), point!(x: lon2, y: lat2))
}

fn round<T>(meters: T) -> T
where
    T: CoordFloat + From<f32>,
{
    let scale = <T as From<f32>>::from(10.0).powi(DISTANCE_DECIMALS);
    (meters * scale).round() / scale
}
