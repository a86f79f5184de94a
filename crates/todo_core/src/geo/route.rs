//! Origin/destination selection and route planning.
//!
//! # Invariants
//! - A route is only produced when both ends are known.
//! - A missing origin is filled from the current location, never the reverse.

use super::location::{is_same_location, LatLng};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed point of interest offered as a one-tap destination.
pub const MARKER_POSITION: LatLng = LatLng::from_raw(-27.4946, -48.656);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Neither a full origin/destination pair nor destination + current location.
    Incomplete,
    /// The current location is required but unknown.
    NoCurrentLocation,
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incomplete => write!(
                f,
                "select at least a destination and make sure the current location is available"
            ),
            Self::NoCurrentLocation => write!(f, "current location is not available"),
        }
    }
}

impl Error for RouteError {}

/// Which end of the route a selected place fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceSlot {
    Origin,
    Destination,
}

/// Route endpoints to render and fit the camera to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub origin: LatLng,
    pub destination: LatLng,
}

impl Route {
    /// Coordinates the camera should fit, origin first.
    pub fn fit_coordinates(&self) -> [LatLng; 2] {
        [self.origin, self.destination]
    }
}

/// Result of selecting a place for one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceSelection {
    pub slot: PlaceSlot,
    /// Where the camera should move.
    pub position: LatLng,
    /// The selected place is the user's current location.
    pub is_current_location: bool,
}

/// Origin/destination state of the routing screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePlanner {
    origin: Option<LatLng>,
    destination: Option<LatLng>,
    show_directions: bool,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<LatLng> {
        self.origin
    }

    pub fn destination(&self) -> Option<LatLng> {
        self.destination
    }

    /// Whether directions are currently displayed.
    pub fn shows_directions(&self) -> bool {
        self.show_directions
    }

    /// Stores `position` in `slot` and reports whether it matches `current`.
    pub fn select_place(
        &mut self,
        slot: PlaceSlot,
        position: LatLng,
        current: Option<LatLng>,
    ) -> PlaceSelection {
        match slot {
            PlaceSlot::Origin => self.origin = Some(position),
            PlaceSlot::Destination => self.destination = Some(position),
        }
        let is_current_location =
            current.is_some_and(|current| is_same_location(position, current));
        debug!(
            "event=place_selected module=geo slot={:?} is_current_location={}",
            slot, is_current_location
        );
        PlaceSelection {
            slot,
            position,
            is_current_location,
        }
    }

    /// Plans a route from the selected endpoints.
    ///
    /// With no origin selected, the current location becomes the origin.
    ///
    /// # Errors
    /// - `Incomplete` when no destination is set, or when the origin is
    ///   missing and `current` is unknown.
    pub fn trace_route(&mut self, current: Option<LatLng>) -> Result<Route, RouteError> {
        let route = match (self.origin, self.destination, current) {
            (Some(origin), Some(destination), _) => Route {
                origin,
                destination,
            },
            (None, Some(destination), Some(current)) => {
                self.origin = Some(current);
                Route {
                    origin: current,
                    destination,
                }
            }
            _ => {
                debug!("event=route_trace module=geo status=incomplete");
                return Err(RouteError::Incomplete);
            }
        };
        self.show_directions = true;
        info!("event=route_trace module=geo status=ok");
        Ok(route)
    }

    /// Routes from the current location to `MARKER_POSITION`.
    pub fn trace_to_marker(&mut self, current: Option<LatLng>) -> Result<Route, RouteError> {
        let current = current.ok_or(RouteError::NoCurrentLocation)?;
        self.origin = Some(current);
        self.destination = Some(MARKER_POSITION);
        self.show_directions = true;
        Ok(Route {
            origin: current,
            destination: MARKER_POSITION,
        })
    }

    /// Clears both endpoints and hides directions.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{PlaceSlot, RouteError, RoutePlanner, MARKER_POSITION};
    use crate::geo::location::LatLng;

    fn point(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng).unwrap()
    }

    #[test]
    fn trace_route_uses_selected_endpoints() {
        let mut planner = RoutePlanner::new();
        planner.select_place(PlaceSlot::Origin, point(1.0, 1.0), None);
        planner.select_place(PlaceSlot::Destination, point(2.0, 2.0), None);

        let route = planner.trace_route(Some(point(9.0, 9.0))).unwrap();
        assert_eq!(route.origin, point(1.0, 1.0));
        assert_eq!(route.destination, point(2.0, 2.0));
        assert!(planner.shows_directions());
    }

    #[test]
    fn trace_route_fills_missing_origin_from_current_location() {
        let mut planner = RoutePlanner::new();
        planner.select_place(PlaceSlot::Destination, point(2.0, 2.0), None);

        let route = planner.trace_route(Some(point(3.0, 3.0))).unwrap();
        assert_eq!(route.origin, point(3.0, 3.0));
        assert_eq!(planner.origin(), Some(point(3.0, 3.0)));
    }

    #[test]
    fn trace_route_is_incomplete_without_destination_or_location() {
        let mut planner = RoutePlanner::new();
        assert_eq!(
            planner.trace_route(Some(point(3.0, 3.0))),
            Err(RouteError::Incomplete)
        );

        planner.select_place(PlaceSlot::Destination, point(2.0, 2.0), None);
        assert_eq!(planner.trace_route(None), Err(RouteError::Incomplete));
        assert!(!planner.shows_directions());
    }

    #[test]
    fn select_place_flags_current_location() {
        let mut planner = RoutePlanner::new();
        let here = point(-27.5969, -48.5495);
        let selection = planner.select_place(PlaceSlot::Origin, here, Some(here));
        assert!(selection.is_current_location);
        assert_eq!(planner.origin(), Some(here));
    }

    #[test]
    fn trace_to_marker_requires_current_location() {
        let mut planner = RoutePlanner::new();
        assert_eq!(
            planner.trace_to_marker(None),
            Err(RouteError::NoCurrentLocation)
        );
        let route = planner.trace_to_marker(Some(point(0.0, 0.0))).unwrap();
        assert_eq!(route.destination, MARKER_POSITION);
        assert_eq!(route.fit_coordinates()[0], point(0.0, 0.0));
    }
}
