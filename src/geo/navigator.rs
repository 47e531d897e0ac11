//! Destination selection
//!
//! Every selection bumps a generation counter. A route that arrives after a
//! newer selection (or a clear) is discarded instead of being drawn over the
//! current destination.
//!
//! The HTTP API is stateless and resolves one route per request; this type is
//! for long-lived clients (a map view, a TUI) that let the user switch
//! destinations while a request is still in flight.

use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::{resolve_route, Directions, Route};
use tokio::sync::RwLock;
use tracing::debug;

/// Result of a destination selection
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The route for the current destination
    Ready(Route),
    /// A newer selection or a clear happened while this one was in flight
    Superseded,
}

#[derive(Debug, Default)]
struct Selection {
    generation: u64,
    destination: Option<Coordinates>,
    route: Option<Route>,
}

/// Tracks the selected destination and its route
pub struct Navigator<D> {
    directions: D,
    selection: RwLock<Selection>,
}

impl<D: Directions> Navigator<D> {
    pub fn new(directions: D) -> Self {
        Self {
            directions,
            selection: RwLock::new(Selection::default()),
        }
    }

    /// Select a destination and resolve its route from `origin`
    ///
    /// Errors from a superseded request are swallowed.
    pub async fn select(
        &self,
        origin: Option<Coordinates>,
        destination: Coordinates,
    ) -> Result<Navigation> {
        let generation = {
            let mut selection = self.selection.write().await;
            selection.generation += 1;
            selection.destination = Some(destination);
            selection.route = None;
            selection.generation
        };

        let result = resolve_route(&self.directions, origin, destination).await;

        let mut selection = self.selection.write().await;
        if selection.generation != generation {
            debug!("Discarding route to {} (superseded)", destination);
            return Ok(Navigation::Superseded);
        }

        let route = result?;
        selection.route = Some(route.clone());
        Ok(Navigation::Ready(route))
    }

    /// Drop the current destination and any in-flight request
    pub async fn clear(&self) {
        let mut selection = self.selection.write().await;
        selection.generation += 1;
        selection.destination = None;
        selection.route = None;
    }

    /// Route for the current destination, once resolved
    pub async fn current(&self) -> Option<Route> {
        self.selection.read().await.route.clone()
    }

    pub async fn destination(&self) -> Option<Coordinates> {
        self.selection.read().await.destination
    }
}
