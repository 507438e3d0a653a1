use std::collections::HashMap;
use tracing::debug;
use crate::error::{CatalogError, TransferError};
use crate::input::normalize_name;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Body {
    pub(crate) name: String,
    /// Mean orbital radius [AU]
    pub(crate) radius: f64,
    /// Orbital period [days]
    pub(crate) period: f64,
}

impl Body {
    pub(crate) fn new(name: &str, radius: f64, period: f64) -> Body {
        Body { name: normalize_name(name), radius, period }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OrbitCatalog {
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
}

impl OrbitCatalog {
    pub(crate) fn new(bodies: Vec<Body>) -> Result<OrbitCatalog, CatalogError> {
        if bodies.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if body.name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !(body.radius.is_finite() && body.radius > 0.0) {
                return Err(CatalogError::InvalidRadius { name: body.name.clone(), radius: body.radius });
            }
            if !(body.period.is_finite() && body.period > 0.0) {
                return Err(CatalogError::InvalidPeriod { name: body.name.clone(), period: body.period });
            }
            if index.insert(body.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateBody(body.name.clone()));
            }
        }

        debug!(bodies = bodies.len(), "Built orbit catalog");

        Ok(OrbitCatalog { bodies, index })
    }

    pub(crate) fn solar_system() -> OrbitCatalog {
        let bodies = Self::solar_system_bodies();
        let index = bodies.iter().enumerate().map(|(i, body)| (body.name.clone(), i)).collect();
        OrbitCatalog { bodies, index }
    }

    pub(crate) fn solar_system_bodies() -> Vec<Body> {
        vec![
            Body::new("Mercury",  0.39,    88.0),
            Body::new("Venus",    0.72,   225.0),
            Body::new("Earth",    1.00,   365.0),
            Body::new("Mars",     1.52,   687.0),
            Body::new("Jupiter",  5.20,  4331.0),
            Body::new("Saturn",   9.58, 10747.0),
            Body::new("Uranus",  19.18, 30589.0),
            Body::new("Neptune", 30.07, 59800.0),
        ]
    }

    pub(crate) fn get(&self, name: &str) -> Result<&Body, TransferError> {
        self.index.get(&normalize_name(name))
            .map(|&i| &self.bodies[i])
            .ok_or_else(|| TransferError::UnknownBody(name.to_string()))
    }

    pub(crate) fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn max_radius(&self) -> f64 {
        self.bodies.iter().map(|body| body.radius).fold(0.0, f64::max)
    }
}
