//! Facility lookup and the bundled port catalog.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

use crate::geo::{Coordinate, InvalidCoordinate};
use crate::ids::FacilityId;

const DEFAULT_PORT_DATA: &str = include_str!("../assets/ports.json");

/// Resolves facility identifiers to positions.
pub trait FacilityDirectory: Send + Sync {
    fn coordinate(&self, id: &FacilityId) -> Option<Coordinate>;

    fn contains(&self, id: &FacilityId) -> bool {
        self.coordinate(id).is_some()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("port catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("port {0} appears more than once")]
    DuplicateId(FacilityId),
    #[error("port {id} has an invalid position: {source}")]
    InvalidPosition {
        id: FacilityId,
        #[source]
        source: InvalidCoordinate,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: FacilityId,
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    ports: Vec<Port>,
}

#[derive(Debug, Clone, Default)]
pub struct PortCatalog {
    ports: Vec<Port>,
    index: HashMap<FacilityId, Coordinate>,
}

impl PortCatalog {
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed, a port id repeats, or a
    /// position is not finite.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_ports(file.ports)
    }

    /// # Errors
    ///
    /// Returns an error if a port id repeats or a position is not finite.
    pub fn from_ports(ports: Vec<Port>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(ports.len());
        for port in &ports {
            let at = Coordinate::try_new(port.lat, port.lng).map_err(|source| {
                CatalogError::InvalidPosition {
                    id: port.id.clone(),
                    source,
                }
            })?;
            if index.insert(port.id.clone(), at).is_some() {
                return Err(CatalogError::DuplicateId(port.id.clone()));
            }
        }
        Ok(Self { ports, index })
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_PORT_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<PortCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    #[must_use]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    #[must_use]
    pub fn port(&self, id: &FacilityId) -> Option<&Port> {
        self.ports.iter().find(|port| &port.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl FacilityDirectory for PortCatalog {
    fn coordinate(&self, id: &FacilityId) -> Option<Coordinate> {
        self.index.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_resolves_hubs() {
        let catalog = PortCatalog::default_catalog();
        assert!(catalog.len() >= 20);
        let singapore = catalog.coordinate(&FacilityId::from("SGSIN")).unwrap();
        assert!((singapore.lat() - 1.264).abs() < 1e-9);
        assert!(!catalog.contains(&FacilityId::from("XXNOP")));
        assert_eq!(
            catalog.port(&FacilityId::from("NLRTM")).map(|p| p.name.as_str()),
            Some("Rotterdam")
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{"ports":[
            {"id":"AAA","name":"One","lat":1.0,"lng":1.0},
            {"id":"AAA","name":"Two","lat":2.0,"lng":2.0}
        ]}"#;
        assert!(matches!(
            PortCatalog::from_json(json),
            Err(CatalogError::DuplicateId(id)) if id.as_str() == "AAA"
        ));
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        assert!(matches!(
            PortCatalog::from_json("{\"ports\": 7}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
