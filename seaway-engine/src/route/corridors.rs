//! Named shipping corridors used for ocean crossings.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::{Coordinate, haversine_km, path_length_km};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorId {
    TransPacific,
    TransAtlantic,
    CapeOfGoodHope,
    SuezCanal,
    PanamaCanal,
    IndianOceanGulf,
}

impl CorridorId {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TransPacific => "Trans-Pacific",
            Self::TransAtlantic => "Trans-Atlantic",
            Self::CapeOfGoodHope => "Cape of Good Hope",
            Self::SuezCanal => "Suez Canal",
            Self::PanamaCanal => "Panama Canal",
            Self::IndianOceanGulf => "Indian Ocean / Arabian Gulf",
        }
    }
}

impl fmt::Display for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered anchor points along a corridor. Anchors are traversed in either
/// direction.
#[derive(Debug, Clone, Copy)]
pub struct Corridor {
    pub id: CorridorId,
    anchors: &'static [(f64, f64)],
}

/// Anchor run chosen for a particular origin/destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorPlan {
    pub id: CorridorId,
    pub anchors: Vec<Coordinate>,
    pub path_km: f64,
    /// Longest open-water hop between an endpoint and the corridor.
    pub max_gap_km: f64,
}

impl Corridor {
    #[must_use]
    pub fn anchors(&self) -> Vec<Coordinate> {
        self.anchors
            .iter()
            .map(|&(lat, lng)| Coordinate::new(lat, lng))
            .collect()
    }

    /// Slice of anchors from the one nearest `origin` to the one nearest
    /// `destination`, with the total path length through them.
    #[must_use]
    pub fn plan(&self, origin: Coordinate, destination: Coordinate) -> Option<CorridorPlan> {
        let anchors = self.anchors();
        let start = nearest_index(&anchors, origin)?;
        let end = nearest_index(&anchors, destination)?;
        let slice: Vec<Coordinate> = if start <= end {
            anchors[start..=end].to_vec()
        } else {
            anchors[end..=start].iter().rev().copied().collect()
        };
        let entry_gap = haversine_km(origin, *slice.first()?);
        let exit_gap = haversine_km(*slice.last()?, destination);
        let mut path = Vec::with_capacity(slice.len() + 2);
        path.push(origin);
        path.extend(slice.iter().copied());
        path.push(destination);
        Some(CorridorPlan {
            id: self.id,
            anchors: slice,
            path_km: path_length_km(&path),
            max_gap_km: entry_gap.max(exit_gap),
        })
    }
}

fn nearest_index(anchors: &[Coordinate], point: Coordinate) -> Option<usize> {
    anchors
        .iter()
        .enumerate()
        .map(|(idx, &anchor)| (idx, haversine_km(anchor, point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

const NORTH_EUROPE_APPROACH: [(f64, f64); 4] =
    [(51.5, 2.5), (50.2, -1.0), (49.3, -6.0), (43.5, -11.0)];

const MALACCA_APPROACH: [(f64, f64); 4] = [(6.0, 97.5), (4.0, 99.8), (2.5, 101.3), (1.25, 103.9)];

pub const CORRIDORS: &[Corridor] = &[
    Corridor {
        id: CorridorId::TransPacific,
        anchors: &[
            (31.0, 123.0),
            (30.0, 128.5),
            (30.8, 133.0),
            (34.0, 142.0),
            (40.0, 155.0),
            (45.0, 170.0),
            (46.0, 179.0),
            (46.0, -170.0),
            (43.0, -150.0),
            (38.0, -132.0),
            (35.0, -123.0),
        ],
    },
    Corridor {
        id: CorridorId::TransAtlantic,
        anchors: &[
            NORTH_EUROPE_APPROACH[0],
            NORTH_EUROPE_APPROACH[1],
            NORTH_EUROPE_APPROACH[2],
            (47.0, -20.0),
            (44.0, -40.0),
            (41.0, -60.0),
            (40.2, -70.5),
        ],
    },
    Corridor {
        id: CorridorId::CapeOfGoodHope,
        anchors: &[
            NORTH_EUROPE_APPROACH[0],
            NORTH_EUROPE_APPROACH[1],
            NORTH_EUROPE_APPROACH[2],
            NORTH_EUROPE_APPROACH[3],
            (36.0, -14.0),
            (25.0, -19.0),
            (12.0, -20.0),
            (2.0, -10.0),
            (-15.0, 5.0),
            (-30.0, 10.0),
            (-36.0, 20.0),
            (-36.0, 32.0),
            (-30.0, 45.0),
            (-15.0, 65.0),
            (-5.0, 80.0),
            (6.0, 94.5),
            MALACCA_APPROACH[0],
            MALACCA_APPROACH[1],
            MALACCA_APPROACH[2],
            MALACCA_APPROACH[3],
        ],
    },
    Corridor {
        id: CorridorId::SuezCanal,
        anchors: &[
            NORTH_EUROPE_APPROACH[0],
            NORTH_EUROPE_APPROACH[1],
            NORTH_EUROPE_APPROACH[2],
            NORTH_EUROPE_APPROACH[3],
            (36.5, -9.5),
            (35.95, -5.6),
            (37.5, 0.0),
            (37.5, 11.0),
            (35.0, 18.0),
            (33.5, 28.0),
            (31.6, 32.3),
            (30.6, 32.35),
            (29.9, 32.55),
            (28.5, 33.0),
            (27.4, 34.1),
            (24.0, 36.2),
            (20.0, 38.8),
            (16.0, 41.0),
            (12.6, 43.3),
            (12.0, 45.5),
            (12.2, 51.8),
            (10.0, 60.0),
            (8.0, 72.0),
            (5.3, 80.8),
            (6.0, 90.0),
            MALACCA_APPROACH[0],
            MALACCA_APPROACH[1],
            MALACCA_APPROACH[2],
            MALACCA_APPROACH[3],
        ],
    },
    Corridor {
        id: CorridorId::PanamaCanal,
        anchors: &[
            (38.5, -73.0),
            (25.0, -72.5),
            (20.0, -73.9),
            (15.0, -76.5),
            (9.6, -79.9),
            (9.1, -79.7),
            (8.3, -79.4),
            (6.5, -81.0),
            (10.0, -90.0),
            (17.5, -107.0),
            (24.0, -113.5),
            (31.0, -119.5),
        ],
    },
    Corridor {
        id: CorridorId::IndianOceanGulf,
        anchors: &[
            MALACCA_APPROACH[3],
            MALACCA_APPROACH[2],
            MALACCA_APPROACH[1],
            MALACCA_APPROACH[0],
            (6.0, 90.0),
            (5.3, 80.8),
            (8.0, 72.0),
            (14.0, 64.0),
            (20.0, 60.5),
            (22.8, 60.2),
            (24.8, 57.8),
            (26.5, 56.6),
            (26.0, 54.0),
        ],
    },
];
