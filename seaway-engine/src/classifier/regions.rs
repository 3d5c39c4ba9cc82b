//! Hand-drawn geographic tables backing the classifier.
//!
//! Boxes are deliberately coarse. Each table is scanned in order, and a box
//! never straddles the antimeridian.
use crate::geo::{Coordinate, GeoBox};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Oceania,
    Antarctica,
    Greenland,
}

/// A land mass box with water bodies carved out of it.
#[derive(Debug, Clone, Copy)]
pub struct LandRegion {
    pub name: &'static str,
    pub continent: Continent,
    pub bounds: GeoBox,
    pub exclusions: &'static [GeoBox],
}

impl LandRegion {
    const fn new(
        name: &'static str,
        continent: Continent,
        bounds: GeoBox,
        exclusions: &'static [GeoBox],
    ) -> Self {
        Self {
            name,
            continent,
            bounds,
            exclusions,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        self.bounds.contains(point) && !self.exclusions.iter().any(|ex| ex.contains(point))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WaterRegion {
    pub name: &'static str,
    pub bounds: GeoBox,
}

const fn water(name: &'static str, bounds: GeoBox) -> WaterRegion {
    WaterRegion { name, bounds }
}

/// Entry of the last-resort table used when the advisory cannot answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticEntry {
    pub name: &'static str,
    pub bounds: GeoBox,
    pub water: bool,
}

const fn entry(name: &'static str, bounds: GeoBox, water: bool) -> StaticEntry {
    StaticEntry {
        name,
        bounds,
        water,
    }
}

const fn b(south: f64, north: f64, west: f64, east: f64) -> GeoBox {
    GeoBox::new(south, north, west, east)
}

// Interior water bodies --------------------------------------------------------
const LAKE_SUPERIOR: GeoBox = b(46.4, 49.0, -92.2, -84.4);
const LAKE_MICHIGAN: GeoBox = b(41.6, 46.1, -88.0, -84.8);
const LAKE_HURON: GeoBox = b(43.0, 46.3, -84.8, -79.7);
const LAKE_ERIE: GeoBox = b(41.4, 42.9, -83.5, -78.9);
const LAKE_ONTARIO: GeoBox = b(43.2, 44.2, -79.8, -76.1);
const HUDSON_BAY: GeoBox = b(51.0, 64.0, -95.0, -77.0);
const UNGAVA_BAY: GeoBox = b(58.0, 60.5, -70.0, -65.0);
const ST_LAWRENCE_ESTUARY: GeoBox = b(47.5, 49.6, -70.5, -66.5);
const COOK_INLET: GeoBox = b(59.0, 61.5, -154.0, -149.5);
const GULF_OF_FINLAND: GeoBox = b(59.2, 60.8, 22.0, 30.5);
const GULF_OF_BOTHNIA: GeoBox = b(60.0, 65.8, 17.0, 25.0);
const SKAGERRAK: GeoBox = b(57.0, 58.8, 6.5, 11.2);
const BLACK_SEA: GeoBox = b(40.5, 46.6, 27.5, 41.8);
const SEA_OF_AZOV: GeoBox = b(45.2, 47.3, 34.8, 39.3);
const SEA_OF_MARMARA: GeoBox = b(40.3, 41.1, 26.8, 30.0);
const CASPIAN_SEA: GeoBox = b(36.5, 47.5, 46.5, 54.5);
const PERSIAN_GULF: GeoBox = b(24.0, 30.5, 48.0, 56.5);
const PERSIAN_GULF_NORTH: GeoBox = b(27.8, 30.3, 47.5, 51.2);
const SEA_OF_OKHOTSK: GeoBox = b(50.0, 62.0, 135.0, 163.0);
const WHITE_SEA: GeoBox = b(63.5, 67.0, 32.0, 44.0);
const ROSS_SEA_EAST: GeoBox = b(-86.0, -70.0, 160.0, 180.0);
const ROSS_SEA_WEST: GeoBox = b(-86.0, -70.0, -180.0, -150.0);
const WEDDELL_SEA: GeoBox = b(-78.0, -70.0, -60.0, -20.0);

/// Tier 1: continental land boxes.
pub const KNOWN_LAND: &[LandRegion] = &[
    // North America
    LandRegion::new(
        "us_interior",
        Continent::NorthAmerica,
        b(31.0, 49.0, -117.0, -85.0),
        &[LAKE_SUPERIOR, LAKE_MICHIGAN],
    ),
    LandRegion::new("us_west", Continent::NorthAmerica, b(35.0, 49.0, -121.0, -117.0), &[]),
    LandRegion::new("us_northwest", Continent::NorthAmerica, b(40.0, 49.0, -123.5, -121.0), &[]),
    LandRegion::new(
        "us_east",
        Continent::NorthAmerica,
        b(34.5, 42.0, -85.0, -77.0),
        &[LAKE_ERIE],
    ),
    LandRegion::new("us_southeast", Continent::NorthAmerica, b(31.0, 34.5, -85.0, -80.5), &[]),
    LandRegion::new("us_mid_atlantic", Continent::NorthAmerica, b(40.5, 42.0, -77.0, -74.3), &[]),
    LandRegion::new(
        "new_england",
        Continent::NorthAmerica,
        b(42.0, 47.5, -77.0, -70.8),
        &[LAKE_ONTARIO],
    ),
    LandRegion::new("maine", Continent::NorthAmerica, b(44.3, 47.5, -70.8, -67.8), &[]),
    LandRegion::new("florida_panhandle", Continent::NorthAmerica, b(30.4, 31.0, -87.5, -81.5), &[]),
    LandRegion::new("florida_north", Continent::NorthAmerica, b(29.0, 30.4, -83.0, -81.5), &[]),
    LandRegion::new("florida_peninsula", Continent::NorthAmerica, b(25.5, 29.0, -81.8, -80.3), &[]),
    LandRegion::new(
        "canada",
        Continent::NorthAmerica,
        b(49.0, 60.0, -123.0, -66.5),
        &[LAKE_SUPERIOR, LAKE_HURON, HUDSON_BAY, ST_LAWRENCE_ESTUARY],
    ),
    LandRegion::new(
        "labrador",
        Continent::NorthAmerica,
        b(52.0, 60.0, -66.5, -61.0),
        &[UNGAVA_BAY],
    ),
    LandRegion::new(
        "canada_north",
        Continent::NorthAmerica,
        b(60.0, 68.0, -140.0, -95.0),
        &[HUDSON_BAY],
    ),
    LandRegion::new(
        "alaska",
        Continent::NorthAmerica,
        b(60.5, 68.0, -162.0, -141.0),
        &[COOK_INLET],
    ),
    LandRegion::new("newfoundland", Continent::NorthAmerica, b(47.6, 49.8, -58.5, -53.2), &[]),
    LandRegion::new("nova_scotia", Continent::NorthAmerica, b(44.3, 45.8, -65.0, -61.5), &[]),
    LandRegion::new("new_brunswick", Continent::NorthAmerica, b(45.5, 48.0, -69.0, -64.5), &[]),
    LandRegion::new("mexico_north", Continent::NorthAmerica, b(19.0, 31.0, -105.0, -98.0), &[]),
    LandRegion::new("mexico_south", Continent::NorthAmerica, b(16.5, 18.0, -99.0, -94.0), &[]),
    LandRegion::new("yucatan", Continent::NorthAmerica, b(18.0, 21.2, -90.2, -87.6), &[]),
    LandRegion::new("central_america", Continent::NorthAmerica, b(12.5, 15.0, -89.0, -84.0), &[]),
    LandRegion::new("costa_rica", Continent::NorthAmerica, b(8.5, 11.0, -85.5, -83.3), &[]),
    LandRegion::new("cuba_west", Continent::NorthAmerica, b(21.9, 23.0, -84.0, -80.5), &[]),
    LandRegion::new("cuba_central", Continent::NorthAmerica, b(21.3, 22.7, -80.5, -77.5), &[]),
    LandRegion::new("cuba_east", Continent::NorthAmerica, b(20.1, 21.3, -77.5, -74.3), &[]),
    LandRegion::new("hispaniola", Continent::NorthAmerica, b(18.2, 19.8, -72.5, -68.6), &[]),
    LandRegion::new("jamaica", Continent::NorthAmerica, b(17.8, 18.4, -78.3, -76.3), &[]),
    LandRegion::new("puerto_rico", Continent::NorthAmerica, b(18.0, 18.5, -67.2, -65.7), &[]),
    // South America
    LandRegion::new("andes_north", Continent::SouthAmerica, b(-5.0, 5.0, -77.0, -51.0), &[]),
    LandRegion::new("venezuela", Continent::SouthAmerica, b(5.0, 10.0, -75.0, -62.0), &[]),
    LandRegion::new("brazil_northeast", Continent::SouthAmerica, b(-20.0, -5.0, -51.0, -39.5), &[]),
    LandRegion::new(
        "brazil_southeast",
        Continent::SouthAmerica,
        b(-23.0, -20.0, -51.0, -41.5),
        &[],
    ),
    LandRegion::new("peru", Continent::SouthAmerica, b(-15.0, -5.0, -78.0, -51.0), &[]),
    LandRegion::new("bolivia", Continent::SouthAmerica, b(-18.0, -15.0, -73.0, -51.0), &[]),
    LandRegion::new("chaco", Continent::SouthAmerica, b(-23.0, -18.0, -70.0, -51.0), &[]),
    LandRegion::new("southern_cone", Continent::SouthAmerica, b(-29.0, -23.0, -70.5, -49.0), &[]),
    LandRegion::new("pampas", Continent::SouthAmerica, b(-34.0, -29.0, -71.0, -53.0), &[]),
    LandRegion::new("argentina_south", Continent::SouthAmerica, b(-41.0, -34.0, -72.5, -63.0), &[]),
    LandRegion::new("patagonia", Continent::SouthAmerica, b(-51.0, -41.0, -72.0, -68.5), &[]),
    // Europe
    LandRegion::new("iberia", Continent::Europe, b(37.0, 43.3, -9.0, -0.5), &[]),
    LandRegion::new("catalonia", Continent::Europe, b(40.5, 42.5, -0.5, 3.0), &[]),
    LandRegion::new("france", Continent::Europe, b(43.5, 49.5, -1.0, 7.5), &[]),
    LandRegion::new("france_north", Continent::Europe, b(49.5, 51.0, 1.6, 7.5), &[]),
    LandRegion::new("brittany", Continent::Europe, b(47.5, 48.6, -4.5, -1.0), &[]),
    LandRegion::new("benelux", Continent::Europe, b(51.3, 53.2, 4.8, 7.5), &[]),
    LandRegion::new("central_europe", Continent::Europe, b(46.0, 54.0, 7.5, 24.0), &[]),
    LandRegion::new(
        "eastern_europe",
        Continent::Europe,
        b(44.0, 60.0, 24.0, 40.0),
        &[BLACK_SEA, SEA_OF_AZOV, GULF_OF_FINLAND],
    ),
    LandRegion::new("caucasus", Continent::Europe, b(40.0, 43.0, 41.8, 47.5), &[]),
    LandRegion::new("volga", Continent::Europe, b(43.0, 50.0, 40.0, 46.5), &[]),
    LandRegion::new("denmark", Continent::Europe, b(54.8, 57.5, 8.2, 10.4), &[]),
    LandRegion::new("norway", Continent::Europe, b(58.0, 71.0, 5.0, 17.0), &[SKAGERRAK]),
    LandRegion::new("sweden_south", Continent::Europe, b(55.4, 60.0, 12.5, 16.5), &[]),
    LandRegion::new(
        "finland",
        Continent::Europe,
        b(60.0, 70.0, 21.5, 32.0),
        &[GULF_OF_BOTHNIA, GULF_OF_FINLAND],
    ),
    LandRegion::new("russia_north", Continent::Europe, b(60.0, 68.0, 32.0, 40.0), &[WHITE_SEA]),
    LandRegion::new("england_south", Continent::Europe, b(50.6, 53.0, -5.0, 1.5), &[]),
    LandRegion::new("cornwall", Continent::Europe, b(50.1, 50.6, -5.6, -4.2), &[]),
    LandRegion::new("britain_north", Continent::Europe, b(53.0, 58.5, -5.5, -1.8), &[]),
    LandRegion::new("ireland", Continent::Europe, b(51.8, 55.2, -10.0, -6.2), &[]),
    LandRegion::new("iceland", Continent::Europe, b(63.5, 66.3, -24.0, -13.5), &[]),
    LandRegion::new("italy_north", Continent::Europe, b(44.3, 46.0, 7.5, 12.3), &[]),
    LandRegion::new("italy_central", Continent::Europe, b(41.5, 43.5, 11.5, 14.0), &[]),
    LandRegion::new("italy_south", Continent::Europe, b(38.5, 41.5, 15.0, 16.5), &[]),
    LandRegion::new("sicily", Continent::Europe, b(37.0, 38.2, 12.5, 15.5), &[]),
    LandRegion::new("sardinia", Continent::Europe, b(39.0, 41.0, 8.4, 9.7), &[]),
    LandRegion::new("corsica", Continent::Europe, b(41.4, 43.0, 8.6, 9.5), &[]),
    LandRegion::new("balkans", Continent::Europe, b(41.0, 46.0, 19.8, 28.0), &[]),
    LandRegion::new("greece", Continent::Europe, b(38.5, 40.8, 21.0, 23.0), &[]),
    LandRegion::new("cyprus", Continent::Europe, b(34.6, 35.6, 32.4, 34.0), &[]),
    // Africa
    LandRegion::new("maghreb", Continent::Africa, b(30.0, 35.0, -8.0, 10.0), &[]),
    LandRegion::new("algeria_coast", Continent::Africa, b(35.0, 36.5, -1.0, 9.0), &[]),
    LandRegion::new("libya_west", Continent::Africa, b(30.0, 32.5, 10.0, 15.0), &[]),
    LandRegion::new("cyrenaica", Continent::Africa, b(30.5, 32.8, 20.0, 25.0), &[]),
    LandRegion::new("egypt", Continent::Africa, b(29.0, 31.0, 25.0, 32.0), &[]),
    LandRegion::new("sahara_north", Continent::Africa, b(27.0, 30.0, -9.5, 32.0), &[]),
    LandRegion::new("sahel", Continent::Africa, b(8.0, 27.0, -12.0, 32.0), &[]),
    LandRegion::new("egypt_red_sea_hills", Continent::Africa, b(22.0, 27.0, 32.0, 33.5), &[]),
    LandRegion::new("sinai", Continent::Africa, b(28.5, 31.0, 33.8, 34.8), &[]),
    LandRegion::new("sudan", Continent::Africa, b(8.0, 22.0, 32.0, 36.5), &[]),
    LandRegion::new("west_africa_coast", Continent::Africa, b(6.5, 8.0, -10.0, 9.0), &[]),
    LandRegion::new("niger_delta", Continent::Africa, b(4.5, 6.5, 3.0, 9.7), &[]),
    LandRegion::new("horn_of_africa", Continent::Africa, b(-10.0, 14.0, 25.0, 39.0), &[]),
    LandRegion::new("somalia_south", Continent::Africa, b(2.5, 11.0, 39.0, 45.0), &[]),
    LandRegion::new("somalia_north", Continent::Africa, b(5.0, 11.0, 45.0, 49.5), &[]),
    LandRegion::new("congo_basin", Continent::Africa, b(-5.0, 8.0, 9.7, 25.0), &[]),
    LandRegion::new("angola", Continent::Africa, b(-10.0, -5.0, 13.0, 25.0), &[]),
    LandRegion::new("southern_africa", Continent::Africa, b(-25.0, -10.0, 15.0, 35.0), &[]),
    LandRegion::new("mozambique", Continent::Africa, b(-16.0, -10.0, 35.0, 40.0), &[]),
    LandRegion::new("south_africa", Continent::Africa, b(-33.8, -25.0, 18.5, 30.5), &[]),
    LandRegion::new("madagascar", Continent::Africa, b(-24.5, -13.0, 44.5, 49.0), &[]),
    // Asia
    LandRegion::new(
        "anatolia",
        Continent::Asia,
        b(36.8, 41.0, 27.5, 44.0),
        &[SEA_OF_MARMARA],
    ),
    LandRegion::new("levant", Continent::Asia, b(29.0, 37.0, 36.0, 48.0), &[]),
    LandRegion::new(
        "arabia",
        Continent::Asia,
        b(19.0, 29.0, 41.0, 55.0),
        &[PERSIAN_GULF],
    ),
    LandRegion::new("hejaz", Continent::Asia, b(21.0, 29.0, 39.5, 41.0), &[]),
    LandRegion::new("yemen_highlands", Continent::Asia, b(15.5, 19.0, 43.5, 52.0), &[]),
    LandRegion::new("yemen_coast", Continent::Asia, b(13.2, 15.5, 43.6, 48.5), &[]),
    LandRegion::new("oman_south", Continent::Asia, b(17.5, 22.5, 52.0, 57.5), &[]),
    LandRegion::new("oman_north", Continent::Asia, b(22.5, 24.0, 55.5, 59.0), &[]),
    LandRegion::new(
        "iran",
        Continent::Asia,
        b(27.8, 38.0, 44.0, 62.0),
        &[PERSIAN_GULF_NORTH, CASPIAN_SEA],
    ),
    LandRegion::new("makran", Continent::Asia, b(25.8, 27.8, 57.5, 62.0), &[]),
    LandRegion::new("central_asia", Continent::Asia, b(38.0, 50.0, 46.0, 98.0), &[CASPIAN_SEA]),
    LandRegion::new("pakistan", Continent::Asia, b(25.5, 37.0, 61.0, 68.0), &[]),
    LandRegion::new(
        "siberia",
        Continent::Asia,
        b(50.0, 68.0, 40.0, 135.0),
        &[SEA_OF_OKHOTSK],
    ),
    LandRegion::new("far_east", Continent::Asia, b(60.0, 66.0, 135.0, 178.0), &[SEA_OF_OKHOTSK]),
    LandRegion::new("mongolia_manchuria", Continent::Asia, b(41.0, 50.0, 98.0, 130.0), &[]),
    LandRegion::new("china_north", Continent::Asia, b(35.0, 41.0, 98.0, 117.5), &[]),
    LandRegion::new("china_central", Continent::Asia, b(30.0, 35.0, 98.0, 119.5), &[]),
    LandRegion::new("china_west", Continent::Asia, b(22.5, 30.0, 98.0, 113.0), &[]),
    LandRegion::new("china_southeast", Continent::Asia, b(23.5, 30.0, 113.0, 116.5), &[]),
    LandRegion::new("fujian", Continent::Asia, b(25.0, 30.0, 116.5, 119.3), &[]),
    LandRegion::new("korea_south", Continent::Asia, b(34.8, 38.5, 126.5, 129.3), &[]),
    LandRegion::new("korea_north", Continent::Asia, b(38.5, 42.0, 125.0, 127.5), &[]),
    LandRegion::new("kyushu", Continent::Asia, b(31.3, 33.8, 129.8, 131.8), &[]),
    LandRegion::new("shikoku", Continent::Asia, b(33.2, 34.2, 132.6, 134.6), &[]),
    LandRegion::new("honshu_central", Continent::Asia, b(35.0, 37.0, 136.0, 140.0), &[]),
    LandRegion::new("honshu_north", Continent::Asia, b(37.0, 41.5, 139.8, 141.8), &[]),
    LandRegion::new("hokkaido", Continent::Asia, b(41.5, 45.3, 140.2, 145.5), &[]),
    LandRegion::new("taiwan", Continent::Asia, b(22.5, 25.0, 120.3, 121.5), &[]),
    LandRegion::new("hainan", Continent::Asia, b(18.5, 20.0, 108.8, 110.9), &[]),
    LandRegion::new("india_north", Continent::Asia, b(23.0, 35.0, 66.0, 92.0), &[]),
    LandRegion::new("india_central", Continent::Asia, b(21.8, 23.0, 69.5, 88.0), &[]),
    LandRegion::new("deccan", Continent::Asia, b(18.0, 21.8, 73.0, 85.0), &[]),
    LandRegion::new("india_south", Continent::Asia, b(13.0, 18.0, 74.5, 80.5), &[]),
    LandRegion::new("india_tip", Continent::Asia, b(8.5, 13.0, 76.8, 79.8), &[]),
    LandRegion::new("sri_lanka", Continent::Asia, b(6.2, 9.5, 80.0, 81.7), &[]),
    LandRegion::new("myanmar", Continent::Asia, b(17.0, 28.0, 94.0, 101.0), &[]),
    LandRegion::new("arakan", Continent::Asia, b(20.0, 28.0, 92.5, 94.0), &[]),
    LandRegion::new("indochina", Continent::Asia, b(14.0, 23.0, 98.0, 105.5), &[]),
    LandRegion::new("vietnam_south", Continent::Asia, b(11.0, 14.0, 103.0, 108.5), &[]),
    LandRegion::new("mekong_delta", Continent::Asia, b(9.0, 11.0, 104.8, 106.5), &[]),
    LandRegion::new("kra_isthmus", Continent::Asia, b(7.0, 13.0, 98.8, 99.9), &[]),
    LandRegion::new("malay_peninsula", Continent::Asia, b(2.8, 5.5, 101.5, 103.0), &[]),
    LandRegion::new("sumatra_north", Continent::Asia, b(2.5, 5.2, 96.0, 98.3), &[]),
    LandRegion::new("sumatra_central", Continent::Asia, b(0.0, 2.5, 98.8, 101.0), &[]),
    LandRegion::new("sumatra_south", Continent::Asia, b(-3.0, 0.0, 100.8, 104.0), &[]),
    LandRegion::new("lampung", Continent::Asia, b(-5.5, -3.0, 103.0, 105.5), &[]),
    LandRegion::new("java", Continent::Asia, b(-8.2, -6.8, 106.0, 114.0), &[]),
    LandRegion::new("borneo_south", Continent::Asia, b(-3.0, 1.5, 110.5, 116.5), &[]),
    LandRegion::new("borneo_central", Continent::Asia, b(1.5, 3.0, 111.5, 116.5), &[]),
    LandRegion::new("sabah", Continent::Asia, b(3.0, 6.0, 114.5, 117.5), &[]),
    LandRegion::new("luzon", Continent::Asia, b(14.0, 18.5, 120.5, 122.0), &[]),
    LandRegion::new("mindanao", Continent::Asia, b(6.5, 9.0, 123.5, 126.0), &[]),
    // Oceania
    LandRegion::new("australia_core", Continent::Oceania, b(-31.0, -17.5, 116.0, 145.5), &[]),
    LandRegion::new("top_end", Continent::Oceania, b(-17.0, -12.5, 129.5, 135.5), &[]),
    LandRegion::new("kimberley", Continent::Oceania, b(-17.5, -14.5, 124.0, 129.0), &[]),
    LandRegion::new("cape_york", Continent::Oceania, b(-17.5, -11.0, 142.0, 145.0), &[]),
    LandRegion::new("queensland", Continent::Oceania, b(-28.0, -22.0, 145.5, 150.5), &[]),
    LandRegion::new("queensland_north", Continent::Oceania, b(-22.0, -17.5, 145.5, 147.0), &[]),
    LandRegion::new("south_east_australia", Continent::Oceania, b(-37.5, -31.0, 139.0, 149.5), &[]),
    LandRegion::new("south_west_australia", Continent::Oceania, b(-33.8, -31.0, 115.8, 124.0), &[]),
    LandRegion::new("tasmania", Continent::Oceania, b(-43.5, -41.0, 144.8, 148.3), &[]),
    LandRegion::new("new_guinea", Continent::Oceania, b(-7.5, -3.0, 136.0, 145.0), &[]),
    LandRegion::new("new_guinea_south", Continent::Oceania, b(-9.0, -7.5, 139.0, 143.0), &[]),
    LandRegion::new("north_island", Continent::Oceania, b(-41.3, -37.5, 174.6, 176.8), &[]),
    LandRegion::new("northland", Continent::Oceania, b(-37.5, -35.0, 173.5, 175.5), &[]),
    LandRegion::new("south_island_north", Continent::Oceania, b(-44.0, -41.0, 170.5, 173.8), &[]),
    LandRegion::new("south_island_south", Continent::Oceania, b(-46.3, -44.0, 167.5, 170.8), &[]),
    // Polar
    LandRegion::new(
        "antarctica",
        Continent::Antarctica,
        b(-90.0, -70.0, -180.0, 180.0),
        &[ROSS_SEA_EAST, ROSS_SEA_WEST, WEDDELL_SEA],
    ),
    LandRegion::new("greenland", Continent::Greenland, b(64.0, 80.0, -50.0, -25.0), &[]),
    LandRegion::new("greenland_south", Continent::Greenland, b(60.0, 64.0, -50.0, -42.0), &[]),
];

/// Tier 2: open ocean and major sea boxes.
pub const KNOWN_WATER: &[WaterRegion] = &[
    water("pacific_north_west", b(20.0, 50.0, 141.5, 180.0)),
    water("pacific_north_east", b(20.0, 50.0, -180.0, -126.0)),
    water("california_current", b(20.0, 48.0, -126.0, -120.5)),
    water("baja_offshore_south", b(20.0, 26.0, -126.0, -113.0)),
    water("baja_offshore_north", b(26.0, 32.0, -126.0, -117.5)),
    water("pacific_east", b(-60.0, 20.0, -180.0, -106.0)),
    water("pacific_east_tropical", b(5.0, 12.0, -106.0, -86.0)),
    water("pacific_south_east", b(-60.0, 5.0, -106.0, -82.0)),
    water("pacific_chile", b(-56.0, -15.0, -82.0, -76.0)),
    water("pacific_west_central", b(-10.0, 20.0, 146.0, 180.0)),
    water("pacific_south_west", b(-60.0, -10.0, 160.0, 180.0)),
    water("philippine_sea", b(5.0, 30.5, 126.5, 146.0)),
    water("japan_south", b(29.0, 33.5, 132.0, 146.0)),
    water("atlantic_north", b(35.0, 60.0, -60.0, -10.0)),
    water("atlantic_west", b(24.5, 40.5, -80.0, -60.0)),
    water("atlantic_mid", b(0.0, 35.0, -60.0, -20.0)),
    water("canary_current", b(10.0, 35.0, -20.0, -17.5)),
    water("gulf_of_guinea", b(-10.0, 4.0, -20.0, 9.0)),
    water("atlantic_south", b(-60.0, 0.0, -35.0, 11.0)),
    water("atlantic_south_west", b(-60.0, -25.0, -48.0, -35.0)),
    water("argentine_sea", b(-60.0, -42.5, -63.0, -48.0)),
    water("cape_waters", b(-60.0, -35.0, 11.0, 40.0)),
    water("indian_central", b(-40.0, 5.0, 55.0, 95.0)),
    water("indian_east", b(-40.0, -9.0, 95.0, 113.0)),
    water("indian_south_west", b(-40.0, -25.0, 40.0, 55.0)),
    water("mascarene_basin", b(-25.0, -2.0, 50.0, 55.0)),
    water("comoros_basin", b(-13.0, -2.0, 41.0, 50.0)),
    water("somali_basin", b(-2.0, 8.0, 49.5, 65.0)),
    water("arabian_sea", b(5.0, 22.0, 57.0, 73.5)),
    water("gulf_of_oman", b(22.0, 26.8, 56.5, 62.0)),
    water("persian_gulf", PERSIAN_GULF),
    water("gulf_of_aden", b(11.0, 14.0, 43.5, 52.0)),
    water("red_sea_bab_el_mandeb", b(12.4, 15.0, 41.8, 43.45)),
    water("red_sea_south", b(15.0, 18.0, 39.8, 41.8)),
    water("red_sea_central", b(18.0, 21.0, 37.8, 40.3)),
    water("red_sea_jeddah", b(21.0, 24.0, 37.0, 38.5)),
    water("red_sea_north", b(24.0, 27.0, 35.2, 36.8)),
    water("red_sea_sinai", b(27.0, 28.0, 33.9, 35.0)),
    water("bay_of_bengal", b(5.0, 22.0, 80.5, 95.0)),
    water("mediterranean_west", b(35.0, 44.0, -6.0, 10.0)),
    water("mediterranean_central", b(31.0, 40.0, 10.0, 23.0)),
    water("mediterranean_east", b(31.0, 37.0, 23.0, 36.0)),
    water("caribbean", b(9.5, 20.5, -86.0, -60.0)),
    water("gulf_of_mexico", b(18.5, 28.5, -97.0, -81.5)),
    water("south_china_sea", b(3.0, 22.0, 105.5, 120.0)),
    water("arctic", b(80.0, 90.0, -180.0, 180.0)),
    water("southern_ocean", b(-70.0, -60.0, -180.0, 180.0)),
];

/// Tier 3: marginal seas, straits and a few land masses the coarser tiers miss.
/// First match wins; anything unmatched is land.
pub const STATIC_FALLBACK: &[StaticEntry] = &[
    entry("singapore_strait", b(0.9, 1.5, 103.4, 104.6), true),
    entry("malacca_strait", b(1.0, 6.5, 97.0, 103.0), true),
    entry("andaman_sea", b(5.0, 16.0, 94.0, 98.5), true),
    entry("java_sea", b(-7.0, -3.0, 105.5, 119.0), true),
    entry("karimata_strait", b(-3.0, 3.0, 104.0, 110.5), true),
    entry("gulf_of_thailand", b(5.0, 13.5, 99.9, 105.0), true),
    entry("celebes_sea", b(1.0, 7.0, 118.0, 126.0), true),
    entry("laccadive_sea", b(5.0, 12.0, 72.0, 77.5), true),
    entry("mozambique_channel", b(-26.0, -11.0, 35.5, 44.0), true),
    entry("suez_canal", b(29.85, 31.35, 32.15, 32.65), true),
    entry("gulf_of_suez", b(27.8, 29.9, 32.4, 33.6), true),
    entry("gulf_of_aqaba", b(28.0, 29.5, 34.4, 35.0), true),
    entry("panama_canal", b(8.8, 9.5, -80.0, -79.4), true),
    entry("gulf_of_panama", b(5.5, 8.9, -82.0, -78.0), true),
    entry("panama_isthmus", b(7.2, 9.6, -83.0, -77.2), false),
    entry("gulf_of_cadiz", b(35.5, 37.0, -10.0, -6.0), true),
    entry("bay_of_biscay", b(43.3, 47.5, -10.0, -1.2), true),
    entry("celtic_sea", b(47.5, 51.5, -11.0, -5.5), true),
    entry("english_channel", b(48.6, 51.2, -6.0, 1.8), true),
    entry("irish_sea", b(51.5, 55.0, -6.2, -3.0), true),
    entry("north_sea", b(51.0, 61.0, -2.0, 9.0), true),
    entry("norwegian_sea", b(60.0, 72.0, -10.0, 5.0), true),
    entry("barents_sea", b(68.0, 80.0, 15.0, 60.0), true),
    entry("baltic_sea", b(53.8, 60.0, 10.0, 24.0), true),
    entry("gulf_of_bothnia", GULF_OF_BOTHNIA, true),
    entry("gulf_of_finland", GULF_OF_FINLAND, true),
    entry("black_sea", BLACK_SEA, true),
    entry("sea_of_azov", SEA_OF_AZOV, true),
    entry("sea_of_marmara", SEA_OF_MARMARA, true),
    entry("aegean_sea", b(35.0, 41.0, 22.5, 27.5), true),
    entry("adriatic_sea", b(40.0, 45.8, 12.3, 19.8), true),
    entry("ligurian_sea", b(42.0, 44.3, 7.5, 10.5), true),
    entry("tyrrhenian_sea", b(38.0, 42.0, 9.7, 15.0), true),
    entry("caspian_sea", CASPIAN_SEA, true),
    entry("great_lakes_superior", LAKE_SUPERIOR, true),
    entry("great_lakes_michigan", LAKE_MICHIGAN, true),
    entry("great_lakes_huron", LAKE_HURON, true),
    entry("great_lakes_erie", LAKE_ERIE, true),
    entry("great_lakes_ontario", LAKE_ONTARIO, true),
    entry("hudson_bay", HUDSON_BAY, true),
    entry("gulf_of_st_lawrence", b(46.0, 51.5, -66.5, -58.5), true),
    entry("gulf_of_maine", b(40.5, 44.5, -70.5, -65.0), true),
    entry("bering_sea", b(51.0, 66.0, -180.0, -160.0), true),
    entry("gulf_of_alaska", b(50.0, 60.5, -160.0, -130.0), true),
    entry("sea_of_okhotsk", SEA_OF_OKHOTSK, true),
    entry("sea_of_japan", b(34.5, 51.0, 128.0, 141.0), true),
    entry("yellow_sea", b(33.0, 41.0, 117.5, 126.5), true),
    entry("east_china_sea", b(24.0, 33.0, 119.5, 130.0), true),
    entry("seto_inland_sea", b(33.8, 34.7, 131.0, 135.5), true),
    entry("coral_sea", b(-25.0, -10.0, 146.0, 160.0), true),
    entry("tasman_sea", b(-48.0, -25.0, 150.0, 160.0), true),
    entry("timor_arafura_sea", b(-12.5, -8.0, 120.0, 140.0), true),
    entry("gulf_of_carpentaria", b(-17.5, -11.0, 135.5, 142.0), true),
    entry("great_australian_bight", b(-40.0, -31.5, 124.0, 139.0), true),
    entry("bass_strait", b(-41.0, -37.8, 143.5, 149.5), true),
    entry("gulf_of_california", b(24.0, 31.5, -113.5, -107.5), true),
    entry("rio_de_la_plata", b(-36.0, -34.0, -59.0, -54.0), true),
    entry("labrador_sea", b(52.0, 66.0, -64.0, -50.0), true),
    entry("baffin_bay", b(66.0, 78.0, -80.0, -55.0), true),
    entry("greenland_sea", b(66.0, 80.0, -25.0, 15.0), true),
];
