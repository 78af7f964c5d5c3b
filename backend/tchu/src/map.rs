//! The static catalog of the Swiss map: stations, routes and destination tickets.
//!
//! Positions within `stations()`, `routes()` and `tickets()` never change: they double as wire
//! identifiers, so both ends of a network game must share this exact catalog.

use crate::card::Color::{self, *};
use crate::route::Level::{self, Overground, Underground};
use crate::route::Route;
use crate::station::Station;
use crate::ticket::{Ticket, Trip};

// Swiss stations.
const BAD: Station = Station::new(0, "Baden");
const BAL: Station = Station::new(1, "Bâle");
const BEL: Station = Station::new(2, "Bellinzone");
const BER: Station = Station::new(3, "Berne");
const BRI: Station = Station::new(4, "Brigue");
const BRU: Station = Station::new(5, "Brusio");
const COI: Station = Station::new(6, "Coire");
const DAV: Station = Station::new(7, "Davos");
const DEL: Station = Station::new(8, "Delémont");
const FRI: Station = Station::new(9, "Fribourg");
const GEN: Station = Station::new(10, "Genève");
const INT: Station = Station::new(11, "Interlaken");
const KRE: Station = Station::new(12, "Kreuzlingen");
const LAU: Station = Station::new(13, "Lausanne");
const LCF: Station = Station::new(14, "La Chaux-de-Fonds");
const LOC: Station = Station::new(15, "Locarno");
const LUC: Station = Station::new(16, "Lucerne");
const LUG: Station = Station::new(17, "Lugano");
const MAR: Station = Station::new(18, "Martigny");
const NEU: Station = Station::new(19, "Neuchâtel");
const OLT: Station = Station::new(20, "Olten");
const PFA: Station = Station::new(21, "Pfäffikon");
const SAR: Station = Station::new(22, "Sargans");
const SCE: Station = Station::new(23, "Schaffhouse");
const SCZ: Station = Station::new(24, "Schwyz");
const SIO: Station = Station::new(25, "Sion");
const SOL: Station = Station::new(26, "Soleure");
const STG: Station = Station::new(27, "Saint-Gall");
const VAD: Station = Station::new(28, "Vaduz");
const WAS: Station = Station::new(29, "Wassen");
const WIN: Station = Station::new(30, "Winterthour");
const YVE: Station = Station::new(31, "Yverdon");
const ZOU: Station = Station::new(32, "Zoug");
const ZUR: Station = Station::new(33, "Zürich");

// Border stations, one name per neighboring country.
const DE1: Station = Station::new(34, "Allemagne");
const DE2: Station = Station::new(35, "Allemagne");
const DE3: Station = Station::new(36, "Allemagne");
const DE4: Station = Station::new(37, "Allemagne");
const DE5: Station = Station::new(38, "Allemagne");
const AT1: Station = Station::new(39, "Autriche");
const AT2: Station = Station::new(40, "Autriche");
const AT3: Station = Station::new(41, "Autriche");
const IT1: Station = Station::new(42, "Italie");
const IT2: Station = Station::new(43, "Italie");
const IT3: Station = Station::new(44, "Italie");
const IT4: Station = Station::new(45, "Italie");
const IT5: Station = Station::new(46, "Italie");
const FR1: Station = Station::new(47, "France");
const FR2: Station = Station::new(48, "France");
const FR3: Station = Station::new(49, "France");
const FR4: Station = Station::new(50, "France");

const DE: [Station; 5] = [DE1, DE2, DE3, DE4, DE5];
const AT: [Station; 3] = [AT1, AT2, AT3];
const IT: [Station; 5] = [IT1, IT2, IT3, IT4, IT5];
const FR: [Station; 4] = [FR1, FR2, FR3, FR4];

static STATIONS: [Station; 51] = [
    BAD, BAL, BEL, BER, BRI, BRU, COI, DAV, DEL, FRI, GEN, INT, KRE, LAU, LCF, LOC, LUC, LUG, MAR,
    NEU, OLT, PFA, SAR, SCE, SCZ, SIO, SOL, STG, VAD, WAS, WIN, YVE, ZOU, ZUR, DE1, DE2, DE3, DE4,
    DE5, AT1, AT2, AT3, IT1, IT2, IT3, IT4, IT5, FR1, FR2, FR3, FR4,
];

const fn new_route(
    id: &'static str,
    station_1: Station,
    station_2: Station,
    length: u8,
    level: Level,
    color: Option<Color>,
) -> Route {
    Route::new_unchecked(id, station_1, station_2, length, level, color)
}

static ROUTES: [Route; 87] = [
    new_route("AT1_STG_1", AT1, STG, 4, Underground, None),
    new_route("AT2_VAD_1", AT2, VAD, 1, Underground, Some(Red)),
    new_route("BAD_BAL_1", BAD, BAL, 3, Underground, Some(Red)),
    new_route("BAD_OLT_1", BAD, OLT, 2, Overground, Some(Violet)),
    new_route("BAD_ZUR_1", BAD, ZUR, 1, Overground, Some(Yellow)),
    new_route("BAL_DE1_1", BAL, DE1, 1, Underground, Some(Blue)),
    new_route("BAL_DEL_1", BAL, DEL, 2, Underground, Some(Yellow)),
    new_route("BAL_OLT_1", BAL, OLT, 2, Underground, Some(Orange)),
    new_route("BEL_LOC_1", BEL, LOC, 1, Underground, Some(Black)),
    new_route("BEL_LUG_1", BEL, LUG, 1, Underground, Some(Red)),
    new_route("BEL_LUG_2", BEL, LUG, 1, Underground, Some(Yellow)),
    new_route("BEL_WAS_1", BEL, WAS, 4, Underground, None),
    new_route("BEL_WAS_2", BEL, WAS, 4, Underground, None),
    new_route("BER_FRI_1", BER, FRI, 1, Overground, Some(Orange)),
    new_route("BER_FRI_2", BER, FRI, 1, Overground, Some(Yellow)),
    new_route("BER_INT_1", BER, INT, 3, Overground, Some(Blue)),
    new_route("BER_LUC_1", BER, LUC, 4, Overground, None),
    new_route("BER_LUC_2", BER, LUC, 4, Overground, None),
    new_route("BER_NEU_1", BER, NEU, 2, Overground, Some(Red)),
    new_route("BER_SOL_1", BER, SOL, 2, Overground, Some(Black)),
    new_route("BRI_INT_1", BRI, INT, 2, Underground, Some(White)),
    new_route("BRI_IT5_1", BRI, IT5, 3, Underground, Some(Green)),
    new_route("BRI_LOC_1", BRI, LOC, 6, Underground, None),
    new_route("BRI_SIO_1", BRI, SIO, 3, Underground, Some(Black)),
    new_route("BRI_WAS_1", BRI, WAS, 4, Underground, Some(Red)),
    new_route("BRU_COI_1", BRU, COI, 5, Underground, None),
    new_route("BRU_DAV_1", BRU, DAV, 4, Underground, Some(Blue)),
    new_route("BRU_IT2_1", BRU, IT2, 2, Underground, Some(Green)),
    new_route("COI_DAV_1", COI, DAV, 2, Underground, Some(Violet)),
    new_route("COI_SAR_1", COI, SAR, 1, Underground, Some(White)),
    new_route("COI_WAS_1", COI, WAS, 5, Underground, None),
    new_route("DAV_AT3_1", DAV, AT3, 3, Underground, None),
    new_route("DAV_IT1_1", DAV, IT1, 3, Underground, None),
    new_route("DAV_SAR_1", DAV, SAR, 3, Underground, Some(Black)),
    new_route("DE2_SCE_1", DE2, SCE, 1, Overground, Some(Yellow)),
    new_route("DE3_KRE_1", DE3, KRE, 1, Overground, Some(Orange)),
    new_route("DE4_KRE_1", DE4, KRE, 1, Overground, Some(White)),
    new_route("DE5_STG_1", DE5, STG, 2, Overground, None),
    new_route("DEL_FR4_1", DEL, FR4, 2, Underground, Some(Black)),
    new_route("DEL_LCF_1", DEL, LCF, 3, Underground, Some(White)),
    new_route("DEL_SOL_1", DEL, SOL, 1, Underground, Some(Violet)),
    new_route("FR1_MAR_1", FR1, MAR, 2, Underground, None),
    new_route("FR2_GEN_1", FR2, GEN, 1, Overground, Some(Yellow)),
    new_route("FR3_LCF_1", FR3, LCF, 2, Underground, Some(Green)),
    new_route("FRI_LAU_1", FRI, LAU, 3, Overground, Some(Red)),
    new_route("FRI_LAU_2", FRI, LAU, 3, Overground, Some(Violet)),
    new_route("GEN_LAU_1", GEN, LAU, 4, Overground, Some(Blue)),
    new_route("GEN_LAU_2", GEN, LAU, 4, Overground, Some(White)),
    new_route("GEN_YVE_1", GEN, YVE, 6, Overground, None),
    new_route("INT_LUC_1", INT, LUC, 4, Overground, Some(Violet)),
    new_route("IT3_LUG_1", IT3, LUG, 2, Underground, Some(White)),
    new_route("IT4_LOC_1", IT4, LOC, 2, Underground, Some(Orange)),
    new_route("KRE_SCE_1", KRE, SCE, 3, Underground, Some(Violet)),
    new_route("KRE_STG_1", KRE, STG, 1, Overground, Some(Green)),
    new_route("KRE_WIN_1", KRE, WIN, 2, Overground, Some(Yellow)),
    new_route("LAU_MAR_1", LAU, MAR, 4, Underground, Some(Orange)),
    new_route("LAU_NEU_1", LAU, NEU, 4, Overground, None),
    new_route("LCF_NEU_1", LCF, NEU, 1, Underground, Some(Orange)),
    new_route("LCF_YVE_1", LCF, YVE, 3, Underground, Some(Yellow)),
    new_route("LOC_LUG_1", LOC, LUG, 1, Underground, Some(Violet)),
    new_route("LUC_OLT_1", LUC, OLT, 3, Overground, Some(Green)),
    new_route("LUC_SCZ_1", LUC, SCZ, 1, Overground, Some(Blue)),
    new_route("LUC_ZOU_1", LUC, ZOU, 1, Overground, Some(Orange)),
    new_route("LUC_ZOU_2", LUC, ZOU, 1, Overground, Some(Yellow)),
    new_route("MAR_SIO_1", MAR, SIO, 2, Underground, Some(Green)),
    new_route("NEU_SOL_1", NEU, SOL, 4, Overground, Some(Green)),
    new_route("NEU_YVE_1", NEU, YVE, 2, Overground, Some(Black)),
    new_route("OLT_SOL_1", OLT, SOL, 1, Overground, Some(Blue)),
    new_route("OLT_ZUR_1", OLT, ZUR, 3, Overground, Some(White)),
    new_route("PFA_SAR_1", PFA, SAR, 3, Underground, Some(Yellow)),
    new_route("PFA_ZUR_1", PFA, ZUR, 2, Overground, Some(Blue)),
    new_route("SAR_VAD_1", SAR, VAD, 1, Underground, Some(Orange)),
    new_route("SCE_WIN_1", SCE, WIN, 1, Overground, Some(Black)),
    new_route("SCE_ZUR_1", SCE, ZUR, 3, Overground, Some(Orange)),
    new_route("SCZ_WAS_1", SCZ, WAS, 2, Underground, Some(Green)),
    new_route("SCZ_WAS_2", SCZ, WAS, 2, Underground, Some(Yellow)),
    new_route("SCZ_ZOU_1", SCZ, ZOU, 1, Overground, Some(Black)),
    new_route("SCZ_ZOU_2", SCZ, ZOU, 1, Overground, Some(White)),
    new_route("STG_VAD_1", STG, VAD, 2, Underground, Some(Blue)),
    new_route("STG_WIN_1", STG, WIN, 3, Overground, Some(Red)),
    new_route("STG_ZUR_1", STG, ZUR, 4, Overground, Some(Orange)),
    new_route("WIN_ZUR_1", WIN, ZUR, 1, Overground, Some(Blue)),
    new_route("WIN_ZUR_2", WIN, ZUR, 1, Overground, Some(Violet)),
    new_route("ZOU_ZUR_1", ZOU, ZUR, 1, Overground, Some(Green)),
    new_route("ZOU_ZUR_2", ZOU, ZUR, 1, Overground, Some(Red)),
    new_route("MAR_SIO_2", MAR, SIO, 2, Underground, Some(Yellow)),
    new_route("SIO_WAS_1", SIO, WAS, 6, Underground, None),
];

/// A ticket from every station of `from` to each neighboring country worth some points.
/// A country worth 0 points is left out.
fn ticket_to_neighbors(from: &[Station], de: u32, at: u32, it: u32, fr: u32) -> Ticket {
    let mut trips = Vec::new();
    for (country, points) in [(&DE[..], de), (&AT[..], at), (&IT[..], it), (&FR[..], fr)] {
        if points == 0 {
            continue;
        }
        for departure in from {
            for arrival in country {
                trips.push(Trip::new_unchecked(*departure, *arrival, points));
            }
        }
    }

    Ticket::new_unchecked(trips)
}

fn ticket(from: Station, to: Station, points: u32) -> Ticket {
    Ticket::new_unchecked(vec![Trip::new_unchecked(from, to, points)])
}

lazy_static! {
    static ref TICKETS: Vec<Ticket> = {
        let de_to_neighbors = ticket_to_neighbors(&DE, 0, 5, 13, 5);
        let at_to_neighbors = ticket_to_neighbors(&AT, 5, 0, 6, 14);
        let it_to_neighbors = ticket_to_neighbors(&IT, 13, 6, 0, 11);
        let fr_to_neighbors = ticket_to_neighbors(&FR, 5, 14, 11, 0);

        vec![
            ticket(BAL, BER, 5),
            ticket(BAL, BRI, 10),
            ticket(BAL, STG, 8),
            ticket(BER, COI, 10),
            ticket(BER, LUG, 12),
            ticket(BER, SCZ, 5),
            ticket(BER, ZUR, 6),
            ticket(FRI, LUC, 5),
            ticket(GEN, BAL, 13),
            ticket(GEN, BER, 8),
            ticket(GEN, SIO, 10),
            ticket(GEN, ZUR, 14),
            ticket(INT, WIN, 7),
            ticket(KRE, ZUR, 3),
            ticket(LAU, INT, 7),
            ticket(LAU, LUC, 8),
            ticket(LAU, STG, 13),
            ticket(LCF, BER, 3),
            ticket(LCF, LUC, 7),
            ticket(LCF, ZUR, 8),
            ticket(LUC, VAD, 6),
            ticket(LUC, ZUR, 2),
            ticket(LUG, COI, 10),
            ticket(NEU, WIN, 9),
            ticket(OLT, SCE, 5),
            ticket(SCE, MAR, 15),
            ticket(SCE, STG, 4),
            ticket(SCE, ZOU, 3),
            ticket(STG, BRU, 9),
            ticket(WIN, SCZ, 3),
            ticket(ZUR, BAL, 4),
            ticket(ZUR, BRI, 11),
            ticket(ZUR, LUG, 9),
            ticket(ZUR, VAD, 6),
            // City to neighboring countries.
            ticket_to_neighbors(&[BER], 6, 11, 8, 5),
            ticket_to_neighbors(&[COI], 6, 3, 5, 12),
            ticket_to_neighbors(&[LUG], 12, 13, 2, 14),
            ticket_to_neighbors(&[ZUR], 3, 7, 11, 7),
            // Country to neighboring countries, two of each.
            de_to_neighbors.clone(),
            de_to_neighbors,
            at_to_neighbors.clone(),
            at_to_neighbors,
            it_to_neighbors.clone(),
            it_to_neighbors,
            fr_to_neighbors.clone(),
            fr_to_neighbors,
        ]
    };
}

/// All stations, indexed by their id.
pub fn stations() -> &'static [Station] {
    &STATIONS
}

pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// All tickets. Country tickets appear twice.
pub fn tickets() -> &'static [Ticket] {
    &TICKETS
}

pub fn station(id: usize) -> Option<Station> {
    STATIONS.get(id).copied()
}

/// Looks a route up by its id, e.g. `"BER_FRI_1"`.
pub fn route(id: &str) -> Option<Route> {
    ROUTES.iter().find(|route| route.id() == id).copied()
}
